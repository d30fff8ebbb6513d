//! Variant configuration string parser.
//!
//! A single configuration string describes every variant to produce from a
//! source image:
//!
//! ```text
//! name=small,w=96,h=64;name=large,w=500,h=500
//! └──────── segment ─┘ └──────── segment ──┘
//!           options separated by `,`, segments terminated by `;`
//! ```
//!
//! ## Grammar
//!
//! ```text
//! config  := segment (';' segment)*
//! segment := option (',' option)*
//! option  := key '=' value
//! key     := "w" | "h" | "name"
//! ```
//!
//! ## Rules
//!
//! - Whitespace anywhere is stripped before tokenizing.
//! - Empty segments and empty options are ignored (`;;;`, `,,,`).
//! - An option without exactly one `=` is skipped, as is any unknown key.
//! - Within a segment the last occurrence of a key wins.
//! - A segment whose name matches an already accepted variant
//!   (case-insensitively) ends parsing: it and everything after it is dropped.
//! - A non-numeric `w` or `h` value fails the whole configuration.
//!
//! An empty configuration parses to no variants at all. Substituting a
//! default variant when nothing is configured is the caller's job
//! (see [`VariantSpec::default`]).

use serde::{Deserialize, Serialize};
use thiserror::Error;

const TERMINATOR: char = ';';
const OPTION_SEPARATOR: char = ',';
const ASSIGNMENT: char = '=';

const WIDTH_KEY: &str = "w";
const HEIGHT_KEY: &str = "h";
const NAME_KEY: &str = "name";

/// Name given to a variant whose segment has no `name=` option.
pub const DEFAULT_VARIANT_NAME: &str = "";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VariantParseError {
    #[error("invalid value for '{key}': {value:?} is not an integer")]
    InvalidNumber { key: &'static str, value: String },
}

/// One requested output of a source image.
///
/// `width` and `height` are kept signed: zero and negative requests are
/// representable and resolve to "keep the original size" during dimension
/// calculation rather than failing here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSpec {
    /// Suffix used when naming the output file.
    pub name: String,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

impl Default for VariantSpec {
    /// The variant used when no configuration is supplied: default name,
    /// no resize.
    fn default() -> Self {
        Self {
            name: DEFAULT_VARIANT_NAME.to_string(),
            width: None,
            height: None,
        }
    }
}

/// Parse a variant configuration string into variants, in declaration order.
///
/// # Examples
/// ```
/// # use blob_variants::variants::parse_variants;
/// let variants = parse_variants("name=small,w=96,h=64; name=large,w=500").unwrap();
/// assert_eq!(variants.len(), 2);
/// assert_eq!(variants[0].name, "small");
/// assert_eq!(variants[1].height, None);
/// ```
pub fn parse_variants(raw: &str) -> Result<Vec<VariantSpec>, VariantParseError> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    let mut variants: Vec<VariantSpec> = Vec::new();
    for segment in compact.split(TERMINATOR).filter(|s| !s.is_empty()) {
        let variant = parse_segment(segment)?;

        let folded = variant.name.to_lowercase();
        if variants.iter().any(|v| v.name.to_lowercase() == folded) {
            log::debug!(
                "variant name {:?} already defined, ignoring it and any later variants",
                variant.name
            );
            break;
        }

        variants.push(variant);
    }

    Ok(variants)
}

fn parse_segment(segment: &str) -> Result<VariantSpec, VariantParseError> {
    let mut variant = VariantSpec::default();

    for option in segment.split(OPTION_SEPARATOR).filter(|o| !o.is_empty()) {
        if option.matches(ASSIGNMENT).count() != 1 {
            log::trace!("skipping malformed variant option {option:?}");
            continue;
        }
        let Some((key, value)) = option.split_once(ASSIGNMENT) else {
            continue;
        };

        match key {
            WIDTH_KEY => variant.width = Some(parse_dimension(WIDTH_KEY, value)?),
            HEIGHT_KEY => variant.height = Some(parse_dimension(HEIGHT_KEY, value)?),
            NAME_KEY => variant.name = value.to_string(),
            _ => log::trace!("skipping unknown variant option {option:?}"),
        }
    }

    Ok(variant)
}

fn parse_dimension(key: &'static str, value: &str) -> Result<i32, VariantParseError> {
    value
        .parse::<i32>()
        .map_err(|_| VariantParseError::InvalidNumber {
            key,
            value: value.to_string(),
        })
}
