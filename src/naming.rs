//! File naming for sources and variant outputs.
//!
//! A variant's file name is built from the source stem, a separator, the
//! variant name and the output extension:
//!
//! - `photo.jpg` + `_` + `small` + `webp` → `photo_small.webp`
//! - `photo.jpg` + `-` + `""` + `jpg` → `photo-.jpg` (default, unnamed variant)
//!
//! ## Source Names
//!
//! Only the final extension counts: `archive.tar.png` has stem `archive.tar`
//! and extension `png`. A name without a dot has no extension and is never a
//! supported source.

use crate::imaging::supported_input_extensions;
use std::path::Path;

/// Default separator placed between the source stem and the variant name.
pub const DEFAULT_NAME_SEPARATOR: &str = "_";

/// Result of splitting a source file name.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceName {
    /// File name without its final extension.
    pub stem: String,
    /// Final extension without the dot, case preserved. Empty if absent.
    pub extension: String,
}

/// Split a source path into stem and extension.
///
/// - `"uploads/Photo.JPG"` → stem="Photo", extension="JPG"
/// - `"archive.tar.png"` → stem="archive.tar", extension="png"
/// - `"README"` → stem="README", extension=""
pub fn parse_source_name(path: &Path) -> SourceName {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default();
    SourceName { stem, extension }
}

/// Whether a source extension is one the variant generator reads.
///
/// Case-insensitive: `JPG`, `Jpeg` and `jpeg` are all accepted.
pub fn is_supported_source(extension: &str) -> bool {
    supported_input_extensions()
        .iter()
        .any(|ext| ext.eq_ignore_ascii_case(extension))
}

/// Whether a variant name can be embedded in a file name.
///
/// Names land between the stem and the extension of a file inside the output
/// directory, so path separators and NUL are rejected.
pub fn is_valid_variant_name(name: &str) -> bool {
    !name.contains(['/', '\\', '\0'])
}

/// Build the output file name of a variant.
pub fn variant_file_name(stem: &str, separator: &str, name: &str, extension: &str) -> String {
    format!("{stem}{separator}{name}.{extension}")
}
