//! # Blob Variants
//!
//! Turns one source image into a set of resized variants described by a
//! single configuration string.
//!
//! ```text
//! name=small,w=96,h=64;name=large,w=500
//!        │
//!        ▼  variants::parse_variants
//! [VariantSpec { small, 96, 64 }, VariantSpec { large, 500, - }]
//!        │
//!        ▼  imaging::calculate_resized_dimensions   (1000x500 source)
//! [96x48, 500x250]
//!        │
//!        ▼  imaging backend: decode once, resize + encode each
//! photo_small.webp, photo_large.webp
//! ```
//!
//! The parser and the dimension calculator are pure and know nothing about
//! files, codecs or configuration sources. Everything that touches pixels
//! or the filesystem sits behind them.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`variants`] | Variant string grammar → ordered [`VariantSpec`](variants::VariantSpec) list |
//! | [`imaging`] | Dimension math, output formats, the [`ImageBackend`](imaging::ImageBackend) trait and the `image`-crate backend |
//! | [`naming`] | Source stem/extension handling and variant file names |
//! | [`config`] | `variants.toml` loading, merging and validation |
//! | [`process`] | One source file → variant files + manifest |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Never Upscale, Never Fail on Sizes
//!
//! A variant that asks for more pixels than the source has, or for zero or
//! negative pixels, is produced at the original size. Sloppy configuration
//! degrades to a copy instead of a failed job. The only configuration error
//! that fails a job is a `w`/`h` value that is not an integer.
//!
//! ## First Definition Wins
//!
//! Variant names become file names, so they must be unique. The first
//! definition of a name is kept and a repeated name ends the variant list.
//!
//! ## Decode Once
//!
//! The source is decoded once into an immutable image and every variant is
//! rendered from a fresh copy of it, in parallel with rayon. Nothing is
//! written until every variant has rendered.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod process;
pub mod variants;
