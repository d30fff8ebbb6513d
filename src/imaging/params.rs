//! Parameter types for image operations.
//!
//! These types describe *what* to render, not *how*. They are the interface
//! between [`operations`](super::operations), which decides which variants to
//! produce, and the [`backend`](super::backend), which does the pixel work.
//!
//! ## Types
//!
//! - [`OutputFormat`]: the closed set of encoders, selected by file extension.
//! - [`RenderParams`]: target dimensions and format for one rendered variant.

use image::ImageFormat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Encoders a variant can be written with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
}

impl OutputFormat {
    /// Look up the encoder for a file extension.
    ///
    /// The match is exact and case-sensitive: `"png"` resolves, `"Png"` does
    /// not. Callers normalize case before asking.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "webp" => Some(Self::WebP),
            _ => None,
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Gif => ImageFormat::Gif,
            Self::WebP => ImageFormat::WebP,
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::WebP => "image/webp",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::WebP => "webp",
        };
        f.write_str(name)
    }
}

/// Parameters for rendering one variant from a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderParams {
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_resolve() {
        assert_eq!(OutputFormat::from_extension("png"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_extension("jpg"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_extension("jpeg"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_extension("gif"), Some(OutputFormat::Gif));
        assert_eq!(OutputFormat::from_extension("webp"), Some(OutputFormat::WebP));
    }

    #[test]
    fn extension_lookup_is_case_sensitive() {
        assert_eq!(OutputFormat::from_extension("Png"), None);
        assert_eq!(OutputFormat::from_extension("JPG"), None);
    }

    #[test]
    fn unknown_extension_has_no_encoder() {
        assert_eq!(OutputFormat::from_extension("encoderthatdoesntexist"), None);
        assert_eq!(OutputFormat::from_extension("tiff"), None);
        assert_eq!(OutputFormat::from_extension(""), None);
    }

    #[test]
    fn formats_map_to_image_crate() {
        assert_eq!(OutputFormat::Jpeg.image_format(), ImageFormat::Jpeg);
        assert_eq!(OutputFormat::WebP.image_format(), ImageFormat::WebP);
    }

    #[test]
    fn mime_types() {
        assert_eq!(OutputFormat::Png.mime_type(), "image/png");
        assert_eq!(OutputFormat::Gif.mime_type(), "image/gif");
    }

    #[test]
    fn display_is_lowercase_name() {
        assert_eq!(OutputFormat::WebP.to_string(), "webp");
        assert_eq!(OutputFormat::Jpeg.to_string(), "jpeg");
    }
}
