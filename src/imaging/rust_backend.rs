//! Pure Rust image processing backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, GIF, WebP) | `image::load_from_memory` |
//! | Resize | `DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode | `DynamicImage::write_to` with the variant's [`OutputFormat`] |

use super::backend::{BackendError, ImageBackend};
use super::calculations::Dimensions;
use super::params::{OutputFormat, RenderParams};
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::sync::LazyLock;

/// Source extensions the variant generator accepts, with the decoder each needs.
const SOURCE_CANDIDATES: &[(&str, ImageFormat)] = &[
    ("gif", ImageFormat::Gif),
    ("png", ImageFormat::Png),
    ("jpg", ImageFormat::Jpeg),
    ("jpeg", ImageFormat::Jpeg),
    ("webp", ImageFormat::WebP),
];

static SUPPORTED_EXTENSIONS: LazyLock<Vec<&'static str>> = LazyLock::new(|| {
    SOURCE_CANDIDATES
        .iter()
        .filter(|(_, fmt)| fmt.reading_enabled())
        .map(|(ext, _)| *ext)
        .collect()
});

/// Returns the lowercase source extensions that have working decoders compiled in.
pub fn supported_input_extensions() -> &'static [&'static str] {
    &SUPPORTED_EXTENSIONS
}

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a DynamicImage in memory.
///
/// JPEG has no alpha channel, so the image is flattened to RGB8 first. GIF and
/// WebP encoders only take 8-bit buffers.
fn encode(img: DynamicImage, format: OutputFormat) -> Result<Vec<u8>, BackendError> {
    let img = match format {
        OutputFormat::Jpeg => DynamicImage::ImageRgb8(img.to_rgb8()),
        OutputFormat::Gif | OutputFormat::WebP => DynamicImage::ImageRgba8(img.to_rgba8()),
        OutputFormat::Png => img,
    };

    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, format.image_format())
        .map_err(|e| BackendError::ProcessingFailed(format!("{format} encode failed: {e}")))?;
    Ok(buffer.into_inner())
}

impl ImageBackend for RustBackend {
    type Image = DynamicImage;

    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, BackendError> {
        image::load_from_memory(bytes)
            .map_err(|e| BackendError::ProcessingFailed(format!("Failed to decode image: {e}")))
    }

    fn dimensions(&self, image: &DynamicImage) -> Dimensions {
        Dimensions::new(image.width(), image.height())
    }

    fn render(&self, image: &DynamicImage, params: &RenderParams) -> Result<Vec<u8>, BackendError> {
        if params.width == 0 || params.height == 0 {
            return Err(BackendError::ProcessingFailed(format!(
                "Cannot render an empty {}x{} image",
                params.width, params.height
            )));
        }

        let resized = if self.dimensions(image) == Dimensions::new(params.width, params.height) {
            image.clone()
        } else {
            image.resize_exact(params.width, params.height, FilterType::Lanczos3)
        };

        encode(resized, params.format)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{RgbImage, RgbaImage};

    /// Encode a small synthetic gradient in the given format.
    fn synthetic_bytes(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buffer, format)
            .unwrap();
        buffer.into_inner()
    }

    fn render(
        backend: &RustBackend,
        image: &DynamicImage,
        w: u32,
        h: u32,
        format: OutputFormat,
    ) -> DynamicImage {
        let bytes = backend
            .render(
                image,
                &RenderParams {
                    width: w,
                    height: h,
                    format,
                },
            )
            .unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), format.image_format());
        image::load_from_memory(&bytes).unwrap()
    }

    #[test]
    fn supported_extensions_match_decodable_formats() {
        let exts = supported_input_extensions();
        for expected in &["gif", "png", "jpg", "jpeg", "webp"] {
            assert!(
                exts.contains(expected),
                "expected {expected} in supported extensions"
            );
        }
    }

    #[test]
    fn decode_reports_dimensions() {
        let backend = RustBackend::new();
        let image = backend
            .decode(&synthetic_bytes(200, 150, ImageFormat::Png))
            .unwrap();
        assert_eq!(backend.dimensions(&image), Dimensions::new(200, 150));
    }

    #[test]
    fn decode_garbage_errors() {
        let backend = RustBackend::new();
        assert!(backend.decode(b"definitely not an image").is_err());
    }

    #[test]
    fn render_resizes_to_exact_dimensions() {
        let backend = RustBackend::new();
        let image = backend
            .decode(&synthetic_bytes(256, 128, ImageFormat::Png))
            .unwrap();

        let out = render(&backend, &image, 100, 50, OutputFormat::Png);
        assert_eq!((out.width(), out.height()), (100, 50));
    }

    #[test]
    fn render_does_not_touch_the_source_image() {
        let backend = RustBackend::new();
        let image = backend
            .decode(&synthetic_bytes(256, 128, ImageFormat::Png))
            .unwrap();

        render(&backend, &image, 64, 32, OutputFormat::Png);
        let second = render(&backend, &image, 128, 128, OutputFormat::Png);

        assert_eq!(backend.dimensions(&image), Dimensions::new(256, 128));
        assert_eq!((second.width(), second.height()), (128, 128));
    }

    #[test]
    fn render_same_size_reencodes() {
        let backend = RustBackend::new();
        let image = backend
            .decode(&synthetic_bytes(40, 30, ImageFormat::Jpeg))
            .unwrap();

        let out = render(&backend, &image, 40, 30, OutputFormat::Png);
        assert_eq!((out.width(), out.height()), (40, 30));
    }

    #[test]
    fn render_every_output_format() {
        let backend = RustBackend::new();
        let image = backend
            .decode(&synthetic_bytes(64, 48, ImageFormat::Png))
            .unwrap();

        for format in [
            OutputFormat::Png,
            OutputFormat::Jpeg,
            OutputFormat::Gif,
            OutputFormat::WebP,
        ] {
            let out = render(&backend, &image, 32, 24, format);
            assert_eq!((out.width(), out.height()), (32, 24), "{format}");
        }
    }

    #[test]
    fn render_transparent_source_to_jpeg() {
        let rgba = RgbaImage::from_pixel(20, 20, image::Rgba([255, 0, 0, 10]));
        let backend = RustBackend::new();

        let out = render(
            &backend,
            &DynamicImage::ImageRgba8(rgba),
            10,
            10,
            OutputFormat::Jpeg,
        );
        assert_eq!((out.width(), out.height()), (10, 10));
    }

    #[test]
    fn render_empty_target_errors() {
        let backend = RustBackend::new();
        let image = backend
            .decode(&synthetic_bytes(4, 2, ImageFormat::Png))
            .unwrap();

        let result = backend.render(
            &image,
            &RenderParams {
                width: 1,
                height: 0,
                format: OutputFormat::Png,
            },
        );
        assert!(matches!(result, Err(BackendError::ProcessingFailed(_))));
    }
}
