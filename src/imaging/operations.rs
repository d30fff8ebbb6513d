//! High-level image operations.
//!
//! These functions combine calculations with backend execution. Planning is
//! pure: it turns variant specs into concrete output names and dimensions.
//! Rendering hands the plans to a backend, all against one decoded image.

use super::backend::{BackendError, ImageBackend};
use super::calculations::{Dimensions, calculate_resized_dimensions};
use super::params::{OutputFormat, RenderParams};
use crate::naming::variant_file_name;
use crate::variants::VariantSpec;
use rayon::prelude::*;
use serde::Serialize;

/// Result type for image operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Naming inputs shared by every variant of one source image.
#[derive(Debug, Clone)]
pub struct NamingConfig<'a> {
    /// Source file name without extension.
    pub stem: &'a str,
    /// Placed between the stem and the variant name.
    pub separator: &'a str,
    /// Extension of the output files, as it should appear in the file name.
    pub extension: &'a str,
}

/// One variant resolved against a concrete source image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantPlan {
    pub name: String,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}

/// A rendered variant, ready to be written out.
#[derive(Debug, Clone)]
pub struct RenderedVariant {
    pub plan: VariantPlan,
    pub bytes: Vec<u8>,
}

/// Plan every variant for a source of the given size, in variant order.
///
/// A derived side that rounds down to zero on a very thin source is raised to
/// one pixel, so every plan of a non-empty source is renderable.
pub fn plan_variants(
    original: Dimensions,
    variants: &[VariantSpec],
    naming: &NamingConfig<'_>,
) -> Vec<VariantPlan> {
    variants
        .iter()
        .map(|variant| {
            let Dimensions { width, height } =
                calculate_resized_dimensions(original, variant.width, variant.height);
            VariantPlan {
                name: variant.name.clone(),
                file_name: variant_file_name(
                    naming.stem,
                    naming.separator,
                    &variant.name,
                    naming.extension,
                ),
                width: at_least_one_pixel(width, original.width),
                height: at_least_one_pixel(height, original.height),
            }
        })
        .collect()
}

fn at_least_one_pixel(side: u32, original: u32) -> u32 {
    if side == 0 && original > 0 { 1 } else { side }
}

/// Render all plans from one decoded image.
///
/// Plans are rendered in parallel; the output keeps plan order. The first
/// failing render fails the whole batch.
pub fn render_variants<B: ImageBackend>(
    backend: &B,
    image: &B::Image,
    plans: Vec<VariantPlan>,
    format: OutputFormat,
) -> Result<Vec<RenderedVariant>> {
    plans
        .into_par_iter()
        .map(|plan| -> Result<RenderedVariant> {
            let bytes = backend.render(
                image,
                &RenderParams {
                    width: plan.width,
                    height: plan.height,
                    format,
                },
            )?;
            Ok(RenderedVariant { plan, bytes })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;
    use crate::variants::parse_variants;

    const NAMING: NamingConfig<'static> = NamingConfig {
        stem: "photo",
        separator: "_",
        extension: "png",
    };

    #[test]
    fn plan_follows_variant_order() {
        let variants = parse_variants("name=small,w=96,h=64;name=large,w=500,h=500").unwrap();
        let plans = plan_variants(Dimensions::new(1000, 800), &variants, &NAMING);

        assert_eq!(
            plans,
            vec![
                VariantPlan {
                    name: "small".into(),
                    file_name: "photo_small.png".into(),
                    width: 96,
                    height: 77,
                },
                VariantPlan {
                    name: "large".into(),
                    file_name: "photo_large.png".into(),
                    width: 500,
                    height: 500,
                },
            ]
        );
    }

    #[test]
    fn plan_keeps_original_for_oversized_requests() {
        let variants = parse_variants("name=huge,w=5000").unwrap();
        let plans = plan_variants(Dimensions::new(256, 128), &variants, &NAMING);
        assert_eq!((plans[0].width, plans[0].height), (256, 128));
    }

    #[test]
    fn plan_default_variant() {
        let plans = plan_variants(
            Dimensions::new(256, 128),
            &[VariantSpec::default()],
            &NAMING,
        );
        assert_eq!(plans[0].file_name, "photo_.png");
        assert_eq!((plans[0].width, plans[0].height), (256, 128));
    }

    #[test]
    fn plan_thin_source_keeps_one_pixel() {
        let variants = parse_variants("name=wide,w=100;name=tall,h=100").unwrap();

        let plans = plan_variants(Dimensions::new(1000, 1), &variants, &NAMING);
        assert_eq!((plans[0].width, plans[0].height), (100, 1));

        let plans = plan_variants(Dimensions::new(1, 1000), &variants, &NAMING);
        assert_eq!((plans[0].width, plans[0].height), (1, 1000));
        assert_eq!((plans[1].width, plans[1].height), (1, 100));
    }

    #[test]
    fn plan_empty_source_stays_empty() {
        let variants = parse_variants("name=a,w=10").unwrap();
        let plans = plan_variants(Dimensions::new(0, 0), &variants, &NAMING);
        assert_eq!((plans[0].width, plans[0].height), (0, 0));
    }

    #[test]
    fn plan_nothing_for_no_variants() {
        assert!(plan_variants(Dimensions::new(10, 10), &[], &NAMING).is_empty());
    }

    #[test]
    fn render_uses_planned_dimensions() {
        let backend = MockBackend::with_dimensions(256, 128);
        let image = backend.decode(&[]).unwrap();
        let variants = parse_variants("name=a,w=100;name=b,h=100;name=c,w=128,h=128").unwrap();
        let plans = plan_variants(backend.dimensions(&image), &variants, &NAMING);

        let rendered = render_variants(&backend, &image, plans, OutputFormat::WebP).unwrap();

        let names: Vec<&str> = rendered.iter().map(|r| r.plan.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(rendered[0].bytes, b"100x50.webp");
        assert_eq!(rendered[1].bytes, b"200x100.webp");
        assert_eq!(rendered[2].bytes, b"128x128.webp");

        assert_eq!(
            backend.get_renders(),
            vec![
                (100, 50, OutputFormat::WebP),
                (128, 128, OutputFormat::WebP),
                (200, 100, OutputFormat::WebP),
            ]
        );
    }

    #[test]
    fn render_failure_fails_the_batch() {
        let mut backend = MockBackend::with_dimensions(256, 128);
        backend.fail_render_width = Some(100);
        let image = backend.decode(&[]).unwrap();
        let variants = parse_variants("name=a,w=100;name=b,w=50").unwrap();
        let plans = plan_variants(backend.dimensions(&image), &variants, &NAMING);

        assert!(render_variants(&backend, &image, plans, OutputFormat::Png).is_err());
    }
}
