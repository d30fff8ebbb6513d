//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure, with no I/O.
//!
//! # Output Format
//!
//! ## Plan
//!
//! ```text
//! Source 1000x500
//! 001 small → photo_small.webp (100x50)
//! 002 (unnamed) → photo_.webp (1000x500, original size)
//! ```
//!
//! ## Process
//!
//! ```text
//! photo.jpg (1000x500, 2 variants)
//!     001 small → photo_small.webp (100x50, 2.41kb)
//!     002 large → photo_large.webp (500x250, 18.03kb)
//! ```

use crate::imaging::{Dimensions, VariantPlan};
use crate::process::{ProcessEvent, ProcessManifest};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Variant names can be empty; show that explicitly.
fn display_name(name: &str) -> &str {
    if name.is_empty() { "(unnamed)" } else { name }
}

fn format_dimensions(dims: Dimensions) -> String {
    format!("{}x{}", dims.width, dims.height)
}

fn format_size(bytes: usize) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;

    if bytes as f64 >= MB {
        format!("{:.2}MiB", bytes as f64 / MB)
    } else if bytes as f64 >= KB {
        format!("{:.2}kb", bytes as f64 / KB)
    } else {
        format!("{}b", bytes)
    }
}

// ============================================================================
// Plan output
// ============================================================================

/// Format a variant plan: one line per variant with its output name and size.
pub fn format_plan(original: Dimensions, plans: &[VariantPlan]) -> Vec<String> {
    let mut lines = vec![format!("Source {}", format_dimensions(original))];

    if plans.is_empty() {
        lines.push("No variants".to_string());
        return lines;
    }

    for (i, plan) in plans.iter().enumerate() {
        let dims = Dimensions::new(plan.width, plan.height);
        let note = if dims == original {
            ", original size"
        } else {
            ""
        };
        lines.push(format!(
            "{} {} \u{2192} {} ({}{})",
            format_index(i + 1),
            display_name(&plan.name),
            plan.file_name,
            format_dimensions(dims),
            note
        ));
    }
    lines
}

pub fn print_plan(original: Dimensions, plans: &[VariantPlan]) {
    for line in format_plan(original, plans) {
        println!("{}", line);
    }
}

// ============================================================================
// Process output
// ============================================================================

/// Format a single process event into display lines.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::Started {
            source,
            original,
            variant_count,
        } => {
            let filename = Path::new(source)
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_else(|| source.clone());
            let noun = if *variant_count == 1 {
                "variant"
            } else {
                "variants"
            };
            vec![format!(
                "{} ({}, {} {})",
                filename,
                format_dimensions(*original),
                variant_count,
                noun
            )]
        }
        ProcessEvent::VariantWritten { index, variant } => vec![format!(
            "    {} {} \u{2192} {} ({}x{}, {})",
            format_index(*index),
            display_name(&variant.name),
            variant.file,
            variant.width,
            variant.height,
            format_size(variant.bytes)
        )],
        ProcessEvent::Skipped { source, reason } => {
            vec![format!("Skipped {}: {}", source, reason)]
        }
    }
}

/// Format the closing summary of a completed job.
pub fn format_process_summary(manifest: &ProcessManifest, output_dir: &Path) -> String {
    let total: usize = manifest.variants.iter().map(|v| v.bytes).sum();
    format!(
        "Wrote {} {} variant(s), {} \u{2192} {}",
        manifest.variants.len(),
        manifest.format,
        format_size(total),
        output_dir.display()
    )
}
