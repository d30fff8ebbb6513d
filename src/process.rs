//! Variant generation for one source image.
//!
//! Takes a source file and a [`ProcessOptions`] and writes one output file
//! per configured variant.
//!
//! ## Steps
//!
//! ```text
//! 1. Check       source extension is a readable format     (else skipped)
//! 2. Encoder     output_format override or source extension (else skipped)
//! 3. Variants    parse the variant string, or one default variant
//! 4. Decode      read and decode the source exactly once
//! 5. Render      every variant from the decoded image, in parallel
//! 6. Write       all outputs, only after every render succeeded
//! ```
//!
//! A malformed variant string, a variant name that is not a plain file name
//! part, a missing or undecodable source, or a failed render aborts the job
//! before anything is written.
//!
//! ## Output Structure
//!
//! ```text
//! variants/
//! ├── photo_small.webp
//! ├── photo_large.webp
//! └── manifest.json       # written by the CLI from the returned manifest
//! ```

use crate::config::JobConfig;
use crate::imaging::{
    BackendError, Dimensions, ImageBackend, NamingConfig, OutputFormat, RustBackend,
    plan_variants, render_variants,
};
use crate::naming::{is_supported_source, is_valid_variant_name, parse_source_name};
use crate::variants::{VariantParseError, VariantSpec, parse_variants};
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid variant configuration: {0}")]
    Variants(#[from] VariantParseError),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Source image not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("Variant name {0:?} cannot be used in a file name")]
    InvalidVariantName(String),
}

/// Settings for one processing job.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    /// Raw variant string. `None` produces one default variant.
    pub variants: Option<String>,
    /// Output extension overriding the source's.
    pub output_format: Option<String>,
    pub name_separator: String,
    pub output_dir: PathBuf,
}

impl ProcessOptions {
    /// Build ProcessOptions from JobConfig values.
    pub fn from_job_config(config: &JobConfig) -> Self {
        Self {
            variants: config.variants.clone(),
            output_format: config.output_format.clone(),
            name_separator: config.name_separator.clone(),
            output_dir: PathBuf::from(&config.output_dir),
        }
    }
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self::from_job_config(&JobConfig::default())
    }
}

/// Why a source produced no output without failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The source extension is not one we read.
    UnsupportedSource { extension: String },
    /// The requested output extension has no encoder.
    UnsupportedOutput { extension: String },
    /// The variant string was configured but declares no variants.
    NoVariants,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedSource { extension } => {
                write!(f, "unsupported source format {extension:?}")
            }
            Self::UnsupportedOutput { extension } => {
                write!(f, "no encoder for output format {extension:?}")
            }
            Self::NoVariants => write!(f, "no variants configured"),
        }
    }
}

/// A variant file that was written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputVariant {
    pub name: String,
    pub file: String,
    pub width: u32,
    pub height: u32,
    /// Encoded size in bytes.
    pub bytes: usize,
}

/// Record of a completed job.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessManifest {
    pub source: String,
    pub original: Dimensions,
    pub format: OutputFormat,
    pub variants: Vec<OutputVariant>,
}

#[derive(Debug)]
pub enum ProcessOutcome {
    Completed(ProcessManifest),
    Skipped(SkipReason),
}

/// Progress events for CLI display.
#[derive(Debug, Clone)]
pub enum ProcessEvent {
    Started {
        source: String,
        original: Dimensions,
        variant_count: usize,
    },
    VariantWritten {
        /// 1-based position in the variant list.
        index: usize,
        variant: OutputVariant,
    },
    Skipped {
        source: String,
        reason: SkipReason,
    },
}

pub fn process(
    source: &Path,
    options: &ProcessOptions,
    events: Option<Sender<ProcessEvent>>,
) -> Result<ProcessOutcome, ProcessError> {
    let backend = RustBackend::new();
    process_with_backend(&backend, source, options, events)
}

/// Process a source using a specific backend (allows testing with mock).
pub fn process_with_backend<B: ImageBackend>(
    backend: &B,
    source: &Path,
    options: &ProcessOptions,
    events: Option<Sender<ProcessEvent>>,
) -> Result<ProcessOutcome, ProcessError> {
    let source_display = source.display().to_string();
    let emit = |event: ProcessEvent| {
        if let Some(tx) = &events {
            // A closed receiver only means nobody is listening
            let _ = tx.send(event);
        }
    };
    let skip = |reason: SkipReason| -> Result<ProcessOutcome, ProcessError> {
        log::warn!("skipping {source_display}: {reason}");
        emit(ProcessEvent::Skipped {
            source: source_display.clone(),
            reason: reason.clone(),
        });
        Ok(ProcessOutcome::Skipped(reason))
    };

    let name = parse_source_name(source);
    if !is_supported_source(&name.extension) {
        return skip(SkipReason::UnsupportedSource {
            extension: name.extension,
        });
    }

    let extension = options
        .output_format
        .clone()
        .unwrap_or_else(|| name.extension.clone());
    let Some(format) = OutputFormat::from_extension(&extension.to_lowercase()) else {
        return skip(SkipReason::UnsupportedOutput { extension });
    };

    let variants = match &options.variants {
        Some(raw) => parse_variants(raw)?,
        None => vec![VariantSpec::default()],
    };
    if variants.is_empty() {
        return skip(SkipReason::NoVariants);
    }
    if let Some(variant) = variants.iter().find(|v| !is_valid_variant_name(&v.name)) {
        return Err(ProcessError::InvalidVariantName(variant.name.clone()));
    }

    let bytes = std::fs::read(source).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ProcessError::SourceNotFound(source.to_path_buf()),
        _ => ProcessError::Io(e),
    })?;
    let image = backend.decode(&bytes)?;
    let original = backend.dimensions(&image);

    emit(ProcessEvent::Started {
        source: source_display.clone(),
        original,
        variant_count: variants.len(),
    });

    let naming = NamingConfig {
        stem: &name.stem,
        separator: &options.name_separator,
        extension: &extension,
    };
    let plans = plan_variants(original, &variants, &naming);
    let rendered = render_variants(backend, &image, plans, format)?;

    std::fs::create_dir_all(&options.output_dir)?;
    let mut written = Vec::with_capacity(rendered.len());
    for (i, variant) in rendered.into_iter().enumerate() {
        let path = options.output_dir.join(&variant.plan.file_name);
        std::fs::write(&path, &variant.bytes)?;
        log::info!(
            "wrote {} ({}x{})",
            path.display(),
            variant.plan.width,
            variant.plan.height
        );

        let output = OutputVariant {
            name: variant.plan.name,
            file: variant.plan.file_name,
            width: variant.plan.width,
            height: variant.plan.height,
            bytes: variant.bytes.len(),
        };
        emit(ProcessEvent::VariantWritten {
            index: i + 1,
            variant: output.clone(),
        });
        written.push(output);
    }

    Ok(ProcessOutcome::Completed(ProcessManifest {
        source: source_display,
        original,
        format,
        variants: written,
    }))
}
