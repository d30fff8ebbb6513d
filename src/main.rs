use blob_variants::imaging::{Dimensions, NamingConfig, plan_variants};
use blob_variants::process::{ProcessOptions, ProcessOutcome};
use blob_variants::variants::{VariantSpec, parse_variants};
use blob_variants::{config, output, process};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "blob-variants")]
#[command(about = "Generate resized image variants from a variant string")]
#[command(long_about = "\
Generate resized image variants from a variant string

A variant string lists one variant per segment, segments terminated by ';',
options separated by ',':

  name=small,w=96,h=64;name=large,w=500

  name   suffix of the output file: <stem><separator><name>.<ext>
  w, h   target width/height; give one to keep the aspect ratio

Images are never upscaled, zero or negative sizes keep the original, and a
repeated name ends the list.

Run 'blob-variants gen-config' to generate a documented variants.toml.")]
#[command(version)]
struct Cli {
    /// Config file (missing file = defaults)
    #[arg(long, default_value = "variants.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

/// Flags overriding config file values.
#[derive(clap::Args, Clone)]
struct VariantArgs {
    /// Variant string, e.g. "name=small,w=96;name=large,w=500"
    #[arg(long)]
    variants: Option<String>,

    /// Separator between the source stem and the variant name
    #[arg(long)]
    separator: Option<String>,
}

#[derive(Subcommand)]
enum Command {
    /// Show the variants a source of the given size would produce
    Plan {
        #[command(flatten)]
        args: VariantArgs,
        /// Source width in pixels
        #[arg(long)]
        width: u32,
        /// Source height in pixels
        #[arg(long)]
        height: u32,
        /// Source file stem used for output names
        #[arg(long, default_value = "image")]
        name: String,
        /// Output extension used for output names
        #[arg(long, default_value = "png")]
        ext: String,
    },
    /// Render every variant of a source image
    Process {
        #[command(flatten)]
        args: VariantArgs,
        /// Source image (gif, png, jpg, jpeg, webp)
        source: PathBuf,
        /// Output directory
        #[arg(long)]
        output: Option<PathBuf>,
        /// Output format (png, jpg, jpeg, gif, webp); default keeps the source's
        #[arg(long)]
        format: Option<String>,
    },
    /// Print a stock variants.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Plan {
            args,
            width,
            height,
            name,
            ext,
        } => {
            let job = resolve_job_config(&cli.config, &args)?;
            let variants = match &job.variants {
                Some(raw) => parse_variants(raw)?,
                None => vec![VariantSpec::default()],
            };
            let original = Dimensions::new(width, height);
            let naming = NamingConfig {
                stem: &name,
                separator: &job.name_separator,
                extension: &ext,
            };
            let plans = plan_variants(original, &variants, &naming);
            output::print_plan(original, &plans);
        }
        Command::Process {
            args,
            source,
            output: output_dir,
            format,
        } => {
            let mut job = resolve_job_config(&cli.config, &args)?;
            if format.is_some() {
                job.output_format = format;
            }
            let mut options = ProcessOptions::from_job_config(&job);
            if let Some(dir) = output_dir {
                options.output_dir = dir;
            }
            init_thread_pool(&job.processing);

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_process_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = process::process(&source, &options, Some(tx));
            // The sender is gone once process returns, so the printer drains and exits
            printer
                .join()
                .map_err(|_| "output thread panicked".to_string())?;

            if let ProcessOutcome::Completed(manifest) = result? {
                let manifest_path = options.output_dir.join("manifest.json");
                let json = serde_json::to_string_pretty(&manifest)?;
                std::fs::write(&manifest_path, json)?;
                println!(
                    "{}",
                    output::format_process_summary(&manifest, &options.output_dir)
                );
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config file and apply command-line overrides.
fn resolve_job_config(
    path: &std::path::Path,
    args: &VariantArgs,
) -> Result<config::JobConfig, config::ConfigError> {
    let mut job = config::load_config(path)?;
    if let Some(variants) = &args.variants {
        job.variants = Some(variants.clone());
    }
    if let Some(separator) = &args.separator {
        job.name_separator = separator.clone();
    }
    job.validate()?;
    Ok(job)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
