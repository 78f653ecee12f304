use clap::{Parser, Subcommand};
use shotcrop::batch::{self, RunMode};
use shotcrop::config::{self, BatchConfig};
use shotcrop::imaging::{Anchor, CropSpec, IconSetConfig, RustBackend, create_icon_set};
use shotcrop::{output, scan};
use std::path::{Path, PathBuf};

fn version_string() -> &'static str {
    let on_tag = env!("SHOTCROP_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("SHOTCROP_GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

#[derive(Parser)]
#[command(name = "shotcrop")]
#[command(about = "Crop screenshots and logos to store-listing sizes")]
#[command(long_about = "\
Crop screenshots and logos to store-listing sizes

Each configured job picks one PNG from the source directory, cuts out the
largest region with the target aspect ratio, and resizes it to the exact
target size. The anchor decides which part of the image survives:

  top     keep the top, drop from the bottom
  bottom  keep the bottom, drop from the top
  left    keep the left edge, drop from the right
  right   keep the right edge, drop from the left
  center  drop equally from both sides (default)

Example shotcrop.toml:

  source_dir = \"screenshots\"

  [[jobs]]
  pattern = \"8.02.08\"
  output = \"screenshot-1-dashboard.png\"
  description = \"Dashboard View\"
  anchor = \"top\"

Run 'shotcrop gen-config' to print a documented shotcrop.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (defaults to ./shotcrop.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Source directory (overrides source_dir)
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Output directory (overrides output_dir)
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run every configured job and write the cropped images
    Crop {
        /// Also write a JSON report of the run
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Show which file each job resolves to and the crop it would get
    Check,
    /// List every PNG in the source directory and whether it is already the target size
    Inspect,
    /// Write a square icon set from a logo
    Icons {
        /// Logo image
        logo: PathBuf,
        /// Icon sizes, comma separated (default from config: 16,48,128)
        #[arg(long, value_delimiter = ',')]
        sizes: Option<Vec<u32>>,
        /// File name prefix (default from config: logo)
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Print the crop box for a source and target size
    #[command(name = "box")]
    CropBox {
        source_width: u32,
        source_height: u32,
        target_width: u32,
        target_height: u32,
        /// top, bottom, left, right or center; anything else means center
        #[arg(long, default_value = "center")]
        anchor: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print a stock shotcrop.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Command::Crop { report } => {
            let config = load_config(&cli)?;
            init_thread_pool(&config.processing);
            let batch_report = run_batch(&config, RunMode::Write)?;
            if let Some(path) = report {
                batch_report.write_json(path)?;
                println!("Report: {}", path.display());
            }
            if batch_report.failed() > 0 {
                return Err(format!("{} job(s) failed", batch_report.failed()).into());
            }
        }
        Command::Check => {
            let config = load_config(&cli)?;
            init_thread_pool(&config.processing);
            run_batch(&config, RunMode::DryRun)?;
        }
        Command::Inspect => {
            let config = load_config(&cli)?;
            let files = scan::inspect_png_files(&RustBackend::new(), &config.source_dir)?;
            output::print_dimension_audit(&files, config.target.as_tuple());
        }
        Command::Icons {
            logo,
            sizes,
            prefix,
        } => {
            let config = load_config(&cli)?;
            let icon_config = IconSetConfig {
                sizes: sizes.clone().unwrap_or(config.icons.sizes),
                prefix: prefix.clone().unwrap_or(config.icons.prefix),
                compression: config.output.compression,
            };
            let output_dir = cli
                .output
                .clone()
                .unwrap_or_else(|| logo_dir(logo).to_path_buf());
            std::fs::create_dir_all(&output_dir)?;
            let icons = create_icon_set(&RustBackend::new(), logo, &output_dir, &icon_config)?;
            output::print_icon_output(&icons);
        }
        Command::CropBox {
            source_width,
            source_height,
            target_width,
            target_height,
            anchor,
            json,
        } => {
            let spec = CropSpec {
                source_width: *source_width,
                source_height: *source_height,
                target_width: *target_width,
                target_height: *target_height,
                anchor: Anchor::from_name(anchor),
            };
            let crop = spec.crop_box()?;
            if *json {
                let value = serde_json::json!({
                    "input": spec,
                    "crop": crop,
                    "width": crop.width(),
                    "height": crop.height(),
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                output::print_crop_box(&spec, &crop);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the config file and apply command-line directory overrides.
///
/// A missing default `shotcrop.toml` means stock settings; a missing file
/// passed with `--config` is an error. Directories given on the command line
/// are relative to the working directory.
fn load_config(cli: &Cli) -> Result<BatchConfig, Box<dyn std::error::Error>> {
    let path = match &cli.config {
        Some(path) => {
            if !path.exists() {
                return Err(format!("Config file not found: {}", path.display()).into());
            }
            path.clone()
        }
        None => PathBuf::from(config::DEFAULT_CONFIG_FILE),
    };

    let mut config = config::load_config(&path)?;
    if let Some(source) = &cli.source {
        config.source_dir = source.clone();
    }
    if let Some(output) = &cli.output {
        config.output_dir = Some(output.clone());
    }
    Ok(config)
}

/// Run the batch, printing each job as it finishes and the summary at the end.
fn run_batch(
    config: &BatchConfig,
    mode: RunMode,
) -> Result<batch::BatchReport, Box<dyn std::error::Error>> {
    let target = config.target.as_tuple();
    let (tx, rx) = std::sync::mpsc::channel();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_batch_event(&event, target) {
                println!("{}", line);
            }
        }
    });

    let result = batch::run(config, mode, Some(tx));
    printer
        .join()
        .map_err(|_| "progress printer thread panicked")?;
    let report = result?;
    output::print_summary(&report, mode);
    Ok(report)
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; the user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

fn logo_dir(logo: &Path) -> &Path {
    logo.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
}
