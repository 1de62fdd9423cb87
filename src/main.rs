use clap::{Parser, Subcommand};
use imgnorm::{Normalizer, batch, config, output};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Flags that override values from the config file.
#[derive(clap::Args, Clone, Default)]
struct ResizeArgs {
    /// Target size in pixels
    #[arg(long)]
    image_size: Option<u32>,

    /// Resize policy: no, keep_ratio, center_crop or border
    #[arg(long)]
    resize_mode: Option<String>,

    /// Only resize images bigger than the target size
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    resize_only_if_bigger: Option<bool>,

    /// Maximum parallel workers (default: all CPU cores)
    #[arg(long)]
    max_processes: Option<usize>,
}

impl ResizeArgs {
    /// Render the flags that were given as a TOML overlay for the config layers.
    fn to_overlay(&self) -> toml::Value {
        let mut resize = toml::Table::new();
        if let Some(size) = self.image_size {
            resize.insert("image_size".into(), toml::Value::Integer(size.into()));
        }
        if let Some(mode) = &self.resize_mode {
            resize.insert("resize_mode".into(), toml::Value::String(mode.clone()));
        }
        if let Some(only) = self.resize_only_if_bigger {
            resize.insert("resize_only_if_bigger".into(), toml::Value::Boolean(only));
        }

        let mut processing = toml::Table::new();
        if let Some(n) = self.max_processes {
            let n = i64::try_from(n).unwrap_or(i64::MAX);
            processing.insert("max_processes".into(), toml::Value::Integer(n));
        }

        let mut root = toml::Table::new();
        root.insert("resize".into(), toml::Value::Table(resize));
        root.insert("processing".into(), toml::Value::Table(processing));
        toml::Value::Table(root)
    }
}

#[derive(Parser)]
#[command(name = "imgnorm")]
#[command(about = "Normalize images into fixed-size JPEGs")]
#[command(long_about = "\
Normalize images into fixed-size JPEGs

Every input is decoded, flattened onto white if it has transparency,
resized according to the resize mode, and re-encoded as JPEG.

Output layout:

  normalized/
  ├── 000000000.jpg     # Normalized image (successful inputs only)
  ├── 000000000.json    # Source, status, output and original dimensions
  ├── 000000001.json    # Failed inputs get a record with error_message
  └── stats.json        # Counts over the whole run

Settings come from imgnorm.toml (see 'imgnorm gen-config'), overridden by
command-line flags.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = "imgnorm.toml", global = true)]
    config: PathBuf,

    /// Log more detail (repeat for trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize image files and directories
    Normalize {
        /// Image files or directories to normalize
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(long, default_value = "normalized")]
        output: PathBuf,

        #[command(flatten)]
        resize: ResizeArgs,
    },
    /// Print a stock imgnorm.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Normalize {
            inputs,
            output: output_dir,
            resize,
        } => {
            let config = config::load_config(&cli.config, Some(resize.to_overlay()))?;
            init_thread_pool(&config.processing);

            let normalizer = Normalizer::from_config(&config.resize);
            let inputs = batch::collect_inputs(&inputs)?;

            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for record in rx {
                    output::print_record(&record);
                }
            });
            let summary = batch::run(&normalizer, &inputs, &output_dir, Some(tx))?;
            printer.join().ok();
            output::print_summary(&summary, &output_dir);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the tracing subscriber. Logs go to stderr so stdout stays readable.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. The user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
