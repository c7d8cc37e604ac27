use clap::{Parser, Subcommand};
use site_images::{carousel, config, output, process};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "site-images")]
#[command(about = "Generate responsive WebP and JPEG variants for a static site")]
#[command(long_about = "\
Generate responsive WebP and JPEG variants for a static site

Every image listed in images.toml is resized to each width of its category
and written twice, next to the source unless an output_dir is given:

  assets/img/
  ├── mapa-google.jpg            # source
  ├── mapa-google-1200w.webp
  ├── mapa-google-1200w.jpg      # progressive
  ├── mapa-google-800w.webp
  └── ...

Without an images.toml the stock table built into the binary is used.
Run 'site-images gen-config' to print it as a starting point.")]
#[command(version)]
struct Cli {
    /// Project root; sources and output directories are relative to it
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Config file [default: <root>/images.toml]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug-level diagnostics on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate all variants listed in the config
    Process,
    /// Report which sources exist without writing anything
    Check,
    /// Write the slider init script
    Carousel {
        /// Output file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the stock images.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Process => {
            let config = load(&cli.root, cli.config.as_deref())?;
            info!(
                categories = config.categories.len(),
                entries = config.entry_count(),
                "processing"
            );
            let (tx, rx) = std::sync::mpsc::channel();
            let printer = std::thread::spawn(move || {
                for event in rx {
                    for line in output::format_process_event(&event) {
                        println!("{}", line);
                    }
                }
            });
            let result = process::run(&cli.root, &config, Some(tx));
            printer.join().map_err(|_| "progress printer panicked")?;
            output::print_summary(&result?);
        }
        Command::Check => {
            let config = load(&cli.root, cli.config.as_deref())?;
            let report = process::check(&cli.root, &config)?;
            output::print_check_report(&report);
        }
        Command::Carousel { out } => {
            let config = load(&cli.root, cli.config.as_deref())?;
            let script = carousel::render_init_script(&config.carousels)?;
            match out {
                Some(path) => {
                    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, script)?;
                    println!("Wrote {}", path.display());
                }
                None => print!("{}", script),
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Diagnostics go to stderr so stdout stays the progress report.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Load the config from `--config`, else `<root>/images.toml`.
///
/// Only the default location falls back to the stock table; an explicit path
/// must exist.
fn load(root: &Path, explicit: Option<&Path>) -> Result<config::ImageConfig, config::ConfigError> {
    if let Some(path) = explicit {
        info!(config = %path.display(), "loading config");
        return config::parse_config(&std::fs::read_to_string(path)?);
    }
    let path = root.join(config::CONFIG_FILE_NAME);
    if path.exists() {
        info!(config = %path.display(), "loading config");
    } else {
        info!(config = %path.display(), "config not found, using stock table");
    }
    config::load_config(&path)
}
