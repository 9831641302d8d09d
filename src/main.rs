//! goban-svg CLI
//!
//! Usage:
//!   goban-svg [OPTIONS]
//!
//! Options:
//!   -c, --config <FILE>   Configuration file (TOML format) [default: goban.toml]
//!   -s, --sgf <FILE>      Overlay this SGF game (enables the overlay)
//!   -o, --out-dir <DIR>   Directory for the SVG files [default: .]
//!   -n, --dry-run         List the files that would be written
//!   -h, --help            Print help

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use log::{info, warn};

use goban_svg::{generate, Config, Error};

const DEFAULT_CONFIG_PATH: &str = "goban.toml";

#[derive(Parser)]
#[command(name = "goban-svg")]
#[command(about = "Printable Go board diagrams as SVG, with optional SGF overlay")]
struct Cli {
    /// Configuration file (TOML format)
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// SGF game to overlay; overrides `sgf.path` and enables the overlay
    #[arg(short, long)]
    sgf: Option<PathBuf>,

    /// Directory the SVG files are written to
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Print the file names without writing anything
    #[arg(short = 'n', long)]
    dry_run: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match load_config(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config '{}': {}", cli.config.display(), e);
            std::process::exit(1);
        }
    };
    if let Some(path) = &cli.sgf {
        config = config.with_sgf_path(path);
    }

    let (sgf_name, sgf_source) = match read_sgf(&config) {
        Ok(Some((name, source))) => (name, Some(source)),
        Ok(None) => (String::new(), None),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let documents = match generate(&config, sgf_source.as_deref()) {
        Ok(documents) => documents,
        Err(Error::Parse(errors)) => {
            let source = sgf_source.as_deref().unwrap_or_default();
            for error in &errors {
                eprint!("{}", error.format(source, &sgf_name));
            }
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if !cli.dry_run {
        if let Err(e) = fs::create_dir_all(&cli.out_dir) {
            eprintln!("Error creating '{}': {}", cli.out_dir.display(), e);
            std::process::exit(1);
        }
    }

    for doc in &documents {
        let path = cli.out_dir.join(&doc.file_name);
        if cli.dry_run {
            println!("Would write {}", path.display());
            continue;
        }
        if let Err(e) = fs::write(&path, &doc.svg) {
            eprintln!("Error writing '{}': {}", path.display(), e);
            std::process::exit(1);
        }
        println!("Wrote {}", path.display());
    }
}

/// A missing file at the default location means "use the defaults"
fn load_config(path: &Path) -> Result<Config, goban_svg::ConfigError> {
    if path == Path::new(DEFAULT_CONFIG_PATH) && !path.exists() {
        info!("no {} found, using default configuration", DEFAULT_CONFIG_PATH);
        return Ok(Config::default());
    }
    Config::from_file(path)
}

/// Read the configured SGF file, if the overlay is enabled and the file exists
fn read_sgf(config: &Config) -> std::io::Result<Option<(String, String)>> {
    if !config.sgf.enabled {
        return Ok(None);
    }
    let Some(path) = &config.sgf.path else {
        warn!("sgf.enabled is set but no sgf.path is configured; exporting empty boards");
        return Ok(None);
    };
    if !path.exists() {
        warn!("SGF file '{}' not found; exporting empty boards", path.display());
        return Ok(None);
    }
    let source = fs::read_to_string(path)?;
    Ok(Some((path.display().to_string(), source)))
}
