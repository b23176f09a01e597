//! Command-line interface for validated ZIP extraction.
//!
//! Options can come from a JSON config file; flags given on the command line
//! take precedence over it.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;
use unzipper::{UnzipOptions, Unzipper};

#[derive(Parser)]
#[command(name = "unzipper")]
#[command(version, about = "Validate and extract ZIP archives", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and extract an archive
    Extract {
        /// Archive file to extract
        archive: PathBuf,

        /// Output directory
        #[arg(short, long)]
        out: PathBuf,

        /// Password for encrypted archives
        #[arg(long)]
        password: Option<String>,

        /// JSON file with extraction options
        #[arg(long)]
        config: Option<PathBuf>,

        /// Allowed member extension (repeatable)
        #[arg(long = "allow")]
        allowed_extensions: Vec<String>,

        /// Recompress extracted members as images
        #[arg(long)]
        compress_images: bool,

        /// Image quality, 1-100
        #[arg(long)]
        quality: Option<u8>,

        /// Divisor between size units
        #[arg(long)]
        size_base: Option<u64>,

        /// Maximum archive size, e.g. "10 MB"
        #[arg(long)]
        max_size: Option<String>,

        /// Delete the archive after a successful extraction
        #[arg(long)]
        delete: bool,
    },

    /// Probe archive metadata
    Probe {
        /// Archive file to probe
        archive: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract {
            archive,
            out,
            password,
            config,
            allowed_extensions,
            compress_images,
            quality,
            size_base,
            max_size,
            delete,
        } => load_options(config.as_deref()).and_then(|mut options| {
            options.allowed_extensions.extend(allowed_extensions);
            options.image_compress |= compress_images;
            options.delete_source_on_success |= delete;
            if let Some(quality) = quality {
                options.image_quality = quality;
            }
            if let Some(base) = size_base {
                options.size_unit_base = base;
            }
            if max_size.is_some() {
                options.max_size = max_size;
            }
            handle_extract(&archive, &out, options, password.as_deref())
        }),
        Commands::Probe { archive, json } => handle_probe(&archive, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn load_options(config: Option<&Path>) -> Result<UnzipOptions, Box<dyn std::error::Error>> {
    match config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(UnzipOptions::default()),
    }
}

fn handle_extract(
    archive: &Path,
    out: &Path,
    options: UnzipOptions,
    password: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!(?options, "Resolved extraction options");
    let extractor = Unzipper::new(options)?;
    extractor.unzip(archive, out, password)?;
    println!("Extracted {} to {}", archive.display(), out.display());
    Ok(())
}

fn handle_probe(archive: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let info = unzipper::probe(archive)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Format:    {}", info.format);
    println!("Entries:   {}", info.entries);
    println!("Size:      {} bytes", info.compressed_bytes);
    if let Some(total) = info.uncompressed_estimate {
        println!("Unpacked:  {} bytes", total);
    }
    println!("Encrypted: {}", info.encrypted);
    for member in &info.entry_list {
        let lock = if member.encrypted { "*" } else { " " };
        println!("  {:>12} {} {}", member.size, lock, member.path);
    }
    Ok(())
}
