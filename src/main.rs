//! Binary entrypoint for the wwivcfg CLI.
//!
//! Commands:
//! - `init <path> [--force]` - write a factory-default CONFIG.DAT
//! - `dump <path> [--json] [--levels] [--archivers]` - decode and print
//! - `check <path>` - verify a file decodes and re-encodes byte-for-byte
//! - `export <path> --out <json>` - decode to a JSON sidecar
//! - `import <json> --out <path> [--backup]` - encode a JSON sidecar back

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use wwivcfg::legacy::ConfigRecord;
use wwivcfg::{report, store};

#[derive(Parser)]
#[command(name = "wwivcfg")]
#[command(about = "Read, check, and edit WWIV 4.x CONFIG.DAT files")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a factory-default CONFIG.DAT
    Init {
        /// Destination file
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Decode a CONFIG.DAT and print it
    Dump {
        /// File to decode
        path: PathBuf,
        /// Emit the full record as JSON instead of the text report
        #[arg(long)]
        json: bool,
        /// Include the 256-row security level table
        #[arg(long)]
        levels: bool,
        /// Include the archiver slots
        #[arg(long)]
        archivers: bool,
    },
    /// Verify a CONFIG.DAT decodes and re-encodes byte-for-byte
    Check {
        /// File to verify
        path: PathBuf,
    },
    /// Decode a CONFIG.DAT into a JSON sidecar file
    Export {
        /// File to decode
        path: PathBuf,
        /// JSON destination
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Encode a JSON sidecar back into a CONFIG.DAT
    Import {
        /// JSON source
        json: PathBuf,
        /// CONFIG.DAT destination
        #[arg(short, long)]
        out: PathBuf,
        /// Copy an existing destination to its .bak sibling first
        #[arg(long)]
        backup: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Init { path, force } => cmd_init(&path, force),
        Commands::Dump {
            path,
            json,
            levels,
            archivers,
        } => cmd_dump(&path, json, levels, archivers),
        Commands::Check { path } => cmd_check(&path),
        Commands::Export { path, out } => cmd_export(&path, &out),
        Commands::Import { json, out, backup } => cmd_import(&json, &out, backup),
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();
}

fn load_record(path: &Path) -> Result<ConfigRecord> {
    let bytes = store::read_record_file(path)?;
    ConfigRecord::decode(&bytes).with_context(|| format!("decoding {}", path.display()))
}

fn cmd_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    let rec = ConfigRecord::new_system();
    store::write_record_file(path, &rec.encode(), false)?;
    println!("wrote factory defaults to {}", path.display());
    Ok(())
}

fn cmd_dump(path: &Path, json: bool, levels: bool, archivers: bool) -> Result<()> {
    let rec = load_record(path)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&rec)?);
        return Ok(());
    }
    print!("{}", report::Summary(&rec));
    if levels {
        println!();
        print!("{}", report::SecurityLevels(&rec));
    }
    if archivers {
        println!();
        print!("{}", report::Archivers(&rec));
    }
    Ok(())
}

fn cmd_check(path: &Path) -> Result<()> {
    let bytes = store::read_record_file(path)?;
    let rec = ConfigRecord::decode(&bytes).with_context(|| format!("decoding {}", path.display()))?;
    let encoded = rec.encode();
    if encoded != bytes {
        let first = bytes
            .iter()
            .zip(&encoded)
            .position(|(a, b)| a != b)
            .unwrap_or(bytes.len());
        bail!(
            "{} does not re-encode byte-for-byte (first difference at offset {})",
            path.display(),
            first
        );
    }
    rec.validate()
        .with_context(|| format!("validating {}", path.display()))?;
    println!("{}: OK ({} bytes, round-trips exactly)", path.display(), bytes.len());
    Ok(())
}

fn cmd_export(path: &Path, out: &Path) -> Result<()> {
    let rec = load_record(path)?;
    let json = serde_json::to_string_pretty(&rec)?;
    fs::write(out, json).with_context(|| format!("writing {}", out.display()))?;
    println!("exported {} to {}", path.display(), out.display());
    Ok(())
}

fn cmd_import(json: &Path, out: &Path, backup: bool) -> Result<()> {
    let text = fs::read_to_string(json).with_context(|| format!("reading {}", json.display()))?;
    let rec: ConfigRecord =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", json.display()))?;
    rec.validate()
        .with_context(|| format!("validating {}", json.display()))?;
    store::write_record_file(out, &rec.encode(), backup)?;
    println!("imported {} to {}", json.display(), out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cli_parses_the_documented_export_and_import_forms() {
        let cli = Cli::try_parse_from(["wwivcfg", "export", "CONFIG.DAT", "--out", "config.json"])
            .unwrap();
        match cli.command {
            Commands::Export { path, out } => {
                assert_eq!(path, PathBuf::from("CONFIG.DAT"));
                assert_eq!(out, PathBuf::from("config.json"));
            }
            _ => panic!("expected the export subcommand"),
        }

        let cli = Cli::try_parse_from([
            "wwivcfg",
            "import",
            "config.json",
            "--out",
            "CONFIG.DAT",
            "--backup",
        ])
        .unwrap();
        match cli.command {
            Commands::Import { json, out, backup } => {
                assert_eq!(json, PathBuf::from("config.json"));
                assert_eq!(out, PathBuf::from("CONFIG.DAT"));
                assert!(backup);
            }
            _ => panic!("expected the import subcommand"),
        }
    }
}
