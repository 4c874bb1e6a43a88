//! Cardex CLI - Command-line tool for PNG character cards.
//!
//! This is the main entry point for the Cardex command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use rayon::prelude::*;

use cardex::prelude::*;

/// Cardex - character card inspection tool
#[derive(Parser)]
#[command(name = "cardex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a summary of a character card
    Info {
        /// Character card PNG
        #[arg(short, long, env = "CARDEX_INPUT")]
        input: PathBuf,
    },

    /// Export the card fields as JSON
    Export {
        /// Character card PNG
        #[arg(short, long, env = "CARDEX_INPUT")]
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long, env = "CARDEX_OUTPUT")]
        output: PathBuf,

        /// Pretty-print the JSON
        #[arg(short, long)]
        pretty: bool,
    },

    /// Write the card image without the embedded card data
    Avatar {
        /// Character card PNG
        #[arg(short, long, env = "CARDEX_INPUT")]
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long, env = "CARDEX_OUTPUT")]
        output: PathBuf,
    },

    /// List the PNG chunks of a file
    Chunks {
        /// PNG file
        #[arg(short, long, env = "CARDEX_INPUT")]
        input: PathBuf,
    },

    /// Parse every PNG card in a directory
    Scan {
        /// Directory to search recursively
        #[arg(short, long)]
        dir: PathBuf,

        /// Filter pattern for file names (glob-style)
        #[arg(short, long)]
        filter: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Info { input } => {
            cmd_info(&input)?;
        }
        Commands::Export { input, output, pretty } => {
            cmd_export(&input, &output, pretty)?;
        }
        Commands::Avatar { input, output } => {
            cmd_avatar(&input, &output)?;
        }
        Commands::Chunks { input } => {
            cmd_chunks(&input)?;
        }
        Commands::Scan { dir, filter } => {
            cmd_scan(&dir, filter.as_deref())?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn cmd_info(input: &Path) -> Result<()> {
    let data = fs::read(input).context("Failed to read input file")?;
    let chunks = extract_chunks(&data).context("Failed to read PNG chunks")?;
    debug!("{}: {} chunks", input.display(), chunks.len());

    let character = Character::from_chunks(&chunks).context("Failed to parse character card")?;
    let metadata = character.metadata();
    info!("{}: {} card", input.display(), character.version());

    println!("Name:        {}", character.name());
    println!("Format:      {}", character.version());
    if !metadata.creator.is_empty() {
        println!("Creator:     {}", metadata.creator);
    }
    if !metadata.character_version.is_empty() {
        println!("Version:     {}", metadata.character_version);
    }
    if !metadata.tags.is_empty() {
        println!("Tags:        {}", metadata.tags.join(", "));
    }
    println!(
        "Greeting:    {}",
        if metadata.greeting().is_empty() { "no" } else { "yes" }
    );
    if !metadata.alternate_greetings.is_empty() {
        println!("Alternates:  {}", metadata.alternate_greetings.len());
    }
    println!(
        "Avatar:      {}",
        if character.has_explicit_avatar() {
            character.avatar().to_string()
        } else {
            format!("embedded image ({} bytes)", character.avatar_png().len())
        }
    );
    println!("Chunks:      {}", chunks.len());

    if !character.description().is_empty() {
        println!("\n{}", character.description());
    }

    Ok(())
}

fn cmd_export(input: &Path, output: &Path, pretty: bool) -> Result<()> {
    println!("Exporting: {} -> {}", input.display(), output.display());

    let character = Character::from_path(input).context("Failed to parse character card")?;
    let json = if pretty {
        serde_json::to_string_pretty(character.metadata())
    } else {
        serde_json::to_string(character.metadata())
    }
    .context("Failed to serialize card")?;

    fs::write(output, json).context("Failed to write output file")?;

    println!("Exported {} ({} card)", character.name(), character.version());

    Ok(())
}

fn cmd_avatar(input: &Path, output: &Path) -> Result<()> {
    println!("Extracting avatar: {} -> {}", input.display(), output.display());

    let character = Character::from_path(input).context("Failed to parse character card")?;
    if character.has_explicit_avatar() {
        warn!(
            "{} names its own avatar ({}); writing the embedded image anyway",
            input.display(),
            character.avatar()
        );
    }

    fs::write(output, character.avatar_png()).context("Failed to write output file")?;

    println!("Wrote {} bytes", character.avatar_png().len());

    Ok(())
}

fn cmd_chunks(input: &Path) -> Result<()> {
    let data = fs::read(input).context("Failed to read input file")?;

    if !is_png(&data) {
        anyhow::bail!("Input file is not a PNG file");
    }

    let chunks = extract_chunks(&data).context("Failed to read PNG chunks")?;

    for chunk in &chunks {
        match chunk.text() {
            Some(text) => println!(
                "{} {:>10} {:08x} {}",
                chunk.chunk_type,
                chunk.len(),
                chunk.crc,
                text.keyword_lossy()
            ),
            None => println!("{} {:>10} {:08x}", chunk.chunk_type, chunk.len(), chunk.crc),
        }
    }

    println!("\nTotal: {} chunks", chunks.len());

    Ok(())
}

fn cmd_scan(dir: &Path, filter: Option<&str>) -> Result<()> {
    let pattern = filter
        .map(glob::Pattern::new)
        .transpose()
        .context("Invalid filter pattern")?;

    let paths: Vec<PathBuf> = walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| is_png_path(path))
        .filter(|path| match (&pattern, path.file_name().and_then(|n| n.to_str())) {
            (Some(pattern), Some(name)) => pattern.matches(name),
            (Some(_), None) => false,
            (None, _) => true,
        })
        .collect();

    println!("Scanning {} files in {}...", paths.len(), dir.display());

    let pb = ProgressBar::new(paths.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let results: Vec<_> = paths
        .par_iter()
        .map(|path| {
            let summary = Character::from_path(path)
                .map(|c| (c.name().to_string(), c.version(), c.metadata().tags.len()));
            pb.inc(1);
            (path, summary)
        })
        .collect();
    pb.finish_and_clear();

    let mut parsed = 0;
    let mut failed = 0;

    for (path, summary) in results {
        match summary {
            Ok((name, version, tags)) => {
                println!(
                    "{:<3} {:<32} {:>3} tags  {}",
                    version.to_string(),
                    name,
                    tags,
                    path.display()
                );
                parsed += 1;
            }
            Err(e) => {
                warn!("{} [{}]: {}", path.display(), e.kind(), e);
                failed += 1;
            }
        }
    }

    println!(
        "\nParsed {} cards in {:?} ({} failed)",
        parsed,
        start.elapsed(),
        failed
    );

    Ok(())
}

fn is_png_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}
