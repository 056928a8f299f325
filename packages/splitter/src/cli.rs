//! Command-line interface for the splitter.

use std::io;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::{Result, SplitterError};
use crate::job::{discover_chapters, format_chapters, format_file, split_book};
use crate::profile::ProfileRegistry;
use crate::splitter::OutputLayout;

/// Alexandria chapter splitter - Segment book texts into chapter files.
#[derive(Parser)]
#[command(name = "alexandria-splitter")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Extra book profiles (YAML); entries override built-ins with the same key
    #[arg(long, global = true)]
    pub profiles: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a book's source text into one file per chapter.
    Split {
        /// Book profile key (see `profiles`)
        #[arg(short, long)]
        profile: String,

        /// Source text file
        #[arg(short, long)]
        input: PathBuf,

        /// Existing output directory
        #[arg(short, long)]
        output: PathBuf,

        /// Override the profile's output layout
        #[arg(long, value_enum)]
        layout: Option<OutputLayout>,
    },

    /// List a book's chapter files in ingestion order.
    Chapters {
        /// Book profile key
        #[arg(short, long)]
        profile: String,

        /// Directory holding the chapter files
        #[arg(short, long)]
        dir: PathBuf,

        /// Skip chapters below this index
        #[arg(long, default_value_t = 1)]
        min_index: u32,
    },

    /// Join wrapped lines into one line per paragraph.
    ///
    /// Formats a single file, or every chapter file of a book in place.
    Format {
        /// Text file to format
        #[arg(short, long, required_unless_present = "profile", conflicts_with = "profile")]
        input: Option<PathBuf>,

        /// Write here instead of rewriting the input
        #[arg(short, long, requires = "input")]
        output: Option<PathBuf>,

        /// Book profile whose chapter files are rewritten
        #[arg(short, long, requires = "dir")]
        profile: Option<String>,

        /// Directory holding the chapter files
        #[arg(short, long, requires = "profile")]
        dir: Option<PathBuf>,

        /// Skip chapters below this index
        #[arg(long, default_value_t = 1)]
        min_index: u32,
    },

    /// List the available book profiles.
    Profiles,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let registry = load_registry(cli.profiles.as_deref())?;

    match cli.command {
        Commands::Split {
            profile,
            input,
            output,
            layout,
        } => split_command(&registry, &profile, &input, &output, layout),
        Commands::Chapters {
            profile,
            dir,
            min_index,
        } => chapters_command(&registry, &profile, &dir, min_index),
        Commands::Format {
            input,
            output,
            profile,
            dir,
            min_index,
        } => match (input, profile, dir) {
            (Some(input), _, _) => format_file_command(&input, output.as_deref()),
            (None, Some(profile), Some(dir)) => {
                format_chapters_command(&registry, &profile, &dir, min_index)
            }
            // clap enforces one of the two modes
            _ => Ok(()),
        },
        Commands::Profiles => {
            profiles_command(&registry);
            Ok(())
        }
    }
}

fn load_registry(extra: Option<&Path>) -> Result<ProfileRegistry> {
    let mut registry = ProfileRegistry::with_builtins()?;
    if let Some(path) = extra {
        registry.load_file(path)?;
    }
    Ok(registry)
}

fn require_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(SplitterError::io(
            path,
            io::Error::new(io::ErrorKind::NotFound, "directory does not exist"),
        ));
    }
    if !path.is_dir() {
        return Err(SplitterError::io(
            path,
            io::Error::new(io::ErrorKind::InvalidInput, "not a directory"),
        ));
    }
    Ok(())
}

/// Execute the split command.
fn split_command(
    registry: &ProfileRegistry,
    key: &str,
    input: &Path,
    output: &Path,
    layout: Option<OutputLayout>,
) -> Result<()> {
    let profile = registry.get(key)?;

    // Validate output directory before reading the book
    require_dir(output)?;

    println!(
        "{} {} by {}",
        style("Splitting").bold(),
        style(&profile.book.title).cyan(),
        style(&profile.book.author).green()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.set_message(format!("Reading {}...", input.display()));
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let written = match split_book(profile, input, output, layout) {
        Ok(written) => written,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.finish_and_clear();

    for section in &written {
        let name = section
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let preamble = if section.section.includes_preamble {
            format!(" {}", style("+ preamble").dim())
        } else {
            String::new()
        };
        println!(
            "  {} (index {}, {} source lines, {} lines){preamble}",
            style(name).green(),
            section.section.value,
            section.section.len(),
            section.lines,
        );
    }

    println!();
    println!(
        "{} {} chapter files in {}",
        style("Wrote").green().bold(),
        written.len(),
        output.display()
    );

    Ok(())
}

/// Execute the chapters command.
fn chapters_command(
    registry: &ProfileRegistry,
    key: &str,
    dir: &Path,
    min_index: u32,
) -> Result<()> {
    let profile = registry.get(key)?;
    let chapters = discover_chapters(profile, dir, min_index)?;

    if chapters.is_empty() {
        println!(
            "{} no chapters at or above index {min_index}",
            style("Nothing to do:").yellow().bold()
        );
        return Ok(());
    }

    for chapter in &chapters {
        println!(
            "{:>4}  {:<28} {}",
            chapter.index,
            profile.chapter_title.format(&chapter.label, chapter.index),
            style(chapter.path.display()).dim()
        );
    }

    Ok(())
}

/// Execute the format command on one file.
fn format_file_command(input: &Path, output: Option<&Path>) -> Result<()> {
    let lines = format_file(input, output)?;
    println!(
        "{} {} ({lines} lines)",
        style("Formatted").green().bold(),
        output.unwrap_or(input).display()
    );
    Ok(())
}

/// Execute the format command on a book's chapter files.
fn format_chapters_command(
    registry: &ProfileRegistry,
    key: &str,
    dir: &Path,
    min_index: u32,
) -> Result<()> {
    let profile = registry.get(key)?;
    let chapters = format_chapters(profile, dir, min_index)?;

    for chapter in &chapters {
        println!("  {}", style(chapter.path.display()).dim());
    }
    println!(
        "{} {} chapter files of {}",
        style("Formatted").green().bold(),
        chapters.len(),
        style(&profile.book.title).cyan()
    );
    Ok(())
}

/// Execute the profiles command.
fn profiles_command(registry: &ProfileRegistry) {
    for profile in registry.iter() {
        println!(
            "{:<14} {} ({})",
            style(&profile.key).cyan(),
            profile.book.title,
            profile.book.author
        );
    }
}
