use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use versepress::{canon, config, favicon, gutenberg, output, patch, publish, render, usfm};

#[derive(Parser)]
#[command(name = "versepress")]
#[command(about = "Build pipeline for publishing Bible texts as a static site")]
#[command(long_about = "\
Build pipeline for publishing Bible texts as a static site

Raw source texts are normalized into one canonical plain-text format,
split into per-chapter JSON documents, and rendered to static HTML:

  1. gutenberg / usfm   source        → canonical text (kjv.txt)
  2. fix                canonical     → canonical, truncated verses patched
  3. json               canonical     → per-chapter JSON + manifest
  4. html               JSON tree     → static HTML chapter pages
  5. favicon            config.toml   → lettermark favicon.ico

The canonical format is plain text: a book name line, 'Chapter N'
lines, '<num> <text>' verse lines, blank lines between sections.

'versepress build' runs the full pipeline, inferring the source format
from the input (file = Gutenberg plaintext, directory = USFM files).")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a Project Gutenberg plaintext Bible to canonical text
    Gutenberg {
        /// Gutenberg etext file (e.g. pg10.txt)
        input: PathBuf,
        /// Canonical text output file
        #[arg(long, default_value = "kjv.txt")]
        output: PathBuf,
    },
    /// Convert a directory of USFM files to canonical text
    Usfm {
        /// Directory containing .usfm/.sfm files
        input: PathBuf,
        /// Canonical text output file
        #[arg(long, default_value = "kjv.txt")]
        output: PathBuf,
    },
    /// Patch known-truncated verses in a canonical text file
    Fix {
        /// Canonical text file
        input: PathBuf,
        /// Output file (defaults to rewriting the input in place)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Split canonical text into per-chapter JSON files
    Json {
        /// Canonical text file
        input: PathBuf,
        /// Output directory (JSON lands under <out>/<version>/)
        #[arg(long, default_value = "out")]
        out: PathBuf,
    },
    /// Check a published JSON tree against its manifest
    Verify {
        /// JSON directory for one version (e.g. out/kjv)
        input: PathBuf,
    },
    /// Render a per-chapter JSON tree to static HTML
    Html {
        /// JSON directory for one version (e.g. out/kjv)
        input: PathBuf,
        /// HTML output directory
        #[arg(long, default_value = "site")]
        out: PathBuf,
    },
    /// Generate a lettermark favicon.ico from config
    Favicon {
        /// Output path
        #[arg(long, default_value = "site/static/favicon.ico")]
        out: PathBuf,
    },
    /// Run the full pipeline: convert → fix → json → verify → html → favicon
    Build {
        /// Source: a Gutenberg plaintext file or a USFM directory
        input: PathBuf,
        /// Output directory
        #[arg(long, default_value = "out")]
        out: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = config::load_config(&cli.config)?;

    match cli.command {
        Command::Gutenberg { input, output } => {
            let books = gutenberg::convert(&input)?;
            canon::write_canonical_file(&books, &output)?;
            output::print_convert_output(&books, &[], &output);
        }
        Command::Usfm { input, output } => {
            let result = usfm::convert_dir(&input)?;
            canon::write_canonical_file(&result.books, &output)?;
            output::print_convert_output(&result.books, &result.warnings, &output);
        }
        Command::Fix { input, output } => {
            let mut books = canon::parse_canonical_file(&input)?;
            let patched = patch::apply_fixes(&mut books);
            let dest = output.unwrap_or(input);
            canon::write_canonical_file(&books, &dest)?;
            output::print_fix_output(&patched);
        }
        Command::Json { input, out } => {
            let summary = publish::publish(&input, &out, &config.version)?;
            output::print_publish_output(&summary);
        }
        Command::Verify { input } => {
            let summary = publish::verify(&input)?;
            output::print_verify_output(&summary);
            if !summary.is_clean() {
                std::process::exit(1);
            }
        }
        Command::Html { input, out } => {
            let summary = render::render(&input, &out, &config.html)?;
            output::print_render_output(&summary);
        }
        Command::Favicon { out } => {
            let path = favicon::generate_favicon(&out, &config.favicon)?;
            println!("Generated {}", path.display());
        }
        Command::Build { input, out } => {
            build(&input, &out, &config)?;
        }
    }

    Ok(())
}

/// Full pipeline: convert, fix, publish, verify, render, favicon.
fn build(
    input: &Path,
    out: &Path,
    config: &config::SiteConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let code = &config.version.code;
    std::fs::create_dir_all(out)?;

    println!("==> Stage 1: Converting {}", input.display());
    let (mut books, warnings) = if input.is_dir() {
        let result = usfm::convert_dir(input)?;
        (result.books, result.warnings)
    } else {
        (gutenberg::convert(input)?, Vec::new())
    };

    println!("==> Stage 2: Patching truncated verses");
    let patched = patch::apply_fixes(&mut books);
    output::print_fix_output(&patched);

    let canonical_path = out.join(format!("{code}.txt"));
    canon::write_canonical_file(&books, &canonical_path)?;
    output::print_convert_output(&books, &warnings, &canonical_path);

    println!("==> Stage 3: Publishing JSON");
    let publish_summary = publish::publish(&canonical_path, out, &config.version)?;
    output::print_publish_output(&publish_summary);

    let verify_summary = publish::verify(&publish_summary.out_dir)?;
    output::print_verify_output(&verify_summary);
    if !verify_summary.is_clean() {
        return Err(format!(
            "published JSON failed verification with {} problems",
            verify_summary.problems.len()
        )
        .into());
    }

    println!("==> Stage 4: Rendering HTML");
    let site_dir = out.join("site").join(code);
    let render_summary = render::render(&publish_summary.out_dir, &site_dir, &config.html)?;
    output::print_render_output(&render_summary);

    println!("==> Stage 5: Favicon");
    let favicon_path = out.join("site/static/favicon.ico");
    favicon::generate_favicon(&favicon_path, &config.favicon)?;
    println!("Generated {}", favicon_path.display());

    println!("==> Build complete: {}", site_dir.display());
    Ok(())
}
