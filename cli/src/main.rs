//! paperparse CLI - layout segmentation and paper metadata tool
//!
//! Input files are JSON glyph documents: `{"id": ..., "pages": [...]}` with
//! one glyph record per rendered character.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use paperparse::builder::READER_DROP_THRESHOLD;
use paperparse::{
    extract_paper, Document, DocumentReader, GlyphDocument, LayoutOptions, PageSelection, Paper,
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "paperparse")]
#[command(version)]
#[command(about = "Segment glyph streams and extract paper metadata", long_about = None)]
struct Cli {
    /// Input glyph document (JSON) or directory of documents
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(flatten)]
    layout: LayoutArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Segmentation settings shared by all commands.
#[derive(Args, Clone)]
struct LayoutArgs {
    /// Indent threshold, in space widths
    #[arg(long, global = true, env = "PAPERPARSE_INDENT")]
    indent: Option<f32>,

    /// Drop threshold, in line heights
    #[arg(long, global = true, env = "PAPERPARSE_DROP")]
    drop: Option<f32>,

    /// Page range (e.g., "1-10", "1,3,5")
    #[arg(long, global = true)]
    pages: Option<String>,

    /// Sort glyphs into reading order before segmenting
    #[arg(long, global = true)]
    sort: bool,

    /// Ignore article beads
    #[arg(long, global = true)]
    no_beads: bool,

    /// Keep glyphs painted twice at the same position
    #[arg(long, global = true)]
    keep_duplicates: bool,
}

impl LayoutArgs {
    fn options(&self) -> CliResult<LayoutOptions> {
        let mut options = LayoutOptions::default()
            .with_drop_threshold(self.drop.unwrap_or(READER_DROP_THRESHOLD));
        if let Some(indent) = self.indent {
            options = options.with_indent_threshold(indent);
        }
        if let Some(pages) = &self.pages {
            options = options.with_pages(PageSelection::parse(pages)?);
        }
        if self.sort {
            options = options.sorted();
        }
        if self.no_beads {
            options = options.without_beads();
        }
        if self.keep_duplicates {
            options = options.keep_duplicates();
        }
        Ok(options)
    }

    fn reader(&self) -> CliResult<DocumentReader> {
        Ok(DocumentReader::with_options(self.options()?)?)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write document, text and paper files
    Convert {
        /// Input glyph document or directory
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Segment a glyph document and print the document as JSON
    Layout {
        /// Input glyph document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Print the segmented plain text
    Text {
        /// Input glyph document
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Extract paper metadata as JSON
    Paper {
        /// Input glyph document or directory
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output file, or directory for directory input (stdout if not specified)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show document information
    Info {
        /// Input glyph document
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let layout = cli.layout;

    let result = match cli.command {
        Some(Commands::Convert { input, output }) => cmd_convert(&input, output.as_deref(), &layout),
        Some(Commands::Layout {
            input,
            output,
            compact,
        }) => cmd_layout(&input, output.as_deref(), compact, &layout),
        Some(Commands::Text { input, output }) => cmd_text(&input, output.as_deref(), &layout),
        Some(Commands::Paper {
            input,
            output,
            compact,
        }) => cmd_paper(&input, output.as_deref(), compact, &layout),
        Some(Commands::Info { input }) => cmd_info(&input, &layout),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &layout)
            } else {
                println!("{}", "Usage: paperparse <INPUT> [OUTPUT]".yellow());
                println!("       paperparse --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Load a glyph document, using the file name as id when none is given.
fn load(path: &Path) -> CliResult<GlyphDocument> {
    let json = fs::read_to_string(path)?;
    let mut glyphs: GlyphDocument = serde_json::from_str(&json)
        .map_err(|e| format!("{}: {}", path.display(), e))?;
    if glyphs.id.is_none() {
        glyphs.id = path.file_name().map(|n| n.to_string_lossy().into_owned());
    }
    Ok(glyphs)
}

/// JSON files of a directory in name order, or the path itself.
fn collect_inputs(input: &Path) -> CliResult<Vec<PathBuf>> {
    if !input.is_dir() {
        return Ok(vec![input.to_path_buf()]);
    }
    let mut files: Vec<PathBuf> = fs::read_dir(input)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}

fn progress_bar(len: usize) -> CliResult<ProgressBar> {
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .into_owned()
}

fn to_json<T: serde::Serialize>(value: &T, compact: bool) -> CliResult<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json)
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult<()> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(input: &Path, output: Option<&Path>, layout: &LayoutArgs) -> CliResult<()> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        PathBuf::from(format!("{}_output", file_stem(input)))
    });
    fs::create_dir_all(&output_dir)?;

    let files = collect_inputs(input)?;
    let mut reader = layout.reader()?;
    let pb = progress_bar(files.len())?;
    let mut failed = 0;

    for file in &files {
        let stem = file_stem(file);
        pb.set_message(stem.clone());
        match convert_one(&mut reader, file) {
            Ok((document, paper)) => {
                fs::write(output_dir.join(format!("{}.document.json", stem)), to_json(&document, false)?)?;
                fs::write(output_dir.join(format!("{}.txt", stem)), document.plain_text())?;
                fs::write(output_dir.join(format!("{}.paper.json", stem)), to_json(&paper, false)?)?;
            }
            Err(e) => {
                failed += 1;
                pb.println(format!("{} {}: {}", "Skipped".yellow(), file.display(), e));
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!(
        "\n{} {} converted into {}",
        "Done!".green().bold(),
        files.len() - failed,
        output_dir.display()
    );
    if failed > 0 {
        println!("{} {} failed", "Warning:".yellow(), failed);
    }
    Ok(())
}

fn convert_one(reader: &mut DocumentReader, file: &Path) -> CliResult<(Document, Paper)> {
    let document = reader.read(&load(file)?);
    let paper = extract_paper(&document);
    log::info!(
        "{}: {} pages, title {:?}",
        file.display(),
        document.page_count(),
        paper.title
    );
    Ok((document, paper))
}

fn cmd_layout(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    layout: &LayoutArgs,
) -> CliResult<()> {
    let document = layout.reader()?.read(&load(input)?);
    write_or_print(output, &to_json(&document, compact)?)
}

fn cmd_text(input: &Path, output: Option<&Path>, layout: &LayoutArgs) -> CliResult<()> {
    let document = layout.reader()?.read(&load(input)?);
    write_or_print(output, &document.plain_text())
}

fn cmd_paper(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    layout: &LayoutArgs,
) -> CliResult<()> {
    let mut reader = layout.reader()?;

    if !input.is_dir() {
        let paper = extract_paper(&reader.read(&load(input)?));
        return write_or_print(output, &to_json(&paper, compact)?);
    }

    let files = collect_inputs(input)?;
    if let Some(dir) = output {
        fs::create_dir_all(dir)?;
    }
    let pb = progress_bar(files.len())?;

    for file in &files {
        pb.set_message(file_stem(file));
        match load(file) {
            Ok(glyphs) => {
                let paper = extract_paper(&reader.read(&glyphs));
                match output {
                    Some(dir) => {
                        let path = dir.join(format!("{}.paper.json", file_stem(file)));
                        fs::write(path, to_json(&paper, compact)?)?;
                    }
                    // One record per line on stdout.
                    None => pb.println(to_json(&paper, true)?),
                }
            }
            Err(e) => pb.println(format!("{} {}", "Skipped".yellow(), e)),
        }
        pb.inc(1);
    }
    pb.finish_and_clear();
    Ok(())
}

fn cmd_info(input: &Path, layout: &LayoutArgs) -> CliResult<()> {
    let glyphs = load(input)?;
    let document = layout.reader()?.read(&glyphs);
    let metrics = document.layout();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(ref id) = document.id {
        println!("{}: {}", "Id".bold(), id);
    }
    println!(
        "{}: {} ({} with text)",
        "Pages".bold(),
        glyphs.pages.len(),
        document.page_count()
    );
    println!(
        "{}: {}",
        "Glyphs".bold(),
        glyphs.pages.iter().map(|p| p.glyphs.len()).sum::<usize>()
    );

    println!();
    println!("{}", "Layout".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let paragraphs: usize = document.pages.iter().map(|p| p.paragraph_count()).sum();
    let lines: usize = document.pages.iter().map(|p| p.line_count()).sum();
    println!("{}: {}", "Paragraphs".bold(), paragraphs);
    println!("{}: {}", "Lines".bold(), lines);
    println!("{}: {}pt", "Content font".bold(), metrics.content_font_size);
    println!(
        "{}: left {}, right {}",
        "Margins".bold(),
        metrics.left_margin,
        metrics.right_margin
    );

    let text = document.plain_text();
    println!("{}: {}", "Words".bold(), text.split_whitespace().count());
    println!("{}: {}", "Characters".bold(), text.chars().count());

    let paper = extract_paper(&document);
    if !paper.title.is_empty() {
        println!();
        println!("{}: {}", "Title".bold(), paper.title);
    }
    if !paper.authors.is_empty() {
        println!("{}: {}", "Authors".bold(), paper.authors.join(", "));
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "paperparse".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Layout segmentation and paper metadata extraction tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> LayoutArgs {
        LayoutArgs {
            indent: None,
            drop: None,
            pages: None,
            sort: false,
            no_beads: false,
            keep_duplicates: false,
        }
    }

    #[test]
    fn test_layout_args_defaults() {
        let options = args().options().unwrap();
        assert_eq!(options.drop_threshold, READER_DROP_THRESHOLD);
        assert_eq!(options.indent_threshold, 2.0);
        assert!(options.separate_by_beads);
    }

    #[test]
    fn test_layout_args_overrides() {
        let mut args = args();
        args.indent = Some(3.0);
        args.drop = Some(2.0);
        args.pages = Some("2-4".to_string());
        args.no_beads = true;
        let options = args.options().unwrap();
        assert_eq!(options.indent_threshold, 3.0);
        assert_eq!(options.drop_threshold, 2.0);
        assert_eq!(options.pages, PageSelection::Range(2..=4));
        assert!(!options.separate_by_beads);

        args.pages = Some("4-2".to_string());
        assert!(args.options().is_err());
        args.pages = None;
        args.drop = Some(-1.0);
        assert!(args.reader().is_err());
    }

    #[test]
    fn test_collect_inputs_sorted_json_only() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.json"), "{}").unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = collect_inputs(dir.path()).unwrap();
        let names: Vec<String> = files.iter().map(|f| file_stem(f)).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_load_sets_id_from_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paper.json");
        fs::write(
            &path,
            r#"{"pages": [{"width": 612, "height": 792, "glyphs": [
                {"text": "A", "x": 72, "y": 100, "width": 5, "height": 10, "font_size": 10}
            ]}]}"#,
        )
        .unwrap();

        let glyphs = load(&path).unwrap();
        assert_eq!(glyphs.id.as_deref(), Some("paper.json"));
        assert_eq!(glyphs.pages[0].glyphs.len(), 1);

        fs::write(&path, "not json").unwrap();
        assert!(load(&path).is_err());
    }
}
