//! prd-export CLI - product requirements document export tool

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use prd_export::export::{ExportRequest, Exporter, RendererRegistry};
use prd_export::render::PdfRenderer;
use prd_export::{
    parse, ExportFormat, ExportResult, Metadata, PageSize, ProjectRecord, RenderOptions,
};

#[derive(Parser)]
#[command(name = "prd-export")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Export product requirement documents to PDF, DOCX, and JSON", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// App name shown on the cover and used in file names
    #[arg(long, global = true, env = "PRD_APP_NAME")]
    app_name: Option<String>,

    /// App version shown on the cover
    #[arg(long, global = true, env = "PRD_APP_VERSION")]
    app_version: Option<String>,

    /// Project record JSON (used by the snapshot and for defaults)
    #[arg(long, global = true, value_name = "FILE")]
    record: Option<PathBuf>,

    /// Render options JSON
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Page size for the paginated document
    #[arg(long, global = true, value_enum)]
    page_size: Option<PageSizeArg>,

    /// Accent color (#RRGGBB) overriding the primary color
    #[arg(long, global = true, value_name = "COLOR")]
    accent_color: Option<String>,

    /// Write uncompressed PDF content streams
    #[arg(long, global = true)]
    no_compress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Export to paginated PDF
    Pdf(SingleArgs),

    /// Export to flowed DOCX
    #[command(alias = "word")]
    Docx(SingleArgs),

    /// Export the canonical JSON snapshot
    #[command(alias = "snapshot")]
    Json(SingleArgs),

    /// Export the raw report text
    #[command(alias = "txt")]
    Text(SingleArgs),

    /// Export to a format detected from the output file extension
    Export {
        /// Input report text ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Format name, overriding the extension
        #[arg(short, long)]
        format: Option<String>,
    },

    /// Export to every format
    All {
        /// Input report text ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,
    },

    /// Dump the parsed block list as JSON
    Parse {
        /// Input report text ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Show block statistics and page count
    Info {
        /// Input report text ("-" for stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct SingleArgs {
    /// Input report text ("-" for stdin)
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// Output file or directory (generated name in the current directory if not specified)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PageSizeArg {
    /// ISO A4 (210 x 297 mm)
    A4,
    /// US Letter (8.5 x 11 in)
    Letter,
}

impl From<PageSizeArg> for PageSize {
    fn from(arg: PageSizeArg) -> Self {
        match arg {
            PageSizeArg::A4 => PageSize::A4,
            PageSizeArg::Letter => PageSize::Letter,
        }
    }
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let global = &cli.global;

    let result = match &cli.command {
        Commands::Pdf(args) => cmd_single(global, ExportFormat::Pdf, args),
        Commands::Docx(args) => cmd_single(global, ExportFormat::Docx, args),
        Commands::Json(args) => cmd_single(global, ExportFormat::Json, args),
        Commands::Text(args) => cmd_single(global, ExportFormat::Text, args),
        Commands::Export {
            input,
            output,
            format,
        } => cmd_export(global, input, output, format.as_deref()),
        Commands::All { input, output } => cmd_all(global, input, output.as_deref()),
        Commands::Parse {
            input,
            output,
            compact,
        } => cmd_parse(input, output.as_deref(), *compact),
        Commands::Info { input } => cmd_info(global, input),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_input(input: &Path) -> CliResult<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(fs::read_to_string(input)?)
    }
}

fn load_record(global: &GlobalArgs) -> CliResult<ProjectRecord> {
    match &global.record {
        Some(path) => {
            let json = fs::read_to_string(path)?;
            Ok(ProjectRecord::from_json(&json)
                .map_err(|e| format!("Invalid record {}: {}", path.display(), e))?)
        }
        None => Ok(ProjectRecord::default()),
    }
}

fn render_options(global: &GlobalArgs) -> CliResult<RenderOptions> {
    let mut options = match &global.config {
        Some(path) => RenderOptions::from_json(&fs::read_to_string(path)?)?,
        None => RenderOptions::default(),
    };

    if let Some(size) = global.page_size {
        options = options.with_page_size(size.into());
    }
    if global.no_compress {
        options = options.with_compression(false);
    }
    Ok(options)
}

/// Metadata from flags, falling back to the record.
fn metadata(global: &GlobalArgs, record: &ProjectRecord) -> Metadata {
    let app_name = global
        .app_name
        .clone()
        .unwrap_or_else(|| record.app_name.clone());
    let version = global.app_version.clone().unwrap_or_default();

    let mut meta = Metadata::new(app_name, version);
    if let Some(ref accent) = global.accent_color {
        meta = meta.with_accent_color(accent);
    }

    for (key, value) in [
        ("Platform", &record.platform),
        ("Type", &record.app_type),
        ("Due", &record.due_date),
    ] {
        if !value.trim().is_empty() {
            meta = meta.with_field(key, value.trim());
        }
    }
    meta
}

fn build_request(global: &GlobalArgs, input: &Path) -> CliResult<(Exporter, ExportRequest)> {
    let text = read_input(input)?;
    let record = load_record(global)?;
    let meta = metadata(global, &record);

    let exporter = Exporter::new(RendererRegistry::with_defaults(), render_options(global)?);
    let request = ExportRequest::new(text, meta).with_record(record);
    Ok((exporter, request))
}

/// Write a successful export to `output` (a file or directory), or to its
/// generated name in the current directory.
fn write_result(result: ExportResult, output: Option<&Path>) -> CliResult<PathBuf> {
    let artifact = result.into_result()?;

    let path = match output {
        Some(p) if p.is_dir() => p.join(&artifact.filename),
        Some(p) => p.to_path_buf(),
        None => PathBuf::from(&artifact.filename),
    };

    fs::write(&path, &artifact.data)?;
    Ok(path)
}

fn cmd_single(global: &GlobalArgs, format: ExportFormat, args: &SingleArgs) -> CliResult<()> {
    let (exporter, request) = build_request(global, &args.input)?;
    let result = exporter.export_format(format, &request);

    let path = write_result(result, args.output.as_deref())?;
    println!("{} {}", "Saved to".green(), path.display());
    Ok(())
}

fn cmd_export(
    global: &GlobalArgs,
    input: &Path,
    output: &Path,
    format: Option<&str>,
) -> CliResult<()> {
    let format_name = match format {
        Some(name) => name.to_string(),
        None => output
            .extension()
            .and_then(|e| e.to_str())
            .and_then(ExportFormat::from_extension)
            .map(|f| f.name().to_string())
            .ok_or_else(|| format!("Cannot detect format from: {}", output.display()))?,
    };

    let (exporter, request) = build_request(global, input)?;
    let result = exporter.export(&format_name, &request);

    let path = write_result(result, Some(output))?;
    println!("{} {}", "Saved to".green(), path.display());
    Ok(())
}

fn cmd_all(global: &GlobalArgs, input: &Path, output: Option<&Path>) -> CliResult<()> {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_export", stem))
    });
    fs::create_dir_all(&output_dir)?;

    let (exporter, request) = build_request(global, input)?;
    let formats = exporter.registry().formats();

    let pb = ProgressBar::new(formats.len() as u64 + 1);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Rendering...");
    let results = exporter.export_all(&request);
    pb.inc(1);

    let mut written = Vec::new();
    let mut failures = Vec::new();
    for (format, result) in results {
        pb.set_message(format!("Writing {}...", format));
        match result {
            ExportResult::Success(artifact) => {
                fs::write(output_dir.join(&artifact.filename), &artifact.data)?;
                written.push(artifact.filename);
            }
            ExportResult::Failure { error } => failures.push((format, error)),
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, name) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), name);
    }

    if !failures.is_empty() {
        for (format, error) in &failures {
            eprintln!("{} {}: {}", "Failed".red(), format, error);
        }
        return Err(format!("{} of {} exports failed", failures.len(), formats.len()).into());
    }

    Ok(())
}

fn cmd_parse(input: &Path, output: Option<&Path>, compact: bool) -> CliResult<()> {
    let doc = parse(&read_input(input)?);

    let json = if compact {
        serde_json::to_string(&doc)?
    } else {
        serde_json::to_string_pretty(&doc)?
    };

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(global: &GlobalArgs, input: &Path) -> CliResult<()> {
    let text = read_input(input)?;
    let record = load_record(global)?;
    let meta = metadata(global, &record);
    let doc = parse(&text);
    let stats = doc.stats();

    let pagination = PdfRenderer::new(render_options(global)?).paginate(&doc, &meta)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "App".bold(), meta.subtitle());
    if let Some(title) = doc.title() {
        println!("{}: {}", "Title".bold(), title);
    }
    println!("{}: {}", "Pages".bold(), pagination.page_count());

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "Blocks".bold(), stats.block_count);
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Separators".bold(), stats.separator_count);
    println!("{}: {}", "Blank lines".bold(), stats.blank_count);
    println!("{}: {}", "Words".bold(), stats.word_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "prd-export".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Product requirements document export tool");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/prd-export".dimmed());
    println!("License: MIT");
}
