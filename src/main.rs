use std::{
    fs::{self, OpenOptions},
    io::Write,
    num::NonZeroUsize,
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use tree_sitter_unused_bindings::{
    analyze_paths,
    config::{load_options, parse_pattern},
    discover::discover_source_files,
    format::{readme_section, render, Format},
    Args, CaughtErrors, Error, Report, ReportOptions, SourceLanguage,
};

/// Report declared names that are never referenced.
#[derive(Parser)]
#[command(name = "unused-bindings", version)]
struct Cli {
    /// Directory to analyze.
    dir: PathBuf,

    /// Write the report to this file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = FormatArg::Markdown)]
    format: FormatArg,

    /// Names matching this pattern are never reported.
    #[arg(long)]
    ignore_pattern: Option<String>,

    #[arg(long, value_enum)]
    args: Option<ArgsArg>,

    #[arg(long, value_enum)]
    caught_errors: Option<CaughtErrorsArg>,

    #[arg(long)]
    ignore_rest_siblings: bool,

    /// Count only reads as uses; write-only bindings are reported.
    #[arg(long)]
    reads_only: bool,

    /// JSON or YAML file with report options. Flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Append an "Unused Variables" section to <DIR>/README.md.
    #[arg(long)]
    append_readme: bool,

    /// Number of worker threads. Defaults to the available parallelism.
    #[arg(long)]
    jobs: Option<NonZeroUsize>,
}

#[derive(Copy, Clone, ValueEnum)]
enum FormatArg {
    Markdown,
    Json,
    Text,
}

impl From<FormatArg> for Format {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Markdown => Self::Markdown,
            FormatArg::Json => Self::Json,
            FormatArg::Text => Self::Text,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum ArgsArg {
    All,
    AfterUsed,
    None,
}

impl From<ArgsArg> for Args {
    fn from(value: ArgsArg) -> Self {
        match value {
            ArgsArg::All => Self::All,
            ArgsArg::AfterUsed => Self::AfterUsed,
            ArgsArg::None => Self::None,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum CaughtErrorsArg {
    All,
    None,
}

impl From<CaughtErrorsArg> for CaughtErrors {
    fn from(value: CaughtErrorsArg) -> Self {
        match value {
            CaughtErrorsArg::All => Self::All,
            CaughtErrorsArg::None => Self::None,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(report) if report.is_clean() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::from(1),
        Err(error) => {
            error!(%error, "aborting");
            eprintln!("error: {error}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<Report, Error> {
    let options = options(cli)?;
    let paths = discover_source_files(&cli.dir, SourceLanguage::EXTENSIONS)?;
    info!(files = paths.len(), dir = %cli.dir.display(), "discovered");

    let report = analyze_paths(paths, &options, cli.jobs);
    for parse_error in report.errors() {
        warn!(%parse_error, "skipped file");
    }

    let rendered = render(&report, cli.format.into())?;
    match &cli.output {
        Some(output) => fs::write(output, rendered)?,
        None => print!("{rendered}"),
    }

    if cli.append_readme {
        append_readme(&cli.dir, &report)?;
    }
    Ok(report)
}

fn options(cli: &Cli) -> Result<ReportOptions, Error> {
    let mut options = match &cli.config {
        Some(path) => load_options(path)?,
        None => ReportOptions::default(),
    };
    if let Some(pattern) = &cli.ignore_pattern {
        options.ignore_pattern = Some(parse_pattern("--ignore-pattern", pattern)?);
    }
    if let Some(args) = cli.args {
        options.args = args.into();
    }
    if let Some(caught_errors) = cli.caught_errors {
        options.caught_errors = caught_errors.into();
    }
    options.ignore_rest_siblings |= cli.ignore_rest_siblings;
    options.reads_only |= cli.reads_only;
    Ok(options)
}

fn append_readme(dir: &Path, report: &Report) -> Result<(), Error> {
    if report.is_clean() {
        eprintln!("No unused variables found.");
        return Ok(());
    }
    let mut readme = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("README.md"))?;
    readme.write_all(readme_section(report).as_bytes())?;
    eprintln!("Unused variables have been added to README.md.");
    Ok(())
}
