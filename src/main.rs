use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, error, info, trace};
use xlsxgherkin::{ColumnLayout, ConversionReport, ConverterBuilder, OutputMode, XlsxToGherkinError, DEFAULT_OUTPUT_DIR};

/// Convert a test-case spreadsheet into Gherkin feature files
#[derive(Parser)]
#[command(name = "xlsxgherkin")]
#[command(about = "xlsxgherkin - Convert test-case spreadsheets (XLSX) into Gherkin feature files", long_about = None)]
#[command(version)]
struct Cli {
    /// Input spreadsheet (read from stdin when omitted)
    input: Option<PathBuf>,

    /// Directory for the generated feature files
    #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Column layout preset
    #[arg(long, value_enum, default_value_t = LayoutPreset::Flat)]
    layout: LayoutPreset,

    /// JSON file with a custom column layout (overrides --layout)
    #[arg(long, value_name = "FILE")]
    layout_file: Option<PathBuf>,

    /// How test cases are distributed over output files
    #[arg(long, value_enum, default_value_t = Mode::PerFeature)]
    mode: Mode,

    /// Print a JSON conversion report to stdout
    #[arg(long)]
    report: bool,

    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutPreset {
    /// Test name, precondition, description and type in columns A, B, D, F
    Flat,
    /// Story name in A, test name in B, precondition in C, description in E, type in F
    Story,
}

#[derive(Clone, Copy, ValueEnum)]
enum Mode {
    /// One file per test case
    PerFeature,
    /// One file per test case, each holding every test case read so far
    Cumulative,
    /// A single file named after the story
    PerStory,
}

impl From<Mode> for OutputMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::PerFeature => OutputMode::PerFeature,
            Mode::Cumulative => OutputMode::Cumulative,
            Mode::PerStory => OutputMode::PerStory,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(io::stderr)
        .with_target(cli.verbose >= 2)
        .init();

    debug!("xlsxgherkin started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    let input = match cli.input.clone() {
        Some(path) => path,
        None => match prompt_input_path(io::stdin().lock(), io::stderr()) {
            Ok(Some(path)) => path,
            Ok(None) => {
                info!("No file selected.");
                return;
            }
            Err(e) => {
                handle_error(e.into());
                process::exit(1);
            }
        },
    };

    match run(&cli, &input) {
        Ok(()) => {}
        Err(e) => {
            error!("Conversion of {} failed", input.display());
            handle_error(e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli, input: &Path) -> Result<(), XlsxToGherkinError> {
    let converter = ConverterBuilder::new()
        .with_layout(resolve_layout(cli)?)
        .with_output_mode(cli.mode.into())
        .build()?;

    let report = converter.convert_file(input, &cli.output_dir)?;
    info!(
        "Generated {} file(s) in {}",
        report.files.len(),
        report.output_dir.display()
    );

    if cli.report {
        write_report(io::stdout().lock(), &report)?;
    }

    Ok(())
}

/// `--layout-file` wins over the `--layout` preset
fn resolve_layout(cli: &Cli) -> Result<ColumnLayout, XlsxToGherkinError> {
    match &cli.layout_file {
        Some(path) => ColumnLayout::from_json_file(path),
        None => Ok(match cli.layout {
            LayoutPreset::Flat => ColumnLayout::flat_sheet(),
            LayoutPreset::Story => ColumnLayout::story_sheet(),
        }),
    }
}

fn write_report<W: Write>(mut out: W, report: &ConversionReport) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut out, report).map_err(io::Error::from)?;
    writeln!(out)?;
    out.flush()
}

/// Read one spreadsheet path; `None` on an empty line or EOF
fn prompt_input_path<R: BufRead, W: Write>(mut input: R, mut prompt: W) -> io::Result<Option<PathBuf>> {
    write!(prompt, "Spreadsheet path: ")?;
    prompt.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let path = line.trim();
    Ok((!path.is_empty()).then(|| PathBuf::from(path)))
}

fn handle_error(error: XlsxToGherkinError) {
    match error {
        XlsxToGherkinError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the file exists and you have permission to access it.");
        }
        XlsxToGherkinError::Parse(parse_err) => {
            eprintln!("Parse Error: {}", parse_err);
            eprintln!("The file may not be a valid Excel file or may be corrupted.");
        }
        XlsxToGherkinError::Layout(json_err) => {
            eprintln!("Layout Error: {}", json_err);
            eprintln!("Please check the column layout file.");
        }
        XlsxToGherkinError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
        }
        XlsxToGherkinError::MissingStoryName { sheet, cell } => {
            eprintln!("Missing Story Name:");
            eprintln!("  Sheet: {}", sheet);
            eprintln!("  Cell: {}", cell);
            eprintln!("The story layout expects the story name in this cell.");
        }
        XlsxToGherkinError::SecurityViolation(msg) => {
            eprintln!("Security Violation: {}", msg);
        }
    }
}
