//! keydiff - split two CSV files by key-column membership

use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Parser, ValueEnum};
use termcolor::{ColorChoice, StandardStream};
use tracing_subscriber::EnvFilter;

use keydiff::config::{Config, Input, Lang, OutputFormat};
use keydiff::diff::compare;
use keydiff::error::ParseError;
use keydiff::model::{Side, Table};
use keydiff::output::{
    file_timestamp, render_preview, write_partitions, BaseNames, OutputFactory, Report,
};
use keydiff::parser::CsvParser;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Terminal,
    Json,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Terminal => OutputFormat::Terminal,
            CliOutputFormat::Json => OutputFormat::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLang {
    En,
    Ja,
}

impl From<CliLang> for Lang {
    fn from(l: CliLang) -> Self {
        match l {
            CliLang::En => Lang::En,
            CliLang::Ja => Lang::Ja,
        }
    }
}

/// Split two CSV files into rows found only in one of them and rows found in
/// both, matching on one key column per file
#[derive(Parser, Debug)]
#[command(name = "keydiff")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// First CSV file (`-` reads standard input)
    file_a: String,

    /// Second CSV file (`-` reads standard input)
    file_b: String,

    /// Key column name used for both files
    #[arg(short, long)]
    key: Option<String>,

    /// Key column of the first file (defaults to --key, then its first column)
    #[arg(long)]
    key_a: Option<String>,

    /// Key column of the second file (defaults to --key, then its first column)
    #[arg(long)]
    key_b: Option<String>,

    /// Directory the four result files are written to
    #[arg(short, long, default_value = ".")]
    out_dir: std::path::PathBuf,

    /// Summary format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliOutputFormat,

    /// Language of CSV error diagnostics
    #[arg(long, value_enum, default_value = "en")]
    lang: CliLang,

    /// Show the first rows of each input (20 when no count is given)
    #[arg(long, value_name = "ROWS", num_args = 0..=1, default_missing_value = "20")]
    preview: Option<usize>,

    /// Field delimiter for both files (default: comma, tab for .tsv)
    #[arg(long)]
    delimiter: Option<char>,

    /// Only print counts, do not write result files
    #[arg(long)]
    stats_only: bool,

    /// Log progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env("KEYDIFF_LOG")
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut config = Config::new(Input::from_arg(&cli.file_a), Input::from_arg(&cli.file_b))
        .with_output_dir(cli.out_dir.clone())
        .with_output_format(cli.format.into())
        .with_lang(cli.lang.into())
        .with_preview(cli.preview.unwrap_or(0))
        .with_stats_only(cli.stats_only);

    if config.input_a == Input::Stdin && config.input_b == Input::Stdin {
        bail!("only one of the two inputs can be read from standard input");
    }

    if let Some(key) = &cli.key {
        config = config.with_key(key.clone());
    }
    if let Some(key) = &cli.key_a {
        config = config.with_key_a(key.clone());
    }
    if let Some(key) = &cli.key_b {
        config = config.with_key_b(key.clone());
    }

    if let Some(delimiter) = cli.delimiter {
        if !delimiter.is_ascii() {
            bail!("delimiter must be a single ASCII character, got {:?}", delimiter);
        }
        config = config.with_delimiter(delimiter as u8);
    }

    Ok(config)
}

fn load(input: &Input, config: &Config) -> Result<Table, ParseError> {
    let parser = CsvParser::new().with_delimiter(config.delimiter_for(input));
    match input {
        Input::File(path) => parser.parse_path(path),
        Input::Stdin => parser.parse_reader(std::io::stdin().lock()),
    }
}

/// Choose the key column: the configured one, else the table's first column
fn key_or_first(key: Option<&str>, table: &Table, side: Side) -> Result<String> {
    match key {
        Some(key) => Ok(key.to_string()),
        None => table
            .columns()
            .next()
            .map(str::to_string)
            .with_context(|| format!("input {} has no columns", side)),
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = build_config(&cli)?;

    // Parse both sides so every broken input is reported, then refuse to compare.
    let parsed_a = load(&config.input_a, &config);
    let parsed_b = load(&config.input_b, &config);

    let (table_a, table_b) = match (parsed_a, parsed_b) {
        (Ok(a), Ok(b)) => (a, b),
        (a, b) => {
            let sides = [(Side::A, &config.input_a, a), (Side::B, &config.input_b, b)];
            for (side, input, result) in sides {
                if let Err(e) = result {
                    eprintln!(
                        "Error reading {} ({}):\n\n{}\n",
                        side,
                        input,
                        e.diagnosis(config.lang, config.delimiter_for(input))
                    );
                }
            }
            return Ok(ExitCode::from(2));
        }
    };

    let key_a = key_or_first(config.key_a.as_deref(), &table_a, Side::A)?;
    let key_b = key_or_first(config.key_b.as_deref(), &table_b, Side::B)?;

    let result = compare(&table_a, &table_b, &key_a, &key_b)?;

    if config.preview_rows > 0 && config.output_format == OutputFormat::Terminal {
        println!("A: {}", config.input_a);
        println!("{}", render_preview(&table_a, config.preview_rows));
        println!("B: {}", config.input_b);
        println!("{}", render_preview(&table_b, config.preview_rows));
    }

    let files = if config.stats_only {
        Vec::new()
    } else {
        std::fs::create_dir_all(&config.output_dir).with_context(|| {
            format!(
                "Failed to create output directory: {}",
                config.output_dir.display()
            )
        })?;
        let names = BaseNames::new(
            config
                .input_a
                .base_name()
                .unwrap_or_else(|| Side::A.fallback_name().to_string()),
            config
                .input_b
                .base_name()
                .unwrap_or_else(|| Side::B.fallback_name().to_string()),
        );
        let timestamp = file_timestamp(&Local::now());
        write_partitions(&result, &config.output_dir, &names, &timestamp)
            .context("Failed to write result files")?
    };

    let report = Report {
        input_a: config.input_a.to_string(),
        input_b: config.input_b.to_string(),
        key_a,
        key_b,
        stats: result.stats(),
        files,
    };

    let plain = config.output_format == OutputFormat::Json || !std::io::stdout().is_terminal();
    let color = if plain {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let mut stdout = StandardStream::stdout(color);
    OutputFactory::create(config.output_format).render(&report, &mut stdout)?;

    if result.has_exclusive_rows() {
        Ok(ExitCode::from(1)) // Some rows exist on one side only
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
