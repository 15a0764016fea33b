//! Configuration handling for keydiff

use std::path::PathBuf;

use crate::parser::delimiter_for_path;

/// Output format for the run summary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

/// Language used for human-readable diagnostics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lang {
    #[default]
    En,
    Ja,
}

/// Where one side's CSV text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// A file on disk
    File(PathBuf),
    /// Standard input (pasted text)
    Stdin,
}

impl Input {
    /// `-` means standard input, anything else is a path
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Input::Stdin
        } else {
            Input::File(PathBuf::from(arg))
        }
    }

    /// File stem used to name output files, if the input has one
    pub fn base_name(&self) -> Option<String> {
        match self {
            Input::File(path) => path
                .file_stem()
                .and_then(|s| s.to_str())
                .map(str::to_string),
            Input::Stdin => None,
        }
    }

    /// Field delimiter implied by the input's extension
    pub fn default_delimiter(&self) -> u8 {
        match self {
            Input::File(path) => delimiter_for_path(path),
            Input::Stdin => b',',
        }
    }
}

impl std::fmt::Display for Input {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Input::File(path) => write!(f, "{}", path.display()),
            Input::Stdin => write!(f, "<stdin>"),
        }
    }
}

/// Configuration for a comparison run
#[derive(Debug, Clone)]
pub struct Config {
    /// First input
    pub input_a: Input,
    /// Second input
    pub input_b: Input,
    /// Key column of the first input (first column when unset)
    pub key_a: Option<String>,
    /// Key column of the second input (first column when unset)
    pub key_b: Option<String>,
    /// Directory the four result files are written to
    pub output_dir: PathBuf,
    /// Summary format
    pub output_format: OutputFormat,
    /// Diagnostic language
    pub lang: Lang,
    /// Number of input rows to preview (0 disables the preview)
    pub preview_rows: usize,
    /// Field delimiter override (otherwise derived from each input)
    pub delimiter: Option<u8>,
    /// Only print counts, write nothing
    pub stats_only: bool,
}

/// Row limit of the input preview
pub const MAX_PREVIEW: usize = 20;

impl Default for Config {
    fn default() -> Self {
        Self {
            input_a: Input::Stdin,
            input_b: Input::Stdin,
            key_a: None,
            key_b: None,
            output_dir: PathBuf::from("."),
            output_format: OutputFormat::default(),
            lang: Lang::default(),
            preview_rows: 0,
            delimiter: None,
            stats_only: false,
        }
    }
}

impl Config {
    /// Create a new Config with both inputs
    pub fn new(input_a: Input, input_b: Input) -> Self {
        Self {
            input_a,
            input_b,
            ..Default::default()
        }
    }

    /// Use the same key column name on both sides
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.key_a = Some(key.clone());
        self.key_b = Some(key);
        self
    }

    /// Set the key column of the first input
    pub fn with_key_a(mut self, key: impl Into<String>) -> Self {
        self.key_a = Some(key.into());
        self
    }

    /// Set the key column of the second input
    pub fn with_key_b(mut self, key: impl Into<String>) -> Self {
        self.key_b = Some(key.into());
        self
    }

    /// Set output directory
    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    /// Set output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    /// Set diagnostic language
    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.lang = lang;
        self
    }

    /// Preview up to `rows` rows of each input, capped at [`MAX_PREVIEW`]
    pub fn with_preview(mut self, rows: usize) -> Self {
        self.preview_rows = rows.min(MAX_PREVIEW);
        self
    }

    /// Override the field delimiter for both inputs
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Enable stats-only mode
    pub fn with_stats_only(mut self, stats_only: bool) -> Self {
        self.stats_only = stats_only;
        self
    }

    /// Delimiter to parse the given input with
    pub fn delimiter_for(&self, input: &Input) -> u8 {
        self.delimiter.unwrap_or_else(|| input.default_delimiter())
    }
}
