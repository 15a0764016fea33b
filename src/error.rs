//! Error types and human-readable diagnostics

use thiserror::Error;

use crate::config::Lang;
use crate::model::Side;

/// Failure to turn CSV text into a [`Table`](crate::model::Table)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A data line does not have as many fields as the header
    #[error("line {line}: expected {expected} fields, saw {found}")]
    Structural {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Any other failure: empty input, bad encoding, I/O, decoder errors
    #[error("{message}")]
    Generic { message: String },
}

pub type ParseResult<T> = Result<T, ParseError>;

impl ParseError {
    pub fn generic(message: impl Into<String>) -> Self {
        ParseError::Generic {
            message: message.into(),
        }
    }

    /// Map a decoder error raised by the record starting on `line`
    pub(crate) fn from_csv(err: csv::Error, line: usize) -> Self {
        match err.kind() {
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => ParseError::Structural {
                line,
                expected: *expected_len as usize,
                found: *len as usize,
            },
            _ => ParseError::generic(err.to_string()),
        }
    }

    /// Render the diagnosis shown to a user.
    ///
    /// `delimiter` is the field separator the input was parsed with, so the
    /// advice names the character that actually split the fields.
    pub fn diagnosis(&self, lang: Lang, delimiter: u8) -> String {
        match (self, lang) {
            (
                ParseError::Structural {
                    line,
                    expected,
                    found,
                },
                Lang::En,
            ) => {
                let sep = delimiter_name(delimiter, lang);
                format!(
                    "**Line {line}**: column count does not match (header: {expected} columns, line {line}: {found} columns)\n\n\
                     **Likely causes:**\n\
                     - A value contains a {sep} (for example an address or a description)\n\
                     - A field containing a {sep} is not wrapped in double quotes\n\
                     - The file is not {sep}-separated\n\n\
                     **How to fix:**\n\
                     - Check the data on or around line {line}\n\
                     - Wrap fields that contain a {sep} in double quotes"
                )
            }
            (
                ParseError::Structural {
                    line,
                    expected,
                    found,
                },
                Lang::Ja,
            ) => {
                let sep = delimiter_name(delimiter, lang);
                format!(
                    "**{line}行目**でカラム数が一致しません（ヘッダー: {expected}列、{line}行目: {found}列）\n\n\
                     **考えられる原因:**\n\
                     - データ内に{sep}が含まれている（例: 住所や説明文に{sep}がある）\n\
                     - ダブルクォートで囲まれていないフィールドがある\n\
                     - ファイルの区切り文字が{sep}ではない\n\n\
                     **対処法:**\n\
                     - 該当行（{line}行目付近）のデータを確認してください\n\
                     - {sep}を含むフィールドをダブルクォートで囲んでください"
                )
            }
            (ParseError::Generic { message }, Lang::En) => format!("CSV read error: {message}"),
            (ParseError::Generic { message }, Lang::Ja) => format!("CSV読み込みエラー: {message}"),
        }
    }
}

fn delimiter_name(delimiter: u8, lang: Lang) -> String {
    match (delimiter, lang) {
        (b',', Lang::En) => "comma".to_string(),
        (b',', Lang::Ja) => "カンマ".to_string(),
        (b'\t', Lang::En) => "tab".to_string(),
        (b'\t', Lang::Ja) => "タブ".to_string(),
        (b';', Lang::En) => "semicolon".to_string(),
        (b';', Lang::Ja) => "セミコロン".to_string(),
        (other, Lang::En) => format!("'{}'", char::from(other)),
        (other, Lang::Ja) => format!("「{}」", char::from(other)),
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::generic(format!("I/O error: {}", err))
    }
}

/// Contract violations when invoking a comparison
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error("key column {column:?} not found in input {side} (available: {})", .available.join(", "))]
    InvalidKey {
        side: Side,
        column: String,
        available: Vec<String>,
    },
}

/// Failure to write a serialized table to a sink
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
