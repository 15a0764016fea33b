//! Data model for text-valued tables

mod key;
mod schema;
mod table;

pub use key::KeySet;
pub use schema::{normalize_headers, HeaderRename};
pub use table::{Row, Table};

/// Which of the two compared inputs a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    A,
    B,
}

impl Side {
    /// Fallback base name used for output files when the input has no file name
    pub fn fallback_name(self) -> &'static str {
        match self {
            Side::A => "file1",
            Side::B => "file2",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}
