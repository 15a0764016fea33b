//! keydiff - key-column comparison of two CSV tables
//!
//! Splits two tables into rows whose key occurs only in one of them and rows
//! whose key occurs in both, keeping every cell as literal text. Results are
//! encoded as BOM-prefixed UTF-8 CSV so spreadsheet tools detect the encoding.
//!
//! ```
//! use keydiff::{compare, parse_str, serialize};
//!
//! let a = parse_str("ID,名前\n1,山田太郎\n2,鈴木花子").unwrap();
//! let b = parse_str("ID,名前\n1,山田太郎\n4,佐藤二郎").unwrap();
//! let result = compare(&a, &b, "ID", "ID").unwrap();
//!
//! assert_eq!(result.only_in_a.get(0, "ID"), Some("2"));
//! assert_eq!(&serialize(&result.only_in_b)[..3], &[0xEF, 0xBB, 0xBF]);
//! ```

pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod output;
pub mod parser;

pub use config::Config;
pub use diff::{compare, PartitionResult};
pub use error::{CompareError, ParseError};
pub use model::Table;
pub use output::serialize;
pub use parser::{parse_bytes, parse_path, parse_reader, parse_str};
