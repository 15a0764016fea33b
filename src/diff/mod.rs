//! Key-membership comparison of two tables

mod partition;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CompareError;
use crate::model::{KeySet, Side, Table};

pub use partition::split_by_membership;

/// Row counts of a comparison
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionStats {
    pub a_row_count: usize,
    pub b_row_count: usize,
    pub only_in_a: usize,
    pub only_in_b: usize,
    pub common_in_a: usize,
    pub common_in_b: usize,
}

impl PartitionStats {
    /// Whether any row exists on one side only
    pub fn has_exclusive_rows(&self) -> bool {
        self.only_in_a > 0 || self.only_in_b > 0
    }
}

/// The four-way split of two tables by key membership
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionResult {
    /// Rows of A whose key never occurs in B's key column
    pub only_in_a: Table,
    /// Rows of B whose key never occurs in A's key column
    pub only_in_b: Table,
    /// Rows of A whose key occurs in B's key column, in A's layout
    pub common_in_a: Table,
    /// Rows of B whose key occurs in A's key column, in B's layout
    pub common_in_b: Table,
}

impl PartitionResult {
    /// Get row counts
    pub fn stats(&self) -> PartitionStats {
        let only_in_a = self.only_in_a.row_count();
        let only_in_b = self.only_in_b.row_count();
        let common_in_a = self.common_in_a.row_count();
        let common_in_b = self.common_in_b.row_count();
        PartitionStats {
            a_row_count: only_in_a + common_in_a,
            b_row_count: only_in_b + common_in_b,
            only_in_a,
            only_in_b,
            common_in_a,
            common_in_b,
        }
    }

    /// True when some row exists on one side only
    pub fn has_exclusive_rows(&self) -> bool {
        self.stats().has_exclusive_rows()
    }

    /// The partition tables paired with their kind, in output order
    pub fn partitions(&self) -> [(Partition, &Table); 4] {
        [
            (Partition::OnlyInA, &self.only_in_a),
            (Partition::OnlyInB, &self.only_in_b),
            (Partition::CommonInA, &self.common_in_a),
            (Partition::CommonInB, &self.common_in_b),
        ]
    }
}

/// One of the four output groupings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Partition {
    OnlyInA,
    OnlyInB,
    CommonInA,
    CommonInB,
}

impl Partition {
    /// The input this partition's rows (and layout) come from
    pub fn side(self) -> Side {
        match self {
            Partition::OnlyInA | Partition::CommonInA => Side::A,
            Partition::OnlyInB | Partition::CommonInB => Side::B,
        }
    }

    /// Whether the rows are the ones missing from the other side
    pub fn is_exclusive(self) -> bool {
        matches!(self, Partition::OnlyInA | Partition::OnlyInB)
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Partition::OnlyInA => write!(f, "only in A"),
            Partition::OnlyInB => write!(f, "only in B"),
            Partition::CommonInA => write!(f, "common (A layout)"),
            Partition::CommonInB => write!(f, "common (B layout)"),
        }
    }
}

/// Resolve a key column name against one side's table
fn resolve_key(table: &Table, column: &str, side: Side) -> Result<usize, CompareError> {
    table
        .column_index(column)
        .ok_or_else(|| CompareError::InvalidKey {
            side,
            column: column.to_string(),
            available: table.columns().map(str::to_string).collect(),
        })
}

/// Split `a` and `b` by whether each row's key value occurs in the other
/// table's key column.
///
/// Keys are compared as exact text. Every row is classified on its own, so
/// duplicate keys are neither merged nor dropped, and only the presence of a
/// value on the other side matters, not how often it occurs there. Row order
/// within each partition follows the source table. Neither input is modified.
pub fn compare(
    a: &Table,
    b: &Table,
    key_a: &str,
    key_b: &str,
) -> Result<PartitionResult, CompareError> {
    let key_a_idx = resolve_key(a, key_a, Side::A)?;
    let key_b_idx = resolve_key(b, key_b, Side::B)?;

    let keys_a = KeySet::from_column(a, key_a_idx);
    let keys_b = KeySet::from_column(b, key_b_idx);

    let (only_in_a, common_in_a) = split_by_membership(a, key_a_idx, &keys_b);
    let (only_in_b, common_in_b) = split_by_membership(b, key_b_idx, &keys_a);

    let result = PartitionResult {
        only_in_a,
        only_in_b,
        common_in_a,
        common_in_b,
    };

    let stats = result.stats();
    debug!(
        key_a,
        key_b,
        only_in_a = stats.only_in_a,
        only_in_b = stats.only_in_b,
        common_in_a = stats.common_in_a,
        common_in_b = stats.common_in_b,
        "compared tables"
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    fn run(csv_a: &str, csv_b: &str, key_a: &str, key_b: &str) -> PartitionResult {
        let a = parse_str(csv_a).unwrap();
        let b = parse_str(csv_b).unwrap();
        compare(&a, &b, key_a, key_b).unwrap()
    }

    fn keys(table: &Table, column: &str) -> Vec<String> {
        table
            .column_values(column)
            .unwrap()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_basic_partial_match() {
        let result = run(
            "ID,名前\n1,山田太郎\n2,鈴木花子\n3,田中一郎",
            "ID,名前\n1,山田太郎\n3,田中一郎\n4,佐藤二郎",
            "ID",
            "ID",
        );
        assert_eq!(keys(&result.only_in_a, "ID"), vec!["2"]);
        assert_eq!(keys(&result.only_in_b, "ID"), vec!["4"]);
        assert_eq!(keys(&result.common_in_a, "ID"), vec!["1", "3"]);
        assert_eq!(keys(&result.common_in_b, "ID"), vec!["1", "3"]);
    }

    #[test]
    fn test_different_key_names_and_layouts() {
        let result = run(
            "宛名番号,名前,住所\n1,山田太郎,東京都\n2,鈴木花子,神奈川県\n3,田中一郎,大阪府\n4,佐藤二郎,愛知県\n5,伊藤三郎,福岡県\n6,高橋四郎,北海道\n7,渡辺五郎,埼玉県",
            "口座番号,宛名番号,名前\nA001,1,山田太郎\nA002,3,田中一郎\nA003,5,伊藤三郎\nA004,7,渡辺五郎\nA005,8,木村六郎\nA006,9,小林七郎",
            "宛名番号",
            "宛名番号",
        );
        assert_eq!(keys(&result.only_in_a, "宛名番号"), vec!["2", "4", "6"]);
        assert_eq!(keys(&result.only_in_b, "宛名番号"), vec!["8", "9"]);
        assert_eq!(result.common_in_a.row_count(), 4);
        assert_eq!(result.common_in_b.row_count(), 4);
        assert_eq!(
            result.common_in_a.columns().collect::<Vec<_>>(),
            vec!["宛名番号", "名前", "住所"]
        );
        assert_eq!(
            result.common_in_b.columns().collect::<Vec<_>>(),
            vec!["口座番号", "宛名番号", "名前"]
        );
    }

    #[test]
    fn test_full_match() {
        let result = run(
            "ID,名前\n101,田中太郎\n102,鈴木花子\n103,佐藤一郎",
            "社員ID,メール\n101,tanaka@example.com\n102,suzuki@example.com\n103,sato@example.com",
            "ID",
            "社員ID",
        );
        assert!(result.only_in_a.is_empty());
        assert!(result.only_in_b.is_empty());
        assert_eq!(result.common_in_a.row_count(), 3);
        assert_eq!(result.common_in_b.row_count(), 3);
        assert!(!result.has_exclusive_rows());
    }

    #[test]
    fn test_no_match() {
        let result = run(
            "コード,商品名\nP001,りんご\nP002,みかん\nP003,バナナ",
            "コード,商品名\nP004,ぶどう\nP005,いちご\nP006,メロン",
            "コード",
            "コード",
        );
        assert_eq!(result.only_in_a.row_count(), 3);
        assert_eq!(result.only_in_b.row_count(), 3);
        assert!(result.common_in_a.is_empty());
        assert!(result.common_in_b.is_empty());
    }

    #[test]
    fn test_header_only_inputs() {
        let result = run("ID,名前,部署", "ID,名前,メール", "ID", "ID");
        for (_, table) in result.partitions() {
            assert_eq!(table.row_count(), 0);
        }
        assert_eq!(result.only_in_a.column_count(), 3);
    }

    #[test]
    fn test_large_against_small() {
        let mut csv_a = String::from("ID,名前\n");
        for i in 1..=1000 {
            csv_a.push_str(&format!("{},社員{:04}\n", i, i));
        }
        let result = run(
            &csv_a,
            "ID,名前\n500,社員0500\n999,社員0999\n1500,存在しない社員",
            "ID",
            "ID",
        );
        assert_eq!(result.only_in_a.row_count(), 998);
        assert_eq!(keys(&result.only_in_b, "ID"), vec!["1500"]);
        assert_eq!(keys(&result.common_in_a, "ID"), vec!["500", "999"]);
    }

    #[test]
    fn test_duplicate_keys_all_classified() {
        let result = run(
            "宛名番号,名前,住所\n1,山田太郎,東京都\n1,山田太郎,神奈川県\n2,鈴木花子,大阪府\n3,田中一郎,愛知県\n3,田中一郎,福岡県\n3,田中一郎,北海道",
            "宛名番号,口座番号\n1,ACC001\n2,ACC002\n2,ACC003\n4,ACC004",
            "宛名番号",
            "宛名番号",
        );
        assert_eq!(keys(&result.common_in_a, "宛名番号"), vec!["1", "1", "2"]);
        assert_eq!(keys(&result.only_in_a, "宛名番号"), vec!["3", "3", "3"]);
        assert_eq!(keys(&result.common_in_b, "宛名番号"), vec!["1", "2", "2"]);
        assert_eq!(keys(&result.only_in_b, "宛名番号"), vec!["4"]);
    }

    #[test]
    fn test_whitespace_keys_are_distinct() {
        let result = run("ID,名前\n 001,田中一郎", "ID,名前\n001,田中一郎", "ID", "ID");
        assert!(result.common_in_a.is_empty());

        let result = run("ID,名前\n001 ,佐藤二郎", "ID,名前\n001,佐藤二郎", "ID", "ID");
        assert!(result.common_in_a.is_empty());
    }

    #[test]
    fn test_zero_padding_is_distinct() {
        let result = run(
            "コード,名前\n001,山田太郎\n002,鈴木花子\n010,田中一郎\n100,佐藤二郎",
            "コード,名前\n1,山田太郎\n2,鈴木花子\n10,田中一郎\n100,佐藤二郎",
            "コード",
            "コード",
        );
        assert_eq!(keys(&result.common_in_a, "コード"), vec!["100"]);
        assert_eq!(result.only_in_a.row_count(), 3);
        assert_eq!(result.only_in_b.row_count(), 3);
    }

    #[test]
    fn test_case_is_significant() {
        let result = run("code\nabc", "code\nABC", "code", "code");
        assert_eq!(result.only_in_a.row_count(), 1);
        assert_eq!(result.only_in_b.row_count(), 1);
    }

    #[test]
    fn test_japanese_keys() {
        let result = run(
            "都道府県,人口\n東京都,14000000\n大阪府,8800000\n愛知県,7500000\n北海道,5200000\n福岡県,5100000",
            "都道府県,県庁所在地\n東京都,新宿区\n神奈川県,横浜市\n大阪府,大阪市\n京都府,京都市\n北海道,札幌市",
            "都道府県",
            "都道府県",
        );
        assert_eq!(
            keys(&result.common_in_a, "都道府県"),
            vec!["東京都", "大阪府", "北海道"]
        );
        assert_eq!(keys(&result.only_in_a, "都道府県"), vec!["愛知県", "福岡県"]);
        assert_eq!(keys(&result.only_in_b, "都道府県"), vec!["神奈川県", "京都府"]);
    }

    #[test]
    fn test_quoted_comma_key() {
        let result = run(
            "ID,名前\n\"3,中之島\",田中一郎\n3,佐藤二郎",
            "ID,名前\n3,佐藤二郎",
            "ID",
            "ID",
        );
        assert_eq!(keys(&result.only_in_a, "ID"), vec!["3,中之島"]);
        assert_eq!(keys(&result.common_in_a, "ID"), vec!["3"]);
    }

    #[test]
    fn test_empty_cells_stay_empty_strings() {
        let result = run(
            "ID,名前,備考\n1,山田太郎,正常データ\n2,鈴木花子,\n3,,備考のみ\n4,佐藤二郎,正常データ",
            "ID,名前\n1,山田太郎\n3,田中一郎\n5,伊藤三郎",
            "ID",
            "ID",
        );
        assert_eq!(keys(&result.common_in_a, "ID"), vec!["1", "3"]);
        assert_eq!(keys(&result.only_in_a, "ID"), vec!["2", "4"]);
        assert_eq!(keys(&result.only_in_b, "ID"), vec!["5"]);
        assert_eq!(result.common_in_a.get(1, "名前"), Some(""));
        assert_eq!(result.only_in_a.get(0, "備考"), Some(""));
    }

    #[test]
    fn test_empty_key_matches_empty_key() {
        let result = run("ID,v\n,a\n1,b", "ID,w\n,c", "ID", "ID");
        assert_eq!(keys(&result.common_in_a, "v"), vec!["a"]);
        assert_eq!(keys(&result.common_in_b, "w"), vec!["c"]);
    }

    #[test]
    fn test_totality() {
        let a = parse_str("ID,名前\n1,A\n2,B\n3,C\n4,D\n5,E\n5,E").unwrap();
        let b = parse_str("ID,名前\n1,A\n3,C\n5,E\n7,G").unwrap();
        let result = compare(&a, &b, "ID", "ID").unwrap();
        let stats = result.stats();
        assert_eq!(stats.only_in_a + stats.common_in_a, a.row_count());
        assert_eq!(stats.only_in_b + stats.common_in_b, b.row_count());
        assert_eq!(stats.a_row_count, 6);
        assert_eq!(stats.b_row_count, 4);
    }

    #[test]
    fn test_idempotent_and_inputs_untouched() {
        let a = parse_str("ID,x\n1,a\n2,b").unwrap();
        let b = parse_str("ID,y\n2,c\n3,d").unwrap();
        let a_before = a.clone();
        let first = compare(&a, &b, "ID", "ID").unwrap();
        let second = compare(&a, &b, "ID", "ID").unwrap();
        assert_eq!(first, second);
        assert_eq!(a, a_before);
    }

    #[test]
    fn test_invalid_key() {
        let a = parse_str("ID,x\n1,a").unwrap();
        let b = parse_str("code,y\n1,b").unwrap();

        let err = compare(&a, &b, "ID", "ID").unwrap_err();
        assert_eq!(
            err,
            CompareError::InvalidKey {
                side: Side::B,
                column: "ID".into(),
                available: vec!["code".into(), "y".into()],
            }
        );

        let err = compare(&a, &b, "missing", "code").unwrap_err();
        assert!(matches!(err, CompareError::InvalidKey { side: Side::A, .. }));
    }

    #[test]
    fn test_partition_metadata() {
        assert_eq!(Partition::CommonInB.side(), Side::B);
        assert!(Partition::OnlyInA.is_exclusive());
        assert!(!Partition::CommonInA.is_exclusive());
    }
}
