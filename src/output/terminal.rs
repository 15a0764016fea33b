//! Colored terminal summary

use std::io::Write;

use anyhow::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::diff::Partition;
use crate::model::Table;

use super::{Report, SummaryFormatter};

/// Terminal output with colors
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }

    fn write_header(&self, report: &Report, writer: &mut dyn WriteColor) -> Result<()> {
        writeln!(writer, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(writer, " keydiff: {} ↔ {}", report.input_a, report.input_b)?;
        writeln!(writer, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(writer)?;
        writeln!(
            writer,
            "A: {} rows, key column {}",
            report.stats.a_row_count, report.key_a
        )?;
        writeln!(
            writer,
            "B: {} rows, key column {}",
            report.stats.b_row_count, report.key_b
        )?;
        writeln!(writer)?;
        Ok(())
    }

    fn write_counts(&self, report: &Report, writer: &mut dyn WriteColor) -> Result<()> {
        let stats = &report.stats;
        let lines = [
            (Partition::OnlyInA, stats.only_in_a),
            (Partition::OnlyInB, stats.only_in_b),
            (Partition::CommonInA, stats.common_in_a),
            (Partition::CommonInB, stats.common_in_b),
        ];

        for (partition, count) in lines {
            let color = if partition.is_exclusive() {
                Color::Yellow
            } else {
                Color::Green
            };
            write!(writer, "  {:<20}", partition.to_string())?;
            writer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
            write!(writer, "{:>8}", count)?;
            writer.reset()?;
            writeln!(writer)?;
        }
        writeln!(writer)?;
        Ok(())
    }

    fn write_files(&self, report: &Report, writer: &mut dyn WriteColor) -> Result<()> {
        if report.files.is_empty() {
            return Ok(());
        }

        writeln!(writer, "Written files:")?;
        for file in &report.files {
            writeln!(writer, "  {} ({} rows)", file.path.display(), file.rows)?;
        }
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl SummaryFormatter for TerminalOutput {
    fn render(&self, report: &Report, writer: &mut dyn WriteColor) -> Result<()> {
        self.write_header(report, writer)?;
        self.write_counts(report, writer)?;
        self.write_files(report, writer)?;
        Ok(())
    }
}

/// Render the first `rows` rows of a table as a text grid
pub fn render_preview(table: &Table, rows: usize) -> String {
    let mut builder = Builder::default();
    builder.push_record(table.columns().map(str::to_string));
    for row in table.rows().iter().take(rows) {
        builder.push_record(row.cells.iter().cloned());
    }

    let mut grid = builder.build();
    grid.with(Style::rounded());
    grid.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::PartitionStats;
    use crate::parser::parse_str;
    use termcolor::NoColor;

    fn report() -> Report {
        Report {
            input_a: "a.csv".into(),
            input_b: "b.csv".into(),
            key_a: "ID".into(),
            key_b: "ID".into(),
            stats: PartitionStats {
                a_row_count: 3,
                b_row_count: 3,
                only_in_a: 1,
                only_in_b: 1,
                common_in_a: 2,
                common_in_b: 2,
            },
            files: Vec::new(),
        }
    }

    #[test]
    fn test_summary_counts() {
        let mut out = NoColor::new(Vec::new());
        TerminalOutput::new().render(&report(), &mut out).unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();

        assert!(text.contains("keydiff: a.csv ↔ b.csv"));
        assert!(text.contains("A: 3 rows, key column ID"));
        assert!(text.contains("only in A"));
        assert!(text.contains("common (B layout)"));
        assert!(!text.contains("Written files"));
    }

    #[test]
    fn test_preview_limits_rows() {
        let table = parse_str("ID,名前\n1,山田太郎\n2,鈴木花子\n3,田中一郎").unwrap();
        let preview = render_preview(&table, 2);
        assert!(preview.contains("山田太郎"));
        assert!(preview.contains("鈴木花子"));
        assert!(!preview.contains("田中一郎"));
        assert!(preview.contains("名前"));
    }
}
