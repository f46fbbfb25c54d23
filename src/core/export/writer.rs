//! Output files
//!
//! Rows are written as CSV (header from the columns of the rows, in first-seen
//! order) or as a pretty-printed JSON array of objects.

use crate::config::{ExportConfig, OutputFormat};
use crate::core::transform::FlatRow;
use crate::domain::{ChessError, Result};
use chrono::{DateTime, Local};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Writes row sets into an output directory
#[derive(Debug, Clone)]
pub struct OutputWriter {
    dir: PathBuf,
    format: OutputFormat,
    delimiter: u8,
}

impl OutputWriter {
    pub fn new(dir: impl Into<PathBuf>, format: OutputFormat, delimiter: u8) -> Self {
        Self {
            dir: dir.into(),
            format,
            delimiter,
        }
    }

    pub fn from_config(config: &ExportConfig) -> Result<Self> {
        let delimiter = config.delimiter_byte().map_err(ChessError::Configuration)?;
        Ok(Self::new(&config.output_dir, config.format, delimiter))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// `<instance>_<domain>_<YYYYmmdd_HHMMSS>.<ext>`
    pub fn file_name(&self, instance: &str, domain: &str, timestamp: &DateTime<Local>) -> String {
        format!(
            "{instance}_{domain}_{}.{}",
            timestamp.format("%Y%m%d_%H%M%S"),
            self.format.extension()
        )
    }

    /// Writes `rows` and returns the path of the new file
    pub fn write(
        &self,
        instance: &str,
        domain: &str,
        timestamp: &DateTime<Local>,
        rows: &[FlatRow],
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            ChessError::Export(format!(
                "Failed to create output directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let path = self.dir.join(self.file_name(instance, domain, timestamp));
        match self.format {
            OutputFormat::Csv => write_csv(&path, rows, self.delimiter)?,
            OutputFormat::Json => write_json(&path, rows)?,
        }

        tracing::debug!(path = %path.display(), rows = rows.len(), "Output written");
        Ok(path)
    }
}

/// Union of column names in first-seen order
fn header(rows: &[FlatRow]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut columns: Vec<String> = Vec::new();
    for row in rows {
        for name in row.column_names() {
            if seen.insert(name) {
                columns.push(name.to_string());
            }
        }
    }
    columns
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn write_csv(path: &Path, rows: &[FlatRow], delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)?;

    let columns = header(rows);
    if !columns.is_empty() {
        writer.write_record(&columns)?;
    }
    for row in rows {
        writer.write_record(columns.iter().map(|c| cell(row.get(c))))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json(path: &Path, rows: &[FlatRow]) -> Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    let objects: Vec<Value> = rows.iter().map(FlatRow::to_json).collect();
    serde_json::to_writer_pretty(&mut out, &objects)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use tempfile::TempDir;

    fn rows() -> Vec<FlatRow> {
        let mut a = FlatRow::new();
        a.push("idArticulo", json!(1));
        a.push("desArticulo", json!("Agua; 500ml"));
        a.push("agrup_idAgrupacion", Value::Null);

        let mut b = FlatRow::new();
        b.push("idArticulo", json!(2));
        b.push("desArticulo", json!("Soda"));
        b.push("agrup_idAgrupacion", json!(7));
        vec![a, b]
    }

    fn timestamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap()
    }

    #[test]
    fn test_file_name() {
        let writer = OutputWriter::new("data", OutputFormat::Csv, b';');
        assert_eq!(
            writer.file_name("s", "articles", &timestamp()),
            "s_articles_20250304_050607.csv"
        );
    }

    #[test]
    fn test_write_csv() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path().join("out"), OutputFormat::Csv, b';');
        let path = writer.write("s", "articles", &timestamp(), &rows()).unwrap();

        let contents = fs::read_to_string(path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "idArticulo;desArticulo;agrup_idAgrupacion");
        assert_eq!(lines[1], "1;\"Agua; 500ml\";");
        assert_eq!(lines[2], "2;Soda;7");
    }

    #[test]
    fn test_write_json() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path(), OutputFormat::Json, b';');
        let path = writer.write("s", "articles", &timestamp(), &rows()).unwrap();
        assert!(path.to_string_lossy().ends_with(".json"));

        let parsed: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(parsed[1]["desArticulo"], json!("Soda"));
        assert_eq!(parsed[0]["agrup_idAgrupacion"], Value::Null);
    }

    #[test]
    fn test_header_union_over_many_rows() {
        let mut rows = Vec::new();
        for i in 0..2000 {
            let mut row = FlatRow::new();
            row.push("idCliente", json!(i));
            for slot in 1..=(i % 3 + 1) {
                row.push(format!("fuerza{slot}_idFuerzaVentas"), json!(slot));
            }
            rows.push(row);
        }
        let mut last = FlatRow::new();
        last.push("alias_idAlias", json!(1));
        last.push("idCliente", json!(0));
        rows.push(last);

        assert_eq!(
            header(&rows),
            vec![
                "idCliente",
                "fuerza1_idFuerzaVentas",
                "fuerza2_idFuerzaVentas",
                "fuerza3_idFuerzaVentas",
                "alias_idAlias",
            ]
        );
    }

    #[test]
    fn test_write_empty_rows() {
        let dir = TempDir::new().unwrap();
        let writer = OutputWriter::new(dir.path(), OutputFormat::Csv, b',');
        let path = writer.write("s", "stock", &timestamp(), &[]).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), "");
    }
}
