use crate::error::Result;
use crate::results::{COLUMNS, VideoRecord};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// File formats the records can be saved in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma separated, absent fields as empty cells
    #[default]
    Csv,
    /// One JSON object per line, absent fields as `null`
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "jsonl",
        }
    }
}

/// Writes `records` to `path` in the given format
pub fn write_records(records: &[VideoRecord], path: &Path, format: OutputFormat) -> Result<()> {
    let file = File::create(path)?;
    match format {
        OutputFormat::Csv => write_csv(records, file),
        OutputFormat::Json => write_json_lines(records, file),
    }
}

/// CSV with the fixed eight-column header, written even when there are no records.
///
/// An absent field is an empty cell; a present but empty field is a quoted
/// `""`, so the two stay apart.
pub fn write_csv<W: Write>(records: &[VideoRecord], writer: W) -> Result<()> {
    let mut out = BufWriter::new(writer);
    write_row(&mut out, COLUMNS.map(Some))?;
    for record in records {
        write_row(&mut out, csv_cells(record))?;
    }
    out.flush()?;
    Ok(())
}

/// Cells of one record in column order; `None` marks an absent field
fn csv_cells(record: &VideoRecord) -> [Option<&str>; 8] {
    [
        Some(record.title.as_str()),
        Some(record.video_id.as_str()),
        Some(record.url.as_str()),
        record.channel_name.as_deref(),
        record.published_text.as_deref(),
        record.views_text.as_deref(),
        record.duration_text.as_deref(),
        record.description_text.as_deref(),
    ]
}

fn write_row<W: Write>(out: &mut W, cells: [Option<&str>; 8]) -> Result<()> {
    let mut row = Vec::new();
    for (index, cell) in cells.iter().enumerate() {
        if index > 0 {
            row.push(b',');
        }
        if let Some(text) = cell {
            row.extend_from_slice(&encode_cell(text)?);
        }
    }
    row.push(b'\n');
    out.write_all(&row)?;
    Ok(())
}

/// Escapes one cell as a single-field CSV record, which quotes an empty value
fn encode_cell(text: &str) -> Result<Vec<u8>> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());
    wtr.write_record([text])?;
    let mut bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    if bytes.last() == Some(&b'\n') {
        bytes.pop();
    }
    Ok(bytes)
}

pub fn write_json_lines<W: Write>(records: &[VideoRecord], writer: W) -> Result<()> {
    let mut out = BufWriter::new(writer);
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
