use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::entities::column::ColumnDef;
use crate::ui::render::{RenderedRow, PAGE_SUBTOTAL_LABEL};

const SUB_ROW_PREFIX: &str = "↳ ";

pub fn export_page_csv(
    csv_path: &Path,
    columns: &[ColumnDef],
    rows: &[RenderedRow],
    subtotals: Option<&[String]>,
) -> Result<usize> {
    if columns.is_empty() {
        anyhow::bail!("no visible columns to export")
    }

    let mut writer = csv::Writer::from_path(csv_path)
        .with_context(|| format!("failed to create csv: {}", csv_path.display()))?;

    writer
        .write_record(columns.iter().map(|column| column.header))
        .context("failed to write csv header")?;

    for row in rows {
        let record = row.cells.iter().enumerate().map(|(idx, cell)| {
            if idx == 0 && row.depth > 0 {
                format!("{}{cell}", SUB_ROW_PREFIX.repeat(row.depth))
            } else {
                cell.clone()
            }
        });
        writer
            .write_record(record)
            .with_context(|| format!("failed to write csv row {}", row.id))?;
    }

    if let Some(subtotals) = subtotals {
        let record = subtotals.iter().enumerate().map(|(idx, cell)| {
            if idx == 0 && cell.is_empty() {
                PAGE_SUBTOTAL_LABEL.to_string()
            } else if idx == 0 {
                format!("{PAGE_SUBTOTAL_LABEL}: {cell}")
            } else {
                cell.clone()
            }
        });
        writer
            .write_record(record)
            .context("failed to write csv subtotal row")?;
    }

    writer.flush().context("failed to flush csv")?;
    Ok(rows.len())
}
