use chrono::DateTime;
use serde_json::Value;

use crate::domain::entities::column::{Aggregate, CellFormat, ColumnDef};
use crate::domain::entities::grid::{GridState, RowId, SortDirection, SortSpec};
use crate::domain::entities::report::Row;

/// Footer aggregates only cover the rows on screen, so they are never called "Total".
pub const PAGE_SUBTOTAL_LABEL: &str = "Page subtotal";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRow {
    pub id: RowId,
    pub depth: usize,
    /// Top-level row whose id the server can resolve.
    pub addressable: bool,
    pub cells: Vec<String>,
}

pub fn parse_f64(value: &str) -> Option<f64> {
    value.trim().replace(',', "").parse::<f64>().ok()
}

pub fn numeric_value(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => parse_f64(text),
        _ => None,
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return String::new();
    }
    let text = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };
    let sign = if value < 0.0 && text.chars().any(|ch| ch != '0' && ch != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac_part) => format!("{sign}{}.{frac_part}", group_thousands(int_part)),
        None => format!("{sign}{}", group_thousands(int_part)),
    }
}

fn plain_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(flag) => if *flag { "yes" } else { "no" }.to_string(),
        other => other.to_string(),
    }
}

pub fn format_cell(value: Option<&Value>, format: CellFormat) -> String {
    let Some(value) = value else {
        return String::new();
    };
    if value.is_null() {
        return String::new();
    }
    match format {
        CellFormat::Integer => numeric_value(Some(value))
            .map(|number| format_number(number.round(), 0))
            .unwrap_or_else(|| plain_text(value)),
        CellFormat::Money => numeric_value(Some(value))
            .map(|number| format_number(number, 2))
            .unwrap_or_else(|| plain_text(value)),
        CellFormat::Percent => numeric_value(Some(value))
            .map(|number| format!("{number:.2}%"))
            .unwrap_or_else(|| plain_text(value)),
        CellFormat::DateTime => match value {
            Value::String(text) => DateTime::parse_from_rfc3339(text)
                .map(|parsed| parsed.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|_| text.clone()),
            other => plain_text(other),
        },
        CellFormat::Status => plain_text(value).to_lowercase(),
        CellFormat::Text => plain_text(value),
    }
}

pub fn column_alignment(column: &ColumnDef) -> &'static str {
    if column.is_numeric() {
        "right"
    } else {
        "left"
    }
}

pub fn visible_columns(columns: &[ColumnDef], grid: &GridState) -> Vec<ColumnDef> {
    columns
        .iter()
        .filter(|column| grid.is_column_visible(column.id))
        .cloned()
        .collect()
}

pub fn header_label(column: &ColumnDef, sort: Option<&SortSpec>) -> String {
    match sort {
        Some(sort) if sort.key == column.id => {
            let arrow = match sort.direction {
                SortDirection::Ascending => "▲",
                SortDirection::Descending => "▼",
            };
            format!("{} {arrow}", column.header)
        }
        _ => column.header.to_string(),
    }
}

fn render_row(columns: &[ColumnDef], row: &Row, depth: usize, out: &mut Vec<RenderedRow>) {
    out.push(RenderedRow {
        id: row.id.clone(),
        depth,
        addressable: depth == 0 && row.is_addressable(),
        cells: columns
            .iter()
            .map(|column| format_cell(row.cell(column.id), column.format))
            .collect(),
    });
    for sub_row in &row.sub_rows {
        render_row(columns, sub_row, depth + 1, out);
    }
}

/// Sub-rows follow their parent with `depth` 1.
pub fn render_rows(columns: &[ColumnDef], rows: &[Row]) -> Vec<RenderedRow> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        render_row(columns, row, 0, &mut out);
    }
    out
}

/// One cell per column, empty where the column has no aggregate. Sub-rows are
/// display breakdowns and are not counted. `None` when nothing aggregates.
pub fn page_subtotals(columns: &[ColumnDef], rows: &[Row]) -> Option<Vec<String>> {
    if columns.iter().all(|column| column.aggregate.is_none()) {
        return None;
    }
    let cells = columns
        .iter()
        .map(|column| {
            let Some(aggregate) = column.aggregate else {
                return String::new();
            };
            let values: Vec<f64> = rows
                .iter()
                .filter_map(|row| numeric_value(row.cell(column.id)))
                .collect();
            if values.is_empty() {
                return String::new();
            }
            let sum: f64 = values.iter().sum();
            let result = match aggregate {
                Aggregate::Sum => sum,
                Aggregate::Average => sum / values.len() as f64,
            };
            format_cell(
                serde_json::Number::from_f64(result)
                    .map(Value::Number)
                    .as_ref(),
                column.format,
            )
        })
        .collect();
    Some(cells)
}
