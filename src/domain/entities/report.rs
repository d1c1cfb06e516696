use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde_json::{Map, Value};

use crate::domain::entities::column::{Aggregate, CellFormat, ColumnDef};
use crate::domain::entities::grid::RowId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Game,
    Player,
    Supplier,
    Daily,
    Round,
    Summary,
    Transactions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    DateRange,
    Provider,
    Search,
    Currency,
    PlayerId,
    RoundId,
}

impl ReportKind {
    pub fn all() -> [ReportKind; 7] {
        [
            ReportKind::Game,
            ReportKind::Player,
            ReportKind::Supplier,
            ReportKind::Daily,
            ReportKind::Round,
            ReportKind::Summary,
            ReportKind::Transactions,
        ]
    }

    pub fn path(self) -> &'static str {
        match self {
            ReportKind::Game => "reports/game",
            ReportKind::Player => "reports/player",
            ReportKind::Supplier => "reports/supplier",
            ReportKind::Daily => "reports/daily",
            ReportKind::Round => "reports/round",
            ReportKind::Summary => "reports/summary",
            ReportKind::Transactions => "transactions",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ReportKind::Game => "Game report",
            ReportKind::Player => "Player report",
            ReportKind::Supplier => "Supplier report",
            ReportKind::Daily => "Daily report",
            ReportKind::Round => "Round report",
            ReportKind::Summary => "Summary report",
            ReportKind::Transactions => "Transactions",
        }
    }

    /// Comma-separated fields that together identify a row.
    pub fn id_field(self) -> &'static str {
        match self {
            ReportKind::Game => "gameId",
            ReportKind::Player => "playerId,currency",
            ReportKind::Supplier => "supplierId",
            ReportKind::Daily => "date",
            ReportKind::Round => "roundId",
            ReportKind::Summary => "currency",
            ReportKind::Transactions => "transactionId",
        }
    }

    /// Field holding nested breakdown rows, when the report has them.
    pub fn sub_rows_field(self) -> Option<&'static str> {
        match self {
            ReportKind::Supplier => Some("currencies"),
            _ => None,
        }
    }

    pub fn filter_fields(self) -> &'static [FilterField] {
        match self {
            ReportKind::Game => &[
                FilterField::DateRange,
                FilterField::Provider,
                FilterField::Search,
            ],
            ReportKind::Player => &[
                FilterField::DateRange,
                FilterField::PlayerId,
                FilterField::Currency,
            ],
            ReportKind::Supplier => &[FilterField::DateRange, FilterField::Provider],
            ReportKind::Daily => &[FilterField::DateRange, FilterField::Currency],
            ReportKind::Round => &[
                FilterField::DateRange,
                FilterField::RoundId,
                FilterField::PlayerId,
            ],
            ReportKind::Summary => &[FilterField::DateRange],
            ReportKind::Transactions => &[
                FilterField::DateRange,
                FilterField::PlayerId,
                FilterField::Search,
            ],
        }
    }

    pub fn columns(self) -> Vec<ColumnDef> {
        match self {
            ReportKind::Game => vec![
                ColumnDef::text("gameName", "Game").sortable(),
                ColumnDef::text("provider", "Provider").sortable(),
                ColumnDef::new("rounds", "Rounds", CellFormat::Integer)
                    .sortable()
                    .aggregate(Aggregate::Sum),
                ColumnDef::new("totalBet", "Bet", CellFormat::Money)
                    .sortable()
                    .aggregate(Aggregate::Sum),
                ColumnDef::new("totalWin", "Win", CellFormat::Money)
                    .sortable()
                    .aggregate(Aggregate::Sum),
                ColumnDef::new("ggr", "GGR", CellFormat::Money)
                    .sortable()
                    .aggregate(Aggregate::Sum),
                ColumnDef::new("rtp", "RTP", CellFormat::Percent).aggregate(Aggregate::Average),
            ],
            ReportKind::Player => vec![
                ColumnDef::text("playerId", "Player").sortable(),
                ColumnDef::text("username", "Username").sortable(),
                ColumnDef::text("currency", "Currency"),
                ColumnDef::new("rounds", "Rounds", CellFormat::Integer)
                    .sortable()
                    .aggregate(Aggregate::Sum),
                ColumnDef::new("totalBet", "Bet", CellFormat::Money)
                    .sortable()
                    .aggregate(Aggregate::Sum),
                ColumnDef::new("totalWin", "Win", CellFormat::Money)
                    .sortable()
                    .aggregate(Aggregate::Sum),
                ColumnDef::new("lastPlayedAt", "Last played", CellFormat::DateTime).sortable(),
            ],
            ReportKind::Supplier => vec![
                ColumnDef::text("supplierName", "Supplier").sortable(),
                ColumnDef::text("currency", "Currency"),
                ColumnDef::new("totalBet", "Bet", CellFormat::Money)
                    .sortable()
                    .aggregate(Aggregate::Sum),
                ColumnDef::new("totalWin", "Win", CellFormat::Money)
                    .sortable()
                    .aggregate(Aggregate::Sum),
                ColumnDef::new("ggr", "GGR", CellFormat::Money)
                    .sortable()
                    .aggregate(Aggregate::Sum),
            ],
            ReportKind::Daily => vec![
                ColumnDef::new("date", "Date", CellFormat::Text).sortable(),
                ColumnDef::new("activePlayers", "Active players", CellFormat::Integer)
                    .aggregate(Aggregate::Average),
                ColumnDef::new("rounds", "Rounds", CellFormat::Integer).aggregate(Aggregate::Sum),
                ColumnDef::new("totalBet", "Bet", CellFormat::Money).aggregate(Aggregate::Sum),
                ColumnDef::new("totalWin", "Win", CellFormat::Money).aggregate(Aggregate::Sum),
                ColumnDef::new("ggr", "GGR", CellFormat::Money).aggregate(Aggregate::Sum),
            ],
            ReportKind::Round => vec![
                ColumnDef::text("roundId", "Round").sortable(),
                ColumnDef::text("playerId", "Player"),
                ColumnDef::text("gameName", "Game"),
                ColumnDef::new("bet", "Bet", CellFormat::Money).aggregate(Aggregate::Sum),
                ColumnDef::new("win", "Win", CellFormat::Money).aggregate(Aggregate::Sum),
                ColumnDef::new("status", "Status", CellFormat::Status),
                ColumnDef::new("createdAt", "Started", CellFormat::DateTime).sortable(),
            ],
            ReportKind::Summary => vec![
                ColumnDef::text("currency", "Currency"),
                ColumnDef::new("players", "Players", CellFormat::Integer),
                ColumnDef::new("rounds", "Rounds", CellFormat::Integer),
                ColumnDef::new("totalBet", "Bet", CellFormat::Money),
                ColumnDef::new("totalWin", "Win", CellFormat::Money),
                ColumnDef::new("ggr", "GGR", CellFormat::Money),
            ],
            ReportKind::Transactions => vec![
                ColumnDef::text("transactionId", "Transaction").sortable(),
                ColumnDef::text("playerId", "Player").sortable(),
                ColumnDef::new("type", "Type", CellFormat::Status),
                ColumnDef::new("amount", "Amount", CellFormat::Money)
                    .sortable()
                    .aggregate(Aggregate::Sum),
                ColumnDef::new("balanceAfter", "Balance", CellFormat::Money),
                ColumnDef::new("createdAt", "Created", CellFormat::DateTime).sortable(),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub provider: String,
    pub search: String,
    pub currency: String,
    pub player_id: String,
    pub round_id: String,
}

impl ReportFilter {
    pub fn default_for(kind: ReportKind, today: NaiveDate) -> Self {
        let mut filter = ReportFilter::default();
        if kind.filter_fields().contains(&FilterField::DateRange) {
            filter.date_from = Some(today - Duration::days(7));
            filter.date_to = Some(today);
        }
        filter
    }

    pub fn query_pairs(&self, fields: &[FilterField]) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut push_text = |name: &str, value: &str| {
            let value = value.trim();
            if !value.is_empty() {
                pairs.push((name.to_string(), value.to_string()));
            }
        };

        for field in fields {
            match field {
                FilterField::DateRange => {
                    if let Some(from) = self.date_from {
                        push_text("dateFrom", &from.format("%Y-%m-%d").to_string());
                    }
                    if let Some(to) = self.date_to {
                        push_text("dateTo", &to.format("%Y-%m-%d").to_string());
                    }
                }
                FilterField::Provider => push_text("provider", &self.provider),
                FilterField::Search => push_text("search", &self.search),
                FilterField::Currency => push_text("currency", &self.currency),
                FilterField::PlayerId => push_text("playerId", &self.player_id),
                FilterField::RoundId => push_text("roundId", &self.round_id),
            }
        }
        pairs
    }

    pub fn date_range_is_valid(&self) -> bool {
        match (self.date_from, self.date_to) {
            (Some(from), Some(to)) => from <= to,
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: RowId,
    /// Set when the payload had no usable id and `id` is positional.
    pub synthetic_id: bool,
    pub cells: Map<String, Value>,
    pub sub_rows: Vec<Row>,
}

fn key_part(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(text)) if !text.is_empty() => Some(text.clone()),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => None,
    }
}

impl Row {
    pub fn from_json(
        value: Value,
        position: usize,
        id_field: &str,
        sub_rows_field: Option<&str>,
    ) -> Row {
        let mut cells = match value {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };

        let sub_rows = sub_rows_field
            .and_then(|field| cells.remove(field))
            .and_then(|nested| match nested {
                Value::Array(items) => Some(items),
                _ => None,
            })
            .unwrap_or_default();

        let parts: Option<Vec<String>> = id_field
            .split(',')
            .map(|field| key_part(cells.get(field.trim())))
            .collect();
        let (id, synthetic_id) = match parts {
            Some(parts) => (RowId(parts.join(":")), false),
            None => (RowId(format!("#{position}")), true),
        };

        let sub_rows = sub_rows
            .into_iter()
            .enumerate()
            .map(|(idx, nested)| {
                let mut row = Row::from_json(nested, idx, id_field, None);
                row.id = RowId(format!("{}/{idx}", id.0));
                row.synthetic_id = true;
                row
            })
            .collect();

        Row {
            id,
            synthetic_id,
            cells,
            sub_rows,
        }
    }

    pub fn cell(&self, key: &str) -> Option<&Value> {
        self.cells.get(key)
    }

    /// Editable and deletable rows need an id the server gave us.
    pub fn is_addressable(&self) -> bool {
        !self.synthetic_id
    }
}

/// Repeated ids within a page get a `~n` suffix and lose addressability.
pub fn disambiguate_ids(rows: &mut [Row]) {
    let mut seen: BTreeMap<RowId, usize> = BTreeMap::new();
    for row in rows.iter_mut() {
        let count = seen.entry(row.id.clone()).or_insert(0);
        *count += 1;
        if *count > 1 {
            row.id = RowId(format!("{}~{}", row.id.0, count));
            row.synthetic_id = true;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageResult {
    pub rows: Vec<Row>,
    pub total_count: u64,
}

impl PageResult {
    pub fn row_ids(&self) -> Vec<RowId> {
        self.rows.iter().map(|row| row.id.clone()).collect()
    }
}
