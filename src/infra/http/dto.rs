use serde::Deserialize;
use serde_json::Value;

use crate::domain::entities::bet::BetRecord;
use crate::domain::entities::report::{disambiguate_ids, PageResult, Row};

#[derive(Deserialize)]
pub struct PaginationDto {
    #[serde(rename = "totalCount")]
    total_count: u64,
}

// Endpoints disagree on where the total lives.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum PageEnvelope {
    Paginated {
        data: Vec<Value>,
        pagination: PaginationDto,
    },
    Totaled {
        data: Vec<Value>,
        total: u64,
    },
}

impl PageEnvelope {
    pub fn into_page(self, id_field: &str, sub_rows_field: Option<&str>) -> PageResult {
        let (data, total_count) = match self {
            PageEnvelope::Paginated { data, pagination } => (data, pagination.total_count),
            PageEnvelope::Totaled { data, total } => (data, total),
        };
        let mut rows: Vec<Row> = data
            .into_iter()
            .enumerate()
            .map(|(position, value)| Row::from_json(value, position, id_field, sub_rows_field))
            .collect();
        disambiguate_ids(&mut rows);
        PageResult { rows, total_count }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum BetEnvelope {
    Wrapped { data: BetRecord },
    Bare(BetRecord),
}

impl From<BetEnvelope> for BetRecord {
    fn from(value: BetEnvelope) -> Self {
        match value {
            BetEnvelope::Wrapped { data } => data,
            BetEnvelope::Bare(record) => record,
        }
    }
}
