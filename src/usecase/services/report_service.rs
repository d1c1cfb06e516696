use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::grid::FetchParams;
use crate::domain::entities::report::{PageResult, ReportFilter, ReportKind};
use crate::usecase::ports::api::{ApiError, PageRequest, PageSource};

pub struct ReportService {
    source: Arc<dyn PageSource>,
}

impl ReportService {
    pub fn new(source: Arc<dyn PageSource>) -> Self {
        Self { source }
    }

    pub fn page_request(kind: ReportKind, params: FetchParams, filter: &ReportFilter) -> PageRequest {
        PageRequest {
            path: kind.path().to_string(),
            params,
            filters: filter.query_pairs(kind.filter_fields()),
            id_field: kind.id_field().to_string(),
            sub_rows_field: kind.sub_rows_field().map(str::to_string),
        }
    }

    pub async fn fetch(
        &self,
        kind: ReportKind,
        params: FetchParams,
        filter: &ReportFilter,
    ) -> Result<PageResult, ApiError> {
        let request = Self::page_request(kind, params, filter);
        let page = self.source.fetch_page(request).await?;
        debug!(
            report = kind.path(),
            rows = page.rows.len(),
            total = page.total_count,
            "report page loaded"
        );
        Ok(page)
    }
}
