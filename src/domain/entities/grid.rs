use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowId(pub String);

impl From<&str> for RowId {
    fn from(value: &str) -> Self {
        RowId(value.to_string())
    }
}

impl From<String> for RowId {
    fn from(value: String) -> Self {
        RowId(value)
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub fn as_query_value(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Query parameters derived from the grid, consumed by the remote fetch layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchParams {
    pub skip: u64,
    pub take: u64,
    pub order_by: Option<String>,
    pub order_format: Option<SortDirection>,
}

impl FetchParams {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("skip".to_string(), self.skip.to_string()),
            ("take".to_string(), self.take.to_string()),
        ];
        if let (Some(order_by), Some(order_format)) = (&self.order_by, self.order_format) {
            pairs.push(("orderBy".to_string(), order_by.clone()));
            pairs.push((
                "orderFormat".to_string(),
                order_format.as_query_value().to_string(),
            ));
        }
        pairs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    ZeroPageSize,
}

impl std::fmt::Display for GridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GridError::ZeroPageSize => write!(f, "page size must be greater than zero"),
        }
    }
}

impl std::error::Error for GridError {}

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Pagination, sort, selection and column-visibility state of one data grid.
///
/// `page_count` is always derived from `total_count` and `page_size`. Row
/// selection never outlives the page it was made on, and only the response
/// to the most recently issued request is allowed to replace the loaded rows.
#[derive(Debug, Clone, PartialEq)]
pub struct GridState {
    page_index: usize,
    page_size: usize,
    sort: Option<SortSpec>,
    total_count: u64,
    loaded_ids: Vec<RowId>,
    selection: BTreeSet<RowId>,
    column_visibility: BTreeMap<String, bool>,
    load: LoadState,
    issued_seq: u64,
}

impl Default for GridState {
    fn default() -> Self {
        Self {
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort: None,
            total_count: 0,
            loaded_ids: Vec::new(),
            selection: BTreeSet::new(),
            column_visibility: BTreeMap::new(),
            load: LoadState::Idle,
            issued_seq: 0,
        }
    }
}

impl GridState {
    pub fn new(page_size: usize) -> Result<Self, GridError> {
        if page_size == 0 {
            return Err(GridError::ZeroPageSize);
        }
        Ok(Self {
            page_size,
            ..Self::default()
        })
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn loaded_ids(&self) -> &[RowId] {
        &self.loaded_ids
    }

    pub fn selection(&self) -> &BTreeSet<RowId> {
        &self.selection
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn is_loading(&self) -> bool {
        self.load == LoadState::Loading
    }

    // Out-of-range indices are stored as given; the fetch simply returns no rows.
    pub fn set_page_index(&mut self, page_index: usize) {
        if page_index != self.page_index {
            self.selection.clear();
        }
        self.page_index = page_index;
    }

    /// Filter changes go back to the first page.
    pub fn reset_page(&mut self) {
        self.set_page_index(0);
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), GridError> {
        if page_size == 0 {
            return Err(GridError::ZeroPageSize);
        }
        self.page_size = page_size;
        self.page_index = 0;
        self.selection.clear();
        Ok(())
    }

    pub fn set_sorting(&mut self, sort: Option<SortSpec>) {
        if sort != self.sort {
            self.page_index = 0;
            self.selection.clear();
        }
        self.sort = sort;
    }

    /// Header click: a new column starts ascending, then descending, then unsorted.
    pub fn toggle_sort(&mut self, key: &str) {
        let next = match &self.sort {
            Some(current) if current.key == key => match current.direction {
                SortDirection::Ascending => Some(SortSpec::descending(key)),
                SortDirection::Descending => None,
            },
            _ => Some(SortSpec::ascending(key)),
        };
        self.set_sorting(next);
    }

    pub fn page_count(&self) -> u64 {
        self.total_count.div_ceil(self.page_size as u64)
    }

    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        (self.page_index as u64).saturating_add(1) < self.page_count()
    }

    pub fn next_page(&mut self) -> bool {
        if !self.can_next_page() {
            return false;
        }
        self.set_page_index(self.page_index + 1);
        true
    }

    pub fn previous_page(&mut self) -> bool {
        if !self.can_previous_page() {
            return false;
        }
        self.set_page_index(self.page_index - 1);
        true
    }

    pub fn fetch_params(&self) -> FetchParams {
        let take = self.page_size as u64;
        FetchParams {
            skip: (self.page_index as u64).saturating_mul(take),
            take,
            order_by: self.sort.as_ref().map(|sort| sort.key.clone()),
            order_format: self.sort.as_ref().map(|sort| sort.direction),
        }
    }

    pub fn toggle_selection(&mut self, row_id: &RowId) {
        if !self.loaded_ids.contains(row_id) {
            return;
        }
        if !self.selection.remove(row_id) {
            self.selection.insert(row_id.clone());
        }
    }

    /// Selects the rows of the current page only, never the whole filtered set.
    pub fn select_all(&mut self) {
        self.selection = self.loaded_ids.iter().cloned().collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn is_selected(&self, row_id: &RowId) -> bool {
        self.selection.contains(row_id)
    }

    pub fn is_all_selected(&self) -> bool {
        !self.loaded_ids.is_empty()
            && self
                .loaded_ids
                .iter()
                .all(|id| self.selection.contains(id))
    }

    pub fn set_column_visible(&mut self, key: &str, visible: bool) {
        self.column_visibility.insert(key.to_string(), visible);
    }

    pub fn is_column_visible(&self, key: &str) -> bool {
        self.column_visibility.get(key).copied().unwrap_or(true)
    }

    pub fn column_visibility(&self) -> &BTreeMap<String, bool> {
        &self.column_visibility
    }

    pub fn normalize_column_visibility<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) {
        for key in keys {
            self.column_visibility.entry(key.to_string()).or_insert(true);
        }
    }

    pub fn begin_request(&mut self) -> RequestTicket {
        self.issued_seq += 1;
        self.load = LoadState::Loading;
        RequestTicket(self.issued_seq)
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.issued_seq
    }

    /// Returns `false` when the ticket was superseded and the response was dropped.
    pub fn apply_page(
        &mut self,
        ticket: RequestTicket,
        row_ids: Vec<RowId>,
        total_count: u64,
    ) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        let mut seen = BTreeSet::new();
        let row_ids: Vec<RowId> = row_ids
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();
        self.selection.retain(|id| seen.contains(id));
        self.loaded_ids = row_ids;
        self.total_count = total_count;
        self.load = LoadState::Idle;
        true
    }

    pub fn apply_failure(&mut self, ticket: RequestTicket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.load = LoadState::Failed(message.into());
        true
    }
}
