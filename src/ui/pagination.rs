use crate::domain::entities::grid::GridState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub page_index: usize,
    pub page_size: usize,
    pub page_count: u64,
    pub total_items: u64,
    pub can_previous: bool,
    pub can_next: bool,
    pub first_item: u64,
    pub last_item: u64,
}

impl PaginationView {
    pub fn from_grid(grid: &GridState) -> Self {
        let total_items = grid.total_count();
        let page_size = grid.page_size() as u64;
        let start = (grid.page_index() as u64).saturating_mul(page_size);
        let (first_item, last_item) = if start >= total_items {
            (0, 0)
        } else {
            (start + 1, (start + page_size).min(total_items))
        };
        Self {
            page_index: grid.page_index(),
            page_size: grid.page_size(),
            page_count: grid.page_count(),
            total_items,
            can_previous: grid.can_previous_page(),
            can_next: grid.can_next_page(),
            first_item,
            last_item,
        }
    }

    pub fn range_label(&self) -> String {
        if self.total_items == 0 || self.first_item == 0 {
            return format!("0 of {}", self.total_items);
        }
        format!(
            "{}–{} of {}",
            self.first_item, self.last_item, self.total_items
        )
    }

    pub fn page_label(&self) -> String {
        if self.page_count == 0 {
            return "Page 0 of 0".to_string();
        }
        format!("Page {} of {}", self.page_index + 1, self.page_count)
    }
}
