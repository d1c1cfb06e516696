#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormat {
    Text,
    Integer,
    Money,
    Percent,
    DateTime,
    Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Sum,
    Average,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDef {
    pub id: &'static str,
    pub header: &'static str,
    pub sortable: bool,
    pub format: CellFormat,
    pub aggregate: Option<Aggregate>,
}

impl ColumnDef {
    pub fn new(id: &'static str, header: &'static str, format: CellFormat) -> Self {
        Self {
            id,
            header,
            sortable: false,
            format,
            aggregate: None,
        }
    }

    pub fn text(id: &'static str, header: &'static str) -> Self {
        Self::new(id, header, CellFormat::Text)
    }

    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    pub fn aggregate(mut self, aggregate: Aggregate) -> Self {
        self.aggregate = Some(aggregate);
        self
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self.format,
            CellFormat::Integer | CellFormat::Money | CellFormat::Percent
        )
    }
}
