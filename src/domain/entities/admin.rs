use serde_json::Value;

use crate::domain::entities::column::{CellFormat, ColumnDef};
use crate::domain::entities::form::{FieldKind, FieldSpec, FormValues};
use crate::domain::entities::report::Row;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdminResource {
    Users,
    Games,
    Providers,
}

impl AdminResource {
    pub fn all() -> [AdminResource; 3] {
        [
            AdminResource::Users,
            AdminResource::Games,
            AdminResource::Providers,
        ]
    }

    pub fn path(self) -> &'static str {
        match self {
            AdminResource::Users => "admin/users",
            AdminResource::Games => "admin/games",
            AdminResource::Providers => "admin/providers",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AdminResource::Users => "Users",
            AdminResource::Games => "Games",
            AdminResource::Providers => "Providers",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            AdminResource::Users => "user",
            AdminResource::Games => "game",
            AdminResource::Providers => "provider",
        }
    }

    pub fn id_field(self) -> &'static str {
        "id"
    }

    pub fn columns(self) -> Vec<ColumnDef> {
        match self {
            AdminResource::Users => vec![
                ColumnDef::text("username", "Username").sortable(),
                ColumnDef::text("email", "Email").sortable(),
                ColumnDef::new("role", "Role", CellFormat::Status),
                ColumnDef::new("active", "Active", CellFormat::Status),
                ColumnDef::new("createdAt", "Created", CellFormat::DateTime).sortable(),
            ],
            AdminResource::Games => vec![
                ColumnDef::text("name", "Name").sortable(),
                ColumnDef::text("provider", "Provider").sortable(),
                ColumnDef::text("category", "Category"),
                ColumnDef::new("rtp", "RTP", CellFormat::Percent).sortable(),
                ColumnDef::new("active", "Active", CellFormat::Status),
            ],
            AdminResource::Providers => vec![
                ColumnDef::text("name", "Name").sortable(),
                ColumnDef::text("code", "Code").sortable(),
                ColumnDef::text("apiUrl", "API URL"),
                ColumnDef::new("active", "Active", CellFormat::Status),
            ],
        }
    }

    pub fn form_fields(self) -> Vec<FieldSpec> {
        match self {
            AdminResource::Users => vec![
                FieldSpec::new("username", "Username", FieldKind::Text)
                    .required()
                    .length(3, 32),
                FieldSpec::new("email", "Email", FieldKind::Email).required(),
                FieldSpec::new(
                    "role",
                    "Role",
                    FieldKind::Select(vec!["admin", "operator", "viewer"]),
                )
                .required(),
                FieldSpec::new("active", "Active", FieldKind::Toggle),
            ],
            AdminResource::Games => vec![
                FieldSpec::new("name", "Name", FieldKind::Text)
                    .required()
                    .length(1, 80),
                FieldSpec::new("provider", "Provider", FieldKind::Text).required(),
                FieldSpec::new(
                    "category",
                    "Category",
                    FieldKind::Select(vec!["slots", "table", "live", "crash"]),
                )
                .required(),
                FieldSpec::new("rtp", "RTP", FieldKind::Number),
                FieldSpec::new("active", "Active", FieldKind::Toggle),
            ],
            AdminResource::Providers => provider_fields(),
        }
    }
}

/// Prefills an edit form from a listed record. Toggles default to "false".
pub fn form_values_from_row(fields: &[FieldSpec], row: &Row) -> FormValues {
    fields
        .iter()
        .map(|field| {
            let value = match row.cell(field.key) {
                Some(Value::String(text)) => text.clone(),
                Some(Value::Bool(flag)) => flag.to_string(),
                Some(Value::Number(number)) => number.to_string(),
                _ if field.kind == FieldKind::Toggle => "false".to_string(),
                _ => String::new(),
            };
            (field.key.to_string(), value)
        })
        .collect()
}

pub fn provider_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("name", "Name", FieldKind::Text)
            .required()
            .length(2, 64),
        FieldSpec::new("code", "Code", FieldKind::Text)
            .required()
            .length(2, 16),
        FieldSpec::new("apiUrl", "API URL", FieldKind::Text).required(),
        FieldSpec::new("apiKey", "API key", FieldKind::Password).length(8, 128),
        FieldSpec::new(
            "currency",
            "Currency",
            FieldKind::Select(vec!["USD", "EUR", "PTS"]),
        )
        .required(),
        FieldSpec::new("active", "Active", FieldKind::Toggle),
    ]
}
