use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use chrono::NaiveDate;
use futures::future::BoxFuture;
use rusqlite::Connection;
use serde_json::json;

use crate::config::{ensure_webview_data_dir, AppConfig, PAGE_SIZE_OPTIONS};
use crate::domain::entities::admin::{form_values_from_row, AdminResource};
use crate::domain::entities::bet::{BetRecord, BetStatus, BetStatusChange};
use crate::domain::entities::column::{Aggregate, CellFormat, ColumnDef};
use crate::domain::entities::form::{validate_form, FieldKind, FieldSpec, FormValues};
use crate::domain::entities::grid::{
    GridError, GridState, LoadState, RowId, SortDirection, SortSpec,
};
use crate::domain::entities::report::{
    disambiguate_ids, FilterField, PageResult, ReportFilter, ReportKind, Row,
};
use crate::domain::entities::session::{FeatureFlags, LoginResponse, User, FORM_DRAFT_KEY};
use crate::domain::entities::wizard::{provider_onboarding_steps, MultiStepForm, WizardDraft};
use crate::infra::export::csv::export_page_csv;
use crate::infra::http::retry::{is_retryable_status, jittered_backoff, RetryPolicy};
use crate::infra::sqlite::queries::{kv_clear, kv_get, kv_remove, kv_set};
use crate::infra::sqlite::schema::init_db;
use crate::infra::sqlite::session_store::SqliteSessionStore;
use crate::platform::desktop::dialogs::export_file_name;
use crate::ui::input::{clipboard_script, Debounce, Throttle};
use crate::ui::pagination::PaginationView;
use crate::ui::render::{
    column_alignment, format_cell, format_number, header_label, page_subtotals, render_rows,
    visible_columns,
};
use crate::ui::styles::{table_container_style, table_header_cell_style};
use crate::usecase::ports::api::{
    AdminGateway, ApiError, AuthGateway, BetGateway, PageRequest, PageSource,
};
use crate::usecase::ports::session_store::SessionStore;
use crate::usecase::services::admin_service::{AdminError, AdminService};
use crate::usecase::services::auth_service::{AuthError, AuthService};
use crate::usecase::services::bet_service::{BetError, BetService};
use crate::usecase::services::session_service::SessionService;

fn unique_test_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("backoffice-{prefix}-{nanos}"))
}

fn ids(values: &[&str]) -> Vec<RowId> {
    values.iter().map(|value| RowId::from(*value)).collect()
}

fn page_ids(prefix: &str, count: usize) -> Vec<RowId> {
    (0..count)
        .map(|idx| RowId(format!("{prefix}-{idx}")))
        .collect()
}

fn loaded_grid(page_size: usize, total: u64, rows_on_page: usize) -> GridState {
    let mut grid = GridState::new(page_size).expect("page size should be valid");
    let ticket = grid.begin_request();
    assert!(grid.apply_page(ticket, page_ids("row", rows_on_page), total));
    grid
}

fn vars(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    let mut vars: BTreeMap<String, String> = pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect();
    vars.entry("BACKOFFICE_DATA_DIR".to_string())
        .or_insert_with(|| unique_test_dir("config").display().to_string());
    vars
}

fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("test date should parse")
}

// grid

#[test]
fn new_grid_rejects_zero_page_size() {
    assert_eq!(GridState::new(0), Err(GridError::ZeroPageSize));
}

#[test]
fn page_count_is_derived_from_total_and_page_size() {
    let grid = loaded_grid(10, 95, 10);
    assert_eq!(grid.page_count(), 10);

    let empty = loaded_grid(10, 0, 0);
    assert_eq!(empty.page_count(), 0);
    assert!(!empty.can_next_page());
    assert!(!empty.can_previous_page());

    let exact = loaded_grid(20, 100, 20);
    assert_eq!(exact.page_count(), 5);
}

#[test]
fn last_page_has_no_next_page() {
    let mut grid = loaded_grid(10, 95, 10);
    grid.set_page_index(9);

    assert!(!grid.can_next_page());
    assert!(grid.can_previous_page());
    assert!(!grid.next_page(), "next_page should refuse past the last page");
    assert_eq!(grid.page_index(), 9);
}

#[test]
fn page_size_change_resets_page_index() {
    let mut grid = loaded_grid(10, 95, 10);
    grid.set_page_index(4);

    grid.set_page_size(20).expect("page size should be accepted");

    assert_eq!(grid.page_index(), 0);
    assert_eq!(grid.page_size(), 20);
    assert_eq!(grid.page_count(), 5);
    assert_eq!(grid.set_page_size(0), Err(GridError::ZeroPageSize));
    assert_eq!(grid.page_size(), 20, "rejected size should keep the old one");
}

#[test]
fn fetch_params_follow_page_and_sort() {
    let mut grid = loaded_grid(20, 95, 20);
    grid.set_page_index(3);

    let params = grid.fetch_params();
    assert_eq!(params.skip, 60);
    assert_eq!(params.take, 20);
    assert_eq!(params.order_by, None);
    assert_eq!(
        params.query_pairs(),
        vec![
            ("skip".to_string(), "60".to_string()),
            ("take".to_string(), "20".to_string()),
        ]
    );

    grid.set_sorting(Some(SortSpec::descending("ggr")));
    let pairs = grid.fetch_params().query_pairs();
    assert!(pairs.contains(&("skip".to_string(), "0".to_string())));
    assert!(pairs.contains(&("orderBy".to_string(), "ggr".to_string())));
    assert!(pairs.contains(&("orderFormat".to_string(), "desc".to_string())));
}

#[test]
fn sorting_replaces_previous_sort_and_resets_page() {
    let mut grid = loaded_grid(10, 95, 10);
    grid.set_page_index(2);

    grid.set_sorting(Some(SortSpec::ascending("rounds")));
    assert_eq!(grid.page_index(), 0);

    grid.set_sorting(Some(SortSpec::descending("ggr")));
    let sort = grid.sort().expect("sort should be set");
    assert_eq!(sort.key, "ggr");
    assert_eq!(sort.direction, SortDirection::Descending);
}

#[test]
fn toggle_sort_cycles_ascending_descending_none() {
    let mut grid = GridState::new(10).expect("page size should be valid");

    grid.toggle_sort("rounds");
    assert_eq!(grid.sort(), Some(&SortSpec::ascending("rounds")));
    grid.toggle_sort("rounds");
    assert_eq!(grid.sort(), Some(&SortSpec::descending("rounds")));
    grid.toggle_sort("rounds");
    assert_eq!(grid.sort(), None);

    grid.toggle_sort("rounds");
    grid.toggle_sort("ggr");
    assert_eq!(
        grid.sort(),
        Some(&SortSpec::ascending("ggr")),
        "a new column should start ascending"
    );
}

#[test]
fn select_all_covers_only_the_loaded_page() {
    let mut grid = loaded_grid(10, 95, 10);

    grid.select_all();

    assert_eq!(grid.selection().len(), 10);
    assert!(grid.is_all_selected());
}

#[test]
fn repeated_row_ids_still_allow_select_all_round_trip() {
    let mut grid = GridState::new(10).expect("page size should be valid");
    let ticket = grid.begin_request();
    assert!(grid.apply_page(ticket, ids(&["p1", "p1", "p2"]), 3));

    assert_eq!(grid.loaded_ids(), ids(&["p1", "p2"]).as_slice());
    grid.select_all();
    assert!(grid.is_all_selected());

    grid.clear_selection();
    assert!(!grid.is_all_selected());
    assert!(grid.selection().is_empty());
}

#[test]
fn toggle_selection_ignores_rows_not_on_page() {
    let mut grid = loaded_grid(10, 95, 3);

    grid.toggle_selection(&RowId::from("row-1"));
    grid.toggle_selection(&RowId::from("elsewhere"));
    assert_eq!(grid.selection().len(), 1);
    assert!(grid.is_selected(&RowId::from("row-1")));

    grid.toggle_selection(&RowId::from("row-1"));
    assert!(grid.selection().is_empty());
}

#[test]
fn page_change_clears_selection() {
    let mut grid = loaded_grid(10, 95, 10);
    grid.select_all();

    assert!(grid.next_page());

    assert!(grid.selection().is_empty());
}

#[test]
fn new_page_prunes_selection_to_loaded_rows() {
    let mut grid = GridState::new(10).expect("page size should be valid");
    let first = grid.begin_request();
    grid.apply_page(first, ids(&["a", "b", "c"]), 3);
    grid.select_all();

    let refresh = grid.begin_request();
    grid.apply_page(refresh, ids(&["b", "c", "d"]), 3);

    let selected: Vec<&RowId> = grid.selection().iter().collect();
    assert_eq!(selected, vec![&RowId::from("b"), &RowId::from("c")]);
    assert!(!grid.is_all_selected());
}

#[test]
fn stale_response_is_dropped() {
    let mut grid = GridState::new(10).expect("page size should be valid");
    let slow = grid.begin_request();
    let fast = grid.begin_request();

    assert!(grid.apply_page(fast, ids(&["new"]), 1));
    assert!(
        !grid.apply_page(slow, ids(&["old-1", "old-2"]), 2),
        "older ticket should be rejected"
    );

    assert_eq!(grid.loaded_ids(), ids(&["new"]).as_slice());
    assert_eq!(grid.total_count(), 1);
    assert_eq!(grid.load_state(), &LoadState::Idle);
}

#[test]
fn failure_keeps_previous_rows_and_ignores_stale_errors() {
    let mut grid = loaded_grid(10, 95, 10);
    let stale = grid.begin_request();
    let current = grid.begin_request();

    assert!(!grid.apply_failure(stale, "timeout"));
    assert!(grid.is_loading());
    assert!(grid.apply_failure(current, "server error"));

    assert_eq!(
        grid.load_state(),
        &LoadState::Failed("server error".to_string())
    );
    assert_eq!(grid.loaded_ids().len(), 10);
    assert_eq!(grid.total_count(), 95);
}

#[test]
fn column_visibility_defaults_to_visible() {
    let mut grid = GridState::new(10).expect("page size should be valid");
    grid.set_column_visible("rtp", false);
    grid.normalize_column_visibility(["gameName", "rtp"]);

    assert!(grid.is_column_visible("gameName"));
    assert!(!grid.is_column_visible("rtp"));
    assert!(grid.is_column_visible("unknown"));
    assert_eq!(grid.column_visibility().len(), 2);
}

// pagination

#[test]
fn pagination_view_labels_middle_page() {
    let mut grid = loaded_grid(10, 95, 10);
    grid.set_page_index(2);

    let view = PaginationView::from_grid(&grid);

    assert_eq!(view.first_item, 21);
    assert_eq!(view.last_item, 30);
    assert_eq!(view.range_label(), "21–30 of 95");
    assert_eq!(view.page_label(), "Page 3 of 10");
    assert!(view.can_previous);
    assert!(view.can_next);
}

#[test]
fn pagination_view_handles_last_and_empty_pages() {
    let mut grid = loaded_grid(10, 95, 10);
    grid.set_page_index(9);
    let view = PaginationView::from_grid(&grid);
    assert_eq!(view.range_label(), "91–95 of 95");
    assert!(!view.can_next);

    let empty = PaginationView::from_grid(&loaded_grid(10, 0, 0));
    assert_eq!(empty.range_label(), "0 of 0");
    assert_eq!(empty.page_label(), "Page 0 of 0");
}

#[test]
fn page_size_options_include_default() {
    assert!(PAGE_SIZE_OPTIONS.contains(&crate::domain::entities::grid::DEFAULT_PAGE_SIZE));
}

// render

#[test]
fn format_number_groups_thousands() {
    assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
    assert_eq!(format_number(-1234.5, 2), "-1,234.50");
    assert_eq!(format_number(999.0, 0), "999");
    assert_eq!(format_number(-0.001, 2), "0.00");
}

#[test]
fn format_cell_applies_column_format() {
    assert_eq!(format_cell(Some(&json!(1500.5)), CellFormat::Money), "1,500.50");
    assert_eq!(format_cell(Some(&json!("2500")), CellFormat::Money), "2,500.00");
    assert_eq!(format_cell(Some(&json!(12.4)), CellFormat::Integer), "12");
    assert_eq!(format_cell(Some(&json!(96.5)), CellFormat::Percent), "96.50%");
    assert_eq!(
        format_cell(Some(&json!("2024-05-01T13:45:10Z")), CellFormat::DateTime),
        "2024-05-01 13:45"
    );
    assert_eq!(format_cell(Some(&json!("WON")), CellFormat::Status), "won");
    assert_eq!(format_cell(Some(&json!(true)), CellFormat::Text), "yes");
    assert_eq!(format_cell(Some(&json!(null)), CellFormat::Money), "");
    assert_eq!(format_cell(None, CellFormat::Text), "");
    assert_eq!(format_cell(Some(&json!("n/a")), CellFormat::Money), "n/a");
}

#[test]
fn numeric_columns_align_right() {
    assert_eq!(column_alignment(&ColumnDef::new("ggr", "GGR", CellFormat::Money)), "right");
    assert_eq!(column_alignment(&ColumnDef::text("gameName", "Game")), "left");
}

#[test]
fn header_label_marks_sorted_column() {
    let column = ColumnDef::text("gameName", "Game").sortable();
    let sort = SortSpec::descending("gameName");

    assert_eq!(header_label(&column, Some(&sort)), "Game ▼");
    assert_eq!(header_label(&column, Some(&SortSpec::ascending("gameName"))), "Game ▲");
    assert_eq!(header_label(&column, Some(&SortSpec::ascending("other"))), "Game");
    assert_eq!(header_label(&column, None), "Game");
}

#[test]
fn visible_columns_respects_grid_visibility() {
    let columns = ReportKind::Game.columns();
    let mut grid = GridState::new(10).expect("page size should be valid");
    grid.set_column_visible("rtp", false);

    let visible = visible_columns(&columns, &grid);

    assert_eq!(visible.len(), columns.len() - 1);
    assert!(visible.iter().all(|column| column.id != "rtp"));
}

#[test]
fn render_rows_places_sub_rows_after_parent() {
    let columns = vec![
        ColumnDef::text("name", "Supplier"),
        ColumnDef::new("ggr", "GGR", CellFormat::Money).aggregate(Aggregate::Sum),
    ];
    let row = Row::from_json(
        json!({
            "supplierId": "s1",
            "name": "Acme",
            "ggr": 300,
            "currencies": [
                {"name": "USD", "ggr": 100},
                {"name": "EUR", "ggr": 200}
            ]
        }),
        0,
        "supplierId",
        Some("currencies"),
    );

    let rendered = render_rows(&columns, &[row]);

    assert_eq!(rendered.len(), 3);
    assert_eq!(rendered[0].depth, 0);
    assert_eq!(rendered[0].cells, vec!["Acme", "300.00"]);
    assert_eq!(rendered[1].id, RowId::from("s1/0"));
    assert_eq!(rendered[1].depth, 1);
    assert_eq!(rendered[2].cells, vec!["EUR", "200.00"]);
}

#[test]
fn page_subtotals_aggregate_top_level_rows_only() {
    let columns = vec![
        ColumnDef::text("name", "Name"),
        ColumnDef::new("ggr", "GGR", CellFormat::Money).aggregate(Aggregate::Sum),
        ColumnDef::new("rtp", "RTP", CellFormat::Percent).aggregate(Aggregate::Average),
        ColumnDef::new("rounds", "Rounds", CellFormat::Integer),
    ];
    let rows = vec![
        Row::from_json(
            json!({"id": "a", "name": "A", "ggr": 1000.5, "rtp": 95, "rounds": 3,
                   "breakdown": [{"ggr": 999999}]}),
            0,
            "id",
            Some("breakdown"),
        ),
        Row::from_json(
            json!({"id": "b", "name": "B", "ggr": "500", "rtp": 97, "rounds": 4}),
            1,
            "id",
            None,
        ),
    ];

    let subtotals = page_subtotals(&columns, &rows).expect("aggregated columns present");

    assert_eq!(subtotals, vec!["", "1,500.50", "96.00%", ""]);
}

#[test]
fn page_subtotals_absent_without_aggregates() {
    let columns = ReportKind::Summary.columns();
    let rows = vec![Row::from_json(json!({"currency": "USD", "ggr": 5}), 0, "currency", None)];
    assert_eq!(page_subtotals(&columns, &rows), None);
}

// report

#[test]
fn report_filter_defaults_to_last_week_when_dated() {
    let today = date("2024-05-10");

    let filter = ReportFilter::default_for(ReportKind::Game, today);

    assert_eq!(filter.date_from, Some(date("2024-05-03")));
    assert_eq!(filter.date_to, Some(today));
    assert!(filter.date_range_is_valid());
}

#[test]
fn report_filter_emits_only_fields_of_the_report() {
    let filter = ReportFilter {
        date_from: Some(date("2024-05-01")),
        date_to: Some(date("2024-05-07")),
        provider: "  pragmatic ".to_string(),
        search: "   ".to_string(),
        currency: "EUR".to_string(),
        player_id: "p-1".to_string(),
        round_id: String::new(),
    };

    let pairs = filter.query_pairs(ReportKind::Game.filter_fields());

    assert_eq!(
        pairs,
        vec![
            ("dateFrom".to_string(), "2024-05-01".to_string()),
            ("dateTo".to_string(), "2024-05-07".to_string()),
            ("provider".to_string(), "pragmatic".to_string()),
        ]
    );
    assert!(filter
        .query_pairs(&[FilterField::Currency, FilterField::PlayerId])
        .contains(&("playerId".to_string(), "p-1".to_string())));
}

#[test]
fn report_filter_rejects_inverted_range() {
    let filter = ReportFilter {
        date_from: Some(date("2024-05-08")),
        date_to: Some(date("2024-05-01")),
        ..ReportFilter::default()
    };
    assert!(!filter.date_range_is_valid());
}

#[test]
fn row_id_falls_back_to_position() {
    let numeric = Row::from_json(json!({"gameId": 42, "gameName": "Reels"}), 3, "gameId", None);
    assert_eq!(numeric.id, RowId::from("42"));

    let missing = Row::from_json(json!({"gameName": "Reels"}), 3, "gameId", None);
    assert_eq!(missing.id, RowId::from("#3"));
    assert_eq!(missing.cell("gameName"), Some(&json!("Reels")));
    assert!(numeric.is_addressable());
    assert!(!missing.is_addressable());
}

#[test]
fn rows_without_server_id_cannot_be_edited() {
    let columns = AdminResource::Users.columns();
    let rows = vec![
        Row::from_json(json!({"id": 7, "username": "ops"}), 0, "id", None),
        Row::from_json(json!({"username": "ghost"}), 1, "id", None),
    ];

    let rendered = render_rows(&columns, &rows);

    assert!(rendered[0].addressable);
    assert!(!rendered[1].addressable);
}

#[test]
fn player_rows_are_keyed_by_player_and_currency() {
    let id_field = ReportKind::Player.id_field();
    let mut rows = vec![
        Row::from_json(json!({"playerId": "p1", "currency": "USD"}), 0, id_field, None),
        Row::from_json(json!({"playerId": "p1", "currency": "EUR"}), 1, id_field, None),
        Row::from_json(json!({"playerId": "p1"}), 2, id_field, None),
    ];

    disambiguate_ids(&mut rows);

    let ids: Vec<&RowId> = rows.iter().map(|row| &row.id).collect();
    assert_eq!(
        ids,
        vec![&RowId::from("p1:USD"), &RowId::from("p1:EUR"), &RowId::from("#2")]
    );
    assert!(rows[0].is_addressable());
    assert!(!rows[2].is_addressable());
}

#[test]
fn duplicate_ids_in_a_page_are_suffixed() {
    let mut rows = vec![
        Row::from_json(json!({"id": "a"}), 0, "id", None),
        Row::from_json(json!({"id": "a"}), 1, "id", None),
        Row::from_json(json!({"id": "b"}), 2, "id", None),
    ];

    disambiguate_ids(&mut rows);

    assert_eq!(rows[0].id, RowId::from("a"));
    assert_eq!(rows[1].id, RowId::from("a~2"));
    assert!(rows[0].is_addressable());
    assert!(!rows[1].is_addressable());
    assert_eq!(rows[2].id, RowId::from("b"));
}

#[test]
fn every_report_has_columns_and_paths() {
    for kind in ReportKind::all() {
        assert!(!kind.columns().is_empty(), "{kind:?} should define columns");
        assert!(!kind.path().is_empty());
        assert!(!kind.title().is_empty());
    }
    assert_eq!(ReportKind::Transactions.path(), "transactions");
    assert_eq!(ReportKind::Supplier.sub_rows_field(), Some("currencies"));
}

// forms

#[test]
fn field_validation_reports_first_problem() {
    let name = FieldSpec::new("name", "Name", FieldKind::Text)
        .required()
        .length(2, 5);
    assert_eq!(name.validate(""), Some("Name is required".to_string()));
    assert!(name.validate("a").is_some());
    assert!(name.validate("abcdef").is_some());
    assert_eq!(name.validate(" abc "), None);

    let email = FieldSpec::new("email", "Email", FieldKind::Email);
    assert_eq!(email.validate(""), None, "optional field may stay empty");
    assert!(email.validate("not-an-email").is_some());
    assert_eq!(email.validate("ops@example.com"), None);

    let number = FieldSpec::new("rtp", "RTP", FieldKind::Number);
    assert!(number.validate("ninety").is_some());
    assert_eq!(number.validate("96.5"), None);

    let currency = FieldSpec::new("currency", "Currency", FieldKind::Select(vec!["USD", "EUR"]));
    assert!(currency.validate("GBP").is_some());
    assert_eq!(currency.validate("EUR"), None);
}

#[test]
fn validate_form_collects_errors_per_field() {
    let fields = AdminResource::Providers.form_fields();
    let mut values = FormValues::new();
    values.insert("name".to_string(), "Acme".to_string());
    values.insert("apiKey".to_string(), "short".to_string());

    let errors = validate_form(&fields, &values);

    assert!(!errors.contains_key("name"));
    assert!(errors.contains_key("code"));
    assert!(errors.contains_key("apiUrl"));
    assert!(errors.contains_key("apiKey"));
    assert!(errors.contains_key("currency"));
    assert!(!errors.contains_key("active"));
}

#[test]
fn form_values_prefill_from_listed_row() {
    let row = Row::from_json(
        json!({"id": 7, "username": "ops", "email": "ops@example.com", "active": false}),
        0,
        "id",
        None,
    );

    let values = form_values_from_row(&AdminResource::Users.form_fields(), &row);

    assert_eq!(values.get("username").map(String::as_str), Some("ops"));
    assert_eq!(values.get("active").map(String::as_str), Some("false"));
}

// wizard

fn filled_provider_wizard() -> MultiStepForm {
    let mut form = MultiStepForm::new(provider_onboarding_steps());
    form.set_value("name", "Acme Gaming");
    form.set_value("code", "ACME");
    form.set_value("apiUrl", "https://acme.example.com");
    form.set_value("apiKey", "secret-key-123");
    form.set_value("currency", "USD");
    form.set_value("active", "true");
    form
}

#[test]
fn wizard_next_blocks_on_invalid_step() {
    let mut form = MultiStepForm::new(provider_onboarding_steps());

    assert!(!form.next());
    assert_eq!(form.current_index(), 0);
    assert!(form.errors().contains_key("name"));

    form.set_value("name", "Acme");
    assert!(!form.errors().contains_key("name"), "editing clears the field error");
    form.set_value("code", "AC");
    assert!(form.next());
    assert_eq!(form.current_index(), 1);
    assert!(form.back());
    assert_eq!(form.current_index(), 0);
    assert!(!form.back());
}

#[test]
fn wizard_finish_returns_values_when_all_steps_valid() {
    let mut form = filled_provider_wizard();
    while form.next() {}
    assert!(form.is_last_step());

    let values = form.finish().expect("all steps should validate");

    assert_eq!(values.get("code").map(String::as_str), Some("ACME"));
}

#[test]
fn wizard_finish_jumps_to_first_invalid_step() {
    let mut form = filled_provider_wizard();
    form.set_value("apiUrl", "");
    while form.next() {}

    let errors = form.finish().expect_err("missing api url should fail");

    assert!(errors.contains_key("apiUrl"));
    assert_eq!(form.current_index(), 1);
}

#[test]
fn wizard_draft_restores_step_and_values() {
    let mut form = filled_provider_wizard();
    assert!(form.next());
    let draft = form.draft();

    let restored = MultiStepForm::from_draft(provider_onboarding_steps(), draft.clone());
    assert_eq!(restored.current_index(), 1);
    assert_eq!(restored.value("name"), "Acme Gaming");

    let clamped = MultiStepForm::from_draft(
        provider_onboarding_steps(),
        WizardDraft {
            step: 99,
            values: draft.values,
        },
    );
    assert_eq!(clamped.current_index(), 2);
}

// bets

#[test]
fn bet_status_transitions() {
    assert!(BetStatus::Pending.can_transition_to(BetStatus::Won));
    assert!(BetStatus::Pending.can_transition_to(BetStatus::Cancelled));
    assert!(BetStatus::Won.can_transition_to(BetStatus::Void));
    assert!(BetStatus::Void.can_transition_to(BetStatus::Refunded));
    assert!(!BetStatus::Won.can_transition_to(BetStatus::Lost));
    assert!(!BetStatus::Refunded.can_transition_to(BetStatus::Pending));
    assert!(BetStatus::Cancelled.allowed_transitions().is_empty());
    assert_eq!(BetStatus::parse(" WON "), Some(BetStatus::Won));
    assert_eq!(BetStatus::parse("settled"), None);
}

// config

#[test]
fn config_uses_defaults() {
    let config = AppConfig::from_vars(&vars(&[])).expect("defaults should be valid");

    assert_eq!(config.api_base_url, "http://localhost:8080/api");
    assert_eq!(config.page_size, 20);
    assert_eq!(config.http_timeout, Duration::from_secs(30));
    assert_eq!(config.retry, RetryPolicy::default());
    assert!(config.feature_flags.0.is_empty());
}

#[test]
fn config_reads_overrides_and_legacy_base_url() {
    let config = AppConfig::from_vars(&vars(&[
        ("VITE_API_BASE_URL", "https://api.example.com/v1/"),
        ("BACKOFFICE_PAGE_SIZE", "50"),
        ("BACKOFFICE_HTTP_RETRIES", "5"),
        ("BACKOFFICE_FEATURE_PROVIDER_WIZARD", "on"),
        ("BACKOFFICE_FEATURE_BETA", "0"),
    ]))
    .expect("overrides should be valid");

    assert_eq!(config.api_base_url, "https://api.example.com/v1");
    assert_eq!(config.page_size, 50);
    assert_eq!(config.retry.max_attempts, 5);
    assert!(config.feature_flags.is_enabled("provider_wizard"));
    assert!(!config.feature_flags.is_enabled("beta"));

    let preferred = AppConfig::from_vars(&vars(&[
        ("VITE_API_BASE_URL", "https://legacy.example.com"),
        ("BACKOFFICE_API_BASE_URL", "https://new.example.com"),
    ]))
    .expect("both urls should be valid");
    assert_eq!(preferred.api_base_url, "https://new.example.com");
}

#[test]
fn config_single_attempt_disables_retries() {
    let config = AppConfig::from_vars(&vars(&[("BACKOFFICE_HTTP_RETRIES", "0")]))
        .expect("zero retries should be valid");
    assert_eq!(config.retry, RetryPolicy::no_retry());

    let config = AppConfig::from_vars(&vars(&[("BACKOFFICE_HTTP_RETRIES", "1")]))
        .expect("one attempt should be valid");
    assert_eq!(config.retry.max_attempts, 1);
}

#[test]
fn config_rejects_invalid_values() {
    assert!(AppConfig::from_vars(&vars(&[("BACKOFFICE_PAGE_SIZE", "0")])).is_err());
    assert!(AppConfig::from_vars(&vars(&[("BACKOFFICE_PAGE_SIZE", "many")])).is_err());
    assert!(AppConfig::from_vars(&vars(&[("BACKOFFICE_API_BASE_URL", "ftp://x")])).is_err());
    assert!(AppConfig::from_vars(&vars(&[("BACKOFFICE_FEATURE_X", "maybe")])).is_err());
}

#[test]
fn ensure_webview_data_dir_creates_webview_subdir() {
    let temp_dir = unique_test_dir("webview");

    let webview_dir = ensure_webview_data_dir(&temp_dir).expect("should create webview dir");

    assert!(webview_dir.ends_with("webview"));
    assert!(webview_dir.is_dir());
    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

// persistence

#[test]
fn init_db_creates_kv_table() {
    let temp_dir = unique_test_dir("init-db");
    let db_path = temp_dir.join("nested").join("session.sqlite");

    init_db(&db_path).expect("init_db should succeed");

    let conn = Connection::open(&db_path).expect("should open sqlite db");
    let table_count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv'",
            [],
            |row| row.get(0),
        )
        .expect("table count query should succeed");
    assert_eq!(table_count, 1, "kv table should exist");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn kv_queries_upsert_remove_and_clear() {
    let temp_dir = unique_test_dir("kv");
    let db_path = temp_dir.join("session.sqlite");
    init_db(&db_path).expect("init_db should succeed");

    kv_set(&db_path, "user", "\"a\"").expect("set should succeed");
    kv_set(&db_path, "user", "\"b\"").expect("upsert should succeed");
    kv_set(&db_path, "accessToken", "\"t\"").expect("set should succeed");
    assert_eq!(kv_get(&db_path, "user").expect("get"), Some("\"b\"".to_string()));

    kv_remove(&db_path, "user").expect("remove should succeed");
    assert_eq!(kv_get(&db_path, "user").expect("get"), None);

    kv_clear(&db_path).expect("clear should succeed");
    assert_eq!(kv_get(&db_path, "accessToken").expect("get"), None);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

fn session_fixture(prefix: &str, defaults: FeatureFlags) -> (PathBuf, SessionService) {
    let temp_dir = unique_test_dir(prefix);
    let store = Arc::new(SqliteSessionStore::new(temp_dir.join("session.sqlite")));
    let session = SessionService::new(store, defaults);
    session.restore().expect("session store should open");
    (temp_dir, session)
}

#[test]
fn session_persists_across_restarts() {
    let (temp_dir, session) = session_fixture("session", FeatureFlags::default());
    let user = User {
        id: "1".to_string(),
        username: "ops".to_string(),
        role: "admin".to_string(),
    };
    session
        .set_access_token(crate::domain::entities::session::AccessToken("tok".to_string()))
        .expect("token should persist");
    session.set_user(&user).expect("user should persist");

    let reopened = SessionService::new(
        Arc::new(SqliteSessionStore::new(temp_dir.join("session.sqlite"))),
        FeatureFlags::default(),
    );
    assert!(!reopened.is_authenticated(), "token loads only on restore");
    reopened.restore().expect("restore should succeed");

    assert!(reopened.is_authenticated());
    assert_eq!(reopened.user().expect("user read"), Some(user));

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn stored_flags_override_environment_defaults() {
    let defaults = FeatureFlags(BTreeMap::from([
        ("provider_wizard".to_string(), true),
        ("beta".to_string(), false),
    ]));
    let (temp_dir, session) = session_fixture("flags", defaults);

    session
        .set_feature_flags(&FeatureFlags(BTreeMap::from([("beta".to_string(), true)])))
        .expect("flags should persist");

    assert!(session.flag_enabled("provider_wizard"));
    assert!(session.flag_enabled("beta"));
    assert!(!session.flag_enabled("missing"));

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn unauthorized_error_clears_session() {
    let (temp_dir, session) = session_fixture("unauthorized", FeatureFlags::default());
    session
        .set_access_token(crate::domain::entities::session::AccessToken("tok".to_string()))
        .expect("token should persist");
    session
        .save_draft(&WizardDraft::default())
        .expect("draft should persist");

    assert!(!session.handle_api_error(&ApiError::NotFound));
    assert!(session.is_authenticated());

    assert!(session.handle_api_error(&ApiError::Unauthorized));
    assert!(!session.is_authenticated());
    assert_eq!(session.load_draft().expect("draft read"), None);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn unreadable_session_value_is_discarded() {
    let temp_dir = unique_test_dir("corrupt");
    let store = Arc::new(SqliteSessionStore::new(temp_dir.join("session.sqlite")));
    store.init().expect("store should init");
    store
        .set(FORM_DRAFT_KEY, "{not json")
        .expect("raw value should persist");
    let session = SessionService::new(store.clone(), FeatureFlags::default());

    assert_eq!(session.load_draft().expect("draft read"), None);
    assert_eq!(store.get(FORM_DRAFT_KEY).expect("raw read"), None);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

// export

#[test]
fn export_page_csv_writes_rows_sub_rows_and_subtotal() {
    let temp_dir = unique_test_dir("export");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");
    let csv_path = temp_dir.join("supplier.csv");
    let columns = vec![
        ColumnDef::text("name", "Supplier"),
        ColumnDef::new("ggr", "GGR", CellFormat::Money).aggregate(Aggregate::Sum),
    ];
    let rows = vec![Row::from_json(
        json!({"supplierId": "s1", "name": "Acme", "ggr": 300,
               "currencies": [{"name": "USD", "ggr": 300}]}),
        0,
        "supplierId",
        Some("currencies"),
    )];
    let rendered = render_rows(&columns, &rows);
    let subtotals = page_subtotals(&columns, &rows);

    let written = export_page_csv(&csv_path, &columns, &rendered, subtotals.as_deref())
        .expect("export should succeed");

    assert_eq!(written, 2);
    let content = fs::read_to_string(&csv_path).expect("csv should be readable");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "Supplier,GGR");
    assert_eq!(lines[1], "Acme,300.00");
    assert_eq!(lines[2], "↳ USD,300.00");
    assert_eq!(lines[3], "Page subtotal,300.00");

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn export_page_csv_requires_columns() {
    let temp_dir = unique_test_dir("export-empty");
    fs::create_dir_all(&temp_dir).expect("should create temp dir");

    let result = export_page_csv(&temp_dir.join("empty.csv"), &[], &[], None);

    assert!(result.is_err());
    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[test]
fn export_file_name_is_slugged_and_dated() {
    assert_eq!(
        export_file_name("Game report", date("2024-05-10")),
        "game-report-20240510.csv"
    );
}

// input utilities

#[test]
fn throttle_allows_one_action_per_interval() {
    let mut throttle = Throttle::new(Duration::from_secs(2));
    let start = Instant::now();

    assert!(throttle.try_acquire(start));
    assert!(!throttle.try_acquire(start + Duration::from_millis(500)));
    assert!(throttle.try_acquire(start + Duration::from_secs(2)));
}

#[test]
fn debounce_only_latest_generation_applies() {
    let debounce = Debounce::new();
    let first = debounce.bump();
    let second = debounce.bump();

    assert!(!debounce.is_latest(first));
    assert!(debounce.is_latest(second));
}

#[tokio::test]
async fn debounce_settle_reports_superseded_input() {
    let debounce = Debounce::new();
    let early = {
        let debounce = debounce.clone();
        tokio::spawn(async move { debounce.settle(Duration::from_millis(50)).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    let late = debounce.settle(Duration::from_millis(50)).await;

    assert!(!early.await.expect("task should finish"));
    assert!(late);
}

#[test]
fn clipboard_script_escapes_text() {
    assert_eq!(
        clipboard_script("a\"b\nc"),
        "try { await navigator.clipboard.writeText(\"a\\\"b\\nc\"); return true; } catch (_) { return false; }"
    );
}

// services

#[derive(Default)]
struct RecordingGateway {
    reject_login: bool,
    calls: Mutex<Vec<String>>,
    sent: Mutex<Vec<FormValues>>,
}

impl RecordingGateway {
    fn rejecting() -> Self {
        Self {
            reject_login: true,
            ..Self::default()
        }
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("calls lock").push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

fn ops_user() -> User {
    User {
        id: "1".to_string(),
        username: "ops".to_string(),
        role: "admin".to_string(),
    }
}

fn pending_bet() -> BetRecord {
    BetRecord {
        bet_id: "b-1".to_string(),
        round_id: "r-1".to_string(),
        player_id: "p-1".to_string(),
        game_name: "Reels".to_string(),
        amount: 5.0,
        payout: 0.0,
        currency: "USD".to_string(),
        status: BetStatus::Pending,
        created_at: None,
    }
}

impl AuthGateway for RecordingGateway {
    fn login(
        &self,
        username: String,
        _password: String,
    ) -> BoxFuture<'_, Result<LoginResponse, ApiError>> {
        self.record(format!("login {username}"));
        Box::pin(async move {
            if self.reject_login {
                return Err(ApiError::Unauthorized);
            }
            let mut flags = BTreeMap::new();
            flags.insert("provider_wizard".to_string(), true);
            Ok(LoginResponse {
                access_token: "tok-9".to_string(),
                user: ops_user(),
                feature_flags: FeatureFlags(flags),
            })
        })
    }
}

impl AdminGateway for RecordingGateway {
    fn create(
        &self,
        resource: AdminResource,
        values: FormValues,
    ) -> BoxFuture<'_, Result<(), ApiError>> {
        self.record(format!("create {}", resource.path()));
        self.sent.lock().expect("sent lock").push(values);
        Box::pin(async { Ok(()) })
    }

    fn update(
        &self,
        resource: AdminResource,
        id: RowId,
        values: FormValues,
    ) -> BoxFuture<'_, Result<(), ApiError>> {
        self.record(format!("update {} {id}", resource.path()));
        self.sent.lock().expect("sent lock").push(values);
        Box::pin(async { Ok(()) })
    }

    fn delete(&self, resource: AdminResource, id: RowId) -> BoxFuture<'_, Result<(), ApiError>> {
        self.record(format!("delete {} {id}", resource.path()));
        Box::pin(async { Ok(()) })
    }
}

impl PageSource for RecordingGateway {
    fn fetch_page(&self, request: PageRequest) -> BoxFuture<'_, Result<PageResult, ApiError>> {
        self.record(format!("page {}", request.path));
        Box::pin(async { Ok(PageResult::default()) })
    }
}

impl BetGateway for RecordingGateway {
    fn find_bet(&self, bet_id: String) -> BoxFuture<'_, Result<Option<BetRecord>, ApiError>> {
        self.record(format!("find {bet_id}"));
        Box::pin(async { Ok(Some(pending_bet())) })
    }

    fn update_status(
        &self,
        bet_id: String,
        change: BetStatusChange,
    ) -> BoxFuture<'_, Result<BetRecord, ApiError>> {
        self.record(format!(
            "status {bet_id} {} {}",
            change.status.label(),
            change.reason
        ));
        Box::pin(async move {
            Ok(BetRecord {
                status: change.status,
                ..pending_bet()
            })
        })
    }
}

#[tokio::test]
async fn login_stores_token_user_and_server_flags() {
    let (temp_dir, session) = session_fixture("auth", FeatureFlags::default());
    let session = Arc::new(session);
    let gateway = Arc::new(RecordingGateway::default());
    let auth = AuthService::new(gateway.clone(), session.clone());

    let user = auth.login("  ops ", "secret").await.expect("login should succeed");

    assert_eq!(user, ops_user());
    assert_eq!(gateway.calls(), vec!["login ops".to_string()]);
    assert_eq!(
        session.access_token(),
        Some(crate::domain::entities::session::AccessToken("tok-9".to_string()))
    );
    assert_eq!(session.user().expect("user should read"), Some(ops_user()));
    assert!(session.flag_enabled("provider_wizard"));

    auth.logout().expect("logout should clear the session");
    assert!(!session.is_authenticated());

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[tokio::test]
async fn login_rejections_leave_session_empty() {
    let (temp_dir, session) = session_fixture("auth-reject", FeatureFlags::default());
    let session = Arc::new(session);
    let gateway = Arc::new(RecordingGateway::rejecting());
    let auth = AuthService::new(gateway.clone(), session.clone());

    let blank = auth.login("   ", "secret").await;
    assert!(matches!(blank, Err(AuthError::MissingCredentials)));
    assert!(gateway.calls().is_empty(), "blank credentials never reach the server");

    let rejected = auth.login("ops", "wrong").await;
    assert!(matches!(rejected, Err(AuthError::Rejected)));
    assert!(!session.is_authenticated());
    assert_eq!(session.user().expect("user should read"), None);

    fs::remove_dir_all(&temp_dir).expect("should cleanup temp dir");
}

#[tokio::test]
async fn bet_status_change_is_checked_before_the_gateway() {
    let gateway = Arc::new(RecordingGateway::default());
    let bets = BetService::new(gateway.clone());
    let bet = pending_bet();

    let no_reason = bets.change_status(&bet, BetStatus::Won, "   ").await;
    assert!(matches!(no_reason, Err(BetError::EmptyReason)));

    let settled = BetRecord {
        status: BetStatus::Refunded,
        ..pending_bet()
    };
    let not_allowed = bets.change_status(&settled, BetStatus::Won, "typo").await;
    assert!(matches!(
        not_allowed,
        Err(BetError::NotAllowed {
            from: BetStatus::Refunded,
            to: BetStatus::Won
        })
    ));
    assert!(gateway.calls().is_empty());

    let updated = bets
        .change_status(&bet, BetStatus::Void, "  duplicate round ")
        .await
        .expect("pending bets can be voided");
    assert_eq!(updated.status, BetStatus::Void);
    assert_eq!(
        gateway.calls(),
        vec![format!("status b-1 {} duplicate round", BetStatus::Void.label())]
    );
}

#[tokio::test]
async fn bet_lookup_requires_an_id() {
    let gateway = Arc::new(RecordingGateway::default());
    let bets = BetService::new(gateway.clone());

    assert!(matches!(bets.find("  ").await, Err(BetError::EmptyBetId)));
    assert!(gateway.calls().is_empty());

    let found = bets.find(" b-1 ").await.expect("lookup should succeed");
    assert_eq!(found.map(|bet| bet.bet_id), Some("b-1".to_string()));
    assert_eq!(gateway.calls(), vec!["find b-1".to_string()]);
}

#[tokio::test]
async fn admin_writes_validate_then_send_trimmed_values() {
    let gateway = Arc::new(RecordingGateway::default());
    let admin = AdminService::new(gateway.clone(), gateway.clone());

    let mut values = FormValues::new();
    values.insert("username".to_string(), "  ops-admin  ".to_string());
    values.insert("email".to_string(), "not-an-email".to_string());
    values.insert("role".to_string(), "admin".to_string());
    values.insert("active".to_string(), "true".to_string());

    let invalid = admin.create(AdminResource::Users, values.clone()).await;
    let Err(AdminError::Invalid(errors)) = invalid else {
        panic!("invalid email should be rejected locally");
    };
    assert!(errors.contains_key("email"));
    assert!(gateway.calls().is_empty());

    values.insert("email".to_string(), " ops@example.com ".to_string());
    admin
        .update(AdminResource::Users, RowId::from("7"), values)
        .await
        .expect("valid values should be sent");

    assert_eq!(gateway.calls(), vec!["update admin/users 7".to_string()]);
    let sent = gateway.sent.lock().expect("sent lock").clone();
    assert_eq!(sent[0].get("username").map(String::as_str), Some("ops-admin"));
    assert_eq!(sent[0].get("email").map(String::as_str), Some("ops@example.com"));
}

#[tokio::test]
async fn admin_list_sends_trimmed_search() {
    let request = AdminService::page_request(
        AdminResource::Games,
        GridState::default().fetch_params(),
        "  reels ",
    );
    assert_eq!(request.path, "admin/games");
    assert_eq!(request.filters, vec![("search".to_string(), "reels".to_string())]);

    let gateway = Arc::new(RecordingGateway::default());
    let admin = AdminService::new(gateway.clone(), gateway.clone());
    admin
        .list(AdminResource::Games, GridState::default().fetch_params(), "")
        .await
        .expect("list should succeed");
    assert_eq!(gateway.calls(), vec!["page admin/games".to_string()]);
}

// http retry

#[test]
fn retry_backoff_doubles_up_to_cap() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.backoff_for(1), Duration::from_millis(250));
    assert_eq!(policy.backoff_for(2), Duration::from_millis(500));
    assert_eq!(policy.backoff_for(10), Duration::from_secs(4));
    assert!(is_retryable_status(503));
    assert!(is_retryable_status(429));
    assert!(!is_retryable_status(404));
}

#[test]
fn jittered_backoff_stays_within_half_and_full() {
    let mut rng = rand::thread_rng();
    for _ in 0..100 {
        let delay = jittered_backoff(&mut rng, Duration::from_millis(400));
        assert!(delay >= Duration::from_millis(200));
        assert!(delay <= Duration::from_millis(400));
    }
}

// styles

#[test]
fn sticky_header_styles_include_positioning() {
    let header = table_header_cell_style();
    assert!(header.contains("position: sticky"));
    assert!(header.contains("top: 0"));
    assert!(table_container_style().contains("overflow: auto"));
}
