pub fn root_container_style() -> &'static str {
    "height: 100vh; display: flex; flex-direction: row; overflow: hidden; font-family: sans-serif; font-size: 14px; color: #222;"
}

pub fn sidebar_style() -> &'static str {
    "width: 200px; flex-shrink: 0; background: #1f2733; color: #dfe6ee; display: flex; flex-direction: column; padding: 12px 0; overflow-y: auto;"
}

pub fn sidebar_link_style(active: bool) -> String {
    let background = if active { "#34425a" } else { "transparent" };
    format!("padding: 8px 16px; cursor: pointer; background: {background};")
}

pub fn main_panel_style() -> &'static str {
    "flex: 1; min-width: 0; display: flex; flex-direction: column; overflow: hidden; padding: 12px 16px; gap: 10px;"
}

pub fn toolbar_style() -> &'static str {
    "display: flex; flex-wrap: wrap; align-items: center; gap: 8px;"
}

pub fn input_style() -> &'static str {
    "border: 1px solid #bbb; border-radius: 6px; padding: 4px 8px;"
}

pub fn button_style() -> &'static str {
    "border: 1px solid #bbb; background: #fff; padding: 4px 10px; border-radius: 6px; cursor: pointer;"
}

pub fn primary_button_style() -> &'static str {
    "border: 1px solid #2f5bd3; background: #2f5bd3; color: #fff; padding: 4px 12px; border-radius: 6px; cursor: pointer;"
}

pub fn table_container_style() -> &'static str {
    "flex: 1; min-height: 0; overflow: auto; border: 1px solid #ddd; border-radius: 6px;"
}

pub fn table_header_cell_style() -> &'static str {
    "position: sticky; top: 0; z-index: 2; background: #f4f6f8; border-bottom: 1px solid #ccc; padding: 6px 8px; white-space: nowrap;"
}

pub fn table_cell_style(align: &str, depth: usize) -> String {
    let indent = 8 + depth * 18;
    format!("padding: 4px 8px 4px {indent}px; border-bottom: 1px solid #eee; text-align: {align}; white-space: nowrap;")
}

pub fn table_footer_cell_style(align: &str) -> String {
    format!("position: sticky; bottom: 0; background: #fafbfc; border-top: 1px solid #ccc; padding: 6px 8px; font-weight: 600; text-align: {align};")
}

pub fn field_error_style() -> &'static str {
    "color: #c0392b; font-size: 12px;"
}

pub fn notice_style(is_error: bool) -> String {
    let (background, border) = if is_error {
        ("#fdecea", "#e0b4b4")
    } else {
        ("#eef7ee", "#b7d8b7")
    };
    format!("background: {background}; border: 1px solid {border}; border-radius: 6px; padding: 8px 10px; display: flex; gap: 10px; align-items: center;")
}
