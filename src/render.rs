// SPDX-License-Identifier: MIT
//
// Text rendering of a panel tree.
//
//   Scene
//     speed  [- 6 +]  *
//     title  "demo"  ? window title  [x]
//     ▾ Look
//       tint  ■ #ff0000
//     ▸ Camera
//
// Names are padded to the widest name in their panel, measured in
// terminal columns. Closed folders show their title only.

use knob_panel::{Panel, Row};
use unicode_width::UnicodeWidthStr;

const INDENT: &str = "  ";

/// Render `panel` and everything open beneath it.
#[must_use]
pub fn tree(panel: &Panel) -> String {
    let mut lines = Vec::new();
    let depth = match panel.name() {
        Some(name) => {
            lines.push(name.to_string());
            1
        }
        None => 0,
    };
    push_panel(&mut lines, panel, depth);
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn push_panel(lines: &mut Vec<String>, panel: &Panel, depth: usize) {
    let indent = INDENT.repeat(depth);
    let rows = panel.rows();
    let width = rows.iter().map(|row| row.name.width()).max().unwrap_or(0);
    for row in &rows {
        lines.push(format!("{indent}{}", row_line(row, width)));
    }
    for folder in panel.folders() {
        let marker = if folder.is_closed() { "▸" } else { "▾" };
        lines.push(format!("{indent}{marker} {}", folder.name().unwrap_or_default()));
        if !folder.is_closed() {
            push_panel(lines, folder, depth + 1);
        }
    }
}

fn row_line(row: &Row, width: usize) -> String {
    let padding = " ".repeat(width.saturating_sub(row.name.width()));
    let mut line = format!("{}{padding}  {}", row.name, row.summary);
    if let Some(info) = &row.info {
        line.push_str("  ? ");
        line.push_str(info);
    }
    if let Some(toggle) = row.toggle {
        line.push_str("  [");
        line.push_str(toggle);
        line.push(']');
    }
    if row.modified {
        line.push_str("  *");
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use knob_panel::PanelDescription;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn build(description: &str) -> Panel {
        Panel::from_description(&PanelDescription::from_json(description).unwrap()).unwrap()
    }

    #[test]
    fn nested_tree() {
        let mut panel = build(
            r##"{
                "name": "Scene",
                "controllers": [
                    { "type": "number", "name": "speed", "value": 4, "min": 0, "max": 10, "step": 2 },
                    { "type": "string", "name": "title", "value": "demo", "info": "window title", "editable": true }
                ],
                "folders": [
                    { "name": "Look", "controllers": [ { "type": "color", "name": "tint", "value": "#ff0000" } ] },
                    { "name": "Camera", "closed": true, "controllers": [ { "type": "boolean", "name": "orbit" } ] }
                ]
            }"##,
        );
        panel.set("speed", json!(5)).unwrap();
        assert_eq!(
            tree(&panel),
            "Scene\n\
             \x20 speed  [- 6 +]  *\n\
             \x20 title  \"demo\"  ? window title  [x]\n\
             \x20 ▾ Look\n\
             \x20   tint  ■ #ff0000\n\
             \x20 ▸ Camera\n"
        );
    }

    #[test]
    fn wide_names_pad_by_columns() {
        let panel = build(
            r#"{ "controllers": [
                { "type": "boolean", "name": "色", "value": true },
                { "type": "boolean", "name": "abc", "value": false }
            ] }"#,
        );
        assert_eq!(tree(&panel), "色   [x]\nabc  [ ]\n");
    }
}
