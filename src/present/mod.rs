pub mod html;

use std::sync::LazyLock;

use regex::Regex;

use crate::models::IndexedRecord;

/// Shown in place of any missing or blank value.
pub const SENTINEL: &str = "NA";

pub const LINE_BREAK: &str = "<br>";

pub const NO_RESULTS: &str = "No results found";

pub const COLUMNS: [&str; 6] = [
    "S.No.",
    "IITB Course",
    "Department",
    "Foreign University",
    "Country",
    "Foreign Course",
];

static MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+\s*[).]").expect("marker pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableRow {
    /// One informational cell spanning the whole table.
    Message { text: &'static str, colspan: usize },
    /// A result; activating it selects the record at `position`.
    Mapping {
        serial: usize,
        position: usize,
        cells: [String; 5],
    },
}

pub fn display(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => SENTINEL,
    }
}

/// Numbers rows from 1 in input order; an empty input becomes a single message row.
pub fn render_list(results: &[IndexedRecord]) -> Vec<TableRow> {
    if results.is_empty() {
        return vec![TableRow::Message {
            text: NO_RESULTS,
            colspan: COLUMNS.len(),
        }];
    }

    results
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let r = &item.record;
            TableRow::Mapping {
                serial: i + 1,
                position: item.position,
                cells: [
                    display(r.home_course.as_deref()).to_string(),
                    display(r.department.as_deref()).to_string(),
                    display(r.foreign_institution.as_deref()).to_string(),
                    display(r.country.as_deref()).to_string(),
                    display(r.foreign_course.as_deref()).to_string(),
                ],
            }
        })
        .collect()
}

/// Puts each enumerated point ("1)", "2.", ...) on its own line.
///
/// The first point stays flush with the text before it; whitespace that
/// preceded a later marker is dropped in favor of the break.
pub fn format_description(text: Option<&str>) -> String {
    let text = match text {
        Some(t) if !t.trim().is_empty() => t,
        _ => return SENTINEL.to_string(),
    };

    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;
    for (i, marker) in MARKER.find_iter(text).enumerate() {
        let before = &text[last..marker.start()];
        if i == 0 {
            out.push_str(before);
        } else {
            out.push_str(before.trim_end_matches([' ', '\t']));
            out.push_str(LINE_BREAK);
        }
        last = marker.start();
    }
    out.push_str(&text[last..]);
    out
}
