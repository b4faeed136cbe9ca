//! HTML pages for the list and detail views.

use std::fmt::Write;

use crate::models::{FilterCriteria, IndexedRecord, Record};
use crate::services::FacetIndex;

use super::{COLUMNS, TableRow, display, format_description};

const HOME_INSTITUTION: &str = "IIT Bombay";
const HOME_COUNTRY: &str = "India";

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// `rows` is `None` when nothing has been searched yet: the table body stays empty.
pub fn list_page(facets: &FacetIndex, criteria: &FilterCriteria, rows: Option<&[TableRow]>) -> String {
    let mut body = String::new();

    body.push_str("<form id=\"filters\" method=\"post\" action=\"search\">\n");
    let _ = writeln!(
        body,
        "<input type=\"text\" id=\"course\" name=\"course\" placeholder=\"Course code\" value=\"{}\">",
        escape_html(&criteria.course_query)
    );
    select(&mut body, "department", &facets.departments, &criteria.department);
    select(&mut body, "university", &facets.institutions, &criteria.university);
    select(&mut body, "country", &facets.countries, &criteria.country);
    body.push_str("<button type=\"submit\" id=\"submitBtn\">Submit</button>\n");
    body.push_str("<button type=\"submit\" id=\"resetBtn\" formaction=\"reset\">Reset Filters</button>\n");
    body.push_str("</form>\n");

    body.push_str("<table id=\"results-table\">\n<thead><tr>");
    for (i, column) in COLUMNS.iter().enumerate() {
        let class = if i == 0 { " class=\"sn-col\"" } else { "" };
        let _ = write!(body, "<th{}>{}</th>", class, column);
    }
    body.push_str("</tr></thead>\n<tbody>\n");
    for row in rows.unwrap_or_default() {
        table_row(&mut body, row);
    }
    body.push_str("</tbody>\n</table>\n");

    page("Course Mappings", &body)
}

pub fn detail_page(selection: Option<&IndexedRecord>) -> String {
    let record = selection.map(|s| &s.record);
    let heading = |value: Option<&str>, fallback: &str| match value {
        Some(v) if !v.trim().is_empty() => escape_html(v),
        _ => fallback.to_string(),
    };

    let mut body = String::new();
    let _ = writeln!(
        body,
        "<h2 id=\"iitb-heading\">{}</h2>\n<h2 id=\"foreign-heading\">{}</h2>",
        heading(record.and_then(|r| r.home_course.as_deref()), "IITB Course"),
        heading(record.and_then(|r| r.foreign_course.as_deref()), "Foreign Course"),
    );

    body.push_str("<table id=\"detail-table\">\n<tbody>\n");
    if let Some(r) = record {
        for (label, home, foreign) in detail_rows(r) {
            let _ = writeln!(body, "<tr><td>{}</td><td>{}</td><td>{}</td></tr>", label, home, foreign);
        }
    }
    body.push_str("</tbody>\n</table>\n");
    body.push_str("<a id=\"backBtn\" href=\"./\">Return to Main Page</a>\n");

    page("Course Mapping Detail", &body)
}

fn detail_rows(r: &Record) -> [(&'static str, String, String); 4] {
    let cell = |value: Option<&String>| escape_html(display(value.map(String::as_str)));
    let description = |value: Option<&String>| format_description(value.map(|v| escape_html(v)).as_deref());

    [
        ("University", HOME_INSTITUTION.to_string(), cell(r.foreign_institution.as_ref())),
        ("Country", HOME_COUNTRY.to_string(), cell(r.country.as_ref())),
        (
            "Description",
            description(r.home_description.as_ref()),
            description(r.foreign_description.as_ref()),
        ),
        ("Credits", cell(r.home_credits.as_ref()), cell(r.foreign_credits.as_ref())),
    ]
}

fn select(out: &mut String, id: &str, choices: &[String], selected: &str) {
    let _ = writeln!(out, "<select id=\"{0}\" name=\"{0}\">", id);
    out.push_str("<option value=\"\">--Select--</option>\n");
    for choice in choices {
        let value = escape_html(choice);
        let marker = if choice == selected { " selected" } else { "" };
        let _ = writeln!(out, "<option value=\"{0}\"{1}>{0}</option>", value, marker);
    }
    out.push_str("</select>\n");
}

fn table_row(out: &mut String, row: &TableRow) {
    match row {
        TableRow::Message { text, colspan } => {
            let _ = writeln!(out, "<tr><td colspan=\"{}\">{}</td></tr>", colspan, text);
        }
        TableRow::Mapping { serial, position, cells } => {
            let _ = write!(
                out,
                "<tr class=\"mapping-row\" onclick=\"window.location.href='mappings/{0}'\"><td><a href=\"mappings/{0}\">{1}</a></td>",
                position, serial
            );
            for cell in cells {
                let _ = write!(out, "<td>{}</td>", escape_html(cell));
            }
            out.push_str("</tr>\n");
        }
    }
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        title, body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::present::render_list;

    fn facets() -> FacetIndex {
        FacetIndex {
            institutions: vec!["ETH Zurich".to_string()],
            departments: vec!["CSE".to_string(), "EE".to_string()],
            countries: vec!["Switzerland".to_string()],
        }
    }

    fn selection() -> IndexedRecord {
        IndexedRecord {
            position: 3,
            record: Record {
                home_course: Some("CS 101 <Intro>".to_string()),
                foreign_institution: Some("ETH Zurich".to_string()),
                home_description: Some("1) Basics 2) Loops".to_string()),
                home_credits: Some("6".to_string()),
                ..Record::default()
            },
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<a href='x'>&</a>"), "&lt;a href=&#39;x&#39;&gt;&amp;&lt;/a&gt;");
    }

    #[test]
    fn test_list_page_repopulates_inputs() {
        let criteria = FilterCriteria {
            course_query: "cs\"101".to_string(),
            department: "EE".to_string(),
            ..FilterCriteria::default()
        };
        let html = list_page(&facets(), &criteria, None);

        assert!(html.contains("value=\"cs&quot;101\""));
        assert!(html.contains("<option value=\"EE\" selected>EE</option>"));
        assert!(html.contains("<option value=\"CSE\">CSE</option>"));
        assert!(html.contains("<th class=\"sn-col\">S.No.</th>"));
        assert!(html.contains("<tbody>\n</tbody>"));
    }

    #[test]
    fn test_list_page_renders_rows_and_empty_message() {
        let rows = render_list(&[selection()]);
        let html = list_page(&facets(), &FilterCriteria::default(), Some(rows.as_slice()));
        assert!(html.contains("<a href=\"mappings/3\">1</a>"));
        assert!(html.contains("<td>CS 101 &lt;Intro&gt;</td>"));

        let empty = render_list(&[]);
        let html = list_page(&facets(), &FilterCriteria::default(), Some(empty.as_slice()));
        assert!(html.contains("<td colspan=\"6\">No results found</td>"));
    }

    #[test]
    fn test_detail_page_formats_selection() {
        let html = detail_page(Some(&selection()));
        assert!(html.contains("<h2 id=\"iitb-heading\">CS 101 &lt;Intro&gt;</h2>"));
        assert!(html.contains("<h2 id=\"foreign-heading\">Foreign Course</h2>"));
        assert!(html.contains("<tr><td>University</td><td>IIT Bombay</td><td>ETH Zurich</td></tr>"));
        assert!(html.contains("<tr><td>Country</td><td>India</td><td>NA</td></tr>"));
        assert!(html.contains("<td>1) Basics<br>2) Loops</td><td>NA</td>"));
        assert!(html.contains("<tr><td>Credits</td><td>6</td><td>NA</td></tr>"));
    }

    #[test]
    fn test_detail_page_without_selection_uses_fallbacks() {
        let html = detail_page(None);
        assert!(html.contains("<h2 id=\"iitb-heading\">IITB Course</h2>"));
        assert!(html.contains("<tbody>\n</tbody>"));
        assert!(html.contains("href=\"./\""));
    }
}
