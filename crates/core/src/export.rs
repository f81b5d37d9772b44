//! CSV rendering of result records for the table download.
//!
//! Deliberately minimal, matching the front end it feeds: a string field
//! containing a comma or newline is wrapped in double quotes, and embedded
//! double quotes are NOT escaped — a documented limitation of the format
//! this exporter must stay byte-compatible with.

use serde_json::Value;

/// Column order used when the caller does not name columns.
pub const DEFAULT_COLUMNS: &[&str] = &[
    "title",
    "author",
    "source",
    "source_detail",
    "acquisition_url",
    "format",
];

/// Render rows as CSV: a header row, then one comma-joined line per row.
/// Missing and null fields render empty; non-string scalars render in their
/// JSON form. The output ends with a newline.
pub fn to_csv(colnames: &[&str], rows: &[Value]) -> String {
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(colnames.join(","));
    for row in rows {
        let fields: Vec<String> = colnames
            .iter()
            .map(|col| render_field(row.get(*col)))
            .collect();
        lines.push(fields.join(","));
    }
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) if s.contains(',') || s.contains('\n') => format!("\"{}\"", s),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn header_then_rows_then_trailing_newline() {
        let rows = vec![
            json!({"title": "Kindred", "author": "Octavia E. Butler"}),
            json!({"title": "Dune", "author": "Frank Herbert"}),
        ];
        let csv = to_csv(&["title", "author"], &rows);
        assert_eq!(
            csv,
            "title,author\nKindred,Octavia E. Butler\nDune,Frank Herbert\n"
        );
    }

    #[test]
    fn comma_in_a_string_field_is_quoted() {
        let rows = vec![json!({"title": "Foo, Bar"})];
        let csv = to_csv(&["title"], &rows);
        assert_eq!(csv, "title\n\"Foo, Bar\"\n");
    }

    #[test]
    fn newline_in_a_string_field_is_quoted() {
        let rows = vec![json!({"title": "Foo\nBar"})];
        let csv = to_csv(&["title"], &rows);
        assert_eq!(csv, "title\n\"Foo\nBar\"\n");
    }

    #[test]
    fn missing_and_null_fields_render_empty() {
        let rows = vec![json!({"title": "Kindred", "format": null})];
        let csv = to_csv(&["title", "format", "source_detail"], &rows);
        assert_eq!(csv, "title,format,source_detail\nKindred,,\n");
    }

    #[test]
    fn non_string_scalars_render_in_json_form() {
        let rows = vec![json!({"available": true, "count": 3})];
        let csv = to_csv(&["available", "count"], &rows);
        assert_eq!(csv, "available,count\ntrue,3\n");
    }

    #[test]
    fn embedded_quotes_are_not_escaped() {
        let rows = vec![json!({"title": "He said \"hi\", twice"})];
        let csv = to_csv(&["title"], &rows);
        assert_eq!(csv, "title\n\"He said \"hi\", twice\"\n");
    }

    #[test]
    fn availability_records_export_with_default_columns() {
        let record = json!({
            "title": "Kindred",
            "author": "Octavia E. Butler",
            "tags": ["starred"],
            "source": "overdrive",
            "source_detail": "minuteman",
            "acquisition_url": "https://minuteman.overdrive.com/media/1",
            "format": "ebook",
            "covers": null
        });
        let csv = to_csv(DEFAULT_COLUMNS, &[record]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "title,author,source,source_detail,acquisition_url,format"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Kindred,Octavia E. Butler,overdrive,minuteman,https://minuteman.overdrive.com/media/1,ebook"
        );
    }
}
