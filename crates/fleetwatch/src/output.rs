//! Rendering for the `--output` formats.
//!
//! Structured formats (json, json-compact, yaml) serialize the domain
//! value itself, so scripts always see every field. The table and
//! plain forms instead go through caller-supplied projections: a
//! `Tabled` row type for tables, a uid extractor for plain. Renders
//! never panic; a serialization failure becomes the output text.

use std::io::{self, IsTerminal, Write};

use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};

/// Whether ANSI color is wanted under `mode`.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::env::var("NO_COLOR").is_err() && io::stdout().is_terminal(),
    }
}

/// Render a collection of records.
///
/// `row` projects one record into a table row; `uid` yields the
/// identifier printed per line in plain mode. An empty table gets a
/// hint to run a sync instead of a bare frame.
pub fn render_list<T, R>(
    format: &OutputFormat,
    records: &[T],
    row: impl Fn(&T) -> R,
    uid: impl Fn(&T) -> String,
) -> String
where
    T: Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table if records.is_empty() => "No records. Run: fleetwatch sync".to_owned(),
        OutputFormat::Table => table(records.iter().map(row)),
        OutputFormat::Plain => records.iter().map(&uid).collect::<Vec<_>>().join("\n"),
        structured => serialize(structured, &records),
    }
}

/// Render one record. Detail views build their own table-format text
/// via `detail`; `uid` serves plain mode.
pub fn render_single<T: Serialize>(
    format: &OutputFormat,
    record: &T,
    detail: impl Fn(&T) -> String,
    uid: impl Fn(&T) -> String,
) -> String {
    match format {
        OutputFormat::Table => detail(record),
        OutputFormat::Plain => uid(record),
        structured => serialize(structured, record),
    }
}

/// Rounded-style table over any row iterator.
pub fn table<R: Tabled>(rows: impl IntoIterator<Item = R>) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Write rendered output to stdout unless `--quiet` suppressed it.
pub fn print_output(rendered: &str, quiet: bool) {
    if quiet || rendered.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{rendered}");
}

fn serialize<T: Serialize>(format: &OutputFormat, value: &T) -> String {
    let rendered = match format {
        OutputFormat::Yaml => serde_yaml::to_string(value).map_err(|e| e.to_string()),
        OutputFormat::JsonCompact => serde_json::to_string(value).map_err(|e| e.to_string()),
        _ => serde_json::to_string_pretty(value).map_err(|e| e.to_string()),
    };
    rendered.unwrap_or_else(|e| format!("serialization error: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Rec {
        uid: String,
        status: String,
    }

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "UID")]
        uid: String,
    }

    fn records() -> Vec<Rec> {
        vec![
            Rec {
                uid: "a-1".into(),
                status: "ok".into(),
            },
            Rec {
                uid: "a-2".into(),
                status: "ok".into(),
            },
        ]
    }

    fn to_row(r: &Rec) -> Row {
        Row { uid: r.uid.clone() }
    }

    #[test]
    fn plain_emits_one_uid_per_line() {
        let out = render_list(&OutputFormat::Plain, &records(), to_row, |r| r.uid.clone());
        assert_eq!(out, "a-1\na-2");
    }

    #[test]
    fn empty_table_gets_a_sync_hint() {
        let out = render_list(&OutputFormat::Table, &Vec::<Rec>::new(), to_row, |r| {
            r.uid.clone()
        });
        assert!(out.contains("fleetwatch sync"));
    }

    #[test]
    fn structured_formats_carry_the_full_record() {
        let out = render_list(&OutputFormat::JsonCompact, &records(), to_row, |r| {
            r.uid.clone()
        });
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("valid json");
        assert_eq!(parsed[0]["status"], "ok");

        let out = render_list(&OutputFormat::Yaml, &records(), to_row, |r| r.uid.clone());
        assert!(out.contains("uid: a-1"));
    }

    #[test]
    fn single_record_table_uses_the_detail_projection() {
        let rec = Rec {
            uid: "a-1".into(),
            status: "ok".into(),
        };
        let out = render_single(
            &OutputFormat::Table,
            &rec,
            |r| format!("Record {}", r.uid),
            |r| r.uid.clone(),
        );
        assert_eq!(out, "Record a-1");
    }
}
