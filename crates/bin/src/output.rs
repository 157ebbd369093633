//! Output formatting helpers for human-readable and JSON output.

/// Output format selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

impl From<bool> for OutputFormat {
    fn from(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Print `(left, right)` rows under a header, padding the left column to its
/// widest cell. Nothing is printed for an empty listing.
pub fn print_pairs(headers: (&str, &str), rows: &[(String, String)]) {
    if !rows.is_empty() {
        print!("{}", format_pairs(headers, rows));
    }
}

fn format_pairs(headers: (&str, &str), rows: &[(String, String)]) -> String {
    let width = rows
        .iter()
        .map(|(left, _)| left.chars().count())
        .fold(headers.0.chars().count(), usize::max);

    let mut out = format!("{:<width$}  {}\n", headers.0, headers.1);
    for (left, right) in rows {
        out.push_str(&format!("{left:<width$}  {right}\n"));
    }
    out
}
