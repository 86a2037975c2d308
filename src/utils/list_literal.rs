//! String-encoded list cells.
//!
//! Spreadsheet exports of aggregated patient data store list columns as
//! literals such as `['24.02.2023', '19.05.2017', nan]`. Missing entries
//! (`nan`, `None`) become empty strings so positions stay aligned with the
//! sibling columns of the same row.

const MISSING_MARKERS: [&str; 4] = ["nan", "NaN", "None", "NaT"];

/// Whether a cell looks like a list literal
///
/// Besides the enclosing brackets, the first element must be quoted or a
/// missing marker. Diagnosis texts such as `[1]\nT74000 ... [se note]` also
/// start with `[` and end with `]` and must stay scalar.
#[must_use]
pub fn is_list_literal(cell: &str) -> bool {
    let cell = cell.trim();
    if cell.len() < 2 || !cell.starts_with('[') || !cell.ends_with(']') {
        return false;
    }

    let inner = cell[1..cell.len() - 1].trim_start();
    if inner.is_empty() || inner.starts_with('\'') || inner.starts_with('"') {
        return true;
    }
    MISSING_MARKERS.iter().any(|marker| {
        inner.strip_prefix(marker).is_some_and(|rest| {
            let rest = rest.trim_start();
            rest.is_empty() || rest.starts_with(',')
        })
    })
}

/// Parse a list literal into its elements
///
/// Returns `None` when the cell is not a list literal. Elements may be
/// single- or double-quoted. Inside quotes the escapes `\n`, `\t`, `\\` and
/// an escaped quote are decoded, and commas do not split.
#[must_use]
pub fn parse_list_literal(cell: &str) -> Option<Vec<String>> {
    if !is_list_literal(cell) {
        return None;
    }

    let cell = cell.trim();
    let inner = &cell[1..cell.len() - 1];
    if inner.trim().is_empty() {
        return Some(Vec::new());
    }

    let mut values = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut was_quoted = false;
    let mut chars = inner.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == '\\' => {
                let unescaped = match chars.peek() {
                    Some(&next) if next == q || next == '\\' => Some(next),
                    Some('n') => Some('\n'),
                    Some('t') => Some('\t'),
                    _ => None,
                };
                match unescaped {
                    Some(value) => {
                        current.push(value);
                        chars.next();
                    }
                    None => current.push(c),
                }
            }
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if (c == '\'' || c == '"') && current.trim().is_empty() => {
                current.clear();
                quote = Some(c);
                was_quoted = true;
            }
            None if c == ',' => {
                values.push(finish_element(&current, was_quoted));
                current.clear();
                was_quoted = false;
            }
            None => current.push(c),
        }
    }
    values.push(finish_element(&current, was_quoted));

    Some(values)
}

fn finish_element(raw: &str, was_quoted: bool) -> String {
    if was_quoted {
        return raw.to_string();
    }
    let trimmed = raw.trim();
    if MISSING_MARKERS.contains(&trimmed) {
        String::new()
    } else {
        trimmed.to_string()
    }
}
