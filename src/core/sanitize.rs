// src/core/sanitize.rs

pub fn normalize_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// One captured cell → trimmed text, or `None` when nothing is left.
/// Entities are decoded after tags are dropped so `&lt;` survives as text.
pub fn clean_cell(raw: &str) -> Option<String> {
    let text = normalize_entities(&super::html::strip_tags(raw));
    let text = text.trim();
    if text.is_empty() { None } else { Some(text.to_string()) }
}

/// Parse a cleaned numeric cell. Unparseable text counts as missing.
pub fn parse_number(cell: Option<&str>) -> Option<f64> {
    cell.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Redshift of exactly zero means "not measured" in the registry's tables.
pub fn parse_redshift(cell: Option<&str>) -> Option<f64> {
    parse_number(cell).filter(|z| *z != 0.0)
}

/// Multi-line free text → one line, capped at `max_chars` characters.
pub fn flatten_comment(raw: &str, max_chars: usize) -> Option<String> {
    let flat = normalize_ws(&normalize_entities(raw));
    if flat.is_empty() {
        return None;
    }
    Some(truncate_chars(&flat, max_chars))
}

pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => s[..cut].to_string(),
        None => s.to_string(),
    }
}

/// Make a user-supplied name safe to use as a filename prefix.
pub fn sanitize_filename(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() || ch == '-' || ch == '.' { out.push(ch); last_us = false; }
        else if !last_us { out.push('_'); last_us = true; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!("query") } else { out }
}
