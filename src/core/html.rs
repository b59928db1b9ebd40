// src/core/html.rs
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    super::sanitize::normalize_ws(&out)
}

/// Byte offset where the line containing `pos` begins.
pub fn line_start(s: &str, pos: usize) -> usize {
    s[..pos].rfind('\n').map_or(0, |nl| nl + 1)
}

/// Byte offset of the line break that ends the line *before* the one
/// starting at `start`, or `start` itself on the first line.
pub fn prev_line_end(start: usize) -> usize {
    start.saturating_sub(1)
}

/// Last path segment of a URL, query string dropped.
pub fn url_file_name(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_tags_collapses_whitespace() {
        assert_eq!(strip_tags("<a href=\"x\">ASASSN-16cs</a>\n  "), "ASASSN-16cs");
        assert_eq!(strip_tags("<b>SN</b>   <i>Ia</i>"), "SN Ia");
    }

    #[test]
    fn line_start_finds_beginning_of_line() {
        let s = "abc\ndef\nghi";
        assert_eq!(line_start(s, 0), 0);
        assert_eq!(line_start(s, 5), 4);
        assert_eq!(line_start(s, 8), 8);
        assert_eq!(prev_line_end(8), 7);
        assert_eq!(prev_line_end(0), 0);
    }

    #[test]
    fn url_file_name_takes_last_segment() {
        assert_eq!(
            url_file_name("https://www.wis-tns.org/system/files/tns_spectra/2016asf.ascii"),
            "2016asf.ascii"
        );
        assert_eq!(url_file_name("https://h/x/a.fits?download=1"), "a.fits");
        assert_eq!(url_file_name("plain.txt"), "plain.txt");
    }
}
