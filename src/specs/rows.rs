// src/specs/rows.rs
//! Page → object blocks.
//!
//! A block starts at the beginning of the line that holds an object anchor
//! and runs up to (not including) the line break before the next anchor
//! line. The last block stops at the end-of-results marker, or at the end
//! of the page when the marker is missing. Nothing after the marker is
//! considered.
//!
//! Segmentation is by line, not by anchor: the server prints each object row
//! on its own line, so a second anchor on the same line (an internal link
//! inside the row, say) stays inside the current block and does not count
//! as another object.

use super::grammar::Grammar;
use crate::core::html::{line_start, prev_line_end};

/// Borrowing iterator over the object blocks of one page, in page order.
pub struct Rows<'a> {
    page: &'a str,
    anchor: &'static str,
    limit: usize,
    cursor: usize,
}

impl<'a> Rows<'a> {
    pub fn new(page: &'a str, grammar: &Grammar) -> Self {
        let limit = page.find(grammar.end_marker).unwrap_or(page.len());
        Self { page, anchor: grammar.object_anchor, limit, cursor: 0 }
    }
}

impl<'a> Iterator for Rows<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let head = &self.page[..self.limit];
        let hit = self.cursor + head[self.cursor..].find(self.anchor)?;
        let start = line_start(head, hit);

        // Anchors later on the same line belong to this block.
        let line_end = head[hit..].find('\n').map_or(self.limit, |i| hit + i);
        let end = match head[line_end..].find(self.anchor) {
            Some(i) => prev_line_end(line_start(head, line_end + i)),
            None => self.limit,
        };

        self.cursor = end;
        Some(&self.page[start..end])
    }
}

/// Number of object blocks on a page. Decides whether another page follows.
pub fn count_rows(page: &str, grammar: &Grammar) -> usize {
    Rows::new(page, grammar).count()
}
