// src/specs/files.rs
//! Report attachments.
//!
//! Attachments are listed once per report section, not per measurement row,
//! so the list is parsed once and handed out once: to the first row whose
//! report says it has related files.

use super::grammar::Grammar;
use crate::config::consts::COMMENT_MAX_CHARS;
use crate::core::html::url_file_name;
use crate::core::sanitize::{clean_cell, flatten_comment};
use crate::model::{FileSection, RelatedFileRecord};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attachment {
    pub url: String,
    pub comment: Option<String>,
}

/// Every attachment row in `section`, in page order.
pub fn parse_attachments(section: &str, grammar: &Grammar) -> Vec<Attachment> {
    grammar
        .related_file
        .captures_iter(section)
        .filter_map(|c| {
            let url = clean_cell(&c["filepath"])?;
            let comment = flatten_comment(&c["fileComment"], COMMENT_MAX_CHARS);
            Some(Attachment { url, comment })
        })
        .collect()
}

/// Hands a section's attachment list to at most one row.
pub struct FileLinker {
    attachments: Vec<Attachment>,
    kind: FileSection,
    include_comments: bool,
    linked: bool,
}

impl FileLinker {
    pub fn new(attachments: Vec<Attachment>, kind: FileSection, include_comments: bool) -> Self {
        Self { attachments, kind, include_comments, linked: false }
    }

    pub fn for_section(section: &str, grammar: &Grammar, kind: FileSection, include_comments: bool) -> Self {
        Self::new(parse_attachments(section, grammar), kind, include_comments)
    }

    /// The whole list the first time a referencing row asks, nothing after.
    pub fn link(&mut self, tns_id: &str, date_obs: Option<&str>) -> Vec<RelatedFileRecord> {
        if self.linked {
            return Vec::new();
        }
        self.linked = true;
        self.attachments
            .iter()
            .map(|a| RelatedFileRecord {
                tns_id: s!(tns_id),
                filename: s!(url_file_name(&a.url)),
                url: a.url.clone(),
                comment: if self.include_comments { a.comment.clone() } else { None },
                date_obs: date_obs.map(String::from),
                spec1phot2: self.kind,
            })
            .collect()
    }

    pub fn is_linked(&self) -> bool { self.linked }
}

/// A file linked directly from a measurement row (spectrum ascii/fits).
pub fn direct_file(tns_id: &str, url: &str, date_obs: Option<&str>, kind: FileSection) -> RelatedFileRecord {
    RelatedFileRecord {
        tns_id: s!(tns_id),
        filename: s!(url_file_name(url)),
        url: s!(url),
        comment: None,
        date_obs: date_obs.map(String::from),
        spec1phot2: kind,
    }
}
