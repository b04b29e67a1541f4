//! A directory backend paired with the format it answers in.

use tracing::debug;

use crate::models::CandidateRecord;
use crate::parse::{parse, ResponseFormat};
use crate::transport::DirectoryQuery;

/// Queries a directory backend and parses its responses.
pub struct Directory {
    backend: Box<dyn DirectoryQuery>,
    format: ResponseFormat,
}

impl Directory {
    pub fn new(backend: Box<dyn DirectoryQuery>, format: ResponseFormat) -> Self {
        Self { backend, format }
    }

    pub fn format(&self) -> ResponseFormat {
        self.format
    }

    /// Runs `query` and parses the response. Transport failures yield no candidates.
    pub fn search(&self, query: &str) -> Vec<CandidateRecord> {
        let body = match self.backend.query(query) {
            Ok(body) => Some(body),
            Err(e) => {
                debug!(query, error = %e, "directory query failed");
                None
            }
        };
        let candidates = parse(self.format, body.as_deref());
        debug!(query, format = %self.format, count = candidates.len(), "directory search");
        candidates
    }

    /// Follow-up query by alias; an alias names at most one person.
    pub fn lookup_alias(&self, alias: &str) -> Option<CandidateRecord> {
        self.search(alias).into_iter().next()
    }
}
