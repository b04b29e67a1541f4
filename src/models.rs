//! Core data models used throughout dirlookup.
//!
//! A [`CandidateRecord`] is what every directory backend parses into,
//! regardless of whether the raw response was plain text or HTML. The
//! resolver narrows those down to a single [`ResolvedIdentity`].

use serde::Serialize;
use std::collections::BTreeMap;

/// Field carrying the backend-specific alias used for follow-up queries.
pub const FIELD_ALIAS: &str = "alias";
/// Field carrying the directory's display name (often `Last, First`).
pub const FIELD_NAME: &str = "name";
/// Field carrying the person's e-mail address.
pub const FIELD_EMAIL: &str = "email";
/// Field added by the resolver once a canonical name is known.
pub const FIELD_FULL_NAME: &str = "full_name";

/// An unverified, possibly partial person record from a directory query.
///
/// Field names are normalized (`lowercase`, `snake_case`) by the parsers.
/// No field is guaranteed to be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CandidateRecord {
    fields: BTreeMap<String, String>,
}

impl CandidateRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn name(&self) -> Option<&str> {
        self.get(FIELD_NAME)
    }

    pub fn email(&self) -> Option<&str> {
        self.get(FIELD_EMAIL)
    }

    pub fn alias(&self) -> Option<&str> {
        self.get(FIELD_ALIAS)
    }

    /// The portion of the `email` field preceding the first `@`.
    pub fn email_local_part(&self) -> Option<&str> {
        self.email().map(local_part)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for CandidateRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// The final output of a resolution: a record with a guaranteed `full_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResolvedIdentity {
    record: CandidateRecord,
}

impl ResolvedIdentity {
    /// Adds (or overwrites) the `full_name` field of `record`.
    pub fn merge(mut record: CandidateRecord, full_name: impl Into<String>) -> Self {
        record.insert(FIELD_FULL_NAME, full_name);
        Self { record }
    }

    pub fn full_name(&self) -> &str {
        // Always inserted by `merge`.
        self.record.get(FIELD_FULL_NAME).unwrap_or_default()
    }

    pub fn record(&self) -> &CandidateRecord {
        &self.record
    }

    pub fn into_record(self) -> CandidateRecord {
        self.record
    }
}

/// Everything before the first `@` (the whole string when there is none).
pub fn local_part(address: &str) -> &str {
    address.split('@').next().unwrap_or(address)
}
