//! Directory response parsing.
//!
//! The two directory backends answer in very different shapes: the finger
//! directory returns blank-line separated blocks of `key: value` lines, the
//! web directory returns an HTML page. Both are normalized into
//! [`CandidateRecord`]s with the same field naming, so nothing downstream
//! needs to know which backend produced a candidate.
//!
//! Parsing never fails. Malformed input yields fewer (possibly zero)
//! records.

use scraper::{ElementRef, Html, Selector};

use crate::models::{CandidateRecord, FIELD_ALIAS, FIELD_NAME};

/// Wire format of a directory response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Blank-line separated `key: value` blocks (finger directory).
    Text,
    /// HTML page with `.dir pre` result blocks (web directory).
    Html,
}

impl std::fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResponseFormat::Text => write!(f, "text"),
            ResponseFormat::Html => write!(f, "html"),
        }
    }
}

/// Parses `raw` according to `format`. `None` parses as an empty response.
pub fn parse(format: ResponseFormat, raw: Option<&str>) -> Vec<CandidateRecord> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    match format {
        ResponseFormat::Text => parse_text_response(raw),
        ResponseFormat::Html => parse_html_response(raw),
    }
}

/// Normalizes a field label: `E-Mail` → `email`, `Home Page` → `home_page`.
pub fn normalize_key(key: &str) -> String {
    key.trim()
        .to_lowercase()
        .replace('-', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

// ═══════════════════════════════════════════════════════════════════════
// Text blocks
// ═══════════════════════════════════════════════════════════════════════

/// Parses a finger directory response.
///
/// Records are separated by blank lines (LF or CRLF). Inside a record each
/// line must look like `key: value`; the first line that doesn't ends the
/// record, and the rest of that block is ignored. Blocks that produce no
/// fields at all (banners such as `No matches to your query.`) are dropped.
pub fn parse_text_response(raw: &str) -> Vec<CandidateRecord> {
    let mut records = Vec::new();
    let mut current = CandidateRecord::new();
    let mut stopped = false;

    for line in raw.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                records.push(std::mem::take(&mut current));
            }
            stopped = false;
            continue;
        }
        if stopped {
            continue;
        }
        match split_field(line) {
            Some((key, value)) => {
                if !value.is_empty() {
                    current.insert(key, value);
                }
            }
            None => stopped = true,
        }
    }
    if !current.is_empty() {
        records.push(current);
    }

    records
}

/// Splits `key: value` on the first colon. `None` when there is no colon or
/// the key is blank.
fn split_field(line: &str) -> Option<(String, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = normalize_key(key);
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

// ═══════════════════════════════════════════════════════════════════════
// HTML pages
// ═══════════════════════════════════════════════════════════════════════

/// Parses a web directory page.
///
/// A page with a `mailto:` link is a single detailed result: each line of
/// every `.dir pre` block is a `key: value` field. Any other page is a
/// listing where every link in a `.dir pre` block points at
/// `/bin/cgicso?query=<alias>` and its text is the person's name.
pub fn parse_html_response(raw: &str) -> Vec<CandidateRecord> {
    let (Ok(pre_selector), Ok(link_selector)) = (Selector::parse(".dir pre"), Selector::parse("a"))
    else {
        return Vec::new();
    };
    let doc = Html::parse_document(raw);

    let single = doc
        .select(&link_selector)
        .filter_map(|a| a.value().attr("href"))
        .any(is_mailto);

    let mut records = Vec::new();
    for pre in doc.select(&pre_selector) {
        if single {
            let record = parse_detail_block(&pre);
            if !record.is_empty() {
                records.push(record);
            }
        } else {
            records.extend(
                pre.select(&link_selector)
                    .filter_map(|a| parse_listing_link(&a)),
            );
        }
    }

    records
}

fn is_mailto(href: &str) -> bool {
    href.get(..7)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("mailto:"))
}

fn parse_detail_block(pre: &ElementRef<'_>) -> CandidateRecord {
    let text: String = pre.text().collect();
    let mut record = CandidateRecord::new();
    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let (key, value) = (normalize_key(key), value.trim());
        if key.is_empty() || value.is_empty() {
            continue;
        }
        record.insert(key, value);
    }
    record
}

fn parse_listing_link(a: &ElementRef<'_>) -> Option<CandidateRecord> {
    let href = a.value().attr("href")?;
    let captures = regex::Regex::new(r"/bin/cgicso\?(query=[^&]+)$")
        .ok()
        .and_then(|re| re.captures(href))?;
    let query = captures.get(1)?.as_str();
    let alias = url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == "query")
        .map(|(_, value)| value.into_owned())?;

    let mut record = CandidateRecord::new();
    record.insert(FIELD_ALIAS, alias);
    record.insert(FIELD_NAME, a.text().collect::<String>());
    Some(record)
}
