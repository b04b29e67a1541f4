//! Narrowing a directory listing down to one person.
//!
//! Both strategies issue at most one follow-up alias query per candidate
//! they inspect. A follow-up by alias is authoritative: its first record is
//! the answer.

use tracing::debug;

use crate::directory::Directory;
use crate::models::CandidateRecord;
use crate::names::name_vector;

/// Picks the candidate whose `name` has the same name vector as `full_name`.
///
/// A single-element listing is returned as-is. Otherwise the matching
/// candidate's alias is queried for the detailed record.
pub fn refine_by_name(
    directory: &Directory,
    candidates: &[CandidateRecord],
    full_name: &str,
) -> Option<CandidateRecord> {
    let vector = name_vector(full_name);
    let matched = candidates
        .iter()
        .find(|c| c.name().is_some_and(|name| name_vector(name) == vector))?;

    if candidates.len() == 1 {
        return Some(matched.clone());
    }

    let Some(alias) = matched.alias() else {
        debug!(full_name, "name matched a candidate without an alias");
        return None;
    };
    debug!(full_name, alias, "following up name match");
    directory.lookup_alias(alias)
}

/// Picks the first candidate whose e-mail local part equals `identifier`
/// (case-insensitive).
///
/// Candidates that already carry an e-mail are checked directly and only a
/// match is followed up. Candidates without one are followed up eagerly and
/// the fetched record is checked instead; a fetched record that doesn't
/// match is dropped.
pub fn refine_by_identifier(
    directory: &Directory,
    candidates: &[CandidateRecord],
    identifier: &str,
) -> Option<CandidateRecord> {
    let local_part_matches = |record: &CandidateRecord| {
        record
            .email_local_part()
            .is_some_and(|local| local.eq_ignore_ascii_case(identifier))
    };

    for candidate in candidates {
        if candidate.email().is_some() {
            if !local_part_matches(candidate) {
                continue;
            }
            let Some(alias) = candidate.alias() else {
                debug!(identifier, "e-mail matched a candidate without an alias");
                continue;
            };
            debug!(identifier, alias, "following up e-mail match");
            return directory.lookup_alias(alias);
        }

        let Some(alias) = candidate.alias() else {
            continue;
        };
        debug!(identifier, alias, "fetching details for candidate without e-mail");
        if let Some(detail) = directory.lookup_alias(alias) {
            if local_part_matches(&detail) {
                return Some(detail);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::testing::FakeDirectory;
    use crate::parse::ResponseFormat;

    fn record(fields: &[(&str, &str)]) -> CandidateRecord {
        fields.iter().copied().collect()
    }

    fn text_directory(fake: &FakeDirectory) -> Directory {
        Directory::new(Box::new(fake.clone()), ResponseFormat::Text)
    }

    const COSTAN_DETAIL: &str = "name: Costan, Victor Marius\nemail: costan@MIT.EDU\nalias: V-costan\n";
    const LI_DETAIL: &str = "name: Li, Yan Ping\nemail: yanping@MIT.EDU\nalias: Y-li16\n";

    fn listing() -> Vec<CandidateRecord> {
        vec![
            record(&[("name", "Li, Yang"), ("alias", "Y-li17")]),
            record(&[("name", "Li, Yan Ping"), ("alias", "Y-li16")]),
            record(&[("name", "Costan, Victor Marius"), ("alias", "V-costan")]),
        ]
    }

    #[test]
    fn test_by_name_no_match() {
        let fake = FakeDirectory::new();
        let dir = text_directory(&fake);
        assert_eq!(refine_by_name(&dir, &listing(), "Srinivas Devadas"), None);
        assert!(fake.queries().is_empty());
    }

    #[test]
    fn test_by_name_singleton_skips_follow_up() {
        let fake = FakeDirectory::new();
        let dir = text_directory(&fake);
        let only = vec![record(&[("name", "Costan, Victor-Marius"), ("email", "costan@MIT.EDU")])];
        let user = refine_by_name(&dir, &only, "Victor Marius Costan").unwrap();
        assert_eq!(user, only[0]);
        assert!(fake.queries().is_empty(), "no follow-up query expected");
    }

    #[test]
    fn test_by_name_follows_up_alias() {
        let fake = FakeDirectory::new().respond("Y-li16", LI_DETAIL);
        let dir = text_directory(&fake);
        let user = refine_by_name(&dir, &listing(), "Yan Ping Li").unwrap();
        assert_eq!(user.email(), Some("yanping@MIT.EDU"));
        assert_eq!(fake.queries(), vec!["Y-li16"]);
    }

    #[test]
    fn test_by_name_is_case_sensitive() {
        let fake = FakeDirectory::new().respond("Y-li16", LI_DETAIL);
        let dir = text_directory(&fake);
        assert_eq!(refine_by_name(&dir, &listing(), "yan ping li"), None);
    }

    #[test]
    fn test_by_name_failed_follow_up() {
        let fake = FakeDirectory::new();
        let dir = text_directory(&fake);
        assert_eq!(refine_by_name(&dir, &listing(), "Yang Li"), None);
        assert_eq!(fake.queries(), vec!["Y-li17"]);
    }

    #[test]
    fn test_by_identifier_skips_non_matching_email() {
        let fake = FakeDirectory::new().respond("V-costan", COSTAN_DETAIL);
        let dir = text_directory(&fake);
        let candidates = vec![
            record(&[("name", "Costan, Ana"), ("email", "acostan@MIT.EDU"), ("alias", "A-costan")]),
            record(&[("name", "Costan, Victor"), ("email", "Costan@mit.edu"), ("alias", "V-costan")]),
        ];
        let user = refine_by_identifier(&dir, &candidates, "costan").unwrap();
        assert_eq!(user.name(), Some("Costan, Victor Marius"));
        assert_eq!(fake.queries(), vec!["V-costan"]);
    }

    #[test]
    fn test_by_identifier_fetches_candidates_without_email() {
        let fake = FakeDirectory::new()
            .respond("Y-li17", "name: Li, Yang\nemail: yli@MIT.EDU\nalias: Y-li17\n")
            .respond("Y-li16", LI_DETAIL);
        let dir = text_directory(&fake);
        let user = refine_by_identifier(&dir, &listing(), "yanping").unwrap();
        assert_eq!(user.alias(), Some("Y-li16"));
        assert_eq!(fake.queries(), vec!["Y-li17", "Y-li16"]);
    }

    #[test]
    fn test_by_identifier_no_match_queries_each_once() {
        let fake = FakeDirectory::new()
            .respond("Y-li17", "name: Li, Yang\nemail: yli@MIT.EDU\n")
            .respond("Y-li16", LI_DETAIL)
            .respond("V-costan", COSTAN_DETAIL);
        let dir = text_directory(&fake);
        assert_eq!(refine_by_identifier(&dir, &listing(), "nobody"), None);
        assert_eq!(fake.queries(), vec!["Y-li17", "Y-li16", "V-costan"]);
    }

    #[test]
    fn test_by_identifier_matching_email_returns_follow_up_result() {
        // A matching e-mail ends the scan even if its follow-up comes back empty.
        let fake = FakeDirectory::new().respond("Y-li16", LI_DETAIL);
        let dir = text_directory(&fake);
        let candidates = vec![
            record(&[("email", "yanping@MIT.EDU"), ("alias", "Y-gone")]),
            record(&[("alias", "Y-li16")]),
        ];
        assert_eq!(refine_by_identifier(&dir, &candidates, "yanping"), None);
        assert_eq!(fake.queries(), vec!["Y-gone"]);
    }
}
