/*
 * xfindsub - Passive Subdomain Finder
 *
 * A fast passive subdomain finder built in Rust
 * Author: Varp0s
 */

use std::collections::HashSet;

/// Unique, normalized hostnames collected for one domain.
pub type CandidateSet = HashSet<String>;

/// Canonical form of a raw hostname, or `None` when it is not usable.
///
/// Lowercases, trims whitespace, strips trailing dots and rejects values that
/// end up empty or carry no `.` at all.
pub fn normalize_candidate(raw: &str) -> Option<String> {
    let host = raw.trim().trim_end_matches('.').trim().to_lowercase();
    if host.is_empty() || !host.contains('.') {
        return None;
    }
    Some(host)
}

pub fn normalize_all<I, S>(raw: I) -> CandidateSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .filter_map(|host| normalize_candidate(host.as_ref()))
        .collect()
}

/// Sorted, deduplicated view used for presentation.
pub fn sorted(set: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut hosts: Vec<String> = set.into_iter().collect();
    hosts.sort();
    hosts.dedup();
    hosts
}
