use std::collections::HashSet;

/// Links from `scanned` that are not members of `existing`, in scan order.
///
/// Repeated links stay repeated. Use [`dedupe`] on the result to submit each
/// link only once.
pub fn diff(scanned: &[String], existing: &HashSet<String>) -> Vec<String> {
    scanned
        .iter()
        .filter(|link| !existing.contains(link.as_str()))
        .cloned()
        .collect()
}

/// Keeps the first occurrence of every link.
pub fn dedupe(links: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    links
        .into_iter()
        .filter(|link| seen.insert(link.clone()))
        .collect()
}

/// How many scanned links are already in the playlist, repeats included.
pub fn count_present(scanned: &[String], existing: &HashSet<String>) -> usize {
    scanned
        .iter()
        .filter(|link| existing.contains(link.as_str()))
        .count()
}
