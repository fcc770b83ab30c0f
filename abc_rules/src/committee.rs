use itertools::Itertools;

use crate::config::Committee;

/// All the subsets of size `k` of `0..n`, in lexicographic order.
pub fn combinations(n: usize, k: usize) -> impl Iterator<Item = Committee> {
    (0..n).combinations(k)
}

/// Sorts each committee and the list of committees, and removes duplicates.
pub fn canonical(committees: Vec<Committee>) -> Vec<Committee> {
    let mut res: Vec<Committee> = committees
        .into_iter()
        .map(|mut c| {
            c.sort_unstable();
            c
        })
        .collect();
    res.sort();
    res.dedup();
    res
}

/// Inserts a candidate in an ascending committee.
pub fn with_candidate(committee: &[usize], cand: usize) -> Committee {
    let mut res = committee.to_vec();
    if let Err(pos) = res.binary_search(&cand) {
        res.insert(pos, cand);
    }
    res
}

pub fn without_candidate(committee: &[usize], cand: usize) -> Committee {
    committee.iter().copied().filter(|c| *c != cand).collect()
}

/// Renders a set of candidates, as `{a, b, c}`.
pub fn str_candset(cands: &[usize], names: &[String]) -> String {
    let mut sorted = cands.to_vec();
    sorted.sort_unstable();
    let named: Vec<&str> = sorted
        .iter()
        .map(|c| names.get(*c).map(|s| s.as_str()).unwrap_or("?"))
        .collect();
    format!("{{{}}}", named.join(", "))
}

pub fn str_committees(committees: &[Committee], names: &[String]) -> String {
    committees
        .iter()
        .map(|c| format!(" {}", str_candset(c, names)))
        .collect::<Vec<String>>()
        .join("\n")
}
