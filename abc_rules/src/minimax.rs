// Minimax Approval Voting and its lexicographic refinement, by exhaustive search.

use crate::committee::{combinations, str_candset};
use crate::config::*;
use crate::diagnostics::Diagnostics;
use crate::scores::{lexmav_distances, mavscore};

/// Committees minimizing the largest Hamming distance to a ballot.
///
/// Weights are ignored.
pub fn compute_mav_brute_force(
    profile: &Profile,
    committeesize: usize,
    resolute: bool,
    diag: &Diagnostics,
) -> Vec<Committee> {
    let mut best: Option<usize> = None;
    let mut optima: Vec<Committee> = Vec::new();
    for committee in combinations(profile.num_cand(), committeesize) {
        let score = mavscore(profile, &committee);
        match best {
            Some(b) if score > b => continue,
            Some(b) if score == b => optima.push(committee),
            _ => {
                best = Some(score);
                optima = vec![committee];
            }
        }
    }
    diag.debug(format_args!(
        "minimax score of the winning committees: {}",
        best.unwrap_or(0)
    ));
    if resolute {
        optima.truncate(1);
    }
    optima
}

/// Committees whose sorted vector of Hamming distances is lexicographically
/// smallest: first minimize the largest distance, then the second largest, and so on.
pub fn compute_lexmav_brute_force(
    profile: &Profile,
    committeesize: usize,
    resolute: bool,
    diag: &Diagnostics,
) -> Vec<Committee> {
    let mut best: Option<Vec<usize>> = None;
    let mut optima: Vec<Committee> = Vec::new();
    for committee in combinations(profile.num_cand(), committeesize) {
        let distances = lexmav_distances(profile, &committee);
        match best.as_ref().map(|b| distances.cmp(b)) {
            Some(std::cmp::Ordering::Greater) => continue,
            Some(std::cmp::Ordering::Equal) => optima.push(committee),
            _ => {
                diag.debug2(format_args!(
                    "new best committee {} with distances {:?}",
                    str_candset(&committee, profile.names()),
                    distances
                ));
                best = Some(distances);
                optima = vec![committee];
            }
        }
    }
    if resolute {
        optima.truncate(1);
    }
    optima
}
