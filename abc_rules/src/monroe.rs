// Monroe's rule, exactly by exhaustive search and approximately by the greedy
// assignment procedure.

use crate::committee::{combinations, str_candset};
use crate::config::*;
use crate::diagnostics::{Diagnostics, Severity};
use crate::scores::monroescore;

/// Committees with the largest Monroe score.
pub fn compute_monroe_brute_force(
    profile: &Profile,
    committeesize: usize,
    resolute: bool,
    diag: &Diagnostics,
) -> Vec<Committee> {
    let mut best: Option<usize> = None;
    let mut optima: Vec<Committee> = Vec::new();
    for committee in combinations(profile.num_cand(), committeesize) {
        let score = monroescore(profile, &committee);
        match best {
            Some(b) if score < b => continue,
            Some(b) if score == b => optima.push(committee),
            _ => {
                best = Some(score);
                optima = vec![committee];
            }
        }
    }
    diag.debug(format_args!(
        "optimal Monroe score: {}",
        best.unwrap_or(0)
    ));
    if resolute {
        optima.truncate(1);
    }
    optima
}

/// One step of Greedy Monroe: the elected candidate and the voters assigned to it.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct MonroeAssignment {
    pub candidate: usize,
    pub voters: Vec<usize>,
}

/// Greedy Monroe.
///
/// In every round, the candidate approved by the most unassigned voters is
/// elected (smallest index on ties), and up to `n / k` of these voters (one more
/// in the first `n mod k` rounds) are assigned to it, in ballot order. Reordering
/// the ballots may change the result.
pub fn compute_greedy_monroe(
    profile: &Profile,
    committeesize: usize,
    diag: &Diagnostics,
) -> Vec<Committee> {
    let assignments = greedy_monroe_assignments(profile, committeesize);
    let mut committee: Committee = assignments.iter().map(|a| a.candidate).collect();
    if diag.enabled(Severity::Debug) {
        for a in assignments.iter() {
            diag.debug(format_args!(
                " candidate {} assigned to voters {:?}",
                profile.names()[a.candidate],
                a.voters
            ));
        }
        diag.debug(format_args!(
            "winning committee: {}",
            str_candset(&committee, profile.names())
        ));
    }
    committee.sort_unstable();
    vec![committee]
}

/// The assignments of Greedy Monroe, in the order of election.
///
/// Voters that are left without a candidate after the last round are distributed
/// over the members that still have room, in ballot order.
pub fn greedy_monroe_assignments(profile: &Profile, committeesize: usize) -> Vec<MonroeAssignment> {
    if committeesize == 0 {
        return Vec::new();
    }
    let num_voters = profile.len();
    let quota = num_voters / committeesize;
    let larger_groups = num_voters - committeesize * quota;

    let mut remaining_voters: Vec<usize> = (0..num_voters).collect();
    let mut remaining_cands: Vec<usize> = (0..profile.num_cand()).collect();
    let mut assignments: Vec<MonroeAssignment> = Vec::new();

    for round in 0..committeesize {
        let mut winner: Option<(usize, usize)> = None;
        for c in remaining_cands.iter() {
            let support = remaining_voters
                .iter()
                .filter(|v| profile.ballots()[**v].approves(*c))
                .count();
            if winner.map_or(true, |(_, s)| support > s) {
                winner = Some((*c, support));
            }
        }
        let Some((candidate, _)) = winner else {
            break;
        };
        let num_remove = if round < larger_groups {
            quota + 1
        } else {
            quota
        };
        let voters: Vec<usize> = remaining_voters
            .iter()
            .copied()
            .filter(|v| profile.ballots()[*v].approves(candidate))
            .take(num_remove)
            .collect();
        remaining_voters.retain(|v| !voters.contains(v));
        remaining_cands.retain(|c| *c != candidate);
        assignments.push(MonroeAssignment { candidate, voters });
    }

    // Fill up the groups with the voters that approve none of their members.
    for (round, a) in assignments.iter_mut().enumerate() {
        let size = if round < larger_groups {
            quota + 1
        } else {
            quota
        };
        while a.voters.len() < size && !remaining_voters.is_empty() {
            a.voters.push(remaining_voters.remove(0));
        }
    }
    assignments
}
