// Thiele methods: separable rules (AV, SAV), sequential and reverse sequential
// construction, and the exact optimum by branch and bound.

use std::collections::BTreeSet;

use num_rational::BigRational;
use num_traits::Zero;

use crate::committee::{combinations, str_candset, with_candidate, without_candidate};
use crate::config::*;
use crate::diagnostics::{Diagnostics, Severity};
use crate::scores::*;

/// The two rules that score each candidate independently.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum SeparableRule {
    Av,
    Sav,
}

/// AV and SAV: the `committeesize` candidates with the highest scores.
///
/// In irresolute mode, all the ways of filling the last seats with candidates tied
/// at the cutoff score are returned.
///
/// # Panics
///
/// If `committeesize` is larger than the number of candidates.
pub fn compute_separable_rule(
    rule: SeparableRule,
    profile: &Profile,
    committeesize: usize,
    resolute: bool,
    diag: &Diagnostics,
) -> Vec<Committee> {
    let scores = match rule {
        SeparableRule::Av => av_scores(profile),
        SeparableRule::Sav => sav_scores(profile),
    };
    if diag.enabled(Severity::Debug) {
        for (c, s) in scores.iter().enumerate() {
            diag.debug(format_args!(
                " {}: score {}",
                profile.names()[c],
                s
            ));
        }
    }

    if committeesize == 0 {
        return vec![Committee::new()];
    }
    let mut sorted_scores = scores.clone();
    sorted_scores.sort();
    let cutoff = &sorted_scores[profile.num_cand() - committeesize];
    let certain: Vec<usize> = (0..profile.num_cand())
        .filter(|c| &scores[*c] > cutoff)
        .collect();
    let possible: Vec<usize> = (0..profile.num_cand())
        .filter(|c| &scores[*c] == cutoff)
        .collect();
    let missing = committeesize - certain.len();
    diag.debug2(format_args!(
        "cutoff score {}, {} certain and {} tied candidates for {} seats",
        cutoff,
        certain.len(),
        possible.len(),
        missing
    ));

    if resolute || possible.len() == missing {
        let mut committee = certain;
        committee.extend(possible.iter().take(missing));
        committee.sort_unstable();
        return vec![committee];
    }
    combinations(possible.len(), missing)
        .map(|selection| {
            let mut committee = certain.clone();
            committee.extend(selection.iter().map(|i| possible[*i]));
            committee.sort_unstable();
            committee
        })
        .collect::<BTreeSet<Committee>>()
        .into_iter()
        .collect()
}

/// Sequential Thiele methods: candidates are added one by one, each time the one
/// with the largest marginal score.
///
/// Ties are broken in favour of the smallest index in resolute mode. In irresolute
/// mode, all the tied candidates are explored and the resulting committees are
/// merged after every round.
pub fn compute_seq_thiele_method(
    scorefct: ScoringFunction,
    profile: &Profile,
    committeesize: usize,
    resolute: bool,
    diag: &Diagnostics,
) -> Vec<Committee> {
    let mut partial: BTreeSet<Committee> = BTreeSet::from([Vec::new()]);
    for round in 0..committeesize {
        let mut next: BTreeSet<Committee> = BTreeSet::new();
        for committee in partial.iter() {
            let marginal = marginal_thiele_scores_add(scorefct, profile, committee);
            let Some(best) = (0..profile.num_cand())
                .filter(|c| committee.binary_search(c).is_err())
                .map(|c| &marginal[c])
                .max()
            else {
                continue;
            };
            let tied: Vec<usize> = (0..profile.num_cand())
                .filter(|c| committee.binary_search(c).is_err() && &marginal[*c] == best)
                .collect();
            if diag.enabled(Severity::Debug2) {
                diag.debug2(format_args!(
                    "round {}: partial committee {}, marginal scores {}",
                    round,
                    str_candset(committee, profile.names()),
                    str_scores(&marginal, committee, true)
                ));
            }
            if resolute {
                diag.debug(format_args!(
                    "adding candidate number {}: {}, score increase {}",
                    round + 1,
                    profile.names()[tied[0]],
                    best
                ));
                next.insert(with_candidate(committee, tied[0]));
                break;
            }
            for c in tied {
                next.insert(with_candidate(committee, c));
            }
        }
        partial = next;
    }
    let winners: Vec<Committee> = partial.into_iter().collect();
    if diag.enabled(Severity::Debug) {
        for w in winners.iter() {
            diag.debug(format_args!(
                " {} has a score of {}",
                str_candset(w, profile.names()),
                thiele_score(scorefct, profile, w)
            ));
        }
    }
    winners
}

/// Reverse sequential Thiele methods: starting from all the candidates, the one
/// whose removal costs the least is removed until `committeesize` remain.
///
/// In resolute mode, the largest index is removed among tied candidates.
pub fn compute_revseq_thiele_method(
    scorefct: ScoringFunction,
    profile: &Profile,
    committeesize: usize,
    resolute: bool,
    diag: &Diagnostics,
) -> Vec<Committee> {
    let full: Committee = (0..profile.num_cand()).collect();
    let mut partial: BTreeSet<Committee> = BTreeSet::from([full]);
    for round in 0..(profile.num_cand() - committeesize) {
        let mut next: BTreeSet<Committee> = BTreeSet::new();
        for committee in partial.iter() {
            let marginal = marginal_thiele_scores_remove(scorefct, profile, committee);
            let Some(least) = committee.iter().map(|c| &marginal[*c]).min() else {
                continue;
            };
            let tied: Vec<usize> = committee
                .iter()
                .copied()
                .filter(|c| &marginal[*c] == least)
                .collect();
            if diag.enabled(Severity::Debug2) {
                diag.debug2(format_args!(
                    "round {}: committee {}, marginal losses {}",
                    round,
                    str_candset(committee, profile.names()),
                    str_scores(&marginal, committee, false)
                ));
            }
            if resolute {
                if let Some(c) = tied.last() {
                    diag.debug(format_args!(
                        "removing candidate number {}: {}, score decrease {}",
                        round + 1,
                        profile.names()[*c],
                        least
                    ));
                    next.insert(without_candidate(committee, *c));
                }
                break;
            }
            for c in tied {
                next.insert(without_candidate(committee, c));
            }
        }
        partial = next;
    }
    partial.into_iter().collect()
}

/// Optimal Thiele committees by a depth-first branch and bound.
///
/// The result of the sequential method gives the first lower bound. A partial
/// committee is extended only with candidates of larger index, and a branch is
/// abandoned when its score plus the best remaining marginal gains cannot reach
/// the best known score. Marginal gains only decrease as the committee grows,
/// so the bound is valid for all Thiele scoring functions.
pub fn compute_thiele_branch_and_bound(
    scorefct: ScoringFunction,
    profile: &Profile,
    committeesize: usize,
    resolute: bool,
    diag: &Diagnostics,
) -> Vec<Committee> {
    let silent = Diagnostics::silent();
    let seq = compute_seq_thiele_method(scorefct, profile, committeesize, true, &silent);
    let initial = match seq.first() {
        Some(c) => thiele_score(scorefct, profile, c),
        None => BigRational::zero(),
    };
    diag.debug(format_args!(
        "branch and bound: initial bound {} from the sequential committee",
        initial
    ));

    let mut search = BranchAndBound {
        scorefct,
        profile,
        committeesize,
        best_score: initial,
        optima: Vec::new(),
        explored: 0,
    };
    search.explore(&mut Vec::new());
    diag.debug(format_args!(
        "branch and bound: explored {} partial committees, optimal score {}",
        search.explored, search.best_score
    ));

    let mut optima = search.optima;
    optima.sort();
    if resolute {
        optima.truncate(1);
    }
    optima
}

struct BranchAndBound<'a> {
    scorefct: ScoringFunction,
    profile: &'a Profile,
    committeesize: usize,
    best_score: BigRational,
    optima: Vec<Committee>,
    explored: u64,
}

impl<'a> BranchAndBound<'a> {
    fn explore(&mut self, partial: &mut Committee) {
        self.explored += 1;
        let score = thiele_score(self.scorefct, self.profile, partial);
        let missing = self.committeesize - partial.len();
        if missing == 0 {
            if score > self.best_score {
                self.best_score = score;
                self.optima = vec![partial.clone()];
            } else if score == self.best_score {
                self.optima.push(partial.clone());
            }
            return;
        }

        let start = partial.last().map(|c| c + 1).unwrap_or(0);
        let num_cand = self.profile.num_cand();
        let marginal = marginal_thiele_scores_add(self.scorefct, self.profile, partial);
        let mut gains: Vec<&BigRational> = marginal[start..].iter().collect();
        gains.sort_unstable_by(|a, b| b.cmp(a));
        let bound = gains
            .iter()
            .take(missing)
            .fold(score, |acc, g| acc + *g);
        if bound < self.best_score {
            return;
        }

        for c in start..=(num_cand - missing) {
            partial.push(c);
            self.explore(partial);
            partial.pop();
        }
    }
}

fn str_scores(marginal: &[BigRational], committee: &[usize], exclude_members: bool) -> String {
    let parts: Vec<String> = marginal
        .iter()
        .enumerate()
        .filter(|(c, _)| committee.binary_search(c).is_ok() != exclude_members)
        .map(|(c, s)| format!("{c}: {s}"))
        .collect();
    parts.join(", ")
}
