// Phragmén's sequential rule and the method of Phragmén-Eneström.

use std::collections::BTreeSet;

use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::committee::{str_candset, with_candidate};
use crate::config::*;
use crate::diagnostics::{Diagnostics, Severity};

/// seq-Phragmén: every elected candidate brings a load of 1 that its approvers
/// share; the candidate that keeps the maximal load of its approvers the lowest is
/// elected next.
pub fn compute_seqphragmen(
    profile: &Profile,
    committeesize: usize,
    resolute: bool,
    diag: &Diagnostics,
) -> Vec<Committee> {
    let start_loads = vec![BigRational::zero(); profile.len()];
    let branches = seqphragmen_branches(profile, committeesize, &start_loads, &[], resolute, diag);
    if diag.enabled(Severity::Debug) {
        for (committee, loads) in branches.iter() {
            let max_load = loads.iter().max().cloned().unwrap_or_else(BigRational::zero);
            diag.debug(format_args!(
                " {}: maximal load {}",
                str_candset(committee, profile.names()),
                max_load
            ));
        }
    }
    committees_of(branches)
}

/// seq-Phragmén starting from given voter loads and a partially filled committee.
/// Used to complete committees of other rules.
pub fn compute_seqphragmen_from(
    profile: &Profile,
    committeesize: usize,
    start_loads: &[BigRational],
    partial_committee: &[usize],
    resolute: bool,
    diag: &Diagnostics,
) -> Vec<Committee> {
    committees_of(seqphragmen_branches(
        profile,
        committeesize,
        start_loads,
        partial_committee,
        resolute,
        diag,
    ))
}

type PhragmenBranch = (Committee, Vec<BigRational>);

fn committees_of(branches: BTreeSet<PhragmenBranch>) -> Vec<Committee> {
    branches
        .into_iter()
        .map(|(c, _)| c)
        .collect::<BTreeSet<Committee>>()
        .into_iter()
        .collect()
}

fn seqphragmen_branches(
    profile: &Profile,
    committeesize: usize,
    start_loads: &[BigRational],
    partial_committee: &[usize],
    resolute: bool,
    diag: &Diagnostics,
) -> BTreeSet<PhragmenBranch> {
    let approvers_weight = profile.approval_weights();
    // Candidates without approvers come last.
    let no_support = integer(committeesize + 1);

    let mut start_committee = partial_committee.to_vec();
    start_committee.sort_unstable();
    let mut branches: BTreeSet<PhragmenBranch> =
        BTreeSet::from([(start_committee, start_loads.to_vec())]);
    for round in partial_committee.len()..committeesize {
        let mut next: BTreeSet<PhragmenBranch> = BTreeSet::new();
        for (committee, loads) in branches.iter() {
            let mut approvers_load = vec![BigRational::zero(); profile.num_cand()];
            for (b, load) in profile.iter().zip(loads.iter()) {
                let weighted = b.weight() * load;
                for c in b.approved() {
                    approvers_load[*c] += &weighted;
                }
            }
            let new_maxload: Vec<Option<BigRational>> = (0..profile.num_cand())
                .map(|c| {
                    if committee.binary_search(&c).is_ok() {
                        None
                    } else if approvers_weight[c].is_zero() {
                        Some(no_support.clone())
                    } else {
                        Some((&approvers_load[c] + integer(1)) / &approvers_weight[c])
                    }
                })
                .collect();
            let Some(opt) = new_maxload.iter().flatten().min() else {
                continue;
            };
            let tied: Vec<usize> = (0..profile.num_cand())
                .filter(|c| new_maxload[*c].as_ref() == Some(opt))
                .collect();
            diag.debug2(format_args!(
                "round {}: committee {}, minimal new maximal load {} for candidates {:?}",
                round,
                str_candset(committee, profile.names()),
                opt,
                tied
            ));
            for c in tied {
                let new_loads: Vec<BigRational> = profile
                    .iter()
                    .zip(loads.iter())
                    .map(|(b, load)| {
                        if b.approves(c) {
                            opt.clone()
                        } else {
                            load.clone()
                        }
                    })
                    .collect();
                next.insert((with_candidate(committee, c), new_loads));
                if resolute {
                    break;
                }
            }
            if resolute {
                break;
            }
        }
        branches = next;
    }
    branches
}

/// Phragmén-Eneström: every voter starts with a budget equal to its weight, and
/// a seat costs a `1 / committeesize` share of the total weight. The candidate
/// whose approvers hold the most budget is elected and its approvers pay the price
/// proportionally to their budgets.
pub fn compute_phragmen_enestroem(
    profile: &Profile,
    committeesize: usize,
    resolute: bool,
    diag: &Diagnostics,
) -> Vec<Committee> {
    if committeesize == 0 {
        return vec![Committee::new()];
    }
    let price = profile.total_weight() / integer(committeesize);
    let start_budget: Vec<BigRational> = profile.iter().map(|b| b.weight().clone()).collect();
    let mut branches: BTreeSet<PhragmenBranch> = BTreeSet::from([(Vec::new(), start_budget)]);

    for round in 0..committeesize {
        let mut next: BTreeSet<PhragmenBranch> = BTreeSet::new();
        for (committee, budget) in branches.iter() {
            let mut support = vec![BigRational::zero(); profile.num_cand()];
            for (b, money) in profile.iter().zip(budget.iter()) {
                if !money.is_positive() {
                    continue;
                }
                for c in b.approved() {
                    support[*c] += money;
                }
            }
            let Some(max_support) = (0..profile.num_cand())
                .filter(|c| committee.binary_search(c).is_err())
                .map(|c| &support[c])
                .max()
            else {
                continue;
            };
            let tied: Vec<usize> = (0..profile.num_cand())
                .filter(|c| committee.binary_search(c).is_err() && &support[*c] == max_support)
                .collect();
            let multiplier = if max_support > &price {
                (max_support - &price) / max_support
            } else {
                BigRational::zero()
            };
            diag.debug2(format_args!(
                "round {}: committee {}, largest support {} for candidates {:?}",
                round,
                str_candset(committee, profile.names()),
                max_support,
                tied
            ));
            for c in tied {
                let new_budget: Vec<BigRational> = profile
                    .iter()
                    .zip(budget.iter())
                    .map(|(b, money)| {
                        if b.approves(c) {
                            money * &multiplier
                        } else {
                            money.clone()
                        }
                    })
                    .collect();
                next.insert((with_candidate(committee, c), new_budget));
                if resolute {
                    break;
                }
            }
            if resolute {
                break;
            }
        }
        branches = next;
    }
    committees_of(branches)
}
