// Budget-based rules: Rule X (method of equal shares) and the Consensus rule.

use std::collections::BTreeSet;

use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::committee::{str_candset, with_candidate};
use crate::config::*;
use crate::diagnostics::{Diagnostics, Severity};
use crate::phragmen::compute_seqphragmen_from;

type BudgetBranch = (Committee, Vec<BigRational>);

/// Rule X.
///
/// Every voter starts with a budget of `committeesize / n`, and a candidate costs 1.
/// In each round, the candidate that can be paid with the lowest price per
/// approver `q` is elected; each approver pays `q`, or its whole budget if it has
/// less. When no candidate is affordable anymore, the committee is completed by
/// seq-Phragmén starting from the loads `committeesize / n - budget`, unless
/// `skip_phase2` is set, in which case the smaller committee is returned.
///
/// # Panics
///
/// If the profile is empty.
pub fn compute_rule_x(
    profile: &Profile,
    committeesize: usize,
    resolute: bool,
    skip_phase2: bool,
    diag: &Diagnostics,
) -> Vec<Committee> {
    let start_budget = ratio(committeesize, profile.len());
    let mut branches: BTreeSet<BudgetBranch> =
        BTreeSet::from([(Vec::new(), vec![start_budget.clone(); profile.len()])]);
    let mut winners: BTreeSet<Committee> = BTreeSet::new();

    for round in 0..committeesize {
        let mut next: BTreeSet<BudgetBranch> = BTreeSet::new();
        for (committee, budget) in branches.iter() {
            let prices: Vec<Option<BigRational>> = (0..profile.num_cand())
                .map(|c| {
                    if committee.binary_search(&c).is_ok() {
                        None
                    } else {
                        min_price(profile, budget, c)
                    }
                })
                .collect();
            let Some(best) = prices.iter().flatten().min() else {
                // First phase is over for this branch.
                diag.debug(format_args!(
                    "no affordable candidate after {} rounds, committee {}",
                    round,
                    str_candset(committee, profile.names())
                ));
                if skip_phase2 {
                    winners.insert(committee.clone());
                } else {
                    let start_loads: Vec<BigRational> =
                        budget.iter().map(|b| &start_budget - b).collect();
                    winners.extend(compute_seqphragmen_from(
                        profile,
                        committeesize,
                        &start_loads,
                        committee,
                        resolute,
                        diag,
                    ));
                }
                if resolute {
                    break;
                }
                continue;
            };
            let tied: Vec<usize> = (0..profile.num_cand())
                .filter(|c| prices[*c].as_ref() == Some(best))
                .collect();
            diag.debug2(format_args!(
                "round {}: committee {}, lowest price {} for candidates {:?}",
                round,
                str_candset(committee, profile.names()),
                best,
                tied
            ));
            for c in tied {
                let new_budget: Vec<BigRational> = profile
                    .iter()
                    .zip(budget.iter())
                    .map(|(b, money)| {
                        if b.approves(c) {
                            money - money.min(best)
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
        if resolute && !winners.is_empty() {
            break;
        }
    }
    winners.extend(branches.into_iter().map(|(c, _)| c));

    let mut winners: Vec<Committee> = winners.into_iter().collect();
    if resolute {
        winners.truncate(1);
    }
    winners
}

/// The lowest price per approver at which the approvers of `cand` can pay 1,
/// or None if their budgets together are not enough.
///
/// Approvers whose budget is below the price pay all they have; the others pay
/// the price.
fn min_price(profile: &Profile, budget: &[BigRational], cand: usize) -> Option<BigRational> {
    let mut rich: Vec<usize> = profile.approvers(cand);
    let mut poor_budget = BigRational::zero();
    while !rich.is_empty() {
        let q = (BigRational::one() - &poor_budget) / integer(rich.len());
        let (poor, still_rich): (Vec<usize>, Vec<usize>) =
            rich.iter().partition(|v| budget[**v] < q);
        if poor.is_empty() {
            return Some(q);
        }
        for v in poor {
            poor_budget += &budget[v];
        }
        rich = still_rich;
    }
    None
}

/// The Consensus rule.
///
/// In every round each voter receives its weight as budget. The candidate whose
/// approvers hold the most budget is elected; its approvers pay the total weight,
/// proportionally to their budgets.
pub fn compute_consensus_rule(
    profile: &Profile,
    committeesize: usize,
    resolute: bool,
    diag: &Diagnostics,
) -> Vec<Committee> {
    let total_weight = profile.total_weight();
    let mut branches: BTreeSet<BudgetBranch> =
        BTreeSet::from([(Vec::new(), vec![BigRational::zero(); profile.len()])]);

    for round in 0..committeesize {
        let mut next: BTreeSet<BudgetBranch> = BTreeSet::new();
        for (committee, budget) in branches.iter() {
            let budget: Vec<BigRational> = profile
                .iter()
                .zip(budget.iter())
                .map(|(b, money)| money + b.weight())
                .collect();
            let mut support = vec![BigRational::zero(); profile.num_cand()];
            for (b, money) in profile.iter().zip(budget.iter()) {
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
            if diag.enabled(Severity::Debug2) {
                diag.debug2(format_args!(
                    "round {}: committee {}, largest support {} for candidates {:?}",
                    round,
                    str_candset(committee, profile.names()),
                    max_support,
                    tied
                ));
            }
            for c in tied {
                let new_budget: Vec<BigRational> = profile
                    .iter()
                    .zip(budget.iter())
                    .map(|(b, money)| {
                        if b.approves(c) && !max_support.is_zero() {
                            money - money * &total_weight / max_support
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
    branches
        .into_iter()
        .map(|(c, _)| c)
        .collect::<BTreeSet<Committee>>()
        .into_iter()
        .collect()
}
