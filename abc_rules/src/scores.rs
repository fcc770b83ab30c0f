// Scoring functions and committee scores.

use std::collections::VecDeque;
use std::fmt::Display;
use std::str::FromStr;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::config::*;

/// The marginal scoring functions of the Thiele methods.
///
/// `marginal(i)` is the utility a voter gains from its i-th approved candidate
/// in the committee.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ScoringFunction {
    /// Approval Voting: every approved candidate counts 1.
    Av,
    /// Proportional Approval Voting: 1/i.
    Pav,
    /// Sainte-Laguë Approval Voting: 1/(2i-1).
    Slav,
    /// Chamberlin-Courant: only the first approved candidate counts.
    Cc,
    /// Geometric: 1/p^(i-1).
    Geom(u32),
}

impl ScoringFunction {
    pub fn marginal(&self, i: usize) -> BigRational {
        if i == 0 {
            return BigRational::zero();
        }
        match self {
            ScoringFunction::Av => BigRational::one(),
            ScoringFunction::Pav => ratio(1, i),
            ScoringFunction::Slav => ratio(1, 2 * i - 1),
            ScoringFunction::Cc => {
                if i == 1 {
                    BigRational::one()
                } else {
                    BigRational::zero()
                }
            }
            ScoringFunction::Geom(p) => {
                let denom: BigInt = num_traits::pow(BigInt::from(*p), i - 1);
                BigRational::new(BigInt::one(), denom)
            }
        }
    }

    /// Utility of a voter with `i` approved candidates in the committee.
    pub fn score(&self, i: usize) -> BigRational {
        (1..=i).fold(BigRational::zero(), |acc, j| acc + self.marginal(j))
    }
}

impl FromStr for ScoringFunction {
    type Err = AbcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "av" => Ok(ScoringFunction::Av),
            "pav" => Ok(ScoringFunction::Pav),
            "slav" => Ok(ScoringFunction::Slav),
            "cc" => Ok(ScoringFunction::Cc),
            _ => match s.strip_prefix("geom").map(|p| p.parse::<u32>()) {
                Some(Ok(p)) if p > 0 => Ok(ScoringFunction::Geom(p)),
                _ => Err(AbcError::UnknownScoringFunction(s.to_string())),
            },
        }
    }
}

impl Display for ScoringFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoringFunction::Av => write!(f, "av"),
            ScoringFunction::Pav => write!(f, "pav"),
            ScoringFunction::Slav => write!(f, "slav"),
            ScoringFunction::Cc => write!(f, "cc"),
            ScoringFunction::Geom(p) => write!(f, "geom{p}"),
        }
    }
}

/// The total Thiele score of a committee.
pub fn thiele_score(scorefct: ScoringFunction, profile: &Profile, committee: &[usize]) -> BigRational {
    profile.iter().fold(BigRational::zero(), |acc, b| {
        acc + b.weight() * scorefct.score(b.satisfaction(committee))
    })
}

/// For every candidate not in the committee, the score increase when adding it.
/// Members of the committee get zero.
pub fn marginal_thiele_scores_add(
    scorefct: ScoringFunction,
    profile: &Profile,
    committee: &[usize],
) -> Vec<BigRational> {
    let mut marginal = vec![BigRational::zero(); profile.num_cand()];
    for b in profile {
        let gain = b.weight() * scorefct.marginal(b.satisfaction(committee) + 1);
        if gain.is_zero() {
            continue;
        }
        for c in b.approved() {
            marginal[*c] += &gain;
        }
    }
    for c in committee {
        marginal[*c] = BigRational::zero();
    }
    marginal
}

/// For every member of the committee, the score decrease when removing it.
/// Non-members get zero.
pub fn marginal_thiele_scores_remove(
    scorefct: ScoringFunction,
    profile: &Profile,
    committee: &[usize],
) -> Vec<BigRational> {
    let mut marginal = vec![BigRational::zero(); profile.num_cand()];
    for b in profile {
        let satisfaction = b.satisfaction(committee);
        let loss = b.weight() * scorefct.marginal(satisfaction);
        for c in committee.iter().filter(|c| b.approves(**c)) {
            marginal[*c] += &loss;
        }
    }
    marginal
}

/// Approval scores: the weight of the approvers of each candidate.
pub fn av_scores(profile: &Profile) -> Vec<BigRational> {
    profile.approval_weights()
}

/// Satisfaction approval scores: each voter splits its weight equally among
/// the approved candidates.
pub fn sav_scores(profile: &Profile) -> Vec<BigRational> {
    let mut scores = vec![BigRational::zero(); profile.num_cand()];
    for b in profile {
        if b.is_empty() {
            continue;
        }
        let share = b.weight() / integer(b.len());
        for c in b.approved() {
            scores[*c] += &share;
        }
    }
    scores
}

/// Size of the symmetric difference between the approval set and the committee.
pub fn hamming(approved: &[usize], committee: &[usize]) -> usize {
    let common = committee
        .iter()
        .filter(|c| approved.binary_search(c).is_ok())
        .count();
    approved.len() + committee.len() - 2 * common
}

/// The largest Hamming distance between the committee and a ballot (weights are ignored).
pub fn mavscore(profile: &Profile, committee: &[usize]) -> usize {
    profile
        .iter()
        .map(|b| hamming(b.approved(), committee))
        .max()
        .unwrap_or(0)
}

/// All the Hamming distances, from the largest to the smallest.
pub fn lexmav_distances(profile: &Profile, committee: &[usize]) -> Vec<usize> {
    let mut distances: Vec<usize> = profile
        .iter()
        .map(|b| hamming(b.approved(), committee))
        .collect();
    distances.sort_unstable_by(|a, b| b.cmp(a));
    distances
}

/// The Monroe score of a committee: the largest number of voters that can be
/// assigned to an approved member, when every member receives either
/// `n / k` or `n / k + 1` voters.
///
/// Computed as a maximum flow. Every member can absorb `n / k` voters, and at
/// most `n mod k` members absorb one more.
pub fn monroescore(profile: &Profile, committee: &[usize]) -> usize {
    let n = profile.len();
    let k = committee.len();
    if k == 0 || n == 0 {
        return 0;
    }
    let lower = n / k;
    let overflow = n - k * lower;

    // Nodes: source, voters, members, overflow node, sink.
    let source = 0;
    let extra = 1 + n + k;
    let sink = extra + 1;
    let mut flow = FlowNetwork::new(sink + 1);
    for (v, b) in profile.iter().enumerate() {
        flow.add_edge(source, 1 + v, 1);
        for (j, c) in committee.iter().enumerate() {
            if b.approves(*c) {
                flow.add_edge(1 + v, 1 + n + j, 1);
            }
        }
    }
    for j in 0..k {
        flow.add_edge(1 + n + j, sink, lower);
        flow.add_edge(1 + n + j, extra, 1);
    }
    flow.add_edge(extra, sink, overflow);
    flow.max_flow(source, sink)
}

// Residual network with Edmonds-Karp augmentation.
struct FlowNetwork {
    capacity: Vec<Vec<usize>>,
    adjacent: Vec<Vec<usize>>,
}

impl FlowNetwork {
    fn new(size: usize) -> FlowNetwork {
        FlowNetwork {
            capacity: vec![vec![0; size]; size],
            adjacent: vec![Vec::new(); size],
        }
    }

    fn add_edge(&mut self, from: usize, to: usize, cap: usize) {
        self.capacity[from][to] += cap;
        self.adjacent[from].push(to);
        self.adjacent[to].push(from);
    }

    fn max_flow(&mut self, source: usize, sink: usize) -> usize {
        let size = self.capacity.len();
        let mut total = 0;
        loop {
            let mut parent: Vec<Option<usize>> = vec![None; size];
            let mut queue = VecDeque::from([source]);
            let mut reached = false;
            while let Some(u) = queue.pop_front() {
                for &v in self.adjacent[u].iter() {
                    if v != source && parent[v].is_none() && self.capacity[u][v] > 0 {
                        parent[v] = Some(u);
                        if v == sink {
                            reached = true;
                            break;
                        }
                        queue.push_back(v);
                    }
                }
                if reached {
                    break;
                }
            }
            if !reached {
                return total;
            }
            let mut bottleneck = usize::MAX;
            let mut v = sink;
            while let Some(u) = parent[v] {
                bottleneck = bottleneck.min(self.capacity[u][v]);
                v = u;
            }
            let mut v = sink;
            while let Some(u) = parent[v] {
                self.capacity[u][v] -= bottleneck;
                self.capacity[v][u] += bottleneck;
                v = u;
            }
            total += bottleneck;
        }
    }
}
