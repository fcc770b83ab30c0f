// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::committee::str_candset;
use crate::registry::{Algorithm, RuleId};

/// A committee is an ascending list of distinct candidate indices.
pub type Committee = Vec<usize>;

/// An approval ballot: the set of approved candidates and the weight of the voter.
///
/// The approved candidates are kept sorted and without duplicates. Empty approval
/// sets are allowed.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Ballot {
    approved: Vec<usize>,
    weight: BigRational,
}

impl Ballot {
    /// A ballot with unit weight.
    pub fn new(approved: &[usize]) -> Ballot {
        let mut approved = approved.to_vec();
        approved.sort_unstable();
        approved.dedup();
        Ballot {
            approved,
            weight: BigRational::one(),
        }
    }

    /// A weighted ballot. The weight must be strictly positive.
    pub fn with_weight(approved: &[usize], weight: BigRational) -> Result<Ballot, AbcError> {
        if !weight.is_positive() {
            return Err(AbcError::InvalidWeight(weight.to_string()));
        }
        let mut b = Ballot::new(approved);
        b.weight = weight;
        Ok(b)
    }

    pub fn approved(&self) -> &[usize] {
        &self.approved
    }

    pub fn weight(&self) -> &BigRational {
        &self.weight
    }

    pub fn approves(&self, cand: usize) -> bool {
        self.approved.binary_search(&cand).is_ok()
    }

    /// Number of approved candidates that are in the committee.
    ///
    /// The committee does not need to be sorted.
    pub fn satisfaction(&self, committee: &[usize]) -> usize {
        committee.iter().filter(|c| self.approves(**c)).count()
    }

    pub fn len(&self) -> usize {
        self.approved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.approved.is_empty()
    }
}

/// A preference profile: an ordered list of approval ballots over a fixed set of
/// candidates `0..num_cand`.
///
/// The order of the ballots matters for some rules (Greedy Monroe).
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Profile {
    num_cand: usize,
    names: Vec<String>,
    ballots: Vec<Ballot>,
}

impl Profile {
    pub fn new(num_cand: usize) -> Result<Profile, AbcError> {
        if num_cand == 0 {
            return Err(AbcError::InvalidNumCand(num_cand));
        }
        Ok(Profile {
            num_cand,
            names: (0..num_cand).map(|c| c.to_string()).collect(),
            ballots: Vec::new(),
        })
    }

    /// A profile with named candidates. Extra names are ignored.
    pub fn with_names(num_cand: usize, names: &[String]) -> Result<Profile, AbcError> {
        let mut p = Profile::new(num_cand)?;
        if names.len() < num_cand {
            return Err(AbcError::MissingNames {
                given: names.len(),
                num_cand,
            });
        }
        p.names = names[..num_cand].to_vec();
        Ok(p)
    }

    pub fn num_cand(&self) -> usize {
        self.num_cand
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn ballots(&self) -> &[Ballot] {
        &self.ballots
    }

    pub fn len(&self) -> usize {
        self.ballots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ballots.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ballot> {
        self.ballots.iter()
    }

    /// Adds a ballot, checking that all the candidates exist.
    pub fn add_ballot(&mut self, ballot: Ballot) -> Result<(), AbcError> {
        self.check_ballot(&ballot)?;
        self.ballots.push(ballot);
        Ok(())
    }

    /// Adds unit-weight ballots. Nothing is added if one of the sets is invalid.
    pub fn add_approval_sets(&mut self, sets: &[Vec<usize>]) -> Result<(), AbcError> {
        let ballots: Vec<Ballot> = sets.iter().map(|s| Ballot::new(s)).collect();
        for b in ballots.iter() {
            self.check_ballot(b)?;
        }
        self.ballots.extend(ballots);
        Ok(())
    }

    fn check_ballot(&self, ballot: &Ballot) -> Result<(), AbcError> {
        match ballot.approved.last() {
            Some(c) if *c >= self.num_cand => Err(AbcError::InvalidCandidate {
                candidate: *c,
                num_cand: self.num_cand,
            }),
            _ => Ok(()),
        }
    }

    pub fn total_weight(&self) -> BigRational {
        self.ballots
            .iter()
            .fold(BigRational::zero(), |acc, b| acc + &b.weight)
    }

    pub fn has_unit_weights(&self) -> bool {
        self.ballots.iter().all(|b| b.weight.is_one())
    }

    /// The indices of the voters that approve the candidate.
    pub fn approvers(&self, cand: usize) -> Vec<usize> {
        self.ballots
            .iter()
            .enumerate()
            .filter(|(_, b)| b.approves(cand))
            .map(|(v, _)| v)
            .collect()
    }

    /// Sum of the weights of the voters approving each candidate.
    pub fn approval_weights(&self) -> Vec<BigRational> {
        let mut res = vec![BigRational::zero(); self.num_cand];
        for b in self.ballots.iter() {
            for c in b.approved.iter() {
                res[*c] += &b.weight;
            }
        }
        res
    }

    /// Whether any two approval sets are either disjoint or equal.
    pub fn is_party_list(&self) -> bool {
        self.ballots.iter().all(|b1| {
            self.ballots.iter().all(|b2| {
                let common = b1.satisfaction(&b2.approved);
                common == 0 || common == b1.len()
            })
        })
    }

    fn header(&self) -> String {
        let prefix = if self.has_unit_weights() {
            ""
        } else {
            "weighted "
        };
        format!(
            "{}profile with {} votes and {} candidates:",
            prefix,
            self.ballots.len(),
            self.num_cand
        )
    }

    /// A compact rendering where identical approval sets are aggregated.
    pub fn str_compact(&self) -> String {
        let mut compact: Vec<(&[usize], BigRational)> = Vec::new();
        for b in self.ballots.iter() {
            match compact.iter().position(|(a, _)| *a == b.approved()) {
                Some(idx) => compact[idx].1 += &b.weight,
                None => compact.push((b.approved(), b.weight.clone())),
            }
        }
        let mut lines = vec![self.header()];
        let body: Vec<String> = compact
            .iter()
            .map(|(a, w)| format!(" {} x {}", w, str_candset(a, &self.names)))
            .collect();
        lines.push(body.join(",\n"));
        if !self.has_unit_weights() {
            lines.push(format!("total weight: {}", self.total_weight()));
        }
        let mut output = lines.join("\n");
        output.push('\n');
        output
    }
}

impl<'a> IntoIterator for &'a Profile {
    type Item = &'a Ballot;
    type IntoIter = std::slice::Iter<'a, Ballot>;

    fn into_iter(self) -> Self::IntoIter {
        self.ballots.iter()
    }
}

impl Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.header())?;
        let unit = self.has_unit_weights();
        let body: Vec<String> = self
            .ballots
            .iter()
            .map(|b| {
                if unit {
                    format!(" {}", str_candset(&b.approved, &self.names))
                } else {
                    format!(" {} * {}", b.weight, str_candset(&b.approved, &self.names))
                }
            })
            .collect();
        write!(f, "{}", body.join(",\n"))
    }
}

/// Helper for building exact numbers.
pub fn ratio(numer: usize, denom: usize) -> BigRational {
    BigRational::new(BigInt::from(numer), BigInt::from(denom))
}

pub fn integer(n: usize) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

// ******** Errors *********

/// The broad categories of errors, for callers that only need to know
/// whether the request or the data was wrong.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ErrorKind {
    UnknownRule,
    Value,
    NotImplemented,
    Solver,
}

/// Errors that prevent a computation from completing.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum AbcError {
    UnknownRule(String),
    InvalidNumCand(usize),
    InvalidCandidate {
        candidate: usize,
        num_cand: usize,
    },
    InvalidWeight(String),
    MissingNames {
        given: usize,
        num_cand: usize,
    },
    InvalidCommitteeSize {
        committeesize: usize,
        num_cand: usize,
    },
    EmptyProfile,
    /// More seats than candidates approved by some voter.
    TooFewApprovedCandidates {
        committeesize: usize,
        num_approved: usize,
    },
    WeightsNotSupported(RuleId),
    AlgorithmNotSupported {
        rule: RuleId,
        algorithm: Algorithm,
    },
    /// The algorithm exists but this build does not include its backend.
    AlgorithmUnavailable(Algorithm),
    ResoluteNotSupported {
        rule: RuleId,
        resolute: bool,
    },
    NoAvailableAlgorithm(RuleId),
    UnknownAlgorithm(String),
    UnknownScoringFunction(String),
    Solver(String),
}

impl AbcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AbcError::UnknownRule(_) => ErrorKind::UnknownRule,
            AbcError::InvalidNumCand(_)
            | AbcError::InvalidCandidate { .. }
            | AbcError::InvalidWeight(_)
            | AbcError::MissingNames { .. }
            | AbcError::InvalidCommitteeSize { .. }
            | AbcError::EmptyProfile
            | AbcError::TooFewApprovedCandidates { .. }
            | AbcError::WeightsNotSupported(_)
            | AbcError::UnknownScoringFunction(_) => ErrorKind::Value,
            AbcError::AlgorithmNotSupported { .. }
            | AbcError::AlgorithmUnavailable(_)
            | AbcError::ResoluteNotSupported { .. }
            | AbcError::NoAvailableAlgorithm(_)
            | AbcError::UnknownAlgorithm(_) => ErrorKind::NotImplemented,
            AbcError::Solver(_) => ErrorKind::Solver,
        }
    }
}

impl Error for AbcError {}

impl Display for AbcError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbcError::UnknownRule(id) => write!(f, "rule {id} is not known"),
            AbcError::InvalidNumCand(n) => write!(f, "{n} is not a valid number of candidates"),
            AbcError::InvalidCandidate {
                candidate,
                num_cand,
            } => write!(
                f,
                "candidate {candidate} not valid for num_cand = {num_cand}"
            ),
            AbcError::InvalidWeight(w) => write!(f, "weight {w} is not positive"),
            AbcError::MissingNames { given, num_cand } => {
                write!(f, "{given} names given for {num_cand} candidates")
            }
            AbcError::InvalidCommitteeSize {
                committeesize,
                num_cand,
            } => write!(
                f,
                "committee size {committeesize} is not valid for {num_cand} candidates"
            ),
            AbcError::EmptyProfile => write!(f, "the profile contains no voters"),
            AbcError::TooFewApprovedCandidates {
                committeesize,
                num_approved,
            } => write!(
                f,
                "committee size {committeesize} is larger than the {num_approved} approved candidates"
            ),
            AbcError::WeightsNotSupported(rule) => {
                write!(f, "{rule} is only defined for unit weights (weight=1)")
            }
            AbcError::AlgorithmNotSupported { rule, algorithm } => {
                write!(f, "algorithm {algorithm} not specified for {rule}")
            }
            AbcError::AlgorithmUnavailable(algorithm) => {
                write!(f, "algorithm {algorithm} is not available in this build")
            }
            AbcError::ResoluteNotSupported { rule, resolute } => {
                write!(f, "{rule} does not support resolute={resolute}")
            }
            AbcError::NoAvailableAlgorithm(rule) => {
                write!(f, "no supported algorithm available for {rule}")
            }
            AbcError::UnknownAlgorithm(a) => write!(f, "algorithm {a} is not known"),
            AbcError::UnknownScoringFunction(s) => {
                write!(f, "scoring function {s} is not known")
            }
            AbcError::Solver(msg) => write!(f, "solver error: {msg}"),
        }
    }
}

// ********* Configuration **********

/// Options for one computation.
///
/// - `algorithm`: when not set, the fastest algorithm available in this build.
/// - `resolute`: when not set, the default of the rule (resolute when both modes
/// are supported).
/// - `verbosity`: 0 is silent, 1 prints the winning committees, 2 and 3 add
/// details about the search.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ComputeOptions {
    pub algorithm: Option<Algorithm>,
    pub resolute: Option<bool>,
    pub verbosity: u8,
}

impl ComputeOptions {
    pub const DEFAULT: ComputeOptions = ComputeOptions {
        algorithm: None,
        resolute: None,
        verbosity: 0,
    };

    pub fn resolute(self, resolute: bool) -> ComputeOptions {
        ComputeOptions {
            resolute: Some(resolute),
            ..self
        }
    }

    pub fn algorithm(self, algorithm: Algorithm) -> ComputeOptions {
        ComputeOptions {
            algorithm: Some(algorithm),
            ..self
        }
    }

    pub fn verbosity(self, verbosity: u8) -> ComputeOptions {
        ComputeOptions { verbosity, ..self }
    }
}

impl Default for ComputeOptions {
    fn default() -> Self {
        ComputeOptions::DEFAULT
    }
}
