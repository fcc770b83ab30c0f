mod config;
use log::debug;

pub mod budget;
pub mod builder;
pub mod committee;
pub mod diagnostics;
#[cfg(feature = "ilp")]
pub mod ilp;
pub mod minimax;
pub mod monroe;
pub mod phragmen;
pub mod registry;
pub mod scores;
pub mod thiele;

pub use crate::builder::ProfileBuilder;
pub use crate::config::*;
pub use crate::diagnostics::{Diagnostics, Severity};
pub use crate::registry::{Algorithm, RuleDescriptor, RuleId, WeightPolicy, RULES};
pub use crate::scores::ScoringFunction;
pub use num_rational::BigRational;

use crate::committee::{canonical, str_committees};
use crate::thiele::SeparableRule;

/// Computes the winning committees of a rule, given by its identifier.
///
/// Arguments:
/// * `rule_id` the identifier of the rule, for example `"pav"` or `"seqphrag"`
/// * `profile` the approval ballots
/// * `committeesize` the number of candidates to elect
/// * `options` the algorithm, the resolute mode and the verbosity
///
/// Resolute computations return one committee, irresolute computations all the
/// winning committees, sorted and without duplicates.
///
/// ```
/// use abc_rules::{compute, ComputeOptions, Profile};
/// # use abc_rules::AbcError;
///
/// let mut profile = Profile::new(4)?;
/// profile.add_approval_sets(&[vec![0, 1], vec![0, 1], vec![2], vec![3]])?;
///
/// let committees = compute("seqpav", &profile, 2, &ComputeOptions::DEFAULT)?;
/// assert_eq!(committees, vec![vec![0, 1]]);
///
/// # Ok::<(), AbcError>(())
/// ```
pub fn compute(
    rule_id: &str,
    profile: &Profile,
    committeesize: usize,
    options: &ComputeOptions,
) -> Result<Vec<Committee>, AbcError> {
    let rule: RuleId = rule_id.parse()?;
    compute_rule(rule, profile, committeesize, options)
}

pub fn compute_rule(
    rule: RuleId,
    profile: &Profile,
    committeesize: usize,
    options: &ComputeOptions,
) -> Result<Vec<Committee>, AbcError> {
    let diag = Diagnostics::new(options.verbosity);
    compute_with(rule, profile, committeesize, options, &diag)
}

/// Same as [compute_rule], with the diagnostics sent to the given sink.
/// The verbosity of the options is ignored: the sink has its own.
pub fn compute_with(
    rule: RuleId,
    profile: &Profile,
    committeesize: usize,
    options: &ComputeOptions,
    diag: &Diagnostics,
) -> Result<Vec<Committee>, AbcError> {
    rule.descriptor()
        .compute(profile, committeesize, options.algorithm, options.resolute, diag)
}

impl RuleDescriptor {
    /// Checks the request and runs the rule.
    pub fn compute(
        &self,
        profile: &Profile,
        committeesize: usize,
        algorithm: Option<Algorithm>,
        resolute: Option<bool>,
        diag: &Diagnostics,
    ) -> Result<Vec<Committee>, AbcError> {
        let (algorithm, resolute) = self.validate(profile, committeesize, algorithm, resolute)?;
        debug!(
            "compute: rule {} algorithm {} resolute {} committeesize {}",
            self.id, algorithm, resolute, committeesize
        );

        diag.info(format_args!(
            "{}\n{}\n{}",
            HEADER_LINE, self.longname, HEADER_LINE
        ));
        if resolute {
            diag.info(format_args!("Computing only one winning committee (resolute=True)\n"));
        }
        diag.debug(format_args!("Algorithm: {}\n", algorithm));
        diag.debug2(format_args!("{}", profile.str_compact()));

        // The empty committee is the only one of size 0.
        let committees = if committeesize == 0 {
            vec![Committee::new()]
        } else {
            canonical(run_rule(
                self.rule,
                profile,
                committeesize,
                algorithm,
                resolute,
                diag,
            )?)
        };

        let label = if committees.len() == 1 {
            "winning committee"
        } else {
            "winning committees"
        };
        diag.info(format_args!(
            "{}:\n{}",
            label,
            str_committees(&committees, profile.names())
        ));
        Ok(committees)
    }

    fn validate(
        &self,
        profile: &Profile,
        committeesize: usize,
        algorithm: Option<Algorithm>,
        resolute: Option<bool>,
    ) -> Result<(Algorithm, bool), AbcError> {
        if committeesize > profile.num_cand() {
            return Err(AbcError::InvalidCommitteeSize {
                committeesize,
                num_cand: profile.num_cand(),
            });
        }
        if profile.is_empty() {
            return Err(AbcError::EmptyProfile);
        }
        let num_approved = (0..profile.num_cand())
            .filter(|c| profile.iter().any(|b| b.approves(*c)))
            .count();
        if committeesize > num_approved {
            return Err(AbcError::TooFewApprovedCandidates {
                committeesize,
                num_approved,
            });
        }
        if self.weights == WeightPolicy::UnitOnly && !profile.has_unit_weights() {
            return Err(AbcError::WeightsNotSupported(self.rule));
        }
        let algorithm = match algorithm {
            Some(a) if !self.supports_algorithm(a) => {
                return Err(AbcError::AlgorithmNotSupported {
                    rule: self.rule,
                    algorithm: a,
                })
            }
            Some(a) if !a.is_available() => return Err(AbcError::AlgorithmUnavailable(a)),
            Some(a) => a,
            None => self
                .fastest_algorithm()
                .ok_or(AbcError::NoAvailableAlgorithm(self.rule))?,
        };
        let resolute = resolute.unwrap_or_else(|| self.default_resolute());
        if !self.supports_resolute(resolute) {
            return Err(AbcError::ResoluteNotSupported {
                rule: self.rule,
                resolute,
            });
        }
        Ok((algorithm, resolute))
    }
}

const HEADER_LINE: &str =
    "##############################################################";

fn thiele_scorefct(rule: RuleId) -> ScoringFunction {
    match rule {
        RuleId::Av => ScoringFunction::Av,
        RuleId::Pav | RuleId::SeqPav | RuleId::RevSeqPav => ScoringFunction::Pav,
        RuleId::Slav | RuleId::SeqSlav => ScoringFunction::Slav,
        RuleId::Cc | RuleId::SeqCc | RuleId::RevSeqCc => ScoringFunction::Cc,
        _ => ScoringFunction::Geom(2),
    }
}

// The request has been validated: the algorithm is supported by the rule and
// available in this build.
fn run_rule(
    rule: RuleId,
    profile: &Profile,
    committeesize: usize,
    algorithm: Algorithm,
    resolute: bool,
    diag: &Diagnostics,
) -> Result<Vec<Committee>, AbcError> {
    use Algorithm::*;
    use RuleId::*;
    let res = match (rule, algorithm) {
        (Av, _) => thiele::compute_separable_rule(
            SeparableRule::Av,
            profile,
            committeesize,
            resolute,
            diag,
        ),
        (Sav, _) => thiele::compute_separable_rule(
            SeparableRule::Sav,
            profile,
            committeesize,
            resolute,
            diag,
        ),
        (Pav | Slav | Cc | Geom2, BranchAndBound) => thiele::compute_thiele_branch_and_bound(
            thiele_scorefct(rule),
            profile,
            committeesize,
            resolute,
            diag,
        ),
        (SeqPav | SeqSlav | SeqCc, _) => thiele::compute_seq_thiele_method(
            thiele_scorefct(rule),
            profile,
            committeesize,
            resolute,
            diag,
        ),
        (RevSeqPav | RevSeqCc, _) => thiele::compute_revseq_thiele_method(
            thiele_scorefct(rule),
            profile,
            committeesize,
            resolute,
            diag,
        ),
        (Mav, BruteForce) => {
            minimax::compute_mav_brute_force(profile, committeesize, resolute, diag)
        }
        (LexMav, _) => {
            minimax::compute_lexmav_brute_force(profile, committeesize, resolute, diag)
        }
        (Monroe, BruteForce) => {
            monroe::compute_monroe_brute_force(profile, committeesize, resolute, diag)
        }
        (GreedyMonroe, _) => monroe::compute_greedy_monroe(profile, committeesize, diag),
        (SeqPhragmen, _) => phragmen::compute_seqphragmen(profile, committeesize, resolute, diag),
        (RuleX, _) => budget::compute_rule_x(profile, committeesize, resolute, false, diag),
        (RuleXWithout2ndPhase, _) => {
            budget::compute_rule_x(profile, committeesize, resolute, true, diag)
        }
        (PhragmenEnestroem, _) => {
            phragmen::compute_phragmen_enestroem(profile, committeesize, resolute, diag)
        }
        (Consensus, _) => {
            budget::compute_consensus_rule(profile, committeesize, resolute, diag)
        }
        (_, Ilp) => return run_ilp(rule, profile, committeesize, resolute, diag),
        _ => return Err(AbcError::AlgorithmNotSupported { rule, algorithm }),
    };
    Ok(res)
}

#[cfg(feature = "ilp")]
fn run_ilp(
    rule: RuleId,
    profile: &Profile,
    committeesize: usize,
    resolute: bool,
    diag: &Diagnostics,
) -> Result<Vec<Committee>, AbcError> {
    match rule {
        RuleId::Pav | RuleId::Slav | RuleId::Cc | RuleId::Geom2 => ilp::compute_thiele_method_ilp(
            thiele_scorefct(rule),
            profile,
            committeesize,
            resolute,
            diag,
        ),
        RuleId::Mav => ilp::compute_minimaxav_ilp(profile, committeesize, resolute, diag),
        RuleId::Monroe => ilp::compute_monroe_ilp(profile, committeesize, resolute, diag),
        RuleId::OptPhragmen => {
            ilp::compute_optphragmen_ilp(profile, committeesize, resolute, diag)
        }
        _ => Err(AbcError::AlgorithmNotSupported {
            rule,
            algorithm: Algorithm::Ilp,
        }),
    }
}

#[cfg(not(feature = "ilp"))]
fn run_ilp(
    _rule: RuleId,
    _profile: &Profile,
    _committeesize: usize,
    _resolute: bool,
    _diag: &Diagnostics,
) -> Result<Vec<Committee>, AbcError> {
    Err(AbcError::AlgorithmUnavailable(Algorithm::Ilp))
}
