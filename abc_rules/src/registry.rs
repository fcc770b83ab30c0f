// The table of rules and of the algorithms that compute them.

use std::fmt::Display;
use std::str::FromStr;

use crate::config::AbcError;

/// The algorithms that can compute a rule.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Algorithm {
    /// Integer linear program, solved with the `ilp` feature.
    Ilp,
    BranchAndBound,
    BruteForce,
    /// The polynomial procedure that defines the rule.
    Standard,
}

impl Algorithm {
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Ilp,
        Algorithm::BranchAndBound,
        Algorithm::BruteForce,
        Algorithm::Standard,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Algorithm::Ilp => "ilp",
            Algorithm::BranchAndBound => "branch-and-bound",
            Algorithm::BruteForce => "brute-force",
            Algorithm::Standard => "standard",
        }
    }

    /// Whether this build can run the algorithm.
    pub fn is_available(&self) -> bool {
        match self {
            Algorithm::Ilp => cfg!(feature = "ilp"),
            _ => true,
        }
    }
}

impl Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Algorithm {
    type Err = AbcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Algorithm::ALL
            .iter()
            .find(|a| a.id() == s)
            .copied()
            .ok_or_else(|| AbcError::UnknownAlgorithm(s.to_string()))
    }
}

/// How a rule treats the weights of the ballots.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum WeightPolicy {
    Respected,
    /// The rule silently treats all the ballots as having unit weight.
    Ignored,
    /// The rule refuses profiles with non-unit weights.
    UnitOnly,
}

#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum RuleId {
    Av,
    Sav,
    Pav,
    Slav,
    Cc,
    Geom2,
    SeqPav,
    SeqSlav,
    SeqCc,
    RevSeqPav,
    RevSeqCc,
    Mav,
    LexMav,
    Monroe,
    GreedyMonroe,
    SeqPhragmen,
    OptPhragmen,
    RuleX,
    RuleXWithout2ndPhase,
    PhragmenEnestroem,
    Consensus,
}

impl RuleId {
    pub fn descriptor(&self) -> &'static RuleDescriptor {
        // The table is ordered like the enumeration.
        &RULES[*self as usize]
    }

    pub fn id(&self) -> &'static str {
        self.descriptor().id
    }
}

impl Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for RuleId {
    type Err = AbcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RULES
            .iter()
            .find(|r| r.id == s)
            .map(|r| r.rule)
            .ok_or_else(|| AbcError::UnknownRule(s.to_string()))
    }
}

/// Static description of a rule.
#[derive(Eq, PartialEq, Debug)]
pub struct RuleDescriptor {
    pub rule: RuleId,
    pub id: &'static str,
    pub shortname: &'static str,
    pub longname: &'static str,
    /// In order of preference: the first available one is the default.
    pub algorithms: &'static [Algorithm],
    /// The first value is the default.
    pub resolute: &'static [bool],
    pub weights: WeightPolicy,
}

impl RuleDescriptor {
    /// The first supported algorithm that this build can run.
    pub fn fastest_algorithm(&self) -> Option<Algorithm> {
        self.algorithms.iter().copied().find(|a| a.is_available())
    }

    pub fn supports_algorithm(&self, algorithm: Algorithm) -> bool {
        self.algorithms.contains(&algorithm)
    }

    pub fn supports_resolute(&self, resolute: bool) -> bool {
        self.resolute.contains(&resolute)
    }

    pub fn default_resolute(&self) -> bool {
        self.resolute.first().copied().unwrap_or(true)
    }
}

const BOTH: &[bool] = &[true, false];
const STANDARD: &[Algorithm] = &[Algorithm::Standard];
const OPTIMAL_THIELE: &[Algorithm] = &[Algorithm::Ilp, Algorithm::BranchAndBound];
const ILP_OR_BRUTE_FORCE: &[Algorithm] = &[Algorithm::Ilp, Algorithm::BruteForce];

pub static RULES: [RuleDescriptor; 21] = [
    RuleDescriptor {
        rule: RuleId::Av,
        id: "av",
        shortname: "AV",
        longname: "Approval Voting (AV)",
        algorithms: STANDARD,
        resolute: BOTH,
        weights: WeightPolicy::Respected,
    },
    RuleDescriptor {
        rule: RuleId::Sav,
        id: "sav",
        shortname: "SAV",
        longname: "Satisfaction Approval Voting (SAV)",
        algorithms: STANDARD,
        resolute: BOTH,
        weights: WeightPolicy::Respected,
    },
    RuleDescriptor {
        rule: RuleId::Pav,
        id: "pav",
        shortname: "PAV",
        longname: "Proportional Approval Voting (PAV)",
        algorithms: OPTIMAL_THIELE,
        resolute: BOTH,
        weights: WeightPolicy::Respected,
    },
    RuleDescriptor {
        rule: RuleId::Slav,
        id: "slav",
        shortname: "SLAV",
        longname: "Sainte-Laguë Approval Voting (SLAV)",
        algorithms: OPTIMAL_THIELE,
        resolute: BOTH,
        weights: WeightPolicy::Respected,
    },
    RuleDescriptor {
        rule: RuleId::Cc,
        id: "cc",
        shortname: "CC",
        longname: "Approval Chamberlin-Courant (CC)",
        algorithms: OPTIMAL_THIELE,
        resolute: BOTH,
        weights: WeightPolicy::Respected,
    },
    RuleDescriptor {
        rule: RuleId::Geom2,
        id: "geom2",
        shortname: "2-Geometric",
        longname: "2-Geometric Rule",
        algorithms: OPTIMAL_THIELE,
        resolute: BOTH,
        weights: WeightPolicy::Respected,
    },
    RuleDescriptor {
        rule: RuleId::SeqPav,
        id: "seqpav",
        shortname: "seq-PAV",
        longname: "Sequential Proportional Approval Voting (seq-PAV)",
        algorithms: STANDARD,
        resolute: BOTH,
        weights: WeightPolicy::Respected,
    },
    RuleDescriptor {
        rule: RuleId::SeqSlav,
        id: "seqslav",
        shortname: "seq-SLAV",
        longname: "Sequential Sainte-Laguë Approval Voting (seq-SLAV)",
        algorithms: STANDARD,
        resolute: BOTH,
        weights: WeightPolicy::Respected,
    },
    RuleDescriptor {
        rule: RuleId::SeqCc,
        id: "seqcc",
        shortname: "seq-CC",
        longname: "Sequential Approval Chamberlin-Courant (seq-CC)",
        algorithms: STANDARD,
        resolute: BOTH,
        weights: WeightPolicy::Respected,
    },
    RuleDescriptor {
        rule: RuleId::RevSeqPav,
        id: "revseqpav",
        shortname: "revseq-PAV",
        longname: "Reverse Sequential Proportional Approval Voting (revseq-PAV)",
        algorithms: STANDARD,
        resolute: BOTH,
        weights: WeightPolicy::Respected,
    },
    RuleDescriptor {
        rule: RuleId::RevSeqCc,
        id: "revseqcc",
        shortname: "revseq-CC",
        longname: "Reverse Sequential Approval Chamberlin-Courant (revseq-CC)",
        algorithms: STANDARD,
        resolute: BOTH,
        weights: WeightPolicy::Respected,
    },
    RuleDescriptor {
        rule: RuleId::Mav,
        id: "mav",
        shortname: "MAV",
        longname: "Minimax Approval Voting (MAV)",
        algorithms: ILP_OR_BRUTE_FORCE,
        resolute: BOTH,
        weights: WeightPolicy::Ignored,
    },
    RuleDescriptor {
        rule: RuleId::LexMav,
        id: "lexmav",
        shortname: "lex-MAV",
        longname: "Lexicographic Minimax Approval Voting (lex-MAV)",
        algorithms: &[Algorithm::BruteForce],
        resolute: BOTH,
        weights: WeightPolicy::UnitOnly,
    },
    RuleDescriptor {
        rule: RuleId::Monroe,
        id: "monroe",
        shortname: "Monroe",
        longname: "Monroe's Approval Rule (Monroe)",
        algorithms: ILP_OR_BRUTE_FORCE,
        resolute: BOTH,
        weights: WeightPolicy::UnitOnly,
    },
    RuleDescriptor {
        rule: RuleId::GreedyMonroe,
        id: "greedy-monroe",
        shortname: "Greedy Monroe",
        longname: "Greedy Monroe",
        algorithms: STANDARD,
        resolute: &[true],
        weights: WeightPolicy::UnitOnly,
    },
    RuleDescriptor {
        rule: RuleId::SeqPhragmen,
        id: "seqphrag",
        shortname: "seq-Phragmén",
        longname: "Phragmén's Sequential Rule (seq-Phragmén)",
        algorithms: STANDARD,
        resolute: BOTH,
        weights: WeightPolicy::Respected,
    },
    RuleDescriptor {
        rule: RuleId::OptPhragmen,
        id: "optphrag",
        shortname: "opt-Phragmén",
        longname: "Phragmén's Optimization Rule (opt-Phragmén)",
        algorithms: &[Algorithm::Ilp],
        resolute: BOTH,
        weights: WeightPolicy::Respected,
    },
    RuleDescriptor {
        rule: RuleId::RuleX,
        id: "rule-x",
        shortname: "Rule X",
        longname: "Rule X",
        algorithms: STANDARD,
        resolute: BOTH,
        weights: WeightPolicy::UnitOnly,
    },
    RuleDescriptor {
        rule: RuleId::RuleXWithout2ndPhase,
        id: "rule-x-without-2nd-phase",
        shortname: "Rule X without 2nd phase",
        longname: "Rule X without the second (Phragmén) phase",
        algorithms: STANDARD,
        resolute: BOTH,
        weights: WeightPolicy::UnitOnly,
    },
    RuleDescriptor {
        rule: RuleId::PhragmenEnestroem,
        id: "phrag-enestr",
        shortname: "Phragmén-Eneström",
        longname: "Method of Phragmén-Eneström",
        algorithms: STANDARD,
        resolute: BOTH,
        weights: WeightPolicy::UnitOnly,
    },
    RuleDescriptor {
        rule: RuleId::Consensus,
        id: "consensus",
        shortname: "Consensus",
        longname: "Consensus Rule",
        algorithms: STANDARD,
        resolute: BOTH,
        weights: WeightPolicy::Respected,
    },
];

/// Looks up a rule by its identifier.
pub fn rule(id: &str) -> Result<&'static RuleDescriptor, AbcError> {
    id.parse::<RuleId>().map(|r| r.descriptor())
}

pub fn all_rules() -> impl Iterator<Item = &'static RuleDescriptor> {
    RULES.iter()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_enumeration() {
        for (idx, r) in RULES.iter().enumerate() {
            assert_eq!(r.rule as usize, idx);
            assert_eq!(r.id.parse::<RuleId>(), Ok(r.rule));
            assert!(!r.algorithms.is_empty());
            assert!(!r.resolute.is_empty());
        }
    }

    #[test]
    fn unknown_rule() {
        assert_eq!(
            "pav2".parse::<RuleId>(),
            Err(AbcError::UnknownRule("pav2".to_string()))
        );
    }

    #[test]
    fn algorithm_ids() {
        for a in Algorithm::ALL {
            assert_eq!(a.id().parse::<Algorithm>(), Ok(a));
        }
        assert!("gurobi".parse::<Algorithm>().is_err());
    }

    #[test]
    fn fastest_algorithm_falls_back() {
        let pav = RuleId::Pav.descriptor();
        if cfg!(feature = "ilp") {
            assert_eq!(pav.fastest_algorithm(), Some(Algorithm::Ilp));
        } else {
            assert_eq!(pav.fastest_algorithm(), Some(Algorithm::BranchAndBound));
            assert_eq!(RuleId::OptPhragmen.descriptor().fastest_algorithm(), None);
        }
        assert_eq!(
            RuleId::SeqPhragmen.descriptor().fastest_algorithm(),
            Some(Algorithm::Standard)
        );
    }

    #[test]
    fn resolute_defaults() {
        assert!(RuleId::Pav.descriptor().default_resolute());
        assert!(!RuleId::GreedyMonroe.descriptor().supports_resolute(false));
    }

    #[test]
    fn lookup() {
        let pav = rule("pav").unwrap();
        assert_eq!(pav.rule, RuleId::Pav);
        assert_eq!(pav.shortname, "PAV");
        assert_eq!(rule("nope").map(|r| r.rule), Err(AbcError::UnknownRule("nope".to_string())));
        assert_eq!(all_rules().count(), 21);
        assert!(all_rules().any(|r| r.id == "rule-x-without-2nd-phase"));
    }
}
