use abc_rules::*;
use num_bigint::BigInt;
use num_rational::BigRational;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn profile(num_cand: usize, sets: &[&[usize]]) -> Profile {
    let mut p = Profile::new(num_cand).unwrap();
    let sets: Vec<Vec<usize>> = sets.iter().map(|s| s.to_vec()).collect();
    p.add_approval_sets(&sets).unwrap();
    p
}

fn committees(c: &[&[usize]]) -> Vec<Committee> {
    c.iter().map(|x| x.to_vec()).collect()
}

fn weight(w: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(w))
}

/// All the (rule, algorithm, resolute) combinations that this build supports.
fn rule_alg_resolute() -> Vec<(RuleId, Algorithm, bool)> {
    let mut res = Vec::new();
    for rule in RULES.iter() {
        for algorithm in rule.algorithms.iter().filter(|a| a.is_available()) {
            for resolute in rule.resolute.iter() {
                res.push((rule.rule, *algorithm, *resolute));
            }
        }
    }
    res
}

fn run(
    rule: RuleId,
    profile: &Profile,
    committeesize: usize,
    algorithm: Algorithm,
    resolute: bool,
    verbosity: u8,
) -> Result<Vec<Committee>, AbcError> {
    let options = ComputeOptions::DEFAULT
        .algorithm(algorithm)
        .resolute(resolute)
        .verbosity(verbosity);
    compute_rule(rule, profile, committeesize, &options)
}

struct Instance {
    profile: Profile,
    committeesize: usize,
    expected: Vec<(&'static str, Vec<Committee>)>,
}

impl Instance {
    fn expected(&self, rule: RuleId) -> &Vec<Committee> {
        &self
            .expected
            .iter()
            .find(|(id, _)| *id == rule.id())
            .unwrap_or_else(|| panic!("no expected result for {}", rule))
            .1
    }
}

fn first_instance_expected() -> Vec<(&'static str, Vec<Committee>)> {
    let seqpav_like = committees(&[
        &[0, 1, 4, 5],
        &[0, 2, 4, 5],
        &[0, 3, 4, 5],
        &[1, 2, 4, 5],
        &[1, 3, 4, 5],
        &[2, 3, 4, 5],
    ]);
    let all_but_0123 = committees(&[
        &[0, 1, 2, 4],
        &[0, 1, 2, 5],
        &[0, 1, 3, 4],
        &[0, 1, 3, 5],
        &[0, 1, 4, 5],
        &[0, 2, 3, 4],
        &[0, 2, 3, 5],
        &[0, 2, 4, 5],
        &[0, 3, 4, 5],
        &[1, 2, 3, 4],
        &[1, 2, 3, 5],
        &[1, 2, 4, 5],
        &[1, 3, 4, 5],
        &[2, 3, 4, 5],
    ]);
    let all: Vec<Committee> = committee::combinations(6, 4).collect();
    vec![
        ("seqpav", seqpav_like.clone()),
        ("av", seqpav_like.clone()),
        ("sav", all.clone()),
        ("pav", seqpav_like.clone()),
        ("geom2", all_but_0123.clone()),
        ("revseqpav", all_but_0123.clone()),
        ("mav", all),
        ("lexmav", seqpav_like.clone()),
        ("seqphrag", seqpav_like.clone()),
        ("optphrag", committees(&[&[0, 1, 2, 3]])),
        ("cc", committees(&[&[0, 1, 2, 3]])),
        (
            "seqcc",
            committees(&[
                &[0, 1, 2, 4],
                &[0, 1, 2, 5],
                &[0, 1, 3, 4],
                &[0, 1, 3, 5],
                &[0, 2, 3, 4],
                &[0, 2, 3, 5],
                &[1, 2, 3, 4],
                &[1, 2, 3, 5],
            ]),
        ),
        ("revseqcc", committees(&[&[0, 1, 2, 3]])),
        ("monroe", committees(&[&[0, 1, 2, 3]])),
        ("greedy-monroe", committees(&[&[0, 2, 3, 4]])),
        (
            "slav",
            committees(&[
                &[0, 1, 2, 3],
                &[0, 1, 2, 4],
                &[0, 1, 2, 5],
                &[0, 1, 3, 4],
                &[0, 1, 3, 5],
                &[0, 2, 3, 4],
                &[0, 2, 3, 5],
                &[1, 2, 3, 4],
                &[1, 2, 3, 5],
            ]),
        ),
        ("seqslav", all_but_0123.clone()),
        ("rule-x", seqpav_like.clone()),
        ("rule-x-without-2nd-phase", committees(&[&[4, 5]])),
        ("phrag-enestr", seqpav_like),
        ("consensus", all_but_0123),
    ]
}

fn instances() -> Vec<Instance> {
    let mut res = Vec::new();

    let preflist: Vec<Vec<usize>> = vec![
        vec![0, 4, 5],
        vec![0],
        vec![1, 4, 5],
        vec![1],
        vec![2, 4, 5],
        vec![2],
        vec![3, 4, 5],
        vec![3],
    ];
    let mut p = Profile::new(6).unwrap();
    p.add_approval_sets(&preflist).unwrap();
    res.push(Instance {
        profile: p,
        committeesize: 4,
        expected: first_instance_expected(),
    });

    // Same profile with the voters in reverse order: only Greedy Monroe changes.
    let reversed: Vec<Vec<usize>> = preflist.into_iter().rev().collect();
    let mut p = Profile::new(6).unwrap();
    p.add_approval_sets(&reversed).unwrap();
    let mut expected = first_instance_expected();
    for (id, e) in expected.iter_mut() {
        if *id == "greedy-monroe" {
            *e = committees(&[&[0, 1, 2, 4]]);
        }
    }
    res.push(Instance {
        profile: p,
        committeesize: 4,
        expected,
    });

    let p = profile(
        5,
        &[
            &[0, 1, 2],
            &[0, 1, 2],
            &[0, 1, 2],
            &[0, 1, 2],
            &[0, 1, 2],
            &[0, 1],
            &[3, 4],
            &[3, 4],
            &[3],
        ],
    );
    let cc_like = committees(&[&[0, 1, 3], &[0, 2, 3], &[0, 3, 4], &[1, 2, 3], &[1, 3, 4]]);
    let mav_like = committees(&[&[0, 1, 3], &[0, 2, 3], &[1, 2, 3]]);
    let single = committees(&[&[0, 1, 3]]);
    res.push(Instance {
        profile: p,
        committeesize: 3,
        expected: vec![
            ("seqpav", single.clone()),
            ("av", committees(&[&[0, 1, 2]])),
            ("sav", single.clone()),
            ("pav", single.clone()),
            ("geom2", single.clone()),
            ("revseqpav", single.clone()),
            ("mav", mav_like.clone()),
            ("lexmav", single.clone()),
            ("seqphrag", single.clone()),
            ("optphrag", mav_like.clone()),
            ("cc", cc_like.clone()),
            ("seqcc", cc_like.clone()),
            ("revseqcc", cc_like),
            ("monroe", mav_like),
            ("greedy-monroe", single.clone()),
            ("seqslav", single.clone()),
            ("slav", single.clone()),
            ("rule-x", single.clone()),
            ("rule-x-without-2nd-phase", single.clone()),
            ("phrag-enestr", single.clone()),
            ("consensus", single),
        ],
    });

    let p = profile(
        6,
        &[
            &[0, 3, 4, 5],
            &[1, 2],
            &[0, 2, 5],
            &[2],
            &[0, 1, 2, 3, 4],
            &[0, 3, 4],
            &[0, 2, 4],
            &[0, 1],
        ],
    );
    let single = committees(&[&[0, 1, 2, 4]]);
    let nine = committees(&[
        &[0, 1, 2, 3],
        &[0, 1, 2, 4],
        &[0, 1, 2, 5],
        &[0, 2, 3, 4],
        &[0, 2, 3, 5],
        &[0, 2, 4, 5],
        &[1, 2, 3, 4],
        &[1, 2, 3, 5],
        &[1, 2, 4, 5],
    ]);
    res.push(Instance {
        profile: p,
        committeesize: 4,
        expected: vec![
            ("seqpav", single.clone()),
            ("av", committees(&[&[0, 1, 2, 4], &[0, 2, 3, 4]])),
            ("sav", single.clone()),
            ("pav", single.clone()),
            ("geom2", single.clone()),
            ("revseqpav", single.clone()),
            (
                "mav",
                committees(&[
                    &[0, 1, 2, 3],
                    &[0, 1, 2, 4],
                    &[0, 2, 3, 4],
                    &[0, 2, 3, 5],
                    &[0, 2, 4, 5],
                ]),
            ),
            ("lexmav", single.clone()),
            ("seqphrag", single.clone()),
            ("optphrag", nine.clone()),
            ("cc", nine.clone()),
            (
                "seqcc",
                committees(&[
                    &[0, 1, 2, 3],
                    &[0, 1, 2, 4],
                    &[0, 1, 2, 5],
                    &[0, 2, 3, 4],
                    &[0, 2, 3, 5],
                    &[0, 2, 4, 5],
                ]),
            ),
            ("revseqcc", nine.clone()),
            ("monroe", nine),
            ("greedy-monroe", single.clone()),
            ("seqslav", single.clone()),
            ("slav", single.clone()),
            ("rule-x", single.clone()),
            ("rule-x-without-2nd-phase", committees(&[&[0, 2]])),
            ("phrag-enestr", single.clone()),
            ("consensus", single),
        ],
    });

    let p = profile(4, &[&[0, 1, 3], &[0, 1], &[0, 1], &[0, 3], &[2, 3]]);
    let single = committees(&[&[0, 3]]);
    let two = committees(&[&[0, 3], &[1, 3]]);
    let three = committees(&[&[0, 2], &[0, 3], &[1, 3]]);
    res.push(Instance {
        profile: p,
        committeesize: 2,
        expected: vec![
            ("seqpav", single.clone()),
            ("av", committees(&[&[0, 1], &[0, 3]])),
            ("sav", committees(&[&[0, 1], &[0, 3]])),
            ("pav", single.clone()),
            ("geom2", single.clone()),
            ("revseqpav", single.clone()),
            ("mav", two.clone()),
            ("lexmav", single.clone()),
            ("seqphrag", single.clone()),
            ("optphrag", two.clone()),
            ("cc", three.clone()),
            ("seqcc", committees(&[&[0, 2], &[0, 3]])),
            ("revseqcc", three),
            ("monroe", two),
            ("greedy-monroe", single.clone()),
            ("seqslav", single.clone()),
            ("slav", single.clone()),
            ("rule-x", single.clone()),
            ("rule-x-without-2nd-phase", committees(&[&[0]])),
            ("phrag-enestr", single.clone()),
            ("consensus", single),
        ],
    });
    res
}

#[test]
fn abcrules_correct() {
    init();
    for (idx, instance) in instances().iter().enumerate() {
        for (rule, algorithm, resolute) in rule_alg_resolute() {
            let expected = instance.expected(rule);
            let res = run(
                rule,
                &instance.profile,
                instance.committeesize,
                algorithm,
                resolute,
                0,
            )
            .unwrap();
            if resolute {
                assert_eq!(res.len(), 1, "instance {idx} {rule}/{algorithm}");
                assert!(
                    expected.contains(&res[0]),
                    "instance {idx} {rule}/{algorithm}: {:?} not in {:?}",
                    res,
                    expected
                );
            } else {
                assert_eq!(&res, expected, "instance {idx} {rule}/{algorithm}");
            }
        }
    }
}

#[test]
fn resolute_parameter() {
    init();
    let p = profile(5, &[&[0, 1, 2], &[1], &[1, 2], &[0]]);
    for rule in RULES.iter() {
        assert!(rule.resolute.len() == 1 || rule.resolute.len() == 2);
        if rule.resolute.len() == 2 {
            assert!(rule.resolute[0]);
        }
        for algorithm in rule.algorithms.iter().filter(|a| a.is_available()) {
            for resolute in [false, true] {
                if rule.resolute.contains(&resolute) {
                    continue;
                }
                let err = run(rule.rule, &p, 1, *algorithm, resolute, 0).unwrap_err();
                assert_eq!(err.kind(), ErrorKind::NotImplemented);
            }
        }
    }
}

#[test]
fn too_few_candidates() {
    init();
    let p = profile(5, &[&[0, 1, 2], &[1], &[1, 2], &[0]]);
    for verbosity in 0..3 {
        for (rule, algorithm, resolute) in rule_alg_resolute() {
            let err = run(rule, &p, 4, algorithm, resolute, verbosity).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Value, "{rule}/{algorithm}");
            assert_eq!(
                err,
                AbcError::TooFewApprovedCandidates {
                    committeesize: 4,
                    num_approved: 3
                }
            );
            let err = run(rule, &p, 6, algorithm, resolute, verbosity).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Value, "{rule}/{algorithm}");
        }
    }
}

#[test]
fn wrong_rule_id() {
    let p = profile(3, &[&[0]]);
    let err = compute("a_rule_that_does_not_exist", &p, 3, &ComputeOptions::DEFAULT).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnknownRule);
}

#[test]
fn weights_considered() {
    init();
    let mut p = Profile::new(3).unwrap();
    p.add_ballot(Ballot::new(&[0])).unwrap();
    p.add_ballot(Ballot::new(&[0])).unwrap();
    p.add_ballot(Ballot::with_weight(&[1], weight(5)).unwrap())
        .unwrap();
    p.add_ballot(Ballot::new(&[0])).unwrap();

    for (rule, algorithm, resolute) in rule_alg_resolute() {
        let res = run(rule, &p, 1, algorithm, resolute, 0);
        match rule.descriptor().weights {
            WeightPolicy::UnitOnly => {
                assert_eq!(res, Err(AbcError::WeightsNotSupported(rule)));
            }
            WeightPolicy::Ignored => {
                let res = res.unwrap();
                if resolute {
                    assert_eq!(res.len(), 1);
                    assert!(res[0].len() == 1 && res[0][0] < 3);
                } else {
                    assert_eq!(res, committees(&[&[0], &[1], &[2]]));
                }
            }
            WeightPolicy::Respected => {
                assert_eq!(res.unwrap(), committees(&[&[1]]), "{rule}/{algorithm}");
            }
        }
    }
    // Brute force is deterministic.
    let res = run(RuleId::Mav, &p, 1, Algorithm::BruteForce, true, 0).unwrap();
    assert_eq!(res, committees(&[&[0]]));
}

#[test]
fn correct_simple() {
    init();
    let p = profile(4, &[&[0], &[1], &[2], &[3]]);
    for (rule, algorithm, resolute) in rule_alg_resolute() {
        let res = run(rule, &p, 2, algorithm, resolute, 0).unwrap();
        if rule == RuleId::RuleXWithout2ndPhase {
            assert_eq!(res, vec![Vec::<usize>::new()]);
        } else if resolute {
            assert_eq!(res.len(), 1, "{rule}/{algorithm}");
        } else {
            assert_eq!(res.len(), 6, "{rule}/{algorithm}");
        }
    }
}

#[test]
fn monroe_indivisible() {
    init();
    let p = profile(4, &[&[0], &[0], &[0], &[1, 2], &[1, 2], &[1], &[3]]);
    for algorithm in RuleId::Monroe
        .descriptor()
        .algorithms
        .iter()
        .filter(|a| a.is_available())
    {
        let res = run(RuleId::Monroe, &p, 3, *algorithm, false, 0).unwrap();
        assert_eq!(res, committees(&[&[0, 1, 2], &[0, 1, 3], &[0, 2, 3]]));
    }
}

#[cfg(feature = "ilp")]
#[test]
fn optphragmen_no_tiebreaking() {
    init();
    let p = profile(
        6,
        &[&[0], &[0], &[1, 3], &[1, 3], &[1, 4], &[2, 4], &[2, 5], &[2, 5]],
    );
    let res = run(RuleId::OptPhragmen, &p, 3, Algorithm::Ilp, false, 0).unwrap();
    assert_eq!(res.len(), 12);
}

#[test]
fn seqphragmen_irresolute() {
    let p = profile(3, &[&[0, 1], &[0, 1], &[0], &[1, 2], &[2]]);
    let options = ComputeOptions::DEFAULT.resolute(false);
    let res = compute("seqphrag", &p, 2, &options).unwrap();
    assert_eq!(res, committees(&[&[0, 1], &[0, 2]]));
    let res = compute("seqphrag", &p, 2, &options.resolute(true)).unwrap();
    assert_eq!(res, committees(&[&[0, 2]]));
}

#[test]
fn seqpav_irresolute() {
    let p = profile(
        3,
        &[&[0, 1], &[0, 1], &[0, 1], &[0], &[1, 2], &[2], &[2]],
    );
    let options = ComputeOptions::DEFAULT.resolute(false);
    let res = compute("seqpav", &p, 2, &options).unwrap();
    assert_eq!(res, committees(&[&[0, 1], &[0, 2], &[1, 2]]));
    let res = compute("seqpav", &p, 2, &options.resolute(true)).unwrap();
    assert_eq!(res, committees(&[&[0, 2]]));
}

#[test]
fn consensus_fails_lower_quota() {
    let mut sets: Vec<Vec<usize>> = vec![vec![0]];
    sets.extend(std::iter::repeat(vec![1, 2]).take(3));
    sets.extend(std::iter::repeat(vec![3, 4, 5]).take(5));
    sets.extend(std::iter::repeat((6..16).collect()).take(18));
    sets.extend(
        std::iter::repeat(vec![
            16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 29, 30,
        ])
        .take(27),
    );
    let mut p = Profile::new(31).unwrap();
    p.add_approval_sets(&sets).unwrap();
    let res = compute("consensus", &p, 30, &ComputeOptions::DEFAULT).unwrap();
    for committee in res {
        assert!(!(16..31).all(|c| committee.contains(&c)));
    }
}

fn janson_sets() -> Vec<(Vec<usize>, usize)> {
    let (a, b, c, p, q, r) = (0, 1, 2, 3, 4, 5);
    vec![
        (vec![a, b, c], 1034),
        (vec![p, q, r], 519),
        (vec![a, b, q], 90),
        (vec![a, p, q], 90),
    ]
}

#[test]
fn janson_examples() {
    init();
    // Example 3.7 and 18.1 of Janson's survey of Phragmén's and Thiele's methods.
    let mut p = Profile::new(6).unwrap();
    for (set, count) in janson_sets() {
        for _ in 0..count {
            p.add_ballot(Ballot::new(&set)).unwrap();
        }
    }
    for (rule, algorithm) in [
        (RuleId::Pav, Algorithm::BranchAndBound),
        (RuleId::SeqPav, Algorithm::Standard),
        (RuleId::RevSeqPav, Algorithm::Standard),
        (RuleId::SeqPhragmen, Algorithm::Standard),
    ] {
        let res = run(rule, &p, 3, algorithm, false, 0).unwrap();
        assert_eq!(res, committees(&[&[0, 1, 4]]), "{rule}");
    }
}

#[test]
fn janson_examples_weighted() {
    init();
    // The same electorate, with identical ballots merged into weighted ones.
    let mut p = Profile::new(6).unwrap();
    for (set, count) in janson_sets() {
        p.add_ballot(Ballot::with_weight(&set, weight(count as i64)).unwrap())
            .unwrap();
    }
    for (rule, algorithm) in [
        (RuleId::Pav, Algorithm::Ilp),
        (RuleId::Pav, Algorithm::BranchAndBound),
        (RuleId::SeqPav, Algorithm::Standard),
        (RuleId::RevSeqPav, Algorithm::Standard),
        (RuleId::SeqPhragmen, Algorithm::Standard),
    ] {
        if !algorithm.is_available() {
            continue;
        }
        let res = run(rule, &p, 3, algorithm, false, 0).unwrap();
        assert_eq!(res, committees(&[&[0, 1, 4]]), "{rule}/{algorithm}");
    }
}

#[test]
fn tiebreaking_order() {
    init();
    let p = profile(4, &[&[1], &[1], &[0], &[0], &[2], &[2]]);
    for verbosity in 0..4 {
        for (rule, algorithm, resolute) in rule_alg_resolute() {
            if !resolute {
                continue;
            }
            let res = run(rule, &p, 1, algorithm, true, verbosity).unwrap();
            if rule == RuleId::RuleXWithout2ndPhase {
                assert_eq!(res, vec![Vec::<usize>::new()]);
            } else if algorithm == Algorithm::Ilp {
                // The solver picks one of the optimal committees.
                assert_eq!(res.len(), 1);
                assert!(res[0].len() == 1 && res[0][0] < 3, "{rule}");
            } else {
                assert_eq!(res, committees(&[&[0]]), "{rule}/{algorithm}");
            }
        }
    }
}

#[test]
fn unspecified_algorithms() {
    let p = profile(3, &[&[0, 1], &[1, 2]]);
    for rule in RULES.iter() {
        let err = "made-up-algorithm".parse::<Algorithm>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotImplemented);
        // An algorithm that exists but that the rule does not know.
        let other = Algorithm::ALL
            .iter()
            .find(|a| !rule.supports_algorithm(**a))
            .copied();
        if let Some(algorithm) = other {
            for resolute in rule.resolute.iter() {
                let err = run(rule.rule, &p, 2, algorithm, *resolute, 0).unwrap_err();
                assert_eq!(
                    err,
                    AbcError::AlgorithmNotSupported {
                        rule: rule.rule,
                        algorithm
                    }
                );
            }
        }
    }
}

#[test]
fn fastest_algorithms() {
    let p = profile(4, &[&[0, 1], &[1, 2], &[0, 2, 3]]);
    for rule in RULES.iter() {
        let Some(algorithm) = rule.fastest_algorithm() else {
            let err = compute(rule.id, &p, 2, &ComputeOptions::DEFAULT).unwrap_err();
            assert_eq!(err, AbcError::NoAvailableAlgorithm(rule.rule));
            continue;
        };
        for resolute in rule.resolute.iter() {
            let options = ComputeOptions::DEFAULT.resolute(*resolute);
            let res = compute(rule.id, &p, 2, &options).unwrap();
            assert!(!res.is_empty());
            let explicit = run(rule.rule, &p, 2, algorithm, *resolute, 0).unwrap();
            if algorithm != Algorithm::Ilp || !*resolute {
                assert_eq!(res, explicit);
            }
        }
    }
}

#[test]
fn output() {
    init();
    let p = profile(2, &[&[0]]);
    for verbosity in 0..4 {
        for (rule, algorithm, resolute) in rule_alg_resolute() {
            let diag = Diagnostics::capturing(verbosity);
            let options = ComputeOptions::DEFAULT
                .algorithm(algorithm)
                .resolute(resolute);
            compute_with(rule, &p, 1, &options, &diag).unwrap();
            if verbosity == 0 {
                assert!(diag.messages().is_empty());
            } else {
                let out = diag.output();
                assert!(!out.is_empty());
                assert!(out.contains(rule.descriptor().longname));
            }
        }
    }
}

#[test]
fn resolute_is_among_irresolute() {
    init();
    let p = profile(5, &[&[0, 1], &[1, 2], &[2, 3], &[3, 4], &[0, 4], &[1, 3]]);
    for (rule, algorithm, resolute) in rule_alg_resolute() {
        if !resolute || !rule.descriptor().supports_resolute(false) {
            continue;
        }
        let one = run(rule, &p, 2, algorithm, true, 0).unwrap();
        let all = run(rule, &p, 2, algorithm, false, 0).unwrap();
        assert_eq!(one.len(), 1);
        assert!(all.contains(&one[0]), "{rule}/{algorithm}");
    }
}

#[test]
fn greedy_monroe_depends_on_ballot_order() {
    let sets: Vec<Vec<usize>> = vec![
        vec![0, 4, 5],
        vec![0],
        vec![1, 4, 5],
        vec![1],
        vec![2, 4, 5],
        vec![2],
        vec![3, 4, 5],
        vec![3],
    ];
    let mut forward = Profile::new(6).unwrap();
    forward.add_approval_sets(&sets).unwrap();
    let mut backward = Profile::new(6).unwrap();
    let reversed: Vec<Vec<usize>> = sets.into_iter().rev().collect();
    backward.add_approval_sets(&reversed).unwrap();

    let res_f = compute("greedy-monroe", &forward, 4, &ComputeOptions::DEFAULT).unwrap();
    let res_b = compute("greedy-monroe", &backward, 4, &ComputeOptions::DEFAULT).unwrap();
    assert_ne!(res_f, res_b);

    // Rules that do not look at the order of the ballots are unaffected.
    let options = ComputeOptions::DEFAULT.resolute(false);
    for rule in ["pav", "monroe", "cc", "mav"] {
        assert_eq!(
            compute(rule, &forward, 4, &options).unwrap(),
            compute(rule, &backward, 4, &options).unwrap(),
            "{rule}"
        );
    }
}
