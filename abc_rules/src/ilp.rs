// Integer linear programs for the rules that are defined as optimization problems.
//
// Every program has one binary membership variable per candidate. All the optimal
// committees are enumerated by solving again with the committees found so far
// excluded and the objective fixed at the optimum, until the program becomes
// infeasible.

use good_lp::{
    default_solver, variable, variables, Constraint, Expression, IntoAffineExpression,
    ProblemVariables, ResolutionError, Solution, SolverModel, Variable,
};
use num_rational::BigRational;
use num_traits::ToPrimitive;

use crate::committee::str_candset;
use crate::config::*;
use crate::diagnostics::Diagnostics;
use crate::scores::ScoringFunction;

/// Relative tolerance when comparing objective values.
const TOLERANCE: f64 = 1e-6;

/// A membership value above this threshold means that the candidate is elected.
const MEMBERSHIP_THRESHOLD: f64 = 0.9;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
enum Sense {
    Maximise,
    Minimise,
}

/// A freshly built program, before the enumeration constraints are added.
struct IlpModel {
    vars: ProblemVariables,
    in_committee: Vec<Variable>,
    objective: Expression,
    constraints: Vec<Constraint>,
}

impl IlpModel {
    /// The membership variables, constrained to select `committeesize` candidates.
    fn new(num_cand: usize, committeesize: usize) -> IlpModel {
        let mut vars = variables!();
        let in_committee: Vec<Variable> = (0..num_cand)
            .map(|_| vars.add(variable().binary()))
            .collect();
        let mut size = Expression::default();
        for x in in_committee.iter() {
            size.add_mul(1.0, *x);
        }
        IlpModel {
            vars,
            in_committee,
            objective: Expression::default(),
            constraints: vec![size.eq(committeesize as f64)],
        }
    }

    fn members(&self, committee: &[usize]) -> Expression {
        let mut e = Expression::default();
        for c in committee {
            e.add_mul(1.0, self.in_committee[*c]);
        }
        e
    }
}

/// Solves the program built by `build` until all the optimal committees are found.
/// In resolute mode, the first solution of the solver is returned: which optimal
/// committee it is depends on the solver.
fn enumerate_optima<F>(
    sense: Sense,
    committeesize: usize,
    resolute: bool,
    profile: &Profile,
    diag: &Diagnostics,
    build: F,
) -> Result<Vec<Committee>, AbcError>
where
    F: Fn() -> Result<IlpModel, AbcError>,
{
    let mut committees: Vec<Committee> = Vec::new();
    let mut optimum: Option<f64> = None;
    loop {
        let IlpModel {
            vars,
            in_committee,
            objective,
            constraints,
        } = build()?;

        let unsolved = match sense {
            Sense::Maximise => vars.maximise(objective.clone()),
            Sense::Minimise => vars.minimise(objective.clone()),
        };
        let mut problem = unsolved.using(default_solver);
        for constraint in constraints {
            problem = problem.with(constraint);
        }
        for committee in committees.iter() {
            let mut members = Expression::default();
            for c in committee {
                members.add_mul(1.0, in_committee[*c]);
            }
            problem = problem.with(members.leq((committeesize - 1) as f64));
        }
        if let Some(opt) = optimum {
            let tolerance = TOLERANCE * opt.abs().max(1.0);
            problem = match sense {
                Sense::Maximise => problem.with(objective.clone().geq(opt - tolerance)),
                Sense::Minimise => problem.with(objective.clone().leq(opt + tolerance)),
            };
        }

        let solution = match problem.solve() {
            Ok(solution) => solution,
            Err(ResolutionError::Infeasible) => break,
            Err(e) => return Err(AbcError::Solver(e.to_string())),
        };
        let value = objective.clone().eval_with(&solution);
        let committee: Committee = in_committee
            .iter()
            .enumerate()
            .filter(|(_, x)| solution.value(**x) > MEMBERSHIP_THRESHOLD)
            .map(|(c, _)| c)
            .collect();
        if committee.len() != committeesize {
            return Err(AbcError::Solver(format!(
                "solution has {} members instead of {}",
                committee.len(),
                committeesize
            )));
        }
        diag.debug(format_args!(
            "ILP solution {}: {} with objective {}",
            committees.len() + 1,
            str_candset(&committee, profile.names()),
            value
        ));
        if committees.contains(&committee) {
            return Err(AbcError::Solver(format!(
                "excluded committee {:?} returned again",
                committee
            )));
        }
        committees.push(committee);
        if optimum.is_none() {
            optimum = Some(value);
        }
        if resolute {
            break;
        }
    }
    if committees.is_empty() {
        return Err(AbcError::Solver("no feasible committee".to_string()));
    }
    committees.sort();
    Ok(committees)
}

fn to_f64(x: &BigRational) -> Result<f64, AbcError> {
    x.to_f64()
        .ok_or_else(|| AbcError::Solver(format!("{x} cannot be converted to a float")))
}

/// Thiele methods: for every voter, the binary variables `u(v, l)` select how many
/// approved candidates are in the committee; the marginal score of the l-th one
/// is its coefficient in the objective.
pub fn compute_thiele_method_ilp(
    scorefct: ScoringFunction,
    profile: &Profile,
    committeesize: usize,
    resolute: bool,
    diag: &Diagnostics,
) -> Result<Vec<Committee>, AbcError> {
    let weights: Vec<f64> = profile
        .iter()
        .map(|b| to_f64(b.weight()))
        .collect::<Result<_, _>>()?;
    let marginals: Vec<f64> = (1..=committeesize)
        .map(|l| to_f64(&scorefct.marginal(l)))
        .collect::<Result<_, _>>()?;

    let build = || -> Result<IlpModel, AbcError> {
        let mut model = IlpModel::new(profile.num_cand(), committeesize);
        for (b, w) in profile.iter().zip(weights.iter()) {
            if b.is_empty() {
                continue;
            }
            let max_in_committee = b.len().min(committeesize);
            let mut utility = Expression::default();
            for l in 1..=max_in_committee {
                let u = model.vars.add(variable().binary());
                utility.add_mul(1.0, u);
                model.objective.add_mul(w * marginals[l - 1], u);
            }
            let approved = model.members(b.approved());
            model.constraints.push(utility.eq(approved));
        }
        Ok(model)
    };
    enumerate_optima(Sense::Maximise, committeesize, resolute, profile, diag, build)
}

/// Minimax Approval Voting: minimize the largest Hamming distance `d`, where the
/// distance to a ballot `A` is `|A| + k - 2 |A ∩ W|`.
pub fn compute_minimaxav_ilp(
    profile: &Profile,
    committeesize: usize,
    resolute: bool,
    diag: &Diagnostics,
) -> Result<Vec<Committee>, AbcError> {
    let build = || -> Result<IlpModel, AbcError> {
        let mut model = IlpModel::new(profile.num_cand(), committeesize);
        let max_hamming = model.vars.add(variable().integer().min(0));
        model.objective.add_mul(1.0, max_hamming);
        for b in profile.iter() {
            // d + 2 |A ∩ W| >= |A| + k
            let mut bound = Expression::default();
            bound.add_mul(1.0, max_hamming);
            for c in b.approved() {
                bound.add_mul(2.0, model.in_committee[*c]);
            }
            model
                .constraints
                .push(bound.geq((b.len() + committeesize) as f64));
        }
        Ok(model)
    };
    enumerate_optima(Sense::Minimise, committeesize, resolute, profile, diag, build)
}

/// Monroe: every voter is assigned to exactly one member, every member receives
/// between `n / k` and `ceil(n / k)` voters, and the number of voters assigned to
/// an approved member is maximized.
///
/// # Panics
///
/// If `committeesize` is 0.
pub fn compute_monroe_ilp(
    profile: &Profile,
    committeesize: usize,
    resolute: bool,
    diag: &Diagnostics,
) -> Result<Vec<Committee>, AbcError> {
    let num_voters = profile.len();
    let lower = num_voters / committeesize;
    let upper = num_voters.div_ceil(committeesize);

    let build = || -> Result<IlpModel, AbcError> {
        let mut model = IlpModel::new(profile.num_cand(), committeesize);
        let mut group_sizes: Vec<Expression> =
            vec![Expression::default(); profile.num_cand()];
        for b in profile.iter() {
            let mut assigned_once = Expression::default();
            for (c, group) in group_sizes.iter_mut().enumerate() {
                let a = model.vars.add(variable().binary());
                assigned_once.add_mul(1.0, a);
                group.add_mul(1.0, a);
                model
                    .constraints
                    .push(a.into_expression().leq(model.in_committee[c]));
                if b.approves(c) {
                    model.objective.add_mul(1.0, a);
                }
            }
            model.constraints.push(assigned_once.eq(1.0));
        }
        for (c, group) in group_sizes.into_iter().enumerate() {
            let x = model.in_committee[c];
            model
                .constraints
                .push(group.clone().geq(lower as f64 * x));
            model.constraints.push(group.leq(upper as f64 * x));
        }
        Ok(model)
    };
    enumerate_optima(Sense::Maximise, committeesize, resolute, profile, diag, build)
}

/// opt-Phragmén: the load of 1 of every elected candidate is split among its
/// approvers, weighted by their weights, and the largest voter load `L` is
/// minimized. Candidates without approvers are only elected when there are not
/// enough approved candidates.
pub fn compute_optphragmen_ilp(
    profile: &Profile,
    committeesize: usize,
    resolute: bool,
    diag: &Diagnostics,
) -> Result<Vec<Committee>, AbcError> {
    let weights: Vec<f64> = profile
        .iter()
        .map(|b| to_f64(b.weight()))
        .collect::<Result<_, _>>()?;
    let approved_cands: Vec<usize> = (0..profile.num_cand())
        .filter(|c| profile.iter().any(|b| b.approves(*c)))
        .collect();

    let build = || -> Result<IlpModel, AbcError> {
        let mut model = IlpModel::new(profile.num_cand(), committeesize);
        let max_load = model.vars.add(variable().min(0));
        model.objective.add_mul(1.0, max_load);

        let mut candidate_load: Vec<Expression> =
            vec![Expression::default(); profile.num_cand()];
        for (b, w) in profile.iter().zip(weights.iter()) {
            let mut voter_load = Expression::default();
            for c in b.approved() {
                let load = model.vars.add(variable().min(0));
                voter_load.add_mul(1.0, load);
                candidate_load[*c].add_mul(*w, load);
            }
            model.constraints.push(voter_load.leq(max_load));
        }
        for c in approved_cands.iter() {
            let load = std::mem::take(&mut candidate_load[*c]);
            model.constraints.push(load.eq(model.in_committee[*c]));
        }
        let approved = model.members(&approved_cands);
        model.constraints.push(
            approved.eq(committeesize.min(approved_cands.len()) as f64),
        );
        Ok(model)
    };
    enumerate_optima(Sense::Minimise, committeesize, resolute, profile, diag, build)
}
