// Shared good_lp translation used by every good_lp-backed adapter
// (microlp by default, CBC behind the `coin_cbc` feature)

use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution, SolverStatistics},
    solver_service::{Result, SolverError},
    value_objects::{ConstraintType, OptimizationType, SolutionStatus as DomainSolutionStatus},
};
use good_lp::{
    variable, Expression, ProblemVariables, ResolutionError, Solution as GoodLpSolutionTrait,
    Solver, SolverModel, Variable as GoodLpVariable,
};
use std::time::Instant;

/// Build `problem` with good_lp, solve it with `solver` and map the outcome
/// back into a domain [`DomainSolution`].
pub(crate) fn solve_with<S>(
    problem: &OptimizationProblem,
    solver: S,
    backend_name: &str,
) -> Result<DomainSolution>
where
    S: Solver,
    S::Model: SolverModel<Error = ResolutionError>,
{
    let start_time = Instant::now();
    let num_vars = problem.num_variables();

    let mut vars = ProblemVariables::new();
    let mut lp_variables: Vec<GoodLpVariable> = Vec::with_capacity(num_vars);

    for var_def in &problem.variables {
        let upper = var_def.upper_bound.unwrap_or(f64::INFINITY);
        lp_variables.push(vars.add(variable().min(var_def.lower_bound).max(upper)));
    }

    // If no variables specified, create non-negative defaults
    if problem.variables.is_empty() {
        for _ in 0..num_vars {
            lp_variables.push(vars.add(variable().min(0.0)));
        }
    }

    let is_maximize = problem.objective.optimization_type == OptimizationType::Maximize;
    let mut obj_expr: Expression = 0.into();
    for (i, &coeff) in problem.objective.coefficients.iter().enumerate() {
        if coeff != 0.0 {
            // good_lp minimises, so negate for maximisation
            let c = if is_maximize { -coeff } else { coeff };
            obj_expr += c * lp_variables[i];
        }
    }

    let mut lp_model = vars.minimise(obj_expr).using(solver);

    for constraint in &problem.constraints {
        let mut lhs: Expression = 0.into();
        for &(i, coeff) in &constraint.terms {
            lhs += coeff * lp_variables[i];
        }

        lp_model = match constraint.constraint_type {
            ConstraintType::LessThanOrEqual => lp_model.with(lhs.leq(constraint.bound)),
            ConstraintType::Equal => lp_model.with(lhs.eq(constraint.bound)),
            ConstraintType::GreaterThanOrEqual => lp_model.with(lhs.geq(constraint.bound)),
        };
    }

    let solution_result = lp_model.solve();
    let statistics = SolverStatistics {
        solve_time_ms: start_time.elapsed().as_secs_f64() * 1000.0,
        num_variables: num_vars as u32,
        num_constraints: problem.constraints.len() as u32,
    };

    match solution_result {
        Ok(sol) => {
            let variable_values: Vec<f64> = lp_variables.iter().map(|&var| sol.value(var)).collect();
            let actual_obj = problem.evaluate(&variable_values);

            let mut solution =
                DomainSolution::optimal(actual_obj, variable_values).with_statistics(statistics);
            solution.message = format!(
                "Optimal solution found for '{}' by {}",
                problem.name, backend_name
            );
            Ok(solution)
        }
        Err(ResolutionError::Infeasible) => Ok(DomainSolution::new(
            DomainSolutionStatus::Infeasible,
            "Problem is infeasible: no solution satisfies all constraints",
        )
        .with_statistics(statistics)),
        Err(ResolutionError::Unbounded) => Ok(DomainSolution::new(
            DomainSolutionStatus::Unbounded,
            "Problem is unbounded: objective can be improved infinitely",
        )
        .with_statistics(statistics)),
        Err(e) => Err(SolverError::ExecutionFailed(format!("{backend_name}: {e:?}"))),
    }
}
