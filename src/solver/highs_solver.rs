// HiGHS adapter: builds a row-wise HiGHS model straight from the sparse rows

use crate::domain::{
    models::{OptimizationProblem, Solution as DomainSolution, SolverStatistics},
    solver_service::{Result, SolverError, SolverService},
    value_objects::{ConstraintType, OptimizationType, SolutionStatus},
};
use highs::{Col, HighsModelStatus, RowProblem, Sense};
use std::time::Instant;

pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

fn build(problem: &OptimizationProblem) -> RowProblem {
    let mut pb = RowProblem::default();

    let columns: Vec<Col> = problem
        .objective
        .coefficients
        .iter()
        .enumerate()
        .map(|(i, &cost)| match problem.variables.get(i) {
            Some(var) => {
                pb.add_column(cost, var.lower_bound..var.upper_bound.unwrap_or(f64::INFINITY))
            }
            None => pb.add_column(cost, 0.0..),
        })
        .collect();

    for constraint in &problem.constraints {
        let row: Vec<(Col, f64)> = constraint
            .terms
            .iter()
            .filter(|&&(_, coeff)| coeff != 0.0)
            .map(|&(i, coeff)| (columns[i], coeff))
            .collect();
        let b = constraint.bound;
        match constraint.constraint_type {
            ConstraintType::LessThanOrEqual => pb.add_row(..=b, &row),
            ConstraintType::Equal => pb.add_row(b..=b, &row),
            ConstraintType::GreaterThanOrEqual => pb.add_row(b.., &row),
        }
    }

    pb
}

impl SolverService for HighsSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<DomainSolution> {
        self.validate(problem)?;

        let started = Instant::now();
        let pb = build(problem);
        let sense = match problem.objective.optimization_type {
            OptimizationType::Minimize => Sense::Minimise,
            OptimizationType::Maximize => Sense::Maximise,
        };
        let solved = pb.optimise(sense).solve();

        let statistics = SolverStatistics {
            solve_time_ms: started.elapsed().as_secs_f64() * 1000.0,
            num_variables: problem.num_variables() as u32,
            num_constraints: problem.constraints.len() as u32,
        };

        let solution = match solved.status() {
            HighsModelStatus::Optimal => {
                let values = solved.get_solution().columns().to_vec();
                let mut solution = DomainSolution::optimal(problem.evaluate(&values), values);
                solution.message = format!("Optimal solution found for '{}' by HiGHS", problem.name);
                solution
            }
            HighsModelStatus::Infeasible => DomainSolution::new(
                SolutionStatus::Infeasible,
                "Problem is infeasible: no solution satisfies all constraints",
            ),
            HighsModelStatus::Unbounded | HighsModelStatus::UnboundedOrInfeasible => {
                DomainSolution::new(
                    SolutionStatus::Unbounded,
                    "Problem is unbounded: objective can be improved infinitely",
                )
            }
            status => {
                return Err(SolverError::ExecutionFailed(format!(
                    "HiGHS returned model status {status:?}"
                )))
            }
        };

        Ok(solution.with_statistics(statistics))
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TransportProblem;

    #[test]
    fn matches_the_known_transport_optimum() {
        let lp = TransportProblem::new(
            vec![20.0, 30.0],
            vec![25.0, 25.0],
            vec![vec![8.0, 6.0], vec![9.0, 12.0]],
        )
        .unwrap()
        .to_optimization_problem();

        let solution = HighsSolver::new().solve(&lp).unwrap();
        assert!(solution.is_optimal());
        assert!((solution.optimal_value.unwrap() - 405.0).abs() < 1e-6);
        assert!(lp.is_feasible(&solution.variable_values, 1e-6));
    }
}
