use crate::domain::{
    models::{OptimizationProblem, Solution},
    solver_service::{Result, SolverService},
};
use good_lp::solvers::microlp::microlp;

use super::good_lp_model::solve_with;

/// Pure-Rust simplex backend; needs no native solver library
pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MicroLpSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for MicroLpSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<Solution> {
        self.validate(problem)?;
        solve_with(problem, microlp, self.name())
    }

    fn name(&self) -> &str {
        "microlp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Constraint, ConstraintType, ObjectiveFunction, OptimizationType, SolutionStatus,
        SolverError,
    };

    #[test]
    fn solves_small_maximisation() {
        // max 3x + 2y  s.t.  x + y <= 4,  x + 3y <= 6
        let problem = OptimizationProblem::new(ObjectiveFunction::new(
            OptimizationType::Maximize,
            vec![3.0, 2.0],
        ))
        .add_constraint(Constraint::dense(ConstraintType::LessThanOrEqual, &[1.0, 1.0], 4.0))
        .add_constraint(Constraint::dense(ConstraintType::LessThanOrEqual, &[1.0, 3.0], 6.0));

        let solution = MicroLpSolver::new().solve(&problem).unwrap();
        assert!(solution.is_optimal());
        assert!((solution.optimal_value.unwrap() - 12.0).abs() < 1e-6);
        assert_eq!(solution.statistics.num_constraints, 2);
    }

    #[test]
    fn reports_infeasible_status() {
        let problem = OptimizationProblem::new(ObjectiveFunction::new(
            OptimizationType::Minimize,
            vec![1.0],
        ))
        .add_constraint(Constraint::dense(ConstraintType::LessThanOrEqual, &[1.0], 1.0))
        .add_constraint(Constraint::dense(ConstraintType::GreaterThanOrEqual, &[1.0], 2.0));

        let solution = MicroLpSolver::new().solve(&problem).unwrap();
        assert_eq!(solution.status, SolutionStatus::Infeasible);
        assert!(solution.optimal_value.is_none());
    }

    #[test]
    fn invalid_problem_never_reaches_the_solver() {
        let problem = OptimizationProblem::new(ObjectiveFunction::new(
            OptimizationType::Minimize,
            vec![1.0, 1.0],
        ))
        .add_constraint(Constraint::new(ConstraintType::Equal, [(5, 1.0)], 1.0));

        assert!(matches!(
            MicroLpSolver::new().solve(&problem),
            Err(SolverError::InvalidProblem(_))
        ));
    }
}
