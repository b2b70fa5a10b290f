use crate::domain::{
    models::{OptimizationProblem, Solution},
    solver_service::{Result, SolverService},
};
use good_lp::solvers::coin_cbc::coin_cbc;

use super::good_lp_model::solve_with;

/// COIN-OR CBC through good_lp; needs the Cbc system library
pub struct CoinCbcSolver;

impl CoinCbcSolver {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoinCbcSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverService for CoinCbcSolver {
    fn solve(&self, problem: &OptimizationProblem) -> Result<Solution> {
        self.validate(problem)?;
        solve_with(problem, coin_cbc, self.name())
    }

    fn name(&self) -> &str {
        "COIN-OR CBC"
    }
}
