// Use-case orchestration: create tables -> solve -> render -> export

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::export::{CsvExporter, ExportError};
use super::report::ResultTable;
use super::tables::InputTables;
use crate::domain::{
    Balance, Dimensions, SolverService, TransportError, TransportProblem, TransportSolution,
    DEFAULT_BALANCE_TOLERANCE,
};

/// Everything produced by one solve action
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    pub problem: TransportProblem,
    pub solution: TransportSolution,
    pub table: ResultTable,
}

pub struct TransportService {
    solver: Arc<dyn SolverService>,
    balance_tolerance: f64,
    exporter: CsvExporter,
}

impl TransportService {
    pub fn new(solver: Arc<dyn SolverService>) -> Self {
        Self {
            solver,
            balance_tolerance: DEFAULT_BALANCE_TOLERANCE,
            exporter: CsvExporter::default(),
        }
    }

    pub fn with_balance_tolerance(mut self, tolerance: f64) -> Self {
        self.balance_tolerance = tolerance;
        self
    }

    pub fn with_exporter(mut self, exporter: CsvExporter) -> Self {
        self.exporter = exporter;
        self
    }

    pub fn solver_name(&self) -> &str {
        self.solver.name()
    }

    pub fn balance_tolerance(&self) -> f64 {
        self.balance_tolerance
    }

    pub fn exporter(&self) -> &CsvExporter {
        &self.exporter
    }

    pub fn create_tables(
        &self,
        factories: usize,
        warehouses: usize,
    ) -> Result<InputTables, TransportError> {
        let dims = Dimensions::new(factories, warehouses)?;
        info!(factories, warehouses, "Created input tables");
        Ok(InputTables::create(dims))
    }

    /// Totals for display; does not block anything by itself
    pub fn check_balance(&self, problem: &TransportProblem) -> Balance {
        problem.balance()
    }

    pub fn solve(&self, tables: &InputTables) -> Result<SolveOutcome, TransportError> {
        let problem = tables.parse()?;
        self.solve_problem(problem)
    }

    pub fn solve_problem(&self, problem: TransportProblem) -> Result<SolveOutcome, TransportError> {
        let dims = problem.dimensions();
        let balance = problem.balance();
        debug!(
            factories = dims.factories(),
            warehouses = dims.warehouses(),
            total_supply = balance.total_supply,
            total_demand = balance.total_demand,
            "Solving transportation problem"
        );

        let solution = match problem.solve(self.solver.as_ref(), self.balance_tolerance) {
            Ok(solution) => solution,
            Err(e) => {
                warn!(solver = self.solver.name(), error = %e, "Solve rejected or failed");
                return Err(e);
            }
        };

        info!(
            solver = solution.solver(),
            total_cost = solution.total_cost(),
            solve_time_ms = solution.statistics().solve_time_ms,
            "{}",
            solution.message()
        );

        let table = ResultTable::from_solution(&problem, &solution);
        Ok(SolveOutcome {
            problem,
            solution,
            table,
        })
    }

    pub fn export(&self, table: &ResultTable, path: &Path) -> Result<(), ExportError> {
        self.exporter.write_to_path(table, path)?;
        info!(path = %path.display(), layout = %self.exporter.layout(), "Exported results");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::tables::CellRef;
    use crate::solver::MicroLpSolver;

    fn service() -> TransportService {
        TransportService::new(Arc::new(MicroLpSolver::new()))
    }

    #[test]
    fn default_tables_are_balanced_and_solvable() {
        let service = service();
        let tables = service.create_tables(3, 3).unwrap();
        let outcome = service.solve(&tables).unwrap();

        // Default costs are row term + column term, so every feasible plan costs
        // 100 * 10 * (1 + 2 + 3) + 100 * (1 + 2 + 3)
        assert!((outcome.solution.total_cost() - 6600.0).abs() < 1e-6);
        assert_eq!(outcome.table.total_cost, "6600.00");
    }

    #[test]
    fn unbalanced_tables_are_blocked() {
        let service = service();
        let mut tables = service.create_tables(2, 2).unwrap();
        tables.set_cell(CellRef::Supply(0), "150");

        let err = service.solve(&tables).unwrap_err();
        assert!(matches!(err, TransportError::Unbalanced { supply, demand }
            if supply == 250.0 && demand == 200.0));
    }

    #[test]
    fn out_of_range_counts_are_rejected() {
        assert!(service().create_tables(11, 1).is_err());
        assert!(service().create_tables(1, 0).is_err());
    }
}
