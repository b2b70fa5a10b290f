// Domain layer: transportation model and LP building blocks
pub mod domain;

// Application layer: input tables, solve use case, result report and export
pub mod application;

// Infrastructure layer: configuration, logging, CLI and instance files
pub mod infrastructure;

// Solver adapters: Concrete implementations of SolverService
pub mod solver;

// Terminal form
pub mod ui;

// Re-export commonly used types
pub use domain::{
    Balance, Constraint, ConstraintType, Dimensions, NodeKind, ObjectiveFunction,
    OptimizationProblem, OptimizationType, Solution, SolutionStatus, SolverBackend, SolverError,
    SolverService, TransportError, TransportInstance, TransportProblem, TransportSolution,
    Variable,
};

pub use application::{
    CellRef, CsvExporter, ExportLayout, InputTables, ResultTable, SolveOutcome, TransportService,
};

pub use infrastructure::AppConfig;

#[cfg(feature = "coin_cbc")]
pub use solver::CoinCbcSolver;
#[cfg(feature = "highs")]
pub use solver::HighsSolver;
pub use solver::{MicroLpSolver, SolverFactory};
