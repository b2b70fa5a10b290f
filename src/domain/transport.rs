// Transportation problem: the balanced supply/demand model and its LP encoding

use std::fmt;

use serde::{Deserialize, Serialize};

use super::models::{
    Constraint, ObjectiveFunction, OptimizationProblem, Solution, SolverStatistics, Variable,
};
use super::solver_service::{SolverError, SolverService};
use super::value_objects::{ConstraintType, SolutionStatus};

/// Smallest number of factories or warehouses
pub const MIN_NODES: usize = 1;
/// Largest number of factories or warehouses
pub const MAX_NODES: usize = 10;
/// Allowed gap between total supply and total demand
pub const DEFAULT_BALANCE_TOLERANCE: f64 = 1e-3;
/// Flows at or below this are reported as zero
const FLOW_EPSILON: f64 = 1e-9;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("{kind} count must be between 1 and 10, got {value}")]
    InvalidDimensions { kind: NodeKind, value: usize },

    #[error("expected {expected} {what} values, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{what} must be a finite non-negative number, got {value}")]
    InvalidValue { what: String, value: f64 },

    #[error("cell {cell}: '{value}' is not a number")]
    InvalidCell { cell: String, value: String },

    #[error("Unbalanced problem: total supply ({supply}) != total demand ({demand})")]
    Unbalanced { supply: f64, demand: f64 },

    #[error("No optimal solution found (status: {0})")]
    NoOptimalSolution(SolutionStatus),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

pub type Result<T> = std::result::Result<T, TransportError>;

/// The two sides of a transportation network
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Factory,
    Warehouse,
}

impl NodeKind {
    /// Short row/column label, `F3` or `W1` (1-based)
    pub fn label(self, index: usize) -> String {
        match self {
            NodeKind::Factory => format!("F{}", index + 1),
            NodeKind::Warehouse => format!("W{}", index + 1),
        }
    }

    /// Inverse of [`NodeKind::label`]
    pub fn parse_label(self, label: &str) -> Option<usize> {
        let prefix = match self {
            NodeKind::Factory => 'F',
            NodeKind::Warehouse => 'W',
        };
        let n: usize = label.trim().strip_prefix(prefix)?.parse().ok()?;
        n.checked_sub(1)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Factory => write!(f, "Factory"),
            NodeKind::Warehouse => write!(f, "Warehouse"),
        }
    }
}

/// Factory and warehouse counts, each within `MIN_NODES..=MAX_NODES`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    factories: usize,
    warehouses: usize,
}

impl Dimensions {
    pub fn new(factories: usize, warehouses: usize) -> Result<Self> {
        check_count(NodeKind::Factory, factories)?;
        check_count(NodeKind::Warehouse, warehouses)?;
        Ok(Self {
            factories,
            warehouses,
        })
    }

    pub fn factories(&self) -> usize {
        self.factories
    }

    pub fn warehouses(&self) -> usize {
        self.warehouses
    }

    pub fn cost_cells(&self) -> usize {
        self.factories * self.warehouses
    }

    /// Row-major index of the flow variable for (factory, warehouse)
    pub fn flow_index(&self, factory: usize, warehouse: usize) -> usize {
        factory * self.warehouses + warehouse
    }
}

fn check_count(kind: NodeKind, value: usize) -> Result<()> {
    if (MIN_NODES..=MAX_NODES).contains(&value) {
        Ok(())
    } else {
        Err(TransportError::InvalidDimensions { kind, value })
    }
}

/// Totals compared by the balance check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Balance {
    pub total_supply: f64,
    pub total_demand: f64,
}

impl Balance {
    pub fn is_balanced(&self, tolerance: f64) -> bool {
        (self.total_supply - self.total_demand).abs() <= tolerance
    }
}

/// Serialized form of a problem, as found in instance files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransportInstance {
    pub supply: Vec<f64>,
    pub demand: Vec<f64>,
    pub costs: Vec<Vec<f64>>,
}

impl TryFrom<TransportInstance> for TransportProblem {
    type Error = TransportError;

    fn try_from(instance: TransportInstance) -> Result<Self> {
        TransportProblem::new(instance.supply, instance.demand, instance.costs)
    }
}

/// A validated transportation problem instance
#[derive(Debug, Clone, PartialEq)]
pub struct TransportProblem {
    dims: Dimensions,
    supply: Vec<f64>,
    demand: Vec<f64>,
    costs: Vec<Vec<f64>>,
}

impl TransportProblem {
    pub fn new(supply: Vec<f64>, demand: Vec<f64>, costs: Vec<Vec<f64>>) -> Result<Self> {
        let dims = Dimensions::new(supply.len(), demand.len())?;

        if costs.len() != dims.factories() {
            return Err(TransportError::ShapeMismatch {
                what: "cost row",
                expected: dims.factories(),
                actual: costs.len(),
            });
        }
        for row in &costs {
            if row.len() != dims.warehouses() {
                return Err(TransportError::ShapeMismatch {
                    what: "cost column",
                    expected: dims.warehouses(),
                    actual: row.len(),
                });
            }
        }

        for (i, &value) in supply.iter().enumerate() {
            check_value(|| format!("supply of {}", NodeKind::Factory.label(i)), value)?;
        }
        for (j, &value) in demand.iter().enumerate() {
            check_value(|| format!("demand of {}", NodeKind::Warehouse.label(j)), value)?;
        }
        for (i, row) in costs.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                check_value(
                    || {
                        format!(
                            "cost {}->{}",
                            NodeKind::Factory.label(i),
                            NodeKind::Warehouse.label(j)
                        )
                    },
                    value,
                )?;
            }
        }

        Ok(Self {
            dims,
            supply,
            demand,
            costs,
        })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn supply(&self) -> &[f64] {
        &self.supply
    }

    pub fn demand(&self) -> &[f64] {
        &self.demand
    }

    pub fn costs(&self) -> &[Vec<f64>] {
        &self.costs
    }

    pub fn unit_cost(&self, factory: usize, warehouse: usize) -> f64 {
        self.costs[factory][warehouse]
    }

    pub fn balance(&self) -> Balance {
        Balance {
            total_supply: self.supply.iter().sum(),
            total_demand: self.demand.iter().sum(),
        }
    }

    pub fn is_balanced(&self, tolerance: f64) -> bool {
        self.balance().is_balanced(tolerance)
    }

    pub fn ensure_balanced(&self, tolerance: f64) -> Result<()> {
        let balance = self.balance();
        if balance.is_balanced(tolerance) {
            Ok(())
        } else {
            Err(TransportError::Unbalanced {
                supply: balance.total_supply,
                demand: balance.total_demand,
            })
        }
    }

    /// Encode as an LP: one flow per (factory, warehouse) pair, minimise total
    /// shipping cost, ship at most each supply and at least each demand.
    pub fn to_optimization_problem(&self) -> OptimizationProblem {
        self.encode(0.0)
    }

    /// Demand rows are lowered by `demand_slack` each
    fn encode(&self, demand_slack: f64) -> OptimizationProblem {
        let dims = self.dims;
        let num_vars = dims.cost_cells();

        let mut variables = Vec::with_capacity(num_vars);
        let mut coefficients = Vec::with_capacity(num_vars);
        for i in 0..dims.factories() {
            for j in 0..dims.warehouses() {
                variables.push(Variable::continuous(format!("x_{}_{}", i + 1, j + 1)));
                coefficients.push(self.costs[i][j]);
            }
        }

        let objective = ObjectiveFunction::minimize(coefficients);
        let mut problem = OptimizationProblem::new(objective)
            .with_name("transport")
            .with_variables(variables);

        for (i, &supply) in self.supply.iter().enumerate() {
            let row = (0..dims.warehouses()).map(|j| (dims.flow_index(i, j), 1.0));
            problem = problem.add_constraint(
                Constraint::new(ConstraintType::LessThanOrEqual, row, supply)
                    .with_name(format!("supply_{}", i + 1)),
            );
        }

        for (j, &demand) in self.demand.iter().enumerate() {
            let column = (0..dims.factories()).map(|i| (dims.flow_index(i, j), 1.0));
            let bound = demand - demand_slack;
            problem = problem.add_constraint(
                Constraint::new(ConstraintType::GreaterThanOrEqual, column, bound)
                    .with_name(format!("demand_{}", j + 1)),
            );
        }

        problem
    }

    /// Check the balance, then hand the LP to `solver` once.
    pub fn solve(&self, solver: &dyn SolverService, tolerance: f64) -> Result<TransportSolution> {
        self.ensure_balanced(tolerance)?;

        // Demand may exceed supply by up to `tolerance`; spread that shortfall
        // over the demand rows so an accepted instance stays feasible.
        let balance = self.balance();
        let shortfall = (balance.total_demand - balance.total_supply).max(0.0);
        let lp = self.encode(shortfall / self.dims.warehouses() as f64);
        let solution = solver.solve(&lp)?;
        if !solution.is_optimal() {
            return Err(TransportError::NoOptimalSolution(solution.status));
        }

        TransportSolution::from_lp(self.dims, &solution, solver.name())
    }

    pub fn to_instance(&self) -> TransportInstance {
        TransportInstance {
            supply: self.supply.clone(),
            demand: self.demand.clone(),
            costs: self.costs.clone(),
        }
    }
}

fn check_value(what: impl FnOnce() -> String, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TransportError::InvalidValue {
            what: what(),
            value,
        })
    }
}

/// Optimal flows read back from the solver
#[derive(Debug, Clone)]
pub struct TransportSolution {
    dims: Dimensions,
    flows: Vec<Vec<f64>>,
    total_cost: f64,
    solver: String,
    message: String,
    statistics: SolverStatistics,
}

impl TransportSolution {
    fn from_lp(dims: Dimensions, solution: &Solution, solver: &str) -> Result<Self> {
        let values = &solution.variable_values;
        if values.len() != dims.cost_cells() {
            return Err(SolverError::ExecutionFailed(format!(
                "solver returned {} values for {} flow variables",
                values.len(),
                dims.cost_cells()
            ))
            .into());
        }

        // Simplex round-off can leave values like -1e-12 (or -0.0) on empty routes
        let flows = values
            .chunks(dims.warehouses())
            .map(|row| {
                row.iter()
                    .map(|&v| if v > FLOW_EPSILON { v } else { 0.0 })
                    .collect()
            })
            .collect();

        Ok(Self {
            dims,
            flows,
            total_cost: solution.optimal_value.unwrap_or_default(),
            solver: solver.to_string(),
            message: solution.message.clone(),
            statistics: solution.statistics.clone(),
        })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn flows(&self) -> &[Vec<f64>] {
        &self.flows
    }

    pub fn flow(&self, factory: usize, warehouse: usize) -> f64 {
        self.flows[factory][warehouse]
    }

    pub fn shipped_from(&self, factory: usize) -> f64 {
        self.flows[factory].iter().sum()
    }

    pub fn received_by(&self, warehouse: usize) -> f64 {
        self.flows.iter().map(|row| row[warehouse]).sum()
    }

    pub fn factory_cost(&self, factory: usize, costs: &[Vec<f64>]) -> f64 {
        self.flows[factory]
            .iter()
            .zip(&costs[factory])
            .map(|(flow, cost)| flow * cost)
            .sum()
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn solver(&self) -> &str {
        &self.solver
    }

    /// Backend's own wording of the result
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn statistics(&self) -> &SolverStatistics {
        &self.statistics
    }
}
