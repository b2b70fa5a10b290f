// Editable input grids generated from the factory/warehouse counts

use std::fmt;

use crate::domain::{Dimensions, NodeKind, TransportError, TransportProblem};

/// Default text of every supply and demand cell
pub const DEFAULT_QUANTITY: &str = "100";

/// Address of one editable cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellRef {
    Supply(usize),
    Demand(usize),
    Cost(usize, usize),
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            CellRef::Supply(i) => write!(f, "supply[{}]", NodeKind::Factory.label(i)),
            CellRef::Demand(j) => write!(f, "demand[{}]", NodeKind::Warehouse.label(j)),
            CellRef::Cost(i, j) => write!(
                f,
                "cost[{},{}]",
                NodeKind::Factory.label(i),
                NodeKind::Warehouse.label(j)
            ),
        }
    }
}

/// Raw cell text for supply, demand and the cost matrix
#[derive(Debug, Clone, PartialEq)]
pub struct InputTables {
    dims: Dimensions,
    supply: Vec<String>,
    demand: Vec<String>,
    costs: Vec<Vec<String>>,
}

impl InputTables {
    /// Allocate F supply cells, W demand cells and F×W cost cells.
    ///
    /// Quantities start at 100; cost (i, j) starts at `(i+1)*10 + (j+1)` so the
    /// grid is visibly varied before the user types anything.
    pub fn create(dims: Dimensions) -> Self {
        let supply = vec![DEFAULT_QUANTITY.to_string(); dims.factories()];
        let demand = vec![DEFAULT_QUANTITY.to_string(); dims.warehouses()];
        let costs = (0..dims.factories())
            .map(|i| {
                (0..dims.warehouses())
                    .map(|j| ((i + 1) * 10 + (j + 1)).to_string())
                    .collect()
            })
            .collect();

        Self {
            dims,
            supply,
            demand,
            costs,
        }
    }

    /// Grid pre-filled with the values of an existing problem
    pub fn from_problem(problem: &TransportProblem) -> Self {
        Self {
            dims: problem.dimensions(),
            supply: problem.supply().iter().map(f64::to_string).collect(),
            demand: problem.demand().iter().map(f64::to_string).collect(),
            costs: problem
                .costs()
                .iter()
                .map(|row| row.iter().map(f64::to_string).collect())
                .collect(),
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn supply_cells(&self) -> &[String] {
        &self.supply
    }

    pub fn demand_cells(&self) -> &[String] {
        &self.demand
    }

    pub fn cost_cells(&self) -> &[Vec<String>] {
        &self.costs
    }

    pub fn cell(&self, cell: CellRef) -> Option<&str> {
        match cell {
            CellRef::Supply(i) => self.supply.get(i),
            CellRef::Demand(j) => self.demand.get(j),
            CellRef::Cost(i, j) => self.costs.get(i).and_then(|row| row.get(j)),
        }
        .map(String::as_str)
    }

    /// Replace a cell's text; returns false when `cell` is outside the grid.
    pub fn set_cell(&mut self, cell: CellRef, text: impl Into<String>) -> bool {
        let slot = match cell {
            CellRef::Supply(i) => self.supply.get_mut(i),
            CellRef::Demand(j) => self.demand.get_mut(j),
            CellRef::Cost(i, j) => self.costs.get_mut(i).and_then(|row| row.get_mut(j)),
        };
        match slot {
            Some(slot) => {
                *slot = text.into();
                true
            }
            None => false,
        }
    }

    /// Read every cell as a number and build a validated problem
    pub fn parse(&self) -> Result<TransportProblem, TransportError> {
        let supply = self
            .supply
            .iter()
            .enumerate()
            .map(|(i, text)| parse_cell(CellRef::Supply(i), text))
            .collect::<Result<Vec<_>, _>>()?;
        let demand = self
            .demand
            .iter()
            .enumerate()
            .map(|(j, text)| parse_cell(CellRef::Demand(j), text))
            .collect::<Result<Vec<_>, _>>()?;
        let costs = self
            .costs
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(|(j, text)| parse_cell(CellRef::Cost(i, j), text))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        TransportProblem::new(supply, demand, costs)
    }
}

fn parse_cell(cell: CellRef, text: &str) -> Result<f64, TransportError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| TransportError::InvalidCell {
            cell: cell.to_string(),
            value: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_follow_the_cost_pattern() {
        let tables = InputTables::create(Dimensions::new(2, 3).unwrap());
        assert_eq!(tables.supply_cells(), ["100", "100"]);
        assert_eq!(tables.demand_cells().len(), 3);
        assert_eq!(tables.cell(CellRef::Cost(0, 0)), Some("11"));
        assert_eq!(tables.cell(CellRef::Cost(1, 2)), Some("23"));
        assert_eq!(tables.cell(CellRef::Cost(2, 0)), None);
    }

    #[test]
    fn set_cell_rejects_out_of_range() {
        let mut tables = InputTables::create(Dimensions::new(1, 1).unwrap());
        assert!(tables.set_cell(CellRef::Demand(0), "7"));
        assert!(!tables.set_cell(CellRef::Demand(1), "7"));
        assert_eq!(tables.cell(CellRef::Demand(0)), Some("7"));
    }

    #[test]
    fn parse_names_the_bad_cell() {
        let mut tables = InputTables::create(Dimensions::new(2, 2).unwrap());
        tables.set_cell(CellRef::Cost(1, 0), "abc");

        match tables.parse() {
            Err(TransportError::InvalidCell { cell, value }) => {
                assert_eq!(cell, "cost[F2,W1]");
                assert_eq!(value, "abc");
            }
            other => panic!("expected InvalidCell, got {other:?}"),
        }
    }

    #[test]
    fn parse_trims_whitespace() {
        let mut tables = InputTables::create(Dimensions::new(1, 1).unwrap());
        tables.set_cell(CellRef::Supply(0), " 42.5 ");
        tables.set_cell(CellRef::Demand(0), "42.5");
        let problem = tables.parse().unwrap();
        assert_eq!(problem.supply(), [42.5]);
    }

    #[test]
    fn round_trips_through_a_problem() {
        let problem =
            TransportProblem::new(vec![5.0], vec![2.5, 2.5], vec![vec![1.0, 3.0]]).unwrap();
        let tables = InputTables::from_problem(&problem);
        assert_eq!(tables.parse().unwrap(), problem);
    }
}
