// Result rendering: solution values mapped onto display cells

use std::fmt;

use crate::domain::{NodeKind, TransportProblem, TransportSolution};

pub const SUPPLY_HEADER: &str = "Supply";
pub const FACTORY_COST_HEADER: &str = "Factory cost";
pub const DEMAND_LABEL: &str = "Demand";
pub const TOTAL_COST_LABEL: &str = "Total cost";

/// Two-decimal display format used for every numeric cell
pub fn format_value(value: f64) -> String {
    format!("{value:.2}")
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub label: String,
    pub cells: Vec<String>,
}

/// One route of the solution as shown in the detail listing
#[derive(Debug, Clone, PartialEq)]
pub struct FlowDetail {
    pub factory: String,
    pub warehouse: String,
    pub flow: String,
    pub cost: String,
}

/// Display table: F factory rows, a demand row and a total-cost row over
/// W warehouse columns plus supply and factory-cost columns.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    pub column_headers: Vec<String>,
    pub rows: Vec<ResultRow>,
    pub details: Vec<FlowDetail>,
    pub total_cost: String,
    pub summary: Vec<String>,
}

impl ResultTable {
    pub fn from_solution(problem: &TransportProblem, solution: &TransportSolution) -> Self {
        let dims = problem.dimensions();
        let (f, w) = (dims.factories(), dims.warehouses());

        let mut column_headers: Vec<String> = (0..w).map(|j| NodeKind::Warehouse.label(j)).collect();
        column_headers.push(SUPPLY_HEADER.to_string());
        column_headers.push(FACTORY_COST_HEADER.to_string());

        let mut rows = Vec::with_capacity(f + 2);
        for i in 0..f {
            let mut cells: Vec<String> = (0..w).map(|j| format_value(solution.flow(i, j))).collect();
            cells.push(format_value(solution.shipped_from(i)));
            cells.push(format_value(solution.factory_cost(i, problem.costs())));
            rows.push(ResultRow {
                label: NodeKind::Factory.label(i),
                cells,
            });
        }

        let mut demand_cells: Vec<String> =
            (0..w).map(|j| format_value(solution.received_by(j))).collect();
        demand_cells.extend([String::new(), String::new()]);
        rows.push(ResultRow {
            label: DEMAND_LABEL.to_string(),
            cells: demand_cells,
        });

        let total_cost = format_value(solution.total_cost());
        let mut total_cells = vec![String::new(); w + 1];
        total_cells.push(total_cost.clone());
        rows.push(ResultRow {
            label: TOTAL_COST_LABEL.to_string(),
            cells: total_cells,
        });

        let details = (0..f)
            .flat_map(|i| (0..w).map(move |j| (i, j)))
            .map(|(i, j)| {
                let flow = solution.flow(i, j);
                FlowDetail {
                    factory: NodeKind::Factory.label(i),
                    warehouse: NodeKind::Warehouse.label(j),
                    flow: format_value(flow),
                    cost: format_value(flow * problem.unit_cost(i, j)),
                }
            })
            .collect();

        let stats = solution.statistics();
        let summary = vec![
            format!("Minimum total cost: {total_cost}"),
            format!("Variables: {}", dims.cost_cells()),
            format!("Constraints: {}", f + w),
            format!("Solve time: {:.3} ms", stats.solve_time_ms),
            format!("Solver: {}", solution.solver()),
        ];

        Self {
            column_headers,
            rows,
            details,
            total_cost,
            summary,
        }
    }

    pub fn factories(&self) -> usize {
        self.rows.len().saturating_sub(2)
    }

    pub fn warehouses(&self) -> usize {
        self.column_headers.len().saturating_sub(2)
    }

    /// Flow matrix as displayed (two-decimal precision)
    pub fn displayed_flows(&self) -> Vec<Vec<f64>> {
        let w = self.warehouses();
        self.rows[..self.factories()]
            .iter()
            .map(|row| {
                row.cells[..w]
                    .iter()
                    .map(|cell| cell.parse().unwrap_or_default())
                    .collect()
            })
            .collect()
    }

    pub fn displayed_total_cost(&self) -> f64 {
        self.total_cost.parse().unwrap_or_default()
    }
}

impl fmt::Display for ResultTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label_width = self
            .rows
            .iter()
            .map(|r| r.label.len())
            .max()
            .unwrap_or(0);
        let widths: Vec<usize> = self
            .column_headers
            .iter()
            .enumerate()
            .map(|(c, header)| {
                self.rows
                    .iter()
                    .map(|r| r.cells[c].len())
                    .chain(std::iter::once(header.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:label_width$}", "")?;
        for (header, width) in self.column_headers.iter().zip(&widths) {
            write!(f, "  {header:>width$}")?;
        }
        writeln!(f)?;

        for row in &self.rows {
            write!(f, "{:label_width$}", row.label)?;
            for (cell, width) in row.cells.iter().zip(&widths) {
                write!(f, "  {cell:>width$}")?;
            }
            writeln!(f)?;
        }

        writeln!(f)?;
        for line in &self.summary {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::MicroLpSolver;

    fn solved() -> (TransportProblem, TransportSolution) {
        let problem = TransportProblem::new(
            vec![20.0, 30.0],
            vec![25.0, 25.0],
            vec![vec![8.0, 6.0], vec![9.0, 12.0]],
        )
        .unwrap();
        let solution = problem.solve(&MicroLpSolver::new(), 1e-3).unwrap();
        (problem, solution)
    }

    #[test]
    fn table_has_two_extra_rows_and_columns() {
        let (problem, solution) = solved();
        let table = ResultTable::from_solution(&problem, &solution);

        assert_eq!(table.column_headers, ["W1", "W2", "Supply", "Factory cost"]);
        let labels: Vec<_> = table.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["F1", "F2", "Demand", "Total cost"]);
        assert!(table.rows.iter().all(|r| r.cells.len() == 4));
        assert_eq!(table.factories(), 2);
        assert_eq!(table.warehouses(), 2);
    }

    #[test]
    fn cells_carry_known_optimum() {
        let (problem, solution) = solved();
        let table = ResultTable::from_solution(&problem, &solution);

        assert_eq!(table.rows[0].cells, ["0.00", "20.00", "20.00", "120.00"]);
        assert_eq!(table.rows[1].cells, ["25.00", "5.00", "30.00", "285.00"]);
        assert_eq!(table.rows[2].cells, ["25.00", "25.00", "", ""]);
        assert_eq!(table.rows[3].cells, ["", "", "", "405.00"]);
        assert_eq!(table.total_cost, "405.00");
        assert_eq!(table.summary[0], "Minimum total cost: 405.00");
        assert_eq!(table.details.len(), 4);
        assert_eq!(table.details[1].cost, "120.00");
    }

    #[test]
    fn display_renders_every_row() {
        let (problem, solution) = solved();
        let text = ResultTable::from_solution(&problem, &solution).to_string();
        assert!(text.contains("Factory cost"));
        assert!(text.contains("Total cost"));
        assert!(text.contains("405.00"));
    }
}
