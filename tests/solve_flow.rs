use std::sync::Arc;

use proptest::prelude::*;
use rstest::rstest;
use transportopt::application::{CellRef, InputTables, TransportService};
use transportopt::domain::{
    Dimensions, OptimizationProblem, Solution, SolverError, SolverService, TransportError,
    TransportProblem,
};
use transportopt::solver::MicroLpSolver;

const EPS: f64 = 1e-6;

fn service() -> TransportService {
    TransportService::new(Arc::new(MicroLpSolver::new()))
}

fn tables(supply: &[&str], demand: &[&str], costs: &[&[&str]]) -> InputTables {
    let dims = Dimensions::new(supply.len(), demand.len()).unwrap();
    let mut tables = InputTables::create(dims);
    for (i, s) in supply.iter().enumerate() {
        assert!(tables.set_cell(CellRef::Supply(i), *s));
    }
    for (j, d) in demand.iter().enumerate() {
        assert!(tables.set_cell(CellRef::Demand(j), *d));
    }
    for (i, row) in costs.iter().enumerate() {
        for (j, c) in row.iter().enumerate() {
            assert!(tables.set_cell(CellRef::Cost(i, j), *c));
        }
    }
    tables
}

#[test]
fn two_by_two_optimum() {
    let tables = tables(&["20", "30"], &["25", "25"], &[&["8", "6"], &["9", "12"]]);
    let outcome = service().solve(&tables).unwrap();
    let solution = &outcome.solution;

    assert!((solution.total_cost() - 405.0).abs() < EPS);
    assert!((solution.flow(0, 0)).abs() < EPS);
    assert!((solution.flow(0, 1) - 20.0).abs() < EPS);
    assert!((solution.flow(1, 0) - 25.0).abs() < EPS);
    assert!((solution.flow(1, 1) - 5.0).abs() < EPS);

    for (i, supply) in [20.0, 30.0].iter().enumerate() {
        assert!(solution.shipped_from(i) <= supply + EPS);
    }
    for j in 0..2 {
        assert!(solution.received_by(j) >= 25.0 - EPS);
    }
    assert!(solution.flows().iter().flatten().all(|&x| x >= 0.0));

    let flat: Vec<f64> = solution.flows().concat();
    assert!(outcome.problem.to_optimization_problem().is_feasible(&flat, EPS));

    assert_eq!(outcome.table.total_cost, "405.00");
}

#[test]
fn single_route_ships_everything() {
    let tables = tables(&["7.5"], &["7.5"], &[&["4"]]);
    let outcome = service().solve(&tables).unwrap();

    assert!((outcome.solution.flow(0, 0) - 7.5).abs() < EPS);
    assert!((outcome.solution.total_cost() - 30.0).abs() < EPS);
}

#[rstest]
#[case(&["100", "100"], &["100", "100"], true)]
#[case(&["100", "100.0005"], &["100", "100"], true)]
#[case(&["100", "100"], &["100", "100.0005"], true)]
#[case(&["150", "100"], &["100", "100"], false)]
#[case(&["50"], &["60", "0"], false)]
fn balance_gate(#[case] supply: &[&str], #[case] demand: &[&str], #[case] solvable: bool) {
    let costs: Vec<Vec<&str>> = vec![vec!["1"; demand.len()]; supply.len()];
    let cost_rows: Vec<&[&str]> = costs.iter().map(Vec::as_slice).collect();
    let tables = tables(supply, demand, &cost_rows);

    let result = service().solve(&tables);
    if solvable {
        assert!(result.is_ok(), "{result:?}");
    } else {
        assert!(matches!(result, Err(TransportError::Unbalanced { .. })));
    }
}

#[test]
fn demand_within_tolerance_above_supply_still_solves() {
    let tables = tables(&["100"], &["60", "40.0005"], &[&["2", "3"]]);
    let outcome = service().solve(&tables).unwrap();
    let solution = &outcome.solution;

    assert!(solution.shipped_from(0) <= 100.0 + EPS);
    assert!(solution.received_by(0) >= 60.0 - 1e-3);
    assert!(solution.received_by(1) >= 40.0005 - 1e-3);
    assert_eq!(outcome.table.total_cost, "240.00");
    assert!(solution.message().starts_with("Optimal solution found"));
}

#[test]
fn unbalanced_message_names_both_totals() {
    let tables = tables(&["250"], &["200"], &[&["1"]]);
    let err = service().solve(&tables).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unbalanced problem: total supply (250) != total demand (200)"
    );
}

#[rstest]
#[case("abc")]
#[case("")]
#[case("-5")]
#[case("1e400")]
fn bad_cells_are_rejected(#[case] text: &str) {
    let mut tables = InputTables::create(Dimensions::new(2, 2).unwrap());
    tables.set_cell(CellRef::Cost(1, 0), text);
    assert!(service().solve(&tables).is_err());
}

struct FailingSolver;

impl SolverService for FailingSolver {
    fn solve(&self, _problem: &OptimizationProblem) -> Result<Solution, SolverError> {
        Err(SolverError::ExecutionFailed("license expired".to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

#[test]
fn solver_failures_are_reported_as_is() {
    let service = TransportService::new(Arc::new(FailingSolver));
    let tables = InputTables::create(Dimensions::new(2, 2).unwrap());

    match service.solve(&tables) {
        Err(TransportError::Solver(SolverError::ExecutionFailed(msg))) => {
            assert_eq!(msg, "license expired")
        }
        other => panic!("unexpected result {other:?}"),
    }
}

proptest! {
    #[test]
    fn tables_follow_the_counts(f in 1usize..=10, w in 1usize..=10) {
        let tables = service().create_tables(f, w).unwrap();
        prop_assert_eq!(tables.supply_cells().len(), f);
        prop_assert_eq!(tables.demand_cells().len(), w);
        prop_assert_eq!(tables.cost_cells().iter().map(Vec::len).sum::<usize>(), f * w);
    }

    #[test]
    fn counts_outside_the_range_fail(f in 11usize..50, w in 1usize..=10) {
        prop_assert!(service().create_tables(f, w).is_err());
        prop_assert!(service().create_tables(w, f).is_err());
        prop_assert!(service().create_tables(0, w).is_err());
    }

    #[test]
    fn balanced_instances_meet_every_demand(
        supply in prop::collection::vec(1u32..100, 1..5),
        w in 1usize..5,
        seed in 0u32..1000,
    ) {
        // Spread the total supply over `w` warehouses so the instance is balanced
        let total: u32 = supply.iter().sum();
        let mut demand = vec![total / w as u32; w];
        demand[0] += total % w as u32;

        let costs: Vec<Vec<f64>> = (0..supply.len())
            .map(|i| (0..w).map(|j| f64::from((seed + 7 * i as u32 + 3 * j as u32) % 13 + 1)).collect())
            .collect();
        let problem = TransportProblem::new(
            supply.iter().map(|&s| f64::from(s)).collect(),
            demand.iter().map(|&d| f64::from(d)).collect(),
            costs,
        ).unwrap();

        let outcome = service().solve_problem(problem).unwrap();
        for (j, &d) in demand.iter().enumerate() {
            prop_assert!(outcome.solution.received_by(j) >= f64::from(d) - 1e-6);
        }
        for (i, &s) in supply.iter().enumerate() {
            prop_assert!(outcome.solution.shipped_from(i) <= f64::from(s) + 1e-6);
        }
    }
}
