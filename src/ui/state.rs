//! src/ui/state.rs
//!
//! Form state for the terminal UI. Key events come in through
//! [`AppState::handle_key`]; panels only read the public fields, so the whole
//! configure -> enter data -> solve -> export flow runs without a terminal.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::application::{CellRef, InputTables, SolveOutcome, TransportService};
use crate::domain::{Balance, MAX_NODES, MIN_NODES};

/// Which control receives arrow keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Factories,
    Warehouses,
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub kind: StatusKind,
    pub text: String,
}

impl Status {
    fn info(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            text: text.into(),
        }
    }

    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

pub struct AppState {
    service: TransportService,
    default_counts: (usize, usize),
    pub factories: usize,
    pub warehouses: usize,
    pub tables: Option<InputTables>,
    pub outcome: Option<SolveOutcome>,
    pub focus: Focus,
    pub cursor: CellRef,
    /// Text being typed into the cell under the cursor
    pub editing: Option<String>,
    pub confirm_reset: bool,
    pub status: Status,
    pub export_path: PathBuf,
    pub running: bool,
}

impl AppState {
    pub fn new(
        service: TransportService,
        factories: usize,
        warehouses: usize,
        export_path: PathBuf,
    ) -> Self {
        let factories = factories.clamp(MIN_NODES, MAX_NODES);
        let warehouses = warehouses.clamp(MIN_NODES, MAX_NODES);
        Self {
            service,
            default_counts: (factories, warehouses),
            factories,
            warehouses,
            tables: None,
            outcome: None,
            focus: Focus::Factories,
            cursor: CellRef::Supply(0),
            editing: None,
            confirm_reset: false,
            status: Status::info("Ready - set the counts and press c to create the tables"),
            export_path,
            running: true,
        }
    }

    pub fn service(&self) -> &TransportService {
        &self.service
    }

    pub fn can_solve(&self) -> bool {
        self.tables.is_some()
    }

    pub fn can_export(&self) -> bool {
        self.outcome.is_some()
    }

    /// Current totals, when every quantity cell parses
    pub fn balance(&self) -> Option<Balance> {
        let problem = self.tables.as_ref()?.parse().ok()?;
        Some(self.service.check_balance(&problem))
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.running = false;
            return;
        }

        if self.editing.is_some() {
            self.handle_edit_key(key.code);
            return;
        }

        if self.confirm_reset {
            self.confirm_reset = false;
            if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
                self.reset();
            } else {
                self.status = Status::info("Reset cancelled");
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.running = false,
            KeyCode::Tab => self.cycle_focus(),
            KeyCode::Char('c') => self.create_tables(),
            KeyCode::Char('s') => self.solve(),
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('r') => {
                self.confirm_reset = true;
                self.status = Status::info("Reset everything? (y/n)");
            }
            KeyCode::Char('+') => self.adjust_count(1),
            KeyCode::Char('-') if self.focus != Focus::Grid => self.adjust_count(-1),
            KeyCode::Up => self.arrow(-1, 0),
            KeyCode::Down => self.arrow(1, 0),
            KeyCode::Left => self.arrow(0, -1),
            KeyCode::Right => self.arrow(0, 1),
            KeyCode::Enter if self.focus == Focus::Grid => {
                let current = self
                    .tables
                    .as_ref()
                    .and_then(|t| t.cell(self.cursor))
                    .unwrap_or_default()
                    .to_string();
                self.editing = Some(current);
            }
            KeyCode::Char(c) if self.focus == Focus::Grid && is_number_char(c) => {
                self.editing = Some(c.to_string());
            }
            _ => {}
        }
    }

    fn handle_edit_key(&mut self, code: KeyCode) {
        let Some(buffer) = self.editing.as_mut() else {
            return;
        };
        match code {
            KeyCode::Char(c) if is_number_char(c) => buffer.push(c),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Enter => self.commit_edit(),
            KeyCode::Esc => self.editing = None,
            _ => {}
        }
    }

    fn commit_edit(&mut self) {
        let Some(text) = self.editing.take() else {
            return;
        };
        let Some(tables) = self.tables.as_mut() else {
            return;
        };
        if tables.cell(self.cursor) == Some(text.as_str()) {
            return;
        }
        if tables.set_cell(self.cursor, text.clone()) {
            debug!(cell = %self.cursor, value = %text, "Cell updated");
            if self.outcome.take().is_some() {
                self.status = Status::info(format!(
                    "{} = {} - input changed, press s to solve again",
                    self.cursor, text
                ));
            } else {
                self.status = Status::info(format!("{} = {}", self.cursor, text));
            }
        }
    }

    fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Factories => Focus::Warehouses,
            Focus::Warehouses if self.tables.is_some() => Focus::Grid,
            Focus::Warehouses | Focus::Grid => Focus::Factories,
        };
    }

    fn arrow(&mut self, rows: isize, cols: isize) {
        match self.focus {
            Focus::Grid => self.move_cursor(rows, cols),
            // Up/Right increase a count, Down/Left decrease it
            _ => self.adjust_count(if rows < 0 || cols > 0 { 1 } else { -1 }),
        }
    }

    fn adjust_count(&mut self, delta: isize) {
        let target = match self.focus {
            Focus::Factories => &mut self.factories,
            Focus::Warehouses => &mut self.warehouses,
            Focus::Grid => return,
        };
        *target = target
            .saturating_add_signed(delta)
            .clamp(MIN_NODES, MAX_NODES);
        self.status = Status::info(format!(
            "{} factories x {} warehouses - press c to create the tables",
            self.factories, self.warehouses
        ));
    }

    /// The grid is navigated as one stack of rows: supply, demand, then one
    /// row per factory of the cost matrix.
    fn move_cursor(&mut self, rows: isize, cols: isize) {
        let Some(tables) = self.tables.as_ref() else {
            return;
        };
        let dims = tables.dimensions();
        let (row, col) = match self.cursor {
            CellRef::Supply(i) => (0, i),
            CellRef::Demand(j) => (1, j),
            CellRef::Cost(i, j) => (2 + i, j),
        };

        let last_row = dims.factories() + 1;
        let row = row.saturating_add_signed(rows).min(last_row);
        let width = if row == 0 {
            dims.factories()
        } else {
            dims.warehouses()
        };
        let col = col.saturating_add_signed(cols).min(width - 1);

        self.cursor = match row {
            0 => CellRef::Supply(col),
            1 => CellRef::Demand(col),
            r => CellRef::Cost(r - 2, col),
        };
    }

    pub fn create_tables(&mut self) {
        match self.service.create_tables(self.factories, self.warehouses) {
            Ok(tables) => {
                self.tables = Some(tables);
                self.outcome = None;
                self.focus = Focus::Grid;
                self.cursor = CellRef::Supply(0);
                self.status = Status::info(format!(
                    "Tables created: {} factories x {} warehouses - ready for data entry",
                    self.factories, self.warehouses
                ));
            }
            Err(e) => self.status = Status::error(e.to_string()),
        }
    }

    /// Replace the grid with pre-filled tables, e.g. from an instance file
    pub fn load_tables(&mut self, tables: InputTables) {
        let dims = tables.dimensions();
        self.factories = dims.factories();
        self.warehouses = dims.warehouses();
        self.tables = Some(tables);
        self.outcome = None;
        self.editing = None;
        self.focus = Focus::Grid;
        self.cursor = CellRef::Supply(0);
        self.status = Status::info(format!(
            "Loaded {} factories x {} warehouses - press s to solve",
            self.factories, self.warehouses
        ));
    }

    pub fn solve(&mut self) {
        let Some(tables) = self.tables.as_ref() else {
            self.status = Status::error("Create the tables first (press c)");
            return;
        };

        match self.service.solve(tables) {
            Ok(outcome) => {
                self.status = Status::success(format!(
                    "Optimal solution found - total cost: {}",
                    outcome.table.total_cost
                ));
                self.outcome = Some(outcome);
            }
            Err(e) => {
                self.outcome = None;
                self.status = Status::error(e.to_string());
            }
        }
    }

    pub fn export(&mut self) {
        let Some(outcome) = self.outcome.as_ref() else {
            self.status = Status::error("Nothing to export yet - solve the problem first");
            return;
        };

        self.status = match self.service.export(&outcome.table, &self.export_path) {
            Ok(()) => Status::success(format!("Exported to {}", self.export_path.display())),
            Err(e) => Status::error(format!("Export failed: {e}")),
        };
    }

    pub fn reset(&mut self) {
        (self.factories, self.warehouses) = self.default_counts;
        self.tables = None;
        self.outcome = None;
        self.editing = None;
        self.focus = Focus::Factories;
        self.cursor = CellRef::Supply(0);
        self.status = Status::info("Ready - application reset");
    }
}

fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || c == '.'
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::MicroLpSolver;
    use std::sync::Arc;

    fn state() -> AppState {
        let service = TransportService::new(Arc::new(MicroLpSolver::new()));
        AppState::new(service, 2, 2, PathBuf::from("unused.csv"))
    }

    fn press(state: &mut AppState, code: KeyCode) {
        state.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn counts_are_clamped() {
        let mut s = state();
        for _ in 0..20 {
            press(&mut s, KeyCode::Char('+'));
        }
        assert_eq!(s.factories, MAX_NODES);

        press(&mut s, KeyCode::Tab);
        for _ in 0..20 {
            press(&mut s, KeyCode::Down);
        }
        assert_eq!(s.warehouses, MIN_NODES);
    }

    #[test]
    fn cursor_walks_the_stacked_grid() {
        let mut s = state();
        press(&mut s, KeyCode::Char('c'));
        assert_eq!(s.focus, Focus::Grid);

        press(&mut s, KeyCode::Right);
        press(&mut s, KeyCode::Right);
        assert_eq!(s.cursor, CellRef::Supply(1));

        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Down);
        press(&mut s, KeyCode::Down);
        assert_eq!(s.cursor, CellRef::Cost(1, 1));

        press(&mut s, KeyCode::Up);
        press(&mut s, KeyCode::Left);
        assert_eq!(s.cursor, CellRef::Cost(0, 0));
    }

    #[test]
    fn typing_replaces_the_cell() {
        let mut s = state();
        press(&mut s, KeyCode::Char('c'));
        for c in "42x.5".chars() {
            press(&mut s, KeyCode::Char(c));
        }
        press(&mut s, KeyCode::Backspace);
        press(&mut s, KeyCode::Enter);

        let tables = s.tables.as_ref().unwrap();
        assert_eq!(tables.cell(CellRef::Supply(0)), Some("42."));
        assert!(s.editing.is_none());
    }

    #[test]
    fn escape_cancels_an_edit() {
        let mut s = state();
        press(&mut s, KeyCode::Char('c'));
        press(&mut s, KeyCode::Char('7'));
        press(&mut s, KeyCode::Esc);
        assert_eq!(s.tables.as_ref().unwrap().cell(CellRef::Supply(0)), Some("100"));
        assert!(s.running);
    }

    #[test]
    fn reset_needs_confirmation() {
        let mut s = state();
        press(&mut s, KeyCode::Char('c'));
        press(&mut s, KeyCode::Char('r'));
        press(&mut s, KeyCode::Char('n'));
        assert!(s.tables.is_some());

        press(&mut s, KeyCode::Char('r'));
        press(&mut s, KeyCode::Char('y'));
        assert!(s.tables.is_none());
        assert_eq!(s.focus, Focus::Factories);
        assert_eq!(s.status.text, "Ready - application reset");
    }

    #[test]
    fn loaded_tables_take_over_the_counts() {
        let mut s = state();
        let problem = crate::domain::TransportProblem::new(
            vec![5.0, 5.0, 5.0],
            vec![15.0],
            vec![vec![1.0], vec![2.0], vec![3.0]],
        )
        .unwrap();
        s.load_tables(InputTables::from_problem(&problem));

        assert_eq!((s.factories, s.warehouses), (3, 1));
        assert_eq!(s.focus, Focus::Grid);
        press(&mut s, KeyCode::Char('s'));
        assert_eq!(s.outcome.as_ref().unwrap().table.total_cost, "30.00");
    }

    #[test]
    fn quit_keys_stop_the_loop() {
        let mut s = state();
        s.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(!s.running);
    }
}
