//! src/ui/app.rs
//!
//! Terminal main loop: build the layout tree from the current state, draw it,
//! then block on the next key.
//!
//! # Keyboard Controls
//!
//! - **Tab** - cycle focus: factory count, warehouse count, input grid.
//! - **+ / - / arrows** - change the focused count, or move the grid cursor.
//! - **Enter / digit** - edit the cell under the cursor; Enter commits, Esc cancels.
//! - **c** - create the input tables for the chosen counts.
//! - **s** - solve; **e** - export the result table to CSV.
//! - **r** - reset (asks for confirmation).
//! - **q / Esc** - quit and restore the terminal.

use std::io;

use crossterm::event::{self, Event};
use ratatui::layout::{Constraint, Direction};
use ratatui::DefaultTerminal;
use tracing::info;

use super::node::{group, leaf, Node};
use super::panels::{ConfigPanel, InputPanel, ParagraphPanel, ResultPanel, StatusPanel, TitlePanel};
use super::state::AppState;

const CONTROLS: &str =
    "TAB=Focus  +/-/Arrows=Adjust/Move  Enter=Edit  C=Create  S=Solve  E=Export  R=Reset  Q=Quit";

/// Layout for one frame
pub fn layout(state: &AppState) -> Node<'_> {
    let title = TitlePanel::new("Minimise shipping cost from factories to warehouses");
    let body = group(
        Direction::Horizontal,
        [
            (Constraint::Percentage(50), leaf(InputPanel { state })),
            (Constraint::Percentage(50), leaf(ResultPanel { state })),
        ],
    );
    group(
        Direction::Vertical,
        [
            (Constraint::Length(3), leaf(title)),
            (Constraint::Length(5), leaf(ConfigPanel { state })),
            (Constraint::Min(10), body),
            (Constraint::Length(3), leaf(StatusPanel { state })),
            (Constraint::Length(3), leaf(ParagraphPanel::new(CONTROLS, "Controls"))),
        ],
    )
}

pub fn run(mut state: AppState) -> io::Result<()> {
    info!(solver = state.service().solver_name(), "Starting terminal UI");
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, &mut state);
    ratatui::restore();
    info!("Terminal UI closed");
    result
}

fn event_loop(terminal: &mut DefaultTerminal, state: &mut AppState) -> io::Result<()> {
    while state.running {
        terminal.draw(|f| layout(state).draw(f, f.area()))?;
        if let Event::Key(key) = event::read()? {
            state.handle_key(key);
        }
    }
    Ok(())
}
