//! src/ui/panels.rs
//!
//! Panels of the transportation form. Every panel borrows the [`AppState`]
//! for a single frame and never mutates it.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::node::Panel;
use super::state::{AppState, Focus, StatusKind};
use crate::application::CellRef;
use crate::domain::NodeKind;

const LABEL_WIDTH: u16 = 8;
const CELL_WIDTH: u16 = 9;

fn bordered(title: &str) -> Block<'_> {
    Block::default().title(title).borders(Borders::ALL)
}

fn highlighted(active: bool) -> Style {
    if active {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

pub struct TitlePanel {
    pub title: String,
}

impl TitlePanel {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
        }
    }
}

impl Panel for TitlePanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let p = Paragraph::new(self.title.clone())
            .style(Style::default().add_modifier(Modifier::BOLD))
            .block(bordered("Transportation Problem"));
        f.render_widget(p, area);
    }
}

/// Static help or hint text
pub struct ParagraphPanel {
    pub text: String,
    pub title: String,
}

impl ParagraphPanel {
    pub fn new(text: &str, title: &str) -> Self {
        Self {
            text: text.to_string(),
            title: title.to_string(),
        }
    }
}

impl Panel for ParagraphPanel {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let p = Paragraph::new(self.text.clone())
            .wrap(Wrap { trim: true })
            .block(bordered(&self.title));
        f.render_widget(p, area);
    }
}

/// Factory / warehouse counts and the running balance
pub struct ConfigPanel<'a> {
    pub state: &'a AppState,
}

impl Panel for ConfigPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let s = self.state;
        let count = |label: &'static str, value: usize, focus: Focus| {
            let active = s.focus == focus;
            vec![
                Span::raw(label),
                Span::styled(
                    if active {
                        format!("< {value:>2} >")
                    } else {
                        format!("  {value:>2}  ")
                    },
                    highlighted(active),
                ),
            ]
        };

        let mut counts = count("Factories: ", s.factories, Focus::Factories);
        counts.push(Span::raw("    "));
        counts.extend(count("Warehouses: ", s.warehouses, Focus::Warehouses));

        let balance = match s.balance() {
            Some(b) => {
                let ok = b.is_balanced(s.service().balance_tolerance());
                Span::styled(
                    format!(
                        "Total supply: {:.2}   Total demand: {:.2}   {}",
                        b.total_supply,
                        b.total_demand,
                        if ok { "balanced" } else { "UNBALANCED" }
                    ),
                    Style::default().fg(if ok { Color::Green } else { Color::Red }),
                )
            }
            None if s.tables.is_some() => {
                Span::styled("Totals unavailable: invalid quantity", Style::default().fg(Color::Red))
            }
            None => Span::raw("No tables yet"),
        };

        let solver = Span::styled(
            format!("Solver: {}", s.service().solver_name()),
            Style::default().fg(Color::DarkGray),
        );

        let p = Paragraph::new(vec![Line::from(counts), Line::from(balance), Line::from(solver)])
            .block(bordered("Configuration"));
        f.render_widget(p, area);
    }
}

/// Supply, demand and cost entry tables with the edit cursor
pub struct InputPanel<'a> {
    pub state: &'a AppState,
}

impl InputPanel<'_> {
    fn cell(&self, cell: CellRef, text: &str) -> Cell<'static> {
        let s = self.state;
        let under_cursor = s.focus == Focus::Grid && s.cursor == cell;
        match (&s.editing, under_cursor) {
            (Some(buffer), true) => Cell::from(format!("{buffer}_"))
                .style(Style::default().fg(Color::Black).bg(Color::Yellow)),
            (None, true) => Cell::from(text.to_string())
                .style(Style::default().add_modifier(Modifier::REVERSED)),
            _ => Cell::from(text.to_string()),
        }
    }

    fn table<'r>(header: Vec<String>, rows: Vec<Row<'r>>, title: &'r str) -> Table<'r> {
        let widths: Vec<Constraint> = std::iter::once(Constraint::Length(LABEL_WIDTH))
            .chain(header.iter().skip(1).map(|_| Constraint::Length(CELL_WIDTH)))
            .collect();
        Table::new(rows, widths)
            .header(Row::new(header).style(Style::default().add_modifier(Modifier::BOLD)))
            .block(bordered(title))
    }
}

impl Panel for InputPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(tables) = self.state.tables.as_ref() else {
            let p = Paragraph::new("Set the counts and press c to create the tables.")
                .block(bordered("Input"));
            f.render_widget(p, area);
            return;
        };

        let dims = tables.dimensions();
        let (nf, nw) = (dims.factories(), dims.warehouses());
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Length(4),
                Constraint::Min(3),
            ])
            .split(area);

        let factory_header: Vec<String> = std::iter::once(String::new())
            .chain((0..nf).map(|i| NodeKind::Factory.label(i)))
            .collect();
        let warehouse_header: Vec<String> = std::iter::once(String::new())
            .chain((0..nw).map(|j| NodeKind::Warehouse.label(j)))
            .collect();

        let supply_row = Row::new(
            std::iter::once(Cell::from("Capacity"))
                .chain(
                    tables
                        .supply_cells()
                        .iter()
                        .enumerate()
                        .map(|(i, text)| self.cell(CellRef::Supply(i), text)),
                )
                .collect::<Vec<_>>(),
        );
        f.render_widget(
            Self::table(factory_header, vec![supply_row], "Supply (factory capacities)"),
            chunks[0],
        );

        let demand_row = Row::new(
            std::iter::once(Cell::from("Demand"))
                .chain(
                    tables
                        .demand_cells()
                        .iter()
                        .enumerate()
                        .map(|(j, text)| self.cell(CellRef::Demand(j), text)),
                )
                .collect::<Vec<_>>(),
        );
        f.render_widget(
            Self::table(warehouse_header.clone(), vec![demand_row], "Demand (warehouse needs)"),
            chunks[1],
        );

        let cost_rows: Vec<Row> = tables
            .cost_cells()
            .iter()
            .enumerate()
            .map(|(i, row)| {
                Row::new(
                    std::iter::once(Cell::from(NodeKind::Factory.label(i)))
                        .chain(
                            row.iter()
                                .enumerate()
                                .map(|(j, text)| self.cell(CellRef::Cost(i, j), text)),
                        )
                        .collect::<Vec<_>>(),
                )
            })
            .collect();
        f.render_widget(Self::table(warehouse_header, cost_rows, "Unit costs"), chunks[2]);
    }
}

/// Optimal plan table followed by the summary lines
pub struct ResultPanel<'a> {
    pub state: &'a AppState,
}

impl Panel for ResultPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(outcome) = self.state.outcome.as_ref() else {
            let status = &self.state.status;
            let p = if status.kind == StatusKind::Error {
                Paragraph::new(status.text.clone())
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: true })
                    .block(bordered("Message"))
            } else {
                Paragraph::new("Press s to solve once the data is entered.").block(bordered("Results"))
            };
            f.render_widget(p, area);
            return;
        };
        let table = &outcome.table;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(table.rows.len() as u16 + 3),
                Constraint::Min(3),
            ])
            .split(area);

        let header: Vec<String> = std::iter::once(String::new())
            .chain(table.column_headers.iter().cloned())
            .collect();
        let widths: Vec<Constraint> = std::iter::once(Constraint::Length(LABEL_WIDTH + 3))
            .chain(table.column_headers.iter().map(|h| {
                Constraint::Length((h.len() as u16).max(CELL_WIDTH))
            }))
            .collect();
        let last = table.rows.len().saturating_sub(1);
        let rows: Vec<Row> = table
            .rows
            .iter()
            .enumerate()
            .map(|(r, row)| {
                let cells = std::iter::once(row.label.clone()).chain(row.cells.iter().cloned());
                let style = if r == last {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Row::new(cells.collect::<Vec<_>>()).style(style)
            })
            .collect();

        let grid = Table::new(rows, widths)
            .header(Row::new(header).style(Style::default().add_modifier(Modifier::BOLD)))
            .block(bordered("Optimal shipping plan"));
        f.render_widget(grid, chunks[0]);

        let summary: Vec<Line> = table.summary.iter().map(|l| Line::from(l.as_str())).collect();
        let p = Paragraph::new(summary)
            .wrap(Wrap { trim: true })
            .block(bordered("Summary"));
        f.render_widget(p, chunks[1]);
    }
}

pub struct StatusPanel<'a> {
    pub state: &'a AppState,
}

impl Panel for StatusPanel<'_> {
    fn draw(&self, f: &mut Frame<'_>, area: Rect) {
        let status = &self.state.status;
        let color = match status.kind {
            StatusKind::Info => Color::Cyan,
            StatusKind::Success => Color::Green,
            StatusKind::Error => Color::Red,
        };
        let p = Paragraph::new(status.text.clone())
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true })
            .block(bordered("Status"));
        f.render_widget(p, area);
    }
}
