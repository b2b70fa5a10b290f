// Application layer: use cases built on the domain and solver adapters

pub mod export;
pub mod report;
pub mod tables;
pub mod transport_service;

pub use export::{CsvExporter, ExportError, ExportLayout, ExportedResult};
pub use report::{FlowDetail, ResultRow, ResultTable};
pub use tables::{CellRef, InputTables};
pub use transport_service::{SolveOutcome, TransportService};
