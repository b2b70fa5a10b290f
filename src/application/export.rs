// CSV export of the displayed result table, and the matching reader

use std::fmt;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Local;
use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use serde::{Deserialize, Serialize};

use super::report::{ResultTable, TOTAL_COST_LABEL};
use crate::domain::NodeKind;

pub const DEFAULT_DELIMITER: u8 = b';';

const TITLE: &str = "Transportation problem solution";
const INFO_HEADER: &str = "Additional information:";
const FLOW_HEADERS: [&str; 4] = ["factory", "warehouse", "flow", "cost"];
const FLOW_TOTAL_LABEL: &str = "total";

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed export: {0}")]
    Malformed(String),
}

pub type Result<T> = std::result::Result<T, ExportError>;

/// Row layout of the exported file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportLayout {
    /// The display table itself, framed by a title and the summary
    #[default]
    Matrix,
    /// One `factory;warehouse;flow;cost` row per route plus a total row
    Flows,
}

impl fmt::Display for ExportLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportLayout::Matrix => write!(f, "matrix"),
            ExportLayout::Flows => write!(f, "flows"),
        }
    }
}

impl FromStr for ExportLayout {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "matrix" => Ok(ExportLayout::Matrix),
            "flows" => Ok(ExportLayout::Flows),
            other => Err(format!("unknown export layout '{other}' (expected matrix or flows)")),
        }
    }
}

/// Numeric content recovered from an exported file
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedResult {
    pub flows: Vec<Vec<f64>>,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct CsvExporter {
    delimiter: u8,
    layout: ExportLayout,
}

impl Default for CsvExporter {
    fn default() -> Self {
        Self::new(ExportLayout::default())
    }
}

impl CsvExporter {
    pub fn new(layout: ExportLayout) -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            layout,
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn layout(&self) -> ExportLayout {
        self.layout
    }

    pub fn write_to_path(&self, table: &ResultTable, path: &Path) -> Result<()> {
        let file = File::create(path).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.write(table, file)
    }

    pub fn write<W: Write>(&self, table: &ResultTable, writer: W) -> Result<()> {
        let mut wtr = WriterBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true)
            .from_writer(writer);

        match self.layout {
            ExportLayout::Matrix => {
                wtr.write_record([TITLE])?;
                wtr.write_record([format!(
                    "Generated: {}",
                    Local::now().format("%d/%m/%Y %H:%M:%S")
                )])?;
                wtr.write_record([""])?;

                wtr.write_record(
                    std::iter::once("").chain(table.column_headers.iter().map(String::as_str)),
                )?;
                for row in &table.rows {
                    wtr.write_record(
                        std::iter::once(row.label.as_str())
                            .chain(row.cells.iter().map(String::as_str)),
                    )?;
                }

                wtr.write_record([""])?;
                wtr.write_record([INFO_HEADER])?;
                for line in &table.summary {
                    wtr.write_record([line])?;
                }
            }
            ExportLayout::Flows => {
                wtr.write_record(FLOW_HEADERS)?;
                for detail in &table.details {
                    wtr.write_record([
                        &detail.factory,
                        &detail.warehouse,
                        &detail.flow,
                        &detail.cost,
                    ])?;
                }
                wtr.write_record([FLOW_TOTAL_LABEL, "", "", table.total_cost.as_str()])?;
            }
        }

        wtr.flush().map_err(csv::Error::from)?;
        Ok(())
    }

    pub fn read_from_path(&self, path: &Path) -> Result<ExportedResult> {
        let file = File::open(path).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.read(file)
    }

    pub fn read<R: Read>(&self, reader: R) -> Result<ExportedResult> {
        let rdr = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        match self.layout {
            ExportLayout::Matrix => read_matrix(rdr),
            ExportLayout::Flows => read_flows(rdr),
        }
    }
}

fn read_matrix<R: Read>(mut rdr: csv::Reader<R>) -> Result<ExportedResult> {
    let mut warehouses: Option<usize> = None;
    let mut flows = Vec::new();

    for record in rdr.records() {
        let record = record?;
        let label = record.get(0).unwrap_or_default();

        let Some(w) = warehouses else {
            let first_column = record.get(1).and_then(|h| NodeKind::Warehouse.parse_label(h));
            if label.is_empty() && first_column == Some(0) && record.len() >= 4 {
                warehouses = Some(record.len() - 3);
            }
            continue;
        };

        if let Some(factory) = NodeKind::Factory.parse_label(label) {
            if factory != flows.len() {
                return Err(ExportError::Malformed(format!(
                    "factory row {label} out of order"
                )));
            }
            let row = (1..=w)
                .map(|c| parse_field(&record, c, label))
                .collect::<Result<Vec<_>>>()?;
            flows.push(row);
        } else if label == TOTAL_COST_LABEL {
            let total_cost = parse_field(&record, w + 2, label)?;
            if flows.is_empty() {
                return Err(ExportError::Malformed("no factory rows".to_string()));
            }
            return Ok(ExportedResult { flows, total_cost });
        }
    }

    Err(ExportError::Malformed(match warehouses {
        None => "result header row not found".to_string(),
        Some(_) => format!("'{TOTAL_COST_LABEL}' row not found"),
    }))
}

fn read_flows<R: Read>(mut rdr: csv::Reader<R>) -> Result<ExportedResult> {
    let mut records = rdr.records();

    match records.next() {
        Some(header) => {
            let header = header?;
            if !header.iter().eq(FLOW_HEADERS) {
                return Err(ExportError::Malformed(format!(
                    "unexpected header {:?}",
                    header.iter().collect::<Vec<_>>()
                )));
            }
        }
        None => return Err(ExportError::Malformed("empty file".to_string())),
    }

    let mut entries = Vec::new();
    for record in records {
        let record = record?;
        let label = record.get(0).unwrap_or_default();

        if label == FLOW_TOTAL_LABEL {
            let total_cost = parse_field(&record, 3, label)?;
            return Ok(ExportedResult {
                flows: assemble_flows(entries)?,
                total_cost,
            });
        }

        let factory = NodeKind::Factory
            .parse_label(label)
            .ok_or_else(|| ExportError::Malformed(format!("bad factory label '{label}'")))?;
        let warehouse_label = record.get(1).unwrap_or_default();
        let warehouse = NodeKind::Warehouse
            .parse_label(warehouse_label)
            .ok_or_else(|| {
                ExportError::Malformed(format!("bad warehouse label '{warehouse_label}'"))
            })?;
        entries.push((factory, warehouse, parse_field(&record, 2, label)?));
    }

    Err(ExportError::Malformed(format!(
        "'{FLOW_TOTAL_LABEL}' row not found"
    )))
}

fn assemble_flows(entries: Vec<(usize, usize, f64)>) -> Result<Vec<Vec<f64>>> {
    let factories = entries.iter().map(|e| e.0 + 1).max().unwrap_or(0);
    let warehouses = entries.iter().map(|e| e.1 + 1).max().unwrap_or(0);
    if entries.len() != factories * warehouses || entries.is_empty() {
        return Err(ExportError::Malformed(format!(
            "expected {} flow rows for a {factories}x{warehouses} grid, found {}",
            factories * warehouses,
            entries.len()
        )));
    }

    let mut flows = vec![vec![f64::NAN; warehouses]; factories];
    for (i, j, flow) in entries {
        flows[i][j] = flow;
    }
    if flows.iter().flatten().any(|v| v.is_nan()) {
        return Err(ExportError::Malformed("duplicate flow rows".to_string()));
    }
    Ok(flows)
}

fn parse_field(record: &StringRecord, index: usize, row: &str) -> Result<f64> {
    let field = record.get(index).unwrap_or_default();
    field.trim().parse().map_err(|_| {
        ExportError::Malformed(format!(
            "row '{row}', column {index}: '{field}' is not a number"
        ))
    })
}
