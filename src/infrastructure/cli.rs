// Infrastructure: command-line surface

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::application::ExportLayout;
use crate::domain::SolverBackend;

/// Transportation problem solver: enter capacities, demands and unit costs,
/// solve the balanced LP and export the optimal shipping plan.
#[derive(Debug, Parser)]
#[command(name = "transportopt", version)]
#[command(about = "Solve balanced transportation problems from a terminal form or an instance file")]
pub struct Cli {
    /// Configuration file (defaults to ./transportopt.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Solver backend (auto, microlp, highs, coin_cbc); overrides the config file
    #[arg(long, global = true)]
    pub solver: Option<SolverBackend>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive terminal form (default)
    Tui {
        /// Pre-fill the form from an instance file (.toml or .json)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Solve an instance file and print the result table
    Solve {
        /// Instance file (.toml or .json) with `supply`, `demand` and `costs`
        #[arg(short, long)]
        input: PathBuf,

        /// Write the result table to this CSV file
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// CSV layout for --export (matrix or flows)
        #[arg(long)]
        layout: Option<ExportLayout>,
    },

    /// Print a default instance as TOML, ready to edit and pass to `solve`
    Template {
        #[arg(short, long, default_value_t = 3)]
        factories: usize,

        #[arg(short, long, default_value_t = 3)]
        warehouses: usize,
    },
}
