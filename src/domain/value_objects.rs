// Small value types shared by the LP model and configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Row sense of a linear constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintType {
    LessThanOrEqual,
    Equal,
    GreaterThanOrEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimizationType {
    Minimize,
    Maximize,
}

/// Outcome class reported by a backend; only `Optimal` carries values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    Optimal,
    Infeasible,
    Unbounded,
}

impl fmt::Display for SolutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SolutionStatus::Optimal => "optimal",
            SolutionStatus::Infeasible => "infeasible",
            SolutionStatus::Unbounded => "unbounded",
        })
    }
}

/// Solver backend to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverBackend {
    /// Pick the best backend compiled into this build
    #[default]
    Auto,
    /// Pure-Rust microlp simplex, always available
    #[serde(rename = "microlp")]
    MicroLp,
    /// HiGHS (requires the `highs` feature)
    Highs,
    /// COIN-OR CBC (requires the `coin_cbc` feature)
    CoinCbc,
}

impl fmt::Display for SolverBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverBackend::Auto => write!(f, "Auto"),
            SolverBackend::MicroLp => write!(f, "microlp"),
            SolverBackend::Highs => write!(f, "HiGHS"),
            SolverBackend::CoinCbc => write!(f, "COIN-OR CBC"),
        }
    }
}

impl FromStr for SolverBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(SolverBackend::Auto),
            "microlp" => Ok(SolverBackend::MicroLp),
            "highs" => Ok(SolverBackend::Highs),
            "coin_cbc" | "cbc" => Ok(SolverBackend::CoinCbc),
            other => Err(format!(
                "unknown solver backend '{other}' (expected auto, microlp, highs or coin_cbc)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_parses_config_spellings() {
        assert_eq!("microlp".parse::<SolverBackend>(), Ok(SolverBackend::MicroLp));
        assert_eq!("HiGHS".parse::<SolverBackend>(), Ok(SolverBackend::Highs));
        assert_eq!("cbc".parse::<SolverBackend>(), Ok(SolverBackend::CoinCbc));
        assert!("gurobi".parse::<SolverBackend>().is_err());
    }
}
