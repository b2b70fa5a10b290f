// Domain module: Business logic and models

pub mod models;
pub mod solver_service;
pub mod transport;
pub mod value_objects;

pub use models::*;
pub use solver_service::*;
pub use transport::{
    Balance, Dimensions, NodeKind, TransportError, TransportInstance, TransportProblem,
    TransportSolution, DEFAULT_BALANCE_TOLERANCE, MAX_NODES, MIN_NODES,
};
pub use value_objects::*;
