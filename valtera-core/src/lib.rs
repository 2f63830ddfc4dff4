pub mod calculations;
pub mod db;
pub mod forms;
pub mod models;
pub mod persistence;

pub use db::repository::{CalculatorRepository, RepositoryError};
pub use models::*;
