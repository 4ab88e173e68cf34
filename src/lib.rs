// Library crate exposing modules for integration tests

pub mod cli;
pub mod error;
pub mod estimation;
pub mod model;
pub mod report;
pub mod repository;
pub mod util;
