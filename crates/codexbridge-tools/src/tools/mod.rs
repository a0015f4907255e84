//! Tool modules — one file per operation family

pub mod agent;
pub mod docs;
pub mod explain;
pub mod generate;
pub mod migrate;
pub mod quality;
pub mod refactor;
