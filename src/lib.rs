pub mod build_info;
pub mod commands;
pub mod error;
pub mod git;
pub mod identity;
pub mod ids;
pub mod model;
pub mod output;
pub mod report;
pub mod store;
