pub mod config;
pub mod logging;

pub mod catalog;
pub mod download;
pub mod error;
pub mod fetch;
pub mod orchestrator;
pub mod patterns;
pub mod pipeline;
pub mod policy;
pub mod resolver;
pub mod site;
