pub mod cli;
pub mod config;
pub mod consts;
pub mod core;
pub mod discovery;
pub mod error;
pub mod graph;
pub mod layout;
pub mod scheduler;
