pub mod builder;
pub mod builtin;
pub mod cli;
pub mod config;
pub mod error;
pub mod eval;
pub mod fd;
pub mod global;
pub mod job;
pub mod journal;
pub mod logging;
pub mod parser;
pub mod reader;
pub mod shell;
pub mod signal;
pub mod types;
