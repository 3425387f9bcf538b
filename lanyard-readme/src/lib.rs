// ABOUTME: Library exports for lanyard-readme modules for testing and external use
// ABOUTME: Makes internal modules available to integration tests and benchmarks

pub mod cli;
pub mod cli_output;
pub mod commands;
pub mod config;
pub mod constants;
pub mod embed;
