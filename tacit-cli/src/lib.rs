//! Tacit CLI - Command-line interface for Tacit implicit migrations.
//!
//! This crate provides the `tacit` tool: it discovers entity declarations,
//! loads the migration history, and writes the generated deltas.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
