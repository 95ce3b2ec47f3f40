//! # skein
//!
//! Command-line driver for the skein-core HOMFLY engine - THE BINARY.
//!
//! This crate is the only layer that touches the filesystem: it reads diagram
//! files and configuration, and appends rows to the results log.

pub mod cli;
pub mod config;
