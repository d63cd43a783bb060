//! Core types and utilities for COSEM APDU ciphering
//!
//! This crate provides the command enumeration, error handling, and wire
//! encoding utilities shared by the ciphering engine.

pub mod command;
pub mod error;
pub mod wire;

pub use command::Command;
pub use error::{CosemError, CosemResult};
