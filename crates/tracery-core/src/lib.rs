//! Tracery Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Tracery layout
//! library and its command-line interface. It includes:
//!
//! - **Units**: Conversions between pixels and the engine's inches ([`units`] module)
//! - **Geometry**: Integer pixel positions and sizes ([`geometry`] module)
//! - **Identifiers**: Node indices and the bidirectional id map ([`identifier`] module)
//! - **Options**: Rank direction, engine selector and output format ([`options`] module)

pub mod geometry;
pub mod identifier;
pub mod options;
pub mod units;
