//! Landlord engine library.
//!
//! Exposes the board representation, chance deck, turn resolution, protocol,
//! and simulation modules for use by integration tests and the binaries.

pub mod board;
pub mod chance;
pub mod engine;
pub mod protocol;
pub mod resolve;
pub mod simulate;
