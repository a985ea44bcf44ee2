//! Live collaborators for the redemption-hint engine.
//!
//! Implements the engine's boundary traits against the real world: the
//! sorted-positions HTTP API, the VesselManager ledger, and the
//! AdminContract/PriceOracle parameter pair. All external calls go through
//! a bounded retry policy; the deterministic walk itself never retries.

pub mod bindings;
pub mod ledger;
pub mod params;
pub mod positions;
pub mod retry;
