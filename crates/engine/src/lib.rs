//! Redemption-hint computation engine.
//!
//! Pure core of the pilot: given an externally-sorted vessel list, a
//! protocol parameter snapshot, and per-vessel ledger lookups, computes the
//! three values a redemption transaction needs:
//! 1. `first_redemption_hint`: the first vessel with ICR >= MCR
//! 2. `partial_redemption_hint_new_icr`: the nominal CR the last,
//!    partially-redeemed vessel would be left with
//! 3. `truncated_debt_token_amount`: the portion of the requested amount
//!    actually redeemable
//!
//! All arithmetic is exact fixed-point over `U256`. The engine performs no
//! network I/O of its own; external collaborators are reached only through
//! the `sources` traits, so tests can substitute deterministic in-memory
//! fakes.

#![allow(async_fn_in_trait)]

pub mod calculator;
pub mod math;
pub mod service;
pub mod sources;
