//! # Mimic-Store
//!
//! Activity store contract and an in-memory reference implementation.
//!
//! Ids are minted by an [`IdGenerator`] owned by each store instance, so two
//! stores never share counters and tests can inject deterministic ids.

pub mod id;
pub mod store;

pub use id::*;
pub use store::*;
