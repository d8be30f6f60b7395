//! # Shared Types Crate
//!
//! Ledger-side primitives used across the bridge subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: addresses, coins, events and IBC identifiers
//!   are defined once here and reused by every subsystem crate.
//! - **Explicit Context**: the transaction [`Context`] is a value that is
//!   borrowed by a component and handed back (possibly updated) in its result.
//!   There is no ambient mutable state.
//! - **Shared Error Taxonomy**: every subsystem error maps onto an
//!   [`ErrorClass`] so callers can tell a decline from a fatal gas exhaustion.

pub mod context;
pub mod entities;
pub mod errors;
pub mod gas;
pub mod ibc;

pub use context::{BlockInfo, Context};
pub use entities::*;
pub use errors::*;
pub use gas::{GasMeter, OutOfGas};
pub use ibc::*;
