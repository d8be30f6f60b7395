//! # Wasm Bridge Test Suite
//!
//! Cross-subsystem flows that no single crate can test on its own.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── src/integration/   # protocol engine → relay → handler chain → bank/channels
//! └── benches/           # handler chain and event translation throughput
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p wb-tests
//! cargo test -p wb-tests integration::
//! cargo bench -p wb-tests
//! ```

pub mod integration;
