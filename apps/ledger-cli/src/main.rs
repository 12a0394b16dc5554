//! # Cart Ledger Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        cart-ledger                                      │
//! │                                                                         │
//! │  main.rs ────► ledger_cli::run()                                        │
//! │                                                                         │
//! │  lib.rs ─────► flags, config, catalog, tracing                          │
//! │                                                                         │
//! │  session.rs ─► script lines ──► commands/ ──► render.rs ──► stdout      │
//! │                                                                         │
//! │  ledger-core ► CartLedger (catalog, cart, balance)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // Setup lives in lib.rs so it can be tested
    ledger_cli::run()
}
