//! # State Module
//!
//! Application state for a `cart-ledger` session.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────────┐  │
//! │  │       LedgerState        │        │          AppConfig           │  │
//! │  │                          │        │                              │  │
//! │  │  Arc<Mutex<CartLedger>>  │        │  store name, currency symbol │  │
//! │  │  catalog + cart + balance│        │  catalog source, out format  │  │
//! │  └──────────────────────────┘        └──────────────────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                         │
//! │  • LedgerState: every operation runs under one Mutex                    │
//! │  • AppConfig: read-only after startup                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod ledger;

pub use config::{
    AppConfig, CatalogConfig, OutputConfig, OutputFormat, StoreConfig, ENV_CATALOG, ENV_FORMAT,
    ENV_STORE_NAME,
};
pub use ledger::LedgerState;
