//! # State Module
//!
//! Application state for the host, one type per concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │  CartStore   │  │ CatalogState │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Arc<Mutex<  │  │  RwLock<     │  │  environment     │              │
//! │  │    Cart      │  │   HashMap>   │  │  endpoints       │              │
//! │  │  >>          │  │              │  │  currency        │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartStore: Mutex over the whole cart                                │
//! │  • CatalogState: RwLock (reads dominate)                               │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`AppContext`] bundles the three so the IPC loop can hand each command
//! exactly the state it asks for.

mod cart;
mod catalog;
mod config;

pub use cart::CartStore;
pub use catalog::CatalogState;
pub use config::{
    ApiSettings, CatalogSettings, ConfigError, ConfigFile, ConfigState, Environment,
    LocaleSettings,
};

/// Everything a command may need, constructed once at startup.
#[derive(Debug)]
pub struct AppContext {
    pub cart: CartStore,
    pub catalog: CatalogState,
    pub config: ConfigState,
}

impl AppContext {
    pub fn new(cart: CartStore, catalog: CatalogState, config: ConfigState) -> Self {
        AppContext {
            cart,
            catalog,
            config,
        }
    }
}
