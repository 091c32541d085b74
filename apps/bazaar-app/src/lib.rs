//! # Bazaar App Library
//!
//! Host side of the Bazaar marketplace client: owns the session cart and
//! answers the UI's commands over a JSON-lines channel.
//!
//! ## Module Organization
//! ```text
//! bazaar_app_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State exports, AppContext
//! │   ├── cart.rs     ◄─── CartStore (Arc<Mutex<Cart>>)
//! │   ├── catalog.rs  ◄─── CatalogState (product lookups)
//! │   └── config.rs   ◄─── ConfigState (env switching, currency)
//! ├── commands/
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── catalog.rs  ◄─── Product lookup commands
//! │   └── config.rs   ◄─── get_config
//! ├── ipc.rs          ◄─── Request parsing, dispatch, serve loop
//! └── error.rs        ◄─── ApiError / AppError
//! ```

pub mod commands;
pub mod error;
pub mod ipc;
pub mod state;

use std::path::PathBuf;

use clap::Parser;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::AppError;
use state::{AppContext, CartStore, CatalogState, ConfigState};

/// Command line flags.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "bazaar-app", version, about = "Bazaar marketplace cart host")]
pub struct Cli {
    /// Path to bazaar.toml
    #[arg(long, env = "BAZAAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Product catalog JSON file (overrides the config file)
    #[arg(long)]
    pub catalog: Option<PathBuf>,
}

/// Runs the host until the UI closes the command channel.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging   tracing-subscriber, RUST_LOG, stderr           │
/// │  2. Load Configuration   defaults → bazaar.toml → BAZAAR_* env          │
/// │  3. Load Catalog         --catalog / config path / bundled demo data    │
/// │  4. Build State          CartStore (empty), CatalogState, ConfigState   │
/// │  5. Serve                stdin requests → stdout responses until EOF    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> Result<(), AppError> {
    init_tracing();

    info!("Starting Bazaar app host");

    let ctx = build_context(cli)?;
    info!(
        environment = %ctx.config.environment,
        api = %ctx.config.api_base_url,
        products = ctx.catalog.len(),
        cart_id = %ctx.cart.with_cart(|c| c.id().to_string()),
        "State initialized"
    );

    ipc::serve(&ctx, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
}

/// Loads configuration and catalog and creates an empty session cart.
pub fn build_context(cli: Cli) -> Result<AppContext, AppError> {
    let config = ConfigState::load(cli.config)?;

    let catalog = match cli.catalog.or_else(|| config.catalog_path.clone()) {
        Some(path) => CatalogState::from_json_file(&path)?,
        None => CatalogState::demo()?,
    };

    Ok(AppContext::new(CartStore::new(), catalog, config))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bazaar_app_lib=trace` - Trace this crate only
/// - Default: INFO, DEBUG for the app crate
///
/// Logs go to stderr; stdout carries the command responses.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bazaar_app_lib=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
