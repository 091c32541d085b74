//! # IPC
//!
//! JSON-lines command channel between the UI and the host.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin (one request per line)                                           │
//! │    {"cmd":"add_to_cart","productId":"clay-mug-01","quantity":2}         │
//! │    {"cmd":"get_cart"}                                                   │
//! │                                                                         │
//! │  stdout (one response per request, same order)                          │
//! │    {"ok":true,"data":{"cartId":"...","items":[...],"totals":{...}}}     │
//! │    {"ok":false,"error":{"code":"NOT_FOUND","message":"..."}}            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A line that does not parse gets an `INVALID_REQUEST` response and the
//! loop carries on. Blank lines are skipped. EOF ends the session.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::commands;
use crate::error::{ApiError, AppError};
use crate::state::AppContext;

/// A command invocation from the UI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Request {
    GetCart,
    AddToCart {
        product_id: String,
        #[serde(default)]
        quantity: Option<i64>,
    },
    UpdateCartItem {
        product_id: String,
        quantity: i64,
    },
    RemoveFromCart {
        product_id: String,
    },
    ClearCart,
    ListProducts {
        #[serde(default)]
        store_id: Option<String>,
    },
    GetProduct {
        product_id: String,
    },
    GetConfig,
}

/// Response envelope written back for every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl From<Result<Value, ApiError>> for Response {
    fn from(result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(data) => Response {
                ok: true,
                data: Some(data),
                error: None,
            },
            Err(error) => Response {
                ok: false,
                data: None,
                error: Some(error),
            },
        }
    }
}

/// Runs one request against the app state.
pub fn dispatch(ctx: &AppContext, request: Request) -> Result<Value, ApiError> {
    let value = match request {
        Request::GetCart => serde_json::to_value(commands::cart::get_cart(&ctx.cart))?,
        Request::AddToCart {
            product_id,
            quantity,
        } => serde_json::to_value(commands::cart::add_to_cart(
            &ctx.catalog,
            &ctx.cart,
            &product_id,
            quantity,
        )?)?,
        Request::UpdateCartItem {
            product_id,
            quantity,
        } => serde_json::to_value(commands::cart::update_cart_item(
            &ctx.cart,
            &product_id,
            quantity,
        )?)?,
        Request::RemoveFromCart { product_id } => {
            serde_json::to_value(commands::cart::remove_from_cart(&ctx.cart, &product_id)?)?
        }
        Request::ClearCart => serde_json::to_value(commands::cart::clear_cart(&ctx.cart))?,
        Request::ListProducts { store_id } => serde_json::to_value(
            commands::catalog::list_products(&ctx.catalog, store_id.as_deref()),
        )?,
        Request::GetProduct { product_id } => {
            serde_json::to_value(commands::catalog::get_product(&ctx.catalog, &product_id)?)?
        }
        Request::GetConfig => serde_json::to_value(commands::config::get_config(&ctx.config))?,
    };

    Ok(value)
}

/// Parses and runs one request line.
pub fn handle_line(ctx: &AppContext, line: &str) -> Response {
    let result = serde_json::from_str::<Request>(line)
        .map_err(|e| {
            warn!(error = %e, "Rejected malformed request");
            ApiError::invalid_request(e.to_string())
        })
        .and_then(|request| dispatch(ctx, request));

    if let Err(err) = &result {
        debug!(code = ?err.code, message = %err.message, "Command failed");
    }

    result.into()
}

/// Serves requests from `reader` until EOF, writing responses to `writer`.
pub async fn serve<R, W>(ctx: &AppContext, reader: R, mut writer: W) -> Result<(), AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    let mut handled: u64 = 0;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = handle_line(ctx, line);
        let mut encoded = serde_json::to_vec(&response).map_err(std::io::Error::from)?;
        encoded.push(b'\n');

        writer.write_all(&encoded).await?;
        writer.flush().await?;
        handled += 1;
    }

    info!(requests = handled, "Command channel closed");
    Ok(())
}
