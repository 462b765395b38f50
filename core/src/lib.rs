//! Client library for the Pocket (getpocket.com) v3 API.
//!
//! # Overview
//! Add, modify and retrieve saved items, and run the request-token /
//! access-token authorization flow on behalf of a user.
//!
//! # Design
//! - `PocketClient` is the deterministic core: `build_*` validates input and
//!   produces an `HttpRequest`, `parse_*` turns an `HttpResponse` into a typed
//!   result. It performs no I/O.
//! - `Pocket` pairs a `PocketClient` with a `Transport` and runs one
//!   round-trip per operation. `UreqTransport` (feature `ureq`, on by
//!   default) is the blocking implementation with a fixed timeout.
//! - Validation errors are returned before anything is sent. Nothing is
//!   retried.
//!
//! ```no_run
//! use pocket_core::{Pocket, RetrievingInput};
//!
//! # fn main() -> pocket_core::Result<()> {
//! let pocket = Pocket::new("1234-abcd1234abcd1234abcd1234")?;
//! let items = pocket.retrieve(&RetrievingInput {
//!     state: Some("unread".to_string()),
//!     ..RetrievingInput::new("access-token")
//! })?;
//! for item in items {
//!     println!("{} {}", item.item_id, item.resolved_url);
//! }
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod input;
pub mod pocket;
pub mod request;
pub mod response;
pub mod transport;

pub use action::{Action, ActionKind};
pub use client::PocketClient;
pub use config::ClientConfig;
pub use error::{PocketError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use input::{AddInput, ModifyInput, RetrievingInput};
pub use pocket::Pocket;
pub use response::{Authorization, Item};
pub use transport::Transport;

#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
