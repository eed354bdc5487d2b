//! Named-operation dispatch over the catalog.
//!
//! Register handlers on a `Service`; each receives a `Context<S>` with the
//! request arguments and the shared state. `catalog_service` wires up the
//! full catalog surface.
//!
//! ## Quick Start
//!
//! ```
//! use media_catalog::catalog::Catalog;
//! use media_catalog::service::{self, operations};
//! use serde_json::json;
//!
//! let service = service::catalog_service(Catalog::with_sample_data());
//! let items = service
//!     .dispatch(operations::ITEMS_BY_TIER, json!({ "tier": "BASIC" }))
//!     .unwrap();
//! assert_eq!(items.as_array().unwrap().len(), 4);
//! ```

mod context;
mod error;
pub mod operations;
#[allow(clippy::module_inception)]
mod service;

pub use context::Context;
pub use error::HandlerError;
pub use operations::catalog_service;
pub use service::Service;

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
mod http;
#[cfg(feature = "http")]
pub use http::{router, serve};
