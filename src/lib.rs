//! Bestand — inventory and reordering for a single-location operation
//!
//! Tracks stock items, places orders against suppliers and follows each
//! order from open to received, including defect reports and expected
//! delivery dates.
//!
//! ## Features
//! - Product and supplier management with low-stock detection
//! - Order lifecycle tracking with urgency-based prioritization
//! - Dual persistence: local JSON store or a hosted REST backend
//! - One-shot migration of local data into the remote backend
//! - Outbound order channels: mailto/webmail links, templated email
//!   dispatch, IoT button command snippets

use thiserror::Error;

pub mod domain;
pub mod engine;
pub mod facade;
pub mod migrate;
pub mod notify;
pub mod remote;
pub mod store;

pub use domain::{Order, OrderMethod, OrderStatus, Product, Settings, Supplier};
pub use facade::DataFacade;
pub use remote::RemoteBackend;
pub use store::LocalStore;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum Error {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("local store error: {0}")]
    Store(#[from] std::io::Error),

    #[error("remote request failed: {0}")]
    Remote(#[from] reqwest::Error),

    #[error("remote backend returned {status}: {body}")]
    RemoteApi { status: u16, body: String },

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("migration aborted while copying {collection}: {source}")]
    Migration {
        collection: &'static str,
        #[source]
        source: Box<Error>,
    },

    #[error("{0} is not configured")]
    NotConfigured(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
