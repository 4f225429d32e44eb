//! Unified catalog provider abstraction layer
//!
//! This crate normalizes the two app-store upstreams (Apple App Store,
//! Google Play) into one `App` schema and exposes them behind a single
//! provider trait.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            CatalogProvider trait             │
//! │  search(term, country, limit) -> Vec<App>    │
//! │  list_top(collection, ...)    -> Vec<App>    │
//! │  get_by_id(id, country)       -> Option<App> │
//! └──────────────────────────────────────────────┘
//!              △                      △
//!              │                      │
//!   ┌──────────┴────────┐  ┌─────────┴─────────┐
//!   │ AppstoreProvider  │  │ PlaystoreProvider │
//!   └───────────────────┘  └───────────────────┘
//! ```
//!
//! Mapping into `App` is total: a record missing every optional upstream
//! field still maps to a fully populated entity (empty strings, zeroes,
//! empty lists).

mod adapters;
pub mod countries;
mod error;
mod interleave;
mod models;
mod price;
mod provider;

pub use adapters::{AppstoreProvider, PlaystoreProvider};
pub use error::ProviderError;
pub use interleave::interleave;
pub use models::{App, Collection, SearchResponse, Store, StoreResults, TrendingResponse};
pub use price::{format_price, PriceValue, FREE_PRICE_TOKEN};
pub use provider::CatalogProvider;
