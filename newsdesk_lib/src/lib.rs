//! Library layer for newsdesk: the reqwest transport and tracing sink the
//! news client runs on, local bookmark and preference storage, and input
//! validation.

pub mod client;
pub mod db;
pub mod error;
pub mod logger;
pub mod preferences;
pub mod store;
pub mod time_ago;
pub mod transport;
pub mod validation;

pub use newsapi_client;
pub use newsapi_client::types;

pub use client::{ClientConfig, NewsClient};
pub use db::{Db, DbError};
pub use error::NewsdeskError;
pub use logger::TracingLogger;
pub use preferences::{MemoryPreferences, SourcePreferences, DEFAULT_SOURCE_ID};
pub use store::{BookmarkStore, PreferenceStore};
pub use time_ago::{byline, time_ago, time_ago_from_now};
pub use transport::ReqwestTransport;
