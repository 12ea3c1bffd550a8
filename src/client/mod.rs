//! DataClient trait: the boundary between the ofrenda app and the `/data` API.
//!
//! `HttpDataClient` talks JSON over HTTP; tests substitute their own recording
//! implementations.

pub mod http;

pub use http::HttpDataClient;

use crate::error::ApiError;
use crate::model::{Entry, EntryId};
use async_trait::async_trait;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait DataClient {
    /// Fetch all entries, in server order
    async fn list(&self) -> ApiResult<Vec<Entry>>;

    /// Create a new entry; any `id` on the draft is not sent
    async fn create(&self, entry: &Entry) -> ApiResult<Entry>;

    /// Replace the entry with the given id
    async fn update(&self, id: &EntryId, entry: &Entry) -> ApiResult<Entry>;

    /// Delete the entry with the given id; returns the server's confirmation payload
    async fn remove(&self, id: &EntryId) -> ApiResult<serde_json::Value>;
}
