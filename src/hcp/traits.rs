//! Common traits for TFE resources

use crate::hcp::PaginationMeta;
use serde::Deserialize;

/// Common trait for TFE resources that carry an ID and a display name
pub trait TfeResource {
    /// Get the resource ID
    fn id(&self) -> &str;

    /// Get the human-readable name
    fn name(&self) -> &str;
}

/// Trait for API responses that contain paginated data
///
/// Implement this trait for a response struct to use it with
/// `TfeClient::fetch_all_pages()`.
pub trait PaginatedResponse<T> {
    /// Consume self and return the data items
    fn into_data(self) -> Vec<T>;
    /// Get reference to pagination metadata
    fn meta(&self) -> Option<&PaginationMeta>;
}

/// Generic API list response wrapper for paginated endpoints
#[derive(Deserialize, Debug)]
pub struct ApiListResponse<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub meta: Option<PaginationMeta>,
}

impl<T> PaginatedResponse<T> for ApiListResponse<T> {
    fn into_data(self) -> Vec<T> {
        self.data
    }

    fn meta(&self) -> Option<&PaginationMeta> {
        self.meta.as_ref()
    }
}
