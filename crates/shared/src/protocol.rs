use serde::{Deserialize, Serialize};

/// Path of the generation endpoint, relative to the configured API base URL.
pub const GENERATE_PATH: &str = "/api/generate";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
}

/// Success body of the generation endpoint.
///
/// `images` holds a single image URL (or data URL) despite the plural name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub images: String,
}
