use crate::domain::model::{ChatMessage, Coordinates};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 文字生成服務：回傳單一 completion 的內容
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String>;
}

/// 圖片生成服務：回傳一張圖片的 URL
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// `Ok(None)` when the postal code resolves to nothing.
    async fn geocode(&self, postal_code: &str) -> Result<Option<Coordinates>>;

    /// Place names in the order the index returned them.
    async fn search_nearby(&self, query: &str, near: Coordinates) -> Result<Vec<String>>;
}
