use crate::utils::error::Result;
use crate::utils::validation::require_form_field;
use serde::{Deserialize, Serialize};

pub const NO_RESTAURANTS_FOUND: &str = "No nearby Chinese restaurants found.";

/// 單次請求的輸入：菜名必填，郵遞區號可選
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DishQuery {
    pub name: String,
    pub postal_code: Option<String>,
}

impl DishQuery {
    /// Trims both fields; a blank postal code counts as not supplied.
    pub fn new(name: Option<&str>, postal_code: Option<&str>) -> Result<Self> {
        let name = require_form_field("food_name", name)?;
        let postal_code = postal_code
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_string);
        Ok(Self { name, postal_code })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionEntry {
    pub title: String,
    pub content: String,
}

impl DescriptionEntry {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("Error", message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RestaurantLookup {
    NotRequested,
    Found { names: Vec<String> },
    NotFound,
    LookupFailed { reason: String },
}

impl RestaurantLookup {
    /// Lines shown on the result page. Every outcome except `NotRequested`
    /// yields at least one line.
    pub fn display_lines(&self) -> Vec<String> {
        match self {
            RestaurantLookup::NotRequested => Vec::new(),
            RestaurantLookup::Found { names } => names.clone(),
            RestaurantLookup::NotFound => vec![NO_RESTAURANTS_FOUND.to_string()],
            RestaurantLookup::LookupFailed { reason } => vec![format!("Error: {}", reason)],
        }
    }

    pub fn is_requested(&self) -> bool {
        !matches!(self, RestaurantLookup::NotRequested)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DishImage {
    Generated { url: String },
    Unavailable,
}

impl DishImage {
    pub fn url(&self) -> Option<&str> {
        match self {
            DishImage::Generated { url } => Some(url),
            DishImage::Unavailable => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub longitude: f64,
    pub latitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// 一次查詢的完整結果，交給渲染層
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DishReport {
    pub dish_name: String,
    pub description: Vec<DescriptionEntry>,
    pub restaurants: RestaurantLookup,
    pub image: DishImage,
}
