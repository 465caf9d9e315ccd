use crate::adapters::http::{build_client, decode_json, ensure_success};
use crate::config::MapboxConfig;
use crate::domain::model::Coordinates;
use crate::domain::ports::PlacesProvider;
use crate::utils::error::{DishError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const SERVICE: &str = "Mapbox";

#[derive(Debug, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
pub struct Feature {
    pub place_name: Option<String>,
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

impl FeatureCollection {
    /// 只取第一筆結果的座標 ([lon, lat])
    pub fn first_coordinates(&self) -> Result<Option<Coordinates>> {
        let Some(feature) = self.features.first() else {
            return Ok(None);
        };
        match feature.geometry.as_ref().map(|g| g.coordinates.as_slice()) {
            Some([longitude, latitude, ..]) => Ok(Some(Coordinates {
                longitude: *longitude,
                latitude: *latitude,
            })),
            _ => Err(malformed("first feature has no coordinate pair")),
        }
    }

    pub fn place_names(self) -> Result<Vec<String>> {
        self.features
            .into_iter()
            .map(|feature| {
                feature
                    .place_name
                    .ok_or_else(|| malformed("feature is missing place_name"))
            })
            .collect()
    }
}

fn malformed(message: &str) -> DishError {
    DishError::MalformedResponseError {
        service: SERVICE.to_string(),
        message: message.to_string(),
    }
}

#[derive(Debug, Clone)]
pub struct MapboxClient {
    client: Client,
    config: MapboxConfig,
}

impl MapboxClient {
    pub fn new(config: MapboxConfig, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: build_client(timeout)?,
            config,
        })
    }

    /// `{base}/geocoding/v5/mapbox.places/{search_text}.json?access_token=...`
    ///
    /// The search text is a single percent-encoded path segment, so user input
    /// cannot add path components or query parameters.
    pub fn places_url(&self, search_text: &str) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url).map_err(|e| DishError::ConfigError {
            message: format!("Invalid Mapbox base URL: {}", e),
        })?;

        let file_name = format!("{}.json", search_text);
        url.path_segments_mut()
            .map_err(|_| DishError::ConfigError {
                message: "Mapbox base URL cannot carry a path".to_string(),
            })?
            .pop_if_empty()
            .extend(["geocoding", "v5", "mapbox.places", file_name.as_str()]);

        url.query_pairs_mut()
            .append_pair("access_token", &self.config.access_token);
        Ok(url)
    }

    async fn fetch_features(&self, url: Url) -> Result<FeatureCollection> {
        tracing::debug!("Making Mapbox request to: {}", url.path());
        let response = self.client.get(url).send().await?;
        let response = ensure_success(SERVICE, response).await?;
        decode_json(SERVICE, response).await
    }
}

#[async_trait]
impl PlacesProvider for MapboxClient {
    async fn geocode(&self, postal_code: &str) -> Result<Option<Coordinates>> {
        let url = self.places_url(postal_code)?;
        let collection = self.fetch_features(url).await?;
        collection.first_coordinates()
    }

    async fn search_nearby(&self, query: &str, near: Coordinates) -> Result<Vec<String>> {
        let mut url = self.places_url(query)?;
        url.query_pairs_mut().append_pair(
            "proximity",
            &format!("{},{}", near.longitude, near.latitude),
        );
        let collection = self.fetch_features(url).await?;
        collection.place_names()
    }
}
