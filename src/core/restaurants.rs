use crate::core::{PlacesProvider, RestaurantLookup, Result};

pub const RESTAURANT_SEARCH_TERM: &str = "chinese restaurant";

pub struct RestaurantFinder<P: PlacesProvider> {
    places: P,
}

impl<P: PlacesProvider> RestaurantFinder<P> {
    pub fn new(places: P) -> Self {
        Self { places }
    }

    /// 先將郵遞區號轉成座標，再以該座標做鄰近搜尋
    pub async fn find_nearby(&self, postal_code: &str) -> RestaurantLookup {
        match self.lookup(postal_code).await {
            Ok(Some(names)) if !names.is_empty() => RestaurantLookup::Found { names },
            Ok(_) => {
                tracing::info!("No nearby restaurants for postal code {}", postal_code);
                RestaurantLookup::NotFound
            }
            Err(e) => {
                tracing::warn!("Restaurant lookup failed for {}: {}", postal_code, e);
                RestaurantLookup::LookupFailed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// `Ok(None)` when the postal code did not geocode.
    async fn lookup(&self, postal_code: &str) -> Result<Option<Vec<String>>> {
        let Some(near) = self.places.geocode(postal_code).await? else {
            return Ok(None);
        };
        tracing::debug!(
            "Postal code {} resolved to ({}, {})",
            postal_code,
            near.longitude,
            near.latitude
        );

        let names = self
            .places
            .search_nearby(RESTAURANT_SEARCH_TERM, near)
            .await?;
        Ok(Some(names))
    }
}
