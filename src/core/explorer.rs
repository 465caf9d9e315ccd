use crate::adapters::{MapboxClient, OpenAiClient};
use crate::config::AppConfig;
use crate::core::description::DescriptionGenerator;
use crate::core::image::DishPhotographer;
use crate::core::restaurants::RestaurantFinder;
use crate::core::{
    DishQuery, DishReport, ImageGenerator, PlacesProvider, RestaurantLookup, Result,
    TextGenerator,
};

/// Explorer wired to the production OpenAI and Mapbox clients.
pub type LiveExplorer = DishExplorer<OpenAiClient, OpenAiClient, MapboxClient>;

pub struct DishExplorer<T: TextGenerator, I: ImageGenerator, P: PlacesProvider> {
    describer: DescriptionGenerator<T>,
    photographer: DishPhotographer<I>,
    finder: RestaurantFinder<P>,
}

impl<T: TextGenerator, I: ImageGenerator, P: PlacesProvider> DishExplorer<T, I, P> {
    pub fn new(text: T, images: I, places: P) -> Self {
        Self {
            describer: DescriptionGenerator::new(text),
            photographer: DishPhotographer::new(images),
            finder: RestaurantFinder::new(places),
        }
    }

    /// 三個外部呼叫彼此獨立，同時送出；各自的失敗只影響自己的欄位
    pub async fn explore(&self, query: &DishQuery) -> DishReport {
        tracing::info!(
            "Exploring dish '{}' (postal code: {})",
            query.name,
            query.postal_code.as_deref().unwrap_or("none")
        );

        let restaurants = async {
            match query.postal_code.as_deref() {
                Some(code) => self.finder.find_nearby(code).await,
                None => RestaurantLookup::NotRequested,
            }
        };

        let (description, restaurants, image) = tokio::join!(
            self.describer.describe(&query.name),
            restaurants,
            self.photographer.photograph(&query.name),
        );

        DishReport {
            dish_name: query.name.clone(),
            description,
            restaurants,
            image,
        }
    }
}

impl LiveExplorer {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let timeout = config.request_timeout();
        let openai = OpenAiClient::new(config.openai.clone(), timeout)?;
        let mapbox = MapboxClient::new(config.mapbox.clone(), timeout)?;
        Ok(Self::new(openai.clone(), openai, mapbox))
    }
}
