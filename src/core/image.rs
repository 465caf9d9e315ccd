use crate::core::{DishImage, ImageGenerator};

pub fn build_image_prompt(dish_name: &str) -> String {
    format!(
        "A realistic photograph of the Chinese dish '{dish_name}' served on a plate, \
         with traditional Chinese tableware, in a natural setting."
    )
}

pub struct DishPhotographer<I: ImageGenerator> {
    generator: I,
}

impl<I: ImageGenerator> DishPhotographer<I> {
    pub fn new(generator: I) -> Self {
        Self { generator }
    }

    /// 失敗時回傳 `DishImage::Unavailable`，不當作錯誤
    pub async fn photograph(&self, dish_name: &str) -> DishImage {
        let prompt = build_image_prompt(dish_name);

        match self.generator.generate_image(&prompt).await {
            Ok(url) => DishImage::Generated { url },
            Err(e) => {
                tracing::warn!("Image generation failed, rendering without image: {}", e);
                DishImage::Unavailable
            }
        }
    }
}
