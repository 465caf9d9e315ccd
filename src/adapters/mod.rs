// Adapters layer: concrete clients for the external services behind the domain ports.

pub mod http;
pub mod mapbox;
pub mod openai;

pub use mapbox::MapboxClient;
pub use openai::OpenAiClient;
