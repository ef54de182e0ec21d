pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod pillar;
pub mod scoring;
pub mod store;

pub use config::RecommenderConfig;
pub use engine::Recommender;
pub use error::RecommendError;
pub use model::{CoOccurrencePair, Pillar, Post, PostId, PostTag, Recommendation, Tag, TagId};
pub use pillar::classify_pillar;
