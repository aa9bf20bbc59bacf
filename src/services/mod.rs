pub mod api;
pub mod http;
pub mod request_id;

pub use api::RecommendationApi;
pub use http::HttpRecommendationApi;
pub use request_id::{RequestId, REQUEST_ID_HEADER};

#[cfg(test)]
pub use api::MockRecommendationApi;
