pub mod recommendation;
pub mod recommendation_type;

pub use recommendation::{ErrorBody, HealthStatus, Recommendation, RecommendationPayload, SourcePid};
pub use recommendation_type::{normalize_type, RecommendationType};
