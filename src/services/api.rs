use crate::{
    error::ClientResult,
    models::{HealthStatus, Recommendation, RecommendationPayload},
    view::SearchQuery,
};

/// Recommendation service abstraction
///
/// The controller only talks to the service through this trait, so tests can swap in
/// a mock and the console can point the HTTP implementation at any deployment.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecommendationApi: Send + Sync {
    /// POST the payload to the collection, returning the created record
    async fn create(&self, payload: &RecommendationPayload) -> ClientResult<Recommendation>;

    /// GET a single record
    async fn retrieve(&self, rec_id: &str) -> ClientResult<Recommendation>;

    /// PUT the payload over an existing record
    async fn update(
        &self,
        rec_id: &str,
        payload: &RecommendationPayload,
    ) -> ClientResult<Recommendation>;

    /// DELETE a record; the response body is ignored
    async fn delete(&self, rec_id: &str) -> ClientResult<()>;

    /// GET the collection filtered by `query`
    async fn search(&self, query: &SearchQuery) -> ClientResult<Vec<Recommendation>>;

    /// GET the service health check
    async fn health(&self) -> ClientResult<HealthStatus>;
}
