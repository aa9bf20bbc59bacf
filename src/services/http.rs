/// HTTP implementation of the recommendation service contract
///
/// | Action   | Method | Path                       |
/// |----------|--------|----------------------------|
/// | create   | POST   | `{collection}`             |
/// | retrieve | GET    | `{collection}/{id}`        |
/// | update   | PUT    | `{collection}/{id}`        |
/// | delete   | DELETE | `{collection}/{id}`        |
/// | search   | GET    | `{collection}?{filters}`   |
///
/// Non-2xx responses become `ClientError::Api`, carrying the `message` field of the
/// JSON error body when the service sent one.
use reqwest::{Client as HttpClient, Method, Response, Url};
use tracing::instrument;

use crate::{
    config::Config,
    error::{ClientError, ClientResult},
    models::{ErrorBody, HealthStatus, Recommendation, RecommendationPayload},
    services::{
        api::RecommendationApi,
        request_id::{RequestId, REQUEST_ID_HEADER},
    },
    view::SearchQuery,
};

#[derive(Clone)]
pub struct HttpRecommendationApi {
    http_client: HttpClient,
    collection_url: Url,
    health_url: Url,
}

impl HttpRecommendationApi {
    pub fn new(config: &Config) -> ClientResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(),
            collection_url: config.collection_url()?,
            health_url: config.health_url()?,
        })
    }

    pub fn collection_url(&self) -> &Url {
        &self.collection_url
    }

    /// `{collection}/{id}`, with the id escaped as a single path segment
    fn record_url(&self, rec_id: &str) -> ClientResult<Url> {
        let mut url = self.collection_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidUrl(format!(
                    "{} cannot carry a record id",
                    self.collection_url
                ))
            })?
            .pop_if_empty()
            .push(rec_id);
        Ok(url)
    }

    /// `{collection}?{filters}`; the bare collection when there are no filters
    fn search_url(&self, query: &SearchQuery) -> Url {
        let mut url = self.collection_url.clone();
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(
                query
                    .filters()
                    .iter()
                    .map(|(key, value)| (*key, value.as_str())),
            );
        }
        url
    }

    /// Sends one request and turns a non-success status into `ClientError::Api`
    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<&RecommendationPayload>,
    ) -> ClientResult<Response> {
        let request_id = RequestId::new();

        tracing::debug!(
            request_id = %request_id,
            method = %method,
            url = %url,
            "Sending request to recommendation service"
        );

        let mut request = self
            .http_client
            .request(method.clone(), url.clone())
            .header(REQUEST_ID_HEADER, request_id.header_value());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(
                request_id = %request_id,
                method = %method,
                url = %url,
                error = %e,
                "Recommendation service unreachable"
            );
            ClientError::Http(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message);

            tracing::warn!(
                request_id = %request_id,
                method = %method,
                url = %url,
                status = status.as_u16(),
                message = ?message,
                "Recommendation service returned an error"
            );

            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(
            request_id = %request_id,
            method = %method,
            url = %url,
            status = status.as_u16(),
            "Recommendation service request succeeded"
        );

        Ok(response)
    }
}

#[async_trait::async_trait]
impl RecommendationApi for HttpRecommendationApi {
    #[instrument(skip(self, payload))]
    async fn create(&self, payload: &RecommendationPayload) -> ClientResult<Recommendation> {
        let response = self
            .send(Method::POST, self.collection_url.clone(), Some(payload))
            .await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self))]
    async fn retrieve(&self, rec_id: &str) -> ClientResult<Recommendation> {
        let url = self.record_url(rec_id)?;
        let response = self.send(Method::GET, url, None).await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self, payload))]
    async fn update(
        &self,
        rec_id: &str,
        payload: &RecommendationPayload,
    ) -> ClientResult<Recommendation> {
        let url = self.record_url(rec_id)?;
        let response = self.send(Method::PUT, url, Some(payload)).await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self))]
    async fn delete(&self, rec_id: &str) -> ClientResult<()> {
        let url = self.record_url(rec_id)?;
        self.send(Method::DELETE, url, None).await?;
        Ok(())
    }

    #[instrument(skip(self, query), fields(query = %query))]
    async fn search(&self, query: &SearchQuery) -> ClientResult<Vec<Recommendation>> {
        let url = self.search_url(query);
        let response = self.send(Method::GET, url, None).await?;
        let results: Vec<Recommendation> = response.json().await?;

        tracing::info!(result_count = results.len(), "Search completed");

        Ok(results)
    }

    #[instrument(skip(self))]
    async fn health(&self) -> ClientResult<HealthStatus> {
        let response = self.send(Method::GET, self.health_url.clone(), None).await?;
        Ok(response.json().await?)
    }
}
