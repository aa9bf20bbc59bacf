//! Recommendation form controller
//!
//! Binds every console action to one request against the recommendation service and
//! repaints the view-model (form, flash message, results table) from the response.
//! Failures are written into the flash area and also returned to the caller.
//!
//! The last search is kept on the controller so like/dislike can re-run it and
//! refresh the table instead of patching a single row.

use crate::{
    error::{ClientError, ClientResult},
    models::{HealthStatus, Recommendation, RecommendationPayload},
    services::RecommendationApi,
    view::{
        render_results, Flash, FormField, RecommendationForm, ResultsTable, RowAction,
        SearchQuery,
    },
};

pub const SUCCESS_MESSAGE: &str = "Success";
pub const DELETED_MESSAGE: &str = "Recommendation has been Deleted!";

pub struct RecommendationController<A> {
    api: A,
    form: RecommendationForm,
    flash: Flash,
    records: Vec<Recommendation>,
    table: ResultsTable,
    last_search: Option<SearchQuery>,
}

impl<A: RecommendationApi> RecommendationController<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            form: RecommendationForm::default(),
            flash: Flash::default(),
            records: Vec::new(),
            table: ResultsTable::default(),
            last_search: None,
        }
    }

    pub fn form(&self) -> &RecommendationForm {
        &self.form
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn flash(&self) -> &Flash {
        &self.flash
    }

    pub fn results(&self) -> &ResultsTable {
        &self.table
    }

    /// Records behind the rows of `results()`
    pub fn records(&self) -> &[Recommendation] {
        &self.records
    }

    pub fn last_search(&self) -> Option<&SearchQuery> {
        self.last_search.as_ref()
    }

    /// Creates a recommendation from the editable fields
    pub async fn create(&mut self) -> ClientResult<Recommendation> {
        let payload = self.form.create_payload();
        self.flash.clear();

        tracing::info!(
            recommendation_name = %payload.recommendation_name,
            "Creating recommendation"
        );

        match self.api.create(&payload).await {
            Ok(created) => {
                self.form.populate(&created);
                self.flash.set(SUCCESS_MESSAGE);
                Ok(created)
            }
            Err(e) => self.fail("create", e),
        }
    }

    /// Saves the editable fields over the record named by the id field
    pub async fn update(&mut self) -> ClientResult<Recommendation> {
        let rec_id = self.require_id("update")?;
        let payload = self.form.update_payload();
        self.flash.clear();

        tracing::info!(rec_id = %rec_id, "Updating recommendation");

        match self.api.update(&rec_id, &payload).await {
            Ok(updated) => {
                self.form.populate(&updated);
                self.flash.set(SUCCESS_MESSAGE);
                Ok(updated)
            }
            Err(e) => self.fail("update", e),
        }
    }

    /// Loads the record named by the id field into the form
    pub async fn retrieve(&mut self) -> ClientResult<Recommendation> {
        let rec_id = self.require_id("retrieve")?;
        self.flash.clear();

        tracing::info!(rec_id = %rec_id, "Retrieving recommendation");

        match self.api.retrieve(&rec_id).await {
            Ok(found) => {
                self.form.populate(&found);
                self.flash.set(SUCCESS_MESSAGE);
                Ok(found)
            }
            Err(e) => {
                self.form.clear();
                self.fail("retrieve", e)
            }
        }
    }

    /// Deletes the record named by the id field
    pub async fn delete(&mut self) -> ClientResult<()> {
        let rec_id = self.require_id("delete")?;
        self.flash.clear();

        tracing::info!(rec_id = %rec_id, "Deleting recommendation");

        match self.api.delete(&rec_id).await {
            Ok(()) => {
                self.form.clear();
                self.flash.set(DELETED_MESSAGE);
                Ok(())
            }
            Err(e) => self.fail("delete", e),
        }
    }

    /// Searches with the non-empty searchable fields and remembers the query
    ///
    /// Returns the number of result rows.
    pub async fn search(&mut self) -> ClientResult<usize> {
        let query = self.form.search_query();
        self.run_search(query).await
    }

    /// Re-runs the last search; does nothing when no search has been made
    pub async fn refresh(&mut self) -> ClientResult<()> {
        match self.last_search.clone() {
            Some(query) => self.run_search(query).await.map(|_| ()),
            None => {
                tracing::debug!("No previous search to refresh");
                Ok(())
            }
        }
    }

    /// Adds one like to `record`, saves it and refreshes the last search
    pub async fn like(&mut self, record: &Recommendation) -> ClientResult<Recommendation> {
        self.vote("like", record.liked()).await
    }

    /// Adds one dislike to `record`, saves it and refreshes the last search
    pub async fn dislike(&mut self, record: &Recommendation) -> ClientResult<Recommendation> {
        self.vote("dislike", record.disliked()).await
    }

    /// Runs a row action against the current results
    pub async fn dispatch(&mut self, action: RowAction) -> ClientResult<Recommendation> {
        let record = match self.records.get(action.row()) {
            Some(record) => record.clone(),
            None => return self.fail("dispatch", ClientError::UnknownRow(action.row())),
        };

        match action {
            RowAction::Like { .. } => self.like(&record).await,
            RowAction::Dislike { .. } => self.dislike(&record).await,
        }
    }

    /// Clear-form button: identifier, flash area and every editable field
    pub fn clear_form(&mut self) {
        self.form.clear_all();
        self.flash.clear();
    }

    /// Checks the service health endpoint
    pub async fn health(&mut self) -> ClientResult<HealthStatus> {
        match self.api.health().await {
            Ok(status) => {
                self.flash.set(format!("Service status: {}", status.message));
                Ok(status)
            }
            Err(e) => self.fail("health", e),
        }
    }

    async fn run_search(&mut self, query: SearchQuery) -> ClientResult<usize> {
        self.flash.clear();
        self.last_search = Some(query.clone());

        tracing::info!(query = %query, "Searching recommendations");

        match self.api.search(&query).await {
            Ok(records) => {
                self.table = render_results(&records);
                if let Some(first) = records.first() {
                    self.form.populate(first);
                }
                self.records = records;
                self.flash.set(SUCCESS_MESSAGE);
                Ok(self.records.len())
            }
            Err(e) => {
                // rows from an earlier query must not sit under the new one
                self.table = ResultsTable::default();
                self.records.clear();
                self.fail("search", e)
            }
        }
    }

    async fn vote(
        &mut self,
        action: &'static str,
        updated: Recommendation,
    ) -> ClientResult<Recommendation> {
        let rec_id = match updated.rec_id {
            Some(id) => id.to_string(),
            None => return self.fail(action, ClientError::MissingField("rec_id")),
        };
        let payload = RecommendationPayload::from(&updated);
        self.flash.clear();

        tracing::info!(
            rec_id = %rec_id,
            action,
            number_of_likes = updated.number_of_likes,
            number_of_dislikes = updated.number_of_dislikes,
            "Voting on recommendation"
        );

        match self.api.update(&rec_id, &payload).await {
            Ok(saved) => {
                self.flash.set(SUCCESS_MESSAGE);
                self.refresh().await?;
                Ok(saved)
            }
            Err(e) => self.fail(action, e),
        }
    }

    fn require_id(&mut self, action: &'static str) -> ClientResult<String> {
        match self.form.rec_id() {
            Some(id) => Ok(id.to_string()),
            None => self.fail(action, ClientError::MissingField(FormField::RecId.key())),
        }
    }

    fn fail<T>(&mut self, action: &'static str, error: ClientError) -> ClientResult<T> {
        tracing::warn!(action, error = %error, "Recommendation action failed");
        self.flash.set(error.flash_message());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourcePid;
    use crate::services::MockRecommendationApi;
    use tokio_test::{assert_err, assert_ok};

    fn sample(likes: u32) -> Recommendation {
        Recommendation {
            rec_id: Some(1),
            recommendation_name: "A".to_string(),
            source_pid: SourcePid::Id(5),
            name: "B".to_string(),
            rec_type: "movie".to_string(),
            number_of_likes: likes,
            number_of_dislikes: 0,
        }
    }

    fn not_found() -> ClientError {
        ClientError::Api {
            status: 404,
            message: Some("Recommendation with id '1' was not found.".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_sends_descriptive_fields_and_repaints() {
        let mut api = MockRecommendationApi::new();
        api.expect_create()
            .withf(|payload: &RecommendationPayload| {
                payload.recommendation_name == "A"
                    && payload.source_pid == SourcePid::Id(5)
                    && payload.name == "B"
                    && payload.rec_type == "movie"
                    && payload.number_of_likes.is_none()
                    && payload.number_of_dislikes.is_none()
            })
            .times(1)
            .returning(|_| Ok(sample(0)));

        let mut controller = RecommendationController::new(api);
        controller.set_field(FormField::RecommendationName, "A");
        controller.set_field(FormField::SourcePid, "5");
        controller.set_field(FormField::Name, "B");
        controller.set_field(FormField::Type, "movie");

        let created = assert_ok!(controller.create().await);
        assert_eq!(created.rec_id, Some(1));
        assert_eq!(controller.form().get(FormField::RecId), "1");
        assert_eq!(controller.form().get(FormField::NumberOfLikes), "0");
        assert_eq!(controller.flash().message(), Some(SUCCESS_MESSAGE));
    }

    #[tokio::test]
    async fn test_create_failure_shows_server_message() {
        let mut api = MockRecommendationApi::new();
        api.expect_create().returning(|_| {
            Err(ClientError::Api {
                status: 400,
                message: Some("Invalid Recommendation: missing name".to_string()),
            })
        });

        let mut controller = RecommendationController::new(api);
        assert_err!(controller.create().await);
        assert_eq!(
            controller.flash().message(),
            Some("Invalid Recommendation: missing name")
        );
    }

    #[tokio::test]
    async fn test_retrieve_populates_form() {
        let mut api = MockRecommendationApi::new();
        api.expect_retrieve()
            .withf(|rec_id: &str| rec_id == "1")
            .times(1)
            .returning(|_| Ok(sample(2)));

        let mut controller = RecommendationController::new(api);
        controller.set_field(FormField::RecId, " 1 ");

        assert_ok!(controller.retrieve().await);
        let form = controller.form();
        assert_eq!(form.get(FormField::RecId), "1");
        assert_eq!(form.get(FormField::RecommendationName), "A");
        assert_eq!(form.get(FormField::SourcePid), "5");
        assert_eq!(form.get(FormField::Name), "B");
        assert_eq!(form.get(FormField::Type), "movie");
        assert_eq!(form.get(FormField::NumberOfLikes), "2");
        assert_eq!(form.get(FormField::NumberOfDislikes), "0");
    }

    #[tokio::test]
    async fn test_failed_retrieve_clears_editable_fields() {
        let mut api = MockRecommendationApi::new();
        api.expect_retrieve().returning(|_| Err(not_found()));

        let mut controller = RecommendationController::new(api);
        controller.set_field(FormField::RecId, "1");
        controller.set_field(FormField::Name, "stale");
        controller.set_field(FormField::NumberOfLikes, "4");

        assert_err!(controller.retrieve().await);
        for field in FormField::EDITABLE {
            assert_eq!(controller.form().get(field), "");
        }
        assert_eq!(controller.form().get(FormField::RecId), "1");
        assert_eq!(
            controller.flash().message(),
            Some("Recommendation with id '1' was not found.")
        );
    }

    #[tokio::test]
    async fn test_id_actions_require_an_id() {
        let api = MockRecommendationApi::new();
        let mut controller = RecommendationController::new(api);

        let err = assert_err!(controller.retrieve().await);
        assert!(matches!(err, ClientError::MissingField("rec_id")));
        assert_err!(controller.update().await);
        assert_err!(controller.delete().await);
        assert_eq!(controller.flash().message(), Some("rec_id is required"));
    }

    #[tokio::test]
    async fn test_update_puts_form_to_record_url() {
        let mut api = MockRecommendationApi::new();
        api.expect_update()
            .withf(|rec_id: &str, payload: &RecommendationPayload| {
                rec_id == "1" && payload.name == "C" && payload.number_of_likes == Some(2)
            })
            .times(1)
            .returning(|_, payload| {
                Ok(Recommendation {
                    name: payload.name.clone(),
                    ..sample(2)
                })
            });

        let mut controller = RecommendationController::new(api);
        controller.set_field(FormField::RecId, "1");
        controller.set_field(FormField::RecommendationName, "A");
        controller.set_field(FormField::SourcePid, "5");
        controller.set_field(FormField::Name, "C");
        controller.set_field(FormField::Type, "movie");
        controller.set_field(FormField::NumberOfLikes, "2");

        assert_ok!(controller.update().await);
        assert_eq!(controller.form().get(FormField::Name), "C");
        assert_eq!(controller.flash().message(), Some(SUCCESS_MESSAGE));
    }

    #[tokio::test]
    async fn test_delete_clears_form_and_confirms() {
        let mut api = MockRecommendationApi::new();
        api.expect_delete()
            .withf(|rec_id: &str| rec_id == "1")
            .times(1)
            .returning(|_| Ok(()));

        let mut controller = RecommendationController::new(api);
        controller.set_field(FormField::RecId, "1");
        controller.set_field(FormField::Name, "B");

        assert_ok!(controller.delete().await);
        assert_eq!(controller.form().get(FormField::Name), "");
        assert_eq!(controller.flash().message(), Some(DELETED_MESSAGE));
    }

    #[tokio::test]
    async fn test_delete_failure_surfaces_server_message() {
        let mut api = MockRecommendationApi::new();
        api.expect_delete().returning(|_| Err(not_found()));

        let mut controller = RecommendationController::new(api);
        controller.set_field(FormField::RecId, "1");

        assert_err!(controller.delete().await);
        assert_eq!(
            controller.flash().message(),
            Some("Recommendation with id '1' was not found.")
        );
    }

    #[tokio::test]
    async fn test_search_renders_table_and_first_record() {
        let mut api = MockRecommendationApi::new();
        api.expect_search()
            .withf(|query: &SearchQuery| query.query_string() == "name=B&type=movie")
            .times(1)
            .returning(|_| {
                Ok(vec![
                    sample(2),
                    Recommendation {
                        rec_id: Some(2),
                        ..sample(0)
                    },
                ])
            });

        let mut controller = RecommendationController::new(api);
        controller.set_field(FormField::Name, "B");
        controller.set_field(FormField::Type, "movie");

        let rows = assert_ok!(controller.search().await);
        assert_eq!(rows, 2);
        assert_eq!(controller.results().rows[0].likes, "2");
        assert_eq!(controller.results().rows[1].rec_id, "2");
        assert_eq!(controller.form().get(FormField::RecId), "1");
        assert_eq!(
            controller.last_search().map(SearchQuery::query_string),
            Some("name=B&type=movie".to_string())
        );
    }

    #[tokio::test]
    async fn test_search_without_filters_is_unfiltered() {
        let mut api = MockRecommendationApi::new();
        api.expect_search()
            .withf(|query: &SearchQuery| query.is_empty())
            .times(1)
            .returning(|_| Ok(vec![]));

        let mut controller = RecommendationController::new(api);
        let rows = assert_ok!(controller.search().await);
        assert_eq!(rows, 0);
        assert!(controller.results().is_empty());
        assert_eq!(controller.form(), &RecommendationForm::default());
    }

    #[tokio::test]
    async fn test_like_increments_and_refreshes_last_search() {
        let mut api = MockRecommendationApi::new();
        let mut searches = 0;
        api.expect_search()
            .withf(|query: &SearchQuery| query.query_string() == "type=movie")
            .times(2)
            .returning(move |_| {
                searches += 1;
                Ok(vec![sample(if searches == 1 { 2 } else { 3 })])
            });
        api.expect_update()
            .withf(|rec_id: &str, payload: &RecommendationPayload| {
                rec_id == "1"
                    && payload.number_of_likes == Some(3)
                    && payload.number_of_dislikes == Some(0)
                    && payload.recommendation_name == "A"
                    && payload.source_pid == SourcePid::Id(5)
            })
            .times(1)
            .returning(|_, _| Ok(sample(3)));

        let mut controller = RecommendationController::new(api);
        controller.set_field(FormField::Type, "movie");
        assert_ok!(controller.search().await);

        let like = controller.results().rows[0].like;
        let saved = assert_ok!(controller.dispatch(like).await);
        assert_eq!(saved.number_of_likes, 3);
        assert_eq!(controller.results().rows[0].likes, "3");
        assert_eq!(controller.flash().message(), Some(SUCCESS_MESSAGE));
    }

    #[tokio::test]
    async fn test_dislike_increments_dislikes_only() {
        let mut api = MockRecommendationApi::new();
        api.expect_update()
            .withf(|_: &str, payload: &RecommendationPayload| {
                payload.number_of_likes == Some(2) && payload.number_of_dislikes == Some(1)
            })
            .times(1)
            .returning(|_, _| Ok(sample(2).disliked()));

        // no search made yet, so nothing is refreshed
        let mut controller = RecommendationController::new(api);
        let saved = assert_ok!(controller.dislike(&sample(2)).await);
        assert_eq!(saved.number_of_dislikes, 1);
        assert!(controller.results().is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_unknown_row() {
        let api = MockRecommendationApi::new();
        let mut controller = RecommendationController::new(api);

        let err = assert_err!(controller.dispatch(RowAction::Like { row: 3 }).await);
        assert!(matches!(err, ClientError::UnknownRow(3)));
        assert_eq!(controller.flash().message(), Some("No result in row 3"));
    }

    #[tokio::test]
    async fn test_failed_error_body_is_guarded() {
        let mut api = MockRecommendationApi::new();
        api.expect_search().returning(|_| {
            Err(ClientError::Api {
                status: 502,
                message: None,
            })
        });

        let mut controller = RecommendationController::new(api);
        assert_err!(controller.search().await);
        assert_eq!(controller.flash().message(), Some("Server error! (HTTP 502)"));
    }

    #[tokio::test]
    async fn test_failed_search_drops_previous_results() {
        let mut api = MockRecommendationApi::new();
        let mut searches = 0;
        api.expect_search().times(2).returning(move |_| {
            searches += 1;
            if searches == 1 {
                Ok(vec![sample(2)])
            } else {
                Err(ClientError::Api {
                    status: 500,
                    message: Some("Database unavailable".to_string()),
                })
            }
        });

        let mut controller = RecommendationController::new(api);
        assert_ok!(controller.search().await);
        assert_eq!(controller.results().len(), 1);

        controller.clear_form();
        controller.set_field(FormField::Type, "book");
        assert_err!(controller.search().await);
        assert!(controller.results().is_empty());
        assert!(controller.records().is_empty());
        assert_eq!(
            controller.last_search().map(SearchQuery::query_string),
            Some("type=book".to_string())
        );
        assert_eq!(controller.flash().message(), Some("Database unavailable"));

        let err = assert_err!(controller.dispatch(RowAction::Like { row: 0 }).await);
        assert!(matches!(err, ClientError::UnknownRow(0)));
    }

    #[test]
    fn test_clear_form_resets_everything() {
        let api = MockRecommendationApi::new();
        let mut controller = RecommendationController::new(api);
        controller.set_field(FormField::RecId, "1");
        controller.set_field(FormField::Name, "B");
        controller.flash.set(SUCCESS_MESSAGE);

        controller.clear_form();
        assert_eq!(controller.form(), &RecommendationForm::default());
        assert_eq!(controller.flash().message(), None);
    }
}
