use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::Display;

/// Identifier of the product a recommendation is attached to
///
/// The service stores it as an integer, but form input may carry any text, so
/// non-numeric values are kept verbatim and sent as JSON strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourcePid {
    Id(i64),
    Text(String),
}

impl SourcePid {
    /// Interprets a form value, preferring the numeric representation
    pub fn from_input(value: &str) -> Self {
        let trimmed = value.trim();
        trimmed
            .parse::<i64>()
            .map(SourcePid::Id)
            .unwrap_or_else(|_| SourcePid::Text(trimmed.to_string()))
    }
}

impl Default for SourcePid {
    fn default() -> Self {
        SourcePid::Text(String::new())
    }
}

impl Display for SourcePid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourcePid::Id(id) => write!(f, "{}", id),
            SourcePid::Text(text) => write!(f, "{}", text),
        }
    }
}

/// A recommendation as returned by the service
///
/// Missing or `null` descriptive fields decode as empty values, counters as 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Server-assigned identifier, absent until the record is created
    #[serde(default)]
    pub rec_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendation_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_pid: SourcePid,
    /// Name of the source product
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub rec_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub number_of_likes: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub number_of_dislikes: u32,
}

/// The service stores nullable columns and sends them back as `null`
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Recommendation {
    /// Copy of this record with one more like
    pub fn liked(&self) -> Self {
        Self {
            number_of_likes: self.number_of_likes.saturating_add(1),
            ..self.clone()
        }
    }

    /// Copy of this record with one more dislike
    pub fn disliked(&self) -> Self {
        Self {
            number_of_dislikes: self.number_of_dislikes.saturating_add(1),
            ..self.clone()
        }
    }
}

/// Body of create and update requests
///
/// Never carries `rec_id`: the identifier travels in the URL path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationPayload {
    pub recommendation_name: String,
    pub source_pid: SourcePid,
    pub name: String,
    #[serde(rename = "type")]
    pub rec_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_likes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_dislikes: Option<u32>,
}

impl From<&Recommendation> for RecommendationPayload {
    fn from(rec: &Recommendation) -> Self {
        Self {
            recommendation_name: rec.recommendation_name.clone(),
            source_pid: rec.source_pid.clone(),
            name: rec.name.clone(),
            rec_type: rec.rec_type.clone(),
            number_of_likes: Some(rec.number_of_likes),
            number_of_dislikes: Some(rec.number_of_dislikes),
        }
    }
}

/// Error body sent by the service on failure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub message: String,
}
