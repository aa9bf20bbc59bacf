use std::{fmt::Display, str::FromStr};

use crate::models::{normalize_type, Recommendation, RecommendationPayload, SourcePid};

use super::SearchQuery;

/// Input fields of the recommendation form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    RecId,
    RecommendationName,
    SourcePid,
    Name,
    Type,
    NumberOfLikes,
    NumberOfDislikes,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::RecId,
        FormField::RecommendationName,
        FormField::SourcePid,
        FormField::Name,
        FormField::Type,
        FormField::NumberOfLikes,
        FormField::NumberOfDislikes,
    ];

    /// Fields the user edits; everything but the identifier
    pub const EDITABLE: [FormField; 6] = [
        FormField::RecommendationName,
        FormField::SourcePid,
        FormField::Name,
        FormField::Type,
        FormField::NumberOfLikes,
        FormField::NumberOfDislikes,
    ];

    /// Fields that become search filters, in query order
    pub const SEARCHABLE: [FormField; 4] = [
        FormField::RecommendationName,
        FormField::SourcePid,
        FormField::Name,
        FormField::Type,
    ];

    /// Input identifier, also the JSON/query key
    pub fn key(&self) -> &'static str {
        match self {
            FormField::RecId => "rec_id",
            FormField::RecommendationName => "recommendation_name",
            FormField::SourcePid => "source_pid",
            FormField::Name => "name",
            FormField::Type => "type",
            FormField::NumberOfLikes => "number_of_likes",
            FormField::NumberOfDislikes => "number_of_dislikes",
        }
    }
}

impl Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FormField {
    type Err = String;

    /// Accepts both `name` and the `rec_`-prefixed `rec_name` spelling
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        let lookup = |k: &str| FormField::ALL.into_iter().find(|f| f.key() == k);

        lookup(&key)
            .or_else(|| key.strip_prefix("rec_").and_then(lookup))
            .ok_or_else(|| format!("unknown field: {}", s))
    }
}

/// Values of the form inputs, all held as text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecommendationForm {
    rec_id: String,
    recommendation_name: String,
    source_pid: String,
    name: String,
    rec_type: String,
    number_of_likes: String,
    number_of_dislikes: String,
}

impl RecommendationForm {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::RecId => &self.rec_id,
            FormField::RecommendationName => &self.recommendation_name,
            FormField::SourcePid => &self.source_pid,
            FormField::Name => &self.name,
            FormField::Type => &self.rec_type,
            FormField::NumberOfLikes => &self.number_of_likes,
            FormField::NumberOfDislikes => &self.number_of_dislikes,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::RecId => self.rec_id = value,
            FormField::RecommendationName => self.recommendation_name = value,
            FormField::SourcePid => self.source_pid = value,
            FormField::Name => self.name = value,
            FormField::Type => self.rec_type = value,
            FormField::NumberOfLikes => self.number_of_likes = value,
            FormField::NumberOfDislikes => self.number_of_dislikes = value,
        }
    }

    /// Writes every field of `record` into the form
    ///
    /// A record without an identifier leaves the id input as it was.
    pub fn populate(&mut self, record: &Recommendation) {
        if let Some(id) = record.rec_id {
            self.rec_id = id.to_string();
        }
        self.recommendation_name = record.recommendation_name.clone();
        self.source_pid = record.source_pid.to_string();
        self.name = record.name.clone();
        self.rec_type = record.rec_type.clone();
        self.number_of_likes = record.number_of_likes.to_string();
        self.number_of_dislikes = record.number_of_dislikes.to_string();
    }

    /// Empties the editable inputs and keeps the identifier
    pub fn clear(&mut self) {
        for field in FormField::EDITABLE {
            self.set(field, String::new());
        }
    }

    /// Empties every input, identifier included
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Identifier typed in the form, if any
    pub fn rec_id(&self) -> Option<&str> {
        Some(self.rec_id.trim()).filter(|id| !id.is_empty())
    }

    /// Body of a create request: the four descriptive fields only
    pub fn create_payload(&self) -> RecommendationPayload {
        RecommendationPayload {
            recommendation_name: self.recommendation_name.clone(),
            source_pid: SourcePid::from_input(&self.source_pid),
            name: self.name.clone(),
            rec_type: normalize_type(&self.rec_type),
            number_of_likes: None,
            number_of_dislikes: None,
        }
    }

    /// Body of an update request; counters are included when they hold numbers
    pub fn update_payload(&self) -> RecommendationPayload {
        RecommendationPayload {
            number_of_likes: self.number_of_likes.trim().parse().ok(),
            number_of_dislikes: self.number_of_dislikes.trim().parse().ok(),
            ..self.create_payload()
        }
    }

    /// Search filters from the non-empty searchable inputs
    pub fn search_query(&self) -> SearchQuery {
        let filters = FormField::SEARCHABLE
            .into_iter()
            .filter_map(|field| {
                let value = self.get(field).trim();
                if value.is_empty() {
                    return None;
                }
                let value = match field {
                    FormField::Type => normalize_type(value),
                    _ => value.to_string(),
                };
                Some((field.key(), value))
            })
            .collect();

        SearchQuery::new(filters)
    }
}

impl Display for RecommendationForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for field in FormField::ALL {
            writeln!(f, "  {:<20} {}", field.key(), self.get(field))?;
        }
        Ok(())
    }
}
