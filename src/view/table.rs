use std::fmt::Display;

use crate::models::Recommendation;

const HEADERS: [&str; 8] = [
    "Row",
    "ID",
    "Name",
    "Source ID",
    "Source Name",
    "Type",
    "Likes",
    "Dislikes",
];

/// Action attached to a result row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Like { row: usize },
    Dislike { row: usize },
}

impl RowAction {
    pub fn row(&self) -> usize {
        match self {
            RowAction::Like { row } | RowAction::Dislike { row } => *row,
        }
    }
}

/// One rendered search result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub row: usize,
    pub rec_id: String,
    pub recommendation_name: String,
    pub source_pid: String,
    pub name: String,
    pub rec_type: String,
    pub likes: String,
    pub dislikes: String,
    pub like: RowAction,
    pub dislike: RowAction,
}

impl RowView {
    fn cells(&self) -> [String; 8] {
        [
            self.row.to_string(),
            self.rec_id.clone(),
            self.recommendation_name.clone(),
            self.source_pid.clone(),
            self.name.clone(),
            self.rec_type.clone(),
            self.likes.clone(),
            self.dislikes.clone(),
        ]
    }
}

/// Table built from the last search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsTable {
    pub rows: Vec<RowView>,
}

impl ResultsTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// Builds one row per record, in response order
pub fn render_results(records: &[Recommendation]) -> ResultsTable {
    let rows = records
        .iter()
        .enumerate()
        .map(|(row, rec)| RowView {
            row,
            rec_id: rec.rec_id.map(|id| id.to_string()).unwrap_or_default(),
            recommendation_name: rec.recommendation_name.clone(),
            source_pid: rec.source_pid.to_string(),
            name: rec.name.clone(),
            rec_type: rec.rec_type.clone(),
            likes: rec.number_of_likes.to_string(),
            dislikes: rec.number_of_dislikes.to_string(),
            like: RowAction::Like { row },
            dislike: RowAction::Dislike { row },
        })
        .collect();

    ResultsTable { rows }
}

impl Display for ResultsTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells: Vec<[String; 8]> = self.rows.iter().map(RowView::cells).collect();

        let mut widths = HEADERS.map(|h| h.chars().count());
        for row in &cells {
            for (width, cell) in widths.iter_mut().zip(row.iter()) {
                *width = (*width).max(cell.chars().count());
            }
        }

        let line = |f: &mut std::fmt::Formatter<'_>, values: &[&str]| -> std::fmt::Result {
            let padded: Vec<String> = values
                .iter()
                .zip(widths.iter())
                .map(|(value, width)| format!("{:<width$}", value, width = *width))
                .collect();
            writeln!(f, "| {} |", padded.join(" | "))
        };

        line(f, &HEADERS[..])?;
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        writeln!(f, "|-{}-|", rule.join("-|-"))?;

        for row in &cells {
            let values: Vec<&str> = row.iter().map(String::as_str).collect();
            line(f, &values[..])?;
        }

        if self.rows.is_empty() {
            writeln!(f, "(no results)")?;
        }
        Ok(())
    }
}
