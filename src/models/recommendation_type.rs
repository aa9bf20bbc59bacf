use std::{fmt::Display, str::FromStr};

/// Categories the recommendation service knows about
///
/// The wire `type` field is free text; these are only used for hints and
/// normalizing what the user typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationType {
    CrossSell,
    UpSell,
    Accessory,
}

impl RecommendationType {
    pub const ALL: [RecommendationType; 3] = [
        RecommendationType::CrossSell,
        RecommendationType::UpSell,
        RecommendationType::Accessory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationType::CrossSell => "CROSSSELL",
            RecommendationType::UpSell => "UPSELL",
            RecommendationType::Accessory => "ACCESSORY",
        }
    }
}

impl Display for RecommendationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecommendationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "CROSSSELL" => Ok(RecommendationType::CrossSell),
            "UPSELL" => Ok(RecommendationType::UpSell),
            "ACCESSORY" => Ok(RecommendationType::Accessory),
            other => Err(format!("unknown recommendation type: {}", other)),
        }
    }
}

/// Uppercases known categories and leaves anything else as typed
pub fn normalize_type(input: &str) -> String {
    input
        .parse::<RecommendationType>()
        .map(|t| t.as_str().to_string())
        .unwrap_or_else(|_| input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(
            "upsell".parse::<RecommendationType>(),
            Ok(RecommendationType::UpSell)
        );
        assert_eq!(
            " Accessory ".parse::<RecommendationType>(),
            Ok(RecommendationType::Accessory)
        );
        assert!("movie".parse::<RecommendationType>().is_err());
    }

    #[test]
    fn test_normalize_keeps_free_form_types() {
        assert_eq!(normalize_type("crosssell"), "CROSSSELL");
        assert_eq!(normalize_type("movie"), "movie");
    }
}
