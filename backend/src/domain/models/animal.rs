//! Domain model for an animal.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Animal {
    pub id: String,
    pub name: String,
    pub category_name: String,
    pub gender: String,
    pub birth_day: Option<String>, // YYYY-MM-DD
    pub genus: Option<String>,
    pub weight: u32,
    pub is_health: bool,
    pub description: Option<String>,
    pub created_at: String, // RFC 3339 timestamp
    pub updated_at: String, // RFC 3339 timestamp
}

/// Listing filters. Text filters match case-insensitively on substrings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnimalFilter {
    pub category: Option<String>,
    pub genus: Option<String>,
    pub gender: Option<String>,
    pub is_health: Option<bool>,
    pub weight: Option<u32>,
}

impl AnimalFilter {
    /// Inclusive weight band of +/-10% around the requested weight.
    pub fn weight_band(&self) -> Option<(u32, u32)> {
        self.weight.filter(|w| *w > 0).map(|w| {
            let tenth = w / 10;
            (w - tenth, w.saturating_add(tenth))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_band() {
        let filter = AnimalFilter {
            weight: Some(200),
            ..Default::default()
        };
        assert_eq!(filter.weight_band(), Some((180, 220)));

        let zero = AnimalFilter {
            weight: Some(0),
            ..Default::default()
        };
        assert_eq!(zero.weight_band(), None);
        assert_eq!(AnimalFilter::default().weight_band(), None);
    }
}
