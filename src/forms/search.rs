use serde::{Deserialize, Serialize};

use super::{FieldSpec, FormSchema};
use crate::entities::cafe;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchCategory {
    Name,
    Location,
    Seats,
    Toilet,
    WiFi,
    Sockets,
    CallerFriendly,
    CoffeePrice,
}

impl SearchCategory {
    pub const ALL: [SearchCategory; 8] = [
        SearchCategory::Name,
        SearchCategory::Location,
        SearchCategory::Seats,
        SearchCategory::Toilet,
        SearchCategory::WiFi,
        SearchCategory::Sockets,
        SearchCategory::CallerFriendly,
        SearchCategory::CoffeePrice,
    ];

    pub const LABELS: &'static [&'static str] = &[
        "Name",
        "Location",
        "Seats",
        "Toilet",
        "WiFi",
        "Sockets",
        "Caller Friendly",
        "Coffee Price",
    ];

    pub fn label(self) -> &'static str {
        match self {
            SearchCategory::Name => "Name",
            SearchCategory::Location => "Location",
            SearchCategory::Seats => "Seats",
            SearchCategory::Toilet => "Toilet",
            SearchCategory::WiFi => "WiFi",
            SearchCategory::Sockets => "Sockets",
            SearchCategory::CallerFriendly => "Caller Friendly",
            SearchCategory::CoffeePrice => "Coffee Price",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }

    /// Whether the category targets one of the boolean columns.
    pub fn is_flag(self) -> bool {
        matches!(
            self,
            SearchCategory::Toilet
                | SearchCategory::WiFi
                | SearchCategory::Sockets
                | SearchCategory::CallerFriendly
        )
    }

    /// Column the category filters on.
    pub fn column(self) -> cafe::Column {
        match self {
            SearchCategory::Name => cafe::Column::Name,
            SearchCategory::Location => cafe::Column::Location,
            SearchCategory::Seats => cafe::Column::Seats,
            SearchCategory::Toilet => cafe::Column::HasToilet,
            SearchCategory::WiFi => cafe::Column::HasWifi,
            SearchCategory::Sockets => cafe::Column::HasSockets,
            SearchCategory::CallerFriendly => cafe::Column::CanTakeCalls,
            SearchCategory::CoffeePrice => cafe::Column::CoffeePrice,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchForm {
    pub category: String,
    #[serde(alias = "cafe")]
    pub query: String,
    pub csrf_token: String,
}

impl FormSchema for SearchForm {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::choice("category", "Search Category", SearchCategory::LABELS),
        FieldSpec::text("query", "Search", false),
    ];

    fn value(&self, field: &str) -> &str {
        match field {
            "category" => &self.category,
            "query" => &self.query,
            _ => "",
        }
    }

    fn csrf_token(&self) -> &str {
        &self.csrf_token
    }
}

impl SearchForm {
    pub fn category(&self) -> Option<SearchCategory> {
        SearchCategory::from_label(&self.category)
    }
}
