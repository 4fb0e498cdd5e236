use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 使用者在表單上輸入的三個欄位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelRequest {
    pub home_country: String,
    pub desired_country: String,
    pub activity: String,
}

impl TravelRequest {
    pub fn new(
        home_country: impl Into<String>,
        desired_country: impl Into<String>,
        activity: impl Into<String>,
    ) -> Self {
        Self {
            home_country: trimmed(home_country.into()),
            desired_country: trimmed(desired_country.into()),
            activity: trimmed(activity.into()),
        }
    }
}

fn trimmed(value: String) -> String {
    value.trim().to_string()
}

/// 遠端表格產生的三個輸出欄位
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelAdvice {
    pub flight_duration: String,
    pub currency: String,
    pub activity_locations: String,
}

impl TravelAdvice {
    /// Labels of the output fields that are empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("Flight Duration", &self.flight_duration),
            ("Currency", &self.currency),
            ("Activity Locations", &self.activity_locations),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| label)
        .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Column names of the remote table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableColumns {
    pub home_country: String,
    pub desired_country: String,
    pub activity: String,
    pub flight_duration: String,
    pub currency: String,
    pub activity_locations: String,
}

impl Default for TableColumns {
    fn default() -> Self {
        Self {
            home_country: "Home Country".to_string(),
            desired_country: "Desired Country".to_string(),
            activity: "Preferred Activity".to_string(),
            flight_duration: "Flight Duration".to_string(),
            currency: "Currency".to_string(),
            activity_locations: "Activity Locations".to_string(),
        }
    }
}

/// 遠端表格的一列，欄位值格式為 `{ "value": ... }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableRow {
    pub cells: HashMap<String, serde_json::Value>,
}

impl TableRow {
    pub fn cell_text(&self, column: &str) -> Option<&str> {
        self.cells.get(column)?.get("value")?.as_str()
    }

    pub fn echoes(&self, columns: &TableColumns, request: &TravelRequest) -> bool {
        self.cell_text(&columns.home_country) == Some(request.home_country.as_str())
            && self.cell_text(&columns.desired_country) == Some(request.desired_country.as_str())
            && self.cell_text(&columns.activity) == Some(request.activity.as_str())
    }

    pub fn advice(&self, columns: &TableColumns) -> TravelAdvice {
        let text = |column: &str| self.cell_text(column).unwrap_or_default().to_string();
        TravelAdvice {
            flight_duration: text(&columns.flight_duration),
            currency: text(&columns.currency),
            activity_locations: text(&columns.activity_locations),
        }
    }
}

/// `GET .../rows` 的回應
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RowsPage {
    #[serde(default)]
    pub items: Vec<TableRow>,
}
