// Chart domain models
use crate::domain::error::DashboardError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub name: String,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    #[default]
    Bar,
    Line,
    Pie,
    Area,
}

impl ChartType {
    /// Display order used by the chart type selector.
    pub const ALL: [ChartType; 4] = [ChartType::Bar, ChartType::Line, ChartType::Area, ChartType::Pie];

    pub fn as_str(self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Line => "line",
            ChartType::Pie => "pie",
            ChartType::Area => "area",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartType::Bar => "Bar",
            ChartType::Line => "Line",
            ChartType::Pie => "Pie",
            ChartType::Area => "Area",
        }
    }

    /// Classify a free-text visualization label such as "Line Graph".
    /// Labels that mention no known kind are shown as bar charts.
    pub fn classify_label(label: &str) -> ChartType {
        let label = label.to_lowercase();
        [ChartType::Bar, ChartType::Line, ChartType::Area, ChartType::Pie]
            .into_iter()
            .find(|kind| label.contains(kind.as_str()))
            .unwrap_or(ChartType::Bar)
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bar" => Ok(ChartType::Bar),
            "line" => Ok(ChartType::Line),
            "pie" => Ok(ChartType::Pie),
            "area" => Ok(ChartType::Area),
            _ => Err(DashboardError::InvalidChartType(s.to_string())),
        }
    }
}

/// Serde helpers for chart type fields on API records. Names are matched
/// through [`ChartType::from_str`]; unrecognized ones are dropped rather than
/// failing the whole record.
pub mod lenient {
    use super::*;

    pub fn option<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ChartType>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(|name| match name.parse() {
            Ok(chart_type) => Some(chart_type),
            Err(e) => {
                tracing::debug!("Ignoring stored chart type: {}", e);
                None
            }
        }))
    }

    pub fn or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ChartType, D::Error> {
        Ok(option(deserializer)?.unwrap_or_default())
    }
}

/// What a detail view hands to the chart renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub chart_type: ChartType,
    pub points: Vec<ChartPoint>,
}
