// Errors raised when a caller breaks a view model's contract
use crate::domain::chart::ChartType;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DashboardError {
    #[error("view is closed")]
    ViewClosed,
    #[error("chart type {requested} is not offered; available: {available:?}")]
    ChartTypeUnavailable {
        requested: ChartType,
        available: Vec<ChartType>,
    },
    #[error("unknown asset: {0}")]
    UnknownAsset(String),
    #[error("kpi selector is not open")]
    SelectorNotOpen,
    #[error("kpi {0} is not part of the current selection")]
    KpiNotInDraft(String),
    #[error("invalid chart type: {0}")]
    InvalidChartType(String),
    #[error("invalid layout template `{0}`, expected <columns>x<rows>")]
    InvalidTemplate(String),
}
