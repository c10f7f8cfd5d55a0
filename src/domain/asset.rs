// Asset domain models
use crate::domain::chart::{lenient, ChartPoint, ChartType};
use crate::domain::layout::Layout;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Kpi,
    Dataviz,
    Layout,
    Storyboard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Chart,
    Layout,
    Document,
}

impl AssetKind {
    pub const ALL: [AssetKind; 4] = [
        AssetKind::Kpi,
        AssetKind::Dataviz,
        AssetKind::Layout,
        AssetKind::Storyboard,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AssetKind::Kpi => "kpi",
            AssetKind::Dataviz => "dataviz",
            AssetKind::Layout => "layout",
            AssetKind::Storyboard => "storyboard",
        }
    }

    pub fn icon(self) -> IconKind {
        match self {
            AssetKind::Kpi | AssetKind::Dataviz => IconKind::Chart,
            AssetKind::Layout => IconKind::Layout,
            AssetKind::Storyboard => IconKind::Document,
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        AssetKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| format!("unknown asset type `{s}`"))
    }
}

/// Summary shown in an asset grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: AssetKind,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub used_count: Option<u64>,
    #[serde(default)]
    pub last_updated: Option<NaiveDate>,
}

impl Asset {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        kind: AssetKind,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            kind,
            icon: None,
            used_count: None,
            last_updated: None,
        }
    }
}

/// Usage stats carried on every full asset record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetStats {
    #[serde(default)]
    pub used_count: Option<u64>,
    #[serde(default)]
    pub last_updated: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessQuestion {
    pub id: String,
    pub question: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub business_questions: Vec<BusinessQuestion>,
    #[serde(default)]
    pub calculation: String,
    #[serde(default)]
    pub visuals_available: Vec<String>,
    #[serde(default)]
    pub affiliate_applicability: Vec<String>,
    #[serde(default)]
    pub data: Option<Vec<ChartPoint>>,
    #[serde(flatten)]
    pub stats: AssetStats,
}

impl Kpi {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            icon: None,
            business_questions: Vec::new(),
            calculation: String::new(),
            visuals_available: Vec::new(),
            affiliate_applicability: Vec::new(),
            data: None,
            stats: AssetStats::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataViz {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub chart_data: Vec<ChartPoint>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub chart_type: ChartType,
    #[serde(flatten)]
    pub stats: AssetStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Storyboard {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub kpis: Vec<String>,
    #[serde(default)]
    pub affiliates: Vec<String>,
    #[serde(default)]
    pub preview: String,
    #[serde(flatten)]
    pub stats: AssetStats,
}

/// Full asset record, keyed on its `type` discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AssetVariant {
    Kpi(Kpi),
    Dataviz(DataViz),
    Layout(Layout),
    Storyboard(Storyboard),
}

impl AssetVariant {
    pub fn id(&self) -> &str {
        match self {
            AssetVariant::Kpi(kpi) => &kpi.id,
            AssetVariant::Dataviz(viz) => &viz.id,
            AssetVariant::Layout(layout) => &layout.id,
            AssetVariant::Storyboard(board) => &board.id,
        }
    }

    pub fn kind(&self) -> AssetKind {
        match self {
            AssetVariant::Kpi(_) => AssetKind::Kpi,
            AssetVariant::Dataviz(_) => AssetKind::Dataviz,
            AssetVariant::Layout(_) => AssetKind::Layout,
            AssetVariant::Storyboard(_) => AssetKind::Storyboard,
        }
    }

    pub fn stats(&self) -> &AssetStats {
        match self {
            AssetVariant::Kpi(kpi) => &kpi.stats,
            AssetVariant::Dataviz(viz) => &viz.stats,
            AssetVariant::Layout(layout) => &layout.stats,
            AssetVariant::Storyboard(board) => &board.stats,
        }
    }

    pub fn summary(&self) -> Asset {
        let (title, description, icon) = match self {
            AssetVariant::Kpi(kpi) => (&kpi.title, &kpi.description, kpi.icon.clone()),
            AssetVariant::Dataviz(viz) => (&viz.title, &viz.description, viz.icon.clone()),
            AssetVariant::Layout(layout) => (&layout.title, &layout.description, None),
            AssetVariant::Storyboard(board) => (&board.title, &board.description, None),
        };
        let stats = self.stats();
        let mut asset = Asset::new(self.id(), title.as_str(), description.as_str(), self.kind());
        asset.icon = icon;
        asset.used_count = stats.used_count;
        asset.last_updated = stats.last_updated;
        asset
    }
}

/// Detail payload as returned by the asset API. Its shape varies by asset
/// type, so every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetDetail {
    #[serde(default)]
    pub data: Option<Vec<ChartPoint>>,
    #[serde(default)]
    pub chart_data: Option<Vec<ChartPoint>>,
    #[serde(default)]
    pub visuals_available: Option<Vec<String>>,
    #[serde(default)]
    pub chart_type: Option<String>,
}

impl AssetDetail {
    /// Series to chart: `data` first, then `chartData`. `None` hides the
    /// chart section.
    pub fn chart_series(&self) -> Option<&[ChartPoint]> {
        [self.data.as_deref(), self.chart_data.as_deref()]
            .into_iter()
            .flatten()
            .find(|points| !points.is_empty())
    }

    pub fn chart_types(&self) -> Vec<ChartType> {
        normalize_chart_types(self)
    }
}

impl From<&AssetVariant> for AssetDetail {
    fn from(variant: &AssetVariant) -> Self {
        match variant {
            AssetVariant::Kpi(kpi) => AssetDetail {
                data: kpi.data.clone(),
                visuals_available: Some(kpi.visuals_available.clone()),
                ..AssetDetail::default()
            },
            AssetVariant::Dataviz(viz) => AssetDetail {
                chart_data: Some(viz.chart_data.clone()),
                chart_type: Some(viz.chart_type.to_string()),
                ..AssetDetail::default()
            },
            AssetVariant::Layout(_) | AssetVariant::Storyboard(_) => AssetDetail::default(),
        }
    }
}

/// Derive the chart types a detail payload can be shown as. Never empty.
///
/// A present but empty `visualsAvailable` list falls through to the declared
/// `chartType`; an unparseable `chartType` falls through to `[bar]`.
pub fn normalize_chart_types(detail: &AssetDetail) -> Vec<ChartType> {
    if let Some(labels) = detail.visuals_available.as_ref().filter(|l| !l.is_empty()) {
        return labels.iter().map(|label| ChartType::classify_label(label)).collect();
    }

    if let Some(declared) = &detail.chart_type {
        match declared.parse::<ChartType>() {
            Ok(chart_type) => return vec![chart_type],
            Err(e) => tracing::debug!("Ignoring declared chart type: {}", e),
        }
    }

    vec![ChartType::Bar]
}
