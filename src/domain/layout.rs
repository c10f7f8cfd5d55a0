// Layout domain model
use crate::domain::asset::Kpi;
use crate::domain::asset::AssetStats;
use crate::domain::chart::{lenient, ChartType};
use crate::domain::error::DashboardError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutKpiRef {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::option")]
    pub chart_type: Option<ChartType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layout {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub pages: u32,
    #[serde(default)]
    pub kpis: Vec<LayoutKpiRef>,
    #[serde(default)]
    pub preview: String,
    #[serde(flatten)]
    pub stats: AssetStats,
}

impl Layout {
    /// Blank layout used when creating a new one.
    pub fn new_draft() -> Self {
        Self {
            id: "new".to_string(),
            title: "INTES".to_string(),
            description: "Descriptive name of the Layout".to_string(),
            pages: 6,
            kpis: Vec::new(),
            preview: "/placeholder.svg?height=400&width=600".to_string(),
            stats: AssetStats::default(),
        }
    }
}

/// A KPI chosen for a layout together with the chart it is shown as.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedKpi {
    pub kpi: Kpi,
    pub chart_type: ChartType,
}

impl SelectedKpi {
    pub fn new(kpi: Kpi, chart_type: ChartType) -> Self {
        Self { kpi, chart_type }
    }
}

/// Resolve a layout's stored KPI references against the full catalog, in
/// layout order. References with no catalog entry are dropped.
pub fn resolve_layout_kpis(refs: &[LayoutKpiRef], catalog: &[Kpi]) -> Vec<SelectedKpi> {
    refs.iter()
        .filter_map(|kpi_ref| {
            let Some(kpi) = catalog.iter().find(|k| k.id == kpi_ref.id) else {
                tracing::debug!("Dropping layout reference to unknown KPI {}", kpi_ref.id);
                return None;
            };
            Some(SelectedKpi::new(kpi.clone(), kpi_ref.chart_type.unwrap_or_default()))
        })
        .collect()
}

/// One line of the "Used KPIs" list.
#[derive(Debug, Clone, PartialEq)]
pub struct UsedKpiRow {
    pub id: String,
    pub title: String,
    pub chart_type: ChartType,
}

impl UsedKpiRow {
    pub fn caption(&self) -> String {
        format!("{} chart", self.chart_type)
    }
}

/// Rows for the selection when there is one, otherwise for the layout's
/// stored references.
pub fn used_kpi_rows(selected: &[SelectedKpi], refs: &[LayoutKpiRef]) -> Vec<UsedKpiRow> {
    if !selected.is_empty() {
        return selected
            .iter()
            .map(|s| UsedKpiRow {
                id: s.kpi.id.clone(),
                title: s.kpi.title.clone(),
                chart_type: s.chart_type,
            })
            .collect();
    }

    refs.iter()
        .map(|r| UsedKpiRow {
            id: r.id.clone(),
            title: if r.title.trim().is_empty() {
                format!("KPI {}", r.id)
            } else {
                r.title.clone()
            },
            chart_type: r.chart_type.unwrap_or_default(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutTemplate {
    pub columns: usize,
    pub rows: usize,
}

impl LayoutTemplate {
    pub fn cells_per_page(&self) -> usize {
        self.columns * self.rows
    }
}

impl Default for LayoutTemplate {
    fn default() -> Self {
        Self { columns: 2, rows: 2 }
    }
}

impl FromStr for LayoutTemplate {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DashboardError::InvalidTemplate(s.to_string());
        let (columns, rows) = s.trim().split_once(|c: char| c == 'x' || c == 'X').ok_or_else(invalid)?;
        let columns: usize = columns.trim().parse().map_err(|_| invalid())?;
        let rows: usize = rows.trim().parse().map_err(|_| invalid())?;
        if columns == 0 || rows == 0 {
            return Err(invalid());
        }
        Ok(Self { columns, rows })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreviewCell {
    pub title: String,
    pub chart_type: ChartType,
}

/// Rows of optional cells; `None` is an empty slot.
pub type PreviewPage = Vec<Vec<Option<PreviewCell>>>;

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPreview {
    pub template: LayoutTemplate,
    pub pages: Vec<PreviewPage>,
}

impl LayoutPreview {
    /// Pack cells row-major into pages of the template's size. The last page
    /// is padded with empty slots.
    pub fn compose(rows: &[UsedKpiRow], template: LayoutTemplate) -> Self {
        let pages = rows
            .chunks(template.cells_per_page())
            .map(|chunk| {
                let mut cells: Vec<Option<PreviewCell>> = chunk
                    .iter()
                    .map(|row| {
                        Some(PreviewCell {
                            title: row.title.clone(),
                            chart_type: row.chart_type,
                        })
                    })
                    .collect();
                cells.resize(template.cells_per_page(), None);
                cells
                    .chunks(template.columns)
                    .map(<[Option<PreviewCell>]>::to_vec)
                    .collect()
            })
            .collect();

        Self { template, pages }
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kpi_ref(id: &str, chart_type: Option<ChartType>) -> LayoutKpiRef {
        LayoutKpiRef {
            id: id.to_string(),
            title: String::new(),
            chart_type,
        }
    }

    #[test]
    fn test_resolve_drops_unknown_and_defaults_chart() {
        let catalog = vec![Kpi::new("k1", "Reach"), Kpi::new("k2", "Coverage")];
        let refs = vec![
            kpi_ref("k2", Some(ChartType::Line)),
            kpi_ref("missing", Some(ChartType::Pie)),
            kpi_ref("k1", None),
        ];

        let resolved = resolve_layout_kpis(&refs, &catalog);
        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].kpi.id, "k2");
        assert_eq!(resolved[0].chart_type, ChartType::Line);
        assert_eq!(resolved[1].kpi.id, "k1");
        assert_eq!(resolved[1].chart_type, ChartType::Bar);
    }

    #[test]
    fn test_used_rows_fall_back_to_refs() {
        let refs = vec![kpi_ref("7", None)];
        let rows = used_kpi_rows(&[], &refs);
        assert_eq!(rows[0].title, "KPI 7");
        assert_eq!(rows[0].caption(), "bar chart");

        let selected = vec![SelectedKpi::new(Kpi::new("k1", "Reach"), ChartType::Area)];
        let rows = used_kpi_rows(&selected, &refs);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Reach");
        assert_eq!(rows[0].caption(), "area chart");
    }

    #[test]
    fn test_loose_stored_chart_types_keep_layout() {
        let json = r#"{
            "id": "l1", "title": "Weekly",
            "kpis": [
                {"id": "k1", "chartType": "Bar"},
                {"id": "k2", "chartType": "scatter"},
                {"id": "k3", "chartType": " Line "}
            ]
        }"#;
        let layout: Layout = serde_json::from_str(json).unwrap();
        assert_eq!(layout.title, "Weekly");
        assert_eq!(layout.kpis.len(), 3);
        assert_eq!(layout.kpis[0].chart_type, Some(ChartType::Bar));
        assert_eq!(layout.kpis[1].chart_type, None);

        let catalog = vec![Kpi::new("k1", "Reach"), Kpi::new("k2", "Coverage"), Kpi::new("k3", "Tone")];
        let resolved = resolve_layout_kpis(&layout.kpis, &catalog);
        let types: Vec<_> = resolved.iter().map(|s| s.chart_type).collect();
        assert_eq!(types, vec![ChartType::Bar, ChartType::Bar, ChartType::Line]);

        let rows = used_kpi_rows(&[], &layout.kpis);
        assert_eq!(rows[1].caption(), "bar chart");
    }

    #[test]
    fn test_parse_template() {
        assert_eq!("2x2".parse::<LayoutTemplate>().unwrap(), LayoutTemplate::default());
        assert_eq!(
            "3X1".parse::<LayoutTemplate>().unwrap(),
            LayoutTemplate { columns: 3, rows: 1 }
        );
        assert!("0x2".parse::<LayoutTemplate>().is_err());
        assert!("2by2".parse::<LayoutTemplate>().is_err());
        assert!("x".parse::<LayoutTemplate>().is_err());
    }

    #[test]
    fn test_compose_pages_and_padding() {
        let rows: Vec<UsedKpiRow> = (1..=5)
            .map(|i| UsedKpiRow {
                id: i.to_string(),
                title: format!("KPI {i}"),
                chart_type: ChartType::Bar,
            })
            .collect();

        let preview = LayoutPreview::compose(&rows, LayoutTemplate::default());
        assert_eq!(preview.pages.len(), 2);
        assert_eq!(preview.pages[0].len(), 2);
        assert_eq!(preview.pages[0][1][0].as_ref().unwrap().title, "KPI 3");
        assert_eq!(preview.pages[1][0][0].as_ref().unwrap().title, "KPI 5");
        assert!(preview.pages[1][0][1].is_none());
        assert!(preview.pages[1][1].iter().all(Option::is_none));

        assert!(LayoutPreview::compose(&[], LayoutTemplate::default()).is_empty());
    }
}
