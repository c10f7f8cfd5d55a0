// Layout detail view - KPI composition for one opened layout
use crate::application::loadable::Loadable;
use crate::application::view_events::{Applied, DetailEvent, EventTarget, FetchPayload, ViewToken};
use crate::domain::asset::{normalize_chart_types, AssetDetail, AssetKind, AssetVariant, Kpi};
use crate::domain::chart::ChartType;
use crate::domain::error::DashboardError;
use crate::domain::layout::{
    resolve_layout_kpis, used_kpi_rows, Layout, LayoutPreview, LayoutTemplate, SelectedKpi, UsedKpiRow,
};

/// Chart types a KPI can be placed as, in the order it lists them.
fn offered_chart_types(kpi: &Kpi) -> Vec<ChartType> {
    let detail = AssetDetail::from(&AssetVariant::Kpi(kpi.clone()));
    normalize_chart_types(&detail)
}

/// Chart a KPI starts with when first picked: the first kind it offers.
fn default_chart_type(kpi: &Kpi) -> ChartType {
    offered_chart_types(kpi).first().copied().unwrap_or_default()
}

/// Working copy of the selection while the KPI selector is open.
#[derive(Debug, Clone, PartialEq)]
pub struct KpiSelector {
    draft: Vec<SelectedKpi>,
}

impl KpiSelector {
    fn new(seed: &[SelectedKpi]) -> Self {
        Self { draft: seed.to_vec() }
    }

    pub fn selection(&self) -> &[SelectedKpi] {
        &self.draft
    }

    pub fn is_selected(&self, kpi_id: &str) -> bool {
        self.draft.iter().any(|s| s.kpi.id == kpi_id)
    }

    /// Add `kpi` at the end, or remove it if already picked. Returns whether
    /// it is selected afterwards.
    pub fn toggle(&mut self, kpi: &Kpi) -> bool {
        if let Some(index) = self.draft.iter().position(|s| s.kpi.id == kpi.id) {
            self.draft.remove(index);
            false
        } else {
            self.draft.push(SelectedKpi::new(kpi.clone(), default_chart_type(kpi)));
            true
        }
    }

    /// Switch a picked KPI to another chart it offers. The draft is left
    /// unchanged on error.
    pub fn set_chart_type(&mut self, kpi_id: &str, chart_type: ChartType) -> Result<(), DashboardError> {
        let entry = self
            .draft
            .iter_mut()
            .find(|s| s.kpi.id == kpi_id)
            .ok_or_else(|| DashboardError::KpiNotInDraft(kpi_id.to_string()))?;
        let available = offered_chart_types(&entry.kpi);
        if !available.contains(&chart_type) {
            return Err(DashboardError::ChartTypeUnavailable {
                requested: chart_type,
                available,
            });
        }
        entry.chart_type = chart_type;
        Ok(())
    }
}

#[derive(Debug)]
pub struct OpenLayout {
    token: ViewToken,
    layout: Layout,
    is_creating: bool,
    catalog: Loadable<Vec<Kpi>>,
    selected: Vec<SelectedKpi>,
    selection_touched: bool,
    selector: Option<KpiSelector>,
}

impl OpenLayout {
    pub fn token(&self) -> &ViewToken {
        &self.token
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn is_creating(&self) -> bool {
        self.is_creating
    }

    pub fn catalog(&self) -> &Loadable<Vec<Kpi>> {
        &self.catalog
    }

    pub fn selected_kpis(&self) -> &[SelectedKpi] {
        &self.selected
    }

    pub fn selector(&self) -> Option<&KpiSelector> {
        self.selector.as_ref()
    }

    pub fn used_kpis(&self) -> Vec<UsedKpiRow> {
        used_kpi_rows(&self.selected, &self.layout.kpis)
    }

    /// Preview of the used KPIs, or `None` when there is nothing to place.
    pub fn preview(&self, template: LayoutTemplate) -> Option<LayoutPreview> {
        let preview = LayoutPreview::compose(&self.used_kpis(), template);
        (!preview.is_empty()).then_some(preview)
    }

    fn set_catalog(&mut self, catalog: Loadable<Vec<Kpi>>) {
        self.catalog = catalog;
        let Some(kpis) = self.catalog.ready() else {
            return;
        };
        if !self.is_creating && !self.selection_touched && !self.layout.kpis.is_empty() {
            self.selected = resolve_layout_kpis(&self.layout.kpis, kpis);
            tracing::debug!(
                "Resolved {} of {} KPIs for layout {}",
                self.selected.len(),
                self.layout.kpis.len(),
                self.layout.id
            );
        }
    }
}

#[derive(Debug, Default)]
pub struct LayoutDetailView {
    state: Option<OpenLayout>,
}

impl LayoutDetailView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, layout: Layout) -> ViewToken {
        self.open_with(layout, false)
    }

    /// Open on a blank layout for creation.
    pub fn open_new(&mut self) -> ViewToken {
        self.open_with(Layout::new_draft(), true)
    }

    fn open_with(&mut self, layout: Layout, is_creating: bool) -> ViewToken {
        let token = ViewToken::issue(layout.id.clone(), AssetKind::Layout);
        tracing::debug!("Opening layout {} (generation {})", token.asset_id, token.generation);
        self.state = Some(OpenLayout {
            token: token.clone(),
            layout,
            is_creating,
            catalog: Loadable::Loading,
            selected: Vec::new(),
            selection_touched: false,
            selector: None,
        });
        token
    }

    pub fn close(&mut self) {
        self.state = None;
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn current(&self) -> Option<&OpenLayout> {
        self.state.as_ref()
    }

    fn current_mut(&mut self) -> Result<&mut OpenLayout, DashboardError> {
        self.state.as_mut().ok_or(DashboardError::ViewClosed)
    }

    /// Start editing a draft seeded with the current selection. Reopening
    /// while a draft is in progress keeps that draft.
    pub fn open_selector(&mut self) -> Result<&mut KpiSelector, DashboardError> {
        let open = self.current_mut()?;
        let seed = &open.selected;
        Ok(open.selector.get_or_insert_with(|| KpiSelector::new(seed)))
    }

    pub fn selector_mut(&mut self) -> Result<&mut KpiSelector, DashboardError> {
        self.current_mut()?.selector.as_mut().ok_or(DashboardError::SelectorNotOpen)
    }

    /// Replace the selection with the draft in one step and close the selector.
    pub fn confirm_selector(&mut self) -> Result<(), DashboardError> {
        let open = self.current_mut()?;
        let selector = open.selector.take().ok_or(DashboardError::SelectorNotOpen)?;
        open.selected = selector.draft;
        open.selection_touched = true;
        Ok(())
    }

    /// Drop the draft; the selection stays as it was.
    pub fn cancel_selector(&mut self) -> Result<(), DashboardError> {
        let open = self.current_mut()?;
        open.selector.take().ok_or(DashboardError::SelectorNotOpen)?;
        Ok(())
    }
}

impl EventTarget for LayoutDetailView {
    fn apply(&mut self, event: DetailEvent) -> Applied {
        let Some(open) = self.state.as_mut().filter(|open| open.token == event.token) else {
            tracing::debug!(
                "Discarding stale {} for layout {} (generation {})",
                event.payload.name(),
                event.token.asset_id,
                event.token.generation
            );
            return Applied::Stale;
        };

        match event.payload {
            FetchPayload::KpiCatalog(result) => {
                open.set_catalog(Loadable::from_list(result, "kpi catalog"));
                Applied::Applied
            }
            FetchPayload::Detail(_) | FetchPayload::BusinessQuestions(_) => Applied::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::AssetStats;
    use crate::domain::layout::LayoutKpiRef;

    fn catalog() -> Vec<Kpi> {
        let mut reach = Kpi::new("k1", "Reach");
        reach.visuals_available = vec!["Line Graph".to_string()];
        let mut sentiment = Kpi::new("k3", "Sentiment");
        sentiment.visuals_available = vec!["Bar Chart".to_string(), "Stacked Area".to_string()];
        vec![reach, Kpi::new("k2", "Coverage"), sentiment]
    }

    fn stored_layout() -> Layout {
        Layout {
            id: "l1".to_string(),
            title: "Weekly".to_string(),
            description: String::new(),
            pages: 2,
            kpis: vec![
                LayoutKpiRef {
                    id: "k2".to_string(),
                    title: "Coverage".to_string(),
                    chart_type: Some(ChartType::Pie),
                },
                LayoutKpiRef {
                    id: "gone".to_string(),
                    title: "Removed".to_string(),
                    chart_type: None,
                },
            ],
            preview: String::new(),
            stats: AssetStats::default(),
        }
    }

    fn catalog_event(token: &ViewToken) -> DetailEvent {
        DetailEvent::new(token.clone(), FetchPayload::KpiCatalog(Ok(catalog())))
    }

    #[test]
    fn test_catalog_resolves_stored_refs() {
        let mut view = LayoutDetailView::new();
        let token = view.open(stored_layout());

        // before the catalog arrives the stored refs are listed
        let rows = view.current().unwrap().used_kpis();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].title, "Removed");

        assert_eq!(view.apply(catalog_event(&token)), Applied::Applied);
        let open = view.current().unwrap();
        assert_eq!(open.selected_kpis().len(), 1);
        assert_eq!(open.selected_kpis()[0].kpi.id, "k2");
        assert_eq!(open.selected_kpis()[0].chart_type, ChartType::Pie);
    }

    #[test]
    fn test_confirm_replaces_selection() {
        let mut view = LayoutDetailView::new();
        let token = view.open(stored_layout());
        view.apply(catalog_event(&token));

        let kpis = catalog();
        let selector = view.open_selector().unwrap();
        assert!(selector.is_selected("k2"));
        assert!(!selector.toggle(&kpis[1]));
        assert!(selector.toggle(&kpis[0]));
        assert!(selector.toggle(&kpis[2]));
        selector.set_chart_type("k3", ChartType::Area).unwrap();

        // selection is untouched until confirm
        assert_eq!(view.current().unwrap().selected_kpis()[0].kpi.id, "k2");

        view.confirm_selector().unwrap();
        let open = view.current().unwrap();
        assert!(open.selector().is_none());
        let picked: Vec<_> = open
            .selected_kpis()
            .iter()
            .map(|s| (s.kpi.id.as_str(), s.chart_type))
            .collect();
        assert_eq!(picked, vec![("k1", ChartType::Line), ("k3", ChartType::Area)]);
    }

    #[test]
    fn test_cancel_leaves_selection() {
        let mut view = LayoutDetailView::new();
        let token = view.open(stored_layout());
        view.apply(catalog_event(&token));
        let before = view.current().unwrap().selected_kpis().to_vec();

        let kpis = catalog();
        view.open_selector().unwrap().toggle(&kpis[2]);
        view.cancel_selector().unwrap();

        assert_eq!(view.current().unwrap().selected_kpis(), before.as_slice());
        assert_eq!(view.cancel_selector(), Err(DashboardError::SelectorNotOpen));
        assert_eq!(view.confirm_selector(), Err(DashboardError::SelectorNotOpen));
    }

    #[test]
    fn test_late_catalog_keeps_confirmed_selection() {
        let mut view = LayoutDetailView::new();
        let token = view.open(stored_layout());
        view.open_selector().unwrap();
        view.confirm_selector().unwrap();

        view.apply(catalog_event(&token));
        assert!(view.current().unwrap().selected_kpis().is_empty());
    }

    #[test]
    fn test_set_chart_type_requires_draft_member() {
        let mut view = LayoutDetailView::new();
        view.open_new();
        let selector = view.open_selector().unwrap();
        assert_eq!(
            selector.set_chart_type("k1", ChartType::Bar),
            Err(DashboardError::KpiNotInDraft("k1".to_string()))
        );
    }

    #[test]
    fn test_set_chart_type_limited_to_offered() {
        let mut view = LayoutDetailView::new();
        view.open_new();
        let kpis = catalog();
        let selector = view.open_selector().unwrap();
        selector.toggle(&kpis[0]);

        assert_eq!(
            selector.set_chart_type("k1", ChartType::Pie),
            Err(DashboardError::ChartTypeUnavailable {
                requested: ChartType::Pie,
                available: vec![ChartType::Line],
            })
        );
        assert_eq!(selector.selection()[0].chart_type, ChartType::Line);

        selector.toggle(&kpis[1]);
        assert!(selector.set_chart_type("k2", ChartType::Bar).is_ok());
        assert!(selector.set_chart_type("k2", ChartType::Area).is_err());
    }

    #[test]
    fn test_open_new_uses_blank_layout() {
        let mut view = LayoutDetailView::new();
        let token = view.open_new();
        view.apply(catalog_event(&token));

        let open = view.current().unwrap();
        assert!(open.is_creating());
        assert_eq!(open.layout().title, "INTES");
        assert_eq!(open.layout().pages, 6);
        assert!(open.selected_kpis().is_empty());
        assert!(open.preview(LayoutTemplate::default()).is_none());
    }

    #[test]
    fn test_stale_catalog_after_close() {
        let mut view = LayoutDetailView::new();
        let token = view.open(stored_layout());
        view.close();
        assert_eq!(view.apply(catalog_event(&token)), Applied::Stale);

        let fresh = view.open(stored_layout());
        assert_eq!(view.apply(catalog_event(&token)), Applied::Stale);
        assert!(view.current().unwrap().catalog().is_loading());
        assert_eq!(view.apply(catalog_event(&fresh)), Applied::Applied);
    }

    #[test]
    fn test_preview_from_selection() {
        let mut view = LayoutDetailView::new();
        let token = view.open(stored_layout());
        view.apply(catalog_event(&token));

        let preview = view.current().unwrap().preview(LayoutTemplate::default()).unwrap();
        assert_eq!(preview.pages.len(), 1);
        let first = preview.pages[0][0][0].as_ref().unwrap();
        assert_eq!(first.title, "Coverage");
        assert_eq!(first.chart_type, ChartType::Pie);
    }
}
