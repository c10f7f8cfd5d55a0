// Asset detail view - chart type and favorite state for one opened asset
use crate::application::chart_type_selector::{ChartTypeOption, ChartTypeSelector};
use crate::application::loadable::Loadable;
use crate::application::view_events::{Applied, DetailEvent, EventTarget, FetchPayload, ViewToken};
use crate::domain::asset::{normalize_chart_types, Asset, AssetDetail, BusinessQuestion};
use crate::domain::chart::{ChartSpec, ChartType};
use crate::domain::error::DashboardError;

pub const DEFAULT_QUESTION_DESCRIPTION: &str = "Short description of the item goes nicely here.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCard {
    pub label: String,
    pub text: String,
}

/// State of an open detail view. Built fresh on every open.
#[derive(Debug)]
pub struct OpenDetail {
    token: ViewToken,
    asset: Asset,
    detail: Loadable<AssetDetail>,
    business_questions: Loadable<Vec<BusinessQuestion>>,
    available: Vec<ChartType>,
    selected_chart_type: ChartType,
    chart_type_chosen: bool,
    is_favorite: bool,
}

impl OpenDetail {
    fn new(asset: Asset) -> Self {
        let token = ViewToken::issue(asset.id.clone(), asset.kind);
        let available = normalize_chart_types(&AssetDetail::default());
        let selected_chart_type = available[0];
        Self {
            token,
            asset,
            detail: Loadable::Loading,
            business_questions: Loadable::Loading,
            available,
            selected_chart_type,
            chart_type_chosen: false,
            is_favorite: false,
        }
    }

    pub fn token(&self) -> &ViewToken {
        &self.token
    }

    pub fn asset(&self) -> &Asset {
        &self.asset
    }

    pub fn detail(&self) -> &Loadable<AssetDetail> {
        &self.detail
    }

    pub fn business_questions(&self) -> &Loadable<Vec<BusinessQuestion>> {
        &self.business_questions
    }

    pub fn available_chart_types(&self) -> &[ChartType] {
        &self.available
    }

    pub fn selected_chart_type(&self) -> ChartType {
        self.selected_chart_type
    }

    pub fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    pub fn chart_type_options(&self) -> Vec<ChartTypeOption> {
        ChartTypeSelector::options(&self.available, self.selected_chart_type)
    }

    /// Chart to render, or `None` when there is no series to show.
    pub fn chart(&self) -> Option<ChartSpec> {
        let points = self.detail.ready()?.chart_series()?;
        Some(ChartSpec {
            chart_type: self.selected_chart_type,
            points: points.to_vec(),
        })
    }

    pub fn question_cards(&self, limit: usize) -> Vec<QuestionCard> {
        self.business_questions
            .items()
            .iter()
            .take(limit)
            .enumerate()
            .map(|(index, q)| QuestionCard {
                label: format!("Question {}", index + 1),
                text: if q.description.trim().is_empty() {
                    DEFAULT_QUESTION_DESCRIPTION.to_string()
                } else {
                    q.description.clone()
                },
            })
            .collect()
    }

    fn set_detail(&mut self, detail: Loadable<AssetDetail>) {
        self.available = match detail.ready() {
            Some(detail) => normalize_chart_types(detail),
            None => normalize_chart_types(&AssetDetail::default()),
        };
        self.detail = detail;

        if !self.chart_type_chosen || !self.available.contains(&self.selected_chart_type) {
            self.selected_chart_type = self.available[0];
            self.chart_type_chosen = false;
        }
    }
}

#[derive(Debug, Default)]
enum DetailState {
    #[default]
    Closed,
    Open(Box<OpenDetail>),
}

#[derive(Debug, Default)]
pub struct AssetDetailView {
    state: DetailState,
}

impl AssetDetailView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open on `asset`, replacing whatever was open. Returns the token that
    /// fetches for this opening must carry.
    pub fn open(&mut self, asset: Asset) -> ViewToken {
        let open = OpenDetail::new(asset);
        let token = open.token.clone();
        tracing::debug!("Opening {} {} (generation {})", token.kind, token.asset_id, token.generation);
        self.state = DetailState::Open(Box::new(open));
        token
    }

    pub fn close(&mut self) {
        if let DetailState::Open(open) = &self.state {
            tracing::debug!("Closing {} {}", open.token.kind, open.token.asset_id);
        }
        self.state = DetailState::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, DetailState::Open(_))
    }

    pub fn current(&self) -> Option<&OpenDetail> {
        match &self.state {
            DetailState::Open(open) => Some(open.as_ref()),
            DetailState::Closed => None,
        }
    }

    fn current_mut(&mut self) -> Result<&mut OpenDetail, DashboardError> {
        match &mut self.state {
            DetailState::Open(open) => Ok(open.as_mut()),
            DetailState::Closed => Err(DashboardError::ViewClosed),
        }
    }

    /// Switch the rendered chart type. Only offered types are accepted.
    pub fn select_chart_type(&mut self, chart_type: ChartType) -> Result<(), DashboardError> {
        let open = self.current_mut()?;
        if !open.available.contains(&chart_type) {
            return Err(DashboardError::ChartTypeUnavailable {
                requested: chart_type,
                available: open.available.clone(),
            });
        }
        open.selected_chart_type = chart_type;
        open.chart_type_chosen = true;
        Ok(())
    }

    /// Flip the local favorite flag and return its new value.
    pub fn toggle_favorite(&mut self) -> Result<bool, DashboardError> {
        let open = self.current_mut()?;
        open.is_favorite = !open.is_favorite;
        Ok(open.is_favorite)
    }
}

impl EventTarget for AssetDetailView {
    fn apply(&mut self, event: DetailEvent) -> Applied {
        let DetailState::Open(open) = &mut self.state else {
            tracing::debug!("Discarding {} for closed view", event.payload.name());
            return Applied::Stale;
        };
        if open.token != event.token {
            tracing::debug!(
                "Discarding stale {} for {} (generation {})",
                event.payload.name(),
                event.token.asset_id,
                event.token.generation
            );
            return Applied::Stale;
        }

        match event.payload {
            FetchPayload::Detail(result) => {
                open.set_detail(Loadable::from_fetch(result, "asset detail"));
                Applied::Applied
            }
            FetchPayload::BusinessQuestions(result) => {
                open.business_questions = Loadable::from_list(result, "business questions");
                Applied::Applied
            }
            FetchPayload::KpiCatalog(_) => Applied::Ignored,
        }
    }
}
