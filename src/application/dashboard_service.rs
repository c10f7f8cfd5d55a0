// Dashboard service - issues the fetches for each view and routes results back
use crate::application::asset_api::AssetApi;
use crate::application::asset_collection::AssetCollection;
use crate::application::asset_detail::AssetDetailView;
use crate::application::layout_detail::LayoutDetailView;
use crate::application::view_events::{Applied, DetailEvent, EventTarget, FetchPayload, ViewToken};
use crate::domain::asset::Asset;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Tally of events handed to a view by [`DashboardService::settle`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettleSummary {
    pub applied: usize,
    pub stale: usize,
    pub ignored: usize,
}

#[derive(Clone)]
pub struct DashboardService {
    api: Arc<dyn AssetApi>,
}

impl DashboardService {
    pub fn new(api: Arc<dyn AssetApi>) -> Self {
        Self { api }
    }

    pub async fn load_collection(&self, collection: &mut AssetCollection) {
        collection.start_loading();
        let result = self.api.list_assets(collection.kind).await;
        collection.finish_loading(result);
    }

    /// Open `asset` in `view` and start its detail and business question
    /// fetches. Results arrive on the returned channel in any order.
    pub fn open_asset(&self, view: &mut AssetDetailView, asset: Asset) -> mpsc::Receiver<DetailEvent> {
        let token = view.open(asset);
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        {
            let api = self.api.clone();
            let tx = tx.clone();
            let token = token.clone();
            tokio::spawn(async move {
                let result = api.fetch_asset_detail(&token.asset_id, token.kind).await;
                deliver(&tx, DetailEvent::new(token, FetchPayload::Detail(result))).await;
            });
        }

        let api = self.api.clone();
        tokio::spawn(async move {
            let result = api.fetch_business_questions().await;
            deliver(&tx, DetailEvent::new(token, FetchPayload::BusinessQuestions(result))).await;
        });

        rx
    }

    /// Open a stored layout, or a blank one when `layout_id` is `None`, and
    /// start the KPI catalog fetch. A layout that cannot be fetched opens
    /// blank.
    pub async fn open_layout(
        &self,
        view: &mut LayoutDetailView,
        layout_id: Option<&str>,
    ) -> mpsc::Receiver<DetailEvent> {
        let token = match layout_id {
            Some(id) => match self.api.fetch_layout(id).await {
                Ok(layout) => view.open(layout),
                Err(e) => {
                    tracing::warn!("Error fetching layout {}: {:#}", id, e);
                    view.open_new()
                }
            },
            None => view.open_new(),
        };

        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        self.spawn_kpi_catalog(token, tx);
        rx
    }

    fn spawn_kpi_catalog(&self, token: ViewToken, tx: mpsc::Sender<DetailEvent>) {
        let api = self.api.clone();
        tokio::spawn(async move {
            let result = api.fetch_all_kpis().await;
            deliver(&tx, DetailEvent::new(token, FetchPayload::KpiCatalog(result))).await;
        });
    }

    /// Apply every event from `rx` to `view` until all fetches have reported.
    pub async fn settle<V: EventTarget>(view: &mut V, rx: mpsc::Receiver<DetailEvent>) -> SettleSummary {
        let mut summary = SettleSummary::default();
        let mut events = ReceiverStream::new(rx);
        while let Some(event) = events.next().await {
            match view.apply(event) {
                Applied::Applied => summary.applied += 1,
                Applied::Stale => summary.stale += 1,
                Applied::Ignored => summary.ignored += 1,
            }
        }
        summary
    }
}

async fn deliver(tx: &mpsc::Sender<DetailEvent>, event: DetailEvent) {
    let what = event.payload.name();
    if tx.send(event).await.is_err() {
        tracing::debug!("Dropping {}: view no longer listening", what);
    }
}
