// Boundary trait for the external asset API
use crate::domain::asset::{Asset, AssetDetail, AssetKind, BusinessQuestion, Kpi};
use crate::domain::layout::Layout;
use async_trait::async_trait;

#[async_trait]
pub trait AssetApi: Send + Sync {
    /// List asset summaries of one kind, for a collection grid
    async fn list_assets(&self, kind: AssetKind) -> anyhow::Result<Vec<Asset>>;

    /// Extended details for one asset; any field may be missing
    async fn fetch_asset_detail(&self, id: &str, kind: AssetKind) -> anyhow::Result<AssetDetail>;

    async fn fetch_business_questions(&self) -> anyhow::Result<Vec<BusinessQuestion>>;

    /// Full KPI catalog, used to resolve layout references
    async fn fetch_all_kpis(&self) -> anyhow::Result<Vec<Kpi>>;

    async fn fetch_layout(&self, id: &str) -> anyhow::Result<Layout>;
}
