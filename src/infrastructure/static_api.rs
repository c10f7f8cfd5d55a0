// Fixture-backed asset API, serving a JSON document from memory
use crate::application::asset_api::AssetApi;
use crate::domain::asset::{Asset, AssetDetail, AssetKind, AssetVariant, BusinessQuestion, Kpi};
use crate::domain::layout::Layout;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Fixture layout. `details` is keyed by `"<kind>/<id>"` and overrides the
/// detail derived from the asset record itself. `kpis` and `layouts` hold
/// catalog entries outside the asset grid and win over `assets` on id clashes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default)]
    pub assets: Vec<AssetVariant>,
    #[serde(default)]
    pub details: HashMap<String, AssetDetail>,
    #[serde(default)]
    pub business_questions: Vec<BusinessQuestion>,
    #[serde(default)]
    pub kpis: Vec<Kpi>,
    #[serde(default)]
    pub layouts: Vec<Layout>,
}

#[derive(Debug, Clone, Default)]
pub struct StaticAssetApi {
    fixture: Fixture,
}

impl StaticAssetApi {
    pub fn new(fixture: Fixture) -> Self {
        Self { fixture }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let fixture = serde_json::from_str(json).context("Failed to parse asset fixture")?;
        Ok(Self::new(fixture))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read asset fixture {}", path.display()))?;
        Self::from_json(&json)
    }

    fn find(&self, id: &str, kind: AssetKind) -> Option<&AssetVariant> {
        self.fixture
            .assets
            .iter()
            .find(|asset| asset.kind() == kind && asset.id() == id)
    }
}

#[async_trait]
impl AssetApi for StaticAssetApi {
    async fn list_assets(&self, kind: AssetKind) -> Result<Vec<Asset>> {
        Ok(self
            .fixture
            .assets
            .iter()
            .filter(|asset| asset.kind() == kind)
            .map(AssetVariant::summary)
            .collect())
    }

    async fn fetch_asset_detail(&self, id: &str, kind: AssetKind) -> Result<AssetDetail> {
        if let Some(detail) = self.fixture.details.get(&format!("{kind}/{id}")) {
            return Ok(detail.clone());
        }
        Ok(self.find(id, kind).map(AssetDetail::from).unwrap_or_default())
    }

    async fn fetch_business_questions(&self) -> Result<Vec<BusinessQuestion>> {
        Ok(self.fixture.business_questions.clone())
    }

    async fn fetch_all_kpis(&self) -> Result<Vec<Kpi>> {
        let mut kpis = self.fixture.kpis.clone();
        for asset in &self.fixture.assets {
            let AssetVariant::Kpi(kpi) = asset else {
                continue;
            };
            if !kpis.iter().any(|k| k.id == kpi.id) {
                kpis.push(kpi.clone());
            }
        }
        Ok(kpis)
    }

    async fn fetch_layout(&self, id: &str) -> Result<Layout> {
        if let Some(layout) = self.fixture.layouts.iter().find(|l| l.id == id) {
            return Ok(layout.clone());
        }
        match self.find(id, AssetKind::Layout) {
            Some(AssetVariant::Layout(layout)) => Ok(layout.clone()),
            _ => anyhow::bail!("Layout {} not found", id),
        }
    }
}
