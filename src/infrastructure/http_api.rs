// HTTP asset API implementation
use crate::application::asset_api::AssetApi;
use crate::domain::asset::{Asset, AssetDetail, AssetKind, BusinessQuestion, Kpi};
use crate::domain::layout::Layout;
use crate::infrastructure::config::{prepare_path, ApiSettings, EndpointTemplates};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpAssetApi {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    endpoints: EndpointTemplates,
}

impl HttpAssetApi {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: settings.token.clone(),
            endpoints: settings.endpoints.clone(),
        })
    }

    fn build_url(&self, template: &str, vars: &HashMap<&str, &str>) -> String {
        format!("{}{}", self.base_url, prepare_path(template, vars))
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!("GET {}", url);

        let mut request = self.client.get(url).header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Asset API request failed with status {}: {}", status, body);
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to parse response from {}", url))
    }
}

#[async_trait]
impl AssetApi for HttpAssetApi {
    async fn list_assets(&self, kind: AssetKind) -> Result<Vec<Asset>> {
        let vars = HashMap::from([("kind", kind.as_str())]);
        let url = self.build_url(&self.endpoints.assets, &vars);
        self.get_json(&url).await
    }

    async fn fetch_asset_detail(&self, id: &str, kind: AssetKind) -> Result<AssetDetail> {
        let vars = HashMap::from([("kind", kind.as_str()), ("id", id)]);
        let url = self.build_url(&self.endpoints.asset_detail, &vars);
        self.get_json(&url).await
    }

    async fn fetch_business_questions(&self) -> Result<Vec<BusinessQuestion>> {
        let url = self.build_url(&self.endpoints.business_questions, &HashMap::new());
        self.get_json(&url).await
    }

    async fn fetch_all_kpis(&self) -> Result<Vec<Kpi>> {
        let url = self.build_url(&self.endpoints.kpis, &HashMap::new());
        self.get_json(&url).await
    }

    async fn fetch_layout(&self, id: &str) -> Result<Layout> {
        let vars = HashMap::from([("id", id)]);
        let url = self.build_url(&self.endpoints.layout, &vars);
        self.get_json(&url).await
    }
}
