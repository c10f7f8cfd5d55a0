use crate::domain::asset::AssetKind;
use serde::Deserialize;
use std::collections::HashMap;

pub const DEFAULT_CONFIG_PATH: &str = "config/dashboard";

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub api: ApiSettings,
    #[serde(default)]
    pub detail: DetailSettings,
    #[serde(default)]
    pub collections: Vec<CollectionConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub endpoints: EndpointTemplates,
}

/// Request paths relative to `base_url`. `${kind}` and `${id}` are
/// substituted, percent-encoded, per request.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EndpointTemplates {
    pub assets: String,
    pub asset_detail: String,
    pub business_questions: String,
    pub kpis: String,
    pub layout: String,
}

impl Default for EndpointTemplates {
    fn default() -> Self {
        Self {
            assets: "/assets?type=${kind}".to_string(),
            asset_detail: "/assets/${kind}/${id}".to_string(),
            business_questions: "/business-questions".to_string(),
            kpis: "/kpis".to_string(),
            layout: "/layouts/${id}".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DetailSettings {
    #[serde(default = "default_max_business_questions")]
    pub max_business_questions: usize,
    #[serde(default = "default_layout_template")]
    pub layout_template: String,
}

impl Default for DetailSettings {
    fn default() -> Self {
        Self {
            max_business_questions: default_max_business_questions(),
            layout_template: default_layout_template(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CollectionConfig {
    pub kind: AssetKind,
    pub title: String,
    pub subtitle: Option<String>,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_max_business_questions() -> usize {
    4
}

fn default_layout_template() -> String {
    "2x2".to_string()
}

pub fn load_dashboard_config(path: Option<&str>) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path.unwrap_or(DEFAULT_CONFIG_PATH)))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn parse_dashboard_config(toml: &str) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Replace template variables in a request path, percent-encoding each value
pub fn prepare_path(template: &str, vars: &HashMap<&str, &str>) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, &urlencoding::encode(value));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_path() {
        let mut vars = HashMap::new();
        vars.insert("kind", "kpi");
        vars.insert("id", "net promoter/score");

        let path = prepare_path("/assets/${kind}/${id}", &vars);
        assert_eq!(path, "/assets/kpi/net%20promoter%2Fscore");
    }

    #[test]
    fn test_parse_config_defaults() {
        let config = parse_dashboard_config(
            r#"
            [api]
            base_url = "http://localhost:4000/api"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.timeout_secs, 10);
        assert!(config.api.token.is_none());
        assert_eq!(config.api.endpoints, EndpointTemplates::default());
        assert_eq!(config.detail.max_business_questions, 4);
        assert_eq!(config.detail.layout_template, "2x2");
        assert!(config.collections.is_empty());
    }

    #[test]
    fn test_parse_config_collections() {
        let config = parse_dashboard_config(
            r#"
            [api]
            base_url = "http://localhost:4000/api"
            token = "secret"

            [api.endpoints]
            kpis = "/v2/kpis"

            [detail]
            max_business_questions = 2

            [[collections]]
            kind = "kpi"
            title = "KPIs"
            subtitle = "Key performance indicators"

            [[collections]]
            kind = "layout"
            title = "Layouts"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.token.as_deref(), Some("secret"));
        assert_eq!(config.api.endpoints.kpis, "/v2/kpis");
        assert_eq!(config.api.endpoints.layout, "/layouts/${id}");
        assert_eq!(config.detail.max_business_questions, 2);
        assert_eq!(config.collections.len(), 2);
        assert_eq!(config.collections[1].kind, AssetKind::Layout);
        assert!(config.collections[1].subtitle.is_none());
    }
}
