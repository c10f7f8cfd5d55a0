// Asset collection - a titled grid of assets with one selected at a time
use crate::application::loadable::Loadable;
use crate::domain::asset::{Asset, AssetKind};
use crate::domain::error::DashboardError;

#[derive(Debug, Clone)]
pub struct AssetCollection {
    pub title: String,
    pub subtitle: Option<String>,
    pub kind: AssetKind,
    assets: Loadable<Vec<Asset>>,
    selected: Option<Asset>,
}

impl AssetCollection {
    pub fn new(title: impl Into<String>, subtitle: Option<String>, kind: AssetKind) -> Self {
        Self {
            title: title.into(),
            subtitle,
            kind,
            assets: Loadable::Loading,
            selected: None,
        }
    }

    pub fn assets(&self) -> &Loadable<Vec<Asset>> {
        &self.assets
    }

    pub fn start_loading(&mut self) {
        self.assets = Loadable::Loading;
    }

    pub fn finish_loading(&mut self, result: anyhow::Result<Vec<Asset>>) {
        self.assets = Loadable::from_list(result, self.kind.as_str());
        // A refreshed list may no longer contain the selection
        let still_listed = self
            .selected
            .as_ref()
            .is_none_or(|s| self.assets.items().iter().any(|a| a.id == s.id));
        if !still_listed {
            self.selected = None;
        }
    }

    /// Select an asset from the grid; opening its detail view is up to the
    /// caller.
    pub fn select(&mut self, id: &str) -> Result<&Asset, DashboardError> {
        let asset = self
            .assets
            .items()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| DashboardError::UnknownAsset(id.to_string()))?;
        Ok(self.selected.insert(asset))
    }

    pub fn selected(&self) -> Option<&Asset> {
        self.selected.as_ref()
    }

    pub fn close_selection(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection_with(ids: &[&str]) -> AssetCollection {
        let mut collection = AssetCollection::new("KPIs", None, AssetKind::Kpi);
        let assets = ids
            .iter()
            .map(|id| Asset::new(*id, format!("Title {id}"), "", AssetKind::Kpi))
            .collect();
        collection.finish_loading(Ok(assets));
        collection
    }

    #[test]
    fn test_starts_loading_not_empty() {
        let collection = AssetCollection::new("KPIs", None, AssetKind::Kpi);
        assert!(collection.assets().is_loading());
        assert!(!collection.assets().is_empty());
    }

    #[test]
    fn test_empty_and_failed_lists() {
        let mut collection = AssetCollection::new("KPIs", None, AssetKind::Kpi);
        collection.finish_loading(Ok(vec![]));
        assert!(collection.assets().is_empty());

        collection.start_loading();
        collection.finish_loading(Err(anyhow::anyhow!("offline")));
        assert!(collection.assets().is_empty());
    }

    #[test]
    fn test_select_and_close() {
        let mut collection = collection_with(&["a", "b"]);
        assert_eq!(collection.select("b").unwrap().title, "Title b");
        assert_eq!(collection.selected().map(|a| a.id.as_str()), Some("b"));

        assert_eq!(
            collection.select("zzz"),
            Err(DashboardError::UnknownAsset("zzz".to_string()))
        );
        // a failed select keeps the previous selection
        assert_eq!(collection.selected().map(|a| a.id.as_str()), Some("b"));

        collection.close_selection();
        assert!(collection.selected().is_none());
    }

    #[test]
    fn test_refresh_drops_vanished_selection() {
        let mut collection = collection_with(&["a"]);
        collection.select("a").unwrap();
        collection.finish_loading(Ok(vec![Asset::new("c", "C", "", AssetKind::Kpi)]));
        assert!(collection.selected().is_none());
    }
}
