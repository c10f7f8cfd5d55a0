// View identity and the fetch results routed back to views
use crate::domain::asset::{AssetDetail, AssetKind, BusinessQuestion, Kpi};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Identity of one opening of a view. Re-opening the same asset issues a
/// new generation, so results for an earlier opening never match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewToken {
    pub asset_id: String,
    pub kind: AssetKind,
    pub generation: u64,
}

impl ViewToken {
    pub fn issue(asset_id: impl Into<String>, kind: AssetKind) -> Self {
        Self {
            asset_id: asset_id.into(),
            kind,
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
        }
    }
}

#[derive(Debug)]
pub enum FetchPayload {
    Detail(anyhow::Result<AssetDetail>),
    BusinessQuestions(anyhow::Result<Vec<BusinessQuestion>>),
    KpiCatalog(anyhow::Result<Vec<Kpi>>),
}

impl FetchPayload {
    pub fn name(&self) -> &'static str {
        match self {
            FetchPayload::Detail(_) => "asset detail",
            FetchPayload::BusinessQuestions(_) => "business questions",
            FetchPayload::KpiCatalog(_) => "kpi catalog",
        }
    }
}

/// A completed fetch, tagged with the view opening that requested it.
#[derive(Debug)]
pub struct DetailEvent {
    pub token: ViewToken,
    pub payload: FetchPayload,
}

impl DetailEvent {
    pub fn new(token: ViewToken, payload: FetchPayload) -> Self {
        Self { token, payload }
    }
}

/// Outcome of handing an event to a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Applied,
    /// The event belongs to a view opening that is no longer active.
    Stale,
    /// The view has no use for this kind of payload.
    Ignored,
}

/// A view that consumes fetch results for its active opening.
pub trait EventTarget {
    fn apply(&mut self, event: DetailEvent) -> Applied;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reissued_tokens_differ() {
        let first = ViewToken::issue("k1", AssetKind::Kpi);
        let second = ViewToken::issue("k1", AssetKind::Kpi);
        assert_ne!(first, second);
        assert!(second.generation > first.generation);
    }
}
