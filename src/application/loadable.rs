// Three-way render state for every data-bearing view

/// `Loading` while a fetch is in flight, `Empty` when it completed with
/// nothing usable (including failures), `Ready` otherwise.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Loadable<T> {
    #[default]
    Loading,
    Empty,
    Ready(T),
}

impl<T> Loadable<T> {
    /// Settle a completed fetch. Failures degrade to `Empty`.
    pub fn from_fetch(result: anyhow::Result<T>, what: &str) -> Self {
        match result {
            Ok(value) => Loadable::Ready(value),
            Err(e) => {
                tracing::warn!("Error fetching {}: {:#}", what, e);
                Loadable::Empty
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Loadable::Loading)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Loadable::Empty)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Loadable::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loadable<U> {
        match self {
            Loadable::Loading => Loadable::Loading,
            Loadable::Empty => Loadable::Empty,
            Loadable::Ready(value) => Loadable::Ready(f(value)),
        }
    }
}

impl<T> Loadable<Vec<T>> {
    /// Like `from_fetch`, but an empty list is also `Empty`.
    pub fn from_list(result: anyhow::Result<Vec<T>>, what: &str) -> Self {
        match Self::from_fetch(result, what) {
            Loadable::Ready(items) if items.is_empty() => Loadable::Empty,
            other => other,
        }
    }

    /// Items to show; nothing while loading or empty.
    pub fn items(&self) -> &[T] {
        self.ready().map(Vec::as_slice).unwrap_or_default()
    }
}
