//! List-resource controller: fetch, normalize, hold, refetch.
//!
//! DESIGN
//! ======
//! The in-memory list is a cache of the last successful fetch and nothing
//! else. Mutations never patch it; they run and then trigger exactly one
//! refetch. A failed fetch drops the cached items so a 401 (or any error)
//! never leaves stale rows on screen.

#[cfg(test)]
#[path = "listing_test.rs"]
mod listing_test;

use crate::api::{ApiClient, Transport};
use crate::entity::{Record, ResourceKind};
use crate::error::{ApiError, ErrorKind};
use crate::table::{TableState, TableView};

/// Why a list could not be shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListError {
    pub kind: ErrorKind,
    pub message: String,
    /// Set on 401: navigate here instead of rendering the error.
    pub redirect: Option<&'static str>,
}

impl From<&ApiError> for ListError {
    fn from(err: &ApiError) -> Self {
        Self {
            kind: err.kind(),
            message: err.user_message(),
            redirect: err.redirect(),
        }
    }
}

/// `Idle -> Loading -> Ready | Failed`, and back to `Loading` on refetch.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ListState<T> {
    #[default]
    Idle,
    Loading,
    Ready(Vec<T>),
    Failed(ListError),
}

impl<T> ListState<T> {
    pub fn begin(&mut self) {
        *self = Self::Loading;
    }

    pub fn finish(&mut self, result: Result<Vec<T>, ApiError>) {
        *self = match result {
            Ok(items) => Self::Ready(items),
            Err(err) => Self::Failed(ListError::from(&err)),
        };
    }

    /// Items of the last successful fetch; empty in every other state.
    #[must_use]
    pub fn items(&self) -> &[T] {
        match self {
            Self::Ready(items) => items,
            _ => &[],
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn error(&self) -> Option<&ListError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }

    #[must_use]
    pub fn redirect(&self) -> Option<&'static str> {
        self.error().and_then(|err| err.redirect)
    }
}

/// DELETE each id in order, stopping at the first failure.
///
/// # Errors
///
/// The first failed DELETE; ids after it are not attempted.
pub async fn delete_records<T: Transport>(client: &ApiClient<T>, kind: ResourceKind, ids: &[i64]) -> Result<(), ApiError> {
    for &id in ids {
        if let Err(err) = client.delete_kind(kind, id).await {
            tracing::warn!(%kind, id, error = %err, "delete failed");
            return Err(err);
        }
    }
    Ok(())
}

/// One resource table: list state plus table state.
#[derive(Clone, Debug)]
pub struct ResourceList {
    kind: ResourceKind,
    state: ListState<Record>,
    pub table: TableState,
}

impl ResourceList {
    #[must_use]
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            state: ListState::Idle,
            table: TableState::new(kind.filter_column()),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    #[must_use]
    pub fn state(&self) -> &ListState<Record> {
        &self.state
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        self.state.items()
    }

    #[must_use]
    pub fn view(&self) -> TableView<'_, Record> {
        self.table.view(self.state.items())
    }

    /// Select every row that passes the current filter.
    pub fn select_all_filtered(&mut self) {
        self.table.select_all_filtered(self.state.items());
    }

    pub async fn refetch<T: Transport>(&mut self, client: &ApiClient<T>) {
        self.begin_refetch();
        let result = client.list_kind(self.kind).await;
        self.finish_refetch(result);
    }

    /// First half of [`Self::refetch`], for callers that cannot hold
    /// `&mut self` across the request (reactive UI state).
    pub fn begin_refetch(&mut self) {
        self.state.begin();
    }

    pub fn finish_refetch(&mut self, result: Result<Vec<Record>, ApiError>) {
        if let Err(err) = &result {
            tracing::warn!(kind = %self.kind, error = %err, "list fetch failed");
        }
        self.state.finish(result);
    }

    /// Delete `ids` (one or many), then refetch exactly once whatever the
    /// outcome.
    ///
    /// # Errors
    ///
    /// Returns the first failed DELETE as a [`ListError`]; the list is
    /// still refetched so it reflects what the backend actually holds.
    pub async fn delete<T: Transport>(&mut self, client: &ApiClient<T>, ids: &[i64]) -> Result<(), ListError> {
        let outcome = delete_records(client, self.kind, ids).await;
        self.table.forget(ids);
        self.refetch(client).await;
        outcome.map_err(|err| ListError::from(&err))
    }
}
