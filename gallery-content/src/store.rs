//! View state store
//!
//! One [`ViewStore`] per page instance. It is mutated only by the fetch
//! lifecycle (`begin_fetch` / `apply`), filter selection, record selection
//! and modal dismissal. Every fetch is tagged with a [`FetchSession`]; only
//! the most recently started session of a still-mounted store may apply its
//! result, so a slow superseded response never overwrites a newer one.

use crate::derive::{derive_view, ViewFilter};
use crate::error::Result;
use crate::record::Record;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// One selectable filter (tab or collection button)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption<F> {
    pub value: F,
    pub label: String,
    /// Optional text shown while this filter is selected
    pub description: String,
}

impl<F> FilterOption<F> {
    pub fn new(value: F, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Result of one successful page fetch: records plus the filters they offer
#[derive(Debug, Clone, PartialEq)]
pub struct PageData<R, F> {
    pub records: Vec<R>,
    pub filters: Vec<FilterOption<F>>,
}

impl<R, F> PageData<R, F> {
    pub fn new(records: Vec<R>) -> Self {
        Self {
            records,
            filters: Vec::new(),
        }
    }

    pub fn with_filters(mut self, filters: Vec<FilterOption<F>>) -> Self {
        self.filters = filters;
        self
    }
}

/// Snapshot of a page's presentation state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState<R, F> {
    pub loading: bool,
    /// Set on failure; `None` whenever `loading` is true
    pub error: Option<String>,
    pub records: Vec<R>,
    pub filters: Vec<FilterOption<F>>,
    pub selected_filter: Option<F>,
    /// May stay populated after the modal closes
    pub selected_record: Option<R>,
    pub modal_open: bool,
}

impl<R, F> Default for ViewState<R, F> {
    fn default() -> Self {
        Self {
            loading: false,
            error: None,
            records: Vec::new(),
            filters: Vec::new(),
            selected_filter: None,
            selected_record: None,
            modal_open: false,
        }
    }
}

/// Handle for one fetch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FetchSession {
    seq: u64,
}

impl FetchSession {
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Where a click inside the modal overlay landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalTarget {
    /// Overlay outside the modal body
    Backdrop,
    /// Modal body itself (contained, never closes)
    Body,
    /// Explicit close control
    CloseButton,
}

/// Mutable per-page state
#[derive(Debug)]
pub struct ViewStore<R, F> {
    state: ViewState<R, F>,
    latest_session: u64,
    mounted: bool,
    select_first_filter: bool,
}

impl<R, F> ViewStore<R, F>
where
    R: Record,
    F: Clone + PartialEq,
{
    /// Store that selects the first filter option after a fetch when nothing is selected
    pub fn new() -> Self {
        Self {
            state: ViewState::default(),
            latest_session: 0,
            mounted: true,
            select_first_filter: true,
        }
    }

    /// Store that leaves the filter unselected (every record shown)
    pub fn unfiltered() -> Self {
        Self {
            select_first_filter: false,
            ..Self::new()
        }
    }

    /// Start with a specific filter selected
    pub fn with_filter(mut self, filter: F) -> Self {
        self.state.selected_filter = Some(filter);
        self
    }

    pub fn state(&self) -> &ViewState<R, F> {
        &self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Begin a fetch: loading on, error cleared, stale records kept
    pub fn begin_fetch(&mut self) -> FetchSession {
        self.latest_session += 1;
        self.state.loading = true;
        self.state.error = None;
        debug!(session = self.latest_session, "Fetch session started");
        FetchSession {
            seq: self.latest_session,
        }
    }

    /// True when `session` is still the one whose result will be applied
    pub fn is_current(&self, session: FetchSession) -> bool {
        self.mounted && session.seq == self.latest_session
    }

    /// Apply a finished fetch
    ///
    /// Returns `false` (and changes nothing) for superseded sessions or an
    /// unmounted store. On failure the previous records stay in place.
    pub fn apply(&mut self, session: FetchSession, result: Result<PageData<R, F>>) -> bool {
        if !self.is_current(session) {
            debug!(
                session = session.seq,
                latest = self.latest_session,
                mounted = self.mounted,
                "Discarding superseded fetch result"
            );
            return false;
        }

        self.state.loading = false;

        match result {
            Ok(data) => {
                info!(
                    session = session.seq,
                    records = data.records.len(),
                    filters = data.filters.len(),
                    "Fetch applied"
                );
                self.state.records = data.records;
                if !data.filters.is_empty() {
                    self.state.filters = data.filters;
                }
                if self.select_first_filter && self.state.selected_filter.is_none() {
                    self.state.selected_filter =
                        self.state.filters.first().map(|opt| opt.value.clone());
                }
            }
            Err(e) => {
                warn!(session = session.seq, "Fetch failed: {}", e);
                self.state.error = Some(e.to_string());
            }
        }

        true
    }

    /// Select a filter; never touches records or triggers a fetch
    pub fn select_filter(&mut self, filter: F) {
        self.state.selected_filter = Some(filter);
    }

    pub fn clear_filter(&mut self) {
        self.state.selected_filter = None;
    }

    /// Filter option for the current selection, if it is one of the offered ones
    pub fn selected_filter_option(&self) -> Option<&FilterOption<F>> {
        let selected = self.state.selected_filter.as_ref()?;
        self.state.filters.iter().find(|opt| &opt.value == selected)
    }

    /// Open the modal for the record with `id`; unknown ids change nothing
    pub fn select_record(&mut self, id: i64) -> bool {
        match self.state.records.iter().find(|r| r.id() == id) {
            Some(record) => {
                self.state.selected_record = Some(record.clone());
                self.state.modal_open = true;
                true
            }
            None => false,
        }
    }

    /// Open the modal for the record at `position` in fetch order
    ///
    /// Entries without a CMS id all normalize to id `0`, so id lookup only
    /// ever reaches the first of them; position reaches each one.
    pub fn select_record_at(&mut self, position: usize) -> bool {
        match self.state.records.get(position) {
            Some(record) => {
                self.state.selected_record = Some(record.clone());
                self.state.modal_open = true;
                true
            }
            None => false,
        }
    }

    /// Route a click inside the modal overlay; returns true if it closed the modal
    pub fn handle_modal_click(&mut self, target: ModalTarget) -> bool {
        match target {
            ModalTarget::Body => false,
            ModalTarget::Backdrop | ModalTarget::CloseButton => {
                let was_open = self.state.modal_open;
                self.close_modal();
                was_open
            }
        }
    }

    /// Close the modal, keeping the last selected record
    pub fn close_modal(&mut self) {
        self.state.modal_open = false;
    }

    /// Page is going away: every in-flight session becomes stale
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.state.loading = false;
    }

    /// Derived view for the current selection
    pub fn derived(&self, now: NaiveDateTime) -> Vec<&R>
    where
        F: ViewFilter<R>,
    {
        derive_view(&self.state.records, self.state.selected_filter.as_ref(), now)
    }
}

impl<R, F> Default for ViewStore<R, F>
where
    R: Record,
    F: Clone + PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Async driver around a shared [`ViewStore`]
///
/// `refresh` starts a session, awaits the fetch without holding the lock and
/// then applies the result, so overlapping refreshes resolve to the latest.
pub struct Page<R, F> {
    store: Arc<RwLock<ViewStore<R, F>>>,
}

impl<R, F> Clone for Page<R, F> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<R, F> Page<R, F>
where
    R: Record,
    F: Clone + PartialEq,
{
    pub fn new(store: ViewStore<R, F>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Run one fetch; returns whether its result was applied
    pub async fn refresh<Fut>(&self, fetch: Fut) -> bool
    where
        Fut: Future<Output = Result<PageData<R, F>>>,
    {
        let session = self.store.write().await.begin_fetch();
        let result = fetch.await;
        self.store.write().await.apply(session, result)
    }

    /// Run a closure against the store (user interaction handlers)
    pub async fn update<T>(&self, f: impl FnOnce(&mut ViewStore<R, F>) -> T) -> T {
        let mut store = self.store.write().await;
        f(&mut store)
    }

    /// Clone of the current state
    pub async fn snapshot(&self) -> ViewState<R, F> {
        self.store.read().await.state().clone()
    }

    pub async fn unmount(&self) {
        self.store.write().await.unmount();
    }
}
