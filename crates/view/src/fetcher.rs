//! Data fetcher: one request per refresh, pushed into the view.
//!
//! Every request takes a ticket from a [`RequestSequence`]. Only the
//! response carrying the most recent ticket is applied, so overlapping
//! refreshes settle on the last one issued regardless of arrival order.
//! The trigger button shows [`LOADING_LABEL`] while any request is in
//! flight and returns to its idle state when the last one settles.

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use casestats_domain::dashboard::DashboardData;
use casestats_domain::filter::CaseFilter;

/// Backend endpoint serving the dashboard record.
pub const DATA_ENDPOINT: &str = "/api/data";

/// Trigger label while a request is in flight.
pub const LOADING_LABEL: &str = "Cargando...";

/// Request path for `filter`: the endpoint plus `?query` when any filter is set.
#[must_use]
pub fn request_path(filter: &CaseFilter) -> String {
    let query = filter.to_query_string();
    if query.is_empty() {
        DATA_ENDPOINT.to_string()
    } else {
        format!("{DATA_ENDPOINT}?{query}")
    }
}

/// Client for the dashboard endpoint.
pub trait DashboardApi {
    type Error: fmt::Display;

    /// `GET path` and decode the dashboard record.
    fn fetch_dashboard(&self, path: &str) -> impl Future<Output = Result<DashboardData, Self::Error>>;
}

/// The button that starts a refresh.
pub trait TriggerButton {
    fn label(&self) -> String;
    fn is_disabled(&self) -> bool;
    fn set_label(&self, label: &str);
    fn set_disabled(&self, disabled: bool);
}

/// The parts of the page the fetcher reads from and writes to.
pub trait DashboardView {
    type Button: TriggerButton;

    /// The trigger button, when present on the page.
    fn trigger(&self) -> Option<&Self::Button>;

    /// Current filter selection.
    fn filter(&self) -> CaseFilter;

    /// Department options beyond the placeholder.
    fn department_option_count(&self) -> usize;

    fn add_department_options(&self, departments: &[String]);

    fn set_totals(&self, total_cases: u64, total_deaths: u64);

    fn render_charts(&self, data: &DashboardData);
}

/// Result of one [`fetch_data`] call.
#[derive(Debug)]
pub enum FetchOutcome<E> {
    /// The response was applied to the view.
    Applied,
    /// A newer request was issued meanwhile; the response was dropped.
    Stale { path: String },
    /// The request failed; the view is unchanged.
    Failed { path: String, error: E },
}

/// Ticket identifying one request in a [`RequestSequence`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

struct IdleButton {
    label: String,
    disabled: bool,
}

#[derive(Default)]
struct SequenceState {
    latest: u64,
    in_flight: usize,
    idle: Option<IdleButton>,
}

/// Monotonic request counter shared by every refresh of one page.
#[derive(Clone, Default)]
pub struct RequestSequence {
    state: Arc<Mutex<SequenceState>>,
}

impl RequestSequence {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SequenceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Issue a ticket and mark the trigger busy.
    ///
    /// The first concurrent request records the button's idle label and
    /// enabled state; the guard of the last one to finish restores them.
    pub fn begin<'a, B: TriggerButton>(&'a self, button: Option<&'a B>) -> InFlight<'a, B> {
        let mut state = self.lock();
        state.latest += 1;
        state.in_flight += 1;
        if state.in_flight == 1
            && let Some(button) = button
        {
            state.idle = Some(IdleButton {
                label: button.label(),
                disabled: button.is_disabled(),
            });
            button.set_label(LOADING_LABEL);
            button.set_disabled(true);
        }
        InFlight {
            sequence: self,
            button,
            ticket: Ticket(state.latest),
        }
    }

    /// `true` when no request was issued after `ticket`.
    #[must_use]
    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.lock().latest == ticket.0
    }
}

/// Guard held for the lifetime of one request.
///
/// Dropping it (normal completion, early return, or the future being
/// dropped) settles the request.
pub struct InFlight<'a, B: TriggerButton> {
    sequence: &'a RequestSequence,
    button: Option<&'a B>,
    ticket: Ticket,
}

impl<B: TriggerButton> InFlight<'_, B> {
    #[must_use]
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }
}

impl<B: TriggerButton> Drop for InFlight<'_, B> {
    fn drop(&mut self) {
        let mut state = self.sequence.lock();
        state.in_flight = state.in_flight.saturating_sub(1);
        if state.in_flight > 0 {
            return;
        }
        if let (Some(button), Some(idle)) = (self.button, state.idle.take()) {
            button.set_label(&idle.label);
            button.set_disabled(idle.disabled);
        }
    }
}

/// Fetch the dashboard for the view's current filters and apply it.
///
/// Department options are added only while the dropdown holds nothing but
/// its placeholder. On failure nothing in the view changes except the
/// trigger, which is restored in every case.
pub async fn fetch_data<V, A>(view: &V, api: &A, sequence: &RequestSequence) -> FetchOutcome<A::Error>
where
    V: DashboardView,
    A: DashboardApi,
{
    let in_flight = sequence.begin(view.trigger());
    let path = request_path(&view.filter());

    let data = match api.fetch_dashboard(&path).await {
        Ok(data) => data,
        Err(error) => return FetchOutcome::Failed { path, error },
    };

    if !sequence.is_latest(in_flight.ticket()) {
        return FetchOutcome::Stale { path };
    }

    if view.department_option_count() == 0 && !data.departments().is_empty() {
        view.add_department_options(data.departments());
    }
    view.set_totals(data.total_cases, data.total_deaths);
    view.render_charts(&data);
    FetchOutcome::Applied
}
