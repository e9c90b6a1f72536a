//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place [`AppState`] changes. It takes one
//! [`Event`], applies the transition, and returns whether the screen needs a
//! re-render together with the side effects to perform. Nothing here talks to
//! Zellij or the network, which keeps every transition testable.
//!
//! # Event Types
//!
//! - **Input**: `Char`, `Backspace`, `Clear`, `Escape`
//! - **Navigation**: `SelectNext`, `SelectPrevious`, `Submit`, `SelectItem`
//! - **Lifecycle**: `Ready`, `WebAccessDenied`, `Refresh`, `Teardown`
//! - **Async completions**: `DebounceElapsed`, `ApiResponse`
//!
//! # Stale responses
//!
//! Responses are matched against the ids the state last issued. A suggestion
//! response for anything but the latest suggestion request, a load response
//! from a superseded batch, or a search response for an older search is
//! dropped without touching the state.
//!
//! # Example
//!
//! ```rust
//! use shopsearch::app::{handle_event, Action, AppState, Event};
//! use shopsearch::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::Char('s'))?;
//! assert!(render);
//! assert!(matches!(actions[0], Action::StartTimer { .. }));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::modes::Focus;
use super::state::LoadBatch;
use crate::api::{ApiPayload, ApiRequest, ApiResponse, EndpointKind};
use crate::app::{Action, AppState};
use crate::domain::error::{Result, GENERIC_FAILURE_MESSAGE};

/// Events triggered by user input, host lifecycle, or finished async work.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Permissions were granted; the initial category/trending load starts.
    Ready,

    /// Web access was refused. The host drops every request from now on, so
    /// nothing that waits for a response may start.
    WebAccessDenied,

    /// Appends a character to the query.
    Char(char),
    /// Removes the last character from the query.
    Backspace,
    /// Enter: selects the focused item, or searches for the typed query.
    Submit,
    /// Moves the selection down the visible list.
    SelectNext,
    /// Moves the selection up the visible list.
    SelectPrevious,
    /// Picks a suggestion, trending search or category by value.
    SelectItem(String),
    /// Empties the query, suggestions and results.
    Clear,
    /// Clears a non-empty query, otherwise closes the pane.
    Escape,
    /// Reloads categories and trending searches.
    Refresh,

    /// The debounce quiet period for a scheduled suggestion fetch ended.
    ///
    /// Every host timer arrives as this event; the debouncer decides whether
    /// it is the one that should fetch.
    DebounceElapsed,

    /// A search API call finished.
    ApiResponse(ApiResponse),

    /// The plugin is about to be unloaded.
    Teardown,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. Actions must be executed in order.
///
/// # Errors
///
/// Currently no transition fails; the `Result` matches the crate-wide handler
/// signature so the plugin shim can log failures uniformly.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Ready => {
            tracing::debug!("loading initial data");
            state.api_available = true;
            Ok((true, start_load(state)))
        }
        Event::WebAccessDenied => {
            tracing::warn!("web access denied, search API unavailable");
            state.api_available = false;
            state.debouncer.cancel();
            state.latest_suggestion = None;
            state.latest_search = None;
            state.load_batch = None;
            state.sync_loading();
            Ok(unavailable(state))
        }
        Event::Refresh => {
            if !state.api_available {
                return Ok(unavailable(state));
            }
            tracing::debug!(superseded = state.load_batch.is_some(), "refreshing");
            state.refreshing = true;
            Ok((true, start_load(state)))
        }
        Event::Char(c) => {
            let mut query = state.query.clone();
            query.push(*c);
            Ok((true, change_query(state, query)))
        }
        Event::Backspace => {
            if state.query.is_empty() {
                return Ok((false, vec![]));
            }
            let mut query = state.query.clone();
            query.pop();
            Ok((true, change_query(state, query)))
        }
        Event::DebounceElapsed => {
            if !state.debouncer.on_timer() {
                tracing::trace!("superseded debounce timer ignored");
                return Ok((false, vec![]));
            }

            if state.query.is_empty() {
                tracing::debug!("query empty when debounce elapsed, skipping fetch");
                state.latest_suggestion = None;
                state.suggestions.clear();
                state.suggestions_visible = false;
                state.clamp_focus();
                return Ok((true, vec![]));
            }
            if !state.api_available {
                return Ok(unavailable(state));
            }

            let id = state.issue_request_id();
            state.latest_suggestion = Some(id);
            tracing::debug!(request_id = %id, query = %state.query, "fetching suggestions");
            Ok((false, vec![Action::Fetch(ApiRequest::suggestions(id, state.query.clone()))]))
        }
        Event::Submit => match state.selected_item() {
            Some(item) => Ok(select(state, item)),
            None => Ok(submit(state)),
        },
        Event::SelectItem(item) => Ok(select(state, item.clone())),
        Event::SelectNext => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::SelectPrevious => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::Clear => {
            clear(state);
            Ok((true, vec![]))
        }
        Event::Escape => {
            if state.query.is_empty() {
                tracing::debug!("escape on empty query, closing");
                return Ok((false, vec![Action::CloseFocus]));
            }
            clear(state);
            Ok((true, vec![]))
        }
        Event::Teardown => {
            tracing::debug!(pending = state.debouncer.is_pending(), "teardown");
            state.debouncer.cancel();
            Ok((false, vec![]))
        }
        Event::ApiResponse(response) => Ok(apply_response(state, response)),
    }
}

/// Issues a fresh load batch, superseding any batch still settling.
fn start_load(state: &mut AppState) -> Vec<Action> {
    let categories = state.issue_request_id();
    let trending = state.issue_request_id();
    state.load_batch = Some(LoadBatch::new(categories, trending));
    state.sync_loading();

    vec![
        Action::Fetch(ApiRequest::categories(categories)),
        Action::Fetch(ApiRequest::trending(trending)),
    ]
}

/// Stores the new query and schedules a suggestion fetch for it.
fn change_query(state: &mut AppState, query: String) -> Vec<Action> {
    tracing::trace!(query = %query, "query changed");
    state.query = query;

    if state.query.is_empty() {
        state.latest_suggestion = None;
        state.suggestions.clear();
        state.suggestions_visible = false;
    }
    state.clamp_focus();

    let delay = state.debouncer.schedule();
    vec![Action::StartTimer { delay }]
}

fn select(state: &mut AppState, item: String) -> (bool, Vec<Action>) {
    tracing::debug!(item = %item, "item selected");
    state.query = item;
    state.suggestions_visible = false;
    let (_, actions) = submit(state);
    (true, actions)
}

fn submit(state: &mut AppState) -> (bool, Vec<Action>) {
    if state.query.trim().is_empty() {
        tracing::debug!("blank query, search not submitted");
        return (false, vec![]);
    }

    state.suggestions_visible = false;
    state.debouncer.cancel();
    state.latest_suggestion = None;
    state.focus = Focus::Input;

    if !state.api_available {
        return unavailable(state);
    }

    let id = state.issue_request_id();
    state.latest_search = Some(id);
    state.sync_loading();

    tracing::debug!(request_id = %id, query = %state.query, "searching products");
    (true, vec![Action::Fetch(ApiRequest::products(id, state.query.clone()))])
}

/// Reports a request that cannot be sent because web access was denied.
fn unavailable(state: &mut AppState) -> (bool, Vec<Action>) {
    tracing::debug!("no web access, request not sent");
    state.error = Some(GENERIC_FAILURE_MESSAGE.to_string());
    (true, vec![])
}

fn clear(state: &mut AppState) {
    tracing::debug!("query cleared");
    state.query.clear();
    state.suggestions.clear();
    state.suggestions_visible = false;
    state.results = None;
    state.latest_suggestion = None;
    state.focus = Focus::Input;
}

fn apply_response(state: &mut AppState, response: &ApiResponse) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!(
        "api_response",
        request_id = %response.id,
        endpoint = %response.endpoint,
        ok = response.result.is_ok(),
    )
    .entered();

    if let Err(failure) = &response.result {
        tracing::warn!(error = %failure, "search API call failed");
    }

    match response.endpoint {
        EndpointKind::Suggestions => apply_suggestions(state, response),
        EndpointKind::Categories | EndpointKind::Trending => apply_load(state, response),
        EndpointKind::Products => apply_search(state, response),
    }
}

fn apply_suggestions(state: &mut AppState, response: &ApiResponse) -> (bool, Vec<Action>) {
    if state.latest_suggestion != Some(response.id) {
        tracing::debug!("stale suggestion response discarded");
        return (false, vec![]);
    }
    state.latest_suggestion = None;

    match &response.result {
        Ok(ApiPayload::Suggestions(list)) => {
            state.suggestions.clone_from(list);
            state.suggestions_visible = !list.is_empty() && !state.query.is_empty();
            state.error = None;
            tracing::debug!(count = list.len(), "suggestions updated");
        }
        Ok(_) | Err(_) => {
            state.suggestions.clear();
            state.suggestions_visible = false;
            state.error = Some(GENERIC_FAILURE_MESSAGE.to_string());
        }
    }
    state.clamp_focus();
    (true, vec![])
}

fn apply_load(state: &mut AppState, response: &ApiResponse) -> (bool, Vec<Action>) {
    let Some(batch) = state.load_batch.as_mut() else {
        tracing::debug!("load response without an active batch discarded");
        return (false, vec![]);
    };

    let is_categories = response.endpoint == EndpointKind::Categories;
    let expected = if is_categories { batch.categories } else { batch.trending };
    let already_settled = if is_categories {
        batch.categories_settled
    } else {
        batch.trending_settled
    };
    if expected != response.id || already_settled {
        tracing::debug!("load response from superseded batch discarded");
        return (false, vec![]);
    }

    if is_categories {
        batch.categories_settled = true;
    } else {
        batch.trending_settled = true;
    }

    match &response.result {
        Ok(ApiPayload::Categories(list)) => state.categories.clone_from(list),
        Ok(ApiPayload::Trending(list)) => state.trending.clone_from(list),
        Ok(_) | Err(_) => batch.failed = true,
    }

    if batch.is_settled() {
        let failed = batch.failed;
        state.load_batch = None;
        if failed {
            state.error = Some(GENERIC_FAILURE_MESSAGE.to_string());
        } else {
            state.error = None;
            state.last_loaded = Some(chrono::Utc::now().timestamp());
        }
        tracing::debug!(
            failed,
            categories = state.categories.len(),
            trending = state.trending.len(),
            "load batch settled"
        );
        state.sync_loading();
    }
    state.clamp_focus();
    (true, vec![])
}

fn apply_search(state: &mut AppState, response: &ApiResponse) -> (bool, Vec<Action>) {
    if state.latest_search != Some(response.id) {
        tracing::debug!("stale search response discarded");
        return (false, vec![]);
    }
    state.latest_search = None;

    match &response.result {
        Ok(ApiPayload::Products(results)) => {
            tracing::debug!(count = results.products.len(), total = results.total, "search results");
            state.results = Some(results.clone());
            state.error = None;
        }
        Ok(_) | Err(_) => {
            state.error = Some(GENERIC_FAILURE_MESSAGE.to_string());
        }
    }
    state.sync_loading();
    state.clamp_focus();
    (true, vec![])
}
