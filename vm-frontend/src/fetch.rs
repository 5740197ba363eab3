//! Binds the fetch lifecycle to signals.

use std::{fmt::Display, future::Future};

use leptos::*;

use vm_core::{fetch::Fetch, ticket::Ticket};

/// Issues a new request, superseding all pending ones.
pub fn load<T, E, Fut>(state: RwSignal<Fetch<T>>, request: Fut)
where
    T: 'static,
    E: Display + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    if let Some(ticket) = state.try_update(Fetch::begin) {
        settle_later(state, ticket, async move { request.await.map(Some) });
    }
}

/// Like [`load`] for requests of a single record that might not exist.
pub fn load_optional<T, E, Fut>(state: RwSignal<Fetch<T>>, request: Fut)
where
    T: 'static,
    E: Display + 'static,
    Fut: Future<Output = Result<Option<T>, E>> + 'static,
{
    if let Some(ticket) = state.try_update(Fetch::begin) {
        settle_later(state, ticket, request);
    }
}

/// Repeats a failed request.
pub fn retry<T, E, Fut>(state: RwSignal<Fetch<T>>, request: impl FnOnce() -> Fut)
where
    T: 'static,
    E: Display + 'static,
    Fut: Future<Output = Result<T, E>> + 'static,
{
    if let Some(ticket) = state.try_update(Fetch::retry).flatten() {
        log::debug!("Retry request");
        let request = request();
        settle_later(state, ticket, async move { request.await.map(Some) });
    }
}

/// Like [`retry`] for requests of a single record that might not exist.
pub fn retry_optional<T, E, Fut>(state: RwSignal<Fetch<T>>, request: impl FnOnce() -> Fut)
where
    T: 'static,
    E: Display + 'static,
    Fut: Future<Output = Result<Option<T>, E>> + 'static,
{
    if let Some(ticket) = state.try_update(Fetch::retry).flatten() {
        log::debug!("Retry request");
        settle_later(state, ticket, request());
    }
}

fn settle_later<T, E, Fut>(state: RwSignal<Fetch<T>>, ticket: Ticket, request: Fut)
where
    T: 'static,
    E: Display + 'static,
    Fut: Future<Output = Result<Option<T>, E>> + 'static,
{
    spawn_local(async move {
        let result = request.await;
        if let Err(err) = &result {
            log::warn!("Request failed: {err}");
        }
        // The view might be gone already.
        state.try_update(|s| s.settle_optional(ticket, result));
    });
}
