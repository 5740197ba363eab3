//! Binds the form lifecycle to signals.

use std::{fmt::Display, future::Future};

use leptos::*;

use vm_core::{
    form::{Blocked, Form, Submission},
    validate::Validate,
};

use crate::now;

/// Validates the form and sends the payload.
///
/// `on_settled` is only called with the outcome of the pending submission
/// and only while the form is still mounted.
pub fn submit<T, R, E, Fut>(
    form: RwSignal<Form<T>>,
    send: impl FnOnce(Submission<T::Output>) -> Fut + 'static,
    on_settled: impl FnOnce(Result<R, String>) + 'static,
) where
    T: Clone + Validate + 'static,
    T::Output: 'static,
    R: 'static,
    E: Display + 'static,
    Fut: Future<Output = Result<R, E>> + 'static,
{
    match form.try_update(|f| f.submit(now())) {
        Some(Ok(submission)) => {
            let ticket = submission.ticket;
            log::debug!("Submit form ({})", submission.idempotency_key);
            spawn_local(async move {
                let result = send(submission).await;
                if let Some(outcome) = form.try_update(|f| f.settle(ticket, result)).flatten() {
                    on_settled(outcome);
                }
            });
        }
        Some(Err(Blocked::InFlight)) => log::debug!("Submission already in progress"),
        Some(Err(Blocked::Invalid(errors))) => log::debug!("Invalid input: {errors}"),
        None => {}
    }
}
