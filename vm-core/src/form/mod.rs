//! Lifecycle of forms that submit data to the API.

use std::fmt::Display;

use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    ticket::{Ticket, Tickets},
    validate::{Field, FieldErrors, Validate},
};

mod account;
mod application;
mod visa;

pub use self::{account::*, application::*, visa::*};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Blocked {
    #[error("A submission is already in progress")]
    InFlight,
    #[error("Please correct the highlighted fields")]
    Invalid(FieldErrors),
}

/// A validated payload that is ready to be sent.
///
/// This is the only way to obtain a payload from a [`Form`],
/// so nothing is sent unless all rules hold.
#[derive(Debug, Clone)]
pub struct Submission<P> {
    pub ticket: Ticket,
    /// Fresh for every attempt, sent along so the server can drop duplicates.
    pub idempotency_key: String,
    pub payload: P,
}

/// Field values, validation errors and in-flight state of a form.
#[derive(Debug, Clone)]
pub struct Form<T> {
    initial: T,
    fields: T,
    errors: FieldErrors,
    error: Option<String>,
    tickets: Tickets,
    in_flight: Option<Ticket>,
}

impl<T> Default for Form<T>
where
    T: Clone + Default,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Form<T>
where
    T: Clone,
{
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            fields: initial.clone(),
            initial,
            errors: FieldErrors::default(),
            error: None,
            tickets: Tickets::default(),
            in_flight: None,
        }
    }

    #[must_use]
    pub const fn fields(&self) -> &T {
        &self.fields
    }

    pub fn edit(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.fields);
    }

    #[must_use]
    pub const fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    #[must_use]
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    /// Reports a problem detected by the server for a single field.
    pub fn reject_field(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message);
    }

    /// The message of the last failed submission.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Number of submissions that passed validation.
    #[must_use]
    pub const fn submissions(&self) -> u64 {
        self.tickets.issued()
    }

    /// Restores the initial values and forgets all errors.
    pub fn reset(&mut self) {
        self.fields = self.initial.clone();
        self.errors = FieldErrors::default();
        self.error = None;
    }

    /// Replaces the initial values, e.g. when the record to edit has been loaded.
    pub fn reinitialize(&mut self, initial: T) {
        self.initial = initial;
        self.reset();
    }

    /// Applies the outcome of a submission.
    ///
    /// On success the form is reset. Returns `None` if the response
    /// does not belong to the pending submission.
    pub fn settle<R, E>(&mut self, ticket: Ticket, result: Result<R, E>) -> Option<Result<R, String>>
    where
        E: Display,
    {
        if self.in_flight != Some(ticket) {
            log::debug!("Discard response of superseded submission {ticket:?}");
            return None;
        }
        self.in_flight = None;
        match result {
            Ok(res) => {
                self.reset();
                Some(Ok(res))
            }
            Err(err) => {
                let msg = err.to_string();
                self.error = Some(msg.clone());
                Some(Err(msg))
            }
        }
    }
}

impl<T> Form<T>
where
    T: Clone + Validate,
{
    /// Validates the fields and marks the form as submitting.
    pub fn submit(&mut self, now: OffsetDateTime) -> Result<Submission<T::Output>, Blocked> {
        if self.is_submitting() {
            return Err(Blocked::InFlight);
        }
        match self.fields.validate(now) {
            Ok(payload) => {
                self.errors = FieldErrors::default();
                self.error = None;
                let ticket = self.tickets.issue();
                self.in_flight = Some(ticket);
                Ok(Submission {
                    ticket,
                    idempotency_key: idempotency_key(),
                    payload,
                })
            }
            Err(errors) => {
                self.errors = errors.clone();
                Err(Blocked::Invalid(errors))
            }
        }
    }
}

/// A fresh key for a single write attempt.
#[must_use]
pub fn idempotency_key() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default)]
    struct Name(String);

    impl Validate for Name {
        type Output = String;
        fn validate(&self, _: OffsetDateTime) -> Result<String, FieldErrors> {
            let mut errors = FieldErrors::default();
            errors.check("name", &self.0, &[crate::validate::Rule::Required("required")]);
            errors.finish(|| Some(self.0.trim().to_owned()))
        }
    }

    fn now() -> OffsetDateTime {
        OffsetDateTime::UNIX_EPOCH
    }

    #[test]
    fn invalid_fields_block_submission() {
        let mut form = Form::<Name>::default();
        let err = form.submit(now()).unwrap_err();
        assert!(matches!(err, Blocked::Invalid(_)));
        assert_eq!(form.field_error("name"), Some("required"));
        assert!(!form.is_submitting());
        assert_eq!(form.submissions(), 0);
    }

    #[test]
    fn in_flight_blocks_second_submission() {
        let mut form = Form::new(Name("a".into()));
        let first = form.submit(now()).unwrap();
        assert!(form.is_submitting());
        assert_eq!(form.submit(now()).unwrap_err(), Blocked::InFlight);
        assert_eq!(form.submissions(), 1);
        form.settle::<_, String>(first.ticket, Ok(()));
        assert!(!form.is_submitting());
    }

    #[test]
    fn each_attempt_gets_a_new_idempotency_key() {
        let mut form = Form::new(Name("a".into()));
        let first = form.submit(now()).unwrap();
        form.settle::<(), _>(first.ticket, Err("offline"));
        let second = form.submit(now()).unwrap();
        assert_ne!(first.idempotency_key, second.idempotency_key);
    }

    #[test]
    fn success_resets_to_initial_values() {
        let mut form = Form::new(Name("initial".into()));
        form.edit(|n| n.0 = "changed".into());
        let sub = form.submit(now()).unwrap();
        assert_eq!(sub.payload, "changed");
        let res = form.settle::<_, String>(sub.ticket, Ok(42));
        assert_eq!(res, Some(Ok(42)));
        assert_eq!(form.fields().0, "initial");
    }

    #[test]
    fn failure_keeps_values_and_reports_message() {
        let mut form = Form::new(Name("x".into()));
        form.edit(|n| n.0 = "changed".into());
        let sub = form.submit(now()).unwrap();
        let res = form.settle::<(), _>(sub.ticket, Err("Request failed (500)"));
        assert_eq!(res, Some(Err("Request failed (500)".to_string())));
        assert_eq!(form.error(), Some("Request failed (500)"));
        assert_eq!(form.fields().0, "changed");
        assert!(!form.is_submitting());
    }

    #[test]
    fn foreign_ticket_is_ignored() {
        let mut form = Form::new(Name("x".into()));
        let sub = form.submit(now()).unwrap();
        form.settle::<(), _>(sub.ticket, Err("e"));
        assert!(form.settle::<_, String>(sub.ticket, Ok(())).is_none());
        assert_eq!(form.error(), Some("e"));
    }
}
