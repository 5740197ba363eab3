//! Lifecycle of data that is loaded from the API into a view.

use std::fmt::Display;

use crate::ticket::{Ticket, Tickets};

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Failed(String),
    /// The request succeeded but there is no such record.
    NotFound,
    Ready(T),
}

impl<T> FetchState<T> {
    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

/// The state of a view that loads remote data.
///
/// Every trigger (mount, parameter change, retry) issues a new ticket.
/// A response is only applied if it carries the latest ticket,
/// so a slow response can never overwrite the result of a newer request.
#[derive(Debug, Clone)]
pub struct Fetch<T> {
    state: FetchState<T>,
    tickets: Tickets,
}

impl<T> Default for Fetch<T> {
    fn default() -> Self {
        Self {
            state: FetchState::Loading,
            tickets: Tickets::default(),
        }
    }
}

impl<T> Fetch<T> {
    #[must_use]
    pub const fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Number of requests issued so far.
    #[must_use]
    pub const fn requests(&self) -> u64 {
        self.tickets.issued()
    }

    pub fn begin(&mut self) -> Ticket {
        self.state = FetchState::Loading;
        self.tickets.issue()
    }

    /// Starts over after a failure.
    ///
    /// Returns `None` if the last request did not fail.
    pub fn retry(&mut self) -> Option<Ticket> {
        matches!(self.state, FetchState::Failed(_)).then(|| self.begin())
    }

    /// Applies the outcome of a request.
    ///
    /// Returns `false` if the response was superseded and has been discarded.
    pub fn settle<E>(&mut self, ticket: Ticket, result: Result<T, E>) -> bool
    where
        E: Display,
    {
        self.settle_optional(ticket, result.map(Some))
    }

    /// Like [`Fetch::settle`] but `Ok(None)` yields [`FetchState::NotFound`].
    pub fn settle_optional<E>(&mut self, ticket: Ticket, result: Result<Option<T>, E>) -> bool
    where
        E: Display,
    {
        if !self.tickets.is_latest(ticket) {
            log::debug!("Discard stale response of request {ticket:?}");
            return false;
        }
        self.state = match result {
            Ok(Some(value)) => FetchState::Ready(value),
            Ok(None) => FetchState::NotFound,
            Err(err) => FetchState::Failed(err.to_string()),
        };
        true
    }

    /// Modifies loaded data in place, e.g. after a record was deleted.
    pub fn modify(&mut self, f: impl FnOnce(&mut T)) {
        if let FetchState::Ready(value) = &mut self.state {
            f(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initially_loading() {
        let fetch = Fetch::<Vec<u8>>::default();
        assert!(fetch.state().is_loading());
        assert_eq!(fetch.requests(), 0);
    }

    #[test]
    fn ready_with_empty_list_is_not_an_error() {
        let mut fetch = Fetch::<Vec<u8>>::default();
        let t = fetch.begin();
        assert!(fetch.settle::<String>(t, Ok(vec![])));
        assert_eq!(fetch.state(), &FetchState::Ready(vec![]));
        assert!(fetch.state().error().is_none());
    }

    #[test]
    fn missing_record_is_not_found() {
        let mut fetch = Fetch::<u8>::default();
        let t = fetch.begin();
        fetch.settle_optional::<String>(t, Ok(None));
        assert_eq!(fetch.state(), &FetchState::NotFound);
    }

    #[test]
    fn last_request_issued_wins() {
        let mut fetch = Fetch::<&str>::default();
        let old = fetch.begin();
        let new = fetch.begin();
        assert!(fetch.settle::<String>(new, Ok("new")));
        assert!(!fetch.settle::<String>(old, Ok("old")));
        assert_eq!(fetch.state(), &FetchState::Ready("new"));
    }

    #[test]
    fn stale_failure_does_not_replace_loading() {
        let mut fetch = Fetch::<u8>::default();
        let old = fetch.begin();
        let _new = fetch.begin();
        assert!(!fetch.settle(old, Err("timeout")));
        assert!(fetch.state().is_loading());
    }

    #[test]
    fn retry_after_failure_issues_exactly_one_request() {
        let mut fetch = Fetch::<Vec<u8>>::default();
        let t = fetch.begin();
        fetch.settle(t, Err("Request failed (500)"));
        assert_eq!(fetch.state().error(), Some("Request failed (500)"));
        assert_eq!(fetch.requests(), 1);

        let retry = fetch.retry().expect("retry control after failure");
        assert_eq!(fetch.requests(), 2);
        assert!(fetch.state().is_loading());

        // no second retry while the first one is pending
        assert!(fetch.retry().is_none());
        assert_eq!(fetch.requests(), 2);

        fetch.settle::<String>(retry, Ok(vec![1]));
        assert_eq!(fetch.state().ready(), Some(&vec![1]));
    }

    #[test]
    fn no_retry_without_failure() {
        let mut fetch = Fetch::<u8>::default();
        let t = fetch.begin();
        fetch.settle::<String>(t, Ok(1));
        assert!(fetch.retry().is_none());
    }

    #[test]
    fn modify_ready_data() {
        let mut fetch = Fetch::<Vec<u8>>::default();
        fetch.modify(|v| v.push(1));
        assert!(fetch.state().is_loading());
        let t = fetch.begin();
        fetch.settle::<String>(t, Ok(vec![1, 2]));
        fetch.modify(|v| v.retain(|x| *x != 1));
        assert_eq!(fetch.state().ready(), Some(&vec![2]));
    }
}
