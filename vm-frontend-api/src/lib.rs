use gloo_net::http::{RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use vm_boundary::WriteAck;

mod identity;
mod public;
mod query;
mod user;

pub use self::{identity::*, public::*, query::*, user::*};

type Result<T> = std::result::Result<T, Error>;

/// Header that lets the server recognize a repeated write.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    #[error("{0}")]
    Fetch(String),

    #[error("Request failed ({}): {}", .0.http_status, .0.message)]
    Api(#[from] vm_boundary::Error),

    #[error("The server did not acknowledge the request")]
    NotAcknowledged,

    #[error(transparent)]
    Identity(#[from] IdentityError),
}

impl From<gloo_net::Error> for Error {
    fn from(err: gloo_net::Error) -> Self {
        Self::Fetch(format!("{err}"))
    }
}

impl Error {
    #[must_use]
    pub const fn http_status(&self) -> Option<u16> {
        match self {
            Self::Api(err) => Some(err.http_status),
            _ => None,
        }
    }
}

pub async fn into_json<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    // ensure we've got 2xx status
    if response.ok() {
        Ok(response.json().await?)
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(api_error(status, &body).into())
    }
}

/// Reads the response of a write request.
///
/// Only a 2xx response with a set acknowledgement flag counts as success.
pub async fn into_ack(response: Response) -> Result<WriteAck> {
    let ack: WriteAck = into_json(response).await?;
    check_ack(ack)
}

fn check_ack(ack: WriteAck) -> Result<WriteAck> {
    if ack.acknowledged {
        Ok(ack)
    } else {
        log::warn!("Write request was not acknowledged: {ack:?}");
        Err(Error::NotAcknowledged)
    }
}

/// Builds the error of a non-2xx response.
///
/// The server message is used if the body carries one.
fn api_error(http_status: u16, body: &str) -> vm_boundary::Error {
    let message = serde_json::from_str::<vm_boundary::Error>(body)
        .map(|err| err.message)
        .ok()
        .filter(|msg| !msg.trim().is_empty())
        .unwrap_or_else(|| "Something went wrong, please try again".to_owned());
    vm_boundary::Error {
        http_status,
        message,
    }
}

fn with_idempotency_key(req: RequestBuilder, key: &str) -> RequestBuilder {
    req.header(IDEMPOTENCY_KEY_HEADER, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_kept() {
        let err = api_error(500, r#"{"message":"Database unavailable"}"#);
        assert_eq!(err.http_status, 500);
        assert_eq!(err.message, "Database unavailable");
        assert_eq!(
            Error::from(err).to_string(),
            "Request failed (500): Database unavailable"
        );
    }

    #[test]
    fn generic_message_without_body() {
        for body in ["", "<html>Bad Gateway</html>", r#"{"message":" "}"#] {
            let err = api_error(502, body);
            assert_eq!(err.message, "Something went wrong, please try again");
        }
    }

    #[test]
    fn unacknowledged_write_fails() {
        assert_eq!(check_ack(WriteAck::default()), Err(Error::NotAcknowledged));
        let ack = WriteAck {
            acknowledged: true,
            ..Default::default()
        };
        assert_eq!(check_ack(ack.clone()), Ok(ack));
    }

    #[test]
    fn status_of_api_errors() {
        let err = Error::from(api_error(404, ""));
        assert_eq!(err.http_status(), Some(404));
        assert_eq!(Error::Fetch("offline".into()).http_status(), None);
    }
}
