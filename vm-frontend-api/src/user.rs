use gloo_net::http::{Request, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};

use vm_boundary::{NewVisa, NewVisaApplication, Visa, VisaApplication, WriteAck};

use crate::{
    encode, into_ack, into_json, with_idempotency_key, with_query, ApplicationQuery, Result,
};

/// VisaMaster API on behalf of a signed in user.
///
/// Every request carries the ID token of the identity provider.
#[derive(Clone)]
pub struct UserApi {
    url: &'static str,
    token: String,
}

impl UserApi {
    #[must_use]
    pub const fn new(url: &'static str, token: String) -> Self {
        Self { url, token }
    }
    fn auth_header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
    fn add_auth_headers(&self, req: RequestBuilder) -> RequestBuilder {
        req.header("Authorization", &self.auth_header_value())
    }
    async fn send<T>(&self, req: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .add_auth_headers(req)
            .header("Content-Type", "application/json")
            .send()
            .await?;
        into_json(response).await
    }
    async fn write<D>(&self, req: RequestBuilder, data: Option<&D>, key: &str) -> Result<WriteAck>
    where
        D: Serialize,
    {
        let req = with_idempotency_key(self.add_auth_headers(req), key);
        let response = match data {
            Some(data) => req.json(data)?.send().await?,
            None => req.send().await?,
        };
        into_ack(response).await
    }
    /// Listings added by the user with the given email.
    pub async fn visas_by_owner(&self, email: &str) -> Result<Vec<Visa>> {
        let url = format!("{}/visas/{}", self.url, encode(email));
        self.send(Request::get(&url)).await
    }
    pub async fn create_visa(&self, visa: &NewVisa, idempotency_key: &str) -> Result<WriteAck> {
        let url = format!("{}/visas", self.url);
        self.write(Request::post(&url), Some(visa), idempotency_key)
            .await
    }
    pub async fn update_visa(
        &self,
        id: &str,
        visa: &NewVisa,
        idempotency_key: &str,
    ) -> Result<WriteAck> {
        let url = format!("{}/visas/id/{}", self.url, encode(id));
        self.write(Request::put(&url), Some(visa), idempotency_key)
            .await
    }
    pub async fn delete_visa(&self, id: &str, idempotency_key: &str) -> Result<WriteAck> {
        let url = format!("{}/visas/id/{}", self.url, encode(id));
        self.write::<()>(Request::delete(&url), None, idempotency_key)
            .await
    }
    pub async fn apply(
        &self,
        application: &NewVisaApplication,
        idempotency_key: &str,
    ) -> Result<WriteAck> {
        let url = format!("{}/visa-applications", self.url);
        self.write(Request::post(&url), Some(application), idempotency_key)
            .await
    }
    /// Applications submitted with the given email.
    pub async fn applications(
        &self,
        email: &str,
        query: &ApplicationQuery,
    ) -> Result<Vec<VisaApplication>> {
        let url = with_query(
            format!("{}/visa-applications/{}", self.url, encode(email)),
            &query.to_query_string(),
        );
        self.send(Request::get(&url)).await
    }
}
