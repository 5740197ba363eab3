use gloo_net::http::Request;

use vm_boundary::Visa;

use crate::{encode, into_json, with_query, Result, VisaQuery};

/// Public VisaMaster API
#[derive(Clone, Copy)]
pub struct PublicApi {
    url: &'static str,
}

impl PublicApi {
    #[must_use]
    pub const fn new(url: &'static str) -> Self {
        Self { url }
    }

    pub async fn visas(&self, query: &VisaQuery) -> Result<Vec<Visa>> {
        let url = with_query(format!("{}/visas", self.url), &query.to_query_string());
        let response = Request::get(&url).send().await?;
        into_json(response).await
    }

    /// Fetches a single listing.
    ///
    /// A missing listing yields `Ok(None)`, whether the API
    /// answers with `404` or with `null`.
    pub async fn visa(&self, id: &str) -> Result<Option<Visa>> {
        let url = format!("{}/visas/id/{}", self.url, encode(id));
        let response = Request::get(&url).send().await?;
        match into_json(response).await {
            Err(err) if err.http_status() == Some(404) => Ok(None),
            result => result,
        }
    }
}
