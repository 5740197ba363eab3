use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use vm_boundary::{ApplicationStatus, VisaType};

/// Parameters of `GET /visas`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisaQuery {
    pub limit: Option<usize>,
    pub sort: Option<String>,
    pub visa_type: Option<VisaType>,
    pub search: Option<String>,
}

impl VisaQuery {
    /// Query of the listing browser.
    ///
    /// Only the type and the search term are evaluated by the server,
    /// the sort order is applied to the response.
    #[must_use]
    pub fn filtered(visa_type: Option<VisaType>, search: &str) -> Self {
        Self {
            visa_type,
            search: non_blank(Some(search)).map(ToOwned::to_owned),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn to_query_string(&self) -> String {
        let Self {
            limit,
            sort,
            visa_type,
            search,
        } = self;
        let mut params = vec![];
        if let Some(limit) = limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(sort) = non_blank(sort.as_deref()) {
            params.push(("sort", encode(sort)));
        }
        if let Some(visa_type) = visa_type {
            params.push(("visa_type", encode(visa_type.as_str())));
        }
        if let Some(search) = non_blank(search.as_deref()) {
            params.push(("search", encode(search)));
        }
        join(params)
    }
}

/// Parameters of `GET /visa-applications/{email}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationQuery {
    pub country_name: Option<String>,
    pub status: Option<ApplicationStatus>,
}

impl ApplicationQuery {
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut params = vec![];
        if let Some(country) = non_blank(self.country_name.as_deref()) {
            params.push(("country_name", encode(country)));
        }
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_owned()));
        }
        join(params)
    }
}

/// Appends a query string to a URL if it is not empty.
pub(crate) fn with_query(url: String, query: &str) -> String {
    if query.is_empty() {
        url
    } else {
        format!("{url}?{query}")
    }
}

pub(crate) fn encode(s: &str) -> String {
    utf8_percent_encode(s, NON_ALPHANUMERIC).to_string()
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn join(params: Vec<(&str, String)>) -> String {
    params
        .into_iter()
        .map(|(key, value)| [key, &value].join("="))
        .collect::<Vec<_>>()
        .join("&")
}
