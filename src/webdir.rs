//! Web directory client.
//!
//! Issues `GET <endpoint>?options=<options>&query=<query>` with browser-like
//! headers and returns the HTML body on a 2xx response. Request timeouts
//! are left to the HTTP client's own policy. Loopback endpoints bypass any
//! proxy configured in the environment.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL};
use url::Url;

use crate::transport::{DirectoryQuery, TransportError};

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; U; Intel Mac OS X; en) \
    AppleWebKit/522+ (KHTML, like Gecko) Version/3.0 Safari/522.11";

/// Blocking client for the HTML directory search endpoint.
#[derive(Debug, Clone)]
pub struct WebDirectory {
    client: Client,
    endpoint: Url,
    options: String,
}

impl WebDirectory {
    pub fn new(endpoint: Url, options: &str, user_agent: &str) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=0"));

        let mut builder = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers);
        if is_loopback(&endpoint) {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint,
            options: options.to_string(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The full request URL for `query`.
    pub fn query_url(&self, query: &str) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            if !self.options.is_empty() {
                pairs.append_pair("options", &self.options);
            }
            pairs.append_pair("query", query);
        }
        url
    }
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(url::Host::Ipv4(ip)) => ip.is_loopback(),
        Some(url::Host::Ipv6(ip)) => ip.is_loopback(),
        Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        None => false,
    }
}

impl DirectoryQuery for WebDirectory {
    fn query(&self, query: &str) -> Result<String, TransportError> {
        let url = self.query_url(query);
        let response = self.client.get(url.clone()).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text()?)
    }
}
