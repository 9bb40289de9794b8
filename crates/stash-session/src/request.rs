//! Request context
//!
//! Read-only view of the cookies and query parameters that may carry a
//! session id. Nothing here writes transport headers.

use std::collections::HashMap;
use url::Url;

use crate::config::SessionConfig;

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cookies: HashMap<String, String>,
    query: HashMap<String, String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `Cookie:` header value (`a=1; b=2`). The first occurrence
    /// of a name wins.
    pub fn from_cookie_header(header: &str) -> Self {
        let mut context = Self::new();
        for pair in header.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let value = value.trim().trim_matches('"');
            context
                .cookies
                .entry(name.to_string())
                .or_insert_with(|| value.to_string());
        }
        context
    }

    /// Collect the query parameters of a request URL
    pub fn from_url(url: &Url) -> Self {
        Self::new().with_url_query(url)
    }

    /// Add the query parameters of a request URL. The first occurrence of
    /// a name wins.
    pub fn with_url_query(mut self, url: &Url) -> Self {
        for (name, value) in url.query_pairs() {
            self.query
                .entry(name.into_owned())
                .or_insert_with(|| value.into_owned());
        }
        self
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    /// Candidate session id: the cookie first, then the query parameter
    /// unless cookie-only transport is enforced.
    pub fn candidate_session_id(&self, config: &SessionConfig) -> Option<&str> {
        let from_cookie = if config.use_cookies {
            self.cookie(&config.name)
        } else {
            None
        };

        from_cookie.or_else(|| {
            if config.use_only_cookies {
                None
            } else {
                self.query_param(&config.name)
            }
        })
    }
}
