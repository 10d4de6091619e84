//! HTTP connection handling for SQL injection

use crate::http::client::HttpClient;
use crate::http::request::HttpRequest;
use crate::http::response::HttpResponse;
use anyhow::Result;
use url::Url;

/// Request handler for the vulnerable parameter
pub struct Request<'a> {
    client: &'a HttpClient,
    base_url: Url,
    parameter: String,
}

impl<'a> Request<'a> {
    pub fn new(client: &'a HttpClient, base_url: Url, parameter: String) -> Self {
        Self {
            client,
            base_url,
            parameter,
        }
    }

    /// URL with the parameter value replaced by `payload`
    pub fn payload_url(&self, payload: &str) -> Url {
        let mut url = self.base_url.clone();

        let mut pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| {
                if k == self.parameter {
                    (k.to_string(), payload.to_string())
                } else {
                    (k.to_string(), v.to_string())
                }
            })
            .collect();

        if !pairs.iter().any(|(k, _)| k == &self.parameter) {
            pairs.push((self.parameter.clone(), payload.to_string()));
        }

        url.query_pairs_mut().clear();
        for (k, v) in pairs {
            url.query_pairs_mut().append_pair(&k, &v);
        }
        url
    }

    /// Send a payload and get the full response
    pub async fn send(&self, payload: &str) -> Result<HttpResponse> {
        let req = HttpRequest::get(self.payload_url(payload));
        self.client.execute(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rate_limit::RateLimiter;
    use crate::core::scope::Scope;
    use std::collections::HashMap;
    use std::time::Duration;

    fn client() -> HttpClient {
        let scope = Scope::new("http://target.local/").unwrap();
        HttpClient::new(scope, RateLimiter::new(0), None, HashMap::new(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_payload_replaces_parameter() {
        let client = client();
        let url = Url::parse("http://target.local/item.php?id=1&cat=2").unwrap();
        let request = Request::new(&client, url, "id".to_string());

        let injected = request.payload_url("1'; SELECT 1;--");
        let pairs: Vec<(String, String)> = injected
            .query_pairs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        assert_eq!(pairs[0], ("id".to_string(), "1'; SELECT 1;--".to_string()));
        assert_eq!(pairs[1], ("cat".to_string(), "2".to_string()));
    }

    #[test]
    fn test_payload_appends_missing_parameter() {
        let client = client();
        let url = Url::parse("http://target.local/item.php?cat=2").unwrap();
        let request = Request::new(&client, url, "id".to_string());
        assert!(request.payload_url("x").as_str().ends_with("cat=2&id=x"));
    }
}
