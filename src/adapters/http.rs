use crate::domain::model::{PageQuery, RawRecord};
use crate::domain::ports::LaureateSource;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// `GET {base_url}?offset=..&filters..` against the laureates endpoint.
pub struct HttpLaureateSource {
    base_url: String,
    client: Client,
}

impl HttpLaureateSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }
}

/// Pulls the `laureates` array out of a response body.
pub fn parse_laureates(body: Value) -> Result<Vec<RawRecord>> {
    let laureates = match body {
        Value::Object(mut obj) => obj.remove("laureates"),
        _ => None,
    };

    let Some(Value::Array(items)) = laureates else {
        return Err(EtlError::UnexpectedResponse {
            message: "response body has no 'laureates' list".to_string(),
        });
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(obj) => Ok(obj),
            other => Err(EtlError::UnexpectedResponse {
                message: format!("laureate #{} is not an object: {}", index, other),
            }),
        })
        .collect()
}

#[async_trait]
impl LaureateSource for HttpLaureateSource {
    async fn get_page(&self, query: &PageQuery) -> Result<Vec<RawRecord>> {
        let request = self.client.get(&self.base_url).query(&query.query_pairs());

        tracing::debug!(
            "GET {} offset={} filters={:?}",
            self.base_url,
            query.offset,
            query.filters
        );

        let response = request.send().await?.error_for_status()?;
        tracing::debug!("API response status: {}", response.status());

        let body: Value = response.json().await?;
        parse_laureates(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[test]
    fn test_parse_laureates_rejects_missing_list() {
        assert!(parse_laureates(json!({"meta": {}})).is_err());
        assert!(parse_laureates(json!([1, 2])).is_err());
        assert!(parse_laureates(json!({"laureates": [1]})).is_err());
    }

    #[tokio::test]
    async fn test_get_page_sends_offset_and_filters() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/laureates")
                .query_param("offset", "50")
                .query_param("nobelPrizeYear", "1901")
                .query_param("yearTo", "1910");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({
                    "laureates": [
                        {"id": "1", "knownName": {"en": "Wilhelm Conrad Röntgen"}}
                    ],
                    "meta": {"offset": 50}
                }));
        });

        let source =
            HttpLaureateSource::new(server.url("/laureates"), Duration::from_secs(5)).unwrap();
        let query = PageQuery::new(50)
            .with_filter("nobelPrizeYear", 1901)
            .with_filter("yearTo", 1910);

        let page = source.get_page(&query).await.unwrap();

        api_mock.assert();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0]["id"], json!("1"));
    }

    #[tokio::test]
    async fn test_get_page_fails_on_server_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/laureates");
            then.status(503);
        });

        let source =
            HttpLaureateSource::new(server.url("/laureates"), Duration::from_secs(5)).unwrap();
        let result = source.get_page(&PageQuery::new(0)).await;

        api_mock.assert();
        assert!(matches!(result, Err(EtlError::Transport(_))));
    }
}
