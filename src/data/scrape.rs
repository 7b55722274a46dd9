use crate::domain::model::Record;
use crate::utils::error::{RentError, Result};
use reqwest::Client;
use std::collections::BTreeSet;
use std::time::Duration;

/// Pulls rental listings page by page from a JSON endpoint.
pub struct ListingScraper {
    client: Client,
    endpoint: String,
    pages: usize,
    timeout: Option<Duration>,
}

impl ListingScraper {
    pub fn new(endpoint: impl Into<String>, pages: usize) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            pages,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn scrape(&self) -> Result<Vec<Record>> {
        let mut records = Vec::new();

        for page in 1..=self.pages {
            tracing::debug!("Fetching listings page {} from {}", page, self.endpoint);
            let mut request = self.client.get(&self.endpoint).query(&[("page", page)]);
            if let Some(timeout) = self.timeout {
                request = request.timeout(timeout);
            }

            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                tracing::warn!("⚠️ Listings page {} returned {}, stopping", page, status);
                break;
            }

            let body: serde_json::Value = response.json().await?;
            let page_records = records_from_page(body)?;
            tracing::debug!("Page {} yielded {} listings", page, page_records.len());
            if page_records.is_empty() {
                break;
            }
            records.extend(page_records);
        }

        tracing::info!("🔎 Scraped {} listings from {} page(s)", records.len(), self.pages);
        Ok(records)
    }
}

/// Accepts either a bare array of listing objects or `{"listings": [...]}`.
pub fn records_from_page(body: serde_json::Value) -> Result<Vec<Record>> {
    let items = match body {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut obj) => match obj.remove("listings") {
            Some(serde_json::Value::Array(items)) => items,
            _ => {
                return Err(RentError::processing(
                    "listing page object has no 'listings' array",
                ))
            }
        },
        other => {
            return Err(RentError::processing(format!(
                "unexpected listing page payload: {}",
                other
            )))
        }
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            serde_json::Value::Object(obj) => Some(Record {
                data: obj.into_iter().collect(),
            }),
            _ => None,
        })
        .collect())
}

fn value_to_field(value: Option<&serde_json::Value>) -> String {
    match value {
        None | Some(serde_json::Value::Null) => String::new(),
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Raw CSV with the union of all record keys as header, in sorted order.
pub fn records_to_csv(records: &[Record]) -> Result<String> {
    let columns: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.data.keys().map(String::as_str))
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&columns)?;
    for record in records {
        let fields: Vec<String> = columns
            .iter()
            .map(|c| value_to_field(record.data.get(*c)))
            .collect();
        writer.write_record(&fields)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| RentError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| RentError::processing(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_scrape_walks_pages() {
        let server = MockServer::start();
        let page1 = server.mock(|when, then| {
            when.method(GET).path("/listings").query_param("page", "1");
            then.status(200).json_body(serde_json::json!([
                {"Bedrooms": 2, "Bathrooms": 1, "Square Ft": 700, "Price": 1650}
            ]));
        });
        let page2 = server.mock(|when, then| {
            when.method(GET).path("/listings").query_param("page", "2");
            then.status(200).json_body(serde_json::json!({
                "listings": [{"Bedrooms": 3, "Bathrooms": 2, "Square Ft": 1100, "Price": 2300}]
            }));
        });

        let scraper = ListingScraper::new(server.url("/listings"), 2);
        let records = scraper.scrape().await.unwrap();

        page1.assert();
        page2.assert();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].data.get("Price").unwrap().as_i64(), Some(2300));
    }

    #[tokio::test]
    async fn test_scrape_stops_on_error_status() {
        let server = MockServer::start();
        let failing = server.mock(|when, then| {
            when.method(GET).path("/listings");
            then.status(503);
        });

        let scraper = ListingScraper::new(server.url("/listings"), 3);
        let records = scraper.scrape().await.unwrap();

        failing.assert_hits(1);
        assert!(records.is_empty());
    }

    #[test]
    fn test_records_to_csv_uses_union_of_keys() {
        let records = records_from_page(serde_json::json!([
            {"price": 900, "bedrooms": 1, "postcode_area": "OX4"},
            {"price": 1200, "bedrooms": 2, "squareft": null}
        ]))
        .unwrap();
        let csv = records_to_csv(&records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "bedrooms,postcode_area,price,squareft");
        assert_eq!(lines[1], "1,OX4,900,");
        assert_eq!(lines[2], "2,,1200,");
    }

    #[test]
    fn test_unexpected_payload_is_an_error() {
        assert!(records_from_page(serde_json::json!("nope")).is_err());
        assert!(records_from_page(serde_json::json!({"items": []})).is_err());
    }
}
