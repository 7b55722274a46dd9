use httpmock::prelude::*;
use oxford_rent::config::toml_config::PipelineConfig;
use oxford_rent::data::dataset::read_listings;
use oxford_rent::{EtlEngine, LocalStorage, RentModel, RentPipeline};
use serde_json::{json, Value};
use tempfile::TempDir;

fn listing_page(start: usize, count: usize) -> Value {
    let types = ["Flat", "House", "Studio"];
    let areas = ["OX1", "OX2", "OX3", "OX4", "OX5"];
    let listings: Vec<Value> = (start..start + count)
        .map(|i| {
            let bedrooms = i % 4 + 1;
            json!({
                "bedrooms": bedrooms,
                "bathrooms": i % 2 + 1,
                "squareft": 400 + 150 * bedrooms,
                "property_type": types[i % 3],
                "postcode_area": areas[i % 5],
                "price": 900 + 250 * bedrooms + 10 * (i % 7),
                "url": format!("https://listings.example.com/{}", i),
            })
        })
        .collect();
    json!({ "listings": listings })
}

fn config_for(endpoint: &str, base_dir: &str) -> PipelineConfig {
    let toml = format!(
        r#"
[pipeline]
name = "test-rentals"

[source]
endpoint = "{}"
pages = 2

[paths]
base_dir = "{}"

[training]
n_estimators = 10
max_depth = 6
"#,
        endpoint,
        base_dir.replace('\\', "/")
    );
    PipelineConfig::from_toml_str(&toml).unwrap()
}

#[tokio::test]
async fn test_scrape_clean_and_retrain() {
    let temp_dir = TempDir::new().unwrap();
    let base_dir = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let page1 = server.mock(|when, then| {
        when.method(GET).path("/listings").query_param("page", "1");
        then.status(200).json_body(listing_page(0, 15));
    });
    let page2 = server.mock(|when, then| {
        when.method(GET).path("/listings").query_param("page", "2");
        then.status(200).json_body(listing_page(15, 15));
    });

    let config = config_for(&server.url("/listings"), &base_dir);
    let storage = LocalStorage::new(base_dir.clone());
    let engine = EtlEngine::new(RentPipeline::new(storage, config));

    let outcome = engine.run().await.unwrap();
    page1.assert();
    page2.assert();

    assert_eq!(outcome.cleaned_rows, 30);
    assert!(outcome.retrained());

    let raw = std::fs::read_to_string(temp_dir.path().join("data/oxford_rentals_raw.csv")).unwrap();
    assert_eq!(raw.lines().count(), 31);

    let cleaned = read_listings(temp_dir.path().join("data/oxford_rentals_cleaned.csv")).unwrap();
    assert_eq!(cleaned.len(), 30);

    let model = RentModel::load(temp_dir.path().join("models/rental_model.json")).unwrap();
    assert_eq!(model.forest.params.n_estimators, 10);
    let prediction = model.predict(&cleaned[0].features()).unwrap();
    assert!(prediction.is_finite() && prediction > 0.0);
}

#[tokio::test]
async fn test_too_few_rows_skips_training() {
    let temp_dir = TempDir::new().unwrap();
    let base_dir = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/listings").query_param("page", "1");
        then.status(200).json_body(listing_page(0, 12));
    });
    server.mock(|when, then| {
        when.method(GET).path("/listings").query_param("page", "2");
        then.status(200).json_body(json!([]));
    });

    let config = config_for(&server.url("/listings"), &base_dir);
    let engine = EtlEngine::new(RentPipeline::new(LocalStorage::new(base_dir), config));

    let outcome = engine.run().await.unwrap();
    assert_eq!(outcome.cleaned_rows, 12);
    assert!(!outcome.retrained());
    assert!(outcome.cleaned_path.is_some());
    assert!(!temp_dir.path().join("models/rental_model.json").exists());
}

#[tokio::test]
async fn test_nothing_scraped_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let base_dir = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let failing = server.mock(|when, then| {
        when.method(GET).path("/listings");
        then.status(500);
    });

    let config = config_for(&server.url("/listings"), &base_dir);
    let engine = EtlEngine::new(RentPipeline::new(LocalStorage::new(base_dir), config));

    let outcome = engine.run().await.unwrap();
    failing.assert_hits(1);
    assert_eq!(outcome.cleaned_rows, 0);
    assert!(outcome.raw_path.is_none());
    assert!(!temp_dir.path().join("data").exists());
}

#[tokio::test]
async fn test_invalid_rows_are_dropped_before_training() {
    let temp_dir = TempDir::new().unwrap();
    let base_dir = temp_dir.path().to_str().unwrap().to_string();

    let mut page = listing_page(0, 25);
    let listings = page["listings"].as_array_mut().unwrap();
    listings.push(json!({"bedrooms": 2, "bathrooms": 1, "squareft": 700, "price": 50}));
    listings.push(json!({"bedrooms": 0, "bathrooms": 1, "squareft": 300, "price": 800}));
    listings.push(json!({"bedrooms": 2, "bathrooms": null, "squareft": 700, "price": 1200}));

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/listings").query_param("page", "1");
        then.status(200).json_body(page);
    });
    server.mock(|when, then| {
        when.method(GET).path("/listings").query_param("page", "2");
        then.status(404);
    });

    let config = config_for(&server.url("/listings"), &base_dir);
    let engine = EtlEngine::new(RentPipeline::new(LocalStorage::new(base_dir), config));

    let outcome = engine.run().await.unwrap();
    assert_eq!(outcome.cleaned_rows, 25);
    assert!(outcome.retrained());
}
