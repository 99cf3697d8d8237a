//! Full pipeline: HTTP lookup through resolution through a ranking pass.

use std::collections::BTreeMap;
use std::sync::Arc;
use tablink_lookup::{HttpLookupClient, HttpLookupConfig, MemoryAuditSink};
use tablink_ranking::{apply_feature, FeatureVector, ModelResult, Prediction, Predictor, SCORE_FEATURE};
use tablink_resolve::{Resolver, ResolverConfig, RetryPolicy};
use tablink_types::{RowInput, Table, Target};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct EchoPredictor;

impl Predictor for EchoPredictor {
    fn predict(&self, matrix: &[Vec<f64>]) -> ModelResult<Vec<Prediction>> {
        Ok(matrix
            .iter()
            .map(|row| Prediction {
                label: "1".to_string(),
                probability: row[0],
            })
            .collect())
    }
}

fn city_table() -> Table {
    Table {
        dataset_name: "cities".to_string(),
        table_name: "european".to_string(),
        header: vec!["city".to_string()],
        rows: vec![
            RowInput {
                id_row: 0,
                data: vec!["Paris".to_string()],
                ids: None,
            },
            RowInput {
                id_row: 1,
                data: vec!["Paris".to_string()],
                ids: None,
            },
            RowInput {
                id_row: 2,
                data: vec!["Berlin".to_string()],
                ids: None,
            },
        ],
    }
}

#[tokio::test]
async fn resolve_then_rank_against_http_provider() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/lookup/entity-retrieval"))
        .and(query_param("name", "Paris"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Paris": [
                {"id": "Q90", "name": "Paris", "description": "capital of France"},
                {"id": "Q167646", "name": "Paris", "description": "town in Texas"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/lookup/entity-retrieval"))
        .and(query_param("name", "Berlin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Berlin": [
                {"id": "Q64", "name": "Berlin", "description": "capital of Germany"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = Arc::new(HttpLookupClient::new(HttpLookupConfig {
        base_url: server.uri(),
        ..Default::default()
    }));
    let audit = Arc::new(MemoryAuditSink::new());
    let resolver = Resolver::with_config(
        client,
        audit.clone(),
        ResolverConfig {
            retry: RetryPolicy {
                attempts: 3,
                initial_backoff: std::time::Duration::from_millis(1),
                max_backoff: std::time::Duration::from_millis(2),
            },
            ..Default::default()
        },
    );

    let target = Target::new().with_ne_column(0);
    let mut rows = resolver.resolve(&city_table(), &target).await.unwrap();

    // Exactly one provider call per distinct text; rows in input order.
    assert_eq!(rows.len(), 3);
    assert!(audit.is_empty().await);
    assert_eq!(
        rows[0].cells[0].as_named_entity().unwrap().candidates,
        rows[1].cells[0].as_named_entity().unwrap().candidates,
    );

    // Extract feature vectors in traversal order (row order, then
    // within-row candidate order) and run the definitive score pass.
    let probabilities: BTreeMap<&str, f64> =
        BTreeMap::from([("Q90", 0.91), ("Q167646", 0.42), ("Q64", 0.87)]);
    let vectors: Vec<FeatureVector> = rows
        .iter()
        .flat_map(|row| row.ne_cells())
        .flat_map(|cell| cell.candidates.iter())
        .map(|candidate| {
            FeatureVector::new(candidate.id.clone(), vec![probabilities[candidate.id.as_str()]])
        })
        .collect();
    let features = BTreeMap::from([(0, vectors)]);

    apply_feature(&mut rows, &features, SCORE_FEATURE, &EchoPredictor).unwrap();

    for row in &rows {
        let cell = row.cells[0].as_named_entity().unwrap();
        assert!(cell
            .candidates
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score));
    }
    let paris = rows[0].cells[0].as_named_entity().unwrap();
    assert_eq!(paris.candidates[0].id, "Q90");
    assert_eq!(paris.candidates[0].score, Some(0.91));
    assert_eq!(paris.candidates[1].score, Some(0.42));
    let berlin = rows[2].cells[0].as_named_entity().unwrap();
    assert_eq!(berlin.candidates[0].score, Some(0.87));
}

#[tokio::test]
async fn provider_outage_degrades_cells_but_returns_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = Arc::new(HttpLookupClient::new(HttpLookupConfig {
        base_url: server.uri(),
        ..Default::default()
    }));
    let audit = Arc::new(MemoryAuditSink::new());
    let resolver = Resolver::with_config(
        client,
        audit.clone(),
        ResolverConfig {
            retry: RetryPolicy {
                attempts: 2,
                initial_backoff: std::time::Duration::from_millis(1),
                max_backoff: std::time::Duration::from_millis(2),
            },
            ..Default::default()
        },
    );

    let target = Target::new().with_ne_column(0);
    let rows = resolver.resolve(&city_table(), &target).await.unwrap();

    assert_eq!(rows.len(), 3);
    for row in &rows {
        assert!(row.cells[0].as_named_entity().unwrap().candidates.is_empty());
    }
    // One audit record per distinct failing text ("Paris" is single-flight).
    assert_eq!(audit.len().await, 2);
}
