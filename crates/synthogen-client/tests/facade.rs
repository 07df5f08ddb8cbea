use std::sync::{Arc, Mutex};

use serde::Deserialize;
use serde_json::{Value, json};
use synthogen_client::{Client, Engine, Error, ProgressSink, Result};
use synthogen_schema::{IntegerSchema, ObjectSchema, StringGenerator, StringSchema};

/// Engine double that records what crossed the boundary and replays a
/// scripted response.
#[derive(Default)]
struct ScriptedEngine {
    result: String,
    progress: Vec<(u64, u64)>,
    failure: Option<String>,
    seen: Mutex<Vec<String>>,
}

impl ScriptedEngine {
    fn returning(result: &str) -> Self {
        Self {
            result: result.to_string(),
            ..Self::default()
        }
    }

    fn seen(&self) -> Vec<String> {
        self.seen.lock().expect("seen lock").clone()
    }
}

impl Engine for ScriptedEngine {
    fn generate_random_data(
        &self,
        schema: &str,
        mut progress: Option<ProgressSink<'_>>,
    ) -> Result<String> {
        self.seen.lock().expect("seen lock").push(schema.to_string());
        if let Some(message) = &self.failure {
            return Err(Error::Generation(message.clone()));
        }
        if let Some(sink) = progress.as_mut() {
            for (current, total) in &self.progress {
                sink(*current, *total);
            }
        }
        Ok(self.result.clone())
    }

    fn schema_document(&self) -> Result<String> {
        Ok(r#"{"$schema": "http://json-schema.org/draft-07/schema#"}"#.to_string())
    }
}

#[test]
fn raw_text_passes_through_unvalidated() {
    let engine = Arc::new(ScriptedEngine::returning("{}"));
    let client = Client::from_engine(engine.clone());

    // Not JSON; the facade must forward it untouched and let the engine
    // decide.
    let result = client.generate("not even json").expect("scripted result");

    assert_eq!(result, "{}");
    assert_eq!(engine.seen(), ["not even json"]);
}

#[test]
fn model_is_serialized_before_crossing_the_boundary() {
    let engine = Arc::new(ScriptedEngine::returning("{}"));
    let client = Client::from_engine(engine.clone());

    let schema = ObjectSchema::new()
        .property("id", StringSchema::generated(StringGenerator::Uuid))
        .property("number", IntegerSchema::range(0, 100));
    client.generate(synthogen_schema::Schema::from(schema)).expect("scripted result");

    let seen: Value = serde_json::from_str(&engine.seen()[0]).expect("wire text is json");
    assert_eq!(
        seen,
        json!({
            "type": "object",
            "properties": {
                "id": {"type": "string", "generator": {"type": "uuid"}},
                "number": {"type": "integer", "min": 0, "max": 100}
            }
        })
    );
}

#[test]
fn progress_events_are_forwarded_in_order() {
    let engine = Arc::new(ScriptedEngine {
        result: "[1, 2, 3]".to_string(),
        progress: vec![(1, 3), (2, 3), (3, 3)],
        ..Default::default()
    });
    let client = Client::from_engine(engine);

    let mut events = Vec::new();
    let result = client
        .generate_with_progress("{}", |current, total| events.push((current, total)))
        .expect("scripted result");

    assert_eq!(result, "[1, 2, 3]");
    assert_eq!(events, [(1, 3), (2, 3), (3, 3)]);
}

#[test]
fn typed_generation_deserializes_the_result() {
    #[derive(Debug, Deserialize)]
    struct Person {
        id: String,
        number: i64,
    }

    let engine = Arc::new(ScriptedEngine::returning(
        r#"{"id": "42e5f9cc-7e4a-4bb4-b0a4-0f34b8b4a1ab", "number": 7}"#,
    ));
    let client = Client::from_engine(engine);

    let person: Person = client.generate_as("{}").expect("typed result");
    assert_eq!(person.id, "42e5f9cc-7e4a-4bb4-b0a4-0f34b8b4a1ab");
    assert_eq!(person.number, 7);
}

#[test]
fn result_not_matching_target_shape_is_a_json_error() {
    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Person {
        id: String,
    }

    let engine = Arc::new(ScriptedEngine::returning("[1, 2]"));
    let client = Client::from_engine(engine);

    let err = client.generate_as::<Person>("{}").expect_err("shape mismatch");
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn engine_failure_surfaces_as_generation_error() {
    let engine = Arc::new(ScriptedEngine {
        failure: Some("unknown plugin 'missing'".to_string()),
        ..Default::default()
    });
    let client = Client::from_engine(engine);

    let err = client.generate("{}").expect_err("scripted failure");
    match err {
        Error::Generation(message) => assert!(message.contains("unknown plugin")),
        other => panic!("expected generation error, got {other:?}"),
    }
}

#[test]
fn engine_schema_returns_the_self_describing_document() {
    let client = Client::from_engine(Arc::new(ScriptedEngine::default()));
    let text = client.engine_schema().expect("schema document");

    assert!(!text.is_empty());
    let value: Value = serde_json::from_str(&text).expect("schema document is json");
    assert!(value.get("$schema").is_some());
}

/// Engine whose progress sequence is derived from the request, so two
/// concurrent calls produce distinguishable streams.
struct CountingEngine;

impl Engine for CountingEngine {
    fn generate_random_data(
        &self,
        schema: &str,
        mut progress: Option<ProgressSink<'_>>,
    ) -> Result<String> {
        let request: Value = serde_json::from_str(schema).map_err(Error::Json)?;
        let total = request["length"]["value"].as_u64().unwrap_or(0);
        if let Some(sink) = progress.as_mut() {
            for current in 1..=total {
                sink(current, total);
            }
        }
        Ok(format!("[{total}]"))
    }

    fn schema_document(&self) -> Result<String> {
        Ok("{}".to_string())
    }
}

#[test]
fn concurrent_calls_do_not_share_progress_streams() {
    let client = Client::from_engine(Arc::new(CountingEngine));

    let spawn = |client: Client, total: u64| {
        std::thread::spawn(move || {
            let mut events = Vec::new();
            let schema = json!({"length": {"value": total}}).to_string();
            let result = client
                .generate_with_progress(schema, |current, total| events.push((current, total)))
                .expect("counting result");
            (result, events)
        })
    };

    let first = spawn(client.clone(), 3);
    let second = spawn(client, 5);

    let (result, events) = first.join().expect("first thread");
    assert_eq!(result, "[3]");
    assert_eq!(events, [(1, 3), (2, 3), (3, 3)]);

    let (result, events) = second.join().expect("second thread");
    assert_eq!(result, "[5]");
    assert_eq!(events, [(1, 5), (2, 5), (3, 5), (4, 5), (5, 5)]);
}
