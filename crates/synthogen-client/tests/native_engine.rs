//! End-to-end tests against a real engine build. Ignored by default; run
//! with `cargo test -- --ignored` after pointing SYNTHOGEN_ENGINE_PATH at
//! the engine library.

use serde_json::Value;
use synthogen_client::Client;
use synthogen_schema::{
    ArraySchema, IntegerSchema, ObjectSchema, Schema, StringGenerator, StringSchema,
};

fn engine_client() -> Client {
    let path = std::env::var("SYNTHOGEN_ENGINE_PATH")
        .expect("set SYNTHOGEN_ENGINE_PATH to the engine library");
    Client::with_library_path(path).expect("load native engine")
}

fn person_schema() -> Schema {
    ObjectSchema::new()
        .property("id", StringSchema::generated(StringGenerator::Uuid))
        .property("number", IntegerSchema::range(0, 100))
        .into()
}

#[test]
#[ignore = "requires a native engine build"]
fn constant_string_generates_exactly_its_value() {
    let client = engine_client();
    let result = client
        .generate(Schema::from(StringSchema::constant("abc")))
        .expect("generate constant");
    assert_eq!(result, "\"abc\"");
}

#[test]
#[ignore = "requires a native engine build"]
fn integer_range_is_honored_across_many_samples() {
    let client = engine_client();
    let schema = Schema::from(IntegerSchema::range(0, 100));

    for _ in 0..1000 {
        let value: i64 = client.generate_as(&schema).expect("generate integer");
        assert!((0..=100).contains(&value), "out of range: {value}");
    }
}

#[test]
#[ignore = "requires a native engine build"]
fn progress_fires_once_per_array_element() {
    #[derive(Debug, serde::Deserialize)]
    struct Person {
        id: String,
        number: i64,
    }

    let client = engine_client();
    let schema = Schema::from(ArraySchema::new(person_schema()).fixed_length(3));

    let mut events = Vec::new();
    let people: Vec<Person> = client
        .generate_as_with_progress(schema, |current, total| events.push((current, total)))
        .expect("generate batch");

    assert_eq!(events, [(1, 3), (2, 3), (3, 3)]);
    assert_eq!(people.len(), 3);
    for person in people {
        assert!(!person.id.is_empty());
        assert!((0..=100).contains(&person.number));
    }
}

#[test]
#[ignore = "requires a native engine build"]
fn engine_schema_is_nonempty_json() {
    let client = engine_client();
    let text = client.engine_schema().expect("schema document");
    assert!(!text.is_empty());
    let _: Value = serde_json::from_str(&text).expect("valid json");
}

#[test]
#[ignore = "requires a native engine build"]
fn concurrent_requests_return_their_own_results() {
    let client = engine_client();

    let constant = |client: Client, value: &'static str| {
        std::thread::spawn(move || {
            client
                .generate(Schema::from(StringSchema::constant(value)))
                .expect("generate constant")
        })
    };

    let first = constant(client.clone(), "alpha");
    let second = constant(client, "beta");

    assert_eq!(first.join().expect("first thread"), "\"alpha\"");
    assert_eq!(second.join().expect("second thread"), "\"beta\"");
}
