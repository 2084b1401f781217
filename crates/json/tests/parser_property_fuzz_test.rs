use json::{parse, parse_or_empty, JsonValue};
use proptest::collection::{hash_map, vec};
use proptest::prelude::*;
use proptest::test_runner::TestCaseResult;

fn number_strategy() -> BoxedStrategy<f64> {
    any::<f64>()
        .prop_filter("numbers must be finite", |n| n.is_finite())
        .boxed()
}

fn json_value_strategy() -> BoxedStrategy<JsonValue> {
    let leaf = prop_oneof![
        Just(JsonValue::Null),
        any::<bool>().prop_map(JsonValue::Bool),
        number_strategy().prop_map(JsonValue::Number),
        any::<String>().prop_map(JsonValue::String),
    ]
    .boxed();

    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            vec(inner.clone(), 0..=6).prop_map(JsonValue::Array),
            hash_map(any::<String>(), inner, 0..=6)
                .prop_map(|entries| JsonValue::Object(entries.into_iter().collect())),
        ]
    })
    .boxed()
}

/// Structural equality against the reference parser. Numbers compare as
/// `f64` because the reference keeps integers in a separate lane.
fn values_agree(mine: &JsonValue, oracle: &serde_json::Value) -> bool {
    match (mine, oracle) {
        (JsonValue::Null, serde_json::Value::Null) => true,
        (JsonValue::Bool(a), serde_json::Value::Bool(b)) => a == b,
        (JsonValue::Number(a), serde_json::Value::Number(b)) => b.as_f64() == Some(*a),
        (JsonValue::String(a), serde_json::Value::String(b)) => a == b,
        (JsonValue::Array(a), serde_json::Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_agree(x, y))
        }
        (JsonValue::Object(a), serde_json::Value::Object(b)) => {
            a.len() == b.len()
                && a.iter().all(|(key, value)| {
                    b.get(key).is_some_and(|other| values_agree(value, other))
                })
        }
        _ => false,
    }
}

fn assert_reads_back(rendered: &str, value: &JsonValue) -> TestCaseResult {
    let reread = parse(rendered);
    prop_assert_eq!(
        reread.as_ref(),
        Ok(value),
        "rendering did not read back: {}",
        rendered
    );
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn writer_compact_output_reads_back(value in json_value_strategy()) {
        assert_reads_back(&value.to_string(), &value)?;
    }

    #[test]
    fn writer_pretty_output_reads_back(value in json_value_strategy()) {
        assert_reads_back(&value.pretty(), &value)?;
    }

    #[test]
    fn writer_output_satisfies_reference_parser(value in json_value_strategy()) {
        let rendered = value.to_string();
        let oracle = serde_json::from_str::<serde_json::Value>(&rendered);
        prop_assert!(oracle.is_ok(), "reference parser rejected: {}", rendered);
        prop_assert!(
            values_agree(&value, &oracle.unwrap()),
            "structure mismatch for: {}",
            rendered
        );
    }

    #[test]
    fn reader_never_panics_on_arbitrary_input(input in any::<String>()) {
        let outcome = std::panic::catch_unwind(|| parse(&input));
        prop_assert!(outcome.is_ok(), "parse panicked for input: {input:?}");

        let lenient = parse_or_empty(&input);
        match outcome.unwrap() {
            Ok(value) => prop_assert_eq!(lenient, value),
            Err(_) => prop_assert_eq!(lenient, JsonValue::empty_object()),
        }
    }
}
