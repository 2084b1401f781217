//! Feed the reader a document and walk what comes back.
//!
//! Run with: cargo run --example parse_demo

use json::{parse, parse_or_empty, JsonValue};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let text = r#"{
        "name": "sensor-7",
        "online": true,
        "readings": [20.5, 21, 19.75],
        "meta": {"unit": "\u00b0C", "site": null}
    }"#;

    let doc = parse(text)?;
    println!("parsed:\n{}\n", doc.pretty());

    if let Some(JsonValue::Array(readings)) = doc.get("readings") {
        let total: f64 = readings.iter().filter_map(JsonValue::as_f64).sum();
        println!("mean reading: {:.2}", total / readings.len() as f64);
    }
    if let Some(unit) = doc.get("meta").and_then(|meta| meta.get("unit")) {
        println!("unit: {}", unit);
    }
    println!("compact: {}\n", doc);

    // Malformed inputs each surface a distinct error
    let broken = [
        "{\"a\":1,\"a\":2}",
        "[1, 2,]",
        "\"\\ud800\"",
        "{} trailing",
        "1e999",
    ];
    for input in broken {
        if let Err(error) = parse(input) {
            println!("{:20} -> {}", input, error);
        }
    }

    // The lenient entry point logs a warning and degrades instead
    let fallback = parse_or_empty("not json at all");
    println!("lenient fallback: {}", fallback);

    Ok(())
}
