//! Load a small document and run selector queries against it.
//!
//! Run with: cargo run --example query_demo

use dom::{DomLoader, DomSerializer, Selection};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let document = serde_json::json!({
        "tag": "html",
        "children": [{
            "tag": "body",
            "children": [
                {
                    "tag": "ul",
                    "attrs": {"id": "menu", "class": "nav"},
                    "children": [
                        {"tag": "li", "attrs": {"class": "entry"}, "children": [{"text": "Home"}]},
                        {"tag": "li", "attrs": {"class": "entry active"}, "children": [{"text": "Docs"}]}
                    ]
                },
                {"tag": "p", "children": [{"text": "Plain paragraph"}]}
            ]
        }]
    });

    let arena = DomLoader::new().load(&document)?;
    let serializer = DomSerializer::new();

    println!("document outline:");
    println!("{}", serializer.serialize(&arena, arena.root_id())?);

    // single-match form: first hit in document order
    if let Selection::First(Some(menu)) = arena.select("#menu")? {
        println!("#menu -> {}", serializer.node_path(&arena, menu)?);
        println!("text: {:?}", arena.text_content(menu)?);
    }

    // bracket form: every match in document order
    if let Selection::All(entries) = arena.select("[.entry]")? {
        println!("[.entry] -> {} matches", entries.len());
        for id in entries {
            println!("  {}", serializer.node_path(&arena, id)?);
        }
    }

    // misses are not errors
    println!("#missing -> {:?}", arena.select("#missing")?);

    Ok(())
}
