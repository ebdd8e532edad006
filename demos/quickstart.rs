/// Quickstart example - ingest, map, build and render
use layermap::{BuilderPart, ConfigStore, DataSource, ValueBuilder, Workspace};
use serde_json::json;

fn main() -> anyhow::Result<()> {
    println!("=== Layermap Quick Start ===\n");

    // Step 1: Data as an API would return it
    let response = json!({
        "page": 1,
        "products": [
            {"name": "Desk Lamp", "price": 39, "brand": {"name": "Lumo"}, "tags": [{"label": "new"}]},
            {"name": "Bookshelf", "price": 120, "brand": {"name": "Oakwood"}, "tags": []}
        ]
    });

    // Step 2: Ingest it; keys are discovered automatically
    let mut workspace = Workspace::default();
    let dataset = workspace.ingest(DataSource::Api, response)?;

    println!("Discovered {} keys ({}):", dataset.keys.len(), dataset.shape);
    for key in &dataset.keys {
        println!("  • {}", key);
    }

    // Step 3: Map keys to layers, with a builder for the price line
    let mappings = workspace.mappings_mut();
    mappings.set_layer("name", "Title");
    mappings.set_layer("price", "Price");
    mappings.set_layer("tags[].label", "Badge");
    mappings.set_builder(
        "price",
        ValueBuilder::new(vec![
            BuilderPart::text("$"),
            BuilderPart::key("price"),
            BuilderPart::separator(" · "),
            BuilderPart::key("brand.name"),
        ]),
    );

    // Step 4: Render every record
    println!();
    for record in workspace.render_all() {
        println!("Record {}:", record.index);
        for layer in record.layers {
            println!("  {:<6} = {:?}", layer.layer_name, layer.text);
        }
    }

    // Step 5: Save the configuration for next time
    let mut store = ConfigStore::new();
    store.save(workspace.capture_config("products", Some("https://example.com/products".to_string())));
    store.persist("layermap-configs.json")?;

    println!("\nActivity log:");
    for entry in workspace.log().entries() {
        println!("  [{:?}] {}", entry.level, entry.message);
    }

    println!("\n✓ Saved configuration to layermap-configs.json");
    println!("Try: layermap-render data.json --config layermap-configs.json --name products");
    Ok(())
}
