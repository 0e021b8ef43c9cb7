//! Seed a demo database file for the store server.
//!
//! Writes the full collection layout the server expects: a small
//! electronics catalog with categories, and every other collection
//! present but empty. Point `VOLTBAY_DB_PATH` at the file and start
//! `voltbay-store`.

use std::path::Path;

use serde_json::{Value, json};
use tracing::info;

use voltbay_core::Resource;

/// Write the demo database to `path`.
///
/// # Errors
///
/// Returns an error if the file already exists (without `--force`) or
/// cannot be written.
pub async fn run(path: &str, force: bool) -> Result<(), Box<dyn std::error::Error>> {
    let target = Path::new(path);
    if target.exists() && !force {
        return Err(format!("{path} already exists, pass --force to overwrite").into());
    }

    let db = demo_database();
    let pretty = serde_json::to_string_pretty(&db)?;
    tokio::fs::write(target, pretty).await?;

    let products = db["products"].as_array().map_or(0, Vec::len);
    let categories = db["categories"].as_array().map_or(0, Vec::len);
    info!(path, products, categories, "Seeded demo database");

    Ok(())
}

fn demo_database() -> Value {
    let mut db = serde_json::Map::new();
    for resource in Resource::ALL {
        db.insert(resource.as_str().to_owned(), json!([]));
    }
    db.insert("categories".to_owned(), demo_categories());
    db.insert("products".to_owned(), demo_products());
    Value::Object(db)
}

fn demo_categories() -> Value {
    json!([
        { "id": "cat-audio", "name": "Audio", "slug": "audio" },
        { "id": "cat-accessories", "name": "Accessories", "slug": "accessories" },
        { "id": "cat-smart-home", "name": "Smart Home", "slug": "smart-home" },
    ])
}

fn demo_products() -> Value {
    json!([
        {
            "id": "p-anc-headphones",
            "name": "Noise-Cancelling Headphones",
            "price": 199.99,
            "oldPrice": 249.99,
            "image": "/images/anc-headphones.jpg",
            "rating": 4.6,
            "reviewsCount": 128,
            "category": "audio",
            "brand": "Voltbay",
            "stock": 42,
            "options": [
                { "name": "Color", "values": ["Black", "Silver"] }
            ],
            "specs": { "Battery life": "30 h", "Weight": "254 g" }
        },
        {
            "id": "p-portable-speaker",
            "name": "Portable Bluetooth Speaker",
            "price": 59.99,
            "image": "/images/portable-speaker.jpg",
            "rating": 4.3,
            "reviewsCount": 64,
            "category": "audio",
            "brand": "Voltbay",
            "stock": 80,
            "specs": { "Battery life": "12 h", "Water resistance": "IPX7" }
        },
        {
            "id": "p-mech-keyboard",
            "name": "Mechanical Keyboard",
            "price": 89.99,
            "oldPrice": 109.99,
            "image": "/images/mech-keyboard.jpg",
            "rating": 4.8,
            "reviewsCount": 211,
            "category": "accessories",
            "brand": "Keychron",
            "stock": 25,
            "options": [
                { "name": "Switch", "values": ["Red", "Brown", "Blue"] }
            ],
            "specs": { "Layout": "75%", "Connection": "USB-C / BT" }
        },
        {
            "id": "p-usbc-hub",
            "name": "7-in-1 USB-C Hub",
            "price": 34.99,
            "image": "/images/usbc-hub.jpg",
            "rating": 4.1,
            "reviewsCount": 37,
            "category": "accessories",
            "brand": "Anker",
            "stock": 120,
            "specs": { "Ports": "HDMI, 2x USB-A, SD, PD" }
        },
        {
            "id": "p-smart-bulb",
            "name": "Smart LED Bulb (2-pack)",
            "price": 24.99,
            "image": "/images/smart-bulb.jpg",
            "rating": 4.0,
            "reviewsCount": 52,
            "category": "smart-home",
            "brand": "Voltbay",
            "stock": 200,
            "specs": { "Brightness": "800 lm", "Protocol": "Wi-Fi" }
        },
        {
            "id": "p-video-doorbell",
            "name": "Video Doorbell",
            "price": 129.99,
            "oldPrice": 149.99,
            "image": "/images/video-doorbell.jpg",
            "rating": 4.4,
            "reviewsCount": 98,
            "category": "smart-home",
            "brand": "Voltbay",
            "stock": 17,
            "specs": { "Resolution": "2K", "Power": "Battery / wired" }
        },
    ])
}

#[cfg(test)]
mod tests {
    use voltbay_core::Product;

    use super::*;

    #[test]
    fn test_demo_database_has_every_collection() {
        let db = demo_database();
        for resource in Resource::ALL {
            assert!(db[resource.as_str()].is_array(), "{resource} missing");
        }
    }

    #[test]
    fn test_demo_products_deserialize() {
        let products: Vec<Product> =
            serde_json::from_value(demo_products()).expect("valid products");
        assert!(!products.is_empty());
        assert!(products.iter().all(|p| p.price > rust_decimal::Decimal::ZERO));
    }
}
