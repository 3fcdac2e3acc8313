//! Sample data
//!
//! Generates random toys for a fresh data directory.

use std::path::Path;

use chrono::Utc;
use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use store_object::generic_store::persistence;
use store_object::make_id;
use tracing::info;

use crate::errors::ToyHausError;
use crate::models::Toy;

pub const TOY_LABELS: [&str; 8] = [
    "On wheels",
    "Box game",
    "Art",
    "Baby",
    "Doll",
    "Puzzle",
    "Outdoor",
    "Battery Powered",
];

const NAME_ADJECTIVES: [&str; 10] = [
    "Happy", "Tiny", "Magic", "Speedy", "Fluffy", "Brave", "Shiny", "Wobbly", "Giant", "Sleepy",
];

const NAME_NOUNS: [&str; 10] = [
    "Bear", "Rocket", "Dragon", "Train", "Robot", "Castle", "Bunny", "Truck", "Unicorn", "Blocks",
];

const LOREM: [&str; 24] = [
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis",
];

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

/// Build `count` random toys
pub fn sample_toys(count: usize) -> Vec<Toy> {
    let mut rng = rand::rng();
    let now = Utc::now().timestamp_millis();

    (0..count)
        .map(|_| {
            let name = format!(
                "{} {}",
                NAME_ADJECTIVES.choose(&mut rng).unwrap_or(&"Happy"),
                NAME_NOUNS.choose(&mut rng).unwrap_or(&"Bear")
            );
            let description = (0..20)
                .map(|_| *LOREM.choose(&mut rng).unwrap_or(&"lorem"))
                .collect::<Vec<_>>()
                .join(" ");

            let mut labels = TOY_LABELS.to_vec();
            labels.shuffle(&mut rng);
            let labels = labels
                .into_iter()
                .take(rng.random_range(0..=3))
                .map(str::to_string)
                .collect();

            let created_at = now - rng.random_range(0..DAY_MILLIS);
            Toy {
                id: make_id(store_object::DEFAULT_ID_LENGTH),
                name,
                description: Some(description),
                price: rng.random_range(10..=200) as f64,
                labels,
                in_stock: rng.random_bool(0.7),
                creator: None,
                created_at,
                updated_at: created_at,
            }
        })
        .collect()
}

/// Write `count` random toys to the document at `path`, replacing its contents
pub async fn write_sample_toys(path: &Path, count: usize) -> Result<Vec<Toy>, ToyHausError> {
    let mut toys = sample_toys(count);
    // Ids are random; drop the rare duplicate rather than retry
    let mut seen = std::collections::HashSet::new();
    toys.retain(|toy| seen.insert(toy.id.clone()));

    persistence::create_document(path, &toys).await?;
    info!("Wrote {} sample toy(s) to {}", toys.len(), path.display());
    Ok(toys)
}
