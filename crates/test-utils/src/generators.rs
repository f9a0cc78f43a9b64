//! Deterministic synthetic data generators.
//!
//! Every generator takes a seed so datasets are reproducible across runs.

use dealmap_common::RawDeal;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::fixtures::{ids, DealBuilder};

const COUNTRIES: [&str; 5] = ["France", "Spain", "Germany", "Italy", "Portugal"];
const TYPES: [&str; 6] = ["Carport", "floating", "GROUND", "Rooftop", "hybrid", ""];
const AMOUNTS: [&str; 6] = ["0", "1.5", "12", "250", "abc", ""];
const STAGES: [&str; 3] = [ids::STAGE_ORIGINATION, ids::STAGE_DEVELOPMENT, ids::STAGE_LOST];

fn pick<'a>(rng: &mut StdRng, values: &[&'a str]) -> &'a str {
    values[rng.gen_range(0..values.len())]
}

/// Creates `count` raw deals mixing every country, type, amount and stage
/// variant, including some unlocated records.
///
/// # Example
///
/// ```
/// use test_utils::create_deal_page;
///
/// let deals = create_deal_page(50, 7);
/// assert_eq!(deals.len(), 50);
/// assert_eq!(deals[0].id.as_deref(), Some("gen-0"));
/// ```
pub fn create_deal_page(count: usize, seed: u64) -> Vec<RawDeal> {
    let mut rng = StdRng::seed_from_u64(seed);

    (0..count)
        .map(|i| {
            let lat = if rng.gen_range(0..8) == 0 {
                "n/a".to_string()
            } else {
                format!("{:.4}", rng.gen_range(36.0_f64..51.0))
            };
            let lon = format!("{:.4}", rng.gen_range(-9.0_f64..15.0));

            DealBuilder::new()
                .id(&format!("gen-{}", i))
                .name(&format!("Generated {}", i))
                .at(&lat, &lon)
                .country(pick(&mut rng, &COUNTRIES))
                .project_type(pick(&mut rng, &TYPES))
                .amount(pick(&mut rng, &AMOUNTS))
                .stage(pick(&mut rng, &STAGES))
                .build()
        })
        .collect()
}

/// Seeded permutation of `items`.
pub fn shuffled<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = items.to_vec();
    out.shuffle(&mut rng);
    out
}
