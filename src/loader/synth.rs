use anyhow::anyhow;
use rand::prelude::*;
use serde::Deserialize;

use crate::geofile::feature::{FeatureCollection, RegionProperties};

/// Random population attached to every region when the dataset carries none.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SynthesisConfig {
    pub min: f64,
    pub max: f64,
    /// Fixed seed for reproducible maps.
    #[serde(default)]
    pub seed: Option<u64>,
}

pub fn synthesize_population(
    features: &mut FeatureCollection,
    config: &SynthesisConfig,
) -> anyhow::Result<()> {
    if !(config.min.is_finite() && config.max.is_finite()) || config.min > config.max {
        return Err(anyhow!(
            "Invalid population range [{}, {}]",
            config.min,
            config.max
        ));
    }
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    for feature in features.features_mut() {
        let value = rng.gen_range(config.min..=config.max).round();
        feature
            .properties
            .get_or_insert_with(RegionProperties::default)
            .value = Some(value);
    }
    log::info!(
        "Synthesized population in [{}, {}] for {} regions",
        config.min,
        config.max,
        features.len()
    );
    Ok(())
}
