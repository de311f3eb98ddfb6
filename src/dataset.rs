use serde::Deserialize;

use crate::geofile::feature::PropertyKeys;
use crate::loader::synth::SynthesisConfig;
use crate::overlay::info_panel::InfoPanel;

/// Everything that differs between region datasets: attribute names, info panel wording and
/// whether the value has to be synthesized.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct DatasetConfig {
    pub keys: PropertyKeys,
    pub title: String,
    pub unit_label: String,
    pub placeholder: String,
    #[serde(default)]
    pub synthesize: Option<SynthesisConfig>,
}

impl DatasetConfig {
    pub fn us_states() -> Self {
        Self {
            keys: PropertyKeys::us_states(),
            title: "US Population Density".to_string(),
            unit_label: "people / mi<sup>2</sup>".to_string(),
            placeholder: "Hover over a state".to_string(),
            synthesize: None,
        }
    }

    pub fn world_countries() -> Self {
        Self {
            keys: PropertyKeys::world_countries(),
            title: "World Population".to_string(),
            unit_label: "people".to_string(),
            placeholder: "Hover over a country".to_string(),
            synthesize: Some(SynthesisConfig {
                min: 0.0,
                max: 1500.0,
                seed: None,
            }),
        }
    }

    pub fn info_panel(&self) -> InfoPanel {
        InfoPanel {
            title: self.title.clone(),
            unit_label: self.unit_label.clone(),
            placeholder: self.placeholder.clone(),
        }
    }
}

/// Dataset selection as written in the config file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub enum DatasetPreset {
    UsStates,
    WorldCountries,
    Custom(DatasetConfig),
}

impl DatasetPreset {
    pub fn resolve(self) -> DatasetConfig {
        match self {
            DatasetPreset::UsStates => DatasetConfig::us_states(),
            DatasetPreset::WorldCountries => DatasetConfig::world_countries(),
            DatasetPreset::Custom(config) => config,
        }
    }
}
