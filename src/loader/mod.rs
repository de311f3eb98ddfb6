pub mod synth;

use std::path::PathBuf;

use anyhow::{anyhow, Context};
use serde::Deserialize;

use crate::geofile::feature::{FeatureCollection, PropertyKeys};
use crate::geofile::geojson::{parse_feature_collection, read_feature_collection};

use self::synth::{synthesize_population, SynthesisConfig};

/// Where the region dataset comes from.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub enum DataSource {
    File { path: PathBuf },
    Url { url: String },
}

/// Loads a dataset once and turns it into a typed feature collection.
pub struct DataLoader {
    pub source: DataSource,
    pub keys: PropertyKeys,
    pub synthesize: Option<SynthesisConfig>,
}

impl DataLoader {
    pub fn load(&self) -> anyhow::Result<FeatureCollection> {
        let mut features = match &self.source {
            DataSource::File { path } => {
                log::info!("Reading regions from {:?}", path);
                read_feature_collection(path, &self.keys)?
            }
            DataSource::Url { url } => {
                log::info!("Fetching regions from {}", url);
                let contents = fetch_text(url)?;
                parse_feature_collection(&contents, &self.keys)?
            }
        };
        if let Some(synthesis) = &self.synthesize {
            synthesize_population(&mut features, synthesis)?;
        }
        log::info!("Loaded {} regions", features.len());
        Ok(features)
    }
}

fn fetch_text(url: &str) -> anyhow::Result<String> {
    let client = reqwest::blocking::Client::builder()
        .user_agent("geostrat")
        .build()?;
    let response = client
        .get(url)
        .send()
        .with_context(|| format!("Requesting {}", url))?;
    if !response.status().is_success() {
        return Err(anyhow!("Request to {} failed with {}", url, response.status()));
    }
    response.text().or(Err(anyhow!("No response text")))
}

#[cfg(test)]
mod tests {
    use testdir::testdir;

    use crate::geofile::feature::PropertyKeys;

    use super::{synth::SynthesisConfig, DataLoader, DataSource};

    const COUNTRIES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"ADMIN": "Aruba"}, "geometry": {"type": "Point", "coordinates": [-69.97, 12.52]}},
            {"type": "Feature", "properties": {"ADMIN": "Angola"}, "geometry": {"type": "Point", "coordinates": [17.87, -11.2]}}
        ]
    }"#;

    #[test]
    fn test_load_file_with_synthesis() {
        let test_dir = testdir!();
        let path = test_dir.join("countries.geojson");
        std::fs::write(&path, COUNTRIES).unwrap();

        let loader = DataLoader {
            source: DataSource::File { path },
            keys: PropertyKeys::world_countries(),
            synthesize: Some(SynthesisConfig {
                min: 0.0,
                max: 1500.0,
                seed: Some(7),
            }),
        };
        let features = loader.load().unwrap();

        assert_eq!(2, features.len());
        for feature in features.iter() {
            let value = feature.value().unwrap();
            assert!((0.0..=1500.0).contains(&value));
        }
        assert_eq!(
            Some("Angola".to_string()),
            features.get(1).unwrap().properties.as_ref().unwrap().name
        );
    }

    #[test]
    fn test_synthesis_overrides_source_population() {
        let test_dir = testdir!();
        let path = test_dir.join("countries.geojson");
        std::fs::write(
            &path,
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {"type": "Feature", "properties": {"ADMIN": "Chad", "population": 99999999}, "geometry": {"type": "Point", "coordinates": [18.7, 15.4]}},
                    {"type": "Feature", "properties": {"ADMIN": "Peru", "population": "-4"}, "geometry": {"type": "Point", "coordinates": [-75.0, -9.2]}}
                ]
            }"#,
        )
        .unwrap();

        let loader = DataLoader {
            source: DataSource::File { path },
            keys: PropertyKeys::world_countries(),
            synthesize: Some(SynthesisConfig {
                min: 100.0,
                max: 200.0,
                seed: Some(3),
            }),
        };
        let features = loader.load().unwrap();

        for feature in features.iter() {
            let value = feature.value().unwrap();
            assert!((100.0..=200.0).contains(&value), "value {} kept", value);
        }
        let chad = features.get(0).unwrap();
        assert_eq!(
            Some("Chad".to_string()),
            chad.properties.as_ref().unwrap().name
        );
        // The raw bag still holds the source value; the typed value is the synthesized one.
        assert_eq!(
            Some(&serde_json::json!(99999999)),
            chad.source_properties.as_ref().unwrap().get("population")
        );
    }

    #[test]
    fn test_load_missing_file_fails() {
        let loader = DataLoader {
            source: DataSource::File {
                path: testdir!().join("missing.geojson"),
            },
            keys: PropertyKeys::us_states(),
            synthesize: None,
        };
        assert!(loader.load().is_err());
    }

    #[test]
    fn test_data_source_from_yaml() {
        let source: DataSource = serde_yaml::from_str("!Url\nurl: http://localhost/us-states.json").unwrap();
        assert_eq!(
            DataSource::Url {
                url: "http://localhost/us-states.json".to_string()
            },
            source
        );
    }
}
