use serde::Deserialize;

/// Names of the attributes read from a feature's raw GeoJSON properties.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct PropertyKeys {
    pub name_key: String,
    pub value_key: String,
}

impl PropertyKeys {
    /// US states dataset, density in people per square mile.
    pub fn us_states() -> Self {
        Self {
            name_key: "name".to_string(),
            value_key: "density".to_string(),
        }
    }

    /// World countries dataset. The population attribute is usually synthesized at load time.
    pub fn world_countries() -> Self {
        Self {
            name_key: "ADMIN".to_string(),
            value_key: "population".to_string(),
        }
    }
}

/// Typed properties of a region, extracted from the raw properties bag at load time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionProperties {
    pub name: Option<String>,
    pub value: Option<f64>,
}

impl RegionProperties {
    pub fn from_json_object(object: &geojson::JsonObject, keys: &PropertyKeys) -> Self {
        let name = object.get(&keys.name_key).and_then(|value| match value {
            serde_json::Value::String(name) => Some(name.clone()),
            serde_json::Value::Number(number) => Some(number.to_string()),
            _ => None,
        });
        let value = object.get(&keys.value_key).and_then(json_value_as_f64);
        Self { name, value }
    }
}

fn json_value_as_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[derive(Debug, Clone)]
pub struct Feature {
    pub geometry: geo::Geometry,
    // None when the source feature had no properties member at all.
    pub properties: Option<RegionProperties>,
    pub id: Option<geojson::feature::Id>,
    /// Properties bag as read from the source, kept for export.
    pub source_properties: Option<geojson::JsonObject>,
}

impl Feature {
    pub fn value(&self) -> Option<f64> {
        self.properties.as_ref().and_then(|properties| properties.value)
    }
}

impl From<geo::Geometry> for Feature {
    fn from(value: geo::Geometry) -> Self {
        Self {
            geometry: value,
            properties: None,
            id: None,
            source_properties: None,
        }
    }
}

/// Ordered features of one dataset. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct FeatureCollection {
    features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Feature> {
        self.features.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }

    /// Only used while loading, before the collection is handed to the view.
    pub(crate) fn features_mut(&mut self) -> &mut Vec<Feature> {
        &mut self.features
    }
}

impl FromIterator<Feature> for FeatureCollection {
    fn from_iter<T: IntoIterator<Item = Feature>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
