use std::{fs, path::Path};

use anyhow::{anyhow, Context};
use rayon::prelude::*;

use crate::style::StyleEngine;

use super::feature::{Feature, FeatureCollection, PropertyKeys, RegionProperties};

/// Parse a GeoJSON FeatureCollection, extracting typed properties with `keys`.
///
/// Features without a geometry cannot be rendered and are dropped with a warning. Any other
/// structural problem fails the whole document.
pub fn parse_feature_collection(
    contents: &str,
    keys: &PropertyKeys,
) -> anyhow::Result<FeatureCollection> {
    let geojson: geojson::GeoJson = contents.parse().context("Parsing GeoJSON")?;
    let feature_collection = match geojson {
        geojson::GeoJson::FeatureCollection(feature_collection) => feature_collection,
        geojson::GeoJson::Feature(_) => {
            return Err(anyhow!("Expected a FeatureCollection, found a single Feature"))
        }
        geojson::GeoJson::Geometry(_) => {
            return Err(anyhow!("Expected a FeatureCollection, found a bare Geometry"))
        }
    };

    let num_features = feature_collection.features.len();
    let features: Vec<Option<Feature>> = feature_collection
        .features
        .into_par_iter()
        .map(|feature| convert_feature(feature, keys))
        .collect::<anyhow::Result<_>>()?;
    let features: FeatureCollection = features.into_iter().flatten().collect();
    if features.len() != num_features {
        log::warn!(
            "Out of {} features read, only {} had a geometry.",
            num_features,
            features.len()
        )
    }
    Ok(features)
}

fn convert_feature(
    feature: geojson::Feature,
    keys: &PropertyKeys,
) -> anyhow::Result<Option<Feature>> {
    let properties = feature
        .properties
        .as_ref()
        .map(|object| RegionProperties::from_json_object(object, keys));
    let geometry = match feature.geometry {
        Some(geometry) => geometry,
        None => return Ok(None),
    };
    let geometry = geo::Geometry::<f64>::try_from(geometry)
        .map_err(|err| anyhow!("Could not convert feature geometry, {}", err))?;
    Ok(Some(Feature {
        geometry,
        properties,
        id: feature.id,
        source_properties: feature.properties,
    }))
}

pub fn read_feature_collection(
    filepath: &Path,
    keys: &PropertyKeys,
) -> anyhow::Result<FeatureCollection> {
    let contents = fs::read_to_string(filepath)
        .with_context(|| format!("Reading GeoJSON file {:?}", filepath))?;
    parse_feature_collection(&contents, keys)
}

/// Write the collection as GeoJSON with each feature's computed style merged into its properties.
pub fn write_styled_geojson(
    features: &FeatureCollection,
    engine: &StyleEngine,
    keys: &PropertyKeys,
    output_filepath: &Path,
) -> anyhow::Result<()> {
    let features: Vec<&Feature> = features.iter().collect();
    let styled_features: Vec<geojson::Feature> = features
        .par_iter()
        .map(|feature| styled_feature(feature, engine, keys))
        .collect::<anyhow::Result<_>>()?;
    let feature_collection: geojson::FeatureCollection = styled_features.into_iter().collect();
    let geojson_contents = geojson::GeoJson::from(feature_collection);
    fs::write(output_filepath, geojson_contents.to_string())
        .with_context(|| format!("Writing styled GeoJSON to {:?}", output_filepath))
}

/// Source properties, overlaid with the typed name and value (which may have been synthesized)
/// and then the style fields.
fn styled_feature(
    feature: &Feature,
    engine: &StyleEngine,
    keys: &PropertyKeys,
) -> anyhow::Result<geojson::Feature> {
    let mut properties = feature.source_properties.clone().unwrap_or_default();
    if let Some(region) = &feature.properties {
        if let Some(name) = &region.name {
            properties.insert(keys.name_key.clone(), serde_json::Value::from(name.as_str()));
        }
        if let Some(value) = region.value {
            properties.insert(keys.value_key.clone(), serde_json::Value::from(value));
        }
    }
    let style = engine
        .style_for(feature)
        .to_json_object()
        .context("Serializing feature style")?;
    properties.extend(style);
    Ok(geojson::Feature {
        bbox: None,
        geometry: Some(geojson::Geometry::from(&feature.geometry)),
        id: feature.id.clone(),
        properties: Some(properties),
        foreign_members: None,
    })
}
