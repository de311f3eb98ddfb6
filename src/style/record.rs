use serde::{ser::Error, Serialize};

use super::color_scale::Color;

/// Path style of a rendered region. Field names serialize the way Leaflet path options are spelled.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StyleRecord {
    pub fill_color: Color,
    pub weight: f64,
    pub opacity: f64,
    /// Stroke color.
    pub color: String,
    pub dash_array: String,
    pub fill_opacity: f64,
}

impl StyleRecord {
    /// Resting style of a region filled with `fill_color`.
    pub fn base(fill_color: Color) -> Self {
        Self {
            fill_color,
            weight: 2.0,
            opacity: 1.0,
            color: "white".to_string(),
            dash_array: "3".to_string(),
            fill_opacity: 0.7,
        }
    }

    /// Emphasized style applied while the pointer is over the region. Fill color and stroke
    /// opacity carry over from `self`.
    pub fn highlighted(&self) -> Self {
        Self {
            weight: 5.0,
            color: "#666".to_string(),
            dash_array: String::new(),
            fill_opacity: 0.7,
            ..self.clone()
        }
    }

    /// Style fields as GeoJSON properties, ready to be merged into a feature.
    pub fn to_json_object(&self) -> serde_json::Result<geojson::JsonObject> {
        match serde_json::to_value(self)? {
            serde_json::Value::Object(object) => Ok(object),
            other => Err(serde_json::Error::custom(format!(
                "Style serialized to a non-object value: {}",
                other
            ))),
        }
    }
}
