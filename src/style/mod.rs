pub mod color_scale;
pub mod record;

use crate::geofile::feature::Feature;

use self::color_scale::{Color, ColorScale};
use self::record::StyleRecord;

/// Maps features to their choropleth style. Pure; the color scale is the only input besides
/// the feature.
#[derive(Debug, Clone, Default)]
pub struct StyleEngine {
    scale: ColorScale,
}

impl StyleEngine {
    pub fn new(scale: ColorScale) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> &ColorScale {
        &self.scale
    }

    pub fn color_for(&self, value: f64) -> &Color {
        self.scale.color_for(value)
    }

    pub fn style_for(&self, feature: &Feature) -> StyleRecord {
        // A missing value takes the same path as NaN: the first bucket.
        let value = feature.value().unwrap_or(f64::NAN);
        StyleRecord::base(self.color_for(value).clone())
    }
}
