use geo::BoundingRect;

use crate::geofile::feature::Feature;
use crate::style::record::StyleRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerState {
    Idle,
    Highlighted,
}

/// Rendered counterpart of one feature.
#[derive(Debug, Clone)]
pub struct FeatureLayer {
    /// Style computed at attach time. Hover-exit always returns to it.
    base_style: StyleRecord,
    style: StyleRecord,
    state: LayerState,
    /// Stacking order among sibling layers, higher is drawn on top.
    z_index: u64,
    bounds: Option<geo::Rect<f64>>,
}

impl FeatureLayer {
    pub fn new(feature: &Feature, base_style: StyleRecord, z_index: u64) -> Self {
        Self {
            style: base_style.clone(),
            base_style,
            state: LayerState::Idle,
            z_index,
            bounds: feature.geometry.bounding_rect(),
        }
    }

    pub fn style(&self) -> &StyleRecord {
        &self.style
    }

    pub fn base_style(&self) -> &StyleRecord {
        &self.base_style
    }

    pub fn state(&self) -> LayerState {
        self.state
    }

    pub fn z_index(&self) -> u64 {
        self.z_index
    }

    pub fn bounds(&self) -> Option<geo::Rect<f64>> {
        self.bounds
    }

    pub(crate) fn highlight(&mut self, z_index: u64) {
        self.style = self.base_style.highlighted();
        self.z_index = z_index;
        self.state = LayerState::Highlighted;
    }

    pub(crate) fn reset(&mut self) {
        self.style = self.base_style.clone();
        self.state = LayerState::Idle;
    }
}
