use serde::Deserialize;

use crate::geofile::feature::{FeatureCollection, RegionProperties};
use crate::style::StyleEngine;

use super::layer::FeatureLayer;
use super::viewport::Viewport;

/// Pointer input addressed to a rendered feature by its index in the collection.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PointerEvent {
    Enter { feature: usize },
    Leave { feature: usize },
    Click { feature: usize },
}

/// What the info panel should show.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InfoPanelState {
    #[default]
    Empty,
    /// Hovered feature. `None` when the feature had no properties record.
    Showing(Option<RegionProperties>),
}

/// Per-feature hover and click behavior over a set of rendered layers.
///
/// Events are expected one at a time in the order the host delivered them; with a single
/// pointer at most one layer is highlighted at any moment.
pub struct InteractionController<V: Viewport> {
    viewport: V,
    engine: StyleEngine,
    layers: Vec<FeatureLayer>,
    properties: Vec<Option<RegionProperties>>,
    highlighted: Option<usize>,
    info: InfoPanelState,
    top_z_index: u64,
}

impl<V: Viewport> InteractionController<V> {
    pub fn new(viewport: V, engine: StyleEngine) -> Self {
        Self {
            viewport,
            engine,
            layers: Vec::new(),
            properties: Vec::new(),
            highlighted: None,
            info: InfoPanelState::Empty,
            top_z_index: 0,
        }
    }

    /// Create one layer per feature, styled by the engine. Returns the number of layers attached.
    pub fn attach(&mut self, features: &FeatureCollection) -> usize {
        for feature in features.iter() {
            let style = self.engine.style_for(feature);
            let layer = FeatureLayer::new(feature, style, self.top_z_index);
            self.top_z_index += 1;
            self.layers.push(layer);
            self.properties.push(feature.properties.clone());
        }
        log::info!("Attached {} feature layers", features.len());
        features.len()
    }

    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Enter { feature } => self.pointer_enter(feature),
            PointerEvent::Leave { feature } => self.pointer_leave(feature),
            PointerEvent::Click { feature } => self.click(feature),
        }
    }

    pub fn pointer_enter(&mut self, index: usize) {
        if !self.check_index(index) {
            return;
        }
        if let Some(previous) = self.highlighted {
            if previous != index {
                log::debug!("Layer {} still highlighted, resetting it", previous);
                self.layers[previous].reset();
            }
        }
        self.top_z_index += 1;
        self.layers[index].highlight(self.top_z_index);
        self.highlighted = Some(index);
        self.info = InfoPanelState::Showing(self.properties[index].clone());
        log::debug!("Highlighted layer {}", index);
    }

    pub fn pointer_leave(&mut self, index: usize) {
        if !self.check_index(index) {
            return;
        }
        self.layers[index].reset();
        if self.highlighted != Some(index) {
            // Late leave for a layer already reset by a later enter.
            log::debug!("Stale leave for layer {}", index);
            return;
        }
        self.highlighted = None;
        self.info = InfoPanelState::Empty;
        log::debug!("Reset layer {}", index);
    }

    /// Ask the viewport to fit the feature's bounds. The layer's own state is untouched.
    pub fn click(&mut self, index: usize) {
        if !self.check_index(index) {
            return;
        }
        match self.layers[index].bounds() {
            Some(bounds) => self.viewport.fit_bounds(bounds),
            None => log::warn!("Layer {} has an empty geometry, not zooming", index),
        }
    }

    pub fn layers(&self) -> &[FeatureLayer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&FeatureLayer> {
        self.layers.get(index)
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn info(&self) -> &InfoPanelState {
        &self.info
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    pub fn engine(&self) -> &StyleEngine {
        &self.engine
    }

    fn check_index(&self, index: usize) -> bool {
        if index >= self.layers.len() {
            log::warn!(
                "Ignoring event for unknown layer {} ({} layers attached)",
                index,
                self.layers.len()
            );
            return false;
        }
        true
    }
}
