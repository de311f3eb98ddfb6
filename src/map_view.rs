use serde::Deserialize;

use crate::dataset::DatasetConfig;
use crate::geofile::feature::FeatureCollection;
use crate::interaction::controller::{InteractionController, PointerEvent};
use crate::interaction::viewport::{LatLng, Viewport};
use crate::overlay::attribution::Attribution;
use crate::overlay::info_panel::InfoPanel;
use crate::overlay::legend::Legend;
use crate::overlay::Overlay;
use crate::style::StyleEngine;

/// Initial center and zoom of the map.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub center: LatLng,
    pub zoom: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            center: LatLng::new(37.8, -96.0),
            zoom: 4.0,
        }
    }
}

/// Base map raster tiles.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct TileLayer {
    pub url_template: String,
    pub max_zoom: f64,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            max_zoom: 19.0,
            attribution:
                "&copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a>"
                    .to_string(),
        }
    }
}

impl TileLayer {
    pub fn tile_url(&self, z: u32, x: u32, y: u32) -> String {
        self.url_template
            .replace("{z}", &z.to_string())
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
    Failed,
}

/// The choropleth map: base tiles, region overlay, info panel and legend.
///
/// The base layer is usable right away. The region overlay, legend and interactions only exist
/// once the dataset load has resolved successfully.
pub struct MapView<V: Viewport> {
    pub view: ViewConfig,
    pub tile_layer: TileLayer,
    controller: InteractionController<V>,
    info_panel: InfoPanel,
    attribution: Attribution,
    legend: Option<Legend>,
    features: Option<FeatureCollection>,
    load_state: LoadState,
}

impl<V: Viewport> MapView<V> {
    pub fn new(
        view: ViewConfig,
        tile_layer: TileLayer,
        dataset: &DatasetConfig,
        engine: StyleEngine,
        viewport: V,
    ) -> Self {
        Self {
            view,
            attribution: Attribution::new(&tile_layer.attribution),
            tile_layer,
            controller: InteractionController::new(viewport, engine),
            info_panel: dataset.info_panel(),
            legend: None,
            features: None,
            load_state: LoadState::Pending,
        }
    }

    /// Take the outcome of the one dataset load. Only the first resolution counts.
    pub fn resolve(&mut self, result: anyhow::Result<FeatureCollection>) {
        if self.load_state != LoadState::Pending {
            log::warn!("Dataset already resolved ({:?}), ignoring", self.load_state);
            return;
        }
        match result {
            Ok(features) => {
                let attached = self.controller.attach(&features);
                self.legend = Some(Legend::new(self.controller.engine().scale()));
                self.features = Some(features);
                self.load_state = LoadState::Loaded;
                log::info!("Region overlay ready with {} layers", attached);
            }
            Err(err) => {
                self.load_state = LoadState::Failed;
                log::error!("Could not load regions, overlay stays empty: {:?}", err);
            }
        }
    }

    pub fn handle(&mut self, event: PointerEvent) {
        if self.load_state != LoadState::Loaded {
            log::debug!("No overlay yet, dropping {:?}", event);
            return;
        }
        self.controller.handle(event);
    }

    pub fn load_state(&self) -> LoadState {
        self.load_state
    }

    pub fn overlay_layer_count(&self) -> usize {
        self.controller.layers().len()
    }

    pub fn features(&self) -> Option<&FeatureCollection> {
        self.features.as_ref()
    }

    pub fn controller(&self) -> &InteractionController<V> {
        &self.controller
    }

    pub fn info_markup(&self) -> String {
        self.info_panel.render_container(self.controller.info())
    }

    /// Tile provider credit. Available before the dataset has loaded.
    pub fn attribution_markup(&self) -> String {
        self.attribution.render_container(&())
    }

    pub fn legend_markup(&self) -> Option<String> {
        self.legend.as_ref().map(|legend| legend.render_container(&()))
    }
}
