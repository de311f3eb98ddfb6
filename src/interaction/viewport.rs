use std::f64::consts::PI;

use serde::Deserialize;

const TILE_SIZE: f64 = 256.0;
// Latitude limit of the Web Mercator projection.
const MAX_LATITUDE: f64 = 85.051_128_779_806_6;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// The rendering surface, as far as the interaction layer needs to steer it.
pub trait Viewport {
    /// Move the view so that `bounds` (x = longitude, y = latitude) is entirely visible.
    fn fit_bounds(&mut self, bounds: geo::Rect<f64>);
}

/// Web Mercator map view with integer zoom levels.
#[derive(Debug, Clone)]
pub struct MapViewport {
    pub center: LatLng,
    pub zoom: f64,
    /// Size of the surface in pixels, (width, height).
    pub size: (f64, f64),
    pub max_zoom: f64,
    fit_requests: usize,
}

impl MapViewport {
    pub fn new(center: LatLng, zoom: f64, size: (f64, f64), max_zoom: f64) -> Self {
        Self {
            center,
            zoom,
            size,
            max_zoom,
            fit_requests: 0,
        }
    }

    pub fn fit_requests(&self) -> usize {
        self.fit_requests
    }

    /// Largest integer zoom level at which the projected `bounds` fit into the surface.
    pub fn zoom_for_bounds(&self, bounds: &geo::Rect<f64>) -> f64 {
        let (min_x, min_y) = project(bounds.min().y, bounds.min().x);
        let (max_x, max_y) = project(bounds.max().y, bounds.max().x);
        let span_x = (max_x - min_x).abs();
        // Projected y grows southwards.
        let span_y = (min_y - max_y).abs();

        let (width, height) = self.size;
        let scale_x = if span_x > 0.0 {
            width / (span_x * TILE_SIZE)
        } else {
            f64::INFINITY
        };
        let scale_y = if span_y > 0.0 {
            height / (span_y * TILE_SIZE)
        } else {
            f64::INFINITY
        };
        let scale = scale_x.min(scale_y);
        if !scale.is_finite() {
            return self.max_zoom;
        }
        scale.log2().floor().clamp(0.0, self.max_zoom)
    }
}

impl Viewport for MapViewport {
    fn fit_bounds(&mut self, bounds: geo::Rect<f64>) {
        let (min_x, min_y) = project(bounds.min().y, bounds.min().x);
        let (max_x, max_y) = project(bounds.max().y, bounds.max().x);
        self.center = unproject((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
        self.zoom = self.zoom_for_bounds(&bounds);
        self.fit_requests += 1;
        log::info!(
            "Fitted view to bounds, center ({:.4}, {:.4}) zoom {}",
            self.center.lat,
            self.center.lng,
            self.zoom
        );
    }
}

/// Project to normalized Web Mercator coordinates in [0, 1], y pointing south.
fn project(lat: f64, lng: f64) -> (f64, f64) {
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (lng + 180.0) / 360.0;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0;
    (x, y)
}

fn unproject(x: f64, y: f64) -> LatLng {
    let lng = x * 360.0 - 180.0;
    let lat = (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees();
    LatLng::new(lat, lng)
}
