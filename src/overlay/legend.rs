use crate::style::color_scale::{Color, ColorScale};

use super::{Overlay, OverlayPosition};

#[derive(Debug, Clone, PartialEq)]
pub struct LegendRow {
    pub swatch: Color,
    pub lower_bound: f64,
    /// `None` for the open-ended top row.
    pub upper_bound: Option<f64>,
}

/// Color key generated from the same scale the regions are styled with.
#[derive(Debug, Clone)]
pub struct Legend {
    rows: Vec<LegendRow>,
}

impl Legend {
    pub fn new(scale: &ColorScale) -> Self {
        let breakpoints: Vec<f64> = scale.breakpoints().collect();
        let rows = breakpoints
            .iter()
            .enumerate()
            .map(|(index, lower_bound)| LegendRow {
                swatch: scale.color_for(lower_bound + 1.0).clone(),
                lower_bound: *lower_bound,
                upper_bound: breakpoints.get(index + 1).copied(),
            })
            .collect();
        Self { rows }
    }

    pub fn rows(&self) -> &[LegendRow] {
        &self.rows
    }
}

impl Overlay for Legend {
    // Built once from the scale, nothing changes afterwards.
    type State = ();

    fn position(&self) -> OverlayPosition {
        OverlayPosition::BottomRight
    }

    fn render(&self, _state: &()) -> String {
        self.rows
            .iter()
            .map(|row| {
                let range = match row.upper_bound {
                    Some(upper_bound) => format!("{}&ndash;{}<br>", row.lower_bound, upper_bound),
                    None => format!("{}+", row.lower_bound),
                };
                format!("<i style=\"background:{}\"></i> {}", row.swatch, range)
            })
            .collect()
    }
}
