use crate::geofile::feature::RegionProperties;
use crate::interaction::controller::InfoPanelState;

use super::{escape_html, Overlay, OverlayPosition};

const NO_DATA: &str = "no data";

/// Hover readout of the region under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoPanel {
    pub title: String,
    /// Unit appended to the value. Trusted markup, e.g. "people / mi<sup>2</sup>".
    pub unit_label: String,
    pub placeholder: String,
}

impl InfoPanel {
    fn render_properties(&self, properties: &RegionProperties) -> String {
        let name = properties
            .name
            .as_deref()
            .map(escape_html)
            .unwrap_or_else(|| NO_DATA.to_string());
        let value = match properties.value {
            Some(value) => format!("{} {}", value, self.unit_label),
            None => NO_DATA.to_string(),
        };
        format!("<b>{}</b><br />{}", name, value)
    }
}

impl Overlay for InfoPanel {
    type State = InfoPanelState;

    fn position(&self) -> OverlayPosition {
        OverlayPosition::TopRight
    }

    fn render(&self, state: &InfoPanelState) -> String {
        let body = match state {
            InfoPanelState::Empty => escape_html(&self.placeholder),
            InfoPanelState::Showing(Some(properties)) => self.render_properties(properties),
            InfoPanelState::Showing(None) => NO_DATA.to_string(),
        };
        format!("<h4>{}</h4>{}", escape_html(&self.title), body)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::geofile::feature::RegionProperties;
    use crate::interaction::controller::InfoPanelState;
    use crate::overlay::Overlay;

    use super::InfoPanel;

    fn panel() -> InfoPanel {
        InfoPanel {
            title: "US Population Density".to_string(),
            unit_label: "people / mi<sup>2</sup>".to_string(),
            placeholder: "Hover over a state".to_string(),
        }
    }

    #[rstest]
    #[case(InfoPanelState::Empty, "<h4>US Population Density</h4>Hover over a state")]
    #[case(
        InfoPanelState::Showing(Some(RegionProperties { name: Some("Alabama".into()), value: Some(94.65) })),
        "<h4>US Population Density</h4><b>Alabama</b><br />94.65 people / mi<sup>2</sup>"
    )]
    #[case(
        InfoPanelState::Showing(Some(RegionProperties { name: Some("Guam".into()), value: None })),
        "<h4>US Population Density</h4><b>Guam</b><br />no data"
    )]
    #[case(InfoPanelState::Showing(None), "<h4>US Population Density</h4>no data")]
    fn test_render(#[case] state: InfoPanelState, #[case] expected: &str) {
        assert_eq!(expected, panel().render(&state));
    }

    #[test]
    fn test_render_container() {
        assert_eq!(
            "<div class=\"info topright\"><h4>US Population Density</h4>Hover over a state</div>",
            panel().render_container(&InfoPanelState::Empty)
        );
    }
}
