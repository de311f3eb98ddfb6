pub mod attribution;
pub mod info_panel;
pub mod legend;

/// Corner of the map an overlay is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPosition {
    TopRight,
    BottomRight,
}

impl OverlayPosition {
    pub fn css_class(&self) -> &'static str {
        match self {
            OverlayPosition::TopRight => "topright",
            OverlayPosition::BottomRight => "bottomright",
        }
    }
}

/// A widget drawn on top of the map. Rendering is a pure function of `state`.
pub trait Overlay {
    type State;

    fn position(&self) -> OverlayPosition;

    /// Inner markup of the widget.
    fn render(&self, state: &Self::State) -> String;

    /// Markup including the positioned container.
    fn render_container(&self, state: &Self::State) -> String {
        format!(
            "<div class=\"info {}\">{}</div>",
            self.position().css_class(),
            self.render(state)
        )
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    v_htmlescape::escape(text).to_string()
}
