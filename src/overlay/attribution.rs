use super::{Overlay, OverlayPosition};

/// Credit line of the base tile provider. Shown as soon as the base layer is, regardless of
/// whether the regions have loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribution {
    /// Trusted markup, e.g. a link to the tile provider's copyright page.
    text: String,
}

impl Attribution {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
        }
    }
}

impl Overlay for Attribution {
    type State = ();

    fn position(&self) -> OverlayPosition {
        OverlayPosition::BottomRight
    }

    fn render(&self, _state: &()) -> String {
        self.text.clone()
    }
}
