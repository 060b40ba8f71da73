use serde::Deserialize;

use crate::presentation::color::Argb;

/// Colors used to paint the segmented control.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub border: Argb,
    pub indicator: Argb,
    pub selected_text: Argb,
    /// Muted tint of the accent, usually translucent.
    pub unselected_text: Argb,
    /// Assumed surface color below translucent paint.
    pub background: Argb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            border: Argb(0xFFC9_D4E2),
            indicator: Argb(0xFF29_88FF),
            selected_text: Argb::WHITE,
            unselected_text: Argb(0x8029_88FF),
            background: Argb::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_partial_override() {
        let palette: Palette =
            json5::from_str(r##"{ indicator: "#FF0000", background: "#101010" }"##)
                .expect("valid palette");
        assert_eq!(palette.indicator, Argb(0xFFFF_0000));
        assert_eq!(palette.background, Argb(0xFF10_1010));
        assert_eq!(palette.border, Palette::default().border);
    }
}
