//! CSS values derived from engine state.

use crate::constants::{
    TITLE_BEFORE_REST_OFFSET_PX, TITLE_COLOR_HOVER, TITLE_COLOR_REST, TITLE_HOVER_OFFSET_PX,
};

const GRAYSCALE_BASE: &str = "grayscale(100%) contrast(1.2)";

/// Image filter for a non-hovered tile. `shadow_px` adds the red/cyan split.
pub fn image_filter_css(shadow_px: Option<f32>) -> String {
    match shadow_px {
        Some(n) => format!(
            "{GRAYSCALE_BASE} drop-shadow({n}px 0 0 #ff0000) drop-shadow(-{n}px 0 0 #00ffff)"
        ),
        None => GRAYSCALE_BASE.to_string(),
    }
}

/// Title label pose interpolated between rest (`mix = 0`) and hover (`mix = 1`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TitleStyle {
    pub color: [u8; 3],
    pub x_px: f32,
    pub before_opacity: f32,
    pub before_x_px: f32,
}

impl TitleStyle {
    pub fn at(mix: f32) -> Self {
        let mix = mix.clamp(0.0, 1.0);
        let mut color = [0u8; 3];
        for (i, c) in color.iter_mut().enumerate() {
            let a = TITLE_COLOR_REST[i] as f32;
            let b = TITLE_COLOR_HOVER[i] as f32;
            *c = (a + (b - a) * mix).round() as u8;
        }
        Self {
            color,
            x_px: TITLE_HOVER_OFFSET_PX * mix,
            before_opacity: mix,
            before_x_px: TITLE_BEFORE_REST_OFFSET_PX * (1.0 - mix),
        }
    }

    pub fn color_css(&self) -> String {
        let [r, g, b] = self.color;
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn transform_css(&self) -> String {
        format!("translateX({}px)", self.x_px)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_without_velocity_is_plain_grayscale() {
        assert_eq!(image_filter_css(None), "grayscale(100%) contrast(1.2)");
        let f = image_filter_css(Some(0.05));
        assert!(f.contains("drop-shadow(0.05px 0 0 #ff0000)"));
        assert!(f.contains("drop-shadow(-0.05px 0 0 #00ffff)"));
    }

    #[test]
    fn title_endpoints() {
        let rest = TitleStyle::at(0.0);
        assert_eq!(rest.color_css(), "#1a1a1a");
        assert_eq!(rest.x_px, 0.0);
        assert_eq!(rest.before_x_px, -8.0);
        let hover = TitleStyle::at(1.0);
        assert_eq!(hover.color_css(), "#666666");
        assert_eq!(hover.transform_css(), "translateX(12px)");
        assert_eq!(hover.before_opacity, 1.0);
        assert_eq!(hover.before_x_px, 0.0);
    }
}
