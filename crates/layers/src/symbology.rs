use model::Theme;

/// Resolved visual style for one circle marker.
///
/// Stroke styling follows the base-map theme: the dark base map draws no
/// stroke at all, the light one a thin white outline.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MarkerStyle {
    pub radius: f64,
    pub fill: [f32; 4],
    pub fill_opacity: f32,
    pub stroke: [f32; 4],
    pub stroke_weight: f32,
    pub stroke_opacity: f32,
}

impl MarkerStyle {
    pub fn new(fill: [f32; 4], radius: f64, theme: Theme) -> Self {
        match theme {
            Theme::Dark => Self {
                radius,
                fill,
                fill_opacity: 0.9,
                stroke: [0.0, 0.0, 0.0, 0.0],
                stroke_weight: 0.0,
                stroke_opacity: 0.0,
            },
            Theme::Light => Self {
                radius,
                fill,
                fill_opacity: 0.9,
                stroke: [1.0, 1.0, 1.0, 1.0],
                stroke_weight: 1.0,
                stroke_opacity: 0.8,
            },
        }
    }

    /// Cosmetic hover override; not part of the reconciliation contract.
    pub fn hovered(&self) -> Self {
        Self {
            radius: self.radius * 1.2,
            fill_opacity: 1.0,
            ..*self
        }
    }
}
