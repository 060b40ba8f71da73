//! Conversion from density-independent units to device pixels

/// Converts design units into device pixels.
///
/// `dp` covers geometry (radii, stroke widths), `sp` covers text sizes and
/// may follow a user font scale.
pub trait UnitConverter {
    fn dp(&self, value: f32) -> i32;
    fn sp(&self, value: f32) -> i32;
}

/// Scale factors of a display, rounded the usual way:
/// `(value * scale + 0.5)` truncated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayMetrics {
    pub density: f32,
    pub scaled_density: f32,
}

impl DisplayMetrics {
    pub const fn new(density: f32, scaled_density: f32) -> Self {
        Self {
            density,
            scaled_density,
        }
    }

    /// One pixel per unit, used for character-cell surfaces.
    pub const fn identity() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl Default for DisplayMetrics {
    fn default() -> Self {
        Self::identity()
    }
}

impl UnitConverter for DisplayMetrics {
    fn dp(&self, value: f32) -> i32 {
        (value * self.density + 0.5) as i32
    }

    fn sp(&self, value: f32) -> i32 {
        (value * self.scaled_density + 0.5) as i32
    }
}
