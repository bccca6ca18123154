//! Display colors. The simulation never reads these.

use serde::{Deserialize, Serialize};

/// An RGB color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const LIGHT_GRAY: Color = Color::new(0.75, 0.75, 0.75);
    pub const GRAY: Color = Color::new(0.5, 0.5, 0.5);
    pub const DARK_GRAY: Color = Color::new(0.25, 0.25, 0.25);
    pub const BROWN: Color = Color::new(0.5, 0.25, 0.1);
    pub const RED: Color = Color::new(1.0, 0.0, 0.0);
    pub const ORANGE: Color = Color::new(1.0, 0.5, 0.0);
    pub const YELLOW: Color = Color::new(1.0, 1.0, 0.0);
    pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
    pub const CYAN: Color = Color::new(0.0, 1.0, 1.0);
    pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);
    pub const MAGENTA: Color = Color::new(1.0, 0.0, 1.0);
    pub const PINK: Color = Color::new(1.0, 0.5, 0.5);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// A color wheel of `6 * steps` entries.
    ///
    /// Starts at red and alternately raises the next channel and lowers the
    /// current one, `steps` increments per leg: red, yellow, green, cyan, blue,
    /// magenta and back towards red.
    pub fn rainbow(steps: usize) -> Vec<Color> {
        if steps == 0 {
            return Vec::new();
        }
        let delta = 1.0 / steps as f32;
        let mut rgb = [1.0f32, 0.0, 0.0];
        let mut colors = Vec::with_capacity(6 * steps);
        for channel in 0..3 {
            for j in 0..steps * 2 {
                colors.push(Color::new(rgb[0], rgb[1], rgb[2]));
                if j < steps {
                    let next = (channel + 1) % 3;
                    rgb[next] = (rgb[next] + delta).min(1.0);
                } else {
                    rgb[channel] = (rgb[channel] - delta).max(0.0);
                }
            }
        }
        colors
    }
}
