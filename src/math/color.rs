use egui::Color32;

/// Linear-interpolable RGB color with channels in the unit interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);
    pub const RED: Rgb = Rgb::new(1.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn from_array(c: [f32; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }

    pub const fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Multiply every channel by `factor`
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    /// Convert to an 8-bit sRGB color, clamping out-of-range channels
    pub fn to_color32(self) -> Color32 {
        Color32::from_rgb(to_byte(self.r), to_byte(self.g), to_byte(self.b))
    }
}

fn to_byte(channel: f32) -> u8 {
    // NaN saturates to 0
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_color32_endpoints() {
        assert_eq!(Rgb::BLACK.to_color32(), Color32::from_rgb(0, 0, 0));
        assert_eq!(Rgb::WHITE.to_color32(), Color32::from_rgb(255, 255, 255));
        assert_eq!(Rgb::RED.to_color32(), Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn test_to_color32_rounds() {
        let c = Rgb::new(0.5, 0.25, 0.1).to_color32();
        assert_eq!(c, Color32::from_rgb(128, 64, 26));
    }

    #[test]
    fn test_to_color32_clamps() {
        let c = Rgb::new(2.0, -1.0, f32::NAN).to_color32();
        assert_eq!(c, Color32::from_rgb(255, 0, 0));
    }

    #[test]
    fn test_scaled() {
        let c = Rgb::new(0.5, 1.0, 0.2).scaled(0.5);
        assert_eq!(c, Rgb::new(0.25, 0.5, 0.1));
    }

    #[test]
    fn test_array_round_trip() {
        let c = Rgb::from_array([0.1, 0.2, 0.3]);
        assert_eq!(c.to_array(), [0.1, 0.2, 0.3]);
    }
}
