/// A RGBA `Color`. Each color component is a floating point value
/// with a range from 0 to 1.
#[derive(Serialize, Deserialize, Debug, Default, Copy, Clone, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Into<u32> for Color {
    fn into(self) -> u32 {
        let color = self.clip();
        let mut encoded = ((color.r * 255.0).round() as u32) << 24;
        encoded |= ((color.g * 255.0).round() as u32) << 16;
        encoded |= ((color.b * 255.0).round() as u32) << 8;
        encoded |= (color.a * 255.0).round() as u32;
        encoded
    }
}

impl From<u32> for Color {
    fn from(encoded: u32) -> Self {
        Color::new(
            ((encoded >> 24) & 0xFF) as f32 / 255.0,
            ((encoded >> 16) & 0xFF) as f32 / 255.0,
            ((encoded >> 8) & 0xFF) as f32 / 255.0,
            (encoded & 0xFF) as f32 / 255.0,
        )
    }
}

impl Into<[u8; 4]> for Color {
    fn into(self) -> [u8; 4] {
        let v = self.clip();
        [
            (v.r * 255.0).round() as u8,
            (v.g * 255.0).round() as u8,
            (v.b * 255.0).round() as u8,
            (v.a * 255.0).round() as u8,
        ]
    }
}

impl From<[u8; 4]> for Color {
    fn from(v: [u8; 4]) -> Self {
        Color::new(
            f32::from(v[0]) / 255.0,
            f32::from(v[1]) / 255.0,
            f32::from(v[2]) / 255.0,
            f32::from(v[3]) / 255.0,
        )
    }
}

impl Into<[f32; 4]> for Color {
    fn into(self) -> [f32; 4] {
        self.rgba()
    }
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color { r, g, b, a }
    }

    /// Creates `Color` from a u32 encoded `ARGB`.
    pub fn from_argb_u32(encoded: u32) -> Self {
        Color::new(
            ((encoded >> 16) & 0xFF) as f32 / 255.0,
            ((encoded >> 8) & 0xFF) as f32 / 255.0,
            (encoded & 0xFF) as f32 / 255.0,
            ((encoded >> 24) & 0xFF) as f32 / 255.0,
        )
    }

    /// Packs into a u32 encoded `RGBA`.
    #[inline]
    pub fn packed(&self) -> u32 {
        (*self).into()
    }

    /// Clip to [0.0, 1.0] range.
    pub fn clip(&self) -> Self {
        let mut color = *self;
        color.r = self.r.max(0.0).min(1.0);
        color.g = self.g.max(0.0).min(1.0);
        color.b = self.b.max(0.0).min(1.0);
        color.a = self.a.max(0.0).min(1.0);
        color
    }

    /// Truncate alpha channel.
    pub fn rgb(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn rgba(&self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Color {
    pub fn white() -> Self {
        Color::new(1.0, 1.0, 1.0, 1.0)
    }

    pub fn gray() -> Self {
        Color::new(0.5, 0.5, 0.5, 1.0)
    }

    pub fn black() -> Self {
        Color::new(0.0, 0.0, 0.0, 1.0)
    }

    pub fn red() -> Self {
        Color::new(1.0, 0.0, 0.0, 1.0)
    }

    pub fn green() -> Self {
        Color::new(0.0, 1.0, 0.0, 1.0)
    }

    pub fn blue() -> Self {
        Color::new(0.0, 0.0, 1.0, 1.0)
    }

    pub fn transparent() -> Self {
        Color::new(0.0, 0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn packing() {
        assert_eq!(Color::red().packed(), 0xFF00_00FF);
        assert_eq!(Color::white().packed(), 0xFFFF_FFFF);
        assert_eq!(Color::transparent().packed(), 0);

        let c: Color = 0x1020_30FF.into();
        assert_eq!(c.packed(), 0x1020_30FF);
    }

    #[test]
    fn clip() {
        let c = Color::new(2.0, -1.0, 0.5, 1.0).clip();
        assert_eq!(c, Color::new(1.0, 0.0, 0.5, 1.0));
    }
}
