//! HSV colour representation used for ink segmentation.
//!
//! Channels follow the common 8-bit chart convention: hue is stored halved in
//! `0..=180`, saturation and value span `0..=255`.

/// Upper bound of the halved hue channel.
pub const HUE_MAX: u8 = 180;

/// Default brightness ceiling admitting black through mid-dark gray.
pub const DEFAULT_INK_VALUE_MAX: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsv {
    pub hue: u8,
    pub saturation: u8,
    pub value: u8,
}

impl Hsv {
    pub const fn new(hue: u8, saturation: u8, value: u8) -> Self {
        Self { hue, saturation, value }
    }

    pub fn from_rgb(rgb: [u8; 3]) -> Self {
        let [red, green, blue] = rgb;
        let max = red.max(green).max(blue);
        let min = red.min(green).min(blue);
        let chroma = f32::from(max - min);

        let saturation = if max == 0 {
            0
        } else {
            (255.0 * chroma / f32::from(max)).round() as u8
        };

        let hue = if chroma == 0.0 {
            0.0
        } else {
            let (r, g, b) = (f32::from(red), f32::from(green), f32::from(blue));
            let degrees = if max == red {
                60.0 * (g - b) / chroma
            } else if max == green {
                120.0 + 60.0 * (b - r) / chroma
            } else {
                240.0 + 60.0 * (r - g) / chroma
            };
            if degrees < 0.0 { degrees + 360.0 } else { degrees }
        };

        // 360 degrees wraps to 0 once halved and rounded
        let hue = ((hue / 2.0).round() as u8) % HUE_MAX;

        Self {
            hue,
            saturation,
            value: max,
        }
    }
}

/// Inclusive per-channel HSV bounds selecting ink pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRange {
    pub lower: Hsv,
    pub upper: Hsv,
}

impl ColorRange {
    pub const fn new(lower: Hsv, upper: Hsv) -> Self {
        Self { lower, upper }
    }

    /// Brightness-only range: any hue, any saturation, value up to `value_max`.
    pub const fn brightness_at_most(value_max: u8) -> Self {
        Self {
            lower: Hsv::new(0, 0, 0),
            upper: Hsv::new(HUE_MAX, u8::MAX, value_max),
        }
    }

    /// Dark line on a light background.
    pub const fn dark_ink() -> Self {
        Self::brightness_at_most(DEFAULT_INK_VALUE_MAX)
    }

    pub fn contains(&self, hsv: Hsv) -> bool {
        (self.lower.hue..=self.upper.hue).contains(&hsv.hue)
            && (self.lower.saturation..=self.upper.saturation).contains(&hsv.saturation)
            && (self.lower.value..=self.upper.value).contains(&hsv.value)
    }
}

impl Default for ColorRange {
    fn default() -> Self {
        Self::dark_ink()
    }
}
