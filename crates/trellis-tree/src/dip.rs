//! Conversion between device-independent and device pixels.

use trellis_core::Rect;

use crate::options::LayoutOptions;

/// A rectangle in whole device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PixelRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

/// Round a DIP length to the nearest device pixel; halves round away from zero.
pub fn dip_to_px(dip: f64, scale: f64) -> i32 {
    (dip / scale).round() as i32
}

pub fn px_to_dip(px: i32, scale: f64) -> f64 {
    f64::from(px) * scale
}

impl LayoutOptions {
    /// Convert a rectangle in DIPs to device pixels.
    pub fn to_pixels(&self, rect: Rect) -> PixelRect {
        PixelRect {
            left: dip_to_px(rect.left, self.scale_x),
            top: dip_to_px(rect.top, self.scale_y),
            width: dip_to_px(rect.width, self.scale_x),
            height: dip_to_px(rect.height, self.scale_y),
        }
    }

    /// Convert a rectangle in device pixels to DIPs.
    pub fn to_dips(&self, rect: PixelRect) -> Rect {
        Rect::new(
            px_to_dip(rect.left, self.scale_x),
            px_to_dip(rect.top, self.scale_y),
            px_to_dip(rect.width, self.scale_x),
            px_to_dip(rect.height, self.scale_y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding() {
        assert_eq!(dip_to_px(10.4, 1.0), 10);
        assert_eq!(dip_to_px(10.5, 1.0), 11);
        assert_eq!(dip_to_px(-10.5, 1.0), -11);
        assert_eq!(dip_to_px(10.0, 0.5), 20);
    }

    #[test]
    fn test_rect_at_high_dpi() {
        let options = LayoutOptions::default().with_dpi(144.0, 144.0);
        let pixels = options.to_pixels(Rect::new(10.0, 20.0, 101.0, 33.0));
        assert_eq!(
            pixels,
            PixelRect {
                left: 15,
                top: 30,
                width: 152,
                height: 50
            }
        );
        let back = options.to_dips(pixels);
        assert!((back.width - 101.3333).abs() < 0.001);
    }
}
