//! Visual data of pixels, the scalar metrics thresholds are compared against.
//!
//! Every metric maps a RGBA pixel to a value in `[0, 1]`. Before the metric
//! is computed each channel can be truncated by a number of low bits, which
//! is how the value looks after those bits got overwritten by hidden data.

use std::fmt;
use std::str::FromStr;

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::availability::PixelAvailability;
use crate::error::XstegError;
use crate::media::Media;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum VisualDataType {
    ColorRed,
    ColorGreen,
    ColorBlue,
    Alpha,
    AverageRgb,
    AverageRgba,
    Luminance,
    Saturation,
}

impl VisualDataType {
    pub const ALL: [VisualDataType; 8] = [
        VisualDataType::Alpha,
        VisualDataType::AverageRgb,
        VisualDataType::AverageRgba,
        VisualDataType::ColorBlue,
        VisualDataType::ColorGreen,
        VisualDataType::ColorRed,
        VisualDataType::Luminance,
        VisualDataType::Saturation,
    ];

    /// the name used on the command line and for generated file names
    pub fn name(self) -> &'static str {
        match self {
            VisualDataType::ColorRed => "COLOR_RED",
            VisualDataType::ColorGreen => "COLOR_GREEN",
            VisualDataType::ColorBlue => "COLOR_BLUE",
            VisualDataType::Alpha => "ALPHA",
            VisualDataType::AverageRgb => "AVERAGE_VALUE_RGB",
            VisualDataType::AverageRgba => "AVERAGE_VALUE_RGBA",
            VisualDataType::Luminance => "LUMINANCE",
            VisualDataType::Saturation => "SATURATION",
        }
    }
}

impl fmt::Display for VisualDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VisualDataType {
    type Err = XstegError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "COLOR_RED" | "RED" => Ok(VisualDataType::ColorRed),
            "COLOR_GREEN" | "GREEN" => Ok(VisualDataType::ColorGreen),
            "COLOR_BLUE" | "BLUE" => Ok(VisualDataType::ColorBlue),
            "ALPHA" => Ok(VisualDataType::Alpha),
            "AVERAGE_VALUE_RGB" | "AVERAGE_RGB" => Ok(VisualDataType::AverageRgb),
            "AVERAGE_VALUE_RGBA" | "AVERAGE_RGBA" => Ok(VisualDataType::AverageRgba),
            "LUMINANCE" => Ok(VisualDataType::Luminance),
            "SATURATION" => Ok(VisualDataType::Saturation),
            _ => Err(XstegError::UnknownVisualDataType(s.to_string())),
        }
    }
}

/// drops the lowest `bits` bits of a channel by integer division through `2^bits`
#[inline(always)]
fn truncate(channel: u8, bits: usize) -> u8 {
    channel.checked_shr(bits as u32).unwrap_or(0)
}

/// Computes the visual data of one pixel, after truncating each channel by `truncate_bits`.
///
/// Unset channels in `truncate_bits` are not truncated.
///
/// ```rust
/// use xsteg_core::availability::PixelAvailability;
/// use xsteg_core::visual_data::{visual_data, VisualDataType};
///
/// let px = [255, 0, 0, 255];
/// assert_eq!(visual_data(px, VisualDataType::Saturation, PixelAvailability::UNSET), 1.0);
/// assert_eq!(visual_data(px, VisualDataType::Luminance, PixelAvailability::UNSET), 0.5);
/// ```
pub fn visual_data(
    px: [u8; 4],
    data_type: VisualDataType,
    truncate_bits: PixelAvailability,
) -> f32 {
    let [r, g, b, a] = truncate_bits.channels().map(|c| c.count());
    let [r, g, b, a] = [
        truncate(px[0], r) as f32,
        truncate(px[1], g) as f32,
        truncate(px[2], b) as f32,
        truncate(px[3], a) as f32,
    ];

    match data_type {
        VisualDataType::ColorRed => r / 255.0,
        VisualDataType::ColorGreen => g / 255.0,
        VisualDataType::ColorBlue => b / 255.0,
        VisualDataType::Alpha => a / 255.0,
        VisualDataType::AverageRgb => (r + g + b) / 3.0 / 255.0,
        VisualDataType::AverageRgba => (r + g + b + a) / 4.0 / 255.0,
        VisualDataType::Luminance => {
            let max = r.max(g).max(b);
            let min = r.min(g).min(b);
            (max + min) / 2.0 / 255.0
        }
        VisualDataType::Saturation => {
            let max = r.max(g).max(b);
            let min = r.min(g).min(b);
            // black has no hue, hence no saturation
            if max == 0.0 {
                0.0
            } else {
                (max - min) / max
            }
        }
    }
}

/// Computes the visual data of every pixel of a raw RGBA8 buffer, in pixel order.
pub fn visual_data_values(
    rgba: &[u8],
    data_type: VisualDataType,
    truncate_bits: PixelAvailability,
) -> Vec<f32> {
    rgba.chunks_exact(4)
        .map(|px| visual_data([px[0], px[1], px[2], px[3]], data_type, truncate_bits))
        .collect()
}

/// Renders the visual data of an image as a grayscale image, `1.0` being white.
pub fn visual_data_image(media: &Media, data_type: VisualDataType) -> RgbaImage {
    let values = visual_data_values(media.as_raw(), data_type, PixelAvailability::UNSET);
    gray_image(
        media.width(),
        media.height(),
        values.iter().map(|v| (v * 255.0) as u8),
    )
}

/// Renders black pixels where the visual data is above `value`, white pixels elsewhere.
pub fn visual_data_diff_image(media: &Media, data_type: VisualDataType, value: f32) -> RgbaImage {
    let values = visual_data_values(media.as_raw(), data_type, PixelAvailability::UNSET);
    gray_image(
        media.width(),
        media.height(),
        values.iter().map(|v| if *v > value { 0 } else { u8::MAX }),
    )
}

fn gray_image(width: u32, height: u32, intensities: impl Iterator<Item = u8>) -> RgbaImage {
    let raw = intensities
        .flat_map(|i| [i, i, i, u8::MAX])
        .collect::<Vec<_>>();
    match ImageBuffer::from_raw(width, height, raw) {
        Some(image) => image,
        None => ImageBuffer::from_pixel(width, height, Rgba([0, 0, 0, u8::MAX])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::availability::ChannelBits::*;
    use crate::test_utils::prepare_5x5_image;

    const NONE: PixelAvailability = PixelAvailability::UNSET;

    fn assert_close(given: f32, expected: f32) {
        assert!(
            (given - expected).abs() < 1e-6,
            "expected {expected} but got {given}"
        );
    }

    #[test]
    fn should_compute_channel_values() {
        let px = [51, 102, 153, 204];
        assert_close(visual_data(px, VisualDataType::ColorRed, NONE), 0.2);
        assert_close(visual_data(px, VisualDataType::ColorGreen, NONE), 0.4);
        assert_close(visual_data(px, VisualDataType::ColorBlue, NONE), 0.6);
        assert_close(visual_data(px, VisualDataType::Alpha, NONE), 0.8);
        assert_close(visual_data(px, VisualDataType::AverageRgb, NONE), 0.4);
        assert_close(visual_data(px, VisualDataType::AverageRgba, NONE), 0.5);
    }

    #[test]
    fn should_compute_luminance_and_saturation() {
        let px = [200, 40, 40, 255];
        assert_close(
            visual_data(px, VisualDataType::Luminance, NONE),
            120.0 / 255.0,
        );
        assert_close(visual_data(px, VisualDataType::Saturation, NONE), 0.8);
    }

    #[test]
    fn should_define_saturation_of_black_as_zero() {
        let value = visual_data([0, 0, 0, 255], VisualDataType::Saturation, NONE);
        assert_eq!(value, 0.0);
        assert!(!value.is_nan());
    }

    #[test]
    fn should_truncate_channels_before_computing() {
        let px = [255, 255, 255, 255];
        let truncate = PixelAvailability::new(Bits(1), Bits(8), Unset, Bits(0));
        assert_close(
            visual_data(px, VisualDataType::ColorRed, truncate),
            127.0 / 255.0,
        );
        assert_close(visual_data(px, VisualDataType::ColorGreen, truncate), 0.0);
        assert_close(visual_data(px, VisualDataType::ColorBlue, truncate), 1.0);
        assert_close(visual_data(px, VisualDataType::Alpha, truncate), 1.0);
    }

    #[test]
    fn should_stay_within_unit_range() {
        let img = prepare_5x5_image();
        for data_type in VisualDataType::ALL {
            for v in visual_data_values(img.as_raw(), data_type, NONE) {
                assert!((0.0..=1.0).contains(&v), "{data_type} produced {v}");
            }
        }
    }

    #[test]
    fn should_parse_cli_names() {
        assert_eq!(
            "saturation".parse::<VisualDataType>().unwrap(),
            VisualDataType::Saturation
        );
        assert_eq!(
            "AVERAGE_RGB".parse::<VisualDataType>().unwrap(),
            VisualDataType::AverageRgb
        );
        for data_type in VisualDataType::ALL {
            let parsed = data_type.name().parse::<VisualDataType>().unwrap();
            assert_eq!(parsed, data_type);
        }
        assert!(matches!(
            "HUE".parse::<VisualDataType>(),
            Err(XstegError::UnknownVisualDataType(_))
        ));
    }

    #[test]
    fn should_render_a_diff_image() {
        let mut image = RgbaImage::new(2, 1);
        image.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        image.put_pixel(1, 0, Rgba([0, 0, 0, 255]));
        let media = Media::from_image(image);
        let diff = visual_data_diff_image(&media, VisualDataType::Luminance, 0.5);
        assert_eq!(diff.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
        assert_eq!(diff.get_pixel(1, 0), &Rgba([255, 255, 255, 255]));

        let map = visual_data_image(&media, VisualDataType::Luminance);
        assert_eq!(map.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(map.get_pixel(1, 0), &Rgba([0, 0, 0, 255]));
    }
}
