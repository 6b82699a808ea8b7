use std::num::NonZeroUsize;
use std::path::Path;

use crate::error::XstegError;
use crate::result::Result;

/// Default JPEG quality for saved images (1-100)
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Configuration of one steganography session
#[derive(Debug, Clone)]
pub struct CodecOptions {
    /// Number of worker threads used when applying thresholds.
    /// The pixels are split into this many contiguous segments, or one per
    /// pixel for images with fewer pixels. The resulting availability map
    /// does not depend on it.
    pub workers: usize,

    /// How images are written when saved
    pub save: SaveOptions,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            save: SaveOptions::default(),
        }
    }
}

impl CodecOptions {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn single_threaded(self) -> Self {
        self.with_workers(1)
    }

    pub fn with_save_options(mut self, save: SaveOptions) -> Self {
        self.save = save;
        self
    }
}

/// the hardware concurrency, at least 1
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Output image format.
///
/// Note: hidden data only survives lossless formats. JPEG output is meant for
/// the visualization maps and resized copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Bmp => "bmp",
        }
    }

    /// the format named by the extension of `path`, case insensitive
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "png" => Some(OutputFormat::Png),
            "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
            "bmp" => Some(OutputFormat::Bmp),
            _ => None,
        }
    }

    pub fn is_lossless(&self) -> bool {
        !matches!(self, OutputFormat::Jpeg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// Format of images written to paths chosen by the library, like the visual data maps
    pub format: OutputFormat,
    pub jpeg_quality: u8,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self::png()
    }
}

impl SaveOptions {
    pub fn png() -> Self {
        Self {
            format: OutputFormat::Png,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn jpeg(quality: u8) -> Self {
        Self {
            format: OutputFormat::Jpeg,
            jpeg_quality: quality.clamp(1, 100),
        }
    }

    /// Files are written in the format their extension names.
    pub fn format_for(&self, path: &Path) -> Result<OutputFormat> {
        OutputFormat::from_path(path).ok_or(XstegError::UnsupportedMedia)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_never_configure_zero_workers() {
        assert!(CodecOptions::default().workers >= 1);
        assert_eq!(CodecOptions::default().with_workers(0).workers, 1);
        assert_eq!(CodecOptions::default().single_threaded().workers, 1);
    }

    #[test]
    fn should_clamp_jpeg_quality() {
        assert_eq!(SaveOptions::jpeg(0).jpeg_quality, 1);
        assert_eq!(SaveOptions::jpeg(200).jpeg_quality, 100);
        assert_eq!(SaveOptions::default().format.extension(), "png");
    }

    #[test]
    fn should_pick_the_format_from_the_file_extension() {
        let options = SaveOptions::jpeg(80);
        assert_eq!(
            options.format_for(Path::new("out/secret.PNG")).unwrap(),
            OutputFormat::Png
        );
        assert_eq!(
            options.format_for(Path::new("secret.bmp")).unwrap(),
            OutputFormat::Bmp
        );
        assert_eq!(
            SaveOptions::png().format_for(Path::new("a.jpeg")).unwrap(),
            OutputFormat::Jpeg
        );
        assert!(matches!(
            options.format_for(Path::new("secret.gif")),
            Err(XstegError::UnsupportedMedia)
        ));
        assert!(matches!(
            options.format_for(Path::new("secret")),
            Err(XstegError::UnsupportedMedia)
        ));
        assert!(!OutputFormat::Jpeg.is_lossless());
    }
}
