use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use image::imageops::{self, FilterType};
use image::io::Reader;
use image::{DynamicImage, ImageFormat, ImageOutputFormat};
use log::{debug, error};

use super::Persist;
use crate::codec_options::{OutputFormat, SaveOptions};
use crate::error::XstegError;
use crate::result::Result;

pub use image::RgbaImage;

/// Bytes per RGBA8 pixel
pub const CHANNELS: usize = 4;

/// A carrier image as a flat RGBA8 buffer, addressed by pixel index in row major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Media {
    image: RgbaImage,
}

impl Media {
    pub fn from_image(image: RgbaImage) -> Self {
        Self { image }
    }

    /// Loads a PNG, JPEG or BMP image, the format is detected from the file content.
    pub fn from_file(f: &Path) -> Result<Self> {
        let reader = Reader::open(f)
            .and_then(Reader::with_guessed_format)
            .map_err(|e| {
                error!("Error opening image {f:?}: {e}");
                XstegError::InvalidImageMedia
            })?;
        match reader.format() {
            Some(ImageFormat::Png | ImageFormat::Jpeg | ImageFormat::Bmp) => {}
            other => {
                error!("Unsupported image format of {f:?}: {other:?}");
                return Err(XstegError::UnsupportedMedia);
            }
        }
        let image = reader
            .decode()
            .map_err(|e| {
                error!("Error decoding image {f:?}: {e}");
                XstegError::InvalidImageMedia
            })?
            .to_rgba8();
        debug!(
            "Loaded image {f:?} with {}x{} pixels",
            image.width(),
            image.height()
        );
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn pixel_count(&self) -> usize {
        self.image.width() as usize * self.image.height() as usize
    }

    /// the raw RGBA8 buffer, `4 * pixel_count()` bytes
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// the RGBA channels of the pixel at `idx`, `None` when out of bounds
    pub fn pixel(&self, idx: usize) -> Option<[u8; 4]> {
        let start = idx.checked_mul(CHANNELS)?;
        let end = start.checked_add(CHANNELS)?;
        let px = self.image.as_raw().get(start..end)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// mutable RGBA channels of the pixel at `idx`, `None` when out of bounds
    pub fn pixel_mut(&mut self, idx: usize) -> Option<&mut [u8]> {
        let start = idx.checked_mul(CHANNELS)?;
        let end = start.checked_add(CHANNELS)?;
        let raw: &mut [u8] = &mut self.image;
        raw.get_mut(start..end)
    }

    /// resized copy with absolute pixel dimensions
    pub fn resized_absolute(&self, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(XstegError::InvalidResizeDimensions(width as f32, height as f32));
        }
        Ok(Self::from_image(imageops::resize(&self.image, width, height, FilterType::Triangle)))
    }

    /// resized copy with dimensions in percent of the current ones
    pub fn resized_proportional(&self, percent_width: f32, percent_height: f32) -> Result<Self> {
        if !(percent_width > 0.0 && percent_height > 0.0) {
            return Err(XstegError::InvalidResizeDimensions(percent_width, percent_height));
        }
        let width = (self.width() as f32 * percent_width / 100.0) as u32;
        let height = (self.height() as f32 * percent_height / 100.0) as u32;
        self.resized_absolute(width, height)
    }

    /// Writes the image in the format named by the extension of `file`.
    pub fn save_with(&self, file: &Path, options: &SaveOptions) -> Result<()> {
        let format = options.format_for(file)?;
        let f = File::create(file).map_err(|e| {
            error!("Error creating file {file:?}: {e}");
            XstegError::WriteError { source: e }
        })?;
        let mut writer = BufWriter::new(f);
        self.save_to_writer(&mut writer, format, options.jpeg_quality)?;
        writer
            .flush()
            .map_err(|source| XstegError::WriteError { source })
    }

    pub fn save_to_writer<W: Write + Seek>(
        &self,
        writer: &mut W,
        format: OutputFormat,
        jpeg_quality: u8,
    ) -> Result<()> {
        let result = match format {
            OutputFormat::Png => self.image.write_to(writer, ImageOutputFormat::Png),
            OutputFormat::Bmp => self.image.write_to(writer, ImageOutputFormat::Bmp),
            OutputFormat::Jpeg => DynamicImage::ImageRgba8(self.image.clone())
                .to_rgb8()
                .write_to(writer, ImageOutputFormat::Jpeg(jpeg_quality)),
        };
        result.map_err(|e| {
            error!("Error saving image: {e}");
            XstegError::ImageEncodingError
        })
    }
}

impl Persist for Media {
    fn save_as(&mut self, file: &Path) -> Result<()> {
        self.save_with(file, &SaveOptions::default())
    }
}

impl From<RgbaImage> for Media {
    fn from(image: RgbaImage) -> Self {
        Self::from_image(image)
    }
}
