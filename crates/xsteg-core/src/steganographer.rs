//! Hides data in and reads data back from the budgeted bits of an image.
//!
//! The embedded stream is a 64 bit big endian length header, counting all
//! bits of the stream including the header itself, followed by the data.
//! The stream is spread most significant bit first over the pixels in index
//! order, within a pixel over R, G, B and A, using exactly the number of low
//! bits the availability map grants each channel.

use std::io::Cursor;
use std::path::Path;

use bitstream_io::{BitRead, BitReader};
use byteorder::{ByteOrder, WriteBytesExt};
use log::{debug, error};

use crate::availability::{AvailabilityMap, AvailabilityThreshold};
use crate::bit_tools::{pack_bits_to_bytes, set_low_bits, top_bits};
use crate::codec_options::CodecOptions;
use crate::error::XstegError;
use crate::media::Media;
use crate::progress::{NoProgress, Progress, Reporter, Stage};
use crate::result::Result;

/// size of the length header in bits
pub const HEADER_BITS: usize = 64;

const PROGRESS_STEPS: usize = 100;

/// A steganography session over one image.
pub struct Steganographer {
    media: Media,
    map: AvailabilityMap,
    options: CodecOptions,
    progress: Box<dyn Progress>,
}

impl Steganographer {
    pub fn new(media: Media) -> Self {
        let map = AvailabilityMap::new(media.pixel_count());
        Self {
            media,
            map,
            options: CodecOptions::default(),
            progress: Box::new(NoProgress),
        }
    }

    pub fn from_file(file: &Path) -> Result<Self> {
        Ok(Self::new(Media::from_file(file)?))
    }

    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_progress(mut self, progress: Box<dyn Progress>) -> Self {
        self.progress = progress;
        self
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    pub fn add_threshold(&mut self, threshold: AvailabilityThreshold) -> &mut Self {
        self.map.add_threshold(threshold);
        self
    }

    pub fn add_thresholds(
        &mut self,
        thresholds: impl IntoIterator<Item = AvailabilityThreshold>,
    ) -> &mut Self {
        self.map.add_thresholds(thresholds);
        self
    }

    pub fn availability_map(&self) -> &AvailabilityMap {
        &self.map
    }

    /// Resolves the availability map, a no-op unless thresholds changed.
    pub fn apply_thresholds(&mut self) -> Result<()> {
        self.map.apply(
            self.media.as_raw(),
            self.options.workers,
            self.progress.as_ref(),
        )
    }

    pub fn get_key(&self) -> String {
        self.map.generate_key()
    }

    /// Appends the thresholds of `key` and resolves the map right away.
    pub fn restore_key(&mut self, key: &str) -> Result<()> {
        self.map.restore_from_key(key)?;
        self.apply_thresholds()
    }

    /// Number of bits the image can carry, the length header included.
    pub fn available_space_bits(&mut self) -> Result<usize> {
        self.apply_thresholds()?;
        Ok(self.map.available_capacity_bits())
    }

    /// Hides `data` in the image.
    ///
    /// Fails with [`XstegError::InsufficientCapacity`] before touching a
    /// single pixel when the data and its header do not fit.
    pub fn write_data(&mut self, data: &[u8]) -> Result<()> {
        self.apply_thresholds()?;

        let required = data.len().saturating_mul(8).saturating_add(HEADER_BITS);
        let available = self.map.available_capacity_bits();
        if available < required {
            error!("{required} bits required, {available} available");
            return Err(XstegError::InsufficientCapacity {
                required,
                available,
            });
        }

        let mut stream = Vec::with_capacity(data.len() + HEADER_BITS / 8);
        stream.write_u64::<byteorder::BigEndian>(required as u64)?;
        stream.extend_from_slice(data);
        debug!(
            "Hiding {} bytes in {required} of {available} bits",
            data.len()
        );

        let mut bits = BitReader::endian(Cursor::new(stream), bitstream_io::BigEndian);
        self.embed(&mut bits, required)
    }

    /// Walks the budgeted channels and overwrites them with the next `len` bits of `stream`.
    ///
    /// The last channel touched is filled up with zero bits.
    fn embed(&mut self, stream: &mut impl BitRead, len: usize) -> Result<()> {
        let progress = self.progress.as_ref();
        let mut reporter = Reporter::new(progress, Stage::Encode, len, PROGRESS_STEPS);
        let mut remaining = len;

        for (idx, budget) in self.map.available_map().iter().enumerate() {
            if remaining == 0 {
                break;
            }
            if budget.is_zero() {
                continue;
            }
            let Some(px) = self.media.pixel_mut(idx) else {
                break;
            };

            let before = remaining;
            for (channel, bits) in px.iter_mut().zip(budget.channels()) {
                if remaining == 0 {
                    break;
                }
                let n = bits.count();
                if n == 0 {
                    continue;
                }
                let mut chunk = Vec::with_capacity(n);
                for _ in 0..n {
                    if remaining > 0 {
                        remaining -= 1;
                        chunk.push(stream.read_bit()?);
                    } else {
                        chunk.push(false);
                    }
                }
                set_low_bits(channel, &chunk);
            }
            reporter.advance(len - remaining, before - remaining);
        }
        reporter.finish();

        Ok(())
    }

    /// Reads back data hidden by [`Steganographer::write_data`], using the same thresholds.
    pub fn read_data(&mut self) -> Result<Vec<u8>> {
        self.apply_thresholds()?;
        let capacity = self.map.available_capacity_bits();
        if capacity < HEADER_BITS {
            error!(
                "Only {capacity} bits are available, the length header alone needs {HEADER_BITS}"
            );
            return Err(XstegError::InsufficientCapacity {
                required: HEADER_BITS,
                available: capacity,
            });
        }

        let (mut bits, next_pixel) = self.collect_bits(0, HEADER_BITS, Stage::DecodeHeader);
        let header = pack_bits_to_bytes(&bits[..HEADER_BITS], 0);
        let total_bits = byteorder::BigEndian::read_u64(&header);
        if total_bits < HEADER_BITS as u64
            || (total_bits - HEADER_BITS as u64) % 8 != 0
            || total_bits > capacity as u64
        {
            error!("Decoded an implausible length header of {total_bits} bits");
            return Err(XstegError::ImplausibleLengthHeader {
                total_bits,
                capacity,
            });
        }
        let total = total_bits as usize;
        debug!("Length header announces {total} bits");

        if bits.len() < total {
            let (rest, _) = self.collect_bits(next_pixel, total - bits.len(), Stage::Decode);
            bits.extend(rest);
        }
        if bits.len() < total {
            return Err(XstegError::ImplausibleLengthHeader {
                total_bits,
                capacity,
            });
        }
        bits.truncate(total);

        Ok(pack_bits_to_bytes(&bits, HEADER_BITS / 8))
    }

    /// Collects the budgeted bits of whole pixels, starting at pixel `start`,
    /// until at least `wanted` bits are gathered.
    ///
    /// Returns the bits and the index of the first pixel not read.
    fn collect_bits(&self, start: usize, wanted: usize, stage: Stage) -> (Vec<bool>, usize) {
        let mut reporter = Reporter::new(self.progress.as_ref(), stage, wanted, PROGRESS_STEPS);
        let mut bits = Vec::with_capacity(wanted + 32);
        let budgets = self.map.available_map();

        for (idx, budget) in budgets.iter().enumerate().skip(start) {
            if budget.is_zero() {
                continue;
            }
            let Some(px) = self.media.pixel(idx) else {
                break;
            };
            let before = bits.len();
            for (channel, n) in px.into_iter().zip(budget.channels()) {
                bits.extend(top_bits(channel, n.count()));
            }
            reporter.advance(bits.len(), bits.len() - before);

            if bits.len() >= wanted {
                reporter.finish();
                return (bits, idx + 1);
            }
        }
        reporter.finish();

        (bits, budgets.len())
    }

    pub fn media(&self) -> &Media {
        &self.media
    }

    pub fn into_media(self) -> Media {
        self.media
    }

    /// saves the image in the format named by the extension of `file`
    pub fn save_as(&self, file: &Path) -> Result<()> {
        self.media.save_with(file, &self.options.save)
    }
}
