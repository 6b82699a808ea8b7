//! # xsteg Core API
//!
//! Hides data in the low bits of image color channels. Which pixel may carry
//! how many bits in which channel is decided by an ordered list of
//! thresholds over a visual metric of the pixel, like its saturation or
//! luminance. The thresholds serialize to a short key that is needed again
//! to read the data back.
//!
//! The main structures are
//! - [`Steganographer`][steg] for writing data into and reading data from an image
//! - [`AvailabilityMap`][map] resolving the per pixel bit budget
//! - [`api::encode`] and [`api::decode`] builders wrapping both for files
//!
//! # Usage Examples
//!
//! ## Hide data inside an image
//!
//! ```rust
//! use image::{ImageBuffer, Rgba};
//! use tempfile::tempdir;
//!
//! let temp_dir = tempdir().expect("Failed to create temporary directory");
//! let carrier = temp_dir.path().join("carrier.png");
//! let secret = temp_dir.path().join("secret.png");
//! ImageBuffer::from_fn(64, 64, |x, y| Rgba([(x * 4) as u8, (y * 4) as u8, 128, 255]))
//!     .save(&carrier)
//!     .expect("Failed to write carrier image");
//!
//! let key = xsteg_core::api::encode::prepare()
//!     .with_image(&carrier)
//!     .with_threshold("SATURATION UP 1110 0.3".parse().expect("invalid threshold"))
//!     .with_data(b"Hello, World!".to_vec())
//!     .with_output(&secret)
//!     .execute()
//!     .expect("Failed to hide data in image");
//!
//! assert_eq!(key, "&S>A*1110+0.3");
//! ```
//!
//! ## Read data from an image
//!
//! ```rust
//! # use image::{ImageBuffer, Rgba};
//! # use tempfile::tempdir;
//! # let temp_dir = tempdir().expect("Failed to create temporary directory");
//! # let carrier = temp_dir.path().join("carrier.png");
//! # let secret = temp_dir.path().join("secret.png");
//! # ImageBuffer::from_fn(64, 64, |x, y| Rgba([(x * 4) as u8, (y * 4) as u8, 128, 255]))
//! #     .save(&carrier)
//! #     .expect("Failed to write carrier image");
//! # xsteg_core::api::encode::prepare()
//! #     .with_image(&carrier)
//! #     .use_key("&S>A*1110+0.3")
//! #     .with_data(b"Hello, World!".to_vec())
//! #     .with_output(&secret)
//! #     .execute()
//! #     .expect("Failed to hide data in image");
//! let data = xsteg_core::api::decode::prepare()
//!     .from_secret_image(&secret)
//!     .use_key("&S>A*1110+0.3")
//!     .execute()
//!     .expect("Failed to read data from image");
//!
//! assert_eq!(data, b"Hello, World!");
//! ```
//!
//! [steg]: ./struct.Steganographer.html
//! [map]: ./availability/struct.AvailabilityMap.html

#![warn(clippy::redundant_else)]

pub mod api;
pub mod availability;
pub mod bit_tools;
pub mod codec_options;
pub mod commands;
pub mod error;
pub mod media;
pub mod progress;
pub mod result;
pub mod steganographer;
pub mod visual_data;

pub use crate::availability::{
    AvailabilityMap, AvailabilityThreshold, ChannelBits, PixelAvailability, ThresholdDirection,
};
pub use crate::codec_options::{CodecOptions, OutputFormat, SaveOptions};
pub use crate::error::{KeyError, XstegError};
pub use crate::media::Media;
pub use crate::progress::{LogProgress, NoProgress, Progress, Stage};
pub use crate::result::Result;
pub use crate::steganographer::Steganographer;
pub use crate::visual_data::VisualDataType;
