//! Availability: which pixel may carry how many bits in which channel.

mod key;
mod map;
mod pixel;
mod threshold;

pub use key::{generate_key, parse_key};
pub use map::AvailabilityMap;
pub use pixel::{ChannelBits, PixelAvailability, MAX_CHANNEL_BITS};
pub use threshold::{AvailabilityThreshold, ThresholdDirection};
