use std::fmt;
use std::str::FromStr;

use crate::error::XstegError;

/// Highest number of bits a single 8 bit color channel can give away.
pub const MAX_CHANNEL_BITS: u8 = 8;

/// The bit budget of one color channel.
///
/// `Unset` means no threshold ever decided about this channel, which is
/// different from an explicit budget of zero bits. Either way it carries no data.
/// The ordering is `Unset < Bits(0) < Bits(1) < ... < Bits(8)`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChannelBits {
    #[default]
    Unset,
    Bits(u8),
}

impl ChannelBits {
    /// number of bits this channel carries, `Unset` carries none
    pub fn count(self) -> usize {
        match self {
            ChannelBits::Unset => 0,
            ChannelBits::Bits(n) => n as usize,
        }
    }

    pub fn is_unset(self) -> bool {
        self == ChannelBits::Unset
    }

    pub fn is_valid(self) -> bool {
        match self {
            ChannelBits::Unset => true,
            ChannelBits::Bits(n) => n <= MAX_CHANNEL_BITS,
        }
    }

    /// the single character notation, `_` (or `-`) for unset, `0`..`8` otherwise
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '_' | '-' => Some(ChannelBits::Unset),
            '0'..='8' => c.to_digit(10).map(|d| ChannelBits::Bits(d as u8)),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            ChannelBits::Unset => '_',
            ChannelBits::Bits(n) => char::from_digit(n as u32, 10).unwrap_or('?'),
        }
    }
}

impl fmt::Display for ChannelBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// Bit budget of one pixel, per channel in R, G, B, A order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PixelAvailability {
    pub r: ChannelBits,
    pub g: ChannelBits,
    pub b: ChannelBits,
    pub a: ChannelBits,
}

impl PixelAvailability {
    pub const UNSET: PixelAvailability = PixelAvailability {
        r: ChannelBits::Unset,
        g: ChannelBits::Unset,
        b: ChannelBits::Unset,
        a: ChannelBits::Unset,
    };

    pub fn new(r: ChannelBits, g: ChannelBits, b: ChannelBits, a: ChannelBits) -> Self {
        Self { r, g, b, a }
    }

    /// shorthand for a budget where every channel is explicitly decided
    pub fn bits(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self::new(
            ChannelBits::Bits(r),
            ChannelBits::Bits(g),
            ChannelBits::Bits(b),
            ChannelBits::Bits(a),
        )
    }

    pub fn channels(&self) -> [ChannelBits; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// all four channels are explicitly `0`
    pub fn is_zero(&self) -> bool {
        self.channels().iter().all(|c| *c == ChannelBits::Bits(0))
    }

    /// all four channels are `Unset`, such a budget can never change anything
    pub fn is_useless(&self) -> bool {
        self.channels().iter().all(|c| c.is_unset())
    }

    pub fn is_valid(&self) -> bool {
        self.channels().iter().all(|c| c.is_valid())
    }

    /// total number of bits this pixel carries
    pub fn bit_count(&self) -> usize {
        self.channels().iter().map(|c| c.count()).sum()
    }

    /// copies every decided channel of `other` over `self`, unset channels of `other` are ignored
    pub fn overwrite_with(&mut self, other: &PixelAvailability) {
        for (target, source) in [
            (&mut self.r, other.r),
            (&mut self.g, other.g),
            (&mut self.b, other.b),
            (&mut self.a, other.a),
        ] {
            if !source.is_unset() {
                *target = source;
            }
        }
    }

    /// per channel maximum of both budgets
    pub fn max(&self, other: &PixelAvailability) -> Self {
        Self::new(
            self.r.max(other.r),
            self.g.max(other.g),
            self.b.max(other.b),
            self.a.max(other.a),
        )
    }
}

impl FromStr for PixelAvailability {
    type Err = XstegError;

    /// parses the 4 character notation, e.g. `1120` or `_2_0`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let channels = s
            .chars()
            .map(ChannelBits::from_char)
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| XstegError::InvalidBits(s.to_string()))?;

        match channels.as_slice() {
            [r, g, b, a] => Ok(Self::new(*r, *g, *b, *a)),
            _ => Err(XstegError::InvalidBits(s.to_string())),
        }
    }
}

impl fmt::Display for PixelAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}{}", self.r, self.g, self.b, self.a)
    }
}
