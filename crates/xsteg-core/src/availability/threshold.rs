use std::fmt;
use std::str::FromStr;

use super::PixelAvailability;
use crate::error::XstegError;
use crate::result::Result;
use crate::visual_data::VisualDataType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThresholdDirection {
    /// matches visual data greater than or equal to the threshold value
    Above,
    /// matches visual data less than or equal to the threshold value
    Below,
}

impl FromStr for ThresholdDirection {
    type Err = XstegError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "UP" | "ABOVE" => Ok(ThresholdDirection::Above),
            "DOWN" | "BELOW" => Ok(ThresholdDirection::Below),
            _ => Err(XstegError::UnknownDirection(s.to_string())),
        }
    }
}

impl fmt::Display for ThresholdDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdDirection::Above => f.write_str("UP"),
            ThresholdDirection::Below => f.write_str("DOWN"),
        }
    }
}

/// A rule granting `bits` to every pixel whose visual data passes the threshold value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvailabilityThreshold {
    data_type: VisualDataType,
    direction: ThresholdDirection,
    value: f32,
    bits: PixelAvailability,
}

impl AvailabilityThreshold {
    /// Validates and creates a threshold, `value` must be within `[0, 1]`
    /// and every decided channel must grant no more than 8 bits.
    pub fn new(
        data_type: VisualDataType,
        direction: ThresholdDirection,
        value: f32,
        bits: PixelAvailability,
    ) -> Result<Self> {
        if !(0.0..=1.0).contains(&value) {
            return Err(XstegError::InvalidThreshold(format!("value {value} is not in [0, 1]")));
        }
        if !bits.is_valid() {
            return Err(XstegError::InvalidThreshold(format!("bits {bits} exceed 8")));
        }

        Ok(Self {
            data_type,
            direction,
            value,
            bits,
        })
    }

    /// Parses the 4 command line parts `TYPE DIRECTION BITS VALUE`, e.g. `SATURATION UP 1110 0.5`
    pub fn from_parts(data_type: &str, direction: &str, bits: &str, value: &str) -> Result<Self> {
        let Ok(value) = value.trim().parse::<f32>() else {
            return Err(XstegError::InvalidThreshold(format!("'{value}' is not a number")));
        };

        Self::new(data_type.parse()?, direction.parse()?, value, bits.parse()?)
    }

    pub fn data_type(&self) -> VisualDataType {
        self.data_type
    }

    pub fn direction(&self) -> ThresholdDirection {
        self.direction
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn bits(&self) -> PixelAvailability {
        self.bits
    }

    #[inline(always)]
    pub fn matches(&self, visual_data: f32) -> bool {
        match self.direction {
            ThresholdDirection::Above => visual_data >= self.value,
            ThresholdDirection::Below => visual_data <= self.value,
        }
    }
}

impl FromStr for AvailabilityThreshold {
    type Err = XstegError;

    /// parses the whitespace separated form `TYPE DIRECTION BITS VALUE`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.split_whitespace().collect::<Vec<_>>().as_slice() {
            [data_type, direction, bits, value] => {
                Self::from_parts(data_type, direction, bits, value)
            }
            _ => Err(XstegError::InvalidThreshold(format!("'{s}' needs 4 parts"))),
        }
    }
}
