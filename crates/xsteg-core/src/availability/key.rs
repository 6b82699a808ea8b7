//! The key codec: a compact text form of an ordered threshold list.
//!
//! Each threshold becomes one record, records are concatenated:
//!
//! ```text
//! '&' <type> '>' <direction> '*' <r><g><b><a> '+' <value>
//! ```
//!
//! For example `&S>A*1110+0.5` grants 1 bit on red, green and blue to all
//! pixels with a saturation of at least `0.5`.

use super::{AvailabilityThreshold, ChannelBits, PixelAvailability, ThresholdDirection};
use crate::error::{KeyError, XstegError};
use crate::result::Result;
use crate::visual_data::VisualDataType;

const TYPE_DESIGNATOR: char = '&';
const DIRECTION_DESIGNATOR: char = '>';
const BITS_DESIGNATOR: char = '*';
const VALUE_DESIGNATOR: char = '+';

/// length of a record without its leading `&`, up to and including the `+`
const RECORD_PREFIX_LEN: usize = 9;

fn type_designator(data_type: VisualDataType) -> char {
    match data_type {
        VisualDataType::Alpha => '3',
        VisualDataType::AverageRgb => 'V',
        VisualDataType::AverageRgba => 'W',
        VisualDataType::ColorBlue => '2',
        VisualDataType::ColorGreen => '1',
        VisualDataType::ColorRed => '0',
        VisualDataType::Luminance => 'L',
        VisualDataType::Saturation => 'S',
    }
}

fn data_type_of(designator: char) -> Option<VisualDataType> {
    VisualDataType::ALL
        .into_iter()
        .find(|t| type_designator(*t) == designator)
}

fn direction_designator(direction: ThresholdDirection) -> char {
    match direction {
        ThresholdDirection::Above => 'A',
        ThresholdDirection::Below => 'V',
    }
}

fn direction_of(designator: char) -> Option<ThresholdDirection> {
    match designator {
        'A' => Some(ThresholdDirection::Above),
        'V' => Some(ThresholdDirection::Below),
        _ => None,
    }
}

/// Serializes thresholds in list order, useless thresholds produce no record.
pub fn generate_key(thresholds: &[AvailabilityThreshold]) -> String {
    thresholds
        .iter()
        .filter(|t| !t.bits().is_useless())
        .map(|t| {
            format!(
                "{}{}{}{}{}{}{}{}",
                TYPE_DESIGNATOR,
                type_designator(t.data_type()),
                DIRECTION_DESIGNATOR,
                direction_designator(t.direction()),
                BITS_DESIGNATOR,
                t.bits(),
                VALUE_DESIGNATOR,
                t.value()
            )
        })
        .collect()
}

/// Parses a key back into its thresholds, in key order.
pub fn parse_key(key: &str) -> Result<Vec<AvailabilityThreshold>> {
    let key = key.trim();
    if key.is_empty() {
        return Err(malformed(0, KeyError::EmptyKey));
    }
    let Some(records) = key.strip_prefix(TYPE_DESIGNATOR) else {
        return Err(malformed(0, KeyError::MissingRecordMarker));
    };

    records
        .split(TYPE_DESIGNATOR)
        .enumerate()
        .map(|(i, record)| parse_record(record).map_err(|reason| malformed(i, reason)))
        .collect::<std::result::Result<Vec<_>, _>>()?
        .into_iter()
        .map(|(data_type, direction, value, bits)| {
            AvailabilityThreshold::new(data_type, direction, value, bits)
        })
        .collect()
}

fn malformed(record: usize, reason: KeyError) -> XstegError {
    XstegError::MalformedKey { record, reason }
}

type Record = (VisualDataType, ThresholdDirection, f32, PixelAvailability);

fn parse_record(record: &str) -> std::result::Result<Record, KeyError> {
    let prefix: Vec<char> = record.chars().take(RECORD_PREFIX_LEN).collect();
    if prefix.len() < RECORD_PREFIX_LEN {
        return Err(KeyError::RecordTooShort(record.chars().count()));
    }

    let data_type = data_type_of(prefix[0]).ok_or(KeyError::UnknownVisualDataType(prefix[0]))?;
    expect_designator("direction", DIRECTION_DESIGNATOR, prefix[1])?;
    let direction = direction_of(prefix[2]).ok_or(KeyError::UnknownDirection(prefix[2]))?;
    expect_designator("bits", BITS_DESIGNATOR, prefix[3])?;
    let bits = parse_bits(&prefix[4..8])?;
    expect_designator("value", VALUE_DESIGNATOR, prefix[8])?;

    let value_str: String = record.chars().skip(RECORD_PREFIX_LEN).collect();
    let value = value_str
        .parse::<f32>()
        .map_err(|_| KeyError::InvalidValue(value_str.clone()))?;

    Ok((data_type, direction, value, bits))
}

fn expect_designator(
    name: &'static str,
    expected: char,
    found: char,
) -> std::result::Result<(), KeyError> {
    if found == expected {
        Ok(())
    } else {
        Err(KeyError::InvalidDesignator {
            name,
            expected,
            found,
        })
    }
}

fn parse_bits(chars: &[char]) -> std::result::Result<PixelAvailability, KeyError> {
    let invalid = || KeyError::InvalidBits(chars.iter().collect());
    let bits = chars
        .iter()
        .map(|c| match c {
            // only the canonical unset marker is part of the key grammar
            '-' => None,
            c => ChannelBits::from_char(*c),
        })
        .collect::<Option<Vec<_>>>()
        .ok_or_else(invalid)?;

    match bits.as_slice() {
        [r, g, b, a] => Ok(PixelAvailability::new(*r, *g, *b, *a)),
        _ => Err(invalid()),
    }
}
