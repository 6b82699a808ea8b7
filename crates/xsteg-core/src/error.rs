use thiserror::Error;

#[derive(Error, Debug)]
pub enum XstegError {
    /// Represents a payload that does not fit into the bits the thresholds made available
    #[error(
        "Capacity Error: {required} bits are required to encode the data (including the 64 bit length header), \
         but the image and thresholds only provide {available} bits"
    )]
    InsufficientCapacity { required: usize, available: usize },

    /// Represents a key string that violates the key grammar
    #[error("Malformed key (record #{record}): {reason}")]
    MalformedKey { record: usize, reason: KeyError },

    /// Represents a threshold with an out of range value or bit count
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// Represents a channel bits notation like `11_0` that could not be parsed
    #[error("Invalid channel bits notation: '{0}', expected 4 characters out of 0-8 or '_'")]
    InvalidBits(String),

    /// Represents an unknown visual data type name
    #[error("Unknown visual data type: '{0}'")]
    UnknownVisualDataType(String),

    /// Represents an unknown threshold direction name
    #[error("Unknown threshold direction: '{0}', expected UP or DOWN")]
    UnknownDirection(String),

    /// Represents a decoded length header that cannot describe data hidden in this image
    #[error(
        "Implausible length header: {total_bits} bits announced, the image provides {capacity} bits. \
         Was the image encoded with the same thresholds?"
    )]
    ImplausibleLengthHeader { total_bits: u64, capacity: usize },

    /// Represents an availability map applied to an image of different dimensions
    #[error("Image has {given} pixels but the availability map was built for {expected}")]
    DimensionMismatch { expected: usize, given: usize },

    /// Represents an unsupported carrier media. For example, a WAV file is not supported
    #[error("Media format is not supported")]
    UnsupportedMedia,

    /// Represents an invalid carrier image media. For example, a broken PNG file
    #[error("Image media is invalid")]
    InvalidImageMedia,

    /// Represents a failure when encoding an image file.
    #[error("Image encoding error")]
    ImageEncodingError,

    /// Represents invalid dimensions for a resized image
    #[error("Invalid resize dimensions: {0}x{1}")]
    InvalidResizeDimensions(f32, f32),

    /// Represents a failure to write target file.
    #[error("Write error")]
    WriteError { source: std::io::Error },

    /// Represents all other cases of `std::io::Error`.
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    /// Represents a failure to set up the workers for threshold application
    #[error("Failed to build worker pool")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("No carrier image set")]
    CarrierNotSet,

    #[error("No target file set")]
    TargetNotSet,

    #[error("API Error: Missing data to hide")]
    MissingData,

    #[error("API Error: Missing thresholds, provide at least one threshold or a key")]
    MissingThresholds,
}

/// Describes which part of a key record was malformed
#[derive(Error, Debug, PartialEq)]
pub enum KeyError {
    #[error("the key is empty")]
    EmptyKey,

    #[error("the key does not start with the record marker '&'")]
    MissingRecordMarker,

    #[error("record is {0} characters long, at least 9 are required before the value")]
    RecordTooShort(usize),

    #[error("expected {name} designator '{expected}' but found '{found}'")]
    InvalidDesignator {
        name: &'static str,
        expected: char,
        found: char,
    },

    #[error("unknown visual data type designator '{0}'")]
    UnknownVisualDataType(char),

    #[error("unknown direction designator '{0}'")]
    UnknownDirection(char),

    #[error("invalid channel bits '{0}'")]
    InvalidBits(String),

    #[error("invalid threshold value '{0}'")]
    InvalidValue(String),
}
