use std::path::{Path, PathBuf};

use log::warn;

use crate::availability::AvailabilityThreshold;
use crate::codec_options::CodecOptions;
use crate::error::XstegError;
use crate::progress::{NoProgress, Progress};
use crate::steganographer::Steganographer;

pub fn prepare() -> EncodeApi {
    EncodeApi::default()
}

pub struct EncodeApi {
    image: Option<PathBuf>,
    output: Option<PathBuf>,
    thresholds: Vec<AvailabilityThreshold>,
    key: Option<String>,
    data: Option<Vec<u8>>,
    options: CodecOptions,
    progress: Box<dyn Progress>,
}

impl Default for EncodeApi {
    fn default() -> Self {
        Self {
            image: None,
            output: None,
            thresholds: Vec::new(),
            key: None,
            data: None,
            options: CodecOptions::default(),
            progress: Box::new(NoProgress),
        }
    }
}

impl EncodeApi {
    /// Use the given codec options
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// This is the carrier image the data will be hidden in
    pub fn with_image(mut self, image: impl AsRef<Path>) -> Self {
        self.image = Some(image.as_ref().to_path_buf());
        self
    }

    /// This is the file the image with the hidden data is written to
    pub fn with_output(mut self, output: impl AsRef<Path>) -> Self {
        self.output = Some(output.as_ref().to_path_buf());
        self
    }

    /// Appends a threshold, thresholds are evaluated in the order they are added
    pub fn with_threshold(mut self, threshold: AvailabilityThreshold) -> Self {
        self.thresholds.push(threshold);
        self
    }

    pub fn with_thresholds(
        mut self,
        thresholds: impl IntoIterator<Item = AvailabilityThreshold>,
    ) -> Self {
        self.thresholds.extend(thresholds);
        self
    }

    /// Restores the thresholds of a key, they go before any threshold added with
    /// [`EncodeApi::with_threshold`]
    pub fn use_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// The data to hide
    pub fn with_data(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn with_progress(mut self, progress: impl Progress + 'static) -> Self {
        self.progress = Box::new(progress);
        self
    }

    /// Execute the encoding and blocks until it is finished.
    ///
    /// Returns the key of all thresholds used, it is needed to read the data back.
    pub fn execute(self) -> Result<String, XstegError> {
        let Some(image) = self.image else {
            return Err(XstegError::CarrierNotSet);
        };
        let Some(output) = self.output else {
            return Err(XstegError::TargetNotSet);
        };
        let Some(data) = self.data else {
            return Err(XstegError::MissingData);
        };
        if self.thresholds.is_empty() && self.key.is_none() {
            return Err(XstegError::MissingThresholds);
        }
        if !self.options.save.format_for(&output)?.is_lossless() {
            warn!("{output:?} is lossy, the hidden data will not survive");
        }

        let mut steganographer = Steganographer::from_file(&image)?
            .with_options(self.options)
            .with_progress(self.progress);
        if let Some(key) = self.key {
            steganographer.restore_key(&key)?;
        }
        steganographer.add_thresholds(self.thresholds);
        steganographer.write_data(&data)?;
        steganographer.save_as(&output)?;

        Ok(steganographer.get_key())
    }
}
