use std::path::{Path, PathBuf};

use crate::availability::AvailabilityThreshold;
use crate::codec_options::CodecOptions;
use crate::error::XstegError;
use crate::progress::{NoProgress, Progress};
use crate::steganographer::Steganographer;

pub fn prepare() -> DecodeApi {
    DecodeApi::default()
}

pub struct DecodeApi {
    secret_image: Option<PathBuf>,
    thresholds: Vec<AvailabilityThreshold>,
    key: Option<String>,
    options: CodecOptions,
    progress: Box<dyn Progress>,
}

impl Default for DecodeApi {
    fn default() -> Self {
        Self {
            secret_image: None,
            thresholds: Vec::new(),
            key: None,
            options: CodecOptions::default(),
            progress: Box::new(NoProgress),
        }
    }
}

impl DecodeApi {
    /// Use the given codec options
    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    /// This is the secret image that contains the hidden data
    pub fn from_secret_image(mut self, secret_image: impl AsRef<Path>) -> Self {
        self.secret_image = Some(secret_image.as_ref().to_path_buf());
        self
    }

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

    /// The key printed when the data was hidden
    pub fn use_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_progress(mut self, progress: impl Progress + 'static) -> Self {
        self.progress = Box::new(progress);
        self
    }

    /// Execute the decoding and blocks until it is finished
    pub fn execute(self) -> Result<Vec<u8>, XstegError> {
        let Some(secret_image) = self.secret_image else {
            return Err(XstegError::CarrierNotSet);
        };
        if self.thresholds.is_empty() && self.key.is_none() {
            return Err(XstegError::MissingThresholds);
        }

        let mut steganographer = Steganographer::from_file(&secret_image)?
            .with_options(self.options)
            .with_progress(self.progress);
        if let Some(key) = self.key {
            steganographer.restore_key(&key)?;
        }
        steganographer.add_thresholds(self.thresholds);

        steganographer.read_data()
    }
}
