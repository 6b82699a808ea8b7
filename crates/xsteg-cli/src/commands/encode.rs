use std::path::PathBuf;

use clap::Args;
use xsteg_core::{CodecOptions, XstegError};

use super::ThresholdArgs;
use crate::CliResult;

/// Hides a text or a file in an image and prints the key needed to decode it
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Carrier image (PNG, JPEG or BMP), used readonly
    #[arg(short = 'i', long = "in", value_name = "image file")]
    pub image: PathBuf,

    /// The image with the hidden data will be stored as this file
    #[arg(short = 'o', long = "out", value_name = "output image file")]
    pub write_to_file: PathBuf,

    /// A text that will be hidden
    #[arg(
        short = 'x',
        long = "text",
        value_name = "text",
        required_unless_present = "data_file",
        conflicts_with = "data_file"
    )]
    pub text: Option<String>,

    /// A file whose content will be hidden
    #[arg(short = 'd', long = "data-file", value_name = "data file")]
    pub data_file: Option<PathBuf>,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

impl EncodeArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let data = match (self.text, self.data_file) {
            (Some(text), _) => text.into_bytes(),
            (None, Some(file)) => std::fs::read(file)?,
            (None, None) => return Err(XstegError::MissingData),
        };

        let key = xsteg_core::commands::encode(
            &self.image,
            &self.write_to_file,
            data,
            self.thresholds.thresholds()?,
            self.thresholds.key,
            options,
        )?;
        println!("{key}");

        Ok(())
    }
}
