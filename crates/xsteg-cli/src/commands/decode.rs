use std::path::PathBuf;

use clap::Args;
use xsteg_core::{CodecOptions, XstegError};

use super::ThresholdArgs;
use crate::CliResult;

/// Reads hidden data from an image, given the thresholds or the key used to encode it
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Image that contains the hidden data
    #[arg(short = 'i', long = "in", value_name = "image file")]
    pub secret_image: PathBuf,

    /// The hidden data will be stored as this file
    #[arg(
        short = 'o',
        long = "out",
        value_name = "output file",
        required_unless_present = "stdout"
    )]
    pub output: Option<PathBuf>,

    /// Prints the hidden data as text
    #[arg(long)]
    pub stdout: bool,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

impl DecodeArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let data = xsteg_core::commands::decode(
            &self.secret_image,
            self.thresholds.thresholds()?,
            self.thresholds.key,
            options,
        )?;

        if let Some(output) = self.output {
            std::fs::write(output, &data).map_err(|source| XstegError::WriteError { source })?;
        }
        if self.stdout {
            println!("{}", String::from_utf8_lossy(&data));
        }

        Ok(())
    }
}
