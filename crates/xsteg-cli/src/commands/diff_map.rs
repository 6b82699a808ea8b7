use std::path::PathBuf;

use clap::Args;
use xsteg_core::{CodecOptions, VisualDataType};

use crate::CliResult;

/// Renders pixels black where the visual data exceeds a value, white elsewhere
#[derive(Args, Debug)]
pub struct DiffMapArgs {
    /// Source image
    #[arg(short = 'i', long = "in", value_name = "image file")]
    pub image: PathBuf,

    /// The map will be stored as this file
    #[arg(short = 'o', long = "out", value_name = "output image file")]
    pub write_to_file: PathBuf,

    /// Visual data type, e.g. SATURATION or LUMINANCE
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    pub data_type: VisualDataType,

    /// Threshold value between 0 and 1
    #[arg(long, value_name = "VALUE")]
    pub value: f32,
}

impl DiffMapArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        xsteg_core::commands::diff_map(
            &self.image,
            &self.write_to_file,
            self.data_type,
            self.value,
            &options,
        )
    }
}
