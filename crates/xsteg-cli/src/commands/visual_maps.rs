use std::path::PathBuf;

use clap::Args;
use log::info;
use xsteg_core::CodecOptions;

use crate::CliResult;

/// Writes one image per visual data type next to the source image
#[derive(Args, Debug)]
pub struct VisualMapsArgs {
    /// Source image, maps are stored as `<image>.<TYPE>.<png|jpg>`
    #[arg(short = 'i', long = "in", value_name = "image file")]
    pub image: PathBuf,
}

impl VisualMapsArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        for written in xsteg_core::commands::visual_data_maps(&self.image, &options)? {
            info!("Wrote {}", written.display());
        }
        Ok(())
    }
}
