use std::path::PathBuf;

use clap::Args;
use xsteg_core::commands::{resize_absolute, resize_proportional};
use xsteg_core::{CodecOptions, XstegError};

use crate::CliResult;

/// Writes a resized copy of an image
#[derive(Args, Debug)]
pub struct ResizeArgs {
    /// Source image
    #[arg(short = 'i', long = "in", value_name = "image file")]
    pub image: PathBuf,

    /// The resized image will be stored as this file
    #[arg(short = 'o', long = "out", value_name = "output image file")]
    pub write_to_file: PathBuf,

    /// New width and height in pixels
    #[arg(
        long,
        num_args = 2,
        value_names = ["WIDTH", "HEIGHT"],
        required_unless_present = "proportional",
        conflicts_with = "proportional"
    )]
    pub absolute: Option<Vec<u32>>,

    /// New width and height in percent of the current ones
    #[arg(long, num_args = 2, value_names = ["PERCENT_WIDTH", "PERCENT_HEIGHT"])]
    pub proportional: Option<Vec<f32>>,
}

impl ResizeArgs {
    pub fn run(self, options: CodecOptions) -> CliResult<()> {
        let (image, out) = (&self.image, &self.write_to_file);
        match (self.absolute.as_deref(), self.proportional.as_deref()) {
            (Some(&[w, h]), _) => resize_absolute(image, out, w, h, &options),
            (_, Some(&[w, h])) => resize_proportional(image, out, w, h, &options),
            _ => Err(XstegError::InvalidResizeDimensions(0.0, 0.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::{CliArgs, Commands};
    use clap::Parser;

    #[test]
    fn should_take_exactly_one_resize_mode() {
        let args = CliArgs::try_parse_from([
            "xsteg",
            "resize",
            "-i",
            "in.png",
            "-o",
            "out.png",
            "--absolute",
            "640",
            "480",
        ])
        .unwrap();
        let Commands::Resize(resize) = args.command else {
            panic!("expected the resize command");
        };
        assert_eq!(resize.absolute, Some(vec![640, 480]));

        let args = ["xsteg", "resize", "-i", "in.png", "-o", "out.png"];
        assert!(CliArgs::try_parse_from(args).is_err());

        let args = [
            "xsteg",
            "resize",
            "-i",
            "in.png",
            "-o",
            "out.png",
            "--absolute",
            "640",
            "480",
            "--proportional",
            "50",
            "50",
        ];
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
