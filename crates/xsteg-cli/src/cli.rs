use clap::{Parser, Subcommand, ValueEnum};
use xsteg_core::codec_options::DEFAULT_JPEG_QUALITY;
use xsteg_core::{CodecOptions, OutputFormat, SaveOptions};

use crate::commands::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct CliArgs {
    /// Logs every stage in detail
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Number of threads applying the thresholds, defaults to the number of CPUs
    #[arg(long, global = true, value_name = "N")]
    pub workers: Option<usize>,

    /// Applies the thresholds on a single thread
    #[arg(long = "no-multithreading", global = true)]
    pub no_multithreading: bool,

    /// Format of the visual data maps, other images are written in the format of their file
    /// extension. Hidden data only survives PNG and BMP
    #[arg(long, global = true, value_enum, default_value_t = ImageFormat::Png)]
    pub format: ImageFormat,

    /// JPEG quality of written images, 1-100
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_JPEG_QUALITY,
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    pub quality: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    #[value(alias = "jpg")]
    Jpeg,
    Bmp,
}

impl CliArgs {
    pub fn codec_options(&self) -> CodecOptions {
        let format = match self.format {
            ImageFormat::Png => OutputFormat::Png,
            ImageFormat::Jpeg => OutputFormat::Jpeg,
            ImageFormat::Bmp => OutputFormat::Bmp,
        };
        let options = CodecOptions::default().with_save_options(SaveOptions {
            format,
            jpeg_quality: self.quality,
        });

        if self.no_multithreading {
            options.single_threaded()
        } else if let Some(workers) = self.workers {
            options.with_workers(workers)
        } else {
            options
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Encode(encode::EncodeArgs),
    Decode(decode::DecodeArgs),
    Key(key::KeyArgs),
    DiffMap(diff_map::DiffMapArgs),
    VisualMaps(visual_maps::VisualMapsArgs),
    Resize(resize::ResizeArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn should_map_flags_to_codec_options() {
        let args = CliArgs::try_parse_from([
            "xsteg",
            "visual-maps",
            "-i",
            "in.png",
            "--workers",
            "3",
            "--format",
            "jpg",
            "--quality",
            "80",
        ])
        .unwrap();
        let options = args.codec_options();
        assert_eq!(options.workers, 3);
        assert_eq!(options.save.format, OutputFormat::Jpeg);
        assert_eq!(options.save.jpeg_quality, 80);

        let args = CliArgs::try_parse_from([
            "xsteg",
            "--no-multithreading",
            "visual-maps",
            "-i",
            "in.png",
            "--verbose",
        ])
        .unwrap();
        assert!(args.verbose);
        let options = args.codec_options();
        assert_eq!(options.workers, 1);
        assert_eq!(options.save.format, OutputFormat::Png);
    }

    #[test]
    fn should_reject_out_of_range_quality() {
        let args = ["xsteg", "visual-maps", "-i", "in.png", "--quality", "0"];
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
