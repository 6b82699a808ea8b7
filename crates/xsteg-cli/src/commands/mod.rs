pub mod decode;
pub mod diff_map;
pub mod encode;
pub mod key;
pub mod resize;
pub mod visual_maps;

use clap::{ArgAction, Args};
use xsteg_core::AvailabilityThreshold;

use crate::CliResult;

/// Thresholds given one by one and/or as a key
#[derive(Args, Debug, Default)]
pub struct ThresholdArgs {
    /// Threshold deciding which pixels carry how many bits, e.g. `-t SATURATION UP 1110 0.5`.
    /// Repeatable, later thresholds overwrite earlier ones
    #[arg(
        short = 't',
        long = "threshold",
        num_args = 4,
        value_names = ["TYPE", "DIRECTION", "BITS", "VALUE"],
        action = ArgAction::Append
    )]
    pub thresholds: Vec<String>,

    /// Key of thresholds, as printed by `encode` or `key`. Goes before any `-t`
    #[arg(short = 'k', long = "key", value_name = "KEY")]
    pub key: Option<String>,
}

impl ThresholdArgs {
    pub fn thresholds(&self) -> CliResult<Vec<AvailabilityThreshold>> {
        self.thresholds
            .chunks_exact(4)
            .map(|p| AvailabilityThreshold::from_parts(&p[0], &p[1], &p[2], &p[3]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::{CliArgs, Commands};
    use clap::Parser;
    use xsteg_core::{PixelAvailability, VisualDataType};

    #[test]
    fn should_collect_repeated_thresholds_in_order() {
        let args = CliArgs::try_parse_from([
            "xsteg",
            "key",
            "-t",
            "SATURATION",
            "UP",
            "1110",
            "0.5",
            "-t",
            "luminance",
            "down",
            "_2_0",
            "0.25",
        ])
        .unwrap();
        let Commands::Key(key) = args.command else {
            panic!("expected the key command");
        };

        let thresholds = key.thresholds.thresholds().unwrap();
        assert_eq!(thresholds.len(), 2);
        assert_eq!(thresholds[0].data_type(), VisualDataType::Saturation);
        assert_eq!(thresholds[1].data_type(), VisualDataType::Luminance);
        assert_eq!(thresholds[1].bits().to_string(), "_2_0");
        assert_ne!(thresholds[0].bits(), PixelAvailability::UNSET);
    }

    #[test]
    fn should_require_all_four_threshold_parts() {
        let args = ["xsteg", "key", "-t", "SATURATION", "UP", "1110"];
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
