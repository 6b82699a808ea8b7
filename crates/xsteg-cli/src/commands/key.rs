use std::path::PathBuf;

use clap::Args;
use xsteg_core::XstegError;

use super::ThresholdArgs;
use crate::CliResult;

/// Generates the key of the given thresholds
#[derive(Args, Debug)]
pub struct KeyArgs {
    /// The key will be stored as this file instead of printed
    #[arg(short = 'o', long = "out", value_name = "key file")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

impl KeyArgs {
    pub fn run(self) -> CliResult<()> {
        let mut thresholds = match self.thresholds.key.as_deref() {
            Some(key) => xsteg_core::availability::parse_key(key)?,
            None => Vec::new(),
        };
        thresholds.extend(self.thresholds.thresholds()?);
        let key = xsteg_core::commands::generate_key(&thresholds)?;

        match self.output {
            Some(output) => {
                std::fs::write(output, key).map_err(|source| XstegError::WriteError { source })
            }
            None => {
                println!("{key}");
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::{CliArgs, Commands};
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn should_write_the_key_to_a_file() {
        let dir = TempDir::new().unwrap();
        let key_file = dir.path().join("key.txt");

        let args = CliArgs::try_parse_from([
            "xsteg",
            "key",
            "-k",
            "&S>A*1110+0.5",
            "-t",
            "ALPHA",
            "DOWN",
            "0000",
            "0.5",
            "-o",
            key_file.to_str().unwrap(),
        ])
        .unwrap();
        let Commands::Key(key) = args.command else {
            panic!("expected the key command");
        };
        key.run().unwrap();

        assert_eq!(
            std::fs::read_to_string(key_file).unwrap(),
            "&S>A*1110+0.5&3>V*0000+0.5"
        );
    }
}
