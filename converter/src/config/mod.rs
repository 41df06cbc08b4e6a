//! Command-line configuration.
//!
//! [`Cli`] is resolved into a [`ConvertOptions`] and a [`LogLevel`] before
//! the conversion runs.

use clap::Parser;
use std::path::PathBuf;

use crate::dataset::FileNames;
use crate::error::PipelineResult;
use crate::pipeline::{ConvertOptions, DEFAULT_DATA_PATH, DEFAULT_JSON_FILE, DEFAULT_OUTPUT_FOLDER};

#[derive(Parser, Debug, Clone)]
#[command(name = "gasnet-convert")]
#[command(about = "Convert a folder of gas-network CSV files to one JSON file", long_about = None)]
pub struct Cli {
    /// Path to folder containing csv files
    #[arg(short = 'p', long = "datapath", default_value = DEFAULT_DATA_PATH)]
    pub data_path: PathBuf,

    /// Folder where the json file is saved
    #[arg(short = 'o', long = "outputfolder", default_value = DEFAULT_OUTPUT_FOLDER)]
    pub output_folder: PathBuf,

    /// JSON file name
    #[arg(long = "jsonfile", default_value = DEFAULT_JSON_FILE)]
    pub json_file: String,

    /// Info log level
    #[arg(short, long)]
    pub info: bool,

    /// Debug log level
    #[arg(short, long)]
    pub debug: bool,

    /// Read a field from another file, e.g. `--file nodes=nodes.csv`
    #[arg(long = "file", value_name = "FIELD=FILE", value_parser = parse_file_override)]
    pub files: Vec<(String, String)>,
}

/// Verbosity selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Info,
    Debug,
}

impl LogLevel {
    /// Filter directive for `tracing_subscriber::EnvFilter`.
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }
}

impl Cli {
    /// `--info` wins over `--debug`; neither means errors only.
    pub fn log_level(&self) -> LogLevel {
        if self.info {
            LogLevel::Info
        } else if self.debug {
            LogLevel::Debug
        } else {
            LogLevel::Error
        }
    }

    /// Resolve the conversion options. Fails on an unknown `--file` field.
    pub fn to_options(&self) -> PipelineResult<ConvertOptions> {
        let mut file_names = FileNames::new();
        for (field, file) in &self.files {
            file_names.set(field, file.clone())?;
        }

        Ok(ConvertOptions::new(&self.data_path, &self.output_folder, &self.json_file)
            .with_file_names(file_names))
    }
}

fn parse_file_override(s: &str) -> Result<(String, String), String> {
    let (field, file) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid FIELD=FILE: no `=` found in `{}`", s))?;
    if field.is_empty() || file.is_empty() {
        return Err(format!("invalid FIELD=FILE: `{}`", s));
    }
    Ok((field.to_string(), file.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::field_spec;
    use crate::error::PipelineError;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gasnet-convert").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(cli.output_folder, PathBuf::from(DEFAULT_OUTPUT_FOLDER));
        assert_eq!(cli.json_file, DEFAULT_JSON_FILE);
        assert_eq!(cli.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_short_and_long_flags() {
        let cli = parse(&["-p", "data/", "-o", "out/", "--jsonfile", "m.json", "-d"]);
        let options = cli.to_options().unwrap();

        assert_eq!(options.data_path, PathBuf::from("data/"));
        assert_eq!(options.output_path(), PathBuf::from("out/m.json"));
        assert_eq!(cli.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_info_takes_precedence() {
        let cli = parse(&["--debug", "--info"]);
        assert_eq!(cli.log_level(), LogLevel::Info);
        assert_eq!(cli.log_level().as_directive(), "info");
    }

    #[test]
    fn test_file_overrides() {
        let cli = parse(&["--file", "nodes=nodes.csv", "--file", "cd=cd.csv"]);
        let options = cli.to_options().unwrap();
        let nodes = field_spec("nodes").unwrap();
        let cd = field_spec("cd").unwrap();

        assert_eq!(options.file_names.file_for(nodes), "nodes.csv");
        assert_eq!(options.file_names.file_for(cd), "cd.csv");
    }

    #[test]
    fn test_unknown_field_override() {
        let cli = parse(&["--file", "valves=v.csv"]);
        assert!(matches!(cli.to_options(), Err(PipelineError::UnknownField(f)) if f == "valves"));
    }

    #[test]
    fn test_malformed_override_rejected() {
        let result = Cli::try_parse_from(["gasnet-convert", "--file", "nodes.csv"]);
        assert!(result.is_err());
    }
}
