//! Command-line interface.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dupmap")]
#[command(about = "Detects duplicated methods across a codebase by comparing syntax trees")]
#[command(version)]
pub struct Cli {
    /// Files or directories to scan
    #[arg(short = 'p', long = "paths", num_args = 1.., default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Minimum similarity for two methods to count as duplicates
    #[arg(long, default_value_t = crate::config::DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Ignore methods shorter than this many lines
    #[arg(long, default_value_t = 5)]
    pub min_lines: usize,

    /// Ignore methods longer than this many lines
    #[arg(long, default_value_t = usize::MAX)]
    pub max_lines: usize,

    /// Ignore methods with fewer tree nodes than this
    #[arg(long, default_value_t = 0)]
    pub min_tokens: usize,

    /// Print the representative's code for each group
    #[arg(long)]
    pub print: bool,

    /// Print code for every member of every group
    #[arg(long)]
    pub print_all: bool,

    /// Disable the size-ratio and short-function penalties
    #[arg(long)]
    pub no_size_penalty: bool,

    /// File extensions to scan
    #[arg(short = 'e', long = "extensions", alias = "ext", value_delimiter = ',', default_value = "cs")]
    pub extensions: Vec<String>,

    /// Cost of renaming a node value
    #[arg(long, default_value_t = 0.3)]
    pub rename_cost: f64,

    /// Cost of deleting a node
    #[arg(long, default_value_t = 1.0)]
    pub delete_cost: f64,

    /// Cost of inserting a node
    #[arg(long, default_value_t = 1.0)]
    pub insert_cost: f64,

    /// Weight of the category distance in kind-mismatch costs
    #[arg(long, default_value_t = 0.5)]
    pub kind_distance_weight: f64,

    /// Only scan files whose path matches this regex
    #[arg(long)]
    pub include_file_pattern: Option<String>,

    /// Only compare methods whose full name matches this regex
    #[arg(long)]
    pub include_method_pattern: Option<String>,

    /// Write the report to a file instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Worker threads (0 = one per core)
    #[arg(short = 'j', long, default_value_t = 0)]
    pub jobs: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => crate::io::output::OutputFormat::Text,
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
        }
    }
}

impl Cli {
    pub fn detector_options(&self) -> crate::config::DetectorOptions {
        crate::config::DetectorOptions {
            min_lines: self.min_lines,
            max_lines: self.max_lines,
            min_tokens: self.min_tokens,
            size_penalty: !self.no_size_penalty,
            include_method_pattern: self.include_method_pattern.clone(),
            apted: crate::apted::AptedCosts {
                rename_cost: self.rename_cost,
                delete_cost: self.delete_cost,
                insert_cost: self.insert_cost,
                kind_distance_weight: self.kind_distance_weight,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["dupmap"];
        full.extend(args);
        Cli::parse_from(full)
    }

    #[test]
    fn defaults_match_the_documented_interface() {
        let cli = parse(&[]);
        assert_eq!(cli.paths, vec![PathBuf::from(".")]);
        assert_eq!(cli.threshold, 0.87);
        assert_eq!(cli.min_lines, 5);
        assert_eq!(cli.max_lines, usize::MAX);
        assert_eq!(cli.min_tokens, 0);
        assert_eq!(cli.extensions, vec!["cs".to_string()]);
        assert!(!cli.no_size_penalty);
        assert!(cli.output.is_none());
    }

    #[test]
    fn cost_flags_flow_into_options() {
        let cli = parse(&[
            "--rename-cost",
            "0.0",
            "--delete-cost",
            "2.0",
            "--kind-distance-weight",
            "0.25",
            "--no-size-penalty",
        ]);
        let options = cli.detector_options();
        assert_eq!(options.apted.rename_cost, 0.0);
        assert_eq!(options.apted.delete_cost, 2.0);
        assert_eq!(options.apted.kind_distance_weight, 0.25);
        assert!(!options.size_penalty);
    }

    #[test]
    fn multiple_paths_and_extensions_parse() {
        let cli = parse(&["-p", "src", "tests", "-e", "cs,csx"]);
        assert_eq!(cli.paths.len(), 2);
        assert_eq!(cli.extensions, vec!["cs".to_string(), "csx".to_string()]);
    }

    #[test]
    fn method_pattern_is_carried() {
        let cli = parse(&["--include-method-pattern", "^Calculate.*"]);
        assert_eq!(
            cli.detector_options().include_method_pattern.as_deref(),
            Some("^Calculate.*")
        );
    }
}
