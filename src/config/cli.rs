use clap::{ArgAction, Parser};

/// Command line flags. Everything else comes from the TOML config.
#[derive(Debug, Clone, Parser)]
#[command(name = "nobel-etl")]
#[command(about = "Fetch Nobel laureates and save them as JSON and/or an Excel report")]
pub struct CliArgs {
    /// Increase output verbosity (-v, -vv)
    #[arg(short = 'v', action = ArgAction::Count)]
    pub verbose: u8,

    /// Save fetched data to a .json file
    #[arg(long)]
    pub json: bool,

    /// Save fetched data to an .xlsx file with charts
    #[arg(long)]
    pub excel: bool,

    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// Override `output.directory` from the config
    #[arg(long)]
    pub output_dir: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = CliArgs::parse_from(["nobel-etl", "-vv", "--json", "--excel"]);

        assert_eq!(args.verbose, 2);
        assert!(args.json);
        assert!(args.excel);
        assert_eq!(args.config, "config.toml");
        assert_eq!(args.output_dir, None);
    }

    #[test]
    fn test_defaults() {
        let args = CliArgs::parse_from(["nobel-etl", "-c", "other.toml", "--output-dir", "out"]);

        assert_eq!(args.verbose, 0);
        assert!(!args.json);
        assert!(!args.excel);
        assert_eq!(args.config, "other.toml");
        assert_eq!(args.output_dir.as_deref(), Some("out"));
    }
}
