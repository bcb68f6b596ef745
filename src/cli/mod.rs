use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;

#[derive(Parser, Debug)]
#[command(name = "feedpane")]
#[command(version, about = "Browse RSS/Atom feeds in the terminal", long_about = None)]
pub struct Cli {
    /// Configuration file (default: ~/.config/feedpane/config.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Quit as soon as any feed fails to load
    #[arg(long)]
    pub fail_fast: bool,

    /// Per-feed timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Write logs to this file (filtered by RUST_LOG). Without it nothing is logged
    #[arg(short, long)]
    pub log: Option<PathBuf>,
}

impl Cli {
    /// Flags given on the command line win over the config file.
    pub fn apply(&self, config: &mut Config) {
        if self.fail_fast {
            config.fetch.fail_fast = true;
        }
        if let Some(timeout) = self.timeout {
            config.fetch.timeout_secs = timeout;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::try_parse_from(["feedpane"]).unwrap();
        assert!(cli.config.is_none());
        assert!(!cli.fail_fast);

        let mut config = Config::default();
        cli.apply(&mut config);
        assert!(!config.fetch.fail_fast);
        assert_eq!(config.fetch.timeout_secs, 60);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from(["feedpane", "--fail-fast", "--timeout", "5"]).unwrap();
        let mut config = Config::default();
        cli.apply(&mut config);

        assert!(config.fetch.fail_fast);
        assert_eq!(config.fetch.timeout_secs, 5);
    }

    #[test]
    fn test_timeout_flag_fixes_invalid_file_value() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feedpane.toml");
        std::fs::write(&path, "[fetch]\ntimeout_secs = 0\n").unwrap();

        let cli = Cli::try_parse_from(["feedpane", "--timeout", "5"]).unwrap();
        let mut config = Config::load(Some(&path)).unwrap();
        cli.apply(&mut config);

        assert_eq!(config.fetch.timeout_secs, 5);
        config.validate().unwrap();
    }

    #[test]
    fn test_log_file_flag() {
        let cli = Cli::try_parse_from(["feedpane", "--log", "/tmp/feedpane.log"]).unwrap();
        assert_eq!(cli.log, Some(PathBuf::from("/tmp/feedpane.log")));
        assert!(Cli::try_parse_from(["feedpane"]).unwrap().log.is_none());
    }

    #[test]
    fn test_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["feedpane", "update"]).is_err());
    }
}
