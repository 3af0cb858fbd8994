//! Command-line argument definitions.
//!
//! ```text
//! prescale [--config FILE] [--format text|json] timer [--clock MHZ] [--time US] [--psc N] [--arr N]
//! prescale [--config FILE] [--format text|json] freq  [--time US] [--frequency HZ]
//! prescale formulas
//! ```
//!
//! Field values stay `String`s: the core owns parsing, so `--psc 3.5` and
//! `--time -1` reach it verbatim and come back as proper field errors.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use prescale_core::api::{RawFrequencyTimeFields, RawTimerFields};

use crate::config::OutputFormat;

#[derive(Debug, Parser)]
#[command(
    name = "prescale",
    version,
    about = "Timer prescaler / auto-reload calculator",
    long_about = "Fill in all but one field and prescale solves for the one you left out."
)]
pub struct Cli {
    /// Config file (default: platform config dir, config.toml)
    #[arg(long, global = true, value_name = "FILE", env = "PRESCALE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format; overrides the config file and PRESCALE_OUTPUT
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Solve T = (ARR + 1)(PSC + 1) / F for the one field left out
    Timer(TimerArgs),

    /// Convert a period to a frequency or back
    #[command(name = "freq")]
    Frequency(FrequencyArgs),

    /// Print the formulas both calculators use
    Formulas,
}

#[derive(Debug, Clone, Default, Args)]
pub struct TimerArgs {
    /// Timer clock frequency in MHz
    #[arg(long, value_name = "MHZ", allow_hyphen_values = true)]
    pub clock: Option<String>,

    /// Overflow time in μs
    #[arg(long, value_name = "US", allow_hyphen_values = true)]
    pub time: Option<String>,

    /// Prescaler register (PSC)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub psc: Option<String>,

    /// Auto-reload register (ARR)
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub arr: Option<String>,
}

impl From<&TimerArgs> for RawTimerFields {
    fn from(args: &TimerArgs) -> Self {
        RawTimerFields {
            clock: args.clock.clone(),
            time: args.time.clone(),
            psc: args.psc.clone(),
            arr: args.arr.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct FrequencyArgs {
    /// Period in μs
    #[arg(long, value_name = "US", allow_hyphen_values = true)]
    pub time: Option<String>,

    /// Frequency in Hz
    #[arg(long, value_name = "HZ", allow_hyphen_values = true)]
    pub frequency: Option<String>,
}

impl From<&FrequencyArgs> for RawFrequencyTimeFields {
    fn from(args: &FrequencyArgs) -> Self {
        RawFrequencyTimeFields {
            time: args.time.clone(),
            frequency: args.frequency.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_timer() {
        let cli = Cli::try_parse_from([
            "prescale", "--format", "json", "timer", "--clock", "72", "--psc", "7199", "--arr",
            "9999",
        ])
        .unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        let Command::Timer(args) = cli.command else {
            panic!("expected timer command");
        };
        let raw = RawTimerFields::from(&args);
        assert_eq!(raw.clock.as_deref(), Some("72"));
        assert_eq!(raw.time, None);
    }

    #[test]
    fn test_negative_values_reach_core() {
        let cli = Cli::try_parse_from(["prescale", "freq", "--time", "-5"]).unwrap();
        let Command::Frequency(args) = cli.command else {
            panic!("expected freq command");
        };
        assert_eq!(args.time.as_deref(), Some("-5"));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["prescale", "formulas", "--format", "text"]).unwrap();
        assert!(matches!(cli.command, Command::Formulas));
        assert_eq!(cli.format, Some(OutputFormat::Text));
    }

    #[test]
    fn test_unknown_format_is_usage_error() {
        assert!(Cli::try_parse_from(["prescale", "--format", "xml", "formulas"]).is_err());
    }
}
