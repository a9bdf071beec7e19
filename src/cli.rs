//! Command-line argument surface

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "ddcci-backend")]
#[command(about = "Detect DDC/CI monitors and get or set their brightness")]
pub struct Cli {
    /// Run in debug mode
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the backend version
    Version,
    /// Detect monitors and report them as JSON on stdout
    Detect,
    /// Set the brightness of a single monitor
    SetBrightness {
        /// Number of the I2C bus of the monitor, e.g. 1 for bus /dev/i2c-1
        bus: u32,
        /// New brightness level for the monitor. Must be between 0 and 100.
        brightness: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_brightness_arguments() {
        let cli = Cli::parse_from(["ddcci-backend", "set-brightness", "7", "80"]);
        assert!(!cli.debug);
        assert!(matches!(
            cli.command,
            Command::SetBrightness {
                bus: 7,
                brightness: 80
            }
        ));
    }

    #[test]
    fn test_debug_flag_is_global() {
        let cli = Cli::parse_from(["ddcci-backend", "detect", "--debug"]);
        assert!(cli.debug);
        assert!(matches!(cli.command, Command::Detect));
    }
}
