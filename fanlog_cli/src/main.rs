use clap::Parser;
use fanlog_core::{LogOptions, Logger, Result, Severity};
use std::fmt::Display;
use std::io::{self, BufRead};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fanlog")]
#[command(about = "Write leveled log lines to the console and log files", long_about = None)]
struct Cli {
    /// Config file (defaults to $XDG_CONFIG_HOME/fanlog/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Threshold rank: 10 verbose, 20 info, 30 warning, 40 error
    #[arg(long)]
    level: Option<String>,

    /// Force console output on
    #[arg(long, conflicts_with = "no_console")]
    console: bool,

    /// Turn console output off
    #[arg(long)]
    no_console: bool,

    /// Log file to append to (repeatable)
    #[arg(long = "file")]
    files: Vec<PathBuf>,

    /// Rotate files larger than this many bytes (0 disables)
    #[arg(long)]
    rotate: Option<String>,

    /// Prefix tag for every line
    #[arg(long, default_value = "fanlog")]
    prefix: String,

    /// Severity of the logged message(s)
    #[arg(long, default_value = "info")]
    severity: Severity,

    /// Message template; reads lines from stdin when omitted
    message: Option<String>,

    /// Values substituted into the template
    args: Vec<String>,
}

fn main() -> Result<()> {
    fanlog_core::logging::init();

    let cli = Cli::parse();

    let mut options = match &cli.config {
        Some(path) => LogOptions::load_from(path)?,
        None => LogOptions::load()?,
    };
    apply_flags(&mut options, &cli);
    Logger::set_options(&options)?;

    let logger = Logger::new(cli.prefix.as_str());

    match &cli.message {
        Some(message) => {
            let args: Vec<&dyn Display> = cli.args.iter().map(|a| a as &dyn Display).collect();
            logger.log(message, Some(cli.severity), &args)?;
        }
        None => {
            let mut count = 0usize;
            for line in io::stdin().lock().lines() {
                let line = line?;
                logger.log("%s", Some(cli.severity), &[&line])?;
                count += 1;
            }
            tracing::debug!("Logged {} lines from stdin", count);
        }
    }

    Ok(())
}

/// Command-line flags take precedence over the config file
fn apply_flags(options: &mut LogOptions, cli: &Cli) {
    if let Some(level) = &cli.level {
        options.level = Some(level.as_str().into());
    }

    if cli.no_console {
        options.console = Some(false.into());
    } else if cli.console {
        options.console = Some(true.into());
    }

    options.files.extend(cli.files.iter().cloned());

    if let Some(rotate) = &cli.rotate {
        options.rotate = Some(rotate.as_str().into());
    }
}
