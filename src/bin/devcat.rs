//! devcat - device catalog CLI.
//!
//! Collects this machine's identity and bandwidth and appends it to a CSV
//! catalog, refusing machines whose MAC address is already listed.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;

use devcat::catalog_device;
use devcat::collector::{Collector, HttpSpeedProbe, RealFs, SpeedTestConfig};
use devcat::fmt::format_bytes;
use devcat::storage::Catalog;

/// Device catalog collector.
#[derive(Parser)]
#[command(
    name = "devcat",
    about = "Append this machine's hardware and network facts to a CSV catalog",
    version
)]
struct Args {
    /// CSV catalog path. Prompted for interactively when omitted.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Base URL of the speed-test server.
    #[arg(long, default_value = SpeedTestConfig::DEFAULT_URL)]
    speed_test_url: String,

    /// Bytes to download for the speed test (e.g., "25M", "1G", "1048576").
    #[arg(long, default_value = "25M", value_parser = parse_size)]
    download_bytes: u64,

    /// Bytes to upload for the speed test.
    #[arg(long, default_value = "10M", value_parser = parse_size)]
    upload_bytes: u64,

    /// Timeout for each speed-test request in seconds.
    #[arg(long, default_value = "60")]
    speed_timeout: u64,

    /// Skip the speed test and record zero bandwidth.
    #[arg(long)]
    skip_speed_test: bool,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, default_value = "/proc")]
    proc_path: String,

    /// Path to /sys filesystem (for testing/mocking).
    #[arg(long, default_value = "/sys")]
    sys_path: String,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

/// Parses a human-readable size string (e.g., "1G", "500M", "1024K") into bytes.
fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty size string".to_string());
    }

    let (num_str, multiplier) = if let Some(num) = s.strip_suffix('G') {
        (num, 1024 * 1024 * 1024)
    } else if let Some(num) = s.strip_suffix('M') {
        (num, 1024 * 1024)
    } else if let Some(num) = s.strip_suffix('K') {
        (num, 1024)
    } else {
        (s, 1)
    };

    num_str
        .trim()
        .parse::<u64>()
        .map(|n| n * multiplier)
        .map_err(|e| format!("invalid size '{}': {}", s, e))
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Default level is INFO. Use -q for quiet mode (errors only).
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("devcat={}", level).parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Asks for the catalog path until a non-empty line is entered.
fn prompt_for_path<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<PathBuf> {
    loop {
        writeln!(output, "Please enter the csv file path: ")?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no file path entered",
            ));
        }

        let path = line.trim();
        if !path.is_empty() {
            return Ok(PathBuf::from(path));
        }
        writeln!(output, "Invalid file path. Please try again.")?;
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    let path = match args.file {
        Some(path) => path,
        None => match prompt_for_path(&mut io::stdin().lock(), &mut io::stdout()) {
            Ok(path) => path,
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        },
    };

    let mut collector = Collector::new(RealFs::new(), std::env::consts::OS)
        .with_proc_path(&args.proc_path)
        .with_sys_path(&args.sys_path);

    if args.skip_speed_test {
        info!("Speed test: skipped");
    } else {
        let config = SpeedTestConfig {
            base_url: args.speed_test_url,
            download_bytes: args.download_bytes,
            upload_bytes: args.upload_bytes,
            timeout: Duration::from_secs(args.speed_timeout),
        };
        info!(
            "Speed test: {} ({} down, {} up)",
            config.base_url,
            format_bytes(config.download_bytes),
            format_bytes(config.upload_bytes)
        );
        match HttpSpeedProbe::new(config) {
            Ok(probe) => collector = collector.with_speed_probe(probe),
            Err(e) => {
                error!("{}", e);
                return ExitCode::FAILURE;
            }
        }
    }

    let catalog = Catalog::new(&path);
    match catalog_device(&collector, &catalog) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Writing to {} failed", path.display());
            error!("Reason: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn prompt_retries_on_empty_input() {
        let mut input = Cursor::new("\n   \n/tmp/devices.csv\n");
        let mut output = Vec::new();

        let path = prompt_for_path(&mut input, &mut output).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/devices.csv"));

        let shown = String::from_utf8(output).unwrap();
        assert_eq!(shown.matches("Please enter the csv file path").count(), 3);
        assert_eq!(shown.matches("Invalid file path").count(), 2);
    }

    #[test]
    fn prompt_fails_on_eof() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();

        let err = prompt_for_path(&mut input, &mut output).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn parse_size_suffixes() {
        assert_eq!(parse_size("25M").unwrap(), 25 * 1024 * 1024);
        assert_eq!(parse_size("1G").unwrap(), 1024 * 1024 * 1024);
        assert_eq!(parse_size("4K").unwrap(), 4096);
        assert_eq!(parse_size("1048576").unwrap(), 1_048_576);
        assert!(parse_size("").is_err());
        assert!(parse_size("ten").is_err());
    }

    #[test]
    fn args_default_to_prompt() {
        let args = Args::try_parse_from(["devcat"]).unwrap();
        assert!(args.file.is_none());
        assert!(!args.skip_speed_test);
        assert_eq!(args.download_bytes, 25 * 1024 * 1024);
        assert_eq!(args.speed_test_url, SpeedTestConfig::DEFAULT_URL);
    }
}
