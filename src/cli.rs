use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "camscan")]
#[command(about = "RTSP camera credential auditor for authorized security assessments")]
#[command(long_about = r#"
Camscan finds RTSP cameras that accept weak or default credentials, works out
which stream path they serve and confirms the stream is actually playable.

WARNING: Only scan devices and networks you own or have explicit permission
to test. Unauthorized access to camera feeds may be illegal.

Usage Examples:
  camscan -t 192.168.1.10                       # Single camera, port 554
  camscan -t 192.168.1.0/24 -o found.txt        # Whole subnet, save URLs
  camscan -t hosts.txt -u admin -p passwords.txt
  camscan -t 10.0.0.0/22 --port-probe -w 100    # Drop closed hosts first
  cat hosts.txt | camscan -u admin,root -p ,12345
"#)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Target: IP, host:port, CIDR, comma list or file (reads stdin when omitted)
    #[arg(short, long, value_name = "TARGET")]
    pub target: Option<String>,

    /// Usernames: single value, comma list or file
    #[arg(short, long, value_name = "USERS")]
    pub users: Option<String>,

    /// Passwords: single value, comma list or file
    #[arg(short, long, value_name = "PASSWORDS")]
    pub passwords: Option<String>,

    /// Number of concurrent RTSP workers (max 1000)
    #[arg(short, long, value_name = "N")]
    pub workers: Option<usize>,

    /// Per-stage network timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Append confirmed stream URLs to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write all findings as JSON when the scan ends
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// Stop after this many vulnerable cameras
    #[arg(long, value_name = "N")]
    pub limit: Option<u32>,

    /// TCP-check the RTSP port before testing credentials
    #[arg(long)]
    pub port_probe: bool,

    /// Concurrency of the port pre-filter
    #[arg(long, value_name = "N")]
    pub probe_workers: Option<usize>,

    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbose output (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (findings file only, no console output)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Log filter for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "error",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
