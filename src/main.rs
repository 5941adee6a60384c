use camscan::{
    cli::Cli,
    config::Config,
    display::DisplayManager,
    reporting::Reporter,
    rtsp::TcpConnector,
    scanner::Scanner,
    targets,
    types::Target,
    utils::{time::format_duration, wordlist},
    Result, ScanError,
};
use clap::{CommandFactory, Parser};
use env_logger::Env;
use log::debug;
use std::io::IsTerminal;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level()))
        .format_timestamp_secs()
        .init();

    let display = DisplayManager::with_quiet(cli.quiet);

    if cli.target.is_none() && std::io::stdin().is_terminal() {
        let _ = Cli::command().print_help();
        println!();
        display.print_error("No target specified. Pass -t or pipe targets on stdin.");
        process::exit(1);
    }

    if !cli.quiet {
        display.print_banner("📹 CAMSCAN - RTSP Camera Auditor", Some("Authorized Testing Only"));
        display.print_warning("Ensure you have proper permission before testing any device.");
        println!();
    }

    let config = load_config(&cli, &display);

    if let Err(e) = run(&cli, config, display.clone()).await {
        if e.is_usage_error() {
            display.print_error(&e.to_string());
            eprintln!("Use 'camscan --help' for usage information.");
        } else {
            display.print_error(&format!("Scan failed: {}", e));
        }
        process::exit(1);
    }
}

fn load_config(cli: &Cli, display: &DisplayManager) -> Config {
    let mut config = if let Some(config_path) = &cli.config {
        match Config::load_from_file(&config_path.to_string_lossy()) {
            Ok(config) => {
                display.print_success(&format!("Loaded configuration from {}", config_path.display()));
                config
            }
            Err(e) => {
                display.print_warning(&format!("Failed to load configuration: {}, using defaults", e));
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Apply CLI overrides to config
    if let Some(workers) = cli.workers {
        config.scan.workers = workers;
    }
    if let Some(timeout) = cli.timeout {
        config.scan.timeout = timeout;
    }
    if cli.limit.is_some() {
        config.scan.limit = cli.limit;
    }
    if cli.port_probe {
        config.scan.port_probe = true;
    }
    if let Some(probe_workers) = cli.probe_workers {
        config.discovery.probe_workers = probe_workers;
    }
    if cli.output.is_some() {
        config.reporting.output_file = cli.output.clone();
    }
    if cli.json.is_some() {
        config.reporting.json_report = cli.json.clone();
    }

    config
}

async fn run(cli: &Cli, config: Config, display: DisplayManager) -> Result<()> {
    let usernames = match &cli.users {
        Some(input) => wordlist::parse_list_input(input).await?,
        None => config.wordlists.usernames.clone(),
    };
    let passwords = match &cli.passwords {
        Some(input) => wordlist::parse_list_input(input).await?,
        None => config.wordlists.passwords.clone(),
    };
    if usernames.is_empty() || passwords.is_empty() {
        return Err(ScanError::InvalidInput("username and password lists must not be empty".to_string()));
    }

    let targets = load_targets(cli, &config).await?;
    if targets.is_empty() {
        return Err(ScanError::InvalidInput("no targets to scan".to_string()));
    }

    let reporter = Arc::new(Reporter::new(display.clone(), config.reporting.output_file.as_deref()).await?);

    display.print_scan_info(
        targets.len(),
        usernames.len(),
        passwords.len(),
        config.worker_count(),
        config.reporting.output_file.as_deref(),
    );

    if config.scan.port_probe {
        display.print_info(&format!(
            "Checking port reachability first ({} concurrent probes)",
            config.probe_worker_count()
        ));
    }
    if let Some(limit) = config.scan.limit.filter(|l| *l > 0) {
        display.print_info(&format!("Stopping after {} vulnerable cameras", limit));
    }

    let connector = Arc::new(TcpConnector::new(config.rtsp.user_agent.clone()));
    let json_report = config.reporting.json_report.clone();
    let scanner = Scanner::new(config, connector, Arc::clone(&reporter));
    let summary = scanner.run(targets, &usernames, &passwords).await?;

    debug!("{} hosts scanned with {} jobs", summary.targets, summary.jobs);
    display.print_summary(&format_duration(summary.elapsed), summary.found, reporter.output_path());

    if let Some(path) = json_report {
        reporter.write_json_report(&path).await?;
    }

    Ok(())
}

async fn load_targets(cli: &Cli, config: &Config) -> Result<Vec<Target>> {
    let port = config.rtsp.default_port;
    match &cli.target {
        Some(spec) => targets::resolve_target_spec(spec, port).await,
        None => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            targets::read_targets(stdin, port).await
        }
    }
}
