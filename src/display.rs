use crate::types::Finding;
use colored::*;
use std::io::Write;
use std::path::Path;

/// Console output: banner, finding blocks and the closing summary.
#[derive(Debug, Clone)]
pub struct DisplayManager {
    use_colors: bool,
    quiet_mode: bool,
}

impl DisplayManager {
    pub fn new() -> Self {
        Self::with_quiet(false)
    }

    pub fn with_quiet(quiet: bool) -> Self {
        // Simple check for color support - assume true for most terminals
        let use_colors = std::env::var("NO_COLOR").is_err() &&
                        std::env::var("TERM").map_or(true, |term| term != "dumb");

        Self {
            use_colors,
            quiet_mode: quiet,
        }
    }

    /// Print a confirmed finding as a boxed block
    pub fn print_finding(&self, finding: &Finding) {
        if self.quiet_mode { return; }

        // one lock so blocks from concurrent workers never interleave
        let mut out = std::io::stdout().lock();
        if self.use_colors {
            let _ = writeln!(out, "╭─ {} {}",
                "Found vulnerable camera".bright_green(),
                format!("[{}]", finding.fingerprint).yellow()
            );
            let _ = writeln!(out, "{} {}", "├ Host      :".bold(), finding.target);
            let _ = writeln!(out, "{} {}", "├ Auth      :".bold(), finding.credentials);
            let _ = writeln!(out, "{} {}", "├ Path      :".bold(), finding.path);
            let _ = writeln!(out, "{} {}", "╰ URL       :".bold(), finding.url.cyan());
        } else {
            for line in finding_lines(finding) {
                let _ = writeln!(out, "{}", line);
            }
        }
        let _ = writeln!(out);
    }

    /// Print the scan parameters line shown before workers start
    pub fn print_scan_info(&self, targets: usize, users: usize, passwords: usize, workers: usize, output: Option<&Path>) {
        if self.quiet_mode { return; }

        let mut line = format!(
            "Targets: {} | Users: {} | Passwords: {} | Workers: {}",
            targets, users, passwords, workers
        );
        if let Some(path) = output {
            line.push_str(&format!(" | Output: {}", path.display()));
        }

        if self.use_colors {
            println!(" {}", line.bold());
        } else {
            println!(" {}", line);
        }
        println!();
    }

    /// Print the closing summary
    pub fn print_summary(&self, elapsed: &str, found: usize, output: Option<&Path>) {
        if self.quiet_mode { return; }

        if self.use_colors {
            println!(" {} {}, {} {} vulnerable cameras",
                "Scan completed in".bold(),
                elapsed,
                "found".bold(),
                found.to_string().bright_green().bold()
            );
            if let Some(path) = output {
                println!(" {} {}", "Results saved to".bold(), path.display());
            }
            println!("{}", "─".repeat(67).purple());
        } else {
            println!(" Scan completed in {}, found {} vulnerable cameras", elapsed, found);
            if let Some(path) = output {
                println!(" Results saved to {}", path.display());
            }
            println!("{}", "-".repeat(67));
        }
    }

    /// Print a clean success message
    pub fn print_success(&self, message: &str) {
        if self.quiet_mode { return; }

        if self.use_colors {
            println!("  {} {}", "✓".bright_green().bold(), message.green());
        } else {
            println!("[✓] {}", message);
        }
    }

    /// Print a clean warning message
    pub fn print_warning(&self, message: &str) {
        if self.quiet_mode { return; }

        if self.use_colors {
            println!("  {} {}", "!".bright_yellow().bold(), message.yellow());
        } else {
            println!("[!] {}", message);
        }
    }

    /// Print a clean error message
    pub fn print_error(&self, message: &str) {
        if self.use_colors {
            eprintln!("  {} {}", "✗".bright_red().bold(), message.red().bold());
        } else {
            eprintln!("[✗] {}", message);
        }
    }

    /// Print a clean info message
    pub fn print_info(&self, message: &str) {
        if self.quiet_mode { return; }

        if self.use_colors {
            println!("  {} {}", "i".bright_blue().bold(), message.blue());
        } else {
            println!("[i] {}", message);
        }
    }

    /// Print a clean banner with enhanced styling
    pub fn print_banner(&self, title: &str, subtitle: Option<&str>) {
        if self.quiet_mode { return; }

        if self.use_colors {
            println!();
            println!("  {}", "┌─".bright_cyan().to_string() + &"─".repeat(title.len() + 2) + "─┐");
            println!("  {} {} {}",
                "│".bright_cyan(),
                title.bright_white().bold(),
                "│".bright_cyan()
            );
            if let Some(sub) = subtitle {
                println!("  {} {} {}",
                    "│".bright_cyan(),
                    format!("{:^width$}", sub, width = title.len()).bright_black(),
                    "│".bright_cyan()
                );
            }
            println!("  {}", "└─".bright_cyan().to_string() + &"─".repeat(title.len() + 2) + "─┘");
            println!();
        } else {
            let border = "=".repeat(title.len() + 4);
            println!("\n{}", border);
            println!("  {}  ", title);
            if let Some(sub) = subtitle {
                println!("  {}  ", sub);
            }
            println!("{}\n", border);
        }
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Uncolored lines of a finding block.
pub fn finding_lines(finding: &Finding) -> Vec<String> {
    vec![
        format!("╭─ Found vulnerable camera [{}]", finding.fingerprint),
        format!("├ Host      : {}", finding.target),
        format!("├ Auth      : {}", finding.credentials),
        format!("├ Path      : {}", finding.path),
        format!("╰ URL       : {}", finding.url),
    ]
}
