use crate::{Result, ScanError};
use log::{debug, info};
use std::path::Path;
use tokio::fs;

/// File and wordlist utilities
pub mod wordlist {
    use super::*;

    /// Load a wordlist from file, one entry per line
    pub async fn load_wordlist(path: &Path) -> Result<Vec<String>> {
        if !path.exists() {
            return Err(ScanError::InvalidInput(format!("Wordlist file not found: {}", path.display())));
        }

        let content = fs::read_to_string(path).await
            .map_err(|e| ScanError::InvalidInput(format!("Failed to read {}: {}", path.display(), e)))?;

        let words: Vec<String> = content
            .lines()
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect();

        info!("Loaded {} entries from {}", words.len(), path.display());
        Ok(words)
    }

    /// Resolve a user-supplied list: an existing file, a comma separated
    /// list or a single literal value.
    pub async fn parse_list_input(input: &str) -> Result<Vec<String>> {
        if input.is_empty() {
            return Err(ScanError::InvalidInput("empty list input".to_string()));
        }

        let path = Path::new(input);
        if path.is_file() {
            return load_wordlist(path).await;
        }

        if input.contains(',') {
            let items: Vec<String> = input.split(',').map(|item| item.trim().to_string()).collect();
            debug!("Parsed {} comma separated entries", items.len());
            return Ok(items);
        }

        Ok(vec![input.to_string()])
    }

    /// Usernames shipped on common cameras and NVRs
    pub fn default_usernames() -> Vec<String> {
        [
            "admin", "root", "service", "supervisor", "user",
            "Admin", "administrator", "666666", "888888",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    /// Factory passwords, including the empty one
    pub fn default_passwords() -> Vec<String> {
        [
            "", "admin", "12345", "123456", "1234", "12345678",
            "admin123", "root", "password", "pass", "root123",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }
}

/// Time and formatting utilities
pub mod time {
    use std::time::Duration;

    /// Format duration as human readable string
    pub fn format_duration(duration: Duration) -> String {
        let secs = duration.as_secs();
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        let seconds = secs % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
