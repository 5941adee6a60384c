use crate::display::DisplayManager;
use crate::types::Finding;
use crate::{Result, ScanError};
use log::{debug, info};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

/// Shows confirmed findings and appends their URLs to the output file.
///
/// The file handle sits behind an async mutex so concurrent workers never
/// interleave partial lines.
pub struct Reporter {
    display: DisplayManager,
    output: Option<tokio::sync::Mutex<File>>,
    output_path: Option<PathBuf>,
    findings: Mutex<Vec<Finding>>,
}

impl Reporter {
    /// Create the reporter, truncating the output file if one is configured.
    /// Failing to create the file is fatal for the run.
    pub async fn new(display: DisplayManager, output_path: Option<&Path>) -> Result<Self> {
        let output = match output_path {
            Some(path) => {
                let file = File::create(path).await.map_err(|e| {
                    ScanError::Reporting(format!("Failed to create output file {}: {}", path.display(), e))
                })?;
                Some(tokio::sync::Mutex::new(file))
            }
            None => None,
        };

        Ok(Self {
            display,
            output,
            output_path: output_path.map(Path::to_path_buf),
            findings: Mutex::new(Vec::new()),
        })
    }

    pub async fn report(&self, finding: Finding, raw_response: &str) -> Result<()> {
        self.display.print_finding(&finding);
        debug!("[RESP]\n{}", raw_response);

        if let Some(output) = &self.output {
            let mut file = output.lock().await;
            file.write_all(format!("{}\n", finding.url).as_bytes())
                .await
                .map_err(|e| ScanError::Reporting(format!("Failed to write result: {}", e)))?;
            file.flush()
                .await
                .map_err(|e| ScanError::Reporting(format!("Failed to flush results: {}", e)))?;
        }

        self.findings.lock().push(finding);
        Ok(())
    }

    pub fn findings(&self) -> Vec<Finding> {
        self.findings.lock().clone()
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    /// Write every finding of the run as a pretty-printed JSON array.
    pub async fn write_json_report(&self, path: &Path) -> Result<()> {
        debug!("Generating JSON report: {}", path.display());

        let json_data = serde_json::to_string_pretty(&self.findings())?;
        fs::write(path, json_data).await
            .map_err(|e| ScanError::Reporting(format!("Failed to write JSON report: {}", e)))?;

        info!("Wrote JSON report to {}", path.display());
        Ok(())
    }
}
