use crate::types::Target;
use crate::utils::wordlist;
use crate::{Result, ScanError};
use log::{debug, info};
use std::net::Ipv4Addr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Expand a CIDR block into its host addresses. Network and broadcast
/// addresses are dropped when the block holds more than two addresses.
/// Anything that is not a valid IPv4 CIDR is returned unchanged.
pub fn expand_cidr(entry: &str) -> Vec<String> {
    let entry = entry.trim();
    let Some((base, prefix)) = entry.split_once('/') else {
        return vec![entry.to_string()];
    };

    let (Ok(base_ip), Ok(prefix_len)) = (base.parse::<Ipv4Addr>(), prefix.parse::<u8>()) else {
        return vec![entry.to_string()];
    };
    if prefix_len > 32 {
        return vec![entry.to_string()];
    }

    let host_bits = 32 - u32::from(prefix_len);
    let size = 1u64 << host_bits;
    let mask = if prefix_len == 0 { 0 } else { u32::MAX << host_bits };
    let network = u64::from(u32::from(base_ip) & mask);

    let (first, last) = if size > 2 { (1, size - 1) } else { (0, size) };
    (first..last)
        .map(|offset| Ipv4Addr::from((network + offset) as u32).to_string())
        .collect()
}

/// Expand one entry (single address or CIDR) into normalized targets.
pub fn expand_entry(entry: &str, default_port: u16) -> Vec<Target> {
    expand_cidr(entry)
        .iter()
        .map(|ip| Target::with_default_port(ip, default_port))
        .collect()
}

/// Resolve the `-t` target spec: a file of entries, a comma separated list
/// or a single address/CIDR.
pub async fn resolve_target_spec(spec: &str, default_port: u16) -> Result<Vec<Target>> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(ScanError::InvalidInput("empty target specification".to_string()));
    }
    if spec.parse::<u64>().is_ok() {
        return Err(ScanError::InvalidInput(format!(
            "'{}' is not a target; internet-wide discovery is not supported, pass an IP, CIDR or file",
            spec
        )));
    }

    let entries = wordlist::parse_list_input(spec).await?;
    let targets: Vec<Target> = entries
        .iter()
        .filter(|e| !e.is_empty())
        .flat_map(|e| expand_entry(e, default_port))
        .collect();

    info!("Resolved {} targets from '{}'", targets.len(), spec);
    Ok(targets)
}

/// Read newline delimited entries (e.g. piped scanner output) and expand each.
pub async fn read_targets<R>(reader: R, default_port: u16) -> Result<Vec<Target>>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut targets = Vec::new();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        targets.extend(expand_entry(line, default_port));
    }

    debug!("Read {} targets from stream", targets.len());
    Ok(targets)
}
