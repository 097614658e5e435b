//! Raw-data download with progress reporting.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use opsd_model::DataSource;

/// User agent string for download requests.
const USER_AGENT_VALUE: &str = concat!("opsd-pipeline/", env!("CARGO_PKG_VERSION"));

const CHUNK_SIZE: usize = 8192;

/// Result of one fetch: where the file landed and whether anything was
/// actually transferred.
#[derive(Debug, Clone)]
pub struct DownloadOutcome {
    pub path: PathBuf,
    pub bytes: u64,
    pub skipped: bool,
}

/// Formats a byte count in human-readable form.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

fn progress_bar(total: Option<u64>) -> ProgressBar {
    match total {
        Some(total) => {
            let pb = ProgressBar::new(total);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}",
                    )
                    .unwrap()
                    .progress_chars("#>-"),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {bytes} {msg}")
                    .unwrap(),
            );
            pb
        }
    }
}

/// Downloads a configured data source to `destination/filename`.
///
/// An existing destination file is left untouched unless `force` is set.
/// A non-2xx status or a transport error fails the whole fetch; partial
/// files are not cleaned up.
pub fn download_source(source: &DataSource, force: bool) -> Result<DownloadOutcome> {
    let target = source.local_path();
    if target.exists() && !force {
        warn!(
            path = %target.display(),
            "destination file already exists, skipping download (use --force to overwrite)"
        );
        let bytes = fs::metadata(&target).map(|m| m.len()).unwrap_or(0);
        return Ok(DownloadOutcome {
            path: target,
            bytes,
            skipped: true,
        });
    }

    fs::create_dir_all(&source.destination).with_context(|| {
        format!(
            "create destination directory {}",
            source.destination.display()
        )
    })?;

    info!(url = %source.url, "starting download");
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(USER_AGENT_VALUE)
        .build()
        .context("build http client")?;
    let mut response = client
        .get(&source.url)
        .send()
        .with_context(|| format!("request {}", source.url))?;

    let status = response.status();
    if !status.is_success() {
        bail!("download failed with status {status}");
    }

    let pb = progress_bar(response.content_length());
    pb.set_message(source.filename.clone());

    let mut file =
        File::create(&target).with_context(|| format!("create {}", target.display()))?;
    let mut buffer = [0u8; CHUNK_SIZE];
    let mut downloaded: u64 = 0;
    loop {
        let read = response.read(&mut buffer).context("read response body")?;
        if read == 0 {
            break;
        }
        file.write_all(&buffer[..read])
            .with_context(|| format!("write {}", target.display()))?;
        downloaded += read as u64;
        pb.set_position(downloaded);
    }
    pb.finish_and_clear();

    info!(
        path = %target.display(),
        size = %format_bytes(downloaded),
        "download complete"
    );
    Ok(DownloadOutcome {
        path: target,
        bytes: downloaded,
        skipped: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.0 MB");
        assert_eq!(format_bytes(52_428_800), "50.0 MB");
        assert_eq!(format_bytes(1024 * 1024 * 1024), "1.0 GB");
    }

    #[test]
    fn test_existing_file_is_skipped() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = DataSource {
            url: "http://127.0.0.1:1/unreachable.csv".to_string(),
            destination: dir.path().to_path_buf(),
            filename: "data.csv".to_string(),
        };
        std::fs::write(source.local_path(), "existing").expect("seed file");

        let outcome = download_source(&source, false).expect("skip download");
        assert!(outcome.skipped);
        assert_eq!(outcome.bytes, 8);
        assert_eq!(
            std::fs::read_to_string(outcome.path).expect("read"),
            "existing"
        );
    }
}
