//! Resolving the list of profiles to scrape.

use crate::{Error, Result};
use std::path::Path;
use url::Url;

const PROFILE_BASE: &str = "https://www.linkedin.com/in/";

/// Turn a bare slug, host-relative path or full URL into an absolute profile URL
///
/// - `jdoe` becomes `https://www.linkedin.com/in/jdoe`
/// - `linkedin.com/in/jdoe` becomes `https://linkedin.com/in/jdoe`
/// - values that already carry an http(s) scheme are kept, in canonical case
///
/// Anything that does not end up on a linkedin.com host is rejected.
pub fn normalize_profile_url(raw: &str) -> Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::InvalidUrl("empty value".to_string()));
    }

    let invalid = |reason: String| Error::InvalidUrl(format!("{}: {}", raw, reason));

    let url = match Url::parse(raw) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => url,
        Ok(url) if raw.contains("://") => {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        _ => {
            let candidate = if raw.contains("linkedin.com") {
                format!("https://{}", raw)
            } else {
                format!("{}{}", PROFILE_BASE, raw.trim_matches('/'))
            };
            Url::parse(&candidate).map_err(|e| invalid(e.to_string()))?
        }
    };

    match url.host_str() {
        Some(host) if is_linkedin_host(host) => Ok(url.into()),
        Some(host) => Err(invalid(format!("'{}' is not a linkedin.com host", host))),
        None => Err(invalid("missing host".to_string())),
    }
}

fn is_linkedin_host(host: &str) -> bool {
    host == "linkedin.com" || host.ends_with(".linkedin.com")
}

/// Read profile URLs from the first column of a headerless CSV file
///
/// Empty rows and rows whose first cell starts with `#` are skipped.
pub fn load_url_list(path: &Path) -> Result<Vec<String>> {
    tracing::debug!("Reading profile list from: {}", path.display());

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut urls = Vec::new();
    for record in reader.records() {
        let record = record?;
        let Some(first) = record.get(0).map(str::trim) else {
            continue;
        };
        if first.is_empty() || first.starts_with('#') {
            continue;
        }
        urls.push(first.to_string());
    }

    tracing::info!("Loaded {} profile URLs from {}", urls.len(), path.display());
    Ok(urls)
}

/// Pick the URL source: a single `--url` wins over the CSV list
pub fn resolve_targets(url: Option<&str>, csv_path: Option<&Path>) -> Result<Vec<String>> {
    let raw = match (url, csv_path) {
        (Some(url), _) => vec![url.to_string()],
        (None, Some(path)) => load_url_list(path)?,
        (None, None) => Vec::new(),
    };

    if raw.is_empty() {
        return Err(Error::NoInput(
            "pass --url or a CSV file with one profile URL per row".to_string(),
        ));
    }

    raw.iter().map(|u| normalize_profile_url(u)).collect()
}
