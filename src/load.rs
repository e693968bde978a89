use anyhow::{Context, Result};
use std::fs;

use crate::types::SiteRecord;

const USER_AGENT: &str = "Mozilla/5.0 (compatible; NpsSitesViewer/0.1)";

/// True for http(s) sources, which are fetched instead of read from disk
pub fn is_url(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

/// Parse a JSON array of site records
pub fn parse_sites(json: &str) -> Result<Vec<SiteRecord>> {
    let sites: Vec<SiteRecord> =
        serde_json::from_str(json).context("Failed to parse sites JSON")?;
    Ok(sites)
}

/// Load site records from a file path or an http(s) URL
pub fn load_sites(source: &str) -> Result<Vec<SiteRecord>> {
    let body = if is_url(source) {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;
        client
            .get(source)
            .send()
            .with_context(|| format!("Failed to fetch {}", source))?
            .error_for_status()
            .with_context(|| format!("Bad response from {}", source))?
            .text()
            .with_context(|| format!("Failed to read response from {}", source))?
    } else {
        fs::read_to_string(source).with_context(|| format!("Failed to read {}", source))?
    };

    let sites = parse_sites(&body).with_context(|| format!("Invalid dataset in {}", source))?;
    log::debug!("loaded {} records from {}", sites.len(), source);
    Ok(sites)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sites() {
        let json = r#"[
            {"name": "Acadia National Park", "nps_established": "1916", "has_stamps": true},
            {"name": "Mystery Site", "nps_established": null, "has_stamps": null},
            {"nps_established": 1933}
        ]"#;
        let sites = parse_sites(json).unwrap();
        assert_eq!(sites.len(), 3);
        assert_eq!(sites[0].established_year(), Some(1916));
        assert_eq!(sites[1].established_year(), None);
        assert!(!sites[1].has_stamps());
        assert!(!sites[2].is_listable());
    }

    #[test]
    fn test_null_previous_names_reads_as_empty() {
        let json = r#"[
            {"name": "A", "previous_names": null},
            {"name": "B", "previous_names": ["Old B", 7]}
        ]"#;
        let sites = parse_sites(json).unwrap();
        assert!(sites[0].previous_names.is_empty());
        assert_eq!(sites[1].previous_names, vec!["Old B".to_string()]);
    }

    #[test]
    fn test_container_has_stamps_is_truthy() {
        let json = r#"[
            {"name": "A", "has_stamps": []},
            {"name": "B", "has_stamps": {}},
            {"name": "C", "has_stamps": false}
        ]"#;
        let sites = parse_sites(json).unwrap();
        assert!(sites[0].has_stamps());
        assert!(sites[1].has_stamps());
        assert!(!sites[2].has_stamps());
    }

    #[test]
    fn test_bool_year_is_invalid_not_fatal() {
        let json = r#"[
            {"name": "A", "nps_established": true, "nps_abolished": [1900]},
            {"name": "B", "nps_established": "1916"}
        ]"#;
        let sites = parse_sites(json).unwrap();
        assert_eq!(sites[0].established_year(), None);
        assert_eq!(sites[0].abolished_year(), None);
        assert_eq!(sites[1].established_year(), Some(1916));
    }

    #[test]
    fn test_parse_sites_rejects_non_array() {
        assert!(parse_sites(r#"{"name": "x"}"#).is_err());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_sites("definitely/not/here.json").unwrap_err();
        assert!(format!("{:#}", err).contains("definitely/not/here.json"));
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("https://raw.githubusercontent.com/x/y/main/data/sites.json"));
        assert!(!is_url("data/sites.json"));
        assert!(!is_url("httpdocs/sites.json"));
    }
}
