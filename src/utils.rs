use std::fs;
use std::path::Path;

use crate::types::SiteRecord;

/// Create an OSC8 hyperlink for terminal output
pub fn osc8_link(url: &str, text: &str) -> String {
    format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, text)
}

/// Create an OSC8 file:// hyperlink for terminal output
pub fn osc8_file_link(path: &Path, text: &str) -> String {
    let abs_path = fs::canonicalize(path)
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| path.to_string_lossy().to_string());
    format!("\x1b]8;;file://{}\x1b\\{}\x1b]8;;\x1b\\", abs_path, text)
}

/// Site name, hyperlinked to its NPS page when it has one
pub fn site_link(site: &SiteRecord) -> String {
    let name = match site.name.as_deref() {
        Some(n) if !n.is_empty() => n,
        _ => crate::chart::UNNAMED_SITE,
    };
    match site.nps_link.as_deref() {
        Some(url) if !url.is_empty() => osc8_link(url, name),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_link() {
        let mut site = SiteRecord::named("Acadia National Park");
        assert_eq!(site_link(&site), "Acadia National Park");

        site.nps_link = Some("https://www.nps.gov/acad/".to_string());
        assert_eq!(
            site_link(&site),
            "\x1b]8;;https://www.nps.gov/acad/\x1b\\Acadia National Park\x1b]8;;\x1b\\"
        );

        assert_eq!(site_link(&SiteRecord::default()), "Unnamed Site");
    }
}
