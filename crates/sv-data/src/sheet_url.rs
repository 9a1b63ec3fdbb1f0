//! Share-link normalization for Google Sheets

/// Marker that identifies a human-shareable editable-view link.
const EDIT_MARKER: &str = "edit?gid=";

/// Rewrite a spreadsheet "edit" share link into its CSV export link.
///
/// A link like `.../d/<id>/edit?gid=0#gid=0` becomes
/// `.../d/<id>/export?format=csv&gid=0`. URLs without the editable-view
/// marker (including already-normalized export links) pass through
/// unchanged, so the function is idempotent.
pub fn export_url(url: &str) -> String {
    if !url.contains(EDIT_MARKER) {
        return url.to_string();
    }

    let base = url.split("/edit").next().unwrap_or(url);

    let gid = match url.split_once("gid=") {
        Some((_, rest)) => rest.split('#').next().unwrap_or(rest),
        None => return url.to_string(),
    };

    format!("{base}/export?format=csv&gid={gid}")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHARE: &str =
        "https://docs.google.com/spreadsheets/d/1dCdajzIRGXOGPsbcp16ig2Z4aoTRGCUK51Rwfhv8Nbk/edit?gid=0#gid=0";
    const EXPORT: &str =
        "https://docs.google.com/spreadsheets/d/1dCdajzIRGXOGPsbcp16ig2Z4aoTRGCUK51Rwfhv8Nbk/export?format=csv&gid=0";

    #[test]
    fn rewrites_edit_link_to_export_link() {
        assert_eq!(export_url(SHARE), EXPORT);
    }

    #[test]
    fn preserves_non_zero_gid() {
        let url = "https://docs.google.com/spreadsheets/d/abc/edit?gid=1723#gid=1723";
        assert_eq!(
            export_url(url),
            "https://docs.google.com/spreadsheets/d/abc/export?format=csv&gid=1723"
        );
    }

    #[test]
    fn identity_on_urls_without_edit_marker() {
        let url = "https://example.com/data.csv";
        assert_eq!(export_url(url), url);
    }

    #[test]
    fn idempotent_on_export_links() {
        let once = export_url(SHARE);
        let twice = export_url(&once);
        assert_eq!(once, twice);
    }
}
