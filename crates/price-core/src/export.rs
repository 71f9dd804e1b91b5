//! HTML export of the full catalog

use crate::catalog::Catalog;
use crate::error::{Error, Result};
use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// File name used when no export path is given
pub const DEFAULT_OUTPUT: &str = "output.html";

const DOCUMENT_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Product positions</title>
    <style>
        table, th, td { border: 1px solid black; border-collapse: collapse; }
        th, td { padding: 5px; }
    </style>
</head>
<body>
    <table>
        <tr>
            <th>No.</th>
            <th>Name</th>
            <th>Price</th>
            <th>Weight</th>
            <th>File</th>
            <th>Price per unit</th>
        </tr>
"#;

const DOCUMENT_TAIL: &str = "    </table>
</body>
</html>
";

/// Render every record in the catalog as an HTML table document
///
/// Output depends only on the catalog contents, so exporting an unchanged
/// catalog twice produces identical bytes.
pub fn render_html(catalog: &Catalog) -> String {
    let mut html = String::from(DOCUMENT_HEAD);

    for (idx, record) in catalog.iter().enumerate() {
        // Writing to a String cannot fail
        let _ = write!(
            html,
            "        <tr>
            <td>{}</td>
            <td>{}</td>
            <td>{}</td>
            <td>{}</td>
            <td>{}</td>
            <td>{:.2}</td>
        </tr>
",
            idx + 1,
            escape_html(record.name()),
            record.price(),
            record.weight(),
            escape_html(record.source_file()),
            record.price_per_unit()
        );
    }

    html.push_str(DOCUMENT_TAIL);
    html
}

/// Write the catalog to `path` as HTML, replacing any existing file
///
/// The document is written to a temporary file next to `path` and renamed
/// into place, so readers never see a half-written export.
pub fn export_html<P: AsRef<Path>>(catalog: &Catalog, path: P) -> Result<()> {
    let path = path.as_ref();
    let write_err = |e: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        source: e,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(render_html(catalog).as_bytes())
        .map_err(write_err)?;
    if let Some(perms) = output_permissions(path) {
        tmp.as_file().set_permissions(perms).map_err(write_err)?;
    }
    tmp.as_file().sync_all().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    tracing::info!(path = %path.display(), records = catalog.len(), "exported catalog");
    Ok(())
}

/// Mode for the export: keep the existing file's, else a world-readable default
///
/// Temporary files are created owner-only, which would otherwise carry over.
fn output_permissions(path: &Path) -> Option<fs::Permissions> {
    match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

/// Escape text for use inside HTML element content
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::PriceRecord;
    use tempfile::TempDir;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.append(vec![
            PriceRecord::new("Яблоко", 50.0, 2.0, "price1.csv").unwrap(),
            PriceRecord::new("Сок <яблочный> & морс", 100.0, 3.0, "price2.csv").unwrap(),
        ]);
        catalog
    }

    #[test]
    fn test_render_html_rows() {
        let html = render_html(&sample_catalog());

        assert_eq!(html.matches("<tr>").count(), 3);
        assert!(html.contains("<td>1</td>"));
        assert!(html.contains("<td>Яблоко</td>"));
        assert!(html.contains("<td>25.00</td>"));
        assert!(html.contains("<td>33.33</td>"));
        assert!(html.contains("<td>price2.csv</td>"));
    }

    #[test]
    fn test_render_html_escapes_text() {
        let html = render_html(&sample_catalog());
        assert!(html.contains("Сок &lt;яблочный&gt; &amp; морс"));
        assert!(!html.contains("<яблочный>"));
    }

    #[test]
    fn test_render_html_empty_catalog() {
        let html = render_html(&Catalog::new());
        assert_eq!(html.matches("<tr>").count(), 1);
        assert_eq!(html.matches("<th>").count(), 6);
        assert!(!html.contains("<td>"));
    }

    #[test]
    fn test_export_overwrites_and_is_stable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_OUTPUT);
        fs::write(&path, "stale").unwrap();

        let catalog = sample_catalog();
        export_html(&catalog, &path).unwrap();
        let first = fs::read(&path).unwrap();
        export_html(&catalog, &path).unwrap();
        let second = fs::read(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, render_html(&catalog).into_bytes());
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("out.html");
        let err = export_html(&sample_catalog(), &path).unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_export_keeps_readable_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let catalog = sample_catalog();

        let fresh = dir.path().join("fresh.html");
        export_html(&catalog, &fresh).unwrap();
        let mode = fs::metadata(&fresh).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);

        let existing = dir.path().join(DEFAULT_OUTPUT);
        fs::write(&existing, "old").unwrap();
        fs::set_permissions(&existing, fs::Permissions::from_mode(0o640)).unwrap();
        export_html(&catalog, &existing).unwrap();
        let mode = fs::metadata(&existing).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
        assert_eq!(escape_html("молоко"), "молоко");
    }
}
