use crate::backend::FileKind;
use crate::error::{FileDeckError, Result};
use crate::panel::{DisplayRegion, LinkEntry};
use crate::ui::output::region_id;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;
use std::sync::Mutex;

/// Region holding the `<li>` markup of its last render.
#[derive(Debug, Default)]
pub struct HtmlRegion {
    items: Mutex<String>,
}

impl HtmlRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markup(&self) -> String {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl DisplayRegion for HtmlRegion {
    fn replace(&self, entries: &[LinkEntry]) {
        let mut markup = String::new();
        for entry in entries {
            let _ = writeln!(
                markup,
                "      <li><a href=\"{}\" target=\"{}\">{}</a></li>",
                escape_html(&entry.href),
                entry.target.html_target(),
                escape_html(&entry.label)
            );
        }
        *self.items.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = markup;
    }
}

/// Standalone page with the trigger, both lists and the content region.
pub fn render_page(title: &str, json: &HtmlRegion, xml: &HtmlRegion) -> String {
    let title = escape_html(title);
    let mut page = String::new();

    let _ = writeln!(page, "<!DOCTYPE html>");
    let _ = writeln!(page, "<html lang=\"en\">");
    let _ = writeln!(page, "<head>");
    let _ = writeln!(page, "  <meta charset=\"utf-8\">");
    let _ = writeln!(page, "  <title>{}</title>", title);
    let _ = writeln!(page, "</head>");
    let _ = writeln!(page, "<body>");
    let _ = writeln!(page, "  <h1>{}</h1>", title);
    let _ = writeln!(page, "  <button id=\"extract-btn\">Extract</button>");

    for (kind, region) in [(FileKind::Json, json), (FileKind::Xml, xml)] {
        let _ = writeln!(page, "  <section>");
        let _ = writeln!(page, "    <h2>{}</h2>", kind.title());
        let _ = writeln!(page, "    <ul id=\"{}\">", region_id(kind));
        page.push_str(&region.markup());
        let _ = writeln!(page, "    </ul>");
        let _ = writeln!(page, "  </section>");
    }

    let _ = writeln!(page, "  <pre id=\"file-content\"></pre>");
    let _ = writeln!(page, "</body>");
    let _ = writeln!(page, "</html>");
    page
}

/// Write `contents` to `path` through a temporary file in the same directory.
pub fn write_page(path: &Path, contents: &str, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(FileDeckError::OutputFileExists {
            path: path.display().to_string(),
        });
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::NamedTempFile::new_in(parent)?;
    temp.write_all(contents.as_bytes())?;
    temp.persist(path).map_err(|e| FileDeckError::Io(e.error))?;
    Ok(())
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::build_entries;
    use tempfile::TempDir;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
        assert_eq!(escape_html("plain.json"), "plain.json");
    }

    #[test]
    fn test_region_markup() {
        let region = HtmlRegion::new();
        region.replace(&build_entries(FileKind::Json, &["a.json".to_string()]));

        assert_eq!(
            region.markup().trim(),
            "<li><a href=\"/files/json/a.json\" target=\"_blank\">a.json</a></li>"
        );

        region.replace(&[]);
        assert!(region.markup().is_empty());
    }

    #[test]
    fn test_page_has_all_regions() {
        let json = HtmlRegion::new();
        let xml = HtmlRegion::new();
        xml.replace(&build_entries(FileKind::Xml, &["<odd>.xml".to_string()]));

        let page = render_page("Zendesk Extractor", &json, &xml);

        assert!(page.contains("<button id=\"extract-btn\">"));
        assert!(page.contains("<ul id=\"json-files\">"));
        assert!(page.contains("<ul id=\"xml-files\">"));
        assert!(page.contains("<pre id=\"file-content\"></pre>"));
        assert!(page.contains("href=\"/files/xml/&lt;odd&gt;.xml\""));
    }

    #[test]
    fn test_write_page_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("index.html");

        write_page(&path, "first", false).unwrap();
        assert!(matches!(
            write_page(&path, "second", false),
            Err(FileDeckError::OutputFileExists { .. })
        ));

        write_page(&path, "second", true).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
    }
}
