// Useful Tools - core/catalog.rs
//
// Tool catalog: the immutable list of records shown in the directory.
//
// The built-in catalog is embedded in the binary. A user catalog file, when
// configured, replaces it wholesale; records are never merged or edited in
// place. The catalog is shared as `Arc<ToolCatalog>` and injected into the
// components that need it.

use crate::core::model::{ToolDefinition, ToolRecord};
use crate::util::constants::{APP_URL_SCHEME, MAX_CATALOG_FILE_SIZE, MAX_CATALOG_TOOLS};
use crate::util::error::CatalogError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const BUILTIN_CATALOG: &str = include_str!("../../catalog/tools.toml");

#[derive(Debug, serde::Deserialize)]
struct CatalogFile {
    #[serde(default)]
    tools: Vec<ToolDefinition>,
}

/// Ordered, validated, immutable list of tools.
#[derive(Debug, Clone)]
pub struct ToolCatalog {
    records: Vec<ToolRecord>,
    /// Directory that relative screenshot paths are resolved against.
    base_dir: Option<PathBuf>,
}

impl ToolCatalog {
    /// The catalog embedded in the binary.
    ///
    /// The embedded TOML is covered by tests, so a parse failure here is a
    /// build defect; it is logged and an empty catalog is returned.
    pub fn builtin() -> Self {
        let path = PathBuf::from("<builtin>/tools.toml");
        match parse_catalog(BUILTIN_CATALOG, &path) {
            // Built-in screenshots are not shipped; cards fall back to placeholders.
            Ok(records) => Self {
                records,
                base_dir: None,
            },
            Err(e) => {
                tracing::error!(error = %e, "Built-in catalog is invalid");
                Self {
                    records: Vec::new(),
                    base_dir: None,
                }
            }
        }
    }

    /// Load and validate a user catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let meta = std::fs::metadata(path).map_err(|e| CatalogError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        if meta.len() > MAX_CATALOG_FILE_SIZE {
            return Err(CatalogError::FileTooLarge {
                path: path.to_path_buf(),
                size: meta.len(),
                max_size: MAX_CATALOG_FILE_SIZE,
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let records = parse_catalog(&content, path)?;
        tracing::info!(
            path = %path.display(),
            tools = records.len(),
            "Loaded user catalog"
        );
        Ok(Self {
            records,
            base_dir: path.parent().map(Path::to_path_buf),
        })
    }

    /// Build a catalog from already-validated records (used by tests and
    /// embedders that construct records in code).
    pub fn from_records(records: Vec<ToolRecord>) -> Self {
        Self {
            records,
            base_dir: None,
        }
    }

    pub fn records(&self) -> &[ToolRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&ToolRecord> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Resolve a record's screenshot reference to a filesystem path.
    pub fn screenshot_path(&self, record: &ToolRecord) -> Option<PathBuf> {
        if record.screenshot.is_empty() {
            return None;
        }
        let reference = Path::new(&record.screenshot);
        if reference.is_absolute() {
            return Some(reference.to_path_buf());
        }
        self.base_dir.as_ref().map(|dir| dir.join(reference))
    }
}

/// Parse and validate catalog TOML.
pub fn parse_catalog(content: &str, source_path: &Path) -> Result<Vec<ToolRecord>, CatalogError> {
    let file: CatalogFile = toml::from_str(content).map_err(|e| CatalogError::TomlParse {
        path: source_path.to_path_buf(),
        source: e,
    })?;

    if file.tools.is_empty() {
        return Err(CatalogError::Empty {
            path: source_path.to_path_buf(),
        });
    }
    if file.tools.len() > MAX_CATALOG_TOOLS {
        return Err(CatalogError::TooManyTools {
            count: file.tools.len(),
            max: MAX_CATALOG_TOOLS,
        });
    }

    let mut seen = HashSet::new();
    let mut records = Vec::with_capacity(file.tools.len());
    for (index, def) in file.tools.into_iter().enumerate() {
        records.push(validate_definition(index, def, &mut seen)?);
    }
    Ok(records)
}

fn validate_definition(
    index: usize,
    def: ToolDefinition,
    seen: &mut HashSet<String>,
) -> Result<ToolRecord, CatalogError> {
    let id = def.id.trim().to_string();
    if id.is_empty() {
        return Err(CatalogError::MissingField { index, field: "id" });
    }
    if def.title.trim().is_empty() {
        return Err(CatalogError::MissingField {
            index,
            field: "title",
        });
    }
    if def.url.trim().is_empty() {
        return Err(CatalogError::MissingField { index, field: "url" });
    }
    if !seen.insert(id.clone()) {
        return Err(CatalogError::DuplicateId { id });
    }
    let tags = match def.tags {
        Some(tags) if tags.is_empty() => return Err(CatalogError::EmptyTags { id }),
        Some(tags) => tags,
        None => Vec::new(),
    };
    Ok(ToolRecord {
        id,
        title: def.title,
        description: def.description,
        tags,
        screenshot: def.screenshot,
        url: def.url,
    })
}

// =============================================================================
// Links
// =============================================================================

/// Where a tool card leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolLink {
    /// A view inside this application, e.g. `text-viewer`.
    App(String),
    /// An absolute URL to open in the browser.
    External(String),
    /// A site-relative link with no base URL configured.
    Unavailable,
}

/// Resolve a record URL against the optional site base URL.
pub fn resolve_link(url: &str, base_url: Option<&str>) -> ToolLink {
    let url = url.trim();
    if let Some(view) = url.strip_prefix(APP_URL_SCHEME) {
        return ToolLink::App(view.trim_end_matches('/').to_string());
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        return ToolLink::External(url.to_string());
    }
    match base_url {
        Some(base) => ToolLink::External(format!(
            "{}/{}",
            base.trim_end_matches('/'),
            url.trim_start_matches('/')
        )),
        None => ToolLink::Unavailable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<Vec<ToolRecord>, CatalogError> {
        parse_catalog(content, Path::new("test.toml"))
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let records = parse_catalog(BUILTIN_CATALOG, Path::new("<builtin>")).unwrap();
        assert!(records.len() >= 2);
        assert!(records.iter().any(|r| r.url == "app://text-viewer"));
        assert!(records.iter().any(|r| r.url == "app://image-converter"));
        assert_eq!(ToolCatalog::builtin().len(), records.len());
    }

    #[test]
    fn test_absent_tags_become_empty_list() {
        let records = parse(
            r#"
            [[tools]]
            id = "a"
            title = "A"
            url = "/a"
            "#,
        )
        .unwrap();
        assert!(records[0].tags.is_empty());
    }

    #[test]
    fn test_empty_tag_list_rejected() {
        let err = parse(
            r#"
            [[tools]]
            id = "a"
            title = "A"
            url = "/a"
            tags = []
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::EmptyTags { ref id } if id == "a"));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let err = parse(
            r#"
            [[tools]]
            id = "a"
            title = "A"
            url = "/a"

            [[tools]]
            id = "a"
            title = "Again"
            url = "/b"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId { .. }));
    }

    #[test]
    fn test_missing_title_rejected() {
        let err = parse(
            r#"
            [[tools]]
            id = "a"
            url = "/a"
            "#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::MissingField {
                index: 0,
                field: "title"
            }
        ));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(parse(""), Err(CatalogError::Empty { .. })));
        assert!(matches!(
            parse("[[tools]\n"),
            Err(CatalogError::TomlParse { .. })
        ));
    }

    #[test]
    fn test_resolve_link() {
        assert_eq!(
            resolve_link("app://text-viewer", None),
            ToolLink::App("text-viewer".to_string())
        );
        assert_eq!(
            resolve_link("https://example.com/x", None),
            ToolLink::External("https://example.com/x".to_string())
        );
        assert_eq!(
            resolve_link("/tools/regex", Some("https://tools.example.com/")),
            ToolLink::External("https://tools.example.com/tools/regex".to_string())
        );
        assert_eq!(resolve_link("/tools/regex", None), ToolLink::Unavailable);
    }

    #[test]
    fn test_screenshot_path_relative_to_catalog_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tools.toml");
        std::fs::write(
            &path,
            "[[tools]]\nid = \"a\"\ntitle = \"A\"\nurl = \"/a\"\nscreenshot = \"img/a.png\"\n",
        )
        .unwrap();
        let catalog = ToolCatalog::load(&path).unwrap();
        let record = catalog.get(0).unwrap();
        assert_eq!(
            catalog.screenshot_path(record),
            Some(dir.path().join("img/a.png"))
        );
    }
}
