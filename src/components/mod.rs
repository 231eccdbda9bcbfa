//! Component suggestion: keyword dictionary, scanner and aggregator
//!
//! A `ComponentCatalog` bundles the dictionary with the scan order, the
//! chart routing set and the layout baseline. It is built once at startup
//! (from the compiled-in `data/element_plus.toml` or a configured file) and
//! shared read-only across requests.

pub mod aggregator;
pub mod dictionary;
pub mod scanner;

pub use aggregator::{
    AggregationRules, BaselineEntry, LayoutBaseline, Suggestion, SuggestionResult, aggregate,
};
pub use dictionary::{ComponentDescriptor, ComponentDictionary, Necessity};
pub use scanner::{Hit, scan};

use crate::error::{Result, UiPromptError};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Compiled-in Element Plus dictionary
pub const BUILTIN_DICTIONARY: &str = include_str!("../../data/element_plus.toml");

#[derive(Debug, Deserialize)]
struct CatalogFile {
    version: u32,
    library: String,
    #[serde(default)]
    chart_widgets: Vec<String>,
    scan_order: Vec<String>,
    baseline: LayoutBaseline,
    entries: HashMap<String, ComponentDescriptor>,
}

/// Read-only component knowledge used by the suggestion pass
#[derive(Debug, Clone)]
pub struct ComponentCatalog {
    version: u32,
    library: String,
    dictionary: ComponentDictionary,
    scan_order: Vec<String>,
    rules: AggregationRules,
}

impl ComponentCatalog {
    /// Catalog from the compiled-in dictionary
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_DICTIONARY)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| UiPromptError::Config {
            message: format!("Failed to read dictionary {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from the configured dictionary path, or the builtin one
    pub fn load(config: &crate::config::Config) -> Result<Self> {
        match config.components.dictionary_path.as_deref() {
            Some(path) => {
                tracing::info!("Loading component dictionary from {}", path);
                Self::from_path(path)
            }
            None => Self::builtin(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        Self::from_file(file)
    }

    fn from_file(file: CatalogFile) -> Result<Self> {
        for (keyword, descriptor) in &file.entries {
            if keyword.is_empty() {
                return Err(UiPromptError::Config {
                    message: "Dictionary contains an empty keyword".into(),
                });
            }
            if descriptor.name.trim().is_empty() {
                return Err(UiPromptError::Config {
                    message: format!("Keyword '{}' maps to an empty widget name", keyword),
                });
            }
        }
        let baseline = &file.baseline;
        for entry in [&baseline.container, &baseline.row, &baseline.column] {
            if entry.name.trim().is_empty() {
                return Err(UiPromptError::Config {
                    message: "Baseline widget names must not be empty".into(),
                });
            }
        }

        let unmapped: Vec<&str> = file
            .scan_order
            .iter()
            .map(String::as_str)
            .filter(|k| !file.entries.contains_key(*k))
            .collect();
        if !unmapped.is_empty() {
            tracing::debug!(
                "Scan keywords without dictionary entries (ignored at scan time): {:?}",
                unmapped
            );
        }

        Ok(Self {
            version: file.version,
            library: file.library,
            dictionary: ComponentDictionary::new(file.entries),
            scan_order: file.scan_order,
            rules: AggregationRules {
                chart_widgets: file.chart_widgets.into_iter().collect::<HashSet<_>>(),
                baseline: file.baseline,
            },
        })
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn library(&self) -> &str {
        &self.library
    }

    pub fn dictionary(&self) -> &ComponentDictionary {
        &self.dictionary
    }

    pub fn scan_order(&self) -> &[String] {
        &self.scan_order
    }

    pub fn rules(&self) -> &AggregationRules {
        &self.rules
    }

    /// Scan `text` using the catalog's keyword order
    pub fn scan<'a>(&'a self, text: &str) -> Vec<Hit<'a>> {
        scan(&self.dictionary, text, &self.scan_order)
    }

    pub fn aggregate(&self, hits: &[Hit<'_>]) -> SuggestionResult {
        aggregate(hits, &self.rules)
    }

    /// Scan then aggregate
    pub fn suggest(&self, text: &str) -> SuggestionResult {
        let hits = self.scan(text);
        tracing::debug!("component scan: {} keyword hits", hits.len());
        self.aggregate(&hits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_loads() {
        let catalog = ComponentCatalog::builtin().expect("builtin dictionary parses");
        assert_eq!(catalog.version(), 1);
        assert_eq!(catalog.library(), "element-plus");
        assert!(catalog.rules().is_chart("echarts"));
        assert_eq!(catalog.scan_order().first().map(String::as_str), Some("按钮"));
        assert_eq!(
            catalog.dictionary().lookup("分页").map(|d| d.name.as_str()),
            Some("el-pagination")
        );
        assert_eq!(catalog.dictionary().lookup("栅格").map(|d| d.name.as_str()), Some("el-row/el-col"));
    }

    #[test]
    fn synonyms_share_a_widget() {
        let catalog = ComponentCatalog::builtin().unwrap();
        let dict = catalog.dictionary();
        for kw in ["下拉框", "下拉选择", "选择器"] {
            assert_eq!(dict.lookup(kw).unwrap().name, "el-select");
        }
    }

    #[test]
    fn rejects_empty_widget_name() {
        let toml = r#"
version = 1
library = "x"
scan_order = ["a"]

[baseline]
container = { name = "c", justification = "c" }
row = { name = "r", justification = "r" }
column = { name = "l", justification = "l" }

[entries]
"a" = { name = " ", importance = "critical", description = "d" }
"#;
        let err = ComponentCatalog::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, UiPromptError::Config { .. }));
    }

    #[test]
    fn rejects_unknown_tier() {
        let toml = r#"
version = 1
library = "x"
scan_order = []

[baseline]
container = { name = "c", justification = "c" }
row = { name = "r", justification = "r" }
column = { name = "l", justification = "l" }

[entries]
"a" = { name = "w", importance = "urgent", description = "d" }
"#;
        assert!(matches!(
            ComponentCatalog::from_toml_str(toml),
            Err(UiPromptError::Config { .. })
        ));
    }

    #[test]
    fn custom_catalog_uses_its_own_baseline() {
        let toml = r#"
version = 7
library = "mini"
chart_widgets = ["chart"]
scan_order = ["图", "钮"]

[baseline]
container = { name = "box", justification = "root" }
row = { name = "r", justification = "row" }
column = { name = "c", justification = "col" }

[entries]
"图" = { name = "chart", importance = "optional", description = "图表" }
"钮" = { name = "btn", importance = "critical", description = "按钮" }
"#;
        let catalog = ComponentCatalog::from_toml_str(toml).unwrap();
        let result = catalog.suggest("一个钮和一张图");
        let names: Vec<_> = result.components.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["btn", "box", "r", "c"]);
        assert_eq!(result.charts.len(), 1);
        assert_eq!(result.charts[0].necessity, Necessity::Optional);
    }
}
