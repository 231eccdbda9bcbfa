//! Keyword -> widget dictionary
//!
//! Maps a UI keyword (as it appears in screenshot analysis text) to the
//! Element Plus widget it implies. The map is built once from TOML data and
//! never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// How essential a suggested widget is to the described interface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Necessity {
    Critical,
    Important,
    Optional,
}

impl Necessity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Necessity::Critical => "critical",
            Necessity::Important => "important",
            Necessity::Optional => "optional",
        }
    }
}

impl fmt::Display for Necessity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One addressable widget of the component library
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComponentDescriptor {
    /// Canonical widget identifier, e.g. `el-table` or `echarts`
    pub name: String,
    pub importance: Necessity,
    /// Human-readable text used to build the justification message
    pub description: String,
}

/// Immutable keyword lookup table
#[derive(Debug, Clone, Default)]
pub struct ComponentDictionary {
    entries: HashMap<String, ComponentDescriptor>,
}

impl ComponentDictionary {
    pub fn new(entries: HashMap<String, ComponentDescriptor>) -> Self {
        Self { entries }
    }

    /// Exact, case-sensitive lookup. Unknown keywords yield `None`.
    pub fn lookup(&self, keyword: &str) -> Option<&ComponentDescriptor> {
        self.entries.get(keyword)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ComponentDescriptor)> {
        self.entries.iter().map(|(k, d)| (k.as_str(), d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ComponentDescriptor {
        ComponentDescriptor {
            name: "el-table".into(),
            importance: Necessity::Critical,
            description: "表格组件，用于展示数据".into(),
        }
    }

    #[test]
    fn lookup_is_exact() {
        let mut entries = HashMap::new();
        entries.insert("表格".to_string(), table());
        let dict = ComponentDictionary::new(entries);

        assert_eq!(dict.lookup("表格"), Some(&table()));
        assert!(dict.lookup("表").is_none());
        assert!(dict.lookup("表格 ").is_none());
        assert!(dict.lookup("").is_none());
    }

    #[test]
    fn iter_yields_every_entry() {
        let mut entries = HashMap::new();
        entries.insert("表格".to_string(), table());
        entries.insert("数据表".to_string(), table());
        let dict = ComponentDictionary::new(entries);
        let mut keywords: Vec<_> = dict.iter().map(|(k, _)| k).collect();
        keywords.sort();
        assert_eq!(keywords, vec!["数据表", "表格"]);
        assert!(dict.iter().all(|(_, d)| d.name == "el-table"));
    }

    #[test]
    fn necessity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Necessity::Important).unwrap(),
            "\"important\""
        );
        let parsed: Necessity = serde_json::from_str("\"optional\"").unwrap();
        assert_eq!(parsed, Necessity::Optional);
        assert!(serde_json::from_str::<Necessity>("\"Critical\"").is_err());
    }
}
