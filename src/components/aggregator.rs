//! Suggestion aggregation: bucket routing, dedup and layout baseline

use super::dictionary::Necessity;
use super::scanner::Hit;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One suggested widget as embedded in the generation prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub necessity: Necessity,
    pub justification: String,
}

/// Structural components and chart widgets, each in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResult {
    pub components: Vec<Suggestion>,
    pub charts: Vec<Suggestion>,
}

impl SuggestionResult {
    pub fn has_component(&self, name: &str) -> bool {
        self.components.iter().any(|s| s.name == name)
    }

    pub fn has_chart(&self, name: &str) -> bool {
        self.charts.iter().any(|s| s.name == name)
    }

    /// Two-space indented JSON, the form embedded verbatim into prompts
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// A widget that is always suggested, with its fixed justification
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BaselineEntry {
    pub name: String,
    pub justification: String,
}

/// Layout skeleton injected when the scan found none
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LayoutBaseline {
    pub container: BaselineEntry,
    pub row: BaselineEntry,
    pub column: BaselineEntry,
}

/// Everything `aggregate` needs besides the hits
#[derive(Debug, Clone)]
pub struct AggregationRules {
    /// Widget names backed by a charting library; routed to `charts`
    pub chart_widgets: HashSet<String>,
    pub baseline: LayoutBaseline,
}

impl AggregationRules {
    pub fn is_chart(&self, name: &str) -> bool {
        self.chart_widgets.contains(name)
    }
}

fn justification(keyword: &str, description: &str) -> String {
    format!("界面分析中包含\"{keyword}\"，需要使用{description}")
}

/// Fold scanner hits into a `SuggestionResult`.
///
/// The first hit for a widget name wins within its bucket. After routing,
/// the root container is appended if missing, and the row/column pair is
/// appended as a pair when neither half is present.
pub fn aggregate(hits: &[Hit<'_>], rules: &AggregationRules) -> SuggestionResult {
    let mut result = SuggestionResult::default();

    for hit in hits {
        let descriptor = hit.descriptor;
        let bucket = if rules.is_chart(&descriptor.name) {
            &mut result.charts
        } else {
            &mut result.components
        };
        if bucket.iter().any(|s| s.name == descriptor.name) {
            continue;
        }
        bucket.push(Suggestion {
            name: descriptor.name.clone(),
            necessity: descriptor.importance,
            justification: justification(hit.keyword, &descriptor.description),
        });
    }

    let baseline = &rules.baseline;
    if !result.has_component(&baseline.container.name) {
        result.components.push(baseline_suggestion(&baseline.container));
    }
    // Pair-or-neither: a lone row or column is never injected
    if !result.has_component(&baseline.row.name) && !result.has_component(&baseline.column.name)
    {
        result.components.push(baseline_suggestion(&baseline.row));
        result.components.push(baseline_suggestion(&baseline.column));
    }

    result
}

fn baseline_suggestion(entry: &BaselineEntry) -> Suggestion {
    Suggestion {
        name: entry.name.clone(),
        necessity: Necessity::Critical,
        justification: entry.justification.clone(),
    }
}
