//! Keyword scanner over free-form analysis text

use super::dictionary::{ComponentDescriptor, ComponentDictionary};

/// A keyword found in the text together with the widget it resolved to.
///
/// The originating keyword is kept because the same widget can be reached
/// through different keywords, each producing different justification text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit<'a> {
    pub keyword: &'a str,
    pub descriptor: &'a ComponentDescriptor,
}

/// Scan `text` for every keyword in `keywords`, in list order.
///
/// Matching is plain substring containment: `表` matches inside `表格`.
/// Keywords without a dictionary entry are skipped. Several keywords that
/// resolve to the same widget each produce a hit; dedup happens in the
/// aggregator.
pub fn scan<'a, K>(
    dictionary: &'a ComponentDictionary,
    text: &str,
    keywords: &'a [K],
) -> Vec<Hit<'a>>
where
    K: AsRef<str>,
{
    keywords
        .iter()
        .map(AsRef::as_ref)
        .filter(|keyword| !keyword.is_empty() && text.contains(*keyword))
        .filter_map(|keyword| {
            dictionary
                .lookup(keyword)
                .map(|descriptor| Hit { keyword, descriptor })
        })
        .collect()
}
