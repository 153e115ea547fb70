//! Scheme search

use crate::types::GovernmentScheme;

/// Keep schemes whose name matches `query`
///
/// The English name is matched case-insensitively; the local name is
/// matched verbatim. The query is used as typed, surrounding spaces
/// included. Order is preserved and an empty query keeps everything.
pub fn filter_schemes<'a>(schemes: &'a [GovernmentScheme], query: &str) -> Vec<&'a GovernmentScheme> {
    if query.is_empty() {
        return schemes.iter().collect();
    }

    let lowered = query.to_lowercase();
    schemes
        .iter()
        .filter(|scheme| {
            scheme.name.to_lowercase().contains(&lowered) || scheme.name_local.contains(query)
        })
        .collect()
}
