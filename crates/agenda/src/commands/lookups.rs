//! Name lookups with "did you mean" suggestions.
//!
//! Category names given on the command line and event IDs/slugs given to
//! `show` are resolved here; misses carry the closest candidate.

use agenda_core::{event_slug, Catalog, Category, EventRecord};
use strsim::levenshtein;

use super::{CommandError, Result};

/// Maximum Levenshtein distance to consider a name as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Formats the "not found" error message, optionally including a suggestion.
pub(crate) fn format_not_found_error(
    resource_type: &str,
    identifier: &str,
    suggestion: Option<&str>,
) -> String {
    let base = format!("{} '{}' not found.", resource_type, identifier);
    match suggestion {
        Some(s) => format!("{} Did you mean '{}'?", base, s),
        None => base,
    }
}

/// Finds the best matching name from a list of candidates using Levenshtein distance.
///
/// Returns the best match if its edit distance is within the threshold,
/// otherwise returns `None`.
pub(crate) fn find_similar_name<'a>(
    query: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<String> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .filter(|name| !name.is_empty())
        .map(|name| {
            let distance = levenshtein(&query_lower, &name.to_lowercase());
            (name.to_string(), distance)
        })
        .min_by_key(|(_, d)| *d)?;

    if best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match)
    } else {
        None
    }
}

/// Resolves a category given by token (`SHOW`) or label (`Stand-up`),
/// ignoring case.
pub fn resolve_category(name: &str) -> Result<Category> {
    let name = name.trim();
    if let Some(category) = Category::from_token(&name.to_uppercase()) {
        return Ok(category);
    }

    let lower = name.to_lowercase();
    if let Some(category) = Category::ALL
        .into_iter()
        .find(|c| c.label().to_lowercase() == lower)
    {
        return Ok(category);
    }

    Err(CommandError::NotFound {
        resource_type: "category",
        identifier: name.to_string(),
        suggestion: find_similar_name(name, Category::ALL.iter().map(|c| c.as_token())),
    })
}

/// Resolves every category in `names`, failing on the first unknown one.
pub fn resolve_categories(names: &[String]) -> Result<Vec<Category>> {
    names.iter().map(|n| resolve_category(n)).collect()
}

/// Finds an event by ID or slug.
pub fn find_event<'a>(catalog: &'a Catalog, id_or_slug: &str) -> Result<&'a EventRecord> {
    if let Some(event) = catalog.find(id_or_slug) {
        return Ok(event);
    }

    let slugs: Vec<String> = catalog.events().iter().filter_map(event_slug).collect();
    let candidates = catalog
        .events()
        .iter()
        .map(|e| e.id.as_str())
        .chain(slugs.iter().map(String::as_str));

    Err(CommandError::NotFound {
        resource_type: "event",
        identifier: id_or_slug.to_string(),
        suggestion: find_similar_name(id_or_slug, candidates),
    })
}
