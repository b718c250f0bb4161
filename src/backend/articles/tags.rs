//! Tag Reconciliation
//!
//! Find-or-create for the tag names requested on article write. Requested
//! names are normalized, matched against existing rows, and the missing ones
//! are created; the article is then linked to matched ∪ created.

use crate::backend::store::{StoreResult, TagRepository};
use crate::shared::models::Tag;
use crate::shared::SharedError;

/// Trim names, reject empty ones, and drop duplicates keeping first-seen order
pub fn normalize(names: &[String]) -> Result<Vec<String>, SharedError> {
    let mut normalized: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.trim();
        if name.is_empty() {
            return Err(SharedError::validation("tags", "tag names must not be empty"));
        }
        if !normalized.iter().any(|n| n == name) {
            normalized.push(name.to_string());
        }
    }
    Ok(normalized)
}

/// Requested names split into tags that already exist and names to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagPlan {
    pub matched: Vec<Tag>,
    pub missing: Vec<String>,
}

pub fn plan(requested: &[String], existing: Vec<Tag>) -> TagPlan {
    let matched: Vec<Tag> = existing
        .into_iter()
        .filter(|tag| requested.contains(&tag.name))
        .collect();
    let missing = requested
        .iter()
        .filter(|name| !matched.iter().any(|tag| &tag.name == *name))
        .cloned()
        .collect();

    TagPlan { matched, missing }
}

/// Resolve normalized tag names to tag rows, creating the missing ones
///
/// Returns the tags sorted by name.
pub async fn reconcile(tags: &dyn TagRepository, requested: &[String]) -> StoreResult<Vec<Tag>> {
    if requested.is_empty() {
        return Ok(Vec::new());
    }

    let existing = tags.find_by_names(requested).await?;
    let TagPlan { mut matched, missing } = plan(requested, existing);

    if !missing.is_empty() {
        tracing::info!("Creating {} new tags: {:?}", missing.len(), missing);
        matched.extend(tags.create_many(&missing).await?);
    }

    matched.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(matched)
}
