//! Category resolution: one category list built from the seed list and the
//! store, and free-text lookup against it.
//!
//! Everything here except [`resolve_or_create_category`] is side-effect free,
//! so forms can show and preselect categories without writing to the store.

use std::collections::HashSet;

use crate::domain::category::{Category, NewCategory, seed_categories};
use crate::domain::types::{CategoryLabel, CategorySlug, NonEmptyString, TypeConstraintError};
use crate::repository::{CategoryReader, CategoryWriter};
use crate::services::categories::list_stored_categories;

use super::{ServiceError, ServiceResult};

/// Outcome of looking up free text in the category list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryResolution {
    /// The text named a category that is already listed.
    Existing(Category),
    /// The text names a category nobody has stored yet.
    New(NewCategory),
}

impl CategoryResolution {
    pub fn slug(&self) -> &CategorySlug {
        match self {
            Self::Existing(category) => &category.slug,
            Self::New(category) => &category.slug,
        }
    }
}

/// Concatenate `seeds` and `stored`, keeping the first entry for each slug.
///
/// Seed entries therefore win over stored ones, and duplicate stored rows
/// collapse into the earliest.
pub fn merge_categories(seeds: Vec<Category>, stored: Vec<Category>) -> Vec<Category> {
    let mut seen = HashSet::new();
    seeds
        .into_iter()
        .chain(stored)
        .filter(|category| seen.insert(category.slug.clone()))
        .collect()
}

/// The seed list merged with every stored category.
///
/// A failing store degrades to the seed list alone.
pub fn merged_categories<R>(repo: &R) -> Vec<Category>
where
    R: CategoryReader,
{
    merge_categories(seed_categories(), list_stored_categories(repo))
}

/// Match free text against `known`: exact slug first, then the label ignoring
/// case, then the slug the text would produce.
pub fn resolve_category(
    known: &[Category],
    input: &str,
) -> Result<CategoryResolution, TypeConstraintError> {
    let input = input.trim();

    if let Some(category) = known.iter().find(|c| c.slug == input) {
        return Ok(CategoryResolution::Existing(category.clone()));
    }

    let lowered = input.to_lowercase();
    if let Some(category) = known
        .iter()
        .find(|c| c.label.to_lowercase() == lowered)
    {
        return Ok(CategoryResolution::Existing(category.clone()));
    }

    let new_category = NewCategory::from_label(CategoryLabel::new(input)?)?;
    if let Some(category) = known.iter().find(|c| c.slug == new_category.slug) {
        return Ok(CategoryResolution::Existing(category.clone()));
    }

    Ok(CategoryResolution::New(new_category))
}

/// Resolve the category typed into a blog form, storing it if it is new.
///
/// Called only from the save path; it must finish before the post that
/// references the slug is written.
pub fn resolve_or_create_category<R>(input: &NonEmptyString, repo: &R) -> ServiceResult<Category>
where
    R: CategoryReader + CategoryWriter,
{
    let known = merged_categories(repo);

    match resolve_category(&known, input.as_str())? {
        CategoryResolution::Existing(category) => Ok(category),
        CategoryResolution::New(new_category) => {
            match repo.create_category(&new_category) {
                Ok(category) => {
                    log::info!("Created category `{}`", category.slug);
                    Ok(category)
                }
                Err(e) => {
                    log::error!("Failed to create category `{}`: {e}", new_category.slug);
                    Err(ServiceError::Store)
                }
            }
        }
    }
}
