use std::collections::HashMap;

use crate::domain::category::{Category, NewCategory};
use crate::domain::types::CategorySlug;
use crate::dto::categories::CategoryDto;
use crate::forms::categories::{AddCategoryFormPayload, DeleteCategoryFormPayload};
use crate::repository::{BlogReader, CategoryReader, CategoryWriter};
use crate::services::resolver::merged_categories;

use super::{ServiceError, ServiceResult};

/// Result of adding a category from the category page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddCategoryOutcome {
    Created(Category),
    /// The label maps onto a slug that is already listed; nothing was written.
    AlreadyExists(Category),
}

/// Every stored category, or an empty list when the store fails.
pub fn list_stored_categories<R>(repo: &R) -> Vec<Category>
where
    R: CategoryReader,
{
    match repo.list_categories() {
        Ok(categories) => categories,
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            vec![]
        }
    }
}

/// Merged category list annotated with how many posts use each entry.
pub fn show_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader + BlogReader,
{
    let blogs = repo.list_blogs().map_err(|e| {
        log::error!("Failed to list blogs: {e}");
        ServiceError::Store
    })?;

    let mut usage: HashMap<CategorySlug, usize> = HashMap::new();
    for blog in blogs {
        *usage.entry(blog.category).or_default() += 1;
    }

    Ok(merged_categories(repo)
        .into_iter()
        .map(|category| {
            let posts = usage.get(&category.slug).copied().unwrap_or(0);
            CategoryDto {
                posts,
                ..CategoryDto::from(category)
            }
        })
        .collect())
}

pub fn add_category<R>(payload: AddCategoryFormPayload, repo: &R) -> ServiceResult<AddCategoryOutcome>
where
    R: CategoryReader + CategoryWriter,
{
    let new_category = NewCategory::from_label(payload.label)?;

    let known = merged_categories(repo);
    if let Some(existing) = known.into_iter().find(|c| c.slug == new_category.slug) {
        return Ok(AddCategoryOutcome::AlreadyExists(existing));
    }

    match repo.create_category(&new_category) {
        Ok(category) => Ok(AddCategoryOutcome::Created(category)),
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Err(ServiceError::Store)
        }
    }
}

/// Whether no post references `slug`.
pub fn can_delete_category<R>(slug: &CategorySlug, repo: &R) -> ServiceResult<bool>
where
    R: BlogReader,
{
    match repo.count_blogs_in_category(slug) {
        Ok(total) => Ok(total == 0),
        Err(e) => {
            log::error!("Failed to count blogs in category `{slug}`: {e}");
            Err(ServiceError::Store)
        }
    }
}

/// Delete a category unless a post still references it.
///
/// Deleting a slug that is not stored (for example a seed category) is a
/// logged no-op.
pub fn delete_category<R>(payload: DeleteCategoryFormPayload, repo: &R) -> ServiceResult<()>
where
    R: BlogReader + CategoryReader + CategoryWriter,
{
    if !can_delete_category(&payload.slug, repo)? {
        return Err(ServiceError::CategoryInUse(payload.slug));
    }

    match repo.get_category_by_slug(&payload.slug) {
        Ok(Some(_)) => {}
        Ok(None) => {
            log::warn!("No stored category `{}` to delete", payload.slug);
            return Ok(());
        }
        Err(e) => {
            log::error!("Failed to get category `{}`: {e}", payload.slug);
            return Err(ServiceError::Store);
        }
    }

    match repo.delete_category(&payload.slug) {
        Ok(0) => {
            log::warn!("Category `{}` was already deleted", payload.slug);
            Ok(())
        }
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete category `{}`: {e}", payload.slug);
            Err(ServiceError::Store)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::blog::Blog;
    use crate::domain::category::seed_categories;
    use crate::domain::types::{BlogBody, BlogId, BlogTitle, CategoryId, CategoryLabel};
    use crate::repository::BlogWriter;
    use crate::repository::test::TestRepository;
    use chrono::DateTime;

    fn sample_category(id: i32, slug: &str, label: &str) -> Category {
        Category {
            id: Some(CategoryId::new(id).unwrap()),
            slug: CategorySlug::new(slug).unwrap(),
            label: CategoryLabel::new(label).unwrap(),
        }
    }

    fn sample_blog(id: i32, category: &str) -> Blog {
        Blog {
            id: BlogId::new(id).unwrap(),
            title: BlogTitle::new(format!("Post {id}")).unwrap(),
            body: BlogBody::new("<p>x</p>").unwrap(),
            image: None,
            category: CategorySlug::new(category).unwrap(),
            created_at: Some(DateTime::from_timestamp(id as i64, 0).unwrap().naive_utc()),
            updated_at: None,
        }
    }

    fn slug(value: &str) -> CategorySlug {
        CategorySlug::new(value).unwrap()
    }

    #[test]
    fn stored_list_is_empty_when_store_fails() {
        let repo = TestRepository::new(vec![sample_category(1, "rust", "Rust")], vec![])
            .failing_reads();
        assert!(list_stored_categories(&repo).is_empty());
    }

    #[test]
    fn shows_merged_categories_with_usage() {
        let repo = TestRepository::new(
            vec![sample_category(10, "rust", "Rust")],
            vec![sample_blog(1, "rust"), sample_blog(2, "rust"), sample_blog(3, "ai-ml")],
        );

        let categories = show_categories(&repo).unwrap();
        assert_eq!(categories.len(), seed_categories().len() + 1);

        let rust = categories.iter().find(|c| c.slug == "rust").unwrap();
        assert_eq!(rust.posts, 2);
        assert_eq!(rust.id, Some(10));
        assert!(!rust.seed);

        let ai = categories.iter().find(|c| c.slug == "ai-ml").unwrap();
        assert_eq!(ai.posts, 1);
        assert!(ai.seed);
    }

    #[test]
    fn adding_label_with_existing_slug_does_not_duplicate() {
        let repo = TestRepository::new(vec![sample_category(1, "rust-tips", "Rust Tips")], vec![]);

        for label in ["rust   TIPS", "Web Development"] {
            let payload = AddCategoryFormPayload {
                label: CategoryLabel::new(label).unwrap(),
            };
            let outcome = add_category(payload, &repo).unwrap();
            assert!(matches!(outcome, AddCategoryOutcome::AlreadyExists(_)), "{label:?}");
        }

        assert!(repo.writes().is_empty());
        assert_eq!(repo.categories().len(), 1);
    }

    #[test]
    fn adding_new_label_persists_it_once() {
        let repo = TestRepository::default();
        let payload = AddCategoryFormPayload {
            label: CategoryLabel::new("Rust Tips").unwrap(),
        };

        let AddCategoryOutcome::Created(category) = add_category(payload.clone(), &repo).unwrap()
        else {
            panic!("expected a new category");
        };
        assert_eq!(category.slug, "rust-tips");
        assert_eq!(category.label, "Rust Tips");

        let outcome = add_category(payload, &repo).unwrap();
        assert_eq!(outcome, AddCategoryOutcome::AlreadyExists(category));
        assert_eq!(repo.categories().len(), 1);
    }

    #[test]
    fn can_delete_depends_on_referencing_posts() {
        let repo = TestRepository::new(
            vec![sample_category(10, "rust", "Rust")],
            vec![
                sample_blog(1, "ai-ml"),
                sample_blog(2, "gaming"),
                sample_blog(3, "gaming"),
                sample_blog(4, "gaming"),
            ],
        );

        assert!(can_delete_category(&slug("rust"), &repo).unwrap());
        assert!(!can_delete_category(&slug("ai-ml"), &repo).unwrap());
        assert!(!can_delete_category(&slug("gaming"), &repo).unwrap());
    }

    #[test]
    fn deleting_category_in_use_changes_nothing() {
        let categories = vec![sample_category(10, "ai-ml", "AI & Machine Learning")];
        let blogs = vec![sample_blog(1, "ai-ml")];
        let repo = TestRepository::new(categories.clone(), blogs.clone());

        let err = delete_category(DeleteCategoryFormPayload { slug: slug("ai-ml") }, &repo)
            .unwrap_err();

        assert_eq!(err, ServiceError::CategoryInUse(slug("ai-ml")));
        assert_eq!(repo.categories(), categories);
        assert_eq!(repo.blogs(), blogs);
        assert!(repo.writes().is_empty());
    }

    #[test]
    fn category_becomes_deletable_after_last_post_is_removed() {
        let repo = TestRepository::new(
            vec![sample_category(10, "ai-ml", "AI & Machine Learning")],
            vec![sample_blog(1, "ai-ml"), sample_blog(2, "ai-ml")],
        );

        repo.delete_blog(BlogId::new(1).unwrap()).unwrap();
        assert!(!can_delete_category(&slug("ai-ml"), &repo).unwrap());

        repo.delete_blog(BlogId::new(2).unwrap()).unwrap();
        assert!(can_delete_category(&slug("ai-ml"), &repo).unwrap());

        delete_category(DeleteCategoryFormPayload { slug: slug("ai-ml") }, &repo).unwrap();
        assert!(repo.categories().is_empty());
    }

    #[test]
    fn deleting_unstored_category_is_a_silent_no_op() {
        let repo = TestRepository::default();
        assert!(delete_category(DeleteCategoryFormPayload { slug: slug("gaming") }, &repo).is_ok());
        assert!(repo.writes().is_empty());
    }

    #[test]
    fn deleting_stored_unused_category_writes_once() {
        let repo = TestRepository::new(vec![sample_category(10, "ac/dc", "AC/DC")], vec![]);

        delete_category(DeleteCategoryFormPayload { slug: slug("ac/dc") }, &repo).unwrap();

        assert_eq!(repo.writes(), vec!["delete_category:ac/dc".to_string()]);
        assert!(repo.categories().is_empty());
    }

    #[test]
    fn guard_failure_surfaces_as_store_error() {
        let repo = TestRepository::default().failing_reads();
        let err = delete_category(DeleteCategoryFormPayload { slug: slug("rust") }, &repo)
            .unwrap_err();
        assert_eq!(err, ServiceError::Store);
    }
}
