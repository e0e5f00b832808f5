use crate::db::{DbConnection, DbPool};
use crate::domain::blog::{Blog, BlogChanges, NewBlog};
use crate::domain::category::{Category, NewCategory};
use crate::domain::types::{BlogId, CategorySlug};

pub mod blog;
pub mod category;
pub mod errors;
#[cfg(test)]
pub mod test;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations for stored categories.
pub trait CategoryReader {
    /// List every stored category. Seed categories are not included.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a stored category by its slug.
    fn get_category_by_slug(&self, slug: &CategorySlug) -> RepositoryResult<Option<Category>>;
}

/// Write operations for stored categories.
pub trait CategoryWriter {
    /// Insert a category unless its slug is already stored.
    ///
    /// Returns the stored row for the slug either way, so concurrent creations
    /// of the same label converge on a single record.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Delete the category with the given slug, returning the affected rows.
    fn delete_category(&self, slug: &CategorySlug) -> RepositoryResult<usize>;
}

/// Read-only operations for blog posts.
pub trait BlogReader {
    /// List all posts, newest first; posts without a timestamp come last.
    fn list_blogs(&self) -> RepositoryResult<Vec<Blog>>;
    /// Retrieve a post by its identifier.
    fn get_blog_by_id(&self, id: BlogId) -> RepositoryResult<Option<Blog>>;
    /// Count posts whose category slug equals `slug`.
    fn count_blogs_in_category(&self, slug: &CategorySlug) -> RepositoryResult<usize>;
}

/// Write operations for blog posts.
pub trait BlogWriter {
    /// Persist a new post and return it with its assigned id.
    fn create_blog(&self, blog: &NewBlog) -> RepositoryResult<Blog>;
    /// Overwrite every editable field of a post.
    fn update_blog(&self, id: BlogId, changes: &BlogChanges) -> RepositoryResult<usize>;
    /// Delete a post. Deleting a missing id affects zero rows.
    fn delete_blog(&self, id: BlogId) -> RepositoryResult<usize>;
}
