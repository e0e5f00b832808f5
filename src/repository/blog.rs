use diesel::prelude::*;

use crate::domain::blog::{Blog, BlogChanges, NewBlog};
use crate::domain::types::{BlogId, CategorySlug};
use crate::models::blog::{
    Blog as DbBlog, BlogChanges as DbBlogChanges, NewBlog as DbNewBlog,
};
use crate::repository::{BlogReader, BlogWriter, DieselRepository, RepositoryResult};

impl BlogReader for DieselRepository {
    fn list_blogs(&self) -> RepositoryResult<Vec<Blog>> {
        use crate::schema::blogs;

        let mut conn = self.conn()?;

        // SQLite sorts NULL lowest, so untimestamped posts land at the end.
        let items = blogs::table
            .order((blogs::created_at.desc(), blogs::id.desc()))
            .load::<DbBlog>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Blog>, _>>()?;

        Ok(items)
    }

    fn get_blog_by_id(&self, id: BlogId) -> RepositoryResult<Option<Blog>> {
        use crate::schema::blogs;

        let mut conn = self.conn()?;

        let blog = blogs::table
            .filter(blogs::id.eq(id.get()))
            .first::<DbBlog>(&mut conn)
            .optional()?;

        let blog = blog.map(TryInto::try_into).transpose()?;
        Ok(blog)
    }

    fn count_blogs_in_category(&self, slug: &CategorySlug) -> RepositoryResult<usize> {
        use crate::schema::blogs;

        let mut conn = self.conn()?;

        let total = blogs::table
            .filter(blogs::category.eq(slug.as_str()))
            .count()
            .get_result::<i64>(&mut conn)?;

        Ok(total as usize)
    }
}

impl BlogWriter for DieselRepository {
    fn create_blog(&self, blog: &NewBlog) -> RepositoryResult<Blog> {
        use crate::schema::blogs;

        let mut conn = self.conn()?;
        let db_blog: DbNewBlog = blog.clone().into();

        let stored = diesel::insert_into(blogs::table)
            .values(&db_blog)
            .get_result::<DbBlog>(&mut conn)?;

        Ok(stored.try_into()?)
    }

    fn update_blog(&self, id: BlogId, changes: &BlogChanges) -> RepositoryResult<usize> {
        use crate::schema::blogs;

        let mut conn = self.conn()?;
        let db_changes: DbBlogChanges = changes.clone().into();

        let affected = diesel::update(blogs::table.filter(blogs::id.eq(id.get())))
            .set(&db_changes)
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_blog(&self, id: BlogId) -> RepositoryResult<usize> {
        use crate::schema::blogs;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(blogs::table.filter(blogs::id.eq(id.get()))).execute(&mut conn)?;

        Ok(affected)
    }
}
