use diesel::prelude::*;

use crate::domain::category::{Category, NewCategory};
use crate::domain::types::CategorySlug;
use crate::models::category::{Category as DbCategory, NewCategory as DbNewCategory};
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository, RepositoryResult};

impl CategoryReader for DieselRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let items = categories::table
            .order(categories::id.asc())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }

    fn get_category_by_slug(&self, slug: &CategorySlug) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::slug.eq(slug.as_str()))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let db_category: DbNewCategory = category.clone().into();

        let stored = conn.transaction(|conn| {
            // The unique index on `slug` turns a concurrent duplicate into a no-op.
            diesel::insert_into(categories::table)
                .values(&db_category)
                .on_conflict_do_nothing()
                .execute(conn)?;

            categories::table
                .filter(categories::slug.eq(&db_category.slug))
                .first::<DbCategory>(conn)
        })?;

        Ok(stored.try_into()?)
    }

    fn delete_category(&self, slug: &CategorySlug) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let affected =
            diesel::delete(categories::table.filter(categories::slug.eq(slug.as_str())))
                .execute(&mut conn)?;

        Ok(affected)
    }
}
