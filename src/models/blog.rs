use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::blog::{
    Blog as DomainBlog, BlogChanges as DomainBlogChanges, NewBlog as DomainNewBlog,
};
use crate::domain::types::{BlogBody, BlogTitle, CategorySlug, ImageUrl, TypeConstraintError};

/// Diesel model representing the `blogs` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::blogs)]
pub struct Blog {
    pub id: i32,
    pub title: String,
    pub body: String,
    pub image: Option<String>,
    pub category: String,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Insertable form of [`Blog`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::blogs)]
pub struct NewBlog {
    pub title: String,
    pub body: String,
    pub image: Option<String>,
    pub category: String,
    pub created_at: Option<NaiveDateTime>,
}

/// Full overwrite of a blog row. `None` clears the image.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::blogs)]
#[diesel(treat_none_as_null = true)]
pub struct BlogChanges {
    pub title: String,
    pub body: String,
    pub image: Option<String>,
    pub category: String,
    pub updated_at: Option<NaiveDateTime>,
}

impl TryFrom<Blog> for DomainBlog {
    type Error = TypeConstraintError;

    fn try_from(blog: Blog) -> Result<Self, Self::Error> {
        Ok(Self {
            id: blog.id.try_into()?,
            title: BlogTitle::new(blog.title)?,
            body: BlogBody::new(blog.body)?,
            // Invalid stored URLs read back as no image.
            image: blog.image.and_then(|url| ImageUrl::new(url).ok()),
            category: CategorySlug::new(blog.category)?,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        })
    }
}

impl From<DomainNewBlog> for NewBlog {
    fn from(blog: DomainNewBlog) -> Self {
        Self {
            title: blog.title.into_inner(),
            body: blog.body.into_inner(),
            image: blog.image.map(String::from),
            category: blog.category.into_inner(),
            created_at: Some(blog.created_at),
        }
    }
}

impl From<DomainBlogChanges> for BlogChanges {
    fn from(changes: DomainBlogChanges) -> Self {
        Self {
            title: changes.title.into_inner(),
            body: changes.body.into_inner(),
            image: changes.image.map(String::from),
            category: changes.category.into_inner(),
            updated_at: Some(changes.updated_at),
        }
    }
}
