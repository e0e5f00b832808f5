use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{BlogBody, BlogId, BlogTitle, CategorySlug, ImageUrl};

/// A stored blog post.
///
/// `category` is a denormalized copy of the category slug, not a foreign key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Blog {
    pub id: BlogId,
    pub title: BlogTitle,
    /// HTML fragment from the rich-text editor, rendered unescaped.
    pub body: BlogBody,
    pub image: Option<ImageUrl>,
    pub category: CategorySlug,
    /// Set once when the post is created. Posts imported without it sort last.
    pub created_at: Option<NaiveDateTime>,
    /// Set on every edit.
    pub updated_at: Option<NaiveDateTime>,
}

/// Information required to create a new [`Blog`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBlog {
    pub title: BlogTitle,
    pub body: BlogBody,
    pub image: Option<ImageUrl>,
    pub category: CategorySlug,
    pub created_at: NaiveDateTime,
}

/// Full replacement of the editable fields of a [`Blog`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogChanges {
    pub title: BlogTitle,
    pub body: BlogBody,
    pub image: Option<ImageUrl>,
    pub category: CategorySlug,
    pub updated_at: NaiveDateTime,
}

/// Orders posts newest first; posts without a timestamp go last.
pub fn sort_newest_first(blogs: &mut [Blog]) {
    blogs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn blog(id: i32, created_at: Option<i64>) -> Blog {
        Blog {
            id: BlogId::new(id).unwrap(),
            title: BlogTitle::new("Title").unwrap(),
            body: BlogBody::new("<p>x</p>").unwrap(),
            image: None,
            category: CategorySlug::new("ai-ml").unwrap(),
            created_at: created_at
                .map(|secs| DateTime::from_timestamp(secs, 0).unwrap().naive_utc()),
            updated_at: None,
        }
    }

    #[test]
    fn sorts_descending_with_missing_timestamps_last() {
        let mut blogs = vec![blog(1, Some(10)), blog(2, None), blog(3, Some(30))];
        sort_newest_first(&mut blogs);
        let ids: Vec<i32> = blogs.iter().map(|b| b.id.get()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
