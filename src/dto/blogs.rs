use serde::Serialize;

use crate::domain::blog::Blog;
use crate::domain::category::Category;

const MISSING_DATE: &str = "No date available";

/// Blog post as rendered by the list, detail and edit pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlogDto {
    pub id: i32,
    pub title: String,
    /// Trusted HTML from the single administrator; templates render it unescaped.
    pub body: String,
    pub image: Option<String>,
    pub category: String,
    /// Label of the category when it is still known, otherwise the slug.
    pub category_label: String,
    /// Creation date formatted like `January 5, 2025`.
    pub created_on: String,
}

impl From<Blog> for BlogDto {
    fn from(value: Blog) -> Self {
        let category = value.category.into_inner();
        Self {
            id: value.id.get(),
            title: value.title.into_inner(),
            body: value.body.into_inner(),
            image: value.image.map(String::from),
            category_label: category.clone(),
            category,
            created_on: value
                .created_at
                .map(|at| at.format("%B %-d, %Y").to_string())
                .unwrap_or_else(|| MISSING_DATE.to_string()),
        }
    }
}

impl BlogDto {
    /// Replace the slug shown to the admin with the matching category label.
    pub fn with_category_label(mut self, categories: &[Category]) -> Self {
        if let Some(category) = categories
            .iter()
            .find(|c| c.slug == self.category.as_str())
        {
            self.category_label = category.label.to_string();
        }
        self
    }
}
