use serde::Serialize;

use crate::domain::category::Category;

/// Category as shown in selects and on the category page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: Option<i32>,
    pub slug: String,
    pub label: String,
    pub seed: bool,
    /// Number of posts referencing the slug.
    pub posts: usize,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.map(|id| id.get()),
            seed: value.is_seed(),
            slug: value.slug.into_inner(),
            label: value.label.into_inner(),
            posts: 0,
        }
    }
}
