use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, CategoryLabel, CategorySlug, TypeConstraintError};

/// Built-in categories offered before anything is stored, as `(slug, label)`.
pub const SEED_CATEGORIES: [(&str, &str); 17] = [
    ("web-development", "Web Development"),
    ("mobile-development", "Mobile Development"),
    ("ai-ml", "AI & Machine Learning"),
    ("cybersecurity", "Cybersecurity"),
    ("cloud-computing", "Cloud Computing"),
    ("data-science", "Data Science"),
    ("programming", "Programming"),
    ("tech-news", "Tech News"),
    ("software-engineering", "Software Engineering"),
    ("gadgets", "Gadgets & Reviews"),
    ("gaming", "Gaming"),
    ("productivity", "Productivity & Tools"),
    ("entrepreneurship", "Entrepreneurship"),
    ("marketing", "Digital Marketing"),
    ("self-improvement", "Self-Improvement"),
    ("finance", "Finance & Investing"),
    ("lifestyle", "Lifestyle & Wellness"),
];

/// Category preselected on the create form.
pub const DEFAULT_CATEGORY_SLUG: &str = "web-development";

/// A blog category.
///
/// Seed categories have no `id`; stored ones always do.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: Option<CategoryId>,
    pub slug: CategorySlug,
    pub label: CategoryLabel,
}

impl Category {
    /// Whether this category only exists in the compile-time seed list.
    pub fn is_seed(&self) -> bool {
        self.id.is_none()
    }
}

/// Data required to insert a new [`Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCategory {
    pub slug: CategorySlug,
    pub label: CategoryLabel,
}

impl NewCategory {
    /// Builds a category whose slug is derived from `label`.
    pub fn from_label(label: CategoryLabel) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            slug: CategorySlug::from_label(label.as_str())?,
            label,
        })
    }
}

/// The seed list as domain values, in declaration order.
pub fn seed_categories() -> Vec<Category> {
    SEED_CATEGORIES
        .iter()
        .filter_map(|(slug, label)| {
            Some(Category {
                id: None,
                slug: CategorySlug::new(*slug).ok()?,
                label: CategoryLabel::new(*label).ok()?,
            })
        })
        .collect()
}
