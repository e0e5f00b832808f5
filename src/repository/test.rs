use std::sync::Mutex;

use crate::domain::blog::{Blog, BlogChanges, NewBlog, sort_newest_first};
use crate::domain::category::{Category, NewCategory};
use crate::domain::types::{BlogId, CategoryId, CategorySlug};
use crate::repository::{
    BlogReader, BlogWriter, CategoryReader, CategoryWriter, RepositoryError, RepositoryResult,
};

#[derive(Default)]
struct State {
    categories: Vec<Category>,
    blogs: Vec<Blog>,
    next_id: i32,
    writes: Vec<String>,
    fail_reads: bool,
    fail_writes: bool,
}

/// Simple in-memory repository used for unit tests.
///
/// Every successful write is appended to a log so tests can assert on the
/// order of store calls, or on their absence.
#[derive(Default)]
pub struct TestRepository {
    state: Mutex<State>,
}

impl TestRepository {
    pub fn new(categories: Vec<Category>, blogs: Vec<Blog>) -> Self {
        let next_id = categories
            .iter()
            .filter_map(|c| c.id.map(CategoryId::get))
            .chain(blogs.iter().map(|b| b.id.get()))
            .max()
            .unwrap_or(0);
        Self {
            state: Mutex::new(State {
                categories,
                blogs,
                next_id,
                ..State::default()
            }),
        }
    }

    /// Make every read fail with a database error.
    pub fn failing_reads(self) -> Self {
        self.state.lock().unwrap().fail_reads = true;
        self
    }

    /// Make every write fail with a database error.
    pub fn failing_writes(self) -> Self {
        self.state.lock().unwrap().fail_writes = true;
        self
    }

    /// Log of successful writes, e.g. `create_category:new-topic`.
    pub fn writes(&self) -> Vec<String> {
        self.state.lock().unwrap().writes.clone()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.state.lock().unwrap().categories.clone()
    }

    pub fn blogs(&self) -> Vec<Blog> {
        self.state.lock().unwrap().blogs.clone()
    }

    fn read(&self) -> RepositoryResult<std::sync::MutexGuard<'_, State>> {
        let state = self.state.lock().unwrap();
        if state.fail_reads {
            return Err(RepositoryError::Database(diesel::result::Error::BrokenTransactionManager));
        }
        Ok(state)
    }

    fn write(&self) -> RepositoryResult<std::sync::MutexGuard<'_, State>> {
        let state = self.state.lock().unwrap();
        if state.fail_writes {
            return Err(RepositoryError::Database(diesel::result::Error::BrokenTransactionManager));
        }
        Ok(state)
    }
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

impl CategoryReader for TestRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        Ok(self.read()?.categories.clone())
    }

    fn get_category_by_slug(&self, slug: &CategorySlug) -> RepositoryResult<Option<Category>> {
        Ok(self
            .read()?
            .categories
            .iter()
            .find(|c| &c.slug == slug)
            .cloned())
    }
}

impl CategoryWriter for TestRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
        let mut state = self.write()?;
        if let Some(existing) = state.categories.iter().find(|c| c.slug == category.slug) {
            return Ok(existing.clone());
        }
        let id = state.next_id();
        let stored = Category {
            id: Some(CategoryId::new(id)?),
            slug: category.slug.clone(),
            label: category.label.clone(),
        };
        state.categories.push(stored.clone());
        state
            .writes
            .push(format!("create_category:{}", category.slug));
        Ok(stored)
    }

    fn delete_category(&self, slug: &CategorySlug) -> RepositoryResult<usize> {
        let mut state = self.write()?;
        let before = state.categories.len();
        state.categories.retain(|c| &c.slug != slug);
        let affected = before - state.categories.len();
        state.writes.push(format!("delete_category:{slug}"));
        Ok(affected)
    }
}

impl BlogReader for TestRepository {
    fn list_blogs(&self) -> RepositoryResult<Vec<Blog>> {
        let mut items = self.read()?.blogs.clone();
        sort_newest_first(&mut items);
        Ok(items)
    }

    fn get_blog_by_id(&self, id: BlogId) -> RepositoryResult<Option<Blog>> {
        Ok(self.read()?.blogs.iter().find(|b| b.id == id).cloned())
    }

    fn count_blogs_in_category(&self, slug: &CategorySlug) -> RepositoryResult<usize> {
        Ok(self
            .read()?
            .blogs
            .iter()
            .filter(|b| &b.category == slug)
            .count())
    }
}

impl BlogWriter for TestRepository {
    fn create_blog(&self, blog: &NewBlog) -> RepositoryResult<Blog> {
        let mut state = self.write()?;
        let id = state.next_id();
        let stored = Blog {
            id: BlogId::new(id)?,
            title: blog.title.clone(),
            body: blog.body.clone(),
            image: blog.image.clone(),
            category: blog.category.clone(),
            created_at: Some(blog.created_at),
            updated_at: None,
        };
        state.blogs.push(stored.clone());
        state.writes.push(format!("create_blog:{}", blog.category));
        Ok(stored)
    }

    fn update_blog(&self, id: BlogId, changes: &BlogChanges) -> RepositoryResult<usize> {
        let mut state = self.write()?;
        let mut affected = 0;
        for blog in state.blogs.iter_mut().filter(|b| b.id == id) {
            blog.title = changes.title.clone();
            blog.body = changes.body.clone();
            blog.image = changes.image.clone();
            blog.category = changes.category.clone();
            blog.updated_at = Some(changes.updated_at);
            affected += 1;
        }
        state.writes.push(format!("update_blog:{id}"));
        Ok(affected)
    }

    fn delete_blog(&self, id: BlogId) -> RepositoryResult<usize> {
        let mut state = self.write()?;
        let before = state.blogs.len();
        state.blogs.retain(|b| b.id != id);
        let affected = before - state.blogs.len();
        state.writes.push(format!("delete_blog:{id}"));
        Ok(affected)
    }
}
