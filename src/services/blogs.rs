use chrono::Utc;

use crate::domain::blog::{Blog, BlogChanges, NewBlog};
use crate::domain::category::DEFAULT_CATEGORY_SLUG;
use crate::domain::types::{BlogId, ImageUrl};
use crate::dto::blogs::BlogDto;
use crate::dto::categories::CategoryDto;
use crate::forms::blogs::BlogFormPayload;
use crate::media::{ImageUpload, MediaHost};
use crate::repository::{BlogReader, BlogWriter, CategoryReader, CategoryWriter};
use crate::services::resolver::{merged_categories, resolve_or_create_category};

use super::{ServiceError, ServiceResult};

/// Categories offered by the blog forms plus the preselected slug.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogFormContext {
    pub categories: Vec<CategoryDto>,
    pub selected: String,
}

fn parse_blog_id(id: i32) -> ServiceResult<BlogId> {
    BlogId::new(id).map_err(|_| ServiceError::NotFound)
}

fn fetch_blog<R>(id: BlogId, repo: &R) -> ServiceResult<Blog>
where
    R: BlogReader,
{
    match repo.get_blog_by_id(id) {
        Ok(Some(blog)) => Ok(blog),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get blog {id}: {e}");
            Err(ServiceError::Store)
        }
    }
}

async fn upload_image<M>(image: Option<ImageUpload>, media: &M) -> ServiceResult<Option<ImageUrl>>
where
    M: MediaHost + ?Sized,
{
    let Some(image) = image else {
        return Ok(None);
    };

    match media.upload(image).await {
        Ok(url) => Ok(Some(url)),
        Err(e) => {
            log::error!("Image upload failed: {e}");
            Err(e.into())
        }
    }
}

/// Images are uploaded before the post is written; a failed write leaves the
/// uploaded file behind on the media host.
fn log_orphaned_image(uploaded: Option<&ImageUrl>) {
    if let Some(url) = uploaded {
        log::warn!("Orphaned image left on media host: {url}");
    }
}

/// All posts newest first, labelled with their category names.
pub fn show_blogs<R>(repo: &R) -> ServiceResult<Vec<BlogDto>>
where
    R: BlogReader + CategoryReader,
{
    let blogs = repo.list_blogs().map_err(|e| {
        log::error!("Failed to list blogs: {e}");
        ServiceError::Store
    })?;

    let categories = merged_categories(repo);
    Ok(blogs
        .into_iter()
        .map(|blog| BlogDto::from(blog).with_category_label(&categories))
        .collect())
}

pub fn show_blog<R>(id: i32, repo: &R) -> ServiceResult<BlogDto>
where
    R: BlogReader + CategoryReader,
{
    let blog = fetch_blog(parse_blog_id(id)?, repo)?;
    Ok(BlogDto::from(blog).with_category_label(&merged_categories(repo)))
}

/// Category choices for the create form. Never writes.
pub fn new_blog_form<R>(repo: &R) -> BlogFormContext
where
    R: CategoryReader,
{
    BlogFormContext {
        categories: merged_categories(repo)
            .into_iter()
            .map(CategoryDto::from)
            .collect(),
        selected: DEFAULT_CATEGORY_SLUG.to_string(),
    }
}

/// The post being edited and the category choices with its slug selected.
pub fn edit_blog_form<R>(id: i32, repo: &R) -> ServiceResult<(BlogDto, BlogFormContext)>
where
    R: BlogReader + CategoryReader,
{
    let blog = show_blog(id, repo)?;
    let mut context = new_blog_form(repo);
    context.selected = blog.category.clone();
    Ok((blog, context))
}

/// Create a post: upload the image, resolve or create the category, then
/// write the post with the resolved slug and the current time.
pub async fn create_blog<R, M>(payload: BlogFormPayload, repo: &R, media: &M) -> ServiceResult<Blog>
where
    R: BlogWriter + CategoryReader + CategoryWriter,
    M: MediaHost + ?Sized,
{
    let image = upload_image(payload.image, media).await?;

    let category = match resolve_or_create_category(&payload.category, repo) {
        Ok(category) => category,
        Err(e) => {
            log_orphaned_image(image.as_ref());
            return Err(e);
        }
    };

    let new_blog = NewBlog {
        title: payload.title,
        body: payload.body,
        image,
        category: category.slug,
        created_at: Utc::now().naive_utc(),
    };

    match repo.create_blog(&new_blog) {
        Ok(blog) => {
            log::info!("Created blog {} in `{}`", blog.id, blog.category);
            Ok(blog)
        }
        Err(e) => {
            log::error!("Failed to create blog: {e}");
            log_orphaned_image(new_blog.image.as_ref());
            Err(ServiceError::Store)
        }
    }
}

/// Overwrite a post. `created_at` is kept; `updated_at` is set to now.
///
/// Without a new upload the current image is kept unless removal was asked.
pub async fn update_blog<R, M>(
    id: i32,
    payload: BlogFormPayload,
    repo: &R,
    media: &M,
) -> ServiceResult<()>
where
    R: BlogReader + BlogWriter + CategoryReader + CategoryWriter,
    M: MediaHost + ?Sized,
{
    let id = parse_blog_id(id)?;
    let current = fetch_blog(id, repo)?;

    let uploaded = upload_image(payload.image, media).await?;
    let image = match (&uploaded, payload.remove_image) {
        (Some(url), _) => Some(url.clone()),
        (None, true) => None,
        (None, false) => current.image,
    };

    let category = match resolve_or_create_category(&payload.category, repo) {
        Ok(category) => category,
        Err(e) => {
            log_orphaned_image(uploaded.as_ref());
            return Err(e);
        }
    };

    let changes = BlogChanges {
        title: payload.title,
        body: payload.body,
        image,
        category: category.slug,
        updated_at: Utc::now().naive_utc(),
    };

    match repo.update_blog(id, &changes) {
        Ok(0) => {
            log_orphaned_image(uploaded.as_ref());
            Err(ServiceError::NotFound)
        }
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to update blog {id}: {e}");
            log_orphaned_image(uploaded.as_ref());
            Err(ServiceError::Store)
        }
    }
}

/// Delete a post. A post that is already gone counts as deleted.
pub fn delete_blog<R>(id: i32, repo: &R) -> ServiceResult<()>
where
    R: BlogWriter,
{
    let id = parse_blog_id(id)?;

    match repo.delete_blog(id) {
        Ok(0) => {
            log::info!("Blog {id} was already deleted");
            Ok(())
        }
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Failed to delete blog {id}: {e}");
            Err(ServiceError::Store)
        }
    }
}
