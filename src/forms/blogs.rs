use actix_multipart::form::{MultipartForm, tempfile::TempFile, text::Text};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{BlogBody, BlogTitle, NonEmptyString, TypeConstraintError};
use crate::media::ImageUpload;

/// Multipart body of the create and edit blog forms.
#[derive(MultipartForm)]
pub struct BlogForm {
    pub title: Text<String>,
    /// HTML produced by the rich-text editor.
    pub body: Text<String>,
    /// Free text: an existing slug, an existing label or a new label.
    pub category: Text<String>,
    #[multipart(limit = "10MB")]
    pub image: Option<TempFile>,
    /// Edit form only: drop the current image when no new one is picked.
    pub remove_image: Option<Text<String>>,
}

/// Text fields of [`BlogForm`], validated before anything else happens.
#[derive(Debug, Clone, Validate)]
pub struct BlogFields {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub body: String,
    #[validate(length(min = 1))]
    pub category: String,
    pub remove_image: bool,
}

/// Validated blog form ready for the service layer.
#[derive(Debug, Clone, PartialEq)]
pub struct BlogFormPayload {
    pub title: BlogTitle,
    pub body: BlogBody,
    /// Raw category text, resolved against the category list at save time.
    pub category: NonEmptyString,
    pub image: Option<ImageUpload>,
    pub remove_image: bool,
}

#[derive(Debug, Error)]
pub enum BlogFormError {
    #[error("Please fill in the title, content and category.")]
    Validation(String),
    #[error("Blog form contains invalid data: {0}")]
    TypeConstraint(String),
    #[error("Failed to read the uploaded image.")]
    ImageRead,
}

impl From<ValidationErrors> for BlogFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<TypeConstraintError> for BlogFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl BlogFormPayload {
    pub fn from_parts(
        fields: BlogFields,
        image: Option<ImageUpload>,
    ) -> Result<Self, BlogFormError> {
        fields.validate()?;
        Self::from_validated(fields, image)
    }

    /// Build the payload from fields that already passed `validate`.
    fn from_validated(
        fields: BlogFields,
        image: Option<ImageUpload>,
    ) -> Result<Self, BlogFormError> {
        Ok(Self {
            title: BlogTitle::new(fields.title)?,
            body: BlogBody::new(fields.body)?,
            category: NonEmptyString::new_for_field(fields.category, "category")?,
            image,
            remove_image: fields.remove_image,
        })
    }
}

/// Browsers submit an empty part when no file was picked.
fn read_image(file: TempFile) -> Result<Option<ImageUpload>, BlogFormError> {
    if file.size == 0 {
        return Ok(None);
    }

    let bytes = std::fs::read(file.file.path()).map_err(|e| {
        log::error!("Failed to read uploaded image: {e}");
        BlogFormError::ImageRead
    })?;

    Ok(Some(ImageUpload {
        file_name: file
            .file_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "image".to_string()),
        content_type: file.content_type.map(|mime| mime.to_string()),
        bytes,
    }))
}

impl TryFrom<BlogForm> for BlogFormPayload {
    type Error = BlogFormError;

    fn try_from(form: BlogForm) -> Result<Self, Self::Error> {
        let fields = BlogFields {
            title: form.title.into_inner(),
            body: form.body.into_inner(),
            category: form.category.into_inner(),
            remove_image: form.remove_image.is_some(),
        };
        // Validate text first so a bad submission never touches the temp file.
        fields.validate()?;

        let image = match form.image {
            Some(file) => read_image(file)?,
            None => None,
        };

        Self::from_validated(fields, image)
    }
}
