use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedAdmin;
use crate::forms::blogs::{BlogForm, BlogFormPayload};
use crate::media::CloudinaryHost;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::blogs::{
    create_blog as create_blog_service, delete_blog as delete_blog_service,
    edit_blog_form as edit_blog_form_service, new_blog_form as new_blog_form_service,
    show_blog as show_blog_service, show_blogs as show_blogs_service,
    update_blog as update_blog_service,
};

const BLOG_NOT_FOUND: &str = "Blog not found.";

/// Flash the outcome of a failed save and send the admin back to `back_to`.
fn save_failed(err: ServiceError, back_to: &str) -> HttpResponse {
    match err {
        ServiceError::NotFound => HttpResponse::NotFound().body(BLOG_NOT_FOUND),
        ServiceError::Validation(message) => {
            FlashMessage::error(message).send();
            redirect(back_to)
        }
        ServiceError::Upload(_) => {
            FlashMessage::error("Image upload failed. The post was not saved.").send();
            redirect(back_to)
        }
        err => {
            log::error!("Failed to save blog: {err}");
            FlashMessage::error("Could not save the post. Please try again.").send();
            redirect(back_to)
        }
    }
}

#[get("/blogs")]
pub async fn show_blogs(
    admin: AuthenticatedAdmin,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_blogs_service(repo.get_ref()) {
        Ok(blogs) => {
            let mut context = base_context(&flash_messages, Some(&admin), "blogs");
            context.insert("blogs", &blogs);
            render_template(&tera, "blogs/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render blogs page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/blogs/new")]
pub async fn new_blog(
    admin: AuthenticatedAdmin,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let form = new_blog_form_service(repo.get_ref());

    let mut context = base_context(&flash_messages, Some(&admin), "new_blog");
    context.insert("categories", &form.categories);
    context.insert("selected_category", &form.selected);
    render_template(&tera, "blogs/new.html", &context)
}

#[post("/blogs")]
pub async fn create_blog(
    _admin: AuthenticatedAdmin,
    repo: web::Data<DieselRepository>,
    media: web::Data<CloudinaryHost>,
    MultipartForm(form): MultipartForm<BlogForm>,
) -> impl Responder {
    let payload: BlogFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/blogs/new");
        }
    };

    match create_blog_service(payload, repo.get_ref(), media.get_ref()).await {
        Ok(_) => {
            FlashMessage::success("Post published.").send();
            redirect("/blogs")
        }
        Err(err) => save_failed(err, "/blogs/new"),
    }
}

#[get("/blogs/{blog_id}")]
pub async fn show_blog(
    blog_id: web::Path<i32>,
    admin: AuthenticatedAdmin,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_blog_service(blog_id.into_inner(), repo.get_ref()) {
        Ok(blog) => {
            let mut context = base_context(&flash_messages, Some(&admin), "blogs");
            context.insert("blog", &blog);
            render_template(&tera, "blogs/show.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().body(BLOG_NOT_FOUND),
        Err(err) => {
            log::error!("Failed to render blog page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/blogs/{blog_id}/edit")]
pub async fn edit_blog(
    blog_id: web::Path<i32>,
    admin: AuthenticatedAdmin,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match edit_blog_form_service(blog_id.into_inner(), repo.get_ref()) {
        Ok((blog, form)) => {
            let mut context = base_context(&flash_messages, Some(&admin), "blogs");
            context.insert("blog", &blog);
            context.insert("categories", &form.categories);
            context.insert("selected_category", &form.selected);
            render_template(&tera, "blogs/edit.html", &context)
        }
        Err(ServiceError::NotFound) => HttpResponse::NotFound().body(BLOG_NOT_FOUND),
        Err(err) => {
            log::error!("Failed to render blog edit page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/blogs/{blog_id}/update")]
pub async fn update_blog(
    blog_id: web::Path<i32>,
    _admin: AuthenticatedAdmin,
    repo: web::Data<DieselRepository>,
    media: web::Data<CloudinaryHost>,
    MultipartForm(form): MultipartForm<BlogForm>,
) -> impl Responder {
    let blog_id = blog_id.into_inner();
    let edit_url = format!("/blogs/{blog_id}/edit");

    let payload: BlogFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect(&edit_url);
        }
    };

    match update_blog_service(blog_id, payload, repo.get_ref(), media.get_ref()).await {
        Ok(()) => {
            FlashMessage::success("Post updated.").send();
            redirect(&format!("/blogs/{blog_id}"))
        }
        Err(err) => save_failed(err, &edit_url),
    }
}

#[post("/blogs/{blog_id}/delete")]
pub async fn delete_blog(
    blog_id: web::Path<i32>,
    _admin: AuthenticatedAdmin,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match delete_blog_service(blog_id.into_inner(), repo.get_ref()) {
        Ok(()) => FlashMessage::success("Post deleted.").send(),
        Err(ServiceError::NotFound) => FlashMessage::error("Post not found.").send(),
        Err(err) => {
            log::error!("Failed to delete blog: {err}");
            FlashMessage::error("Could not delete the post. Please try again.").send();
        }
    }

    redirect("/blogs")
}
