use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedAdmin;
use crate::forms::categories::{
    AddCategoryForm, AddCategoryFormPayload, DeleteCategoryForm, DeleteCategoryFormPayload,
};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::categories::{
    AddCategoryOutcome, add_category as add_category_service,
    delete_category as delete_category_service, show_categories as show_categories_service,
};

#[get("/categories")]
pub async fn show_categories(
    admin: AuthenticatedAdmin,
    flash_messages: IncomingFlashMessages,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match show_categories_service(repo.get_ref()) {
        Ok(categories) => {
            let mut context = base_context(&flash_messages, Some(&admin), "categories");
            context.insert("categories", &categories);
            render_template(&tera, "categories/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to render categories page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/categories")]
pub async fn add_category(
    _admin: AuthenticatedAdmin,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddCategoryForm>,
) -> impl Responder {
    let payload: AddCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/categories");
        }
    };

    match add_category_service(payload, repo.get_ref()) {
        Ok(AddCategoryOutcome::Created(category)) => {
            FlashMessage::success(format!("Category \"{}\" added.", category.label)).send()
        }
        Ok(AddCategoryOutcome::AlreadyExists(category)) => {
            FlashMessage::info(format!("Category \"{}\" already exists.", category.label)).send()
        }
        Err(ServiceError::Validation(message)) => FlashMessage::error(message).send(),
        Err(err) => {
            log::error!("Failed to add category: {err}");
            FlashMessage::error("Could not add the category. Please try again.").send();
        }
    }

    redirect("/categories")
}

#[post("/categories/delete")]
pub async fn delete_category(
    _admin: AuthenticatedAdmin,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<DeleteCategoryForm>,
) -> impl Responder {
    let payload: DeleteCategoryFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/categories");
        }
    };

    match delete_category_service(payload, repo.get_ref()) {
        Ok(()) => FlashMessage::success("Category deleted.").send(),
        Err(ServiceError::CategoryInUse(slug)) => FlashMessage::error(format!(
            "Cannot delete \"{slug}\": it is used by existing posts."
        ))
        .send(),
        Err(err) => {
            log::error!("Failed to delete category: {err}");
            FlashMessage::error("Could not delete the category. Please try again.").send();
        }
    }

    redirect("/categories")
}
