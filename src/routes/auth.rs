use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedAdmin;
use crate::forms::auth::{SignInForm, SignInFormPayload};
use crate::models::config::ServerConfig;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::auth::sign_in as sign_in_service;

#[get("/signin")]
pub async fn signin_page(
    identity: Option<Identity>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if identity.is_some() {
        return redirect("/blogs");
    }

    let context = base_context(&flash_messages, None, "signin");
    render_template(&tera, "auth/signin.html", &context)
}

#[post("/signin")]
pub async fn signin(
    request: HttpRequest,
    server_config: web::Data<ServerConfig>,
    web::Form(form): web::Form<SignInForm>,
) -> impl Responder {
    let payload: SignInFormPayload = match form.try_into() {
        Ok(payload) => payload,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return redirect("/signin");
        }
    };

    match sign_in_service(payload, &server_config.admin) {
        Ok(admin) => match Identity::login(&request.extensions(), admin.email) {
            Ok(_) => redirect("/blogs"),
            Err(e) => {
                log::error!("Failed to start admin session: {e}");
                HttpResponse::InternalServerError().finish()
            }
        },
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Invalid email or password.").send();
            redirect("/signin")
        }
        Err(err) => {
            log::error!("Failed to sign in: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/logout")]
pub async fn logout(_admin: AuthenticatedAdmin, identity: Identity) -> impl Responder {
    identity.logout();
    FlashMessage::info("Signed out.").send();
    redirect("/signin")
}
