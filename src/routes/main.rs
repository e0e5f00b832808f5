use actix_web::{Responder, get};

use crate::domain::auth::AuthenticatedAdmin;
use crate::routes::redirect;

#[get("/")]
pub async fn index(_admin: AuthenticatedAdmin) -> impl Responder {
    redirect("/blogs")
}
