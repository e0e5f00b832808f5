use std::env;
use std::io;

use actix_files::Files;
use actix_identity::IdentityMiddleware;
use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::Key;
use actix_web::middleware::Logger;
use actix_web::{App, HttpServer, web};
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_flash_messages::storage::CookieMessageStore;
use config::Config;
use dotenvy::dotenv;
use tera::Tera;

use inkpress::db::establish_connection_pool;
use inkpress::media::CloudinaryHost;
use inkpress::models::config::ServerConfig;
use inkpress::repository::DieselRepository;
use inkpress::routes::auth::{logout, signin, signin_page};
use inkpress::routes::blogs::{
    create_blog, delete_blog, edit_blog, new_blog, show_blog, show_blogs, update_blog,
};
use inkpress::routes::categories::{add_category, delete_category, show_categories};
use inkpress::routes::main::index;

/// Admin sessions expire three days after sign in.
const SESSION_TTL_SECS: u64 = 3 * 24 * 60 * 60;

fn io_error<E: std::fmt::Display>(context: &str, err: E) -> io::Error {
    io::Error::other(format!("{context}: {err}"))
}

fn load_config() -> Result<ServerConfig, config::ConfigError> {
    let config_path = env::var("APP_CONFIG").unwrap_or_else(|_| "config/default".to_string());

    Config::builder()
        .add_source(config::File::with_name(&config_path).required(false))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let server_config = load_config().map_err(|e| io_error("Failed to load config", e))?;

    let pool = establish_connection_pool(&server_config.database_url)
        .map_err(|e| io_error("Failed to establish database connection", e))?;
    let repo = DieselRepository::new(pool);

    let media = CloudinaryHost::new(server_config.media.clone())
        .map_err(|e| io_error("Failed to build media client", e))?;
    if server_config.media.upload_url.is_none() || server_config.media.upload_preset.is_none() {
        log::warn!("Media host is not configured; posts with images cannot be saved");
    }

    let tera = Tera::new(&format!("{}/**/*", server_config.templates_dir))
        .map_err(|e| io_error("Failed to parse templates", e))?;

    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| io_error("Invalid session secret", e))?;

    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let bind_address = (server_config.address.clone(), server_config.port);
    log::info!("Starting admin panel on {}:{}", bind_address.0, bind_address.1);

    let repo = web::Data::new(repo);
    let media = web::Data::new(media);
    let tera = web::Data::new(tera);
    let server_config = web::Data::new(server_config);

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(
                IdentityMiddleware::builder()
                    .login_deadline(Some(std::time::Duration::from_secs(SESSION_TTL_SECS)))
                    .build(),
            )
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false)
                    .build(),
            )
            .wrap(Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(signin_page)
            .service(signin)
            .service(logout)
            .service(index)
            .service(show_blogs)
            .service(new_blog)
            .service(create_blog)
            .service(show_blog)
            .service(edit_blog)
            .service(update_blog)
            .service(delete_blog)
            .service(show_categories)
            .service(add_category)
            .service(delete_category)
            .app_data(repo.clone())
            .app_data(media.clone())
            .app_data(tera.clone())
            .app_data(server_config.clone())
    })
    .bind(bind_address)?
    .run()
    .await
}
