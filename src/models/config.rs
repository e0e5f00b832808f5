use serde::Deserialize;

/// Configuration for the admin panel, loaded from `config/default.yaml` and
/// `APP__*` environment variables.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind the HTTP server to.
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Path of the SQLite database file.
    pub database_url: String,
    /// Key material for session and flash cookies, at least 64 bytes.
    pub secret: String,
    /// Glob root for Tera templates.
    #[serde(default = "default_templates_dir")]
    pub templates_dir: String,
    pub admin: AdminConfig,
    #[serde(default)]
    pub media: MediaConfig,
}

/// Credentials of the single administrator.
#[derive(Clone, Debug, Deserialize)]
pub struct AdminConfig {
    pub email: String,
    /// Argon2 PHC string, e.g. `$argon2id$v=19$...`.
    pub password_hash: String,
}

/// Settings of the hosted media store used for blog images.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct MediaConfig {
    /// Unsigned upload endpoint, e.g. `https://api.cloudinary.com/v1_1/<cloud>/image/upload`.
    pub upload_url: Option<String>,
    pub upload_preset: Option<String>,
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_templates_dir() -> String {
    "templates".to_string()
}
