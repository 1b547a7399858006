use std::env;

/// Token-signing configuration shared by the auth handlers.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub token_secret: String,
    pub token_ttl_seconds: u64,
}

/// Reads the token configuration from the environment.
/// Panics when TOKEN_SECRET is missing: the service must not start while it
/// cannot sign or verify tokens.
pub fn get_auth_config() -> AuthConfig {
    let token_secret = env::var("TOKEN_SECRET").expect(
        "TOKEN_SECRET environment variable is required. \
         Generate a secret with: openssl rand -base64 32",
    );

    let token_ttl_seconds = env::var("TOKEN_TTL_SECONDS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(86400); // Default: 24 hours

    AuthConfig {
        token_secret,
        token_ttl_seconds,
    }
}

/// Seed identity for the admin account created at startup when no admin
/// with this username exists yet.
#[derive(Debug, Clone)]
pub struct BootstrapAdmin {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Reads the bootstrap identity from DEFAULT_ADMIN_{USERNAME,EMAIL,PASSWORD},
/// with well-known development defaults. Deployments expose the service to
/// the internet only after overriding DEFAULT_ADMIN_PASSWORD.
pub fn get_bootstrap_admin() -> BootstrapAdmin {
    BootstrapAdmin {
        username: env::var("DEFAULT_ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
        email: env::var("DEFAULT_ADMIN_EMAIL")
            .unwrap_or_else(|_| "admin@jobdesk.local".to_string()),
        password: env::var("DEFAULT_ADMIN_PASSWORD").unwrap_or_else(|_| "jobdesk-admin".to_string()),
    }
}
