/// Configuration management for the posts service
///
/// Configuration is loaded from environment variables with development
/// defaults; production deployments must set the guarded values explicitly.
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application settings
    pub app: AppConfig,
    /// CORS configuration
    pub cors: CorsConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Authentication configuration
    pub auth: AuthConfig,
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application environment (development, staging, production)
    pub env: String,
    /// Server host to bind to
    pub host: String,
    /// Server port to bind to
    pub port: u16,
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma-separated list of allowed origins
    pub allowed_origins: String,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    pub url: String,
    /// Max connections in pool
    pub max_connections: u32,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for signing and validating bearer tokens
    pub jwt_secret: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            app: AppConfig {
                env: app_env.clone(),
                host: std::env::var("POSTS_SERVICE_HOST")
                    .unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("POSTS_SERVICE_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
            },
            cors: {
                let allowed_origins = match std::env::var("CORS_ALLOWED_ORIGINS") {
                    Ok(value) => value,
                    Err(_) if app_env.eq_ignore_ascii_case("production") => {
                        return Err("CORS_ALLOWED_ORIGINS must be set in production".to_string())
                    }
                    Err(_) => "http://localhost:3000".to_string(),
                };

                if app_env.eq_ignore_ascii_case("production") && allowed_origins.trim() == "*" {
                    return Err("CORS_ALLOWED_ORIGINS cannot be '*' in production".to_string());
                }

                CorsConfig { allowed_origins }
            },
            database: DatabaseConfig {
                url: std::env::var("DATABASE_URL")
                    .unwrap_or_else(|_| "postgresql://localhost/posts".to_string()),
                max_connections: std::env::var("DATABASE_MAX_CONNECTIONS")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(10),
            },
            auth: {
                let jwt_secret = match std::env::var("JWT_SECRET") {
                    Ok(value) => value,
                    Err(_) if app_env.eq_ignore_ascii_case("production") => {
                        return Err("JWT_SECRET must be set in production".to_string())
                    }
                    Err(_) => "insecure-dev-secret".to_string(),
                };

                if app_env.eq_ignore_ascii_case("production") && jwt_secret.trim().len() < 32 {
                    return Err(
                        "JWT_SECRET must be at least 32 characters in production".to_string()
                    );
                }

                AuthConfig { jwt_secret }
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clear_config_env() {
        std::env::remove_var("APP_ENV");
        std::env::remove_var("POSTS_SERVICE_HOST");
        std::env::remove_var("POSTS_SERVICE_PORT");
        std::env::remove_var("CORS_ALLOWED_ORIGINS");
        std::env::remove_var("DATABASE_URL");
        std::env::remove_var("DATABASE_MAX_CONNECTIONS");
        std::env::remove_var("JWT_SECRET");
    }

    #[test]
    #[serial_test::serial]
    fn development_defaults() {
        clear_config_env();

        let config = Config::from_env().unwrap();
        assert_eq!(config.app.env, "development");
        assert_eq!(config.app.host, "0.0.0.0");
        assert_eq!(config.app.port, 8080);
        assert_eq!(config.cors.allowed_origins, "http://localhost:3000");
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.auth.jwt_secret, "insecure-dev-secret");
    }

    #[test]
    #[serial_test::serial]
    fn production_requires_jwt_secret() {
        clear_config_env();
        std::env::set_var("APP_ENV", "production");
        std::env::set_var("CORS_ALLOWED_ORIGINS", "https://example.com");

        assert!(Config::from_env().is_err());

        clear_config_env();
    }

    #[test]
    #[serial_test::serial]
    fn production_rejects_wildcard_cors() {
        clear_config_env();
        std::env::set_var("APP_ENV", "production");
        std::env::set_var("CORS_ALLOWED_ORIGINS", "*");
        std::env::set_var(
            "JWT_SECRET",
            "0123456789abcdef0123456789abcdef-production",
        );

        assert!(Config::from_env().is_err());

        clear_config_env();
    }

    #[test]
    #[serial_test::serial]
    fn env_overrides_are_applied() {
        clear_config_env();
        std::env::set_var("POSTS_SERVICE_PORT", "9090");
        std::env::set_var("DATABASE_MAX_CONNECTIONS", "25");

        let config = Config::from_env().unwrap();
        assert_eq!(config.app.port, 9090);
        assert_eq!(config.database.max_connections, 25);

        clear_config_env();
    }
}
