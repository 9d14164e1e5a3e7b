use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

use crate::authz::UnscopedPolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub security: SecurityConfig,
    pub authz: AuthzConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub enable_request_logging: bool,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    pub enable_audit_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthzConfig {
    /// Policy for capability-holding callers with no regional role.
    /// One policy, applied uniformly across all handlers.
    pub unscoped_policy: UnscopedPolicy,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("LEDEN_JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("LEDEN_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_ENABLE_AUDIT_LOGGING") {
            self.security.enable_audit_logging =
                v.parse().unwrap_or(self.security.enable_audit_logging);
        }
        if let Ok(v) = env::var("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }
        if let Ok(v) = env::var("API_MAX_REQUEST_SIZE_BYTES") {
            self.api.max_request_size_bytes =
                v.parse().unwrap_or(self.api.max_request_size_bytes);
        }
        if let Ok(v) = env::var("AUTHZ_UNSCOPED_POLICY") {
            self.authz.unscoped_policy = v.parse().unwrap_or(self.authz.unscoped_policy);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 10 * 1024 * 1024, // 10MB
            },
            security: SecurityConfig {
                // Development-only default; production requires LEDEN_JWT_SECRET
                jwt_secret: "dev-secret-change-me".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
                enable_audit_logging: false,
            },
            authz: AuthzConfig {
                unscoped_policy: UnscopedPolicy::EmptyScope,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                enable_request_logging: true,
                max_request_size_bytes: 5 * 1024 * 1024, // 5MB
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
                enable_audit_logging: true,
            },
            authz: AuthzConfig {
                unscoped_policy: UnscopedPolicy::EmptyScope,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                enable_request_logging: false,
                max_request_size_bytes: 2 * 1024 * 1024, // 2MB
            },
            security: SecurityConfig {
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
                enable_audit_logging: true,
            },
            authz: AuthzConfig {
                unscoped_policy: UnscopedPolicy::EmptyScope,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_defaults() {
        let config = AppConfig::development();
        assert_eq!(config.environment, Environment::Development);
        assert!(!config.security.jwt_secret.is_empty());
        assert!(!config.security.enable_audit_logging);
        assert_eq!(config.authz.unscoped_policy, UnscopedPolicy::EmptyScope);
    }

    #[test]
    fn production_requires_explicit_secret() {
        let config = AppConfig::production();
        assert!(config.security.jwt_secret.is_empty());
        assert!(config.security.enable_audit_logging);
        assert_eq!(config.security.jwt_expiry_hours, 4);
    }
}
