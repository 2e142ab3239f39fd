use axum::http::{Method, header::HeaderName};
use thiserror::Error;
use tracing::warn;

use crate::models::{Config, ContentConfig, CorsConfig, MEDIA_MIME_FAMILIES};

#[derive(Debug, Error)]
pub enum ConfigGuardRailError {
    #[error("DATABASE_URL is required unless DEV_MODE is enabled")]
    MissingDatabaseUrl,
    #[error("invalid content configuration: {reason}")]
    InvalidContentConfig { reason: String },
    #[error("invalid CORS configuration: {reason}")]
    InvalidCorsConfig { reason: String },
}

#[derive(Debug, Clone)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(
        &mut self,
        message: S,
        hint: H,
    ) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }

    /// Emit every warning through `tracing`.
    pub fn log(&self) {
        for item in &self.items {
            match &item.hint {
                Some(hint) => warn!(hint = %hint, "{}", item.message),
                None => warn!("{}", item.message),
            }
        }
    }
}

pub fn apply_guard_rails(
    config: &Config,
) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    if config.database.url.is_none() {
        if !config.dev_mode {
            return Err(ConfigGuardRailError::MissingDatabaseUrl);
        }
        warnings.push_with_hint(
            "DATABASE_URL not configured; course trees are kept in memory and lost on restart",
            "Set DATABASE_URL to persist content in Postgres",
        );
    }

    validate_content(&config.content, &mut warnings)?;
    validate_cors(&config.cors)?;

    if config.cors.allow_credentials && config.cors.is_wildcard_included() {
        warnings.push(
            "CORS credentials allowed alongside wildcard origin; browsers will reject such configuration",
        );
    }

    Ok(warnings)
}

fn validate_content(
    content: &ContentConfig,
    warnings: &mut ConfigWarnings,
) -> Result<(), ConfigGuardRailError> {
    if content.max_attachment_bytes == 0 {
        return Err(ConfigGuardRailError::InvalidContentConfig {
            reason: "CONTENT_MAX_ATTACHMENT_BYTES must be greater than zero"
                .into(),
        });
    }

    if content.allowed_mime_prefixes.is_empty() {
        return Err(ConfigGuardRailError::InvalidContentConfig {
            reason:
                "CONTENT_ALLOWED_MIME_PREFIXES must include at least one prefix"
                    .into(),
        });
    }

    if let Some(prefix) = content.allowed_mime_prefixes.iter().find(|prefix| {
        !MEDIA_MIME_FAMILIES
            .iter()
            .any(|family| prefix.starts_with(family))
    }) {
        return Err(ConfigGuardRailError::InvalidContentConfig {
            reason: format!(
                "CONTENT_ALLOWED_MIME_PREFIXES entry '{prefix}' must start with image/ or video/"
            ),
        });
    }

    if content.max_request_bytes < content.max_attachment_bytes {
        warnings.push_with_hint(
            format!(
                "CONTENT_MAX_REQUEST_BYTES ({}) is below the per-attachment limit ({})",
                content.max_request_bytes, content.max_attachment_bytes
            ),
            "Raise CONTENT_MAX_REQUEST_BYTES so a single maximal upload fits in one request",
        );
    }

    Ok(())
}

fn validate_cors(cors: &CorsConfig) -> Result<(), ConfigGuardRailError> {
    if cors.allowed_methods.is_empty() {
        return Err(ConfigGuardRailError::InvalidCorsConfig {
            reason:
                "CORS_ALLOWED_METHODS must include at least one HTTP method"
                    .into(),
        });
    }

    for method in &cors.allowed_methods {
        Method::from_bytes(method.as_bytes()).map_err(|_| {
            ConfigGuardRailError::InvalidCorsConfig {
                reason: format!(
                    "invalid HTTP method `{method}` in CORS_ALLOWED_METHODS"
                ),
            }
        })?;
    }

    for header in &cors.allowed_headers {
        HeaderName::from_bytes(header.as_bytes()).map_err(|_| {
            ConfigGuardRailError::InvalidCorsConfig {
                reason: format!(
                    "invalid header name `{header}` in CORS_ALLOWED_HEADERS"
                ),
            }
        })?;
    }

    Ok(())
}
