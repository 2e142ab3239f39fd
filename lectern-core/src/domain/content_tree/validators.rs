//! Attachment and scalar field checks run before anything touches a node.

use lectern_model::Attachment;

use super::SyncError;

/// Upper bound used when configuration does not provide one (50 MiB).
pub const DEFAULT_MAX_ATTACHMENT_BYTES: usize = 50 * 1024 * 1024;

/// Mime families a media item can ever carry. Configured prefixes can only
/// narrow these.
pub const MEDIA_MIME_FAMILIES: [&str; 2] = ["image/", "video/"];

/// Limits applied to every attachment consumed by a synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentLimits {
    pub max_bytes: usize,
    /// Lower-case mime prefixes, e.g. `image/`.
    pub allowed_mime_prefixes: Vec<String>,
}

impl Default for AttachmentLimits {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_ATTACHMENT_BYTES,
            allowed_mime_prefixes: vec!["image/".into(), "video/".into()],
        }
    }
}

impl AttachmentLimits {
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct NodeValidator {
    limits: AttachmentLimits,
}

impl NodeValidator {
    pub fn new(limits: AttachmentLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &AttachmentLimits {
        &self.limits
    }

    pub fn validate_attachment(
        &self,
        data: &[u8],
        declared_mime: &str,
    ) -> Result<(), SyncError> {
        if data.len() > self.limits.max_bytes {
            return Err(SyncError::FileTooLarge {
                size: data.len(),
                limit: self.limits.max_bytes,
            });
        }

        let mime = declared_mime.trim().to_ascii_lowercase();
        let accepted = MEDIA_MIME_FAMILIES
            .iter()
            .any(|family| mime.starts_with(family))
            && self
                .limits
                .allowed_mime_prefixes
                .iter()
                .any(|prefix| mime.starts_with(prefix.as_str()));
        if !accepted {
            return Err(SyncError::UnsupportedMime(declared_mime.to_string()));
        }

        Ok(())
    }

    pub fn check(&self, attachment: &Attachment) -> Result<(), SyncError> {
        self.validate_attachment(&attachment.data, &attachment.mime_type)
    }

    pub fn validate_price(&self, price: i64) -> Result<(), SyncError> {
        if price < 0 {
            return Err(SyncError::invalid_field(
                "price",
                format!("must not be negative, got {price}"),
            ));
        }
        Ok(())
    }

    /// Trimmed node name; blank names are rejected.
    pub fn validate_name(&self, name: &str) -> Result<String, SyncError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(SyncError::invalid_field("name", "must not be empty"));
        }
        Ok(trimmed.to_string())
    }

    pub fn validate_font_size(&self, font_size: i32) -> Result<(), SyncError> {
        if font_size <= 0 {
            return Err(SyncError::invalid_field(
                "fontSize",
                format!("must be positive, got {font_size}"),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator(max_bytes: usize) -> NodeValidator {
        NodeValidator::new(AttachmentLimits::default().with_max_bytes(max_bytes))
    }

    #[test]
    fn accepts_image_and_video_mimes() {
        let validator = validator(16);
        assert!(validator.validate_attachment(b"png", "image/png").is_ok());
        assert!(validator.validate_attachment(b"mp4", "video/mp4").is_ok());
        assert!(validator.validate_attachment(b"x", " Image/JPEG ").is_ok());
    }

    #[test]
    fn rejects_other_mimes() {
        let err = validator(16)
            .validate_attachment(b"%PDF", "application/pdf")
            .unwrap_err();
        assert_eq!(err, SyncError::UnsupportedMime("application/pdf".into()));
    }

    #[test]
    fn configured_prefixes_cannot_widen_media_families() {
        let validator = NodeValidator::new(AttachmentLimits {
            max_bytes: 16,
            allowed_mime_prefixes: vec!["application/".into(), "i".into()],
        });

        let err = validator
            .validate_attachment(b"%PDF", "application/pdf")
            .unwrap_err();
        assert_eq!(err, SyncError::UnsupportedMime("application/pdf".into()));

        let err = validator
            .validate_attachment(b"x", "imagination/x")
            .unwrap_err();
        assert_eq!(err, SyncError::UnsupportedMime("imagination/x".into()));

        assert!(validator.validate_attachment(b"png", "image/png").is_ok());
    }

    #[test]
    fn configured_prefixes_narrow_media_families() {
        let validator = NodeValidator::new(AttachmentLimits {
            max_bytes: 16,
            allowed_mime_prefixes: vec!["image/".into()],
        });
        assert!(validator.validate_attachment(b"png", "image/png").is_ok());
        assert!(matches!(
            validator.validate_attachment(b"mp4", "video/mp4"),
            Err(SyncError::UnsupportedMime(_))
        ));
    }

    #[test]
    fn enforces_size_ceiling() {
        let validator = validator(4);
        assert!(validator.validate_attachment(&[0; 4], "image/png").is_ok());

        let err = validator
            .validate_attachment(&[0; 5], "image/png")
            .unwrap_err();
        assert_eq!(err, SyncError::FileTooLarge { size: 5, limit: 4 });
    }

    #[test]
    fn size_is_checked_before_mime() {
        let err = validator(1)
            .validate_attachment(&[0; 2], "text/plain")
            .unwrap_err();
        assert!(matches!(err, SyncError::FileTooLarge { .. }));
    }

    #[test]
    fn scalar_fields() {
        let validator = NodeValidator::default();
        assert!(validator.validate_price(0).is_ok());
        assert!(validator.validate_price(-1).is_err());
        assert!(validator.validate_font_size(12).is_ok());
        assert!(validator.validate_font_size(0).is_err());
    }

    #[test]
    fn names_are_trimmed_and_must_not_be_blank() {
        let validator = NodeValidator::default();
        assert_eq!(validator.validate_name("  Traits ").unwrap(), "Traits");
        for blank in ["", "   ", "\t\n"] {
            assert!(matches!(
                validator.validate_name(blank),
                Err(SyncError::InvalidField { field: "name", .. })
            ));
        }
    }
}
