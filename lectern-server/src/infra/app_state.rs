use std::{fmt, sync::Arc};

use lectern_config::{Config, ContentConfig};
use lectern_core::{
    application::{AppUnitOfWork, CourseContentService},
    domain::content_tree::{AttachmentLimits, NodeValidator, TreeSynchronizer},
};

#[derive(Clone)]
pub struct AppState {
    pub content: Arc<CourseContentService>,
    pub config: Arc<Config>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire the authoring service over `unit_of_work` using the content
    /// limits from `config`.
    pub fn new(unit_of_work: Arc<AppUnitOfWork>, config: Arc<Config>) -> Self {
        let synchronizer = synchronizer_for(&config.content);
        let content =
            Arc::new(CourseContentService::new(unit_of_work, synchronizer));
        Self { content, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

pub fn synchronizer_for(content: &ContentConfig) -> TreeSynchronizer {
    let limits = AttachmentLimits {
        max_bytes: content.max_attachment_bytes,
        allowed_mime_prefixes: content.allowed_mime_prefixes.clone(),
    };
    TreeSynchronizer::new(NodeValidator::new(limits))
}
