//! Infrastructure layer for realism-enhancer
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod codec;
pub mod config;
pub mod editor;
pub mod logging;
pub mod openai;
pub mod vision;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, ConfigValidationError, FileConfig, FileEditorConfig,
    FileEnhancementConfig, FileReasoningConfig, FileVisionConfig,
};
pub use editor::HttpImageEditor;
pub use logging::JsonlRunLogger;
pub use openai::client::OpenAiChatClient;
pub use vision::{VisionSceneClassifier, VisionSignalDetector};
