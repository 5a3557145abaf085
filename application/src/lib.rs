//! Application layer for realism-enhancer
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{EditPollParams, EnhancementParams};
pub use ports::{
    analysis::{DetectionError, SceneClassifier, SignalDetector},
    image_editor::{EditError, EditRequest, EditStatus, ImageEditor, StyleParams, TaskHandle},
    llm_gateway::{GatewayError, ReasoningGateway, VisionGateway},
    progress::{EnhancementProgress, NoProgress},
    run_logger::{NoRunLogger, RunEvent, RunEventLogger},
};
pub use use_cases::analyze_image::AnalyzeImageUseCase;
pub use use_cases::edit_image::{EditExecutor, EditOutcome};
pub use use_cases::enhance_image::{EnhanceError, EnhanceImageInput, EnhanceImageUseCase};
pub use use_cases::route::{
    HeuristicRoutingStrategy, LlmRoutingStrategy, NO_ARTIFACTS_REASONING, Router, RoutingError,
    RoutingStrategy,
};
