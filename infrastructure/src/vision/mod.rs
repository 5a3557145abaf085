//! Vision-backed analysis adapters
//!
//! Implement the classifier and detector ports by prompting the vision
//! gateway and parsing its JSON replies with the domain parsers.

mod classifier;
mod detector;

pub use classifier::VisionSceneClassifier;
pub use detector::VisionSignalDetector;

#[cfg(test)]
pub(crate) mod test_gateway {
    use async_trait::async_trait;
    use realism_application::ports::llm_gateway::{GatewayError, VisionGateway};
    use realism_domain::ImageData;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Vision gateway replaying scripted replies.
    pub(crate) struct ScriptedVision {
        replies: Mutex<VecDeque<Result<String, GatewayError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedVision {
        pub(crate) fn new(replies: Vec<Result<String, GatewayError>>) -> Self {
            Self {
                replies: Mutex::new(VecDeque::from(replies)),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VisionGateway for ScriptedVision {
        async fn describe(
            &self,
            _system_prompt: &str,
            prompt: &str,
            _image: &ImageData,
        ) -> Result<String, GatewayError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(GatewayError::Other("No more replies".to_string())))
        }
    }
}
