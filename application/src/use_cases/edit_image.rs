//! Bounded fire-and-poll execution against the editing collaborator.

use crate::config::EditPollParams;
use crate::ports::image_editor::{EditRequest, EditStatus, ImageEditor};
use realism_domain::ImageData;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// How one edit ended.
#[derive(Debug, Clone)]
pub enum EditOutcome {
    Completed(ImageData),
    Failed(String),
    TimedOut { attempts: u32 },
    Cancelled,
}

impl EditOutcome {
    pub fn describe(&self) -> String {
        match self {
            EditOutcome::Completed(_) => "completed".to_string(),
            EditOutcome::Failed(reason) => format!("edit failed: {}", reason),
            EditOutcome::TimedOut { attempts } => {
                format!("edit timed out after {} poll attempts", attempts)
            }
            EditOutcome::Cancelled => "edit cancelled".to_string(),
        }
    }
}

/// Submits once, then polls at a fixed interval up to a bounded number of
/// attempts. Cancellation is observed before submitting, during every wait
/// and while a submit or poll request is in flight.
pub struct EditExecutor {
    editor: Arc<dyn ImageEditor>,
    params: EditPollParams,
}

impl EditExecutor {
    pub fn new(editor: Arc<dyn ImageEditor>, params: EditPollParams) -> Self {
        Self { editor, params }
    }

    pub async fn execute(&self, request: &EditRequest, token: &CancellationToken) -> EditOutcome {
        if token.is_cancelled() {
            return EditOutcome::Cancelled;
        }

        let handle = tokio::select! {
            biased;
            _ = token.cancelled() => return EditOutcome::Cancelled,
            submitted = self.editor.submit(request) => match submitted {
                Ok(handle) => handle,
                Err(e) => return EditOutcome::Failed(e.to_string()),
            },
        };
        debug!("Submitted edit task {}", handle);

        for attempt in 1..=self.params.max_attempts {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!("Edit task {} cancelled while waiting", handle);
                    return EditOutcome::Cancelled;
                }
                _ = tokio::time::sleep(self.params.poll_interval) => {}
            }

            let polled = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!("Edit task {} cancelled while polling", handle);
                    return EditOutcome::Cancelled;
                }
                polled = self.editor.poll(&handle) => polled,
            };
            match polled {
                Ok(EditStatus::Pending) => {}
                Ok(EditStatus::Succeeded(image)) => {
                    debug!("Edit task {} completed after {} polls", handle, attempt);
                    return EditOutcome::Completed(image);
                }
                Ok(EditStatus::Failed(reason)) => return EditOutcome::Failed(reason),
                Err(e) => warn!("Poll {} for task {} failed: {}", attempt, handle, e),
            }
        }

        EditOutcome::TimedOut {
            attempts: self.params.max_attempts,
        }
    }
}
