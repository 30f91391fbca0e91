//! Runs a story request off the UI thread.

use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;

use crate::core::service::{ServiceError, StoryService};
use crate::core::view::{PendingRequest, RequestSeq};
use crate::schema::wire::StoryResponse;

/// A settled request, ready to hand to `EditorView::settle`.
#[derive(Debug)]
pub struct Completion {
    pub seq: RequestSeq,
    pub result: Result<StoryResponse, ServiceError>,
}

/// Issue `pending` on a worker thread.
///
/// The returned receiver yields exactly one `Completion`. If the worker
/// cannot be spawned the failure arrives on the same channel.
pub fn spawn_generation(
    service: Arc<dyn StoryService>,
    pending: PendingRequest,
) -> Receiver<Completion> {
    let (tx, rx) = mpsc::channel();
    let seq = pending.seq;
    let worker_tx = tx.clone();

    let spawned = thread::Builder::new()
        .name(format!("story-request-{}", seq.0))
        .spawn(move || {
            let result = service.generate(&pending.body);
            // The receiver may be gone if the shell quit mid-request.
            let _ = worker_tx.send(Completion { seq, result });
        });

    if let Err(e) = spawned {
        tracing::error!(seq = seq.0, error = %e, "Failed to spawn story request worker");
        let _ = tx.send(Completion {
            seq,
            result: Err(ServiceError::Transport(format!("failed to spawn worker: {e}"))),
        });
    }

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::view::{EditorView, Outcome, Settlement};
    use crate::schema::wire::StoryRequest;
    use std::sync::Mutex;

    struct Echo {
        seen: Mutex<Vec<StoryRequest>>,
    }

    impl StoryService for Echo {
        fn generate(&self, request: &StoryRequest) -> Result<StoryResponse, ServiceError> {
            self.seen.lock().unwrap().push(request.clone());
            Ok(StoryResponse {
                story: format!("A tale told as {}", request.style),
            })
        }
    }

    #[test]
    fn completion_settles_the_view() {
        let service = Arc::new(Echo {
            seen: Mutex::new(Vec::new()),
        });
        let mut view = EditorView::default();
        let pending = view.on_generate_requested().unwrap();

        let rx = spawn_generation(service.clone(), pending);
        assert!(view.is_loading());

        let completion = rx.recv().unwrap();
        assert_eq!(
            view.settle(completion.seq, completion.result),
            Settlement::Applied(Outcome::Succeeded)
        );
        assert_eq!(view.narrative(), "A tale told as a dramatic pirate adventure");
        assert!(!view.is_loading());
        assert_eq!(service.seen.lock().unwrap().len(), 1);
    }
}
