/// Editor view integration tests — the request cycle against scripted services.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use storycode::core::dispatch::spawn_generation;
use storycode::core::service::{ServiceError, StoryService};
use storycode::core::view::{
    EditorView, Outcome, RequestState, ResultPane, Settlement, FAILURE_MESSAGE,
};
use storycode::schema::source::DEFAULT_SNIPPET;
use storycode::schema::wire::{StoryRequest, StoryResponse};

/// Holds every request until the test releases it.
struct GatedService {
    calls: AtomicUsize,
    release: Mutex<Receiver<Result<StoryResponse, ServiceError>>>,
}

impl GatedService {
    fn new() -> (Arc<Self>, Sender<Result<StoryResponse, ServiceError>>) {
        let (tx, rx) = mpsc::channel();
        let service = Arc::new(Self {
            calls: AtomicUsize::new(0),
            release: Mutex::new(rx),
        });
        (service, tx)
    }
}

impl StoryService for GatedService {
    fn generate(&self, _request: &StoryRequest) -> Result<StoryResponse, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.release
            .lock()
            .unwrap()
            .recv()
            .unwrap_or_else(|_| Err(ServiceError::Transport("gate closed".to_string())))
    }
}

/// Answers immediately from a script.
struct Scripted(fn(&StoryRequest) -> Result<StoryResponse, ServiceError>);

impl StoryService for Scripted {
    fn generate(&self, request: &StoryRequest) -> Result<StoryResponse, ServiceError> {
        (self.0)(request)
    }
}

#[test]
fn trigger_while_loading_issues_no_second_request() {
    let (service, release) = GatedService::new();
    let mut view = EditorView::default();

    let pending = view.on_generate_requested().unwrap();
    let rx = spawn_generation(service.clone(), pending);

    for _ in 0..5 {
        assert!(view.on_generate_requested().is_none());
        assert!(view.is_loading());
        assert!(!view.trigger_enabled());
    }

    release
        .send(Ok(StoryResponse {
            story: "Only one voyage.".to_string(),
        }))
        .unwrap();
    let completion = rx.recv().unwrap();
    view.settle(completion.seq, completion.result);

    assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    assert_eq!(view.narrative(), "Only one voyage.");
}

#[test]
fn loading_spans_the_whole_request_on_failure() {
    let (service, release) = GatedService::new();
    let mut view = EditorView::default();

    let pending = view.on_generate_requested().unwrap();
    assert!(view.is_loading());
    assert_eq!(view.result_pane(), ResultPane::Loading);

    let rx = spawn_generation(service, pending);
    assert!(view.is_loading());

    release
        .send(Err(ServiceError::Transport("connection refused".to_string())))
        .unwrap();
    let completion = rx.recv().unwrap();
    assert_eq!(
        view.settle(completion.seq, completion.result),
        Settlement::Applied(Outcome::Failed)
    );

    assert!(!view.is_loading());
    assert_eq!(view.state(), RequestState::Idle);
    assert_eq!(view.result_pane(), ResultPane::Narrative(FAILURE_MESSAGE));
}

#[test]
fn retry_after_failure_starts_a_fresh_cycle() {
    let failing = Scripted(|_| Err(ServiceError::Transport("down".to_string())));
    let working = Scripted(|req| {
        Ok(StoryResponse {
            story: format!("{} lines of adventure", req.code.lines().count()),
        })
    });

    let mut view = EditorView::default();
    assert_eq!(view.generate(&failing), Some(Outcome::Failed));
    assert_eq!(view.narrative(), FAILURE_MESSAGE);

    assert_eq!(view.generate(&working), Some(Outcome::Succeeded));
    assert_eq!(view.narrative(), "6 lines of adventure");
    assert_eq!(view.last_outcome(), Some(Outcome::Succeeded));
}

#[test]
fn narrative_is_overwritten_not_appended() {
    let service = Scripted(|req| {
        Ok(StoryResponse {
            story: req.code.to_uppercase(),
        })
    });

    let mut view = EditorView::default().with_source("first");
    view.generate(&service);
    assert_eq!(view.narrative(), "FIRST");

    view.on_source_change(Some("second".to_string()));
    view.generate(&service);
    assert_eq!(view.narrative(), "SECOND");
}

#[test]
fn edits_during_flight_do_not_change_the_sent_request() {
    let mut view = EditorView::default();
    let pending = view.on_generate_requested().unwrap();
    view.on_source_change(Some("edited mid-flight".to_string()));

    assert_eq!(pending.body.code, DEFAULT_SNIPPET);
    assert_eq!(view.source(), "edited mid-flight");

    view.settle(
        pending.seq,
        Ok(StoryResponse {
            story: "done".to_string(),
        }),
    );
    assert_eq!(view.source(), "edited mid-flight");
}
