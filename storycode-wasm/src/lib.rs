//! WASM bindings for storycode — powers the single-page editor.
//!
//! The host page owns the network: it calls `begin_generation`, performs the
//! `fetch` with the returned body, then reports back through `complete` or
//! `fail`. All state transitions stay in the Rust view-model.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use storycode::core::config::ClientConfig;
use storycode::core::service::{decode_response, ServiceError};
use storycode::core::view::{EditorView, RequestSeq, Settlement};
use storycode::schema::source::SNIPPET_LANGUAGE;
use storycode::schema::style::StylePreset;
use storycode::schema::wire::StoryRequest;

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct OutboundRequest<'a> {
    seq: u64,
    endpoint: &'a str,
    body: &'a StoryRequest,
}

#[derive(serde::Serialize)]
struct PresetInfo {
    label: String,
    phrase: String,
}

// ---------------------------------------------------------------------------
// StoryEditor — the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct StoryEditor {
    view: EditorView,
    endpoint: String,
}

#[wasm_bindgen]
impl StoryEditor {
    /// Create an editor. `config_ron` is an optional client config in RON;
    /// an empty or missing value uses the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_ron: Option<String>) -> Result<StoryEditor, JsError> {
        let config = match config_ron.as_deref().map(str::trim) {
            Some(src) if !src.is_empty() => ClientConfig::parse_ron(src)
                .map_err(|e| JsError::new(&format!("Config parse error: {e}")))?,
            _ => ClientConfig::default(),
        };
        Ok(StoryEditor {
            view: EditorView::new(config.style),
            endpoint: config.endpoint,
        })
    }

    pub fn source(&self) -> String {
        self.view.source().to_string()
    }

    /// Editor change hook. `undefined` from the editor clears the source.
    pub fn set_source(&mut self, value: Option<String>) {
        self.view.on_source_change(value);
    }

    pub fn narrative(&self) -> String {
        self.view.narrative().to_string()
    }

    pub fn is_loading(&self) -> bool {
        self.view.is_loading()
    }

    pub fn trigger_label(&self) -> String {
        self.view.trigger_label().to_string()
    }

    pub fn endpoint(&self) -> String {
        self.endpoint.clone()
    }

    pub fn language() -> String {
        SNIPPET_LANGUAGE.to_string()
    }

    pub fn style(&self) -> String {
        self.view.style().as_str().to_string()
    }

    /// Set the style from a preset label or a free-form phrase.
    pub fn set_style(&mut self, name: &str) {
        self.view.set_style(StylePreset::from_name(name));
    }

    /// Pick a named preset from a seed and make it current.
    pub fn random_style(&mut self, seed: u64) -> String {
        let mut rng = StdRng::seed_from_u64(seed);
        let style = StylePreset::random(&mut rng);
        let label = style.label().to_string();
        self.view.set_style(style);
        label
    }

    /// Return JSON array of `{label, phrase}` for the named presets.
    pub fn style_presets() -> String {
        let presets: Vec<PresetInfo> = StylePreset::BUILT_IN
            .iter()
            .map(|p| PresetInfo {
                label: p.label().to_string(),
                phrase: p.as_str().to_string(),
            })
            .collect();
        serde_json::to_string(&presets).unwrap_or_else(|_| "[]".to_string())
    }

    /// Start a request. Returns `{seq, endpoint, body}` as JSON, or
    /// `undefined` while one is already in flight.
    pub fn begin_generation(&mut self) -> Result<Option<String>, JsError> {
        let Some(pending) = self.view.on_generate_requested() else {
            return Ok(None);
        };
        let outbound = OutboundRequest {
            seq: pending.seq.0,
            endpoint: &self.endpoint,
            body: &pending.body,
        };
        match serde_json::to_string(&outbound) {
            Ok(json) => Ok(Some(json)),
            Err(e) => {
                // Settle so the trigger does not stay disabled forever.
                self.view
                    .settle(pending.seq, Err(ServiceError::Encode(e.to_string())));
                Err(JsError::new(&format!("Serialization error: {e}")))
            }
        }
    }

    /// Hand back the HTTP status and body of request `seq`.
    /// Returns false if the completion was stale and ignored.
    pub fn complete(&mut self, seq: u64, status: u16, body: &str) -> bool {
        let result = decode_response(status, body);
        matches!(
            self.view.settle(RequestSeq(seq), result),
            Settlement::Applied(_)
        )
    }

    /// Report a transport failure (fetch rejected) for request `seq`.
    pub fn fail(&mut self, seq: u64, reason: &str) -> bool {
        let result = Err(ServiceError::Transport(reason.to_string()));
        matches!(
            self.view.settle(RequestSeq(seq), result),
            Settlement::Applied(_)
        )
    }
}
