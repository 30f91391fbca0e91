//! StoryCode — turn a code snippet into a character-driven narrative.
//!
//! The crate is the client half of the system: an editor view-model that
//! owns the source text, the returned story and the loading flag, plus the
//! transport that carries one `{code, style}` request to a remote story
//! service and brings back `{story}`.

pub mod core;
#[cfg(feature = "native")]
pub mod logging;
pub mod schema;
