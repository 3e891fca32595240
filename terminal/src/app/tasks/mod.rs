//! # Background Tasks
//!
//! Async tasks spawned by handlers; each reports its result back to the app
//! loop as an [`crate::app::events::AppEvent`].

pub(crate) mod discussion;
pub(crate) mod market;
