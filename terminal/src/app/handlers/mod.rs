//! # UI-Facing Handlers
//!
//! Free functions invoked by the app surface. Handlers validate input,
//! mutate state under the lock, and delegate network work to
//! [`crate::app::tasks`].

pub(crate) mod auth;
pub(crate) mod discussion;
pub(crate) mod market;
pub(crate) mod navigation;
