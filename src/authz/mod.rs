//! Access decision evaluation over individual- and group-scoped rules.
//!
//! Precedence: an individual rule for the actor always wins, in either
//! direction. With no individual rule, a matching deny on any of the actor's
//! groups wins regardless of iteration order.
//!
//! When no rule matches at all the answer is **Allow** (fail-open). This is
//! deliberate: callers rely on unruled paths staying open, and switching to
//! fail-closed needs product sign-off, not a code change.

pub mod engine;

pub use engine::{effective_denials, evaluate, DeniedAction};
