//! Site configuration assets.
//!
//! The manifest names the room model, lighting maps and the external links
//! used by the desktop shell.

/// Site manifest loaded from JSON with built-in fallbacks.
pub mod site_manifest;
