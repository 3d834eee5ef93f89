//! JSON-RPC 2.0 bridge between the portfolio page and the embedded room.
//!
//! Messages travel over iframe postMessage in both directions. The host page can
//! drive the desktop with the same actions the in-app buttons emit.
//!
//! ## Architecture
//!
//! The RPC system uses standard JSON-RPC 2.0 protocol with:
//! - **Requests**: Expect responses with matching IDs
//! - **Notifications**: One-way messages without responses
//! - **Responses**: Reply to requests with results or errors
//!
//! ## Message Flow
//!
//! ```text
//! React (Parent Window)  <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Process request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! ## Adding New RPC Methods
//!
//! Desktop commands belong in `parse_desktop_action()`, which turns a method and
//! its params into a [`DesktopAction`](crate::desktop::actions::DesktopAction).
//! The desktop plugin applies it exactly as it applies in-app button presses.
//! Read-only queries get a `handle_*` function in `handle_rpc_request()`:
//!
//! ```rust,ignore
//! "get_windows" => handle_get_windows(&context.windows),
//! ```
//!
//! From the host page:
//!
//! ```typescript
//! iframe.contentWindow.postMessage(JSON.stringify({
//!   jsonrpc: "2.0",
//!   method: "open_panel",
//!   params: { panel: "projects" },
//!   id: 1
//! }), "*");
//! ```
//!
//! ## Sending Notifications from Bevy
//!
//! ```rust,ignore
//! fn your_system(mut rpc: ResMut<WebRpcInterface>) {
//!     rpc.send_notification("view_mode_changed", json!({ "mode": "desktop" }));
//! }
//! ```
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error
//!
//! ## Existing Methods
//!
//! ### Desktop Actions
//! - `return_to_room`: Power off the desktop and fly back to the room
//! - `open_panel`, `close_panel`, `toggle_minimize`, `toggle_maximize`, `focus_panel`:
//!   window operations taking `{ "panel": "about" | "resume" | "projects" | "skills" | "contact" | "spotify" }`
//! - `download_resume`, `open_resume_fullscreen`: Resume links
//!
//! Desktop actions are also accepted as notifications (no ID). Window operations
//! are ignored unless the desktop is showing.
//!
//! ### Queries
//! - `get_view_mode`: Current view mode (`room`, `transitioning_in`, `desktop`, `transitioning_out`)
//! - `get_windows`: Open windows with their minimized/maximized/focused flags
//! - `get_fps`: Retrieve current frame rate
//!
//! ### Notifications Sent
//! - `loading_progress`, `interactive_object`, `view_mode_changed`, `fps_update`

/// JSON-RPC 2.0 bidirectional communication system for React integration.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
