//! JSON-RPC 2.0 bridge to the hosting marketing page.
//!
//! On web builds the site can be embedded in an iframe; the parent page drives the
//! strategy panel and listens for state changes over `postMessage`. Native builds run
//! the same request handling with a no-op transport.
//!
//! ## Message Flow
//!
//! ```text
//! Host page (parent window)  <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ handle_rpc_request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ──────┤
//! ```
//!
//! ## Methods
//!
//! - `request_strategy { niche }` → `{ accepted }`: queue a strategy generation
//! - `get_strategy_state` → `{ state, result }`: `idle` | `loading` | `success` | `error`
//! - `get_active_node` → `{ active }`: hovered benefit id or `null`
//!
//! ## Notifications
//!
//! - `strategy_state_changed { state, result }`
//! - `active_node_changed { active }`
//!
//! ## Error Handling
//!
//! - `-32700`: Parse error
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params

/// Message queue, request handlers and outgoing notification flushing.
pub mod web_rpc;
