// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Lumen agent.
//!
//! Carries chat protocol envelopes (`POST /v1/chat`) and structured image
//! requests (`POST /v1/generate`) into the [`lumen_agent::Agent`] and returns
//! the replies it emits in the HTTP response.

pub mod auth;
pub mod handlers;
pub mod server;
pub mod sink;

pub use auth::AuthConfig;
pub use handlers::{ChatReplies, GenerateRequest};
pub use server::{GatewayState, build_router, start_server};
pub use sink::CollectingSink;
