//! Daily Spark — client auth gate, AI flows, offline tools and per-user data.
//!
//! ARCHITECTURE
//! ============
//! ```text
//!  auth::SessionSource ──► auth::AuthStateHolder ──► auth::RouteGuard ──► Navigator
//!                              ▲
//!  storage::LocalStorage ──────┘ (entitlement key, favorites)
//!
//!  routes ──► flows ──► llm::LlmChat (Gemini / Anthropic)
//!         ──► tools
//!         ──► services::user_data ──► db (Postgres)
//! ```
//! The auth gate and storage are client-side building blocks; `routes` is
//! the HTTP surface served by the `daily-spark` binary.

pub mod auth;
pub mod db;
pub mod flows;
pub mod llm;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;
pub mod tools;
