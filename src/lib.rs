// Library root
// -----------
// This crate exposes a small library surface for the blog CLI. The binary
// (`main.rs`) uses these modules to run the interactive front-end.
//
// Module responsibilities:
// - `api`: blocking HTTP calls against the blog backend, one per endpoint.
// - `controller`: session, current view and the reload-after-mutation flow.
// - `models`: wire types, tag parsing and query construction.
// - `render`: pure post-to-card rendering plus terminal painting.
// - `session`: base URL and token persistence, token subject decoding.
// - `ui`: terminal prompts that drive the controller.
pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod models;
pub mod render;
pub mod session;
pub mod ui;
