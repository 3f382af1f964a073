// =============================================================================
// HTTP surface — LINE webhook plus a small admin REST API
// =============================================================================

pub mod auth;
pub mod rest;
pub mod webhook;
