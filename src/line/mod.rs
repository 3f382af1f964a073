// =============================================================================
// LINE Messaging API — webhook verification, payloads, replies
// =============================================================================

pub mod client;
pub mod events;
pub mod messages;
pub mod signature;

pub use client::LineClient;
pub use events::WebhookPayload;

/// Header carrying the webhook body signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";
