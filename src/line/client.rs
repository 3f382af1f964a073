// =============================================================================
// LINE reply client
// =============================================================================
//
// SECURITY: the channel access token is sent as a bearer header and is never
// logged.
// =============================================================================

use std::time::Duration;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct LineClient {
    base_url: String,
    access_token: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyRequest<'a> {
    reply_token: &'a str,
    messages: &'a [Value],
}

impl LineClient {
    pub fn new(
        base_url: impl Into<String>,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build LINE http client")?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(base_url = %base_url, "LineClient initialised");

        Ok(Self {
            base_url,
            access_token: access_token.into(),
            client,
        })
    }

    pub fn is_configured(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// POST /v2/bot/message/reply.
    #[instrument(
        skip(self, reply_token, messages),
        fields(count = messages.len()),
        name = "line::reply"
    )]
    pub async fn reply(&self, reply_token: &str, messages: &[Value]) -> Result<()> {
        if !self.is_configured() {
            anyhow::bail!("LINE channel access token is not configured");
        }

        let url = format!("{}/v2/bot/message/reply", self.base_url);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(&ReplyRequest {
                reply_token,
                messages,
            })
            .send()
            .await
            .context("POST /v2/bot/message/reply request failed")?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("LINE reply returned {status}: {body}");
        }

        debug!("reply delivered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_request_shape() {
        let messages = vec![serde_json::json!({ "type": "text", "text": "hi" })];
        let body = serde_json::to_value(ReplyRequest {
            reply_token: "tok",
            messages: &messages,
        })
        .unwrap();
        assert_eq!(body["replyToken"], "tok");
        assert_eq!(body["messages"][0]["text"], "hi");
    }

    #[tokio::test]
    async fn unconfigured_client_refuses_to_send() {
        let client = LineClient::new("https://api.line.me/", "", Duration::from_secs(1)).unwrap();
        assert!(!client.is_configured());
        let err = client.reply("tok", &[]).await.unwrap_err();
        assert!(err.to_string().contains("not configured"));
    }
}
