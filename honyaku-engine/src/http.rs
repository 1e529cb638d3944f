//! LibreTranslate-compatible HTTP backend

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::TranslationBackend;

#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateReply {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Backend speaking the LibreTranslate JSON API
pub struct LibreTranslateBackend {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    source_lang: String,
    target_lang: String,
    timeout: Duration,
}

impl LibreTranslateBackend {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        source_lang: impl Into<String>,
        target_lang: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key,
            source_lang: source_lang.into(),
            target_lang: target_lang.into(),
            timeout,
        }
    }

    fn url(&self, route: &str) -> String {
        format!("{}/{}", self.endpoint, route)
    }
}

#[async_trait]
impl TranslationBackend for LibreTranslateBackend {
    fn provider(&self) -> &str {
        "libretranslate"
    }

    async fn is_available(&self) -> bool {
        match self
            .client
            .get(self.url("languages"))
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(reply) => reply.status().is_success(),
            Err(e) => {
                debug!("engine availability probe failed: {}", e);
                false
            }
        }
    }

    async fn translate(&self, text: &str) -> EngineResult<String> {
        let body = TranslateBody {
            q: text,
            source: &self.source_lang,
            target: &self.target_lang,
            api_key: self.api_key.as_deref(),
        };

        let reply = self
            .client
            .post(self.url("translate"))
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await?;

        let status = reply.status();
        if !status.is_success() {
            let detail = reply.text().await.unwrap_or_default();
            return Err(EngineError::ProtocolError(format!(
                "{}: {}",
                status,
                detail.trim()
            )));
        }

        let parsed: TranslateReply = reply
            .json()
            .await
            .map_err(|e| EngineError::ProtocolError(e.to_string()))?;
        Ok(parsed.translated_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = TranslateBody {
            q: "こんにちは",
            source: "ja",
            target: "en",
            api_key: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(json, r#"{"q":"こんにちは","source":"ja","target":"en"}"#);
    }

    #[test]
    fn test_reply_parsing() {
        let parsed: TranslateReply =
            serde_json::from_str(r#"{"translatedText":"Hello"}"#).unwrap();
        assert_eq!(parsed.translated_text, "Hello");
    }

    #[test]
    fn test_endpoint_trailing_slash_normalized() {
        let backend = LibreTranslateBackend::new(
            "http://localhost:5000/",
            None,
            "ja",
            "en",
            Duration::from_secs(5),
        );
        assert_eq!(backend.url("translate"), "http://localhost:5000/translate");
    }
}
