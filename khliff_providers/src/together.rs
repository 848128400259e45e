use async_trait::async_trait;
use khliff_core::{ChatMessage, CompletionParams, LLMProvider, LLMResponse, Usage};
use reqwest::Client;
use serde_json::json;
use tracing::{debug, info};

/// Client for Together AI's OpenAI-compatible chat completions endpoint.
pub struct TogetherProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TogetherProvider {
    pub fn new(api_key: String) -> Self {
        info!("Creating TogetherProvider");
        Self {
            client: Client::new(),
            api_key,
            base_url: "https://api.together.xyz/v1".to_string(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request(messages: &[ChatMessage], params: &CompletionParams) -> serde_json::Value {
        json!({
            "model": params.model,
            "messages": messages,
            "temperature": params.temperature,
            "max_tokens": params.max_tokens,
        })
    }

    /// Extract the first choice's text and optional token usage.
    fn parse_response(response: &serde_json::Value) -> anyhow::Result<LLMResponse> {
        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Invalid response format: missing content"))?
            .to_string();

        let usage = response["usage"].as_object().map(|u| Usage {
            prompt_tokens: u32::try_from(u["prompt_tokens"].as_u64().unwrap_or(0)).unwrap_or(0),
            completion_tokens: u32::try_from(u["completion_tokens"].as_u64().unwrap_or(0))
                .unwrap_or(0),
            total_tokens: u32::try_from(u["total_tokens"].as_u64().unwrap_or(0)).unwrap_or(0),
        });

        Ok(LLMResponse { content, usage })
    }
}

#[async_trait]
impl LLMProvider for TogetherProvider {
    async fn chat(
        &self,
        messages: &[ChatMessage],
        params: &CompletionParams,
    ) -> anyhow::Result<LLMResponse> {
        let request = Self::build_request(messages, params);

        info!(
            "Sending request to Together API: model={}, messages={}",
            params.model,
            messages.len()
        );

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Together API returned {status}: {}", body.trim());
        }

        let body = response.json::<serde_json::Value>().await?;
        let parsed = Self::parse_response(&body)?;

        if let Some(usage) = &parsed.usage {
            debug!(
                "Tokens: {} prompt + {} completion = {} total",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }
        info!("Received response from Together API");

        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use khliff_core::Role;

    #[test]
    fn request_carries_sampling_params() {
        let messages = vec![
            ChatMessage::system("be brief"),
            ChatMessage {
                role: Role::User,
                content: "hello".to_string(),
            },
        ];
        let params = CompletionParams::default();

        let request = TogetherProvider::build_request(&messages, &params);

        assert_eq!(request["model"], params.model.as_str());
        assert_eq!(request["max_tokens"], 1024);
        assert!((request["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert_eq!(request["messages"][0]["role"], "system");
        assert_eq!(request["messages"][1]["role"], "user");
        assert_eq!(request["messages"][1]["content"], "hello");
    }

    #[test]
    fn parses_first_choice() {
        let body = json!({
            "choices": [
                {"message": {"role": "assistant", "content": "first"}},
                {"message": {"role": "assistant", "content": "second"}}
            ],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
        });

        let parsed = TogetherProvider::parse_response(&body).unwrap();
        assert_eq!(parsed.content, "first");
        let usage = parsed.usage.unwrap();
        assert_eq!(usage.total_tokens, 15);
    }

    #[test]
    fn missing_content_is_an_error() {
        let body = json!({"choices": []});
        let err = TogetherProvider::parse_response(&body).unwrap_err();
        assert!(err.to_string().contains("missing content"));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let provider =
            TogetherProvider::new("key".to_string()).with_base_url("http://localhost:9/v1/".into());
        assert_eq!(provider.endpoint(), "http://localhost:9/v1/chat/completions");
    }

    #[tokio::test]
    async fn unreachable_endpoint_reports_error() {
        let provider =
            TogetherProvider::new("key".to_string()).with_base_url("http://127.0.0.1:9".into());
        let result = provider
            .chat(&[ChatMessage::system("x")], &CompletionParams::default())
            .await;
        assert!(result.is_err());
    }
}
