use async_trait::async_trait;
use futures::future::{select, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use wheel_shared::shared_wheel_game::{SpinReply, SpinRequest};
use wheel_shared::wheel::outcome::interpret_response;
use wheel_shared::wheel::{OutcomeError, OutcomeResolver};
use crate::config::{get_auth_token, outcome_timeout_ms, spin_endpoint};

/// Asks the backend which sector wins. One request per spin, no retries.
pub struct HttpOutcomeResolver {
    endpoint: String,
    token: Option<String>,
    timeout_ms: u32,
}

impl HttpOutcomeResolver {
    pub fn new(endpoint: String, token: Option<String>, timeout_ms: u32) -> Self {
        Self { endpoint, token, timeout_ms }
    }

    pub fn from_config() -> Self {
        Self::new(spin_endpoint(), get_auth_token(), outcome_timeout_ms())
    }
}

#[async_trait(?Send)]
impl OutcomeResolver for HttpOutcomeResolver {
    async fn resolve(&self, request: &SpinRequest) -> Result<SpinReply, OutcomeError> {
        let mut builder = Request::post(&self.endpoint).header("Content-Type", "application/json");
        if let Some(token) = &self.token {
            builder = builder.header("Authorization", &format!("Bearer {}", token));
        }
        let request = builder
            .json(request)
            .map_err(|e| OutcomeError::Network(e.to_string()))?;

        let send = Box::pin(request.send());
        let timeout = Box::pin(TimeoutFuture::new(self.timeout_ms));
        let response = match select(send, timeout).await {
            Either::Left((sent, _)) => sent.map_err(|e| OutcomeError::Network(e.to_string()))?,
            Either::Right(_) => {
                log::warn!("Spin request timed out after {} ms", self.timeout_ms);
                return Err(OutcomeError::Timeout(self.timeout_ms));
            }
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| OutcomeError::Network(e.to_string()))?;
        interpret_response(status, &body)
    }
}
