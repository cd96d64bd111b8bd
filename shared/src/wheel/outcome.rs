//! The remote decision service is the only authority on who wins.

use async_trait::async_trait;
use thiserror::Error;

use crate::constants::{ALREADY_USED_MESSAGE, NETWORK_ERROR, SPIN_FAILED_MESSAGE};
use crate::shared_wheel_game::{SpinReply, SpinRequest};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OutcomeError {
    #[error("network error: {0}")]
    Network(String),
    #[error("decision service answered with status {0}")]
    Status(u16),
    #[error("could not decode decision service reply: {0}")]
    Malformed(String),
    #[error("outcome request timed out after {0} ms")]
    Timeout(u32),
    #[error("attempt already used")]
    AlreadyUsed,
    #[error("decision service rejected the spin: {0}")]
    Rejected(String),
    #[error("winning index {index} outside 0..{count}")]
    OutOfRange { index: i64, count: usize },
}

impl OutcomeError {
    /// A consumed attempt never becomes spinnable again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::AlreadyUsed)
    }

    pub fn user_message(&self) -> &'static str {
        match self {
            Self::AlreadyUsed => ALREADY_USED_MESSAGE,
            Self::Network(_) | Self::Timeout(_) => NETWORK_ERROR,
            _ => SPIN_FAILED_MESSAGE,
        }
    }
}

/// A validated winner.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub index: usize,
    pub coupon: Option<String>,
}

#[async_trait(?Send)]
pub trait OutcomeResolver {
    async fn resolve(&self, request: &SpinRequest) -> Result<SpinReply, OutcomeError>;
}

/// Asks the resolver for a winner and checks it against the wheel.
pub async fn resolve_outcome<R>(
    resolver: &R,
    request: &SpinRequest,
    option_count: usize,
) -> Result<Outcome, OutcomeError>
where
    R: OutcomeResolver + ?Sized,
{
    let reply = resolver.resolve(request).await?;
    validate_reply(reply, option_count)
}

pub fn validate_reply(reply: SpinReply, option_count: usize) -> Result<Outcome, OutcomeError> {
    if reply.is_ticket_used() {
        return Err(OutcomeError::AlreadyUsed);
    }
    match reply {
        SpinReply::Winner { index, coupon } => {
            if index < 0 || index as usize >= option_count {
                return Err(OutcomeError::OutOfRange { index, count: option_count });
            }
            Ok(Outcome {
                index: index as usize,
                coupon: coupon.filter(|c| !c.trim().is_empty()),
            })
        }
        SpinReply::Rejected { error } => Err(OutcomeError::Rejected(error)),
    }
}

/// Turns a raw HTTP answer into a reply. Error statuses still carry the
/// "ticket usado" marker in their body, so that one is let through.
pub fn interpret_response(status: u16, body: &str) -> Result<SpinReply, OutcomeError> {
    let parsed = serde_json::from_str::<SpinReply>(body);
    if (200..300).contains(&status) {
        return parsed.map_err(|e| OutcomeError::Malformed(e.to_string()));
    }
    match parsed {
        Ok(reply) if reply.is_ticket_used() => Ok(reply),
        _ => Err(OutcomeError::Status(status)),
    }
}
