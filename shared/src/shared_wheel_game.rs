use serde::{Serialize, Deserialize};
use crate::constants::TICKET_USED;

// === API Types ===

/// Body of the spin request sent to the decision service.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SpinRequest {
    #[serde(rename = "usuario")]
    pub user_id: String,
    #[serde(rename = "ticket")]
    pub ticket_id: String,
    /// Catalogue the wheel was drawn from; the service falls back to the
    /// rewards catalogue when absent.
    #[serde(rename = "coleccion", default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
}

impl SpinRequest {
    pub fn new(user_id: &str, ticket_id: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            ticket_id: ticket_id.to_string(),
            collection: None,
        }
    }

    pub fn with_collection(mut self, collection: Option<String>) -> Self {
        self.collection = collection;
        self
    }
}

/// Reply from the decision service. Either a winning sector (with an optional
/// coupon) or an error object such as `{ "error": "ticket usado" }`.
///
/// Variants are tried in order, so any body carrying `error` is a rejection
/// even when it also names an `indice`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum SpinReply {
    Rejected {
        error: String,
    },
    Winner {
        #[serde(rename = "indice")]
        index: i64,
        #[serde(rename = "cupon", default, skip_serializing_if = "Option::is_none")]
        coupon: Option<String>,
    },
}

impl SpinReply {
    pub fn ticket_used() -> Self {
        Self::Rejected { error: TICKET_USED.to_string() }
    }

    pub fn is_ticket_used(&self) -> bool {
        matches!(self, Self::Rejected { error } if error.trim().eq_ignore_ascii_case(TICKET_USED))
    }
}

/// Headless-CMS collection envelope: `{ "data": [...] }`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CollectionResponse<T> {
    pub data: Vec<T>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RewardEntry {
    pub id: i64,
    pub attributes: RewardAttributes,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RewardAttributes {
    pub nombre: String,
}

// Constants for frontend animation
pub const SPIN_DURATION_MS: f64 = 3000.0;  // Duration of the main spin
pub const EXTRA_TURNS: u32 = 5;            // Full rotations added for effect
pub const CORRECTION_DURATION_MS: f64 = 300.0;
pub const ALIGNMENT_TOLERANCE: f64 = 0.01; // Radians
pub const CELEBRATION_TICKS: u32 = 10;
pub const CELEBRATION_INTERVAL_MS: u32 = 120;
