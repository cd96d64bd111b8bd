pub const SPIN_ENDPOINT: &str = "/api/ruleta/spin";
pub const COLLECTION_ENDPOINT_PREFIX: &str = "/api/";
pub const REWARDS_COLLECTION: &str = "rewards";
pub const PROVISIONAL_PRODUCTS_COLLECTION: &str = "provisional-products";

/// Error marker the decision service sends for a consumed attempt.
pub const TICKET_USED: &str = "ticket usado";

pub const NETWORK_ERROR: &str = "Network error. Please try again";
pub const ALREADY_USED_MESSAGE: &str = "This ticket has already been used.";
pub const NO_OPTIONS_MESSAGE: &str = "No prizes are available right now.";
pub const SPIN_FAILED_MESSAGE: &str = "The wheel could not be spun. Please try again.";
pub const COUPON_COPIED_MESSAGE: &str = "Coupon copied to clipboard";
pub const MISSING_TICKET_MESSAGE: &str = "A ticket is required to spin the wheel.";

pub const DEFAULT_OUTCOME_TIMEOUT_MS: u32 = 10_000;
