use axum::{
    routing::{get, post},
    Router,
    Json,
    extract::{State, Extension},
    middleware,
    debug_handler,
};
use rand::Rng;
use rand::rngs::OsRng;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;
use wheel_shared::constants::REWARDS_COLLECTION;
use wheel_shared::shared_wheel_game::{
    CollectionResponse, RewardAttributes, RewardEntry, SpinReply, SpinRequest,
};
use crate::AppState;
use crate::auth::middleware::{require_auth, UserId};
use crate::error::Error;

const COUPON_PREFIX: &str = "RULETA";

#[derive(Debug, Clone)]
struct Redemption {
    user_id: String,
    index: usize,
    coupon: String,
}

/// Tickets that have already been spun. A ticket is consumed the moment a
/// winner is drawn for it.
#[derive(Default)]
pub struct TicketLedger {
    redeemed: Mutex<HashMap<String, Redemption>>,
}

impl TicketLedger {
    /// Draws a winner for `ticket` and marks it consumed, atomically.
    fn redeem<R: Rng>(
        &self,
        ticket: &str,
        user_id: &str,
        reward_count: usize,
        rng: &mut R,
    ) -> Result<Redemption, Error> {
        let mut redeemed = self.redeemed.lock().map_err(|_| Error::Internal)?;
        if let Some(previous) = redeemed.get(ticket) {
            tracing::info!(
                "Ticket {} already redeemed by {} (sector {}, coupon {})",
                ticket, previous.user_id, previous.index, previous.coupon
            );
            return Err(Error::TicketUsed);
        }

        let redemption = Redemption {
            user_id: user_id.to_string(),
            index: rng.gen_range(0..reward_count),
            coupon: new_coupon(),
        };
        redeemed.insert(ticket.to_string(), redemption.clone());
        Ok(redemption)
    }
}

fn new_coupon() -> String {
    let code = Uuid::new_v4().simple().to_string();
    format!("{}-{}", COUPON_PREFIX, code[..8].to_uppercase())
}

pub fn create_router(state: AppState) -> Router<AppState> {
    let spin_routes = Router::new()
        .route("/ruleta/spin", post(spin_wheel))
        .route_layer(middleware::from_fn_with_state(state, require_auth));

    Router::new()
        .route("/rewards", get(list_rewards))
        .route("/provisional-products", get(list_products))
        .merge(spin_routes)
}

#[debug_handler]
async fn spin_wheel(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserId>,
    Json(request): Json<SpinRequest>,
) -> Result<Json<SpinReply>, Error> {
    let ticket = request.ticket_id.trim();
    if ticket.is_empty() {
        return Err(Error::InvalidRequest("ticket is required"));
    }
    if request.user_id != user_id.0 {
        tracing::debug!("Spin body names {} but token belongs to {}", request.user_id, user_id.0);
    }

    let collection = request.collection.as_deref().unwrap_or(REWARDS_COLLECTION);
    let catalogue = state
        .config
        .catalogue(collection)
        .ok_or(Error::InvalidRequest("unknown collection"))?;
    if catalogue.is_empty() {
        return Err(Error::EmptyCatalogue);
    }

    let mut rng = OsRng;
    let redemption = state.tickets.redeem(ticket, &user_id.0, catalogue.len(), &mut rng)?;
    tracing::info!(
        "Ticket {} won '{}' from {} for {}",
        ticket, catalogue[redemption.index], collection, user_id.0
    );

    Ok(Json(SpinReply::Winner {
        index: redemption.index as i64,
        coupon: Some(redemption.coupon),
    }))
}

async fn list_rewards(State(state): State<AppState>) -> Json<CollectionResponse<RewardEntry>> {
    collection_response(&state.config.rewards)
}

async fn list_products(State(state): State<AppState>) -> Json<CollectionResponse<RewardEntry>> {
    collection_response(&state.config.products)
}

fn collection_response(labels: &[String]) -> Json<CollectionResponse<RewardEntry>> {
    let data = labels
        .iter()
        .enumerate()
        .map(|(i, nombre)| RewardEntry {
            id: i as i64 + 1,
            attributes: RewardAttributes { nombre: nombre.clone() },
        })
        .collect();

    Json(CollectionResponse { data })
}
