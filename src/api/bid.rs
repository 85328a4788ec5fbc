use {
    super::{
        Auth,
        ErrorBodyResponse,
        RestError,
    },
    crate::{
        bid::entities,
        kernel::entities::{
            parse_email,
            BidId,
            ListingId,
        },
        state::StoreNew,
    },
    axum::{
        extract::{
            Path,
            State,
        },
        Json,
    },
    serde::{
        Deserialize,
        Serialize,
    },
    std::sync::Arc,
    utoipa::{
        ToResponse,
        ToSchema,
    },
};

#[derive(Serialize, Deserialize, ToSchema, Clone, ToResponse)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    /// The id of the bid
    #[schema(example = "f47ac10b-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:            BidId,
    /// The id of the listing the bid targets
    #[schema(example = "f47ac10b-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub product_id:    ListingId,
    /// The email of the bidding user
    #[schema(example = "buyer@example.com")]
    pub bidder_email:  String,
    pub bidder_name:   Option<String>,
    /// The offered amount
    #[schema(example = 9500)]
    pub bid_amount:    i64,
    /// Unix timestamp of when the bid was recorded
    #[schema(example = 1714089600)]
    pub creation_time: i64,
}

impl From<entities::Bid> for Bid {
    fn from(bid: entities::Bid) -> Self {
        Self {
            id:            bid.id,
            product_id:    bid.product_id,
            bidder_email:  bid.bidder_email.to_string(),
            bidder_name:   bid.bidder_name,
            bid_amount:    bid.bid_amount,
            creation_time: bid.creation_time.unix_timestamp(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateBid {
    /// The id of the listing to bid on
    #[schema(example = "f47ac10b-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub product_id:   ListingId,
    /// The email of the bidding user
    #[schema(example = "buyer@example.com")]
    pub bidder_email: String,
    pub bidder_name:  Option<String>,
    /// The offered amount
    #[schema(example = 9500)]
    pub bid_amount:   i64,
}

/// Either the recorded bid, or `false` when the listing's bid counter could
/// not be updated and the bid was therefore not recorded.
#[derive(Serialize, ToSchema)]
#[serde(untagged)]
pub enum PlaceBidResponse {
    Placed(Bid),
    Rejected(bool),
}

/// Place a bid on a listing.
///
/// The listing's bid counter is updated first; only once that succeeds is
/// the bid recorded. A counter update that matches no listing is a routine
/// concurrent-bidding outcome and is reported as `false`, not as an error.
#[utoipa::path(post, path = "/newBid",
security(
("bearerAuth" = []),
), request_body = CreateBid, responses(
    (status = 200, description = "The recorded bid, or false on a counter conflict", body = PlaceBidResponse),
    (status = 400, response = ErrorBodyResponse),
    (status = 401, response = ErrorBodyResponse),
    (status = 404, description = "The listing was not found", body = ErrorBodyResponse),
),)]
pub async fn post_bid(
    _auth: Auth,
    State(store): State<Arc<StoreNew>>,
    Json(params): Json<CreateBid>,
) -> Result<Json<PlaceBidResponse>, RestError> {
    let create = entities::BidCreate {
        product_id:   params.product_id,
        bidder_email: parse_email(&params.bidder_email)?,
        bidder_name:  params.bidder_name,
        bid_amount:   params.bid_amount,
    };
    Ok(Json(match store.bid.handle_bid(create).await? {
        entities::BidOutcome::Placed(bid) => PlaceBidResponse::Placed(bid.into()),
        entities::BidOutcome::CounterConflict => PlaceBidResponse::Rejected(false),
    }))
}

/// Fetch every bid placed against a listing.
#[utoipa::path(get, path = "/allBidsForProduct/{id}", params(
    ("id" = String, Path, description = "The id of the listing"),
), responses(
    (status = 200, description = "The bids for the listing", body = Vec<Bid>),
),)]
pub async fn get_bids_for_product(
    State(store): State<Arc<StoreNew>>,
    Path(id): Path<ListingId>,
) -> Json<Vec<Bid>> {
    Json(
        store
            .bid
            .get_bids_for_product(id)
            .await
            .into_iter()
            .map(Bid::from)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_bid_serializes_as_false() {
        let value = serde_json::to_value(PlaceBidResponse::Rejected(false)).unwrap();
        assert_eq!(value, serde_json::json!(false));
    }
}
