use {
    super::{
        Auth,
        DeleteSummaryResponse,
        ErrorBodyResponse,
        InsertSummaryResponse,
        RestError,
        UpdateSummaryResponse,
    },
    crate::{
        kernel::entities::{
            parse_email,
            ListingId,
            UserId,
        },
        listing::entities,
        state::StoreNew,
    },
    axum::{
        extract::{
            Path,
            Query,
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
        IntoParams,
        ToResponse,
        ToSchema,
    },
};

#[derive(Serialize, Deserialize, ToSchema, Clone, ToResponse)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// The id of the listing
    #[schema(example = "f47ac10b-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:                         ListingId,
    /// The email of the selling user
    #[schema(example = "seller@example.com")]
    pub seller_email:               String,
    /// The id of the selling user
    #[schema(example = "obo3ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub seller_id:                  UserId,
    pub seller_name:                Option<String>,
    #[schema(example = "Corolla Altis 2019")]
    pub car_name:                   Option<String>,
    #[schema(example = "toyota")]
    pub car_brand:                  Option<String>,
    pub car_type:                   Option<String>,
    /// Asking price
    #[schema(example = 15000)]
    pub price:                      Option<i64>,
    #[schema(example = "used")]
    pub car_condition:              Option<String>,
    pub purchasing_date:            Option<String>,
    pub description:                Option<String>,
    pub photo:                      Option<String>,
    pub approval_status:            Option<String>,
    pub adding_date:                Option<String>,
    pub manufacture_year:           Option<String>,
    pub engine_capacity:            Option<String>,
    pub total_run:                  Option<String>,
    pub fuel_type:                  Option<String>,
    pub transmission_type:          Option<String>,
    pub registered_year:            Option<String>,
    pub seller_phone:               Option<String>,
    pub sell_status:                Option<String>,
    pub seller_verification_status: Option<String>,
    /// Denormalized count of bids placed against this listing
    pub total_bids:                 u64,
    /// Unix timestamp of when the listing was stored
    #[schema(example = 1714089600)]
    pub creation_time:              i64,
}

impl From<entities::Listing> for Listing {
    fn from(listing: entities::Listing) -> Self {
        Self {
            id:                         listing.id,
            seller_email:               listing.seller_email.to_string(),
            seller_id:                  listing.seller_id,
            seller_name:                listing.seller_name,
            car_name:                   listing.car_name,
            car_brand:                  listing.car_brand,
            car_type:                   listing.car_type,
            price:                      listing.price,
            car_condition:              listing.car_condition,
            purchasing_date:            listing.purchasing_date,
            description:                listing.description,
            photo:                      listing.photo,
            approval_status:            listing.approval_status,
            adding_date:                listing.adding_date,
            manufacture_year:           listing.manufacture_year,
            engine_capacity:            listing.engine_capacity,
            total_run:                  listing.total_run,
            fuel_type:                  listing.fuel_type,
            transmission_type:          listing.transmission_type,
            registered_year:            listing.registered_year,
            seller_phone:               listing.seller_phone,
            sell_status:                listing.sell_status,
            seller_verification_status: listing.seller_verification_status,
            total_bids:                 listing.total_bids,
            creation_time:              listing.creation_time.unix_timestamp(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateListing {
    /// The email of the selling user
    #[schema(example = "seller@example.com")]
    pub seller_email:               String,
    /// The id of the selling user
    #[schema(example = "obo3ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub seller_id:                  UserId,
    pub seller_name:                Option<String>,
    pub car_name:                   Option<String>,
    pub car_brand:                  Option<String>,
    pub car_type:                   Option<String>,
    pub price:                      Option<i64>,
    pub car_condition:              Option<String>,
    pub purchasing_date:            Option<String>,
    pub description:                Option<String>,
    pub photo:                      Option<String>,
    pub approval_status:            Option<String>,
    pub adding_date:                Option<String>,
    pub manufacture_year:           Option<String>,
    pub engine_capacity:            Option<String>,
    pub total_run:                  Option<String>,
    pub fuel_type:                  Option<String>,
    pub transmission_type:          Option<String>,
    pub registered_year:            Option<String>,
    pub seller_phone:               Option<String>,
    pub sell_status:                Option<String>,
    pub seller_verification_status: Option<String>,
}

/// The full descriptive replace set. Every field is written as submitted;
/// omitting one clears the stored value, so callers must send complete
/// payloads to avoid data loss.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateListing {
    pub car_name:          Option<String>,
    pub car_brand:         Option<String>,
    pub car_type:          Option<String>,
    pub price:             Option<i64>,
    pub car_condition:     Option<String>,
    pub purchasing_date:   Option<String>,
    pub description:       Option<String>,
    pub photo:             Option<String>,
    pub approval_status:   Option<String>,
    pub adding_date:       Option<String>,
    pub manufacture_year:  Option<String>,
    pub engine_capacity:   Option<String>,
    pub total_run:         Option<String>,
    pub fuel_type:         Option<String>,
    pub transmission_type: Option<String>,
    pub registered_year:   Option<String>,
    pub seller_phone:      Option<String>,
}

impl From<UpdateListing> for entities::ListingReplace {
    fn from(params: UpdateListing) -> Self {
        Self {
            car_name:          params.car_name,
            car_brand:         params.car_brand,
            car_type:          params.car_type,
            price:             params.price,
            car_condition:     params.car_condition,
            purchasing_date:   params.purchasing_date,
            description:       params.description,
            photo:             params.photo,
            approval_status:   params.approval_status,
            adding_date:       params.adding_date,
            manufacture_year:  params.manufacture_year,
            engine_capacity:   params.engine_capacity,
            total_run:         params.total_run,
            fuel_type:         params.fuel_type,
            transmission_type: params.transmission_type,
            registered_year:   params.registered_year,
            seller_phone:      params.seller_phone,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSellStatus {
    /// The new sell status
    #[schema(example = "sold")]
    pub sell_status: String,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSellerVerification {
    /// The verification status to stamp on every listing of the seller
    #[schema(example = "verified")]
    pub updated_verify_status: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct FilteredListingsParams {
    /// Page size; must be at least 1
    #[param(example = 10)]
    pub listing_per_page: usize,
    /// 1-based page number
    #[param(example = 1)]
    pub current_page:     usize,
    /// Condition filter, or "all" for no restriction
    #[param(example = "used")]
    pub car_condition:    String,
    /// Brand filter, or "all" for no restriction
    #[param(example = "toyota")]
    pub car_brand:        String,
    /// Price range encoded as "min-max", or "all" for no restriction
    #[param(example = "10000-15000")]
    pub car_price:        String,
}

#[derive(Serialize, ToSchema, ToResponse)]
#[serde(rename_all = "camelCase")]
pub struct FilteredListingsResponse {
    /// Page count of the complete filtered set, independent of the
    /// requested page
    pub total_pages:       usize,
    pub filtered_listings: Vec<Listing>,
}

/// Create a listing for the authenticated seller.
#[utoipa::path(post, path = "/newCarSellByUser",
security(
("bearerAuth" = []),
), request_body = CreateListing, responses(
    (status = 200, description = "The insert outcome", body = InsertSummaryResponse),
    (status = 400, response = ErrorBodyResponse),
    (status = 401, response = ErrorBodyResponse),
),)]
pub async fn post_listing(
    _auth: Auth,
    State(store): State<Arc<StoreNew>>,
    Json(params): Json<CreateListing>,
) -> Result<Json<InsertSummaryResponse>, RestError> {
    let create = entities::ListingCreate {
        seller_email:               parse_email(&params.seller_email)?,
        seller_id:                  params.seller_id,
        seller_name:                params.seller_name,
        car_name:                   params.car_name,
        car_brand:                  params.car_brand,
        car_type:                   params.car_type,
        price:                      params.price,
        car_condition:              params.car_condition,
        purchasing_date:            params.purchasing_date,
        description:                params.description,
        photo:                      params.photo,
        approval_status:            params.approval_status,
        adding_date:                params.adding_date,
        manufacture_year:           params.manufacture_year,
        engine_capacity:            params.engine_capacity,
        total_run:                  params.total_run,
        fuel_type:                  params.fuel_type,
        transmission_type:          params.transmission_type,
        registered_year:            params.registered_year,
        seller_phone:               params.seller_phone,
        sell_status:                params.sell_status,
        seller_verification_status: params.seller_verification_status,
    };
    let listing = store.listing.add_listing(create).await;
    Ok(Json(InsertSummaryResponse {
        message:     None,
        inserted_id: Some(listing.id),
    }))
}

/// Fetch every listing.
#[utoipa::path(get, path = "/allListings", responses(
    (status = 200, description = "All listings", body = Vec<Listing>),
),)]
pub async fn get_all_listings(State(store): State<Arc<StoreNew>>) -> Json<Vec<Listing>> {
    Json(
        store
            .listing
            .get_all_listings()
            .await
            .into_iter()
            .map(Listing::from)
            .collect(),
    )
}

/// Fetch a listing by id, or null when no such listing exists.
#[utoipa::path(get, path = "/singleListing/{id}", params(
    ("id" = String, Path, description = "The id of the listing"),
), responses(
    (status = 200, description = "The listing, if any", body = Option<Listing>),
),)]
pub async fn get_single_listing(
    State(store): State<Arc<StoreNew>>,
    Path(id): Path<ListingId>,
) -> Json<Option<Listing>> {
    Json(store.listing.get_listing(id).await.map(Listing::from))
}

/// Fetch the listings of one seller.
#[utoipa::path(get, path = "/listings/{email}",
security(
("bearerAuth" = []),
), params(
    ("email" = String, Path, description = "The seller email"),
), responses(
    (status = 200, description = "The seller's listings", body = Vec<Listing>),
    (status = 401, response = ErrorBodyResponse),
),)]
pub async fn get_seller_listings(
    _auth: Auth,
    State(store): State<Arc<StoreNew>>,
    Path(email): Path<String>,
) -> Result<Json<Vec<Listing>>, RestError> {
    Ok(Json(
        store
            .listing
            .get_seller_listings(&email)
            .await
            .into_iter()
            .map(Listing::from)
            .collect(),
    ))
}

/// The newest eight listings for the home page.
#[utoipa::path(get, path = "/homeListings", responses(
    (status = 200, description = "The newest listings", body = Vec<Listing>),
),)]
pub async fn get_home_listings(State(store): State<Arc<StoreNew>>) -> Json<Vec<Listing>> {
    Json(
        store
            .listing
            .get_home_listings()
            .await
            .into_iter()
            .map(Listing::from)
            .collect(),
    )
}

/// The eight most-bid listings for the home page.
#[utoipa::path(get, path = "/topBidHomeListings", responses(
    (status = 200, description = "The most-bid listings", body = Vec<Listing>),
),)]
pub async fn get_top_bid_listings(State(store): State<Arc<StoreNew>>) -> Json<Vec<Listing>> {
    Json(
        store
            .listing
            .get_top_bid_listings()
            .await
            .into_iter()
            .map(Listing::from)
            .collect(),
    )
}

/// Filter and paginate the listing catalogue.
///
/// The filter runs over the complete catalogue and the page is sliced from
/// the full result, so the page count always reflects every match.
#[utoipa::path(get, path = "/filteredListings", params(FilteredListingsParams), responses(
    (status = 200, description = "One page of the filtered catalogue", body = FilteredListingsResponse),
    (status = 400, response = ErrorBodyResponse),
),)]
pub async fn get_filtered_listings(
    State(store): State<Arc<StoreNew>>,
    Query(params): Query<FilteredListingsParams>,
) -> Result<Json<FilteredListingsResponse>, RestError> {
    let query = entities::ListingQuery {
        per_page: params.listing_per_page,
        page:     params.current_page,
        filter:   entities::ListingFilter {
            condition: entities::ListingFilter::clause(&params.car_condition),
            brand:     entities::ListingFilter::clause(&params.car_brand),
            price:     entities::PriceRange::parse(&params.car_price)?,
        },
    };
    let page = store.listing.query_listings(query).await?;
    Ok(Json(FilteredListingsResponse {
        total_pages:       page.total_pages,
        filtered_listings: page.listings.into_iter().map(Listing::from).collect(),
    }))
}

/// Replace the descriptive fields of a listing.
///
/// Destructive by default: omitted fields overwrite stored values with
/// absent. Ownership, sell status and the bid counter are untouched.
#[utoipa::path(put, path = "/updateListing/{id}",
security(
("bearerAuth" = []),
), params(
    ("id" = String, Path, description = "The id of the listing to update"),
), request_body = UpdateListing, responses(
    (status = 200, description = "The update outcome", body = UpdateSummaryResponse),
    (status = 401, response = ErrorBodyResponse),
    (status = 404, response = ErrorBodyResponse),
),)]
pub async fn put_listing(
    _auth: Auth,
    State(store): State<Arc<StoreNew>>,
    Path(id): Path<ListingId>,
    Json(params): Json<UpdateListing>,
) -> Result<Json<UpdateSummaryResponse>, RestError> {
    store.listing.replace_listing(id, params.into()).await?;
    Ok(Json(UpdateSummaryResponse {
        matched_count:  1,
        modified_count: 1,
    }))
}

/// Update only the sell status of a listing.
#[utoipa::path(put, path = "/updateSellStatus/{id}", params(
    ("id" = String, Path, description = "The id of the listing to update"),
), request_body = UpdateSellStatus, responses(
    (status = 200, description = "The update outcome", body = UpdateSummaryResponse),
    (status = 404, response = ErrorBodyResponse),
),)]
pub async fn put_sell_status(
    State(store): State<Arc<StoreNew>>,
    Path(id): Path<ListingId>,
    Json(params): Json<UpdateSellStatus>,
) -> Result<Json<UpdateSummaryResponse>, RestError> {
    store
        .listing
        .update_sell_status(id, params.sell_status)
        .await?;
    Ok(Json(UpdateSummaryResponse {
        matched_count:  1,
        modified_count: 1,
    }))
}

/// Stamp a verification status on every listing of a seller.
///
/// Administrators only; touches the seller's whole catalogue, not one
/// listing.
#[utoipa::path(put, path = "/updateSellerVerification/{id}",
security(
("bearerAuth" = []),
), params(
    ("id" = String, Path, description = "The id of the seller"),
), request_body = UpdateSellerVerification, responses(
    (status = 200, description = "The update outcome", body = UpdateSummaryResponse),
    (status = 401, response = ErrorBodyResponse),
    (status = 403, response = ErrorBodyResponse),
),)]
pub async fn put_seller_verification(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
    Path(seller_id): Path<UserId>,
    Json(params): Json<UpdateSellerVerification>,
) -> Result<Json<UpdateSummaryResponse>, RestError> {
    store.user.require_admin(&auth.principal).await?;
    let modified = store
        .listing
        .update_seller_verification(seller_id, params.updated_verify_status)
        .await;
    Ok(Json(UpdateSummaryResponse {
        matched_count:  modified,
        modified_count: modified,
    }))
}

/// Delete a listing.
#[utoipa::path(delete, path = "/api/deleteSingleListing/{id}",
security(
("bearerAuth" = []),
), params(
    ("id" = String, Path, description = "The id of the listing to delete"),
), responses(
    (status = 200, description = "The delete outcome", body = DeleteSummaryResponse),
    (status = 401, response = ErrorBodyResponse),
),)]
pub async fn delete_listing(
    _auth: Auth,
    State(store): State<Arc<StoreNew>>,
    Path(id): Path<ListingId>,
) -> Result<Json<DeleteSummaryResponse>, RestError> {
    Ok(Json(DeleteSummaryResponse {
        deleted_count: store.listing.delete_listing(id).await,
    }))
}
