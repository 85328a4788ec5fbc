use {
    super::{
        DeleteSummaryResponse,
        ErrorBodyResponse,
        InsertSummaryResponse,
        RestError,
    },
    crate::{
        kernel::entities::{
            parse_email,
            ListingId,
            SavedAdId,
        },
        saved_ad,
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
pub struct SavedAd {
    /// The id of the saved-ad record
    #[schema(example = "f47ac10b-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:           SavedAdId,
    /// The id of the saved listing
    #[schema(example = "f47ac10b-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub single_ad_id: ListingId,
    /// The email of the user who saved the listing
    #[schema(example = "buyer@example.com")]
    pub user_email:   String,
    pub car_name:     Option<String>,
    pub price:        Option<i64>,
    pub photo:        Option<String>,
}

impl From<saved_ad::SavedAd> for SavedAd {
    fn from(ad: saved_ad::SavedAd) -> Self {
        Self {
            id:           ad.id,
            single_ad_id: ad.single_ad_id,
            user_email:   ad.user_email.to_string(),
            car_name:     ad.car_name,
            price:        ad.price,
            photo:        ad.photo,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateSavedAd {
    /// The id of the listing to save
    #[schema(example = "f47ac10b-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub single_ad_id: ListingId,
    /// The email of the saving user
    #[schema(example = "buyer@example.com")]
    pub user_email:   String,
    pub car_name:     Option<String>,
    pub price:        Option<i64>,
    pub photo:        Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, IntoParams)]
pub struct OwnerEmailParams {
    /// The email owning the saved-ad record
    #[param(example = "buyer@example.com")]
    pub email: String,
}

/// Save a listing for a user.
#[utoipa::path(post, path = "/newSavedAd", request_body = CreateSavedAd, responses(
    (status = 200, description = "The insert outcome", body = InsertSummaryResponse),
    (status = 400, response = ErrorBodyResponse),
),)]
pub async fn post_saved_ad(
    State(store): State<Arc<StoreNew>>,
    Json(params): Json<CreateSavedAd>,
) -> Result<Json<InsertSummaryResponse>, RestError> {
    let create = saved_ad::SavedAdCreate {
        single_ad_id: params.single_ad_id,
        user_email:   parse_email(&params.user_email)?,
        car_name:     params.car_name,
        price:        params.price,
        photo:        params.photo,
    };
    let ad = store.saved_ad.add_saved_ad(create).await;
    Ok(Json(InsertSummaryResponse {
        message:     None,
        inserted_id: Some(ad.id),
    }))
}

/// Fetch one saved-ad record by listing id and owner email.
#[utoipa::path(get, path = "/getSingleSavedAd/{id}", params(
    ("id" = String, Path, description = "The id of the saved listing"),
    OwnerEmailParams,
), responses(
    (status = 200, description = "The saved-ad record, if any", body = Option<SavedAd>),
),)]
pub async fn get_single_saved_ad(
    State(store): State<Arc<StoreNew>>,
    Path(id): Path<ListingId>,
    Query(params): Query<OwnerEmailParams>,
) -> Json<Option<SavedAd>> {
    Json(
        store
            .saved_ad
            .get_saved_ad(id, &params.email)
            .await
            .map(SavedAd::from),
    )
}

/// List the saved ads of one user.
#[utoipa::path(get, path = "/savedAdsList/{email}", params(
    ("email" = String, Path, description = "The owning email"),
), responses(
    (status = 200, description = "The user's saved ads", body = Vec<SavedAd>),
),)]
pub async fn get_saved_ads(
    State(store): State<Arc<StoreNew>>,
    Path(email): Path<String>,
) -> Json<Vec<SavedAd>> {
    Json(
        store
            .saved_ad
            .get_saved_ads_for_user(&email)
            .await
            .into_iter()
            .map(SavedAd::from)
            .collect(),
    )
}

/// Remove one saved-ad record by listing id and owner email.
#[utoipa::path(delete, path = "/removedSavedAd/{id}", params(
    ("id" = String, Path, description = "The id of the saved listing"),
    OwnerEmailParams,
), responses(
    (status = 200, description = "The delete outcome", body = DeleteSummaryResponse),
),)]
pub async fn delete_saved_ad(
    State(store): State<Arc<StoreNew>>,
    Path(id): Path<ListingId>,
    Query(params): Query<OwnerEmailParams>,
) -> Json<DeleteSummaryResponse> {
    Json(DeleteSummaryResponse {
        deleted_count: store.saved_ad.remove_saved_ad(id, &params.email).await,
    })
}
