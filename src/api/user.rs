use {
    super::{
        Auth,
        ErrorBodyResponse,
        InsertSummaryResponse,
        RestError,
        UpdateSummaryResponse,
    },
    crate::{
        kernel::entities::{
            parse_email,
            UserId,
        },
        models,
        state::StoreNew,
        user::entities,
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

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, ToResponse, Debug)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl From<models::UserRole> for UserRole {
    fn from(role: models::UserRole) -> Self {
        match role {
            models::UserRole::User => UserRole::User,
            models::UserRole::Admin => UserRole::Admin,
        }
    }
}

impl From<UserRole> for models::UserRole {
    fn from(role: UserRole) -> Self {
        match role {
            UserRole::User => models::UserRole::User,
            UserRole::Admin => models::UserRole::Admin,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct CreateToken {
    /// The email the credential is issued for
    #[schema(example = "seller@example.com")]
    pub email: String,
}

#[derive(Serialize, Deserialize, ToSchema, Clone)]
pub struct TokenResponse {
    /// A signed bearer credential, valid for one hour
    pub token: String,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    /// The email of the user to register
    #[schema(example = "seller@example.com")]
    pub email:     String,
    /// The display name of the user
    #[schema(example = "John Doe")]
    pub name:      Option<String>,
    /// Profile photo URL
    pub photo:     Option<String>,
    /// The role of the user; defaults to a plain user
    pub user_type: Option<UserRole>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, ToResponse)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// The id of the user
    #[schema(example = "obo3ee3e-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:                   UserId,
    /// The email of the user
    #[schema(example = "seller@example.com")]
    pub email:                String,
    /// The role of the user
    pub user_type:            UserRole,
    pub name:                 Option<String>,
    pub photo:                Option<String>,
    pub phone:                Option<String>,
    pub address:              Option<String>,
    pub verification_request: Option<String>,
    pub verify_status:        Option<String>,
}

impl From<entities::User> for User {
    fn from(user: entities::User) -> Self {
        Self {
            id:                   user.id,
            email:                user.email.to_string(),
            user_type:            user.role.into(),
            name:                 user.name,
            photo:                user.photo,
            phone:                user.phone,
            address:              user.address,
            verification_request: user.verification_request,
            verify_status:        user.verify_status,
        }
    }
}

#[derive(Serialize, ToSchema, ToResponse)]
pub struct AdminStatusResponse {
    pub admin: bool,
}

/// Only the populated fields are merged into the stored user.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserDetails {
    pub phone:                 Option<String>,
    pub address:               Option<String>,
    /// A pending verification request to record
    pub request_update:        Option<String>,
    /// The resolved verification status
    pub updated_verify_status: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, IntoParams)]
pub struct CurrentUserParams {
    /// The email of the user to fetch
    #[param(example = "seller@example.com")]
    pub email: String,
}

/// Issue a signed bearer credential for the submitted identity.
///
/// The credential is valid for one hour.
#[utoipa::path(post, path = "/jwt", request_body = CreateToken, responses(
    (status = 200, description = "The signed credential", body = TokenResponse),
    (status = 400, response = ErrorBodyResponse),
),)]
pub async fn issue_token(
    State(store): State<Arc<StoreNew>>,
    Json(params): Json<CreateToken>,
) -> Result<Json<TokenResponse>, RestError> {
    let email = parse_email(&params.email)?;
    let token = store.token_issuer.issue(email.as_str())?;
    Ok(Json(TokenResponse { token }))
}

/// Register a user unless the email is already taken.
///
/// Duplicate registrations are a no-op signalled with a null inserted id.
#[utoipa::path(post, path = "/newUserApi", request_body = CreateUser, responses(
    (status = 200, description = "The insert outcome", body = InsertSummaryResponse),
    (status = 400, response = ErrorBodyResponse),
),)]
pub async fn post_user(
    State(store): State<Arc<StoreNew>>,
    Json(params): Json<CreateUser>,
) -> Result<Json<InsertSummaryResponse>, RestError> {
    let create = entities::UserCreate {
        email: parse_email(&params.email)?,
        role:  params.user_type.unwrap_or(UserRole::User).into(),
        name:  params.name,
        photo: params.photo,
    };
    Ok(Json(match store.user.add_user(create).await {
        Some(user) => InsertSummaryResponse {
            message:     None,
            inserted_id: Some(user.id),
        },
        None => InsertSummaryResponse {
            message:     Some("User already exists".to_string()),
            inserted_id: None,
        },
    }))
}

/// Check whether the given email belongs to an administrator.
#[utoipa::path(get, path = "/user/admin/{email}",
security(
("bearerAuth" = []),
), params(
    ("email" = String, Path, description = "The email to check"),
), responses(
    (status = 200, description = "The admin status", body = AdminStatusResponse),
    (status = 401, response = ErrorBodyResponse),
),)]
pub async fn get_is_admin(
    _auth: Auth,
    State(store): State<Arc<StoreNew>>,
    Path(email): Path<String>,
) -> Result<Json<AdminStatusResponse>, RestError> {
    Ok(Json(AdminStatusResponse {
        admin: store.user.is_admin(&email).await,
    }))
}

/// List every non-admin user. Administrators only.
#[utoipa::path(get, path = "/allUsers",
security(
("bearerAuth" = []),
), responses(
    (status = 200, description = "All non-admin users", body = Vec<User>),
    (status = 401, response = ErrorBodyResponse),
    (status = 403, response = ErrorBodyResponse),
),)]
pub async fn get_users(
    auth: Auth,
    State(store): State<Arc<StoreNew>>,
) -> Result<Json<Vec<User>>, RestError> {
    store.user.require_admin(&auth.principal).await?;
    Ok(Json(
        store
            .user
            .get_non_admin_users()
            .await
            .into_iter()
            .map(User::from)
            .collect(),
    ))
}

/// Fetch a user by email, or null when no such user exists.
#[utoipa::path(get, path = "/currentUser", params(CurrentUserParams), responses(
    (status = 200, description = "The user with the matching email, if any", body = Option<User>),
),)]
pub async fn get_current_user(
    State(store): State<Arc<StoreNew>>,
    Query(params): Query<CurrentUserParams>,
) -> Json<Option<User>> {
    Json(
        store
            .user
            .get_user_by_email(&params.email)
            .await
            .map(User::from),
    )
}

/// Merge the submitted verification details into the user.
///
/// Fields absent from the payload are left untouched.
#[utoipa::path(put, path = "/updateUserDetails/{id}",
security(
("bearerAuth" = []),
), params(
    ("id" = String, Path, description = "The id of the user to update"),
), request_body = UpdateUserDetails, responses(
    (status = 200, description = "The update outcome", body = UpdateSummaryResponse),
    (status = 401, response = ErrorBodyResponse),
    (status = 404, response = ErrorBodyResponse),
),)]
pub async fn put_user_details(
    _auth: Auth,
    State(store): State<Arc<StoreNew>>,
    Path(id): Path<UserId>,
    Json(params): Json<UpdateUserDetails>,
) -> Result<Json<UpdateSummaryResponse>, RestError> {
    store
        .user
        .update_user_details(
            id,
            entities::UserDetailsUpdate {
                phone:                params.phone,
                address:              params.address,
                verification_request: params.request_update,
                verify_status:        params.updated_verify_status,
            },
        )
        .await?;
    Ok(Json(UpdateSummaryResponse {
        matched_count:  1,
        modified_count: 1,
    }))
}
