use {
    super::{
        InsertSummaryResponse,
        RestError,
    },
    crate::{
        feedback,
        kernel::entities::FeedbackId,
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
pub struct Feedback {
    /// The id of the feedback record
    #[schema(example = "f47ac10b-58cc-4372-a567-0e02b2c3d479", value_type = String)]
    pub id:          FeedbackId,
    /// The identifier of the author
    #[schema(example = "buyer@example.com")]
    pub feedback_by: String,
    pub user_name:   Option<String>,
    pub user_photo:  Option<String>,
    #[schema(example = 5)]
    pub rating:      Option<i32>,
    /// The feedback text
    pub feedback:    String,
}

impl From<feedback::Feedback> for Feedback {
    fn from(feedback: feedback::Feedback) -> Self {
        Self {
            id:          feedback.id,
            feedback_by: feedback.feedback_by,
            user_name:   feedback.user_name,
            user_photo:  feedback.user_photo,
            rating:      feedback.rating,
            feedback:    feedback.feedback,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeedback {
    /// The identifier of the author
    #[schema(example = "buyer@example.com")]
    pub feedback_by: String,
    pub user_name:   Option<String>,
    pub user_photo:  Option<String>,
    #[schema(example = 5)]
    pub rating:      Option<i32>,
    /// The feedback text
    pub feedback:    String,
}

/// Record user feedback.
#[utoipa::path(post, path = "/userFeedback", request_body = CreateFeedback, responses(
    (status = 200, description = "The insert outcome", body = InsertSummaryResponse),
),)]
pub async fn post_feedback(
    State(store): State<Arc<StoreNew>>,
    Json(params): Json<CreateFeedback>,
) -> Result<Json<InsertSummaryResponse>, RestError> {
    let feedback = store
        .feedback
        .add_feedback(feedback::FeedbackCreate {
            feedback_by: params.feedback_by,
            user_name:   params.user_name,
            user_photo:  params.user_photo,
            rating:      params.rating,
            feedback:    params.feedback,
        })
        .await;
    Ok(Json(InsertSummaryResponse {
        message:     None,
        inserted_id: Some(feedback.id),
    }))
}

/// The latest five feedback records.
#[utoipa::path(get, path = "/allFeedbacks", responses(
    (status = 200, description = "The latest feedback", body = Vec<Feedback>),
),)]
pub async fn get_latest_feedback(State(store): State<Arc<StoreNew>>) -> Json<Vec<Feedback>> {
    Json(
        store
            .feedback
            .get_latest_feedback()
            .await
            .into_iter()
            .map(Feedback::from)
            .collect(),
    )
}

/// Fetch one feedback record by its author identifier.
#[utoipa::path(get, path = "/singleFeedback/{id}", params(
    ("id" = String, Path, description = "The author identifier"),
), responses(
    (status = 200, description = "The author's feedback, if any", body = Option<Feedback>),
),)]
pub async fn get_single_feedback(
    State(store): State<Arc<StoreNew>>,
    Path(id): Path<String>,
) -> Json<Option<Feedback>> {
    Json(
        store
            .feedback
            .get_feedback_by_author(&id)
            .await
            .map(Feedback::from),
    )
}
