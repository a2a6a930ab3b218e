// Prediction handler.
//
// POST /predict — the single analysis endpoint. Runs classification, title
// generation, and keyword recommendation for one post and serializes the
// combined result. Title generation and recommendation both fail soft: only
// classification errors surface as a 500.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use tracing::{error, warn};

use crate::category::Category;
use crate::recommend;
use crate::titles::gemini::fallback_titles;
use crate::web::{api_error, AppState};

/// How many keywords the extractor is asked for per request.
const MAX_EXTRACTED: usize = 15;
/// How many hot keywords the response carries.
const MAX_RECOMMENDED: usize = 5;
/// How many title suggestions the response carries.
const TITLE_COUNT: usize = 3;

#[derive(Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub text: String,
}

/// POST /predict — classify a post and build the full recommendation payload.
pub async fn predict(State(state): State<AppState>, Json(request): Json<PredictRequest>) -> Response {
    if request.text.trim().is_empty() {
        return api_error(StatusCode::BAD_REQUEST, "請提供文章內容");
    }

    let prediction = match state.classifier.predict(&request.text) {
        Ok(prediction) => prediction,
        Err(e) => {
            error!(error = %e, "Classification failed");
            return api_error(StatusCode::INTERNAL_SERVER_ERROR, "分類失敗");
        }
    };
    let category = prediction.category;

    // Title generation fails soft to deterministic defaults
    let suggested_titles = match state
        .titles
        .suggest(&request.text, category, TITLE_COUNT)
        .await
    {
        Ok(titles) => titles,
        Err(e) => {
            warn!(error = %e, "Title generation failed, using fallback titles");
            fallback_titles(category)
        }
    };

    // The recommendation pipeline never fails — worst case is Degraded
    let outcome = recommend::generate_recommendations(
        state.extractor.as_ref(),
        &state.reference,
        &request.text,
        category.label(),
        MAX_EXTRACTED,
        MAX_RECOMMENDED,
    );
    let (recommendations, degraded_reason) = outcome.into_parts();

    let probabilities: serde_json::Map<String, serde_json::Value> = prediction
        .probabilities
        .iter()
        .map(|(c, p)| (c.label().to_string(), serde_json::json!(p)))
        .collect();

    let probability_names: serde_json::Map<String, serde_json::Value> = Category::ALL
        .iter()
        .map(|c| (c.label().to_string(), serde_json::json!(c.board_name())))
        .collect();

    Json(serde_json::json!({
        "category": category.label(),
        "category_name": category.board_name(),
        "probabilities": probabilities,
        "probability_names": probability_names,
        "suggested_titles": suggested_titles,
        "extracted_keywords": recommendations.extracted_keywords,
        "hot_keywords": recommendations.recommended_keywords,
        "degraded_reason": degraded_reason,
    }))
    .into_response()
}
