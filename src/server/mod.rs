use crate::adapters::{DecryptApi, GooglePlaces};
use crate::config::AppConfig;
use crate::core::clock;
use crate::core::selector::{CandidateSelector, SearchOutcome};
use crate::domain::model::{EncryptedEnvelope, PlaceQuery};
use crate::domain::ports::PayloadDecryptor;
use crate::utils::envelope::Sealer;
use crate::utils::error::{Result, ScoutError};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// 啟動時建立一次的共享狀態，之後唯讀
pub struct AppState {
    pub config: AppConfig,
    pub places: GooglePlaces,
    pub decryptor: DecryptApi,
    pub sealer: Option<Sealer>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Arc<Self>> {
        let places = GooglePlaces::new(&config);
        let decryptor = DecryptApi::new(&config);
        let sealer = match &config.public_key_path {
            Some(path) => Some(Sealer::from_pem_file(path)?),
            None => None,
        };
        Ok(Arc::new(Self {
            config,
            places,
            decryptor,
            sealer,
        }))
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let mut router = Router::new()
        .route("/api/nearby-cafes-open-3hr", post(nearby_cafes))
        .route(
            "/api/nearby-cafes-open-3hr/encrypted",
            post(nearby_cafes_encrypted),
        );

    // 未設定公鑰時不掛載加密回應端點
    if state.sealer.is_some() {
        router = router.route("/api/nearby-cafes-open-3hr/sealed", post(nearby_cafes_sealed));
    }

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// 明文進、明文出
async fn nearby_cafes(
    State(state): State<Arc<AppState>>,
    Json(query): Json<PlaceQuery>,
) -> std::result::Result<Json<Value>, ScoutError> {
    let ctx = clock::resolve_query(&query, false)?;
    let outcome = run_pipeline(&state, &ctx).await?;
    Ok(Json(encode_plain(outcome)))
}

/// 加密 payload 進、明文出：先交給解密協作者還原三個欄位
async fn nearby_cafes_encrypted(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> std::result::Result<Json<Value>, ScoutError> {
    let query = state.decryptor.decrypt(&payload).await?;
    let ctx = clock::resolve_query(&query, true)?;
    let outcome = run_pipeline(&state, &ctx).await?;
    Ok(Json(encode_plain(outcome)))
}

/// 明文進、加密信封出
async fn nearby_cafes_sealed(
    State(state): State<Arc<AppState>>,
    Json(query): Json<PlaceQuery>,
) -> std::result::Result<Json<EncryptedEnvelope>, ScoutError> {
    let sealer = state.sealer.as_ref().ok_or_else(|| ScoutError::ConfigError {
        message: "public key not configured".to_string(),
    })?;

    let ctx = clock::resolve_query(&query, false)?;
    let outcome = run_pipeline(&state, &ctx).await?;

    let plaintext = serde_json::to_vec(&encode_plain(outcome))?;
    Ok(Json(sealer.seal(&plaintext)?))
}

async fn run_pipeline(
    state: &AppState,
    ctx: &crate::domain::model::QueryContext,
) -> Result<SearchOutcome> {
    CandidateSelector::new(&state.places, state.config.concurrent_requests)
        .select(ctx)
        .await
}

fn encode_plain(outcome: SearchOutcome) -> Value {
    match outcome {
        SearchOutcome::NoNearby => json!({
            "code": 200,
            "message": "查詢成功但無資料",
            "data": []
        }),
        SearchOutcome::Ranked(cafes) => json!({ "data": cafes }),
    }
}

impl IntoResponse for ScoutError {
    fn into_response(self) -> Response {
        match self {
            ScoutError::ValidationError { fields } => {
                (StatusCode::BAD_REQUEST, Json(fields)).into_response()
            }
            ScoutError::DecryptRejected { detail } => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "JWE 解密失敗", "detail": detail })),
            )
                .into_response(),
            other => {
                tracing::error!("❌ Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "伺服器錯誤", "detail": other.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
