//! wardrobot-server/src/routes.rs
//!
//! The HTTP surface. Owner identity arrives in the `x-user-id` header,
//! injected by the gateway after session validation; session issuance itself
//! lives outside this service.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use wardrobot_common::models::item::{ClothingItem, SeasonTag};
use wardrobot_common::models::outfit::RecentOutfit;
use wardrobot_common::traits::repository_traits::ItemFilters;
use wardrobot_core::classify::resolve_occasion;
use wardrobot_core::services::generation_service::OutfitPage;
use wardrobot_core::services::wardrobe_service::ItemRegistration;
use wardrobot_core::Error;

use crate::context::ServerContext;

pub fn router(ctx: Arc<ServerContext>) -> Router {
    Router::new()
        .route("/items", post(create_item).get(list_items))
        .route("/items/{id}/wear", post(wear_item))
        .route("/items/{id}/wash", post(wash_item))
        .route("/items/{id}", delete(delete_item))
        .route("/items/wear-outfit", post(wear_outfit))
        .route("/outfits/generate", get(generate_outfits))
        .route("/outfits/worn", get(worn_outfits))
        .with_state(ctx)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

/// Wraps the core error for HTTP status mapping.
struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::Conflict(_) => StatusCode::CONFLICT,
            Error::MissingCategory(_) | Error::Parse(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

fn owner_id(headers: &HeaderMap) -> Result<Uuid, ApiError> {
    let raw = headers
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError(Error::Parse("missing x-user-id header".to_string())))?;
    raw.parse()
        .map_err(|_| ApiError(Error::Parse(format!("invalid x-user-id header: {}", raw))))
}

async fn create_item(
    State(ctx): State<Arc<ServerContext>>,
    headers: HeaderMap,
    Json(registration): Json<ItemRegistration>,
) -> Result<Json<ClothingItem>, ApiError> {
    let owner = owner_id(&headers)?;
    let item = ctx.wardrobe_service.create_item(owner, &registration).await?;
    Ok(Json(item))
}

#[derive(Debug, Deserialize)]
struct ListItemsQuery {
    season: Option<String>,
    occasion: Option<String>,
    kind: Option<String>,
    color: Option<String>,
    search: Option<String>,
}

/// "All" and absent both mean "no constraint" for a browse filter.
fn filter_value(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty() && v != "All")
}

async fn list_items(
    State(ctx): State<Arc<ServerContext>>,
    headers: HeaderMap,
    Query(query): Query<ListItemsQuery>,
) -> Result<Json<Vec<ClothingItem>>, ApiError> {
    let owner = owner_id(&headers)?;

    let filters = ItemFilters {
        season: filter_value(query.season)
            .map(|s| s.parse().map_err(Error::Parse))
            .transpose()?,
        occasion: filter_value(query.occasion)
            .map(|o| o.parse().map_err(Error::Parse))
            .transpose()?,
        kind: filter_value(query.kind)
            .map(|k| k.parse().map_err(Error::Parse))
            .transpose()?,
        color: filter_value(query.color),
        search: query.search.filter(|s| !s.is_empty()),
    };

    let items = ctx.wardrobe_service.list_items(owner, &filters).await?;
    Ok(Json(items))
}

#[derive(Debug, Deserialize)]
struct GenerateQuery {
    text: String,
    season: String,
    page: Option<i64>,
}

async fn generate_outfits(
    State(ctx): State<Arc<ServerContext>>,
    headers: HeaderMap,
    Query(query): Query<GenerateQuery>,
) -> Result<Json<OutfitPage>, ApiError> {
    let owner = owner_id(&headers)?;

    let occasion = resolve_occasion(ctx.classifier.as_ref(), &query.text).await?;

    let requested: SeasonTag = query.season.parse().map_err(Error::Parse)?;
    let mut seasons = vec![requested];
    // The all-season tag always rides along with the requested season.
    if requested != SeasonTag::Spring {
        seasons.push(SeasonTag::Spring);
    }

    let page = ctx
        .generation_service
        .generate(owner, occasion, &seasons, query.page.unwrap_or(1))
        .await?;
    Ok(Json(page))
}

#[derive(Debug, Deserialize)]
struct WearItemBody {
    outfit: Option<Vec<Uuid>>,
}

#[derive(Debug, Serialize)]
struct WearItemResponse {
    message: &'static str,
    used_times: i32,
}

async fn wear_item(
    State(ctx): State<Arc<ServerContext>>,
    headers: HeaderMap,
    Path(item_id): Path<Uuid>,
    body: Option<Json<WearItemBody>>,
) -> Result<Json<WearItemResponse>, ApiError> {
    let owner = owner_id(&headers)?;
    let co_worn = body.and_then(|Json(b)| b.outfit);

    let used_times = ctx
        .wardrobe_service
        .mark_worn(item_id, owner, co_worn.as_deref())
        .await?;
    Ok(Json(WearItemResponse {
        message: "Usage incremented",
        used_times,
    }))
}

#[derive(Debug, Deserialize)]
struct WearOutfitBody {
    outfit: Vec<Uuid>,
}

async fn wear_outfit(
    State(ctx): State<Arc<ServerContext>>,
    headers: HeaderMap,
    Json(body): Json<WearOutfitBody>,
) -> Result<StatusCode, ApiError> {
    let owner = owner_id(&headers)?;
    ctx.wardrobe_service.wear_outfit(owner, &body.outfit).await?;
    Ok(StatusCode::OK)
}

async fn wash_item(
    State(ctx): State<Arc<ServerContext>>,
    headers: HeaderMap,
    Path(item_id): Path<Uuid>,
) -> Result<Json<ClothingItem>, ApiError> {
    let owner = owner_id(&headers)?;
    let item = ctx.wardrobe_service.start_washing(item_id, owner).await?;
    Ok(Json(item))
}

async fn delete_item(
    State(ctx): State<Arc<ServerContext>>,
    headers: HeaderMap,
    Path(item_id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let owner = owner_id(&headers)?;
    ctx.wardrobe_service.delete_item(item_id, owner).await?;
    Ok(Json(serde_json::json!({ "message": "Item deleted successfully" })))
}

async fn worn_outfits(
    State(ctx): State<Arc<ServerContext>>,
    headers: HeaderMap,
) -> Result<Json<Vec<RecentOutfit>>, ApiError> {
    let owner = owner_id(&headers)?;
    let outfits = ctx.wardrobe_service.recent_outfits(owner).await?;
    Ok(Json(outfits))
}
