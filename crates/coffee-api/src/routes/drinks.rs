//! Drinks API 라우트
//!
//! 메뉴 음료 조회/관리 API를 제공합니다.
//!
//! # 엔드포인트
//!
//! - `GET /` - 서버 응답 확인
//! - `GET /drinks` - 공개 메뉴 (재료 이름 제외)
//! - `GET /drinks-detail` - 상세 메뉴 (`get:drinks-detail`)
//! - `POST /drinks` - 음료 생성 (`post:drinks`)
//! - `PATCH /drinks/{id}` - 음료 수정 (`patch:drinks`)
//! - `DELETE /drinks/{id}` - 음료 삭제 (`delete:drinks`)

use axum::{
    extract::{Path, State},
    middleware,
    routing::{delete, get, patch, post},
    Extension, Json, Router,
};
use coffee_core::{Drink, DrinkLong, DrinkShort, Ingredient};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use validator::Validate;

use crate::auth::{require_permission, Claims, Permission, PermissionGuard, TokenVerifier};
use crate::error::{ApiError, ApiResult};
use crate::extract::ValidatedJson;
use crate::state::AppState;

// ================================================================================================
// Request/Response Types
// ================================================================================================

/// 음료 생성 요청
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDrinkRequest {
    #[validate(length(min = 1, max = 80, message = "제목은 1~80자여야 합니다"))]
    pub title: String,
    #[validate(length(min = 1, message = "레시피에 재료가 하나 이상 필요합니다"), nested)]
    pub recipe: Vec<Ingredient>,
}

/// 음료 수정 요청. 있는 필드만 변경합니다.
#[derive(Debug, Deserialize, Validate)]
pub struct PatchDrinkRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 80, message = "제목은 1~80자여야 합니다"))]
    pub title: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, message = "레시피에 재료가 하나 이상 필요합니다"), nested)]
    pub recipe: Option<Vec<Ingredient>>,
}

/// 기본 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// 음료 목록 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct DrinksResponse<T> {
    pub success: bool,
    pub drinks: Vec<T>,
}

impl<T> DrinksResponse<T> {
    fn new(drinks: Vec<T>) -> Self {
        Self {
            success: true,
            drinks,
        }
    }
}

/// 삭제 응답
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteDrinkResponse {
    pub success: bool,
    /// 삭제된 음료 id
    pub delete: i32,
}

// ================================================================================================
// Handlers
// ================================================================================================

/// GET /
async fn index() -> Json<SuccessResponse> {
    Json(SuccessResponse { success: true })
}

/// 공개 메뉴 조회.
///
/// GET /drinks
async fn list_drinks(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DrinksResponse<DrinkShort>>> {
    let drinks = state.drinks.list_all().await.map_err(ApiError::from_read)?;
    if drinks.is_empty() {
        return Err(ApiError::NotFound);
    }

    debug!(count = drinks.len(), "Listing drinks");
    Ok(Json(DrinksResponse::new(
        drinks.iter().map(Drink::short).collect(),
    )))
}

/// 상세 메뉴 조회.
///
/// GET /drinks-detail
async fn list_drinks_detail(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<DrinksResponse<DrinkLong>>> {
    let drinks = state.drinks.list_all().await.map_err(ApiError::from_read)?;
    if drinks.is_empty() {
        return Err(ApiError::NotFound);
    }

    debug!(count = drinks.len(), "Listing drinks with recipes");
    Ok(Json(DrinksResponse::new(
        drinks.iter().map(Drink::long).collect(),
    )))
}

/// 음료 생성.
///
/// POST /drinks
async fn create_drink(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    ValidatedJson(request): ValidatedJson<CreateDrinkRequest>,
) -> ApiResult<Json<DrinksResponse<DrinkLong>>> {
    let drink = state
        .drinks
        .create(&request.title, &request.recipe)
        .await
        .map_err(ApiError::from_write)?;

    info!(
        drink_id = drink.id(),
        title = %drink.title,
        subject = claims.subject(),
        "Drink created"
    );
    Ok(Json(DrinksResponse::new(vec![drink.long()])))
}

/// 음료 수정.
///
/// PATCH /drinks/{id}
async fn update_drink(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<PatchDrinkRequest>,
) -> ApiResult<Json<DrinksResponse<DrinkLong>>> {
    let mut drink = find_drink(&state, &id).await?;

    if let Some(title) = request.title {
        drink.title = title;
    }
    if let Some(recipe) = request.recipe {
        drink.recipe = recipe;
    }

    let drink = state
        .drinks
        .update(&drink)
        .await
        .map_err(ApiError::from_write)?;

    info!(drink_id = drink.id(), subject = claims.subject(), "Drink updated");
    Ok(Json(DrinksResponse::new(vec![drink.long()])))
}

/// 음료 삭제.
///
/// DELETE /drinks/{id}
async fn delete_drink(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteDrinkResponse>> {
    let drink = find_drink(&state, &id).await?;

    state
        .drinks
        .delete(&drink)
        .await
        .map_err(ApiError::from_write)?;

    info!(drink_id = drink.id(), subject = claims.subject(), "Drink deleted");
    Ok(Json(DeleteDrinkResponse {
        success: true,
        delete: drink.id(),
    }))
}

/// 경로의 id로 음료를 찾습니다. 정수가 아닌 id는 없는 음료로 취급합니다.
async fn find_drink(state: &AppState, raw_id: &str) -> ApiResult<Drink> {
    let id: i32 = raw_id.parse().map_err(|_| ApiError::NotFound)?;

    state
        .drinks
        .get_by_id(id)
        .await
        .map_err(ApiError::from_write)?
        .ok_or(ApiError::NotFound)
}

// ================================================================================================
// Router
// ================================================================================================

/// Drinks 라우터 생성.
///
/// 보호된 메서드마다 요구 권한을 가진 가드를 `route_layer`로 붙입니다.
pub fn drinks_router(verifier: &Arc<TokenVerifier>) -> Router<Arc<AppState>> {
    let guard = |permission| PermissionGuard::new(Arc::clone(verifier), permission);

    Router::new()
        .route("/", get(index))
        .route(
            "/drinks",
            get(list_drinks).merge(post(create_drink).route_layer(
                middleware::from_fn_with_state(guard(Permission::PostDrinks), require_permission),
            )),
        )
        .route(
            "/drinks-detail",
            get(list_drinks_detail).route_layer(middleware::from_fn_with_state(
                guard(Permission::GetDrinksDetail),
                require_permission,
            )),
        )
        .route(
            "/drinks/{id}",
            patch(update_drink)
                .route_layer(middleware::from_fn_with_state(
                    guard(Permission::PatchDrinks),
                    require_permission,
                ))
                .merge(delete(delete_drink).route_layer(middleware::from_fn_with_state(
                    guard(Permission::DeleteDrinks),
                    require_permission,
                ))),
        )
}
