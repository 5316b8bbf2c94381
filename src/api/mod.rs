use crate::core::service::VehicleService;
use crate::domain::model::{EnrichedVehicle, Vehicle};
use crate::domain::ports::{Locator, VehicleStore};
use crate::utils::error::VehicleError;
use crate::utils::validation::Validate;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use std::sync::Arc;

type SharedService<S, L> = Arc<VehicleService<S, L>>;

/// REST surface over the vehicle service.
///
/// Only not-found and validation failures map to error statuses here;
/// downstream outages never reach this layer, so `GET /cars/{id}` stays a
/// 200 as long as the vehicle exists.
pub fn router<S, L>(service: SharedService<S, L>) -> Router
where
    S: VehicleStore + 'static,
    L: Locator + 'static,
{
    Router::new()
        .route("/cars", get(list_cars::<S, L>).post(create_car::<S, L>))
        .route(
            "/cars/:id",
            get(get_car::<S, L>)
                .put(update_car::<S, L>)
                .delete(delete_car::<S, L>),
        )
        .with_state(service)
}

async fn list_cars<S: VehicleStore, L: Locator>(
    State(service): State<SharedService<S, L>>,
) -> Result<Json<Vec<Vehicle>>, ApiError> {
    Ok(Json(service.list().await?))
}

async fn get_car<S: VehicleStore, L: Locator>(
    State(service): State<SharedService<S, L>>,
    Path(id): Path<i64>,
) -> Result<Json<EnrichedVehicle>, ApiError> {
    Ok(Json(service.get(id).await?))
}

async fn create_car<S: VehicleStore, L: Locator>(
    State(service): State<SharedService<S, L>>,
    Json(mut vehicle): Json<Vehicle>,
) -> Result<Response, ApiError> {
    vehicle.validate()?;
    // Identifiers are store-assigned; a client-supplied one is ignored.
    vehicle.id = None;

    let saved = service.save(vehicle).await?;
    let location = format!("/cars/{}", saved.id.unwrap_or_default());

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(saved),
    )
        .into_response())
}

async fn update_car<S: VehicleStore, L: Locator>(
    State(service): State<SharedService<S, L>>,
    Path(id): Path<i64>,
    Json(mut vehicle): Json<Vehicle>,
) -> Result<Json<Vehicle>, ApiError> {
    vehicle.validate()?;
    vehicle.id = Some(id);
    Ok(Json(service.save(vehicle).await?))
}

async fn delete_car<S: VehicleStore, L: Locator>(
    State(service): State<SharedService<S, L>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Maps the error taxonomy onto HTTP statuses.
pub struct ApiError(VehicleError);

impl From<VehicleError> for ApiError {
    fn from(error: VehicleError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            VehicleError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            VehicleError::Validation { .. } => (StatusCode::BAD_REQUEST, self.0.to_string()),
            _ => {
                tracing::error!("request failed: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal error".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}
