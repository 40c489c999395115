use crate::auth::AuthSession;
use crate::dtos::facility::{
    CancelledResponse, CreateEquipmentRequest, CreateReservationRequest, CreateRoomRequest,
    EquipmentQueryParams, EquipmentResponse, ReservationResponse, RoomResponse,
    UpdateEquipmentRequest, UpdateRoomRequest,
};
use crate::errors::ApiError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use database::services::facility::{
    FacilityService, NewEquipment, NewReservation, NewRoom,
};
use sea_orm::prelude::Uuid;

/// List rooms
#[utoipa::path(
    get,
    path = "/rooms",
    responses((status = 200, description = "Rooms retrieved", body = [RoomResponse])),
    security(("bearer" = [])),
    tag = "Facilities"
)]
pub async fn list_rooms(
    State(state): State<AppState>,
    _session: AuthSession,
) -> Result<Json<Vec<RoomResponse>>, ApiError> {
    let rooms = FacilityService::list_rooms(&state.db).await?;
    Ok(Json(rooms.into_iter().map(RoomResponse::from).collect()))
}

/// Create a room (staff/admin)
#[utoipa::path(
    post,
    path = "/rooms",
    request_body = CreateRoomRequest,
    responses(
        (status = 201, description = "Room created", body = RoomResponse),
        (status = 403, description = "Caller may not manage facilities")
    ),
    security(("bearer" = [])),
    tag = "Facilities"
)]
pub async fn create_room(
    State(state): State<AppState>,
    session: AuthSession,
    Json(request): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<RoomResponse>), ApiError> {
    session.require_staff()?;

    let room = FacilityService::create_room(
        &state.db,
        NewRoom {
            building: request.building,
            number: request.number,
            capacity: request.capacity,
            kind: request.kind,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(room.into())))
}

/// Update a room's capacity or kind (staff/admin)
#[utoipa::path(
    put,
    path = "/rooms/{id}",
    params(("id" = Uuid, Path, description = "Room ID")),
    request_body = UpdateRoomRequest,
    responses(
        (status = 200, description = "Room updated", body = RoomResponse),
        (status = 403, description = "Caller may not manage facilities"),
        (status = 404, description = "Room not found")
    ),
    security(("bearer" = [])),
    tag = "Facilities"
)]
pub async fn update_room(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRoomRequest>,
) -> Result<Json<RoomResponse>, ApiError> {
    session.require_staff()?;

    let room =
        FacilityService::update_room(&state.db, id, request.capacity, request.kind).await?;
    Ok(Json(room.into()))
}

/// List equipment, optionally per room
#[utoipa::path(
    get,
    path = "/equipment",
    params(EquipmentQueryParams),
    responses((status = 200, description = "Equipment retrieved", body = [EquipmentResponse])),
    security(("bearer" = [])),
    tag = "Facilities"
)]
pub async fn list_equipment(
    State(state): State<AppState>,
    _session: AuthSession,
    Query(params): Query<EquipmentQueryParams>,
) -> Result<Json<Vec<EquipmentResponse>>, ApiError> {
    let items = FacilityService::list_equipment(&state.db, params.room_id).await?;
    Ok(Json(items.into_iter().map(EquipmentResponse::from).collect()))
}

/// Register equipment (staff/admin)
#[utoipa::path(
    post,
    path = "/equipment",
    request_body = CreateEquipmentRequest,
    responses(
        (status = 201, description = "Equipment registered", body = EquipmentResponse),
        (status = 403, description = "Caller may not manage facilities"),
        (status = 404, description = "Room not found")
    ),
    security(("bearer" = [])),
    tag = "Facilities"
)]
pub async fn create_equipment(
    State(state): State<AppState>,
    session: AuthSession,
    Json(request): Json<CreateEquipmentRequest>,
) -> Result<(StatusCode, Json<EquipmentResponse>), ApiError> {
    session.require_staff()?;

    let item = FacilityService::create_equipment(
        &state.db,
        NewEquipment {
            room_id: request.room_id,
            name: request.name,
            asset_tag: request.asset_tag,
            condition: request.condition,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(item.into())))
}

/// Move equipment or update its condition (staff/admin)
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    params(("id" = Uuid, Path, description = "Equipment ID")),
    request_body = UpdateEquipmentRequest,
    responses(
        (status = 200, description = "Equipment updated", body = EquipmentResponse),
        (status = 403, description = "Caller may not manage facilities"),
        (status = 404, description = "Equipment or room not found")
    ),
    security(("bearer" = [])),
    tag = "Facilities"
)]
pub async fn update_equipment(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateEquipmentRequest>,
) -> Result<Json<EquipmentResponse>, ApiError> {
    session.require_staff()?;

    let item =
        FacilityService::update_equipment(&state.db, id, request.room_id, request.condition)
            .await?;
    Ok(Json(item.into()))
}

/// Reserve a room
#[utoipa::path(
    post,
    path = "/reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ReservationResponse),
        (status = 404, description = "Room not found"),
        (status = 409, description = "Window overlaps an existing reservation"),
        (status = 422, description = "Window ends before it starts")
    ),
    security(("bearer" = [])),
    tag = "Facilities"
)]
pub async fn create_reservation(
    State(state): State<AppState>,
    session: AuthSession,
    Json(request): Json<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ReservationResponse>), ApiError> {
    let reservation = FacilityService::reserve(
        &state.db,
        NewReservation {
            room_id: request.room_id,
            user_id: session.user_id,
            course_id: request.course_id,
            purpose: request.purpose,
            starts_at: request.starts_at,
            ends_at: request.ends_at,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(reservation.into())))
}

/// List a room's reservations
#[utoipa::path(
    get,
    path = "/rooms/{id}/reservations",
    params(("id" = Uuid, Path, description = "Room ID")),
    responses((status = 200, description = "Reservations retrieved", body = [ReservationResponse])),
    security(("bearer" = [])),
    tag = "Facilities"
)]
pub async fn list_room_reservations(
    State(state): State<AppState>,
    _session: AuthSession,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<ReservationResponse>>, ApiError> {
    let reservations = FacilityService::list_reservations(&state.db, id).await?;
    Ok(Json(
        reservations
            .into_iter()
            .map(ReservationResponse::from)
            .collect(),
    ))
}

/// Cancel a reservation (owner or staff)
///
/// Responds `{ "cancelled": false }` for ids that do not exist.
#[utoipa::path(
    delete,
    path = "/reservations/{id}",
    params(("id" = Uuid, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Cancellation attempted", body = CancelledResponse),
        (status = 403, description = "Not the caller's reservation")
    ),
    security(("bearer" = [])),
    tag = "Facilities"
)]
pub async fn cancel_reservation(
    State(state): State<AppState>,
    session: AuthSession,
    Path(id): Path<Uuid>,
) -> Result<Json<CancelledResponse>, ApiError> {
    if let Some(reservation) = FacilityService::find_reservation(&state.db, id).await? {
        session.require_self_or_staff(reservation.user_id)?;
    }

    let cancelled = FacilityService::cancel(&state.db, id).await?;
    Ok(Json(CancelledResponse { cancelled }))
}
