use chrono::NaiveDateTime;
use database::entities::{equipment, reservations, rooms};
use models::facility::{EquipmentCondition, RoomKind};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRoomRequest {
    pub building: String,
    pub number: String,
    pub capacity: i32,
    #[schema(value_type = String)]
    pub kind: RoomKind,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoomRequest {
    pub capacity: Option<i32>,
    #[schema(value_type = Option<String>)]
    pub kind: Option<RoomKind>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoomResponse {
    pub id: Uuid,
    pub building: String,
    pub number: String,
    pub capacity: i32,
    pub kind: String,
}

impl From<rooms::Model> for RoomResponse {
    fn from(room: rooms::Model) -> Self {
        RoomResponse {
            id: room.id,
            building: room.building,
            number: room.number,
            capacity: room.capacity,
            kind: room.kind,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEquipmentRequest {
    pub room_id: Option<Uuid>,
    pub name: String,
    pub asset_tag: String,
    #[schema(value_type = String)]
    pub condition: EquipmentCondition,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateEquipmentRequest {
    // Absent = unchanged, null = unassigned from its room.
    #[serde(default, deserialize_with = "super::double_option")]
    pub room_id: Option<Option<Uuid>>,
    #[schema(value_type = Option<String>)]
    pub condition: Option<EquipmentCondition>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EquipmentResponse {
    pub id: Uuid,
    pub room_id: Option<Uuid>,
    pub name: String,
    pub asset_tag: String,
    pub condition: String,
}

impl From<equipment::Model> for EquipmentResponse {
    fn from(item: equipment::Model) -> Self {
        EquipmentResponse {
            id: item.id,
            room_id: item.room_id,
            name: item.name,
            asset_tag: item.asset_tag,
            condition: item.condition,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
pub struct EquipmentQueryParams {
    pub room_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReservationRequest {
    pub room_id: Uuid,
    pub course_id: Option<Uuid>,
    pub purpose: String,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationResponse {
    pub id: Uuid,
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub course_id: Option<Uuid>,
    pub purpose: String,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
}

impl From<reservations::Model> for ReservationResponse {
    fn from(reservation: reservations::Model) -> Self {
        ReservationResponse {
            id: reservation.id,
            room_id: reservation.room_id,
            user_id: reservation.user_id,
            course_id: reservation.course_id,
            purpose: reservation.purpose,
            starts_at: reservation.starts_at,
            ends_at: reservation.ends_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CancelledResponse {
    pub cancelled: bool,
}
