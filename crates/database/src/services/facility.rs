use crate::entities::{equipment, reservations, rooms, users};
use crate::errors::FacilityError;
use chrono::NaiveDateTime;
use models::facility::{EquipmentCondition, RoomKind};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewRoom {
    pub building: String,
    pub number: String,
    pub capacity: i32,
    pub kind: RoomKind,
}

#[derive(Debug, Clone)]
pub struct NewEquipment {
    pub room_id: Option<Uuid>,
    pub name: String,
    pub asset_tag: String,
    pub condition: EquipmentCondition,
}

#[derive(Debug, Clone)]
pub struct NewReservation {
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub course_id: Option<Uuid>,
    pub purpose: String,
    pub starts_at: NaiveDateTime,
    pub ends_at: NaiveDateTime,
}

pub struct FacilityService;

impl FacilityService {
    pub async fn list_rooms(db: &DatabaseConnection) -> Result<Vec<rooms::Model>, FacilityError> {
        Ok(rooms::Entity::find()
            .order_by_asc(rooms::Column::Building)
            .order_by_asc(rooms::Column::Number)
            .all(db)
            .await?)
    }

    pub async fn create_room(
        db: &DatabaseConnection,
        new: NewRoom,
    ) -> Result<rooms::Model, FacilityError> {
        let id = Uuid::new_v4();
        rooms::Entity::insert(rooms::ActiveModel {
            id: Set(id),
            building: Set(new.building),
            number: Set(new.number),
            capacity: Set(new.capacity),
            kind: Set(new.kind.as_str().to_owned()),
        })
        .exec(db)
        .await?;
        rooms::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(FacilityError::NotFound("room"))
    }

    pub async fn update_room(
        db: &DatabaseConnection,
        room_id: Uuid,
        capacity: Option<i32>,
        kind: Option<RoomKind>,
    ) -> Result<rooms::Model, FacilityError> {
        let room = rooms::Entity::find_by_id(room_id)
            .one(db)
            .await?
            .ok_or(FacilityError::NotFound("room"))?;

        let mut active: rooms::ActiveModel = room.into();
        if let Some(capacity) = capacity {
            active.capacity = Set(capacity);
        }
        if let Some(kind) = kind {
            active.kind = Set(kind.as_str().to_owned());
        }
        Ok(rooms::Entity::update(active).exec(db).await?)
    }

    pub async fn list_equipment(
        db: &DatabaseConnection,
        room_id: Option<Uuid>,
    ) -> Result<Vec<equipment::Model>, FacilityError> {
        let mut query = equipment::Entity::find();
        if let Some(room_id) = room_id {
            query = query.filter(equipment::Column::RoomId.eq(room_id));
        }
        Ok(query.order_by_asc(equipment::Column::AssetTag).all(db).await?)
    }

    pub async fn create_equipment(
        db: &DatabaseConnection,
        new: NewEquipment,
    ) -> Result<equipment::Model, FacilityError> {
        if let Some(room_id) = new.room_id {
            rooms::Entity::find_by_id(room_id)
                .one(db)
                .await?
                .ok_or(FacilityError::NotFound("room"))?;
        }
        let id = Uuid::new_v4();
        equipment::Entity::insert(equipment::ActiveModel {
            id: Set(id),
            room_id: Set(new.room_id),
            name: Set(new.name),
            asset_tag: Set(new.asset_tag),
            condition: Set(new.condition.as_str().to_owned()),
        })
        .exec(db)
        .await?;
        equipment::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(FacilityError::NotFound("equipment"))
    }

    pub async fn update_equipment(
        db: &DatabaseConnection,
        equipment_id: Uuid,
        room_id: Option<Option<Uuid>>,
        condition: Option<EquipmentCondition>,
    ) -> Result<equipment::Model, FacilityError> {
        let item = equipment::Entity::find_by_id(equipment_id)
            .one(db)
            .await?
            .ok_or(FacilityError::NotFound("equipment"))?;

        let mut active: equipment::ActiveModel = item.into();
        if let Some(room_id) = room_id {
            if let Some(room_id) = room_id {
                rooms::Entity::find_by_id(room_id)
                    .one(db)
                    .await?
                    .ok_or(FacilityError::NotFound("room"))?;
            }
            active.room_id = Set(room_id);
        }
        if let Some(condition) = condition {
            active.condition = Set(condition.as_str().to_owned());
        }
        Ok(equipment::Entity::update(active).exec(db).await?)
    }

    /// Books a room, rejecting windows that overlap an existing
    /// reservation for the same room. The overlap and the insert run in
    /// one transaction so two bookings cannot interleave.
    pub async fn reserve(
        db: &DatabaseConnection,
        new: NewReservation,
    ) -> Result<reservations::Model, FacilityError> {
        if new.ends_at <= new.starts_at {
            return Err(FacilityError::WindowInverted);
        }

        let txn = db.begin().await?;

        rooms::Entity::find_by_id(new.room_id)
            .one(&txn)
            .await?
            .ok_or(FacilityError::NotFound("room"))?;
        users::Entity::find_by_id(new.user_id)
            .one(&txn)
            .await?
            .ok_or(FacilityError::NotFound("user"))?;

        // Windows conflict when starts < existing.ends && ends > existing.starts
        let conflict = reservations::Entity::find()
            .filter(reservations::Column::RoomId.eq(new.room_id))
            .filter(reservations::Column::StartsAt.lt(new.ends_at))
            .filter(reservations::Column::EndsAt.gt(new.starts_at))
            .one(&txn)
            .await?;
        if conflict.is_some() {
            return Err(FacilityError::RoomConflict);
        }

        let id = Uuid::new_v4();
        reservations::Entity::insert(reservations::ActiveModel {
            id: Set(id),
            room_id: Set(new.room_id),
            user_id: Set(new.user_id),
            course_id: Set(new.course_id),
            purpose: Set(new.purpose),
            starts_at: Set(new.starts_at),
            ends_at: Set(new.ends_at),
        })
        .exec(&txn)
        .await?;

        txn.commit().await?;

        reservations::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(FacilityError::NotFound("reservation"))
    }

    pub async fn list_reservations(
        db: &DatabaseConnection,
        room_id: Uuid,
    ) -> Result<Vec<reservations::Model>, FacilityError> {
        Ok(reservations::Entity::find()
            .filter(reservations::Column::RoomId.eq(room_id))
            .order_by_asc(reservations::Column::StartsAt)
            .all(db)
            .await?)
    }

    pub async fn find_reservation(
        db: &DatabaseConnection,
        reservation_id: Uuid,
    ) -> Result<Option<reservations::Model>, FacilityError> {
        Ok(reservations::Entity::find_by_id(reservation_id).one(db).await?)
    }

    /// Cancels a reservation; absent ids return `Ok(false)`.
    pub async fn cancel(
        db: &DatabaseConnection,
        reservation_id: Uuid,
    ) -> Result<bool, FacilityError> {
        let result = reservations::Entity::delete_by_id(reservation_id)
            .exec(db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}
