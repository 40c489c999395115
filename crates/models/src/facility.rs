use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomKind {
    #[strum(serialize = "CLASSROOM")]
    Classroom,
    #[strum(serialize = "LAB")]
    Lab,
    #[strum(serialize = "AUDITORIUM")]
    Auditorium,
    #[strum(serialize = "OFFICE")]
    Office,
}

impl RoomKind {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EquipmentCondition {
    #[strum(serialize = "WORKING")]
    Working,
    #[strum(serialize = "DAMAGED")]
    Damaged,
    #[strum(serialize = "UNDER_REPAIR")]
    UnderRepair,
}

impl EquipmentCondition {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn room_kind_round_trips() {
        for kind in RoomKind::iter() {
            assert_eq!(RoomKind::from_str(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn condition_round_trips() {
        for condition in EquipmentCondition::iter() {
            assert_eq!(
                EquipmentCondition::from_str(condition.as_str()).unwrap(),
                condition
            );
        }
    }
}
