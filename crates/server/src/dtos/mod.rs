use serde::{Deserialize, Deserializer};

pub mod announcement;
pub mod auth;
pub mod course;
pub mod enrollment;
pub mod facility;
pub mod gradebook;

/// Distinguishes an absent field (no change) from an explicit null
/// (clear the value) in partial-update requests.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
