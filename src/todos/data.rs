use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ApiError, ApiResult};

pub type TodoID = i64;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Todo {
    pub id: TodoID,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
}

#[derive(Deserialize, Debug)]
pub struct TodoCreate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update body. Each field distinguishes "absent" (`None`, keep
/// the stored value) from an explicit JSON `null` (`Some(None)`).
#[derive(Deserialize, Debug, Default)]
pub struct TodoUpdate {
    #[serde(default, deserialize_with = "patch_field")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch_field")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "patch_field")]
    pub completed: Option<Option<bool>>,
    #[serde(default, deserialize_with = "patch_field")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

fn patch_field<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl TodoUpdate {
    /// `title` and `completed` may be omitted but never nulled out.
    pub fn validate(&self) -> ApiResult<()> {
        if self.title == Some(None) {
            return Err(ApiError::Validation("title must not be null".to_string()));
        }
        if self.completed == Some(None) {
            return Err(ApiError::Validation("completed must be a boolean".to_string()));
        }
        Ok(())
    }
}
