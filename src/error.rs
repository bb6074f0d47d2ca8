#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("task with id: {id} not found")]
  NotFound { id: u64 },

  #[error("there are no tasks in the list")]
  Empty,

  #[error("no task ids left to allocate")]
  IdsExhausted,

  #[error("storage {location} is unavailable: {reason}")]
  StorageUnavailable { location: String, reason: String },
}

impl StoreError {
  pub fn unavailable(location: &str, reason: impl std::fmt::Display) -> Self {
    Self::StorageUnavailable {
      location: location.to_owned(),
      reason: reason.to_string(),
    }
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::NotFound { .. })
  }
}

pub type Result<T> = std::result::Result<T, StoreError>;
