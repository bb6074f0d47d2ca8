use std::collections::HashSet;

use log::warn;

use crate::{
  error::{Result, StoreError},
  task::Task,
};

/// The whole persisted document: the id counter plus tasks in insertion order.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct State {
  pub next_id: u64,
  #[serde(default)]
  pub tasks: Vec<Task>,
}

impl Default for State {
  fn default() -> Self {
    Self {
      next_id: 1,
      tasks: Vec::new(),
    }
  }
}

impl State {
  pub fn allocate_id(&mut self) -> Result<u64> {
    let id = self.next_id;
    self.next_id = id.checked_add(1).ok_or(StoreError::IdsExhausted)?;
    return Ok(id);
  }

  pub fn position_by_id(&self, id: u64) -> Option<usize> {
    self.tasks.iter().position(|t| t.id() == id)
  }

  pub fn task_mut(&mut self, id: u64) -> Result<&mut Task> {
    self
      .tasks
      .iter_mut()
      .find(|t| t.id() == id)
      .ok_or(StoreError::NotFound { id })
  }

  /// Checks a freshly loaded document: ids must be unique, and the counter is
  /// raised above the largest stored id when it lags behind.
  pub fn repair(&mut self, location: &str) -> Result<()> {
    let mut seen = HashSet::with_capacity(self.tasks.len());
    for task in self.tasks.iter() {
      if !seen.insert(task.id()) {
        return Err(StoreError::unavailable(
          location,
          format!("duplicate task id: {}", task.id()),
        ));
      }
    }

    let mut min_next_id = 1;
    for task in self.tasks.iter() {
      let after = task
        .id()
        .checked_add(1)
        .ok_or_else(|| StoreError::unavailable(location, "task id overflow"))?;
      min_next_id = min_next_id.max(after);
    }
    if self.next_id < min_next_id {
      warn!(
        "next id {} in {} collides with stored tasks, raised to {}",
        self.next_id, location, min_next_id
      );
      self.next_id = min_next_id;
    }
    Ok(())
  }
}
