use log::debug;

use crate::{
  error::{Result, StoreError},
  state::State,
  storage::Storage,
  task::Task,
};

/// The durable task list. Every mutation is written through to storage
/// before it becomes visible in memory.
pub struct TaskStore {
  storage: Box<dyn Storage>,
  state: State,
}

impl TaskStore {
  pub fn open(storage: Box<dyn Storage>) -> Result<Self> {
    let state = storage.load()?;
    debug!(
      "opened store at {} with {} tasks",
      storage.location(),
      state.tasks.len()
    );
    Ok(Self { storage, state })
  }

  pub fn location(&self) -> String {
    self.storage.location()
  }

  pub fn next_id(&self) -> u64 {
    self.state.next_id
  }

  pub fn add(&mut self, description: &str, tag: Option<&str>) -> Result<Task> {
    self.mutate(|state| {
      let task = Task::new(state.allocate_id()?, description, tag);
      state.tasks.push(task.clone());
      Ok(task)
    })
  }

  pub fn task(&self, id: u64) -> Result<Task> {
    self
      .state
      .tasks
      .iter()
      .find(|t| t.id() == id)
      .cloned()
      .ok_or(StoreError::NotFound { id })
  }

  pub fn all_tasks(&self) -> Vec<Task> {
    self.state.tasks.clone()
  }

  pub fn pending_tasks(&self) -> Vec<Task> {
    self.filtered(Task::is_pending)
  }

  pub fn completed_tasks(&self) -> Vec<Task> {
    self.filtered(Task::is_completed)
  }

  /// Id of the most recently added task that is still stored.
  pub fn last_id(&self) -> Option<u64> {
    self.state.tasks.last().map(|t| t.id())
  }

  pub fn update_task(&mut self, id: u64, description: &str) -> Result<(String, Task)> {
    let task = self.mutate(|state| {
      let task = state.task_mut(id)?;
      task.set_description(description);
      Ok(task.clone())
    })?;
    Ok((format!("task {} updated: {}", id, task.description()), task))
  }

  pub fn set_tag(&mut self, id: u64, tag: Option<&str>) -> Result<Task> {
    self.mutate(|state| {
      let task = state.task_mut(id)?;
      task.set_tag(tag);
      Ok(task.clone())
    })
  }

  pub fn mark_as_complete(&mut self, id: u64) -> Result<Task> {
    self.mutate(|state| {
      let task = state.task_mut(id)?;
      task.complete();
      Ok(task.clone())
    })
  }

  pub fn mark_as_pending(&mut self, id: u64) -> Result<Task> {
    self.mutate(|state| {
      let task = state.task_mut(id)?;
      task.reopen();
      Ok(task.clone())
    })
  }

  pub fn remove_task(&mut self, id: u64) -> Result<()> {
    self.mutate(|state| {
      let position = state.position_by_id(id).ok_or(StoreError::NotFound { id })?;
      state.tasks.remove(position);
      Ok(())
    })
  }

  /// Removes the most recently added task and returns it.
  pub fn remove_last(&mut self) -> Result<Task> {
    self.mutate(|state| state.tasks.pop().ok_or(StoreError::Empty))
  }

  pub fn total_tasks(&self) -> usize {
    self.state.tasks.len()
  }

  pub fn pending_count(&self) -> usize {
    self.state.tasks.iter().filter(|t| t.is_pending()).count()
  }

  /// Drops every task. The id counter is kept so ids are never handed out twice.
  pub fn flush(&mut self) -> Result<()> {
    self.mutate(|state| {
      state.tasks.clear();
      Ok(())
    })
  }

  fn filtered(&self, predicate: impl Fn(&Task) -> bool) -> Vec<Task> {
    self
      .state
      .tasks
      .iter()
      .filter(|t| predicate(*t))
      .cloned()
      .collect()
  }

  fn mutate<T>(&mut self, apply: impl FnOnce(&mut State) -> Result<T>) -> Result<T> {
    let mut next_state = self.state.clone();
    let result = apply(&mut next_state)?;
    self.storage.save(&next_state)?;
    self.state = next_state;
    return Ok(result);
  }
}
