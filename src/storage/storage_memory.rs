use std::{cell::RefCell, rc::Rc};

use crate::{
  error::{Result, StoreError},
  state::State,
};

use super::storage::Storage;

#[derive(Default)]
struct Inner {
  state: State,
  fail_saves: bool,
  saves: usize,
}

/// Holds the last saved document in memory. Clones share the same document,
/// so a test can keep a handle while the store owns another.
#[derive(Clone, Default)]
pub struct MemoryStorage {
  inner: Rc<RefCell<Inner>>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_state(state: State) -> Self {
    let storage = Self::default();
    storage.inner.borrow_mut().state = state;
    return storage;
  }

  /// Makes every following `save` fail with `StorageUnavailable`.
  pub fn fail_saves(&self, fail: bool) {
    self.inner.borrow_mut().fail_saves = fail;
  }

  pub fn saves(&self) -> usize {
    self.inner.borrow().saves
  }

  pub fn saved_state(&self) -> State {
    self.inner.borrow().state.clone()
  }
}

impl Storage for MemoryStorage {
  fn location(&self) -> String {
    "memory".to_owned()
  }

  fn load(&self) -> Result<State> {
    let mut state = self.saved_state();
    state.repair(&self.location())?;
    Ok(state)
  }

  fn save(&mut self, state: &State) -> Result<()> {
    let mut inner = self.inner.borrow_mut();
    if inner.fail_saves {
      return Err(StoreError::unavailable(&self.location(), "saving is disabled"));
    }
    inner.state = state.clone();
    inner.saves += 1;
    Ok(())
  }
}
