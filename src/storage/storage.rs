use crate::{error::Result, state::State};

/// Durable home of a [`State`] document. `save` replaces the whole document.
pub trait Storage {
  fn location(&self) -> String;
  fn load(&self) -> Result<State>;
  fn save(&mut self, state: &State) -> Result<()>;
}
