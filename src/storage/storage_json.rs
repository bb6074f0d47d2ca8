use std::{
  io::{ErrorKind, Write},
  path::{Path, PathBuf},
};

use log::debug;

use crate::{
  error::{Result, StoreError},
  state::State,
};

use super::storage::Storage;

/// Keeps the whole store in a single pretty-printed JSON file.
pub struct JsonStorage {
  filepath: PathBuf,
  tmp_dir: Option<PathBuf>,
}

impl JsonStorage {
  pub fn new(filepath: impl AsRef<Path>) -> Self {
    Self {
      filepath: filepath.as_ref().to_path_buf(),
      tmp_dir: None,
    }
  }

  #[cfg(test)]
  fn with_tmp_dir(mut self, tmp_dir: impl AsRef<Path>) -> Self {
    self.tmp_dir = Some(tmp_dir.as_ref().to_path_buf());
    self
  }

  pub fn filepath(&self) -> &Path {
    self.filepath.as_path()
  }

  fn parent_dir(&self) -> PathBuf {
    match self.filepath.parent() {
      Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
      _ => PathBuf::from("."),
    }
  }

  fn unavailable(&self, reason: impl std::fmt::Display) -> StoreError {
    StoreError::unavailable(&self.location(), reason)
  }
}

impl Storage for JsonStorage {
  fn location(&self) -> String {
    self.filepath.display().to_string()
  }

  fn load(&self) -> Result<State> {
    let content = match std::fs::read_to_string(&self.filepath) {
      Ok(content) => content,
      Err(err) if err.kind() == ErrorKind::NotFound => {
        debug!("no database at {}, starting empty", self.location());
        return Ok(State::default());
      }
      Err(err) => return Err(self.unavailable(err)),
    };

    if content.trim().is_empty() {
      return Ok(State::default());
    }

    let mut state: State = serde_json::from_str(&content).map_err(|err| self.unavailable(err))?;
    state.repair(&self.location())?;

    debug!(
      "restored {} tasks from: {}, next id: {}",
      state.tasks.len(),
      self.location(),
      state.next_id
    );
    return Ok(state);
  }

  fn save(&mut self, state: &State) -> Result<()> {
    let dir = self.parent_dir();
    std::fs::create_dir_all(&dir).map_err(|err| self.unavailable(err))?;

    // The temp file lives next to the target so the final rename stays on one
    // filesystem and readers never observe a partial document.
    let tmp_dir = self.tmp_dir.clone().unwrap_or(dir);
    let mut tmp_file = tempfile::Builder::new()
      .prefix(".tasker")
      .suffix(".json.tmp")
      .tempfile_in(&tmp_dir)
      .map_err(|err| self.unavailable(err))?;

    serde_json::to_writer_pretty(tmp_file.as_file_mut(), state).map_err(|err| self.unavailable(err))?;
    tmp_file.flush().map_err(|err| self.unavailable(err))?;
    tmp_file
      .as_file()
      .sync_all()
      .map_err(|err| self.unavailable(err))?;

    tmp_file
      .persist(&self.filepath)
      .map_err(|err| self.unavailable(err.error))?;

    debug!("saved {} tasks to: {}", state.tasks.len(), self.location());
    Ok(())
  }
}

#[cfg(test)]
mod test {
  use super::{JsonStorage, Storage};
  use crate::{state::State, task::Task};

  fn get_new_storage() -> (tempfile::TempDir, JsonStorage) {
    let dir = tempfile::Builder::new().prefix("tasker").tempdir().unwrap();
    let storage = JsonStorage::new(dir.path().join("tasks.json"));
    (dir, storage)
  }

  #[test]
  fn load_missing_file_is_empty_state() {
    let (_dir, storage) = get_new_storage();
    let state = storage.load().unwrap();

    assert_eq!(state, State::default());
    assert!(!storage.filepath().exists());
  }

  #[test]
  fn load_empty_file_is_empty_state() {
    let (_dir, storage) = get_new_storage();
    std::fs::write(storage.filepath(), "").unwrap();

    assert_eq!(storage.load().unwrap(), State::default());
  }

  #[test]
  fn save_then_load() {
    let (_dir, mut storage) = get_new_storage();
    let mut done = Task::new(1, "Buy milk", None);
    done.complete();
    let state = State {
      next_id: 4,
      tasks: vec![done, Task::new(3, "Buy eggs", Some("shop"))],
    };

    storage.save(&state).unwrap();
    let restored = JsonStorage::new(storage.filepath()).load().unwrap();

    assert_eq!(restored, state);
  }

  #[test]
  fn save_creates_missing_directories() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = JsonStorage::new(dir.path().join("nested").join("db").join("tasks.json"));

    storage.save(&State::default()).unwrap();

    assert!(storage.filepath().exists());
  }

  #[test]
  fn save_leaves_no_temp_files() {
    let (dir, mut storage) = get_new_storage();
    storage.save(&State::default()).unwrap();
    storage.save(&State::default()).unwrap();

    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
  }

  #[test]
  fn load_garbage_is_unavailable() {
    let (_dir, storage) = get_new_storage();
    std::fs::write(storage.filepath(), "{ not json").unwrap();

    let err = storage.load().expect_err("garbage must not load");
    assert!(matches!(err, crate::StoreError::StorageUnavailable { .. }));
  }

  #[test]
  fn load_repairs_lagging_counter() {
    let (_dir, mut storage) = get_new_storage();
    let state = State {
      next_id: 1,
      tasks: vec![Task::new(4, "a", None)],
    };
    storage.save(&state).unwrap();

    assert_eq!(storage.load().unwrap().next_id, 5);
  }

  #[test]
  fn failed_save_keeps_previous_document() {
    let (dir, mut storage) = get_new_storage();
    let state = State {
      next_id: 3,
      tasks: vec![Task::new(1, "Buy milk", None), Task::new(2, "Buy eggs", None)],
    };
    storage.save(&state).unwrap();
    let saved_bytes = std::fs::read(storage.filepath()).unwrap();

    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let mut broken = JsonStorage::new(storage.filepath()).with_tmp_dir(blocker.join("tmp"));
    let err = broken
      .save(&State::default())
      .expect_err("temp dir is under a regular file");
    assert!(matches!(err, crate::StoreError::StorageUnavailable { .. }));

    assert_eq!(std::fs::read(storage.filepath()).unwrap(), saved_bytes);
    assert_eq!(JsonStorage::new(storage.filepath()).load().unwrap(), state);
  }

  #[test]
  fn load_id_at_the_limit_is_unavailable() {
    let (_dir, storage) = get_new_storage();
    let task = serde_json::to_value(Task::new(u64::MAX, "a", None)).unwrap();
    let document = serde_json::json!({ "next_id": 1, "tasks": [task] });
    std::fs::write(storage.filepath(), document.to_string()).unwrap();

    let err = storage.load().expect_err("no counter can follow u64::MAX");
    assert!(matches!(err, crate::StoreError::StorageUnavailable { .. }));
  }

  #[test]
  fn save_into_file_path_is_unavailable() {
    let (dir, _) = get_new_storage();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let mut storage = JsonStorage::new(blocker.join("tasks.json"));

    storage
      .save(&State::default())
      .expect_err("parent is a regular file");
  }
}
