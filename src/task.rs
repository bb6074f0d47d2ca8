use crate::time::{self, Timestamp};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Task {
  id: u64,
  uid: uuid::Uuid,
  description: String,
  #[serde(default)]
  tag: Option<String>,
  #[serde(default)]
  completed: Option<Timestamp>,
  created: Timestamp,
  updated: Timestamp,
}

impl Task {
  pub fn new(id: u64, description: &str, tag: Option<&str>) -> Self {
    let now = time::now();
    Self {
      id,
      uid: uuid::Uuid::new_v4(),
      description: description.to_owned(),
      tag: normalize_tag(tag),
      completed: None,
      created: now,
      updated: now,
    }
  }

  pub fn id(&self) -> u64 {
    self.id
  }

  pub fn uid(&self) -> uuid::Uuid {
    self.uid
  }

  pub fn description(&self) -> &str {
    self.description.as_str()
  }

  pub fn tag(&self) -> Option<&str> {
    self.tag.as_deref()
  }

  pub fn completed(&self) -> Option<Timestamp> {
    self.completed
  }

  pub fn created(&self) -> Timestamp {
    self.created
  }

  pub fn updated(&self) -> Timestamp {
    self.updated
  }

  pub fn is_pending(&self) -> bool {
    self.completed.is_none()
  }

  pub fn is_completed(&self) -> bool {
    !self.is_pending()
  }

  /// Stamps the completion time. Completing an already completed task
  /// re-stamps it.
  pub fn complete(&mut self) {
    let now = time::now();
    self.completed = Some(now);
    self.updated = now;
  }

  pub fn reopen(&mut self) {
    self.completed = None;
    self.touch();
  }

  pub fn set_description(&mut self, description: &str) {
    self.description = description.to_owned();
    self.touch();
  }

  pub fn set_tag(&mut self, tag: Option<&str>) {
    self.tag = normalize_tag(tag);
    self.touch();
  }

  fn touch(&mut self) {
    self.updated = time::now();
  }
}

fn normalize_tag(tag: Option<&str>) -> Option<String> {
  tag.filter(|t| !t.is_empty()).map(|t| t.to_owned())
}
