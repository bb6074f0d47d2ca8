extern crate chrono;
extern crate colored;
extern crate serde;
extern crate serde_json;
extern crate uuid;

mod task_store;

pub mod config;
pub mod error;
pub mod prompt;
pub mod state;
pub mod storage;
pub mod task;
pub mod time;
pub mod viewer;

pub use config::Config;
pub use error::{Result, StoreError};
pub use state::State;
pub use task::Task;
pub use task_store::*;
