//! Core state machine and provider client for the skywatch weather TUI.
//!
//! Everything in this crate is terminal-agnostic:
//!
//! - [`WeatherState`]: the data/loading/error/history container
//! - [`store::apply`]: the exhaustive transition function over [`FetchEvent`]
//! - [`SearchHistory`]: bounded, de-duplicated recent searches
//! - [`persist`]: file-backed key-value storage and the history bridge
//! - [`WeatherClient`]: one HTTP GET per fetch, mapped to exactly one
//!   Success/Failure outcome
//! - [`Config`]: API key resolution
//!
//! The UI crate maps terminal events to actions, funnels the fetch lifecycle
//! through [`store::apply`], and reads state back through the accessors on
//! [`WeatherState`]. Nothing else mutates weather state.

pub mod config;
pub mod history;
pub mod persist;
pub mod provider;
pub mod state;
pub mod store;

pub use config::Config;
pub use history::SearchHistory;
pub use persist::{FileStore, HistoryBridge, KeyValueStore, MemoryStore, HISTORY_KEY};
pub use provider::{FetchError, WeatherClient};
pub use state::{WeatherSnapshot, WeatherState};
pub use store::{apply, FetchApplied, FetchEvent};
