//! Search Engines
//!
//! The seam between the query pipeline and the dictionary backends.
//!
//! ## Submodules
//! - **`search_engine`**: The `SearchEngine` trait every backend implements, plus the
//!   `EngineCapabilities` it declares at registration.
//! - **`registry`**: `EngineRegistry`, resolving dictionaries and languages to engine ids and
//!   engine ids to handles.
//! - **`dummy`**: A canned engine for bootstrapping and smoke tests.

pub mod dummy;
pub mod registry;
pub mod search_engine;

pub use dummy::DummyEngine;
pub use registry::{EngineRegistry, RegistryError};
pub use search_engine::{EngineCapabilities, SearchEngine};
