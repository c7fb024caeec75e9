//! Entity/backend abstraction layer for scientific data annotation.
//!
//! Front-facing handles (`Source`, `Representation`, `Feature`,
//! `DataArray`) give identity-stable, shared access to backend-supplied
//! capability objects while staying agnostic to the concrete storage
//! engine. A heap-resident engine ships in [`backend::memory`].

pub mod backend;
pub mod entity;
pub mod logging;
pub mod model;

pub use backend::memory::MemoryStore;
pub use backend::{
    BackendError, BackendResult, DataArrayBackend, EntityBackend, FeatureBackend,
    RepresentationBackend, SourceBackend,
};
pub use entity::data_array::DataArray;
pub use entity::feature::Feature;
pub use entity::representation::Representation;
pub use entity::source::Source;
pub use entity::{Entity, EntityError, EntityResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::link_type::LinkType;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
