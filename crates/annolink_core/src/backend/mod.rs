//! Backend capability contracts and engine errors.
//!
//! # Responsibility
//! - Define the per-entity-kind contracts a storage engine must implement.
//! - Keep engine failure shapes separate from handle-level errors.
//!
//! # Invariants
//! - Each entity kind has its own capability trait; an engine implements
//!   every trait it supports and nothing forces it to support all of them.
//! - Lookup misses are `Ok(None)`, never an error; errors are reserved for
//!   engine failures and rule violations.
//! - Backend objects are shared via `Rc`; a mutation through one reference
//!   is visible through every other reference to the same object.

use crate::model::link_type::LinkType;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

pub mod memory;

/// Result type used by backend capability operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors raised by a backend engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// Entity name violates the engine naming rules.
    InvalidName(String),
    /// A sibling entity with the same name already exists.
    DuplicateName(String),
    /// Engine-level failure outside this layer's error model.
    Storage(String),
}

impl Display for BackendError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidName(name) => write!(f, "entity name is not allowed: `{name}`"),
            Self::DuplicateName(name) => {
                write!(f, "entity name already used by a sibling: `{name}`")
            }
            Self::Storage(message) => write!(f, "backend storage failure: {message}"),
        }
    }
}

impl Error for BackendError {}

/// Base capability shared by every entity kind.
pub trait EntityBackend {
    /// Stable id, globally unique and immutable after creation.
    fn id(&self) -> String;
}

/// Capability contract for hierarchical provenance/device nodes.
pub trait SourceBackend: EntityBackend {
    /// Node name as given at creation.
    fn name(&self) -> String;

    /// Node type label as given at creation.
    fn type_name(&self) -> String;

    /// Looks up one direct child by id.
    fn child_by_id(&self, id: &str) -> BackendResult<Option<Rc<dyn SourceBackend>>>;

    /// Looks up one direct child by position in insertion order.
    fn child_at(&self, index: usize) -> BackendResult<Option<Rc<dyn SourceBackend>>>;

    /// Number of direct children.
    fn child_count(&self) -> BackendResult<usize>;

    /// Allocates a new child node and returns its backend object.
    fn create_child(&self, name: &str, type_name: &str)
        -> BackendResult<Rc<dyn SourceBackend>>;

    /// Removes the named child together with its entire subtree.
    ///
    /// Returns `Ok(false)` when no direct child has the given id. The
    /// subtree removal is assumed to be atomic inside the engine; this
    /// layer does not emulate rollback on partial failure.
    fn delete_child(&self, id: &str) -> BackendResult<bool>;
}

/// Capability contract for representation annotation entities.
pub trait RepresentationBackend: EntityBackend {
    /// Current link type.
    fn link_type(&self) -> BackendResult<LinkType>;

    /// Replaces the link type.
    fn set_link_type(&self, link_type: LinkType) -> BackendResult<()>;

    /// Raw stored data-array id, if any was set.
    fn data_ref(&self) -> BackendResult<Option<String>>;

    /// Resolves the stored id to a data array at read time.
    ///
    /// `Ok(None)` when no id is set or the id no longer resolves.
    fn resolve_data(&self) -> BackendResult<Option<Rc<dyn DataArrayBackend>>>;

    /// Stores a data-array id without checking that it resolves yet.
    fn set_data_ref(&self, data_array_id: &str) -> BackendResult<()>;
}

/// Capability contract for feature annotation entities.
///
/// Kept independent from [`RepresentationBackend`] on purpose: handles are
/// typed by the narrowest capability they need, and an engine may support
/// one kind without the other.
pub trait FeatureBackend: EntityBackend {
    /// Current link type.
    fn link_type(&self) -> BackendResult<LinkType>;

    /// Replaces the link type.
    fn set_link_type(&self, link_type: LinkType) -> BackendResult<()>;

    /// Raw stored data-array id, if any was set.
    fn data_ref(&self) -> BackendResult<Option<String>>;

    /// Resolves the stored id to a data array at read time.
    fn resolve_data(&self) -> BackendResult<Option<Rc<dyn DataArrayBackend>>>;

    /// Stores a data-array id without checking that it resolves yet.
    fn set_data_ref(&self, data_array_id: &str) -> BackendResult<()>;
}

/// Capability contract for externally stored raw data arrays.
///
/// The array contents live outside this layer; only identity and labeling
/// are visible here.
pub trait DataArrayBackend: EntityBackend {
    /// Array name as given at creation.
    fn name(&self) -> String;
}
