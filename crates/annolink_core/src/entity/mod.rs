//! Entity handles over backend capability objects.
//!
//! # Responsibility
//! - Provide value-type access to reference-counted backend objects.
//! - Define the error model shared by all handle operations.
//!
//! # Invariants
//! - A handle caches nothing; every kind-specific operation forwards to the
//!   backend, so concurrent handles always observe consistent values.
//! - Equality is referent identity: two handles are equal iff they share
//!   one backend object, or both are empty.
//! - The backend object is released when its last referencing handle is
//!   dropped; persistent deletion is independent of handle lifetime.

use crate::backend::{BackendError, EntityBackend};
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

pub mod data_array;
pub mod feature;
pub mod representation;
pub mod source;

/// Result type used by entity handle operations.
pub type EntityResult<T> = Result<T, EntityError>;

/// Errors from entity handle operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityError {
    /// Operation needs a backend but the handle is empty.
    NullEntity,
    /// Caller passed an argument that can never be valid.
    InvalidArgument(String),
    /// Lookup by id or index found no match.
    NotFound(String),
    /// Backend-raised failure, propagated unchanged.
    Backend(BackendError),
}

impl Display for EntityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NullEntity => write!(f, "operation on an empty entity handle"),
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::NotFound(what) => write!(f, "entity not found: {what}"),
            Self::Backend(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EntityError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}

impl From<BackendError> for EntityError {
    fn from(value: BackendError) -> Self {
        Self::Backend(value)
    }
}

/// Generic handle owning a shared reference to a backend capability object.
///
/// A handle is either bound to one backend object or empty ("none"). All
/// specialized entity types wrap an `Entity` and add kind operations on top
/// of the identity/equality/null-state semantics defined here.
pub struct Entity<B: ?Sized> {
    backend: Option<Rc<B>>,
}

impl<B: ?Sized> Entity<B> {
    /// Creates an empty handle.
    pub fn none() -> Self {
        Self { backend: None }
    }

    /// Creates a handle by taking over the caller's backend reference.
    pub fn from_backend(backend: Rc<B>) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    /// Creates a handle by adding a reference to an existing backend object.
    pub fn from_shared(backend: &Rc<B>) -> Self {
        Self {
            backend: Some(Rc::clone(backend)),
        }
    }

    /// Whether this handle is empty.
    pub fn is_none(&self) -> bool {
        self.backend.is_none()
    }

    /// Releases any held share and transitions the handle to empty.
    pub fn nullify(&mut self) {
        self.backend = None;
    }

    /// Bound backend object, or `NullEntity` for an empty handle.
    pub fn backend(&self) -> EntityResult<&Rc<B>> {
        self.backend.as_ref().ok_or(EntityError::NullEntity)
    }
}

impl<B: EntityBackend + ?Sized> Entity<B> {
    /// Stable entity id, forwarded from the backend.
    pub fn id(&self) -> EntityResult<String> {
        Ok(self.backend()?.id())
    }
}

impl<B: ?Sized> Clone for Entity<B> {
    /// Shares ownership of the backend object; no backend call is made.
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
        }
    }
}

impl<B: ?Sized> Default for Entity<B> {
    fn default() -> Self {
        Self::none()
    }
}

impl<B: ?Sized> PartialEq for Entity<B> {
    fn eq(&self, other: &Self) -> bool {
        match (&self.backend, &other.backend) {
            (Some(a), Some(b)) => Rc::as_ptr(a).cast::<()>() == Rc::as_ptr(b).cast::<()>(),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<B: ?Sized> Eq for Entity<B> {}

impl<B: EntityBackend + ?Sized> Debug for Entity<B> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.backend {
            Some(backend) => write!(f, "Entity({})", backend.id()),
            None => write!(f, "Entity(none)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Entity, EntityError};
    use crate::backend::EntityBackend;
    use std::rc::Rc;

    struct FixedId(&'static str);

    impl EntityBackend for FixedId {
        fn id(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn handles_sharing_one_backend_object_are_equal() {
        let backend: Rc<FixedId> = Rc::new(FixedId("a"));
        let first = Entity::from_shared(&backend);
        let second = Entity::from_backend(backend);
        assert_eq!(first, second);
        assert_eq!(first, first.clone());
    }

    #[test]
    fn equal_ids_on_distinct_backend_objects_do_not_compare_equal() {
        let first = Entity::from_backend(Rc::new(FixedId("same")));
        let second = Entity::from_backend(Rc::new(FixedId("same")));
        assert_ne!(first, second);
    }

    #[test]
    fn nullified_handle_equals_default_and_forgets_target() {
        let backend: Rc<FixedId> = Rc::new(FixedId("a"));
        let mut handle = Entity::from_shared(&backend);
        let twin = Entity::from_shared(&backend);

        handle.nullify();
        assert!(handle.is_none());
        assert_eq!(handle, Entity::<FixedId>::default());
        assert_ne!(handle, twin);
    }

    #[test]
    fn empty_handle_rejects_backend_access() {
        let handle = Entity::<FixedId>::none();
        assert_eq!(handle.id().unwrap_err(), EntityError::NullEntity);
    }
}
