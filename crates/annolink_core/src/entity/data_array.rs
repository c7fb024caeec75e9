//! Data array entity handle.
//!
//! The raw array contents live in external storage; this layer only sees
//! identity and labeling, enough to wire annotation references by id.

use crate::backend::DataArrayBackend;
use crate::entity::{Entity, EntityResult};
use std::rc::Rc;

/// External raw-data entity, referenced by id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataArray {
    entity: Entity<dyn DataArrayBackend>,
}

impl DataArray {
    /// Creates an empty handle.
    pub fn none() -> Self {
        Self {
            entity: Entity::none(),
        }
    }

    /// Creates a handle by taking over the caller's backend reference.
    pub fn from_backend(backend: Rc<dyn DataArrayBackend>) -> Self {
        Self {
            entity: Entity::from_backend(backend),
        }
    }

    /// Creates a handle by adding a reference to an existing backend object.
    pub fn from_shared(backend: &Rc<dyn DataArrayBackend>) -> Self {
        Self {
            entity: Entity::from_shared(backend),
        }
    }

    /// Whether this handle is empty.
    pub fn is_none(&self) -> bool {
        self.entity.is_none()
    }

    /// Releases any held share and transitions the handle to empty.
    pub fn nullify(&mut self) {
        self.entity.nullify();
    }

    /// Stable array id.
    pub fn id(&self) -> EntityResult<String> {
        self.entity.id()
    }

    /// Array name.
    pub fn name(&self) -> EntityResult<String> {
        Ok(self.entity.backend()?.name())
    }
}
