//! Feature entity handle.
//!
//! Same data-reference contract as [`Representation`]: empty arguments are
//! rejected before any backend call, raw ids are stored without existence
//! checks and validated on read.
//!
//! [`Representation`]: crate::entity::representation::Representation

use crate::backend::FeatureBackend;
use crate::entity::data_array::DataArray;
use crate::entity::representation::unresolved_ref;
use crate::entity::{Entity, EntityError, EntityResult};
use crate::model::link_type::LinkType;
use std::rc::Rc;

/// Annotation entity linking a parent object to a data array.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Feature {
    entity: Entity<dyn FeatureBackend>,
}

impl Feature {
    /// Creates an empty handle.
    pub fn none() -> Self {
        Self {
            entity: Entity::none(),
        }
    }

    /// Creates a handle by taking over the caller's backend reference.
    pub fn from_backend(backend: Rc<dyn FeatureBackend>) -> Self {
        Self {
            entity: Entity::from_backend(backend),
        }
    }

    /// Creates a handle by adding a reference to an existing backend object.
    pub fn from_shared(backend: &Rc<dyn FeatureBackend>) -> Self {
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

    /// Stable feature id.
    pub fn id(&self) -> EntityResult<String> {
        self.entity.id()
    }

    /// Current link type.
    pub fn link_type(&self) -> EntityResult<LinkType> {
        Ok(self.entity.backend()?.link_type()?)
    }

    /// Replaces the link type.
    pub fn set_link_type(&self, link_type: LinkType) -> EntityResult<()> {
        Ok(self.entity.backend()?.set_link_type(link_type)?)
    }

    /// Referenced data array, resolved at read time.
    ///
    /// # Errors
    /// - `NotFound` when no reference is set or the stored id no longer
    ///   resolves to an existing array.
    pub fn data(&self) -> EntityResult<DataArray> {
        let backend = self.entity.backend()?;
        match backend.resolve_data()? {
            Some(array) => Ok(DataArray::from_backend(array)),
            None => Err(EntityError::NotFound(unresolved_ref(backend.data_ref()?))),
        }
    }

    /// Sets the referenced data array.
    ///
    /// # Errors
    /// - `InvalidArgument` when `data` is an empty handle; the stored
    ///   reference is left untouched in that case.
    pub fn set_data(&self, data: &DataArray) -> EntityResult<()> {
        if data.is_none() {
            return Err(EntityError::InvalidArgument(
                "set_data: empty data array handle given".to_string(),
            ));
        }
        self.set_data_by_id(&data.id()?)
    }

    /// Sets the referenced data array by raw id.
    ///
    /// No existence check is performed; forward references to arrays
    /// created later are allowed and resolved on read.
    pub fn set_data_by_id(&self, data_array_id: &str) -> EntityResult<()> {
        Ok(self.entity.backend()?.set_data_ref(data_array_id)?)
    }
}
