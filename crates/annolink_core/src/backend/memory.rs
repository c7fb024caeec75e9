//! In-memory backend engine.
//!
//! # Responsibility
//! - Provide a complete heap-resident implementation of every backend
//!   capability, suitable for tests and embedded callers.
//! - Enforce naming rules and sibling uniqueness before any mutation.
//!
//! # Invariants
//! - Child order is insertion order and never reshuffled.
//! - Ids are minted once and never reused.
//! - Deleting a child detaches its whole subtree in one step; handles that
//!   survive the deletion observe an emptied node.

use crate::backend::{
    BackendError, BackendResult, DataArrayBackend, EntityBackend, FeatureBackend,
    RepresentationBackend, SourceBackend,
};
use crate::entity::data_array::DataArray;
use crate::entity::feature::Feature;
use crate::entity::representation::Representation;
use crate::entity::source::Source;
use crate::entity::EntityResult;
use crate::model::link_type::LinkType;
use log::{debug, info};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use uuid::Uuid;

static ENTITY_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.\- ]*$").expect("valid name rule regex"));

type DataArrayRegistry = RefCell<HashMap<String, Rc<MemoryDataArray>>>;

/// Entry point of the in-memory engine.
///
/// Owns the data-array registry used for read-time reference resolution and
/// provides the root-level factory operations. Entities below a root source
/// are created through the handles themselves.
pub struct MemoryStore {
    data_arrays: Rc<DataArrayRegistry>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            data_arrays: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Creates a root source node.
    pub fn create_source(&self, name: &str, type_name: &str) -> EntityResult<Source> {
        let node = MemorySource::allocate(name, type_name)?;
        info!(
            "event=source_create module=backend status=ok id={} name={} parent=root",
            node.id, node.name
        );
        Ok(Source::from_backend(node))
    }

    /// Creates a data array and registers it for reference resolution.
    pub fn create_data_array(&self, name: &str) -> EntityResult<DataArray> {
        let name = validate_name(name)?;
        let array = Rc::new(MemoryDataArray {
            id: mint_id(),
            name,
        });
        self.data_arrays
            .borrow_mut()
            .insert(array.id.clone(), Rc::clone(&array));
        info!(
            "event=data_array_create module=backend status=ok id={} name={}",
            array.id, array.name
        );
        Ok(DataArray::from_backend(array))
    }

    /// Creates a representation with the given link type and no data
    /// reference yet.
    pub fn create_representation(&self, link_type: LinkType) -> EntityResult<Representation> {
        let entity = Rc::new(MemoryRepresentation {
            id: mint_id(),
            link_type: Cell::new(link_type),
            data_ref: RefCell::new(None),
            registry: Rc::clone(&self.data_arrays),
        });
        info!(
            "event=representation_create module=backend status=ok id={} link_type={}",
            entity.id,
            link_type.as_str()
        );
        Ok(Representation::from_backend(entity))
    }

    /// Creates a feature with the given link type and no data reference yet.
    pub fn create_feature(&self, link_type: LinkType) -> EntityResult<Feature> {
        let entity = Rc::new(MemoryFeature {
            id: mint_id(),
            link_type: Cell::new(link_type),
            data_ref: RefCell::new(None),
            registry: Rc::clone(&self.data_arrays),
        });
        info!(
            "event=feature_create module=backend status=ok id={} link_type={}",
            entity.id,
            link_type.as_str()
        );
        Ok(Feature::from_backend(entity))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory source node.
pub struct MemorySource {
    id: String,
    name: String,
    type_name: String,
    children: RefCell<Vec<Rc<MemorySource>>>,
}

impl MemorySource {
    fn allocate(name: &str, type_name: &str) -> BackendResult<Rc<Self>> {
        let name = validate_name(name)?;
        Ok(Rc::new(Self {
            id: mint_id(),
            name,
            type_name: type_name.to_string(),
            children: RefCell::new(Vec::new()),
        }))
    }
}

impl EntityBackend for MemorySource {
    fn id(&self) -> String {
        self.id.clone()
    }
}

impl SourceBackend for MemorySource {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn type_name(&self) -> String {
        self.type_name.clone()
    }

    fn child_by_id(&self, id: &str) -> BackendResult<Option<Rc<dyn SourceBackend>>> {
        let children = self.children.borrow();
        Ok(children
            .iter()
            .find(|child| child.id == id)
            .map(|child| Rc::clone(child) as Rc<dyn SourceBackend>))
    }

    fn child_at(&self, index: usize) -> BackendResult<Option<Rc<dyn SourceBackend>>> {
        let children = self.children.borrow();
        Ok(children
            .get(index)
            .map(|child| Rc::clone(child) as Rc<dyn SourceBackend>))
    }

    fn child_count(&self) -> BackendResult<usize> {
        Ok(self.children.borrow().len())
    }

    fn create_child(
        &self,
        name: &str,
        type_name: &str,
    ) -> BackendResult<Rc<dyn SourceBackend>> {
        let node = {
            let mut children = self.children.borrow_mut();
            let node = MemorySource::allocate(name, type_name)?;
            if children.iter().any(|sibling| sibling.name == node.name) {
                return Err(BackendError::DuplicateName(node.name.clone()));
            }
            children.push(Rc::clone(&node));
            node
        };
        info!(
            "event=source_create module=backend status=ok id={} name={} parent={}",
            node.id, node.name, self.id
        );
        Ok(node)
    }

    fn delete_child(&self, id: &str) -> BackendResult<bool> {
        let removed = {
            let mut children = self.children.borrow_mut();
            match children.iter().position(|child| child.id == id) {
                Some(index) => Some(children.remove(index)),
                None => None,
            }
        };
        match removed {
            Some(node) => {
                clear_subtree(node);
                info!(
                    "event=source_delete module=backend status=ok id={} parent={}",
                    id, self.id
                );
                Ok(true)
            }
            None => {
                debug!(
                    "event=source_delete module=backend status=miss id={} parent={}",
                    id, self.id
                );
                Ok(false)
            }
        }
    }
}

/// In-memory data array stub carrying identity and name only.
pub struct MemoryDataArray {
    id: String,
    name: String,
}

impl EntityBackend for MemoryDataArray {
    fn id(&self) -> String {
        self.id.clone()
    }
}

impl DataArrayBackend for MemoryDataArray {
    fn name(&self) -> String {
        self.name.clone()
    }
}

/// In-memory representation record.
pub struct MemoryRepresentation {
    id: String,
    link_type: Cell<LinkType>,
    data_ref: RefCell<Option<String>>,
    registry: Rc<DataArrayRegistry>,
}

impl EntityBackend for MemoryRepresentation {
    fn id(&self) -> String {
        self.id.clone()
    }
}

impl RepresentationBackend for MemoryRepresentation {
    fn link_type(&self) -> BackendResult<LinkType> {
        Ok(self.link_type.get())
    }

    fn set_link_type(&self, link_type: LinkType) -> BackendResult<()> {
        self.link_type.set(link_type);
        Ok(())
    }

    fn data_ref(&self) -> BackendResult<Option<String>> {
        Ok(self.data_ref.borrow().clone())
    }

    fn resolve_data(&self) -> BackendResult<Option<Rc<dyn DataArrayBackend>>> {
        Ok(resolve_registry_ref(&self.registry, &self.data_ref))
    }

    fn set_data_ref(&self, data_array_id: &str) -> BackendResult<()> {
        *self.data_ref.borrow_mut() = Some(data_array_id.to_string());
        Ok(())
    }
}

/// In-memory feature record.
pub struct MemoryFeature {
    id: String,
    link_type: Cell<LinkType>,
    data_ref: RefCell<Option<String>>,
    registry: Rc<DataArrayRegistry>,
}

impl EntityBackend for MemoryFeature {
    fn id(&self) -> String {
        self.id.clone()
    }
}

impl FeatureBackend for MemoryFeature {
    fn link_type(&self) -> BackendResult<LinkType> {
        Ok(self.link_type.get())
    }

    fn set_link_type(&self, link_type: LinkType) -> BackendResult<()> {
        self.link_type.set(link_type);
        Ok(())
    }

    fn data_ref(&self) -> BackendResult<Option<String>> {
        Ok(self.data_ref.borrow().clone())
    }

    fn resolve_data(&self) -> BackendResult<Option<Rc<dyn DataArrayBackend>>> {
        Ok(resolve_registry_ref(&self.registry, &self.data_ref))
    }

    fn set_data_ref(&self, data_array_id: &str) -> BackendResult<()> {
        *self.data_ref.borrow_mut() = Some(data_array_id.to_string());
        Ok(())
    }
}

fn mint_id() -> String {
    Uuid::new_v4().to_string()
}

fn validate_name(name: &str) -> BackendResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() || !ENTITY_NAME_RE.is_match(trimmed) {
        return Err(BackendError::InvalidName(name.to_string()));
    }
    Ok(trimmed.to_string())
}

fn resolve_registry_ref(
    registry: &Rc<DataArrayRegistry>,
    data_ref: &RefCell<Option<String>>,
) -> Option<Rc<dyn DataArrayBackend>> {
    let stored = data_ref.borrow();
    let id = stored.as_deref()?;
    registry
        .borrow()
        .get(id)
        .map(|array| Rc::clone(array) as Rc<dyn DataArrayBackend>)
}

fn clear_subtree(root: Rc<MemorySource>) {
    let mut pending = vec![root];
    while let Some(node) = pending.pop() {
        pending.extend(node.children.borrow_mut().drain(..));
    }
}
