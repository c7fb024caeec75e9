//! Source entity handle and hierarchy traversal.
//!
//! # Responsibility
//! - Expose child lookup, creation, and recursive deletion over the
//!   backend source capability.
//! - Provide the depth-bounded, predicate-filtered search over the
//!   source subtree.
//!
//! # Invariants
//! - The source hierarchy is acyclic by construction: children are only
//!   ever created under one parent and never re-attached, so traversal
//!   terminates without cycle detection.
//! - Child listing preserves backend insertion order.
//! - A missing id on delete is a soft `false`, never an error; an empty
//!   handle argument is a programming error and fails `InvalidArgument`.

use crate::backend::SourceBackend;
use crate::entity::{Entity, EntityError, EntityResult};
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Hierarchical provenance/device node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Source {
    entity: Entity<dyn SourceBackend>,
}

impl Source {
    /// Creates an empty handle.
    pub fn none() -> Self {
        Self {
            entity: Entity::none(),
        }
    }

    /// Creates a handle by taking over the caller's backend reference.
    pub fn from_backend(backend: Rc<dyn SourceBackend>) -> Self {
        Self {
            entity: Entity::from_backend(backend),
        }
    }

    /// Creates a handle by adding a reference to an existing backend object.
    pub fn from_shared(backend: &Rc<dyn SourceBackend>) -> Self {
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

    /// Stable source id.
    pub fn id(&self) -> EntityResult<String> {
        self.entity.id()
    }

    /// Source name.
    pub fn name(&self) -> EntityResult<String> {
        Ok(self.entity.backend()?.name())
    }

    /// Source type label.
    pub fn type_name(&self) -> EntityResult<String> {
        Ok(self.entity.backend()?.type_name())
    }

    /// Whether a direct child with the given id exists.
    pub fn has_source(&self, id: &str) -> EntityResult<bool> {
        Ok(self.entity.backend()?.child_by_id(id)?.is_some())
    }

    /// Whether the given source is a direct child of this one.
    ///
    /// # Errors
    /// - `InvalidArgument` when `source` is an empty handle.
    pub fn has_source_entity(&self, source: &Source) -> EntityResult<bool> {
        let id = source.require_id("has_source_entity")?;
        self.has_source(&id)
    }

    /// Direct child with the given id.
    ///
    /// # Errors
    /// - `NotFound` when no direct child has this id.
    pub fn get_source(&self, id: &str) -> EntityResult<Source> {
        match self.entity.backend()?.child_by_id(id)? {
            Some(child) => Ok(Source::from_backend(child)),
            None => Err(EntityError::NotFound(format!("source with id `{id}`"))),
        }
    }

    /// Direct child at the given position in insertion order.
    ///
    /// # Errors
    /// - `NotFound` when `index` is past the last child.
    pub fn get_source_at(&self, index: usize) -> EntityResult<Source> {
        match self.entity.backend()?.child_at(index)? {
            Some(child) => Ok(Source::from_backend(child)),
            None => Err(EntityError::NotFound(format!("source at index {index}"))),
        }
    }

    /// Number of direct children.
    pub fn source_count(&self) -> EntityResult<usize> {
        Ok(self.entity.backend()?.child_count()?)
    }

    /// All direct children in backend insertion order.
    pub fn sources(&self) -> EntityResult<Vec<Source>> {
        self.sources_where(|_| true)
    }

    /// Direct children passing `filter`, in backend insertion order.
    pub fn sources_where<F>(&self, filter: F) -> EntityResult<Vec<Source>>
    where
        F: Fn(&Source) -> bool,
    {
        let backend = self.entity.backend()?;
        let count = backend.child_count()?;
        let mut children = Vec::new();
        for index in 0..count {
            let child = match backend.child_at(index)? {
                Some(child) => Source::from_backend(child),
                // Child list shrank between count and lookup; only possible
                // through another handle, and then the shorter list wins.
                None => break,
            };
            if filter(&child) {
                children.push(child);
            }
        }
        Ok(children)
    }

    /// Creates a new child node and returns its handle.
    ///
    /// # Errors
    /// - Backend naming-rule violations propagate unchanged.
    pub fn create_source(&self, name: &str, type_name: &str) -> EntityResult<Source> {
        let child = self.entity.backend()?.create_child(name, type_name)?;
        Ok(Source::from_backend(child))
    }

    /// Deletes the named child and its entire subtree.
    ///
    /// Returns `Ok(false)` when no direct child has the given id, giving
    /// idempotent-delete semantics.
    pub fn delete_source(&self, id: &str) -> EntityResult<bool> {
        Ok(self.entity.backend()?.delete_child(id)?)
    }

    /// Deletes the given child source and its entire subtree.
    ///
    /// # Errors
    /// - `InvalidArgument` when `source` is an empty handle.
    pub fn delete_source_entity(&self, source: &Source) -> EntityResult<bool> {
        let id = source.require_id("delete_source_entity")?;
        self.delete_source(&id)
    }

    /// Searches the subtree rooted at this source.
    ///
    /// Pre-order traversal: this source is visited at depth 0, parents
    /// before children, siblings in `sources()` order. A node at exactly
    /// `max_depth` is evaluated but its children are not descended into;
    /// `None` means unbounded. The result is freshly materialized and the
    /// traversal is read-only and restartable.
    pub fn find_sources<F>(&self, filter: F, max_depth: Option<usize>) -> EntityResult<Vec<Source>>
    where
        F: Fn(&Source) -> bool,
    {
        self.entity.backend()?;

        let mut matches = Vec::new();
        // Explicit work stack keeps deep hierarchies off the call stack.
        let mut pending = vec![(self.clone(), 0usize)];
        while let Some((node, depth)) = pending.pop() {
            if filter(&node) {
                matches.push(node.clone());
            }
            let descend = max_depth.map_or(true, |limit| depth < limit);
            if descend {
                for child in node.sources()?.into_iter().rev() {
                    pending.push((child, depth + 1));
                }
            }
        }
        Ok(matches)
    }

    fn require_id(&self, operation: &str) -> EntityResult<String> {
        if self.is_none() {
            return Err(EntityError::InvalidArgument(format!(
                "{operation}: empty source handle given"
            )));
        }
        self.id()
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.entity.backend() {
            Ok(backend) => write!(
                f,
                "Source {{name = {}, type = {}}}",
                backend.name(),
                backend.type_name()
            ),
            Err(_) => write!(f, "Source {{none}}"),
        }
    }
}
