//! Object model for Trellis.
//!
//! Every widget is an object: it gets an id, an optional name and a place
//! in a parent/child tree held by one process-wide registry.
//!
//! Destroying an object also destroys everything still attached below it.
//!
//! # Key Types
//!
//! - [`Object`]: implemented by everything that lives in the registry
//! - [`ObjectBase`]: registration handle embedded in implementors
//! - [`ObjectId`]: generational key, stale once the object is destroyed
//! - [`ObjectRegistry`]: names, types and tree links
//! - [`SharedObjectRegistry`]: the lock-protected registry behind [`global_registry`]
//!
//! Widgets embed an [`ObjectBase`] so that transient children (such as the
//! popup of a combo box) show up in the object tree while they are attached.

use std::any::{Any, TypeId};
use std::sync::OnceLock;

use parking_lot::RwLock;
use slotmap::{new_key_type, SlotMap};
use thiserror::Error;

new_key_type! {
    /// Handle to a registered object.
    ///
    /// `ObjectId`s are stable handles that remain valid even as the object tree
    /// changes. They become invalid when the object is destroyed.
    pub struct ObjectId;
}

impl ObjectId {
    /// The key as an opaque integer, for logs and hashing across FFI.
    #[inline]
    pub fn as_raw(self) -> u64 {
        use slotmap::Key;
        self.data().as_ffi()
    }
}

/// Failures reported by the object registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectError {
    /// No live object has this id.
    #[error("invalid or destroyed object id")]
    InvalidObjectId,
    /// The new parent is the object itself or one of its descendants.
    #[error("cannot set an object as its own parent or ancestor")]
    CircularParentage,
    /// [`init_global_registry`] has not run yet.
    #[error("object registry not initialized")]
    RegistryNotInitialized,
}

/// Shorthand for registry results.
pub type ObjectResult<T> = std::result::Result<T, ObjectError>;

/// Per-object registry entry.
struct ObjectData {
    /// Empty until set; used by lookups and tree dumps.
    name: String,
    /// Concrete type that registered.
    type_id: TypeId,
    type_name: &'static str,
    parent: Option<ObjectId>,
    /// Child objects in insertion order.
    children: Vec<ObjectId>,
}

impl ObjectData {
    fn new(type_id: TypeId, type_name: &'static str) -> Self {
        Self {
            name: String::new(),
            type_id,
            type_name,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// Owns the name, type and tree links of every live object.
///
/// Uses arena-based storage via SlotMap for stable object IDs.
pub struct ObjectRegistry {
    objects: SlotMap<ObjectId, ObjectData>,
}

impl ObjectRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
        }
    }

    /// Add a root object of type `T`.
    pub fn register<T: Object + 'static>(&mut self) -> ObjectId {
        let data = ObjectData::new(TypeId::of::<T>(), std::any::type_name::<T>());
        let id = self.objects.insert(data);
        tracing::trace!(target: "trellis_core::object", ?id, type_name = std::any::type_name::<T>(), "registered object");
        id
    }

    /// Remove an object and all its descendants from the registry.
    #[tracing::instrument(skip(self), target = "trellis_core::object", level = "trace")]
    pub fn destroy(&mut self, id: ObjectId) -> ObjectResult<()> {
        let descendants = self.collect_descendants(id)?;
        tracing::trace!(target: "trellis_core::object", ?id, descendant_count = descendants.len(), "destroying object tree");

        if let Some(parent_id) = self.objects.get(id).and_then(|d| d.parent)
            && let Some(parent_data) = self.objects.get_mut(parent_id)
        {
            parent_data.children.retain(|&child| child != id);
        }

        for child_id in descendants {
            self.objects.remove(child_id);
        }
        self.objects.remove(id);

        Ok(())
    }

    /// Collect all descendant IDs, children before their parents.
    fn collect_descendants(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        let mut result = Vec::new();
        self.collect_descendants_recursive(id, &mut result)?;
        Ok(result)
    }

    fn collect_descendants_recursive(
        &self,
        id: ObjectId,
        result: &mut Vec<ObjectId>,
    ) -> ObjectResult<()> {
        let data = self.objects.get(id).ok_or(ObjectError::InvalidObjectId)?;
        for &child_id in &data.children {
            self.collect_descendants_recursive(child_id, result)?;
            result.push(child_id);
        }
        Ok(())
    }

    /// Whether `id` names a live object.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(id)
    }

    /// Move `id` under `new_parent`.
    ///
    /// Removes the object from its old parent and appends it to the new one.
    /// `None` detaches it and makes it a root.
    pub fn set_parent(&mut self, id: ObjectId, new_parent: Option<ObjectId>) -> ObjectResult<()> {
        if !self.objects.contains_key(id) {
            return Err(ObjectError::InvalidObjectId);
        }

        if let Some(parent_id) = new_parent {
            if !self.objects.contains_key(parent_id) {
                return Err(ObjectError::InvalidObjectId);
            }
            if self.is_ancestor_of(id, parent_id) {
                return Err(ObjectError::CircularParentage);
            }
        }

        let old_parent = self.objects.get(id).and_then(|d| d.parent);
        if let Some(old_parent_id) = old_parent
            && let Some(parent_data) = self.objects.get_mut(old_parent_id)
        {
            parent_data.children.retain(|&child| child != id);
        }

        if let Some(data) = self.objects.get_mut(id) {
            data.parent = new_parent;
        }

        if let Some(parent_id) = new_parent
            && let Some(parent_data) = self.objects.get_mut(parent_id)
        {
            parent_data.children.push(id);
        }

        Ok(())
    }

    /// Check if `potential_ancestor` is `id` or one of its ancestors.
    fn is_ancestor_of(&self, potential_ancestor: ObjectId, id: ObjectId) -> bool {
        let mut current = Some(id);
        while let Some(current_id) = current {
            if current_id == potential_ancestor {
                return true;
            }
            current = self.objects.get(current_id).and_then(|d| d.parent);
        }
        false
    }

    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.objects
            .get(id)
            .map(|d| d.parent)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Direct children, oldest first.
    pub fn children(&self, id: ObjectId) -> ObjectResult<&[ObjectId]> {
        self.objects
            .get(id)
            .map(|d| d.children.as_slice())
            .ok_or(ObjectError::InvalidObjectId)
    }

    pub fn object_name(&self, id: ObjectId) -> ObjectResult<&str> {
        self.objects
            .get(id)
            .map(|d| d.name.as_str())
            .ok_or(ObjectError::InvalidObjectId)
    }

    pub fn set_object_name(&mut self, id: ObjectId, name: String) -> ObjectResult<()> {
        let data = self.objects.get_mut(id).ok_or(ObjectError::InvalidObjectId)?;
        data.name = name;
        Ok(())
    }

    /// Get the object's type ID.
    pub fn type_id(&self, id: ObjectId) -> ObjectResult<TypeId> {
        self.objects
            .get(id)
            .map(|d| d.type_id)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Get the object's type name.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.objects
            .get(id)
            .map(|d| d.type_name)
            .ok_or(ObjectError::InvalidObjectId)
    }

    /// Find a direct child by name.
    pub fn find_child_by_name(&self, id: ObjectId, name: &str) -> ObjectResult<Option<ObjectId>> {
        let children = self.children(id)?;
        Ok(children
            .iter()
            .copied()
            .find(|&child| self.objects.get(child).is_some_and(|d| d.name == name)))
    }

    /// Get the total number of registered objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Get all objects without a parent.
    pub fn root_objects(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.objects
            .iter()
            .filter(|(_, data)| data.parent.is_none())
            .map(|(id, _)| id)
    }
}

impl Default for ObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe wrapper around [`ObjectRegistry`].
///
/// Accessors return owned values so no lock is held after they return.
pub struct SharedObjectRegistry {
    inner: RwLock<ObjectRegistry>,
}

impl SharedObjectRegistry {
    /// Create a new empty shared registry.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(ObjectRegistry::new()),
        }
    }

    pub fn register<T: Object + 'static>(&self) -> ObjectId {
        self.inner.write().register::<T>()
    }

    /// Destroy an object and its descendants.
    pub fn destroy(&self, id: ObjectId) -> ObjectResult<()> {
        self.inner.write().destroy(id)
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.inner.read().contains(id)
    }

    /// Set an object's parent.
    pub fn set_parent(&self, id: ObjectId, parent: Option<ObjectId>) -> ObjectResult<()> {
        self.inner.write().set_parent(id, parent)
    }

    /// Get an object's parent.
    pub fn parent(&self, id: ObjectId) -> ObjectResult<Option<ObjectId>> {
        self.inner.read().parent(id)
    }

    /// Get an object's children.
    pub fn children(&self, id: ObjectId) -> ObjectResult<Vec<ObjectId>> {
        self.inner.read().children(id).map(<[ObjectId]>::to_vec)
    }

    /// Get an object's name.
    pub fn object_name(&self, id: ObjectId) -> ObjectResult<String> {
        self.inner.read().object_name(id).map(str::to_owned)
    }

    /// Set an object's name.
    pub fn set_object_name(&self, id: ObjectId, name: String) -> ObjectResult<()> {
        self.inner.write().set_object_name(id, name)
    }

    /// Get an object's type ID.
    pub fn type_id(&self, id: ObjectId) -> ObjectResult<TypeId> {
        // The guard itself is `Any`, so name the registry method explicitly.
        ObjectRegistry::type_id(&self.inner.read(), id)
    }

    /// Get an object's type name.
    pub fn type_name(&self, id: ObjectId) -> ObjectResult<&'static str> {
        self.inner.read().type_name(id)
    }

    /// Find a direct child by name.
    pub fn find_child_by_name(&self, id: ObjectId, name: &str) -> ObjectResult<Option<ObjectId>> {
        self.inner.read().find_child_by_name(id, name)
    }

    /// Get the total number of registered objects.
    pub fn object_count(&self) -> usize {
        self.inner.read().object_count()
    }

    /// Get all root objects.
    pub fn root_objects(&self) -> Vec<ObjectId> {
        self.inner.read().root_objects().collect()
    }
}

impl Default for SharedObjectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_REGISTRY: OnceLock<SharedObjectRegistry> = OnceLock::new();

/// Create the process-wide registry.
///
/// Calling this more than once is harmless.
pub fn init_global_registry() {
    GLOBAL_REGISTRY.get_or_init(SharedObjectRegistry::new);
}

/// The process-wide registry.
///
/// Fails with [`ObjectError::RegistryNotInitialized`] before [`init_global_registry`].
pub fn global_registry() -> ObjectResult<&'static SharedObjectRegistry> {
    GLOBAL_REGISTRY.get().ok_or(ObjectError::RegistryNotInitialized)
}

/// Something with an identity in the object registry.
///
/// # Example
///
/// ```
/// use trellis_core::{global_registry, init_global_registry, Object, ObjectBase, ObjectId};
///
/// init_global_registry();
///
/// struct Knob {
///     handle: ObjectBase,
/// }
///
/// impl Object for Knob {
///     fn object_id(&self) -> ObjectId {
///         self.handle.id()
///     }
/// }
///
/// let knob = Knob { handle: ObjectBase::new::<Knob>() };
/// knob.handle.set_name("volume");
/// let registry = global_registry().unwrap();
/// assert_eq!(registry.object_name(knob.object_id()).unwrap(), "volume");
/// ```
pub trait Object: Any + Send + Sync {
    fn object_id(&self) -> ObjectId;
}

/// Registration handle that implementors embed.
///
/// On construction it registers the object with the [`global_registry`]; on
/// drop it destroys the object together with any descendants still attached.
pub struct ObjectBase {
    id: ObjectId,
}

impl ObjectBase {
    /// Register a new root object of type `T`.
    ///
    /// # Panics
    ///
    /// Panics if [`init_global_registry`] has not been called.
    pub fn new<T: Object + 'static>() -> Self {
        let registry = global_registry().expect("Object registry not initialized");
        let id = registry.register::<T>();
        Self { id }
    }

    /// Get the object's ID.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The registered name, or an empty string.
    pub fn name(&self) -> String {
        global_registry()
            .and_then(|r| r.object_name(self.id))
            .unwrap_or_default()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        if let Ok(registry) = global_registry() {
            let _ = registry.set_object_name(self.id, name.into());
        }
    }

    pub fn parent(&self) -> Option<ObjectId> {
        global_registry()
            .and_then(|r| r.parent(self.id))
            .ok()
            .flatten()
    }

    /// Attach under `parent`, or detach with `None`.
    pub fn set_parent(&self, parent: Option<ObjectId>) -> ObjectResult<()> {
        global_registry()?.set_parent(self.id, parent)
    }

    /// Get child object IDs.
    pub fn children(&self) -> Vec<ObjectId> {
        global_registry()
            .and_then(|r| r.children(self.id))
            .unwrap_or_default()
    }

    /// Find a child by name.
    pub fn find_child_by_name(&self, name: &str) -> Option<ObjectId> {
        global_registry()
            .and_then(|r| r.find_child_by_name(self.id, name))
            .ok()
            .flatten()
    }
}

impl Drop for ObjectBase {
    fn drop(&mut self) {
        // Descendants may already be gone if an ancestor was dropped first.
        if let Ok(registry) = global_registry() {
            let _ = registry.destroy(self.id);
        }
    }
}

/// Downcast a `dyn Object` to its concrete type.
pub fn object_cast<T: Object + 'static>(obj: &dyn Object) -> Option<&T> {
    (obj as &dyn Any).downcast_ref::<T>()
}

/// Mutable variant of [`object_cast`].
pub fn object_cast_mut<T: Object + 'static>(obj: &mut dyn Object) -> Option<&mut T> {
    (obj as &mut dyn Any).downcast_mut::<T>()
}

static_assertions::assert_impl_all!(SharedObjectRegistry: Send, Sync);
