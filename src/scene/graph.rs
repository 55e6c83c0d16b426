//! Arena-backed scene graph rooted at a program object.

use std::collections::{HashMap, HashSet};

use crate::error::SceneError;

use super::object::{ObjectData, ObjectId, ObjectKind, SceneObject};

type SceneResult<T> = std::result::Result<T, SceneError>;

/// Where to place an object relative to a sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Before,
    After,
}

/// The object model shown by the outliner.
///
/// Objects live in a flat map; `parent` and `children` on each
/// [`SceneObject`] encode the hierarchy. The root is always a
/// [`ObjectKind::Program`].
#[derive(Debug, Clone)]
pub struct SceneGraph {
    objects: HashMap<ObjectId, SceneObject>,
    root: ObjectId,
}

impl SceneGraph {
    /// Create a graph holding only a program root.
    pub fn new(program_name: impl Into<String>) -> Self {
        let program = SceneObject::new(program_name, ObjectKind::Program);
        let root = program.id;
        let mut objects = HashMap::new();
        objects.insert(root, program);
        Self { objects, root }
    }

    /// Rebuild a graph from a serialized program tree.
    ///
    /// Fails with [`SceneError::DuplicateId`] when an identifier appears
    /// more than once in the tree.
    pub fn from_data(data: ObjectData) -> SceneResult<Self> {
        let root = data.id;
        let mut graph = Self {
            objects: HashMap::new(),
            root,
        };
        graph.check_ids(&data)?;
        graph.insert_data(None, data);
        Ok(graph)
    }

    /// Serialize the whole program.
    pub fn to_data(&self) -> SceneResult<ObjectData> {
        self.subtree_data(self.root)
    }

    pub fn root(&self) -> ObjectId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(&id)
    }

    fn object(&self, id: ObjectId) -> SceneResult<&SceneObject> {
        self.objects.get(&id).ok_or(SceneError::UnknownObject(id))
    }

    fn object_mut(&mut self, id: ObjectId) -> SceneResult<&mut SceneObject> {
        self.objects
            .get_mut(&id)
            .ok_or(SceneError::UnknownObject(id))
    }

    pub fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.objects.get(&id).and_then(|o| o.parent)
    }

    pub fn children(&self, id: ObjectId) -> &[ObjectId] {
        self.objects
            .get(&id)
            .map(|o| o.children.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the object has no children. Unknown objects count as empty.
    pub fn object_is_empty(&self, id: ObjectId) -> bool {
        self.children(id).is_empty()
    }

    /// Whether `ancestor` sits strictly above `id` in the hierarchy.
    pub fn is_ancestor_of(&self, ancestor: ObjectId, id: ObjectId) -> bool {
        let mut current = self.parent(id);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parent(parent);
        }
        false
    }

    /// Scenes directly under the program, in order.
    pub fn scenes(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.children(self.root)
            .iter()
            .copied()
            .filter(|id| self.objects.get(id).is_some_and(|o| o.kind.is_scene()))
    }

    /// Visit `id` and its descendants, parents first.
    pub fn traverse(&self, id: ObjectId, f: &mut impl FnMut(&SceneObject)) {
        if let Some(object) = self.objects.get(&id) {
            f(object);
            for child in &object.children {
                self.traverse(*child, f);
            }
        }
    }

    /// Collect `id` and its descendants, parents first.
    pub fn descendants(&self, id: ObjectId) -> Vec<ObjectId> {
        let mut ids = Vec::new();
        self.traverse(id, &mut |o| ids.push(o.id));
        ids
    }

    /// Create a new object and append it to `parent`.
    pub fn spawn(
        &mut self,
        parent: ObjectId,
        name: impl Into<String>,
        kind: ObjectKind,
    ) -> SceneResult<ObjectId> {
        self.object(parent)?;
        let mut object = SceneObject::new(name, kind);
        let id = object.id;
        object.parent = Some(parent);
        self.objects.insert(id, object);
        self.object_mut(parent)?.children.push(id);
        Ok(id)
    }

    fn check_move(&self, object: ObjectId, parent: ObjectId) -> SceneResult<()> {
        self.object(object)?;
        self.object(parent)?;
        if object == self.root || object == parent || self.is_ancestor_of(object, parent) {
            return Err(SceneError::Cycle { object, parent });
        }
        Ok(())
    }

    fn detach(&mut self, object: ObjectId) {
        if let Some(old_parent) = self.parent(object) {
            if let Some(parent) = self.objects.get_mut(&old_parent) {
                parent.children.retain(|c| *c != object);
            }
        }
        if let Some(o) = self.objects.get_mut(&object) {
            o.parent = None;
        }
    }

    /// Move `object` to the end of `parent`'s children.
    pub fn add(&mut self, parent: ObjectId, object: ObjectId) -> SceneResult<()> {
        self.check_move(object, parent)?;
        self.detach(object);
        self.object_mut(object)?.parent = Some(parent);
        self.object_mut(parent)?.children.push(object);
        Ok(())
    }

    /// Move `object` into `parent` immediately before `target`.
    pub fn add_above(
        &mut self,
        parent: ObjectId,
        object: ObjectId,
        target: ObjectId,
    ) -> SceneResult<()> {
        self.add_next_to(parent, object, target, Placement::Before)
    }

    /// Move `object` into `parent` immediately after `target`.
    pub fn add_below(
        &mut self,
        parent: ObjectId,
        object: ObjectId,
        target: ObjectId,
    ) -> SceneResult<()> {
        self.add_next_to(parent, object, target, Placement::After)
    }

    fn add_next_to(
        &mut self,
        parent: ObjectId,
        object: ObjectId,
        target: ObjectId,
        placement: Placement,
    ) -> SceneResult<()> {
        self.check_move(object, parent)?;
        if object == target {
            return Err(SceneError::Cycle { object, parent });
        }
        if self.parent(target) != Some(parent) {
            return Err(SceneError::NotAChild { parent, target });
        }

        self.detach(object);
        self.object_mut(object)?.parent = Some(parent);

        let children = &mut self.object_mut(parent)?.children;
        let index = children
            .iter()
            .position(|c| *c == target)
            .ok_or(SceneError::NotAChild { parent, target })?;
        let index = match placement {
            Placement::Before => index,
            Placement::After => index + 1,
        };
        children.insert(index, object);
        Ok(())
    }

    /// Remove an object and its subtree, returning the serialized subtree.
    pub fn remove(&mut self, id: ObjectId) -> SceneResult<ObjectData> {
        if id == self.root {
            return Err(SceneError::RootRemoval);
        }
        let data = self.subtree_data(id)?;
        self.detach(id);
        for descendant in self.descendants(id) {
            self.objects.remove(&descendant);
        }
        Ok(data)
    }

    /// Capture an object and its subtree as plain data.
    pub fn subtree_data(&self, id: ObjectId) -> SceneResult<ObjectData> {
        let object = self.object(id)?;
        let children = object
            .children
            .iter()
            .map(|c| self.subtree_data(*c))
            .collect::<SceneResult<Vec<_>>>()?;
        Ok(ObjectData {
            id: object.id,
            name: object.name.clone(),
            kind: object.kind.clone(),
            folded: object.folded,
            matrix_auto_update: object.matrix_auto_update,
            cast_shadow: object.cast_shadow,
            receive_shadow: object.receive_shadow,
            children,
        })
    }

    /// Serialize an object and its subtree to JSON.
    pub fn serialize(&self, id: ObjectId) -> SceneResult<String> {
        Ok(serde_json::to_string(&self.subtree_data(id)?)?)
    }

    /// Parse a subtree previously produced by [`SceneGraph::serialize`].
    pub fn deserialize(json: &str) -> SceneResult<ObjectData> {
        Ok(serde_json::from_str(json)?)
    }

    /// Append a serialized subtree under `parent`, returning the new root id.
    ///
    /// Identifiers are taken from `data` as is; callers that insert copies
    /// should call [`ObjectData::regenerate_ids`] first.
    pub fn insert(&mut self, parent: ObjectId, data: ObjectData) -> SceneResult<ObjectId> {
        self.object(parent)?;
        self.check_ids(&data)?;
        let id = self.insert_data(Some(parent), data);
        self.object_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Reject subtrees that repeat an id or reuse one already in the graph.
    fn check_ids(&self, data: &ObjectData) -> SceneResult<()> {
        let mut seen = HashSet::new();
        let mut stack = vec![data];
        while let Some(node) = stack.pop() {
            if self.objects.contains_key(&node.id) || !seen.insert(node.id) {
                return Err(SceneError::DuplicateId(node.id));
            }
            stack.extend(&node.children);
        }
        Ok(())
    }

    fn insert_data(&mut self, parent: Option<ObjectId>, data: ObjectData) -> ObjectId {
        let id = data.id;
        let children: Vec<ObjectId> = data
            .children
            .into_iter()
            .map(|child| self.insert_data(Some(id), child))
            .collect();
        self.objects.insert(
            id,
            SceneObject {
                id,
                name: data.name,
                kind: data.kind,
                folded: data.folded,
                matrix_auto_update: data.matrix_auto_update,
                cast_shadow: data.cast_shadow,
                receive_shadow: data.receive_shadow,
                parent,
                children,
            },
        );
        id
    }

    /// Deep-copy an object through its serialized form and add the copy next
    /// to it under the same parent.
    pub fn duplicate(&mut self, id: ObjectId) -> SceneResult<ObjectId> {
        let parent = self.parent(id).ok_or(SceneError::Orphan(id))?;
        let mut data = Self::deserialize(&self.serialize(id)?)?;
        data.regenerate_ids();
        self.insert(parent, data)
    }

    /// Set `matrix_auto_update` on an object and all its descendants.
    pub fn set_matrix_auto_update(&mut self, id: ObjectId, value: bool) -> SceneResult<()> {
        self.for_each_descendant(id, |o| o.matrix_auto_update = value)
    }

    pub fn set_shadow_casting(&mut self, id: ObjectId, value: bool) -> SceneResult<()> {
        self.for_each_descendant(id, |o| o.cast_shadow = value)
    }

    pub fn set_shadow_receiving(&mut self, id: ObjectId, value: bool) -> SceneResult<()> {
        self.for_each_descendant(id, |o| o.receive_shadow = value)
    }

    fn for_each_descendant(
        &mut self,
        id: ObjectId,
        mut f: impl FnMut(&mut SceneObject),
    ) -> SceneResult<()> {
        self.object(id)?;
        for descendant in self.descendants(id) {
            if let Some(object) = self.objects.get_mut(&descendant) {
                f(object);
            }
        }
        Ok(())
    }
}
