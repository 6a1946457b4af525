//! Grouping of top-level shapes

use tracing::info;

use super::SceneState;
use crate::build::default_color;
use crate::state::shape::{new_id, Shape, ShapeId, ShapeKind, Transform};

impl SceneState {
    /// Move the given top-level shapes into a new group at identity transform.
    /// Ids not in the store are skipped; fewer than two members is a no-op.
    pub fn group(&mut self, ids: &[ShapeId]) -> Option<ShapeId> {
        let mut members: Vec<&ShapeId> = Vec::new();
        for id in ids {
            if self.index_of(id).is_some() && !members.contains(&id) {
                members.push(id);
            }
        }
        if members.len() < 2 {
            return None;
        }

        self.save_undo();
        let mut children = Vec::with_capacity(members.len());
        for id in members {
            if let Some(index) = self.index_of(id) {
                children.push(self.shapes.remove(index));
            }
        }

        let kind = ShapeKind::Group { children };
        let color = default_color(&kind);
        let group = Shape::new(new_id(), kind, Transform::default(), color);
        let id = group.id.clone();
        info!(%id, members = group.children().len(), "Grouped shapes");
        self.shapes.push(group);
        self.version += 1;
        Some(id)
    }

    /// Dissolve a group, restoring its children as top-level shapes in its place.
    /// Children keep their world placement. Non-groups are a no-op.
    pub fn ungroup(&mut self, id: &str) -> Option<Vec<ShapeId>> {
        let index = self.index_of(id)?;
        if !self.shapes[index].is_group() {
            return None;
        }

        self.save_undo();
        let group = self.shapes.remove(index);
        let parent = group.transform.matrix();
        let mut children = group.into_children();
        for child in &mut children {
            child.transform = Transform::from_matrix(&(parent * child.transform.matrix()));
        }

        let ids: Vec<ShapeId> = children.iter().map(|c| c.id.clone()).collect();
        self.shapes.splice(index..index, children);
        self.version += 1;
        info!(%id, members = ids.len(), "Ungrouped shapes");
        Some(ids)
    }
}
