use bevy::prelude::*;

/// Index of a node inside a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// World-space axis-aligned bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl WorldBounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Bounds enclosing every given point.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn union(&self, other: &WorldBounds) -> WorldBounds {
        WorldBounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    /// None for groups with no mesh descendants.
    pub bounds: Option<WorldBounds>,
    pub is_mesh: bool,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub is_interactive: bool,
    /// Entity this node was built from, if it came from the ECS world.
    pub entity: Option<Entity>,
}

/// Owned snapshot of the loaded room hierarchy.
///
/// Nodes are stored in depth-first pre-order, so iteration order is
/// discovery order. Immutable after construction except for the single
/// interactive tag.
#[derive(Resource, Debug, Default, Clone)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    interactive: Option<NodeId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a group node. Parents must be added before their children.
    pub fn add_group(&mut self, name: impl Into<String>, parent: Option<NodeId>) -> NodeId {
        self.push(SceneNode {
            name: name.into(),
            bounds: None,
            is_mesh: false,
            parent,
            children: Vec::new(),
            is_interactive: false,
            entity: None,
        })
    }

    /// Append a mesh node with its world bounds.
    pub fn add_mesh(
        &mut self,
        name: impl Into<String>,
        bounds: WorldBounds,
        parent: Option<NodeId>,
    ) -> NodeId {
        self.push(SceneNode {
            name: name.into(),
            bounds: Some(bounds),
            is_mesh: true,
            parent,
            children: Vec::new(),
            is_interactive: false,
            entity: None,
        })
    }

    fn push(&mut self, node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        if let Some(parent) = node.parent {
            self.nodes[parent.0].children.push(id);
        }
        self.nodes.push(node);
        id
    }

    pub fn set_entity(&mut self, id: NodeId, entity: Entity) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.entity = Some(entity);
        }
    }

    /// Fill group bounds from their descendants. Call once after building.
    pub fn finalize_bounds(&mut self) {
        // Pre-order guarantees children sit after their parent.
        for index in (0..self.nodes.len()).rev() {
            let Some(bounds) = self.nodes[index].bounds else {
                continue;
            };
            if let Some(parent) = self.nodes[index].parent {
                let parent_node = &mut self.nodes[parent.0];
                parent_node.bounds = Some(match parent_node.bounds {
                    Some(existing) => existing.union(&bounds),
                    None => bounds,
                });
            }
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Mesh nodes in discovery order.
    pub fn meshes(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.is_mesh)
            .map(|(index, node)| (NodeId(index), node))
    }

    /// Node followed by its ancestors up to the root.
    pub fn ancestors(&self, start: NodeId) -> Ancestors<'_> {
        Ancestors {
            graph: self,
            next: self.node(start).map(|_| start),
            remaining: self.nodes.len(),
        }
    }

    pub fn interactive(&self) -> Option<NodeId> {
        self.interactive
    }

    /// Tag the interactive object. Refused once one is already set.
    pub fn tag_interactive(&mut self, id: NodeId) -> bool {
        if self.interactive.is_some() || id.0 >= self.nodes.len() {
            return false;
        }
        self.nodes[id.0].is_interactive = true;
        self.interactive = Some(id);
        true
    }

    pub fn find_by_entity(&self, entity: Entity) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|node| node.entity == Some(entity))
            .map(NodeId)
    }
}

/// Upward walk bounded by the node count so a malformed parent cycle ends.
pub struct Ancestors<'a> {
    graph: &'a SceneGraph,
    next: Option<NodeId>,
    remaining: usize,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.remaining == 0 {
            return None;
        }
        let current = self.next?;
        self.remaining -= 1;
        self.next = self.graph.node(current).and_then(|node| node.parent);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box(center: Vec3) -> WorldBounds {
        WorldBounds::from_center_size(center, Vec3::ONE)
    }

    #[test]
    fn group_bounds_cover_children() {
        let mut graph = SceneGraph::new();
        let root = graph.add_group("Room", None);
        let desk = graph.add_group("Desk", Some(root));
        graph.add_mesh("Leg", unit_box(Vec3::new(-2.0, 0.0, 0.0)), Some(desk));
        graph.add_mesh("Top", unit_box(Vec3::new(2.0, 1.0, 0.0)), Some(desk));
        graph.finalize_bounds();

        let bounds = graph.node(root).and_then(|n| n.bounds).unwrap();
        assert_eq!(bounds.min, Vec3::new(-2.5, -0.5, -0.5));
        assert_eq!(bounds.max, Vec3::new(2.5, 1.5, 0.5));
    }

    #[test]
    fn ancestors_walk_to_root() {
        let mut graph = SceneGraph::new();
        let root = graph.add_group("Room", None);
        let pc = graph.add_group("PC", Some(root));
        let screen = graph.add_mesh("Glass", unit_box(Vec3::ZERO), Some(pc));

        let chain: Vec<NodeId> = graph.ancestors(screen).collect();
        assert_eq!(chain, vec![screen, pc, root]);
    }

    #[test]
    fn only_one_interactive_tag() {
        let mut graph = SceneGraph::new();
        let a = graph.add_mesh("A", unit_box(Vec3::ZERO), None);
        let b = graph.add_mesh("B", unit_box(Vec3::ONE), None);

        assert!(graph.tag_interactive(a));
        assert!(!graph.tag_interactive(b));
        assert_eq!(graph.interactive(), Some(a));
        assert!(!graph.node(b).unwrap().is_interactive);
    }
}
