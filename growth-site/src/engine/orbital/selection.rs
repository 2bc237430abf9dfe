use bevy::prelude::*;

/// The currently highlighted benefit node. At most one node is active at a time.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActiveNode(Option<u32>);

impl ActiveNode {
    pub fn get(&self) -> Option<u32> {
        self.0
    }

    pub fn is_active(&self, id: u32) -> bool {
        self.0 == Some(id)
    }

    /// Make `id` the active node, replacing any previous selection.
    pub fn enter(&mut self, id: u32) {
        self.0 = Some(id);
    }

    /// Clear the selection, but only if `id` is the node currently active.
    /// A stale leave from a node that was already replaced is ignored.
    pub fn leave(&mut self, id: u32) {
        if self.0 == Some(id) {
            self.0 = None;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverKind {
    Enter,
    Leave,
}

/// Pointer entered or left a benefit node's hit area.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHoverEvent {
    pub node: u32,
    pub kind: HoverKind,
}

impl NodeHoverEvent {
    pub fn enter(node: u32) -> Self {
        Self {
            node,
            kind: HoverKind::Enter,
        }
    }

    pub fn leave(node: u32) -> Self {
        Self {
            node,
            kind: HoverKind::Leave,
        }
    }
}

/// Sole writer of `ActiveNode`. Events are applied in arrival order.
pub fn apply_node_hover_events(
    mut events: EventReader<NodeHoverEvent>,
    mut active: ResMut<ActiveNode>,
) {
    if events.is_empty() {
        return;
    }

    let before = *active;
    // Mutate through a copy so change detection fires only on a real change.
    let mut next = before;
    for event in events.read() {
        match event.kind {
            HoverKind::Enter => next.enter(event.node),
            HoverKind::Leave => next.leave(event.node),
        }
    }

    if next != before {
        debug!("Active node {:?} -> {:?}", before.get(), next.get());
        *active = next;
    }
}
