//! Canvas layout for extracted notes

use std::collections::HashMap;

use uuid::Uuid;

use super::atomizer::AtomizeOutcome;
use crate::config::AtomizeConfig;
use crate::graph::{CanvasEdge, CanvasNode};

/// Nodes and edges added to a canvas for one extraction
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Placement {
    pub nodes: Vec<CanvasNode>,
    pub edges: Vec<CanvasEdge>,
}

/// 16 hex character id, the length canvas editors use for their own nodes
pub fn short_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(16);
    id
}

/// Lay the notes of `outcome` out in a grid.
///
/// Column `n` holds the notes at depth `n`, top to bottom in creation order. The grid starts
/// one gap to the right of `anchor`, level with its top edge, or at the origin without one.
/// `next_id` supplies ids for new nodes and edges.
pub fn layout_notes<F>(
    outcome: &AtomizeOutcome,
    anchor: Option<&CanvasNode>,
    config: &AtomizeConfig,
    mut next_id: F,
) -> Placement
where
    F: FnMut() -> String,
{
    let (origin_x, origin_y) = match anchor {
        Some(node) => {
            let (x, y, width, _) = node.bounds();
            ((x + width).round() as i64 + config.node_gap, y.round() as i64)
        }
        None => (0, 0),
    };

    let mut placement = Placement::default();
    let mut rows_by_depth: HashMap<usize, i64> = HashMap::new();

    for note in &outcome.notes {
        let row = rows_by_depth.entry(note.depth).or_insert(0);
        let x = origin_x + note.depth as i64 * (config.node_width + config.node_gap);
        let y = origin_y + *row * (config.node_height + config.node_gap);
        *row += 1;

        placement.nodes.push(CanvasNode::file(
            next_id(),
            note.document.clone(),
            x,
            y,
            config.node_width,
            config.node_height,
        ));
    }

    for (index, note) in outcome.notes.iter().enumerate() {
        let from = match note.parent {
            Some(parent) => placement.nodes[parent].id.clone(),
            None => match anchor {
                Some(node) => node.id.clone(),
                None => continue,
            },
        };
        let to = placement.nodes[index].id.clone();
        placement.edges.push(CanvasEdge::new(next_id(), from, to));
    }

    placement
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atomize::CreatedNote;

    fn note(candidate: usize, document: &str, depth: usize, parent: Option<usize>) -> CreatedNote {
        CreatedNote {
            candidate,
            document: document.to_string(),
            heading_text: document.trim_end_matches(".md").to_string(),
            depth,
            parent,
        }
    }

    fn outcome() -> AtomizeOutcome {
        AtomizeOutcome {
            source: "Project.md".to_string(),
            notes: vec![
                note(0, "Project.md", 0, None),
                note(1, "Goals.md", 1, Some(0)),
                note(2, "Stretch.md", 2, Some(1)),
                note(3, "Risks.md", 1, Some(0)),
            ],
        }
    }

    fn counter() -> impl FnMut() -> String {
        let mut next = 0;
        move || {
            next += 1;
            format!("id{}", next)
        }
    }

    #[test]
    fn test_grid_without_anchor() {
        let placement = layout_notes(&outcome(), None, &AtomizeConfig::default(), counter());

        let positions: Vec<(i64, i64)> = placement
            .nodes
            .iter()
            .map(|n| (n.x.as_i64().unwrap(), n.y.as_i64().unwrap()))
            .collect();
        assert_eq!(positions, vec![(0, 0), (450, 0), (900, 0), (450, 450)]);
        assert_eq!(placement.nodes[1].file.as_deref(), Some("Goals.md"));

        // Parent to child only, no anchor edge
        let pairs: Vec<(&str, &str)> = placement
            .edges
            .iter()
            .map(|e| (e.from_node.as_str(), e.to_node.as_str()))
            .collect();
        assert_eq!(pairs, vec![("id1", "id2"), ("id2", "id3"), ("id1", "id4")]);
    }

    #[test]
    fn test_grid_right_of_anchor() {
        let anchor = CanvasNode::file("src", "Source.md", 100, -40, 300, 200);
        let placement = layout_notes(&outcome(), Some(&anchor), &AtomizeConfig::default(), counter());

        assert_eq!(placement.nodes[0].x.as_i64(), Some(450));
        assert_eq!(placement.nodes[0].y.as_i64(), Some(-40));
        assert_eq!(placement.edges.len(), 4);
        assert_eq!(placement.edges[0].from_node, "src");
        assert_eq!(placement.edges[0].to_node, placement.nodes[0].id);
    }

    #[test]
    fn test_short_id_shape() {
        let id = short_id();
        assert_eq!(id.len(), 16);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(id, short_id());
    }
}
