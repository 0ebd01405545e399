//! Tests for the edge synchronizer

#[cfg(test)]
mod tests {
    use crate::config::SyncConfig;
    use crate::graph::{Graph, GraphEdge, GraphNode};
    use crate::store::{FileStore, MemoryFileStore};
    use crate::sync::{EdgeSynchronizer, SyncError};
    use serde_json::json;
    use std::sync::Arc;

    const CANVAS: &str = "boards/main.canvas";

    fn file_node(id: &str, path: &str) -> serde_json::Value {
        json!({"id": id, "type": "file", "file": path, "x": 0, "y": 0, "width": 400, "height": 400})
    }

    fn canvas_text(nodes: Vec<serde_json::Value>, edges: &[(&str, &str, &str)]) -> String {
        let edges: Vec<serde_json::Value> = edges
            .iter()
            .map(|(id, from, to)| json!({"id": id, "fromNode": from, "toNode": to}))
            .collect();
        json!({"nodes": nodes, "edges": edges}).to_string()
    }

    fn two_notes() -> Vec<serde_json::Value> {
        vec![file_node("n1", "A.md"), file_node("n2", "notes/B.md")]
    }

    fn setup(canvas: String) -> (EdgeSynchronizer, MemoryFileStore) {
        let store = MemoryFileStore::with_documents([
            (CANVAS.to_string(), canvas),
            ("A.md".to_string(), "# A\n\nBody of A".to_string()),
            ("notes/B.md".to_string(), "# B\n\nBody of B".to_string()),
        ]);
        let synchronizer =
            EdgeSynchronizer::new(Arc::new(store.clone()), CANVAS, SyncConfig::default());
        (synchronizer, store)
    }

    #[tokio::test]
    async fn test_added_edge_links_both_notes() {
        let (mut sync, store) = setup(canvas_text(two_notes(), &[]));
        sync.initialize_from_canvas().await.unwrap();
        assert_eq!(store.write_count(), 0);

        store.insert(CANVAS, canvas_text(two_notes(), &[("e1", "n1", "n2")]));
        let report = sync.on_graph_modified().await.unwrap();

        assert_eq!(report.edges_added, 1);
        assert_eq!(report.documents_updated, vec!["A.md", "notes/B.md"]);
        assert_eq!(
            store.document("A.md").unwrap(),
            "# A\n\nBody of A\n\n## Connections\n\n- [[B]]"
        );
        assert_eq!(
            store.document("notes/B.md").unwrap(),
            "# B\n\nBody of B\n\n## Connections\n\n- [[A]]"
        );
        assert_eq!(sync.snapshot().edge_count(), 1);
    }

    #[tokio::test]
    async fn test_removed_edge_unlinks_both_notes() {
        let (mut sync, store) = setup(canvas_text(two_notes(), &[]));
        sync.initialize_from_canvas().await.unwrap();

        store.insert(CANVAS, canvas_text(two_notes(), &[("e1", "n1", "n2")]));
        sync.on_graph_modified().await.unwrap();

        store.insert(CANVAS, canvas_text(two_notes(), &[]));
        let report = sync.on_graph_modified().await.unwrap();

        assert_eq!(report.edges_removed, 1);
        assert_eq!(store.document("A.md").unwrap(), "# A\n\nBody of A");
        assert_eq!(store.document("notes/B.md").unwrap(), "# B\n\nBody of B");
        assert!(sync.snapshot().edge("e1").is_none());
    }

    #[tokio::test]
    async fn test_reverse_edge_keeps_backlinks() {
        let edges = [("e1", "n1", "n2"), ("e3", "n2", "n1")];
        let (mut sync, store) = setup(canvas_text(two_notes(), &edges));
        store.insert("A.md", "# A\n\n## Connections\n\n- [[B]]");
        store.insert("notes/B.md", "# B\n\n## Connections\n\n- [[A]]");
        sync.initialize_from_canvas().await.unwrap();

        store.insert(CANVAS, canvas_text(two_notes(), &[("e3", "n2", "n1")]));
        let report = sync.on_graph_modified().await.unwrap();

        assert_eq!(report.edges_removed, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(store.write_count(), 0);
        assert!(store.document("A.md").unwrap().contains("- [[B]]"));
    }

    #[tokio::test]
    async fn test_existing_link_is_not_duplicated() {
        let (mut sync, store) = setup(canvas_text(two_notes(), &[]));
        store.insert("A.md", "# A\n\nSee [[B]] inline.");
        sync.initialize_from_canvas().await.unwrap();

        store.insert(CANVAS, canvas_text(two_notes(), &[("e1", "n1", "n2")]));
        let report = sync.on_graph_modified().await.unwrap();

        assert_eq!(report.documents_updated, vec!["notes/B.md"]);
        assert_eq!(store.document("A.md").unwrap(), "# A\n\nSee [[B]] inline.");
    }

    #[tokio::test]
    async fn test_graph_only_nodes_are_skipped() {
        let nodes = vec![
            file_node("n1", "A.md"),
            json!({"id": "t", "type": "text", "text": "idea", "x": 0, "y": 0, "width": 1, "height": 1}),
        ];
        let (mut sync, store) = setup(canvas_text(nodes.clone(), &[]));
        sync.initialize_from_canvas().await.unwrap();

        store.insert(CANVAS, canvas_text(nodes, &[("e1", "n1", "t"), ("e2", "n1", "ghost")]));
        let report = sync.on_graph_modified().await.unwrap();

        assert_eq!(report.edges_added, 2);
        assert_eq!(report.skipped, 2);
        assert_eq!(store.write_count(), 0);
        // Skipped edges are still committed
        assert_eq!(sync.snapshot().edge_count(), 2);
    }

    #[tokio::test]
    async fn test_malformed_canvas_aborts_and_keeps_snapshot() {
        let (mut sync, store) = setup(canvas_text(two_notes(), &[("e1", "n1", "n2")]));
        sync.initialize_from_canvas().await.unwrap();

        store.insert(CANVAS, "{\"nodes\": [");
        let report = sync.on_graph_modified().await.unwrap();

        assert!(report.aborted);
        assert_eq!(store.write_count(), 0);
        assert!(sync.snapshot().edge("e1").is_some());
    }

    #[tokio::test]
    async fn test_failure_on_one_document_continues() {
        let nodes = vec![
            file_node("n1", "A.md"),
            file_node("n2", "notes/B.md"),
            file_node("n3", "C.md"),
        ];
        let (mut sync, store) = setup(canvas_text(nodes.clone(), &[]));
        store.insert("C.md", "# C");
        sync.initialize_from_canvas().await.unwrap();

        store.fail_on("notes/B.md");
        store.insert(
            CANVAS,
            canvas_text(nodes, &[("e1", "n1", "n2"), ("e2", "n1", "n3")]),
        );
        let report = sync.on_graph_modified().await.unwrap();

        assert!(report.has_failures());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].edge_id, "e1");
        assert_eq!(report.failures[0].document, "notes/B.md");
        let a = store.document("A.md").unwrap();
        assert!(a.contains("- [[B]]"));
        assert!(a.contains("- [[C]]"));
        assert_eq!(store.document("C.md").unwrap(), "# C\n\n## Connections\n\n- [[A]]");
    }

    #[tokio::test]
    async fn test_missing_document_is_reported() {
        let nodes = vec![file_node("n1", "A.md"), file_node("n2", "Deleted.md")];
        let (mut sync, store) = setup(canvas_text(nodes.clone(), &[]));
        sync.initialize_from_canvas().await.unwrap();

        store.insert(CANVAS, canvas_text(nodes, &[("e1", "n1", "n2")]));
        let report = sync.on_graph_modified().await.unwrap();

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.documents_updated, vec!["A.md"]);
    }

    #[tokio::test]
    async fn test_markers_follow_direction() {
        let store = MemoryFileStore::with_documents([
            ("A.md", "# A"),
            ("B.md", "# B"),
        ]);
        let config = SyncConfig {
            outbound_marker: "→ ".to_string(),
            inbound_marker: "← ".to_string(),
            ..Default::default()
        };
        let mut sync = EdgeSynchronizer::new(Arc::new(store.clone()), CANVAS, config);

        let graph = Graph::new(
            vec![GraphNode::file("n1", "A.md"), GraphNode::file("n2", "B.md")],
            vec![GraphEdge::new("e1", "n1", "n2")],
        );
        sync.apply_graph(&graph).await;

        assert!(store.document("A.md").unwrap().ends_with("- → [[B]]"));
        assert!(store.document("B.md").unwrap().ends_with("- ← [[A]]"));
    }

    #[tokio::test]
    async fn test_non_markdown_endpoint_gets_no_backlink() {
        let store = MemoryFileStore::with_documents([("A.md", "# A"), ("img.png", "binary")]);
        let mut sync = EdgeSynchronizer::new(Arc::new(store.clone()), CANVAS, SyncConfig::default());

        let graph = Graph::new(
            vec![GraphNode::file("n1", "A.md"), GraphNode::file("n2", "img.png")],
            vec![GraphEdge::new("e1", "n1", "n2")],
        );
        let report = sync.apply_graph(&graph).await;

        assert_eq!(report.documents_updated, vec!["A.md"]);
        assert_eq!(store.document("img.png").unwrap(), "binary");
        assert!(store.document("A.md").unwrap().ends_with("- [[img.png]]"));
    }

    #[tokio::test]
    async fn test_reset_replays_every_edge() {
        let (mut sync, store) = setup(canvas_text(two_notes(), &[("e1", "n1", "n2")]));
        sync.initialize_from_canvas().await.unwrap();

        sync.reset();
        assert!(sync.snapshot().is_empty());

        let report = sync.on_graph_modified().await.unwrap();
        assert_eq!(report.edges_added, 1);
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn test_unreadable_canvas_is_an_error() {
        let store = MemoryFileStore::new();
        let mut sync = EdgeSynchronizer::new(Arc::new(store), CANVAS, SyncConfig::default());

        assert!(matches!(
            sync.on_graph_modified().await,
            Err(SyncError::Store(err)) if err.is_not_found()
        ));
    }

    #[tokio::test]
    async fn test_initialize_writes_nothing() {
        let (mut sync, store) = setup(canvas_text(two_notes(), &[("e1", "n1", "n2")]));
        sync.initialize_from_canvas().await.unwrap();

        assert_eq!(store.write_count(), 0);
        assert!(!store.exists("C.md").await.unwrap());
        assert_eq!(sync.snapshot().node_count(), 2);
    }

    #[tokio::test]
    async fn test_endpoints_resolve_against_the_right_graph() {
        let store = MemoryFileStore::with_documents([
            ("A.md", "# A\n\n## Connections\n\n- [[B]]"),
            ("B.md", "# B\n\n## Connections\n\n- [[A]]"),
            ("C.md", "# C"),
        ]);
        let mut sync = EdgeSynchronizer::new(Arc::new(store.clone()), CANVAS, SyncConfig::default());

        let before = Graph::new(
            vec![GraphNode::file("n1", "A.md"), GraphNode::file("n2", "B.md")],
            vec![GraphEdge::new("e1", "n1", "n2")],
        );
        sync.apply_graph(&before).await;
        assert_eq!(store.write_count(), 0);

        // n2 now shows C.md; e1 is replaced by e2 between the same nodes
        let after = Graph::new(
            vec![GraphNode::file("n1", "A.md"), GraphNode::file("n2", "C.md")],
            vec![GraphEdge::new("e2", "n1", "n2")],
        );
        let report = sync.apply_graph(&after).await;

        // Removal is suppressed by the tie-break; the addition targets the new document
        assert_eq!(report.skipped, 1);
        assert_eq!(store.document("C.md").unwrap(), "# C\n\n## Connections\n\n- [[A]]");
        let a = store.document("A.md").unwrap();
        assert!(a.contains("- [[B]]"));
        assert!(a.contains("- [[C]]"));
        assert_eq!(
            sync.snapshot().nodes_by_id()["n2"].document_ref(),
            Some("C.md")
        );
    }
}
