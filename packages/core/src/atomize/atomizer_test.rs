//! Tests for committing extraction plans

#[cfg(test)]
mod tests {
    use crate::atomize::{AtomizeError, NoteAtomizer};
    use crate::config::AtomizeConfig;
    use crate::graph::CanvasDocument;
    use crate::store::{FileStore, MemoryFileStore};
    use std::sync::Arc;

    const NOTE: &str = "# Project\n\nIntro\n\n## Goals\n\nShip it.\n\n### Stretch\n\nMore.\n\n## Risks\n\nSome.";

    fn atomizer_with(
        docs: &[(&str, &str)],
        config: AtomizeConfig,
    ) -> (NoteAtomizer, MemoryFileStore) {
        let store = MemoryFileStore::with_documents(docs.iter().copied());
        (NoteAtomizer::new(Arc::new(store.clone()), config), store)
    }

    #[tokio::test]
    async fn test_commit_all_creates_linked_notes() {
        let (atomizer, store) = atomizer_with(&[("Project.md", NOTE)], AtomizeConfig::default());

        let plan = atomizer.plan("Project.md", 4, 2).await.unwrap();
        let outcome = atomizer.commit(&plan, &plan.select_all()).await.unwrap();

        let documents: Vec<&str> = outcome.notes.iter().map(|n| n.document.as_str()).collect();
        assert_eq!(documents, vec!["Goals.md", "Stretch.md"]);
        assert_eq!(outcome.notes[1].parent, Some(0));
        assert_eq!(outcome.notes[1].depth, 1);

        assert_eq!(
            store.document("Goals.md").unwrap(),
            "## Goals\n\nShip it.\n\n### Stretch\n\n[[Stretch]]"
        );
        assert_eq!(store.document("Stretch.md").unwrap(), "### Stretch\n\nMore.");
        assert_eq!(
            store.document("Project.md").unwrap(),
            "# Project\n\nIntro\n\n## Goals\n\n[[Goals]]\n\n## Risks\n\nSome."
        );
    }

    #[tokio::test]
    async fn test_root_only_keeps_children_inline() {
        let (atomizer, store) = atomizer_with(&[("Project.md", NOTE)], AtomizeConfig::default());

        let plan = atomizer.plan("Project.md", 4, 2).await.unwrap();
        let outcome = atomizer.commit(&plan, &plan.root_only()).await.unwrap();

        assert_eq!(outcome.notes.len(), 1);
        assert_eq!(
            store.document("Goals.md").unwrap(),
            "## Goals\n\nShip it.\n\n### Stretch\n\nMore."
        );
        assert!(!store.exists("Stretch.md").await.unwrap());
    }

    #[tokio::test]
    async fn test_root_is_always_extracted() {
        let (atomizer, store) = atomizer_with(&[("Project.md", NOTE)], AtomizeConfig::default());

        let plan = atomizer.plan("Project.md", 4, 2).await.unwrap();
        let outcome = atomizer.commit(&plan, &[false, true]).await.unwrap();

        assert_eq!(outcome.root().unwrap().document, "Goals.md");
        assert_eq!(outcome.notes.len(), 2);
        assert!(store.document("Project.md").unwrap().contains("[[Goals]]"));
    }

    #[tokio::test]
    async fn test_unselected_middle_section_stays_inline() {
        let text = "# Top\n## Mid\nm\n### Leaf\nl";
        let (atomizer, store) = atomizer_with(&[("Top.md", text)], AtomizeConfig {
            notes_folder: Some("atoms".to_string()),
            ..Default::default()
        });

        let plan = atomizer.plan("Top.md", 0, 1).await.unwrap();
        let outcome = atomizer.commit(&plan, &[true, false, true]).await.unwrap();

        assert_eq!(
            store.document("atoms/Top.md").unwrap(),
            "# Top\n\n## Mid\n\nm\n\n### Leaf\n\n[[Leaf]]"
        );
        // Leaf hangs off the nearest selected ancestor
        assert_eq!(outcome.notes[1].document, "atoms/Leaf.md");
        assert_eq!(outcome.notes[1].parent, Some(0));
        assert_eq!(outcome.notes[1].depth, 1);
        assert_eq!(store.document("Top.md").unwrap(), "# Top\n\n[[Top]]");
    }

    #[tokio::test]
    async fn test_names_are_deduplicated() {
        let text = "## Idea\n\none\n\n### Idea\n\ntwo";
        let (atomizer, store) =
            atomizer_with(&[("Ideas.md", text), ("Idea.md", "taken")], AtomizeConfig::default());

        let plan = atomizer.plan("Ideas.md", 0, 2).await.unwrap();
        let outcome = atomizer.commit(&plan, &plan.select_all()).await.unwrap();

        let documents: Vec<&str> = outcome.notes.iter().map(|n| n.document.as_str()).collect();
        assert_eq!(documents, vec!["Idea 2.md", "Idea 3.md"]);
        assert_eq!(store.document("Idea.md").unwrap(), "taken");
        assert_eq!(store.document("Ideas.md").unwrap(), "## Idea\n\n[[Idea 2]]");
    }

    #[tokio::test]
    async fn test_heading_markup_is_stripped_from_names() {
        let text = "## **Why:** costs / benefits?\n\nbody";
        let (atomizer, store) = atomizer_with(&[("N.md", text)], AtomizeConfig::default());

        let plan = atomizer.plan("N.md", 0, 2).await.unwrap();
        atomizer.commit(&plan, &plan.select_all()).await.unwrap();

        assert!(store.exists("Why costs benefits.md").await.unwrap());
    }

    #[tokio::test]
    async fn test_selection_mismatch() {
        let (atomizer, store) = atomizer_with(&[("Project.md", NOTE)], AtomizeConfig::default());

        let plan = atomizer.plan("Project.md", 4, 2).await.unwrap();
        let err = atomizer.commit(&plan, &[true]).await.unwrap_err();

        assert!(matches!(
            err,
            AtomizeError::SelectionMismatch {
                expected: 2,
                actual: 1
            }
        ));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_stale_plan_is_rejected() {
        let (atomizer, store) = atomizer_with(&[("Project.md", NOTE)], AtomizeConfig::default());

        let plan = atomizer.plan("Project.md", 4, 2).await.unwrap();
        store.insert("Project.md", format!("Prepended line\n{}", NOTE));

        let err = atomizer.commit(&plan, &plan.select_all()).await.unwrap_err();
        assert!(matches!(err, AtomizeError::StalePlan { .. }));
        assert!(!store.exists("Goals.md").await.unwrap());
    }

    #[tokio::test]
    async fn test_missing_folder() {
        let config = AtomizeConfig {
            notes_folder: Some("atoms/new".to_string()),
            create_missing_folder: false,
            ..Default::default()
        };
        let (atomizer, _store) = atomizer_with(&[("Project.md", NOTE)], config);

        let plan = atomizer.plan("Project.md", 4, 2).await.unwrap();
        let err = atomizer.commit(&plan, &plan.root_only()).await.unwrap_err();
        assert!(matches!(err, AtomizeError::FolderMissing { folder } if folder == "atoms/new"));
    }

    #[tokio::test]
    async fn test_missing_folder_is_created() {
        let config = AtomizeConfig {
            notes_folder: Some("/atoms/new/".to_string()),
            ..Default::default()
        };
        let (atomizer, store) = atomizer_with(&[("Project.md", NOTE)], config);

        let plan = atomizer.plan("Project.md", 4, 2).await.unwrap();
        atomizer.commit(&plan, &plan.root_only()).await.unwrap();

        assert!(store.exists_folder("atoms/new").await.unwrap());
        assert!(store.exists("atoms/new/Goals.md").await.unwrap());
    }

    #[tokio::test]
    async fn test_notes_default_to_source_folder() {
        let (atomizer, store) =
            atomizer_with(&[("projects/Project.md", NOTE)], AtomizeConfig::default());

        let plan = atomizer.plan("projects/Project.md", 12, 2).await.unwrap();
        atomizer.commit(&plan, &plan.select_all()).await.unwrap();

        assert_eq!(store.document("projects/Risks.md").unwrap(), "## Risks\n\nSome.");
    }

    #[tokio::test]
    async fn test_place_on_canvas_preserves_canvas() {
        let canvas = r#"{"nodes":[{"id":"src","type":"file","file":"Project.md","x":0,"y":0,"width":400,"height":300,"color":"4"}],"edges":[],"metadata":{"frontmatter":{}}}"#;
        let (atomizer, store) = atomizer_with(
            &[("Project.md", NOTE), ("Board.canvas", canvas)],
            AtomizeConfig::default(),
        );

        let plan = atomizer.plan("Project.md", 4, 2).await.unwrap();
        let outcome = atomizer.commit(&plan, &plan.select_all()).await.unwrap();
        let placement = atomizer
            .place_on_canvas("Board.canvas", Some("src"), &outcome)
            .await
            .unwrap();

        let written = CanvasDocument::parse(&store.document("Board.canvas").unwrap()).unwrap();
        assert_eq!(written.nodes.len(), 3);
        assert_eq!(written.edges.len(), 2);
        assert_eq!(written.node("src").unwrap().extra["color"], "4");
        assert!(written.extra.contains_key("metadata"));

        let root = written.file_node("Goals.md").unwrap();
        assert_eq!(root.x.as_i64(), Some(450));
        assert_eq!(placement.edges[0].from_node, "src");
        assert_eq!(placement.edges[0].to_node, root.id);
    }

    #[tokio::test]
    async fn test_place_on_canvas_unknown_anchor_uses_origin() {
        let (atomizer, store) = atomizer_with(
            &[("Project.md", NOTE), ("Board.canvas", "")],
            AtomizeConfig::default(),
        );

        let plan = atomizer.plan("Project.md", 4, 2).await.unwrap();
        let outcome = atomizer.commit(&plan, &plan.root_only()).await.unwrap();
        let placement = atomizer
            .place_on_canvas("Board.canvas", Some("missing"), &outcome)
            .await
            .unwrap();

        assert!(placement.edges.is_empty());
        let written = CanvasDocument::parse(&store.document("Board.canvas").unwrap()).unwrap();
        assert_eq!(written.nodes[0].x.as_i64(), Some(0));
    }
}
