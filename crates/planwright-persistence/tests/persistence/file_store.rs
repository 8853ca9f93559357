use planwright_core::PersistenceError;
use planwright_designer::{Cabinet, CabinetMount, CanvasData, LegacyNode, NodeKind};
use planwright_persistence::{CreateDesign, DesignGateway, DesignTemplate, FileDesignStore};
use tempfile::TempDir;

fn mixed_canvas() -> CanvasData {
    let mut canvas = CanvasData::default();
    canvas.add_node(LegacyNode::new(NodeKind::Door, "door_1", 40.0, 60.0));
    canvas
        .state
        .add(Cabinet::new(CabinetMount::Wall, 762.0, 304.8, 762.0, 100.0, 0.0).with_label("Upper"))
        .unwrap();
    canvas
}

#[tokio::test]
async fn test_create_writes_first_revision_file() {
    let dir = TempDir::new().unwrap();
    let store = FileDesignStore::open(dir.path()).await.unwrap();
    let created = store
        .create(CreateDesign::titled("Laundry").with_base_data(mixed_canvas()))
        .await
        .unwrap();

    let path = store.revision_path(&created.design.id, 1);
    assert!(path.exists());
    assert!(path.ends_with("revisions/00000001.json"));

    let loaded = store.read(&created.design.id).await.unwrap();
    assert_eq!(loaded.design, created.design);
    assert_eq!(loaded.revision, created.revision);
    assert!(loaded.revision.canvas_data.node("door_1").is_some());
    assert_eq!(loaded.revision.canvas_data.state.cabinets.len(), 1);
}

#[tokio::test]
async fn test_reopened_store_sees_saved_revisions() {
    let dir = TempDir::new().unwrap();
    let design_id;
    let saved;
    {
        let store = FileDesignStore::open(dir.path()).await.unwrap();
        let created = store.create(CreateDesign::default()).await.unwrap();
        design_id = created.design.id;
        saved = store
            .append_revision(&design_id, mixed_canvas(), false)
            .await
            .unwrap();
    }

    let store = FileDesignStore::open(dir.path()).await.unwrap();
    let loaded = store.read(&design_id).await.unwrap();
    assert_eq!(loaded.revision, saved);
    assert_eq!(loaded.revision.index, 2);
    assert!(loaded.revision.canvas_data.node("door_1").is_some());
}

#[tokio::test]
async fn test_existing_revision_file_is_never_overwritten() {
    let dir = TempDir::new().unwrap();
    let store = FileDesignStore::open(dir.path()).await.unwrap();
    let created = store.create(CreateDesign::default()).await.unwrap();
    let id = created.design.id.clone();

    let first_bytes = std::fs::read(store.revision_path(&id, 1)).unwrap();
    let second = store.append_revision(&id, mixed_canvas(), false).await.unwrap();
    assert_eq!(second.index, 2);

    // Appending never touches earlier files.
    assert_eq!(std::fs::read(store.revision_path(&id, 1)).unwrap(), first_bytes);

    let restored = store.restore_revision(&id, &created.revision.id).await.unwrap();
    assert_eq!(restored.index, 3);
    assert_eq!(std::fs::read(store.revision_path(&id, 1)).unwrap(), first_bytes);
    assert_eq!(store.list_revisions(&id).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_designs_skips_archived_and_templates() {
    let dir = TempDir::new().unwrap();
    let store = FileDesignStore::open(dir.path()).await.unwrap();
    store
        .register_template(DesignTemplate::new("galley", "Galley", mixed_canvas()))
        .await
        .unwrap();
    let kept = store.create(CreateDesign::titled("Kept")).await.unwrap();
    let gone = store.create(CreateDesign::titled("Gone")).await.unwrap();
    store.archive_design(&gone.design.id).await.unwrap();

    let designs = store.list_designs().await.unwrap();
    assert_eq!(designs.len(), 1);
    assert_eq!(designs[0].id, kept.design.id);

    assert!(matches!(
        store.read(&gone.design.id).await,
        Err(PersistenceError::DesignNotFound { .. })
    ));
}

#[tokio::test]
async fn test_templates_persist_and_seed_designs() {
    let dir = TempDir::new().unwrap();
    {
        let store = FileDesignStore::open(dir.path()).await.unwrap();
        store
            .register_template(
                DesignTemplate::new("galley", "Galley", mixed_canvas()).with_category("kitchen"),
            )
            .await
            .unwrap();
    }

    let store = FileDesignStore::open(dir.path()).await.unwrap();
    let templates = store.list_templates().await.unwrap();
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].category.as_deref(), Some("kitchen"));

    let created = store
        .create(CreateDesign::default().from_template("galley"))
        .await
        .unwrap();
    assert_eq!(created.revision.canvas_data, templates[0].base_data);

    let err = store
        .create(CreateDesign::default().from_template("../galley"))
        .await
        .unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidTemplate { .. }));
}

#[tokio::test]
async fn test_retention_removes_old_autosave_files() {
    let dir = TempDir::new().unwrap();
    let store = FileDesignStore::open(dir.path())
        .await
        .unwrap()
        .with_retention(Some(1));
    let created = store.create(CreateDesign::default()).await.unwrap();
    let id = created.design.id.clone();
    for _ in 0..3 {
        store
            .append_revision(&id, CanvasData::default(), true)
            .await
            .unwrap();
    }

    assert!(store.revision_path(&id, 1).exists());
    assert!(!store.revision_path(&id, 2).exists());
    assert!(!store.revision_path(&id, 3).exists());
    assert!(store.revision_path(&id, 4).exists());

    let next = store.append_revision(&id, CanvasData::default(), false).await.unwrap();
    assert_eq!(next.index, 5);
}

#[tokio::test]
async fn test_path_like_ids_are_not_found() {
    let dir = TempDir::new().unwrap();
    let store = FileDesignStore::open(dir.path()).await.unwrap();
    assert!(matches!(
        store.read("../outside").await,
        Err(PersistenceError::DesignNotFound { .. })
    ));
    assert!(matches!(
        store.read("_templates").await,
        Err(PersistenceError::DesignNotFound { .. })
    ));
}

#[tokio::test]
async fn test_truncated_revision_file_does_not_block_the_design() {
    let dir = TempDir::new().unwrap();
    let store = FileDesignStore::open(dir.path()).await.unwrap();
    let created = store.create(CreateDesign::default()).await.unwrap();
    let id = created.design.id.clone();
    let second = store.append_revision(&id, mixed_canvas(), false).await.unwrap();

    // Left behind by a writer that died mid-file
    std::fs::write(store.revision_path(&id, 3), br#"{"id":"9c1e","design_id":"#).unwrap();

    let loaded = store.read(&id).await.unwrap();
    assert_eq!(loaded.revision, second);

    let next = store.append_revision(&id, CanvasData::default(), true).await.unwrap();
    assert_eq!(next.index, 4);
    assert_eq!(store.read(&id).await.unwrap().revision, next);

    let indices: Vec<u64> = store
        .list_revisions(&id)
        .await
        .unwrap()
        .iter()
        .map(|meta| meta.index)
        .collect();
    assert_eq!(indices, vec![1, 2, 4]);
    assert_eq!(store.get_revision(&id, &second.id).await.unwrap(), second);
}
