use planwright_core::{EditorConfig, Point};
use planwright_designer::{CatalogRegistry, NodeKind};
use planwright_persistence::{
    CreateDesign, DesignEditor, DesignGateway, ExitDecision, MemoryDesignStore, SaveStatus,
};
use std::sync::Arc;
use std::time::Duration;

async fn open_editor(store: Arc<MemoryDesignStore>) -> DesignEditor {
    DesignEditor::create(
        store,
        &EditorConfig::default(),
        Arc::new(CatalogRegistry::standard()),
        CreateDesign::titled("Kitchen"),
    )
    .await
    .unwrap()
}

async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn test_manual_save_cancels_pending_autosave() {
    let store = Arc::new(MemoryDesignStore::new());
    let mut editor = open_editor(store.clone()).await;
    let id = editor.design().id.clone();

    editor.edit(|s| s.add_node(NodeKind::Room));
    sleep_ms(1000).await;

    let revision = editor.save().await.unwrap();
    assert_eq!(revision.index, 2);
    assert!(!revision.autosave);
    assert!(!editor.is_dirty());
    assert_eq!(editor.design().current_revision_id.as_deref(), Some(revision.id.as_str()));
    assert_eq!(
        *editor.save_status().borrow(),
        SaveStatus::Saved {
            index: 2,
            autosave: false
        }
    );

    sleep_ms(10_000).await;
    assert_eq!(store.revision_count(&id), 2);
}

#[tokio::test(start_paused = true)]
async fn test_exit_guard() {
    let store = Arc::new(MemoryDesignStore::new());
    let mut editor = open_editor(store).await;
    assert_eq!(editor.request_exit(), ExitDecision::Proceed);

    editor.edit(|s| {
        s.place_catalog_cabinet_at("wall-30x30", Point::new(0.0, 0.0))
            .unwrap()
    });
    assert_eq!(editor.request_exit(), ExitDecision::ConfirmDiscard);

    editor.save().await.unwrap();
    assert_eq!(editor.request_exit(), ExitDecision::Proceed);

    editor.edit(|s| s.undo());
    assert_eq!(editor.request_exit(), ExitDecision::ConfirmDiscard);
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels_pending_autosave() {
    let store = Arc::new(MemoryDesignStore::new());
    let mut editor = open_editor(store.clone()).await;
    let id = editor.design().id.clone();

    editor.edit(|s| s.add_node(NodeKind::Door));
    drop(editor);

    sleep_ms(10_000).await;
    assert_eq!(store.revision_count(&id), 1);
}

#[tokio::test(start_paused = true)]
async fn test_close_discards_and_stops_autosave() {
    let store = Arc::new(MemoryDesignStore::new());
    let mut editor = open_editor(store.clone()).await;
    let id = editor.design().id.clone();
    assert!(editor.is_autosave_running());

    editor.edit(|s| s.add_node(NodeKind::Window));
    assert_eq!(editor.request_exit(), ExitDecision::ConfirmDiscard);
    editor.close();

    sleep_ms(10_000).await;
    assert_eq!(store.revision_count(&id), 1);
}

#[tokio::test(start_paused = true)]
async fn test_save_and_close_persists_changes() {
    let store = Arc::new(MemoryDesignStore::new());
    let mut editor = open_editor(store.clone()).await;
    let id = editor.design().id.clone();

    let node = editor.edit(|s| s.add_node(NodeKind::Room));
    editor.save_and_close().await.unwrap();

    let loaded = store.read(&id).await.unwrap();
    assert_eq!(loaded.revision.index, 2);
    assert!(loaded.revision.canvas_data.node(&node).is_some());
}

#[tokio::test(start_paused = true)]
async fn test_reopen_loads_current_revision() {
    let store = Arc::new(MemoryDesignStore::new());
    let mut editor = open_editor(store.clone()).await;
    let id = editor.design().id.clone();
    let cabinet = editor.edit(|s| s.place_catalog_cabinet("base-30").unwrap());
    editor.save().await.unwrap();
    editor.close();

    let reopened = DesignEditor::open(
        store,
        &EditorConfig::default(),
        Arc::new(CatalogRegistry::standard()),
        &id,
    )
    .await
    .unwrap();
    assert!(reopened.session().state().cabinet(&cabinet).is_some());
    assert!(!reopened.is_dirty());
    assert!(!reopened.session().can_undo());
    assert_eq!(reopened.design().title, "Kitchen");
}

#[tokio::test(start_paused = true)]
async fn test_failed_edit_does_not_dirty() {
    let store = Arc::new(MemoryDesignStore::new());
    let mut editor = open_editor(store).await;
    let result = editor.edit(|s| s.place_catalog_cabinet("no-such-spec"));
    assert!(result.is_err());
    assert!(!editor.is_dirty());
}
