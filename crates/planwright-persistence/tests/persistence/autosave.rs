use async_trait::async_trait;
use planwright_core::{EditorConfig, PersistenceError, Point};
use planwright_designer::{CanvasData, CatalogRegistry, NodeKind};
use planwright_persistence::{
    CreateDesign, Design, DesignEditor, DesignGateway, DesignRevision, DesignTemplate,
    LoadedDesign, MemoryDesignStore, RevisionMeta, SaveStatus,
};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Memory store whose appends can be switched to fail, and whose autosave
/// appends can be slowed down.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryDesignStore,
    fail_appends: AtomicBool,
    autosave_latency_ms: AtomicU64,
}

#[async_trait]
impl DesignGateway for FlakyStore {
    async fn create(&self, request: CreateDesign) -> Result<LoadedDesign, PersistenceError> {
        self.inner.create(request).await
    }

    async fn read(&self, design_id: &str) -> Result<LoadedDesign, PersistenceError> {
        self.inner.read(design_id).await
    }

    async fn append_revision(
        &self,
        design_id: &str,
        canvas_data: CanvasData,
        autosave: bool,
    ) -> Result<DesignRevision, PersistenceError> {
        if self.fail_appends.load(Ordering::SeqCst) {
            return Err(PersistenceError::storage("backend unavailable"));
        }
        let latency = self.autosave_latency_ms.load(Ordering::SeqCst);
        if autosave && latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }
        self.inner.append_revision(design_id, canvas_data, autosave).await
    }

    async fn list_revisions(&self, design_id: &str) -> Result<Vec<RevisionMeta>, PersistenceError> {
        self.inner.list_revisions(design_id).await
    }

    async fn get_revision(
        &self,
        design_id: &str,
        revision_id: &str,
    ) -> Result<DesignRevision, PersistenceError> {
        self.inner.get_revision(design_id, revision_id).await
    }

    async fn list_designs(&self) -> Result<Vec<Design>, PersistenceError> {
        self.inner.list_designs().await
    }

    async fn archive_design(&self, design_id: &str) -> Result<Design, PersistenceError> {
        self.inner.archive_design(design_id).await
    }

    async fn register_template(&self, template: DesignTemplate) -> Result<(), PersistenceError> {
        self.inner.register_template(template).await
    }

    async fn list_templates(&self) -> Result<Vec<DesignTemplate>, PersistenceError> {
        self.inner.list_templates().await
    }
}

fn catalog() -> Arc<CatalogRegistry> {
    Arc::new(CatalogRegistry::standard())
}

async fn open_editor(store: Arc<MemoryDesignStore>) -> DesignEditor {
    DesignEditor::create(store, &EditorConfig::default(), catalog(), CreateDesign::default())
        .await
        .unwrap()
}

async fn sleep_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn test_two_quick_mutations_produce_one_autosave() {
    let store = Arc::new(MemoryDesignStore::new());
    let mut editor = open_editor(store.clone()).await;
    let id = editor.design().id.clone();

    editor.edit(|s| s.add_node(NodeKind::Room));
    sleep_ms(500).await;
    editor.edit(|s| s.add_node(NodeKind::Door));

    sleep_ms(2999).await;
    assert_eq!(store.revision_count(&id), 1);
    assert!(editor.is_dirty());

    sleep_ms(2).await;
    let revisions = store.list_revisions(&id).await.unwrap();
    assert_eq!(revisions.len(), 2);
    assert_eq!(revisions[1].index, 2);
    assert!(revisions[1].autosave);
    assert!(!editor.is_dirty());

    let saved = store.get_revision(&id, &revisions[1].id).await.unwrap();
    assert_eq!(saved.canvas_data, editor.session().snapshot());

    sleep_ms(10_000).await;
    assert_eq!(store.revision_count(&id), 2);
}

#[tokio::test(start_paused = true)]
async fn test_autosave_publishes_status() {
    let store = Arc::new(MemoryDesignStore::new());
    let mut editor = open_editor(store).await;
    let status = editor.save_status();
    assert_eq!(*status.borrow(), SaveStatus::Idle);

    editor.edit(|s| s.place_catalog_cabinet("base-36").unwrap());
    sleep_ms(3100).await;
    assert_eq!(
        *status.borrow(),
        SaveStatus::Saved {
            index: 2,
            autosave: true
        }
    );
}

#[tokio::test(start_paused = true)]
async fn test_view_changes_do_not_schedule_autosave() {
    let store = Arc::new(MemoryDesignStore::new());
    let mut editor = open_editor(store.clone()).await;
    let id = editor.design().id.clone();

    editor.edit(|s| {
        s.viewport_mut().zoom_in();
        s.viewport_mut().pan_by(40.0, 10.0);
    });
    assert!(!editor.is_dirty());

    sleep_ms(5000).await;
    assert_eq!(store.revision_count(&id), 1);
}

#[tokio::test(start_paused = true)]
async fn test_gesture_updates_are_autosaved_once() {
    let store = Arc::new(MemoryDesignStore::new());
    let mut editor = open_editor(store.clone()).await;
    let id = editor.design().id.clone();

    let cabinet = editor.edit(|s| {
        s.place_catalog_cabinet_at("base-30", Point::new(0.0, 0.0))
            .unwrap()
    });
    editor.edit(|s| s.begin_drag(&cabinet, planwright_designer::ScreenPoint::new(0.0, 0.0)).unwrap());
    for step in 1..=5 {
        let x = f64::from(step) * 20.0;
        editor.edit(|s| s.update_gesture(planwright_designer::ScreenPoint::new(x, 0.0)));
        sleep_ms(100).await;
    }
    editor.edit(|s| s.end_gesture());

    sleep_ms(3100).await;
    assert_eq!(store.revision_count(&id), 2);
    assert!(!editor.is_dirty());
}

#[tokio::test(start_paused = true)]
async fn test_long_drag_defers_autosave_until_release() {
    let store = Arc::new(MemoryDesignStore::new());
    let mut editor = open_editor(store.clone()).await;
    let id = editor.design().id.clone();

    let cabinet = editor.edit(|s| {
        s.place_catalog_cabinet_at("base-30", Point::new(0.0, 0.0))
            .unwrap()
    });
    sleep_ms(3100).await;
    assert_eq!(store.revision_count(&id), 2);

    editor.edit(|s| s.begin_drag(&cabinet, planwright_designer::ScreenPoint::new(0.0, 0.0)).unwrap());
    for step in 1..=10 {
        let x = f64::from(step) * 10.0;
        editor.edit(|s| s.update_gesture(planwright_designer::ScreenPoint::new(x, 0.0)));
        sleep_ms(50).await;
    }

    // Holding the pointer still does not trigger a save of a half-finished drag
    sleep_ms(5000).await;
    assert_eq!(store.revision_count(&id), 2);
    assert!(editor.is_dirty());

    editor.edit(|s| s.end_gesture());
    sleep_ms(2999).await;
    assert_eq!(store.revision_count(&id), 2);
    sleep_ms(2).await;
    assert_eq!(store.revision_count(&id), 3);
    assert!(!editor.is_dirty());

    let latest = store.read(&id).await.unwrap();
    assert_eq!(latest.revision.canvas_data, editor.session().snapshot());
}

#[tokio::test(start_paused = true)]
async fn test_manual_save_waits_for_in_flight_autosave() {
    let store = Arc::new(FlakyStore::default());
    store.autosave_latency_ms.store(1000, Ordering::SeqCst);
    let mut editor = DesignEditor::create(
        store.clone(),
        &EditorConfig::default(),
        catalog(),
        CreateDesign::default(),
    )
    .await
    .unwrap();
    let id = editor.design().id.clone();

    editor.edit(|s| s.add_node(NodeKind::Room));
    // Timer has fired; the autosave is still inside the gateway
    sleep_ms(3100).await;
    editor.edit(|s| s.add_node(NodeKind::Door));

    let manual = editor.save().await.unwrap();
    sleep_ms(2000).await;

    let revisions = store.list_revisions(&id).await.unwrap();
    assert_eq!(revisions.len(), 3);
    assert!(revisions[1].autosave);
    assert!(!revisions[2].autosave);
    assert_eq!(manual.index, 3);

    let latest = store.read(&id).await.unwrap();
    assert_eq!(latest.revision.id, manual.id);
    assert!(!latest.revision.autosave);
    assert_eq!(latest.revision.canvas_data, editor.session().snapshot());
    assert_eq!(latest.revision.canvas_data.nodes.len(), 2);
    assert!(!editor.is_dirty());
}

#[tokio::test(start_paused = true)]
async fn test_failed_autosave_leaves_design_dirty() {
    let store = Arc::new(FlakyStore::default());
    let mut editor = DesignEditor::create(
        store.clone(),
        &EditorConfig::default(),
        catalog(),
        CreateDesign::default(),
    )
    .await
    .unwrap();
    store.fail_appends.store(true, Ordering::SeqCst);

    editor.edit(|s| s.add_node(NodeKind::Window));
    sleep_ms(3100).await;

    assert!(editor.is_dirty());
    assert!(matches!(
        &*editor.save_status().borrow(),
        SaveStatus::Failed { message } if message.contains("backend unavailable")
    ));
    assert_eq!(store.inner.revision_count(&editor.design().id), 1);

    // The next edit schedules another attempt, which succeeds.
    store.fail_appends.store(false, Ordering::SeqCst);
    editor.edit(|s| s.add_node(NodeKind::Room));
    sleep_ms(3100).await;
    assert!(!editor.is_dirty());
    assert_eq!(store.inner.revision_count(&editor.design().id), 2);
}

#[tokio::test(start_paused = true)]
async fn test_custom_delay_from_config() {
    let store = Arc::new(MemoryDesignStore::new());
    let mut config = EditorConfig::default();
    config.autosave.delay_ms = 1000;
    let mut editor = DesignEditor::create(store.clone(), &config, catalog(), CreateDesign::default())
        .await
        .unwrap();
    let id = editor.design().id.clone();

    editor.edit(|s| s.add_node(NodeKind::Room));
    sleep_ms(999).await;
    assert_eq!(store.revision_count(&id), 1);
    sleep_ms(2).await;
    assert_eq!(store.revision_count(&id), 2);
}
