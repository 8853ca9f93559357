//! Debounced autosave.
//!
//! A background task receives snapshots of the canvas as it changes. Each
//! snapshot restarts the quiet-period timer; when the timer fires the latest
//! snapshot is appended as an autosave revision and the dirty tracker is
//! marked saved up to that snapshot's generation.
//!
//! Appends for one design are serialised through a save lock shared with
//! the editor, so a manual save always lands after any in-flight autosave.

use crate::dirty::DirtyTracker;
use crate::gateway::DesignGateway;
use parking_lot::RwLock;
use planwright_designer::CanvasData;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{mpsc, watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{Duration, Instant};

/// Latest persistence outcome, published on a watch channel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SaveStatus {
    #[default]
    Idle,
    Saving,
    Saved { index: u64, autosave: bool },
    Failed { message: String },
}

impl fmt::Display for SaveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Saving => write!(f, "Saving..."),
            Self::Saved {
                index,
                autosave: true,
            } => write!(f, "Autosaved (revision {})", index),
            Self::Saved { index, .. } => write!(f, "Saved (revision {})", index),
            Self::Failed { message } => write!(f, "Save failed: {}", message),
        }
    }
}

#[derive(Debug)]
enum AutosaveCommand {
    Touch {
        snapshot: Box<CanvasData>,
        generation: u64,
    },
    Cancel,
}

/// Background autosave task for one design.
///
/// Dropping the scheduler cancels any pending autosave and stops the task.
pub struct AutosaveScheduler {
    design_id: String,
    command_tx: mpsc::UnboundedSender<AutosaveCommand>,
    shutdown_signal: Arc<RwLock<Option<mpsc::Sender<()>>>>,
    task: Arc<RwLock<Option<JoinHandle<()>>>>,
    status: Arc<watch::Sender<SaveStatus>>,
    save_lock: Arc<Mutex<()>>,
}

impl AutosaveScheduler {
    /// Spawns the autosave task. Must be called inside a tokio runtime.
    pub fn spawn(
        gateway: Arc<dyn DesignGateway>,
        design_id: impl Into<String>,
        tracker: Arc<DirtyTracker>,
        delay: Duration,
    ) -> Self {
        let design_id = design_id.into();
        let (command_tx, mut command_rx) = mpsc::unbounded_channel::<AutosaveCommand>();
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
        let (status_tx, _) = watch::channel(SaveStatus::Idle);
        let status = Arc::new(status_tx);
        let save_lock = Arc::new(Mutex::new(()));

        let task_status = status.clone();
        let task_lock = save_lock.clone();
        let task_design_id = design_id.clone();
        let handle = tokio::spawn(async move {
            let mut pending: Option<(Box<CanvasData>, u64)> = None;
            let timer = tokio::time::sleep(delay);
            tokio::pin!(timer);

            loop {
                tokio::select! {
                    biased;

                    _ = shutdown_rx.recv() => break,

                    command = command_rx.recv() => match command {
                        Some(AutosaveCommand::Touch { snapshot, generation }) => {
                            pending = Some((snapshot, generation));
                            timer.as_mut().reset(Instant::now() + delay);
                        }
                        Some(AutosaveCommand::Cancel) => {
                            if pending.take().is_some() {
                                tracing::debug!("Pending autosave of {} cancelled", task_design_id);
                            }
                        }
                        None => break,
                    },

                    _ = &mut timer, if pending.is_some() => {
                        if let Some((snapshot, generation)) = pending.take() {
                            run_autosave(
                                gateway.as_ref(),
                                &task_design_id,
                                *snapshot,
                                generation,
                                &tracker,
                                &task_status,
                                &task_lock,
                            )
                            .await;
                        }
                    }
                }
            }
            tracing::debug!("Autosave task for {} stopped", task_design_id);
        });

        Self {
            design_id,
            command_tx,
            shutdown_signal: Arc::new(RwLock::new(Some(shutdown_tx))),
            task: Arc::new(RwLock::new(Some(handle))),
            status,
            save_lock,
        }
    }

    /// Queues a snapshot and restarts the quiet period.
    pub fn touch(&self, snapshot: CanvasData, generation: u64) {
        let command = AutosaveCommand::Touch {
            snapshot: Box::new(snapshot),
            generation,
        };
        if self.command_tx.send(command).is_err() {
            tracing::warn!("Autosave task for {} is not running", self.design_id);
        }
    }

    /// Drops the pending snapshot, if any, without saving it.
    pub fn cancel(&self) {
        let _ = self.command_tx.send(AutosaveCommand::Cancel);
    }

    pub fn status(&self) -> watch::Receiver<SaveStatus> {
        self.status.subscribe()
    }

    pub(crate) fn publish(&self, status: SaveStatus) {
        self.status.send_replace(status);
    }

    /// Lock held for the duration of every append to this design.
    pub(crate) fn save_lock(&self) -> Arc<Mutex<()>> {
        self.save_lock.clone()
    }

    pub fn is_running(&self) -> bool {
        self.task
            .read()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stops the task. Idempotent.
    pub fn shutdown(&self) {
        if let Some(tx) = self.shutdown_signal.write().take() {
            let _ = tx.try_send(());
        }
        if let Some(handle) = self.task.write().take() {
            handle.abort();
        }
    }
}

impl Drop for AutosaveScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl fmt::Debug for AutosaveScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutosaveScheduler")
            .field("design_id", &self.design_id)
            .field("status", &*self.status.borrow())
            .finish()
    }
}

async fn run_autosave(
    gateway: &dyn DesignGateway,
    design_id: &str,
    snapshot: CanvasData,
    generation: u64,
    tracker: &DirtyTracker,
    status: &watch::Sender<SaveStatus>,
    save_lock: &Mutex<()>,
) {
    let _guard = save_lock.lock().await;
    // A manual save may have covered this generation while we waited
    if tracker.saved() >= generation {
        tracing::debug!("Autosave of {} skipped, generation {} already saved", design_id, generation);
        return;
    }
    status.send_replace(SaveStatus::Saving);
    match gateway.append_revision(design_id, snapshot, true).await {
        Ok(revision) => {
            tracker.mark_saved(generation);
            tracing::debug!("Autosaved {} as revision {}", design_id, revision.index);
            status.send_replace(SaveStatus::Saved {
                index: revision.index,
                autosave: true,
            });
        }
        Err(e) => {
            tracing::warn!("Autosave of {} failed: {}", design_id, e);
            status.send_replace(SaveStatus::Failed {
                message: e.to_string(),
            });
        }
    }
}
