//! Ingestion orchestrator: runs one drop gesture through resolve, route, and normalize, then
//! hands the loadable batch to the downstream consumer.

use tokio::sync::mpsc;

use crate::api::{MetadataStore, SessionProvider, UploadService};
use crate::models::entry::{
    DeliveredFile, DropOutcome, FailedEntry, NamedItem, ProcessedEntry, RawEntry, RemoteHandled,
};
use crate::services::normalizer::remove_common_prefix;
use crate::services::resolver::resolve_entries;
use crate::services::router::EntryRouter;

/// Modifier keys held when the drop happened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Held Shift keeps the current scene; no other modifier affects a drop.
    pub shift: bool,
}

/// One drop gesture.
#[derive(Debug, Clone)]
pub struct DropEvent {
    pub entries: Vec<RawEntry>,
    pub modifiers: Modifiers,
}

impl DropEvent {
    pub fn new(entries: Vec<RawEntry>, modifiers: Modifiers) -> Self {
        Self { entries, modifiers }
    }

    /// Existing content is cleared unless Shift is held.
    pub fn reset_scene(&self) -> bool {
        !self.modifiers.shift
    }
}

/// Receiver of loadable batches (the scene loader).
pub trait DropConsumer: Send + Sync {
    fn deliver(&self, batch: Vec<DeliveredFile>, reset_scene: bool);
}

/// A delivered batch as sent through [`ChannelConsumer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub files: Vec<DeliveredFile>,
    pub reset_scene: bool,
}

/// Forwards batches to a loader running elsewhere.
pub struct ChannelConsumer {
    tx: mpsc::UnboundedSender<Delivery>,
}

impl ChannelConsumer {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Delivery>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl DropConsumer for ChannelConsumer {
    fn deliver(&self, batch: Vec<DeliveredFile>, reset_scene: bool) {
        let delivery = Delivery {
            files: batch,
            reset_scene,
        };
        if self.tx.send(delivery).is_err() {
            log::warn!("Drop consumer channel closed; batch discarded");
        }
    }
}

pub struct IngestionOrchestrator<U, M, S, C> {
    router: EntryRouter<U, M>,
    session: S,
    consumer: C,
}

impl<U, M, S, C> IngestionOrchestrator<U, M, S, C>
where
    U: UploadService,
    M: MetadataStore,
    S: SessionProvider,
    C: DropConsumer,
{
    pub fn new(router: EntryRouter<U, M>, session: S, consumer: C) -> Self {
        Self {
            router,
            session,
            consumer,
        }
    }

    pub fn router(&self) -> &EntryRouter<U, M> {
        &self.router
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn consumer(&self) -> &C {
        &self.consumer
    }

    /// Process one drop gesture.
    ///
    /// A resolution failure aborts the drop and is returned as an error; nothing is delivered.
    /// Routing failures are logged and reported in the outcome.
    pub async fn handle_drop(&self, event: DropEvent) -> crate::error::Result<DropOutcome> {
        let reset_scene = event.reset_scene();
        // Read once; a session change mid-drop does not affect this batch.
        let identity = self.session.current_identity();

        let resolved = match resolve_entries(event.entries).await {
            Ok(resolved) => resolved,
            Err(e) => {
                log::error!("Error processing dropped files: {}", e);
                return Err(e);
            }
        };

        let processed = self.router.route_all(&resolved, identity.as_ref()).await;

        let mut outcome = DropOutcome {
            reset_scene,
            ..DropOutcome::default()
        };
        let mut local = Vec::new();
        for entry in processed {
            match entry {
                ProcessedEntry::Remote { name, reference } => {
                    log::info!("{} was uploaded to {}", name, reference.storage_path);
                    outcome.remote.push(RemoteHandled { name, reference });
                }
                ProcessedEntry::Local { name, handle } => {
                    local.push(NamedItem {
                        name: Some(name),
                        handle,
                    });
                }
                ProcessedEntry::Failed {
                    name,
                    reason,
                    message,
                } => {
                    log::error!("Skipping file {} due to error: {}", name, reason);
                    outcome.failed.push(FailedEntry {
                        name,
                        reason,
                        message,
                    });
                }
            }
        }

        remove_common_prefix(&mut local);
        outcome.delivered = local
            .into_iter()
            .map(|item| DeliveredFile {
                name: item.name.unwrap_or_default(),
                handle: item.handle,
            })
            .collect();

        if !outcome.delivered.is_empty() {
            log::info!(
                "Passing {} file(s) to drop consumer",
                outcome.delivered.len()
            );
            self.consumer.deliver(outcome.delivered.clone(), reset_scene);
        } else if reset_scene && self.router.settings().signal_empty_reset {
            log::info!("No files to deliver; signalling scene reset only");
            self.consumer.deliver(Vec::new(), true);
        } else {
            log::info!("No files to pass to drop consumer");
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::session::SharedSession;
    use crate::error::AppError;
    use crate::models::entry::FailureReason;
    use crate::models::session::Identity;
    use crate::models::settings::IngestSettings;
    use crate::services::fakes::{FakeMetadataStore, FakeUploadService};
    use crate::services::handles::LocalHandleRegistry;
    use crate::source::memory::{directory, file, unreadable_file, MemoryDirectory};

    type TestOrchestrator =
        IngestionOrchestrator<FakeUploadService, FakeMetadataStore, SharedSession, ChannelConsumer>;

    fn orchestrator(
        identity: Option<Identity>,
        settings: IngestSettings,
    ) -> (TestOrchestrator, mpsc::UnboundedReceiver<Delivery>) {
        let router = EntryRouter::new(
            FakeUploadService::new(),
            FakeMetadataStore::new(),
            Arc::new(LocalHandleRegistry::new()),
            settings,
        );
        let (consumer, rx) = ChannelConsumer::new();
        (
            IngestionOrchestrator::new(router, SharedSession::new(identity), consumer),
            rx,
        )
    }

    fn delivered_names(delivery: &Delivery) -> Vec<&str> {
        delivery.files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn reset_scene_unless_shift_held() {
        let plain = DropEvent::new(vec![], Modifiers::default());
        assert!(plain.reset_scene());
        let shift = DropEvent::new(vec![], Modifiers { shift: true });
        assert!(!shift.reset_scene());
    }

    #[tokio::test]
    async fn dropped_folder_is_delivered_with_prefix_stripped() {
        let (orch, mut rx) = orchestrator(None, IngestSettings::default());
        let event = DropEvent::new(
            vec![directory(
                "/scan",
                vec![
                    file("/scan/room.ply", "a"),
                    directory("/scan/parts", vec![file("/scan/parts/chair.ply", "b")]),
                ],
            )],
            Modifiers::default(),
        );

        let outcome = orch.handle_drop(event).await.unwrap();
        let delivery = rx.try_recv().unwrap();
        assert_eq!(delivered_names(&delivery), vec!["room.ply", "parts/chair.ply"]);
        assert!(delivery.reset_scene);
        assert_eq!(outcome.delivered, delivery.files);
        assert!(outcome.remote.is_empty());
        assert!(outcome.failed.is_empty());
        // Exactly one delivery per drop.
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn shift_drop_forwards_no_reset() {
        let (orch, mut rx) = orchestrator(None, IngestSettings::default());
        let event = DropEvent::new(
            vec![file("/a.obj", "a")],
            Modifiers { shift: true },
        );
        let outcome = orch.handle_drop(event).await.unwrap();
        assert!(!outcome.reset_scene);
        let delivery = rx.try_recv().unwrap();
        assert!(!delivery.reset_scene);
        assert_eq!(delivered_names(&delivery), vec!["a.obj"]);
    }

    #[tokio::test]
    async fn single_nested_file_keeps_full_name() {
        let (orch, mut rx) = orchestrator(None, IngestSettings::default());
        let event = DropEvent::new(
            vec![directory("/d", vec![file("/d/only.ply", "x")])],
            Modifiers::default(),
        );
        orch.handle_drop(event).await.unwrap();
        let delivery = rx.try_recv().unwrap();
        assert_eq!(delivered_names(&delivery), vec!["d/only.ply"]);
    }

    #[tokio::test]
    async fn remote_entries_are_reported_not_delivered() {
        let (orch, mut rx) = orchestrator(Some(Identity::new("u1")), IngestSettings::default());
        let event = DropEvent::new(
            vec![
                file("/room.ply", "ply"),
                file("/notes/a.txt", "a"),
                file("/notes/b.txt", "b"),
            ],
            Modifiers::default(),
        );

        let outcome = orch.handle_drop(event).await.unwrap();
        assert_eq!(outcome.remote.len(), 1);
        assert_eq!(outcome.remote[0].name, "room.ply");
        assert_eq!(
            outcome.remote[0].reference.storage_path,
            "users/u1/uploads/room.ply"
        );

        let delivery = rx.try_recv().unwrap();
        assert_eq!(delivered_names(&delivery), vec!["a.txt", "b.txt"]);
        assert_eq!(orch.router().metadata().records().len(), 1);
    }

    #[tokio::test]
    async fn all_remote_drop_does_not_invoke_consumer() {
        let (orch, mut rx) = orchestrator(Some(Identity::new("u1")), IngestSettings::default());
        let event = DropEvent::new(vec![file("/a.ply", "a")], Modifiers::default());

        let outcome = orch.handle_drop(event).await.unwrap();
        assert_eq!(outcome.remote.len(), 1);
        assert!(outcome.delivered.is_empty());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn empty_batch_signals_reset_when_configured() {
        let settings = IngestSettings {
            signal_empty_reset: true,
            ..IngestSettings::default()
        };
        let (orch, mut rx) = orchestrator(Some(Identity::new("u1")), settings);
        let event = DropEvent::new(vec![file("/a.ply", "a")], Modifiers::default());

        orch.handle_drop(event).await.unwrap();
        let delivery = rx.try_recv().unwrap();
        assert!(delivery.files.is_empty());
        assert!(delivery.reset_scene);
    }

    #[tokio::test]
    async fn empty_batch_with_shift_never_signals() {
        let settings = IngestSettings {
            signal_empty_reset: true,
            ..IngestSettings::default()
        };
        let (orch, mut rx) = orchestrator(Some(Identity::new("u1")), settings);
        let event = DropEvent::new(
            vec![file("/a.ply", "a")],
            Modifiers { shift: true },
        );

        orch.handle_drop(event).await.unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn failed_entries_are_dropped_from_delivery() {
        let (orch, mut rx) = orchestrator(None, IngestSettings::default());
        let event = DropEvent::new(
            vec![directory(
                "/d",
                vec![
                    file("/d/a.obj", "a"),
                    unreadable_file("/d/b.obj", "denied"),
                    file("/d/c.obj", "c"),
                ],
            )],
            Modifiers::default(),
        );

        let outcome = orch.handle_drop(event).await.unwrap();
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].name, "d/b.obj");
        assert_eq!(outcome.failed[0].reason, FailureReason::FileAccess);

        let delivery = rx.try_recv().unwrap();
        assert_eq!(delivered_names(&delivery), vec!["a.obj", "c.obj"]);
    }

    #[tokio::test]
    async fn resolution_failure_aborts_drop() {
        let (orch, mut rx) = orchestrator(None, IngestSettings::default());
        let broken = MemoryDirectory::new("/d", vec![file("/d/a.obj", "a")])
            .failing_on_call(0)
            .into_entry();
        let event = DropEvent::new(vec![file("/ok.obj", "ok"), broken], Modifiers::default());

        let err = orch.handle_drop(event).await.unwrap_err();
        assert!(matches!(err, AppError::DirectoryRead(_)), "got: {:?}", err);
        assert!(rx.try_recv().is_err());
        // Nothing was routed, so no local handles were allocated.
        assert!(orch.router().handles().is_empty().await);
    }

    #[tokio::test]
    async fn session_is_read_at_drop_time() {
        let (orch, mut rx) = orchestrator(None, IngestSettings::default());
        let event = || DropEvent::new(vec![file("/a.ply", "a")], Modifiers::default());

        orch.handle_drop(event()).await.unwrap();
        assert_eq!(rx.try_recv().unwrap().files.len(), 1);

        orch.session().sign_in(Identity::new("u7"));
        let outcome = orch.handle_drop(event()).await.unwrap();
        assert_eq!(outcome.remote.len(), 1);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn delivered_handles_resolve_to_dropped_bytes() {
        let (orch, mut rx) = orchestrator(None, IngestSettings::default());
        let event = DropEvent::new(vec![file("/a.obj", "payload")], Modifiers::default());

        orch.handle_drop(event).await.unwrap();
        let delivery = rx.try_recv().unwrap();
        let object = orch
            .router()
            .handles()
            .resolve(&delivery.files[0].handle)
            .await
            .unwrap();
        assert_eq!(object.bytes.as_slice(), b"payload");
    }

    #[test]
    fn channel_consumer_survives_closed_receiver() {
        let (consumer, rx) = ChannelConsumer::new();
        drop(rx);
        consumer.deliver(Vec::new(), true);
    }
}
