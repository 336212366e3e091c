//! # Core Actor Framework
//!
//! Generic building blocks for the single-writer stores behind the booking engine.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait every stored record implements.
//! - [`ResourceActor`]: The task that owns a collection of records and serializes access to it.
//! - [`ResourceClient`]: The cloneable handle used to talk to a running actor.
//! - [`FrameworkError`]: Transport failures plus the entity's own error type.

use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any record must implement to be managed by a [`ResourceActor`].
///
/// # Architecture Note
/// The actor loop is written once and reused for every record type. The associated
/// types pin each operation to its own payload: a `Lesson` store only accepts
/// `LessonCreate`, an `Order` ledger only accepts `OrderCreate`.
///
/// Hooks run inside the actor task, one request at a time. Anything a hook does
/// to `self` is therefore atomic with respect to every other request on the same store.
pub trait ActorEntity: Clone + Debug + Send + Sync + 'static {
    /// Store-assigned identifier. Built from the actor's auto-increment counter.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32> + 'static;

    /// The data required to create a new record.
    type Create: Send + Sync + Debug + 'static;

    /// Field-level overwrite applied by [`ActorEntity::on_update`].
    type Update: Send + Sync + Debug + 'static;

    /// Record-specific operations (e.g. `Reserve`).
    type Action: Send + Sync + Debug + 'static;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug + 'static;

    /// Filter used by `List` requests.
    type Query: Send + Sync + Debug + 'static;

    /// Per-record error type, carried back to callers inside [`FrameworkError::Entity`].
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the record from the id chosen by the store and the creation payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Apply an update. The actor runs this on a scratch copy and only commits
    /// the copy when the hook returns `Ok`, so a failing hook never leaves a partial write.
    fn on_update(&mut self, update: Self::Update) -> Result<(), Self::Error>;

    /// Handle a record-specific action.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;

    /// Whether this record is selected by `query`.
    fn matches(&self, _query: &Self::Query) -> bool {
        true
    }
}

// =============================================================================
// 2. THE GENERIC MESSAGES & ERRORS
// =============================================================================

/// Errors surfaced by [`ResourceClient`] calls.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError<E> {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    Entity(E),
}

/// One-shot response channel used by actors.
pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

/// Request sent to a [`ResourceActor`].
///
/// There is no `Delete`: lessons and orders are never removed.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    /// Every record in id order, optionally narrowed by a query.
    List {
        query: Option<T::Query>,
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T, T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// The actor that owns one collection of records.
///
/// **Concurrency Model**:
/// Requests are processed strictly one after another, so check-then-mutate
/// sequences inside a hook cannot interleave with any other request. The store
/// needs no lock; the task owns it.
///
/// Ids come from the actor's own counter and are handed out in creation order.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates the actor and the client connected to it.
    ///
    /// `buffer_size` bounds the request channel; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);

                    match T::from_create_params(id.clone(), params) {
                        Ok(item) => {
                            self.next_id += 1;
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::Entity(e)));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { query, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| query.as_ref().map_or(true, |q| item.matches(q)))
                        .cloned()
                        .collect();
                    debug!(entity_type, ?query, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let mut candidate = item.clone();
                    match candidate.on_update(update) {
                        Ok(()) => {
                            *item = candidate;
                            info!(entity_type, %id, "Updated");
                            let _ = respond_to.send(Ok(item.clone()));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::Entity(e)));
                        }
                    }
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let result = item.handle_action(action).map_err(FrameworkError::Entity);
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

/// A type-safe, cloneable handle to a running [`ResourceActor`].
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Derived Clone would demand `T: Clone` on the wrong terms for the sender.
impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R, T::Error>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self, query: Option<T::Query>) -> Result<Vec<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::List { query, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Counter {
        id: u32,
        label: String,
        value: u32,
    }

    #[derive(Debug)]
    struct CounterCreate {
        label: String,
    }

    #[derive(Debug)]
    struct CounterUpdate {
        label: Option<String>,
        value: Option<u32>,
    }

    #[derive(Debug)]
    enum CounterAction {
        Bump,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("label must not be empty")]
    struct EmptyLabel;

    impl ActorEntity for Counter {
        type Id = u32;
        type Create = CounterCreate;
        type Update = CounterUpdate;
        type Action = CounterAction;
        type ActionResult = u32;
        type Query = String;
        type Error = EmptyLabel;

        fn from_create_params(id: u32, params: CounterCreate) -> Result<Self, EmptyLabel> {
            if params.label.is_empty() {
                return Err(EmptyLabel);
            }
            Ok(Self {
                id,
                label: params.label,
                value: 0,
            })
        }

        fn on_update(&mut self, update: CounterUpdate) -> Result<(), EmptyLabel> {
            if let Some(value) = update.value {
                self.value = value;
            }
            if let Some(label) = update.label {
                if label.is_empty() {
                    return Err(EmptyLabel);
                }
                self.label = label;
            }
            Ok(())
        }

        fn handle_action(&mut self, action: CounterAction) -> Result<u32, EmptyLabel> {
            match action {
                CounterAction::Bump => {
                    self.value += 1;
                    Ok(self.value)
                }
            }
        }

        fn matches(&self, query: &String) -> bool {
            self.label.contains(query.as_str())
        }
    }

    fn spawn_counters() -> ResourceClient<Counter> {
        let (actor, client) = ResourceActor::new(8);
        tokio::spawn(actor.run());
        client
    }

    #[tokio::test]
    async fn test_ids_are_sequential_and_skip_failed_creates() {
        let client = spawn_counters();

        let first = client.create(CounterCreate { label: "a".into() }).await.unwrap();
        let rejected = client.create(CounterCreate { label: String::new() }).await;
        let second = client.create(CounterCreate { label: "b".into() }).await.unwrap();

        assert_eq!(first, 1);
        assert!(matches!(rejected, Err(FrameworkError::Entity(EmptyLabel))));
        assert_eq!(second, 2);
    }

    #[tokio::test]
    async fn test_list_is_ordered_and_filtered() {
        let client = spawn_counters();
        for label in ["apple", "banana", "apricot"] {
            client.create(CounterCreate { label: label.into() }).await.unwrap();
        }

        let all = client.list(None).await.unwrap();
        let ids: Vec<u32> = all.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let ap = client.list(Some("ap".to_string())).await.unwrap();
        assert_eq!(ap.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_update_leaves_record_untouched() {
        let client = spawn_counters();
        let id = client.create(CounterCreate { label: "x".into() }).await.unwrap();

        // value is applied before the label check fails; nothing may stick
        let result = client
            .update(
                id,
                CounterUpdate {
                    label: Some(String::new()),
                    value: Some(42),
                },
            )
            .await;
        assert!(matches!(result, Err(FrameworkError::Entity(EmptyLabel))));

        let stored = client.get(id).await.unwrap().unwrap();
        assert_eq!(stored.value, 0);
        assert_eq!(stored.label, "x");
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let client = spawn_counters();

        let action = client.perform_action(99, CounterAction::Bump).await;
        assert!(matches!(action, Err(FrameworkError::NotFound(id)) if id == "99"));

        let update = client
            .update(
                99,
                CounterUpdate {
                    label: None,
                    value: Some(1),
                },
            )
            .await;
        assert!(matches!(update, Err(FrameworkError::NotFound(_))));
        assert!(client.get(99).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_closed_actor_reports_actor_closed() {
        let (actor, client) = ResourceActor::<Counter>::new(1);
        drop(actor);

        let result = client.get(1).await;
        assert!(matches!(result, Err(FrameworkError::ActorClosed)));
    }
}
