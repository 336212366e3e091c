//! # Mock Framework
//!
//! Utilities for testing clients and the booking protocol without a real actor.
//!
//! Two styles are available:
//!
//! - [`MockClient`]: queue up expectations, hand `mock.client()` to the code under
//!   test, then call [`MockClient::verify`].
//! - [`create_mock_client`] plus the `expect_*` helpers: drive the receiving end
//!   by hand and answer each request yourself. Useful when the test needs to look
//!   at the payload (e.g. the quantity passed to a `Release`).
//!
//! ```ignore
//! let mut lessons = MockClient::<Lesson>::new();
//! lessons.expect_action(LessonId::from(1)).return_ok(LessonActionResult::Reserved(snapshot));
//! lessons.expect_action(LessonId::from(2)).return_err(FrameworkError::ActorClosed);
//! lessons.expect_action(LessonId::from(1)).return_ok(LessonActionResult::Released(5));
//!
//! let catalog = LessonClient::new(lessons.client());
//! // ... run a booking ...
//! lessons.verify();
//! ```

use crate::framework::{ActorEntity, FrameworkError, ResourceClient, ResourceRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: ActorEntity> {
    Create {
        response: Result<T::Id, FrameworkError<T::Error>>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError<T::Error>>,
    },
    List {
        response: Result<Vec<T>, FrameworkError<T::Error>>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError<T::Error>>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError<T::Error>>,
    },
}

struct MockState<T: ActorEntity> {
    expectations: VecDeque<Expectation<T>>,
    failures: Vec<String>,
}

type SharedState<T> = Arc<Mutex<MockState<T>>>;

fn lock<T: ActorEntity>(state: &SharedState<T>) -> std::sync::MutexGuard<'_, MockState<T>> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A mock client with an ordered expectation queue.
///
/// Each incoming request pops the next expectation. A request that does not match
/// (wrong kind, wrong id, or queue empty) is recorded as a failure and answered
/// with [`FrameworkError::ActorDropped`]; [`MockClient::verify`] reports it.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    state: SharedState<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let state: SharedState<T> = Arc::new(Mutex::new(MockState {
            expectations: VecDeque::new(),
            failures: Vec::new(),
        }));
        let task_state = state.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&task_state).expectations.pop_front();

                match (request, expectation) {
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: expected, response })) => {
                        answer(&task_state, "Get", &id, &expected, respond_to, response);
                    }
                    (ResourceRequest::List { respond_to, .. }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: expected, response }),
                    ) => {
                        answer(&task_state, "Update", &id, &expected, respond_to, response);
                    }
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: expected, response }),
                    ) => {
                        answer(&task_state, "Action", &id, &expected, respond_to, response);
                    }
                    (request, _) => {
                        lock(&task_state)
                            .failures
                            .push(format!("Unexpected request: {request:?}"));
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            state,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(self.state.clone(), |response| Expectation::Create { response })
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.state.clone(), move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(self.state.clone(), |response| Expectation::List { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        ExpectationBuilder::new(self.state.clone(), move |response| Expectation::Update { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        ExpectationBuilder::new(self.state.clone(), move |response| Expectation::Action { id, response })
    }

    /// Panics if any expectation is left over or any request did not match.
    pub fn verify(&self) {
        let state = lock(&self.state);
        if !state.failures.is_empty() {
            panic!("Mock received unexpected requests: {:?}", state.failures);
        }
        if !state.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                state.expectations.len()
            );
        }
    }
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn answer<T: ActorEntity, R>(
    state: &SharedState<T>,
    kind: &str,
    id: &T::Id,
    expected: &T::Id,
    respond_to: Response<R, T::Error>,
    response: Result<R, FrameworkError<T::Error>>,
) {
    if id == expected {
        let _ = respond_to.send(response);
    } else {
        lock(state)
            .failures
            .push(format!("{kind} for {id}, expected {expected}"));
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    state: SharedState<T>,
    make: Box<dyn FnOnce(Result<R, FrameworkError<T::Error>>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn new(
        state: SharedState<T>,
        make: impl FnOnce(Result<R, FrameworkError<T::Error>>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            state,
            make: Box::new(make),
        }
    }

    /// The matching request succeeds with `value`.
    pub fn return_ok(self, value: R) {
        let expectation = (self.make)(Ok(value));
        lock(&self.state).expectations.push_back(expectation);
    }

    /// The matching request fails with `error`.
    pub fn return_err(self, error: FrameworkError<T::Error>) {
        let expectation = (self.make)(Err(error));
        lock(&self.state).expectations.push_back(expectation);
    }
}

// =============================================================================
// MANUAL HELPERS
// =============================================================================

/// Creates a client and the receiving end of its channel.
///
/// The test plays the actor: it reads requests with the `expect_*` helpers and
/// answers through the returned responders.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message, if it is a `Create` request.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Response<T::Id, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a `List` request.
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Option<T::Query>, Response<Vec<T>, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an `Update` request.
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, Response<T, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an `Action` request.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult, T::Error>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
