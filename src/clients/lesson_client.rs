//! # Lesson Client
//!
//! High-level API for the Lesson actor. Implements [`CatalogStore`] on top of a
//! `ResourceClient<Lesson>`.

use crate::clients::actor_client::ActorClient;
use crate::framework::ResourceClient;
use crate::lesson_actor::{LessonAction, LessonActionResult, LessonError};
use crate::model::{Lesson, LessonCreate, LessonId, LessonQuery, LessonUpdate};
use crate::store::CatalogStore;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Lesson actor.
#[derive(Clone)]
pub struct LessonClient {
    inner: ResourceClient<Lesson>,
}

impl LessonClient {
    pub fn new(inner: ResourceClient<Lesson>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_lesson(&self, params: LessonCreate) -> Result<LessonId, LessonError> {
        debug!("Sending request");
        Ok(self.inner.create(params).await?)
    }

    /// Current space for a lesson, without changing it.
    #[instrument(skip(self))]
    pub async fn check_space(&self, id: LessonId) -> Result<u32, LessonError> {
        match self.inner.perform_action(id, LessonAction::CheckSpace).await? {
            LessonActionResult::Space(space) => Ok(space),
            other => Err(unexpected(LessonAction::CheckSpace, other)),
        }
    }
}

fn unexpected(action: LessonAction, result: LessonActionResult) -> LessonError {
    LessonError::Unavailable(format!("{action:?} answered with {result:?}"))
}

#[async_trait]
impl ActorClient<Lesson> for LessonClient {
    type Error = LessonError;

    fn inner(&self) -> &ResourceClient<Lesson> {
        &self.inner
    }
}

#[async_trait]
impl CatalogStore for LessonClient {
    async fn list_all(&self) -> Result<Vec<Lesson>, LessonError> {
        self.list().await
    }

    async fn find_by_id(&self, id: LessonId) -> Result<Option<Lesson>, LessonError> {
        self.get(id).await
    }

    #[instrument(skip(self))]
    async fn search(&self, term: &str) -> Result<Vec<Lesson>, LessonError> {
        if term.trim().is_empty() {
            return Err(LessonError::Invalid("search term must not be empty".into()));
        }
        Ok(self.inner.list(Some(LessonQuery::term(term))).await?)
    }

    #[instrument(skip(self))]
    async fn try_reserve(&self, id: LessonId, quantity: u32) -> Result<Lesson, LessonError> {
        debug!("Reserving {} places on lesson {}", quantity, id);
        let action = LessonAction::Reserve(quantity);
        match self.inner.perform_action(id, action).await? {
            LessonActionResult::Reserved(lesson) => Ok(lesson),
            other => Err(unexpected(action, other)),
        }
    }

    #[instrument(skip(self))]
    async fn release(&self, id: LessonId, quantity: u32) -> Result<(), LessonError> {
        debug!("Releasing {} places on lesson {}", quantity, id);
        let action = LessonAction::Release(quantity);
        match self.inner.perform_action(id, action).await? {
            LessonActionResult::Released(_) => Ok(()),
            other => Err(unexpected(action, other)),
        }
    }

    #[instrument(skip(self))]
    async fn update(&self, id: LessonId, update: LessonUpdate) -> Result<Lesson, LessonError> {
        Ok(self.inner.update(id, update).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, expect_list, expect_update, MockClient};
    use crate::framework::FrameworkError;

    #[tokio::test]
    async fn test_try_reserve_sends_reserve_action() {
        let (client, mut receiver) = create_mock_client::<Lesson>(10);
        let lessons = LessonClient::new(client);

        let task = tokio::spawn(async move { lessons.try_reserve(LessonId::from(1), 2).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, LessonId::from(1));
        assert_eq!(action, LessonAction::Reserve(2));

        let snapshot = Lesson::new(LessonId::from(1), "Mathematics", "Hendon", 100, 3, "math.png");
        responder
            .send(Ok(LessonActionResult::Reserved(snapshot.clone())))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap(), snapshot);
    }

    #[tokio::test]
    async fn test_not_found_maps_to_lesson_not_found() {
        let (client, mut receiver) = create_mock_client::<Lesson>(10);
        let lessons = LessonClient::new(client);

        let task = tokio::spawn(async move { lessons.try_reserve(LessonId::from(9), 1).await });

        let (_, _, responder) = expect_action(&mut receiver).await.unwrap();
        responder
            .send(Err(FrameworkError::NotFound("9".to_string())))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(LessonError::NotFound("9".to_string()))
        );
    }

    #[tokio::test]
    async fn test_closed_actor_maps_to_unavailable() {
        let (client, receiver) = create_mock_client::<Lesson>(10);
        drop(receiver);
        let lessons = LessonClient::new(client);

        let result = lessons.release(LessonId::from(1), 1).await;
        assert!(matches!(result, Err(LessonError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_search_lowercases_term_and_rejects_empty() {
        let (client, mut receiver) = create_mock_client::<Lesson>(10);
        let lessons = LessonClient::new(client);

        assert!(matches!(
            lessons.search("  ").await,
            Err(LessonError::Invalid(_))
        ));

        let task = tokio::spawn(async move { lessons.search("MATH").await });
        let (query, responder) = expect_list(&mut receiver).await.unwrap();
        assert_eq!(query, Some(LessonQuery::Term("math".to_string())));
        responder.send(Ok(vec![])).unwrap();

        assert!(task.await.unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_forwards_fields_and_returns_refreshed_lesson() {
        let (client, mut receiver) = create_mock_client::<Lesson>(10);
        let lessons = LessonClient::new(client);

        let task = tokio::spawn(async move {
            lessons
                .update(
                    LessonId::from(2),
                    LessonUpdate {
                        price: Some(85),
                        ..LessonUpdate::default()
                    },
                )
                .await
        });

        let (id, update, responder) = expect_update(&mut receiver).await.expect("Expected Update request");
        assert_eq!(id, LessonId::from(2));
        assert_eq!(update.price, Some(85));
        assert_eq!(update.space, None);

        let refreshed = Lesson::new(LessonId::from(2), "English", "Colindale", 85, 5, "english.png");
        responder.send(Ok(refreshed.clone())).unwrap();
        assert_eq!(task.await.unwrap().unwrap(), refreshed);
    }

    #[tokio::test]
    async fn test_update_of_unknown_lesson_is_not_found() {
        let mut mock = MockClient::<Lesson>::new();
        mock.expect_update(LessonId::from(6))
            .return_err(FrameworkError::NotFound("6".to_string()));
        let lessons = LessonClient::new(mock.client());

        let result = lessons.update(LessonId::from(6), LessonUpdate::default()).await;
        assert_eq!(result, Err(LessonError::NotFound("6".to_string())));
        mock.verify();
    }
}
