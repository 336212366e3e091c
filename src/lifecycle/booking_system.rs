use crate::booking::BookingService;
use crate::clients::{LessonClient, OrderClient};
use crate::config::{BookingConfig, ConfigError};
use crate::lesson_actor::{self, LessonError};
use crate::order_actor;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Seed lesson {index} rejected: {source}")]
    Seed {
        index: usize,
        #[source]
        source: LessonError,
    },

    #[error("Actor task failed: {0}")]
    ActorFailed(String),
}

/// The running booking system: both stores plus the service on top of them.
///
/// # Example
///
/// ```ignore
/// let system = BookingSystem::new(&BookingConfig::from_env()).await?;
/// let lessons = system.service.search(Some("math")).await?;
/// system.shutdown().await?;
/// ```
pub struct BookingSystem {
    pub service: BookingService<LessonClient, OrderClient>,

    /// Task handles for the actors (used for graceful shutdown)
    handles: Vec<JoinHandle<()>>,
}

impl BookingSystem {
    /// Spawns the lesson and order actors and loads the seed catalog.
    pub async fn new(config: &BookingConfig) -> Result<Self, LifecycleError> {
        let seed = config.seed_catalog()?;

        let (lesson_actor, lesson_client) = lesson_actor::new(config.lesson_buffer);
        let (order_actor, order_client) = order_actor::new(config.order_buffer);

        let lesson_handle = tokio::spawn(lesson_actor.run());
        let order_handle = tokio::spawn(order_actor.run());

        for (index, lesson) in seed.into_iter().enumerate() {
            lesson_client
                .create_lesson(lesson)
                .await
                .map_err(|source| LifecycleError::Seed { index, source })?;
        }
        info!(lesson_buffer = config.lesson_buffer, order_buffer = config.order_buffer, "Booking system started");

        Ok(Self {
            service: BookingService::new(lesson_client, order_client),
            handles: vec![lesson_handle, order_handle],
        })
    }

    /// Drops the clients and waits for both actors to finish.
    ///
    /// Clones of the clients held elsewhere keep their actor alive, so this waits
    /// until those are gone too.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down system...");
        drop(self.service);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(LifecycleError::ActorFailed(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
