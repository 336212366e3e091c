//! Demo: seed the catalog, search, update a lesson, book twice and list orders.

use lesson_booking::api;
use lesson_booking::config::BookingConfig;
use lesson_booking::lifecycle::tracing::setup_tracing;
use lesson_booking::lifecycle::BookingSystem;
use serde_json::json;
use tracing::{info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = BookingConfig::from_env();
    info!(?config, "Starting booking system");
    let system = BookingSystem::new(&config).await?;
    let service = &system.service;

    let (status, found) = api::search(service, Some("math")).await;
    info!(status, count = %found["count"], "Searched for math");

    let (status, updated) = api::update_lesson(service, "2", json!({"price": "85", "space": 3})).await;
    info!(status, lesson = %updated["lesson"], "Updated lesson 2");

    let span = tracing::info_span!("booking");
    let (status, confirmation) = async {
        api::create_order(
            service,
            json!({
                "name": "Ada Lovelace",
                "phone": "07700900123",
                "lessons": [{"lessonId": "1", "quantity": 2}, {"lessonId": "2", "quantity": 1}]
            }),
        )
        .await
    }
    .instrument(span)
    .await;
    info!(status, order_id = %confirmation["orderId"], total = %confirmation["order"]["totalAmount"], "First booking");

    let span = tracing::info_span!("oversized_booking");
    let (status, rejection) = async {
        api::create_order(
            service,
            json!({
                "name": "Alan Turing",
                "phone": "01611234567",
                "lessons": [{"lessonId": "3", "quantity": 1}, {"lessonId": "1", "quantity": 10}]
            }),
        )
        .await
    }
    .instrument(span)
    .await;
    info!(status, kind = %rejection["kind"], message = %rejection["message"], "Second booking");

    let (_, orders) = api::list_orders(service).await;
    info!(orders = orders.as_array().map_or(0, Vec::len), "Orders on record");

    system.shutdown().await?;
    info!("Application completed successfully");
    Ok(())
}
