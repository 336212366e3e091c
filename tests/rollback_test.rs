//! Reservation rollback driven through mock stores.
//!
//! The catalog side is played by hand or by a `MockClient`, so failures can be
//! injected at any step of a booking.

use lesson_booking::booking::{BookingError, BookingRequest, BookingService};
use lesson_booking::clients::{LessonClient, OrderClient};
use lesson_booking::framework::mock::{create_mock_client, expect_action, expect_create, MockClient};
use lesson_booking::framework::FrameworkError;
use lesson_booking::lesson_actor::{LessonAction, LessonActionResult};
use lesson_booking::model::{Lesson, LessonId, LineItem, Order, OrderId};

fn request(items: &[(u32, u32)]) -> BookingRequest {
    BookingRequest {
        name: "Grace Hopper".into(),
        phone: "02079460000".into(),
        lessons: items
            .iter()
            .map(|&(id, quantity)| LineItem::new(LessonId::from(id), quantity))
            .collect(),
    }
}

fn snapshot(id: u32, price: u32, space: u32) -> Lesson {
    Lesson::new(LessonId::from(id), "Music", "Mill Hill", price, space, "music.png")
}

#[tokio::test]
async fn test_storage_failure_mid_loop_releases_earlier_items() {
    let (client, mut receiver) = create_mock_client::<Lesson>(10);
    let orders = MockClient::<Order>::new();
    let service = BookingService::new(LessonClient::new(client), OrderClient::new(orders.client()));

    let task = tokio::spawn(async move { service.place_order(request(&[(1, 2), (2, 1)])).await });

    let (id, action, responder) = expect_action(&mut receiver).await.expect("first reserve");
    assert_eq!((id, action), (LessonId::from(1), LessonAction::Reserve(2)));
    responder
        .send(Ok(LessonActionResult::Reserved(snapshot(1, 110, 3))))
        .unwrap();

    let (id, action, responder) = expect_action(&mut receiver).await.expect("second reserve");
    assert_eq!((id, action), (LessonId::from(2), LessonAction::Reserve(1)));
    responder.send(Err(FrameworkError::ActorClosed)).unwrap();

    let (id, action, responder) = expect_action(&mut receiver).await.expect("rollback release");
    assert_eq!((id, action), (LessonId::from(1), LessonAction::Release(2)));
    responder.send(Ok(LessonActionResult::Released(5))).unwrap();

    assert_eq!(task.await.unwrap(), Err(BookingError::Storage));
    orders.verify();
}

#[tokio::test]
async fn test_ledger_failure_releases_in_reverse_order() {
    let mut lessons = MockClient::<Lesson>::new();
    lessons
        .expect_action(LessonId::from(1))
        .return_ok(LessonActionResult::Reserved(snapshot(1, 100, 4)));
    lessons
        .expect_action(LessonId::from(2))
        .return_ok(LessonActionResult::Reserved(snapshot(2, 90, 0)));
    lessons
        .expect_action(LessonId::from(2))
        .return_ok(LessonActionResult::Released(1));
    lessons
        .expect_action(LessonId::from(1))
        .return_ok(LessonActionResult::Released(5));

    let mut orders = MockClient::<Order>::new();
    orders.expect_create().return_err(FrameworkError::ActorDropped);

    let service = BookingService::new(LessonClient::new(lessons.client()), OrderClient::new(orders.client()));
    let result = service.place_order(request(&[(1, 1), (2, 1)])).await;

    assert_eq!(result, Err(BookingError::Storage));
    lessons.verify();
    orders.verify();
}

#[tokio::test]
async fn test_failed_release_does_not_stop_rollback() {
    let mut lessons = MockClient::<Lesson>::new();
    lessons
        .expect_action(LessonId::from(1))
        .return_ok(LessonActionResult::Reserved(snapshot(1, 100, 4)));
    lessons
        .expect_action(LessonId::from(2))
        .return_ok(LessonActionResult::Reserved(snapshot(2, 90, 4)));
    lessons
        .expect_action(LessonId::from(3))
        .return_err(FrameworkError::NotFound("3".into()));
    lessons
        .expect_action(LessonId::from(2))
        .return_err(FrameworkError::ActorDropped);
    lessons
        .expect_action(LessonId::from(1))
        .return_ok(LessonActionResult::Released(5));

    let orders = MockClient::<Order>::new();
    let service = BookingService::new(LessonClient::new(lessons.client()), OrderClient::new(orders.client()));
    let result = service.place_order(request(&[(1, 1), (2, 1), (3, 1)])).await;

    assert!(matches!(result, Err(BookingError::NotFound { entity: "Lesson", ref id }) if id == "3"));
    lessons.verify();
    orders.verify();
}

#[tokio::test]
async fn test_successful_booking_releases_nothing() {
    let mut lessons = MockClient::<Lesson>::new();
    lessons
        .expect_action(LessonId::from(4))
        .return_ok(LessonActionResult::Reserved(snapshot(4, 75, 1)));
    let mut orders = MockClient::<Order>::new();
    orders.expect_create().return_ok(OrderId::from(1));

    let service = BookingService::new(LessonClient::new(lessons.client()), OrderClient::new(orders.client()));
    let order = service.place_order(request(&[(4, 2)])).await.unwrap();

    assert_eq!(order.id, OrderId::from(1));
    assert_eq!(order.total_amount, 150);
    lessons.verify();
    orders.verify();
}

#[tokio::test]
async fn test_booking_dropped_while_reserve_in_flight_releases_everything() {
    let (client, mut receiver) = create_mock_client::<Lesson>(10);
    let orders = MockClient::<Order>::new();
    let service = BookingService::new(LessonClient::new(client), OrderClient::new(orders.client()));

    let task = tokio::spawn(async move { service.place_order(request(&[(1, 2), (2, 1)])).await });

    let (_, _, responder) = expect_action(&mut receiver).await.expect("first reserve");
    responder
        .send(Ok(LessonActionResult::Reserved(snapshot(1, 110, 3))))
        .unwrap();

    let (id, _, pending) = expect_action(&mut receiver).await.expect("second reserve");
    assert_eq!(id, LessonId::from(2));
    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());

    // The store takes the places even though nobody is waiting for the booking.
    pending
        .send(Ok(LessonActionResult::Reserved(snapshot(2, 90, 0))))
        .unwrap();

    let (id, action, responder) = expect_action(&mut receiver).await.expect("release of second item");
    assert_eq!((id, action), (LessonId::from(2), LessonAction::Release(1)));
    responder.send(Ok(LessonActionResult::Released(1))).unwrap();

    let (id, action, responder) = expect_action(&mut receiver).await.expect("release of first item");
    assert_eq!((id, action), (LessonId::from(1), LessonAction::Release(2)));
    responder.send(Ok(LessonActionResult::Released(5))).unwrap();

    // Every client clone is gone once the booking task has finished.
    assert!(receiver.recv().await.is_none());
    orders.verify();
}

#[tokio::test]
async fn test_booking_dropped_while_append_in_flight_keeps_the_order() {
    let mut lessons = MockClient::<Lesson>::new();
    lessons
        .expect_action(LessonId::from(1))
        .return_ok(LessonActionResult::Reserved(snapshot(1, 100, 4)));
    let (ledger, mut appends) = create_mock_client::<Order>(10);
    let service = BookingService::new(LessonClient::new(lessons.client()), OrderClient::new(ledger));

    let task = tokio::spawn(async move { service.place_order(request(&[(1, 1)])).await });

    let (params, responder) = expect_create(&mut appends).await.expect("append");
    assert_eq!(params.total_amount, 100);
    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());

    responder.send(Ok(OrderId::from(1))).unwrap();

    // The ledger channel closes when the booking task ends. A recorded order
    // must keep its places, so no release may have been sent.
    assert!(appends.recv().await.is_none());
    lessons.verify();
}

#[tokio::test]
async fn test_booking_dropped_between_items_stops_reserving() {
    let (client, mut receiver) = create_mock_client::<Lesson>(10);
    let orders = MockClient::<Order>::new();
    let service = BookingService::new(LessonClient::new(client), OrderClient::new(orders.client()));

    let task = tokio::spawn(async move { service.place_order(request(&[(1, 2), (2, 1)])).await });

    let (_, _, responder) = expect_action(&mut receiver).await.expect("first reserve");
    task.abort();
    assert!(task.await.unwrap_err().is_cancelled());
    responder
        .send(Ok(LessonActionResult::Reserved(snapshot(1, 110, 3))))
        .unwrap();

    // No second reserve: the booking notices the caller left and undoes the first.
    let (id, action, responder) = expect_action(&mut receiver).await.expect("release");
    assert_eq!((id, action), (LessonId::from(1), LessonAction::Release(2)));
    responder.send(Ok(LessonActionResult::Released(5))).unwrap();

    assert!(receiver.recv().await.is_none());
    orders.verify();
}
