//! Tests for the `Worker` lifecycle state machine.

use std::time::Duration;

use stoker_cli::application::ports::DetachedChannel;
use stoker_cli::application::services::worker::{ConnectOutcome, Worker};
use stoker_cli::domain::error::{ConnectError, WorkerError};
use stoker_cli::domain::worker::{WorkerPhase, WorkerSpec};

use crate::mocks::{AlwaysPending, DrainedQueue, FakePlatform, FlakyResolver, MockClock, NoopReporter};

fn spec(timeout: Option<Duration>) -> WorkerSpec {
    WorkerSpec {
        name: "b1".to_string(),
        framework: "redhat-jbossas-7".to_string(),
        size_label: "small".to_string(),
        readiness_timeout: timeout,
    }
}

#[tokio::test]
async fn unique_id_unset_before_connect_and_stable_after() {
    let paas = FakePlatform::new();
    let clock = MockClock::new();
    let mut worker = Worker::new(spec(Some(Duration::from_secs(60))));

    assert_eq!(worker.unique_id(), None);
    assert_eq!(worker.phase(), WorkerPhase::New);

    worker
        .provision(&paas, &FlakyResolver::after_failures(0), &AlwaysPending, &clock, &NoopReporter)
        .await
        .expect("provisioned");

    assert_eq!(worker.phase(), WorkerPhase::Ready);
    assert_eq!(worker.unique_id(), Some("g-42"));

    // A reconnect must not reassign the identity.
    let outcome = worker
        .connect(&paas, &FlakyResolver::after_failures(0), &AlwaysPending, &clock, &NoopReporter, false)
        .await
        .expect("reconnected");
    assert!(matches!(outcome, ConnectOutcome::Ready(_)));
    assert_eq!(worker.unique_id(), Some("g-42"));
}

#[tokio::test]
async fn provision_applies_the_dns_grace_delay() {
    let paas = FakePlatform::new();
    let clock = MockClock::new();
    let mut worker = Worker::new(spec(None));

    worker
        .provision(&paas, &FlakyResolver::after_failures(0), &AlwaysPending, &clock, &NoopReporter)
        .await
        .expect("provisioned");

    assert_eq!(clock.elapsed(), Duration::from_secs(5), "one grace interval, no backoff");
}

#[tokio::test]
async fn create_failure_absorbs_into_failed() {
    let paas = FakePlatform {
        create_ok: false,
        ..FakePlatform::new()
    };
    let clock = MockClock::new();
    let mut worker = Worker::new(spec(None));

    let err = worker
        .provision(&paas, &FlakyResolver::after_failures(0), &AlwaysPending, &clock, &NoopReporter)
        .await
        .expect_err("expected Err");

    assert!(matches!(err, WorkerError::Provision(_)));
    assert_eq!(worker.phase(), WorkerPhase::Failed);
    assert_eq!(worker.unique_id(), None);
}

#[tokio::test]
async fn readiness_timeout_absorbs_into_failed() {
    let paas = FakePlatform::new();
    let clock = MockClock::new();
    let mut worker = Worker::new(spec(Some(Duration::from_secs(30))));

    let err = worker
        .provision(
            &paas,
            &FlakyResolver::after_failures(u32::MAX),
            &AlwaysPending,
            &clock,
            &NoopReporter,
        )
        .await
        .expect_err("expected Err");

    assert!(matches!(
        err,
        WorkerError::Connect(ConnectError::Timeout { budget_ms: 30_000, .. })
    ));
    assert_eq!(worker.phase(), WorkerPhase::Failed);
}

#[tokio::test]
async fn drained_queue_abandons_and_keeps_awaiting_ready() {
    let paas = FakePlatform::new();
    let clock = MockClock::new();
    let mut worker = Worker::new(spec(Some(Duration::from_secs(60))));

    worker
        .provision(&paas, &FlakyResolver::after_failures(u32::MAX), &DrainedQueue, &clock, &NoopReporter)
        .await
        .expect("abandoned wait is not an error");

    assert_eq!(worker.phase(), WorkerPhase::AwaitingReady);
    assert_eq!(worker.unique_id(), None, "identity only set on Ready");

    // Work shows up again later: the same worker can still connect.
    let outcome = worker
        .connect(&paas, &FlakyResolver::after_failures(0), &AlwaysPending, &clock, &NoopReporter, false)
        .await
        .expect("connected");
    assert!(matches!(outcome, ConnectOutcome::Ready(_)));
    assert_eq!(worker.unique_id(), Some("g-42"));
}

#[tokio::test]
async fn terminate_is_idempotent_even_after_remote_deletion() {
    let paas = FakePlatform::new();
    let clock = MockClock::new();
    let mut worker = Worker::new(spec(None));
    worker
        .provision(&paas, &FlakyResolver::after_failures(0), &AlwaysPending, &clock, &NoopReporter)
        .await
        .expect("provisioned");

    worker.terminate(&paas, &DetachedChannel).await;
    assert_eq!(worker.phase(), WorkerPhase::Terminated);

    // Second call: the platform now reports "does not exist"; still no error.
    let paas = FakePlatform {
        destroy_ok: false,
        ..FakePlatform::new()
    };
    worker.terminate(&paas, &DetachedChannel).await;
    assert_eq!(worker.phase(), WorkerPhase::Terminated);
    assert_eq!(worker.unique_id(), Some("g-42"), "identity survives teardown");
}

#[tokio::test]
async fn terminate_runs_after_failed_provisioning() {
    let paas = FakePlatform {
        stop_ok: false,
        ..FakePlatform::new()
    };
    let clock = MockClock::new();
    let mut worker = Worker::new(spec(None));

    worker
        .provision(&paas, &FlakyResolver::after_failures(0), &AlwaysPending, &clock, &NoopReporter)
        .await
        .expect_err("stop failure fails provisioning");
    assert_eq!(worker.phase(), WorkerPhase::Failed);

    // The caller's obligation: the created application must still be
    // disposable.
    worker.terminate(&paas, &DetachedChannel).await;
    assert_eq!(worker.phase(), WorkerPhase::Terminated);
    assert_eq!(*paas.destroy_calls.lock().expect("lock"), 1);
}

#[tokio::test]
async fn hostname_comes_from_the_application_url() {
    let paas = FakePlatform::new();
    let worker = Worker::new(spec(None));
    assert_eq!(
        worker.hostname(&paas).await.expect("hostname"),
        "b1-ci.gear.example.com"
    );
}
