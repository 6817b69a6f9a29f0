//! Tests for the `create_application` provisioning service.

use std::time::Duration;

use stoker_cli::application::services::provision::create_application;
use stoker_cli::domain::error::{ProvisionError, ResolveError};
use stoker_cli::domain::worker::WorkerSpec;

use crate::mocks::{FakePlatform, NoopReporter};

fn spec(framework: &str, size: &str) -> WorkerSpec {
    WorkerSpec {
        name: "b1".to_string(),
        framework: framework.to_string(),
        size_label: size.to_string(),
        readiness_timeout: Some(Duration::from_secs(60)),
    }
}

#[tokio::test]
async fn provisions_jbossas_small_end_to_end() {
    let paas = FakePlatform::new();
    let created = create_application(&paas, &NoopReporter, &spec("redhat-jbossas-7", "small"))
        .await
        .expect("provisioned");

    assert_eq!(created.cartridge, "jbossas-7");
    assert_eq!(created.gear_profile, "small");
    assert!(!created.profile_fallback);
    assert_eq!(created.domain, "ci");

    let creates = paas.create_calls.lock().expect("lock");
    assert_eq!(
        creates.as_slice(),
        &[("b1".to_string(), "jbossas-7".to_string(), "small".to_string())]
    );
    assert_eq!(*paas.stop_calls.lock().expect("lock"), 1, "app must be parked");
}

#[tokio::test]
async fn unknown_framework_fails_before_any_create_call() {
    let paas = FakePlatform::new();
    let err = create_application(&paas, &NoopReporter, &spec("unknown-fw", "small"))
        .await
        .expect_err("expected Err");

    assert!(matches!(
        err,
        ProvisionError::Resolve(ResolveError::CartridgeNotFound(ref name)) if name == "unknown-fw"
    ));
    assert_eq!(paas.create_call_count(), 0, "no remote creation may happen");
}

#[tokio::test]
async fn unknown_size_substitutes_first_profile_and_flags_it() {
    let paas = FakePlatform::new();
    let created = create_application(&paas, &NoopReporter, &spec("jbossas-7", "colossal"))
        .await
        .expect("provisioned");

    assert_eq!(created.gear_profile, "small");
    assert!(created.profile_fallback);
}

#[tokio::test]
async fn create_failure_is_a_create_error() {
    let paas = FakePlatform {
        create_ok: false,
        ..FakePlatform::new()
    };
    let err = create_application(&paas, &NoopReporter, &spec("jbossas-7", "small"))
        .await
        .expect_err("expected Err");

    assert!(matches!(err, ProvisionError::Create { ref name, .. } if name == "b1"));
    assert_eq!(*paas.stop_calls.lock().expect("lock"), 0);
}

#[tokio::test]
async fn stop_failure_still_reports_the_live_resource() {
    let paas = FakePlatform {
        stop_ok: false,
        ..FakePlatform::new()
    };
    let err = create_application(&paas, &NoopReporter, &spec("jbossas-7", "small"))
        .await
        .expect_err("expected Err");

    // The application was created; callers must be told the stop failed so
    // they still attempt termination.
    assert!(matches!(err, ProvisionError::Stop { .. }));
    assert_eq!(paas.create_call_count(), 1);
}
