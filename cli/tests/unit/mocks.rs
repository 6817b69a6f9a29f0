//! Shared mock infrastructure for unit tests.
//!
//! Provides a canned control-plane fake plus stub clock/resolver/queue
//! implementations so each test file doesn't have to re-define the same
//! boilerplate.

use std::net::IpAddr;
use std::process::Output;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use stoker_cli::application::ports::{
    AddressResolver, AppInspector, AppLifecycle, Clock, CreateAppSpec, ProgressReporter, WorkQueue,
};

use crate::helpers::{err_output, ok_output};

// ── Mock: canned control plane ────────────────────────────────────────────────

/// A platform fake with scripted catalog, application record, and
/// per-operation success toggles. Records lifecycle calls.
pub struct FakePlatform {
    pub cartridge_names: Vec<&'static str>,
    pub profile_names: Vec<&'static str>,
    /// JSON served by `show_app`; `None` simulates "does not exist".
    pub app_json: Option<String>,
    pub create_ok: bool,
    pub stop_ok: bool,
    pub destroy_ok: bool,
    pub create_calls: Mutex<Vec<(String, String, String)>>,
    pub stop_calls: Mutex<u32>,
    pub destroy_calls: Mutex<u32>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self {
            cartridge_names: vec!["jbossas-7", "php-5.3"],
            profile_names: vec!["small", "medium"],
            app_json: Some(
                r#"{"app":{"name":"b1","app_url":"http://b1-ci.gear.example.com/",
                    "gear_groups":[{"gears":[{"id":"g-42","state":"stopped"}]}]}}"#
                    .to_string(),
            ),
            create_ok: true,
            stop_ok: true,
            destroy_ok: true,
            create_calls: Mutex::new(Vec::new()),
            stop_calls: Mutex::new(0),
            destroy_calls: Mutex::new(0),
        }
    }

    pub fn create_call_count(&self) -> usize {
        self.create_calls.lock().expect("lock").len()
    }
}

impl AppInspector for FakePlatform {
    async fn show_app(&self, _: &str) -> Result<Output> {
        Ok(self.app_json.as_ref().map_or_else(
            || err_output(b"does not exist"),
            |json| ok_output(json.as_bytes()),
        ))
    }

    async fn cartridges(&self) -> Result<Output> {
        let entries: Vec<String> = self
            .cartridge_names
            .iter()
            .map(|n| format!(r#"{{"name":"{n}"}}"#))
            .collect();
        Ok(ok_output(
            format!(r#"{{"cartridges":[{}]}}"#, entries.join(",")).as_bytes(),
        ))
    }

    async fn gear_sizes(&self) -> Result<Output> {
        let entries: Vec<String> = self
            .profile_names
            .iter()
            .map(|n| format!(r#"{{"name":"{n}"}}"#))
            .collect();
        Ok(ok_output(
            format!(r#"{{"profiles":[{}]}}"#, entries.join(",")).as_bytes(),
        ))
    }

    async fn account(&self) -> Result<Output> {
        Ok(ok_output(br#"{"account":{"login":"ci-bot","default_domain":"ci"}}"#))
    }

    async fn version(&self) -> Result<Output> {
        Ok(ok_output(b"gear 1.5.0\n"))
    }
}

impl AppLifecycle for FakePlatform {
    async fn create_app(&self, spec: &CreateAppSpec<'_>) -> Result<Output> {
        self.create_calls.lock().expect("lock").push((
            spec.name.to_string(),
            spec.cartridge.to_string(),
            spec.gear_profile.to_string(),
        ));
        Ok(if self.create_ok {
            ok_output(b"{}")
        } else {
            err_output(b"gear limit reached")
        })
    }

    async fn stop_app(&self, _: &str) -> Result<Output> {
        *self.stop_calls.lock().expect("lock") += 1;
        Ok(if self.stop_ok {
            ok_output(b"")
        } else {
            err_output(b"stop failed")
        })
    }

    async fn destroy_app(&self, _: &str) -> Result<Output> {
        *self.destroy_calls.lock().expect("lock") += 1;
        Ok(if self.destroy_ok {
            ok_output(b"")
        } else {
            err_output(b"does not exist")
        })
    }
}

// ── Mock: clock with simulated time ───────────────────────────────────────────

/// Simulated clock — `sleep` advances `now` without real waiting.
pub struct MockClock {
    start: Instant,
    elapsed: Mutex<Duration>,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
            elapsed: Mutex::new(Duration::ZERO),
        }
    }

    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock().expect("lock")
    }
}

impl Clock for MockClock {
    fn now(&self) -> Instant {
        self.start + self.elapsed()
    }

    async fn sleep(&self, duration: Duration) {
        *self.elapsed.lock().expect("lock") += duration;
    }
}

// ── Mock: resolvers ───────────────────────────────────────────────────────────

/// Resolver that fails a scripted number of times, then succeeds.
pub struct FlakyResolver {
    pub failures: Mutex<u32>,
}

impl FlakyResolver {
    pub fn after_failures(failures: u32) -> Self {
        Self {
            failures: Mutex::new(failures),
        }
    }
}

impl AddressResolver for FlakyResolver {
    async fn resolve(&self, _: &str) -> Result<IpAddr> {
        let mut left = self.failures.lock().expect("lock");
        if *left > 0 {
            *left -= 1;
            anyhow::bail!("name not known yet");
        }
        Ok("203.0.113.7".parse().expect("addr"))
    }
}

// ── Mock: work queues ─────────────────────────────────────────────────────────

pub struct AlwaysPending;

impl WorkQueue for AlwaysPending {
    async fn has_pending_work(&self) -> bool {
        true
    }
}

pub struct DrainedQueue;

impl WorkQueue for DrainedQueue {
    async fn has_pending_work(&self) -> bool {
        false
    }
}

// ── Mock: no-op progress reporter ────────────────────────────────────────────

pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}
