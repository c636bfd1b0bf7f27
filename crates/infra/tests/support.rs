//! Shared helpers for `salesdesk-infra` integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use salesdesk_core::{FixedClock, MemoryCredentialStore};
use salesdesk_domain::{Config, CredentialStoreKind};
use salesdesk_infra::DashboardContext;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PASSCODE: &str = "2468";
pub const TOKEN: &str = "token-abc";

/// Config pointing at `server` with an in-memory session store.
pub fn config_for(server: &MockServer) -> Config {
    let mut config = Config::default();
    config.api.base_url = format!("{}/api", server.uri());
    config.api.timeout_seconds = 5;
    config.api.max_attempts = 1;
    config.session.store = CredentialStoreKind::Memory;
    config
}

/// Context with an in-memory store and the clock pinned to 2025-07-01.
pub fn context_for(server: &MockServer) -> (DashboardContext, Arc<MemoryCredentialStore>) {
    let store = Arc::new(MemoryCredentialStore::new());
    let clock = Arc::new(FixedClock::new(Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap()));
    let context = DashboardContext::with_parts(config_for(server), store.clone(), clock)
        .expect("dashboard context");
    (context, store)
}

pub fn record_json(id: i64, phone: &str, delivery: &str) -> Value {
    json!({
        "id": id,
        "client_name": "Asha Rao",
        "phone": phone,
        "zone": "North",
        "delivery_date": delivery,
        "machine_model": "AquaPure 500",
        "sale_price": 45000.0,
        "sold_by": "Ravi",
        "lead_source": "Referral"
    })
}

/// Mount `POST /api/auth/login` accepting [`PASSCODE`].
pub async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "passcode": PASSCODE })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "access_token": TOKEN, "role": "admin" })),
        )
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "Invalid passcode" })))
        .with_priority(2)
        .mount(server)
        .await;
}
