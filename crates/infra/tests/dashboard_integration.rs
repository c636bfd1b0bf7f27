//! End-to-end tests of the dashboard context against a mock backend.

mod support;

use salesdesk_core::{HistoryOutcome, SwitchOutcome};
use salesdesk_domain::{Role, SalesDeskError, SessionState, SummaryFilter, WarrantyState};
use serde_json::json;
use support::{context_for, mount_login, record_json, PASSCODE, TOKEN};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn wrong_passcode_leaves_session_anonymous() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_login(&server).await;
    let (context, store) = context_for(&server);

    let err = context.login("1111").await.unwrap_err();

    assert_eq!(err, SalesDeskError::AuthRejected("Invalid passcode".into()));
    assert!(context.session().token().is_none());
    assert!(context.session().role().is_none());
    assert!(salesdesk_core::CredentialStore::load(store.as_ref())?.is_none());
    Ok(())
}

#[tokio::test]
async fn history_then_switch_record() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/records/history/555-1234"))
        .and(query_param("exclude_id", "7"))
        .and(query_param("limit", "10"))
        .and(header("Authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "records": [
                record_json(3, "555-1234", "2023-01-10"),
                record_json(4, "555-1234", "2024-02-29"),
                record_json(5, "555-1234", "2025-06-01")
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/records/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(record_json(4, "555-1234", "2024-02-29")))
        .expect(1)
        .mount(&server)
        .await;

    let (context, _) = context_for(&server);
    assert_eq!(context.login(PASSCODE).await?, Role::Admin);

    let outcome = context.fetch_history(Some("555-1234"), 7).await;
    assert_eq!(outcome.records().len(), 3);

    let record = match context.switch_record(4).await {
        SwitchOutcome::Switched(record) => record,
        other => anyhow::bail!("expected switch, got {other:?}"),
    };
    assert_eq!(record.id, 4);
    assert!(context.history().history().is_empty());

    // Clock is pinned to 2025-07-01; a leap-day delivery expired on 2025-03-01
    let warranty = context.warranty(&record).expect("warranty");
    assert_eq!(warranty.state, WarrantyState::OutOfWarranty);
    assert_eq!(warranty.expiry_date.to_string(), "2025-03-01");
    Ok(())
}

#[tokio::test]
async fn phone_is_percent_encoded_in_path() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/records/history/%2B91%2098765"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "records": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let (context, _) = context_for(&server);
    context.login(PASSCODE).await?;

    let outcome = context.fetch_history(Some("+91 98765"), 1).await;
    assert_eq!(outcome, HistoryOutcome::Loaded(Vec::new()));
    Ok(())
}

#[tokio::test]
async fn history_failure_is_empty_not_fatal() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/records/history/555-1234"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let (context, _) = context_for(&server);
    context.login(PASSCODE).await?;

    let outcome = context.fetch_history(Some("555-1234"), 7).await;
    assert!(outcome.is_empty());
    assert!(matches!(outcome.error(), Some(SalesDeskError::Network(_))));
    assert!(context.session().is_authenticated());
    Ok(())
}

#[tokio::test]
async fn rejected_token_forces_logout() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/sales/summary"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (context, _) = context_for(&server);
    context.login(PASSCODE).await?;
    let mut state = context.session().subscribe();

    let err = context.summary_view(&SummaryFilter::default()).await.unwrap_err();

    assert!(matches!(err, SalesDeskError::AuthRejected(_)));
    assert!(state.has_changed()?);
    assert_eq!(*state.borrow_and_update(), SessionState::Anonymous);
    assert!(context.session().token().is_none());
    Ok(())
}

#[tokio::test]
async fn summary_view_forwards_filter_and_derives_series() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/sales/summary"))
        .and(query_param("zone", "North"))
        .and(query_param("date_from", "2025-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_records": 18,
            "total_revenue": 150.0,
            "average_order_value": 8.3,
            "monthly_trend": [{ "month": "2025-01", "count": 18, "revenue": 150.0 }],
            "monthly_projection": [{ "month": "2025-02", "count": 20, "revenue": 170.0 }],
            "by_zone": { "A": 5, "B": 10, "C": 3 },
            "revenue_by_zone": { "A": 100.0, "B": 50.0 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (context, _) = context_for(&server);
    context.login(PASSCODE).await?;

    let filter = SummaryFilter {
        zone: Some("North".into()),
        sold_by: Some("  ".into()),
        date_from: Some("2025-01-01".into()),
        date_to: None,
    };
    let view = context.summary_view(&filter).await?;

    assert!(view.has_data);
    let zones: Vec<_> = view.zones.iter().map(|row| (row.key.as_str(), row.count, row.revenue)).collect();
    assert_eq!(zones, vec![("A", 5, 100.0), ("B", 10, 50.0), ("C", 3, 0.0)]);
    assert_eq!(view.monthly.len(), 2);
    assert!(view.monthly[1].is_projected);
    assert!(view.lead_sources.is_empty());

    let requests = server.received_requests().await.unwrap_or_default();
    let summary = requests
        .iter()
        .find(|r| r.url.path() == "/api/sales/summary")
        .expect("summary request");
    assert!(!summary.url.query().unwrap_or_default().contains("sold_by"));
    Ok(())
}

#[tokio::test]
async fn calls_without_session_do_not_reach_backend() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (context, _) = context_for(&server);
    let err = context.summary_view(&SummaryFilter::default()).await.unwrap_err();
    assert!(matches!(err, SalesDeskError::AuthRejected(_)));

    let switched = context.switch_record(9).await;
    assert!(matches!(switched, SwitchOutcome::OpenEditor { record_id: 9, .. }));
    Ok(())
}

#[tokio::test]
async fn logout_clears_session_and_detail_view() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    mount_login(&server).await;
    let (context, store) = context_for(&server);

    context.login(PASSCODE).await?;
    assert!(salesdesk_core::CredentialStore::load(store.as_ref())?.is_some());

    context.logout();
    assert!(!context.session().is_authenticated());
    assert!(context.history().current().is_none());
    assert!(salesdesk_core::CredentialStore::load(store.as_ref())?.is_none());
    Ok(())
}
