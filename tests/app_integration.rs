use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use brlfx::core::CombinedRow;
use brlfx::providers::BmfProvider;
use brlfx::server::{AppState, router};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use tracing::{error, info};

mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const ENDPOINT: &str = "/pages/portal/bmfbovespa/lumis/lum-taxas-referenciais-bmf-ptBR.asp";

    /// Renders a pretty-printed, Latin-1 encoded page like the portal's.
    pub fn rate_page(rows: &[(u32, &str)]) -> Vec<u8> {
        let mut html = String::from(
            "<html>\n<head><title>Taxas Referenciais</title></head>\n<body>\n  <table id=\"tb_principal1\">\n    <thead>\n      <tr>\n        <th>Dias Corridos</th>\n        <th>Cota\u{e7}\u{e3}o</th>\n      </tr>\n    </thead>\n    <tbody>\n",
        );
        for (day, rate) in rows {
            html.push_str(&format!(
                "      <tr>\n        <td class=\"\">{day}</td>\n        <td class=\"text-right\">\n          {rate}\n        </td>\n      </tr>\n"
            ));
        }
        html.push_str("    </tbody>\n  </table>\n</body>\n</html>\n");
        html.chars().map(|c| c as u32 as u8).collect()
    }

    pub async fn mount_rate_page(server: &MockServer, tax: &str, body: Vec<u8>) {
        Mock::given(method("GET"))
            .and(path(ENDPOINT))
            .and(query_param("Data", "03/06/2024"))
            .and(query_param("Data1", "20240603"))
            .and(query_param("slcTaxa", tax))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("content-type", "text/html; charset=iso-8859-1")
                    .set_body_bytes(body),
            )
            .mount(server)
            .await;
    }
}

fn june_2024() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()
}

fn app_for(base_url: &str) -> axum::Router {
    let provider = BmfProvider::new(base_url, Duration::from_secs(5)).unwrap();
    router(Arc::new(AppState {
        provider: Arc::new(provider),
        horizon_months: 12,
        today: june_2024,
    }))
}

async fn get_root(app: axum::Router) -> (StatusCode, String) {
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_rate_page(
        &mock_server,
        "PTX",
        test_utils::rate_page(&[(1, "5,2010"), (29, "5,2290"), (400, "5,9000")]),
    )
    .await;
    test_utils::mount_rate_page(
        &mock_server,
        "EUR",
        test_utils::rate_page(&[(1, "R$ 5,6000"), (29, "5,6310"), (400, "6,4000")]),
    )
    .await;

    let (status, body) = get_root(app_for(&mock_server.uri())).await;
    info!(%body, "Received dataset");
    assert_eq!(status, StatusCode::OK);

    // keys keep insertion order
    assert!(body.starts_with(
        r#"[{"days":1,"usd_brl":5.201,"eur_brl":5.6,"date_retroactive":"2024-06-03","month_year":"2024-06"}"#
    ));

    let rows: Vec<CombinedRow> = serde_json::from_str(&body).unwrap();
    assert_eq!(rows.len(), 2, "day 400 is past the 2025-06 horizon");
    assert_eq!(rows[1].days, 29);
    assert_eq!(rows[1].usd_brl, 5.229);
    assert_eq!(rows[1].eur_brl, 5.631);
    assert_eq!(rows[1].month_year, "2024-07");
}

#[test_log::test(tokio::test)]
async fn test_upstream_failure_returns_bad_gateway() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_rate_page(
        &mock_server,
        "PTX",
        test_utils::rate_page(&[(1, "5,2010")]),
    )
    .await;
    // no EUR page mounted: wiremock answers 404

    let (status, body) = get_root(app_for(&mock_server.uri())).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"].as_str().unwrap().starts_with("Network error"));
}

#[test_log::test(tokio::test)]
async fn test_uneven_series_returns_bad_gateway() {
    let mock_server = wiremock::MockServer::start().await;
    test_utils::mount_rate_page(
        &mock_server,
        "PTX",
        test_utils::rate_page(&[(1, "5,2010"), (2, "5,2020")]),
    )
    .await;
    test_utils::mount_rate_page(
        &mock_server,
        "EUR",
        test_utils::rate_page(&[(1, "5,6000")]),
    )
    .await;

    let (status, body) = get_root(app_for(&mock_server.uri())).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("Series length mismatch: 2 USD rows but 1 EUR rows"));
}

#[test_log::test(tokio::test)]
#[ignore = "hits the live B3 portal"]
async fn test_real_bmf_portal() {
    use brlfx::core::config::DEFAULT_BMF_BASE_URL;

    let provider = BmfProvider::new(DEFAULT_BMF_BASE_URL, Duration::from_secs(30)).unwrap();
    let today = chrono::Local::now().date_naive();

    match brlfx::pipeline::build_dataset(&provider, today, 12).await {
        Ok(rows) => {
            info!(rows = rows.len(), "Received live dataset");
            assert!(!rows.is_empty(), "Live dataset should not be empty");
            assert!(rows.iter().all(|r| r.usd_brl > 0.0 && r.eur_brl > 0.0));
        }
        Err(e) => {
            error!("Live portal request failed: {e}\n{e:?}");
            panic!("Live portal request failed: {e}");
        }
    }
}
