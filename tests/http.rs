use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

const FIXTURE_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/marketing.json");

#[derive(Debug, Deserialize)]
struct StatusResponse {
    state: String,
    message: Option<String>,
    campaigns: usize,
}

#[derive(Debug, Deserialize)]
struct Card {
    title: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct ChartPoint {
    label: String,
    value: f64,
}

#[derive(Debug, Deserialize)]
struct Row {
    gender: String,
    age_group: String,
    clicks: u64,
    ctr: f64,
    conversion_rate: f64,
    roas: f64,
    revenue: f64,
}

#[derive(Debug, Deserialize)]
struct Report {
    spend_by_age: Vec<ChartPoint>,
    rows: Vec<Row>,
}

#[derive(Debug, Deserialize)]
struct Sort {
    key: String,
    direction: String,
}

#[derive(Debug, Deserialize)]
struct DemographicsResponse {
    cards: Vec<Card>,
    report: Report,
    sort: Option<Sort>,
}

#[derive(Debug, Deserialize)]
struct Company {
    name: String,
    founded: String,
}

#[derive(Debug, Deserialize)]
struct OverviewResponse {
    company: Company,
    key_metrics: Vec<Card>,
    insights: Option<Vec<Card>>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::Mutex;
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PIDS: Mutex<Vec<i32>> = Mutex::new(Vec::new());

    pub fn register(pid: u32) {
        if let Ok(mut pids) = PIDS.lock() {
            pids.push(pid as i32);
        }
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
    }

    extern "C" fn on_exit() {
        if let Ok(pids) = PIDS.lock() {
            for pid in pids.iter().copied().filter(|pid| *pid > 0) {
                unsafe {
                    libc::kill(pid, libc::SIGTERM);
                }
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn missing_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("marketing_missing_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_settled(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/status")).send().await {
            if let Ok(status) = resp.json::<StatusResponse>().await {
                if status.state != "loading" {
                    return;
                }
            }
        }
        if Instant::now() > deadline {
            panic!("server did not finish loading");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server(data_path: &str) -> TestServer {
    let port = pick_free_port();
    let child = Command::new(env!("CARGO_BIN_EXE_marketing_dashboard"))
        .env("PORT", port.to_string())
        .env("MARKETING_DATA_PATH", data_path)
        .env_remove("MARKETING_DATA_URL")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_settled(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server(FIXTURE_PATH).await);
    *guard = Some(Arc::clone(&server));
    server
}

#[tokio::test]
async fn http_status_reports_loaded_campaigns() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let status: StatusResponse = Client::new()
        .get(format!("{}/api/status", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(status.state, "ready");
    assert_eq!(status.campaigns, 3);
    assert!(status.message.is_none());
}

#[tokio::test]
async fn http_demographics_default_sort() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let body: DemographicsResponse = Client::new()
        .get(format!("{}/api/demographics?sort=revenue&dir=desc", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let sort = body.sort.expect("requested sort is reported");
    assert_eq!(sort.key, "revenue");
    assert_eq!(sort.direction, "desc");
    assert_eq!(body.report.rows.len(), 4);

    let top = &body.report.rows[0];
    assert_eq!((top.gender.as_str(), top.age_group.as_str()), ("Male", "25-34"));
    assert_eq!(top.ctr, 5.0);
    assert_eq!(top.conversion_rate, 20.0);
    assert_eq!(top.roas, 2.0);
    assert!((top.revenue - 200.0).abs() < 1e-9);

    let last = &body.report.rows[3];
    assert_eq!(last.age_group, "65+");
    assert_eq!(last.revenue, 0.0);

    let labels: Vec<&str> = body
        .report
        .spend_by_age
        .iter()
        .map(|point| point.label.as_str())
        .collect();
    assert_eq!(labels, vec!["18-24", "25-34"]);
    assert!((body.report.spend_by_age[0].value - 100.0).abs() < 1e-9);

    assert_eq!(body.cards.len(), 6);
    assert_eq!(body.cards[0].title, "Male Clicks");
    assert_eq!(body.cards[0].value, "120");
    assert_eq!(body.cards[3].value, "30");
}

#[tokio::test]
async fn http_demographics_display_order_without_query() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let body: DemographicsResponse = Client::new()
        .get(format!("{}/api/demographics", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let order: Vec<(&str, &str)> = body
        .report
        .rows
        .iter()
        .map(|row| (row.gender.as_str(), row.age_group.as_str()))
        .collect();
    assert_eq!(
        order,
        vec![
            ("Male", "18-24"),
            ("Male", "25-34"),
            ("Female", "18-24"),
            ("Female", "65+"),
        ]
    );
    assert_eq!(body.report.rows[0].clicks, 70);
    assert!(body.sort.is_none());
}

#[tokio::test]
async fn http_marketing_passes_document_through() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let body: serde_json::Value = Client::new()
        .get(format!("{}/api/marketing", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let fixture: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(FIXTURE_PATH).unwrap()).unwrap();
    assert_eq!(body, fixture);
    assert_eq!(body["company_info"]["name"], "Fixture Co");
    assert_eq!(body["campaigns"][0]["name"], "Alpha");
}

#[tokio::test]
async fn http_refresh_reloads_document() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let status: StatusResponse = Client::new()
        .post(format!("{}/api/refresh", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(status.state, "ready");
    assert_eq!(status.campaigns, 3);
    assert!(status.message.is_none());
}

#[tokio::test]
async fn http_demographics_rejects_unknown_sort() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let response = Client::new()
        .get(format!("{}/api/demographics?sort=budget", server.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.text().await.unwrap().contains("budget"));
}

#[tokio::test]
async fn http_overview_and_pages() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let overview: OverviewResponse = client
        .get(format!("{}/api/overview", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(overview.company.name, "Fixture Co");
    assert_eq!(overview.company.founded, "2020");
    assert_eq!(overview.key_metrics[1].value, "$1,234,567");
    assert_eq!(overview.key_metrics[2].value, "2.5x");
    assert!(overview.insights.is_none());

    let index = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(index.contains("Fixture Co"));

    let page = client
        .get(format!("{}/demographic-view", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(page.status().is_success());
    assert!(page.text().await.unwrap().contains("Demographic Performance"));
}

#[tokio::test]
async fn http_missing_data_surfaces_error() {
    let _guard = TEST_LOCK.lock().await;
    let server = spawn_server(&missing_data_path()).await;
    let client = Client::new();

    let status: StatusResponse = client
        .get(format!("{}/api/status", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status.state, "error");
    assert!(status.message.unwrap().contains("failed to read"));

    let response = client
        .get(format!("{}/api/demographics", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(response.text().await.unwrap().contains("marketing_missing_"));

    let page = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(page.status().is_success());
}
