use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct HabitRow {
    id: String,
    name: String,
    checks: Vec<bool>,
    done: u32,
    weekly_goal: u8,
}

#[derive(Debug, Deserialize)]
struct Overall {
    done: u32,
    total: u32,
}

#[derive(Debug, Deserialize)]
struct MonthView {
    year: i32,
    month: u32,
    month_key: String,
    days_in_month: u32,
    habits: Vec<HabitRow>,
    overall: Overall,
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
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
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

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("habit_tracker_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/month")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_habit_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn month(client: &Client, server: &TestServer) -> MonthView {
    client
        .get(format!("{}/api/month", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn export(client: &Client, server: &TestServer) -> Value {
    client
        .get(format!("{}/api/export", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn set_check(
    client: &Client,
    server: &TestServer,
    habit_id: &str,
    day: u32,
    done: bool,
) -> MonthView {
    let response = client
        .post(format!("{}/api/checks", server.base_url))
        .json(&json!({ "habit_id": habit_id, "day": day, "done": done }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    response.json().await.unwrap()
}

#[tokio::test]
async fn http_check_updates_month_view() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = month(&client, &server).await;
    assert!(!before.habits.is_empty());
    assert_eq!(before.habits[0].checks.len() as u32, before.days_in_month);
    let id = before.habits[0].id.clone();
    let was_done = before.habits[0].checks[0];

    let after = set_check(&client, &server, &id, 1, !was_done).await;
    assert_eq!(after.habits[0].checks[0], !was_done);
    let expected_done = if was_done {
        before.habits[0].done - 1
    } else {
        before.habits[0].done + 1
    };
    assert_eq!(after.habits[0].done, expected_done);
    assert_eq!(after.overall.total, before.overall.total);

    let restored = set_check(&client, &server, &id, 1, was_done).await;
    assert_eq!(restored.overall.done, before.overall.done);
}

#[tokio::test]
async fn http_unknown_habit_is_not_found() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/checks", server.base_url))
        .json(&json!({ "habit_id": "no-such-habit", "day": 1, "done": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn http_import_rejects_invalid_document() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = export(&client, &server).await;
    let response = client
        .post(format!("{}/api/import", server.base_url))
        .body(r#"{"foo": 1}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!response.text().await.unwrap().is_empty());

    let after = export(&client, &server).await;
    assert_eq!(before, after);
}

#[tokio::test]
async fn http_export_import_round_trip() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/export", server.base_url))
        .send()
        .await
        .unwrap();
    let view = month(&client, &server).await;
    let disposition = response.headers()["content-disposition"].to_str().unwrap().to_string();
    assert!(disposition.contains(&format!("habit-tracker-{}.json", view.month_key)));
    let exported: Value = response.json().await.unwrap();

    let response = client
        .post(format!("{}/api/import", server.base_url))
        .body(exported.to_string())
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let reimported = export(&client, &server).await;
    assert_eq!(reimported["habits"], exported["habits"]);
    assert_eq!(reimported["checks"], exported["checks"]);
}

#[tokio::test]
async fn http_delete_keeps_history() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let added: MonthView = client
        .post(format!("{}/api/habits", server.base_url))
        .json(&json!({ "name": "Stretch", "icon": "🧘", "weekly_goal": 3 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let habit = added.habits.last().unwrap();
    assert_eq!(habit.name, "Stretch");
    assert_eq!(habit.weekly_goal, 3);
    let id = habit.id.clone();
    set_check(&client, &server, &id, 2, true).await;

    let response = client
        .delete(format!("{}/api/habits/{id}", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let after: MonthView = response.json().await.unwrap();
    assert!(after.habits.iter().all(|h| h.id != id));

    let state = export(&client, &server).await;
    let key = format!("{}-{:02}", after.year, after.month + 1);
    assert_eq!(state["checks"][key.as_str()][id.as_str()]["2"], json!(true));
}

#[tokio::test]
async fn http_empty_name_edit_is_discarded() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = month(&client, &server).await;
    let habit = &before.habits[0];
    let response = client
        .put(format!("{}/api/habits/{}", server.base_url, habit.id))
        .json(&json!({ "name": "   ", "icon": "x" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let after = month(&client, &server).await;
    assert_eq!(after.habits[0].name, habit.name);

    let response = client
        .post(format!("{}/api/habits", server.base_url))
        .json(&json!({ "name": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
