#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    routing::any,
    Router,
};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc, Mutex};
use tempfile::TempDir;

pub const DG_ROOT: &str = "/config/devices/entry[@name='localhost.localdomain']/device-group";
pub const API_KEY: &str = "LUFRPT-test-key";
pub const CSV_HEADER: &str = "object_name,object_type,src_scope,dst_scope\n";

pub fn dg_entry(dg: &str, node: &str, name: &str) -> String {
    format!("{}/entry[@name='{}']/{}/entry[@name='{}']", DG_ROOT, dg, node, name)
}

pub fn shared_entry(node: &str, name: &str) -> String {
    format!("/config/shared/{}/entry[@name='{}']", node, name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCall {
    pub action: String,
    pub xpath: String,
    pub element: Option<String>,
    pub key: Option<String>,
}

#[derive(Default)]
struct ApiState {
    entries: HashMap<String, String>,
    calls: Vec<ApiCall>,
    failing: HashSet<(String, String)>,
}

/// Minimal stand-in for the Panorama XML API `type=config` calls, served by
/// axum on a background runtime.
#[derive(Clone)]
pub struct FakePanorama {
    state: Arc<Mutex<ApiState>>,
    pub base_url: String,
}

impl FakePanorama {
    pub fn start() -> Self {
        let state: Arc<Mutex<ApiState>> = Arc::default();
        let app = Router::new()
            .route("/api/", any(api_handler))
            .with_state(Arc::clone(&state));

        let (addr_tx, addr_rx) = mpsc::channel();
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("fake api runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind fake api");
                addr_tx
                    .send(listener.local_addr().expect("local addr"))
                    .expect("report fake api address");
                axum::serve(listener, app).await.expect("serve fake api");
            });
        });
        let addr = addr_rx.recv().expect("fake api address");

        Self {
            state,
            base_url: format!("http://{}", addr),
        }
    }

    pub fn put(&self, xpath: &str, entry_xml: &str) {
        self.lock()
            .entries
            .insert(xpath.to_string(), entry_xml.to_string());
    }

    pub fn fail(&self, action: &str, xpath: &str) {
        self.lock()
            .failing
            .insert((action.to_string(), xpath.to_string()));
    }

    pub fn entry(&self, xpath: &str) -> Option<String> {
        self.lock().entries.get(xpath).cloned()
    }

    pub fn has(&self, xpath: &str) -> bool {
        self.entry(xpath).is_some()
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    pub fn mutations(&self) -> Vec<ApiCall> {
        self.calls()
            .into_iter()
            .filter(|c| c.action != "get")
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ApiState> {
        self.state.lock().expect("fake api state")
    }
}

async fn api_handler(
    State(state): State<Arc<Mutex<ApiState>>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
    let key = headers
        .get("x-pan-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let (status, body) = respond(&state, &params, key);
    (status, [(header::CONTENT_TYPE, "application/xml")], body)
}

fn respond(
    state: &Mutex<ApiState>,
    params: &HashMap<String, String>,
    key: Option<String>,
) -> (StatusCode, String) {
    let mut st = state.lock().expect("fake api state");
    let action = params.get("action").cloned().unwrap_or_default();
    let xpath = params.get("xpath").cloned().unwrap_or_default();
    let element = params.get("element").cloned();
    st.calls.push(ApiCall {
        action: action.clone(),
        xpath: xpath.clone(),
        element: element.clone(),
        key,
    });

    if st.failing.contains(&(action.clone(), xpath.clone())) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            "<response status=\"error\"><msg>injected failure</msg></response>".to_string(),
        );
    }

    match action.as_str() {
        "get" => match st.entries.get(&xpath) {
            Some(xml) => (
                StatusCode::OK,
                format!(
                    "<response status=\"success\" code=\"19\"><result total-count=\"1\" count=\"1\">{}</result></response>",
                    xml
                ),
            ),
            None => (
                StatusCode::OK,
                "<response status=\"success\" code=\"7\"><result total-count=\"0\" count=\"0\"/></response>"
                    .to_string(),
            ),
        },
        "set" => {
            let element = element.unwrap_or_default();
            let name = attr_name(&element);
            st.entries
                .insert(format!("{}/entry[@name='{}']", xpath, name), element);
            (
                StatusCode::OK,
                "<response status=\"success\" code=\"20\"><msg>command succeeded</msg></response>"
                    .to_string(),
            )
        }
        "delete" => {
            st.entries.remove(&xpath);
            (
                StatusCode::OK,
                "<response status=\"success\" code=\"20\"><msg>command succeeded</msg></response>"
                    .to_string(),
            )
        }
        _ => (
            StatusCode::OK,
            "<response status=\"error\" code=\"400\"><msg>bad action</msg></response>".to_string(),
        ),
    }
}

fn attr_name(element: &str) -> String {
    element
        .split_once("name=\"")
        .and_then(|(_, rest)| rest.split_once('"'))
        .map(|(name, _)| name.to_string())
        .unwrap_or_default()
}

pub struct TestEnv {
    _tmp: TempDir,
    pub dir: PathBuf,
    pub api: FakePanorama,
}

impl TestEnv {
    pub fn new() -> Self {
        let tmp = TempDir::new().expect("create temp dir");
        let dir = tmp.path().to_path_buf();
        let api = FakePanorama::start();
        fs::write(
            dir.join("panw.cfg"),
            format!(
                "# test panorama\npanorama_ip={}\napi_key={}\n",
                api.base_url, API_KEY
            ),
        )
        .expect("write panw.cfg");
        Self {
            _tmp: tmp,
            dir,
            api,
        }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("dgmove");
        cmd.current_dir(&self.dir)
            .env_remove("MOVE_COLLISION")
            .env_remove("RUST_LOG")
            .env_remove("HTTP_PROXY")
            .env_remove("http_proxy")
            .env_remove("HTTPS_PROXY")
            .env_remove("https_proxy")
            .env_remove("ALL_PROXY")
            .env_remove("all_proxy")
            .env("NO_PROXY", "127.0.0.1,localhost");
        cmd
    }

    pub fn write_input(&self, rows: &[&str]) -> PathBuf {
        let path = self.dir.join("objects.csv");
        let mut body = CSV_HEADER.to_string();
        for r in rows {
            body.push_str(r);
            body.push('\n');
        }
        fs::write(&path, body).expect("write objects.csv");
        path
    }

    pub fn log_dir(&self) -> PathBuf {
        self.dir.join("logs")
    }

    pub fn audit_files(&self) -> Vec<PathBuf> {
        match fs::read_dir(self.log_dir()) {
            Ok(rd) => rd
                .flatten()
                .map(|e| e.path())
                .filter(|p| p.extension().map(|x| x == "csv").unwrap_or(false))
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn audit_rows(&self) -> Vec<HashMap<String, String>> {
        let files = self.audit_files();
        assert_eq!(files.len(), 1, "exactly one audit file expected");
        read_audit(&files[0])
    }
}

pub fn read_audit(path: &Path) -> Vec<HashMap<String, String>> {
    let mut reader = csv::Reader::from_path(path).expect("open audit csv");
    reader
        .deserialize()
        .map(|r| r.expect("audit row"))
        .collect()
}
