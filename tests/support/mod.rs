//! In-process W3C WebDriver remote end for integration tests.
//!
//! The facade tests point a real `thirtyfour` client at a [`MockServer`]
//! instead of a browser. The server keeps a small page model - elements
//! matched by their exact XPath string, windows, an optional alert - and
//! answers in the W3C JSON envelope a driver would. Tests stage the page
//! and inspect what the client did through a [`MockHandle`].
//!
//! Element matching is literal: a lookup finds the mock elements whose
//! registered XPath equals the requested selector string. Child lookups
//! (dropdown options) return every element registered with the queried
//! element as parent, regardless of the relative expression.

#![allow(dead_code)]

// ============================================================================
// Imports
// ============================================================================

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Once};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use thirtyfour::{DesiredCapabilities, WebDriver};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use uuid::Uuid;

use pagekit::Page;

// ============================================================================
// Constants
// ============================================================================

/// W3C element reference key.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

// ============================================================================
// Tracing
// ============================================================================

static TRACING: Once = Once::new();

/// Installs the env-filtered test subscriber once per test binary.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Fixtures
// ============================================================================

/// Connects a real `thirtyfour` client to the mock server.
pub async fn connect(server: &MockServer) -> WebDriver {
    let caps = DesiredCapabilities::chrome();
    WebDriver::new(&server.url(), caps)
        .await
        .expect("connect to mock server")
}

/// Starts a mock server and hands back a facade over a fresh client session.
pub async fn mock_page() -> (MockServer, Page) {
    init_tracing();
    let server = MockServer::start().await;
    let driver = connect(&server).await;
    (server, Page::new(driver))
}

// ============================================================================
// MockElement
// ============================================================================

/// One element in the mock page, with the interaction counters tests assert
/// against.
#[derive(Debug, Clone)]
pub struct MockElement {
    pub id: String,
    pub xpath: String,
    pub tag: String,
    pub parent: Option<String>,
    pub text: String,
    /// Everything sent via the element value endpoint, in order.
    pub typed: String,
    pub attrs: HashMap<String, String>,
    pub displayed: bool,
    pub enabled: bool,
    pub selected: bool,
    pub clicks: usize,
    pub clears: usize,
}

impl MockElement {
    /// Creates a visible, enabled element answering to `xpath`.
    pub fn new(xpath: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            xpath: xpath.into(),
            tag: "div".to_string(),
            parent: None,
            text: String::new(),
            typed: String::new(),
            attrs: HashMap::new(),
            displayed: true,
            enabled: true,
            selected: false,
            clicks: 0,
            clears: 0,
        }
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.tag = tag.to_string();
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    /// Stages a computed CSS value, served by the css endpoint.
    pub fn css(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(format!("css:{name}"), value.to_string());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    pub fn child_of(mut self, parent_id: &str) -> Self {
        self.parent = Some(parent_id.to_string());
        self
    }
}

// ============================================================================
// Page Model
// ============================================================================

#[derive(Debug, Clone)]
struct MockWindow {
    handle: String,
    title: String,
}

/// Everything the remote end knows about the fake browser.
struct PageModel {
    elements: Vec<MockElement>,
    windows: Vec<MockWindow>,
    focused: Option<String>,
    url: String,
    source: String,
    inner_text: String,
    ready_state: String,
    /// `None` means the page has no jQuery at all.
    jquery_active: Option<u64>,
    script_result: Value,
    scripts: Vec<String>,
    scroll_calls: usize,
    action_batches: usize,
    frame_stack: Vec<String>,
    alert: Option<String>,
    alert_log: Vec<String>,
    prompt_input: Option<String>,
    cookies: Vec<Value>,
    implicit_waits: Vec<u64>,
    maximize_calls: usize,
    navigations: Vec<String>,
    click_shows: HashMap<String, Vec<String>>,
    delete_cookie_calls: usize,
}

impl PageModel {
    fn new() -> Self {
        let main = MockWindow {
            handle: Uuid::new_v4().to_string(),
            title: "Mock Page".to_string(),
        };
        Self {
            elements: Vec::new(),
            focused: Some(main.handle.clone()),
            windows: vec![main],
            url: "about:blank".to_string(),
            source: "<html><body></body></html>".to_string(),
            inner_text: String::new(),
            ready_state: "complete".to_string(),
            jquery_active: None,
            script_result: Value::Null,
            scripts: Vec::new(),
            scroll_calls: 0,
            action_batches: 0,
            frame_stack: Vec::new(),
            alert: None,
            alert_log: Vec::new(),
            prompt_input: None,
            cookies: Vec::new(),
            implicit_waits: Vec::new(),
            maximize_calls: 0,
            navigations: Vec::new(),
            click_shows: HashMap::new(),
            delete_cookie_calls: 0,
        }
    }

    /// Click bookkeeping shared by the pointer and script click paths.
    ///
    /// Inputs and options toggle their selected state the way real form
    /// controls do, and any elements staged behind this one become visible.
    fn apply_click(&mut self, element_id: &str) -> bool {
        let Some(idx) = self.elements.iter().position(|e| e.id == element_id) else {
            return false;
        };
        self.elements[idx].clicks += 1;
        if matches!(self.elements[idx].tag.as_str(), "input" | "option") {
            self.elements[idx].selected = !self.elements[idx].selected;
        }

        let xpath = self.elements[idx].xpath.clone();
        if let Some(revealed) = self.click_shows.get(&xpath).cloned() {
            for target in revealed {
                for element in self.elements.iter_mut().filter(|e| e.xpath == target) {
                    element.displayed = true;
                }
            }
        }
        true
    }
}

// ============================================================================
// Server State
// ============================================================================

struct MockState {
    page: Mutex<PageModel>,
    refuse_sessions: AtomicBool,
    fail_next_navigation: AtomicBool,
    session_deleted: AtomicBool,
}

// ============================================================================
// MockHandle
// ============================================================================

/// Cloneable handle for staging and inspecting the mock page.
///
/// Clones share state with the running server, so a test can hand one to a
/// spawned task that mutates the page while a facade wait is polling.
#[derive(Clone)]
pub struct MockHandle {
    state: Arc<MockState>,
}

impl MockHandle {
    // ------------------------------------------------------------------------
    // Staging
    // ------------------------------------------------------------------------

    /// Adds an element to the page and returns its id.
    pub fn add(&self, element: MockElement) -> String {
        let id = element.id.clone();
        self.page().elements.push(element);
        id
    }

    /// Removes every element answering to `xpath`.
    pub fn remove(&self, xpath: &str) {
        self.page().elements.retain(|e| e.xpath != xpath);
    }

    pub fn set_displayed(&self, xpath: &str, displayed: bool) {
        for element in self.page().elements.iter_mut().filter(|e| e.xpath == xpath) {
            element.displayed = displayed;
        }
    }

    pub fn set_enabled(&self, xpath: &str, enabled: bool) {
        for element in self.page().elements.iter_mut().filter(|e| e.xpath == xpath) {
            element.enabled = enabled;
        }
    }

    /// Stages elements at `revealed` to become visible when `clicked` is
    /// clicked.
    pub fn reveal_on_click(&self, clicked: &str, revealed: &str) {
        self.page()
            .click_shows
            .entry(clicked.to_string())
            .or_default()
            .push(revealed.to_string());
    }

    /// Opens another window and returns its handle.
    pub fn add_window(&self, title: &str) -> String {
        let window = MockWindow {
            handle: Uuid::new_v4().to_string(),
            title: title.to_string(),
        };
        let handle = window.handle.clone();
        self.page().windows.push(window);
        handle
    }

    pub fn open_alert(&self, text: &str) {
        self.page().alert = Some(text.to_string());
    }

    pub fn set_source(&self, html: &str) {
        self.page().source = html.to_string();
    }

    pub fn set_inner_text(&self, text: &str) {
        self.page().inner_text = text.to_string();
    }

    pub fn set_ready_state(&self, state: &str) {
        self.page().ready_state = state.to_string();
    }

    /// Sets the number of in-flight jQuery requests; `None` removes jQuery
    /// from the page entirely.
    pub fn set_jquery_active(&self, active: Option<u64>) {
        self.page().jquery_active = active;
    }

    /// Sets the value returned for scripts the model does not recognize.
    pub fn set_script_result(&self, value: Value) {
        self.page().script_result = value;
    }

    /// Makes session creation fail with `session not created`.
    pub fn refuse_sessions(&self) {
        self.state.refuse_sessions.store(true, Ordering::SeqCst);
    }

    /// Makes the next navigation command fail with `unknown error`.
    pub fn fail_next_navigation(&self) {
        self.state.fail_next_navigation.store(true, Ordering::SeqCst);
    }

    // ------------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------------

    /// Snapshot of the first element answering to `xpath`.
    pub fn element(&self, xpath: &str) -> Option<MockElement> {
        self.page().elements.iter().find(|e| e.xpath == xpath).cloned()
    }

    /// Snapshots of every element answering to `xpath`.
    pub fn elements(&self, xpath: &str) -> Vec<MockElement> {
        self.page()
            .elements
            .iter()
            .filter(|e| e.xpath == xpath)
            .cloned()
            .collect()
    }

    pub fn focused_window(&self) -> Option<String> {
        self.page().focused.clone()
    }

    pub fn window_handles(&self) -> Vec<String> {
        self.page().windows.iter().map(|w| w.handle.clone()).collect()
    }

    pub fn alert_open(&self) -> bool {
        self.page().alert.is_some()
    }

    /// Accepted/dismissed outcomes, in order.
    pub fn alert_log(&self) -> Vec<String> {
        self.page().alert_log.clone()
    }

    pub fn prompt_input(&self) -> Option<String> {
        self.page().prompt_input.clone()
    }

    pub fn cookies(&self) -> Vec<Value> {
        self.page().cookies.clone()
    }

    /// Every implicit-wait value the client set, in order, in milliseconds.
    pub fn implicit_waits(&self) -> Vec<u64> {
        self.page().implicit_waits.clone()
    }

    pub fn maximize_calls(&self) -> usize {
        self.page().maximize_calls
    }

    /// Navigation commands received, in order (`goto <url>`, `back`, ...).
    pub fn navigations(&self) -> Vec<String> {
        self.page().navigations.clone()
    }

    pub fn scripts(&self) -> Vec<String> {
        self.page().scripts.clone()
    }

    pub fn scroll_calls(&self) -> usize {
        self.page().scroll_calls
    }

    pub fn action_batches(&self) -> usize {
        self.page().action_batches
    }

    pub fn frame_depth(&self) -> usize {
        self.page().frame_stack.len()
    }

    pub fn current_url(&self) -> String {
        self.page().url.clone()
    }

    pub fn delete_cookie_calls(&self) -> usize {
        self.page().delete_cookie_calls
    }

    pub fn session_deleted(&self) -> bool {
        self.state.session_deleted.load(Ordering::SeqCst)
    }

    fn page(&self) -> std::sync::MutexGuard<'_, PageModel> {
        self.state.page.lock().unwrap()
    }
}

// ============================================================================
// MockServer
// ============================================================================

/// An axum server speaking just enough W3C WebDriver for the facade.
pub struct MockServer {
    addr: SocketAddr,
    state: Arc<MockState>,
    server: JoinHandle<()>,
}

impl MockServer {
    /// Binds an ephemeral port and starts serving.
    pub async fn start() -> Self {
        let state = Arc::new(MockState {
            page: Mutex::new(PageModel::new()),
            refuse_sessions: AtomicBool::new(false),
            fail_next_navigation: AtomicBool::new(false),
            session_deleted: AtomicBool::new(false),
        });

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock server");
        let addr = listener.local_addr().expect("mock server addr");

        let router = router(state.clone());
        let server = tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve mock server");
        });

        Self { addr, state, server }
    }

    /// Base URL clients connect to.
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Handle for staging and inspecting the page.
    pub fn handle(&self) -> MockHandle {
        MockHandle {
            state: self.state.clone(),
        }
    }

    /// Kills the server, leaving the port dead for every later request.
    pub fn shutdown(&self) {
        self.server.abort();
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.server.abort();
    }
}

// ============================================================================
// Router
// ============================================================================

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        // Session
        .route("/session", post(create_session))
        .route("/session/{sid}", delete(delete_session))
        .route("/session/{sid}/timeouts", post(set_timeouts))
        // Navigation
        .route("/session/{sid}/url", get(get_url).post(navigate))
        .route("/session/{sid}/back", post(back))
        .route("/session/{sid}/forward", post(forward))
        .route("/session/{sid}/refresh", post(refresh))
        .route("/session/{sid}/title", get(get_title))
        .route("/session/{sid}/source", get(get_source))
        // Windows and frames
        .route(
            "/session/{sid}/window",
            get(get_window).post(switch_window).delete(close_window),
        )
        .route("/session/{sid}/window/handles", get(get_window_handles))
        .route("/session/{sid}/window/maximize", post(maximize_window))
        .route("/session/{sid}/frame", post(switch_frame))
        .route("/session/{sid}/frame/parent", post(switch_parent_frame))
        // Elements
        .route("/session/{sid}/element", post(find_element))
        .route("/session/{sid}/elements", post(find_elements))
        .route("/session/{sid}/element/{eid}/elements", post(find_child_elements))
        .route("/session/{sid}/element/{eid}/click", post(element_click))
        .route("/session/{sid}/element/{eid}/clear", post(element_clear))
        .route("/session/{sid}/element/{eid}/value", post(element_send_keys))
        .route("/session/{sid}/element/{eid}/text", get(element_text))
        .route(
            "/session/{sid}/element/{eid}/attribute/{name}",
            get(element_attribute),
        )
        .route("/session/{sid}/element/{eid}/css/{name}", get(element_css_value))
        .route("/session/{sid}/element/{eid}/displayed", get(element_displayed))
        .route("/session/{sid}/element/{eid}/enabled", get(element_enabled))
        .route("/session/{sid}/element/{eid}/selected", get(element_selected))
        // Script
        .route("/session/{sid}/execute/sync", post(execute_sync))
        // Cookies
        .route(
            "/session/{sid}/cookie",
            get(get_cookies).post(add_cookie).delete(delete_cookies),
        )
        // Alerts
        .route(
            "/session/{sid}/alert/text",
            get(get_alert_text).post(send_alert_text),
        )
        .route("/session/{sid}/alert/accept", post(accept_alert))
        .route("/session/{sid}/alert/dismiss", post(dismiss_alert))
        // Actions
        .route(
            "/session/{sid}/actions",
            post(perform_actions).delete(release_actions),
        )
        .with_state(state)
}

// ============================================================================
// W3C Envelope
// ============================================================================

fn reply(value: Value) -> Response {
    Json(json!({ "value": value })).into_response()
}

fn fail(status: StatusCode, code: &str, message: &str) -> Response {
    let body = json!({
        "value": { "error": code, "message": message, "stacktrace": "" }
    });
    (status, Json(body)).into_response()
}

fn no_such_element(selector: &str) -> Response {
    fail(
        StatusCode::NOT_FOUND,
        "no such element",
        &format!("Unable to locate element: {selector}"),
    )
}

fn stale_element() -> Response {
    fail(
        StatusCode::NOT_FOUND,
        "stale element reference",
        "Element is no longer attached to the DOM",
    )
}

fn no_such_alert() -> Response {
    fail(StatusCode::NOT_FOUND, "no such alert", "No alert is open")
}

fn no_such_window() -> Response {
    fail(StatusCode::NOT_FOUND, "no such window", "No window is focused")
}

fn element_ref(id: &str) -> Value {
    json!({ ELEMENT_KEY: id })
}

/// Pulls the element id out of a W3C element reference object.
fn ref_id(value: &Value) -> Option<String> {
    value
        .get(ELEMENT_KEY)
        .and_then(Value::as_str)
        .map(str::to_string)
}

// ============================================================================
// Handlers - Session
// ============================================================================

async fn create_session(State(state): State<Arc<MockState>>) -> Response {
    if state.refuse_sessions.load(Ordering::SeqCst) {
        return fail(
            StatusCode::INTERNAL_SERVER_ERROR,
            "session not created",
            "the mock was told to refuse sessions",
        );
    }
    reply(json!({
        "sessionId": Uuid::new_v4().to_string(),
        "capabilities": { "browserName": "mock" }
    }))
}

async fn delete_session(State(state): State<Arc<MockState>>, Path(_sid): Path<String>) -> Response {
    state.session_deleted.store(true, Ordering::SeqCst);
    reply(Value::Null)
}

async fn set_timeouts(
    State(state): State<Arc<MockState>>,
    Path(_sid): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Some(implicit) = body.get("implicit").and_then(Value::as_u64) {
        state.page.lock().unwrap().implicit_waits.push(implicit);
    }
    reply(Value::Null)
}

// ============================================================================
// Handlers - Navigation
// ============================================================================

async fn navigate(
    State(state): State<Arc<MockState>>,
    Path(_sid): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if state.fail_next_navigation.swap(false, Ordering::SeqCst) {
        return fail(
            StatusCode::INTERNAL_SERVER_ERROR,
            "unknown error",
            "the mock was told to fail this navigation",
        );
    }
    let url = body.get("url").and_then(Value::as_str).unwrap_or_default();
    let mut page = state.page.lock().unwrap();
    page.url = url.to_string();
    page.navigations.push(format!("goto {url}"));
    reply(Value::Null)
}

async fn get_url(State(state): State<Arc<MockState>>, Path(_sid): Path<String>) -> Response {
    let url = state.page.lock().unwrap().url.clone();
    reply(json!(url))
}

async fn back(State(state): State<Arc<MockState>>, Path(_sid): Path<String>) -> Response {
    state.page.lock().unwrap().navigations.push("back".to_string());
    reply(Value::Null)
}

async fn forward(State(state): State<Arc<MockState>>, Path(_sid): Path<String>) -> Response {
    state.page.lock().unwrap().navigations.push("forward".to_string());
    reply(Value::Null)
}

async fn refresh(State(state): State<Arc<MockState>>, Path(_sid): Path<String>) -> Response {
    state.page.lock().unwrap().navigations.push("refresh".to_string());
    reply(Value::Null)
}

async fn get_title(State(state): State<Arc<MockState>>, Path(_sid): Path<String>) -> Response {
    let page = state.page.lock().unwrap();
    let Some(focused) = &page.focused else {
        return no_such_window();
    };
    match page.windows.iter().find(|w| &w.handle == focused) {
        Some(window) => reply(json!(window.title)),
        None => no_such_window(),
    }
}

async fn get_source(State(state): State<Arc<MockState>>, Path(_sid): Path<String>) -> Response {
    let source = state.page.lock().unwrap().source.clone();
    reply(json!(source))
}

// ============================================================================
// Handlers - Windows and Frames
// ============================================================================

async fn get_window(State(state): State<Arc<MockState>>, Path(_sid): Path<String>) -> Response {
    match &state.page.lock().unwrap().focused {
        Some(handle) => reply(json!(handle)),
        None => no_such_window(),
    }
}

async fn get_window_handles(
    State(state): State<Arc<MockState>>,
    Path(_sid): Path<String>,
) -> Response {
    let handles: Vec<String> = state
        .page
        .lock()
        .unwrap()
        .windows
        .iter()
        .map(|w| w.handle.clone())
        .collect();
    reply(json!(handles))
}

async fn switch_window(
    State(state): State<Arc<MockState>>,
    Path(_sid): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let handle = body.get("handle").and_then(Value::as_str).unwrap_or_default();
    let mut page = state.page.lock().unwrap();
    if page.windows.iter().any(|w| w.handle == handle) {
        page.focused = Some(handle.to_string());
        reply(Value::Null)
    } else {
        no_such_window()
    }
}

async fn close_window(State(state): State<Arc<MockState>>, Path(_sid): Path<String>) -> Response {
    let mut page = state.page.lock().unwrap();
    let Some(focused) = page.focused.take() else {
        return no_such_window();
    };
    page.windows.retain(|w| w.handle != focused);
    let remaining: Vec<String> = page.windows.iter().map(|w| w.handle.clone()).collect();
    reply(json!(remaining))
}

async fn maximize_window(State(state): State<Arc<MockState>>, Path(_sid): Path<String>) -> Response {
    state.page.lock().unwrap().maximize_calls += 1;
    reply(json!({ "x": 0, "y": 0, "width": 1920, "height": 1080 }))
}

async fn switch_frame(
    State(state): State<Arc<MockState>>,
    Path(_sid): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut page = state.page.lock().unwrap();
    match body.get("id") {
        Some(Value::Null) | None => {
            page.frame_stack.clear();
            reply(Value::Null)
        }
        Some(id) => match ref_id(id) {
            Some(element_id) if page.elements.iter().any(|e| e.id == element_id) => {
                page.frame_stack.push(element_id);
                reply(Value::Null)
            }
            _ => fail(
                StatusCode::NOT_FOUND,
                "no such frame",
                "Frame element not found",
            ),
        },
    }
}

async fn switch_parent_frame(
    State(state): State<Arc<MockState>>,
    Path(_sid): Path<String>,
) -> Response {
    state.page.lock().unwrap().frame_stack.pop();
    reply(Value::Null)
}

// ============================================================================
// Handlers - Elements
// ============================================================================

async fn find_element(
    State(state): State<Arc<MockState>>,
    Path(_sid): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let selector = body.get("value").and_then(Value::as_str).unwrap_or_default();
    let page = state.page.lock().unwrap();
    match page.elements.iter().find(|e| e.xpath == selector) {
        Some(element) => reply(element_ref(&element.id)),
        None => no_such_element(selector),
    }
}

async fn find_elements(
    State(state): State<Arc<MockState>>,
    Path(_sid): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let selector = body.get("value").and_then(Value::as_str).unwrap_or_default();
    let page = state.page.lock().unwrap();
    let refs: Vec<Value> = page
        .elements
        .iter()
        .filter(|e| e.xpath == selector)
        .map(|e| element_ref(&e.id))
        .collect();
    reply(json!(refs))
}

async fn find_child_elements(
    State(state): State<Arc<MockState>>,
    Path((_sid, eid)): Path<(String, String)>,
) -> Response {
    let page = state.page.lock().unwrap();
    if !page.elements.iter().any(|e| e.id == eid) {
        return stale_element();
    }
    let refs: Vec<Value> = page
        .elements
        .iter()
        .filter(|e| e.parent.as_deref() == Some(&eid))
        .map(|e| element_ref(&e.id))
        .collect();
    reply(json!(refs))
}

async fn element_click(
    State(state): State<Arc<MockState>>,
    Path((_sid, eid)): Path<(String, String)>,
) -> Response {
    if state.page.lock().unwrap().apply_click(&eid) {
        reply(Value::Null)
    } else {
        stale_element()
    }
}

async fn element_clear(
    State(state): State<Arc<MockState>>,
    Path((_sid, eid)): Path<(String, String)>,
) -> Response {
    let mut page = state.page.lock().unwrap();
    match page.elements.iter_mut().find(|e| e.id == eid) {
        Some(element) => {
            element.clears += 1;
            element.typed.clear();
            reply(Value::Null)
        }
        None => stale_element(),
    }
}

async fn element_send_keys(
    State(state): State<Arc<MockState>>,
    Path((_sid, eid)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Response {
    let text = match body.get("text").and_then(Value::as_str) {
        Some(text) => text.to_string(),
        // Legacy clients send the keys as a char array instead.
        None => body
            .get("value")
            .and_then(Value::as_array)
            .map(|chars| {
                chars
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<String>()
            })
            .unwrap_or_default(),
    };

    let mut page = state.page.lock().unwrap();
    match page.elements.iter_mut().find(|e| e.id == eid) {
        Some(element) => {
            element.typed.push_str(&text);
            reply(Value::Null)
        }
        None => stale_element(),
    }
}

async fn element_text(
    State(state): State<Arc<MockState>>,
    Path((_sid, eid)): Path<(String, String)>,
) -> Response {
    let page = state.page.lock().unwrap();
    match page.elements.iter().find(|e| e.id == eid) {
        Some(element) => reply(json!(element.text)),
        None => stale_element(),
    }
}

async fn element_attribute(
    State(state): State<Arc<MockState>>,
    Path((_sid, eid, name)): Path<(String, String, String)>,
) -> Response {
    let page = state.page.lock().unwrap();
    match page.elements.iter().find(|e| e.id == eid) {
        Some(element) => match element.attrs.get(&name) {
            Some(value) => reply(json!(value)),
            None => reply(Value::Null),
        },
        None => stale_element(),
    }
}

async fn element_css_value(
    State(state): State<Arc<MockState>>,
    Path((_sid, eid, name)): Path<(String, String, String)>,
) -> Response {
    let page = state.page.lock().unwrap();
    match page.elements.iter().find(|e| e.id == eid) {
        // Unknown properties compute to the empty string.
        Some(element) => {
            let value = element
                .attrs
                .get(&format!("css:{name}"))
                .cloned()
                .unwrap_or_default();
            reply(json!(value))
        }
        None => stale_element(),
    }
}

async fn element_displayed(
    State(state): State<Arc<MockState>>,
    Path((_sid, eid)): Path<(String, String)>,
) -> Response {
    let page = state.page.lock().unwrap();
    match page.elements.iter().find(|e| e.id == eid) {
        Some(element) => reply(json!(element.displayed)),
        None => stale_element(),
    }
}

async fn element_enabled(
    State(state): State<Arc<MockState>>,
    Path((_sid, eid)): Path<(String, String)>,
) -> Response {
    let page = state.page.lock().unwrap();
    match page.elements.iter().find(|e| e.id == eid) {
        Some(element) => reply(json!(element.enabled)),
        None => stale_element(),
    }
}

async fn element_selected(
    State(state): State<Arc<MockState>>,
    Path((_sid, eid)): Path<(String, String)>,
) -> Response {
    let page = state.page.lock().unwrap();
    match page.elements.iter().find(|e| e.id == eid) {
        Some(element) => reply(json!(element.selected)),
        None => stale_element(),
    }
}

// ============================================================================
// Handlers - Script
// ============================================================================

/// Dispatches on the script text the facade is known to send.
///
/// Unknown scripts answer with the staged script result, so tests can
/// exercise the raw escape hatch too.
async fn execute_sync(
    State(state): State<Arc<MockState>>,
    Path(_sid): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let script = body
        .get("script")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let args = body
        .get("args")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut page = state.page.lock().unwrap();
    page.scripts.push(script.clone());

    if script.contains("document.readyState") {
        let ready = page.ready_state.clone();
        return reply(json!(ready));
    }
    if script.contains("jQuery") {
        let idle = match page.jquery_active {
            None => true,
            Some(active) => active == 0,
        };
        return reply(json!(idle));
    }
    if script.contains("scrollIntoView") || script.contains("scrollTo") || script.contains("scrollBy")
    {
        page.scroll_calls += 1;
        return reply(Value::Null);
    }
    if script.contains("window.location") {
        let url = args
            .first()
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        page.url = url.clone();
        page.navigations.push(format!("js-goto {url}"));
        return reply(Value::Null);
    }
    if script.contains(".click()") {
        let Some(id) = args.first().and_then(ref_id) else {
            return stale_element();
        };
        return if page.apply_click(&id) {
            reply(Value::Null)
        } else {
            stale_element()
        };
    }
    if script.contains("setAttribute") {
        let Some(id) = args.first().and_then(ref_id) else {
            return stale_element();
        };
        let name = quoted_attribute_name(&script).unwrap_or_default();
        let value = args
            .get(1)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        match page.elements.iter_mut().find(|e| e.id == id) {
            Some(element) => {
                element.attrs.insert(name, value);
                return reply(Value::Null);
            }
            None => return stale_element(),
        }
    }
    if script.contains("removeAttribute") {
        let Some(id) = args.first().and_then(ref_id) else {
            return stale_element();
        };
        let name = args.get(1).and_then(Value::as_str).unwrap_or_default();
        match page.elements.iter_mut().find(|e| e.id == id) {
            Some(element) => {
                element.attrs.remove(name);
                return reply(Value::Null);
            }
            None => return stale_element(),
        }
    }
    if script.contains("validationMessage") {
        let Some(id) = args.first().and_then(ref_id) else {
            return stale_element();
        };
        let message = page
            .elements
            .iter()
            .find(|e| e.id == id)
            .and_then(|e| e.attrs.get("validationMessage").cloned())
            .unwrap_or_default();
        return reply(json!(message));
    }
    if script.contains("naturalWidth") {
        let Some(id) = args.first().and_then(ref_id) else {
            return stale_element();
        };
        let loaded = page
            .elements
            .iter()
            .find(|e| e.id == id)
            .and_then(|e| e.attrs.get("loaded"))
            .is_some_and(|v| v == "true");
        return reply(json!(loaded));
    }
    if script.contains("innerText") {
        let text = page.inner_text.clone();
        return reply(json!(text));
    }

    let result = page.script_result.clone();
    reply(result)
}

/// Extracts the first single-quoted name in a script, e.g. the attribute in
/// `setAttribute('style', ...)`.
fn quoted_attribute_name(script: &str) -> Option<String> {
    let start = script.find('\'')? + 1;
    let len = script[start..].find('\'')?;
    Some(script[start..start + len].to_string())
}

// ============================================================================
// Handlers - Cookies
// ============================================================================

async fn get_cookies(State(state): State<Arc<MockState>>, Path(_sid): Path<String>) -> Response {
    let cookies = state.page.lock().unwrap().cookies.clone();
    reply(json!(cookies))
}

async fn add_cookie(
    State(state): State<Arc<MockState>>,
    Path(_sid): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Some(cookie) = body.get("cookie") {
        state.page.lock().unwrap().cookies.push(cookie.clone());
    }
    reply(Value::Null)
}

async fn delete_cookies(State(state): State<Arc<MockState>>, Path(_sid): Path<String>) -> Response {
    let mut page = state.page.lock().unwrap();
    page.cookies.clear();
    page.delete_cookie_calls += 1;
    reply(Value::Null)
}

// ============================================================================
// Handlers - Alerts
// ============================================================================

async fn get_alert_text(State(state): State<Arc<MockState>>, Path(_sid): Path<String>) -> Response {
    match &state.page.lock().unwrap().alert {
        Some(text) => reply(json!(text)),
        None => no_such_alert(),
    }
}

async fn send_alert_text(
    State(state): State<Arc<MockState>>,
    Path(_sid): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut page = state.page.lock().unwrap();
    if page.alert.is_none() {
        return no_such_alert();
    }
    let text = body.get("text").and_then(Value::as_str).unwrap_or_default();
    page.prompt_input = Some(text.to_string());
    reply(Value::Null)
}

async fn accept_alert(State(state): State<Arc<MockState>>, Path(_sid): Path<String>) -> Response {
    let mut page = state.page.lock().unwrap();
    if page.alert.take().is_none() {
        return no_such_alert();
    }
    page.alert_log.push("accepted".to_string());
    reply(Value::Null)
}

async fn dismiss_alert(State(state): State<Arc<MockState>>, Path(_sid): Path<String>) -> Response {
    let mut page = state.page.lock().unwrap();
    if page.alert.take().is_none() {
        return no_such_alert();
    }
    page.alert_log.push("dismissed".to_string());
    reply(Value::Null)
}

// ============================================================================
// Handlers - Actions
// ============================================================================

async fn perform_actions(State(state): State<Arc<MockState>>, Path(_sid): Path<String>) -> Response {
    state.page.lock().unwrap().action_batches += 1;
    reply(Value::Null)
}

async fn release_actions(State(_state): State<Arc<MockState>>, Path(_sid): Path<String>) -> Response {
    reply(Value::Null)
}
