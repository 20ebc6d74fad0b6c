//! Shared wiremock catalog for integration tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const USERNAME: &str = "user";
pub const PASSWORD: &str = "pass";

#[derive(Default)]
struct State {
    /// Number of tokens handed out so far
    issued: u32,
    /// Tokens with a lower generation are expired
    valid_from: u32,
    page_requests: usize,
    auth_requests: usize,
    requested: Vec<(i32, u32)>,
}

/// In-memory catalog served over HTTP
///
/// Pages are full except the last; every page past the end is an empty
/// array. Tokens are `token-N` with N counting logins.
#[derive(Clone)]
pub struct FakeCatalog {
    page_size: usize,
    years: Arc<HashMap<i32, usize>>,
    broken: Arc<HashSet<i32>>,
    revoke_at: Arc<Vec<usize>>,
    state: Arc<Mutex<State>>,
}

impl FakeCatalog {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size,
            years: Arc::new(HashMap::new()),
            broken: Arc::new(HashSet::new()),
            revoke_at: Arc::new(Vec::new()),
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    pub fn with_year(mut self, year: i32, total: usize) -> Self {
        Arc::make_mut(&mut self.years).insert(year, total);
        self
    }

    /// Every page of `year` answers 200 with a body that is not a movie list
    pub fn with_broken_year(mut self, year: i32) -> Self {
        Arc::make_mut(&mut self.broken).insert(year);
        self
    }

    /// Expire all issued tokens when the `n`th page request (1-based) arrives
    pub fn expiring_token_on_request(mut self, n: usize) -> Self {
        Arc::make_mut(&mut self.revoke_at).push(n);
        self
    }

    pub async fn mount(&self, server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/api/auth"))
            .respond_with(AuthResponder(self.clone()))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"^/api/movies/-?\d+/\d+$"))
            .respond_with(PageResponder(self.clone()))
            .mount(server)
            .await;
    }

    pub async fn start(&self) -> MockServer {
        let server = MockServer::start().await;
        self.mount(&server).await;
        server
    }

    pub fn auth_requests(&self) -> usize {
        self.lock().auth_requests
    }

    pub fn page_requests(&self) -> usize {
        self.lock().page_requests
    }

    /// Pages requested for `year`, in arrival order
    pub fn requested_pages(&self, year: i32) -> Vec<u32> {
        self.lock()
            .requested
            .iter()
            .filter(|(y, _)| *y == year)
            .map(|(_, page)| *page)
            .collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    fn page_body(&self, year: i32, page: u32) -> Value {
        let total = self.years.get(&year).copied().unwrap_or(0);
        let skipped = (page as usize - 1).saturating_mul(self.page_size);
        let items = total.saturating_sub(skipped).min(self.page_size);
        Value::Array(
            (0..items)
                .map(|i| {
                    json!({
                        "Title": format!("Movie {}", skipped + i + 1),
                        "Year": year,
                        "imdbID": format!("tt{:07}", skipped + i + 1),
                    })
                })
                .collect(),
        )
    }
}

struct AuthResponder(FakeCatalog);

impl Respond for AuthResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut state = self.0.lock();
        state.auth_requests += 1;

        let body: Value = match request.body_json() {
            Ok(body) => body,
            Err(_) => return ResponseTemplate::new(400),
        };
        if body["username"] != USERNAME || body["password"] != PASSWORD {
            return ResponseTemplate::new(401);
        }

        state.issued += 1;
        ResponseTemplate::new(200).set_body_json(json!({ "bearer": format!("token-{}", state.issued) }))
    }
}

struct PageResponder(FakeCatalog);

impl Respond for PageResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let mut segments = request.url.path().rsplit('/');
        let page: u32 = match segments.next().and_then(|p| p.parse().ok()) {
            Some(page) if page >= 1 => page,
            _ => return ResponseTemplate::new(404),
        };
        let year: i32 = match segments.next().and_then(|y| y.parse().ok()) {
            Some(year) => year,
            None => return ResponseTemplate::new(404),
        };

        let mut state = self.0.lock();
        state.page_requests += 1;
        state.requested.push((year, page));
        if self.0.revoke_at.contains(&state.page_requests) {
            state.valid_from = state.issued + 1;
        }

        let generation = request
            .headers
            .get("authorization")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer token-"))
            .and_then(|n| n.parse::<u32>().ok());
        match generation {
            Some(n) if n >= state.valid_from && n <= state.issued => {}
            _ => return ResponseTemplate::new(401),
        }
        drop(state);

        if self.0.broken.contains(&year) {
            return ResponseTemplate::new(200).set_body_string("<html>oops</html>");
        }
        ResponseTemplate::new(200).set_body_json(self.0.page_body(year, page))
    }
}
