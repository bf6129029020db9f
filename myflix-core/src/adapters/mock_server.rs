//! Mock myFlix API server for testing
//!
//! A small threaded HTTP server that behaves like the real API closely
//! enough to exercise the client end to end:
//! - POST /users, POST /login
//! - GET /movies, /movieid/{id}, /movie/{title}, /director/{name}
//! - GET /users, /user/{id}; PUT /user/{id}; DELETE /user (body `{id}`)
//! - POST/DELETE /user/{userId}/{movie} for favorites
//!
//! State is seeded with one user (`alice` / `pw`, id `u1`, token `tok1`)
//! and three movies. Every request is recorded for assertions.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use serde_json::{json, Value as JsonValue};

/// Mock server handle; stops on drop
pub struct MockMovieServer {
    port: u16,
    running: Arc<AtomicBool>,
    state: Arc<Mutex<MockState>>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Knobs for failure scenarios
#[derive(Debug, Clone, Default)]
pub struct MockConfig {
    /// Reject every authenticated request with 401
    pub fail_auth: bool,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
    /// Answer GET /movies with records missing required fields
    pub malformed_movies: bool,
}

/// A request as seen by the server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: JsonValue,
}

#[derive(Debug, Clone)]
struct MockUser {
    id: String,
    username: String,
    password: String,
    email: String,
    birthday: Option<String>,
    favorites: Vec<String>,
}

impl MockUser {
    fn to_json(&self) -> JsonValue {
        json!({
            "_id": self.id,
            "Username": self.username,
            "Email": self.email,
            "Birthday": self.birthday,
            "FavoriteMovies": self.favorites,
        })
    }
}

struct MockState {
    users: Vec<MockUser>,
    movies: Vec<JsonValue>,
    /// token -> user id
    tokens: HashMap<String, String>,
    requests: Vec<RecordedRequest>,
    next_user_id: usize,
}

impl MockState {
    fn seeded() -> Self {
        let alice = MockUser {
            id: "u1".to_string(),
            username: "alice".to_string(),
            password: "pw".to_string(),
            email: "alice@example.com".to_string(),
            birthday: Some("1990-04-01T00:00:00.000Z".to_string()),
            favorites: Vec::new(),
        };

        Self {
            users: vec![alice],
            movies: seed_movies(),
            tokens: HashMap::new(),
            requests: Vec::new(),
            next_user_id: 2,
        }
    }

    fn find_movie(&self, key: &str) -> Option<&JsonValue> {
        self.movies
            .iter()
            .find(|m| m["_id"] == key || m["Title"] == key)
    }

    fn user_mut(&mut self, id: &str) -> Option<&mut MockUser> {
        self.users.iter_mut().find(|u| u.id == id)
    }
}

struct Response {
    status: u16,
    content_type: &'static str,
    body: String,
}

impl Response {
    fn json(status: u16, body: &JsonValue) -> Self {
        Self {
            status,
            content_type: "application/json",
            body: body.to_string(),
        }
    }

    fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "text/plain",
            body: body.into(),
        }
    }
}

impl MockMovieServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let state = Arc::new(Mutex::new(MockState::seeded()));

        // Non-blocking so the accept loop can notice shutdown
        listener.set_nonblocking(true)?;

        let running_clone = running.clone();
        let state_clone = state.clone();
        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        let state = state_clone.clone();
                        thread::spawn(move || handle_connection(stream, &cfg, &state));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(Duration::from_millis(5));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            state,
            thread_handle: Some(thread_handle),
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// Current favorites of a user as stored by the server
    pub fn favorites_of(&self, user_id: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.favorites.clone())
            .unwrap_or_default()
    }

    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockMovieServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig, state: &Mutex<MockState>) {
    let _ = stream.set_nonblocking(false);
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));

    let Some((head, body)) = read_request(&mut stream) else {
        return;
    };

    let first_line = head.lines().next().unwrap_or("");
    let parts: Vec<&str> = first_line.split_whitespace().collect();
    if parts.len() < 2 {
        send_response(&mut stream, &Response::text(400, "Bad Request"));
        return;
    }
    let method = parts[0].to_string();
    let path = parts[1].split('?').next().unwrap_or("").to_string();

    let authorization = head.lines().skip(1).find_map(|line| {
        let (name, value) = line.split_once(':')?;
        name.trim()
            .eq_ignore_ascii_case("authorization")
            .then(|| value.trim().to_string())
    });
    let body: JsonValue = serde_json::from_slice(&body).unwrap_or(JsonValue::Null);

    if config.delay_ms > 0 {
        thread::sleep(Duration::from_millis(config.delay_ms));
    }

    let response = {
        let mut state = state.lock().unwrap();
        state.requests.push(RecordedRequest {
            method: method.clone(),
            path: path.clone(),
            authorization: authorization.clone(),
            body: body.clone(),
        });
        route(&mut state, config, &method, &path, authorization.as_deref(), &body)
    };

    send_response(&mut stream, &response);
}

fn route(
    state: &mut MockState,
    config: &MockConfig,
    method: &str,
    path: &str,
    authorization: Option<&str>,
    body: &JsonValue,
) -> Response {
    let segments: Vec<String> = path
        .trim_start_matches('/')
        .split('/')
        .map(percent_decode)
        .collect();
    let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

    // Open endpoints
    match (method, segments.as_slice()) {
        ("POST", ["users"]) => return register(state, body),
        ("POST", ["login"]) => return login(state, body),
        _ => {}
    }

    let authorized = authorization
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| state.tokens.contains_key(token.trim()));
    if !authorized || config.fail_auth {
        return Response::text(401, "Unauthorized");
    }

    match (method, segments.as_slice()) {
        ("GET", ["movies"]) => {
            if config.malformed_movies {
                Response::json(200, &json!([{ "unexpected": true }]))
            } else {
                Response::json(200, &JsonValue::Array(state.movies.clone()))
            }
        }
        ("GET", ["movieid", id]) => match state.movies.iter().find(|m| m["_id"] == *id) {
            Some(movie) => Response::json(200, movie),
            None => Response::text(400, "No such movie"),
        },
        ("GET", ["movie", title]) => match state.movies.iter().find(|m| m["Title"] == *title) {
            Some(movie) => Response::json(200, movie),
            None => Response::text(400, "No such movie"),
        },
        ("GET", ["director", name]) => {
            let director = state
                .movies
                .iter()
                .map(|m| &m["Director"])
                .find(|d| d["Name"] == *name);
            match director {
                Some(director) => Response::json(200, director),
                None => Response::text(400, "No such director"),
            }
        }
        ("GET", ["users"]) => {
            let users: Vec<JsonValue> = state.users.iter().map(MockUser::to_json).collect();
            Response::json(200, &JsonValue::Array(users))
        }
        ("GET", ["user", id]) => match state.users.iter().find(|u| u.id == *id) {
            Some(user) => Response::json(200, &user.to_json()),
            None => Response::text(400, format!("{} was not found", id)),
        },
        ("PUT", ["user", id]) => edit_user(state, id, body),
        ("DELETE", ["user"]) => delete_user(state, body),
        ("POST", ["user", user_id, movie]) => toggle_favorite(state, user_id, movie, true),
        ("DELETE", ["user", user_id, movie]) => toggle_favorite(state, user_id, movie, false),
        _ => Response::json(404, &json!({ "error": "Endpoint not found" })),
    }
}

fn register(state: &mut MockState, body: &JsonValue) -> Response {
    let username = body["Username"].as_str().unwrap_or_default();
    let password = body["Password"].as_str().unwrap_or_default();
    if username.is_empty() || password.is_empty() {
        return Response::json(422, &json!({ "errors": [{ "msg": "Username is required" }] }));
    }
    if state.users.iter().any(|u| u.username == username) {
        return Response::text(400, format!("{} already exists", username));
    }

    let user = MockUser {
        id: format!("u{}", state.next_user_id),
        username: username.to_string(),
        password: password.to_string(),
        email: body["Email"].as_str().unwrap_or_default().to_string(),
        birthday: body["Birthday"].as_str().map(str::to_string),
        favorites: Vec::new(),
    };
    state.next_user_id += 1;
    let json = user.to_json();
    state.users.push(user);
    Response::json(201, &json)
}

fn login(state: &mut MockState, body: &JsonValue) -> Response {
    let username = body["Username"].as_str().unwrap_or_default();
    let password = body["Password"].as_str().unwrap_or_default();
    let Some(user) = state
        .users
        .iter()
        .find(|u| u.username == username && u.password == password)
        .cloned()
    else {
        return Response::json(400, &json!({ "message": "Incorrect username or password." }));
    };

    let token = if user.id == "u1" {
        "tok1".to_string()
    } else {
        format!("tok-{}", user.username)
    };
    state.tokens.insert(token.clone(), user.id.clone());
    Response::json(200, &json!({ "user": user.to_json(), "token": token }))
}

fn edit_user(state: &mut MockState, id: &str, body: &JsonValue) -> Response {
    let Some(user) = state.user_mut(id) else {
        return Response::text(400, format!("{} was not found", id));
    };
    if let Some(username) = body["Username"].as_str() {
        user.username = username.to_string();
    }
    if let Some(password) = body["Password"].as_str() {
        user.password = password.to_string();
    }
    if let Some(email) = body["Email"].as_str() {
        user.email = email.to_string();
    }
    if let Some(birthday) = body["Birthday"].as_str() {
        user.birthday = Some(birthday.to_string());
    }
    Response::json(200, &user.to_json())
}

fn delete_user(state: &mut MockState, body: &JsonValue) -> Response {
    let id = body["id"].as_str().unwrap_or_default().to_string();
    let Some(pos) = state.users.iter().position(|u| u.id == id) else {
        return Response::text(400, format!("{} was not found", id));
    };
    let user = state.users.remove(pos);
    state.tokens.retain(|_, user_id| *user_id != id);
    Response::text(200, format!("{} was deleted.", user.username))
}

fn toggle_favorite(state: &mut MockState, user_id: &str, movie: &str, add: bool) -> Response {
    if state.find_movie(movie).is_none() {
        return Response::text(400, "No such movie");
    }
    let Some(user) = state.user_mut(user_id) else {
        return Response::text(400, format!("{} was not found", user_id));
    };
    if add {
        if !user.favorites.iter().any(|f| f == movie) {
            user.favorites.push(movie.to_string());
        }
    } else {
        user.favorites.retain(|f| f != movie);
    }
    Response::json(200, &user.to_json())
}

/// Read the request head and as much body as Content-Length announces
fn read_request(stream: &mut TcpStream) -> Option<(String, Vec<u8>)> {
    let mut data = Vec::new();
    let mut buffer = [0u8; 4096];

    let head_end = loop {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buffer[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&data[..head_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while data.len() < head_end + content_length {
        let n = stream.read(&mut buffer).ok()?;
        if n == 0 {
            break;
        }
        data.extend_from_slice(&buffer[..n]);
    }

    let body_end = data.len().min(head_end + content_length);
    Some((head, data[head_end..body_end].to_vec()))
}

fn send_response(stream: &mut TcpStream, response: &Response) {
    let status_text = match response.status {
        200 => "OK",
        201 => "Created",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        422 => "Unprocessable Entity",
        _ => "Unknown",
    };
    let raw = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        response.status,
        status_text,
        response.content_type,
        response.body.len(),
        response.body
    );
    let _ = stream.write_all(raw.as_bytes());
    let _ = stream.flush();
}

fn percent_decode(segment: &str) -> String {
    let bytes = segment.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok();
            if let Some(byte) = hex.and_then(|h| u8::from_str_radix(h, 16).ok()) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).to_string()
}

fn seed_movies() -> Vec<JsonValue> {
    vec![
        json!({
            "_id": "Jaws",
            "Title": "Jaws",
            "Description": "A great white shark terrorizes a beach town.",
            "Genre": { "Name": "Thriller", "Description": "Suspense and tension." },
            "Director": { "Name": "Steven Spielberg", "Bio": "American filmmaker.", "Birth": 1946, "Death": null },
            "ImagePath": "https://img.example/jaws.png",
            "Featured": true
        }),
        json!({
            "_id": "Alien",
            "Title": "Alien",
            "Description": "The crew of the Nostromo meets a deadly lifeform.",
            "Genre": { "Name": "Science Fiction", "Description": "Speculative futures." },
            "Director": { "Name": "Ridley Scott", "Bio": "English filmmaker.", "Birth": 1937, "Death": null },
            "ImagePath": "https://img.example/alien.png",
            "Featured": false
        }),
        json!({
            "_id": "tdk",
            "Title": "The Dark Knight",
            "Description": "Batman faces the Joker.",
            "Genre": { "Name": "Action", "Description": "Fights and chases." },
            "Director": { "Name": "Christopher Nolan", "Bio": "British-American filmmaker.", "Birth": 1970, "Death": null },
            "ImagePath": "https://img.example/tdk.png",
            "Featured": true
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_server_starts() {
        let server = MockMovieServer::start(MockConfig::default()).unwrap();
        assert!(server.port() > 0);
        assert!(server.requests().is_empty());
    }

    #[test]
    fn test_percent_decode() {
        assert_eq!(percent_decode("The%20Dark%20Knight"), "The Dark Knight");
        assert_eq!(percent_decode("AC%2FDC"), "AC/DC");
        assert_eq!(percent_decode("plain"), "plain");
        assert_eq!(percent_decode("trailing%2"), "trailing%2");
    }

    #[test]
    fn test_favorites_are_a_set() {
        let mut state = MockState::seeded();
        toggle_favorite(&mut state, "u1", "Jaws", true);
        toggle_favorite(&mut state, "u1", "Jaws", true);
        assert_eq!(state.users[0].favorites, vec!["Jaws".to_string()]);

        let response = toggle_favorite(&mut state, "u1", "Nope", true);
        assert_eq!(response.status, 400);
    }
}
