//! Minimal scripted HTTP server for exercising the harness offline.
//!
//! Each test declares routes up front; the server answers matching
//! requests from the script, records everything it saw, and closes every
//! connection after one exchange. Responders receive the request plus the
//! server's base URI so they can mint absolute URIs for `Location` and
//! `Link` headers even when the harness picked a random path.

// Every test binary compiles its own copy; none uses every helper.
#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

/// One request as the stub saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// First header with this name; names are stored lowercase.
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A scripted response, built up fluently.
#[derive(Debug, Clone)]
pub struct StubResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl StubResponse {
    pub fn new(status: u16) -> Self {
        StubResponse {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_owned(), value.into()));
        self
    }

    pub fn body(mut self, content_type: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.body = bytes.into();
        self.header("Content-Type", content_type)
    }
}

type Responder = Box<dyn Fn(&RecordedRequest, &str) -> StubResponse + Send + Sync>;

enum PathRule {
    Exact(String),
    Prefix(String),
}

struct Route {
    method: String,
    rule: PathRule,
    respond: Responder,
}

impl Route {
    fn matches(&self, method: &str, path: &str) -> bool {
        if self.method != method {
            return false;
        }
        match &self.rule {
            PathRule::Exact(p) => p == path,
            PathRule::Prefix(p) => path.starts_with(p.as_str()),
        }
    }
}

/// Builder for a [`StubServer`]; routes are matched in registration order.
#[derive(Default)]
pub struct StubServerBuilder {
    routes: Vec<Route>,
}

impl StubServerBuilder {
    /// Answers requests whose path equals `path` exactly.
    pub fn route(
        mut self,
        method: &str,
        path: &str,
        respond: impl Fn(&RecordedRequest, &str) -> StubResponse + Send + Sync + 'static,
    ) -> Self {
        self.routes.push(Route {
            method: method.to_ascii_uppercase(),
            rule: PathRule::Exact(path.to_owned()),
            respond: Box::new(respond),
        });
        self
    }

    /// Answers requests whose path starts with `prefix`.
    pub fn prefix_route(
        mut self,
        method: &str,
        prefix: &str,
        respond: impl Fn(&RecordedRequest, &str) -> StubResponse + Send + Sync + 'static,
    ) -> Self {
        self.routes.push(Route {
            method: method.to_ascii_uppercase(),
            rule: PathRule::Prefix(prefix.to_owned()),
            respond: Box::new(respond),
        });
        self
    }

    /// Binds an ephemeral port and serves the script on a background
    /// thread until the returned server is dropped.
    pub fn start(self) -> StubServer {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
        let addr = listener.local_addr().expect("stub listener address");
        let base = format!("http://{addr}");
        let requests = Arc::new(Mutex::new(Vec::new()));
        let shutdown = Arc::new(AtomicBool::new(false));

        let routes = self.routes;
        let thread_requests = Arc::clone(&requests);
        let thread_shutdown = Arc::clone(&shutdown);
        let thread_base = base.clone();
        let handle = std::thread::spawn(move || {
            for connection in listener.incoming() {
                if thread_shutdown.load(Ordering::SeqCst) {
                    break;
                }
                let Ok(stream) = connection else { continue };
                handle_connection(stream, &routes, &thread_requests, &thread_base);
            }
        });

        StubServer {
            addr,
            base,
            requests,
            shutdown,
            handle: Some(handle),
        }
    }
}

/// A live scripted server on an ephemeral local port.
pub struct StubServer {
    addr: SocketAddr,
    base: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    shutdown: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl StubServer {
    /// Starts building a scripted server.
    pub fn builder() -> StubServerBuilder {
        StubServerBuilder::default()
    }

    /// `http://127.0.0.1:<port>`, no trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Absolute URI for a path on this server.
    pub fn uri(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    /// Everything the server has seen so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().expect("requests lock").clone()
    }
}

impl Drop for StubServer {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
        // Wake the accept loop so the flag is observed.
        let _ = TcpStream::connect(self.addr);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn handle_connection(
    stream: TcpStream,
    routes: &[Route],
    requests: &Arc<Mutex<Vec<RecordedRequest>>>,
    base: &str,
) {
    let Some(request) = read_request(&stream) else {
        return;
    };

    let response = routes
        .iter()
        .find(|route| route.matches(&request.method, &request.path))
        .map_or_else(
            || StubResponse::new(404),
            |route| (route.respond)(&request, base),
        );

    requests.lock().expect("requests lock").push(request);
    write_response(stream, &response);
}

fn read_request(stream: &TcpStream) -> Option<RecordedRequest> {
    let mut reader = BufReader::new(stream);
    let mut line = String::new();
    reader.read_line(&mut line).ok()?;
    let mut parts = line.split_whitespace();
    let method = parts.next()?.to_ascii_uppercase();
    let path = parts.next()?.to_owned();

    let mut headers = Vec::new();
    loop {
        let mut header_line = String::new();
        reader.read_line(&mut header_line).ok()?;
        let trimmed = header_line.trim_end();
        if trimmed.is_empty() {
            break;
        }
        if let Some((name, value)) = trimmed.split_once(':') {
            headers.push((name.trim().to_ascii_lowercase(), value.trim().to_owned()));
        }
    }

    let length = headers
        .iter()
        .find(|(n, _)| n == "content-length")
        .and_then(|(_, v)| v.parse::<usize>().ok())
        .unwrap_or(0);
    let mut body = vec![0; length];
    if length > 0 {
        reader.read_exact(&mut body).ok()?;
    }

    Some(RecordedRequest {
        method,
        path,
        headers,
        body,
    })
}

fn write_response(mut stream: TcpStream, response: &StubResponse) {
    let mut wire = Vec::new();
    let _ = write!(
        wire,
        "HTTP/1.1 {} {}\r\n",
        response.status,
        reason(response.status)
    );
    for (name, value) in &response.headers {
        let _ = write!(wire, "{name}: {value}\r\n");
    }
    let _ = write!(wire, "Content-Length: {}\r\n", response.body.len());
    let _ = write!(wire, "Connection: close\r\n\r\n");
    wire.extend_from_slice(&response.body);
    let _ = stream.write_all(&wire);
    let _ = stream.flush();
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        404 => "Not Found",
        _ => "Status",
    }
}
