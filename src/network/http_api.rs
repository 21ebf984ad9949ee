use std::net::SocketAddr;
use std::sync::Arc;

use serde::Serialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{error, info, warn};
use url::form_urlencoded;

use crate::catalog::query::QueryService;
use crate::protocol::{AssignmentEnvelope, ErrorBody};

/// A JSON response ready to be written to the socket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    fn json<T: Serialize>(status: u16, payload: &T) -> Self {
        match serde_json::to_string(payload) {
            Ok(body) => Self { status, body },
            Err(e) => {
                error!("Failed to serialize response body: {}", e);
                Self::error(500, "Internal server error")
            }
        }
    }

    fn error(status: u16, message: &str) -> Self {
        let body = serde_json::json!({ "error": message }).to_string();
        Self { status, body }
    }

    fn empty(status: u16) -> Self {
        Self {
            status,
            body: String::new(),
        }
    }
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        _ => "Internal Server Error",
    }
}

// ── Routing ─────────────────────────────────────────────────────────

fn query_param(query: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k.as_ref() == key)
        .map(|(_, v)| v.into_owned())
}

/// Answer one request against the catalog.
///
/// `/assignments` and `/assignments/<id>` are served, optionally under an
/// `/api` prefix. An empty `courseId` is treated as no filter.
pub fn route(service: &QueryService, method: &str, target: &str) -> HttpResponse {
    if method == "OPTIONS" {
        return HttpResponse::empty(204);
    }
    if method != "GET" {
        return HttpResponse::error(405, "Method not allowed");
    }

    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    let path = path.strip_prefix("/api").unwrap_or(path);
    let path = path.trim_end_matches('/');

    if path == "/assignments" {
        return match query_param(query, "courseId").filter(|id| !id.is_empty()) {
            Some(course_id) => match service.get_course_assignments(&course_id) {
                Ok(listing) => HttpResponse::json(200, &listing),
                Err(e) => HttpResponse::json(
                    404,
                    &ErrorBody {
                        error: e.wire_message().to_string(),
                    },
                ),
            },
            None => HttpResponse::json(200, &service.get_catalog_summary()),
        };
    }

    if let Some(id) = path.strip_prefix("/assignments/") {
        if !id.is_empty() && !id.contains('/') {
            let Ok(id) = urlencoding::decode(id) else {
                return HttpResponse::error(400, "Bad request");
            };
            return match service.get_assignment_detail(&id) {
                Ok(detail) => HttpResponse::json(
                    200,
                    &AssignmentEnvelope {
                        assignment: detail.clone(),
                    },
                ),
                Err(e) => HttpResponse::json(
                    404,
                    &ErrorBody {
                        error: e.wire_message().to_string(),
                    },
                ),
            };
        }
    }

    HttpResponse::error(404, "Not found")
}

// ── Server loop ─────────────────────────────────────────────────────

fn encode(response: &HttpResponse) -> String {
    if response.status == 204 {
        return "HTTP/1.1 204 No Content\r\n\
            Access-Control-Allow-Origin: *\r\n\
            Access-Control-Allow-Methods: GET, OPTIONS\r\n\
            Access-Control-Allow-Headers: Content-Type\r\n\
            Connection: close\r\n\
            \r\n"
            .to_string();
    }
    format!(
        "HTTP/1.1 {} {}\r\n\
        Content-Type: application/json\r\n\
        Access-Control-Allow-Origin: *\r\n\
        Content-Length: {}\r\n\
        Connection: close\r\n\
        \r\n\
        {}",
        response.status,
        reason_phrase(response.status),
        response.body.len(),
        response.body,
    )
}

async fn handle_connection(mut stream: TcpStream, peer: SocketAddr, service: Arc<QueryService>) {
    // Only the request line is needed; stop once it is complete or the
    // buffer is full.
    let mut buf = [0u8; 4096];
    let mut n = 0;
    while n < buf.len() && !buf[..n].windows(2).any(|w| w == b"\r\n") {
        match stream.read(&mut buf[n..]).await {
            Ok(0) => break,
            Ok(read) => n += read,
            Err(e) => {
                warn!("Failed to read request from {}: {}", peer, e);
                return;
            }
        }
    }
    if n == 0 {
        return;
    }
    let request = String::from_utf8_lossy(&buf[..n]);

    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let response = match (parts.next(), parts.next()) {
        (Some(method), Some(target)) => {
            let response = route(&service, method, target);
            info!("{} {} -> {}", method, target, response.status);
            response
        }
        _ => {
            warn!("Malformed request line from {}", peer);
            HttpResponse::error(400, "Bad request")
        }
    };

    if let Err(e) = stream.write_all(encode(&response).as_bytes()).await {
        warn!("Failed to write response to {}: {}", peer, e);
        return;
    }
    let _ = stream.shutdown().await;
}

/// Accept connections on an already-bound listener, one task per connection.
pub async fn serve(listener: TcpListener, service: Arc<QueryService>) {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                error!("HTTP API accept error: {}", e);
                continue;
            }
        };

        let service = Arc::clone(&service);
        tokio::spawn(handle_connection(stream, peer, service));
    }
}

/// Bind `addr` and serve the catalog endpoints.
pub async fn start(addr: SocketAddr, service: Arc<QueryService>) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP API listening on http://{}", listener.local_addr()?);
    serve(listener, service).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogStore;
    use serde_json::Value;

    fn service() -> QueryService {
        QueryService::new(Arc::new(CatalogStore::seeded().unwrap()))
    }

    fn get(target: &str) -> (u16, Value) {
        let response = route(&service(), "GET", target);
        let body = serde_json::from_str(&response.body).unwrap();
        (response.status, body)
    }

    #[test]
    fn summary_lists_courses_and_total() {
        let (status, body) = get("/assignments");
        assert_eq!(status, 200);
        assert_eq!(body["courses"].as_array().unwrap().len(), 4);
        assert_eq!(body["courses"][0]["id"], "cs101");
        assert_eq!(body["totalAssignments"], 12);
    }

    #[test]
    fn course_listing_is_sorted_by_due_date() {
        let (status, body) = get("/assignments?courseId=cs101");
        assert_eq!(status, 200);
        assert_eq!(body["course"]["code"], "CS 101");
        let assignments = body["assignments"].as_array().unwrap();
        assert_eq!(assignments.len(), 3);
        assert_eq!(assignments[0]["id"], "cs101-1");
        assert_eq!(assignments[0]["dueDate"], "2024-01-15");
        assert_eq!(assignments[2]["id"], "cs101-3");
        assert_eq!(assignments[2]["dueDate"], "2024-01-25");
    }

    #[test]
    fn unknown_course_is_404() {
        let (status, body) = get("/assignments?courseId=hist150");
        assert_eq!(status, 404);
        assert_eq!(body, serde_json::json!({ "error": "Course not found" }));
    }

    #[test]
    fn empty_course_filter_means_summary() {
        let (status, body) = get("/assignments?courseId=");
        assert_eq!(status, 200);
        assert!(body.get("totalAssignments").is_some());
    }

    #[test]
    fn detail_has_rubric_summing_to_total() {
        let (status, body) = get("/assignments/cs101-1");
        assert_eq!(status, 200);
        let assignment = &body["assignment"];
        assert_eq!(assignment["totalPoints"], 100);
        assert_eq!(assignment["dueDate"], "2024-01-15T23:59:00");
        assert_eq!(assignment["courseName"], "CS 101 - Computer Science 101");
        let rubric_sum: u64 = assignment["rubric"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["maxPoints"].as_u64().unwrap())
            .sum();
        assert_eq!(rubric_sum, 100);
    }

    #[test]
    fn unknown_assignment_is_404() {
        let (status, body) = get("/assignments/does-not-exist");
        assert_eq!(status, 404);
        assert_eq!(body["error"], "Assignment not found");
    }

    #[test]
    fn api_prefix_and_trailing_slash_are_accepted() {
        assert_eq!(get("/api/assignments/").0, 200);
        assert_eq!(get("/api/assignments/math201-3").0, 200);
    }

    #[test]
    fn other_paths_and_methods_are_rejected() {
        assert_eq!(get("/courses").0, 404);
        assert_eq!(get("/assignments/cs101-1/rubric").0, 404);
        let post = route(&service(), "POST", "/assignments");
        assert_eq!(post.status, 405);
        assert_eq!(route(&service(), "OPTIONS", "/assignments").status, 204);
    }

    #[test]
    fn query_values_are_form_decoded() {
        assert_eq!(
            query_param("x=1&courseId=math201", "courseId"),
            Some("math201".to_string())
        );
        assert_eq!(
            query_param("courseId=cs%3101", "courseId"),
            Some("cs101".to_string())
        );
        assert_eq!(query_param("courseId=a+b", "courseId"), Some("a b".to_string()));
        assert_eq!(query_param("x=1", "courseId"), None);
    }

    #[test]
    fn path_ids_are_percent_decoded_only() {
        assert_eq!(get("/assignments/cs101%2D1").0, 200);
        let (status, body) = get("/assignments/cs101+1");
        assert_eq!(status, 404);
        assert_eq!(body["error"], "Assignment not found");
        assert_eq!(route(&service(), "GET", "/assignments/%FF").status, 400);
    }

    #[tokio::test]
    async fn serves_json_over_tcp() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener, Arc::new(service())));

        let client = reqwest::Client::new();
        let detail = client
            .get(format!("http://{}/assignments/eng150-2", addr))
            .send()
            .await
            .unwrap();
        assert_eq!(detail.status().as_u16(), 200);
        assert_eq!(detail.headers()["access-control-allow-origin"], "*");
        let body: Value = detail.json().await.unwrap();
        assert_eq!(body["assignment"]["totalPoints"], 75);

        let missing = client
            .get(format!("http://{}/assignments?courseId=nope", addr))
            .send()
            .await
            .unwrap();
        assert_eq!(missing.status().as_u16(), 404);
        let body: Value = missing.json().await.unwrap();
        assert_eq!(body["error"], "Course not found");
    }

    async fn raw_exchange(chunks: &[&[u8]]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener, Arc::new(service())));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        for chunk in chunks {
            stream.write_all(chunk).await.unwrap();
            stream.flush().await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
        let mut reply = String::new();
        stream.read_to_string(&mut reply).await.unwrap();
        reply
    }

    #[tokio::test]
    async fn malformed_request_line_is_400() {
        let reply = raw_exchange(&[b"garbage\r\n\r\n"]).await;
        assert!(reply.starts_with("HTTP/1.1 400 Bad Request\r\n"));
        assert!(reply.ends_with(r#"{"error":"Bad request"}"#));
    }

    #[tokio::test]
    async fn request_line_split_across_writes() {
        let reply = raw_exchange(&[b"GET /assignments/ma", b"th201-1 HTTP/1.1\r\n\r\n"]).await;
        assert!(reply.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(reply.contains("Integration Techniques"));
    }
}
