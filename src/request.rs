use crate::actions::{apply_action, AppAction};
use crate::config::validate_url;
use crate::state::AppState;
use crate::types::{AuthType, HttpMethod, RequestConfig, ResponseSnapshot, StatusMessage};
use crate::value::{parse_json, DecodedValue};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::sync::{Arc, RwLock};
use std::time::Instant;

/// A validated request, ready to send
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// Validate the form and assemble the final request
pub fn prepare(config: &RequestConfig) -> Result<PreparedRequest, String> {
    validate_url(&config.url)?;
    let headers = build_headers(config)?;
    let body = (config.method.supports_body() && !config.body.is_empty())
        .then(|| config.body.clone());

    Ok(PreparedRequest {
        method: config.method,
        url: config.url.trim().to_string(),
        headers,
        body,
    })
}

/// Parse `Key: Value` lines. Blank lines are skipped and entries with an
/// empty key or value are dropped; any other line without a colon is an error.
pub fn parse_header_lines(text: &str) -> Result<Vec<(String, String)>, String> {
    let mut headers = Vec::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            return Err(format!(
                "Invalid header format: '{}' (expected 'Key: Value')",
                line
            ));
        };
        let (key, value) = (key.trim(), value.trim());
        if key.is_empty() || value.is_empty() {
            continue;
        }
        headers.push((key.to_string(), value.to_string()));
    }
    Ok(headers)
}

/// Custom headers, then Content-Type, then Authorization; later entries
/// replace earlier ones with the same (case-insensitive) name
pub fn build_headers(config: &RequestConfig) -> Result<Vec<(String, String)>, String> {
    let mut headers = Vec::new();
    for (key, value) in parse_header_lines(&config.headers)? {
        set_header(&mut headers, &key, value);
    }

    if config.method.supports_body() && !config.body.is_empty() {
        set_header(
            &mut headers,
            "Content-Type",
            config.content_type.mime().to_string(),
        );
    }

    if let Some(auth) = auth_header(config) {
        set_header(&mut headers, "Authorization", auth);
    }

    Ok(headers)
}

fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: String) {
    headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
    headers.push((name.to_string(), value));
}

/// Authorization header value for the selected auth type
pub fn auth_header(config: &RequestConfig) -> Option<String> {
    match config.auth {
        AuthType::None => None,
        AuthType::Basic => {
            let credentials = format!("{}:{}", config.username, config.password);
            Some(format!("Basic {}", BASE64.encode(credentials)))
        }
        AuthType::Bearer => Some(format!("Bearer {}", config.token)),
        AuthType::Jwt => Some(format!("JWT {}", config.token)),
    }
}

/// JSON content types are parsed; everything else stays text
pub fn decode_body(content_type: Option<&str>, text: &str) -> Result<DecodedValue, String> {
    let is_json = content_type
        .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false);

    if is_json {
        parse_json(text).map_err(|e| format!("Failed to parse JSON response: {e}"))
    } else {
        Ok(DecodedValue::String(text.to_string()))
    }
}

/// Validate and send the current form in the background
pub fn execute_request_background(state: Arc<RwLock<AppState>>, client: reqwest::Client) {
    let prepared = {
        let s = state.read().unwrap();
        prepare(&s.request.config)
    };

    let prepared = match prepared {
        Ok(prepared) => prepared,
        Err(e) => {
            let mut s = state.write().unwrap();
            apply_action(AppAction::SetStatus(StatusMessage::error(e)), &mut s);
            return;
        }
    };

    {
        let mut s = state.write().unwrap();
        if s.response.executing {
            return;
        }
        apply_action(AppAction::RequestStarted, &mut s);
    }

    tracing::info!("{} {}", prepared.method.as_str(), prepared.url);

    tokio::spawn(async move {
        let snapshot = send(&client, &prepared).await;
        tracing::info!(
            "{} {} -> {} in {}ms",
            prepared.method.as_str(),
            prepared.url,
            snapshot.status,
            snapshot.duration.as_millis()
        );

        let (history, history_dirty) = {
            let mut s = state.write().unwrap();
            let before = s.history.clone();
            apply_action(
                AppAction::ResponseReceived {
                    snapshot,
                    url: prepared.url.clone(),
                },
                &mut s,
            );
            (s.history.clone(), s.history != before)
        };

        if history_dirty {
            let saved = crate::history::UrlHistory::path().and_then(|path| history.save_to(&path));
            if let Err(e) = saved {
                tracing::warn!("Failed to save history: {}", e);
            }
        }
    });
}

async fn send(client: &reqwest::Client, prepared: &PreparedRequest) -> ResponseSnapshot {
    let mut builder = client.request(prepared.method.to_reqwest(), &prepared.url);
    for (key, value) in &prepared.headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    if let Some(body) = &prepared.body {
        builder = builder.body(body.clone());
    }

    let start = Instant::now();
    let response = match builder.send().await {
        Ok(response) => response,
        Err(e) => return ResponseSnapshot::error(format_request_error(&e), start.elapsed()),
    };

    let status = response.status();
    let headers = received_headers(response.headers());

    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => return ResponseSnapshot::error(format_request_error(&e), start.elapsed()),
    };
    let duration = start.elapsed();

    let content_type = headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
        .map(|(_, v)| v.as_str());
    let (body, error) = match decode_body(content_type, &text) {
        Ok(body) => (body, None),
        Err(e) => (DecodedValue::String(text), Some(e)),
    };

    ResponseSnapshot {
        status: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or("").to_string(),
        headers,
        body,
        error,
        duration,
    }
}

/// Response headers as (name, value) pairs; non-UTF-8 bytes are replaced, not dropped
fn received_headers(headers: &reqwest::header::HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(k, v)| {
            (
                k.to_string(),
                String::from_utf8_lossy(v.as_bytes()).into_owned(),
            )
        })
        .collect()
}

fn format_request_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        return "Request timed out".to_string();
    }
    if err.is_connect() {
        if let Some(host) = err.url().and_then(|url| url.host_str()) {
            return format!("Connection failed: {}", host);
        }
        return "Connection failed".to_string();
    }
    if err.is_builder() {
        return format!("Invalid URL: {}", err);
    }
    if err.is_redirect() {
        return "Too many redirects".to_string();
    }
    if err.is_decode() {
        return "Failed to decode response body".to_string();
    }
    format!("Request failed: {}", err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BodyContentType;

    fn config(method: HttpMethod) -> RequestConfig {
        RequestConfig {
            method,
            url: "https://api.example.com/users".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_header_lines() {
        let headers =
            parse_header_lines("Accept: application/json\n\n  X-Trace :  abc:def  \nEmpty:\n")
                .unwrap();
        assert_eq!(
            headers,
            vec![
                ("Accept".to_string(), "application/json".to_string()),
                ("X-Trace".to_string(), "abc:def".to_string()),
            ]
        );
    }

    #[test]
    fn test_header_line_without_colon_is_rejected() {
        let err = parse_header_lines("Accept application/json").unwrap_err();
        assert!(err.contains("expected 'Key: Value'"));
    }

    #[test]
    fn test_basic_auth_header() {
        let mut cfg = config(HttpMethod::Get);
        cfg.auth = AuthType::Basic;
        cfg.username = "user".to_string();
        cfg.password = "pass".to_string();
        assert_eq!(auth_header(&cfg).as_deref(), Some("Basic dXNlcjpwYXNz"));
    }

    #[test]
    fn test_token_auth_headers() {
        let mut cfg = config(HttpMethod::Get);
        cfg.token = "t0k".to_string();
        cfg.auth = AuthType::Bearer;
        assert_eq!(auth_header(&cfg).as_deref(), Some("Bearer t0k"));
        cfg.auth = AuthType::Jwt;
        assert_eq!(auth_header(&cfg).as_deref(), Some("JWT t0k"));
        cfg.auth = AuthType::None;
        assert_eq!(auth_header(&cfg), None);
    }

    #[test]
    fn test_header_precedence() {
        let mut cfg = config(HttpMethod::Post);
        cfg.headers = "content-type: text/csv\nauthorization: Custom x\nX-Id: 1".to_string();
        cfg.body = "a=1".to_string();
        cfg.content_type = BodyContentType::FormUrlEncoded;
        cfg.auth = AuthType::Bearer;
        cfg.token = "abc".to_string();

        let headers = build_headers(&cfg).unwrap();
        assert_eq!(
            headers,
            vec![
                ("X-Id".to_string(), "1".to_string()),
                (
                    "Content-Type".to_string(),
                    "application/x-www-form-urlencoded".to_string()
                ),
                ("Authorization".to_string(), "Bearer abc".to_string()),
            ]
        );
    }

    #[test]
    fn test_get_never_sends_body_or_content_type() {
        let mut cfg = config(HttpMethod::Get);
        cfg.body = "{\"a\":1}".to_string();

        let prepared = prepare(&cfg).unwrap();
        assert_eq!(prepared.body, None);
        assert!(prepared.headers.is_empty());

        cfg.method = HttpMethod::Put;
        let prepared = prepare(&cfg).unwrap();
        assert_eq!(prepared.body.as_deref(), Some("{\"a\":1}"));
        assert_eq!(
            prepared.headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn test_prepare_rejects_bad_url() {
        let mut cfg = config(HttpMethod::Get);
        cfg.url = "example.com".to_string();
        assert_eq!(
            prepare(&cfg).unwrap_err(),
            "URL must start with http:// or https://"
        );
    }

    #[test]
    fn test_decode_body() {
        let json = decode_body(Some("application/json; charset=utf-8"), r#"{"b":1,"a":2}"#)
            .unwrap();
        assert_eq!(json, parse_json(r#"{"b":1,"a":2}"#).unwrap());

        let text = decode_body(Some("text/plain"), "{\"not\":\"parsed\"}").unwrap();
        assert_eq!(text, DecodedValue::from("{\"not\":\"parsed\"}"));

        assert_eq!(decode_body(None, "x").unwrap(), DecodedValue::from("x"));

        let err = decode_body(Some("application/json"), "{oops").unwrap_err();
        assert!(err.starts_with("Failed to parse JSON response"));
    }

    #[test]
    fn test_received_headers_keep_non_ascii_values() {
        use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-greeting",
            HeaderValue::from_bytes("café".as_bytes()).unwrap(),
        );

        let pairs = received_headers(&headers);
        assert!(pairs.contains(&("content-type".to_string(), "application/json".to_string())));
        assert!(pairs.contains(&("x-greeting".to_string(), "café".to_string())));
    }
}
