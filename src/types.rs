use crate::value::DecodedValue;
use crate::viewer::html;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }

    pub fn next(self) -> Self {
        match self {
            HttpMethod::Get => HttpMethod::Post,
            HttpMethod::Post => HttpMethod::Put,
            HttpMethod::Put => HttpMethod::Delete,
            HttpMethod::Delete => HttpMethod::Patch,
            HttpMethod::Patch => HttpMethod::Get,
        }
    }

    /// Everything except GET may carry a body
    pub fn supports_body(self) -> bool {
        self != HttpMethod::Get
    }

    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthType {
    #[default]
    None,
    Basic,
    Bearer,
    Jwt,
}

impl AuthType {
    pub fn label(self) -> &'static str {
        match self {
            AuthType::None => "None",
            AuthType::Basic => "Basic",
            AuthType::Bearer => "Bearer",
            AuthType::Jwt => "JWT",
        }
    }

    pub fn next(self) -> Self {
        match self {
            AuthType::None => AuthType::Basic,
            AuthType::Basic => AuthType::Bearer,
            AuthType::Bearer => AuthType::Jwt,
            AuthType::Jwt => AuthType::None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BodyContentType {
    #[default]
    Json,
    FormUrlEncoded,
    PlainText,
    Xml,
}

impl BodyContentType {
    pub fn mime(self) -> &'static str {
        match self {
            BodyContentType::Json => "application/json",
            BodyContentType::FormUrlEncoded => "application/x-www-form-urlencoded",
            BodyContentType::PlainText => "text/plain",
            BodyContentType::Xml => "application/xml",
        }
    }

    pub fn next(self) -> Self {
        match self {
            BodyContentType::Json => BodyContentType::FormUrlEncoded,
            BodyContentType::FormUrlEncoded => BodyContentType::PlainText,
            BodyContentType::PlainText => BodyContentType::Xml,
            BodyContentType::Xml => BodyContentType::Json,
        }
    }
}

/// Fields of the request form, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestField {
    Method,
    Url,
    Headers,
    Auth,
    Username,
    Password,
    Token,
    ContentType,
    Body,
}

impl RequestField {
    pub fn label(self) -> &'static str {
        match self {
            RequestField::Method => "Method",
            RequestField::Url => "URL",
            RequestField::Headers => "Headers",
            RequestField::Auth => "Auth",
            RequestField::Username => "Username",
            RequestField::Password => "Password",
            RequestField::Token => "Token",
            RequestField::ContentType => "Content-Type",
            RequestField::Body => "Body",
        }
    }

    pub fn is_multiline(self) -> bool {
        matches!(self, RequestField::Headers | RequestField::Body)
    }
}

/// Tracks which main panel has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelFocus {
    #[default]
    Request, // Left panel
    Response, // Right panel
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing into a text field of the request form
    Editing(RequestField),
    /// Picking a recent URL
    History,
}

/// Everything needed to send one request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestConfig {
    pub method: HttpMethod,
    pub url: String,
    /// One `Key: Value` per line
    pub headers: String,
    pub auth: AuthType,
    pub username: String,
    pub password: String,
    pub token: String,
    pub content_type: BodyContentType,
    pub body: String,
}

impl RequestConfig {
    /// Form fields shown for the current method and auth type
    pub fn visible_fields(&self) -> Vec<RequestField> {
        let mut fields = vec![
            RequestField::Method,
            RequestField::Url,
            RequestField::Headers,
            RequestField::Auth,
        ];
        match self.auth {
            AuthType::None => {}
            AuthType::Basic => {
                fields.push(RequestField::Username);
                fields.push(RequestField::Password);
            }
            AuthType::Bearer | AuthType::Jwt => fields.push(RequestField::Token),
        }
        if self.method.supports_body() {
            fields.push(RequestField::ContentType);
            fields.push(RequestField::Body);
        }
        fields
    }

    /// Current text of a text field; selectors have none
    pub fn text(&self, field: RequestField) -> Option<&str> {
        match field {
            RequestField::Url => Some(&self.url),
            RequestField::Headers => Some(&self.headers),
            RequestField::Username => Some(&self.username),
            RequestField::Password => Some(&self.password),
            RequestField::Token => Some(&self.token),
            RequestField::Body => Some(&self.body),
            RequestField::Method | RequestField::Auth | RequestField::ContentType => None,
        }
    }

    pub fn set_text(&mut self, field: RequestField, value: String) {
        match field {
            RequestField::Url => self.url = value,
            RequestField::Headers => self.headers = value,
            RequestField::Username => self.username = value,
            RequestField::Password => self.password = value,
            RequestField::Token => self.token = value,
            RequestField::Body => self.body = value,
            RequestField::Method | RequestField::Auth | RequestField::ContentType => {}
        }
    }
}

/// A completed request, immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseSnapshot {
    /// HTTP status code, 0 when no response arrived
    pub status: u16,

    /// Reason phrase ("OK", "Not Found", etc.)
    pub status_text: String,

    /// Headers in received order, names as received
    pub headers: Vec<(String, String)>,

    pub body: DecodedValue,

    /// Network or decode failure
    pub error: Option<String>,

    pub duration: Duration,
}

impl ResponseSnapshot {
    /// Snapshot for a request that produced no usable response
    pub fn error(message: String, duration: Duration) -> Self {
        Self {
            status: 0,
            status_text: String::new(),
            headers: Vec::new(),
            body: DecodedValue::Null,
            error: Some(message),
            duration,
        }
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    pub fn is_html(&self) -> bool {
        html::is_html(self.content_type(), &self.body)
    }

    /// The error text, if any and non-empty
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }

    pub fn status_class(&self) -> StatusClass {
        StatusClass::of(self.status)
    }
}

/// Status badge category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    Redirect,
    Failure,
}

impl StatusClass {
    pub fn of(status: u16) -> Self {
        match status {
            1..=299 => StatusClass::Success,
            300..=399 => StatusClass::Redirect,
            _ => StatusClass::Failure,
        }
    }
}

/// One-line feedback shown in the footer
#[derive(Debug, Clone, PartialEq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_cycle_wraps() {
        let mut method = HttpMethod::Get;
        let mut seen = Vec::new();
        for _ in 0..5 {
            seen.push(method.as_str());
            method = method.next();
        }
        assert_eq!(seen, vec!["GET", "POST", "PUT", "DELETE", "PATCH"]);
        assert_eq!(method, HttpMethod::Get);
    }

    #[test]
    fn test_visible_fields_follow_method_and_auth() {
        let mut config = RequestConfig::default();
        assert_eq!(
            config.visible_fields(),
            vec![
                RequestField::Method,
                RequestField::Url,
                RequestField::Headers,
                RequestField::Auth
            ]
        );

        config.auth = AuthType::Basic;
        config.method = HttpMethod::Post;
        let fields = config.visible_fields();
        assert!(fields.contains(&RequestField::Username));
        assert!(fields.contains(&RequestField::Password));
        assert!(!fields.contains(&RequestField::Token));
        assert_eq!(fields.last(), Some(&RequestField::Body));

        config.auth = AuthType::Jwt;
        assert!(config.visible_fields().contains(&RequestField::Token));
    }

    #[test]
    fn test_text_fields_round_trip() {
        let mut config = RequestConfig::default();
        config.set_text(RequestField::Url, "https://x.test".to_string());
        assert_eq!(config.text(RequestField::Url), Some("https://x.test"));
        assert_eq!(config.text(RequestField::Method), None);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let snapshot = ResponseSnapshot {
            status: 200,
            status_text: "OK".to_string(),
            headers: vec![("Content-Type".to_string(), "text/html; charset=utf-8".to_string())],
            body: DecodedValue::from("<p>x</p>"),
            error: None,
            duration: Duration::ZERO,
        };
        assert_eq!(snapshot.content_type(), Some("text/html; charset=utf-8"));
        assert!(snapshot.is_html());
    }

    #[test]
    fn test_error_snapshot() {
        let snapshot = ResponseSnapshot::error("Request timed out".to_string(), Duration::ZERO);
        assert_eq!(snapshot.status, 0);
        assert_eq!(snapshot.error_message(), Some("Request timed out"));
        assert_eq!(snapshot.body, DecodedValue::Null);

        let empty = ResponseSnapshot {
            error: Some(String::new()),
            ..snapshot
        };
        assert_eq!(empty.error_message(), None);
    }

    #[test]
    fn test_status_classes() {
        assert_eq!(StatusClass::of(204), StatusClass::Success);
        assert_eq!(StatusClass::of(301), StatusClass::Redirect);
        assert_eq!(StatusClass::of(404), StatusClass::Failure);
        assert_eq!(StatusClass::of(0), StatusClass::Failure);
    }
}
