//! REST endpoint table for the drive backend.

use drive_model::is_root_folder;

/// Path prefix under the backend origin for every API route.
pub const API_PREFIX: &str = "/api/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// HTTP verbs used by the client.
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// Returns the method token.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A resolved request target relative to [`API_PREFIX`].
pub struct Endpoint {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path below the API prefix, starting with `/`.
    pub path: String,
    /// Query parameters in order.
    pub query: Vec<(&'static str, String)>,
}

impl Endpoint {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// `GET /filesystem/all`
    pub fn all_nodes() -> Self {
        Self::new(HttpMethod::Get, "/filesystem/all")
    }

    /// `GET /filesystem?parentId=` with the parameter omitted for the root.
    pub fn nodes_by_parent(parent_id: &str) -> Self {
        let mut endpoint = Self::new(HttpMethod::Get, "/filesystem");
        if !is_root_folder(parent_id) {
            endpoint.query.push(("parentId", parent_id.to_string()));
        }
        endpoint
    }

    /// `POST /filesystem`
    pub fn create_node() -> Self {
        Self::new(HttpMethod::Post, "/filesystem")
    }

    /// `POST /filesystem/upload` (multipart)
    pub fn upload_files() -> Self {
        Self::new(HttpMethod::Post, "/filesystem/upload")
    }

    /// `PATCH /filesystem/{id}`
    pub fn update_node(id: &str) -> Self {
        Self::new(HttpMethod::Patch, format!("/filesystem/{}", encode_segment(id)))
    }

    /// `DELETE /filesystem/{id}`
    pub fn delete_node(id: &str) -> Self {
        Self::new(HttpMethod::Delete, format!("/filesystem/{}", encode_segment(id)))
    }

    /// `GET /filesystem/{id}/breadcrumbs`
    pub fn breadcrumbs(folder_id: &str) -> Self {
        Self::new(
            HttpMethod::Get,
            format!("/filesystem/{}/breadcrumbs", encode_segment(folder_id)),
        )
    }

    /// `POST /auth/register`
    pub fn register() -> Self {
        Self::new(HttpMethod::Post, "/auth/register")
    }

    /// `POST /auth/login`
    pub fn login() -> Self {
        Self::new(HttpMethod::Post, "/auth/login")
    }

    /// `POST /auth/logout`
    pub fn logout() -> Self {
        Self::new(HttpMethod::Post, "/auth/logout")
    }

    /// `GET /auth/verify-email/{token}`
    pub fn verify_email(token: &str) -> Self {
        Self::new(
            HttpMethod::Get,
            format!("/auth/verify-email/{}", encode_segment(token)),
        )
    }

    /// `POST /auth/resend-verification-email`
    pub fn resend_verification_email() -> Self {
        Self::new(HttpMethod::Post, "/auth/resend-verification-email")
    }

    /// `POST /auth/forgot-password`
    pub fn forgot_password() -> Self {
        Self::new(HttpMethod::Post, "/auth/forgot-password")
    }

    /// `POST /auth/reset-password/{token}`
    pub fn reset_password(token: &str) -> Self {
        Self::new(
            HttpMethod::Post,
            format!("/auth/reset-password/{}", encode_segment(token)),
        )
    }

    /// `GET /auth/me`
    pub fn me() -> Self {
        Self::new(HttpMethod::Get, "/auth/me")
    }

    /// `GET /auth/google` (browser redirect target, not fetched)
    pub fn google_login() -> Self {
        Self::new(HttpMethod::Get, "/auth/google")
    }

    /// Joins this endpoint onto `backend_url`, including [`API_PREFIX`] and the query string.
    pub fn url(&self, backend_url: &str) -> String {
        self.url_with_prefix(backend_url, API_PREFIX)
    }

    /// Like [`Endpoint::url`] with a configured API prefix.
    pub fn url_with_prefix(&self, backend_url: &str, api_prefix: &str) -> String {
        let prefix = api_prefix.trim_end_matches('/');
        let mut url = String::with_capacity(backend_url.len() + prefix.len() + self.path.len());
        url.push_str(backend_url.trim_end_matches('/'));
        if !prefix.is_empty() && !prefix.starts_with('/') {
            url.push('/');
        }
        url.push_str(prefix);
        url.push_str(&self.path);
        for (idx, (key, value)) in self.query.iter().enumerate() {
            url.push(if idx == 0 { '?' } else { '&' });
            url.push_str(key);
            url.push('=');
            url.push_str(&encode_segment(value));
        }
        url
    }
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_listing_omits_parent_parameter() {
        assert_eq!(
            Endpoint::nodes_by_parent("root").url("http://localhost:5000/"),
            "http://localhost:5000/api/v1/filesystem"
        );
        assert_eq!(
            Endpoint::nodes_by_parent("abc123").url("http://localhost:5000"),
            "http://localhost:5000/api/v1/filesystem?parentId=abc123"
        );
    }

    #[test]
    fn path_segments_are_encoded() {
        let endpoint = Endpoint::reset_password("a/b c");
        assert_eq!(endpoint.path, "/auth/reset-password/a%2Fb%20c");
        assert_eq!(endpoint.method, HttpMethod::Post);
        assert_eq!(
            Endpoint::breadcrumbs("f1").url("https://drive.example"),
            "https://drive.example/api/v1/filesystem/f1/breadcrumbs"
        );
    }

    #[test]
    fn configured_prefix_is_normalized() {
        let endpoint = Endpoint::me();
        assert_eq!(
            endpoint.url_with_prefix("http://api.local/", "v2/"),
            "http://api.local/v2/auth/me"
        );
        assert_eq!(
            endpoint.url_with_prefix("http://api.local", ""),
            "http://api.local/auth/me"
        );
    }

    #[test]
    fn mutation_methods() {
        assert_eq!(Endpoint::update_node("x").method.as_str(), "PATCH");
        assert_eq!(Endpoint::delete_node("x").method.as_str(), "DELETE");
        assert_eq!(Endpoint::upload_files().path, "/filesystem/upload");
    }
}
