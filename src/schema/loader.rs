//! Protocol schema loaders
//!
//! The schema document is obtained exactly once, before generation begins.
//! A failed load aborts the run; there is no stale-document fallback.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio::fs;
use url::Url;

use crate::generation::GenerationError;
use crate::schema::ProtocolSchema;

/// Loads a protocol schema document from a source.
#[async_trait]
pub trait SchemaLoader: Send + Sync {
    /// Load and deserialize a schema from a source string.
    async fn load(&self, source: &str) -> Result<ProtocolSchema, GenerationError>;
}

/// Loads protocol schemas from HTTP/HTTPS URLs.
pub struct HttpSchemaLoader {
    client: Client,
}

impl HttpSchemaLoader {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

impl Default for HttpSchemaLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaLoader for HttpSchemaLoader {
    async fn load(&self, source: &str) -> Result<ProtocolSchema, GenerationError> {
        if !source.starts_with("http://") && !source.starts_with("https://") {
            return Err(GenerationError::Load(format!(
                "HttpSchemaLoader only handles HTTP(S) URLs, got: {source}"
            )));
        }

        let response = self.client.get(source).send().await.map_err(|e| {
            GenerationError::Load(format!("Failed to fetch protocol schema from {source}: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(GenerationError::Load(format!(
                "HTTP {status} when fetching {source}"
            )));
        }

        let content = response
            .text()
            .await
            .map_err(|e| GenerationError::Load(format!("Failed to read response body: {e}")))?;

        serde_json::from_str(&content).map_err(GenerationError::Json)
    }
}

/// Loads protocol schemas from local files.
pub struct FileSchemaLoader;

impl FileSchemaLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSchemaLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaLoader for FileSchemaLoader {
    async fn load(&self, source: &str) -> Result<ProtocolSchema, GenerationError> {
        let content = fs::read_to_string(source)
            .await
            .map_err(GenerationError::Io)?;

        serde_json::from_str(&content).map_err(GenerationError::Json)
    }
}

/// Composite loader that dispatches on the source's scheme.
pub struct CompositeSchemaLoader {
    http: HttpSchemaLoader,
    file: FileSchemaLoader,
}

impl CompositeSchemaLoader {
    pub fn new() -> Self {
        Self {
            http: HttpSchemaLoader::new(),
            file: FileSchemaLoader::new(),
        }
    }
}

impl Default for CompositeSchemaLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaLoader for CompositeSchemaLoader {
    async fn load(&self, source: &str) -> Result<ProtocolSchema, GenerationError> {
        let scheme = Url::parse(source).ok().map(|url| url.scheme().to_string());
        match scheme.as_deref() {
            Some("http") | Some("https") => {
                tracing::debug!("CompositeSchemaLoader: using HTTP loader for {source}");
                self.http.load(source).await
            }
            _ => {
                tracing::debug!("CompositeSchemaLoader: using file loader for {source}");
                self.file.load(source).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SCHEMA_JSON: &str = r#"{
        "requests": [],
        "enums": [],
        "events": []
    }"#;

    #[tokio::test]
    async fn test_http_loader() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/protocol.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(SCHEMA_JSON)
                    .insert_header("content-type", "application/json"),
            )
            .mount(&mock_server)
            .await;

        let loader = HttpSchemaLoader::new();
        let url = format!("{}/protocol.json", mock_server.uri());
        let schema = loader.load(&url).await.expect("load should succeed");

        assert!(schema.requests.is_empty());
        assert!(schema.enums.is_empty());
        assert!(schema.events.is_empty());
    }

    #[tokio::test]
    async fn test_http_loader_404() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/missing.json"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let loader = HttpSchemaLoader::new();
        let url = format!("{}/missing.json", mock_server.uri());
        let result = loader.load(&url).await;

        match result {
            Err(GenerationError::Load(msg)) => assert!(msg.contains("HTTP 404")),
            other => panic!("expected Load error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_loader_rejects_non_http_source() {
        let loader = HttpSchemaLoader::new();
        let result = loader.load("/tmp/protocol.json").await;

        match result {
            Err(GenerationError::Load(msg)) => assert!(msg.contains("only handles HTTP")),
            other => panic!("expected Load error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_file_loader() {
        let dir = tempfile::tempdir().unwrap();
        let schema_path = dir.path().join("protocol.json");
        tokio::fs::write(&schema_path, SCHEMA_JSON).await.unwrap();

        let loader = FileSchemaLoader::new();
        let schema = loader
            .load(schema_path.to_str().unwrap())
            .await
            .expect("load should succeed");

        assert!(schema.requests.is_empty());
    }

    #[tokio::test]
    async fn test_composite_loader_dispatches_on_scheme() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/protocol.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SCHEMA_JSON))
            .mount(&mock_server)
            .await;

        let loader = CompositeSchemaLoader::new();

        // An http(s) URL goes through the HTTP loader.
        let url = format!("{}/protocol.json", mock_server.uri());
        assert!(loader.load(&url).await.is_ok());

        // A bare path has no URL scheme and goes through the file loader.
        let dir = tempfile::tempdir().unwrap();
        let schema_path = dir.path().join("protocol.json");
        tokio::fs::write(&schema_path, SCHEMA_JSON).await.unwrap();
        assert!(loader.load(schema_path.to_str().unwrap()).await.is_ok());
    }

    #[tokio::test]
    async fn test_file_loader_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let schema_path = dir.path().join("protocol.json");
        tokio::fs::write(&schema_path, "{ not json").await.unwrap();

        let loader = FileSchemaLoader::new();
        let result = loader.load(schema_path.to_str().unwrap()).await;

        assert!(matches!(result, Err(GenerationError::Json(_))));
    }
}
