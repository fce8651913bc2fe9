//! Artifact output
//!
//! Artifacts are fully built in memory before any write. Each file handle
//! is scoped to one artifact and released before the next one is opened.

use std::path::PathBuf;

use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::generation::GenerationError;

/// One generated source file.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub content: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Write all artifacts to the filesystem, creating parent directories as
/// needed. Writes are sequential; a failure aborts without touching the
/// remaining artifacts.
pub async fn write_artifacts(artifacts: &[Artifact]) -> Result<(), GenerationError> {
    for artifact in artifacts {
        if let Some(parent) = artifact.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut file = fs::File::create(&artifact.path).await?;
        file.write_all(artifact.content.as_bytes()).await?;
        file.flush().await?;
        tracing::debug!(path = %artifact.path.display(), bytes = artifact.content.len(), "wrote artifact");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_write_artifacts_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = vec![
            Artifact::new(dir.path().join("protocol/requests.dart"), "// requests\n"),
            Artifact::new(dir.path().join("protocol/enums.dart"), "// enums\n"),
        ];

        write_artifacts(&artifacts).await.unwrap();

        let written = tokio::fs::read_to_string(dir.path().join("protocol/requests.dart"))
            .await
            .unwrap();
        assert_eq!(written, "// requests\n");
    }

    #[tokio::test]
    async fn test_write_failure_surfaces_io_error() {
        // The parent of an existing file is not a directory; create_dir_all fails.
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        tokio::fs::write(&blocker, "x").await.unwrap();

        let artifacts = vec![Artifact::new(blocker.join("nested/out.dart"), "")];
        let result = write_artifacts(&artifacts).await;

        assert!(matches!(result, Err(GenerationError::Io(_))));
    }
}
