use crate::core::{ConfigProvider, Document, PatchResult, Pipeline, Storage};
use crate::utils::error::Result;
use std::path::Path;

pub struct SimplePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> SimplePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SimplePipeline<S, C> {
    async fn extract(&self) -> Result<Document> {
        let target = self.config.target_path();
        tracing::debug!("Reading target file: {}", target);

        let data = self.storage.read_file(target).await?;
        let content = String::from_utf8(data)?;

        tracing::debug!("Decoded {} bytes of UTF-8", content.len());
        Ok(Document { content })
    }

    async fn transform(&self, document: Document) -> Result<PatchResult> {
        let search = self.config.search_text();
        let occurrences = document.content.matches(search).count();
        tracing::debug!("Found {} occurrence(s) of the search text", occurrences);

        // 沒有匹配時內容保持原樣
        let content = if occurrences == 0 {
            document.content
        } else {
            document
                .content
                .replace(search, self.config.replacement_text())
        };

        Ok(PatchResult {
            content,
            occurrences,
        })
    }

    async fn load(&self, result: PatchResult) -> Result<String> {
        let target = self.config.target_path();
        tracing::debug!("Writing {} bytes back to: {}", result.content.len(), target);

        self.storage
            .write_file(target, result.content.as_bytes())
            .await?;

        let output_path = Path::new(self.config.project_root()).join(target);
        Ok(output_path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::PatchError;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put_file(&self, path: &str, data: &[u8]) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }

        async fn file_count(&self) -> usize {
            let files = self.files.lock().await;
            files.len()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                PatchError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        project_root: String,
        target_path: String,
        search: String,
        replacement: String,
    }

    impl MockConfig {
        fn new(search: &str, replacement: &str) -> Self {
            Self {
                project_root: ".".to_string(),
                target_path: "page.tsx".to_string(),
                search: search.to_string(),
                replacement: replacement.to_string(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn project_root(&self) -> &str {
            &self.project_root
        }

        fn target_path(&self) -> &str {
            &self.target_path
        }

        fn search_text(&self) -> &str {
            &self.search
        }

        fn replacement_text(&self) -> &str {
            &self.replacement
        }
    }

    const RECORD_INITIALIZER: &str = "setNewRecord({ client_id: '', type: 'X', details: '' });";
    const EXTENDED_INITIALIZER: &str =
        "setNewRecord({ client_id: '', type: 'X', details: '', receiver_id: '' });";

    #[tokio::test]
    async fn test_extract_reads_target_content() {
        let storage = MockStorage::new();
        storage.put_file("page.tsx", b"const x = 1;\n").await;

        let config = MockConfig::new("a", "b");
        let pipeline = SimplePipeline::new(storage, config);

        let document = pipeline.extract().await.unwrap();
        assert_eq!(document.content, "const x = 1;\n");
    }

    #[tokio::test]
    async fn test_extract_missing_target_is_not_found() {
        let storage = MockStorage::new();
        let config = MockConfig::new("a", "b");
        let pipeline = SimplePipeline::new(storage.clone(), config);

        let err = pipeline.extract().await.unwrap_err();
        assert!(
            matches!(&err, PatchError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound)
        );
        // 失敗的讀取不會建立任何檔案
        assert_eq!(storage.file_count().await, 0);
    }

    #[tokio::test]
    async fn test_extract_rejects_non_utf8_content() {
        let storage = MockStorage::new();
        storage.put_file("page.tsx", &[0xff, 0xfe, 0x00, 0x80]).await;

        let config = MockConfig::new("a", "b");
        let pipeline = SimplePipeline::new(storage, config);

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, PatchError::DecodeError(_)));
    }

    #[tokio::test]
    async fn test_transform_extends_record_initializer() {
        let storage = MockStorage::new();
        let config = MockConfig::new(RECORD_INITIALIZER, EXTENDED_INITIALIZER);
        let pipeline = SimplePipeline::new(storage, config);

        let document = Document {
            content: RECORD_INITIALIZER.to_string(),
        };
        let result = pipeline.transform(document).await.unwrap();

        assert_eq!(result.content, EXTENDED_INITIALIZER);
        assert_eq!(result.occurrences, 1);
    }

    #[tokio::test]
    async fn test_transform_replaces_every_occurrence() {
        let storage = MockStorage::new();
        let config = MockConfig::new(RECORD_INITIALIZER, EXTENDED_INITIALIZER);
        let pipeline = SimplePipeline::new(storage, config);

        let content = format!(
            "function handleAddRecord() {{\n  {}\n}}\n\nfunction resetForm() {{\n  {}\n}}\n",
            RECORD_INITIALIZER, RECORD_INITIALIZER
        );
        let expected = format!(
            "function handleAddRecord() {{\n  {}\n}}\n\nfunction resetForm() {{\n  {}\n}}\n",
            EXTENDED_INITIALIZER, EXTENDED_INITIALIZER
        );

        let result = pipeline.transform(Document { content }).await.unwrap();

        assert_eq!(result.occurrences, 2);
        assert_eq!(result.content, expected);
    }

    #[tokio::test]
    async fn test_transform_without_match_keeps_content_identical() {
        let storage = MockStorage::new();
        let config = MockConfig::new(RECORD_INITIALIZER, EXTENDED_INITIALIZER);
        let pipeline = SimplePipeline::new(storage, config);

        let content = "export default function RecordsPage() { return null; }\n".to_string();
        let result = pipeline
            .transform(Document {
                content: content.clone(),
            })
            .await
            .unwrap();

        assert_eq!(result.occurrences, 0);
        assert_eq!(result.content, content);
    }

    #[tokio::test]
    async fn test_transform_is_idempotent_after_first_apply() {
        let storage = MockStorage::new();
        let config = MockConfig::new(RECORD_INITIALIZER, EXTENDED_INITIALIZER);
        let pipeline = SimplePipeline::new(storage, config);

        let first = pipeline
            .transform(Document {
                content: format!("  {}\n", RECORD_INITIALIZER),
            })
            .await
            .unwrap();
        assert_eq!(first.occurrences, 1);

        let second = pipeline
            .transform(Document {
                content: first.content.clone(),
            })
            .await
            .unwrap();

        assert_eq!(second.occurrences, 0);
        assert_eq!(second.content, first.content);
    }

    #[tokio::test]
    async fn test_transform_with_empty_replacement_deletes_snippet() {
        let storage = MockStorage::new();
        let config = MockConfig::new(RECORD_INITIALIZER, "");
        let pipeline = SimplePipeline::new(storage, config);

        let result = pipeline
            .transform(Document {
                content: format!("before {} after", RECORD_INITIALIZER),
            })
            .await
            .unwrap();

        assert_eq!(result.content, "before  after");
        assert_eq!(result.occurrences, 1);
    }

    #[tokio::test]
    async fn test_load_writes_patched_content_to_target() {
        let storage = MockStorage::new();
        let config = MockConfig::new("a", "b");
        let pipeline = SimplePipeline::new(storage.clone(), config);

        let result = PatchResult {
            content: EXTENDED_INITIALIZER.to_string(),
            occurrences: 1,
        };
        pipeline.load(result).await.unwrap();

        let written = storage.get_file("page.tsx").await.unwrap();
        assert_eq!(written, EXTENDED_INITIALIZER.as_bytes());
    }

    #[tokio::test]
    async fn test_load_reports_path_under_project_root() {
        let storage = MockStorage::new();
        let mut config = MockConfig::new("a", "b");
        config.project_root = "webapp".to_string();
        config.target_path = "src/app/dashboard/records/page.tsx".to_string();
        let pipeline = SimplePipeline::new(storage, config);

        let result = PatchResult {
            content: String::new(),
            occurrences: 0,
        };
        let output_path = pipeline.load(result).await.unwrap();

        assert_eq!(output_path, "webapp/src/app/dashboard/records/page.tsx");
    }
}
