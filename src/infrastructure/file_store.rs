use crate::error::{AppError, AppResult};
use crate::infrastructure::data_source::{DataSource, INDEX_FILE, TABLE_FILE, WORD_INDEX_FILE};
use crate::models::{LevelIndex, VocabularyEntry, WordIndexEntry};
use serde::de::DeserializeOwned;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// 디렉터리에서 데이터셋 JSON을 읽는 저장소
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// JSON 파일 하나를 읽어 역직렬화
    async fn read_json<T: DeserializeOwned>(&self, file: &str) -> AppResult<T> {
        let path = self.dir.join(file);
        debug!("데이터 파일 읽는 중: {}", path.display());

        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::not_found(path.display().to_string()));
            }
            Err(e) => return Err(AppError::read_failed(path.display().to_string(), e)),
        };

        serde_json::from_str(&content).map_err(|e| AppError::parse_failed(file, e))
    }
}

impl DataSource for FileStore {
    async fn get_index(&self) -> AppResult<LevelIndex> {
        self.read_json(INDEX_FILE).await
    }

    async fn get_level(&self, file: &str) -> AppResult<Vec<VocabularyEntry>> {
        self.read_json(file).await
    }

    async fn get_table(&self) -> AppResult<Vec<VocabularyEntry>> {
        self.read_json(TABLE_FILE).await
    }

    async fn get_word_index(&self) -> AppResult<Vec<WordIndexEntry>> {
        self.read_json(WORD_INDEX_FILE).await
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}
