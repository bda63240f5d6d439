use crate::error::{AppError, AppResult};
use crate::infrastructure::data_source::{DataSource, INDEX_FILE, TABLE_FILE, WORD_INDEX_FILE};
use crate::models::{LevelIndex, VocabularyEntry, WordIndexEntry};
use serde::de::DeserializeOwned;
use tracing::debug;

/// 정적 웹 경로(`/data/*.json`)에서 데이터셋을 가져오는 저장소
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, file: &str) -> String {
        format!("{}/{}", self.base_url, file.trim_start_matches('/'))
    }

    async fn fetch_json<T: DeserializeOwned>(&self, file: &str) -> AppResult<T> {
        let url = self.url_for(file);
        debug!("데이터 요청 중: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::request_failed(&url, e))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::not_found(url));
        }

        let body = response
            .error_for_status()
            .map_err(|e| AppError::request_failed(&url, e))?
            .text()
            .await
            .map_err(|e| AppError::request_failed(&url, e))?;

        serde_json::from_str(&body).map_err(|e| AppError::parse_failed(file, e))
    }
}

impl DataSource for HttpStore {
    async fn get_index(&self) -> AppResult<LevelIndex> {
        self.fetch_json(INDEX_FILE).await
    }

    async fn get_level(&self, file: &str) -> AppResult<Vec<VocabularyEntry>> {
        self.fetch_json(file).await
    }

    async fn get_table(&self) -> AppResult<Vec<VocabularyEntry>> {
        self.fetch_json(TABLE_FILE).await
    }

    async fn get_word_index(&self) -> AppResult<Vec<WordIndexEntry>> {
        self.fetch_json(WORD_INDEX_FILE).await
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join_handles_slashes() {
        let store = HttpStore::new("http://localhost:5173/data/");
        assert_eq!(
            store.url_for("/vocab-index.json"),
            "http://localhost:5173/data/vocab-index.json"
        );
        assert_eq!(store.describe(), "http://localhost:5173/data");
    }
}
