//! 어휘 데이터 캐시 - 인프라 계층
//!
//! 데이터 접근 능력(`DataSource`)을 소유하고, 레벨별 데이터와 단어 색인을
//! 처음 한 번만 가져와 프로세스 수명 동안 보관한다.
//!
//! 조회 실패는 빈 데이터로 취급한다. 다만 어떤 리소스가 실패했는지는 기록해 두어
//! 호출자가 "원본 접근 불가"와 "정말 비어 있음"을 구분할 수 있다.

use crate::error::AppError;
use crate::infrastructure::data_source::{DataSource, INDEX_FILE, TABLE_FILE, WORD_INDEX_FILE};
use crate::models::{Level, LevelIndex, VocabularyEntry, WordLevelIndex};
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

/// 레벨별 어휘 캐시
pub struct LexicalCache<S> {
    source: S,
    index: OnceCell<LevelIndex>,
    word_index: OnceCell<Arc<WordLevelIndex>>,
    table: OnceCell<Arc<Vec<VocabularyEntry>>>,
    levels: HashMap<Level, OnceCell<Arc<Vec<VocabularyEntry>>>>,
    failed: Mutex<BTreeSet<String>>,
}

impl<S: DataSource> LexicalCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            index: OnceCell::new(),
            word_index: OnceCell::new(),
            table: OnceCell::new(),
            levels: Level::ALL.iter().map(|&level| (level, OnceCell::new())).collect(),
            failed: Mutex::new(BTreeSet::new()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// 레벨 데이터 (문항 원문 포함)
    ///
    /// 색인에 레벨이 없으면 빈 목록을 캐시한다. 조회 실패는 캐시하지 않는다.
    pub async fn level(&self, level: Level) -> Arc<Vec<VocabularyEntry>> {
        let Some(cell) = self.levels.get(&level) else {
            return Arc::default();
        };

        match cell.get_or_try_init(|| self.fetch_level(level)).await {
            Ok(entries) => Arc::clone(entries),
            Err((resource, e)) => {
                self.record_failure(&resource, &e);
                Arc::default()
            }
        }
    }

    /// 단어 → 레벨 색인
    pub async fn word_index(&self) -> Arc<WordLevelIndex> {
        let result = self
            .word_index
            .get_or_try_init(|| async {
                let entries = self.source.get_word_index().await?;
                let index = WordLevelIndex::from_entries(&entries);
                self.clear_failure(WORD_INDEX_FILE);
                info!("✓ 단어 색인 로드 완료: {} 개 단어", index.len());
                Ok::<_, AppError>(Arc::new(index))
            })
            .await;

        match result {
            Ok(index) => Arc::clone(index),
            Err(e) => {
                self.record_failure(WORD_INDEX_FILE, &e);
                Arc::default()
            }
        }
    }

    /// 표시용 테이블 (문항 원문 제외)
    pub async fn table(&self) -> Arc<Vec<VocabularyEntry>> {
        let result = self
            .table
            .get_or_try_init(|| async {
                let entries = self.source.get_table().await?;
                self.clear_failure(TABLE_FILE);
                debug!("테이블 데이터 로드 완료: {} 개 항목", entries.len());
                Ok::<_, AppError>(Arc::new(entries))
            })
            .await;

        match result {
            Ok(table) => Arc::clone(table),
            Err(e) => {
                self.record_failure(TABLE_FILE, &e);
                Arc::default()
            }
        }
    }

    /// 지금까지 조회에 실패한 리소스
    pub fn failed_resources(&self) -> Vec<String> {
        self.failed
            .lock()
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// 아직 복구되지 않은 조회 실패가 있는지
    pub fn source_unavailable(&self) -> bool {
        !self.failed_resources().is_empty()
    }

    async fn fetch_level(&self, level: Level) -> Result<Arc<Vec<VocabularyEntry>>, (String, AppError)> {
        let index = self
            .index
            .get_or_try_init(|| self.source.get_index())
            .await
            .map_err(|e| (INDEX_FILE.to_string(), e))?;
        self.clear_failure(INDEX_FILE);

        let Some(level_file) = index.get(level.label()) else {
            debug!("색인에 {} 레벨이 없습니다", level);
            return Ok(Arc::default());
        };

        let entries = self
            .source
            .get_level(&level_file.file)
            .await
            .map_err(|e| (level_file.file.clone(), e))?;
        self.clear_failure(&level_file.file);

        info!("✓ {} 레벨 로드 완료: {} 개 항목", level, entries.len());
        Ok(Arc::new(entries))
    }

    fn record_failure(&self, resource: &str, error: &AppError) {
        warn!("⚠️ 데이터 조회 실패, 빈 데이터로 처리합니다 ({}): {}", resource, error);
        if let Ok(mut failed) = self.failed.lock() {
            failed.insert(resource.to_string());
        }
    }

    /// 다시 읽기에 성공한 리소스는 실패 목록에서 뺀다
    fn clear_failure(&self, resource: &str) {
        if let Ok(mut failed) = self.failed.lock() {
            if failed.remove(resource) {
                info!("✓ 데이터 조회 복구: {}", resource);
            }
        }
    }
}
