use crate::error::{AppError, AppResult};
use crate::infrastructure::data_source::{DataSource, INDEX_FILE, TABLE_FILE, WORD_INDEX_FILE};
use crate::models::{
    level_file_name, LevelFile, LevelIndex, VocabularyEntry, WordIndexEntry,
};
use std::collections::{BTreeMap, HashMap};

/// 메모리 안의 데이터셋
///
/// 항목 목록에서 레벨 색인, 단어 색인, 테이블을 모두 파생한다.
/// 테스트나 데이터를 직접 넘기는 임베딩 용도.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: HashMap<String, Vec<VocabularyEntry>>,
    index: LevelIndex,
    entries: Vec<VocabularyEntry>,
    unavailable: bool,
}

impl MemoryStore {
    pub fn from_entries(entries: Vec<VocabularyEntry>) -> Self {
        let mut files: HashMap<String, Vec<VocabularyEntry>> = HashMap::new();
        let mut index = BTreeMap::new();

        for entry in &entries {
            let file = level_file_name(entry.level);
            files.entry(file.clone()).or_default().push(entry.clone());
            index
                .entry(entry.level.label().to_string())
                .or_insert(LevelFile { file, count: 0 })
                .count += 1;
        }

        Self {
            files,
            index,
            entries,
            unavailable: false,
        }
    }

    /// 모든 조회가 실패하는 저장소 (원본 접근 불가 상황 재현)
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn check_available(&self, resource: &str) -> AppResult<()> {
        if self.unavailable {
            Err(AppError::not_found(resource))
        } else {
            Ok(())
        }
    }
}

impl DataSource for MemoryStore {
    async fn get_index(&self) -> AppResult<LevelIndex> {
        self.check_available(INDEX_FILE)?;
        Ok(self.index.clone())
    }

    async fn get_level(&self, file: &str) -> AppResult<Vec<VocabularyEntry>> {
        self.check_available(file)?;
        self.files
            .get(file)
            .cloned()
            .ok_or_else(|| AppError::not_found(file))
    }

    async fn get_table(&self) -> AppResult<Vec<VocabularyEntry>> {
        self.check_available(TABLE_FILE)?;
        Ok(self
            .entries
            .iter()
            .map(|entry| VocabularyEntry {
                pre_generated_questions: BTreeMap::new(),
                ..entry.clone()
            })
            .collect())
    }

    async fn get_word_index(&self) -> AppResult<Vec<WordIndexEntry>> {
        self.check_available(WORD_INDEX_FILE)?;
        Ok(self
            .entries
            .iter()
            .map(|entry| WordIndexEntry {
                w: entry.word.clone(),
                l: entry.level,
            })
            .collect())
    }

    fn describe(&self) -> String {
        format!("memory ({} entries)", self.entries.len())
    }
}
