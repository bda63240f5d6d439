//! 데이터 접근 능력
//!
//! 합성 로직은 전역 캐시 대신 이 트레이트를 통해서만 데이터셋에 접근한다.

use crate::error::AppResult;
use crate::models::{LevelIndex, VocabularyEntry, WordIndexEntry};

/// 레벨 색인 파일 이름
pub const INDEX_FILE: &str = "vocab-index.json";
/// 테이블(문항 제외) 파일 이름
pub const TABLE_FILE: &str = "vocab-table.json";
/// 단어 색인 파일 이름
pub const WORD_INDEX_FILE: &str = "vocab-word-index.json";

/// 데이터셋 조회 능력
///
/// 구현체: `FileStore`, `HttpStore`, `MemoryStore`
#[allow(async_fn_in_trait)]
pub trait DataSource {
    /// 레벨 레이블 → 데이터 파일 색인
    async fn get_index(&self) -> AppResult<LevelIndex>;

    /// 레벨 데이터 파일 (문항 원문 포함)
    async fn get_level(&self, file: &str) -> AppResult<Vec<VocabularyEntry>>;

    /// 표시용 테이블 (문항 원문 제외)
    async fn get_table(&self) -> AppResult<Vec<VocabularyEntry>>;

    /// 단어 → 레벨 평면 색인
    async fn get_word_index(&self) -> AppResult<Vec<WordIndexEntry>>;

    /// 로그용 위치 설명
    fn describe(&self) -> String;
}
