//! 문제지 합성 흐름 - 흐름 계층
//!
//! 핵심 책임: 요청 하나가 문제지가 되기까지의 순서를 정한다
//!
//! 흐름 순서:
//! 1. extract → 파라미터 추출 + 단어 검증
//! 2. candidates → 레벨/단어/주제로 후보 어휘 결정
//! 3. assemble_worksheet → 풀 구성 → 선택 → 파싱 → 문제지

use anyhow::Result;
use futures::future::join_all;
use rand::Rng;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::infrastructure::{DataSource, LexicalCache};
use crate::models::{AnalysisResult, GenerationParameters, Level, VocabularyEntry, Worksheet};
use crate::services::{
    assemble_pool, filter_by_topic, filter_by_words, parse_raw_question, validate_words,
    ParameterExtractor, QuestionSelector,
};
use crate::utils::truncate_text;

/// 문제지 합성 흐름
///
/// - 데이터 캐시와 추출기를 소유한다
/// - 능력(services)을 순서대로 엮기만 하고 규칙은 갖지 않는다
/// - 요청 사이에 공유하는 가변 상태는 캐시뿐이다
pub struct SynthesisFlow<S, E> {
    cache: LexicalCache<S>,
    extractor: E,
    selector: QuestionSelector,
    default_count: u32,
}

impl<S: DataSource, E: ParameterExtractor> SynthesisFlow<S, E> {
    /// 새 합성 흐름 생성
    ///
    /// # 매개변수
    /// - `source`: 데이터 접근 능력
    /// - `extractor`: 파라미터 추출기
    /// - `config`: 기본 문항 수와 단어당 상한을 읽는다
    pub fn new(source: S, extractor: E, config: &Config) -> Self {
        Self {
            cache: LexicalCache::new(source),
            extractor,
            selector: QuestionSelector::new(config.per_word_cap),
            default_count: config.default_count,
        }
    }

    pub fn cache(&self) -> &LexicalCache<S> {
        &self.cache
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    /// 텍스트 분석 후 단어 검증까지 적용
    pub async fn extract(&self, text: &str) -> Result<AnalysisResult> {
        info!("🔍 요청 분석 중 ({}): {}", self.extractor.name(), truncate_text(text, 40));
        let result = self.extractor.extract(text).await?;
        Ok(self.resolve_and_validate(result).await)
    }

    /// 단어 검증
    ///
    /// 단어가 없으면 색인을 읽지 않고 그대로 돌려준다.
    pub async fn resolve_and_validate(&self, result: AnalysisResult) -> AnalysisResult {
        if result.extracted.requested_words().is_empty() {
            return result;
        }
        let index = self.cache.word_index().await;
        let result = validate_words(result, &index);
        if !result.data_exists {
            warn!("⚠️ 단어 검증 실패: {}", result.feedback_message);
        }
        result
    }

    /// 문제지 합성
    ///
    /// # 반환
    /// 사용할 문항이 없으면 `None`
    pub async fn synthesize(&self, params: &GenerationParameters) -> Option<Worksheet> {
        let candidates = self.candidates(params).await;
        let worksheet = self.assemble_worksheet(params, &candidates, &mut rand::rng());

        if worksheet.is_none() {
            if self.cache.source_unavailable() {
                warn!(
                    "⚠️ 문항 없음 (데이터 조회 실패: {})",
                    self.cache.failed_resources().join(", ")
                );
            } else {
                warn!("⚠️ 조건에 맞는 문항 데이터가 없습니다");
            }
        }
        worksheet
    }

    /// 후보 어휘 결정
    ///
    /// - 단어가 있으면 요청 레벨에서 정확히 일치하는 항목, 없으면 단어 색인이 가리키는 레벨들에서 찾는다
    /// - 주제만 있으면 요청 레벨에서 키워드가 하나라도 걸리는 항목
    /// - 둘 다 없으면 요청 레벨 전체
    pub async fn candidates(&self, params: &GenerationParameters) -> Vec<VocabularyEntry> {
        let level_entries = match params.grade {
            Some(level) => self.cache.level(level).await,
            None => Default::default(),
        };

        let requested = params.requested_words();
        if !requested.is_empty() {
            let in_level = filter_by_words(level_entries.iter(), &requested);
            if !in_level.is_empty() {
                debug!("요청 레벨에서 단어 {} 개 항목 발견", in_level.len());
                return in_level.into_iter().cloned().collect();
            }
            return self.candidates_across_levels(&requested).await;
        }

        match params.topic.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            Some(topic) => {
                let matched = filter_by_topic(level_entries.iter(), topic);
                debug!("주제 '{}' 일치 항목: {} 개", topic, matched.len());
                matched.into_iter().cloned().collect()
            }
            None => level_entries.to_vec(),
        }
    }

    /// 단어 색인이 가리키는 레벨들을 동시에 불러와 정확히 일치하는 항목 수집
    async fn candidates_across_levels(&self, requested: &[String]) -> Vec<VocabularyEntry> {
        let index = self.cache.word_index().await;
        let levels: BTreeSet<Level> = requested
            .iter()
            .filter_map(|word| index.levels_of(word))
            .flatten()
            .copied()
            .collect();

        if levels.is_empty() {
            return Vec::new();
        }
        info!("🔎 다른 레벨에서 단어 검색: {} 개 레벨", levels.len());

        let loaded = join_all(levels.iter().map(|&level| self.cache.level(level))).await;
        loaded
            .iter()
            .flat_map(|entries| filter_by_words(entries.iter(), requested))
            .cloned()
            .collect()
    }

    /// 후보에서 문제지 구성 (동기)
    ///
    /// 번호는 선택 순서대로 1부터 매긴다.
    pub fn assemble_worksheet<R: Rng + ?Sized>(
        &self,
        params: &GenerationParameters,
        candidates: &[VocabularyEntry],
        rng: &mut R,
    ) -> Option<Worksheet> {
        let refs: Vec<&VocabularyEntry> = candidates.iter().collect();
        let pool = assemble_pool(&refs, params.question_types.as_deref())?;

        let count = params.count.unwrap_or(self.default_count) as usize;
        let picked = self.selector.select(&pool, count, rng);

        let mut words_used: Vec<String> = Vec::new();
        let questions: Vec<_> = picked
            .iter()
            .enumerate()
            .map(|(position, &idx)| {
                let item = pool[idx];
                if !words_used.iter().any(|w| w == item.word) {
                    words_used.push(item.word.to_string());
                }
                parse_raw_question(item.raw, item.word, item.meaning, item.question_type)
                    .into_question(position + 1)
            })
            .collect();

        if questions.is_empty() {
            return None;
        }

        let degraded = questions.iter().filter(|q| q.is_degraded()).count();
        if degraded > 0 {
            debug!("보기 없는 문항 {} 개 포함", degraded);
        }
        Some(Worksheet::new(params, questions, words_used))
    }
}
