//! 문제지 작성 세션
//!
//! 요청 하나의 수명 주기: 분석 → (빠른 보완 | 추가 요청) → 생성 → 초기화

use anyhow::{bail, Result};
use tracing::info;

use crate::infrastructure::DataSource;
use crate::models::{AnalysisResult, FieldUpdate, Worksheet};
use crate::services::{refinement_request, ParameterExtractor};
use crate::workflow::synthesis_flow::SynthesisFlow;

/// 조건에 맞는 문항이 없을 때의 안내
pub const NO_MATERIAL_MESSAGE: &str =
    "조건이 맞지 않아 문제를 생성할 수 없습니다. 마스터 테이블에 해당 조건에 맞는 문제 데이터가 없습니다.";

/// 원본 데이터를 읽지 못했을 때의 안내
pub const SOURCE_UNAVAILABLE_MESSAGE: &str =
    "어휘 데이터를 불러오지 못해 문제를 생성할 수 없습니다. 잠시 후 다시 시도해주세요.";

/// 생성 결과
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateOutcome {
    /// 문제지 생성 완료
    Ready(Worksheet),
    /// 분석이 없거나 아직 완성되지 않음
    NotReady,
    /// 조건에 맞는 문항 없음
    NoMaterial {
        /// 데이터 조회 실패가 원인일 수 있는지
        source_unavailable: bool,
    },
}

impl GenerateOutcome {
    /// 사용자 안내 문구 (생성 완료면 `None`)
    pub fn message(&self) -> Option<&'static str> {
        match self {
            GenerateOutcome::Ready(_) | GenerateOutcome::NotReady => None,
            GenerateOutcome::NoMaterial { source_unavailable: true } => Some(SOURCE_UNAVAILABLE_MESSAGE),
            GenerateOutcome::NoMaterial { source_unavailable: false } => Some(NO_MATERIAL_MESSAGE),
        }
    }
}

/// 문제지 작성 세션
pub struct WorksheetSession<'f, S, E> {
    flow: &'f SynthesisFlow<S, E>,
    request: String,
    analysis: Option<AnalysisResult>,
    worksheet: Option<Worksheet>,
}

impl<'f, S: DataSource, E: ParameterExtractor> WorksheetSession<'f, S, E> {
    pub fn new(flow: &'f SynthesisFlow<S, E>) -> Self {
        Self {
            flow,
            request: String::new(),
            analysis: None,
            worksheet: None,
        }
    }

    pub fn request(&self) -> &str {
        &self.request
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn worksheet(&self) -> Option<&Worksheet> {
        self.worksheet.as_ref()
    }

    /// 새 요청 분석 (이전 문제지는 지운다)
    pub async fn start(&mut self, text: &str) -> Result<&AnalysisResult> {
        if text.trim().is_empty() {
            bail!("요청 내용이 비어 있습니다");
        }
        self.worksheet = None;
        let analysis = self.flow.extract(text).await?;
        self.request = text.to_string();
        Ok(self.analysis.insert(analysis))
    }

    /// 항목 하나를 직접 보완 (재분석 없음)
    ///
    /// 학년이나 단어가 바뀌면 단어 검증을 다시 돌린다.
    pub async fn refine_quick(&mut self, update: FieldUpdate) -> Option<&AnalysisResult> {
        let mut analysis = self.analysis.take()?;
        let revalidate = update.invalidates_words();
        analysis.refine(update);
        if revalidate {
            analysis = self.flow.resolve_and_validate(analysis).await;
        }
        Some(self.analysis.insert(analysis))
    }

    /// 추가 요청을 붙여 다시 분석
    pub async fn refine_text(&mut self, extra: &str) -> Result<&AnalysisResult> {
        if extra.trim().is_empty() || self.analysis.is_none() {
            bail!("보완할 분석 결과나 추가 요청이 없습니다");
        }
        let combined = refinement_request(&self.request, extra);
        info!("📝 추가 요청 반영: {}", extra);
        self.start(&combined).await
    }

    /// 완성된 분석으로 문제지 생성
    pub async fn generate(&mut self) -> GenerateOutcome {
        let Some(analysis) = self.analysis.as_ref().filter(|a| a.is_ready()) else {
            return GenerateOutcome::NotReady;
        };

        match self.flow.synthesize(&analysis.extracted).await {
            Some(worksheet) => {
                self.worksheet = Some(worksheet.clone());
                GenerateOutcome::Ready(worksheet)
            }
            None => GenerateOutcome::NoMaterial {
                source_unavailable: self.flow.cache().source_unavailable(),
            },
        }
    }

    /// 세션 초기화
    pub fn reset(&mut self) {
        self.request.clear();
        self.analysis = None;
        self.worksheet = None;
    }
}
