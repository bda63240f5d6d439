//! 파라미터 추출 능력
//!
//! 규칙 기반/원격 추출기를 같은 계약으로 다룬다. 어느 쪽이 만든 결과든
//! 이후 단어 검증은 `SynthesisFlow`가 똑같이 적용한다.

use anyhow::Result;

use crate::config::Config;
use crate::models::AnalysisResult;
use crate::services::llm_extractor::LlmExtractor;
use crate::services::rule_extractor::RuleExtractor;

/// 자유 텍스트 → 분석 결과
#[allow(async_fn_in_trait)]
pub trait ParameterExtractor {
    async fn extract(&self, text: &str) -> Result<AnalysisResult>;

    /// 로그 표시용 이름
    fn name(&self) -> &str;
}

impl ParameterExtractor for RuleExtractor {
    async fn extract(&self, text: &str) -> Result<AnalysisResult> {
        Ok(self.analyze(text))
    }

    fn name(&self) -> &str {
        "rule-based"
    }
}

impl ParameterExtractor for LlmExtractor {
    async fn extract(&self, text: &str) -> Result<AnalysisResult> {
        self.analyze(text).await
    }

    fn name(&self) -> &str {
        self.model_name()
    }
}

/// 설정으로 고르는 추출기
pub enum Extractor {
    Rule(RuleExtractor),
    Remote(LlmExtractor),
}

impl Extractor {
    pub fn from_config(config: &Config) -> Self {
        if config.use_remote_extractor {
            Extractor::Remote(LlmExtractor::new(config))
        } else {
            Extractor::Rule(RuleExtractor::new())
        }
    }
}

impl ParameterExtractor for Extractor {
    async fn extract(&self, text: &str) -> Result<AnalysisResult> {
        match self {
            Extractor::Rule(rule) => rule.extract(text).await,
            Extractor::Remote(remote) => remote.extract(text).await,
        }
    }

    fn name(&self) -> &str {
        match self {
            Extractor::Rule(rule) => rule.name(),
            Extractor::Remote(remote) => remote.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_picks_rule_extractor() {
        let extractor = Extractor::from_config(&Config::default());
        assert!(matches!(extractor, Extractor::Rule(_)));
        assert_eq!(extractor.name(), "rule-based");

        let result = tokio_test::block_on(extractor.extract("중학교 fragile 5문제")).unwrap();
        assert!(result.is_complete);
    }

    #[test]
    fn test_remote_selected_by_flag() {
        let config = Config {
            use_remote_extractor: true,
            llm_model_name: "test-model".into(),
            ..Config::default()
        };
        let extractor = Extractor::from_config(&config);
        assert_eq!(extractor.name(), "test-model");
    }
}
