use crate::models::analysis::GenerationParameters;
use serde::{Deserialize, Serialize};

/// 이 코어가 만드는 문제지 유형
pub const WORKSHEET_TYPE: &str = "multiple-choice";

/// 정규화된 문항
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedQuestion {
    /// 선택 순서대로 매긴 번호 (1부터, 재생성 시 달라짐)
    pub id: usize,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    /// 보기가 있으면 보기 텍스트 중 하나, 없으면 원래 정답 기호
    pub answer: String,
    pub explanation: String,
}

impl NormalizedQuestion {
    /// 보기 없이 정답 기호만 남은 문항인지
    pub fn is_degraded(&self) -> bool {
        self.options.is_none()
    }
}

/// 문제지
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worksheet {
    pub title: String,
    pub grade: String,
    pub topic: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub questions: Vec<NormalizedQuestion>,
    /// 실제로 문항을 제공한 단어 (선택 순서, 중복 없음)
    #[serde(default)]
    pub words_used: Vec<String>,
}

impl Worksheet {
    /// 생성 파라미터와 선택된 문항으로 문제지 구성
    pub fn new(
        params: &GenerationParameters,
        questions: Vec<NormalizedQuestion>,
        words_used: Vec<String>,
    ) -> Self {
        let grade = params.grade.map(|g| g.label()).unwrap_or_default().to_string();
        let subject = non_blank(&params.topic).or_else(|| non_blank(&params.words));
        Self {
            title: format!("{} - {} 문제지", grade, subject.unwrap_or("영단어")),
            grade,
            topic: subject.unwrap_or_default().to_string(),
            kind: WORKSHEET_TYPE.to_string(),
            questions,
            words_used,
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
