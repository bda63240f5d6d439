use crate::models::level::Level;
use crate::models::vocab::QUESTION_TYPE_NAMES;
use serde::{Deserialize, Serialize};

/// 추출 직후 모든 항목이 갖춰졌을 때의 안내
pub const ANALYSIS_READY_MESSAGE: &str =
    "✅ 분석 완료! 모든 정보가 준비되었습니다. 아래 버튼을 눌러 문제를 제작하세요.";

/// 빠른 보완으로 모든 항목이 갖춰졌을 때의 안내
pub const REFINE_READY_MESSAGE: &str = "모든 정보가 준비되었습니다! 아래 버튼을 눌러 문제를 제작하세요.";

/// 문제 생성 파라미터
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParameters {
    pub grade: Option<Level>,
    pub topic: Option<String>,
    /// 쉼표로 구분된 단어 목록 (대소문자 무시)
    pub words: Option<String>,
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_types: Option<Vec<String>>,
}

impl GenerationParameters {
    /// 요청 단어 목록 (소문자, 공백 제거, 빈 항목 제외)
    pub fn requested_words(&self) -> Vec<String> {
        self.words
            .as_deref()
            .map(|words| {
                words
                    .split(',')
                    .map(|w| w.trim().to_lowercase())
                    .filter(|w| !w.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// 누락된 항목 (순서: 학년, 주제/단어, 문항 수)
    pub fn missing_fields(&self) -> Vec<Field> {
        let mut missing = Vec::new();
        if self.grade.is_none() {
            missing.push(Field::Grade);
        }
        if is_blank(&self.words) && is_blank(&self.topic) {
            missing.push(Field::Topic);
        }
        if self.count.is_none() {
            missing.push(Field::Count);
        }
        missing
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).map_or(true, str::is_empty)
}

/// 파라미터 항목 식별자
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Grade,
    /// 주제 또는 특정 단어
    Topic,
    Count,
}

impl Field {
    /// 사용자에게 보여줄 이름
    pub fn display_name(self) -> &'static str {
        match self {
            Field::Grade => "학년 수준",
            Field::Topic => "주제 또는 특정 단어",
            Field::Count => "문제 수",
        }
    }
}

/// 빠른 보완 입력 (항목 하나를 직접 지정)
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Grade(Level),
    Topic(String),
    Words(String),
    Count(u32),
    QuestionTypes(Vec<String>),
}

impl FieldUpdate {
    /// 단어 검증 결과를 무효로 만드는 보완인지 (학년 또는 단어 변경)
    pub fn invalidates_words(&self) -> bool {
        matches!(self, FieldUpdate::Grade(_) | FieldUpdate::Words(_))
    }
}

/// 분석 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub extracted: GenerationParameters,
    pub is_complete: bool,
    pub data_exists: bool,
    pub missing_fields: Vec<Field>,
    pub feedback_message: String,
}

impl AnalysisResult {
    /// 파라미터에서 완성도와 안내 문구를 계산해 생성
    ///
    /// 데이터 존재 여부는 이 단계에서 알 수 없으므로 항상 `true`로 둔다.
    pub fn from_parameters(extracted: GenerationParameters) -> Self {
        let missing_fields = extracted.missing_fields();
        let feedback_message = missing_feedback(&missing_fields);
        Self {
            is_complete: missing_fields.is_empty(),
            data_exists: true,
            missing_fields,
            feedback_message,
            extracted,
        }
    }

    /// 항목 하나를 보완하고 완성도를 다시 계산
    ///
    /// 학년이나 단어가 바뀌면 이전 검증 결과를 지우고 `data_exists`를 `true`로 되돌린다.
    /// 단어 검증은 호출자가 다시 수행한다.
    pub fn refine(&mut self, update: FieldUpdate) {
        let revalidate = update.invalidates_words();
        let params = &mut self.extracted;
        match update {
            FieldUpdate::Grade(level) => params.grade = Some(level),
            FieldUpdate::Topic(topic) => params.topic = Some(topic),
            FieldUpdate::Words(words) => params.words = Some(words),
            FieldUpdate::Count(count) => params.count = Some(count).filter(|&n| n > 0),
            FieldUpdate::QuestionTypes(types) => {
                let known: Vec<String> = types
                    .into_iter()
                    .filter(|t| QUESTION_TYPE_NAMES.contains(&t.as_str()))
                    .collect();
                params.question_types = Some(known).filter(|t| !t.is_empty())
            }
        }

        self.missing_fields = self.extracted.missing_fields();
        if revalidate && !self.data_exists {
            self.data_exists = true;
            self.feedback_message = missing_feedback(&self.missing_fields);
        }
        self.is_complete = self.missing_fields.is_empty() && self.data_exists;
        if self.is_complete {
            self.feedback_message = REFINE_READY_MESSAGE.to_string();
        }
    }

    /// 문제 생성 가능 여부
    pub fn is_ready(&self) -> bool {
        self.is_complete && self.data_exists
    }
}

/// 누락 항목 안내 문구
pub fn missing_feedback(missing: &[Field]) -> String {
    if missing.is_empty() {
        return ANALYSIS_READY_MESSAGE.to_string();
    }
    let names: Vec<&str> = missing.iter().map(|f| f.display_name()).collect();
    format!(
        "📋 분석 결과: {}이(가) 필요합니다. 아래에서 선택하거나 추가로 입력해주세요.",
        names.join(", ")
    )
}
