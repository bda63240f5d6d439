//! 규칙 기반 파라미터 추출기 - 업무 능력 계층
//!
//! 외부 호출 없이 한국어/영어가 섞인 요청에서 문제 생성 파라미터를 뽑는다.
//!
//! 지원 입력 예시:
//! - "중학교 수준으로 happy, sad 단어를 넣어서 5문제 만들어줘"
//! - "초등 3학년 environment 10문제"
//! - "고등학교 academic success 주제로 15문항"
//! - "fragile 3문제"
//!
//! 각 검출기는 (패턴, 값) 순서 목록을 앞에서부터 평가하고 처음 일치한 것을 쓴다.
//! 검출기끼리는 상태를 공유하지 않으므로 평가 순서와 무관하다.

use crate::models::{AnalysisResult, GenerationParameters, Level};
use phf::phf_set;
use regex::Regex;
use std::sync::LazyLock;

/// 학년 패턴 → 레벨 (구체적인 것이 먼저)
static GRADE_PATTERNS: LazyLock<Vec<(Regex, Level)>> = LazyLock::new(|| {
    [
        (r"(?i)초등?\s*[1-2]|초\s*[1-2]\s*학년|elementary\s*(grade\s*)?[1-2]", Level::ElementaryLower),
        (r"(?i)초등?\s*[3-4]|초\s*[3-4]\s*학년|elementary\s*(grade\s*)?[3-4]", Level::ElementaryMiddle),
        (r"(?i)초등?\s*[5-6]|초\s*[5-6]\s*학년|elementary\s*(grade\s*)?[5-6]", Level::ElementaryUpper),
        (r"(?i)초등학교|초등|elementary", Level::ElementaryMiddle),
        (r"(?i)중학교|중학|중등|중\s*[1-3]\s*학년|middle\s*school", Level::MiddleSchool),
        (r"(?i)고등학교|고등|고교|고\s*[1-3]\s*학년|high\s*school", Level::HighSchool),
        (r"(?i)toefl|ielts|토플|아이엘츠", Level::ToeflIelts),
    ]
    .into_iter()
    .map(|(pattern, level)| (compile(pattern), level))
    .collect()
});

/// 문항 수 패턴 (숫자-단위, 단위-숫자)
static COUNT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"(?i)(\d+)\s*(?:문제|문항|개|questions?)", r"(?:문제|문항)\s*(\d+)"]
        .into_iter()
        .map(compile)
        .collect()
});

/// 주제 패턴 (조사/연결어로 경계를 잡는다)
static TOPIC_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?:주제|테마|토픽|관련|대한)\s*[:：]?\s*([가-힣a-zA-Z\s]{2,}?)(?:\s*(?:으로|로|에서|문제|만들|넣어|$))",
        r"([가-힣]{2,})\s*(?:주제|관련)\s*(?:으로|로)?",
    ]
    .into_iter()
    .map(compile)
    .collect()
});

static LATIN_WORD: LazyLock<Regex> = LazyLock::new(|| compile(r"[a-zA-Z]{2,}"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern must compile")
}

/// 어휘 후보에서 뺄 기능어/기술 용어
static EXCLUDED_ENGLISH: phf::Set<&'static str> = phf_set! {
    "ai", "pdf", "toefl", "ielts", "cefr", "ok", "hwp",
    "the", "and", "for", "with", "from", "that", "this", "all",
    "are", "was", "were", "been", "have", "has", "had", "not",
    "but", "can", "will", "would", "should", "could", "may",
    "elementary", "middle", "school", "high", "grade",
};

/// 주제로 보지 않을 일반 어구
static NON_TOPIC_WORDS: phf::Set<&'static str> = phf_set! {
    "수준", "으로", "만들어", "넣어", "줘", "해줘", "주세요",
    "문제", "단어", "학교", "학년", "중학교", "고등학교", "초등학교",
};

/// 허용 문항 수 상한
pub const MAX_COUNT: u32 = 100;

/// 규칙 기반 추출기
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleExtractor;

impl RuleExtractor {
    pub fn new() -> Self {
        Self
    }

    /// 자유 텍스트 분석
    ///
    /// 데이터 존재 여부는 낙관적으로 `true`로 둔다. 실제 확인은 검증 단계 몫이다.
    pub fn analyze(&self, text: &str) -> AnalysisResult {
        let params = GenerationParameters {
            grade: detect_grade(text),
            topic: detect_topic(text),
            words: detect_words(text),
            count: detect_count(text),
            question_types: None,
        };
        AnalysisResult::from_parameters(params)
    }
}

/// 학년 검출
pub fn detect_grade(text: &str) -> Option<Level> {
    GRADE_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(text))
        .map(|&(_, level)| level)
}

/// 문항 수 검출 (1..=100만 허용)
///
/// 패턴이 일치해도 범위를 벗어나면 다음 패턴으로 넘어간다.
pub fn detect_count(text: &str) -> Option<u32> {
    COUNT_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .filter(|n| (1..=MAX_COUNT).contains(n))
    })
}

/// 영어 단어 후보 검출
pub fn detect_words(text: &str) -> Option<String> {
    let words: Vec<&str> = LATIN_WORD
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|w| !EXCLUDED_ENGLISH.contains(w.to_lowercase().as_str()))
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(words.join(", "))
    }
}

/// 주제 검출
pub fn detect_topic(text: &str) -> Option<String> {
    TOPIC_PATTERNS.iter().find_map(|pattern| {
        let captured = pattern.captures(text)?.get(1)?.as_str().trim();
        if captured.chars().count() >= 2 && !NON_TOPIC_WORDS.contains(captured) {
            Some(captured.to_string())
        } else {
            None
        }
    })
}

/// 재추출용 요청 문장 (기존 요청 + 추가 요청)
pub fn refinement_request(original: &str, extra: &str) -> String {
    format!("{} + 추가 요청: {}", original, extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Field;

    #[test]
    fn test_scenario_middle_school_with_word() {
        let result = RuleExtractor::new().analyze("중학교 수준으로 fragile 단어를 넣어서 5문제 만들어줘");
        assert_eq!(result.extracted.grade, Some(Level::MiddleSchool));
        assert_eq!(result.extracted.words.as_deref(), Some("fragile"));
        assert_eq!(result.extracted.count, Some(5));
        assert_eq!(result.extracted.topic, None);
        assert!(result.is_complete);
        assert!(result.data_exists);
        assert!(result.missing_fields.is_empty());
    }

    #[test]
    fn test_grade_specificity() {
        assert_eq!(detect_grade("elementary grade 3 words"), Some(Level::ElementaryMiddle));
        assert_eq!(detect_grade("초등 3학년"), Some(Level::ElementaryMiddle));
        assert_eq!(detect_grade("초1 어휘"), Some(Level::ElementaryLower));
        assert_eq!(detect_grade("초등 6학년"), Some(Level::ElementaryUpper));
        assert_eq!(detect_grade("Elementary 5"), Some(Level::ElementaryUpper));
        assert_eq!(detect_grade("초등학교 단어"), Some(Level::ElementaryMiddle));
        assert_eq!(detect_grade("elementary words"), Some(Level::ElementaryMiddle));
    }

    #[test]
    fn test_grade_levels() {
        assert_eq!(detect_grade("중2학년 대상"), Some(Level::MiddleSchool));
        assert_eq!(detect_grade("Middle School 수준"), Some(Level::MiddleSchool));
        assert_eq!(detect_grade("고교 어휘"), Some(Level::HighSchool));
        assert_eq!(detect_grade("high school"), Some(Level::HighSchool));
        assert_eq!(detect_grade("토플 대비"), Some(Level::ToeflIelts));
        assert_eq!(detect_grade("IELTS prep"), Some(Level::ToeflIelts));
        assert_eq!(detect_grade("아무 수준"), None);
    }

    #[test]
    fn test_count_bounds() {
        for n in [1u32, 5, 42, 99, 100] {
            assert_eq!(detect_count(&format!("{}문제", n)), Some(n));
        }
        assert_eq!(detect_count("0문제"), None);
        assert_eq!(detect_count("101문제"), None);
        assert_eq!(detect_count("99999999999문제"), None);
    }

    #[test]
    fn test_count_variants() {
        assert_eq!(detect_count("10 questions"), Some(10));
        assert_eq!(detect_count("1 question please"), Some(1));
        assert_eq!(detect_count("단어 7개"), Some(7));
        assert_eq!(detect_count("문항 12로 해줘"), Some(12));
        assert_eq!(detect_count("숫자 없음"), None);
    }

    #[test]
    fn test_words_skip_stoplist() {
        assert_eq!(
            detect_words("Middle School happy, sad 단어 AI로 PDF"),
            Some("happy, sad".to_string())
        );
        assert_eq!(detect_words("TOEFL 대비 10문제"), None);
        assert_eq!(detect_words("a b c"), None);
    }

    #[test]
    fn test_topic_patterns() {
        assert_eq!(detect_topic("환경 주제로 10문제"), Some("환경".to_string()));
        assert_eq!(detect_topic("주제: 자연과 환경으로 만들어줘"), Some("자연과 환경".to_string()));
        assert_eq!(
            detect_topic("고등학교 academic success 주제로 15문항"),
            None,
            "영어 주제는 단어 후보로 처리된다"
        );
        assert_eq!(detect_topic("중학교 수준으로 5문제"), None);
    }

    #[test]
    fn test_topic_stoplist_rejects_generic_phrase() {
        assert_eq!(detect_topic("문제 관련으로"), None);
    }

    #[test]
    fn test_incomplete_request_feedback() {
        let result = RuleExtractor::new().analyze("fragile 3문제");
        assert!(!result.is_complete);
        assert_eq!(result.missing_fields, vec![Field::Grade]);
        assert!(result.feedback_message.contains("학년 수준"));
    }

    #[test]
    fn test_detectors_are_order_independent() {
        let text = "초등 3학년 environment 10문제";
        let forward = (detect_grade(text), detect_count(text), detect_words(text), detect_topic(text));
        let topic = detect_topic(text);
        let words = detect_words(text);
        let count = detect_count(text);
        let grade = detect_grade(text);
        assert_eq!(forward, (grade, count, words, topic));
        assert_eq!(grade, Some(Level::ElementaryMiddle));
        assert_eq!(count, Some(10));
    }

    #[test]
    fn test_refinement_request_format() {
        assert_eq!(refinement_request("fragile 3문제", "중학교"), "fragile 3문제 + 추가 요청: 중학교");
    }
}
