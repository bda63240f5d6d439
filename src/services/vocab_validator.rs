//! 어휘 검증 - 업무 능력 계층
//!
//! 요청 단어가 데이터에 있는지, 요청 레벨과 맞는지 확인하고 안내 문구를 만든다.
//! 주제만 있는 요청은 여기서 확인하지 않는다 (풀 구성 단계에서 드러난다).

use crate::models::{AnalysisResult, Level, WordLevelIndex};
use tracing::debug;

/// 단어 확인 결과
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordCheck {
    /// 색인에 있는 단어 (요청 순서)
    pub found: Vec<String>,
    /// 색인에 없는 단어
    pub not_found: Vec<String>,
    /// 요청 레벨에 없는 단어와 실제 레벨
    pub mismatched: Vec<(String, Vec<Level>)>,
}

impl WordCheck {
    /// 찾은 단어가 모두 요청 레벨과 어긋나는지
    pub fn all_mismatched(&self) -> bool {
        !self.mismatched.is_empty() && self.mismatched.len() == self.found.len()
    }
}

/// 요청 단어 분류
///
/// # 매개변수
/// - `requested`: 소문자로 정규화된 요청 단어
/// - `grade`: 요청 레벨 (없으면 레벨 비교 생략)
/// - `index`: 단어 → 레벨 색인
pub fn check_words(requested: &[String], grade: Option<Level>, index: &WordLevelIndex) -> WordCheck {
    let mut check = WordCheck::default();
    for word in requested {
        match index.levels_of(word) {
            Some(levels) => {
                if let Some(grade) = grade {
                    if !levels.contains(&grade) {
                        check.mismatched.push((word.clone(), levels.to_vec()));
                    }
                }
                check.found.push(word.clone());
            }
            None => check.not_found.push(word.clone()),
        }
    }
    check
}

/// 분석 결과에 단어 검증 반영
///
/// 단어가 없으면 그대로 돌려준다. 일부 단어만 레벨이 어긋나는 경우는 통과시킨다.
pub fn validate_words(mut result: AnalysisResult, index: &WordLevelIndex) -> AnalysisResult {
    let requested = result.extracted.requested_words();
    if requested.is_empty() {
        return result;
    }

    let check = check_words(&requested, result.extracted.grade, index);
    debug!(
        "단어 검증: 요청 {} 개, 발견 {} 개, 레벨 불일치 {} 개",
        requested.len(),
        check.found.len(),
        check.mismatched.len()
    );

    if check.found.is_empty() {
        result.data_exists = false;
        result.is_complete = false;
        result.feedback_message = format!(
            "해당 단어({})가 마스터 데이터에 없습니다. 다른 단어를 입력해주세요.",
            result.extracted.words.as_deref().unwrap_or_default()
        );
    } else if let (Some(grade), true) = (result.extracted.grade, check.all_mismatched()) {
        result.data_exists = false;
        result.is_complete = false;
        result.feedback_message = mismatch_feedback(&check.mismatched, grade);
    } else {
        result.data_exists = true;
    }
    result
}

/// 레벨 불일치 안내 문구
pub fn mismatch_feedback(mismatched: &[(String, Vec<Level>)], grade: Level) -> String {
    let details: Vec<String> = mismatched
        .iter()
        .map(|(word, levels)| {
            let names: Vec<&str> = levels.iter().map(|l| l.korean_name()).collect();
            format!("'{}'은(는) {} 레벨의 단어입니다.", word, names.join(", "))
        })
        .collect();
    format!(
        "{} {} 레벨에 해당하지 않습니다. 다른 단어를 입력하거나 레벨을 변경해주세요.",
        details.join(" "),
        grade.korean_name()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GenerationParameters, WordIndexEntry};

    fn index() -> WordLevelIndex {
        WordLevelIndex::from_entries(&[
            WordIndexEntry { w: "fragile".into(), l: Level::MiddleSchool },
            WordIndexEntry { w: "ubiquitous".into(), l: Level::HighSchool },
            WordIndexEntry { w: "bright".into(), l: Level::ElementaryMiddle },
            WordIndexEntry { w: "bright".into(), l: Level::HighSchool },
        ])
    }

    fn analysis(grade: Option<Level>, words: &str) -> AnalysisResult {
        AnalysisResult::from_parameters(GenerationParameters {
            grade,
            words: Some(words.to_string()),
            count: Some(5),
            ..Default::default()
        })
    }

    #[test]
    fn test_word_only_at_other_level() {
        let result = validate_words(analysis(Some(Level::MiddleSchool), "ubiquitous"), &index());
        assert!(!result.data_exists);
        assert!(!result.is_complete);
        assert_eq!(
            result.feedback_message,
            "'ubiquitous'은(는) 고등학교 레벨의 단어입니다. 중학교 레벨에 해당하지 않습니다. 다른 단어를 입력하거나 레벨을 변경해주세요."
        );
    }

    #[test]
    fn test_unknown_words() {
        let result = validate_words(analysis(Some(Level::MiddleSchool), "Zzz, qqq"), &index());
        assert!(!result.data_exists);
        assert!(result.feedback_message.starts_with("해당 단어(Zzz, qqq)가"));
    }

    #[test]
    fn test_partial_mismatch_is_tolerated() {
        let result = validate_words(analysis(Some(Level::MiddleSchool), "fragile, ubiquitous"), &index());
        assert!(result.data_exists);
        assert!(result.is_complete);

        let check = check_words(
            &["fragile".into(), "ubiquitous".into(), "nope".into()],
            Some(Level::MiddleSchool),
            &index(),
        );
        assert_eq!(check.found, vec!["fragile", "ubiquitous"]);
        assert_eq!(check.not_found, vec!["nope"]);
        assert_eq!(check.mismatched, vec![("ubiquitous".to_string(), vec![Level::HighSchool])]);
        assert!(!check.all_mismatched());
    }

    #[test]
    fn test_multi_level_word_lists_every_level() {
        let result = validate_words(analysis(Some(Level::MiddleSchool), "BRIGHT"), &index());
        assert!(!result.data_exists);
        assert!(result.feedback_message.contains("'bright'은(는) 초등 3-4학년, 고등학교 레벨의 단어입니다."));
    }

    #[test]
    fn test_without_grade_only_existence_matters() {
        let result = validate_words(analysis(None, "ubiquitous"), &index());
        assert!(result.data_exists);
        assert!(!result.is_complete);
    }

    #[test]
    fn test_topic_only_request_untouched() {
        let input = AnalysisResult::from_parameters(GenerationParameters {
            grade: Some(Level::ElementaryMiddle),
            topic: Some("environment".into()),
            count: Some(3),
            ..Default::default()
        });
        assert_eq!(validate_words(input.clone(), &WordLevelIndex::default()), input);
    }
}
