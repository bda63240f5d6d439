//! 문항 원문 파서 - 업무 능력 계층
//!
//! 사람이 쓴 느슨한 형식의 문항 원문을 정규화된 문항으로 바꾼다.
//!
//! 지원 형식:
//! - 여러 줄 보기: `A) ...` / `A. ...` 이 줄마다 하나씩
//! - 한 줄 보기: `A) a  B) an  C) the  D) some`
//! - 어느 쪽도 아니면 보기 없이 정답 기호만 남긴다 (오류로 처리하지 않음)

use crate::models::NormalizedQuestion;
use regex::Regex;
use std::sync::LazyLock;

static ANSWER_MARKER: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)Answer[:\s]*([A-D])"));
static TRAILING_ANSWER: LazyLock<Regex> =
    LazyLock::new(|| compile(r"(?i)\n?\s*Answer[:\s]*[A-D]\s*$"));
static QUESTION_LABEL: LazyLock<Regex> = LazyLock::new(|| compile(r"(?i)^Q:\s*"));
static OPTION_LINE: LazyLock<Regex> = LazyLock::new(|| compile(r"(?:^|\n)\s*([A-D])[.)]\s*(.+)"));
static PACKED_OPTIONS: LazyLock<Regex> =
    LazyLock::new(|| compile(r"A[.)]\s*.+?(?:\s{2,}|\s+)B[.)]\s*.+"));
static PACKED_BOUNDARY: LazyLock<Regex> = LazyLock::new(|| compile(r"\s+[B-D][.)]\s"));
static OPTION_MARKER: LazyLock<Regex> = LazyLock::new(|| compile(r"^([A-D])[.)]\s*"));

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in pattern must compile")
}

/// 번호가 붙기 전의 파싱 결과
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuestion {
    pub question: String,
    pub options: Option<Vec<String>>,
    pub answer: String,
    pub explanation: String,
}

impl ParsedQuestion {
    /// 선택 순서 번호를 붙여 문항으로 변환
    pub fn into_question(self, id: usize) -> NormalizedQuestion {
        NormalizedQuestion {
            id,
            question: self.question,
            options: self.options,
            answer: self.answer,
            explanation: self.explanation,
        }
    }
}

/// 문항 원문 파싱
///
/// # 매개변수
/// - `raw`: 문항 원문 (문제, 보기, `Answer: X` 표시가 섞인 텍스트)
/// - `word`, `meaning`: 문항이 속한 단어와 뜻 (해설 생성용)
/// - `question_type`: 문항 유형 레이블
///
/// # 반환
/// 항상 결과를 돌려준다. 보기가 있으면 정답은 보기 텍스트 중 하나이고,
/// 그렇지 않으면 보기를 비우고 정답 기호만 남긴다.
pub fn parse_raw_question(raw: &str, word: &str, meaning: &str, question_type: &str) -> ParsedQuestion {
    let answer_letter = ANSWER_MARKER
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_uppercase())
        .unwrap_or_default();

    let text = TRAILING_ANSWER.replace(raw, "");
    let text = QUESTION_LABEL.replace(text.trim(), "");
    let text = text.trim();

    let (question, lettered) = split_option_lines(text)
        .or_else(|| split_packed_options(text))
        .unwrap_or_else(|| (text.to_string(), Vec::new()));

    let resolved = lettered
        .iter()
        .find(|(letter, _)| letter.to_string() == answer_letter)
        .map(|(_, option)| option.clone());

    let (options, answer) = match resolved {
        Some(answer) => (Some(lettered.into_iter().map(|(_, option)| option).collect()), answer),
        None => (None, answer_letter),
    };

    ParsedQuestion {
        question,
        options,
        answer,
        explanation: explanation(word, meaning, question_type),
    }
}

/// 해설 문구
pub fn explanation(word: &str, meaning: &str, question_type: &str) -> String {
    format!("'{}'의 뜻은 '{}'입니다. (문제 유형: {})", word, meaning, question_type)
}

/// 여러 줄 보기 추출 (두 개 이상일 때만 인정)
fn split_option_lines(text: &str) -> Option<(String, Vec<(char, String)>)> {
    let matches: Vec<_> = OPTION_LINE.captures_iter(text).collect();
    if matches.len() < 2 {
        return None;
    }

    let stem_end = matches[0].get(0).map_or(0, |m| m.start());
    let mut options: Vec<(char, String)> = matches
        .iter()
        .filter_map(|caps| {
            let letter = caps.get(1)?.as_str().chars().next()?;
            Some((letter, caps.get(2)?.as_str().trim().to_string()))
        })
        .collect();
    options.sort_by_key(|(letter, _)| *letter);

    Some((text[..stem_end].trim().to_string(), options))
}

/// 한 줄에 몰린 보기 추출
fn split_packed_options(text: &str) -> Option<(String, Vec<(char, String)>)> {
    let line = PACKED_OPTIONS.find(text)?;
    let packed = line.as_str();

    let mut cuts: Vec<usize> = PACKED_BOUNDARY
        .find_iter(packed)
        .map(|m| m.start() + m.as_str().len() - m.as_str().trim_start().len())
        .collect();
    cuts.insert(0, 0);
    cuts.push(packed.len());

    let options = cuts
        .windows(2)
        .filter_map(|span| {
            let segment = packed[span[0]..span[1]].trim();
            let letter = OPTION_MARKER.captures(segment)?.get(1)?.as_str().chars().next()?;
            Some((letter, OPTION_MARKER.replace(segment, "").trim().to_string()))
        })
        .collect();

    Some((text[..line.start()].trim().to_string(), options))
}
