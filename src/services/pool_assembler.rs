//! 문항 풀 구성 - 업무 능력 계층
//!
//! 후보 어휘를 단어/주제로 좁히고, 사용 가능한 (단어, 유형, 원문) 묶음을
//! 하나의 풀로 펼친다. 선택은 `QuestionSelector`가 맡는다.

use crate::models::VocabularyEntry;
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static TOPIC_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,]+").expect("built-in pattern must compile"));

/// 풀 항목 하나 (단어 하나의 문항 하나)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolItem<'a> {
    pub word: &'a str,
    pub meaning: &'a str,
    pub question_type: &'a str,
    pub raw: &'a str,
}

/// 요청 단어와 정확히 일치하는 항목 (대소문자 무시)
///
/// # 매개변수
/// - `entries`: 후보 항목
/// - `words`: 소문자로 정규화된 요청 단어
pub fn filter_by_words<'a>(
    entries: impl IntoIterator<Item = &'a VocabularyEntry>,
    words: &[String],
) -> Vec<&'a VocabularyEntry> {
    let wanted: HashSet<&str> = words.iter().map(String::as_str).collect();
    entries
        .into_iter()
        .filter(|entry| wanted.contains(entry.normalized_word().as_str()))
        .collect()
}

/// 주제 키워드 토큰 (소문자, 두 글자 이상)
pub fn topic_keywords(topic: &str) -> Vec<String> {
    TOPIC_SEPARATOR
        .split(&topic.to_lowercase())
        .filter(|token| token.chars().count() > 1)
        .map(str::to_string)
        .collect()
}

/// 주제 키워드 중 하나라도 검색 텍스트에 포함된 항목
pub fn filter_by_topic<'a>(
    entries: impl IntoIterator<Item = &'a VocabularyEntry>,
    topic: &str,
) -> Vec<&'a VocabularyEntry> {
    let keywords = topic_keywords(topic);
    entries
        .into_iter()
        .filter(|entry| {
            let searchable = entry.searchable_text();
            keywords.iter().any(|kw| searchable.contains(kw.as_str()))
        })
        .collect()
}

/// 문항 풀 구성
///
/// # 반환
/// - 문항이 있는 항목이 없으면 `None`
/// - 유형 필터 적용 후 비면 `None`
pub fn assemble_pool<'a>(
    entries: &[&'a VocabularyEntry],
    type_filter: Option<&[String]>,
) -> Option<Vec<PoolItem<'a>>> {
    let with_questions: Vec<&'a VocabularyEntry> =
        entries.iter().copied().filter(|entry| entry.has_questions()).collect();
    if with_questions.is_empty() {
        return None;
    }

    let pool: Vec<PoolItem<'a>> = with_questions
        .into_iter()
        .flat_map(|entry| {
            entry.usable_questions().map(move |(question_type, raw)| PoolItem {
                word: &entry.word,
                meaning: &entry.meaning,
                question_type,
                raw,
            })
        })
        .filter(|item| match type_filter {
            Some(types) if !types.is_empty() => types.iter().any(|t| t == item.question_type),
            _ => true,
        })
        .collect();

    if pool.is_empty() {
        None
    } else {
        Some(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Level;
    use std::collections::BTreeMap;

    fn entry(word: &str, meaning: &str, example: &str, questions: &[(&str, &str)]) -> VocabularyEntry {
        VocabularyEntry {
            word: word.to_string(),
            parts_of_speech: "n".into(),
            meaning: meaning.to_string(),
            english_definition: String::new(),
            example: example.to_string(),
            synonyms_antonyms: String::new(),
            level: Level::ElementaryMiddle,
            cefr_level: String::new(),
            korean_curriculum: String::new(),
            question_types: questions.iter().map(|(t, _)| t.to_string()).collect(),
            pre_generated_questions: questions
                .iter()
                .map(|(t, raw)| (t.to_string(), raw.to_string()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[test]
    fn test_filter_by_words_is_exact() {
        let entries = vec![
            entry("Tree", "나무", "", &[]),
            entry("street", "거리", "", &[]),
        ];
        let matched = filter_by_words(&entries, &["tree".to_string()]);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].word, "Tree");

        let entries = vec![
            entry("happy", "행복한", "", &[]),
            entry("unhappy", "불행한", "", &[]),
        ];
        let matched = filter_by_words(&entries, &["happy".to_string()]);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].word, "happy");
        assert!(filter_by_words(&entries, &["happ".to_string()]).is_empty());
    }

    #[test]
    fn test_topic_keywords_drop_short_tokens() {
        assert_eq!(topic_keywords("Nature, a  forest"), vec!["nature", "forest"]);
        assert!(topic_keywords("x").is_empty());
    }

    #[test]
    fn test_filter_by_topic_any_keyword() {
        let entries = vec![
            entry("river", "강", "The river flows through the forest.", &[]),
            entry("desk", "책상", "A desk in the classroom.", &[]),
        ];
        let matched = filter_by_topic(&entries, "forest animals");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].word, "river");
        assert!(filter_by_topic(&entries, "environment").is_empty());
    }

    #[test]
    fn test_pool_flattens_usable_questions() {
        let entries = vec![
            entry("calm", "차분한", "", &[("유의어찾기", "Q1\nAnswer: A"), ("반의어찾기", " ")]),
            entry("brave", "용감한", "", &[("유의어찾기", "Q2\nAnswer: B"), ("철자 맞추기", "Q3")]),
            entry("none", "", "", &[]),
        ];
        let refs: Vec<&VocabularyEntry> = entries.iter().collect();
        let pool = assemble_pool(&refs, None).unwrap();
        assert_eq!(pool.len(), 3);
        assert!(pool.iter().all(|item| !item.raw.trim().is_empty()));
    }

    #[test]
    fn test_pool_type_filter() {
        let entries = vec![entry("calm", "차분한", "", &[("유의어찾기", "Q1"), ("철자 맞추기", "Q2")])];
        let refs: Vec<&VocabularyEntry> = entries.iter().collect();

        let filter = vec!["철자 맞추기".to_string()];
        let pool = assemble_pool(&refs, Some(filter.as_slice())).unwrap();
        assert_eq!(pool.len(), 1);
        assert_eq!(pool[0].question_type, "철자 맞추기");

        let filter = vec!["콜로케이션(Collocation)".to_string()];
        assert!(assemble_pool(&refs, Some(filter.as_slice())).is_none());
        assert_eq!(assemble_pool(&refs, Some(&[][..])).map(|p| p.len()), Some(2));
    }

    #[test]
    fn test_pool_none_without_questions() {
        let entries = vec![entry("calm", "차분한", "", &[("유의어찾기", "")])];
        let refs: Vec<&VocabularyEntry> = entries.iter().collect();
        assert!(assemble_pool(&refs, None).is_none());
        assert!(assemble_pool(&[], None).is_none());
    }
}
