use crate::models::level::Level;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// 데이터셋에 정의된 문제 유형 레이블 (스프레드시트 열 순서)
pub const QUESTION_TYPE_NAMES: [&str; 11] = [
    "음소(Phonics)",
    "그림/사진",
    "단어 듣고 한글 뜻 고르기",
    "철자 맞추기",
    "문맥 속 어휘의 뜻 - 한글",
    "문맥 속 어휘의 뜻 - 영어",
    "객관식 문장완성하기",
    "유의어찾기",
    "반의어찾기",
    "문맥 속 의미 추론",
    "콜로케이션(Collocation)",
];

/// 어휘 항목
///
/// 레벨별 데이터 파일과 테이블 파일이 같은 구조를 쓴다.
/// 테이블 파일에는 `preGeneratedQuestions`가 없다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyEntry {
    pub word: String,
    #[serde(default)]
    pub parts_of_speech: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub english_definition: String,
    #[serde(default)]
    pub example: String,
    #[serde(default)]
    pub synonyms_antonyms: String,
    pub level: Level,
    #[serde(default)]
    pub cefr_level: String,
    #[serde(default)]
    pub korean_curriculum: String,
    #[serde(default)]
    pub question_types: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub pre_generated_questions: BTreeMap<String, String>,
}

impl VocabularyEntry {
    /// 비교용 소문자 단어
    pub fn normalized_word(&self) -> String {
        self.word.trim().to_lowercase()
    }

    /// 주어진 유형의 사용 가능한 원문 문항
    ///
    /// 유형 목록에 있더라도 원문이 없거나 비어 있으면 `None`이다.
    pub fn raw_question(&self, question_type: &str) -> Option<&str> {
        self.pre_generated_questions
            .get(question_type)
            .map(String::as_str)
            .filter(|raw| !raw.trim().is_empty())
    }

    /// 사용 가능한 원문 문항 (유형, 원문)
    pub fn usable_questions(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pre_generated_questions
            .iter()
            .filter(|(_, raw)| !raw.trim().is_empty())
            .map(|(ty, raw)| (ty.as_str(), raw.as_str()))
    }

    /// 사용 가능한 문항이 하나라도 있는지
    pub fn has_questions(&self) -> bool {
        self.usable_questions().next().is_some()
    }

    /// 주제 검색 대상 텍스트 (소문자)
    pub fn searchable_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.word, self.meaning, self.english_definition, self.example, self.synonyms_antonyms
        )
        .to_lowercase()
    }
}

/// 단어 색인 항목 (`vocab-word-index.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordIndexEntry {
    /// 단어
    pub w: String,
    /// 레벨
    pub l: Level,
}

/// 레벨 색인 항목 (`vocab-index.json`의 값)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFile {
    pub file: String,
    pub count: usize,
}

/// 레벨 레이블 → 데이터 파일
pub type LevelIndex = BTreeMap<String, LevelFile>;

/// 레벨 데이터 파일 이름 (`vocab-<slug>.json`)
pub fn level_file_name(level: Level) -> String {
    let mut slug = String::new();
    let mut in_separator = false;
    for c in level.label().to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            in_separator = false;
        } else if !in_separator {
            slug.push('-');
            in_separator = true;
        }
    }
    format!("vocab-{}.json", slug)
}

/// 단어 → 레벨 목록
///
/// 같은 단어가 여러 레벨에 다른 내용으로 들어 있을 수 있다.
#[derive(Debug, Clone, Default)]
pub struct WordLevelIndex {
    levels: HashMap<String, Vec<Level>>,
}

impl WordLevelIndex {
    /// 단어 색인 항목에서 생성
    pub fn from_entries(entries: &[WordIndexEntry]) -> Self {
        let mut levels: HashMap<String, Vec<Level>> = HashMap::new();
        for entry in entries {
            let word = entry.w.trim().to_lowercase();
            if word.is_empty() {
                continue;
            }
            let list = levels.entry(word).or_default();
            if !list.contains(&entry.l) {
                list.push(entry.l);
            }
        }
        Self { levels }
    }

    /// 단어가 속한 레벨 (대소문자 무시)
    pub fn levels_of(&self, word: &str) -> Option<&[Level]> {
        self.levels.get(&word.trim().to_lowercase()).map(Vec::as_slice)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.levels_of(word).is_some()
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_json() -> &'static str {
        r#"{
            "word": "Fragile",
            "partsOfSpeech": "adj",
            "meaning": "깨지기 쉬운",
            "englishDefinition": "easily broken",
            "example": "The glass is fragile.",
            "synonymsAntonyms": "delicate / sturdy",
            "level": "Middle School",
            "cefrLevel": "B1",
            "koreanCurriculum": "중1",
            "questionTypes": ["유의어찾기", "반의어찾기"],
            "preGeneratedQuestions": {
                "유의어찾기": "Q: Which word is closest to fragile?\nA) delicate\nB) strong\nAnswer: A",
                "반의어찾기": "   "
            }
        }"#
    }

    #[test]
    fn test_entry_deserializes_dataset_fields() {
        let entry: VocabularyEntry = serde_json::from_str(entry_json()).unwrap();
        assert_eq!(entry.level, Level::MiddleSchool);
        assert_eq!(entry.normalized_word(), "fragile");
        assert_eq!(entry.question_types.len(), 2);
    }

    #[test]
    fn test_blank_raw_text_is_not_usable() {
        let entry: VocabularyEntry = serde_json::from_str(entry_json()).unwrap();
        assert!(entry.raw_question("유의어찾기").is_some());
        assert!(entry.raw_question("반의어찾기").is_none());
        assert!(entry.raw_question("철자 맞추기").is_none());
        assert_eq!(entry.usable_questions().count(), 1);
        assert!(entry.has_questions());
    }

    #[test]
    fn test_table_entry_without_questions() {
        let json = r#"{"word": "calm", "level": "Elementary Grade 3-4"}"#;
        let entry: VocabularyEntry = serde_json::from_str(json).unwrap();
        assert!(!entry.has_questions());
        let back = serde_json::to_value(&entry).unwrap();
        assert!(back.get("preGeneratedQuestions").is_none());
    }

    #[test]
    fn test_level_file_names() {
        assert_eq!(level_file_name(Level::ElementaryLower), "vocab-elementary-grade-1-2.json");
        assert_eq!(level_file_name(Level::MiddleSchool), "vocab-middle-school.json");
        assert_eq!(level_file_name(Level::ToeflIelts), "vocab-toefl-ielts.json");
    }

    #[test]
    fn test_word_level_index_merges_levels() {
        let entries = vec![
            WordIndexEntry { w: "Bright".into(), l: Level::ElementaryMiddle },
            WordIndexEntry { w: "bright".into(), l: Level::HighSchool },
            WordIndexEntry { w: "bright".into(), l: Level::HighSchool },
        ];
        let index = WordLevelIndex::from_entries(&entries);
        assert_eq!(index.len(), 1);
        assert_eq!(
            index.levels_of("BRIGHT"),
            Some(&[Level::ElementaryMiddle, Level::HighSchool][..])
        );
        assert!(!index.contains("dim"));
    }
}
