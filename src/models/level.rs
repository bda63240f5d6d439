use phf::phf_map;
use serde::{Deserialize, Serialize};

/// 학년 수준 열거형
///
/// 데이터셋 분할 기준이 되는 고정된 레벨 목록이다. 직렬화 형식은 영문 레이블이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    /// 초등 1-2학년
    #[serde(rename = "Elementary Grade 1-2")]
    ElementaryLower,
    /// 초등 3-4학년
    #[serde(rename = "Elementary Grade 3-4")]
    ElementaryMiddle,
    /// 초등 5-6학년
    #[serde(rename = "Elementary Grade 5-6")]
    ElementaryUpper,
    /// 중학교
    #[serde(rename = "Middle School")]
    MiddleSchool,
    /// 고등학교
    #[serde(rename = "High School")]
    HighSchool,
    /// TOEFL/IELTS
    #[serde(rename = "TOEFL/IELTS")]
    ToeflIelts,
}

static LEVEL_BY_LABEL: phf::Map<&'static str, Level> = phf_map! {
    "Elementary Grade 1-2" => Level::ElementaryLower,
    "Elementary Grade 3-4" => Level::ElementaryMiddle,
    "Elementary Grade 5-6" => Level::ElementaryUpper,
    "Middle School" => Level::MiddleSchool,
    "High School" => Level::HighSchool,
    "TOEFL/IELTS" => Level::ToeflIelts,
};

impl Level {
    /// 전체 레벨 (낮은 순)
    pub const ALL: [Level; 6] = [
        Level::ElementaryLower,
        Level::ElementaryMiddle,
        Level::ElementaryUpper,
        Level::MiddleSchool,
        Level::HighSchool,
        Level::ToeflIelts,
    ];

    /// 데이터셋 레이블
    pub fn label(self) -> &'static str {
        match self {
            Level::ElementaryLower => "Elementary Grade 1-2",
            Level::ElementaryMiddle => "Elementary Grade 3-4",
            Level::ElementaryUpper => "Elementary Grade 5-6",
            Level::MiddleSchool => "Middle School",
            Level::HighSchool => "High School",
            Level::ToeflIelts => "TOEFL/IELTS",
        }
    }

    /// 한국어 표시 이름
    pub fn korean_name(self) -> &'static str {
        match self {
            Level::ElementaryLower => "초등 1-2학년",
            Level::ElementaryMiddle => "초등 3-4학년",
            Level::ElementaryUpper => "초등 5-6학년",
            Level::MiddleSchool => "중학교",
            Level::HighSchool => "고등학교",
            Level::ToeflIelts => "TOEFL/IELTS",
        }
    }

    /// 레이블에서 레벨 해석 (정확히 일치해야 함)
    pub fn from_label(label: &str) -> Option<Self> {
        LEVEL_BY_LABEL.get(label.trim()).copied()
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
