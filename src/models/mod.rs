pub mod analysis;
pub mod level;
pub mod question;
pub mod vocab;

pub use analysis::{AnalysisResult, Field, FieldUpdate, GenerationParameters};
pub use level::Level;
pub use question::{NormalizedQuestion, Worksheet};
pub use vocab::{
    level_file_name, LevelFile, LevelIndex, VocabularyEntry, WordIndexEntry, WordLevelIndex,
    QUESTION_TYPE_NAMES,
};
