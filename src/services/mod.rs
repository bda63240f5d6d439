pub mod extractor;
pub mod llm_extractor;
pub mod pool_assembler;
pub mod question_parser;
pub mod question_selector;
pub mod rule_extractor;
pub mod vocab_validator;

pub use extractor::{Extractor, ParameterExtractor};
pub use llm_extractor::LlmExtractor;
pub use pool_assembler::{assemble_pool, filter_by_topic, filter_by_words, PoolItem};
pub use question_parser::{parse_raw_question, ParsedQuestion};
pub use question_selector::QuestionSelector;
pub use rule_extractor::{refinement_request, RuleExtractor};
pub use vocab_validator::{check_words, validate_words, WordCheck};
