//! # Vocab Worksheet
//!
//! 자유 텍스트 요청을 미리 작성된 문항 은행의 객관식 문제지로 바꾸는 합성 코어
//!
//! ## 아키텍처
//!
//! 이 시스템은 네 계층으로 나뉜다:
//!
//! ### ① 인프라 계층 (Infrastructure)
//! - `infrastructure/` - 데이터셋 접근 능력만 노출
//! - `DataSource` - 색인/레벨/테이블/단어 색인 조회 능력
//! - `FileStore` / `HttpStore` / `MemoryStore` - 저장소 구현
//! - `LexicalCache` - 레벨별로 한 번만 가져오는 캐시
//!
//! ### ② 업무 능력 계층 (Services)
//! - `services/` - "무엇을 할 수 있는가"만 기술, 순수 함수 위주
//! - `RuleExtractor` / `LlmExtractor` - 파라미터 추출
//! - `vocab_validator` - 단어 존재/레벨 검증
//! - `question_parser` - 문항 원문 파싱
//! - `pool_assembler` / `QuestionSelector` - 풀 구성과 두 단계 선택
//!
//! ### ③ 흐름 계층 (Workflow)
//! - `workflow/` - 요청 하나의 처리 순서
//! - `SynthesisFlow` - extract → resolve_and_validate → synthesize
//! - `WorksheetSession` - 분석/보완/생성/초기화 수명 주기
//!
//! ### ④ 실행 계층
//! - `main.rs` - 설정을 읽고 흐름을 조립하는 작은 실행기
//!
//! ## 모듈 구조

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

// 자주 쓰는 타입 재노출
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{DataSource, FileStore, HttpStore, LexicalCache, MemoryStore};
pub use models::{AnalysisResult, GenerationParameters, Level, NormalizedQuestion, Worksheet};
pub use services::{Extractor, ParameterExtractor, RuleExtractor};
pub use workflow::{GenerateOutcome, SynthesisFlow, WorksheetSession};
