use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// 프로그램 설정
///
/// 합성 코어는 환경 변수를 직접 읽지 않는다. `main.rs`가 여기서 값을 읽어 넘겨준다.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 데이터셋 JSON 파일이 있는 디렉터리
    pub data_dir: String,
    /// 데이터셋을 HTTP로 가져올 기본 URL (설정되면 `data_dir` 대신 사용)
    pub data_base_url: Option<String>,
    /// 문항 수가 비어 있을 때 사용할 기본값
    pub default_count: u32,
    /// 첫 번째 선택 단계에서 단어당 허용 문항 수
    pub per_word_cap: usize,
    /// 상세 로그 출력 여부
    pub verbose_logging: bool,
    /// 규칙 기반 대신 원격 추출기 사용 여부
    pub use_remote_extractor: bool,
    // --- LLM 설정 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            data_base_url: None,
            default_count: 10,
            per_word_cap: 2,
            verbose_logging: false,
            use_remote_extractor: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4o-mini".to_string(),
        }
    }
}

impl Config {
    /// 기본값에 환경 변수를 덮어써서 설정 생성
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// TOML 파일에서 설정 읽기 (없는 항목은 기본값)
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::ParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// `WORKSHEET_CONFIG`가 가리키는 파일을 읽은 뒤 환경 변수를 적용
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var("WORKSHEET_CONFIG") {
            Ok(path) => Self::from_toml_file(path)?,
            Err(_) => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    fn with_env_overrides(self) -> Self {
        Self {
            data_dir: std::env::var("DATA_DIR").unwrap_or(self.data_dir),
            data_base_url: std::env::var("DATA_BASE_URL").ok().or(self.data_base_url),
            default_count: std::env::var("DEFAULT_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(self.default_count),
            per_word_cap: std::env::var("PER_WORD_CAP").ok().and_then(|v| v.parse().ok()).unwrap_or(self.per_word_cap),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            use_remote_extractor: std::env::var("USE_REMOTE_EXTRACTOR").ok().and_then(|v| v.parse().ok()).unwrap_or(self.use_remote_extractor),
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(self.llm_model_name),
        }
    }
}
