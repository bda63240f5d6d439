use thiserror::Error;

/// 애플리케이션 오류 타입
///
/// 데이터 부족, 파라미터 누락, 문항 파싱 실패 같은 "도메인 상태"는 오류가 아니다.
/// 이런 경우는 `AnalysisResult` 플래그나 `Option<Worksheet>`로 표현되고,
/// 여기에는 인프라 경계를 넘는 실패만 들어온다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 데이터셋 조회 오류
    #[error("데이터 오류: {0}")]
    Data(#[from] DataError),
    /// 원격 추출기(LLM) 오류
    #[error("LLM 오류: {0}")]
    Llm(#[from] LlmError),
    /// 설정 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
}

/// 데이터셋 조회 오류
#[derive(Debug, Error)]
pub enum DataError {
    /// 리소스가 없음
    #[error("리소스가 없습니다: {resource}")]
    NotFound { resource: String },
    /// 파일 읽기 실패
    #[error("파일 읽기 실패 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// HTTP 요청 실패
    #[error("요청 실패 ({url}): {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// JSON 파싱 실패
    #[error("JSON 파싱 실패 ({resource}): {source}")]
    ParseFailed {
        resource: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 원격 추출기 오류
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 호출 실패
    #[error("LLM API 호출 실패 (모델: {model}): {message}")]
    ApiCallFailed { model: String, message: String },
    /// 응답 내용이 비어 있음
    #[error("LLM 응답 내용이 비어 있습니다 (모델: {model})")]
    EmptyContent { model: String },
    /// 응답을 해석할 수 없음
    #[error("LLM 응답을 해석할 수 없습니다: {response}")]
    InvalidResponse {
        response: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 설정 오류
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 설정 파일 읽기 실패
    #[error("설정 파일을 읽을 수 없습니다 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 파싱 실패
    #[error("설정 파일 파싱 실패 ({path}): {source}")]
    ParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 편의 생성자 ==========

impl AppError {
    /// 리소스 없음 오류 생성
    pub fn not_found(resource: impl Into<String>) -> Self {
        AppError::Data(DataError::NotFound {
            resource: resource.into(),
        })
    }

    /// 파일 읽기 오류 생성
    pub fn read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::Data(DataError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// JSON 파싱 오류 생성
    pub fn parse_failed(resource: impl Into<String>, source: serde_json::Error) -> Self {
        AppError::Data(DataError::ParseFailed {
            resource: resource.into(),
            source,
        })
    }

    /// HTTP 요청 오류 생성
    pub fn request_failed(url: impl Into<String>, source: reqwest::Error) -> Self {
        AppError::Data(DataError::RequestFailed {
            url: url.into(),
            source,
        })
    }
}

// ========== Result 타입 별칭 ==========

/// 애플리케이션 결과 타입
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_wraps_inner_error() {
        let err = AppError::not_found("vocab-index.json");
        assert_eq!(
            err.to_string(),
            "데이터 오류: 리소스가 없습니다: vocab-index.json"
        );
    }

    #[test]
    fn test_parse_failed_keeps_source() {
        let source = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let err = AppError::parse_failed("vocab-table.json", source);
        assert!(std::error::Error::source(&err).is_some());
    }
}
