//! 원격 파라미터 추출기 - 업무 능력 계층
//!
//! 규칙 기반 추출기의 대안. 같은 텍스트를 OpenAI 호환 채팅 API에 보내고
//! 같은 모양의 `AnalysisResult`로 돌려준다.
//!
//! ## 기술 스택
//! - `async-openai`로 API 호출
//! - 사용자 지정 API 엔드포인트와 모델 지원
//!
//! 완성도와 누락 항목은 응답을 믿지 않고 로컬에서 다시 계산한다.

use anyhow::{Context, Result};
use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, LlmError};
use crate::models::{AnalysisResult, GenerationParameters, Level};
use crate::services::rule_extractor::MAX_COUNT;

/// 모델 응답 형태
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoteReply {
    #[serde(default)]
    extracted: RemoteParameters,
    #[serde(default)]
    feedback_message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RemoteParameters {
    grade: Option<String>,
    topic: Option<String>,
    words: Option<String>,
    count: Option<JsonValue>,
}

/// 원격 추출기
pub struct LlmExtractor {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl LlmExtractor {
    /// 설정의 API 키/엔드포인트/모델로 생성
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            model_name: config.llm_model_name.clone(),
        }
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 요청 텍스트 분석
    ///
    /// # 반환
    /// 단어 검증 전의 분석 결과 (`data_exists`는 항상 `true`)
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult> {
        let (user_message, system_message) = build_messages(text);
        let reply = self.send_to_llm(&user_message, &system_message).await?;
        let result = parse_reply(&reply).context("원격 추출 결과 해석 실패")?;
        debug!("원격 추출 완료: {:?}", result.extracted);
        Ok(result)
    }

    /// 채팅 API 호출
    async fn send_to_llm(&self, user_message: &str, system_message: &str) -> Result<String> {
        debug!("LLM API 호출, 모델: {}", self.model_name);

        let messages = vec![
            ChatCompletionRequestMessage::System(
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_message)
                    .build()?,
            ),
            ChatCompletionRequestMessage::User(
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_message)
                    .build()?,
            ),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(messages)
            .temperature(0.0)
            .max_tokens(512u32)
            .build()?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            warn!("LLM API 호출 실패: {}", e);
            AppError::from(LlmError::ApiCallFailed {
                model: self.model_name.clone(),
                message: e.to_string(),
            })
        })?;

        let content = response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                AppError::from(LlmError::EmptyContent {
                    model: self.model_name.clone(),
                })
            })?;

        Ok(content.trim().to_string())
    }
}

/// (사용자 메시지, 시스템 메시지)
fn build_messages(text: &str) -> (String, String) {
    let system_message = "당신은 영단어 문제지 제작 요청을 분석하는 도우미입니다. 반드시 JSON만 반환하세요.".to_string();

    let levels: Vec<&str> = Level::ALL.iter().map(|l| l.label()).collect();
    let user_message = format!(
        r#"사용자의 영단어 문제지 제작 요청을 분석하세요: "{}"

허용되는 학년 수준: [{}]

분석 규칙:
1. 학년 수준(grade), 주제(topic), 특정 단어(words), 문제 수(count)를 추출하세요.
2. 학년은 반드시 허용되는 학년 수준 목록에서 선택하세요. "중학교"는 "Middle School", "초등 3학년"은 "Elementary Grade 3-4"입니다.
3. 특정 단어는 쉼표로 구분한 하나의 문자열로 주세요.
4. 없는 항목은 null로 두세요.

형식:
{{"extracted": {{"grade": string|null, "topic": string|null, "words": string|null, "count": number|null}}, "isComplete": boolean, "dataExists": true, "missingFields": string[], "feedbackMessage": string}}"#,
        text,
        levels.join(", ")
    );

    (user_message, system_message)
}

/// 응답 JSON을 분석 결과로 변환
///
/// 코드 블록 표시(```)는 벗겨낸다. 목록에 없는 학년이나 범위를 벗어난 문항 수는 비운다.
pub fn parse_reply(reply: &str) -> Result<AnalysisResult, LlmError> {
    let body = strip_code_fence(reply);
    let remote: RemoteReply =
        serde_json::from_str(body).map_err(|source| LlmError::InvalidResponse {
            response: reply.to_string(),
            source,
        })?;

    let extracted = remote.extracted;
    let params = GenerationParameters {
        grade: extracted.grade.as_deref().and_then(Level::from_label),
        topic: non_blank(extracted.topic),
        words: non_blank(extracted.words),
        count: extracted.count.as_ref().and_then(parse_count),
        question_types: None,
    };

    let mut result = AnalysisResult::from_parameters(params);
    if let Some(feedback) = remote.feedback_message.filter(|f| !f.trim().is_empty()) {
        if !result.missing_fields.is_empty() {
            result.feedback_message = feedback;
        }
    }
    Ok(result)
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_count(value: &JsonValue) -> Option<u32> {
    let n = match value {
        JsonValue::Number(n) => n.as_u64()?,
        JsonValue::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    u32::try_from(n).ok().filter(|n| (1..=MAX_COUNT).contains(n))
}
