/// 로그 도구 모듈
///
/// 구독자 초기화와 로그 출력 보조 함수를 제공한다
use crate::models::{AnalysisResult, Worksheet};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// 로그 구독자 초기화
///
/// `RUST_LOG`가 있으면 그 값을, 없으면 `info`(상세 모드에서는 `debug`)를 사용한다.
/// 이미 초기화된 경우에는 조용히 넘어간다.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// 프로그램 시작 정보 기록
///
/// # 매개변수
/// - `extractor_name`: 사용 중인 파라미터 추출기 이름
/// - `data_location`: 데이터셋 위치 (디렉터리 또는 URL)
pub fn log_startup(extractor_name: &str, data_location: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 단어 문제지 합성기 시작 - {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    info!("🧭 추출기: {}", extractor_name);
    info!("📁 데이터셋: {}", data_location);
    info!("{}", "=".repeat(60));
}

/// 분석 결과 기록
pub fn log_analysis(analysis: &AnalysisResult) {
    let params = &analysis.extracted;
    info!(
        "📋 분석 결과: 학년={:?}, 주제={:?}, 단어={:?}, 문항 수={:?}",
        params.grade.map(|g| g.label()),
        params.topic,
        params.words,
        params.count
    );
    if analysis.is_complete {
        info!("✓ {}", analysis.feedback_message);
    } else {
        warn!("⚠️ {}", analysis.feedback_message);
    }
}

/// 최종 문제지 요약 기록
pub fn log_worksheet_summary(worksheet: &Worksheet) {
    info!("\n{}", "─".repeat(60));
    info!("✅ 문제지 생성 완료: {}", worksheet.title);
    info!("📊 문항 수: {}", worksheet.questions.len());
    info!("🔤 사용된 단어: {}", worksheet.words_used.join(", "));
    info!("{}", "─".repeat(60));
}

/// 로그 표시용으로 긴 텍스트 자르기
///
/// # 매개변수
/// - `text`: 원본 텍스트
/// - `max_len`: 최대 글자 수
///
/// # 반환
/// 잘린 텍스트 (잘렸으면 `...`가 붙는다)
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
