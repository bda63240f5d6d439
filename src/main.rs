use anyhow::{bail, Context, Result};
use vocab_worksheet::utils::logging;
use vocab_worksheet::{
    Config, DataSource, Extractor, FileStore, GenerateOutcome, HttpStore, ParameterExtractor,
    SynthesisFlow, WorksheetSession,
};

#[tokio::main]
async fn main() -> Result<()> {
    // 설정 로드
    let config = Config::load().context("설정을 불러오지 못했습니다")?;

    // 로그 초기화
    logging::init(config.verbose_logging);

    let request = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if request.trim().is_empty() {
        bail!("사용법: vocab_worksheet <요청 문장>");
    }

    let extractor = Extractor::from_config(&config);
    match config.data_base_url.clone() {
        Some(url) => run(HttpStore::new(url), extractor, &config, &request).await,
        None => run(FileStore::new(&config.data_dir), extractor, &config, &request).await,
    }
}

async fn run<S: DataSource>(source: S, extractor: Extractor, config: &Config, request: &str) -> Result<()> {
    logging::log_startup(extractor.name(), &source.describe());

    let flow = SynthesisFlow::new(source, extractor, config);
    let mut session = WorksheetSession::new(&flow);

    let analysis = session.start(request).await?;
    logging::log_analysis(analysis);

    match session.generate().await {
        GenerateOutcome::Ready(worksheet) => {
            logging::log_worksheet_summary(&worksheet);
            println!("{}", serde_json::to_string_pretty(&worksheet)?);
        }
        GenerateOutcome::NotReady => {
            let feedback = session.analysis().map(|a| a.feedback_message.as_str()).unwrap_or_default();
            println!("{}", feedback);
        }
        outcome => {
            println!("{}", outcome.message().unwrap_or_default());
        }
    }

    Ok(())
}
