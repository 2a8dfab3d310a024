use adns_application::use_cases::HandleLookupUseCase;
use adns_domain::{LookupRequest, RecordType};
use tokio::io::{AsyncWriteExt, Stdout};

/// Resolves each name in turn, `repeat` times over, printing one JSON
/// response per lookup.
pub async fn run_lookups(
    use_case: &HandleLookupUseCase,
    names: &[String],
    record_type: RecordType,
    repeat: u32,
) -> anyhow::Result<usize> {
    let mut stdout = tokio::io::stdout();
    let mut failures = 0;

    for _ in 0..repeat.max(1) {
        for name in names {
            let request = LookupRequest::new(name.as_str(), record_type);
            let response = use_case.execute(&request).await;
            if !response.is_success() {
                failures += 1;
            }
            write_line(&mut stdout, &serde_json::to_string(&response)?).await?;
        }
    }

    Ok(failures)
}

pub(super) async fn write_line(stdout: &mut Stdout, line: &str) -> std::io::Result<()> {
    stdout.write_all(line.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}
