use super::lookup::write_line;
use adns_application::use_cases::HandleLookupUseCase;
use adns_domain::{LookupRequest, LookupResponse};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Requests read ahead of the oldest unanswered one.
const MAX_IN_FLIGHT: usize = 256;

/// Reads JSON lookup requests from stdin, one per line, and writes one JSON
/// response per line to stdout in request order. Lookups overlap; output
/// order does not depend on completion order.
pub async fn serve_stdio(use_case: Arc<HandleLookupUseCase>) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::channel::<JoinHandle<LookupResponse>>(MAX_IN_FLIGHT);

    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(handle) = rx.recv().await {
            let response = handle.await.unwrap_or_else(|e| {
                LookupResponse::failure(format!("query dns error: {}", e))
            });
            let line = serde_json::to_string(&response)?;
            write_line(&mut stdout, &line).await?;
        }
        Ok::<(), anyhow::Error>(())
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut served = 0usize;
    let interrupted = tokio::signal::ctrl_c();
    tokio::pin!(interrupted);

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = &mut interrupted => {
                info!("Interrupted, finishing outstanding lookups");
                break;
            }
        };
        let Some(line) = line else {
            debug!("stdin closed");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let handle = match serde_json::from_str::<LookupRequest>(&line) {
            Ok(request) => {
                let use_case = Arc::clone(&use_case);
                tokio::spawn(async move { use_case.execute(&request).await })
            }
            Err(e) => {
                warn!(error = %e, "Malformed lookup request");
                let response = LookupResponse::failure(format!("query dns error: {}", e));
                tokio::spawn(async move { response })
            }
        };

        served += 1;
        if tx.send(handle).await.is_err() {
            break;
        }
    }

    drop(tx);
    writer.await??;

    info!(requests = served, "Stdio server finished");
    Ok(())
}
