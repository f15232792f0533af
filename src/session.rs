//! One-shot and interactive front ends over a `LookupController`.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;
use tokio::task::JoinSet;
use weathernow_weather::{LookupController, LookupState};

use crate::render::{self, IDLE_PROMPT, LOADING};

/// How a one-shot lookup ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Blank query; nothing was looked up
    Idle,
    Success(String),
    Failed(String),
}

/// Look up a single query and render the settled state.
pub async fn run_once(controller: &LookupController, query: &str, json: bool) -> Result<Outcome> {
    let Some(state) = controller.submit(query).await else {
        return Ok(Outcome::Idle);
    };

    match &state {
        LookupState::Success(report) if json => {
            Ok(Outcome::Success(serde_json::to_string_pretty(report)?))
        }
        LookupState::Success(_) => Ok(Outcome::Success(render::render(&state))),
        LookupState::Failed(message) => Ok(Outcome::Failed(message.clone())),
        // unreachable: submit returns the state finish stored, always settled
        LookupState::Idle | LookupState::Loading { .. } => Ok(Outcome::Idle),
    }
}

fn is_exit_command(line: &str) -> bool {
    matches!(line.trim(), "quit" | "exit")
}

/// Read searches line by line until EOF or `quit`.
///
/// Every non-blank line starts a new lookup right away, even while an earlier
/// one is still running; only the newest one gets rendered.
pub async fn run_interactive<R, W>(
    controller: Arc<LookupController>,
    input: R,
    output: W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    let output = Arc::new(Mutex::new(output));
    write_line(&output, IDLE_PROMPT).await?;

    let mut lines = input.lines();
    let mut in_flight = JoinSet::new();

    while let Some(line) = lines.next_line().await? {
        if is_exit_command(&line) {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        write_line(&output, LOADING).await?;

        let controller = controller.clone();
        let output = output.clone();
        in_flight.spawn(async move {
            match controller.submit(&line).await {
                Some(state) => write_line(&output, &render::render(&state)).await,
                None => {
                    tracing::debug!("Lookup for {:?} superseded", line.trim());
                    Ok(())
                }
            }
        });

        // Reap finished lookups so the set doesn't grow without bound
        while let Some(done) = in_flight.try_join_next() {
            done??;
        }
    }

    while let Some(done) = in_flight.join_next().await {
        done??;
    }

    Ok(())
}

async fn write_line<W>(output: &Mutex<W>, text: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut out = output.lock().await;
    out.write_all(text.as_bytes()).await?;
    out.write_all(b"\n").await?;
    out.flush().await?;
    Ok(())
}
