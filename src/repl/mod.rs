//! REPL Module
//!
//! The read-eval-print loop: prompt, tokenize, dispatch, print.

mod commands;
mod input;

pub use commands::{Command, Flow, Reply, Session, CATCH_ROLL_CEILING};
pub use input::clean_input;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

/// Prompt printed before every line is read.
pub const PROMPT: &str = "Pokedex > ";

/// Runs the REPL until `exit` or end of input.
///
/// Command failures are printed to `output` and the loop continues; only I/O
/// errors on `input` or `output` end it early.
pub async fn run<R, W>(session: &mut Session, input: R, mut output: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    loop {
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        let Some(line) = lines.next_line().await? else {
            output.write_all(b"\n").await?;
            break;
        };

        let words = clean_input(&line);
        let Some((name, args)) = words.split_first() else {
            continue;
        };

        let reply = match Command::from_name(name) {
            Some(command) => {
                debug!(command = command.name(), ?args, "Dispatching command");
                match session.execute(command, args).await {
                    Ok(reply) => reply,
                    Err(err) => {
                        warn!(command = command.name(), error = %err, "Command failed");
                        Reply {
                            lines: vec![err.to_string()],
                            flow: Flow::Continue,
                        }
                    }
                }
            }
            None => Reply {
                lines: vec!["Unknown command".to_string()],
                flow: Flow::Continue,
            },
        };

        for line in &reply.lines {
            output.write_all(line.as_bytes()).await?;
            output.write_all(b"\n").await?;
        }

        if reply.flow == Flow::Exit {
            break;
        }
    }

    output.flush().await
}
