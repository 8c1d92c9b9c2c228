//! Line-oriented chat loop: one line of input is one submit.

use letrades_client::render::{INPUT_PLACEHOLDER, LOADING_INDICATOR, render_since};
use letrades_client::{ChatSession, RelayTransport};
use log::debug;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::Result;

/// Tracks which turns have already been written out.
struct View {
    printed: usize,
}

impl View {
    /// Write every turn up to the session's scroll anchor.
    async fn scroll<T, W>(&mut self, session: &ChatSession<T>, out: &mut W) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        let Some(anchor) = session.scroll_anchor() else {
            return Ok(());
        };
        for line in render_since(session.turns(), self.printed) {
            out.write_all(format!("{line}\n").as_bytes()).await?;
        }
        self.printed = anchor + 1;
        Ok(())
    }
}

/// Run the session until `input` is exhausted.
pub async fn run<T, R, W>(session: &mut ChatSession<T>, input: R, out: &mut W) -> Result<()>
where
    T: RelayTransport,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut view = View { printed: 0 };
    let mut lines = input.lines();

    out.write_all(format!("{INPUT_PLACEHOLDER}\n").as_bytes())
        .await?;
    out.flush().await?;

    while let Some(line) = lines.next_line().await? {
        session.set_input(line);
        let text = session.input().to_string();

        let Some(request) = session.begin(&text) else {
            debug!("ignoring blank input");
            continue;
        };
        view.scroll(session, out).await?;
        out.write_all(format!("{LOADING_INDICATOR}\n").as_bytes())
            .await?;
        out.flush().await?;

        let result = session.transport().send(&request).await;
        session.settle(result);

        view.scroll(session, out).await?;
        if let Some(banner) = session.error() {
            out.write_all(format!("{banner}\n").as_bytes()).await?;
        }
        out.flush().await?;
    }

    Ok(())
}
