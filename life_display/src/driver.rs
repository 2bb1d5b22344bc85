// driver.rs - Headless generation loop that streams encoded frames
//
// Each frame is encoded into an owned buffer before the update starts, so
// the writer task never borrows a grid. At most one write is in flight, and
// it must finish before the next frame is encoded.

use crate::fps::FpsCounter;
use life_engine::{EncodeError, Generations, Protocol, Scheduler};
use std::io;
use std::time::Instant;
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to encode frame")]
    Encode(#[from] EncodeError),
    #[error("failed to write frame to output")]
    Write(#[source] io::Error),
    #[error("frame writer task failed")]
    Writer(#[source] JoinError),
}

enum Output<W> {
    Idle(W, Vec<u8>),
    Writing(JoinHandle<io::Result<(W, Vec<u8>)>>),
}

impl<W> Output<W> {
    /// Waits for any in-flight frame and hands back the sink and its buffer.
    async fn reclaim(self) -> Result<(W, Vec<u8>), DriverError> {
        match self {
            Output::Idle(sink, frame) => Ok((sink, frame)),
            Output::Writing(handle) => handle
                .await
                .map_err(DriverError::Writer)?
                .map_err(DriverError::Write),
        }
    }
}

async fn write_frame<W>(mut sink: W, frame: Vec<u8>) -> io::Result<(W, Vec<u8>)>
where
    W: AsyncWrite + Unpin,
{
    sink.write_all(&frame).await?;
    sink.flush().await?;
    Ok((sink, frame))
}

/// Runs generations until `limit` (if any) is reached, writing one frame of
/// `protocol` per generation to `sink`. Returns the sink once the last frame
/// has been written. Any write failure ends the run.
pub async fn stream<W>(
    game: &mut Generations,
    scheduler: &Scheduler,
    protocol: Protocol,
    sink: W,
    limit: Option<u64>,
    fps: &mut FpsCounter,
) -> Result<W, DriverError>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    let mut output = Output::Idle(sink, Vec::new());

    while limit.is_none_or(|n| game.generation() < n) {
        if protocol != Protocol::Off {
            let (sink, mut frame) = output.reclaim().await?;
            frame.clear();
            protocol.encode(game.current(), &mut frame)?;
            debug!(generation = game.generation(), bytes = frame.len(), "frame encoded");
            output = Output::Writing(tokio::spawn(write_frame(sink, frame)));
        }

        game.advance(scheduler);

        if let Some(rate) = fps.tick(Instant::now()) {
            let census = game.current().census();
            info!(
                fps = rate,
                generation = game.generation(),
                living = census.living(),
                decaying = census.decaying(),
                "FPS: {rate}"
            );
        }
    }

    let (sink, _) = output.reclaim().await?;
    Ok(sink)
}
