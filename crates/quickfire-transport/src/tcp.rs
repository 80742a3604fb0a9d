//! TCP transport implementation
//!
//! Each accepted connection is split into a buffered `LineReader` and a
//! `LineWriter`. The reader blocks for one newline-delimited message at
//! a time; the writer is normally driven through `start_writer_loop`,
//! which gives the connection a single ordered outbound queue.

use std::net::SocketAddr;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

use quickfire_core::{QuizError, QuizResult};
use quickfire_wire::ServerLine;

/// TCP listener for the quiz server
pub struct Listener {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl Listener {
    /// Bind to a local address
    pub async fn bind(addr: SocketAddr) -> QuizResult<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| QuizError::Transport(e.to_string()))?;

        let local_addr = listener
            .local_addr()
            .map_err(|e| QuizError::Transport(e.to_string()))?;

        Ok(Listener {
            listener,
            local_addr,
        })
    }

    /// Get local address
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accept one connection, already split into framed halves
    pub async fn accept(&self) -> QuizResult<(LineReader, LineWriter, SocketAddr)> {
        let (stream, addr) = self
            .listener
            .accept()
            .await
            .map_err(|e| QuizError::Transport(e.to_string()))?;

        let (reader, writer) = split_stream(stream);
        Ok((reader, writer, addr))
    }
}

/// Connect to a quiz server (client side, used by tests and demos)
pub async fn connect(addr: SocketAddr) -> QuizResult<(LineReader, LineWriter)> {
    let stream = TcpStream::connect(addr)
        .await
        .map_err(|e| QuizError::Transport(e.to_string()))?;

    Ok(split_stream(stream))
}

fn split_stream(stream: TcpStream) -> (LineReader, LineWriter) {
    let (read_half, write_half) = stream.into_split();
    (
        LineReader {
            reader: BufReader::new(read_half),
        },
        LineWriter { writer: write_half },
    )
}

/// Buffered, line-framed read half of a connection
pub struct LineReader {
    reader: BufReader<OwnedReadHalf>,
}

impl LineReader {
    /// Block for the next line. `Ok(None)` means clean end-of-stream.
    pub async fn next_line(&mut self) -> QuizResult<Option<String>> {
        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .await
            .map_err(|e| QuizError::Transport(e.to_string()))?;

        if read == 0 {
            return Ok(None);
        }

        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(Some(line))
    }
}

/// Line-framed write half of a connection
pub struct LineWriter {
    writer: OwnedWriteHalf,
}

impl LineWriter {
    /// Write one raw line, appending the newline delimiter
    pub async fn send_line(&mut self, line: &str) -> QuizResult<()> {
        let mut framed = String::with_capacity(line.len() + 1);
        framed.push_str(line);
        framed.push('\n');

        self.writer
            .write_all(framed.as_bytes())
            .await
            .map_err(|e| QuizError::Transport(e.to_string()))?;
        Ok(())
    }

    /// Write one server message
    pub async fn send(&mut self, line: &ServerLine) -> QuizResult<()> {
        self.send_line(&line.encode()).await
    }
}

/// Outbound message queue for one participant
pub type OutboundSender = mpsc::UnboundedSender<ServerLine>;

/// Start a background write loop for one connection.
///
/// Messages pushed into the returned sender reach the socket in push
/// order, which is the per-participant delivery ordering the coordinator
/// relies on. A write failure ends the loop; the participant's read loop
/// observes the dead socket and performs the cleanup.
pub fn start_writer_loop(mut writer: LineWriter) -> OutboundSender {
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerLine>();

    tokio::spawn(async move {
        while let Some(line) = rx.recv().await {
            if let Err(e) = writer.send(&line).await {
                tracing::warn!("outbound write failed: {}", e);
                break;
            }
        }
    });

    tx
}
