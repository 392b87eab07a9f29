//! Browser native messaging framing.
//!
//! Both directions use the same wire format: a 4-byte little-endian unsigned
//! length followed by that many bytes of UTF-8 JSON. The channel owns the
//! process's stdin and stdout exclusively for the life of the process;
//! nothing else may read or write them while the host runs.
//!
//! Read faults are classified by whether the next frame boundary is still
//! known. A correctly framed but undecodable payload is recoverable (the
//! reader is already positioned at the next frame); a stream that ends
//! inside a frame is not.

use downstage_values::{MoveRequest, MoveResponse};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, Stdin, Stdout};

use crate::config::HostConfig;
use crate::error::{HostError, HostResult};

/// Outcome of one read from the channel.
#[derive(Debug)]
pub enum ReadOutcome {
    /// A complete, decoded request.
    Request(MoveRequest),

    /// A complete frame whose payload could not be decoded. The stream is
    /// positioned at the next frame boundary; the loop keeps serving.
    Malformed(String),

    /// The peer closed its end exactly at a frame boundary.
    Disconnected,
}

/// Framed channel over a pair of byte streams.
///
/// Production code constructs it over stdio once at startup; tests drive it
/// through in-memory duplex streams.
pub struct NativeMessagingChannel<R, W> {
    reader: R,
    writer: W,
    max_message_size: usize,
}

impl NativeMessagingChannel<Stdin, Stdout> {
    /// Take ownership of the process's standard streams.
    pub fn stdio(config: &HostConfig) -> Self {
        Self::new(tokio::io::stdin(), tokio::io::stdout(), config.max_message_size)
    }
}

impl<R, W> NativeMessagingChannel<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Create a channel over arbitrary streams.
    pub fn new(reader: R, writer: W, max_message_size: usize) -> Self {
        Self {
            reader,
            writer,
            max_message_size,
        }
    }

    /// Read one frame and decode it as a request.
    ///
    /// # Errors
    ///
    /// Returns `HostError::Protocol` when the stream ends inside a frame
    /// (the next boundary is unknowable) and `HostError::Io` on hard read
    /// failures. Both are fatal to the loop.
    pub async fn read_request(&mut self) -> HostResult<ReadOutcome> {
        // Read the length header byte by byte so a clean close before any
        // header byte is distinguishable from a close inside the header.
        let mut length_bytes = [0u8; 4];
        let mut filled = 0;
        while filled < length_bytes.len() {
            let n = self.reader.read(&mut length_bytes[filled..]).await?;
            if n == 0 {
                if filled == 0 {
                    return Ok(ReadOutcome::Disconnected);
                }
                return Err(HostError::protocol(
                    "stream closed inside a frame length header",
                ));
            }
            filled += n;
        }

        let length = u32::from_le_bytes(length_bytes) as usize;

        if length == 0 {
            return Ok(ReadOutcome::Malformed("frame length of zero".to_string()));
        }

        if length > self.max_message_size {
            // The boundary is still known: drain the payload, then report.
            self.drain_payload(length as u64).await?;
            return Ok(ReadOutcome::Malformed(format!(
                "frame length {} exceeds maximum size {}",
                length, self.max_message_size
            )));
        }

        let mut payload = vec![0u8; length];
        self.reader.read_exact(&mut payload).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                HostError::protocol("stream closed inside a frame payload")
            } else {
                HostError::Io(e)
            }
        })?;

        let text = match String::from_utf8(payload) {
            Ok(text) => text,
            Err(e) => return Ok(ReadOutcome::Malformed(format!("invalid UTF-8 in frame: {e}"))),
        };

        match serde_json::from_str::<MoveRequest>(&text) {
            Ok(request) => Ok(ReadOutcome::Request(request)),
            Err(e) => Ok(ReadOutcome::Malformed(format!("invalid JSON in frame: {e}"))),
        }
    }

    /// Write one response as a single logical frame: length header, payload,
    /// flush. No partial frame is ever observable by the peer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any write fails.
    pub async fn write_response(&mut self, response: &MoveResponse) -> HostResult<()> {
        let payload = serde_json::to_vec(response)?;

        if payload.len() > self.max_message_size {
            return Err(HostError::protocol(format!(
                "response length {} exceeds maximum size {}",
                payload.len(),
                self.max_message_size
            )));
        }

        let length = u32::try_from(payload.len())
            .map_err(|_| HostError::protocol("response too large for a 4-byte length header"))?;
        self.writer.write_all(&length.to_le_bytes()).await?;
        self.writer.write_all(&payload).await?;
        self.writer.flush().await?;

        Ok(())
    }

    async fn drain_payload(&mut self, length: u64) -> HostResult<()> {
        let mut chunk = (&mut self.reader).take(length);
        let drained = tokio::io::copy(&mut chunk, &mut tokio::io::sink()).await?;
        if drained < length {
            return Err(HostError::protocol(
                "stream closed inside an oversized frame payload",
            ));
        }
        Ok(())
    }
}

/// Encode a response to raw frame bytes (for testing).
pub fn encode_response(response: &MoveResponse) -> HostResult<Vec<u8>> {
    let payload = serde_json::to_vec(response)?;
    let mut frame = Vec::with_capacity(4 + payload.len());
    frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Encode a request to raw frame bytes (for testing).
pub fn encode_request(request: &MoveRequest) -> HostResult<Vec<u8>> {
    let payload = serde_json::to_vec(request)?;
    let mut frame = Vec::with_capacity(4 + payload.len());
    frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Decode a response from raw frame bytes (for testing).
pub fn decode_response(data: &[u8]) -> HostResult<MoveResponse> {
    let payload = frame_payload(data)?;
    Ok(serde_json::from_slice(payload)?)
}

/// Decode a request from raw frame bytes (for testing).
pub fn decode_request(data: &[u8]) -> HostResult<MoveRequest> {
    let payload = frame_payload(data)?;
    Ok(serde_json::from_slice(payload)?)
}

fn frame_payload(data: &[u8]) -> HostResult<&[u8]> {
    if data.len() < 4 {
        return Err(HostError::protocol("data too short for a length header"));
    }

    let length = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
    if data.len() < 4 + length {
        return Err(HostError::protocol("data too short for the framed payload"));
    }

    Ok(&data[4..4 + length])
}
