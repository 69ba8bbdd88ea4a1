//! One-shot JPEG encoder session over a byte sink.
//!
//! A session binds a sink to a set of [`CompressionParameters`] and drives
//! exactly one encode. The underlying encoder is created inside
//! [`EncoderSession::encode`] and dropped before it returns, on success and
//! on failure alike. A failed session is `Aborted` and cannot be retried; the
//! caller opens a new one.
//!
//! ```text
//! Configured --encode--> Encoding --> Finishing --> Completed
//!                            \             \
//!                             +-------------+--> Aborted
//! ```

use std::cell::Cell;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use jpeg_encoder::Encoder;
use serde::Serialize;
use tracing::{debug, error, info};

use super::params::CompressionParameters;
use super::scanline::ScanlineFeeder;
use crate::convert::PlanarColorBuffer;
use crate::error::CompressError;

/// Lifecycle of an [`EncoderSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    /// Sink open and parameters validated; nothing written yet.
    Configured,
    /// Scanlines are being handed to the encoder.
    Encoding,
    /// All scanlines consumed; flushing the sink.
    Finishing,
    /// Stream finalized and flushed.
    Completed,
    /// A stage failed. Bytes already in the sink are not a valid JPEG.
    Aborted,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Configured => "configure",
            SessionState::Encoding => "encode",
            SessionState::Finishing => "finish",
            SessionState::Completed => "completed",
            SessionState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// What a completed session produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncodeSummary {
    pub width: u32,
    pub height: u32,
    pub quality: u8,
    pub optimized: bool,
    /// Distinct scanlines handed to the encoder.
    pub scanlines: u32,
    /// Bytes written to the sink.
    pub bytes_written: u64,
}

/// Counts bytes on their way to the real sink.
struct CountingWriter<'a, W: Write> {
    inner: &'a mut W,
    count: u64,
}

impl<W: Write> Write for CountingWriter<'_, W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.count += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}

/// A single-use encode bound to one sink.
pub struct EncoderSession<W: Write> {
    sink: W,
    params: CompressionParameters,
    state: SessionState,
}

impl EncoderSession<BufWriter<File>> {
    /// Validate `params`, then create (or truncate) the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `CompressError::PreconditionViolation` for bad dimensions (the
    /// file is not touched) and `CompressError::SinkOpenFailure` if the file
    /// cannot be created.
    pub fn create(path: &Path, params: CompressionParameters) -> Result<Self, CompressError> {
        params.validate()?;
        let file = File::create(path).map_err(|source| {
            error!(path = %path.display(), error = %source, "Cannot open JPEG destination");
            CompressError::SinkOpenFailure {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!(path = %path.display(), "Opened JPEG destination");
        Self::new(BufWriter::new(file), params)
    }
}

impl<W: Write> EncoderSession<W> {
    /// Bind an already-open sink.
    pub fn new(sink: W, params: CompressionParameters) -> Result<Self, CompressError> {
        params.validate()?;
        Ok(Self {
            sink,
            params,
            state: SessionState::Configured,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn params(&self) -> &CompressionParameters {
        &self.params
    }

    /// Encode `buffer` into the sink.
    ///
    /// On failure the session moves to [`SessionState::Aborted`], the
    /// encoder's diagnostic is logged, and the error is returned.
    pub fn encode(&mut self, buffer: &PlanarColorBuffer) -> Result<EncodeSummary, CompressError> {
        if self.state != SessionState::Configured {
            return Err(CompressError::PreconditionViolation(format!(
                "encoder session already {}; open a new session",
                self.state
            )));
        }

        match self.run(buffer) {
            Ok(summary) => {
                self.state = SessionState::Completed;
                if summary.optimized {
                    info!(
                        bytes = summary.bytes_written,
                        quality = summary.quality,
                        "JPEG encoded with optimized Huffman tables"
                    );
                } else {
                    info!(
                        bytes = summary.bytes_written,
                        quality = summary.quality,
                        "JPEG encoded with standard Huffman tables"
                    );
                }
                Ok(summary)
            }
            Err(err) => {
                error!(stage = %self.state, error = %err, "JPEG encode aborted");
                self.state = SessionState::Aborted;
                Err(err)
            }
        }
    }

    fn run(&mut self, buffer: &PlanarColorBuffer) -> Result<EncodeSummary, CompressError> {
        let params = self.params;
        if buffer.width() != params.width || buffer.height() != params.height {
            return Err(CompressError::PreconditionViolation(format!(
                "buffer is {}x{} but parameters say {}x{}",
                buffer.width(),
                buffer.height(),
                params.width,
                params.height
            )));
        }

        let quality = params.effective_quality();
        let mut counter = CountingWriter {
            inner: &mut self.sink,
            count: 0,
        };

        let mut encoder = Encoder::new(&mut counter, quality);
        encoder.set_progressive(false);
        encoder.set_optimized_huffman_tables(params.optimize_entropy_coding);
        debug!(
            width = params.width,
            height = params.height,
            quality,
            optimize = params.optimize_entropy_coding,
            "Encoder configured"
        );

        self.state = SessionState::Encoding;
        let next_scanline = Cell::new(0u32);
        encoder
            .encode_image(ScanlineFeeder::new(buffer, &next_scanline))
            .map_err(|e| CompressError::EncoderInternal(e.to_string()))?;

        if next_scanline.get() != params.height {
            return Err(CompressError::EncoderInternal(format!(
                "encoder consumed {} of {} scanlines",
                next_scanline.get(),
                params.height
            )));
        }

        self.state = SessionState::Finishing;
        counter
            .flush()
            .map_err(|e| CompressError::EncoderInternal(format!("flush failed: {e}")))?;

        Ok(EncodeSummary {
            width: params.width,
            height: params.height,
            quality,
            optimized: params.optimize_entropy_coding,
            scanlines: next_scanline.get(),
            bytes_written: counter.count,
        })
    }

    /// Release the session and hand back the sink.
    pub fn into_sink(self) -> W {
        self.sink
    }
}
