//! Binary codec for the signal stream.
//!
//! Wire format, one record per signal:
//! ```text
//! [kind:1][payload:N]
//!
//! WindowCreationFailed     0  -
//! WindowCreationSucceeded  1  -
//! HookInstalled            2  [width:i32][height:i32]
//! MouseMoved               3  [x:i32][y:i32]
//! MouseClicked             4  [x:i32][y:i32]
//! KeyPressed               5  [key_code:u8]
//! ForegroundWindowTitle    6  [len:i32][unit:u16 * len]   last unit is 0
//! ```
//! All multi-byte fields, title code units included, are big-endian: each
//! field is its raw bit pattern, most significant bit first. There is no
//! padding and no framing beyond the kind byte.

use crate::error::{Error, Result};
use crate::signal::{Signal, SignalKind, WindowTitle};
use std::io::{self, ErrorKind, Read, Write};

/// Size of the kind byte plus two `i32` fields.
const POINT_RECORD_LEN: usize = 9;

/// Number of bytes `signal` occupies on the wire.
pub fn encoded_len(signal: &Signal) -> usize {
    match signal {
        Signal::WindowCreationFailed | Signal::WindowCreationSucceeded => 1,
        Signal::HookInstalled { .. } | Signal::MouseMoved { .. } | Signal::MouseClicked { .. } => {
            POINT_RECORD_LEN
        }
        Signal::KeyPressed { .. } => 2,
        Signal::ForegroundWindowTitle { title } => 5 + 2 * title.len_with_terminator(),
    }
}

/// Append the encoding of `signal` to `out`.
///
/// The buffer is grown with `try_reserve` so that an allocation failure is
/// reported instead of aborting; `out` is left untouched on error.
pub fn encode_into(signal: &Signal, out: &mut Vec<u8>) -> Result<()> {
    if let Signal::ForegroundWindowTitle { title } = signal {
        if i32::try_from(title.len_with_terminator()).is_err() {
            return Err(Error::TitleTooLong(title.len_with_terminator()));
        }
    }
    out.try_reserve(encoded_len(signal))
        .map_err(|_| Error::Allocation)?;

    out.push(signal.kind().as_byte());
    match signal {
        Signal::WindowCreationFailed | Signal::WindowCreationSucceeded => {}
        Signal::HookInstalled {
            screen_width,
            screen_height,
        } => {
            out.extend_from_slice(&screen_width.to_be_bytes());
            out.extend_from_slice(&screen_height.to_be_bytes());
        }
        Signal::MouseMoved { x, y } | Signal::MouseClicked { x, y } => {
            out.extend_from_slice(&x.to_be_bytes());
            out.extend_from_slice(&y.to_be_bytes());
        }
        Signal::KeyPressed { key_code } => out.push(*key_code),
        Signal::ForegroundWindowTitle { title } => {
            // Checked above.
            let len = title.len_with_terminator() as i32;
            out.extend_from_slice(&len.to_be_bytes());
            for unit in title.units() {
                out.extend_from_slice(&unit.to_be_bytes());
            }
        }
    }
    Ok(())
}

/// Encode `signal` into a fresh buffer.
pub fn encode(signal: &Signal) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_into(signal, &mut out)?;
    Ok(out)
}

/// Writes signals to a byte sink, flushing after every call.
///
/// Each call encodes its records completely before touching the sink and
/// then hands them over with one `write_all`, so an encoding failure never
/// leaves a partial record behind.
#[derive(Debug)]
pub struct SignalWriter<W: Write> {
    inner: W,
}

impl<W: Write> SignalWriter<W> {
    /// Wrap a sink.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Write one signal and flush.
    pub fn write_signal(&mut self, signal: &Signal) -> Result<()> {
        let record = encode(signal)?;
        self.commit(&record)
    }

    /// Write several signals back to back and flush once.
    ///
    /// Used for records that must appear contiguously in the stream.
    pub fn write_signals(&mut self, signals: &[Signal]) -> Result<()> {
        let mut records = Vec::new();
        for signal in signals {
            encode_into(signal, &mut records)?;
        }
        self.commit(&records)
    }

    fn commit(&mut self, bytes: &[u8]) -> Result<()> {
        self.inner.write_all(bytes)?;
        self.inner.flush()?;
        Ok(())
    }

    /// Borrow the sink.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Mutably borrow the sink.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    /// Unwrap the sink.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Reads signals back from a byte stream.
///
/// This is the reference parser for downstream consumers.
#[derive(Debug)]
pub struct SignalReader<R: Read> {
    inner: R,
}

impl<R: Read> SignalReader<R> {
    /// Wrap a source.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Read the next signal.
    ///
    /// Returns `Ok(None)` when the stream ends cleanly between records.
    pub fn read_signal(&mut self) -> Result<Option<Signal>> {
        let Some(byte) = self.read_kind_byte()? else {
            return Ok(None);
        };
        let kind = SignalKind::from_byte(byte).ok_or(Error::UnknownKind(byte))?;

        let signal = match kind {
            SignalKind::WindowCreationFailed => Signal::WindowCreationFailed,
            SignalKind::WindowCreationSucceeded => Signal::WindowCreationSucceeded,
            SignalKind::HookInstalled => {
                let [screen_width, screen_height] = self.read_pair(kind)?;
                Signal::HookInstalled {
                    screen_width,
                    screen_height,
                }
            }
            SignalKind::MouseMoved => {
                let [x, y] = self.read_pair(kind)?;
                Signal::MouseMoved { x, y }
            }
            SignalKind::MouseClicked => {
                let [x, y] = self.read_pair(kind)?;
                Signal::MouseClicked { x, y }
            }
            SignalKind::KeyPressed => {
                let [key_code] = self.read_array::<1>(kind)?;
                Signal::KeyPressed { key_code }
            }
            SignalKind::ForegroundWindowTitle => Signal::ForegroundWindowTitle {
                title: self.read_title(kind)?,
            },
        };
        Ok(Some(signal))
    }

    /// Unwrap the source.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn read_kind_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn read_array<const N: usize>(&mut self, kind: SignalKind) -> Result<[u8; N]> {
        let mut buf = [0u8; N];
        self.inner
            .read_exact(&mut buf)
            .map_err(|e| eof_to_truncated(e, kind))?;
        Ok(buf)
    }

    fn read_i32(&mut self, kind: SignalKind) -> Result<i32> {
        Ok(i32::from_be_bytes(self.read_array::<4>(kind)?))
    }

    fn read_pair(&mut self, kind: SignalKind) -> Result<[i32; 2]> {
        Ok([self.read_i32(kind)?, self.read_i32(kind)?])
    }

    fn read_title(&mut self, kind: SignalKind) -> Result<WindowTitle> {
        let len = self.read_i32(kind)?;
        if len < 1 {
            return Err(Error::MalformedTitle(format!(
                "length {len} leaves no room for the terminator"
            )));
        }

        // Grown as data arrives rather than trusting the length up front.
        let byte_len = len as u64 * 2;
        let mut bytes = Vec::new();
        (&mut self.inner).take(byte_len).read_to_end(&mut bytes)?;
        if bytes.len() as u64 != byte_len {
            return Err(Error::UnexpectedEof(kind.name()));
        }

        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        match units.iter().position(|&unit| unit == 0) {
            Some(end) if end == units.len() - 1 => Ok(WindowTitle::from_units(units)),
            Some(end) => Err(Error::MalformedTitle(format!(
                "terminator at unit {end} of {len}"
            ))),
            None => Err(Error::MalformedTitle("missing terminator".into())),
        }
    }
}

impl<R: Read> Iterator for SignalReader<R> {
    type Item = Result<Signal>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_signal().transpose()
    }
}

fn eof_to_truncated(e: io::Error, kind: SignalKind) -> Error {
    if e.kind() == ErrorKind::UnexpectedEof {
        Error::UnexpectedEof(kind.name())
    } else {
        Error::Io(e)
    }
}
