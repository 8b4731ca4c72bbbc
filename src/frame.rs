//! NV21 frame container: a full-resolution luma plane followed by a
//! half-vertical-resolution interleaved chroma plane (4:2:0 family).
//! The layout is explicit and validated here so nothing downstream has to
//! re-derive it from offset arithmetic.

/// Minimum buffer length for a `width` x `height` NV21 image:
/// `width*height` luma bytes plus `width*height/2` chroma bytes.
pub fn nv21_buffer_len(width: u32, height: u32) -> usize {
    let luma = width as usize * height as usize;
    luma + luma / 2
}

#[derive(Debug)]
pub enum FrameError {
    ZeroDimension,
    BufferTooSmall { expected: usize, actual: usize },
}

impl std::fmt::Display for FrameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrameError::ZeroDimension => write!(f, "frame width/height must be non-zero"),
            FrameError::BufferTooSmall { expected, actual } => {
                write!(f, "NV21 buffer too small: need {expected} bytes, got {actual}")
            }
        }
    }
}

impl std::error::Error for FrameError {}

/// One camera frame. Ownership transfers into the pipeline for the duration
/// of a single recognition cycle and the buffer is discarded afterwards.
#[derive(Debug, Clone)]
pub struct Nv21Frame {
    buffer: Vec<u8>,
    width: u32,
    height: u32,
}

impl Nv21Frame {
    /// Wrap a raw camera buffer, validating the NV21 size invariant.
    pub fn new(buffer: Vec<u8>, width: u32, height: u32) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::ZeroDimension);
        }
        let expected = nv21_buffer_len(width, height);
        if buffer.len() < expected {
            return Err(FrameError::BufferTooSmall {
                expected,
                actual: buffer.len(),
            });
        }
        Ok(Self {
            buffer,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Byte length of the luma plane (`width * height`).
    pub fn luma_len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut [u8] {
        &mut self.buffer
    }

    /// Luma plane view.
    pub fn luma(&self) -> &[u8] {
        &self.buffer[..self.luma_len()]
    }

    /// Chroma plane view (everything after the luma plane).
    pub fn chroma(&self) -> &[u8] {
        &self.buffer[self.luma_len()..]
    }

    pub fn into_buffer(self) -> Vec<u8> {
        self.buffer
    }
}
