//! Binary PPM (`P6`) codec.
//!
//! Writing always produces the minimal header `P6\n<w> <h>\n255\n` followed by
//! packed RGB bytes. Reading accepts any whitespace layout and `#` comments
//! in the header, but only a max value of 255.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{GoldenError, GoldenResult};

/// A decoded 8-bit RGB image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PpmImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB bytes, `width * height * 3` long
    pub pixels: Vec<u8>,
}

/// Byte length of a `width` x `height` RGB raster.
pub(crate) fn rgb_len(width: u32, height: u32) -> GoldenResult<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(3))
        .ok_or(GoldenError::ImageSize { width, height })
}

/// Write a P6 image.
pub fn encode_ppm<W: Write>(
    writer: &mut W,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> std::io::Result<()> {
    debug_assert_eq!(pixels.len(), width as usize * height as usize * 3);
    write!(writer, "P6\n{} {}\n255\n", width, height)?;
    writer.write_all(pixels)
}

/// Write a P6 image to `path`, replacing any existing file.
pub fn write_ppm(path: &Path, width: u32, height: u32, pixels: &[u8]) -> GoldenResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    encode_ppm(&mut writer, width, height, pixels)?;
    writer.flush()?;
    Ok(())
}

/// Parse a P6 image held in memory.
pub fn decode_ppm(bytes: &[u8]) -> GoldenResult<PpmImage> {
    let mut header = HeaderReader { bytes, pos: 0 };

    let magic = header.token()?;
    if magic != b"P6" {
        return Err(GoldenError::Header(format!(
            "bad magic {:?}",
            String::from_utf8_lossy(magic)
        )));
    }
    let width = header.number("width")?;
    let height = header.number("height")?;
    let max_value = header.number("max value")?;
    if max_value != 255 {
        return Err(GoldenError::MaxValue(max_value));
    }

    // Exactly one whitespace byte separates the header from the raster
    let start = header.pos + 1;
    let payload = bytes.get(start..).unwrap_or_default();
    let expected = rgb_len(width, height)?;
    if payload.len() != expected {
        return Err(GoldenError::SizeMismatch {
            name: "PPM payload".to_string(),
            expected,
            found: payload.len(),
        });
    }

    Ok(PpmImage {
        width,
        height,
        pixels: payload.to_vec(),
    })
}

/// Read and parse a P6 file.
pub fn read_ppm(path: &Path) -> GoldenResult<PpmImage> {
    let bytes = std::fs::read(path).map_err(|source| GoldenError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode_ppm(&bytes)
}

/// Tokenizer over the ASCII part of a PPM header.
struct HeaderReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> HeaderReader<'a> {
    fn skip_separators(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b == b'#' {
                while self.bytes.get(self.pos).is_some_and(|&c| c != b'\n') {
                    self.pos += 1;
                }
            } else if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn token(&mut self) -> GoldenResult<&'a [u8]> {
        self.skip_separators();
        let start = self.pos;
        while self
            .bytes
            .get(self.pos)
            .is_some_and(|b| !b.is_ascii_whitespace() && *b != b'#')
        {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(GoldenError::Header("unexpected end of header".to_string()));
        }
        Ok(&self.bytes[start..self.pos])
    }

    fn number(&mut self, field: &str) -> GoldenResult<u32> {
        let token = self.token()?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                GoldenError::Header(format!(
                    "invalid {} {:?}",
                    field,
                    String::from_utf8_lossy(token)
                ))
            })
    }
}
