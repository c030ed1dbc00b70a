use std::{
    fs::File,
    os::unix::fs::FileExt,
    path::{Path, PathBuf},
};

use super::error::LoaderError;

/// Incremental reader of flat float32 parameter files.
///
/// The cursor starts past the fixed file header and only ever moves
/// forward; every read is bounds-checked against the file size up front,
/// so a truncated file fails before the cursor is advanced.
#[derive(Debug)]
pub struct Float32Walker {
    source: Option<(PathBuf, File)>,
    offset: u64,
    size: u64,
    eof: bool,
}

impl Float32Walker {
    /// Opens `path` with the first `header_size` bytes treated as opaque
    /// header. An absent path yields a walker that is immediately at end
    /// of data. A file shorter than the header is rejected outright.
    pub fn open(
        path: Option<&Path>,
        header_size: u64,
    ) -> Result<Self, LoaderError> {
        let Some(path) = path else {
            return Ok(Self {
                source: None,
                offset: header_size,
                size: 0,
                eof: true,
            });
        };
        let file = File::open(path)?;
        let size = file.metadata()?.len();
        if size < header_size {
            return Err(LoaderError::SizeMismatch {
                expected: header_size,
                found: size,
            });
        }
        Ok(Self {
            source: Some((path.to_path_buf(), file)),
            offset: header_size,
            size,
            eof: size == header_size,
        })
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn eof(&self) -> bool {
        self.eof
    }

    /// Reads the next `count` consecutive float32 values and advances the
    /// cursor past them. Returns `Ok(None)` once the data is exhausted;
    /// a request reaching past the end of the file is a format error and
    /// leaves the cursor where it was.
    pub fn walk(
        &mut self,
        count: usize,
    ) -> Result<Option<Vec<f32>>, LoaderError> {
        if self.eof {
            return Ok(None);
        }
        let Some((path, file)) = &self.source else {
            return Ok(None);
        };
        let end = self.offset + 4 * count as u64;
        if end > self.size {
            return Err(LoaderError::OverRead {
                path: path.clone(),
                offset: self.offset,
                requested: count,
                size: self.size,
            });
        }

        let mut buffer = vec![0u8; 4 * count];
        file.read_exact_at(&mut buffer, self.offset)?;
        let values = buffer
            .chunks_exact(4)
            .map(|bytes| f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
            .collect();

        self.offset = end;
        if end == self.size {
            self.eof = true;
        }
        Ok(Some(values))
    }

    /// Final consistency check of a resolution pass: every byte past the
    /// header must have been consumed. Returns the total bytes identified,
    /// header included; 0 when there was no source.
    pub fn finish(&self) -> Result<u64, LoaderError> {
        if self.source.is_none() {
            return Ok(0);
        }
        if self.offset != self.size {
            return Err(LoaderError::SizeMismatch {
                expected: self.offset,
                found: self.size,
            });
        }
        Ok(self.offset)
    }
}
