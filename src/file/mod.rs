//! Whole-file handling: section scanning, encoding, and disk I/O.
//!
//! The codec itself works on in-memory buffers only. [`IldaFile::load`] and
//! [`IldaFile::save`] do the I/O once around it, and
//! [`IldaFile::spawn_load`] moves a load onto a background thread owned by
//! the caller.

mod scanner;

use std::fs;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};

pub use scanner::{DecodeReport, SectionError, decode_file, encode_file, scan_magic};

use crate::format::{IldaError, Section};

/// An ordered list of sections.
///
/// Usage:
/// ```ignore
/// let report = IldaFile::load("show.ild")?;
/// if !report.is_clean() {
///     eprintln!("{}", report);
/// }
/// let file = IldaFile::from(report);
/// file.save("copy.ild")?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IldaFile {
    pub sections: Vec<Section>,
}

impl IldaFile {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    /// Encode all sections into one buffer.
    pub fn to_bytes(&self) -> Result<Vec<u8>, IldaError> {
        encode_file(&self.sections)
    }

    /// Read and decode a file from disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DecodeReport, IldaError> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        log::info!("Opened {} ({} bytes)", path.display(), bytes.len());

        let report = decode_file(&bytes);
        log::info!("{}: {}", path.display(), report);
        Ok(report)
    }

    /// Encode and write to disk. The file is not touched if encoding fails.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), IldaError> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        fs::write(path, &bytes)?;
        log::info!(
            "Saved {} sections ({} bytes) to {}",
            self.sections.len(),
            bytes.len(),
            path.display()
        );
        Ok(())
    }

    /// Start loading `path` on a background thread.
    pub fn spawn_load<P: AsRef<Path>>(path: P) -> LoadHandle {
        let path = path.as_ref().to_path_buf();
        let thread_path = path.clone();
        let handle = thread::spawn(move || Self::load(&thread_path));
        LoadHandle { path, handle }
    }

    /// Number of sections that carry records.
    pub fn data_section_count(&self) -> usize {
        self.sections.iter().filter(|s| !s.is_terminator()).count()
    }
}

impl From<DecodeReport> for IldaFile {
    fn from(report: DecodeReport) -> Self {
        Self {
            sections: report.sections,
        }
    }
}

/// Handle to a load running on a background thread.
#[derive(Debug)]
pub struct LoadHandle {
    path: PathBuf,
    handle: JoinHandle<Result<DecodeReport, IldaError>>,
}

impl LoadHandle {
    /// Path being loaded.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check without blocking whether the load has completed.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the load completes.
    pub fn wait(self) -> Result<DecodeReport, IldaError> {
        self.handle.join().map_err(|_| IldaError::LoadPanicked)?
    }
}
