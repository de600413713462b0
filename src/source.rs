use std::fs;
use std::io::Read;
use std::ops::Deref;
use std::path::{Path, PathBuf};

use memmap2::Mmap;

use crate::error::MatchError;

/// A loaded text buffer. Files are memory-mapped; everything else is owned.
pub enum Text {
    Mapped(Mmap),
    Owned(Vec<u8>),
}

impl Deref for Text {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Mapped(m) => &m[..],
            Self::Owned(v) => &v[..],
        }
    }
}

impl std::fmt::Debug for Text {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            Self::Mapped(_) => "Mapped",
            Self::Owned(_) => "Owned",
        };
        write!(f, "Text::{kind}({} bytes)", self.len())
    }
}

/// Where a benchmark or search gets its text from.
pub trait TextSource {
    /// Short label shown in reports.
    fn name(&self) -> String;
    fn load(&self) -> Result<Text, MatchError>;
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TextSource for FileSource {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }

    fn load(&self) -> Result<Text, MatchError> {
        let path = &self.path;
        let meta = fs::metadata(path).map_err(|e| MatchError::from_io(path, e))?;
        if meta.is_dir() {
            return Err(MatchError::InvalidArgument {
                arg: "text".into(),
                reason: format!("{} is a directory", path.display()),
            });
        }

        // mmap on a 0-byte file fails on some platforms
        if meta.len() == 0 {
            return Ok(Text::Owned(Vec::new()));
        }

        let file = fs::File::open(path).map_err(|e| MatchError::from_io(path, e))?;
        // SAFETY: the map is read-only; a concurrent truncation by another
        // process is outside what this tool guards against.
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| MatchError::from_io(path, e))?;
        tracing::debug!(path = %path.display(), bytes = mmap.len(), "mapped text");
        Ok(Text::Mapped(mmap))
    }
}

/// Text held in memory, e.g. passed on the command line.
pub struct InlineSource {
    name: String,
    text: String,
}

impl InlineSource {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl TextSource for InlineSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn load(&self) -> Result<Text, MatchError> {
        Ok(Text::Owned(self.text.as_bytes().to_vec()))
    }
}

pub struct StdinSource;

impl TextSource for StdinSource {
    fn name(&self) -> String {
        "<stdin>".into()
    }

    fn load(&self) -> Result<Text, MatchError> {
        read_stream(std::io::stdin().lock(), &self.name())
    }
}

/// Drain `reader` into an owned text; `name` labels any read error.
fn read_stream(mut reader: impl Read, name: &str) -> Result<Text, MatchError> {
    let mut buf = Vec::new();
    reader
        .read_to_end(&mut buf)
        .map_err(|e| MatchError::IoError {
            path: PathBuf::from(name),
            source: e,
        })?;
    tracing::debug!(source = name, bytes = buf.len(), "read stream");
    Ok(Text::Owned(buf))
}
