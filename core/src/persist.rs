use crate::index::InvertedIndex;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

pub const MAGIC: [u8; 4] = *b"FTSI";
pub const FORMAT_VERSION: u32 = 1;

/// Written ahead of the index body. Decoded and checked on its own so a
/// foreign file is rejected before any of the body is read.
#[derive(Serialize, Deserialize)]
struct Header {
    magic: [u8; 4],
    version: u32,
    created_at: String,
}

/// Outcome of checking whether a persisted index exists.
#[derive(Debug)]
pub enum CacheProbe {
    Present,
    Absent,
    /// The path could not be inspected (permissions, I/O failure, ...).
    Unreadable(io::Error),
}

pub fn probe<P: AsRef<Path>>(path: P) -> CacheProbe {
    match fs::metadata(path.as_ref()) {
        Ok(_) => CacheProbe::Present,
        Err(e) if e.kind() == io::ErrorKind::NotFound => CacheProbe::Absent,
        Err(e) => CacheProbe::Unreadable(e),
    }
}

/// Serialize the whole index into `writer`.
pub fn save<W: Write>(index: &InvertedIndex, mut writer: W) -> Result<()> {
    let header = Header {
        magic: MAGIC,
        version: FORMAT_VERSION,
        created_at: OffsetDateTime::now_utc().format(&Rfc3339).context("formatting timestamp")?,
    };
    bincode::serialize_into(&mut writer, &header).context("encoding index header")?;
    bincode::serialize_into(&mut writer, index).context("encoding index")?;
    Ok(())
}

/// Decode an index previously written by [`save`].
///
/// The blob is read into memory first; decoding from a slice bounds every
/// length prefix by the bytes actually present.
pub fn load<R: Read>(mut reader: R) -> Result<InvertedIndex> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).context("reading index")?;
    let header: Header = bincode::deserialize(&buf).context("decoding index header")?;
    if header.magic != MAGIC {
        bail!("not an index file (bad magic {:?})", header.magic);
    }
    if header.version != FORMAT_VERSION {
        bail!("unsupported index format version {} (expected {})", header.version, FORMAT_VERSION);
    }
    let body = bincode::serialized_size(&header).context("sizing index header")? as usize;
    let index: InvertedIndex = bincode::deserialize(&buf[body..]).context("decoding index")?;
    tracing::debug!(created_at = %header.created_at, bytes = buf.len(), "decoded index");
    Ok(index)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write the index to `path` through a temp file so a failed write never
/// leaves a truncated index behind.
pub fn save_to_path<P: AsRef<Path>>(index: &InvertedIndex, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let tmp = tmp_path(path);
    let f = File::create(&tmp).with_context(|| format!("creating {}", tmp.display()))?;
    let mut w = BufWriter::new(f);
    let written = save(index, &mut w).and_then(|_| w.flush().context("flushing index"));
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e.context(format!("writing {}", path.display())));
    }
    drop(w);
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e).with_context(|| format!("renaming {} to {}", tmp.display(), path.display()));
    }
    tracing::info!(path = %path.display(), terms = index.num_terms(), "saved index");
    Ok(())
}

pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<InvertedIndex> {
    let path = path.as_ref();
    let f = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let index = load(BufReader::new(f)).with_context(|| format!("reading {}", path.display()))?;
    tracing::info!(path = %path.display(), terms = index.num_terms(), "loaded index");
    Ok(index)
}
