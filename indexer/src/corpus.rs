use anyhow::{bail, Context, Result};
use flate2::read::GzDecoder;
use fts_core::{DocId, Document};
use serde::Deserialize;
use sha1::{Digest, Sha1};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorpusFormat {
    /// Gzip-compressed Wikipedia abstract dump, e.g. `enwiki-latest-abstract1.xml.gz`.
    GzipXml,
    Xml,
    Jsonl,
    Json,
}

impl CorpusFormat {
    pub fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if name.ends_with(".gz") {
            Some(Self::GzipXml)
        } else if name.ends_with(".xml") {
            Some(Self::Xml)
        } else if name.ends_with(".jsonl") {
            Some(Self::Jsonl)
        } else if name.ends_with(".json") {
            Some(Self::Json)
        } else {
            None
        }
    }
}

#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(rename = "doc", default)]
    docs: Vec<XmlDoc>,
}

#[derive(Debug, Deserialize)]
struct XmlDoc {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    #[serde(rename = "abstract", default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct JsonDoc {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(alias = "text")]
    body: String,
}

/// Hex SHA-1 of a document URL, used as a stable external key.
pub fn url_key(url: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(url.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Accumulates documents and hands out dense ids in arrival order.
#[derive(Default)]
struct Collector {
    docs: Vec<Document>,
}

impl Collector {
    fn push(&mut self, title: String, url: String, text: String) -> Result<()> {
        let id = DocId::try_from(self.docs.len()).context("too many documents for a u32 id")?;
        self.docs.push(Document { id, title, url, text });
        Ok(())
    }
}

/// Load every document under `path` (a file or a directory of corpus files).
///
/// Ids are assigned from 0 in load order; directory entries are visited in
/// sorted path order so ids are reproducible between runs.
pub fn load_documents<P: AsRef<Path>>(path: P) -> Result<Vec<Document>> {
    let path = path.as_ref();
    let mut files: Vec<PathBuf> = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry.with_context(|| format!("walking {}", path.display()))?;
            let p = entry.path();
            if p.is_file() && CorpusFormat::detect(p).is_some() {
                files.push(p.to_path_buf());
            }
        }
    } else {
        files.push(path.to_path_buf());
    }

    let mut out = Collector::default();
    for file in &files {
        let before = out.docs.len();
        load_file(file, &mut out).with_context(|| format!("loading corpus {}", file.display()))?;
        tracing::debug!(file = %file.display(), docs = out.docs.len() - before, "loaded corpus file");
    }
    tracing::info!(files = files.len(), docs = out.docs.len(), "corpus loaded");
    Ok(out.docs)
}

fn load_file(file: &Path, out: &mut Collector) -> Result<()> {
    let Some(format) = CorpusFormat::detect(file) else {
        bail!("unrecognized corpus format (expected .xml.gz, .xml, .jsonl or .json)");
    };
    let f = File::open(file)?;
    match format {
        CorpusFormat::GzipXml => read_xml(BufReader::new(GzDecoder::new(f)), out),
        CorpusFormat::Xml => read_xml(BufReader::new(f), out),
        CorpusFormat::Jsonl => read_jsonl(BufReader::new(f), out),
        CorpusFormat::Json => read_json(BufReader::new(f), out),
    }
}

fn read_xml<R: BufRead>(reader: R, out: &mut Collector) -> Result<()> {
    let feed: Feed = quick_xml::de::from_reader(reader).context("parsing XML")?;
    for doc in feed.docs {
        out.push(doc.title, doc.url, doc.text)?;
    }
    Ok(())
}

fn read_jsonl<R: BufRead>(reader: R, out: &mut Collector) -> Result<()> {
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: JsonDoc = serde_json::from_str(&line).with_context(|| format!("line {}", lineno + 1))?;
        out.push(doc.title, doc.url.unwrap_or_default(), doc.body)?;
    }
    Ok(())
}

fn read_json<R: Read>(reader: R, out: &mut Collector) -> Result<()> {
    let json: serde_json::Value = serde_json::from_reader(reader).context("parsing JSON")?;
    let values = match json {
        serde_json::Value::Array(arr) => arr,
        obj @ serde_json::Value::Object(_) => vec![obj],
        _ => bail!("expected a JSON array or object"),
    };
    for v in values {
        let doc: JsonDoc = serde_json::from_value(v)?;
        out.push(doc.title, doc.url.unwrap_or_default(), doc.body)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_formats() {
        assert_eq!(CorpusFormat::detect(Path::new("enwiki-latest-abstract1.xml.gz")), Some(CorpusFormat::GzipXml));
        assert_eq!(CorpusFormat::detect(Path::new("a/B.XML")), Some(CorpusFormat::Xml));
        assert_eq!(CorpusFormat::detect(Path::new("crawl.jsonl")), Some(CorpusFormat::Jsonl));
        assert_eq!(CorpusFormat::detect(Path::new("docs.json")), Some(CorpusFormat::Json));
        assert_eq!(CorpusFormat::detect(Path::new("notes.txt")), None);
    }

    #[test]
    fn url_key_is_sha1_hex() {
        assert_eq!(url_key(""), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(url_key("https://en.wikipedia.org/wiki/Cat").len(), 40);
    }

    #[test]
    fn xml_ignores_unknown_elements() {
        let xml = r#"<feed>
<doc><title>Wikipedia: Cat</title><url>https://en.wikipedia.org/wiki/Cat</url><abstract>The cat is a small carnivorous mammal.</abstract><links><sublink linktype="nav"><anchor>Etymology</anchor></sublink></links></doc>
<doc><title>Wikipedia: Empty</title><url>https://en.wikipedia.org/wiki/Empty</url><abstract></abstract></doc>
</feed>"#;
        let mut out = Collector::default();
        read_xml(xml.as_bytes(), &mut out).unwrap();
        assert_eq!(out.docs.len(), 2);
        assert_eq!(out.docs[0].id, 0);
        assert_eq!(out.docs[0].title, "Wikipedia: Cat");
        assert_eq!(out.docs[0].text, "The cat is a small carnivorous mammal.");
        assert_eq!(out.docs[1].id, 1);
        assert_eq!(out.docs[1].text, "");
    }
}
