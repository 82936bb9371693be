use std::ffi::OsStr;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use hcl_edit::structure::{BlockLabel, Structure};
use hcl_edit::Span;
use tuf_domain::{compute_file_digest, ByteRange, CandidateBlock, TERRAFORM_EXTENSION};

/// Why a candidate document could not be turned into blocks.
#[derive(Debug, thiserror::Error)]
pub enum ParseFailure {
    #[error(transparent)]
    Read(#[from] io::Error),
    #[error("{0}")]
    Syntax(String),
}

pub trait DocumentParser: Send + Sync {
    /// Top-level blocks of the document at `path`, in document order.
    fn parse(&self, path: &Path) -> Result<Vec<CandidateBlock>, ParseFailure>;
}

pub trait DirectoryLister: Send + Sync {
    /// Regular Terraform files directly inside `dir`.
    fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}

pub trait ContentDigest: Send + Sync {
    fn digest(&self, path: &Path) -> io::Result<String>;
}

pub trait FileSystem: Send + Sync {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
    fn metadata(&self, path: &Path) -> io::Result<fs::Metadata>;
    /// Appends to `path`, creating it when absent.
    fn append(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
    /// Replaces the whole file through a sibling temp file.
    fn replace(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
    /// Writes a new file; fails with `AlreadyExists` instead of overwriting.
    fn create_new(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

pub trait Effects: Send + Sync {
    fn parser(&self) -> &dyn DocumentParser;
    fn lister(&self) -> &dyn DirectoryLister;
    fn digest(&self) -> &dyn ContentDigest;
    fn fs(&self) -> &dyn FileSystem;
}

pub type SharedEffects = Arc<dyn Effects>;

pub struct SystemEffects {
    parser: Arc<HclDocumentParser>,
    lister: Arc<TerraformLister>,
    digest: Arc<Sha256Digest>,
    fs: Arc<SystemFileSystem>,
}

impl SystemEffects {
    #[must_use]
    pub fn new() -> Self {
        Self {
            parser: Arc::new(HclDocumentParser),
            lister: Arc::new(TerraformLister),
            digest: Arc::new(Sha256Digest),
            fs: Arc::new(SystemFileSystem),
        }
    }

    #[must_use]
    pub fn shared() -> SharedEffects {
        Arc::new(Self::new())
    }
}

impl Default for SystemEffects {
    fn default() -> Self {
        Self::new()
    }
}

impl Effects for SystemEffects {
    fn parser(&self) -> &dyn DocumentParser {
        self.parser.as_ref()
    }

    fn lister(&self) -> &dyn DirectoryLister {
        self.lister.as_ref()
    }

    fn digest(&self) -> &dyn ContentDigest {
        self.digest.as_ref()
    }

    fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }
}

/// Parses HCL with `hcl-edit`, which keeps byte spans for every structure.
pub struct HclDocumentParser;

impl DocumentParser for HclDocumentParser {
    fn parse(&self, path: &Path) -> Result<Vec<CandidateBlock>, ParseFailure> {
        let bytes = fs::read(path)?;
        let contents = String::from_utf8(bytes)
            .map_err(|_| ParseFailure::Syntax("document is not valid UTF-8".to_string()))?;
        parse_blocks(path, &contents)
    }
}

pub(crate) fn parse_blocks(path: &Path, contents: &str) -> Result<Vec<CandidateBlock>, ParseFailure> {
    let body = hcl_edit::parser::parse_body(contents)
        .map_err(|err| ParseFailure::Syntax(err.to_string()))?;
    body.iter()
        .filter_map(Structure::as_block)
        .map(|block| {
            let kind = block.ident.as_str().to_string();
            let span = block.span().ok_or_else(|| {
                ParseFailure::Syntax(format!("block '{kind}' has no source span"))
            })?;
            let labels = block.labels.iter().map(label_text).collect();
            Ok(CandidateBlock {
                kind,
                labels,
                range: ByteRange::new(path, span.start, span.end),
            })
        })
        .collect()
}

fn label_text(label: &BlockLabel) -> String {
    match label {
        BlockLabel::Ident(ident) => ident.as_str().to_string(),
        BlockLabel::String(value) => value.as_str().to_string(),
    }
}

struct TerraformLister;

impl DirectoryLister for TerraformLister {
    fn list(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if !fs::metadata(dir)?.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("{} is not a directory", dir.display()),
            ));
        }
        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(OsStr::to_str) == Some(TERRAFORM_EXTENSION) {
                files.push(path);
            }
        }
        Ok(files)
    }
}

struct Sha256Digest;

impl ContentDigest for Sha256Digest {
    fn digest(&self, path: &Path) -> io::Result<String> {
        if fs::metadata(path)?.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("cannot digest directory {}", path.display()),
            ));
        }
        compute_file_digest(path)
    }
}

struct SystemFileSystem;

impl FileSystem for SystemFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn metadata(&self, path: &Path) -> io::Result<fs::Metadata> {
        fs::metadata(path)
    }

    fn append(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(contents)?;
        file.flush()
    }

    fn replace(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let permissions = fs::metadata(path).ok().map(|meta| meta.permissions());
        let mut tmp = tempfile::Builder::new()
            .prefix(".tuf-")
            .suffix(".tmp")
            .tempfile_in(dir)?;
        tmp.write_all(contents)?;
        tmp.as_file().sync_all()?;
        if let Some(permissions) = permissions {
            fs::set_permissions(tmp.path(), permissions)?;
        }
        tmp.persist(path).map_err(|err| err.error)?;
        Ok(())
    }

    fn create_new(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
        file.write_all(contents)?;
        file.sync_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const DOCUMENT: &str = r#"terraform {
  required_version = ">= 1.5"
}

module "network" {
  source = "./network"
}

resource "aws_security_group" "web" {
  name = "web"
}
"#;

    #[test]
    fn parses_top_level_blocks_with_exact_ranges() {
        let blocks = parse_blocks(Path::new("main.tf"), DOCUMENT).unwrap();
        let kinds = blocks.iter().map(|b| b.kind.as_str()).collect::<Vec<_>>();
        assert_eq!(kinds, ["terraform", "module", "resource"]);
        assert!(blocks[0].labels.is_empty());
        assert_eq!(blocks[1].labels, ["network"]);
        assert_eq!(blocks[2].labels, ["aws_security_group", "web"]);

        let resource = &blocks[2].range;
        let text = &DOCUMENT[resource.as_range()];
        assert!(text.starts_with("resource \"aws_security_group\""), "{text:?}");
        assert!(text.ends_with('}'), "{text:?}");
    }

    #[test]
    fn reports_syntax_errors() {
        let err = parse_blocks(Path::new("broken.tf"), "resource \"a\" \"b\" {\n").unwrap_err();
        assert!(matches!(err, ParseFailure::Syntax(_)));
    }

    #[test]
    fn lister_keeps_only_terraform_files() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("main.tf"), "").unwrap();
        fs::write(tmp.path().join("notes.md"), "").unwrap();
        fs::write(tmp.path().join("vars.tfvars"), "").unwrap();
        fs::create_dir(tmp.path().join("nested.tf")).unwrap();

        let files = TerraformLister.list(tmp.path()).unwrap();
        assert_eq!(files, vec![tmp.path().join("main.tf")]);
    }

    #[test]
    fn lister_rejects_missing_and_non_directories() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("main.tf");
        fs::write(&file, "").unwrap();
        assert_eq!(
            TerraformLister.list(&file).unwrap_err().kind(),
            io::ErrorKind::NotADirectory
        );
        assert_eq!(
            TerraformLister.list(&tmp.path().join("gone")).unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }

    #[test]
    fn digest_refuses_directories() {
        let tmp = tempdir().unwrap();
        assert!(Sha256Digest.digest(tmp.path()).is_err());
    }

    #[test]
    fn replace_and_append_round_trip() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("out.tf");
        let fs = SystemFileSystem;
        fs.append(&path, b"a").unwrap();
        fs.append(&path, b"b").unwrap();
        assert_eq!(fs.read(&path).unwrap(), b"ab");
        fs.replace(&path, b"c").unwrap();
        assert_eq!(fs.read_to_string(&path).unwrap(), "c");
        assert_eq!(
            fs.create_new(&path, b"d").unwrap_err().kind(),
            io::ErrorKind::AlreadyExists
        );
    }
}
