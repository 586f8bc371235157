use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use tracing::debug;

/// Resolves named schema documents to byte streams.
pub trait SchemaSource: Send + Sync {
    fn open(&self, name: &str) -> io::Result<Box<dyn Read + Send>>;
}

/// Schema source backed by a directory of `.schema.json` files.
pub struct DirSchemaSource {
    dir: PathBuf,
}

impl DirSchemaSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirSchemaSource { dir: dir.into() }
    }
}

impl SchemaSource for DirSchemaSource {
    fn open(&self, name: &str) -> io::Result<Box<dyn Read + Send>> {
        let path = self.dir.join(name);
        debug!("Opening schema file {}", path.display());
        let file = File::open(path)?;
        Ok(Box::new(file))
    }
}
