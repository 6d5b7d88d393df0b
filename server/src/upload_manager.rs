use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::{fs, io};

use uuid::Uuid;

const ALLOWED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Writes accepted uploads into the upload directory under random names.
///
/// Stored files are a disposable by-product of prediction and are never read
/// back after the response is sent.
pub struct UploadManager {
    dir: PathBuf,
}

impl UploadManager {
    pub fn new(dir: &str) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: PathBuf::from(dir),
        })
    }

    /// Whether the client filename carries an accepted image extension.
    pub fn allowed_file(filename: &str) -> bool {
        match file_extension(filename) {
            Some(ext) => ALLOWED_EXTENSIONS.contains(&ext.as_str()),
            None => false,
        }
    }

    /// Store the upload as `<random-hex>.<ext>`, keeping only the extension
    /// from the client-supplied name.
    pub fn save(&self, filename: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let ext = file_extension(filename).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "filename has no extension")
        })?;
        let path = self.dir.join(format!("{}.{}", Uuid::new_v4().simple(), ext));

        let mut file = OpenOptions::new().create_new(true).write(true).open(&path)?;
        file.write_all(bytes)?;
        Ok(path)
    }
}

fn file_extension(filename: &str) -> Option<String> {
    filename.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase())
}
