use std::io::Write;
use std::{fs, io, path};

use bytes::Bytes;
use filemigrate_store::{BlockingFileStore, Error, LocationConfig, SyncToAsync};
use lazy_static::lazy_static;
use regex::Regex;

/// Files stored flat under a root directory, one file per filename.
///
/// This is a blocking store; use [`LocalDiskFileStore::into_async`] (or wrap
/// it in [`SyncToAsync`] yourself) to hand it to a migrating store.
pub struct LocalDiskFileStore {
    root: path::PathBuf,
}

impl LocalDiskFileStore {
    pub fn new(root: path::PathBuf) -> Result<LocalDiskFileStore, Error> {
        let attr = fs::metadata(&root).map_err(|error| Error::Configuration {
            message: format!("root path {} is invalid: {}", root.display(), error),
        })?;

        if !attr.is_dir() {
            return Err(Error::Configuration {
                message: format!("root path {} must be a directory", root.display()),
            });
        }

        if attr.permissions().readonly() {
            return Err(Error::Configuration {
                message: format!("root directory {} must be writable", root.display()),
            });
        }

        match root.canonicalize() {
            Ok(root) => Ok(LocalDiskFileStore { root }),
            Err(error) => Err(Error::Configuration {
                message: format!("root path {} is invalid: {}", root.display(), error),
            }),
        }
    }

    pub fn root(&self) -> &path::Path {
        &self.root
    }

    pub fn into_async(self) -> SyncToAsync<LocalDiskFileStore> {
        SyncToAsync::new(self)
    }

    fn filename_to_file_path(&self, filename: &str) -> Result<path::PathBuf, Error> {
        lazy_static! {
            static ref VALID_FILENAME: Regex = Regex::new(r"^[^/\\\x00]+$").unwrap();
        }

        if filename == "." || filename == ".." || !VALID_FILENAME.is_match(filename) {
            return Err(Error::InvalidFilename {
                filename: filename.to_string(),
                message: "must be a single non-empty path component".to_string(),
            });
        }

        Ok(self.root.join(filename))
    }
}

fn map_io_error(error: io::Error, filename: &str) -> Error {
    match error.kind() {
        io::ErrorKind::NotFound => Error::not_found(filename),
        _ => Error::from(error),
    }
}

impl BlockingFileStore for LocalDiskFileStore {
    fn create_file(&mut self, filename: &str, data: Bytes) -> Result<(), Error> {
        let file_path = self.filename_to_file_path(filename)?;
        log::debug!("Writing {}...", file_path.display());

        let mut f = fs::File::create(&file_path)?;
        f.write_all(&data)?;
        f.sync_all()?;
        Ok(())
    }

    fn delete_file(&mut self, filename: &str) -> Result<(), Error> {
        let file_path = self.filename_to_file_path(filename)?;
        log::debug!("Removing {}...", file_path.display());

        fs::remove_file(&file_path).map_err(|e| map_io_error(e, filename))
    }

    fn get_file_data(&mut self, filename: &str) -> Result<Bytes, Error> {
        let file_path = self.filename_to_file_path(filename)?;
        log::debug!("Reading {}...", file_path.display());

        fs::read(&file_path)
            .map(Bytes::from)
            .map_err(|e| map_io_error(e, filename))
    }

    fn get_file_location(&self, config: &LocationConfig, filename: &str) -> String {
        config.file_url(filename)
    }
}
