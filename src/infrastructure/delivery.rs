//! Getting an exported workbook in front of the user.
//!
//! Two strategies exist. [`OpenDelivery`] materializes the file in a throwaway
//! directory and opens it with the desktop's default handler. [`ShareDelivery`]
//! writes it to a well-known cache location and passes the path to a
//! [`ShareSheet`]. [`detect_delivery`] picks one for the running environment.

use super::config::{Config, DeliveryMode};
use crate::domain::ExportError;
use std::fs;
use std::path::{Path, PathBuf};

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// What a successful delivery did with the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Opened(PathBuf),
    Shared(PathBuf),
}

impl ExportOutcome {
    pub fn path(&self) -> &Path {
        match self {
            ExportOutcome::Opened(path) | ExportOutcome::Shared(path) => path,
        }
    }
}

pub trait FileDelivery {
    fn deliver(&mut self, file_name: &str, bytes: &[u8]) -> Result<ExportOutcome, ExportError>;

    fn describe(&self) -> &'static str;
}

/// Hands a file to some destination outside the application.
pub trait ShareSheet {
    fn share(&mut self, path: &Path) -> Result<(), String>;
}

/// Puts the file path on the system clipboard so it can be pasted elsewhere.
#[derive(Debug, Default)]
pub struct ClipboardShare;

impl ShareSheet for ClipboardShare {
    fn share(&mut self, path: &Path) -> Result<(), String> {
        let mut clipboard = arboard::Clipboard::new().map_err(|e| e.to_string())?;
        clipboard
            .set_text(path.display().to_string())
            .map_err(|e| e.to_string())
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, bytes)
    };
    write().map_err(|source| ExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes into `dir` and shares the resulting path.
pub struct ShareDelivery<S: ShareSheet> {
    dir: PathBuf,
    share_sheet: S,
}

impl<S: ShareSheet> ShareDelivery<S> {
    pub fn new(dir: impl Into<PathBuf>, share_sheet: S) -> Self {
        Self { dir: dir.into(), share_sheet }
    }
}

impl<S: ShareSheet> FileDelivery for ShareDelivery<S> {
    fn deliver(&mut self, file_name: &str, bytes: &[u8]) -> Result<ExportOutcome, ExportError> {
        let path = self.dir.join(file_name);
        write_file(&path, bytes)?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "workbook written");

        self.share_sheet
            .share(&path)
            .map_err(|reason| ExportError::Share { path: path.clone(), reason })?;
        Ok(ExportOutcome::Shared(path))
    }

    fn describe(&self) -> &'static str {
        "share"
    }
}

pub type Opener = Box<dyn FnMut(&Path) -> std::io::Result<()>>;

/// Writes into a fresh temporary directory and opens the file.
pub struct OpenDelivery {
    root: PathBuf,
    opener: Opener,
}

impl OpenDelivery {
    pub fn new() -> Self {
        Self::with_opener(std::env::temp_dir(), Box::new(|path: &Path| open::that(path)))
    }

    pub fn with_opener(root: impl Into<PathBuf>, opener: Opener) -> Self {
        Self { root: root.into(), opener }
    }

    fn fresh_dir(&self) -> PathBuf {
        self.root.join(format!("lista-compras-{}", uuid::Uuid::new_v4().simple()))
    }
}

impl Default for OpenDelivery {
    fn default() -> Self {
        Self::new()
    }
}

impl FileDelivery for OpenDelivery {
    fn deliver(&mut self, file_name: &str, bytes: &[u8]) -> Result<ExportOutcome, ExportError> {
        let path = self.fresh_dir().join(file_name);
        write_file(&path, bytes)?;
        tracing::debug!(path = %path.display(), mime = XLSX_MIME, "opening workbook");

        (self.opener)(&path).map_err(|source| ExportError::Open { path: path.clone(), source })?;
        Ok(ExportOutcome::Opened(path))
    }

    fn describe(&self) -> &'static str {
        "open"
    }
}

/// Whether a graphical desktop is available to open files in.
pub fn has_graphical_session() -> bool {
    if std::env::var_os("SSH_CONNECTION").is_some() {
        return false;
    }
    if cfg!(any(target_os = "macos", target_os = "windows")) {
        return true;
    }
    std::env::var_os("DISPLAY").is_some() || std::env::var_os("WAYLAND_DISPLAY").is_some()
}

/// Builds the delivery configured by `config`, resolving `Auto` from the environment.
pub fn detect_delivery(config: &Config) -> Box<dyn FileDelivery> {
    let mode = match config.delivery {
        DeliveryMode::Auto if has_graphical_session() => DeliveryMode::Open,
        DeliveryMode::Auto => DeliveryMode::Share,
        mode => mode,
    };

    match mode {
        DeliveryMode::Open => Box::new(OpenDelivery::new()),
        _ => Box::new(ShareDelivery::new(config.export_dir(), ClipboardShare)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct RecordingShare {
        shared: Vec<PathBuf>,
        fail_with: Option<String>,
    }

    impl ShareSheet for RecordingShare {
        fn share(&mut self, path: &Path) -> Result<(), String> {
            self.shared.push(path.to_path_buf());
            match &self.fail_with {
                Some(reason) => Err(reason.clone()),
                None => Ok(()),
            }
        }
    }

    #[test]
    fn test_share_delivery_writes_then_shares() {
        let dir = tempfile::tempdir().unwrap();
        let mut delivery = ShareDelivery::new(dir.path().join("cache"), RecordingShare::default());

        let outcome = delivery.deliver("produtos.xlsx", b"PK-data").unwrap();
        let expected = dir.path().join("cache").join("produtos.xlsx");

        assert_eq!(outcome, ExportOutcome::Shared(expected.clone()));
        assert_eq!(fs::read(&expected).unwrap(), b"PK-data");
        assert_eq!(delivery.share_sheet.shared, vec![expected]);
    }

    #[test]
    fn test_share_delivery_overwrites_previous_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut delivery = ShareDelivery::new(dir.path(), RecordingShare::default());

        delivery.deliver("produtos.xlsx", b"first").unwrap();
        delivery.deliver("produtos.xlsx", b"second").unwrap();
        assert_eq!(fs::read(dir.path().join("produtos.xlsx")).unwrap(), b"second");
    }

    #[test]
    fn test_share_failure_keeps_written_file() {
        let dir = tempfile::tempdir().unwrap();
        let share = RecordingShare { shared: Vec::new(), fail_with: Some("no clipboard".to_string()) };
        let mut delivery = ShareDelivery::new(dir.path(), share);

        let err = delivery.deliver("produtos.xlsx", b"bytes").unwrap_err();
        match &err {
            ExportError::Share { path, reason } => {
                assert_eq!(path, &dir.path().join("produtos.xlsx"));
                assert_eq!(reason, "no clipboard");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.written_path().unwrap().exists());
    }

    #[test]
    fn test_write_failure_skips_share() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, b"").unwrap();

        let mut delivery = ShareDelivery::new(&blocker, RecordingShare::default());
        let err = delivery.deliver("produtos.xlsx", b"bytes").unwrap_err();

        assert!(matches!(err, ExportError::Write { .. }));
        assert!(err.written_path().is_none());
        assert!(delivery.share_sheet.shared.is_empty());
    }

    #[test]
    fn test_open_delivery_uses_fresh_directory() {
        let dir = tempfile::tempdir().unwrap();
        let opened = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&opened);
        let mut delivery = OpenDelivery::with_opener(
            dir.path(),
            Box::new(move |path: &Path| {
                log.borrow_mut().push(path.to_path_buf());
                Ok(())
            }),
        );

        let first = delivery.deliver("produtos.xlsx", b"a").unwrap();
        let second = delivery.deliver("produtos.xlsx", b"b").unwrap();

        assert!(matches!(first, ExportOutcome::Opened(_)));
        assert_ne!(first.path(), second.path());
        assert!(first.path().starts_with(dir.path()));
        assert_eq!(fs::read(first.path()).unwrap(), b"a");
        assert_eq!(opened.borrow().len(), 2);
    }

    #[test]
    fn test_open_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let mut delivery = OpenDelivery::with_opener(
            dir.path(),
            Box::new(|_: &Path| Err(std::io::Error::new(std::io::ErrorKind::NotFound, "no handler"))),
        );

        let err = delivery.deliver("produtos.xlsx", b"a").unwrap_err();
        assert!(matches!(err, ExportError::Open { .. }));
        assert!(err.written_path().unwrap().exists());
    }

    #[test]
    fn test_detect_delivery_explicit_modes() {
        let config = Config { delivery: DeliveryMode::Share, ..Config::default() };
        assert_eq!(detect_delivery(&config).describe(), "share");

        let config = Config { delivery: DeliveryMode::Open, ..Config::default() };
        assert_eq!(detect_delivery(&config).describe(), "open");
    }
}
