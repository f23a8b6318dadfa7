use async_trait::async_trait;
use horizon_core::repository::{decode_blob, encode_blob, BOOKINGS_BLOB, FLIGHTS_BLOB};
use horizon_core::{LedgerSnapshot, LedgerStore, StoreError};
use horizon_shared::{Booking, Flight};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Keeps each blob as `<dir>/<name>.json`.
/// Writes go to a temp file first and are renamed into place.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub async fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        info!("File store at {}", dir.display());
        Ok(Self { dir })
    }

    fn path(&self, blob: &str) -> PathBuf {
        self.dir.join(format!("{}.json", blob))
    }

    async fn read_blob(&self, blob: &str) -> Result<Option<String>, StoreError> {
        match tokio::fs::read_to_string(self.path(blob)).await {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_blob(&self, blob: &str, contents: &str) -> Result<(), StoreError> {
        let target = self.path(blob);
        let tmp = self.dir.join(format!("{}.json.tmp", blob));
        tokio::fs::write(&tmp, contents).await?;
        tokio::fs::rename(&tmp, &target).await?;
        Ok(())
    }
}

#[async_trait]
impl LedgerStore for FileStore {
    async fn load(&self) -> Result<LedgerSnapshot, StoreError> {
        let flights = self.read_blob(FLIGHTS_BLOB).await?;
        let bookings = self.read_blob(BOOKINGS_BLOB).await?;
        Ok(LedgerSnapshot {
            flights: decode_blob(flights.as_deref())?,
            bookings: decode_blob(bookings.as_deref())?,
        })
    }

    async fn save(&self, flights: &[Flight], bookings: &[Booking]) -> Result<(), StoreError> {
        // Encode both before touching disk
        let flights = encode_blob(flights)?;
        let bookings = encode_blob(bookings)?;

        self.write_blob(FLIGHTS_BLOB, &flights).await?;
        self.write_blob(BOOKINGS_BLOB, &bookings).await?;
        debug!("Ledger written to {}", self.dir.display());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
