//! [`JsonFile`] [`Storage`] implementation.

use std::{io, marker::PhantomData, path::PathBuf};

use common::operations::{By, Delete, Select, Update};
use tokio::fs;
use tracerr::Traced;

use crate::infra::{
    storage::{self, Record},
    Storage,
};

/// [`Storage`] keeping every [`Record`] as a separate JSON file inside a
/// directory.
#[derive(Clone, Debug)]
pub struct JsonFile {
    /// Directory the files are placed into.
    dir: PathBuf,
}

impl JsonFile {
    /// Creates a new [`JsonFile`] [`Storage`] placing files into the
    /// provided `dir`ectory.
    ///
    /// The directory is created on the first write, if doesn't exist.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns path to the file of the provided [`Record`] type.
    fn path<T: Record>(&self, _: PhantomData<T>) -> PathBuf {
        self.dir.join(format!("{}.json", T::KEY))
    }
}

impl<T: Record> Storage<Select<By<Option<T>, ()>>> for JsonFile {
    type Ok = Option<T>;
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        _: Select<By<Option<T>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let bytes = match fs::read(self.path(PhantomData::<T>)).await {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(tracerr::new!(storage::Error::from(e))),
        };
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(tracerr::from_and_wrap!())
    }
}

impl<T: Record> Storage<Update<T>> for JsonFile {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Update(record): Update<T>,
    ) -> Result<Self::Ok, Self::Err> {
        let json =
            serde_json::to_vec(&record).map_err(tracerr::from_and_wrap!())?;

        fs::create_dir_all(&self.dir)
            .await
            .map_err(tracerr::from_and_wrap!())?;

        // Write aside and rename, so readers never observe a partial file.
        let path = self.path(PhantomData::<T>);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json)
            .await
            .map_err(tracerr::from_and_wrap!())?;
        fs::rename(&tmp, &path)
            .await
            .map_err(tracerr::from_and_wrap!())
    }
}

impl<T: Record> Storage<Delete<By<T, ()>>> for JsonFile {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        _: Delete<By<T, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        match fs::remove_file(self.path(PhantomData::<T>)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(tracerr::new!(storage::Error::from(e))),
        }
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Delete, Select, Update};

    use crate::{
        domain::{settings::Channel, Settings},
        infra::Storage as _,
    };

    use super::JsonFile;

    async fn load(storage: &JsonFile) -> Option<Settings> {
        storage
            .execute(Select(By::<Option<Settings>, _>::new(())))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn returns_none_when_nothing_stored() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFile::new(dir.path().join("absent"));

        assert_eq!(load(&storage).await, None);
    }

    #[tokio::test]
    async fn persists_and_removes_records() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFile::new(dir.path().join("nested"));

        let mut settings = Settings::default();
        _ = settings.toggle_theme();
        _ = settings.toggle_notification(Channel::Push);
        storage.execute(Update(settings)).await.unwrap();

        assert!(dir.path().join("nested/app_settings_v1.json").exists());
        assert_eq!(load(&storage).await, Some(settings));

        storage
            .execute(Delete(By::<Settings, _>::new(())))
            .await
            .unwrap();
        assert_eq!(load(&storage).await, None);

        // Removing an absent record is not an error.
        storage
            .execute(Delete(By::<Settings, _>::new(())))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn fails_on_malformed_record() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app_settings_v1.json"), "{oops")
            .unwrap();
        let storage = JsonFile::new(dir.path());

        let res = storage
            .execute(Select(By::<Option<Settings>, _>::new(())))
            .await;

        assert!(res.is_err());
    }
}
