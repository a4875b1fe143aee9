// SPDX-License-Identifier: Apache-2.0

use crate::reply;

use std::io;

use textbridge_type::{UserProfile, UserRecord};

use anyhow::Context as _;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use camino::Utf8PathBuf;
use cap_async_std::fs_utf8::Dir;
use tracing::{debug, trace};

const STORAGE_FAILURE: (StatusCode, &str) =
    (StatusCode::INTERNAL_SERVER_ERROR, "Storage backend failure");

#[derive(Debug)]
pub enum GetError<E> {
    NotFound,
    Internal(E),
}

impl<E> IntoResponse for GetError<E> {
    fn into_response(self) -> Response {
        match self {
            GetError::NotFound => reply::error(StatusCode::NOT_FOUND, "User not found"),
            GetError::Internal(_) => reply::error(STORAGE_FAILURE.0, STORAGE_FAILURE.1),
        }
    }
}

#[derive(Debug)]
pub enum CreateError<E> {
    Internal(E),
}

impl<E> IntoResponse for CreateError<E> {
    fn into_response(self) -> Response {
        match self {
            CreateError::Internal(_) => reply::error(STORAGE_FAILURE.0, STORAGE_FAILURE.1),
        }
    }
}

#[derive(Debug)]
pub enum UpdateError<E> {
    NotFound,
    Internal(E),
}

impl<E> IntoResponse for UpdateError<E> {
    fn into_response(self) -> Response {
        match self {
            UpdateError::NotFound => reply::error(StatusCode::NOT_FOUND, "User not found"),
            UpdateError::Internal(_) => reply::error(STORAGE_FAILURE.0, STORAGE_FAILURE.1),
        }
    }
}

/// Handle on one user's document.
#[derive(Clone, Debug)]
pub struct User<'a> {
    root: &'a Dir,
    path: Utf8PathBuf,
}

impl<'a> User<'a> {
    pub(crate) fn new(root: &'a Dir, path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            root,
            path: path.into(),
        }
    }

    async fn read(&self) -> Result<UserRecord, GetError<anyhow::Error>> {
        let buf = self.root.read(&self.path).await.map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => GetError::NotFound,
            _ => GetError::Internal(anyhow::Error::new(e).context("failed to read record")),
        })?;
        serde_json::from_slice(&buf)
            .context("failed to decode record as JSON")
            .map_err(GetError::Internal)
    }

    async fn write(&self, record: &UserRecord) -> Result<(), anyhow::Error> {
        let buf = serde_json::to_vec(record).context("failed to encode record to JSON")?;
        self.root
            .write(&self.path, buf)
            .await
            .context("failed to write record")
    }

    /// Returns the stored record.
    pub async fn get(&self) -> Result<UserRecord, GetError<anyhow::Error>> {
        trace!(target: "app::store::User::get", "read record at `{}`", self.path);
        self.read().await
    }

    /// Returns the stored record, creating a fresh one capturing
    /// `profile` on first sight. An existing record is returned
    /// untouched.
    pub async fn get_or_create(
        &self,
        profile: &UserProfile,
    ) -> Result<UserRecord, CreateError<anyhow::Error>> {
        match self.read().await {
            Ok(record) => Ok(record),
            Err(GetError::NotFound) => {
                trace!(target: "app::store::User::get_or_create", "create record at `{}`", self.path);
                let record = UserRecord::new(profile.clone());
                self.write(&record).await.map_err(|e| {
                    debug!(target: "app::store::User::get_or_create", "failed to create record: {e:?}");
                    CreateError::Internal(e)
                })?;
                Ok(record)
            }
            Err(GetError::Internal(e)) => Err(CreateError::Internal(e)),
        }
    }

    /// Read-modify-write of the record. The read and the write are not
    /// atomic with respect to concurrent requests.
    pub async fn update(
        &self,
        f: impl FnOnce(&mut UserRecord),
    ) -> Result<UserRecord, UpdateError<anyhow::Error>> {
        let mut record = self.read().await.map_err(|e| match e {
            GetError::NotFound => UpdateError::NotFound,
            GetError::Internal(e) => UpdateError::Internal(e),
        })?;
        f(&mut record);
        self.write(&record).await.map_err(|e| {
            debug!(target: "app::store::User::update", "failed to write record: {e:?}");
            UpdateError::Internal(e)
        })?;
        Ok(record)
    }

    /// Writes back `record` with one more free-tier use consumed. The
    /// increment is computed from the snapshot read at decision time.
    pub async fn record_free_use(
        &self,
        record: &UserRecord,
    ) -> Result<UserRecord, UpdateError<anyhow::Error>> {
        let next = UserRecord {
            usage_count: record.usage_count + 1,
            ..record.clone()
        };
        trace!(
            target: "app::store::User::record_free_use",
            "usage {} -> {} at `{}`",
            record.usage_count,
            next.usage_count,
            self.path
        );
        self.write(&next).await.map_err(UpdateError::Internal)?;
        Ok(next)
    }
}
