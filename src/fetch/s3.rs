//! S3-compatible object store fetcher

use std::env;
use std::fs;
use std::path::Path;
use std::time::Duration;

use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_s3::{Client, Config};

use crate::observability::Logger;

use super::errors::{FetchError, FetchResult};
use super::BackupFetcher;

const MAX_DOWNLOAD_ATTEMPTS: u32 = 3;

/// Connection parameters for the backup bucket.
///
/// All values come from the environment; every required one that is absent
/// aborts the run before any network call is made.
#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub prefix: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub endpoint_url: String,
    pub region: String,
}

impl S3Config {
    /// Read `BUCKET_NAME`, `BUCKET_DIR`, `ACCESS_KEY_ID`,
    /// `SECRET_ACCESS_KEY`, `ENDPOINT_URL` (required) and `BUCKET_REGION`
    /// (optional, default `us-east-1`).
    pub fn from_env() -> FetchResult<Self> {
        fn required(name: &'static str) -> FetchResult<String> {
            env::var(name).map_err(|_| FetchError::MissingEnv(name))
        }

        Ok(S3Config {
            bucket: required("BUCKET_NAME")?,
            prefix: required("BUCKET_DIR")?,
            access_key_id: required("ACCESS_KEY_ID")?,
            secret_access_key: required("SECRET_ACCESS_KEY")?,
            endpoint_url: required("ENDPOINT_URL")?,
            region: env::var("BUCKET_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
        })
    }
}

/// Mirrors the remote backup tree into the local backup root.
pub struct S3Fetcher {
    config: S3Config,
}

impl S3Fetcher {
    pub fn new(config: S3Config) -> Self {
        S3Fetcher { config }
    }

    fn client(&self) -> Client {
        let credentials = Credentials::new(
            &self.config.access_key_id,
            &self.config.secret_access_key,
            None,
            None,
            "siterestore",
        );

        let config = Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(self.config.region.clone()))
            .endpoint_url(&self.config.endpoint_url)
            .force_path_style(true)
            .credentials_provider(credentials)
            .build();

        Client::from_conf(config)
    }

    async fn fetch_all_async(&self, dest: &Path) -> FetchResult<usize> {
        let client = self.client();
        let mut downloaded = 0usize;
        let mut continuation: Option<String> = None;

        loop {
            let mut request = client
                .list_objects_v2()
                .bucket(&self.config.bucket)
                .prefix(&self.config.prefix);
            if let Some(token) = continuation.take() {
                request = request.continuation_token(token);
            }

            let page = request.send().await.map_err(|e| FetchError::List {
                detail: e.to_string(),
            })?;

            for object in page.contents() {
                let Some(key) = object.key() else { continue };
                let Some(relative) = relative_key(&self.config.prefix, key) else {
                    continue;
                };

                let local = dest.join(relative);
                if let Some(parent) = local.parent() {
                    fs::create_dir_all(parent).map_err(|e| FetchError::Io {
                        path: parent.to_path_buf(),
                        source: e,
                    })?;
                }

                Logger::info("download_backup", &[("key", key), ("file", relative)]);
                self.download_with_retry(&client, key, &local).await?;
                downloaded += 1;
            }

            if page.is_truncated() == Some(true) {
                continuation = page.next_continuation_token().map(str::to_string);
                if continuation.is_none() {
                    break;
                }
            } else {
                break;
            }
        }

        Ok(downloaded)
    }

    async fn download_with_retry(
        &self,
        client: &Client,
        key: &str,
        dest: &Path,
    ) -> FetchResult<()> {
        let mut attempt = 0;

        loop {
            attempt += 1;

            let result = client
                .get_object()
                .bucket(&self.config.bucket)
                .key(key)
                .send()
                .await;

            match result {
                Ok(output) => {
                    let mut body = output.body.into_async_read();
                    let mut file =
                        tokio::fs::File::create(dest)
                            .await
                            .map_err(|e| FetchError::Io {
                                path: dest.to_path_buf(),
                                source: e,
                            })?;

                    tokio::io::copy(&mut body, &mut file)
                        .await
                        .map_err(|e| FetchError::Io {
                            path: dest.to_path_buf(),
                            source: e,
                        })?;

                    return Ok(());
                }
                Err(e) => {
                    if attempt >= MAX_DOWNLOAD_ATTEMPTS {
                        return Err(FetchError::Download {
                            key: key.to_string(),
                            attempts: attempt,
                            detail: e.to_string(),
                        });
                    }

                    // 1s, 2s, 4s
                    let backoff = Duration::from_millis(1000 * (1 << (attempt - 1)));
                    Logger::warn(
                        "download_retry",
                        &[("attempt", &attempt.to_string()), ("key", key)],
                    );
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }
}

impl BackupFetcher for S3Fetcher {
    fn fetch_all(&self, dest: &Path) -> FetchResult<usize> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| FetchError::Runtime { source: e })?;

        runtime.block_on(self.fetch_all_async(dest))
    }
}

/// Strip the bucket prefix from an object key to get the local relative
/// path. Keys that collapse to nothing (the prefix itself, directory
/// markers) yield `None`.
fn relative_key<'a>(prefix: &str, key: &'a str) -> Option<&'a str> {
    let stripped = key.strip_prefix(prefix).unwrap_or(key);
    let relative = stripped.trim_start_matches('/');
    if relative.is_empty() || relative.ends_with('/') {
        None
    } else {
        Some(relative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_key_strips_prefix() {
        assert_eq!(
            relative_key("backups", "backups/site/20230101000000/x.tar"),
            Some("site/20230101000000/x.tar")
        );
        assert_eq!(
            relative_key("backups/", "backups/site/x.tar"),
            Some("site/x.tar")
        );
    }

    #[test]
    fn test_relative_key_ignores_markers() {
        assert_eq!(relative_key("backups", "backups"), None);
        assert_eq!(relative_key("backups", "backups/"), None);
        assert_eq!(relative_key("backups", "backups/site/"), None);
    }

    #[test]
    fn test_relative_key_without_prefix_match() {
        // A key outside the prefix is kept verbatim rather than dropped;
        // listing is already scoped by prefix server-side.
        assert_eq!(relative_key("backups", "other/site.tar"), Some("other/site.tar"));
    }
}
