use crate::error::Error;
use ini::{Ini, Properties};
use std::path::{Path, PathBuf};

pub const DEFAULT_REGION: &str = "eu-west-1";
pub const DEFAULT_BUCKET: &str = "eb-build-deps";

/// One named credential set from the credentials file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub region: String,
    pub bucket: String,
}

/// Credentials file contents, loaded once at startup and never written back.
/// Profile order follows the file's section order.
#[derive(Debug)]
pub struct Store {
    profiles: Vec<Profile>,
}

impl Store {
    /// Default location: `~/.ebd/config`.
    pub fn default_path() -> PathBuf {
        let home = std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        home.join(".ebd").join("config")
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let ini = Ini::load_from_file(path).map_err(|e| Error::Config {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut profiles = Vec::new();
        for (section, props) in ini.iter() {
            let Some(name) = section else {
                // Keys outside any section carry no credentials.
                continue;
            };
            profiles.push(Profile {
                name: name.to_string(),
                access_key_id: required(props, name, "aws_access_key_id")?,
                secret_access_key: required(props, name, "aws_secret_access_key")?,
                region: props.get("region").unwrap_or(DEFAULT_REGION).to_string(),
                bucket: props.get("bucket").unwrap_or(DEFAULT_BUCKET).to_string(),
            });
        }

        if profiles.is_empty() {
            return Err(Error::Config {
                path: path.display().to_string(),
                reason: "no profiles configured".to_string(),
            });
        }

        Ok(Store { profiles })
    }

    pub fn profile_names(&self) -> Vec<String> {
        self.profiles.iter().map(|p| p.name.clone()).collect()
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, Error> {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| Error::UnknownProfile(name.to_string()))
    }

    /// Silent first-profile fallback for connection-establishing calls
    /// (the S3 upload connection). CLI profile selection must not use this.
    pub fn profile_or_first(&self, name: &str) -> &Profile {
        self.profiles
            .iter()
            .find(|p| p.name == name)
            .unwrap_or(&self.profiles[0])
    }

    pub fn first(&self) -> &Profile {
        &self.profiles[0]
    }
}

fn required(props: &Properties, profile: &str, key: &str) -> Result<String, Error> {
    props
        .get(key)
        .map(str::to_string)
        .ok_or_else(|| Error::MissingKey {
            profile: profile.to_string(),
            key: key.to_string(),
        })
}
