use crate::error::Error;
use crate::{aws, config, output};
use anyhow::{Context, Result};
use aws_sdk_elasticbeanstalk::types::S3Location;
use aws_sdk_s3::primitives::ByteStream;
use std::path::PathBuf;

/// Locate the source bundle: explicit flag first, then the conventional
/// build output paths.
fn resolve_bundle_path(
    explicit: Option<PathBuf>,
    app: &str,
    version: &str,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Ok(path);
        }
        anyhow::bail!("source bundle not found: {}", path.display());
    }

    output::echo("Source bundle location not given, trying alternative locations.");
    let candidates = [
        PathBuf::from(format!("target/{app}-{version}.zip")),
        PathBuf::from("target/source-bundle.zip"),
    ];
    for candidate in candidates {
        if candidate.is_file() {
            output::echo(&format!("Source bundle found: {}", candidate.display()));
            return Ok(candidate);
        }
        output::echo(&format!("Source bundle not found: {}", candidate.display()));
    }
    anyhow::bail!("source bundle not found")
}

/// Upload the source bundle to the given profile's build bucket. The upload
/// happens once; every selected profile registers the same key afterwards.
/// An unknown profile name falls back to the first configured profile for
/// the S3 connection.
///
/// Returns the (bucket, key) the bundle lives under.
pub async fn upload_source_bundle(
    store: &config::Store,
    profile: &str,
    app: &str,
    version: &str,
    source_bundle: Option<PathBuf>,
    overwrite: bool,
    read_only: bool,
) -> Result<(String, String)> {
    let upload_profile = store.profile_or_first(profile);
    let bucket = upload_profile.bucket.clone();
    let key = format!("{app}/{app}-{version}.zip");

    output::echo(&format!("Upload source bundle for {app}:{version}"));
    let path = resolve_bundle_path(source_bundle, app, version)?;
    output::echo(&format!("Bucket: {bucket}"));
    output::echo(&format!("Key: {key}"));

    if read_only {
        output::echo(&format!(
            "[READ ONLY] put {} to s3://{bucket}/{key}",
            path.display()
        ));
        return Ok((bucket, key));
    }

    let s3 = aws::s3_client(upload_profile).await;

    let exists = s3
        .head_object()
        .bucket(&bucket)
        .key(&key)
        .send()
        .await
        .is_ok();
    if exists && !overwrite {
        output::echo("Source bundle already exists, reusing it.");
        return Ok((bucket, key));
    }

    let body = ByteStream::from_path(&path)
        .await
        .with_context(|| format!("read {}", path.display()))?;
    s3.put_object()
        .bucket(&bucket)
        .key(&key)
        .body(body)
        .send()
        .await
        .map_err(|e| aws::remote("s3 put-object", e))?;

    output::success(&format!("Uploaded s3://{bucket}/{key}"));
    Ok((bucket, key))
}

/// Register an uploaded bundle as a new application version.
pub async fn create_version(
    profile: &config::Profile,
    app: &str,
    version: &str,
    bucket: &str,
    key: &str,
    read_only: bool,
) -> Result<(), Error> {
    output::echo(&format!("Create version {app}:{version}"));

    if read_only {
        output::echo("[READ ONLY] create application version:");
        output::echo(&format!("  application_name => {app}"));
        output::echo(&format!("  version_label => {version}"));
        output::echo(&format!("  description => {version}"));
        output::echo(&format!("  s3_bucket => {bucket}"));
        output::echo(&format!("  s3_key => {key}"));
        return Ok(());
    }

    let eb = aws::beanstalk_client(profile).await;
    eb.create_application_version()
        .application_name(app)
        .version_label(version)
        .description(version)
        .source_bundle(S3Location::builder().s3_bucket(bucket).s3_key(key).build())
        .send()
        .await
        .map_err(|e| aws::remote("elasticbeanstalk create-application-version", e))?;

    Ok(())
}

/// Point an environment at a registered version.
pub async fn deploy_version(
    profile: &config::Profile,
    app: &str,
    version: &str,
    read_only: bool,
) -> Result<(), Error> {
    output::echo(&format!("Deploy version {app}:{version}"));

    if read_only {
        output::echo("[READ ONLY] update environment:");
        output::echo(&format!("  environment_name => {app}"));
        output::echo(&format!("  version_label => {version}"));
        return Ok(());
    }

    let eb = aws::beanstalk_client(profile).await;
    eb.update_environment()
        .environment_name(app)
        .version_label(version)
        .send()
        .await
        .map_err(|e| aws::remote("elasticbeanstalk update-environment", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn explicit_bundle_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("bundle.zip");
        let err = resolve_bundle_path(Some(missing.clone()), "app", "1.0").unwrap_err();
        assert!(err.to_string().contains("source bundle not found"));

        fs::write(&missing, b"zip").unwrap();
        let found = resolve_bundle_path(Some(missing.clone()), "app", "1.0").unwrap();
        assert_eq!(found, missing);
    }
}
