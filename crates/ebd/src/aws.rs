use crate::config::Profile;
use crate::error::Error;
use aws_credential_types::Credentials;
use aws_types::region::Region;

async fn sdk_config(profile: &Profile) -> aws_config::SdkConfig {
    let creds = Credentials::new(
        profile.access_key_id.clone(),
        profile.secret_access_key.clone(),
        None,
        None,
        "ebd-credentials-file",
    );
    aws_config::from_env()
        .credentials_provider(creds)
        .region(Region::new(profile.region.clone()))
        .load()
        .await
}

pub async fn s3_client(profile: &Profile) -> aws_sdk_s3::Client {
    aws_sdk_s3::Client::new(&sdk_config(profile).await)
}

pub async fn beanstalk_client(profile: &Profile) -> aws_sdk_elasticbeanstalk::Client {
    aws_sdk_elasticbeanstalk::Client::new(&sdk_config(profile).await)
}

pub async fn ec2_client(profile: &Profile) -> aws_sdk_ec2::Client {
    aws_sdk_ec2::Client::new(&sdk_config(profile).await)
}

/// Wrap an SDK failure as a remote-service error, with the full error chain
/// in the message.
pub fn remote(service: &'static str, err: impl std::error::Error + 'static) -> Error {
    Error::Remote {
        service,
        message: format!("{}", aws_sdk_s3::error::DisplayErrorContext(err)),
    }
}
