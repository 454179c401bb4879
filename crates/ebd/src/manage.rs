use crate::error::Error;
use crate::format::{self, Format};
use crate::{aws, config, output};
use std::collections::BTreeMap;

/// Namespace Beanstalk files application environment variables under.
const ENV_NAMESPACE: &str = "aws:elasticbeanstalk:application:environment";

pub async fn list_applications(profile: &config::Profile, format: Format) -> Result<(), Error> {
    let eb = aws::beanstalk_client(profile).await;
    let out = eb
        .describe_applications()
        .send()
        .await
        .map_err(|e| aws::remote("elasticbeanstalk describe-applications", e))?;

    let names: Vec<String> = out
        .applications()
        .iter()
        .filter_map(|a| a.application_name().map(str::to_string))
        .collect();

    if let Some(text) = format::render_sequence(&names, format) {
        output::echo(&text);
    }
    Ok(())
}

/// List an application's version labels in API order. With no application
/// given, lists the applications themselves instead.
pub async fn list_versions(
    profile: &config::Profile,
    app: Option<&str>,
    format: Format,
) -> Result<(), Error> {
    let Some(app) = app else {
        return list_applications(profile, format).await;
    };

    let eb = aws::beanstalk_client(profile).await;
    let out = eb
        .describe_application_versions()
        .application_name(app)
        .send()
        .await
        .map_err(|e| aws::remote("elasticbeanstalk describe-application-versions", e))?;

    let labels: Vec<String> = out
        .application_versions()
        .iter()
        .filter_map(|v| v.version_label().map(str::to_string))
        .collect();

    if let Some(text) = format::render_sequence(&labels, format) {
        output::echo(&text);
    }
    Ok(())
}

/// Dump the environment's application environment variables as a mapping.
pub async fn describe_env(
    profile: &config::Profile,
    app: &str,
    environment: &str,
    format: Format,
) -> Result<(), Error> {
    let eb = aws::beanstalk_client(profile).await;
    let out = eb
        .describe_configuration_settings()
        .application_name(app)
        .environment_name(environment)
        .send()
        .await
        .map_err(|e| aws::remote("elasticbeanstalk describe-configuration-settings", e))?;

    let mut vars = BTreeMap::new();
    if let Some(settings) = out.configuration_settings().first() {
        for opt in settings.option_settings() {
            if opt.namespace() != Some(ENV_NAMESPACE) {
                continue;
            }
            if let (Some(name), Some(value)) = (opt.option_name(), opt.value()) {
                vars.insert(name.to_string(), value.to_string());
            }
        }
    }

    output::echo(&format::render_mapping(&vars, format));
    Ok(())
}

/// Print the environment's instances as an Ansible inventory section.
pub async fn describe_instances(profile: &config::Profile, app: &str) -> Result<(), Error> {
    let eb = aws::beanstalk_client(profile).await;
    let out = eb
        .describe_environment_resources()
        .environment_name(app)
        .send()
        .await
        .map_err(|e| aws::remote("elasticbeanstalk describe-environment-resources", e))?;

    let instance_ids: Vec<String> = out
        .environment_resources()
        .map(|r| {
            r.instances()
                .iter()
                .filter_map(|i| i.id().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    output::echo(&format!("[{app}]"));
    if instance_ids.is_empty() {
        return Ok(());
    }

    let ec2 = aws::ec2_client(profile).await;
    let out = ec2
        .describe_instances()
        .set_instance_ids(Some(instance_ids))
        .send()
        .await
        .map_err(|e| aws::remote("ec2 describe-instances", e))?;

    for reservation in out.reservations() {
        for instance in reservation.instances() {
            let id = instance.instance_id().unwrap_or_default();
            let ip = instance.private_ip_address().unwrap_or_default();
            output::echo(&format!(
                "{app}-{id}\tansible_ssh_host={ip}\tansible_ssh_user=ec2-user"
            ));
        }
    }
    Ok(())
}
