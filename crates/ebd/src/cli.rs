use crate::error::Error;
use crate::format::{self, Format};
use crate::{config, deploy, manage, output, version};
use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "ebd", version, about = "Elastic Beanstalk deployment helper")]
pub struct RootCmd {
    /// Credentials file (INI, one section per profile)
    #[arg(long, global = true, env = "EBD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Profile to operate on (defaults to the first configured profile)
    #[arg(short = 'p', long, global = true, conflicts_with = "all_profiles")]
    pub profile: Option<String>,

    /// Apply the action to every configured profile
    #[arg(short = 'a', long, global = true)]
    pub all_profiles: bool,

    /// Output format
    #[arg(short = 'f', long, global = true, value_enum, default_value = "text")]
    pub format: Format,

    /// Validate and print what would be sent, without touching the infrastructure
    #[arg(long, global = true)]
    pub read_only: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upload a source bundle and register it as a new application version
    Create {
        /// Application and version as `app[:version]`; the version defaults
        /// to the git tag of the working directory
        app: Option<String>,

        /// Source bundle location (defaults to target/<app>-<version>.zip)
        #[arg(short = 's', long)]
        source_bundle: Option<PathBuf>,

        /// Re-upload even if the bundle already exists in S3
        #[arg(long)]
        overwrite: bool,
    },

    /// Point an environment at a registered application version
    Deploy {
        /// Application and version as `app[:version]`
        app: Option<String>,
    },

    /// List an application's versions, or all applications when no app is given
    List {
        app: Option<String>,
    },

    /// Dump an environment's application environment variables
    Env {
        /// `app[:environment]`; the environment name defaults to the app name
        app: Option<String>,
    },

    /// List an environment's instances in Ansible inventory format
    Instances {
        app: Option<String>,
    },

    /// List configured profiles
    Profiles,

    /// Generate shell completion scripts
    Completion {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

pub async fn run(root: RootCmd) -> Result<()> {
    if let Command::Completion { shell } = &root.cmd {
        let mut cmd = RootCmd::command();
        clap_complete::generate(*shell, &mut cmd, "ebd", &mut std::io::stdout());
        return Ok(());
    }

    let config_path = root
        .config
        .clone()
        .unwrap_or_else(config::Store::default_path);
    let store = config::Store::load(&config_path)?;

    if matches!(root.cmd, Command::Profiles) {
        if let Some(text) = format::render_sequence(&store.profile_names(), root.format) {
            output::echo(&text);
        }
        return Ok(());
    }

    // Unknown -p is fatal before any network call; -a selects all profiles
    // in file order.
    let profiles: Vec<String> = if root.all_profiles {
        store.profile_names()
    } else {
        let name = match &root.profile {
            Some(name) => {
                store.profile(name)?;
                name.clone()
            }
            None => store.first().name.clone(),
        };
        vec![name]
    };

    let format = root.format;
    let read_only = root.read_only;

    match root.cmd {
        Command::Create {
            app,
            source_bundle,
            overwrite,
        } => {
            let (app, label) = mutating_target(app)?;
            let (bucket, key) = deploy::upload_source_bundle(
                &store,
                &profiles[0],
                &app,
                &label,
                source_bundle,
                overwrite,
                read_only,
            )
            .await?;

            let mut failures = Vec::new();
            for name in &profiles {
                format::print_profile(name, format);
                let profile = store.profile(name)?;
                if let Err(e) =
                    deploy::create_version(profile, &app, &label, &bucket, &key, read_only).await
                {
                    output::error(&e.to_string());
                    failures.push((name.clone(), e));
                }
            }
            report_failures(&failures);
            Ok(())
        }

        Command::Deploy { app } => {
            if root.all_profiles {
                anyhow::bail!("refusing to deploy to all profiles");
            }
            let (app, label) = mutating_target(app)?;
            let profile = store.profile(&profiles[0])?;
            format::print_profile(&profile.name, format);
            if let Err(e) = deploy::deploy_version(profile, &app, &label, read_only).await {
                output::error(&e.to_string());
            }
            Ok(())
        }

        Command::List { app } => {
            let target = optional_target(app)?;
            let mut failures = Vec::new();
            for name in &profiles {
                format::print_profile(name, format);
                let profile = store.profile(name)?;
                let app = target.as_ref().map(|t| t.app.as_str());
                if let Err(e) = manage::list_versions(profile, app, format).await {
                    output::error(&e.to_string());
                    failures.push((name.clone(), e));
                }
            }
            report_failures(&failures);
            Ok(())
        }

        Command::Env { app } => {
            let target = required_target(app)?;
            let environment = target.version.clone().unwrap_or_else(|| target.app.clone());
            let mut failures = Vec::new();
            for name in &profiles {
                format::print_profile(name, format);
                let profile = store.profile(name)?;
                if let Err(e) =
                    manage::describe_env(profile, &target.app, &environment, format).await
                {
                    output::error(&e.to_string());
                    failures.push((name.clone(), e));
                }
            }
            report_failures(&failures);
            Ok(())
        }

        Command::Instances { app } => {
            let target = required_target(app)?;
            let mut failures = Vec::new();
            for name in &profiles {
                let profile = store.profile(name)?;
                if let Err(e) = manage::describe_instances(profile, &target.app).await {
                    output::error(&e.to_string());
                    failures.push((name.clone(), e));
                }
            }
            report_failures(&failures);
            Ok(())
        }

        Command::Profiles | Command::Completion { .. } => unreachable!("handled above"),
    }
}

/// Mutating actions need both halves; a missing version label is derived
/// from the working directory's git tag.
fn mutating_target(app: Option<String>) -> Result<(String, String), Error> {
    let token = app.ok_or_else(|| {
        Error::Argument("app[:version] is required for this action".to_string())
    })?;
    let target = version::Target::parse(&token)?;
    let label = match target.version {
        Some(label) => label,
        None => version::resolve_version()?,
    };
    Ok((target.app, label))
}

/// Read-only actions take the token as-is; no version derivation.
fn optional_target(app: Option<String>) -> Result<Option<version::Target>, Error> {
    app.as_deref().map(version::Target::parse).transpose()
}

fn required_target(app: Option<String>) -> Result<version::Target, Error> {
    optional_target(app)?
        .ok_or_else(|| Error::Argument("app name is required for this action".to_string()))
}

fn report_failures(failures: &[(String, Error)]) {
    if failures.is_empty() {
        return;
    }
    output::error(&format!("{} profile(s) failed:", failures.len()));
    for (name, err) in failures {
        output::error(&format!("  {name}: {err}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutating_target_requires_a_token() {
        assert!(matches!(mutating_target(None), Err(Error::Argument(_))));
    }

    #[test]
    fn mutating_target_uses_explicit_version() {
        let (app, label) = mutating_target(Some("web:1.2".to_string())).unwrap();
        assert_eq!(app, "web");
        assert_eq!(label, "1.2");
    }

    #[test]
    fn optional_target_passes_through_absence() {
        assert!(optional_target(None).unwrap().is_none());
        let t = optional_target(Some("web".to_string())).unwrap().unwrap();
        assert_eq!(t.app, "web");
        assert_eq!(t.version, None);
    }

    #[test]
    fn required_target_rejects_absence_and_bad_tokens() {
        assert!(required_target(None).is_err());
        assert!(required_target(Some("a:b:c".to_string())).is_err());
    }

    #[test]
    fn cli_parses() {
        RootCmd::command().debug_assert();
    }
}
