use clap::{Args, ValueEnum};
use plugctl_logger as logger;
use plugctl_manifest::{matching_platform, resolve_with_source, PlatformTarget, Resolved};

use crate::errors::CliError;
use crate::GlobalOpts;

#[derive(Args, Debug, Clone)]
pub struct InfoCommand {
    /// Name of the plugin (e.g., ctx)
    pub plugin: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Yaml,
    Json,
}

pub fn handle_info(cmd: &InfoCommand, opts: &GlobalOpts) -> Result<(), CliError> {
    let paths = opts.paths()?;
    logger::debug(&format!(
        "Looking up {} under {}",
        cmd.plugin,
        paths.base_path().display()
    ));

    let resolved = resolve_with_source(&paths, &cmd.plugin)?;
    logger::info(&format!(
        "Resolved {} from the {}",
        cmd.plugin, resolved.location
    ));

    let rendered = match cmd.output {
        OutputFormat::Text => {
            let target = PlatformTarget::current();
            if matching_platform(&resolved.plugin.spec.platforms, &target).is_none() {
                logger::warn(&format!(
                    "No platform of {} matches {}/{}",
                    resolved.plugin.name(),
                    target.os,
                    target.arch
                ));
            }
            render_info(&resolved, &target)
        }
        OutputFormat::Yaml => serde_yaml::to_string(&resolved.plugin)
            .map_err(|e| CliError::Render(e.to_string()))?,
        OutputFormat::Json => serde_json::to_string_pretty(&resolved.plugin)
            .map(|json| json + "\n")
            .map_err(|e| CliError::Render(e.to_string()))?,
    };
    print!("{}", rendered);
    Ok(())
}

/// Human readable summary of a manifest for `target`
pub fn render_info(resolved: &Resolved, target: &PlatformTarget) -> String {
    let plugin = &resolved.plugin;
    let spec = &plugin.spec;
    let mut out = String::new();

    out.push_str(&format!("NAME: {}\n", plugin.name()));
    if let Some(index) = &resolved.source_index {
        out.push_str(&format!("INDEX: {}\n", index));
    }
    out.push_str(&format!("SOURCE: {}\n", resolved.location));

    if let Some(platform) = matching_platform(&spec.platforms, target) {
        if !platform.uri.is_empty() {
            out.push_str(&format!("URI: {}\n", platform.uri));
        }
        if !platform.sha256.is_empty() {
            out.push_str(&format!("SHA256: {}\n", platform.sha256));
        }
    }

    if !spec.version.is_empty() {
        out.push_str(&format!("VERSION: {}\n", spec.version));
    }
    if !spec.homepage.is_empty() {
        out.push_str(&format!("HOMEPAGE: {}\n", spec.homepage));
    }

    let description = if spec.description.is_empty() {
        &spec.short_description
    } else {
        &spec.description
    };
    if !description.is_empty() {
        out.push_str(&format!("DESCRIPTION: \n{}\n", description.trim_end()));
    }
    if !spec.caveats.is_empty() {
        out.push_str(&format!("CAVEATS:\n{}\n", indent_caveats(&spec.caveats)));
    }
    out
}

fn indent_caveats(caveats: &str) -> String {
    let mut block = String::from("\\\n");
    for line in caveats.trim().lines() {
        if line.is_empty() {
            block.push_str(" |\n");
        } else {
            block.push_str(&format!(" | {}\n", line));
        }
    }
    block.push('/');
    block
}
