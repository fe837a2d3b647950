//! PromptForge - structured prompt composer
//!
//! CLI entry point. Without a subcommand the interactive TUI is launched.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use keystore::FileStore;
use tracing::{debug, info};

use promptforge::cli::{Cli, Command};
use promptforge::clipboard::SystemClipboard;
use promptforge::composer::Composer;
use promptforge::config::{self, Config};
use promptforge::dialogs::{ConsoleNotifier, given_name};
use promptforge::library::PromptId;
use promptforge::prompt::{EXPERT_ROLES, Field, TEMPLATES, TIPS, find_template};
use promptforge::tui;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = config::data_dir().join("logs");
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(log_dir.join("promptforge.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Log level comes from the config file before the full config is loaded
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let composer = open_composer(&config)?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::Compose {
            template,
            role,
            task,
            context,
            reasoning,
            format,
            copy,
            save,
            export,
            out,
            set_defaults,
        }) => {
            let request = ComposeRequest {
                template,
                fields: [
                    (Field::Role, role),
                    (Field::Task, task),
                    (Field::Context, context),
                    (Field::Reasoning, reasoning),
                    (Field::Format, format),
                ],
                copy,
                save,
                export: export.then(|| out.unwrap_or_else(|| config.export.dir.clone())),
                set_defaults,
            };
            cmd_compose(composer, request)
        }
        Some(Command::Templates) => {
            cmd_templates();
            Ok(())
        }
        Some(Command::Roles) => {
            cmd_roles();
            Ok(())
        }
        Some(Command::Tips) => {
            cmd_tips();
            Ok(())
        }
        Some(Command::List) => {
            cmd_list(&composer);
            Ok(())
        }
        Some(Command::Show { id }) => cmd_show(&composer, id),
        Some(Command::Delete { id }) => cmd_delete(composer, id),
        Some(Command::Export { id, out }) => {
            let dir = out.unwrap_or_else(|| config.export.dir.clone());
            cmd_export(composer, id, dir)
        }
        Some(Command::Prefs) => {
            cmd_prefs(&composer);
            Ok(())
        }
        None => {
            debug!("main: no command specified, launching TUI");
            tui::run_blocking(composer, &config)
        }
    }
}

/// Open the configured store and hydrate a composer from it
fn open_composer(config: &Config) -> Result<Composer> {
    let store = FileStore::open(&config.storage.path)
        .context(format!("Failed to open store at {}", config.storage.path.display()))?;
    Ok(Composer::hydrate(Box::new(store), Box::new(SystemClipboard::new())))
}

/// Everything `pf compose` was asked to do
struct ComposeRequest {
    template: Option<String>,
    fields: [(Field, Option<String>); 5],
    copy: bool,
    save: Option<String>,
    /// Export directory, when exporting
    export: Option<PathBuf>,
    set_defaults: bool,
}

fn cmd_compose(mut composer: Composer, request: ComposeRequest) -> Result<()> {
    debug!(template = ?request.template, "cmd_compose: called");
    if let Some(name) = &request.template {
        let template = find_template(name).ok_or_else(|| eyre!("Unknown template: {}", name))?;
        composer.load_template(template);
    }
    for (field, value) in request.fields {
        if let Some(value) = value {
            composer.set_field(field, value);
        }
    }

    println!("{}", composer.preview());
    println!();
    println!(
        "{} words · {}",
        composer.word_count(),
        if composer.is_complete() {
            "complete".green()
        } else {
            "in progress".yellow()
        }
    );

    let wants_output = request.copy || request.save.is_some() || request.export.is_some();
    if wants_output && !composer.has_content() {
        return Err(eyre!("Nothing to copy, save or export: every section is empty"));
    }

    // A failed clipboard write is only logged
    if request.copy && composer.copy_to_clipboard() {
        println!("{} Copied to clipboard", "✓".green());
    }

    if let Some(name) = request.save {
        let id = composer
            .save_prompt(&mut given_name(Some(name.clone())))
            .ok_or_else(|| eyre!("A name is required to save a prompt"))?;
        println!("{} Saved {} ({})", "✓".green(), name.trim().bold(), id.to_string().yellow());
    }

    if let Some(dir) = request.export {
        let path = composer.export_to(&dir)?;
        println!("{} Exported to {}", "✓".green(), path.display().to_string().cyan());
    }

    if request.set_defaults {
        composer.save_preferences(&mut ConsoleNotifier);
    }

    Ok(())
}

fn cmd_templates() {
    for template in TEMPLATES.iter() {
        println!("{:<18} {}", template.name.cyan(), template.role.dimmed());
    }
}

fn cmd_roles() {
    for (i, role) in EXPERT_ROLES.iter().enumerate() {
        println!("{:>3}. {}", i + 1, role);
    }
}

fn cmd_tips() {
    println!("{}", "Pro Tips".bold());
    for tip in TIPS.iter() {
        println!("  {} {}", "•".cyan(), tip);
    }
}

fn cmd_list(composer: &Composer) {
    let saved = composer.saved();
    if saved.is_empty() {
        println!("No saved prompts");
        return;
    }
    for prompt in saved {
        println!(
            "{}  {:<24} {}",
            prompt.id.to_string().yellow(),
            prompt.name,
            prompt.created_at.format("%Y-%m-%d %H:%M").to_string().dimmed()
        );
    }
}

fn cmd_show(composer: &Composer, id: PromptId) -> Result<()> {
    let prompt = composer
        .find_saved(id)
        .ok_or_else(|| eyre!("No saved prompt with id {}", id))?;
    println!("{}", prompt.form.render_trimmed());
    Ok(())
}

fn cmd_delete(mut composer: Composer, id: PromptId) -> Result<()> {
    if !composer.delete_saved(id) {
        return Err(eyre!("No saved prompt with id {}", id));
    }
    println!("{} Deleted saved prompt {}", "✓".green(), id.to_string().yellow());
    Ok(())
}

fn cmd_export(mut composer: Composer, id: PromptId, dir: PathBuf) -> Result<()> {
    if !composer.load_saved(id) {
        return Err(eyre!("No saved prompt with id {}", id));
    }
    let path = composer.export_to(&dir)?;
    println!("{} Exported to {}", "✓".green(), path.display().to_string().cyan());
    Ok(())
}

fn cmd_prefs(composer: &Composer) {
    let prefs = composer.preferences();
    let show = |value: &str| if value.is_empty() { "(none)".dimmed().to_string() } else { value.to_string() };
    println!("Default role:   {}", show(&prefs.default_role));
    println!("Default format: {}", show(&prefs.default_format));
}
