//! Folio CLI
//!
//! Validate contact input, inspect content and drive the page engine
//! headlessly.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use folio_app::{AppConfig, CONFIG_FILE};
use folio_contact::{validate, ContactFields, ContactSession, EmailJsClient, SubmitOutcome, SubmitResult};
use folio_content::Catalog;
use folio_core::Viewport;

mod simulate;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Folio portfolio engine CLI", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Directory containing folio.toml
    #[arg(short, long, global = true, default_value = ".")]
    dir: PathBuf,

    /// Content catalog (defaults to the built-in one)
    #[arg(short, long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default folio.toml
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Load configuration and catalog, reporting any error
    Check,

    /// Validate contact form input
    Validate(MessageArgs),

    /// Print the active section for each scroll offset
    Resolve {
        /// Scroll offsets
        #[arg(required = true)]
        offsets: Vec<f32>,

        /// Viewport height
        #[arg(long, default_value = "800")]
        height: f32,
    },

    /// Scroll through the page and print what each frame reveals
    Simulate {
        /// Scroll distance per frame
        #[arg(long, default_value = "120")]
        step: f32,

        /// Stop at this offset (defaults to the document end)
        #[arg(long)]
        to: Option<f32>,

        /// Viewport width
        #[arg(long, default_value = "1280")]
        width: f32,

        /// Viewport height
        #[arg(long, default_value = "800")]
        height: f32,

        /// About tab to select once the page is mounted
        #[arg(long)]
        tab: Option<String>,
    },

    /// List catalog content
    Content {
        /// Section to list (projects, skills, journey, courses, achievements, social)
        section: Option<String>,
    },

    /// Validate and send a contact message through EmailJS
    Send(MessageArgs),
}

#[derive(Args)]
struct MessageArgs {
    #[arg(long, default_value = "")]
    name: String,

    #[arg(long, default_value = "")]
    email: String,

    #[arg(long, default_value = "")]
    subject: String,

    #[arg(long, default_value = "")]
    message: String,

    /// Agree to the privacy policy
    #[arg(long)]
    consent: bool,
}

impl MessageArgs {
    fn fields(&self) -> ContactFields {
        ContactFields::new(&self.name, &self.email, &self.subject, &self.message)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match &cli.command {
        Commands::Init { force } => cmd_init(&cli.dir, *force),

        Commands::Check => cmd_check(&cli.dir, cli.catalog.as_deref()),

        Commands::Validate(args) => cmd_validate(args),

        Commands::Resolve { offsets, height } => {
            let config = AppConfig::load_or_default(&cli.dir)?;
            let catalog = load_catalog(cli.catalog.as_deref())?;
            simulate::resolve(config, catalog, Viewport::new(1280.0, *height), offsets)
        }

        Commands::Simulate {
            step,
            to,
            width,
            height,
            tab,
        } => {
            let config = AppConfig::load_or_default(&cli.dir)?;
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let options = simulate::Options {
                step: *step,
                to: *to,
                tab: tab.clone(),
            };
            simulate::run(config, catalog, Viewport::new(*width, *height), &options)
        }

        Commands::Content { section } => cmd_content(cli.catalog.as_deref(), section.as_deref()),

        Commands::Send(args) => cmd_send(&cli.dir, args),
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::load(path).with_context(|| format!("Failed to load catalog {}", path.display())),
        None => Catalog::builtin().context("Built-in catalog is invalid"),
    }
}

fn cmd_init(dir: &Path, force: bool) -> Result<()> {
    let path = dir.join(CONFIG_FILE);
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    AppConfig::default().save_to_dir(dir)?;
    info!("Wrote {}", path.display());
    info!("Fill in [contact] service_id, template_id and public_key to enable `folio send`");
    Ok(())
}

fn cmd_check(dir: &Path, catalog: Option<&Path>) -> Result<()> {
    let config = AppConfig::load_from_dir(dir)?;
    let catalog = load_catalog(catalog)?;

    info!(
        "Configuration OK: threshold {}, probe offset {}, {} section(s)",
        config.reveal.threshold,
        config.navigation.probe_offset,
        config.navigation.sections.len()
    );
    info!(
        "Catalog OK: {} project(s), {} skill(s) in {} categories, {} timeline entries",
        catalog.projects.len(),
        catalog.skill_count(),
        catalog.skill_categories.len(),
        catalog.journey.len() + catalog.courses.len() + catalog.achievements.len()
    );
    if !config.contact.is_complete() {
        tracing::warn!("[contact] credentials incomplete, `folio send` is disabled");
    }
    Ok(())
}

fn cmd_validate(args: &MessageArgs) -> Result<()> {
    let errors = validate(&args.fields(), args.consent);
    if errors.is_empty() {
        println!("Form is valid");
        return Ok(());
    }

    for (field, message) in &errors {
        println!("{:<8} {}", field.key(), message);
    }
    anyhow::bail!("{} field(s) invalid", errors.len())
}

fn cmd_content(catalog: Option<&Path>, section: Option<&str>) -> Result<()> {
    let catalog = load_catalog(catalog)?;
    let show = |name: &str| section.map_or(true, |s| s == name);

    if show("projects") {
        println!("Projects");
        for project in &catalog.projects {
            println!("  #{} {} [{}]", project.id, project.title, project.tags.join(", "));
            if let Some(link) = project.live_link() {
                println!("      live: {}", link);
            }
        }
    }

    if show("skills") {
        println!("Skills");
        for category in &catalog.skill_categories {
            println!("  {}", category.name);
            for skill in &category.skills {
                println!("    {:<42} {:>3}%  {}", skill.name, skill.level, skill.level_label());
            }
        }
    }

    for (name, entries) in [
        ("journey", &catalog.journey),
        ("courses", &catalog.courses),
        ("achievements", &catalog.achievements),
    ] {
        if show(name) {
            println!("{}", name);
            for entry in entries {
                println!("  {:<22} {} ({})", entry.year, entry.title, entry.organization);
            }
        }
    }

    if show("social") {
        println!("Social");
        for link in &catalog.social {
            println!("  {:<10} {}", link.name, link.url);
        }
    }
    Ok(())
}

fn cmd_send(dir: &Path, args: &MessageArgs) -> Result<()> {
    let config = AppConfig::load_from_dir(dir)?;
    let client = EmailJsClient::new(config.contact.clone()).context("Cannot create EmailJS client")?;

    let session = ContactSession::new(client);
    {
        let mut form = session.form().borrow_mut();
        let fields = args.fields();
        for field in folio_contact::Field::ALL {
            if let Some(value) = fields.get(field) {
                form.set_field(field, value);
            }
        }
        form.set_consent(args.consent);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    match runtime.block_on(session.submit()) {
        SubmitOutcome::Settled(SubmitResult::Success) => {
            info!("Message sent");
            Ok(())
        }
        SubmitOutcome::Settled(SubmitResult::Failure(message)) => anyhow::bail!(message),
        SubmitOutcome::Settled(SubmitResult::Idle) => Ok(()),
        SubmitOutcome::Blocked(blocked) => {
            if let folio_contact::SubmitBlocked::Invalid(errors) = &blocked {
                for (field, message) in errors {
                    println!("{:<8} {}", field.key(), message);
                }
            }
            anyhow::bail!("Message not sent")
        }
    }
}
