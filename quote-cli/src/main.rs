use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::{debug, info};

use quote_cli::{app, config::AppConfig, logging};
use quote_core::CourseDuration;
use quote_core::validation::{CardDetails, ContactDetails, ContactMessage, LoginForm};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Course quotes and enquiries for Empowering The Nation.
///
/// Lists the skills-training courses, prices a selection with the
/// multi-course discount and VAT, and runs the simulated checkout.
#[derive(Debug, Parser)]
#[command(name = "ssik", version)]
struct Cli {
    /// Settings file. Defaults to `ssik.toml` in the working directory, if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level or filter directive, e.g. `debug` or `quote_core=trace`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and show the home menu.
    Login {
        #[arg(long, default_value = "")]
        username: String,
        #[arg(long, default_value = "")]
        password: String,
    },

    /// About the organisation and its courses.
    About,

    /// List courses, optionally one duration group.
    Courses {
        #[arg(long, value_parser = parse_group)]
        group: Option<CourseDuration>,
    },

    /// Show one course in detail.
    Course { id: String },

    /// Price a selection of courses.
    Quote(SelectionArgs),

    /// Pay for a selection of courses.
    Pay {
        #[command(flatten)]
        selection: SelectionArgs,
        #[command(flatten)]
        card: CardArgs,
    },

    /// Ask a consultant to follow up on a selection.
    Consultant {
        #[command(flatten)]
        selection: SelectionArgs,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
    },

    /// Show contact details, or send a message with `--name` and `--message`.
    Contact {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        message: Option<String>,
    },

    /// Quote every row of an enrolment CSV (`name,email,phone,courses`).
    Batch {
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Debug, Args)]
struct SelectionArgs {
    /// Course id to select; repeat for more courses.
    #[arg(long = "course")]
    courses: Vec<String>,

    /// Select every course in a group (`6-month` or `6-week`); repeatable.
    #[arg(long = "group", value_parser = parse_group)]
    groups: Vec<CourseDuration>,
}

#[derive(Debug, Args)]
struct CardArgs {
    #[arg(long, default_value = "")]
    name_on_card: String,
    #[arg(long, default_value = "")]
    card_number: String,
    #[arg(long, default_value = "")]
    expiry: String,
    #[arg(long, default_value = "")]
    cvv: String,
}

impl From<CardArgs> for CardDetails {
    fn from(args: CardArgs) -> Self {
        CardDetails {
            name_on_card: args.name_on_card,
            card_number: args.card_number,
            expiry: args.expiry,
            cvv: args.cvv,
        }
    }
}

fn parse_group(value: &str) -> Result<CourseDuration, String> {
    CourseDuration::parse(value)
        .ok_or_else(|| format!("unknown course group '{value}' (expected 6-month or 6-week)"))
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    logging::init_default_logging();

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    if let Some(path) = cli.log_file {
        config.logging.file = Some(path);
    }
    logging::apply_config(&config.logging, cli.log_level.as_deref())?;
    debug!(app = logging::app_name(), ?config, "configuration loaded");

    let catalogue = app::load_catalogue(&config.catalogue)?;

    let output = match cli.command {
        Command::Login { username, password } => {
            info!(%username, "login");
            app::login(&LoginForm { username, password })?
        }
        Command::About => app::about(&catalogue),
        Command::Courses { group } => app::courses(&catalogue, group),
        Command::Course { id } => {
            info!(%id, "course detail");
            app::course(&catalogue, &id)
        }
        Command::Quote(selection) => {
            info!(courses = ?selection.courses, groups = ?selection.groups, "quote");
            app::quote(&catalogue, &selection.courses, &selection.groups)?
        }
        Command::Pay { selection, card } => {
            info!(courses = ?selection.courses, groups = ?selection.groups, "payment");
            app::pay(
                &catalogue,
                &selection.courses,
                &selection.groups,
                &card.into(),
            )?
        }
        Command::Consultant {
            selection,
            name,
            email,
            phone,
        } => {
            info!(courses = ?selection.courses, "consultant request");
            app::consultant(
                &catalogue,
                &selection.courses,
                &selection.groups,
                &ContactDetails::new(name, email, phone),
            )?
        }
        Command::Contact { name, message } => {
            let message = match (name, message) {
                (None, None) => None,
                (name, message) => Some(ContactMessage {
                    name: name.unwrap_or_default(),
                    message: message.unwrap_or_default(),
                }),
            };
            app::contact(message.as_ref())?
        }
        Command::Batch { file } => {
            info!(file = %file.display(), "batch quote");
            app::batch_file(&catalogue, &file)?
        }
    };

    print!("{output}");
    Ok(())
}
