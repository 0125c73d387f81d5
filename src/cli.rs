//! Command-line driver over the client workflows.

use crate::api::{ClientConfig, HttpRentalApi, RentalApi};
use crate::listing::ListingCard;
use crate::models::{ProfilePhoto, Property, PropertyId, User};
use crate::session::Session;
use crate::signup::{SignupForm, SignupOutcome, SignupPage};
use crate::visit::{ClickOutcome, ModalMode, VisitWorkflow};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "rentup", version, about = "RentUp marketplace client")]
pub struct Cli {
    /// Base URL of the marketplace service
    #[arg(long, global = true, env = "RENTUP_SERVER_URL")]
    server_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = "RENTUP_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an account
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        contact_number: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        #[arg(long)]
        profile_photo: Option<PathBuf>,
    },
    /// Sign in and write the user record to a session file
    Login {
        #[arg(long)]
        contact_number: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "session.json")]
        out: PathBuf,
    },
    /// Show listing cards
    Cards {
        /// JSON file holding one property or an array of them
        #[arg(long)]
        properties: PathBuf,
        #[arg(long)]
        session: Option<PathBuf>,
        #[arg(long)]
        image: Option<String>,
    },
    /// Open a listing's visit modal and optionally request a visit
    Visit {
        #[arg(long)]
        properties: PathBuf,
        #[arg(long)]
        property_id: Option<PropertyId>,
        #[arg(long)]
        session: Option<PathBuf>,
        /// Visit date as YYYY-MM-DD
        #[arg(long)]
        date: Option<String>,
        /// Write the updated user record back to the session file
        #[arg(long)]
        save: bool,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PropertyFile {
    Many(Vec<Property>),
    One(Property),
}

fn client_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::default();
    if let Some(url) = &cli.server_url {
        config = config.with_server_url(url.clone());
    }
    if let Some(secs) = cli.timeout_secs {
        config.timeout = Duration::from_secs(secs);
    }
    config
}

async fn load_properties(path: &Path) -> Result<Vec<Property>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let parsed: PropertyFile = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse properties in {}", path.display()))?;
    Ok(match parsed {
        PropertyFile::Many(properties) => properties,
        PropertyFile::One(property) => vec![property],
    })
}

async fn load_session(path: Option<&Path>) -> Result<Session> {
    let Some(path) = path else {
        return Ok(Session::new());
    };
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read session {}", path.display()))?;
    let user: User = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse session {}", path.display()))?;
    Ok(Session::signed_in(user))
}

async fn save_user(path: &Path, user: &User) -> Result<()> {
    let json = serde_json::to_string_pretty(user)?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!("💾 Saved session to {}", path.display());
    Ok(())
}

fn pick_property(properties: Vec<Property>, id: Option<PropertyId>) -> Result<Property> {
    match id {
        Some(id) => properties
            .into_iter()
            .find(|p| p.property_id == id)
            .with_context(|| format!("No property with id {}", id)),
        None => {
            let count = properties.len();
            match (properties.into_iter().next(), count) {
                (Some(property), 1) => Ok(property),
                _ => bail!(
                    "{} properties in file, choose one with --property-id",
                    count
                ),
            }
        }
    }
}

async fn run_signup(api: &dyn RentalApi, form: SignupForm) -> Result<()> {
    let mut page = SignupPage::new(form);
    match page.submit(api).await {
        SignupOutcome::Registered { redirect } => {
            println!("{}", page.message().unwrap_or_default());
            println!("Continue at {}", redirect.path());
            Ok(())
        }
        SignupOutcome::Invalid => {
            for (field, message) in page.errors().iter() {
                println!("{}: {}", field, message);
            }
            bail!("signup form is invalid")
        }
        SignupOutcome::BackendError(_) => {
            bail!(page.backend_error().unwrap_or("registration failed").to_string())
        }
    }
}

async fn run_cards(
    api: &dyn RentalApi,
    properties: Vec<Property>,
    session: &Session,
    image: Option<&str>,
) {
    for (i, property) in properties.into_iter().enumerate() {
        let mut workflow = VisitWorkflow::new(property);
        workflow.refresh_status(api, session).await;

        let card = ListingCard::new(&workflow, session);
        let card = match image {
            Some(image) => card.with_image(image),
            None => card,
        };
        println!("{}. {}", i + 1, card);
    }
}

async fn run_visit(
    api: &dyn RentalApi,
    property: Property,
    session: &mut Session,
    date: Option<String>,
) -> Result<Option<User>> {
    let mut workflow = VisitWorkflow::new(property);
    workflow.refresh_status(api, session).await;

    match workflow.click(session) {
        ClickOutcome::RedirectToLogin(route) => {
            println!("Sign in first: {}", route.path());
            return Ok(None);
        }
        ClickOutcome::QuotaExhausted => {
            println!("{}", ListingCard::new(&workflow, session));
            return Ok(None);
        }
        ClickOutcome::Opened(ModalMode::ViewingDetails) => {
            println!("{}", ListingCard::new(&workflow, session));
            return Ok(None);
        }
        ClickOutcome::Opened(ModalMode::Booking) => {}
    }

    let Some(date) = date else {
        println!("{}", ListingCard::new(&workflow, session));
        println!("Pass --date YYYY-MM-DD to request the visit");
        return Ok(None);
    };

    workflow.set_visit_date(date);
    match workflow.submit(api, session).await {
        Ok(user) => {
            println!(
                "✅ Visit scheduled. {} free visit(s) left.",
                user.remaining_visits
            );
            println!("{}", ListingCard::new(&workflow, session));
            Ok(Some(user))
        }
        Err(e) => {
            println!("{}", ListingCard::new(&workflow, session));
            Err(e).context("Visit was not scheduled")
        }
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = client_config(&cli);
    info!("🏠 RentUp client → {}", config.server_url);
    let api = HttpRentalApi::with_config(config)?;

    match cli.command {
        Command::Signup {
            name,
            email,
            contact_number,
            password,
            confirm_password,
            profile_photo,
        } => {
            let profile_photo = match profile_photo {
                Some(path) => Some(ProfilePhoto {
                    file_name: path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| "profile".to_string()),
                    bytes: tokio::fs::read(&path)
                        .await
                        .with_context(|| format!("Failed to read {}", path.display()))?,
                }),
                None => None,
            };
            let form = SignupForm {
                user_name: name,
                user_email: email,
                user_password: password,
                confirm_password,
                user_contact_number: contact_number,
                profile_photo,
            };
            run_signup(&api, form).await
        }
        Command::Login {
            contact_number,
            password,
            out,
        } => {
            let user = api
                .login(&contact_number, &password)
                .await
                .context("Login failed")?;
            println!(
                "Signed in as {} ({} free visit(s) left)",
                user.name, user.remaining_visits
            );
            save_user(&out, &user).await
        }
        Command::Cards {
            properties,
            session,
            image,
        } => {
            let properties = load_properties(&properties).await?;
            let session = load_session(session.as_deref()).await?;
            info!("Loaded {} properties", properties.len());
            run_cards(&api, properties, &session, image.as_deref()).await;
            Ok(())
        }
        Command::Visit {
            properties,
            property_id,
            session: session_path,
            date,
            save,
        } => {
            let property = pick_property(load_properties(&properties).await?, property_id)?;
            let mut session = load_session(session_path.as_deref()).await?;

            let updated = run_visit(&api, property, &mut session, date).await?;
            match (updated, session_path, save) {
                (Some(user), Some(path), true) => save_user(&path, &user).await,
                (Some(_), None, true) => {
                    warn!("--save given without --session, nothing written");
                    Ok(())
                }
                _ => Ok(()),
            }
        }
    }
}
