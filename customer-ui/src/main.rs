//! Customer UI entry point.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use customer_core::CustomerId;
use customer_ui::{CustomerApiClient, CustomerController, CustomerViewModel, UiConfig, UiError};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Manage customers through the customer API", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, env = "CUSTOMER_UI_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every customer
    List,
    /// Show an empty create form
    New,
    /// Create a customer
    Create(CustomerFields),
    /// Show the edit form for a customer
    Show { id: CustomerId },
    /// Update a customer
    Edit {
        id: CustomerId,
        #[command(flatten)]
        fields: CustomerFields,
    },
    /// Delete a customer; without --confirm only shows what would be deleted
    Delete {
        id: CustomerId,
        #[arg(long)]
        confirm: bool,
    },
}

#[derive(Args)]
struct CustomerFields {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    mobile_no: Option<String>,
}

impl CustomerFields {
    fn into_model(self, id: Option<CustomerId>) -> CustomerViewModel {
        CustomerViewModel {
            id,
            name: self.name,
            email: self.email,
            address: self.address,
            mobile_no: self.mobile_no,
            created_at: None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), UiError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("customer_ui=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = UiConfig::load(cli.config.as_deref())?;
    let controller = CustomerController::new(CustomerApiClient::new(&config)?);

    let view = match cli.command {
        Command::List => controller.index().await,
        Command::New => controller.create_form(),
        Command::Create(fields) => controller.create(fields.into_model(None)).await,
        Command::Show { id } => controller.edit_form(id).await,
        Command::Edit { id, fields } => controller.edit(id, fields.into_model(Some(id))).await,
        Command::Delete { id, confirm: false } => controller.delete_form(id).await,
        Command::Delete { id, confirm: true } => controller.delete_confirmed(id).await,
    };

    print!("{}", view);
    Ok(())
}
