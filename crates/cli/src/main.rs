//! Quickbite CLI - drive a file-backed cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add two burgers with a size option
//! qb add --id p1 --name "Burger" --price 45000 --quantity 2 \
//!     --option size:large:10000
//!
//! # Show the cart
//! qb list
//!
//! # Adjust quantities or drop a line
//! qb increase --id p1 --option size:large:10000
//! qb decrease --id p1 --option size:large:10000
//! qb remove --id p1 --option size:large:10000
//!
//! # Price an order (submission goes through the app's realtime channel,
//! # so this is a priced preview)
//! qb checkout --name "Nguyen Van A" --address "1 Tran Hung Dao" \
//!     --phone 0900000000 --points 2000 --available-points 5000
//!
//! # Empty the cart
//! qb clear
//! ```
//!
//! The cart file lives under `--cart-dir`, falling back to the
//! `QUICKBITE_CART_DIR` environment variable and then the current directory.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::options::OptionSpec;

#[derive(Parser)]
#[command(name = "qb")]
#[command(author, version, about = "Quickbite cart tools")]
struct Cli {
    /// Directory holding the cart file
    #[arg(long, global = true, env = "QUICKBITE_CART_DIR", default_value = ".")]
    cart_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a product to the cart
    Add {
        /// Catalog product id
        #[arg(long)]
        id: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Unit price in đồng, option surcharges included
        #[arg(long)]
        price: i64,

        /// Display image URL
        #[arg(long, default_value = "")]
        picture: String,

        /// Number of units
        #[arg(long, short, default_value_t = 1)]
        quantity: u32,

        /// Selected option as `optionId:choiceId:surcharge`, repeatable
        #[arg(long = "option")]
        options: Vec<OptionSpec>,
    },
    /// Show the cart with line totals and the subtotal
    List,
    /// Increment a line's quantity by one
    Increase {
        /// Catalog product id
        #[arg(long)]
        id: String,

        /// Selected option as `optionId:choiceId:surcharge`, repeatable
        #[arg(long = "option")]
        options: Vec<OptionSpec>,
    },
    /// Decrement a line's quantity by one (floors at one)
    Decrease {
        /// Catalog product id
        #[arg(long)]
        id: String,

        /// Selected option as `optionId:choiceId:surcharge`, repeatable
        #[arg(long = "option")]
        options: Vec<OptionSpec>,
    },
    /// Remove a line entirely
    Remove {
        /// Catalog product id
        #[arg(long)]
        id: String,

        /// Selected option as `optionId:choiceId:surcharge`, repeatable
        #[arg(long = "option")]
        options: Vec<OptionSpec>,
    },
    /// Empty the cart
    Clear,
    /// Price the cart as an order
    Checkout {
        /// Recipient name
        #[arg(long, default_value = "")]
        name: String,

        /// Delivery address
        #[arg(long)]
        address: String,

        /// Contact phone number
        #[arg(long)]
        phone: String,

        /// Note to the kitchen or courier
        #[arg(long)]
        note: Option<String>,

        /// Voucher discount in đồng (already validated by the backend)
        #[arg(long)]
        voucher_discount: Option<i64>,

        /// Loyalty points to redeem (1 point = 1 đồng)
        #[arg(long, default_value_t = 0)]
        points: u64,

        /// Points the account actually holds
        #[arg(long, default_value_t = 0)]
        available_points: u64,

        /// Flat shipping fee in đồng
        #[arg(long, default_value_t = quickbite_checkout::DEFAULT_SHIPPING_FEE)]
        ship: i64,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut cart = commands::cart::open(&cli.cart_dir).await;

    match cli.command {
        Commands::Add {
            id,
            name,
            price,
            picture,
            quantity,
            options,
        } => {
            commands::cart::add(&mut cart, &id, &name, price, &picture, quantity, options)?;
        }
        Commands::List => commands::cart::list(&cart),
        Commands::Increase { id, options } => commands::cart::increase(&mut cart, &id, options),
        Commands::Decrease { id, options } => commands::cart::decrease(&mut cart, &id, options),
        Commands::Remove { id, options } => commands::cart::remove(&mut cart, &id, options),
        Commands::Clear => commands::cart::clear(&mut cart),
        Commands::Checkout {
            name,
            address,
            phone,
            note,
            voucher_discount,
            points,
            available_points,
            ship,
        } => {
            commands::checkout::preview(
                &cart,
                commands::checkout::PreviewArgs {
                    name,
                    address,
                    phone,
                    note,
                    voucher_discount,
                    points,
                    available_points,
                    ship,
                },
            )?;
        }
    }

    cart.flush().await;
    Ok(())
}
