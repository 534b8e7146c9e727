use anyhow::{Context, Result};
use console::{style, Emoji};
use dialoguer::{theme::ColorfulTheme, Confirm, Select};
use tracing::{info, warn};

use crate::{
    catalog::{Catalog, JsonFileCatalogProvider},
    cli::args::Commands,
    models::product::ProductId,
    services::{CheckoutError, Storefront},
    utils::{
        formatting::{
            format_cart_heading, format_cart_table, format_catalog_table, format_confirmation,
            format_review, format_total,
        },
        Config,
    },
};

static CHECKMARK: Emoji<'_, '_> = Emoji("✅ ", "");
static CROSS: Emoji<'_, '_> = Emoji("❌ ", "");
static WARNING: Emoji<'_, '_> = Emoji("⚠️ ", "");
static INFO: Emoji<'_, '_> = Emoji("ℹ️ ", "");
static CAKE: Emoji<'_, '_> = Emoji("🍰 ", "");

const SHOP_MENU: [&str; 7] = [
    "Add item to cart",
    "Increase quantity",
    "Decrease quantity",
    "Remove item",
    "View cart",
    "Confirm order",
    "Quit",
];

pub struct CliApp {
    config: Config,
    storefront: Storefront,
}

impl CliApp {
    pub async fn new(config: Config) -> Self {
        let provider = JsonFileCatalogProvider::new(&config.catalog_path);
        let catalog = Catalog::load(&provider).await;
        let storefront = Storefront::new(catalog, config.checkout_flow());

        Self { config, storefront }
    }

    pub async fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Catalog => self.handle_catalog(),
            Commands::Shop => self.handle_shop(),
            Commands::Order { ids, yes } => self.handle_order(ids, yes),
            Commands::Config => self.handle_config(),
        }
    }

    fn handle_catalog(&self) -> Result<()> {
        let catalog = self.storefront.catalog();
        if catalog.is_empty() {
            println!("{} No desserts available", WARNING);
            return Ok(());
        }

        println!("{} {}", CAKE, style("Desserts").bold().cyan());
        println!("{}", format_catalog_table(catalog.items()));
        Ok(())
    }

    fn handle_shop(&mut self) -> Result<()> {
        if self.storefront.catalog().is_empty() {
            println!("{} No desserts available, nothing to shop for", WARNING);
            return Ok(());
        }

        let theme = ColorfulTheme::default();
        info!("Shopping session started");

        loop {
            self.show_notification();

            let heading = format!(
                "{} ({} lines, {})",
                style("What next?").bold(),
                self.storefront.cart().line_count(),
                self.storefront.total()
            );
            let choice = Select::with_theme(&theme)
                .with_prompt(heading)
                .items(&SHOP_MENU)
                .default(0)
                .interact_opt()
                .context("Failed to read menu selection")?;

            match choice {
                Some(0) => self.prompt_add(&theme)?,
                Some(1) => self.prompt_cart_action(&theme, "Increase which item?", CartAction::Increase)?,
                Some(2) => self.prompt_cart_action(&theme, "Decrease which item?", CartAction::Decrease)?,
                Some(3) => self.prompt_cart_action(&theme, "Remove which item?", CartAction::Remove)?,
                Some(4) => self.print_cart(),
                Some(5) => self.confirm_order(&theme, false)?,
                _ => break,
            }
        }

        info!("Shopping session ended");
        Ok(())
    }

    fn handle_order(&mut self, ids: Vec<u32>, yes: bool) -> Result<()> {
        for id in ids.into_iter().map(ProductId) {
            if self.storefront.add_item(id).is_none() {
                println!("{} No dessert with id {}", CROSS, style(id).red());
            }
        }

        self.print_cart();
        self.confirm_order(&ColorfulTheme::default(), yes)
    }

    fn handle_config(&self) -> Result<()> {
        println!("{} {}", INFO, style("Configuration").bold().cyan());
        println!("Catalog: {}", style(self.config.catalog_path.display()).green());
        println!(
            "Notification shown for: {}s",
            style(self.config.notification_ttl.as_secs()).green()
        );
        println!("Empty orders allowed: {}", style(self.config.allow_empty_orders).green());
        println!("Log level: {}", style(&self.config.log_level).green());
        let environment = if self.config.is_production() {
            style(&self.config.environment).red()
        } else {
            style(&self.config.environment).yellow()
        };
        println!("Environment: {}", environment);
        Ok(())
    }

    fn prompt_add(&mut self, theme: &ColorfulTheme) -> Result<()> {
        let labels: Vec<String> = self
            .storefront
            .catalog()
            .items()
            .iter()
            .map(|item| format!("{} ({})", item.name, item.price))
            .collect();

        let Some(index) = Select::with_theme(theme)
            .with_prompt("Add which dessert?")
            .items(&labels)
            .default(0)
            .interact_opt()
            .context("Failed to read dessert selection")?
        else {
            return Ok(());
        };

        let item = &self.storefront.catalog().items()[index];
        let (id, name) = (item.id, item.name.clone());
        if let Some(quantity) = self.storefront.add_item(id) {
            println!("{} {} in cart: {}", CHECKMARK, style(name).green(), quantity);
        }
        Ok(())
    }

    fn prompt_cart_action(&mut self, theme: &ColorfulTheme, prompt: &str, action: CartAction) -> Result<()> {
        if self.storefront.cart().is_empty() {
            println!("{} Your cart is empty", INFO);
            return Ok(());
        }

        let labels: Vec<String> = self
            .storefront
            .cart()
            .lines()
            .iter()
            .map(|line| format!("{} x{}", line.name(), line.quantity()))
            .collect();

        let Some(index) = Select::with_theme(theme)
            .with_prompt(prompt)
            .items(&labels)
            .default(0)
            .interact_opt()
            .context("Failed to read cart selection")?
        else {
            return Ok(());
        };

        let line = &self.storefront.cart().lines()[index];
        let (id, name) = (line.id(), line.name().to_string());

        match action {
            CartAction::Increase => {
                if let Some(quantity) = self.storefront.increase_quantity(id) {
                    println!("{} {} in cart: {}", CHECKMARK, style(name).green(), quantity);
                }
            }
            CartAction::Decrease => match self.storefront.decrease_quantity(id) {
                Some(0) => println!("{} {} removed from cart", CHECKMARK, style(name).yellow()),
                Some(quantity) => println!("{} {} in cart: {}", CHECKMARK, style(name).green(), quantity),
                None => {}
            },
            CartAction::Remove => {
                if self.storefront.remove_item(id).is_some() {
                    println!("{} {} removed from cart", CHECKMARK, style(name).yellow());
                }
            }
        }
        Ok(())
    }

    fn confirm_order(&mut self, theme: &ColorfulTheme, skip_prompt: bool) -> Result<()> {
        let review = match self.storefront.request_confirmation() {
            Ok(review) => review,
            Err(CheckoutError::EmptyCart) => {
                println!("{} Your cart is empty, add something first", WARNING);
                return Ok(());
            }
            Err(e) => {
                println!("{} Cannot review order: {}", CROSS, style(&e).red());
                return Ok(());
            }
        };

        println!("{}", style("Order Confirmation").bold().cyan());
        println!("{}", format_review(&review));

        let accepted = skip_prompt
            || Confirm::with_theme(theme)
                .with_prompt("Confirm your order")
                .default(false)
                .interact()
                .context("Failed to read order confirmation")?;

        if !accepted {
            self.storefront.cancel_confirmation();
            println!("Order not placed, your cart is unchanged");
            return Ok(());
        }

        match self.storefront.accept_confirmation() {
            Ok(confirmation) => {
                println!("{}", format_confirmation(&confirmation));
            }
            Err(e) => {
                println!("{} Failed to confirm order: {}", CROSS, style(&e).red());
                warn!("Failed to confirm order: {}", e);
            }
        }
        Ok(())
    }

    fn print_cart(&self) {
        let cart = self.storefront.cart();
        println!("{}", format_cart_heading(cart.line_count()));
        if cart.is_empty() {
            println!("{} Your cart is empty", INFO);
        } else {
            println!("{}", format_cart_table(cart.lines()));
        }
        println!("{}", format_total(self.storefront.total()));
    }

    fn show_notification(&mut self) {
        if let Some(confirmation) = self.storefront.notification() {
            let remaining = self
                .storefront
                .checkout()
                .notification_remaining()
                .map(|d| d.as_secs_f32())
                .unwrap_or_default();
            println!(
                "{} {} {}",
                CHECKMARK,
                style(&confirmation.message).green(),
                style(format!("({:.1}s)", remaining)).dim()
            );
        }
        self.storefront.expire_notification();
    }
}

enum CartAction {
    Increase,
    Decrease,
    Remove,
}
