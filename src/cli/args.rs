use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dessert-shop")]
#[command(about = "Browse the dessert catalog, fill a cart and place an order")]
#[command(version)]
pub struct Args {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Catalog JSON file (overrides CATALOG_PATH)
    #[arg(short, long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the desserts on offer
    Catalog,
    /// Start an interactive shopping session
    Shop,
    /// Place an order for the given catalog ids in one go
    Order {
        /// Catalog ids, repeat an id to add more than one unit
        #[arg(required = true)]
        ids: Vec<u32>,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Show the effective configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_order_with_repeated_ids() {
        let args = Args::try_parse_from(["dessert-shop", "order", "1", "1", "4", "--yes"]).unwrap();
        match args.command {
            Commands::Order { ids, yes } => {
                assert_eq!(ids, vec![1, 1, 4]);
                assert!(yes);
            }
            _ => panic!("expected order command"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let args = Args::try_parse_from(["dessert-shop", "catalog", "-v", "--catalog", "other.json"]).unwrap();
        assert!(args.verbose);
        assert_eq!(args.catalog, Some(PathBuf::from("other.json")));
    }

    #[test]
    fn order_requires_ids() {
        assert!(Args::try_parse_from(["dessert-shop", "order"]).is_err());
    }
}
