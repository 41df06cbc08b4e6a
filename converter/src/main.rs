//! gasnet-convert - turn a gas-network CSV model folder into one JSON file
//!
//! ```bash
//! gasnet-convert -p ./model6ss_test_0/ -o ./ --jsonfile model6ss_test_0.json
//! gasnet-convert -p ./model/ --file nodes=nodes.csv --info
//! ```

use clap::Parser;
use gasnet_converter::{convert, logging, Cli};
use tracing::info;

fn main() {
    // Load .env file (if present), so RUST_LOG can live there
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.log_level());

    let result = cli
        .to_options()
        .and_then(|options| convert(&options));

    match result {
        Ok(summary) => {
            for (field, count) in &summary.field_counts {
                info!("{}: {} entries", field, count);
            }
            info!("done: {}", summary.output_path.display());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
