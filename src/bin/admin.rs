use lib::admin::{models::Args, run_tool::run};
use lib::api::{models::Config, ApiClient};

use chrono::Local;
use clap::Parser;
use log::{error, info};

#[tokio::main]
async fn main() {
    /* Setup logging */
    env_logger::builder()
        .target(env_logger::Target::Stdout)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    /* Get all the required resources */
    let args = Args::parse();
    let config = match Config::load(&args.config_json_path) {
        Ok(config) => config,
        Err(err) => {
            error!("Could not read {}: {}", args.config_json_path.display(), err);
            std::process::exit(1);
        }
    };
    info!("Using backend at {}", config.api_base_url);
    let mut client = match ApiClient::new(&config) {
        Ok(client) => client,
        Err(err) => {
            error!("Could not set up the HTTP client: {}", err);
            std::process::exit(1);
        }
    };

    /* Perform the command, a failed request is reported and never retried */
    match run(&args, &config, &mut client, Local::now().date_naive()).await {
        Ok(report) => println!("{}", report),
        Err(err) => {
            error!("Command failed: {}", err);
            std::process::exit(1);
        }
    }
}
