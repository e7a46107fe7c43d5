use std::str::FromStr;

use clap::{arg, command, value_parser, ArgMatches, Command};
use tracing::{error, info, Level};

use abi::config::Config;
use abi::errors::Result;
use utils::custom_extract::{Claims, JwtSecret};

const DEFAULT_CONFIG: &str = "./config.yml";

fn cli() -> Command {
    command!()
        .arg(arg!(-c --config <FILE> "path of the yaml config").default_value(DEFAULT_CONFIG))
        .subcommand(Command::new("serve").about("start the http server (default)"))
        .subcommand(
            Command::new("token")
                .about("issue a bearer token for a user, for local testing")
                .arg(
                    arg!(<USER_ID> "id of the caller")
                        .value_parser(value_parser!(i64)),
                ),
        )
}

#[tokio::main]
async fn main() {
    let matches = cli().get_matches();
    let path = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or(DEFAULT_CONFIG);

    let config = match Config::load(path) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load config {path}: {err}");
            std::process::exit(1);
        }
    };

    // init tracing
    let level = Level::from_str(&config.log.level).unwrap_or(Level::DEBUG);
    tracing_subscriber::FmtSubscriber::builder()
        .with_line_number(true)
        .with_max_level(level)
        .init();

    if let Err(err) = run(config, &matches).await {
        error!("friendship server stopped: {}", err);
        std::process::exit(1);
    }
}

async fn run(config: Config, matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("token", sub)) => {
            // required argument, clap rejects the command line without it
            let user_id = sub.get_one::<i64>("USER_ID").copied().unwrap_or_default();
            let token = Claims::new(user_id).encode(&JwtSecret(config.server.jwt_secret))?;
            println!("Bearer {token}");
            Ok(())
        }
        _ => {
            info!("start friendship server at {}", config.server.server_url());
            api::start(config).await
        }
    }
}
