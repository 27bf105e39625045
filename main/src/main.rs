use std::env;
use std::process;
use log::error;
use config::bootstrap::{ init, run };

#[tokio::main]
async fn main() {

    let config_filepath = get_config_filepath();

    match init(&config_filepath, true).await {
        Ok(service) => run(service).await,
        Err(e) => {
            error!(target: "bootstrap", "{}", e);
            error!(target: "bootstrap", "Cancelled startup.");
            process::exit(1);
        }
    }

}

/// Allow the user to specify where the config file is with a
/// command line argument. If one is not provided the default
/// "config.toml" is returned.
fn get_config_filepath() -> String {

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        "./config.toml".to_string()
    }
    else {
        args[1].clone()
    }

}
