use std::error::Error;

use clap::{Arg, Command};

use certinspect::{inspect_keystore, inspect_keystore_file, store::Keystore};

const DEMO_PASSWORD: &str = "changeit";
const SEPARATOR_LENGTH: usize = 80;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let matches = Command::new("certinspect")
        .about("Inspect X.509 v3 certificate extensions held in JKS keystores")
        .arg(Arg::new("keystore").help("Path to a keystore file"))
        .arg(Arg::new("password").help("Keystore password"))
        .arg(Arg::new("alias").help("Only inspect this alias"))
        .get_matches();

    let keystore = matches.get_one::<String>("keystore");
    let password = matches.get_one::<String>("password");
    let alias = matches.get_one::<String>("alias");

    match (keystore, password) {
        (None, _) => {
            // demo keystores are independent: a failure in one still lets
            // the other report
            log::info!("Inspecting server certificate from the built-in keystore...");
            inspect_demo_keystore(include_bytes!("./examples/server.jks"), "server");

            log::info!("\n{}\n", "=".repeat(SEPARATOR_LENGTH));

            log::info!("Inspecting client certificate from the built-in keystore...");
            inspect_demo_keystore(include_bytes!("./examples/client.jks"), "client");
        }
        (Some(path), Some(password)) => {
            log::info!("Inspecting certificate(s) from: {}", path);
            inspect_keystore_file(path, Some(password), alias.map(String::as_str))?;
        }
        (Some(_), None) => {
            log::info!("Usage:");
            log::info!("  certinspect                              - Inspect built-in keystores");
            log::info!("  certinspect <keystore> <password>        - Inspect all certs in keystore");
            log::info!("  certinspect <keystore> <password> <alias> - Inspect specific cert");
        }
    }

    Ok(())
}

fn inspect_demo_keystore(data: &[u8], alias: &str) {
    match Keystore::parse(data, Some(DEMO_PASSWORD)) {
        Ok(store) => inspect_keystore(&store, Some(alias)),
        Err(err) => log::error!("Error inspecting certificate: {}", err),
    }
}
