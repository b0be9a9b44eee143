extern crate env_logger;
extern crate log;

use dotenv::dotenv;
use std::env;
use std::io;
use std::process;
use std::sync::Arc;

use tokio::io::BufReader;
use tokio::sync::Notify;

use expo_push_sender::messaging::expo::ExpoPushClient;
use expo_push_sender::*;

#[tokio::main]
async fn main() {
    let shutdown = Arc::new(Notify::new());
    let handler_shutdown = shutdown.clone();
    ctrlc::set_handler(move || {
        handler_shutdown.notify_one();
    })
    .expect("Error setting Ctrl-C handler");

    dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let config = Config::new(&args).unwrap_or_else(|err| {
        eprintln!("Problem parsing arguments: {}", err);
        process::exit(1);
    });

    let client = ExpoPushClient::new();
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = io::stdout();

    if let Err(e) = run(config, &client, stdin, &mut stdout, shutdown).await {
        eprintln!("Application error: {}", e);
        process::exit(1);
    }
    // A pending stdin read would otherwise keep the runtime alive on Ctrl-C.
    process::exit(0);
}
