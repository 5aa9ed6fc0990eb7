use std::process;

use clap::Parser;
use tweet_archive::Args;

#[tokio::main]
async fn main() {
    let args = Args::parse();
    tweet_archive::init_logging();

    match args.run().await {
        Ok(_) => process::exit(0),
        Err(err) => {
            eprintln!("{:#}", err);
            process::exit(1);
        }
    }
}
