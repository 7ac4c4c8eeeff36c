use std::process::ExitCode;

use log::{debug, error, info};
use sha1_tools::{
    digest::extend::forge,
    encode::{ascii::to_ascii, hex::to_hex},
    Error, Result,
};

const USAGE: &str = "Usage: extendmessage <key length> \"<original message>\" \"<original digest hex>\" \"<extension>\"\n       \
                     original digest hex must be a 20 byte SHA-1 digest written as 40 hex characters";

#[derive(Debug, PartialEq, Eq)]
struct Args {
    key_len: usize,
    message: String,
    digest_hex: String,
    extension: String,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let args: Vec<String> = args.into_iter().collect();
    let [key_len, message, digest_hex, extension]: [String; 4] = args
        .try_into()
        .map_err(|a: Vec<String>| Error::InvalidArgument(format!("expected 4 arguments, got {}", a.len())))?;

    let key_len = key_len
        .parse::<usize>()
        .map_err(|e| Error::InvalidArgument(format!("key length {key_len:?}: {e}")))?;

    Ok(Args { key_len, message, digest_hex, extension })
}

fn run(args: Args) -> Result<()> {
    info!("forging extension of {} bytes for a {} byte key", args.extension.len(), args.key_len);
    let forgery = forge(
        args.key_len,
        args.message.as_bytes(),
        &args.digest_hex,
        args.extension.as_bytes(),
    )?;
    debug!("forged message : {}", to_ascii(&forgery.message, true));

    println!(
        "Message in hex:\n{}\nDigest in hex:\n{}",
        to_hex(&forgery.message),
        to_hex(&forgery.digest)
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match parse_args(std::env::args().skip(1)).and_then(run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("error: {e}");
            if let Error::InvalidArgument(_) = e {
                eprintln!("{USAGE}");
            }
            ExitCode::FAILURE
        }
    }
}
