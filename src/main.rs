use crate::binance::api::BinanceFuturesClient;
use crate::binance::object::BinanceObj;
use crate::config::settings::ConfigStruct;
use crate::core::cli::{read_credentials, run_menu, show_balance, CliArgs, Prompt};
use crate::core::error::Result;
use clap::Parser;
use log::info;
use std::io;

mod binance;
mod config;
mod core;
mod exchange;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    let config = ConfigStruct::load(&args.config)?;
    let _log_handle = crate::core::logger::init(&config.logging)?;

    info!("futures testnet order bot starting");

    let stdin = io::stdin();
    let mut prompt = Prompt::new(stdin.lock(), io::stdout());

    let (api_key, secret_key) = match read_credentials(&mut prompt)? {
        Some(keys) => keys,
        None => return Ok(()),
    };

    let client = BinanceFuturesClient::new(
        api_key,
        secret_key,
        &config.exchange.futures_rest_api_endpoint,
    );

    let bot = match BinanceObj::connect(client, config.validation.filter_policy) {
        Ok(bot) => bot,
        Err(e) => {
            println!("Failed to initialize the exchange client: {e}");
            return Ok(());
        }
    };

    show_balance(&bot, &mut prompt, &config.exchange.balance_asset)?;
    run_menu(&bot, &mut prompt)?;

    info!("futures testnet order bot stopped");
    Ok(())
}
