use crate::binance::object::BinanceObj;
use crate::config::settings::CONFIG_FILENAME;
use crate::core::error::Result;
use crate::core::types::{OrderSide, Symbol};
use crate::exchange::{ExchangeClient, OrderAck};
use clap::Parser;
use log::{info, warn};
use rust_decimal::Decimal;
use std::env;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

pub const API_KEY_ENV: &str = "BOT_API_KEY";
pub const SECRET_KEY_ENV: &str = "BOT_SECRET_KEY";

const MENU: &str = "\n1. Market order\n2. Limit order\n3. Stop-limit order\n4. Exit";

#[derive(Parser, Debug)]
#[command(author, version, about = "Places orders on the Binance USD-M futures testnet", long_about = None)]
pub struct CliArgs {
    /// Path to the TOML configuration file
    #[arg(long, default_value = CONFIG_FILENAME)]
    pub config: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Market,
    Limit,
    StopLimit,
    Exit,
}

impl FromStr for MenuChoice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::Market),
            "2" => Ok(MenuChoice::Limit),
            "3" => Ok(MenuChoice::StopLimit),
            "4" => Ok(MenuChoice::Exit),
            other => Err(format!("invalid choice: {other}")),
        }
    }
}

/// Line-oriented prompt over any reader/writer pair. Every `ask*` returns
/// `None` once the input is exhausted.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    pub fn ask(&mut self, question: &str) -> Result<Option<String>> {
        write!(self.output, "{question}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }

    /// Asks again until the answer parses.
    pub fn ask_parsed<T: FromStr>(&mut self, question: &str) -> Result<Option<T>> {
        loop {
            let answer = match self.ask(question)? {
                Some(a) => a,
                None => return Ok(None),
            };

            match answer.parse::<T>() {
                Ok(v) => return Ok(Some(v)),
                Err(_) => self.say(&format!("invalid value: '{answer}'"))?,
            }
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

// an empty answer falls back to the environment variable
fn ask_credential<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
    question: &str,
    env_name: &str,
) -> Result<Option<String>> {
    loop {
        let answer = match prompt.ask(question)? {
            Some(a) => a,
            None => return Ok(None),
        };

        if !answer.is_empty() {
            return Ok(Some(answer));
        }

        if let Ok(value) = env::var(env_name) {
            if !value.is_empty() {
                info!("using {env_name} from the environment");
                return Ok(Some(value));
            }
        }

        prompt.say(&format!("a value is required (or set {env_name})"))?;
    }
}

pub fn read_credentials<R: BufRead, W: Write>(
    prompt: &mut Prompt<R, W>,
) -> Result<Option<(String, String)>> {
    let api_key = match ask_credential(prompt, "API key", API_KEY_ENV)? {
        Some(k) => k,
        None => return Ok(None),
    };
    let secret_key = match ask_credential(prompt, "API secret", SECRET_KEY_ENV)? {
        Some(k) => k,
        None => return Ok(None),
    };

    Ok(Some((api_key, secret_key)))
}

pub fn show_balance<C: ExchangeClient, R: BufRead, W: Write>(
    bot: &BinanceObj<C>,
    prompt: &mut Prompt<R, W>,
    asset: &str,
) -> Result<()> {
    match bot.account_balance(asset) {
        Ok(available) => prompt.say(&format!("Available {asset} balance: {available}")),
        Err(e) => {
            warn!("cannot show {asset} balance: {e}");
            prompt.say(&format!("{asset} balance unavailable"))
        }
    }
}

/// Menu loop: one order per iteration until "4" or end of input.
pub fn run_menu<C: ExchangeClient, R: BufRead, W: Write>(
    bot: &BinanceObj<C>,
    prompt: &mut Prompt<R, W>,
) -> Result<()> {
    loop {
        prompt.say(MENU)?;

        let choice = match prompt.ask("Choose an option")? {
            Some(c) => c,
            None => break,
        };

        let choice = match MenuChoice::from_str(&choice) {
            Ok(MenuChoice::Exit) => break,
            Ok(c) => c,
            Err(e) => {
                prompt.say(&e)?;
                continue;
            }
        };

        let result = match place_from_prompt(bot, prompt, choice)? {
            Some(r) => r,
            None => break,
        };

        match result {
            Ok(ack) => prompt.say(&format_ack(&ack))?,
            Err(_) => prompt.say("Order placement failed. See the log for details.")?,
        }
    }

    info!("menu loop finished");
    Ok(())
}

// Outer None: input ended mid-order. Inner Result: outcome of the order itself.
fn place_from_prompt<C: ExchangeClient, R: BufRead, W: Write>(
    bot: &BinanceObj<C>,
    prompt: &mut Prompt<R, W>,
    choice: MenuChoice,
) -> Result<Option<Result<OrderAck>>> {
    let symbol = match prompt.ask("Symbol (e.g. BTCUSDT)")? {
        Some(s) => Symbol(s.to_uppercase()),
        None => return Ok(None),
    };
    let side = match prompt.ask_parsed::<OrderSide>("Side (BUY/SELL)")? {
        Some(s) => s,
        None => return Ok(None),
    };
    let quantity = match prompt.ask_parsed::<Decimal>("Quantity")? {
        Some(q) => q,
        None => return Ok(None),
    };

    let result = match choice {
        MenuChoice::Market => bot.place_market_order(&symbol, side, quantity),
        MenuChoice::Limit => {
            let price = match prompt.ask_parsed::<Decimal>("Price")? {
                Some(p) => p,
                None => return Ok(None),
            };
            bot.place_limit_order(&symbol, side, quantity, price)
        }
        MenuChoice::StopLimit => {
            let price = match prompt.ask_parsed::<Decimal>("Limit price")? {
                Some(p) => p,
                None => return Ok(None),
            };
            let stop_price = match prompt.ask_parsed::<Decimal>("Stop price")? {
                Some(p) => p,
                None => return Ok(None),
            };
            bot.place_stop_limit_order(&symbol, side, quantity, price, stop_price)
        }
        MenuChoice::Exit => return Ok(None),
    };

    Ok(Some(result))
}

pub fn format_ack(ack: &OrderAck) -> String {
    format!(
        "Order placed: id={} symbol={} side={} type={} status={}",
        ack.order_id, ack.symbol, ack.side, ack.order_type, ack.status
    )
}
