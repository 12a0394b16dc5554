//! # Session Commands Module
//!
//! Every command a session script can issue.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (parsing + dispatch)
//! ├── catalog.rs  ◄─── Catalog listing
//! ├── cart.rs     ◄─── Cart manipulation
//! └── payment.rs  ◄─── Payment, balance, receipt
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Command Flow                                 │
//! │                                                                         │
//! │  script line           "pay 4.50"                                       │
//! │         │                                                               │
//! │         │ parse_line()                                                  │
//! │         ▼                                                               │
//! │  SessionCommand::Pay(Money(450))                                        │
//! │         │                                                               │
//! │         │ execute(&LedgerState, command)                                │
//! │         ▼                                                               │
//! │  payment::pay(state, amount) ──► CartLedger::pay under the Mutex        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  CommandOutput::Payment(..) ──► render (text or JSON)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Parsing is the only fallible step. Once a command is parsed, executing
//! it cannot fail: unknown product ids are silent no-ops in the ledger.

pub mod cart;
pub mod catalog;
pub mod payment;

use std::str::FromStr;

use ledger_core::{Money, ProductId, Settlement};
use serde::Serialize;

use crate::error::CliError;
use crate::state::LedgerState;

use self::cart::CartResponse;
use self::catalog::CatalogResponse;
use self::payment::PaymentResponse;

/// Usage lines printed by `help`, one per command.
pub const HELP_LINES: &[&str] = &[
    "catalog              list products with quantities in cart",
    "cart                 show cart lines and totals",
    "add <id>             add one unit of a product",
    "inc <id>             increase quantity of a product in the cart",
    "dec <id>             decrease quantity (removes the line at zero)",
    "remove <id>          remove a product from the cart",
    "empty                empty the cart",
    "total                show the cart total",
    "pay <amount>         tender money; settles once the total is covered",
    "balance              show money tendered but not yet settled",
    "receipt              show the last settlement",
    "help                 show this list",
];

// =============================================================================
// Session Command
// =============================================================================

/// One parsed line of a session script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Catalog,
    Cart,
    Add(ProductId),
    Increase(ProductId),
    Decrease(ProductId),
    Remove(ProductId),
    Empty,
    Total,
    Pay(Money),
    Balance,
    Receipt,
    Help,
}

impl SessionCommand {
    /// Parses one script line.
    ///
    /// Blank lines and `#` comments yield `Ok(None)`. A trailing `# ...`
    /// after a command is also ignored.
    pub fn parse_line(line: &str) -> Result<Option<Self>, CliError> {
        let line = match line.split_once('#') {
            Some((before, _)) => before,
            None => line,
        };
        let line = line.trim();

        if line.is_empty() {
            return Ok(None);
        }

        line.parse().map(Some)
    }

    /// Name used in logs and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            SessionCommand::Catalog => "catalog",
            SessionCommand::Cart => "cart",
            SessionCommand::Add(_) => "add",
            SessionCommand::Increase(_) => "inc",
            SessionCommand::Decrease(_) => "dec",
            SessionCommand::Remove(_) => "remove",
            SessionCommand::Empty => "empty",
            SessionCommand::Total => "total",
            SessionCommand::Pay(_) => "pay",
            SessionCommand::Balance => "balance",
            SessionCommand::Receipt => "receipt",
            SessionCommand::Help => "help",
        }
    }
}

impl FromStr for SessionCommand {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let name = words
            .next()
            .ok_or_else(|| CliError::parse("empty command"))?
            .to_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match name.as_str() {
            "catalog" | "products" => no_args(&name, &args, SessionCommand::Catalog)?,
            "cart" | "show" => no_args(&name, &args, SessionCommand::Cart)?,
            "add" => SessionCommand::Add(product_id_arg(&name, &args)?),
            "inc" | "increase" => SessionCommand::Increase(product_id_arg(&name, &args)?),
            "dec" | "decrease" => SessionCommand::Decrease(product_id_arg(&name, &args)?),
            "remove" | "rm" => SessionCommand::Remove(product_id_arg(&name, &args)?),
            "empty" | "clear" => no_args(&name, &args, SessionCommand::Empty)?,
            "total" => no_args(&name, &args, SessionCommand::Total)?,
            "pay" => SessionCommand::Pay(amount_arg(&name, &args)?),
            "balance" => no_args(&name, &args, SessionCommand::Balance)?,
            "receipt" => no_args(&name, &args, SessionCommand::Receipt)?,
            "help" | "?" => SessionCommand::Help,
            other => return Err(CliError::unknown_command(other)),
        };

        Ok(command)
    }
}

fn no_args(
    name: &str,
    args: &[&str],
    command: SessionCommand,
) -> Result<SessionCommand, CliError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(CliError::parse(format!("'{}' takes no arguments", name)))
    }
}

fn single_arg<'a>(name: &str, args: &[&'a str], what: &str) -> Result<&'a str, CliError> {
    match args {
        [arg] => Ok(arg),
        [] => Err(CliError::parse(format!("'{}' expects {}", name, what))),
        _ => Err(CliError::parse(format!(
            "'{}' expects exactly one argument ({})",
            name, what
        ))),
    }
}

fn product_id_arg(name: &str, args: &[&str]) -> Result<ProductId, CliError> {
    let arg = single_arg(name, args, "a product id")?;
    Ok(arg.parse::<ProductId>()?)
}

fn amount_arg(name: &str, args: &[&str]) -> Result<Money, CliError> {
    let arg = single_arg(name, args, "an amount")?;
    Ok(arg.parse::<Money>()?)
}

// =============================================================================
// Command Output
// =============================================================================

/// Result of executing one command, ready for rendering.
///
/// ## Serialization
/// ```json
/// { "kind": "total", "total": 500 }
/// { "kind": "payment", "tendered": 300, "difference": -200, ... }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandOutput {
    Catalog(CatalogResponse),
    Cart(CartResponse),
    Total { total: Money },
    Payment(PaymentResponse),
    Balance { balance: Money },
    Receipt { settlement: Option<Settlement> },
    Help { commands: Vec<String> },
}

/// Runs a parsed command against the ledger.
pub fn execute(state: &LedgerState, command: SessionCommand) -> CommandOutput {
    match command {
        SessionCommand::Catalog => CommandOutput::Catalog(catalog::list_catalog(state)),
        SessionCommand::Cart => CommandOutput::Cart(cart::get_cart(state)),
        SessionCommand::Add(id) => CommandOutput::Cart(cart::add_to_cart(state, id)),
        SessionCommand::Increase(id) => CommandOutput::Cart(cart::increase_quantity(state, id)),
        SessionCommand::Decrease(id) => CommandOutput::Cart(cart::decrease_quantity(state, id)),
        SessionCommand::Remove(id) => CommandOutput::Cart(cart::remove_from_cart(state, id)),
        SessionCommand::Empty => CommandOutput::Cart(cart::empty_cart(state)),
        SessionCommand::Total => CommandOutput::Total {
            total: cart::cart_total(state),
        },
        SessionCommand::Pay(amount) => CommandOutput::Payment(payment::pay(state, amount)),
        SessionCommand::Balance => CommandOutput::Balance {
            balance: payment::balance(state),
        },
        SessionCommand::Receipt => CommandOutput::Receipt {
            settlement: payment::last_receipt(state),
        },
        SessionCommand::Help => CommandOutput::Help {
            commands: HELP_LINES.iter().map(|line| line.to_string()).collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "catalog".parse::<SessionCommand>().unwrap(),
            SessionCommand::Catalog
        );
        assert_eq!(
            "ADD 2".parse::<SessionCommand>().unwrap(),
            SessionCommand::Add(ProductId(2))
        );
        assert_eq!(
            "  increase   3 ".parse::<SessionCommand>().unwrap(),
            SessionCommand::Increase(ProductId(3))
        );
        assert_eq!(
            "dec 1".parse::<SessionCommand>().unwrap(),
            SessionCommand::Decrease(ProductId(1))
        );
        assert_eq!(
            "pay 4.50".parse::<SessionCommand>().unwrap(),
            SessionCommand::Pay(Money::from_cents(450))
        );
        assert_eq!(
            "clear".parse::<SessionCommand>().unwrap(),
            SessionCommand::Empty
        );
    }

    #[test]
    fn test_parse_line_skips_blanks_and_comments() {
        assert_eq!(SessionCommand::parse_line("").unwrap(), None);
        assert_eq!(SessionCommand::parse_line("   ").unwrap(), None);
        assert_eq!(SessionCommand::parse_line("# setup").unwrap(), None);
        assert_eq!(
            SessionCommand::parse_line("add 1 # cherry").unwrap(),
            Some(SessionCommand::Add(ProductId(1)))
        );
    }

    #[test]
    fn test_parse_errors() {
        let err = "frobnicate".parse::<SessionCommand>().unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownCommand);
        assert!(err.message.contains("frobnicate"));

        for text in ["add", "add x", "add 1 2", "pay", "pay 1.234", "total now"] {
            let err = text.parse::<SessionCommand>().unwrap_err();
            assert_eq!(err.code, ErrorCode::ParseError, "{}", text);
        }
    }

    #[test]
    fn test_execute_pay_sequence() {
        let state = LedgerState::default();
        execute(&state, SessionCommand::Add(ProductId(1)));
        execute(&state, SessionCommand::Add(ProductId(2)));

        assert_eq!(
            execute(&state, SessionCommand::Total),
            CommandOutput::Total {
                total: Money::from_cents(500)
            }
        );

        match execute(&state, SessionCommand::Pay(Money::from_cents(500))) {
            CommandOutput::Payment(response) => {
                assert!(response.difference.is_zero());
                assert!(response.settlement.is_some());
            }
            other => panic!("expected payment output, got {:?}", other),
        }

        match execute(&state, SessionCommand::Receipt) {
            CommandOutput::Receipt { settlement } => {
                assert_eq!(settlement.unwrap().lines.len(), 2)
            }
            other => panic!("expected receipt output, got {:?}", other),
        }
    }

    #[test]
    fn test_output_json_is_tagged() {
        let output = CommandOutput::Balance {
            balance: Money::from_cents(300),
        };
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["kind"], "balance");
        assert_eq!(json["balance"], 300);
    }
}
