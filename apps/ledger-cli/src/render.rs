//! # Output Rendering
//!
//! Turns a [`CommandOutput`] into text or JSON.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CommandOutput::Total { total: 500 }                                    │
//! │                                                                         │
//! │     text ──► "total: $5.00"                                             │
//! │     json ──► {"kind":"total","total":500}                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! JSON amounts stay in integer cents; only text output formats money.

use std::io::Write;

use ledger_core::{CartLine, Money, PaymentStatus, Settlement};
use serde::Serialize;

use crate::commands::cart::CartResponse;
use crate::commands::catalog::CatalogResponse;
use crate::commands::payment::PaymentResponse;
use crate::commands::CommandOutput;
use crate::error::CliError;
use crate::state::{AppConfig, OutputFormat};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderer {
    format: OutputFormat,
    currency_symbol: String,
    store_name: String,
}

/// JSON shape of a session-line error.
#[derive(Serialize)]
struct LineError<'a> {
    line: usize,
    error: &'a CliError,
}

impl Renderer {
    pub fn new(
        format: OutputFormat,
        currency_symbol: impl Into<String>,
        store_name: impl Into<String>,
    ) -> Self {
        Renderer {
            format,
            currency_symbol: currency_symbol.into(),
            store_name: store_name.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Renderer::new(
            config.output.format,
            config.store.currency_symbol.clone(),
            config.store.name.clone(),
        )
    }

    /// Writes one command result.
    pub fn write_output<W: Write + ?Sized>(
        &self,
        out: &mut W,
        output: &CommandOutput,
    ) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, output)?;
                writeln!(out)?;
            }
            OutputFormat::Text => {
                for line in self.text_lines(output) {
                    writeln!(out, "{}", line)?;
                }
            }
        }
        Ok(())
    }

    /// Writes an error for script line `line` (1-based).
    pub fn write_error<W: Write + ?Sized>(
        &self,
        err: &mut W,
        line: usize,
        error: &CliError,
    ) -> Result<(), CliError> {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_writer(&mut *err, &LineError { line, error })?;
                writeln!(err)?;
            }
            OutputFormat::Text => writeln!(err, "line {}: {}", line, error)?,
        }
        Ok(())
    }

    // =========================================================================
    // Text Layout
    // =========================================================================

    fn money(&self, amount: Money) -> String {
        amount.format_with(&self.currency_symbol)
    }

    fn text_lines(&self, output: &CommandOutput) -> Vec<String> {
        match output {
            CommandOutput::Catalog(catalog) => self.catalog_lines(catalog),
            CommandOutput::Cart(cart) => self.cart_lines(cart),
            CommandOutput::Total { total } => vec![format!("total: {}", self.money(*total))],
            CommandOutput::Payment(payment) => vec![self.payment_line(payment)],
            CommandOutput::Balance { balance } => {
                vec![format!("balance: {}", self.money(*balance))]
            }
            CommandOutput::Receipt { settlement: None } => vec!["no settlement yet".to_string()],
            CommandOutput::Receipt {
                settlement: Some(settlement),
            } => self.receipt_lines(settlement),
            CommandOutput::Help { commands } => commands.clone(),
        }
    }

    fn catalog_lines(&self, catalog: &CatalogResponse) -> Vec<String> {
        if catalog.products.is_empty() {
            return vec!["catalog is empty".to_string()];
        }

        catalog
            .products
            .iter()
            .map(|item| {
                let mut line = format!(
                    "{:>4}  {:<20} {:>10}  in cart: {}",
                    item.product.id,
                    item.product.name,
                    self.money(item.product.unit_price),
                    item.quantity_in_cart
                );
                if !item.product.image_ref.is_empty() {
                    line.push_str("  ");
                    line.push_str(&item.product.image_ref);
                }
                line
            })
            .collect()
    }

    fn cart_line(&self, line: &CartLine) -> String {
        format!(
            "{:>4}  {:<20} {:>3} x {:>8} = {:>10}",
            line.product_id,
            line.name,
            line.quantity,
            self.money(line.unit_price),
            self.money(line.line_total)
        )
    }

    fn cart_lines(&self, cart: &CartResponse) -> Vec<String> {
        let mut lines = if cart.lines.is_empty() {
            vec!["cart is empty".to_string()]
        } else {
            cart.lines.iter().map(|l| self.cart_line(l)).collect()
        };

        let totals = &cart.totals;
        lines.push(format!(
            "items: {}  quantity: {}  total: {}  balance: {}",
            totals.item_count,
            totals.total_quantity,
            self.money(totals.total),
            self.money(totals.balance)
        ));
        lines
    }

    fn payment_line(&self, payment: &PaymentResponse) -> String {
        let outcome = match payment.payment {
            PaymentStatus::Outstanding { owed } => {
                format!("owed {} (balance {})", self.money(owed), self.money(payment.balance))
            }
            PaymentStatus::Exact => "settled exactly".to_string(),
            PaymentStatus::ChangeDue { change } => {
                format!("settled, change due {}", self.money(change))
            }
        };
        format!("paid {}: {}", self.money(payment.tendered), outcome)
    }

    fn receipt_lines(&self, settlement: &Settlement) -> Vec<String> {
        let mut lines = vec![
            format!("{} receipt {}", self.store_name, settlement.id),
            format!("settled at {}", settlement.settled_at.to_rfc3339()),
        ];
        lines.extend(settlement.lines.iter().map(|l| self.cart_line(l)));
        lines.push(format!("total: {}", self.money(settlement.total)));
        lines.push(format!("tendered: {}", self.money(settlement.tendered)));
        lines.push(format!("change: {}", self.money(settlement.change)));
        lines
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::from_config(&AppConfig::default())
    }
}
