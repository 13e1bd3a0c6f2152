//! Query command - look up an order

use anyhow::{Context, Result};
use xpay_lib::models::QueryRequest;
use xpay_lib::XpayClient;

use crate::commands::print_order;
use crate::ui;

pub async fn run(client: &XpayClient, trade_no: &str, verbose: bool) -> Result<()> {
    ui::header(&format!("Order {}", trade_no));

    let spinner = ui::spinner("Querying gateway...");
    let result = client.query(&QueryRequest::new(trade_no)).await;
    spinner.finish_and_clear();

    let order = result.with_context(|| format!("Query for {} failed", trade_no))?;
    print_order(&order);

    if verbose {
        ui::separator();
        ui::json(&serde_json::to_value(&order)?);
    }

    Ok(())
}
