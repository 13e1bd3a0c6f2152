//! CLI command implementations

pub mod inspect;
pub mod listen;
pub mod qr_pay;
pub mod query;

use xpay_lib::models::OrderItem;

use crate::ui;

/// Print the fields of an order worth looking at
pub fn print_order(order: &OrderItem) {
    let kind = if order.is_refund() { "refund" } else { "payment" };
    let status = if order.is_completed() {
        "completed"
    } else {
        "pending"
    };

    ui::key_value("Order", &order.order_no);
    ui::key_value("Trade", &order.out_trade_no);
    ui::key_value("Type", kind);
    ui::key_value("Status", status);
    ui::key_value("Amount", &ui::amount(order.total_amount, ""));
    ui::key_value("Product", order.product_code.as_str());
    ui::key_value("Created", &ui::timestamp(order.created_at));
    ui::key_value("Finished", &ui::timestamp(order.finish_time));
    if !order.channel_order_no.is_empty() {
        ui::key_value("Channel order", &order.channel_order_no);
    }
    if !order.business_params.is_empty() {
        ui::key_value("Business params", &order.business_params);
    }
    if !order.source_order_no.is_empty() {
        ui::key_value("Refund of", &order.source_order_no);
    }
}
