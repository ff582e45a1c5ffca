use std::sync::Arc;

use anyhow::Result;
use serde_json::Value;
use souq_core::Intent;
use tracing::{error, warn};

use crate::backend::BackendApi;
use crate::format::{
    display_or, display_value, first_digit_run, fmt_currency, fmt_fixed, fmt_timestamp,
    sum_quantities,
};

/// Outer-tier failure reply for any backend error.
pub const GENERIC_FAILURE_REPLY: &str = "Couldn't fetch data from backend.";
/// Intent-local failure reply for the category branch; takes precedence over
/// the generic one.
pub const CATEGORY_FAILURE_REPLY: &str = "Sorry, I couldn't fetch the categories at the moment.";

const PAYMENT_REPLY: &str = "We accept Credit/Debit Card, PayPal, and Cash on Delivery.";
const COVERAGE_REPLY: &str = "We deliver to Amman, Zarqa, Irbid, Aqaba, Mafraq, Balqa, Madaba, \
                              Karak, Tafilah, Ma'an, Jerash, Ajloun.";

/// Stateless per-message intent resolver.
///
/// Holds only the backend handle and the frontend origin used in navigation
/// replies; nothing is retained between invocations, so repeated calls with
/// the same inputs issue the same downstream request.
pub struct IntentResolver {
    backend: Arc<dyn BackendApi>,
    frontend_base_url: String,
}

impl IntentResolver {
    pub fn new(backend: Arc<dyn BackendApi>, frontend_base_url: impl Into<String>) -> Self {
        Self { backend, frontend_base_url: frontend_base_url.into() }
    }

    /// Resolve one chat message. Never errors: backend failures collapse into
    /// a fixed reply, and unknown intents produce the empty string so the
    /// caller can fall back to a generic answer.
    pub async fn resolve(&self, intent: &str, message: &str, token: Option<&str>) -> String {
        let Some(intent) = Intent::parse(intent) else {
            return String::new();
        };

        if let Some(reply) = self.navigation_reply(intent) {
            return reply;
        }

        match intent {
            Intent::Payment => return PAYMENT_REPLY.to_string(),
            Intent::Coverage => return COVERAGE_REPLY.to_string(),
            // The category branch maps its own failures before the outer tier
            // can see them, so its reply path is infallible.
            Intent::Category => return self.categories(token).await,
            _ => {}
        }

        match self.fetch_reply(intent, message, token).await {
            Ok(reply) => reply,
            Err(fetch_error) => {
                error!(
                    intent = intent.as_str(),
                    error = %fetch_error,
                    "intent resolution failed against backend"
                );
                GENERIC_FAILURE_REPLY.to_string()
            }
        }
    }

    fn navigation_reply(&self, intent: Intent) -> Option<String> {
        let path = intent.navigation_path()?;
        let lead = match intent {
            Intent::GoToOrders => "Sure! You can view all your orders here:",
            Intent::GoToCart => {
                "Here's your shopping cart - review your items or proceed to checkout:"
            }
            Intent::GoToProducts => "Explore all available products here:",
            Intent::GoToVendors => "Browse and discover trusted vendors here:",
            Intent::GoToSettings => "Manage your account settings here:",
            Intent::GoToProfile => "View and edit your personal profile here:",
            Intent::GoToHome => "Welcome home! Visit your main dashboard here:",
            Intent::GoToWishlist => "Check out your saved products in your wishlist here:",
            _ => return None,
        };
        Some(format!("{lead}\n{}{path}", self.frontend_base_url))
    }

    async fn fetch_reply(
        &self,
        intent: Intent,
        message: &str,
        token: Option<&str>,
    ) -> Result<String> {
        match intent {
            Intent::Orders => self.orders(token).await,
            Intent::OrderDetails => self.order_details(message, token).await,
            Intent::TrackOrder => self.track_order(message, token).await,
            Intent::Wishlist => self.wishlist(token).await,
            Intent::Cart => self.cart_list(token).await,
            Intent::CartDetails => self.cart_details(message, token).await,
            Intent::Vendors => self.vendors(token).await,
            // Static, navigation, and category intents are answered in
            // `resolve` before dispatch reaches here.
            _ => Ok(String::new()),
        }
    }

    async fn orders(&self, token: Option<&str>) -> Result<String> {
        let body = self.backend.get_json("/api/customers/orders", token).await?;
        let orders = body.as_array().cloned().unwrap_or_default();
        if orders.is_empty() {
            return Ok("You have no orders yet.".to_string());
        }

        let lines: Vec<String> = orders.iter().map(order_summary_line).collect();
        Ok(lines.join("\n"))
    }

    async fn order_details(&self, message: &str, token: Option<&str>) -> Result<String> {
        let Some(order_id) = first_digit_run(message) else {
            return Ok("Please provide the order number.".to_string());
        };

        let body =
            self.backend.get_json(&format!("/api/customers/orders/{order_id}"), token).await?;
        let Some(order) = body.get("data").filter(|value| !value.is_null()) else {
            return Ok(format!("Order #{order_id} not found."));
        };

        let id = order
            .get("order_id")
            .or_else(|| order.get("id"))
            .filter(|value| !value.is_null())
            .map(display_value)
            .unwrap_or_else(|| order_id.clone());
        let payment_status = display_or(order.get("payment_status"), "unknown");
        let total = fmt_currency(order.get("total_amount"));
        let address = display_or(order.get("shipping_address"), "N/A");
        let created = fmt_timestamp(order.get("created_at"));
        let updated = fmt_timestamp(order.get("updated_at"));

        let items = order.get("items").and_then(Value::as_array).cloned().unwrap_or_default();
        let items_count = sum_quantities(&items);
        let item_lines: Vec<String> = items
            .iter()
            .enumerate()
            .map(|(index, item)| order_item_line(index, item))
            .collect();

        let payments =
            order.get("payments").and_then(Value::as_array).cloned().unwrap_or_default();
        let payments_block = if payments.is_empty() {
            "- No payments recorded".to_string()
        } else {
            payments.iter().map(payment_line).collect::<Vec<_>>().join("\n")
        };

        let mut sections = vec![
            format!("Order #{id}"),
            format!("Payment Status: {payment_status}"),
            format!("Total: {total}"),
            format!("Items: {items_count}"),
            format!("Created: {created}"),
            format!("Updated: {updated}"),
            format!("Shipping: {address}"),
        ];
        if !item_lines.is_empty() {
            sections.push(format!("\nItems:\n{}", item_lines.join("\n")));
        }
        sections.push(format!("\nPayments:\n{payments_block}"));

        Ok(sections.join("\n"))
    }

    async fn track_order(&self, message: &str, token: Option<&str>) -> Result<String> {
        let Some(order_id) = first_digit_run(message) else {
            return Ok("Please provide the order number.".to_string());
        };

        let body = self
            .backend
            .get_json(&format!("/api/customers/orders/{order_id}/track"), token)
            .await?;

        // Tracking responses come in two shapes: `{data: {status}}` and a
        // flat `{status}`. Neither key present means the order is unknown.
        let wrapped = body.get("data").filter(|value| !value.is_null());
        let flat = body.get("status").filter(|value| !value.is_null());
        if wrapped.is_none() && flat.is_none() {
            return Ok(format!("Order #{order_id} not found."));
        }

        let status = wrapped
            .and_then(|data| data.get("status"))
            .filter(|value| !value.is_null())
            .or(flat)
            .map(display_value)
            .unwrap_or_else(|| "unknown".to_string());

        Ok(format!("Order #{order_id} - Status: {status}"))
    }

    async fn wishlist(&self, token: Option<&str>) -> Result<String> {
        let body = self.backend.get_json("/api/customers/wishlist", token).await?;
        let products = body.as_array().cloned().unwrap_or_default();
        if products.is_empty() {
            return Ok("Your wishlist is empty.".to_string());
        }

        let lines: Vec<String> = products
            .iter()
            .map(|product| {
                format!(
                    "{} - ${}",
                    display_or(product.get("name"), "N/A"),
                    display_or(product.get("price"), "N/A")
                )
            })
            .collect();
        Ok(lines.join("\n"))
    }

    async fn cart_list(&self, token: Option<&str>) -> Result<String> {
        let body = self.backend.get_json("/api/customers/cart", token).await?;
        let carts = body.as_array().cloned().unwrap_or_default();
        if carts.is_empty() {
            return Ok("You have no carts.".to_string());
        }

        let lines: Vec<String> = carts
            .iter()
            .map(|cart| {
                let id = display_or(cart.get("id"), "N/A");
                let items = cart.get("items").and_then(Value::as_array).cloned().unwrap_or_default();
                let count = sum_quantities(&items);
                let total: f64 = items
                    .iter()
                    .map(|item| {
                        let price = item.get("price").and_then(Value::as_f64).unwrap_or(0.0);
                        let quantity = item.get("quantity").and_then(Value::as_f64).unwrap_or(0.0);
                        price * quantity
                    })
                    .sum();
                format!("Cart #{id}: {count} items - Total: ${total:.2}")
            })
            .collect();
        Ok(lines.join("\n"))
    }

    async fn cart_details(&self, message: &str, token: Option<&str>) -> Result<String> {
        let Some(cart_id) = first_digit_run(message) else {
            return Ok("Please provide the cart ID.".to_string());
        };

        let body = self.backend.get_json(&format!("/api/customers/cart/{cart_id}"), token).await?;
        let items = body.get("items").and_then(Value::as_array).cloned().unwrap_or_default();
        if items.is_empty() {
            return Ok(format!("Cart #{cart_id} is empty."));
        }

        let lines: Vec<String> = items
            .iter()
            .map(|item| {
                format!(
                    "{} - ${} × {}",
                    display_or(item.get("name"), "N/A"),
                    display_or(item.get("price"), "N/A"),
                    display_or(item.get("quantity"), "0")
                )
            })
            .collect();
        Ok(lines.join("\n"))
    }

    async fn categories(&self, token: Option<&str>) -> String {
        let body = match self.backend.get_json("/api/categories", token).await {
            Ok(body) => body,
            Err(fetch_error) => {
                warn!(error = %fetch_error, "category fetch failed");
                return CATEGORY_FAILURE_REPLY.to_string();
            }
        };

        // Categories arrive either wrapped under `data` or as a bare array.
        let unwrapped = body.get("data").filter(|value| !value.is_null()).unwrap_or(&body);
        let categories = match unwrapped.as_array().filter(|entries| !entries.is_empty()) {
            Some(entries) => entries,
            None => return "There are no categories available right now.".to_string(),
        };

        let formatted: Vec<String> = categories
            .iter()
            .enumerate()
            .map(|(index, category)| {
                let name = display_or(category.get("name"), "N/A");
                match category
                    .get("description")
                    .filter(|value| !value.is_null())
                    .map(display_value)
                    .filter(|text| !text.is_empty())
                {
                    Some(description) => format!("{}. {name} - {description}", index + 1),
                    None => format!("{}. {name}", index + 1),
                }
            })
            .collect();

        format!(
            "Available Categories:\n{}\n\nYou can mention any category name to explore its products.",
            formatted.join("\n")
        )
    }

    async fn vendors(&self, token: Option<&str>) -> Result<String> {
        let body = self.backend.get_json("/api/vendor/stores", token).await?;
        let vendors =
            body.get("data").and_then(Value::as_array).cloned().unwrap_or_default();
        if vendors.is_empty() {
            return Ok("No approved vendors found.".to_string());
        }

        let lines: Vec<String> = vendors
            .iter()
            .enumerate()
            .map(|(index, vendor)| {
                format!(
                    "{}. {} (ID: {}) - Contact: {}",
                    index + 1,
                    display_or(vendor.get("store_name"), "N/A"),
                    display_or(vendor.get("id"), "N/A"),
                    display_or(vendor.get("contact_email"), "N/A")
                )
            })
            .collect();
        Ok(lines.join("\n"))
    }
}

fn order_summary_line(order: &Value) -> String {
    let id = display_or(order.get("id"), "N/A");
    let status = display_or(order.get("status"), "unknown");
    let total = fmt_fixed(order.get("total_amount"));
    let items = order.get("items").and_then(Value::as_array).cloned().unwrap_or_default();
    let count = sum_quantities(&items);
    let created = fmt_timestamp(order.get("created_at"));
    format!("#{id} | status: {status} | total: {total} | items: {count} | ordered at: {created}")
}

fn order_item_line(index: usize, item: &Value) -> String {
    let name = item
        .get("product_name")
        .or_else(|| item.get("name"))
        .filter(|value| !value.is_null())
        .map(display_value)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| format!("Item {}", index + 1));
    let price = fmt_currency(item.get("price"));
    let quantity_display = display_or(item.get("quantity"), "0");
    let variant = item
        .get("variant")
        .filter(|value| !value.is_null())
        .map(display_value)
        .filter(|text| !text.is_empty())
        .map(|text| format!(" [{text}]"))
        .unwrap_or_default();

    // A computed line total only appears when both price and quantity are
    // numeric (an absent quantity counts as numeric zero).
    let price_amount = item.get("price").and_then(Value::as_f64);
    let quantity_amount = match item.get("quantity") {
        None | Some(Value::Null) => Some(0.0),
        Some(value) => value.as_f64(),
    };
    let line_total = match (price_amount, quantity_amount) {
        (Some(price), Some(quantity)) => {
            format!(" = {}", fmt_currency(Some(&Value::from(price * quantity))))
        }
        _ => String::new(),
    };

    format!("- {name}{variant}: {price} × {quantity_display}{line_total}")
}

fn payment_line(payment: &Value) -> String {
    let method = display_or(payment.get("payment_method"), "N/A");
    let amount = fmt_currency(payment.get("amount"));
    let status = display_or(payment.get("status"), "N/A");
    let transaction = payment
        .get("transaction_id")
        .filter(|value| !value.is_null())
        .map(display_value)
        .filter(|text| !text.is_empty())
        .map(|text| format!(" (TX: {text})"))
        .unwrap_or_default();
    let when = fmt_timestamp(payment.get("created_at"));
    format!("- {method}: {amount} - {status}{transaction} on {when}")
}
