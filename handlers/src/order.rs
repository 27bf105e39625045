use domains::{ Order, OrderResult, ValidationError };
use log::info;
use publisher::Publish;

/// Accept an order and hand it to the publisher exactly once.
///
/// Only missing identifiers make this fail. Whatever state the broker is
/// in, a well formed order is accepted and the result says how it was
/// delivered.
pub async fn submit_order<P>(
    publisher: &P,
    product_id: Option<String>,
    user_id: Option<String>
) -> Result<OrderResult, ValidationError>
where
    P: Publish + ?Sized
{

    let order = Order::new(product_id, user_id)?;

    let delivery_mode = publisher.attempt_publish(&order).await;

    info!(
        target: "orders",
        "Accepted order {} for product {} from user {} ({}).",
        order.id(),
        order.product_id(),
        order.user_id(),
        delivery_mode
    );

    Ok(OrderResult { order, delivery_mode })

}
