use serde_derive::Serialize;
use serde::de::Error;
use serde::*;
use serde_json::{ Map, Value };

/// The body of the POST request handled by the /orders endpoint. Both
/// fields are optional here so that a missing one is reported as a
/// validation error rather than a malformed body.
#[derive(Debug, Serialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all="camelCase")]
pub struct OrderRequest {

    /// The catalog entry being ordered.
    pub product_id: Option<String>,

    /// The user placing the order.
    pub user_id: Option<String>,

}

/// Only a json object is an order. Reading the body as a map first stops
/// serde from matching array elements to fields by position.
impl<'de> Deserialize<'de> for OrderRequest {

    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<OrderRequest, D::Error> {

        let mut fields = Map::<String, Value>::deserialize(d)?;

        Ok(OrderRequest {
            product_id: opaque_id::<D::Error>(fields.remove("productId"))?,
            user_id: opaque_id::<D::Error>(fields.remove("userId"))?,
        })

    }

}


/// Identifiers are opaque. Accept them as strings or numbers, numbers are
/// kept as their decimal text.
fn opaque_id<E: Error>(value: Option<Value>) -> Result<Option<String>, E> {

    match value {

        None | Some(Value::Null) => Ok(None),
        Some(Value::String(id)) => Ok(Some(id)),
        Some(Value::Number(id)) => Ok(Some(id.to_string())),
        Some(_) => Err(E::custom("an identifier must be a string or a number")),

    }

}
