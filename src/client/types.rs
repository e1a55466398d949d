//! Wire payloads sent to the order tracking API.

use serde::Serialize;

/// Credentials for `POST /api/auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Account registration for `POST /api/auth/register` (admin-only)
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: String,
    pub company_name: String,
}

/// Order payload for `POST /api/orders`
#[derive(Debug, Clone, Serialize)]
pub struct OrderCreate {
    pub order_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub delivery_area: String,
    pub delivery_cost: f64,
    pub status: String,
    pub order_date: String,
    pub notes: String,
}

/// Partial update for `PUT /api/orders/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct OrderUpdate {
    pub status: String,
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_payload_uses_wire_field_names() {
        let order = OrderCreate {
            order_number: "ORD-1".to_string(),
            customer_name: "أحمد محمد".to_string(),
            customer_phone: "0599123456".to_string(),
            delivery_area: "رام الله".to_string(),
            delivery_cost: 15.5,
            status: "جاري".to_string(),
            order_date: "2025-01-15".to_string(),
            notes: "".to_string(),
        };

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["order_number"], "ORD-1");
        assert_eq!(value["delivery_cost"], 15.5);
        assert!(value.get("customer_phone").is_some());
    }
}
