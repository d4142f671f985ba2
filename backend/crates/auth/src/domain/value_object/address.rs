//! Address Value Object
//!
//! Shipping address embedded in the user document and copied into orders.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub pin_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_camel_case() {
        let json = serde_json::json!({
            "name": "Asha",
            "email": "asha@example.com",
            "phone": "9876543210",
            "street": "12 MG Road",
            "city": "Pune",
            "state": "MH",
            "pinCode": "411001"
        });
        let address: Address = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(address.pin_code, "411001");
        assert_eq!(serde_json::to_value(&address).unwrap(), json);
    }

    #[test]
    fn test_address_missing_fields_default() {
        let address: Address = serde_json::from_str(r#"{"city":"Pune"}"#).unwrap();
        assert_eq!(address.city, "Pune");
        assert!(address.street.is_empty());
    }
}
