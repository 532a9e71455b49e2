//! Address domain entity

/// A stored service address. Entrance, floor and apartment are optional;
/// the intake flow maps its "-" sentinel to `None` before they get here.
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub id: i32,
    pub user_id: i32,
    pub city: String,
    pub street: String,
    pub house: String,
    pub entrance: Option<String>,
    pub floor: Option<String>,
    pub apartment: Option<String>,
}

impl Address {
    /// One-line summary used in prompts and receipts:
    /// "city, street, house[, apt. N]".
    pub fn summary(&self) -> String {
        let mut s = format!("{}, {}, {}", self.city, self.street, self.house);
        if let Some(apartment) = &self.apartment {
            s.push_str(&format!(", apt. {}", apartment));
        }
        s
    }
}

/// Fields for creating an address; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAddress {
    pub user_id: i32,
    pub city: String,
    pub street: String,
    pub house: String,
    pub entrance: Option<String>,
    pub floor: Option<String>,
    pub apartment: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_with_and_without_apartment() {
        let mut addr = Address {
            id: 1,
            user_id: 1,
            city: "Kyiv".into(),
            street: "Khreshchatyk".into(),
            house: "12".into(),
            entrance: None,
            floor: None,
            apartment: Some("7".into()),
        };
        assert_eq!(addr.summary(), "Kyiv, Khreshchatyk, 12, apt. 7");
        addr.apartment = None;
        assert_eq!(addr.summary(), "Kyiv, Khreshchatyk, 12");
    }
}
