use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};
use thiserror::Error;
use validator::{Validate, ValidationError};

/// Catalog identifier, stable for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    #[error("Price must not be negative: {0}")]
    Negative(f64),
    #[error("Price must be a finite number")]
    NotFinite,
}

/// Non-negative monetary amount held as whole cents so totals stay exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(u64);

impl Price {
    pub const ZERO: Price = Price(0);

    pub fn from_cents(cents: u64) -> Self {
        Price(cents)
    }

    pub fn from_decimal(amount: f64) -> Result<Self, PriceError> {
        if !amount.is_finite() {
            return Err(PriceError::NotFinite);
        }
        if amount < 0.0 {
            return Err(PriceError::Negative(amount));
        }
        Ok(Price((amount * 100.0).round() as u64))
    }

    pub fn cents(&self) -> u64 {
        self.0
    }

    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Price {
    type Output = Price;

    fn mul(self, quantity: u32) -> Price {
        Price(self.0.saturating_mul(u64::from(quantity)))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Price::from_decimal(amount).map_err(de::Error::custom)
    }
}

/// One purchasable entry of the catalog. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CatalogItem {
    pub id: ProductId,

    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    #[validate(custom = "validate_not_blank")]
    pub name: String,

    #[serde(deserialize_with = "deserialize_trimmed")]
    #[validate(custom = "validate_not_blank")]
    pub image: String,

    pub price: Price,
}

impl CatalogItem {
    pub fn new(id: u32, name: &str, image: &str, price: Price) -> Self {
        Self {
            id: ProductId(id),
            name: name.trim().to_string(),
            image: image.trim().to_string(),
            price,
        }
    }
}

fn deserialize_trimmed<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_sums_are_exact() {
        let a = Price::from_decimal(4.50).unwrap();
        let b = Price::from_decimal(3.00).unwrap();
        assert_eq!(a * 2 + b, Price::from_cents(1200));
        assert_eq!((a * 2 + b).to_string(), "$12.00");
    }

    #[test]
    fn price_rejects_negative_and_nan() {
        assert_eq!(Price::from_decimal(-1.0), Err(PriceError::Negative(-1.0)));
        assert_eq!(Price::from_decimal(f64::NAN), Err(PriceError::NotFinite));
    }

    #[test]
    fn price_deserializes_from_json_numbers() {
        let p: Price = serde_json::from_str("6.5").unwrap();
        assert_eq!(p.cents(), 650);
        let p: Price = serde_json::from_str("7").unwrap();
        assert_eq!(p.to_string(), "$7.00");
        assert!(serde_json::from_str::<Price>("-2.5").is_err());
        assert!(serde_json::from_str::<Price>("\"4.00\"").is_err());
    }

    #[test]
    fn catalog_item_validation() {
        let item = CatalogItem::new(1, "Classic Tiramisu", "images/tiramisu.jpg", Price::from_cents(550));
        assert!(item.validate().is_ok());

        let blank = CatalogItem::new(2, "   ", "images/x.jpg", Price::ZERO);
        assert!(blank.validate().is_err());

        let no_image = CatalogItem::new(3, "Baklava", "", Price::ZERO);
        assert!(no_image.validate().is_err());
    }

    #[test]
    fn deserialized_names_are_trimmed() {
        let item: CatalogItem = serde_json::from_str(
            r#"{ "id": 1, "name": "  Tiramisu  ", "image": " images/tiramisu.jpg\n", "price": 5.0 }"#,
        )
        .unwrap();
        assert_eq!(item.name, "Tiramisu");
        assert_eq!(item.image, "images/tiramisu.jpg");
    }
}
