//! Pricing

use std::fmt::{self, Display, Formatter};

/// Fixed rupee prices keyed by `(service type, car size)`.
const PRICE_TABLE: &[(&str, &str, u32)] = &[
    ("Normal Wash", "Big", 800),
    ("Normal Wash", "Hatchback", 700),
    ("Normal Wash", "Small", 600),
    ("Body Wash", "Big", 700),
    ("Body Wash", "Hatchback", 600),
    ("Body Wash", "Small", 500),
];

/// A service price quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    /// A fixed price in whole rupees.
    Fixed(u32),

    /// The combination has no listed price.
    ContactForPricing,
}

impl Quote {
    /// Build a quote from a stored nullable price column.
    pub fn from_stored(price: Option<u32>) -> Self {
        price.map_or(Self::ContactForPricing, Self::Fixed)
    }

    /// The fixed price, if there is one.
    pub fn rupees(self) -> Option<u32> {
        match self {
            Self::Fixed(rupees) => Some(rupees),
            Self::ContactForPricing => None,
        }
    }

    /// The price after a flat discount, never going below zero.
    ///
    /// A contact-for-pricing quote stays as it is; the discount is still
    /// recorded on the booking and settled by staff.
    #[must_use]
    pub fn after_discount(self, discount: u32) -> Self {
        match self {
            Self::Fixed(rupees) => Self::Fixed(rupees.saturating_sub(discount)),
            Self::ContactForPricing => Self::ContactForPricing,
        }
    }
}

impl Display for Quote {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(rupees) => write!(f, "₹{rupees}"),
            Self::ContactForPricing => f.write_str("Contact for pricing"),
        }
    }
}

/// Look up the listed price for a service and car size.
///
/// Matching is exact on both keys.
pub fn quote(service_type: &str, car_size: &str) -> Quote {
    PRICE_TABLE
        .iter()
        .find(|(service, size, _)| *service == service_type && *size == car_size)
        .map_or(Quote::ContactForPricing, |(_, _, rupees)| {
            Quote::Fixed(*rupees)
        })
}

/// Service types with listed prices, in table order.
pub fn service_types() -> Vec<&'static str> {
    let mut services: Vec<&'static str> = Vec::new();

    for (service, _, _) in PRICE_TABLE {
        if !services.contains(service) {
            services.push(*service);
        }
    }

    services
}

/// Car sizes with listed prices, in table order.
pub fn car_sizes() -> Vec<&'static str> {
    let mut sizes: Vec<&'static str> = Vec::new();

    for (_, size, _) in PRICE_TABLE {
        if !sizes.contains(size) {
            sizes.push(*size);
        }
    }

    sizes
}
