//! Service catalog - the static reference data the wizard books against.
//!
//! Categories come from a fixed set of ids, each carrying an ordered list of
//! sub-services with a price in whole currency units. The catalog is read-only
//! once loaded; lookups that miss return `None` and callers decide how to
//! degrade.

use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// The fixed set of service category ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    /// Cleaning, plumbing, electrical and other in-home work
    Home,
    /// Repair of large household appliances
    Appliance,
    /// Repair of phones, laptops and other personal electronics
    Gadget,
}

impl ServiceCategory {
    /// All category ids in display order.
    pub const ALL: [Self; 3] = [Self::Home, Self::Appliance, Self::Gadget];

    /// The wire/storage id of this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Appliance => "appliance",
            Self::Gadget => "gadget",
        }
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ServiceCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| Error::Config {
                message: format!("Unknown service category: {s}"),
            })
    }
}

/// A bookable service within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubService {
    /// Identifier, unique within its category
    pub id: String,
    /// Display name, denormalized onto bookings as `serviceName`
    pub name: String,
    /// Short description shown on the selection card
    pub description: String,
    /// Price in whole currency units
    pub price: u32,
    /// Icon name for the presentation layer
    pub icon: String,
}

/// A service category and its sub-services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCategoryData {
    pub id: ServiceCategory,
    pub name: String,
    pub icon: String,
    pub description: String,
    pub sub_services: Vec<SubService>,
}

/// Ordered, read-only collection of service categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub categories: Vec<ServiceCategoryData>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate category ids and duplicate
    /// sub-service ids within a category.
    pub fn new(categories: Vec<ServiceCategoryData>) -> Result<Self> {
        let mut seen_categories = HashSet::new();
        for category in &categories {
            if !seen_categories.insert(category.id) {
                return Err(Error::Config {
                    message: format!("Duplicate service category: {}", category.id),
                });
            }

            let mut seen_services = HashSet::new();
            for service in &category.sub_services {
                if !seen_services.insert(service.id.as_str()) {
                    return Err(Error::Config {
                        message: format!(
                            "Duplicate sub-service '{}' in category {}",
                            service.id, category.id
                        ),
                    });
                }
            }
        }

        Ok(Self { categories })
    }

    /// Finds a category by id.
    #[must_use]
    pub fn category(&self, id: ServiceCategory) -> Option<&ServiceCategoryData> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Finds a sub-service by id within the given category.
    #[must_use]
    pub fn sub_service(&self, category: ServiceCategory, sub_service_id: &str) -> Option<&SubService> {
        self.category(category)?
            .sub_services
            .iter()
            .find(|service| service.id == sub_service_id)
    }

    /// Categories whose name, or any of whose sub-service names, contains
    /// `term` (case-insensitive). An empty term matches everything.
    #[must_use]
    pub fn search(&self, term: &str) -> Vec<&ServiceCategoryData> {
        let needle = term.trim().to_lowercase();
        self.categories
            .iter()
            .filter(|category| {
                needle.is_empty()
                    || category.name.to_lowercase().contains(&needle)
                    || category
                        .sub_services
                        .iter()
                        .any(|service| service.name.to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// The catalog shipped with the application, used when no catalog file
    /// is configured.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            categories: vec![
                category(
                    ServiceCategory::Home,
                    "Home Services",
                    "home",
                    "Professional help for every corner of your home",
                    vec![
                        service("house-cleaning", "House Cleaning", "Complete deep cleaning of rooms, kitchen and bathrooms", 299, "broom"),
                        service("plumbing", "Plumbing", "Leak fixes, tap and pipe installation", 199, "wrench"),
                        service("electrical", "Electrical Work", "Wiring, switchboards and fixture installation", 249, "bolt"),
                        service("pest-control", "Pest Control", "Safe treatment for cockroaches, termites and more", 599, "bug"),
                        service("painting", "Painting", "Interior and exterior wall painting", 999, "paint-roller"),
                    ],
                ),
                category(
                    ServiceCategory::Appliance,
                    "Appliance Repair",
                    "tools",
                    "Expert repair for your household appliances",
                    vec![
                        service("ac-repair", "AC Repair & Service", "Gas refill, cleaning and cooling issues", 399, "snowflake"),
                        service("washing-machine", "Washing Machine Repair", "Drum, motor and drainage problems", 349, "tshirt"),
                        service("refrigerator", "Refrigerator Repair", "Cooling, compressor and door seal fixes", 449, "temperature-low"),
                        service("microwave", "Microwave Repair", "Heating, turntable and panel issues", 199, "fire"),
                    ],
                ),
                category(
                    ServiceCategory::Gadget,
                    "Gadget Repair",
                    "mobile",
                    "Quick fixes for phones, laptops and wearables",
                    vec![
                        service("mobile-repair", "Mobile Repair", "Screen, battery and charging port replacement", 299, "mobile-alt"),
                        service("laptop-repair", "Laptop Repair", "Hardware diagnostics, keyboard and screen repair", 499, "laptop"),
                        service("tablet-repair", "Tablet Repair", "Display, battery and software issues", 399, "tablet-alt"),
                        service("smartwatch-repair", "Smartwatch Repair", "Strap, screen and battery service", 249, "clock"),
                    ],
                ),
            ],
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn category(
    id: ServiceCategory,
    name: &str,
    icon: &str,
    description: &str,
    sub_services: Vec<SubService>,
) -> ServiceCategoryData {
    ServiceCategoryData {
        id,
        name: name.to_string(),
        icon: icon.to_string(),
        description: description.to_string(),
        sub_services,
    }
}

fn service(id: &str, name: &str, description: &str, price: u32, icon: &str) -> SubService {
    SubService {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        price,
        icon: icon.to_string(),
    }
}
