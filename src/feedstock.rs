// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Feedstock properties, and the catalog that the metrics engine reads them
//! from.

use std::collections::HashMap;
use std::fmt::Display;

use crate::Error;

/// How much nitrogen a feedstock contributes to its digestate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum NitrogenPotential {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl NitrogenPotential {
    /// Returns true for `High` and `VeryHigh`.
    pub fn is_high(&self) -> bool {
        matches!(self, NitrogenPotential::High | NitrogenPotential::VeryHigh)
    }
}

impl Display for NitrogenPotential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NitrogenPotential::Low => write!(f, "Low"),
            NitrogenPotential::Medium => write!(f, "Medium"),
            NitrogenPotential::High => write!(f, "High"),
            NitrogenPotential::VeryHigh => write!(f, "Very High"),
        }
    }
}

/// The properties of a single feedstock.
#[derive(Clone, Debug, PartialEq)]
pub struct FeedstockProfile {
    /// Unique key of the feedstock.
    pub id: String,
    /// Display name.
    pub name: String,
    /// m³ of biogas per tonne, at 10% dry matter.
    pub biogas_yield_10dm: f64,
    /// Methane percentage of the biogas, before process modifiers.
    pub methane_base_percent: f64,
    /// Lower end of the plausible dry matter range, in percent.
    pub dm_min: f64,
    /// Upper end of the plausible dry matter range, in percent.
    pub dm_max: f64,
    pub nitrogen_potential: NitrogenPotential,
}

impl FeedstockProfile {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        biogas_yield_10dm: f64,
        methane_base_percent: f64,
        (dm_min, dm_max): (f64, f64),
        nitrogen_potential: NitrogenPotential,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            biogas_yield_10dm,
            methane_base_percent,
            dm_min,
            dm_max,
            nitrogen_potential,
        }
    }
}

/// An ordered, immutable table of [`FeedstockProfile`]s, addressable by id.
#[derive(Clone, Debug)]
pub struct FeedstockCatalog {
    profiles: Vec<FeedstockProfile>,
    indices: HashMap<String, usize>,
}

impl FeedstockCatalog {
    /// Creates a new catalog from the given profiles.
    ///
    /// Returns an error if an id is empty or repeated, or if a profile's dry
    /// matter range is inverted.
    pub fn try_new(
        profiles: impl IntoIterator<Item = FeedstockProfile>,
    ) -> Result<Self, Error> {
        let mut catalog = Self {
            profiles: Vec::new(),
            indices: HashMap::new(),
        };

        for profile in profiles {
            if profile.id.is_empty() {
                return Err(Error::invalid_catalog(format!(
                    "Feedstock with empty id found: {}",
                    profile.name
                )));
            }
            if catalog.indices.contains_key(&profile.id) {
                return Err(Error::invalid_catalog(format!(
                    "Duplicate feedstock id found: {}",
                    profile.id
                )));
            }
            if profile.dm_min > profile.dm_max {
                return Err(Error::invalid_catalog(format!(
                    "Invalid dry matter range for feedstock {}: {} > {}",
                    profile.id, profile.dm_min, profile.dm_max
                )));
            }

            catalog
                .indices
                .insert(profile.id.clone(), catalog.profiles.len());
            catalog.profiles.push(profile);
        }

        Ok(catalog)
    }

    /// The catalog of feedstocks that ships with the simulator.
    pub fn builtin() -> Self {
        use NitrogenPotential::*;

        let profiles = vec![
            FeedstockProfile::new("manure", "Cow Manure", 180.0, 54.0, (20.0, 25.0), Medium),
            FeedstockProfile::new("slurry", "Dairy Slurry", 160.0, 52.0, (4.0, 8.0), Low),
            FeedstockProfile::new("crops", "Maize Silage", 200.0, 58.0, (30.0, 35.0), Medium),
            FeedstockProfile::new("food_waste", "Food Waste", 220.0, 60.0, (15.0, 25.0), High),
            FeedstockProfile::new("rye", "Wholecrop Rye", 195.0, 55.0, (30.0, 40.0), Medium),
            FeedstockProfile::new("chicken", "Chicken Manure", 170.0, 52.0, (40.0, 60.0), VeryHigh),
            FeedstockProfile::new("fruit_veg", "Fruit & Veg", 210.0, 54.0, (10.0, 15.0), Low),
            FeedstockProfile::new("brewery", "Brewery Grain", 210.0, 56.0, (20.0, 25.0), High),
            FeedstockProfile::new("commercial", "Mixed Commercial", 190.0, 55.0, (20.0, 30.0), Medium),
        ];

        let mut indices = HashMap::new();
        for (idx, profile) in profiles.iter().enumerate() {
            indices.insert(profile.id.clone(), idx);
        }
        Self { profiles, indices }
    }

    /// Returns the profile with the given `id`, if it exists.
    pub fn get(&self, id: &str) -> Option<&FeedstockProfile> {
        self.indices.get(id).map(|&idx| &self.profiles[idx])
    }

    /// Returns the profile with the given `id`, or an error if there is none.
    pub fn profile(&self, id: &str) -> Result<&FeedstockProfile, Error> {
        self.get(id).ok_or_else(|| {
            Error::feedstock_not_found(format!("Feedstock with id {} not found.", id))
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.indices.contains_key(id)
    }

    /// Returns an iterator over the profiles, in catalog order.
    pub fn iter(&self) -> std::slice::Iter<'_, FeedstockProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for FeedstockCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = FeedstockCatalog::builtin();
        assert_eq!(catalog.len(), 9);

        let food_waste = catalog.get("food_waste").unwrap();
        assert_eq!(food_waste.name, "Food Waste");
        assert_eq!(food_waste.biogas_yield_10dm, 220.0);
        assert_eq!(food_waste.methane_base_percent, 60.0);
        assert!(food_waste.nitrogen_potential.is_high());

        assert_eq!(
            catalog.get("chicken").unwrap().nitrogen_potential.to_string(),
            "Very High"
        );
        assert!(!catalog.get("manure").unwrap().nitrogen_potential.is_high());

        let ids = catalog.iter().map(|p| p.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids[0], "manure");
        assert_eq!(ids[8], "commercial");

        for profile in catalog.iter() {
            assert!(profile.dm_min <= profile.dm_max);
        }
    }

    #[test]
    fn test_lookup() {
        let catalog = FeedstockCatalog::default();
        assert!(catalog.contains("slurry"));
        assert!(catalog.get("bananas").is_none());
        assert!(catalog
            .profile("bananas")
            .is_err_and(|e| e == Error::feedstock_not_found("Feedstock with id bananas not found.")));
        assert_eq!(catalog.profile("rye").unwrap().biogas_yield_10dm, 195.0);
    }

    #[test]
    fn test_catalog_validation() {
        let good = FeedstockProfile::new("a", "A", 100.0, 50.0, (5.0, 10.0), NitrogenPotential::Low);

        let catalog = FeedstockCatalog::try_new(vec![good.clone()]).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(FeedstockCatalog::try_new(vec![]).unwrap().is_empty());

        assert!(
            FeedstockCatalog::try_new(vec![good.clone(), good.clone()])
                .is_err_and(|e| e == Error::invalid_catalog("Duplicate feedstock id found: a"))
        );

        let mut empty_id = good.clone();
        empty_id.id = String::new();
        assert!(FeedstockCatalog::try_new(vec![empty_id])
            .is_err_and(|e| e == Error::invalid_catalog("Feedstock with empty id found: A")));

        let mut inverted = good;
        inverted.dm_min = 12.0;
        assert!(FeedstockCatalog::try_new(vec![inverted]).is_err_and(|e| e
            == Error::invalid_catalog("Invalid dry matter range for feedstock a: 12 > 10")));
    }
}
