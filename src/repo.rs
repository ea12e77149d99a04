//! City Repository
//!
//! In-memory stand-in for the relational data-access layer. The cache treats
//! these fetches as opaque async operations returning serializable results;
//! nothing here knows the cache exists.

use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::models::{City, UpdateCityRequest};

// == City Repository ==
/// Holds the canonical city records behind an async lock.
#[derive(Debug, Default)]
pub struct CityRepository {
    cities: RwLock<HashMap<u64, City>>,
}

impl CityRepository {
    // == Constructor ==
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with a handful of cities.
    pub fn seeded() -> Self {
        let cities = [
            City {
                id: 1,
                name: "New Harbor".to_string(),
                region: "Coastal".to_string(),
                population: 240_000,
                description: "Deep-water port with a busy ferry network".to_string(),
            },
            City {
                id: 2,
                name: "Iron Ridge".to_string(),
                region: "Highlands".to_string(),
                population: 88_000,
                description: "Mining town wrapped around a switchback rail line".to_string(),
            },
            City {
                id: 3,
                name: "Willow Flats".to_string(),
                region: "Riverlands".to_string(),
                population: 132_500,
                description: "Low-rise sprawl on a floodplain, canals everywhere".to_string(),
            },
            City {
                id: 4,
                name: "Solar Mesa".to_string(),
                region: "Desert".to_string(),
                population: 61_200,
                description: "Grid experiment powered almost entirely by sun".to_string(),
            },
        ];

        Self {
            cities: RwLock::new(cities.into_iter().map(|city| (city.id, city)).collect()),
        }
    }

    // == Fetch City ==
    /// Fetches a single city by id.
    pub async fn fetch_city(&self, id: u64) -> Option<City> {
        self.cities.read().await.get(&id).cloned()
    }

    // == List Cities ==
    /// Returns all cities ordered by id.
    pub async fn list_cities(&self) -> Vec<City> {
        let mut cities: Vec<City> = self.cities.read().await.values().cloned().collect();
        cities.sort_by_key(|city| city.id);
        cities
    }

    // == Search ==
    /// Case-insensitive substring search over name, region and description.
    pub async fn search(&self, term: &str) -> Vec<City> {
        let needle = term.to_lowercase();
        let mut matches: Vec<City> = self
            .cities
            .read()
            .await
            .values()
            .filter(|city| {
                city.name.to_lowercase().contains(&needle)
                    || city.region.to_lowercase().contains(&needle)
                    || city.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        matches.sort_by_key(|city| city.id);
        matches
    }

    // == Update City ==
    /// Applies a partial update to a city, returning the updated record.
    ///
    /// Returns None if the city does not exist.
    pub async fn update_city(&self, id: u64, update: &UpdateCityRequest) -> Option<City> {
        let mut cities = self.cities.write().await;
        let city = cities.get_mut(&id)?;

        if let Some(name) = &update.name {
            city.name = name.clone();
        }
        if let Some(region) = &update.region {
            city.region = region.clone();
        }
        if let Some(population) = update.population {
            city.population = population;
        }
        if let Some(description) = &update.description {
            city.description = description.clone();
        }

        Some(city.clone())
    }
}
