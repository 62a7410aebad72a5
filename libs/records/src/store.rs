//! The three repositories of one data directory

use crate::models::{Airline, Client, Flight};
use crate::repository::Repository;
use crate::services::{AirlineService, ClientService, FlightService};
use crate::storage::ensure_dir;
use crate::Result;
use std::path::PathBuf;

/// Where the collections live and whether every mutation is written through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub data_dir: PathBuf,
    pub autosave: bool,
}

impl StoreSettings {
    pub fn new(data_dir: impl Into<PathBuf>, autosave: bool) -> Self {
        Self {
            data_dir: data_dir.into(),
            autosave,
        }
    }
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self::new("./data", true)
    }
}

/// Owns the client, airline and flight repositories for one [`StoreSettings`].
#[derive(Debug)]
pub struct RecordStore {
    settings: StoreSettings,
    clients: Repository<Client>,
    airlines: Repository<Airline>,
    flights: Repository<Flight>,
}

impl RecordStore {
    /// Create the data directory if needed. Collections are read lazily.
    pub fn open(settings: StoreSettings) -> Result<Self> {
        ensure_dir(&settings.data_dir)?;
        tracing::debug!(
            data_dir = %settings.data_dir.display(),
            autosave = settings.autosave,
            "Opening record store"
        );

        Ok(Self {
            clients: Repository::open(&settings.data_dir, settings.autosave),
            airlines: Repository::open(&settings.data_dir, settings.autosave),
            flights: Repository::open(&settings.data_dir, settings.autosave),
            settings,
        })
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    /// Rebuild every repository when `settings` differ from the current ones.
    /// Returns whether a rebuild happened. Unsaved changes are discarded.
    pub fn reconfigure(&mut self, settings: StoreSettings) -> Result<bool> {
        if settings == self.settings {
            return Ok(false);
        }
        *self = Self::open(settings)?;
        Ok(true)
    }

    /// Write every loaded collection.
    pub fn save_all(&mut self) -> Result<()> {
        self.clients.save()?;
        self.airlines.save()?;
        self.flights.save()?;
        Ok(())
    }

    /// Drop all caches so the next access rereads the files.
    pub fn reload(&mut self) {
        self.clients.reload();
        self.airlines.reload();
        self.flights.reload();
    }

    pub fn clients(&mut self) -> ClientService<'_> {
        ClientService::new(&mut self.clients, &mut self.flights)
    }

    pub fn airlines(&mut self) -> AirlineService<'_> {
        AirlineService::new(&mut self.airlines, &mut self.flights)
    }

    pub fn flights(&mut self) -> FlightService<'_> {
        FlightService::new(&mut self.flights, &mut self.clients, &mut self.airlines)
    }
}
