//! The roster store: loading state, region filtering, and change notification.

use std::fmt;

use strsim::jaro_winkler;
use tracing::{debug, error, info, warn};

use kg_core::{Character, CharacterId, Region};

use crate::error::{RosterError, RosterResult};
use crate::parse::parse_roster;
use crate::source::{DataLayout, RosterSource};

/// Minimum similarity for a name suggestion.
const SUGGEST_THRESHOLD: f64 = 0.6;

/// Snapshot of the store's observable state, passed to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterStatus {
    /// A fetch is in flight.
    pub loading: bool,
    /// User-facing message from the last failed load.
    pub error: Option<String>,
    /// Number of characters released in the active region.
    pub available: usize,
    /// Active region.
    pub region: Region,
    /// Incremented on every change.
    pub revision: u64,
}

/// Token for a fetch started with [`RosterStore::begin_load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Document path to fetch.
    pub path: String,
    /// Region the fetch was started for.
    pub region: Region,
    ticket: u64,
}

/// What [`RosterStore::set_region`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionChange {
    /// Same region with data already present; nothing happened.
    Unchanged,
    /// The available view was recomputed from the loaded roster.
    Refiltered,
    /// A fetch was performed for the new region.
    Reloaded,
}

type Observer = Box<dyn FnMut(&RosterStatus)>;

/// Holds the loaded roster and the view filtered to the active region.
pub struct RosterStore {
    layout: DataLayout,
    region: Region,
    loading: bool,
    error: Option<String>,
    roster: Vec<Character>,
    available: Vec<Character>,
    revision: u64,
    in_flight: Option<u64>,
    next_ticket: u64,
    observers: Vec<Observer>,
}

impl RosterStore {
    /// Create an empty store. Nothing is fetched until [`load`](Self::load).
    pub fn new(layout: DataLayout, region: Region) -> Self {
        Self {
            layout,
            region,
            loading: false,
            error: None,
            roster: Vec::new(),
            available: Vec::new(),
            revision: 0,
            in_flight: None,
            next_ticket: 0,
            observers: Vec::new(),
        }
    }

    /// The data layout.
    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    /// The active region.
    pub fn region(&self) -> Region {
        self.region
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message from the last failed load, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Every loaded character, regardless of region.
    pub fn roster(&self) -> &[Character] {
        &self.roster
    }

    /// Characters released in the active region.
    pub fn available(&self) -> &[Character] {
        &self.available
    }

    /// Change counter; bumps on every observable change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Snapshot of the observable state.
    pub fn status(&self) -> RosterStatus {
        RosterStatus {
            loading: self.loading,
            error: self.error.clone(),
            available: self.available.len(),
            region: self.region,
            revision: self.revision,
        }
    }

    /// Register a callback invoked after every state change.
    pub fn subscribe(&mut self, observer: impl FnMut(&RosterStatus) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Fetch and parse the roster for the active region.
    ///
    /// Returns `false` without fetching when a load is already in flight.
    pub fn load(&mut self, source: &dyn RosterSource) -> bool {
        let Some(request) = self.begin_load() else {
            return false;
        };
        let result = source.fetch(&request.path);
        self.finish_load(request, result)
    }

    /// Mark a load as started and return the request to fetch.
    ///
    /// Returns `None` when a load is already in flight, so concurrent
    /// requests coalesce into the first.
    pub fn begin_load(&mut self) -> Option<LoadRequest> {
        if self.loading {
            debug!(region = %self.region, "roster load already in flight");
            return None;
        }

        self.next_ticket += 1;
        let request = LoadRequest {
            path: self.layout.path_for(self.region),
            region: self.region,
            ticket: self.next_ticket,
        };
        info!(path = %request.path, region = %request.region, "loading roster");

        self.in_flight = Some(request.ticket);
        self.loading = true;
        self.error = None;
        self.changed();
        Some(request)
    }

    /// Complete a load with the fetched document (or the fetch error).
    ///
    /// Results for a request that has been superseded are discarded and
    /// `false` is returned.
    pub fn finish_load(&mut self, request: LoadRequest, fetched: RosterResult<String>) -> bool {
        if self.in_flight != Some(request.ticket) {
            debug!(path = %request.path, "discarding superseded roster load");
            return false;
        }
        self.in_flight = None;
        self.loading = false;

        match fetched.and_then(|text| parse_roster(&text)) {
            Ok(characters) => {
                self.roster = characters;
                self.error = None;
                self.refilter();
                info!(
                    total = self.roster.len(),
                    available = self.available.len(),
                    region = %self.region,
                    "roster loaded"
                );
            }
            Err(e) => {
                if e.is_integrity() {
                    error!(path = %request.path, error = %e, "roster data integrity violation");
                } else {
                    warn!(path = %request.path, error = %e, "roster fetch failed");
                }
                self.roster.clear();
                self.available.clear();
                self.error = Some(user_message(&request, &e));
            }
        }

        self.changed();
        true
    }

    /// Switch to another region.
    ///
    /// With a per-region layout this fetches the region's document,
    /// superseding any load in flight. With a unified layout the loaded
    /// roster is only refiltered.
    pub fn set_region(&mut self, region: Region, source: &dyn RosterSource) -> RegionChange {
        if region == self.region && !self.roster.is_empty() {
            return RegionChange::Unchanged;
        }

        info!(from = %self.region, to = %region, "switching region");
        self.region = region;

        if self.layout.is_per_region() || self.roster.is_empty() {
            self.roster.clear();
            self.available.clear();
            self.in_flight = None;
            self.loading = false;
            self.load(source);
            RegionChange::Reloaded
        } else {
            self.refilter();
            self.changed();
            RegionChange::Refiltered
        }
    }

    /// Look up an available character by id.
    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.available.iter().find(|c| c.id == id)
    }

    /// Find an available character by display name or given name,
    /// ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Character> {
        let needle = name.trim().to_lowercase();
        self.available.iter().find(|c| {
            c.display_name().to_lowercase() == needle || c.name.to_lowercase() == needle
        })
    }

    /// Suggest display names of available characters resembling `partial`.
    pub fn suggest(&self, partial: &str, limit: usize) -> Vec<String> {
        let partial = partial.trim().to_lowercase();
        let mut scored: Vec<(String, f64)> = self
            .available
            .iter()
            .filter_map(|c| {
                let display = c.display_name();
                let lower = display.to_lowercase();
                let score = if lower.starts_with(&partial) {
                    2.0
                } else if lower.contains(&partial) {
                    1.0
                } else {
                    jaro_winkler(&partial, &lower)
                };
                (score >= SUGGEST_THRESHOLD).then_some((display, score))
            })
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().take(limit).map(|(name, _)| name).collect()
    }

    fn refilter(&mut self) {
        let region = self.region;
        self.available = self
            .roster
            .iter()
            .filter(|c| c.is_released_in(region))
            .cloned()
            .collect();
    }

    fn changed(&mut self) {
        self.revision += 1;
        let status = self.status();
        for observer in &mut self.observers {
            observer(&status);
        }
    }
}

impl fmt::Debug for RosterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RosterStore")
            .field("layout", &self.layout)
            .field("region", &self.region)
            .field("loading", &self.loading)
            .field("error", &self.error)
            .field("roster", &self.roster.len())
            .field("available", &self.available.len())
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

fn user_message(request: &LoadRequest, e: &RosterError) -> String {
    let server = request.region.code().to_uppercase();
    if e.is_integrity() {
        format!("{server} server data ({}) is malformed: {e}", request.path)
    } else {
        format!(
            "Could not load {server} server data ({}). Check that the file exists or try again later.",
            request.path
        )
    }
}
