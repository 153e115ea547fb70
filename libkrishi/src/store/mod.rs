//! Session-scoped application state store
//!
//! The store is the single source of truth for data shared between
//! screens: the chosen language, the farmer profile, soil data, crop
//! recommendations, matched schemes, the connectivity flag and the
//! onboarding step counter.
//!
//! # Lifecycle
//!
//! A [`Session`] owns the store. Screens receive cloneable
//! [`StoreHandle`]s; once the session ends, every handle operation fails
//! with [`SessionError::Inactive`]. There are no statics: two sessions
//! never share state.
//!
//! # Writes
//!
//! Setters replace a field wholesale and never validate. Each setter call
//! emits exactly one [`StoreEvent`] while the write lock is still held, so
//! notifications arrive in the same order as the writes.
//!
//! # Example
//!
//! ```
//! use libkrishi::store::Session;
//! use libkrishi::types::Language;
//!
//! # fn example() -> libkrishi::Result<()> {
//! let session = Session::start(16);
//! let store = session.handle();
//!
//! store.set_language(Language::Tamil)?;
//! assert_eq!(store.language()?, Language::Tamil);
//!
//! session.end();
//! assert!(store.language().is_err());
//! # Ok(())
//! # }
//! ```

pub mod events;

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, Weak};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use self::events::EventBus;
pub use self::events::{EventReceiver, StoreEvent, StoreField};
use crate::error::{Result, SessionError};
use crate::types::{CropRecommendation, FarmerProfile, GovernmentScheme, Language, SoilData};

/// Point-in-time copy of every store field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub language: Language,
    pub profile: Option<FarmerProfile>,
    pub soil_data: Option<SoilData>,
    pub recommendations: Vec<CropRecommendation>,
    pub schemes: Vec<GovernmentScheme>,
    pub online: bool,
    pub step: i64,
}

impl Default for StoreSnapshot {
    fn default() -> Self {
        Self {
            language: Language::default(),
            profile: None,
            soil_data: None,
            recommendations: Vec::new(),
            schemes: Vec::new(),
            online: true,
            step: 0,
        }
    }
}

struct StoreState {
    snapshot: StoreSnapshot,
    seq: u64,
}

struct StoreCell {
    state: RwLock<StoreState>,
    bus: EventBus,
}

/// Owner of one application session's store
///
/// Dropping the session (or calling [`Session::end`]) invalidates every
/// handle created from it.
pub struct Session {
    id: Uuid,
    cell: Arc<StoreCell>,
}

impl Session {
    /// Start a session with default state
    ///
    /// `event_capacity` bounds how many notifications a lagging subscriber
    /// can fall behind before it starts missing them.
    pub fn start(event_capacity: usize) -> Self {
        Self::with_state(StoreSnapshot::default(), event_capacity)
    }

    /// Start a session from an initial state without emitting events
    pub fn with_state(initial: StoreSnapshot, event_capacity: usize) -> Self {
        let id = Uuid::new_v4();
        tracing::debug!(session = %id, "session started");
        Self {
            id,
            cell: Arc::new(StoreCell {
                state: RwLock::new(StoreState {
                    snapshot: initial,
                    seq: 0,
                }),
                bus: EventBus::new(event_capacity),
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Create a handle bound to this session
    pub fn handle(&self) -> StoreHandle {
        StoreHandle {
            session_id: self.id,
            cell: Arc::downgrade(&self.cell),
        }
    }

    /// End the session, invalidating all handles
    pub fn end(self) {
        tracing::debug!(session = %self.id, "session ended");
    }
}

/// Cloneable access to a session's store
#[derive(Clone)]
pub struct StoreHandle {
    session_id: Uuid,
    cell: Weak<StoreCell>,
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreHandle")
            .field("session_id", &self.session_id)
            .field("active", &self.is_active())
            .finish()
    }
}

impl StoreHandle {
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Whether the owning session is still alive
    pub fn is_active(&self) -> bool {
        self.cell.strong_count() > 0
    }

    fn cell(&self) -> Result<Arc<StoreCell>> {
        self.cell.upgrade().ok_or_else(|| {
            tracing::error!(session = %self.session_id, "store used after session ended");
            SessionError::Inactive.into()
        })
    }

    fn read<T>(&self, f: impl FnOnce(&StoreSnapshot) -> T) -> Result<T> {
        let cell = self.cell()?;
        let state = cell.state.read().unwrap_or_else(PoisonError::into_inner);
        Ok(f(&state.snapshot))
    }

    fn write(&self, field: StoreField, apply: impl FnOnce(&mut StoreSnapshot)) -> Result<()> {
        let cell = self.cell()?;
        let mut state = cell.state.write().unwrap_or_else(PoisonError::into_inner);
        apply(&mut state.snapshot);
        state.seq += 1;

        let event = StoreEvent {
            seq: state.seq,
            field,
            snapshot: state.snapshot.clone(),
        };
        tracing::debug!(session = %self.session_id, seq = event.seq, field = ?field, "store updated");
        cell.bus.emit(event);
        Ok(())
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> Result<EventReceiver> {
        Ok(self.cell()?.bus.subscribe())
    }

    /// Copy of every field
    pub fn snapshot(&self) -> Result<StoreSnapshot> {
        self.read(StoreSnapshot::clone)
    }

    pub fn language(&self) -> Result<Language> {
        self.read(|s| s.language)
    }

    pub fn set_language(&self, language: Language) -> Result<()> {
        self.write(StoreField::Language, |s| s.language = language)
    }

    pub fn profile(&self) -> Result<Option<FarmerProfile>> {
        self.read(|s| s.profile.clone())
    }

    /// Replace the profile wholesale; the caller validates required fields
    pub fn set_profile(&self, profile: FarmerProfile) -> Result<()> {
        self.write(StoreField::Profile, |s| s.profile = Some(profile))
    }

    pub fn soil_data(&self) -> Result<Option<SoilData>> {
        self.read(|s| s.soil_data.clone())
    }

    /// Replace the soil data wholesale; values outside their domains are kept
    pub fn set_soil_data(&self, data: SoilData) -> Result<()> {
        self.write(StoreField::SoilData, |s| s.soil_data = Some(data))
    }

    pub fn recommendations(&self) -> Result<Vec<CropRecommendation>> {
        self.read(|s| s.recommendations.clone())
    }

    pub fn set_recommendations(&self, recommendations: Vec<CropRecommendation>) -> Result<()> {
        self.write(StoreField::Recommendations, |s| {
            s.recommendations = recommendations
        })
    }

    pub fn schemes(&self) -> Result<Vec<GovernmentScheme>> {
        self.read(|s| s.schemes.clone())
    }

    /// Replace the scheme list wholesale
    ///
    /// Duplicate identifiers are accepted and logged; see
    /// `service::validation::duplicate_scheme_ids`.
    pub fn set_schemes(&self, schemes: Vec<GovernmentScheme>) -> Result<()> {
        let mut seen = HashSet::new();
        for scheme in &schemes {
            if !seen.insert(scheme.id.as_str()) {
                tracing::warn!(id = %scheme.id, "scheme list contains a duplicate id");
            }
        }
        self.write(StoreField::Schemes, |s| s.schemes = schemes)
    }

    pub fn online(&self) -> Result<bool> {
        self.read(|s| s.online)
    }

    pub fn set_online(&self, online: bool) -> Result<()> {
        self.write(StoreField::Online, |s| s.online = online)
    }

    pub fn step(&self) -> Result<i64> {
        self.read(|s| s.step)
    }

    pub fn set_step(&self, step: i64) -> Result<()> {
        self.write(StoreField::Step, |s| s.step = step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KrishiError;
    use crate::types::LandUnit;

    fn profile(name: &str, village: &str) -> FarmerProfile {
        FarmerProfile {
            name: name.to_string(),
            village: village.to_string(),
            district: "Thanjavur".to_string(),
            state: "Tamil Nadu".to_string(),
            land_size: 2.0,
            land_unit: LandUnit::Acres,
            phone: "999".to_string(),
        }
    }

    #[test]
    fn test_defaults() {
        let session = Session::start(8);
        let store = session.handle();

        assert_eq!(store.language().unwrap(), Language::English);
        assert!(store.profile().unwrap().is_none());
        assert!(store.soil_data().unwrap().is_none());
        assert!(store.recommendations().unwrap().is_empty());
        assert!(store.schemes().unwrap().is_empty());
        assert!(store.online().unwrap());
        assert_eq!(store.step().unwrap(), 0);
    }

    #[test]
    fn test_one_event_per_setter() {
        let session = Session::start(8);
        let store = session.handle();
        let mut rx = store.subscribe().unwrap();

        store.set_step(3).unwrap();
        store.set_online(false).unwrap();

        let first = rx.try_recv().unwrap();
        assert_eq!((first.seq, first.field), (1, StoreField::Step));
        assert_eq!(first.snapshot.step, 3);
        assert!(first.snapshot.online);

        let second = rx.try_recv().unwrap();
        assert_eq!((second.seq, second.field), (2, StoreField::Online));
        assert!(!second.snapshot.online);

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_profile_replaced_wholesale() {
        let session = Session::start(8);
        let store = session.handle();

        store.set_profile(profile("Ravi", "X")).unwrap();
        let mut second = profile("Meena", "Y");
        second.phone = String::new();
        store.set_profile(second.clone()).unwrap();

        assert_eq!(store.profile().unwrap(), Some(second));
    }

    #[test]
    fn test_handle_fails_after_session_end() {
        let session = Session::start(8);
        let store = session.handle();
        assert!(store.is_active());

        session.end();

        assert!(!store.is_active());
        assert!(matches!(
            store.set_language(Language::Hindi),
            Err(KrishiError::Session(SessionError::Inactive))
        ));
        assert!(matches!(
            store.snapshot(),
            Err(KrishiError::Session(SessionError::Inactive))
        ));
    }

    #[test]
    fn test_sessions_are_isolated() {
        let a = Session::start(8);
        let b = Session::start(8);

        a.handle().set_step(5).unwrap();

        assert_ne!(a.id(), b.id());
        assert_eq!(b.handle().step().unwrap(), 0);
    }

    #[test]
    fn test_with_state_emits_nothing() {
        let initial = StoreSnapshot {
            language: Language::Hindi,
            ..StoreSnapshot::default()
        };
        let session = Session::with_state(initial, 8);
        let store = session.handle();
        let mut rx = store.subscribe().unwrap();

        assert_eq!(store.language().unwrap(), Language::Hindi);
        assert!(rx.try_recv().is_err());
    }
}
