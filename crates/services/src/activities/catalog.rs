use std::collections::HashSet;

use indexmap::IndexMap;
use tokio::sync::RwLock;

use super::ports::{Activity, CatalogError, RegistrationError};

/// The fixed set of activities known to the process.
///
/// The catalog owns every [`Activity`]. Readers only ever receive cloned
/// snapshots; the sole mutation path is [`ActivityCatalog::update`], which
/// the registration service uses to apply a roster change while holding the
/// write lock.
#[derive(Debug)]
pub struct ActivityCatalog {
    activities: RwLock<IndexMap<String, Activity>>,
}

impl ActivityCatalog {
    pub fn new(activities: Vec<Activity>) -> Result<Self, CatalogError> {
        let mut by_name = IndexMap::with_capacity(activities.len());

        for activity in activities {
            if activity.name.trim().is_empty() {
                return Err(CatalogError::EmptyName);
            }
            if activity.max_participants == 0 {
                return Err(CatalogError::ZeroCapacity(activity.name));
            }
            if activity.participants.len() > activity.max_participants as usize {
                return Err(CatalogError::OverCapacity {
                    participants: activity.participants.len(),
                    max_participants: activity.max_participants,
                    activity: activity.name,
                });
            }
            if by_name.contains_key(&activity.name) {
                return Err(CatalogError::DuplicateActivity(activity.name));
            }
            by_name.insert(activity.name.clone(), activity);
        }

        Ok(Self {
            activities: RwLock::new(by_name),
        })
    }

    /// Build the catalog from static configuration
    pub fn from_config(config: &config::CatalogConfig) -> Result<Self, CatalogError> {
        for activity in &config.activities {
            let mut seen = HashSet::new();
            if let Some(email) = activity.participants.iter().find(|p| !seen.insert(*p)) {
                return Err(CatalogError::DuplicateParticipant {
                    activity: activity.name.clone(),
                    email: email.clone(),
                });
            }
        }

        Self::new(config.activities.iter().cloned().map(Activity::from).collect())
    }

    /// Snapshot of the full catalog
    pub async fn list(&self) -> IndexMap<String, Activity> {
        self.activities.read().await.clone()
    }

    pub async fn get(&self, name: &str) -> Option<Activity> {
        self.activities.read().await.get(name).cloned()
    }

    /// Apply `f` to the named activity under the write lock.
    ///
    /// `f` must leave the activity untouched when it returns an error.
    pub(crate) async fn update<T, F>(&self, name: &str, f: F) -> Result<T, RegistrationError>
    where
        F: FnOnce(&mut Activity) -> Result<T, RegistrationError>,
    {
        let mut activities = self.activities.write().await;
        let activity = activities
            .get_mut(name)
            .ok_or_else(|| RegistrationError::NotFound(name.to_string()))?;
        f(activity)
    }
}
