use async_trait::async_trait;
use indexmap::{IndexMap, IndexSet};

#[cfg(any(test, feature = "test-mocks"))]
use mockall::automock;

// Domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    /// Registered participant emails, unique, kept in registration order
    pub participants: IndexSet<String>,
}

impl Activity {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        schedule: impl Into<String>,
        max_participants: u32,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            schedule: schedule.into(),
            max_participants,
            participants: IndexSet::new(),
        }
    }

    pub fn with_participants<I, S>(mut self, participants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.participants
            .extend(participants.into_iter().map(Into::into));
        self
    }

    pub fn is_registered(&self, email: &str) -> bool {
        self.participants.contains(email)
    }

    pub fn is_full(&self) -> bool {
        self.participants.len() >= self.max_participants as usize
    }

    pub fn spots_left(&self) -> u32 {
        self.max_participants
            .saturating_sub(self.participants.len() as u32)
    }
}

impl From<config::ActivityConfig> for Activity {
    fn from(config: config::ActivityConfig) -> Self {
        Activity::new(
            config.name,
            config.description,
            config.schedule,
            config.max_participants,
        )
        .with_participants(config.participants)
    }
}

// Error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("Activity '{0}' not found")]
    NotFound(String),

    #[error("{email} is already signed up for {activity}")]
    AlreadyRegistered { activity: String, email: String },

    #[error("{email} is not signed up for {activity}")]
    NotRegistered { activity: String, email: String },

    #[error("{activity} is full ({max_participants} participants)")]
    CapacityExceeded {
        activity: String,
        max_participants: u32,
    },
}

/// Rejections raised while building the catalog at startup
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Activity name cannot be empty")]
    EmptyName,

    #[error("Activity '{0}' is defined more than once")]
    DuplicateActivity(String),

    #[error("Activity '{0}' must allow at least one participant")]
    ZeroCapacity(String),

    #[error("Activity '{activity}' lists participant '{email}' more than once")]
    DuplicateParticipant { activity: String, email: String },

    #[error("Activity '{activity}' has {participants} participants but allows only {max_participants}")]
    OverCapacity {
        activity: String,
        participants: usize,
        max_participants: u32,
    },
}

/// Registration operations over the activity catalog
#[cfg_attr(any(test, feature = "test-mocks"), automock)]
#[async_trait]
pub trait RegistrationServiceTrait: Send + Sync {
    /// Snapshot of every activity keyed by name
    async fn list_activities(&self) -> IndexMap<String, Activity>;

    async fn get_activity(&self, activity_name: &str) -> Result<Activity, RegistrationError>;

    /// Register `email` on the named activity and return the updated activity
    async fn signup(&self, activity_name: &str, email: &str)
        -> Result<Activity, RegistrationError>;

    /// Remove `email` from the named activity and return the updated activity
    async fn unregister(
        &self,
        activity_name: &str,
        email: &str,
    ) -> Result<Activity, RegistrationError>;
}
