use crate::models::*;
use indexmap::IndexMap;
use services::Activity;

// ============================================================================
// Domain to HTTP Conversions
// ============================================================================

impl From<&Activity> for ActivityResponse {
    fn from(activity: &Activity) -> Self {
        Self {
            description: activity.description.clone(),
            schedule: activity.schedule.clone(),
            max_participants: activity.max_participants,
            participants: activity.participants.iter().cloned().collect(),
        }
    }
}

impl From<IndexMap<String, Activity>> for ActivitiesResponse {
    fn from(activities: IndexMap<String, Activity>) -> Self {
        Self(
            activities
                .iter()
                .map(|(name, activity)| (name.clone(), activity.into()))
                .collect(),
        )
    }
}
