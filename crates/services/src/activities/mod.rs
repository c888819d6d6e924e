pub mod catalog;
pub mod ports;

pub use catalog::ActivityCatalog;
pub use config::CapacityPolicy;
pub use ports::*;

use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::{debug, info};

pub struct RegistrationServiceImpl {
    catalog: Arc<ActivityCatalog>,
    capacity_policy: CapacityPolicy,
}

impl RegistrationServiceImpl {
    pub fn new(catalog: Arc<ActivityCatalog>, capacity_policy: CapacityPolicy) -> Self {
        Self {
            catalog,
            capacity_policy,
        }
    }

    /// Build the catalog and the service from configuration
    pub fn from_config(config: &config::CatalogConfig) -> Result<Self, CatalogError> {
        let catalog = ActivityCatalog::from_config(config)?;
        Ok(Self::new(Arc::new(catalog), config.capacity_policy))
    }

    pub fn catalog(&self) -> &Arc<ActivityCatalog> {
        &self.catalog
    }

    pub fn capacity_policy(&self) -> CapacityPolicy {
        self.capacity_policy
    }
}

#[async_trait]
impl RegistrationServiceTrait for RegistrationServiceImpl {
    async fn list_activities(&self) -> IndexMap<String, Activity> {
        self.catalog.list().await
    }

    async fn get_activity(&self, activity_name: &str) -> Result<Activity, RegistrationError> {
        self.catalog
            .get(activity_name)
            .await
            .ok_or_else(|| RegistrationError::NotFound(activity_name.to_string()))
    }

    async fn signup(
        &self,
        activity_name: &str,
        email: &str,
    ) -> Result<Activity, RegistrationError> {
        let policy = self.capacity_policy;
        let result = self
            .catalog
            .update(activity_name, |activity| {
                if activity.is_registered(email) {
                    return Err(RegistrationError::AlreadyRegistered {
                        activity: activity.name.clone(),
                        email: email.to_string(),
                    });
                }
                if policy == CapacityPolicy::Enforce && activity.is_full() {
                    return Err(RegistrationError::CapacityExceeded {
                        activity: activity.name.clone(),
                        max_participants: activity.max_participants,
                    });
                }
                activity.participants.insert(email.to_string());
                Ok(activity.clone())
            })
            .await;

        match &result {
            Ok(activity) => info!(
                activity = %activity_name,
                participants = activity.participants.len(),
                max_participants = activity.max_participants,
                "Participant signed up"
            ),
            Err(e) => debug!(activity = %activity_name, "Signup rejected: {}", e),
        }
        result
    }

    async fn unregister(
        &self,
        activity_name: &str,
        email: &str,
    ) -> Result<Activity, RegistrationError> {
        let result = self
            .catalog
            .update(activity_name, |activity| {
                if !activity.participants.shift_remove(email) {
                    return Err(RegistrationError::NotRegistered {
                        activity: activity.name.clone(),
                        email: email.to_string(),
                    });
                }
                Ok(activity.clone())
            })
            .await;

        match &result {
            Ok(activity) => info!(
                activity = %activity_name,
                participants = activity.participants.len(),
                "Participant unregistered"
            ),
            Err(e) => debug!(activity = %activity_name, "Unregister rejected: {}", e),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_with(activities: Vec<Activity>, policy: CapacityPolicy) -> RegistrationServiceImpl {
        let catalog = ActivityCatalog::new(activities).unwrap();
        RegistrationServiceImpl::new(Arc::new(catalog), policy)
    }

    fn chess_club(max_participants: u32) -> Activity {
        Activity::new(
            "Chess Club",
            "Learn strategies and compete in chess tournaments",
            "Fridays, 3:30 PM - 5:00 PM",
            max_participants,
        )
    }

    #[tokio::test]
    async fn test_signup_adds_participant() {
        let service = service_with(vec![chess_club(12)], CapacityPolicy::Enforce);

        let activity = service
            .signup("Chess Club", "test@example.com")
            .await
            .unwrap();
        assert!(activity.is_registered("test@example.com"));

        let listed = service.list_activities().await;
        assert_eq!(
            listed["Chess Club"].participants.iter().collect::<Vec<_>>(),
            vec!["test@example.com"]
        );
    }

    #[tokio::test]
    async fn test_signup_unknown_activity() {
        let service = service_with(vec![chess_club(12)], CapacityPolicy::Enforce);

        let result = service.signup("Underwater Basket Weaving", "a@b.io").await;
        assert_eq!(
            result,
            Err(RegistrationError::NotFound(
                "Underwater Basket Weaving".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_duplicate_signup_is_rejected_once_registered() {
        let service = service_with(vec![chess_club(12)], CapacityPolicy::Enforce);

        assert!(service.signup("Chess Club", "dup@example.com").await.is_ok());
        let second = service.signup("Chess Club", "dup@example.com").await;
        assert_eq!(
            second,
            Err(RegistrationError::AlreadyRegistered {
                activity: "Chess Club".to_string(),
                email: "dup@example.com".to_string(),
            })
        );

        let activity = service.get_activity("Chess Club").await.unwrap();
        assert_eq!(activity.participants.len(), 1);
    }

    #[tokio::test]
    async fn test_enforced_capacity_rejects_signup_when_full() {
        let activity = chess_club(2).with_participants(["a@x.io", "b@x.io"]);
        let service = service_with(vec![activity], CapacityPolicy::Enforce);

        let result = service.signup("Chess Club", "c@x.io").await;
        assert_eq!(
            result,
            Err(RegistrationError::CapacityExceeded {
                activity: "Chess Club".to_string(),
                max_participants: 2,
            })
        );
        assert_eq!(service.get_activity("Chess Club").await.unwrap().participants.len(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_reported_before_capacity() {
        let activity = chess_club(1).with_participants(["a@x.io"]);
        let service = service_with(vec![activity], CapacityPolicy::Enforce);

        let result = service.signup("Chess Club", "a@x.io").await;
        assert!(matches!(
            result,
            Err(RegistrationError::AlreadyRegistered { .. })
        ));
    }

    #[tokio::test]
    async fn test_informational_capacity_admits_past_limit() {
        let activity = chess_club(1).with_participants(["a@x.io"]);
        let service = service_with(vec![activity], CapacityPolicy::Informational);

        let activity = service.signup("Chess Club", "b@x.io").await.unwrap();
        assert_eq!(activity.participants.len(), 2);
        assert_eq!(activity.spots_left(), 0);
    }

    #[tokio::test]
    async fn test_unregister_removes_participant() {
        let activity = chess_club(12).with_participants(["a@x.io", "b@x.io", "c@x.io"]);
        let service = service_with(vec![activity], CapacityPolicy::Enforce);

        let activity = service.unregister("Chess Club", "b@x.io").await.unwrap();
        assert_eq!(
            activity.participants.iter().collect::<Vec<_>>(),
            vec!["a@x.io", "c@x.io"]
        );
    }

    #[tokio::test]
    async fn test_unregister_not_registered_leaves_roster_unchanged() {
        let activity = chess_club(12).with_participants(["a@x.io"]);
        let service = service_with(vec![activity], CapacityPolicy::Enforce);

        let result = service.unregister("Chess Club", "ghost@x.io").await;
        assert_eq!(
            result,
            Err(RegistrationError::NotRegistered {
                activity: "Chess Club".to_string(),
                email: "ghost@x.io".to_string(),
            })
        );

        let activity = service.get_activity("Chess Club").await.unwrap();
        assert_eq!(activity.participants.iter().collect::<Vec<_>>(), vec!["a@x.io"]);
    }

    #[tokio::test]
    async fn test_unregister_unknown_activity() {
        let service = service_with(vec![chess_club(12)], CapacityPolicy::Enforce);

        let result = service.unregister("Chess", "a@x.io").await;
        assert_eq!(result, Err(RegistrationError::NotFound("Chess".to_string())));
    }

    #[tokio::test]
    async fn test_signup_again_after_unregister() {
        let service = service_with(vec![chess_club(1)], CapacityPolicy::Enforce);

        service.signup("Chess Club", "a@x.io").await.unwrap();
        service.unregister("Chess Club", "a@x.io").await.unwrap();
        let activity = service.signup("Chess Club", "a@x.io").await.unwrap();
        assert!(activity.is_registered("a@x.io"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_signups_respect_capacity() {
        let service = Arc::new(service_with(vec![chess_club(10)], CapacityPolicy::Enforce));

        let attempts = (0..50).map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .signup("Chess Club", &format!("student{i}@mergington.edu"))
                    .await
            })
        });
        let results = futures::future::join_all(attempts).await;

        let admitted = results
            .iter()
            .filter(|r| matches!(r, Ok(Ok(_))))
            .count();
        let rejected = results
            .iter()
            .filter(|r| matches!(r, Ok(Err(RegistrationError::CapacityExceeded { .. }))))
            .count();
        assert_eq!(admitted, 10);
        assert_eq!(rejected, 40);

        let activity = service.get_activity("Chess Club").await.unwrap();
        assert_eq!(activity.participants.len(), 10);
    }

    #[test]
    fn test_from_config_uses_configured_policy() {
        let config = config::CatalogConfig {
            capacity_policy: CapacityPolicy::Informational,
            ..Default::default()
        };

        let service = RegistrationServiceImpl::from_config(&config).unwrap();
        assert_eq!(service.capacity_policy(), CapacityPolicy::Informational);
    }

    #[test]
    fn test_list_activities_blocking() {
        let service = service_with(vec![chess_club(12)], CapacityPolicy::Enforce);

        let activities = tokio_test::block_on(service.list_activities());
        assert!(activities.contains_key("Chess Club"));
    }
}
