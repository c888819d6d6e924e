pub mod activities;

pub use activities::{
    Activity, ActivityCatalog, CatalogError, RegistrationError, RegistrationServiceImpl,
    RegistrationServiceTrait,
};
