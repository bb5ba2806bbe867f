pub mod app_config;
pub mod local_repo;
pub mod remote_repo;

pub use local_repo::LocalBookingBackend;
pub use remote_repo::RemoteBookingBackend;
