pub mod in_memory_vehicle_repository;
pub mod vehicle_repository;

pub use in_memory_vehicle_repository::InMemoryVehicleRepository;
pub use vehicle_repository::{PgVehicleRepository, VehicleRepository};
