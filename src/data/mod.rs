//! Data access layer.
//!
//! One repository per aggregate, each a thin wrapper over sea-orm queries.
//! Repositories return `DbErr` directly; mapping to API errors happens in
//! services and handlers.

pub mod address;
pub mod agreement;
pub mod equipment;
pub mod equipment_status;
pub mod equipment_type;
pub mod installed_equipment;
pub mod organization;
pub mod subscriber;
pub mod verification;

pub use address::AddressRepository;
pub use agreement::AgreementRepository;
pub use equipment::EquipmentRepository;
pub use equipment_status::EquipmentStatusRepository;
pub use equipment_type::EquipmentTypeRepository;
pub use installed_equipment::InstalledEquipmentRepository;
pub use organization::OrganizationRepository;
pub use subscriber::SubscriberRepository;
pub use verification::VerificationRepository;
