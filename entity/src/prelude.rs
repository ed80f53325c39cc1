pub use super::address::Entity as Address;
pub use super::agreement::Entity as Agreement;
pub use super::equipment::Entity as Equipment;
pub use super::equipment_status::Entity as EquipmentStatus;
pub use super::equipment_type::Entity as EquipmentType;
pub use super::installed_equipment::Entity as InstalledEquipment;
pub use super::organization::Entity as Organization;
pub use super::subscriber::Entity as Subscriber;
pub use super::verification::Entity as Verification;
