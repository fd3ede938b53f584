//! Device entity <-> model mapper

use volta_core::entities::Device;

use crate::models::DeviceModel;

/// Convert DeviceModel to Device entity
impl From<DeviceModel> for Device {
    fn from(model: DeviceModel) -> Self {
        Device {
            uuid: model.uuid,
            user_id: model.user_id,
            name: model.name,
            brand: model.brand,
            model: model.model,
            model_number: model.model_number,
            os_version: model.os_version,
            battery_level: model.battery_level,
            is_charging: model.is_charging,
            temperature: model.temperature,
            voltage: model.voltage,
            last_updated: model.last_updated,
        }
    }
}
