//! Traits (ports) that the infrastructure layer implements

mod stores;

pub use stores::{
    ApiKeyStore, DeviceMetadataPatch, DeviceStore, DeviceTelemetry, RefreshTokenStore,
    StoreResult, UserStore,
};
