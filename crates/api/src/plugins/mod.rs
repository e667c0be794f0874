//! Plugin services that need I/O: typed config storage, outbound mail,
//! search-engine pushing, and sitemap building.
//!
//! Pure plugin logic (config types, validation, rendering) lives in
//! `sitecraft_core::plugin`; this module wires it to the database, the
//! filesystem, and the network.

use serde::de::DeserializeOwned;
use serde::Serialize;
use sitecraft_core::plugin::PluginName;
use sitecraft_db::repositories::SettingRepo;
use sitecraft_db::DbPool;

use crate::error::AppError;

pub mod mailer;
pub mod push;
pub mod sitemap;

/// Load a plugin's typed config from the settings table.
///
/// A missing row yields the config's defaults, so plugins work before
/// they are ever saved. A stored value that no longer deserializes is an
/// internal error, not a silent reset.
pub async fn load_config<T>(pool: &DbPool, name: PluginName) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    match SettingRepo::get(pool, name.as_str()).await? {
        Some(value) => serde_json::from_value(value).map_err(|e| {
            AppError::InternalError(format!(
                "stored config for plugin '{}' is corrupt: {e}",
                name.as_str()
            ))
        }),
        None => Ok(T::default()),
    }
}

/// Store a plugin's typed config, replacing any previous value.
pub async fn store_config<T: Serialize>(
    pool: &DbPool,
    name: PluginName,
    config: &T,
) -> Result<(), AppError> {
    let value = serde_json::to_value(config).map_err(|e| {
        AppError::InternalError(format!(
            "failed to serialize config for plugin '{}': {e}",
            name.as_str()
        ))
    })?;
    SettingRepo::upsert(pool, name.as_str(), &value).await?;
    Ok(())
}
