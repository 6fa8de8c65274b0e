//! Device tools.

use schemars::JsonSchema;
use serde::Deserialize;

use crate::{garmin::GarminClient, lib::format};

use super::ToolError;

#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeviceIdRequest {
    /// Numeric Garmin device identifier.
    pub device_id: u64,
}

pub async fn get_devices(client: &GarminClient) -> Result<String, ToolError> {
    let value = client.get_devices().await?;
    Ok(format::render("Devices", &value))
}

pub async fn get_device_settings(
    client: &GarminClient,
    request: DeviceIdRequest,
) -> Result<String, ToolError> {
    let value = client.get_device_settings(request.device_id).await?;
    Ok(format::render(
        &format!("Device {} settings", request.device_id),
        &value,
    ))
}
