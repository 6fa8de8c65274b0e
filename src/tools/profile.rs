//! User profile tools.

use crate::{garmin::GarminClient, lib::format};

use super::ToolError;

pub async fn get_user_profile(client: &GarminClient) -> Result<String, ToolError> {
    let value = client.get_user_profile().await?;
    Ok(format::render("User profile", &value))
}

pub async fn get_user_settings(client: &GarminClient) -> Result<String, ToolError> {
    let value = client.get_user_settings().await?;
    Ok(format::render("User settings", &value))
}
