//! Gear management tools.

use crate::{garmin::GarminClient, lib::format};

use super::ToolError;

pub async fn get_gear_list(client: &GarminClient) -> Result<String, ToolError> {
    let value = client.get_gear_list().await?;
    Ok(format::render("Gear", &value))
}

pub async fn get_gear_defaults(client: &GarminClient) -> Result<String, ToolError> {
    let value = client.get_gear_defaults().await?;
    Ok(format::render("Gear defaults", &value))
}
