//! Women's health tools.

use crate::{garmin::GarminClient, lib::format};

use super::{parse_date, DateRequest, ToolError};

pub async fn get_menstrual_data(
    client: &GarminClient,
    request: DateRequest,
) -> Result<String, ToolError> {
    let date = parse_date(&request.date)?;
    let value = client.get_menstrual_data(date).await?;
    Ok(format::render(&format!("Menstrual data for {date}"), &value))
}

pub async fn get_pregnancy_summary(client: &GarminClient) -> Result<String, ToolError> {
    let value = client.get_pregnancy_summary().await?;
    Ok(format::render("Pregnancy summary", &value))
}
