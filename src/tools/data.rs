//! Data management tools: hydration, pulse ox, and blood pressure.

use crate::{garmin::GarminClient, lib::format};

use super::{parse_date, parse_date_range, DateRangeRequest, DateRequest, ToolError};

pub async fn get_hydration_data(
    client: &GarminClient,
    request: DateRequest,
) -> Result<String, ToolError> {
    let date = parse_date(&request.date)?;
    let value = client.get_hydration_data(date).await?;
    Ok(format::render(&format!("Hydration data for {date}"), &value))
}

pub async fn get_spo2_data(
    client: &GarminClient,
    request: DateRequest,
) -> Result<String, ToolError> {
    let date = parse_date(&request.date)?;
    let value = client.get_spo2_data(date).await?;
    Ok(format::render(&format!("SpO2 data for {date}"), &value))
}

pub async fn get_blood_pressure(
    client: &GarminClient,
    request: DateRangeRequest,
) -> Result<String, ToolError> {
    let (start, end) = parse_date_range(&request.start_date, &request.end_date)?;
    let value = client.get_blood_pressure(start, end).await?;
    Ok(format::render("Blood pressure readings", &value))
}
