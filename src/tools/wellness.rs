//! Health and wellness tools: daily summary, sleep, heart rate, body
//! battery, and stress.

use crate::{garmin::GarminClient, lib::format};

use super::{parse_date, parse_date_range, DateRangeRequest, DateRequest, ToolError};

pub async fn get_daily_summary(
    client: &GarminClient,
    request: DateRequest,
) -> Result<String, ToolError> {
    let date = parse_date(&request.date)?;
    let value = client.get_daily_summary(date).await?;
    Ok(format::render(&format!("Daily summary for {date}"), &value))
}

pub async fn get_sleep_data(
    client: &GarminClient,
    request: DateRequest,
) -> Result<String, ToolError> {
    let date = parse_date(&request.date)?;
    let value = client.get_sleep_data(date).await?;
    Ok(format::render(&format!("Sleep data for {date}"), &value))
}

pub async fn get_heart_rate_data(
    client: &GarminClient,
    request: DateRequest,
) -> Result<String, ToolError> {
    let date = parse_date(&request.date)?;
    let value = client.get_heart_rate_data(date).await?;
    Ok(format::render(&format!("Heart rate data for {date}"), &value))
}

pub async fn get_body_battery(
    client: &GarminClient,
    request: DateRangeRequest,
) -> Result<String, ToolError> {
    let (start, end) = parse_date_range(&request.start_date, &request.end_date)?;
    let value = client.get_body_battery(start, end).await?;
    Ok(format::render("Body battery", &value))
}

pub async fn get_stress_data(
    client: &GarminClient,
    request: DateRequest,
) -> Result<String, ToolError> {
    let date = parse_date(&request.date)?;
    let value = client.get_stress_data(date).await?;
    Ok(format::render(&format!("Stress data for {date}"), &value))
}
