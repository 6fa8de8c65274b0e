//! Activity management tools.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;

use crate::{garmin::GarminClient, lib::format};

use super::{parse_date_range, PagingRequest, ToolError};

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ActivityIdRequest {
    /// Numeric Garmin activity identifier.
    pub activity_id: u64,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub struct ActivitiesByDateRequest {
    /// Range start in YYYY-MM-DD form.
    pub start_date: String,
    /// Range end in YYYY-MM-DD form.
    pub end_date: String,
    /// Optional activity type filter, e.g. `running` or `cycling`.
    #[serde(default)]
    pub activity_type: Option<String>,
}

/// List recent activities as a line-oriented summary.
pub async fn list_activities(
    client: &GarminClient,
    request: PagingRequest,
) -> Result<String, ToolError> {
    let value = client
        .get_activities(request.start(), request.limit())
        .await?;
    let activities = value.as_array().cloned().unwrap_or_default();
    Ok(summarize(&activities))
}

/// Full upstream detail payload for one activity.
pub async fn get_activity(
    client: &GarminClient,
    request: ActivityIdRequest,
) -> Result<String, ToolError> {
    let value = client.get_activity(request.activity_id).await?;
    Ok(format::render(
        &format!("Activity {}", request.activity_id),
        &value,
    ))
}

/// Activities within an inclusive date range, optionally filtered by type.
pub async fn get_activities_by_date(
    client: &GarminClient,
    request: ActivitiesByDateRequest,
) -> Result<String, ToolError> {
    let (start, end) = parse_date_range(&request.start_date, &request.end_date)?;
    let value = client
        .get_activities_by_date(start, end, request.activity_type.as_deref())
        .await?;
    Ok(format::render("Activities", &value))
}

/// Most recent activity, if any.
pub async fn get_last_activity(client: &GarminClient) -> Result<String, ToolError> {
    let value = client.get_activities(0, 1).await?;
    let activities = value.as_array().cloned().unwrap_or_default();
    match activities.first() {
        Some(activity) => Ok(format::render("Last activity", activity)),
        None => Ok("No activities found.".to_string()),
    }
}

fn summarize(activities: &[Value]) -> String {
    if activities.is_empty() {
        return "No activities found.".to_string();
    }

    let mut result = format!("Last {} activities:\n\n", activities.len());
    for (idx, activity) in activities.iter().enumerate() {
        let type_key = activity
            .get("activityType")
            .and_then(|t| t.get("typeKey"))
            .and_then(Value::as_str)
            .unwrap_or("Unknown");
        let id = activity
            .get("activityId")
            .map(Value::to_string)
            .unwrap_or_else(|| "Unknown".to_string());
        result.push_str(&format!("--- Activity {} ---\n", idx + 1));
        result.push_str(&format!(
            "Activity: {}\n",
            format::str_or_unknown(activity, "activityName")
        ));
        result.push_str(&format!("Type: {type_key}\n"));
        result.push_str(&format!(
            "Date: {}\n",
            format::str_or_unknown(activity, "startTimeLocal")
        ));
        result.push_str(&format!("ID: {id}\n\n"));
    }
    result
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn summary_lists_one_block_per_activity() {
        let activities = vec![
            json!({
                "activityId": 123,
                "activityName": "Morning Run",
                "activityType": {"typeKey": "running"},
                "startTimeLocal": "2024-06-01 07:00:00"
            }),
            json!({"activityName": "Lunch Ride"}),
        ];

        let summary = summarize(&activities);
        assert!(summary.starts_with("Last 2 activities:"));
        assert!(summary.contains("--- Activity 1 ---"));
        assert!(summary.contains("Activity: Morning Run"));
        assert!(summary.contains("Type: running"));
        assert!(summary.contains("ID: 123"));
        assert!(summary.contains("--- Activity 2 ---"));
        assert!(summary.contains("Type: Unknown"));
    }

    #[test]
    fn empty_list_reports_no_activities() {
        assert_eq!(summarize(&[]), "No activities found.");
    }
}
