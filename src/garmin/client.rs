//! Authenticated Garmin Connect client.
//!
//! One instance exists per process, constructed by the session bootstrapper
//! and shared read-only by every tool module. All data methods are opaque
//! pass-throughs returning the upstream JSON.

use chrono::NaiveDate;
use reqwest::{header::AUTHORIZATION, StatusCode};
use serde_json::Value;

use crate::lib::errors::ApiError;

use super::session::SessionToken;

const CONNECT_API_BASE: &str = "https://connectapi.garmin.com";

/// Live, authenticated capability object bound to one session token.
///
/// The session is never replaced after construction; `reqwest::Client` is
/// internally reference-counted, so concurrent tool calls are safe.
pub struct GarminClient {
    http: reqwest::Client,
    session: SessionToken,
    display_name: String,
    profile_id: i64,
}

impl GarminClient {
    /// Bind a session to the connect API, verifying it upstream.
    ///
    /// The social profile fetch doubles as the session validity probe and
    /// caches the identifiers the wellness endpoints address users by.
    pub(crate) async fn connect(
        http: reqwest::Client,
        session: SessionToken,
    ) -> Result<Self, ApiError> {
        let mut client = Self {
            http,
            session,
            display_name: String::new(),
            profile_id: 0,
        };
        let profile = client.get_user_profile().await?;
        client.display_name = profile
            .get("displayName")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        client.profile_id = profile
            .get("profileId")
            .and_then(Value::as_i64)
            .unwrap_or_default();
        Ok(client)
    }

    pub fn session(&self) -> &SessionToken {
        &self.session
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        let url = format!("{CONNECT_API_BASE}{path}");
        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, self.session.oauth2.bearer())
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
            return Err(ApiError::Unauthorized {
                status: status.as_u16(),
            });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|err| ApiError::Decode {
            endpoint: path.to_string(),
            reason: err.to_string(),
        })
    }

    // Activity management

    pub async fn get_activities(&self, start: u32, limit: u32) -> Result<Value, ApiError> {
        self.get(
            "/activitylist-service/activities/search/activities",
            &[("start", start.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    pub async fn get_activity(&self, activity_id: u64) -> Result<Value, ApiError> {
        self.get(&format!("/activity-service/activity/{activity_id}"), &[])
            .await
    }

    pub async fn get_activities_by_date(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        activity_type: Option<&str>,
    ) -> Result<Value, ApiError> {
        let mut query = vec![
            ("startDate", start.to_string()),
            ("endDate", end.to_string()),
        ];
        if let Some(kind) = activity_type {
            query.push(("activityType", kind.to_string()));
        }
        self.get("/activitylist-service/activities/search/activities", &query)
            .await
    }

    // Health & wellness

    pub async fn get_daily_summary(&self, date: NaiveDate) -> Result<Value, ApiError> {
        self.get(
            &format!("/usersummary-service/usersummary/daily/{}", self.display_name),
            &[("calendarDate", date.to_string())],
        )
        .await
    }

    pub async fn get_sleep_data(&self, date: NaiveDate) -> Result<Value, ApiError> {
        self.get(
            &format!(
                "/wellness-service/wellness/dailySleepData/{}",
                self.display_name
            ),
            &[
                ("date", date.to_string()),
                ("nonSleepBufferMinutes", "60".to_string()),
            ],
        )
        .await
    }

    pub async fn get_heart_rate_data(&self, date: NaiveDate) -> Result<Value, ApiError> {
        self.get(
            &format!(
                "/wellness-service/wellness/dailyHeartRate/{}",
                self.display_name
            ),
            &[("date", date.to_string())],
        )
        .await
    }

    pub async fn get_body_battery(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Value, ApiError> {
        self.get(
            "/wellness-service/wellness/bodyBattery/reports/daily",
            &[
                ("startDate", start.to_string()),
                ("endDate", end.to_string()),
            ],
        )
        .await
    }

    pub async fn get_stress_data(&self, date: NaiveDate) -> Result<Value, ApiError> {
        self.get(&format!("/wellness-service/wellness/dailyStress/{date}"), &[])
            .await
    }

    // User profile

    pub async fn get_user_profile(&self) -> Result<Value, ApiError> {
        self.get("/userprofile-service/socialProfile", &[]).await
    }

    pub async fn get_user_settings(&self) -> Result<Value, ApiError> {
        self.get("/userprofile-service/userprofile/user-settings", &[])
            .await
    }

    // Devices

    pub async fn get_devices(&self) -> Result<Value, ApiError> {
        self.get("/device-service/deviceregistration/devices", &[])
            .await
    }

    pub async fn get_device_settings(&self, device_id: u64) -> Result<Value, ApiError> {
        self.get(
            &format!("/device-service/deviceservice/device-info/settings/{device_id}"),
            &[],
        )
        .await
    }

    // Gear management

    pub async fn get_gear_list(&self) -> Result<Value, ApiError> {
        self.get(
            "/gear-service/gear/filterGear",
            &[("userProfilePk", self.profile_id.to_string())],
        )
        .await
    }

    pub async fn get_gear_defaults(&self) -> Result<Value, ApiError> {
        self.get(
            &format!("/gear-service/gear/user/{}/activityTypes", self.profile_id),
            &[],
        )
        .await
    }

    // Weight management

    pub async fn get_body_composition(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Value, ApiError> {
        self.get(
            "/weight-service/weight/dateRange",
            &[
                ("startDate", start.to_string()),
                ("endDate", end.to_string()),
            ],
        )
        .await
    }

    pub async fn get_weigh_ins(&self, start: NaiveDate, end: NaiveDate) -> Result<Value, ApiError> {
        self.get(
            &format!("/weight-service/weight/range/{start}/{end}"),
            &[("includeAll", "true".to_string())],
        )
        .await
    }

    // Challenges

    pub async fn get_adhoc_challenges(&self, start: u32, limit: u32) -> Result<Value, ApiError> {
        self.get(
            "/adhocchallenge-service/adHocChallenge/historical",
            &[("start", start.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    pub async fn get_badge_challenges(&self, start: u32, limit: u32) -> Result<Value, ApiError> {
        self.get(
            "/badgechallenge-service/badgeChallenge/completed",
            &[("start", start.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    // Training

    pub async fn get_training_status(&self, date: NaiveDate) -> Result<Value, ApiError> {
        self.get(
            &format!("/metrics-service/metrics/trainingstatus/aggregated/{date}"),
            &[],
        )
        .await
    }

    pub async fn get_training_readiness(&self, date: NaiveDate) -> Result<Value, ApiError> {
        self.get(&format!("/metrics-service/metrics/trainingreadiness/{date}"), &[])
            .await
    }

    // Workouts

    pub async fn get_workouts(&self, start: u32, limit: u32) -> Result<Value, ApiError> {
        self.get(
            "/workout-service/workouts",
            &[("start", start.to_string()), ("limit", limit.to_string())],
        )
        .await
    }

    pub async fn get_workout(&self, workout_id: u64) -> Result<Value, ApiError> {
        self.get(&format!("/workout-service/workout/{workout_id}"), &[])
            .await
    }

    // Data management

    pub async fn get_hydration_data(&self, date: NaiveDate) -> Result<Value, ApiError> {
        self.get(
            &format!("/usersummary-service/usersummary/hydration/daily/{date}"),
            &[],
        )
        .await
    }

    pub async fn get_spo2_data(&self, date: NaiveDate) -> Result<Value, ApiError> {
        self.get(&format!("/wellness-service/wellness/daily/spo2/{date}"), &[])
            .await
    }

    pub async fn get_blood_pressure(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Value, ApiError> {
        self.get(
            &format!("/bloodpressure-service/bloodpressure/range/{start}/{end}"),
            &[("includeAll", "true".to_string())],
        )
        .await
    }

    // Women's health

    pub async fn get_menstrual_data(&self, date: NaiveDate) -> Result<Value, ApiError> {
        self.get(
            &format!("/periodichealth-service/menstrualcycle/dayview/{date}"),
            &[],
        )
        .await
    }

    pub async fn get_pregnancy_summary(&self) -> Result<Value, ApiError> {
        self.get(
            "/periodichealth-service/menstrualcycle/pregnancysnapshot",
            &[],
        )
        .await
    }
}
