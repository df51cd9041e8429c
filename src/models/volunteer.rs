use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::{count_digits, is_http_url, is_valid_email, trimmed_len, AppError};

/// Approval state of a volunteer application. Only an admin changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolunteerStatus {
    Pending,
    Approved,
    Rejected,
}

impl VolunteerStatus {
    pub const ALL: [VolunteerStatus; 3] = [
        VolunteerStatus::Pending,
        VolunteerStatus::Approved,
        VolunteerStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VolunteerStatus::Pending => "pending",
            VolunteerStatus::Approved => "approved",
            VolunteerStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for VolunteerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VolunteerStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(VolunteerStatus::Pending),
            "approved" | "approve" => Ok(VolunteerStatus::Approved),
            "rejected" | "reject" => Ok(VolunteerStatus::Rejected),
            other => Err(format!(
                "Unknown volunteer status '{}' (expected pending, approved or rejected)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RolePreference {
    #[serde(rename = "Mentor")]
    Mentor,
    #[serde(rename = "Content Creator")]
    ContentCreator,
    #[serde(rename = "Tech Volunteer")]
    TechVolunteer,
}

impl RolePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            RolePreference::Mentor => "Mentor",
            RolePreference::ContentCreator => "Content Creator",
            RolePreference::TechVolunteer => "Tech Volunteer",
        }
    }
}

impl fmt::Display for RolePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RolePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "mentor" => Ok(RolePreference::Mentor),
            "contentcreator" => Ok(RolePreference::ContentCreator),
            "techvolunteer" => Ok(RolePreference::TechVolunteer),
            _ => Err(format!(
                "Unknown role preference '{}' (expected Mentor, Content Creator or Tech Volunteer)",
                s
            )),
        }
    }
}

/// Volunteer record as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Volunteer {
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub profession: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default)]
    pub years_of_experience: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin_profile: Option<String>,
    pub role_preference: RolePreference,
    #[serde(default)]
    pub availability_hours_per_week: u32,
    #[serde(default)]
    pub preferred_schedule: Vec<String>,
    #[serde(default)]
    pub areas_of_expertise: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motivation: Option<String>,
    pub status: VolunteerStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Volunteer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Only approved volunteers can be booked.
    pub fn is_bookable(&self) -> bool {
        self.status == VolunteerStatus::Approved
    }
}

/// Self-registration payload sent to `POST /volunteers/register`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerRegistration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub profession: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    pub years_of_experience: u32,
    #[serde(default)]
    pub linkedin_profile: String,
    pub role_preference: RolePreference,
    pub availability_hours_per_week: u32,
    pub preferred_schedule: Vec<String>,
    pub areas_of_expertise: Vec<String>,
    pub motivation: String,
    pub skills: Vec<String>,
}

pub const MIN_MOTIVATION_CHARS: usize = 50;
pub const MIN_PHONE_DIGITS: usize = 10;

impl VolunteerRegistration {
    /// Applies the registration form rules; the first failing rule wins.
    pub fn validate(&self) -> Result<(), AppError> {
        let fail = |msg: &str| Err(AppError::Validation(msg.to_string()));

        if trimmed_len(&self.first_name) < 2 {
            return fail("First name must be at least 2 characters");
        }
        if trimmed_len(&self.last_name) < 2 {
            return fail("Last name must be at least 2 characters");
        }
        if !is_valid_email(&self.email) {
            return fail("Invalid email address");
        }
        if count_digits(&self.phone) < MIN_PHONE_DIGITS {
            return fail("Phone number must be at least 10 digits");
        }
        if trimmed_len(&self.profession) < 2 {
            return fail("Profession is required");
        }
        if !self.linkedin_profile.trim().is_empty() && !is_http_url(&self.linkedin_profile) {
            return fail("Invalid LinkedIn URL");
        }
        if self.availability_hours_per_week < 1 {
            return fail("Availability must be at least 1 hour per week");
        }
        if non_blank(&self.preferred_schedule) == 0 {
            return fail("At least one schedule preference is required");
        }
        if non_blank(&self.areas_of_expertise) == 0 {
            return fail("At least one area of expertise is required");
        }
        if trimmed_len(&self.motivation) < MIN_MOTIVATION_CHARS {
            return fail("Please provide a detailed motivation (minimum 50 characters)");
        }
        if non_blank(&self.skills) == 0 {
            return fail("At least one skill is required");
        }
        Ok(())
    }
}

fn non_blank(values: &[String]) -> usize {
    values.iter().filter(|v| !v.trim().is_empty()).count()
}

/// Counts shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VolunteerStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

impl VolunteerStats {
    pub fn from_volunteers(volunteers: &[Volunteer]) -> Self {
        volunteers.iter().fold(VolunteerStats::default(), |mut acc, v| {
            acc.total += 1;
            match v.status {
                VolunteerStatus::Pending => acc.pending += 1,
                VolunteerStatus::Approved => acc.approved += 1,
                VolunteerStatus::Rejected => acc.rejected += 1,
            }
            acc
        })
    }
}
