use std::collections::BTreeSet;

use crate::api::VolunteerApi;
use crate::models::{RolePreference, Session, SessionStatus, Volunteer};
use crate::utils::{AppError, AppResult};

/// Public list of approved mentors that mentees browse and book from.
#[derive(Debug, Clone, Default)]
pub struct MentorDirectory {
    mentors: Vec<Volunteer>,
}

/// Mentor search form. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MentorFilter {
    pub term: String,
    pub expertise: Option<String>,
    pub role: Option<RolePreference>,
}

impl MentorDirectory {
    /// Fetches `GET /volunteers/approved`. Anything not approved is dropped
    /// so a lagging server cannot surface unbookable mentors.
    pub async fn load(api: &dyn VolunteerApi) -> AppResult<Self> {
        let volunteers = api.list_approved_volunteers().await?;
        let fetched = volunteers.len();
        let mentors: Vec<Volunteer> = volunteers
            .into_iter()
            .filter(Volunteer::is_bookable)
            .collect();
        if mentors.len() != fetched {
            log::warn!(
                "⚠️  Dropped {} non-approved volunteers from the mentor directory",
                fetched - mentors.len()
            );
        }
        log::info!("👥 Loaded {} approved mentors", mentors.len());
        Ok(MentorDirectory { mentors })
    }

    pub fn from_volunteers(volunteers: Vec<Volunteer>) -> Self {
        MentorDirectory {
            mentors: volunteers.into_iter().filter(Volunteer::is_bookable).collect(),
        }
    }

    pub fn mentors(&self) -> &[Volunteer] {
        &self.mentors
    }

    pub fn len(&self) -> usize {
        self.mentors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mentors.is_empty()
    }

    pub fn find(&self, volunteer_id: &str) -> Option<&Volunteer> {
        self.mentors.iter().find(|m| m.id == volunteer_id)
    }

    /// The mentor a booking may target, or a validation error naming why not.
    pub fn bookable(&self, volunteer_id: &str) -> AppResult<&Volunteer> {
        self.find(volunteer_id).ok_or_else(|| {
            AppError::Validation(format!(
                "Mentor {} is not available for booking",
                volunteer_id
            ))
        })
    }

    pub fn filter(&self, filter: &MentorFilter) -> Vec<&Volunteer> {
        let term = filter.term.trim().to_lowercase();
        let expertise = filter
            .expertise
            .as_deref()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty());

        self.mentors
            .iter()
            .filter(|m| term.is_empty() || matches_term(m, &term))
            .filter(|m| match &expertise {
                Some(e) => m.areas_of_expertise.iter().any(|a| a.to_lowercase().contains(e)),
                None => true,
            })
            .filter(|m| filter.role.map_or(true, |r| m.role_preference == r))
            .collect()
    }

    /// Distinct expertise areas, sorted, for the filter menu.
    pub fn expertise_areas(&self) -> Vec<String> {
        self.mentors
            .iter()
            .flat_map(|m| m.areas_of_expertise.iter())
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn roles(&self) -> Vec<RolePreference> {
        let mut roles: Vec<RolePreference> = Vec::new();
        for mentor in &self.mentors {
            if !roles.contains(&mentor.role_preference) {
                roles.push(mentor.role_preference);
            }
        }
        roles.sort_by_key(|r| r.as_str());
        roles
    }
}

fn matches_term(mentor: &Volunteer, term: &str) -> bool {
    let contains = |s: &str| s.to_lowercase().contains(term);
    contains(mentor.full_name().as_str())
        || contains(mentor.profession.as_str())
        || mentor.organization.as_deref().map_or(false, contains)
        || mentor.areas_of_expertise.iter().any(|a| contains(a.as_str()))
}

/// Volunteer-dashboard search over requester name, email and topic, plus an optional status.
pub fn filter_sessions<'a>(
    sessions: &'a [Session],
    term: &str,
    status: Option<SessionStatus>,
) -> Vec<&'a Session> {
    let term = term.trim().to_lowercase();
    sessions
        .iter()
        .filter(|s| status.map_or(true, |st| s.status == st))
        .filter(|s| {
            term.is_empty()
                || s.requester.name.to_lowercase().contains(&term)
                || s.requester.email.to_lowercase().contains(&term)
                || s.topic.to_lowercase().contains(&term)
        })
        .collect()
}
