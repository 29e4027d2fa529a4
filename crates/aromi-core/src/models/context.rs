// ABOUTME: User context snapshot DTOs for grounding the coach system prompt
// ABOUTME: Profile and health assessment records, every field optional by design
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

use serde::{Deserialize, Serialize};

/// Immutable per-request snapshot of the caller's profile and assessment
///
/// Constructed fresh from collaborator data for each request and discarded
/// afterwards. Absent, empty, and partially populated snapshots are all
/// valid; the server renders only what is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserContext {
    /// Basic profile data, if the user has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    /// Health assessment results, if completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment: Option<HealthAssessment>,
}

/// User profile fields relevant to coaching
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Age in years
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Body weight in kilograms
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    /// Height in centimeters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height_cm: Option<f64>,
    /// Stated fitness goal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitness_goal: Option<String>,
    /// Self-reported activity level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<String>,
    /// Dietary preference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_preference: Option<String>,
}

/// Health assessment results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthAssessment {
    /// Body mass index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    /// BMI category label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi_category: Option<String>,
    /// Known health conditions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_conditions: Option<Vec<String>>,
    /// Current or past injuries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injuries: Option<Vec<String>>,
    /// Average nightly sleep in hours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<f64>,
    /// Self-reported stress level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_level: Option<String>,
}
