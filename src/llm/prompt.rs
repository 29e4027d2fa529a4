// ABOUTME: Assembles the grounded system prompt from a user context snapshot
// ABOUTME: Fixed AROMI persona plus optional profile and assessment blocks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

//! System prompt assembly
//!
//! Deterministic for a given context: no timestamps, no randomness, safe to
//! log. A missing profile or assessment omits that block entirely rather than
//! rendering a "none" section; missing scalar fields render as `Not set` and
//! missing list fields as `None`.

use std::borrow::Cow;
use std::fmt::Write;

use aromi_core::{HealthAssessment, UserContext, UserProfile};

/// Fixed persona and tone instructions, independent of user data
const PERSONA: &str = "You are AROMI, an AI-powered health and fitness coach for ArogyaMitra.
You are warm, motivating, and knowledgeable about fitness, nutrition, and wellness.
You provide personalized advice based on the user's profile and health data.
Always be encouraging and provide actionable, specific advice.
Focus on Indian wellness practices and cuisine when relevant.
Keep responses concise but informative (2-3 paragraphs max unless detailed advice is requested).
If the user hasn't completed their health assessment, gently encourage them to do so.";

/// Closing reminder kept after the data blocks
const REMINDER: &str = "Remember: You are AROMI (AROgyaMItra's AI coach). Be supportive and evidence-based in your recommendations.";

/// Placeholder for an absent or empty scalar field
const NOT_SET: &str = "Not set";

/// Placeholder for an absent or empty list field
const NONE: &str = "None";

/// Build the full system prompt for one request
#[must_use]
pub fn build_system_prompt(context: Option<&UserContext>) -> String {
    let profile_info = context
        .and_then(|c| c.profile.as_ref())
        .map(profile_block)
        .unwrap_or_default();
    let assessment_info = context
        .and_then(|c| c.assessment.as_ref())
        .map(assessment_block)
        .unwrap_or_default();

    format!("{PERSONA}\n\n{profile_info}\n\n{assessment_info}\n\n{REMINDER}")
}

fn profile_block(profile: &UserProfile) -> String {
    let mut block = String::from("User Profile:\n");
    let _ = writeln!(block, "- Name: {}", text_field(profile.full_name.as_deref()));
    let _ = writeln!(block, "- Age: {}", number_field(profile.age.map(f64::from)));
    let _ = writeln!(block, "- Weight: {}", unit_field(profile.weight_kg, "kg"));
    let _ = writeln!(block, "- Height: {}", unit_field(profile.height_cm, "cm"));
    let _ = writeln!(
        block,
        "- Fitness Goal: {}",
        text_field(profile.fitness_goal.as_deref())
    );
    let _ = writeln!(
        block,
        "- Activity Level: {}",
        text_field(profile.activity_level.as_deref())
    );
    let _ = write!(
        block,
        "- Dietary Preference: {}",
        text_field(profile.dietary_preference.as_deref())
    );
    block
}

fn assessment_block(assessment: &HealthAssessment) -> String {
    let mut block = String::from("Health Assessment:\n");
    let _ = writeln!(
        block,
        "- BMI: {} ({})",
        number_field(assessment.bmi),
        assessment
            .bmi_category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or("N/A")
    );
    let _ = writeln!(
        block,
        "- Health Conditions: {}",
        list_field(assessment.health_conditions.as_deref())
    );
    let _ = writeln!(
        block,
        "- Injuries: {}",
        list_field(assessment.injuries.as_deref())
    );
    let _ = writeln!(
        block,
        "- Sleep: {} hours",
        number_field(assessment.sleep_hours)
    );
    let _ = write!(
        block,
        "- Stress Level: {}",
        text_field(assessment.stress_level.as_deref())
    );
    block
}

fn text_field(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or(NOT_SET)
}

fn number_field(value: Option<f64>) -> Cow<'static, str> {
    value.map_or(Cow::Borrowed(NOT_SET), |v| Cow::Owned(v.to_string()))
}

fn unit_field(value: Option<f64>, unit: &str) -> Cow<'static, str> {
    value.map_or(Cow::Borrowed(NOT_SET), |v| Cow::Owned(format!("{v} {unit}")))
}

fn list_field(values: Option<&[String]>) -> Cow<'_, str> {
    match values {
        Some(items) if !items.is_empty() => Cow::Owned(items.join(", ")),
        _ => Cow::Borrowed(NONE),
    }
}
