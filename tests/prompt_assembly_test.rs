// ABOUTME: Unit tests for system prompt assembly from user context snapshots
// ABOUTME: Block presence, placeholder rendering, and determinism properties
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ArogyaMitra Wellness

#![allow(missing_docs, clippy::unwrap_used)]

use aromi_coach_server::llm::build_system_prompt;
use aromi_core::{HealthAssessment, UserContext, UserProfile};

fn full_profile() -> UserProfile {
    UserProfile {
        full_name: Some("Priya Sharma".to_owned()),
        age: Some(29),
        weight_kg: Some(62.0),
        height_cm: Some(165.0),
        fitness_goal: Some("weight_loss".to_owned()),
        activity_level: Some("moderate".to_owned()),
        dietary_preference: Some("vegetarian".to_owned()),
    }
}

fn full_assessment() -> HealthAssessment {
    HealthAssessment {
        bmi: Some(22.8),
        bmi_category: Some("Normal".to_owned()),
        health_conditions: Some(vec!["hypertension".to_owned(), "asthma".to_owned()]),
        injuries: Some(vec!["knee strain".to_owned()]),
        sleep_hours: Some(7.5),
        stress_level: Some("moderate".to_owned()),
    }
}

#[test]
fn persona_renders_without_any_context() {
    let prompt = build_system_prompt(None);
    assert!(prompt.contains("You are AROMI"));
    assert!(prompt.contains("Indian wellness"));
    assert!(prompt.contains("Remember: You are AROMI"));
    assert!(!prompt.contains("User Profile:"));
    assert!(!prompt.contains("Health Assessment:"));
}

#[test]
fn empty_context_omits_both_blocks() {
    let context = UserContext::default();
    let prompt = build_system_prompt(Some(&context));
    assert!(!prompt.contains("User Profile:"));
    assert!(!prompt.contains("Health Assessment:"));
}

#[test]
fn profile_block_present_iff_profile_is() {
    let context = UserContext {
        profile: Some(full_profile()),
        assessment: None,
    };
    let prompt = build_system_prompt(Some(&context));
    assert!(prompt.contains("User Profile:"));
    assert!(!prompt.contains("Health Assessment:"));

    let context = UserContext {
        profile: None,
        assessment: Some(full_assessment()),
    };
    let prompt = build_system_prompt(Some(&context));
    assert!(!prompt.contains("User Profile:"));
    assert!(prompt.contains("Health Assessment:"));
}

#[test]
fn present_fields_render_labeled_values() {
    let context = UserContext {
        profile: Some(full_profile()),
        assessment: Some(full_assessment()),
    };
    let prompt = build_system_prompt(Some(&context));

    assert!(prompt.contains("- Name: Priya Sharma"));
    assert!(prompt.contains("- Age: 29"));
    assert!(prompt.contains("- Weight: 62 kg"));
    assert!(prompt.contains("- Height: 165 cm"));
    assert!(prompt.contains("- Fitness Goal: weight_loss"));
    assert!(prompt.contains("- BMI: 22.8 (Normal)"));
    assert!(prompt.contains("- Health Conditions: hypertension, asthma"));
    assert!(prompt.contains("- Injuries: knee strain"));
    assert!(prompt.contains("- Sleep: 7.5 hours"));
    assert!(prompt.contains("- Stress Level: moderate"));
}

#[test]
fn absent_scalars_render_not_set_never_empty() {
    let context = UserContext {
        profile: Some(UserProfile {
            full_name: Some(String::new()),
            ..UserProfile::default()
        }),
        assessment: None,
    };
    let prompt = build_system_prompt(Some(&context));

    // Present-but-empty renders the placeholder, same as absent
    assert!(prompt.contains("- Name: Not set"));
    assert!(prompt.contains("- Age: Not set"));
    assert!(prompt.contains("- Weight: Not set"));
    assert!(prompt.contains("- Height: Not set"));
    assert!(prompt.contains("- Fitness Goal: Not set"));
    assert!(prompt.contains("- Activity Level: Not set"));
    assert!(prompt.contains("- Dietary Preference: Not set"));
    assert!(!prompt.contains(": \n"));
}

#[test]
fn absent_or_empty_lists_render_none() {
    let context = UserContext {
        profile: None,
        assessment: Some(HealthAssessment {
            health_conditions: Some(Vec::new()),
            injuries: None,
            ..HealthAssessment::default()
        }),
    };
    let prompt = build_system_prompt(Some(&context));

    assert!(prompt.contains("- Health Conditions: None"));
    assert!(prompt.contains("- Injuries: None"));
    assert!(prompt.contains("- BMI: Not set (N/A)"));
    assert!(prompt.contains("- Sleep: Not set hours"));
}

#[test]
fn assembly_is_deterministic() {
    let context = UserContext {
        profile: Some(full_profile()),
        assessment: Some(full_assessment()),
    };
    assert_eq!(
        build_system_prompt(Some(&context)),
        build_system_prompt(Some(&context))
    );
}
