//! # Prompt Builder Tests
//!
//! Validates that the completion prompt carries the knowledge base and question
//! verbatim, together with the fixed rules that confine the model to the context.

use askdocs::prompts::assistant::{
    CONTEXT_ONLY_RULE, DEFAULT_LANGUAGE, DEFAULT_REFUSAL, DOCUMENT_CONTEXT_HEADING, ROLE_STATEMENT,
    USER_QUESTION_HEADING,
};
use askdocs::{build_prompt, AssistantProfile};

/// Identical inputs always produce byte-identical prompts.
#[test]
fn test_build_prompt_is_deterministic() {
    let profile = AssistantProfile::default();
    let knowledge = "Annual budget: 15 billion.\nRoads built: 120 km.\n";
    let question = "How many roads were built?";

    let first = build_prompt(&profile, knowledge, question);
    let second = build_prompt(&profile, knowledge, question);

    assert_eq!(first.as_bytes(), second.as_bytes());
}

/// The question and the knowledge base appear as literal substrings.
#[test]
fn test_build_prompt_embeds_context_and_question() {
    let profile = AssistantProfile::default();
    let knowledge = "Section 4.2: The {question} placeholder must stay literal.\n";
    let question = "What does section 4.2 say about {context}?";

    let prompt = build_prompt(&profile, knowledge, question);

    assert!(prompt.contains(knowledge));
    assert!(prompt.contains(question));
}

/// Sections appear in a fixed order: role, context, rules, question.
#[test]
fn test_build_prompt_section_order() {
    let profile = AssistantProfile::default();
    let prompt = build_prompt(&profile, "KB-TEXT", "QUESTION-TEXT");

    let role = prompt.find(ROLE_STATEMENT).expect("role statement");
    let context = prompt.find(DOCUMENT_CONTEXT_HEADING).expect("context heading");
    let kb = prompt.find("KB-TEXT").expect("knowledge text");
    let rule = prompt.find(CONTEXT_ONLY_RULE).expect("context-only rule");
    let heading = prompt.find(USER_QUESTION_HEADING).expect("question heading");
    let question = prompt.find("QUESTION-TEXT").expect("question text");

    assert!(role < context);
    assert!(context < kb);
    assert!(kb < rule);
    assert!(rule < heading);
    assert!(heading < question);
}

/// An empty knowledge base still yields the context-only rule and the refusal sentence.
#[test]
fn test_build_prompt_with_empty_knowledge_keeps_rules() {
    let profile = AssistantProfile::default();

    let prompt = build_prompt(&profile, "", "Who is the governor?");

    assert!(prompt.contains(CONTEXT_ONLY_RULE));
    assert!(prompt.contains(DEFAULT_REFUSAL));
    assert!(prompt.contains(&format!("{DOCUMENT_CONTEXT_HEADING}\n\n")));
}

/// The language rule names the language the answer must be written in.
#[test]
fn test_default_language_rule() {
    let prompt = build_prompt(&AssistantProfile::default(), "", "Apa kabar?");

    assert!(prompt.contains(&format!(
        "1. Answer politely and professionally in {DEFAULT_LANGUAGE}."
    )));
}

/// Rules are numbered in order and carry the configured language and refusal.
#[test]
fn test_build_prompt_uses_profile_wording() {
    let profile = AssistantProfile {
        organization: Some("the Regional Planning Agency".to_string()),
        language: "English".to_string(),
        refusal: "Sorry, that information is not in our documents.".to_string(),
        ..Default::default()
    };

    let prompt = build_prompt(&profile, "", "Anything?");

    assert!(prompt.starts_with("You are a professional AI assistant for the Regional Planning Agency."));
    assert!(prompt.contains("1. Answer politely and professionally in English."));
    assert!(prompt.contains(&format!("2. {CONTEXT_ONLY_RULE}")));
    assert!(prompt.contains(
        "3. If the answer is not found in the documents, say: \"Sorry, that information is not in our documents.\""
    ));
}

/// A blank organization name falls back to the generic role statement.
#[test]
fn test_blank_organization_uses_generic_role() {
    let profile = AssistantProfile {
        organization: Some("   ".to_string()),
        ..Default::default()
    };

    assert_eq!(profile.role_statement(), ROLE_STATEMENT);
}
