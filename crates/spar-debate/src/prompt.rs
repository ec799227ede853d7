//! Prompt composition for debate replies and stance analysis

use spar_core::{ConversationTurn, Depth, Policy, Stance};

/// Base persona shared by every stance
pub const BASE_PERSONA: &str = "You are a debate partner that engages in thoughtful discussion \
     in a completely natural, conversational way.";

/// How replies should flow
pub const RESPONSE_STRUCTURE: &str = "Your responses should flow naturally like a real \
     conversation, not following any rigid structure. Don't explicitly label your responses with \
     sections or headings. If you want to acknowledge the user's point, challenge it, and ask a \
     question, do so in a way that feels like natural dialogue.";

/// Formatting constraints backing up the sanitizer
pub const FORMATTING_CONSTRAINTS: &str = "IMPORTANT: Write as if you're texting or messaging a \
     friend - completely natural with no formatting. Never use asterisks (*), bullet points, or \
     numbered lists. Don't organize content into sections with headers like 'Positive Impacts:' \
     or 'Challenges:'. Just write a normal response as one person would write to another. If you \
     need to make multiple points, just write them as regular sentences in a paragraph.";

/// Instruction fragment for a stance
pub fn stance_fragment(stance: Stance) -> &'static str {
    match stance {
        Stance::Challenging => {
            "Present strong counterarguments to the user's position in a natural way. Challenge \
             their assumptions and reasoning with critical thinking."
        }
        Stance::Supportive => {
            "While offering alternative perspectives, maintain a supportive, conversational tone."
        }
        Stance::Neutral => {
            "Present balanced viewpoints considering multiple perspectives in a natural way."
        }
    }
}

/// Instruction fragment for a depth
pub fn depth_fragment(depth: Depth) -> &'static str {
    match depth {
        Depth::Surface => "Keep explanations simple and accessible to beginners.",
        Depth::Deep => "Explore concepts at a deeper level with nuanced analysis.",
        Depth::Expert => {
            "Provide expert-level insights and reference advanced concepts in this domain."
        }
    }
}

/// Builds model-facing prompts from the fragment table
#[derive(Debug, Clone, Default)]
pub struct PromptComposer {
    restate_policy: bool,
}

impl PromptComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also remind the model of the current stance/depth after the first turn
    pub fn restating_policy(mut self, restate: bool) -> Self {
        self.restate_policy = restate;
        self
    }

    /// The full system instruction for `policy`, space-joined
    pub fn system_instruction(policy: Policy) -> String {
        [
            BASE_PERSONA,
            stance_fragment(policy.stance),
            depth_fragment(policy.depth),
            RESPONSE_STRUCTURE,
            FORMATTING_CONSTRAINTS,
        ]
        .join(" ")
    }

    /// Prompt for one generated turn.
    ///
    /// The first turn carries the whole system instruction inline. Later turns
    /// send the user text as-is and rely on the replayed history for persona.
    pub fn compose(&self, user_text: &str, policy: Policy, is_first_turn: bool) -> String {
        if is_first_turn {
            let instruction = Self::system_instruction(policy);
            format!("{instruction}\n\nUser query: {user_text}")
        } else if self.restate_policy {
            format!(
                "(Stay in character. {} {})\n\n{}",
                stance_fragment(policy.stance),
                depth_fragment(policy.depth),
                user_text
            )
        } else {
            user_text.to_string()
        }
    }

    /// Stance analysis request over the recent turns plus the new message
    pub fn analysis_prompt(recent: &[ConversationTurn], message: &str) -> String {
        let conversation = recent
            .iter()
            .map(|turn| {
                let sender = turn.sender.as_str().to_uppercase();
                format!("{}: {}", sender, turn.content)
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Analyze the following conversation and determine:\n\
             1. If the user seems open to challenge (answer: \"challenging\"), needs more \
             supportive engagement (answer: \"supportive\"), or would benefit from a balanced view \
             (answer: \"neutral\")\n\
             2. The appropriate depth level for the response: surface, deep, or expert\n\
             Format your response exactly as: stance: [stance], depth: [depth]\n\n\
             Conversation:\n{}\nUSER: {}",
            conversation, message
        )
    }

    /// Request used to open a debate from a bare topic
    pub fn opening_prompt(topic: &str) -> String {
        format!(
            "I want to discuss this topic: \"{}\". Share your thoughts on this in a completely \
             natural, conversational way. No formatting, headers, or bullet points - just write \
             like you're texting a friend. Present different perspectives on the topic and end \
             with a thought-provoking question.",
            topic
        )
    }
}
