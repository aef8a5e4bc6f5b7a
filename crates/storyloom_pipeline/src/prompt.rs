//! Prompt construction for story generation.

use storyloom_core::{CharacterProfile, GenerateRequest, Message};

/// Instructions sent as the system turn of every story request.
pub const SYSTEM_PROMPT: &str = concat!(
    "You are a visual storytelling artist and illustrator who specializes in creating emotional, wordless picture books. ",
    "Your job is to write a warm and moving story based on a given character and theme, and then break it down into a story summary, full narrative, and 10 image prompts.\n\n",
    "Please strictly reply using the following format:\n\n",
    "###STORY:\n(Full story in English)\n\n",
    "###SUMMARY:\n(1-2 sentence overview)\n\n",
    "###PROMPTS:\n- prompt_1\n- prompt_2\n...\n- prompt_10\n\n",
    "Do NOT include any other commentary, explanation, or text outside of this format.\n",
    "All prompts must be visual, concise, and suitable for use in image generation tools (no dialogue or captions)."
);

/// The user turn naming today's character, theme and prior memory.
///
/// ```
/// use storyloom_pipeline::build_user_prompt;
///
/// let prompt = build_user_prompt("Rabbit Chef", "creative_cooking", "");
/// assert!(prompt.starts_with("Today's character: Rabbit Chef\nTheme: creative_cooking\n"));
/// assert!(prompt.ends_with("Please write a new story and 10 visual prompts accordingly."));
/// ```
pub fn build_user_prompt(character_name: &str, theme_slug: &str, memory: &str) -> String {
    format!(
        "Today's character: {}\nTheme: {}\nPrevious memory: {}\nPlease write a new story and 10 visual prompts accordingly.",
        character_name, theme_slug, memory
    )
}

/// Whitespace-separated word count, the pipeline's cheap token estimate.
pub fn word_count(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

/// A story request together with its token estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryPrompt {
    /// Request for the language model
    pub request: GenerateRequest,
    /// Word count of system and user prompt joined with no separator
    pub token_count: u64,
}

/// Build the full request for one character.
pub fn build_story_prompt(
    profile: &CharacterProfile,
    theme_slug: &str,
    memory: &str,
    max_tokens: u32,
    temperature: f32,
) -> StoryPrompt {
    let request = GenerateRequest {
        messages: vec![
            Message::system(SYSTEM_PROMPT),
            Message::user(build_user_prompt(&profile.name, theme_slug, memory)),
        ],
        max_tokens: Some(max_tokens),
        temperature: Some(temperature),
        model: None,
    };
    let token_count = word_count(&request.prompt_text());
    StoryPrompt {
        request,
        token_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_count_joins_prompts_without_separator() {
        let profile = CharacterProfile::default();
        let prompt = build_story_prompt(&profile, "rain", "", 2048, 1.0);
        let user = build_user_prompt("Unknown", "rain", "");
        let joined = format!("{}{}", SYSTEM_PROMPT, user);
        assert_eq!(prompt.token_count, word_count(&joined));
        // The last system word and the first user word fuse into one.
        assert_eq!(
            prompt.token_count,
            word_count(SYSTEM_PROMPT) + word_count(&user) - 1
        );
    }

    #[test]
    fn test_request_carries_sampling() {
        let prompt = build_story_prompt(&CharacterProfile::default(), "rain", "met a frog", 2048, 1.0);
        assert_eq!(prompt.request.max_tokens, Some(2048));
        assert_eq!(prompt.request.temperature, Some(1.0));
        assert!(prompt.request.messages[1].content.contains("Previous memory: met a frog"));
    }
}
