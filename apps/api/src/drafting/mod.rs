// Prompt drafting workflow: character-consistency scan, context assembly,
// and the generate/revise endpoints.
// All LLM calls go through llm_client, never the Anthropic API directly.

pub mod consistency;
pub mod handlers;
pub mod prompts;
