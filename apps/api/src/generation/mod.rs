//! Single-shot letter generation: context assembly, the fixed system prompt,
//! resume upload handling, and the HTTP handlers that tie them to storage
//! and the LLM client.

pub mod context;
pub mod handlers;
pub mod prompts;
pub mod upload;
