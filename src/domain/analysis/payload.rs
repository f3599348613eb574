//! Inference payload

use super::encoded_part::EncodedPart;
use super::prompt::InstructionPrompt;

/// One element of the payload's part sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadPart {
    Text(String),
    Inline(EncodedPart),
}

/// The instruction text followed by the encoded binaries, built fresh per request.
///
/// The instruction is always the first part; encoded parts can only be
/// appended after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferencePayload {
    parts: Vec<PayloadPart>,
}

impl InferencePayload {
    pub fn new(instruction: InstructionPrompt) -> Self {
        Self {
            parts: vec![PayloadPart::Text(instruction.into_content())],
        }
    }

    /// Append an encoded binary after everything added so far
    pub fn push(&mut self, part: EncodedPart) {
        self.parts.push(PayloadPart::Inline(part));
    }

    pub fn with_part(mut self, part: EncodedPart) -> Self {
        self.push(part);
        self
    }

    pub fn parts(&self) -> &[PayloadPart] {
        &self.parts
    }

    pub fn instruction(&self) -> &str {
        match &self.parts[0] {
            PayloadPart::Text(text) => text,
            PayloadPart::Inline(_) => unreachable!("payload always starts with the instruction"),
        }
    }

    /// Encoded parts in the order they were appended
    pub fn inline_parts(&self) -> impl Iterator<Item = &EncodedPart> {
        self.parts.iter().filter_map(|p| match p {
            PayloadPart::Inline(part) => Some(part),
            PayloadPart::Text(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Always false: the instruction is always present
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Approximate wire size of the text carried by all parts
    pub fn text_bytes(&self) -> usize {
        self.parts
            .iter()
            .map(|p| match p {
                PayloadPart::Text(text) => text.len(),
                PayloadPart::Inline(part) => part.data().len(),
            })
            .sum()
    }
}
