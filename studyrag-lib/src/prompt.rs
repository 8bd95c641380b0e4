//! Prompt templates for the study tasks
//!
//! Each template embeds an assembled context string and a fixed instruction
//! block into one prompt. Task output formats (option labels, Q/A layout)
//! live here so downstream parsing of generated text stays stable.

/// Prompt for answering a question from retrieved context.
pub fn answer(context: &str, question: &str) -> String {
    format!(
        "You are a helpful study assistant for a student. You must answer ONLY \
using the given context from their notes.

Context:
{context}

Question: {question}

Instructions:
- Answer in clear, simple language.
- Keep the answer within 4-8 lines.
- If you use any specific info, mention the page in square brackets like [p. 3].
- If the answer is not in the context, say you cannot find it in the notes.
Answer:
"
    )
}

/// Prompt for summarizing the whole corpus for revision.
pub fn summary(context: &str) -> String {
    format!(
        "You are a study assistant. Summarize the following notes for exam revision.

Context:
{context}

Instructions:
- Give a structured summary with bullet points.
- Highlight key definitions, formulas, or concepts.
- Keep it concise but meaningful (around 10-15 bullet points).
Summary:
"
    )
}

/// Prompt for generating multiple-choice questions from the corpus.
pub fn mcqs(context: &str, num_questions: usize) -> String {
    format!(
        "You are a question paper setter. Create {num_questions} multiple-choice \
questions (MCQs) from the student's notes.

Context:
{context}

Instructions:
- Each question must have 4 options (A, B, C, D).
- Mark the correct answer clearly after each question.
- Cover different topics from the notes.
MCQs:
"
    )
}

/// Prompt for generating Q/A flashcards from the corpus.
pub fn flashcards(context: &str, num_cards: usize) -> String {
    format!(
        "You are creating flashcards for revision. From the notes below, create \
{num_cards} Q-A style flashcards.

Context:
{context}

Instructions:
- Format as: Q: ...  A: ...
- Each question should test one core concept.
- Keep answers short (1-3 lines).
Flashcards:
"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_embeds_context_and_question() {
        let p = answer("[notes.pdf - p.2] osmosis is diffusion of water", "What is osmosis?");
        assert!(p.contains("[notes.pdf - p.2] osmosis is diffusion of water"));
        assert!(p.contains("Question: What is osmosis?"));
        assert!(p.ends_with("Answer:\n"));
    }

    #[test]
    fn test_mcqs_renders_question_count() {
        let p = mcqs("some context", 8);
        assert!(p.contains("Create 8 multiple-choice"));
        assert!(p.contains("4 options (A, B, C, D)"));
    }

    #[test]
    fn test_flashcards_renders_card_count_and_format() {
        let p = flashcards("some context", 12);
        assert!(p.contains("12 Q-A style flashcards"));
        assert!(p.contains("Q: ...  A: ..."));
    }
}
