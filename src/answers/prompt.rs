//! Prompt construction for the answer flows.

const SYS_PREFIX: &str = "You are interviewing for a ";
const SYS_SUFFIX: &str = " position. You will receive an audio transcription of the question. \
     Understand the question and answer it clearly.\n";

const SHORT_INSTRUCTION: &str = "Concisely respond, limiting your answer to 50 words.";
const LONG_INSTRUCTION: &str =
    "Before answering, think step by step and reply in no more than 150 words.";

/// Question text used when the vision caller supplies none.
pub const DEFAULT_VISION_QUESTION: &str =
    "Analyze this screenshot. Decide if it is a multiple-choice, coding/DSA, or system-design \
     question. Follow the rules below.";

/// Second-round instruction when the first vision reply only classified the
/// question instead of answering it.
pub const FOLLOW_UP_INSTRUCTION: &str =
    "Provide the complete answer, not a classification. If the screenshot lists multiple system \
     design prompts, give a structured response for each item using the required sections \
     (Overview, Components, Data Flow, Storage, Scaling, Trade-offs). Never mention that it is a \
     system-design question; just deliver the design(s).";

/// System prompt for image questions: detect the question type and answer
/// in the matching format without ever naming the type.
pub const VISION_SYSTEM_PROMPT: &str = "\
You are an AI interview assistant analyzing questions from screenshots or photos.

Detect the question type and answer in the correct format. Never mention the question type in your answer.

====================
SYSTEM-DESIGN QUESTION DETECTION
====================
Treat the question as SYSTEM DESIGN if it includes ANY of these:
- 'Design a system that...'
- 'How would you design...'
- 'Architecture for...'
- 'High-level design / Low-level design'
- Descriptions involving components like: API gateway, cache, load balancer, queue, microservices, workers.
- Questions about scaling, reliability, storage, concurrency, or traffic.
- Images/diagrams with boxes, arrows, flows, or service components.

====================
ANSWER FORMATS
====================
1. MULTIPLE-CHOICE -> Return EXACTLY: `Option <letter>: <text>` (no explanations).

2. CODING / DSA -> ONLY executable Python in a ```python block (inline comments allowed).

3. SYSTEM DESIGN -> Provide a full solution with the sections:
   - Overview
   - Core Components
   - Data Flow (step-by-step)
   - Storage & Databases
   - Scaling & Reliability
   - Failure Handling
   - Trade-offs & Alternatives

   For every component you mention, include a short, beginner-friendly explanation immediately \
after the component name and how it would be used in practice. These explanations must be \
concise but informative.

4. ANY OTHER QUESTION -> Answer in four clear sentences.

====================
IMPORTANT RULES
====================
- Never identify the question type in your output.
- Never summarize the prompt.
- For system design: always provide concrete, detailed, sequential architecture.
- Explanations must appear immediately next to each component.
";

/// Build the interview system prompt for one answer length.
pub fn build_context_prompt(position: &str, context: &str, short: bool) -> String {
    let mut prompt = format!("{}{}{}", SYS_PREFIX, position, SYS_SUFFIX);
    prompt.push_str(if short {
        SHORT_INSTRUCTION
    } else {
        LONG_INSTRUCTION
    });
    let trimmed = context.trim();
    if !trimmed.is_empty() {
        prompt.push_str("\n\nReference Information:\n");
        prompt.push_str(trimmed);
    }
    prompt
}
