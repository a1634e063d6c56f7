//! Prompt construction for the three pipeline stages.
//!
//! Templates are fixed constants with `{placeholder}` slots filled by
//! `.replace()`. The builders are pure: no I/O, no failure mode; missing
//! optional sub-fields (first challenge, first trusted source, first `want`
//! item) degrade to `N/A` / `[]` instead of failing. Caller-supplied text is
//! interpolated as-is; it is not sanitized against prompt injection.

use crate::models::profile::UserProfile;
use crate::pipeline::candidates::Candidate;

/// Persona-stage template. Replace: {category}, {role}, {challenge_label},
/// {challenge_description}, {source_name}, {source_description},
/// {want_title}, {want_tags}, {want_source}.
const PERSONA_PROMPT_TEMPLATE: &str = r#"You are an expert User Persona Analyst and Cognitive Strategist. Your goal is to analyze user data to create a persona that deeply understands their underlying 'Information & Cognitive Needs'. This goes beyond topics; it's about understanding how they think, the mental models they need, and the "job" the information must do for them. The persona will power a sophisticated content recommendation engine.

First, perform a step-by-step analysis. Then, synthesize these steps into a final persona, paying close attention to the required output format.

---
## Dynamic User Data

* **Broad Category:** {category}
* **Role & Seniority:** {role}
* **Primary Challenge:** Label: {challenge_label}, Description: {challenge_description}
* **Trusted Source:** Name: {source_name}, Description: {source_description}
* **High-Value Content Signal (`want`):**
    * Title: {want_title}
    * Tags: {want_tags}
    * Source: {want_source}

---
## Reasoning Instructions

Based on the data provided, perform the following reasoning steps:

1.  **Infer Professional Context & Altitude:**
    * Deconstruct the user's role. What is the typical "altitude" of their decision-making (e.g., company-wide strategy, departmental execution)?
    * Based on their role, infer their relationship with technology. Are they a technical leader, a business leader leveraging tech, or a strategist? What level of technical detail do they need to be effective without being "in the weeds"?

2.  **Determine the Core "Job to be Done":**
    * Look at the Primary Challenge. This is the topic, but what is the underlying job? Is it to make a decision, persuade a team, de-risk a project, or understand a new domain?
    * Analyze the language—is it about growth ("Scaling ideas"), efficiency, or innovation?

3.  **Deconstruct the Cognitive Style:**
    * Analyze the Trusted Source and the High-Value Content Signal. Liking sources like "Ben Thompson" or content with tags like "Strategy", "AI", and "Economics" is a strong signal.
    * What does this imply? Infer their preference for mental models, strategic frameworks over simple tactics, and multi-dimensional analysis (tech + business + product).

4.  **Synthesize and Extrapolate Needs:**
    * Combine the insights from the previous steps. Create a cohesive narrative about this user's thinking process.
    * Extrapolate their needs. For example, a C-level executive focused on GTM for an AI product doesn't just need a GTM plan; they need to understand the economic moats of AI to build a *defensible* GTM strategy. They need to understand trade-offs to guide their product and engineering teams effectively. Project their need for strategic foresight (e.g., thinking 2-5 years ahead).

---
## Output Structure

Format your entire response using the following Markdown structure. Do NOT include your step-by-step analysis; provide only the final, clean persona.

**Executive Summary:**
(A 1-2 sentence summary of the user persona, focusing on their role and core intellectual drivers.)

**Information & Cognitive Needs:**
(Generate a bulleted list of 4-5 needs based on your synthesis. **IMPORTANT:** Each bullet point must be separated by a blank line for readability. Follow the example below.)

**EXAMPLE FORMAT:**
* This is the first bullet point. It might contain one or more sentences.

* This is the second bullet point. There is a clear blank line separating it from the first.

* This is the third bullet point, also separated by a blank line."#;

/// Scoring-dimensions template. Replace: {persona}.
const SCORING_PROMPT_TEMPLATE: &str = r#"You are an intelligent content ranking system. Your goal is to move beyond generic keywords and rank content based on its true utility to a specific professional persona. To do this, you will translate a persona's role, focus, and cognitive needs into a weighted scoring framework.
========================
## Persona:

{persona}
========================

Follow this process:

## Step 1: Identify the Core Professional Challenge

Analyze the fundamental challenge this persona faces in their professional reality. Look beyond surface-level needs to understand the deeper game they're playing.

**1a. Decode the Operational Reality:**
- **The Arena:** What competitive environment are they operating in? What are the rules of success?
- **The Stakes:** What happens if they succeed? What happens if they fail? What's the cost of inaction?
- **The Timeline:** Are they operating on quarterly cycles, multi-year transformations, or daily firefighting?
- **The Constraints:** What limitations shape their choices? (knowledge gaps, organizational inertia, market forces, stakeholder expectations)

**1b. Read Between the Lines for Hidden Context:**
Look for implicit signals that reveal their true situation:
- Language patterns that suggest their organizational maturity (e.g., "at scale" = enterprise, "defensible" = competitive pressure)
- Tension points between different needs (e.g., "velocity" vs. "governance" = struggling with pace vs. control)
- Sophistication indicators (e.g., "economics of AI moats" = beyond basic AI understanding)
- Stakeholder clues (e.g., "VC-grade analysis" = reporting to investors/board)
- Urgency markers (e.g., "market execution" = implementation pressure, not just planning)

**1c. Map What They're Really Seeking:**
Beyond information, what is this persona trying to achieve through content?
- **Navigation:** Finding paths through uncharted territory
- **Validation:** Confirming their instincts and strategies are sound
- **Acceleration:** Moving faster on familiar problems with proven patterns
- **Elevation:** Rising above tactical details to see strategic patterns
- **Translation:** Converting technical complexity into business language
- **Conviction:** Building confidence for high-stakes, irreversible decisions
- **Protection:** Avoiding predictable failures and managing downside risk

**1d. Identify the Intellectual Support Needed:**
Based on their challenge, what types of thinking do they need help with?
- **Synthesis:** Combining disparate information into coherent strategies
- **Analysis:** Breaking down complex systems into understandable components
- **Evaluation:** Assessing options against multiple competing criteria
- **Prediction:** Anticipating future states and second-order effects
- **Framing:** Creating mental models that simplify decision-making
- **Narrative Construction:** Building stories that align stakeholders

## Step 2: Identify the Core Intellectual Jobs

Based on the professional challenge analysis, determine the 2-4 fundamental "intellectual jobs" the persona is "hiring" content to perform. These aren't just information categories—they're cognitive functions the content must fulfill:

Examples of intellectual jobs:
- **Pattern Recognition:** Help me see what's signal vs. noise
- **Decision Confidence:** Give me conviction in high-stakes choices
- **Mental Model Construction:** Build my intuition for how this domain works
- **Risk Calibration:** Help me understand what could go wrong and how likely
- **Narrative Building:** Help me explain and sell this internally/externally
- **Option Generation:** Expand my sense of what's possible
- **Constraint Navigation:** Show me how to work within my limitations

## Step 3: Define Scoring Dimensions Based on Intellectual Value

Transform each intellectual job into a scoring dimension. Use language that reflects the cognitive value, not just the topic area.

Frame each dimension around the intellectual outcome:
- Instead of "Strategic Frameworks" → "Strategic Decision Architecture"
- Instead of "Market Analysis" → "Market Signal Interpretation"
- Instead of "Best Practices" → "Risk-Validated Playbooks"

## Step 4: Weight Dimensions by Challenge Criticality

Assign weights (totaling 100%) based on which aspects of their core professional challenge are most critical:

Consider:
- **Urgency Tax:** Which intellectual job has the highest time pressure?
- **Complexity Premium:** Which job involves the most variables and unknowns?
- **Stakes Multiplier:** Which job has the highest cost of being wrong?
- **Frequency Factor:** Which job occurs most often in their workflow?

## Step 5: Finalize the Output with Intellectual Clarity

For each dimension, write a definition that explicitly states the intellectual job being performed. Frame as a question that reveals what cognitive work the content accomplishes. The question should help identify content that genuinely reduces cognitive burden rather than just covering a topic.

========================
## Output Format:
**OUTPUT ONLY THE FOLLOWING - NO ADDITIONAL SECTIONS, ANALYSIS, OR COMMENTARY:**

Return EXACTLY 2-4 numbered dimensions in this markdown format:

1. **[Dimension Name]** (XX%) - *[Question that identifies if content performs this intellectual job]*

2. **[Dimension Name]** (XX%) - *[Question that identifies if content performs this intellectual job]*

3. **[Dimension Name]** (XX%) - *[Question that identifies if content performs this intellectual job]*

4. **[Dimension Name]** (XX%) - *[Question that identifies if content performs this intellectual job]*

Note: Weights must total 100%. Include brief focus points under each dimension if needed, but NO separate analysis sections, NO application notes, NO additional commentary."#;

/// Ranking template. Replace: {candidates_json}, {framework}.
const RANKING_PROMPT_TEMPLATE: &str = r#"You are an expert in evaluating and ranking content for AI-native product builders.
Your task is to assess each item in the candidates list using the evaluation framework below.

For every content item:
- Score each criterion (dimension) on a scale of 1–5.
- Provide a short reasoning for each score.
- Apply the specified weights from the framework to calculate a final weighted score (rounded to two decimal places).

After evaluating all items:
- Output the results as a JSON array of objects.
- Each object must be indexed by `videoId`.
- For each `videoId`, include:
  - `scores`: an object containing all framework dimensions, where each dimension has:
    - `score` (1–5)
    - `reasoning` (brief explanation)
  - `final_weighted_score`: the computed weighted score for that item.

=============================
### Candidates List:
{candidates_json}

=============================
### Evaluation Framework:
{framework}

=============================
### Output Format:
Return only a JSON array of objects in this format (dimensions adapt dynamically from the framework provided):

```json
[
  {
    "videoId": "<id>",
    "final_weighted_score": 4.62,
    "scores": {
      "<Dimension 1>": {
        "score": 4,
        "reasoning": "Brief explanation tied to framework dimension 1."
      },
      "<Dimension 2>": {
        "score": 5,
        "reasoning": "Brief explanation tied to framework dimension 2."
      }
    }
  }
]
```"#;

/// Builds the persona prompt from the profile's primary signals: the first
/// challenge, first trusted source, and first `want` item.
pub fn build_persona_prompt(profile: &UserProfile) -> String {
    let challenge = profile.challenges.first();
    let source = profile.trusted_sources.first();
    let want = profile.content_calibration.want.first();

    PERSONA_PROMPT_TEMPLATE
        .replace("{category}", &profile.category)
        .replace("{role}", &profile.role)
        .replace(
            "{challenge_label}",
            challenge.map_or("N/A", |c| c.label.as_str()),
        )
        .replace(
            "{challenge_description}",
            challenge.map_or("N/A", |c| c.description.as_str()),
        )
        .replace("{source_name}", source.map_or("N/A", |s| s.name.as_str()))
        .replace(
            "{source_description}",
            source.map_or("N/A", |s| s.description.as_str()),
        )
        .replace("{want_title}", want.map_or("N/A", |w| w.title.as_str()))
        .replace("{want_tags}", &format_tags(want.map(|w| w.tags.as_slice())))
        .replace("{want_source}", want.map_or("N/A", |w| w.source.as_str()))
}

/// Builds the scoring-dimensions prompt around the persona text verbatim.
pub fn build_scoring_prompt(persona: &str) -> String {
    SCORING_PROMPT_TEMPLATE.replace("{persona}", persona)
}

/// Builds the ranking prompt: candidates as an indented JSON block plus the
/// scoring-dimensions text verbatim.
pub fn build_ranking_prompt(candidates: &[Candidate], framework: &str) -> String {
    let candidates_json =
        serde_json::to_string_pretty(candidates).unwrap_or_else(|_| "[]".to_string());

    RANKING_PROMPT_TEMPLATE
        .replace("{candidates_json}", &candidates_json)
        .replace("{framework}", framework)
}

/// Renders a tag list as a JSON array literal; `[]` when there is no item.
fn format_tags(tags: Option<&[String]>) -> String {
    match tags {
        Some(tags) => serde_json::to_string(tags).unwrap_or_else(|_| "[]".to_string()),
        None => "[]".to_string(),
    }
}
