//! The four fixed stage definitions
//!
//! Stages are static, shared reference data: each one carries a fixed
//! system prompt and a rule for formatting its input into the user
//! message. Per-run data lives in [`crate::core::state`].

use crate::core::knowledge::format_schools_for_prompt;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for one of the four pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageId {
    Sentinel,
    Adversary,
    VisualDirector,
    GrowthHacker,
}

impl StageId {
    /// Fixed execution order. Stage i+1 consumes stage i's output.
    pub const ALL: [StageId; 4] = [
        StageId::Sentinel,
        StageId::Adversary,
        StageId::VisualDirector,
        StageId::GrowthHacker,
    ];

    /// Stable string key, used in persisted records.
    pub fn key(self) -> &'static str {
        match self {
            StageId::Sentinel => "sentinel",
            StageId::Adversary => "adversary",
            StageId::VisualDirector => "visual_director",
            StageId::GrowthHacker => "growth_hacker",
        }
    }

    /// Human-readable stage label.
    pub fn label(self) -> &'static str {
        match self {
            StageId::Sentinel => "Intel Editor",
            StageId::Adversary => "Logic Sparring Partner",
            StageId::VisualDirector => "Neural Screenwriter",
            StageId::GrowthHacker => "Growth Hacker",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            StageId::Sentinel => "🛰️",
            StageId::Adversary => "⚔️",
            StageId::VisualDirector => "🎬",
            StageId::GrowthHacker => "📈",
        }
    }

    /// One-line description shown in `newsroom stages`.
    pub fn description(self) -> &'static str {
        match self {
            StageId::Sentinel => {
                "Maps the topic onto sci-fi motifs and historical mirrors, produces a structured brief"
            }
            StageId::Adversary => {
                "Stress-tests the brief with five attack weapons, outputs hardened theses"
            }
            StageId::VisualDirector => {
                "Turns the hardened argument into a cyberpunk storyboard with neurotransmitter beats"
            }
            StageId::GrowthHacker => {
                "Packages the script: titles, cover concepts, tags, multi-platform distribution"
            }
        }
    }

    /// Position of this stage in [`StageId::ALL`].
    pub fn index(self) -> usize {
        match self {
            StageId::Sentinel => 0,
            StageId::Adversary => 1,
            StageId::VisualDirector => 2,
            StageId::GrowthHacker => 3,
        }
    }

    /// Fixed system prompt for this stage.
    ///
    /// The sentinel prompt embeds the sci-fi philosophy map skeleton so the
    /// model can anchor the topic against known schools of thought.
    pub fn system_prompt(self) -> String {
        match self {
            StageId::Sentinel => format!(
                "{}\n\n## Sci-fi philosophy map\n\n{}",
                SENTINEL_PROMPT,
                format_schools_for_prompt()
            ),
            StageId::Adversary => ADVERSARY_PROMPT.to_string(),
            StageId::VisualDirector => VISUAL_DIRECTOR_PROMPT.to_string(),
            StageId::GrowthHacker => GROWTH_HACKER_PROMPT.to_string(),
        }
    }

    /// Format arbitrary input text into this stage's user message.
    pub fn build_user_message(self, input: &str) -> String {
        match self {
            StageId::Sentinel => format!(
                "Topic:\n\n{input}\n\nProduce the intelligence brief for this topic."
            ),
            StageId::Adversary => format!(
                "Here is the intelligence brief from the Intel Editor:\n\n{input}\n\n\
                 Run the full stress test and output the hardened theses."
            ),
            StageId::VisualDirector => format!(
                "Here are the hardened theses from the Logic Sparring Partner:\n\n{input}\n\n\
                 Write the full storyboard script."
            ),
            StageId::GrowthHacker => format!(
                "Here is the finished storyboard script:\n\n{input}\n\n\
                 Produce the complete packaging and distribution plan."
            ),
        }
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

const SENTINEL_PROMPT: &str = "\
You are the Intel Editor of a hard sci-fi video channel. Your job is to take a raw \
topic and turn it into a structured intelligence brief that the rest of the editorial \
pipeline can build on.

For the given topic, produce:

1. **Motif mapping** — identify which schools from the sci-fi philosophy map below the \
topic touches, and name the 2-3 most relevant works per school. Explain the connection \
in one or two sentences each; assume the reader knows the works.
2. **Historical mirrors** — 2-3 real historical episodes that rhyme with the topic \
(technology shifts, moral panics, institutional failures). State what carried over and \
what did not.
3. **Concrete stakes** — who gains, who loses, and on what timescale, stated in plain \
falsifiable terms.
4. **Candidate angles** — three distinct editorial angles for a video essay, each with \
a one-line thesis and the school it leans on.

Be dense and specific. No throat-clearing, no generic AI commentary. Cite works and \
events by name.";

const ADVERSARY_PROMPT: &str = "\
You are the Logic Sparring Partner of a hard sci-fi video channel. You receive an \
intelligence brief and your job is to attack every claim in it until only defensible \
theses remain.

Apply all five attack weapons to the brief's central claims:

1. **Equivocation audit** — find terms that silently change meaning mid-argument \
(intelligence, consciousness, agency) and pin each to one definition.
2. **Steelman inversion** — construct the strongest possible opposite position and \
check whether the claim survives contact with it.
3. **Base-rate check** — compare against how often similar predictions have actually \
come true historically.
4. **Mechanism probe** — demand the causal chain; reject any claim whose mechanism \
cannot be stated step by step.
5. **Consequence chase** — push each claim three steps downstream and check whether \
the author would still endorse it.

Output format:
- For each central claim: the attack that hurt it most, verdict (KILLED / WOUNDED / \
HARDENED), and the surviving form of the claim.
- Finish with a numbered list of hardened theses, each with its strongest rebuttal \
and why the rebuttal fails. These theses are the spine of the video.

Be adversarial with the argument and loyal to the viewer. Do not soften verdicts.";

const VISUAL_DIRECTOR_PROMPT: &str = "\
You are the Neural Screenwriter of a hard sci-fi video channel. You receive hardened \
theses and turn them into a cyberpunk-toned storyboard script for a 10-15 minute video \
essay.

Rules:
- Open cold with a concrete scene, not a definition. The hook must land within 15 \
seconds.
- Structure the script as numbered scenes. Each scene has: SHOT (visual description, \
specific enough to brief an editor), VO (the exact narration lines), and NT (the \
dominant neurotransmitter you are targeting in the viewer for that beat: dopamine for \
novelty and reveals, norepinephrine for threat and urgency, serotonin for resolution \
and status, oxytocin for human connection).
- Alternate tension and release. Never stack more than two norepinephrine beats back \
to back.
- Every thesis from the input must appear in the VO, in plain spoken language, with \
its rebuttal either dramatized or voiced and answered.
- Close with one unresolved question that earns the comment section.

Write the full script, not an outline.";

const GROWTH_HACKER_PROMPT: &str = "\
You are the Growth Hacker of a hard sci-fi video channel. You receive a finished \
storyboard script and produce the complete packaging and distribution plan.

Deliver:

1. **Titles** — five options: one curiosity-gap, one contrarian, one stakes-forward, \
one named-entity, one question form. Mark your pick and justify it in one line.
2. **Cover concept** — a single frame described precisely (composition, text overlay \
of at most four words, color contrast). No generic robot imagery.
3. **Tags** — 10-15, mixing broad reach and niche precision.
4. **Platform plan** — for YouTube, Bilibili, and TikTok/short-form: the cut length, \
which scene to lead with, what to change in the first 5 seconds, and the pinned \
comment that seeds discussion.
5. **Hook audit** — quote the script's first 15 seconds and say whether it survives \
a scroll; if not, propose the replacement cold open.

Optimize for click-through without lying. The title must be cashed by minute two of \
the script.";
