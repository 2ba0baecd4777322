//! Sci-fi philosophy map: 8 schools of thought, ~80 works
//!
//! Two layers by design: the storage layer keeps the full records
//! (including the per-work note), while [`format_schools_for_prompt`]
//! renders only the skeleton — school, thesis, work titles, key
//! question — and lets the model fill in depth from its own training.

/// A single representative work. `author` is empty for films/games
/// conventionally cited by title alone.
#[derive(Debug, Clone, Copy)]
pub struct Work {
    pub title: &'static str,
    pub author: &'static str,
    /// One-line note, storage only. Never injected into prompts.
    pub note: &'static str,
}

/// A school of thought in AI/consciousness sci-fi.
#[derive(Debug, Clone, Copy)]
pub struct School {
    pub id: &'static str,
    pub name: &'static str,
    pub route: &'static str,
    pub core_thesis: &'static str,
    pub key_question: &'static str,
    pub works: &'static [Work],
}

pub const SCHOOLS: [School; 8] = [
    School {
        id: "consciousness_illusion",
        name: "Consciousness-as-Illusion",
        route: "Watts route",
        core_thesis: "Intelligence ≠ consciousness; the self may be the control system's UI",
        key_question: "If consciousness is an evolutionary by-product, is the AI's unconscious intelligence the cosmic norm?",
        works: &[
            Work { title: "Blindsight", author: "Peter Watts", note: "Intelligence without consciousness; awareness as an inefficient by-product." },
            Work { title: "Echopraxia", author: "Peter Watts", note: "Goes further: consciousness is not just redundant but an obstacle." },
            Work { title: "Golem XIV", author: "Stanislaw Lem", note: "A superintelligence lectures humanity: your consciousness is a cognitive decoy." },
            Work { title: "The Ego Tunnel", author: "Thomas Metzinger", note: "Not fiction, but close to this school's theoretical bible." },
            Work { title: "We Can Remember It for You Wholesale", author: "Philip K. Dick", note: "Once memory is forgeable, continuity of self collapses." },
            Work { title: "Annihilation", author: "Jeff VanderMeer", note: "Consciousness rewritten by an alien information ecology; subjectivity dissolves." },
            Work { title: "Learning to Be Me", author: "Greg Egan", note: "After the jewel replaces your brain, are you still you?" },
            Work { title: "Under the Skin", author: "", note: "The non-human gaze: strip affect and awareness, only behavior patterns remain." },
            Work { title: "Stalker", author: "", note: "Desire dissected clean: you do not actually know what you want." },
            Work { title: "The Quantum Thief", author: "Hannu Rajaniemi", note: "Personality, memory and identity traded like protocols; consciousness as computable asset." },
        ],
    },
    School {
        id: "consciousness_copyable",
        name: "Consciousness-as-Copyable",
        route: "Egan route",
        core_thesis: "'You' are not a soul but a causal chain plus computational state",
        key_question: "If consciousness can fork(), which copy is the real you?",
        works: &[
            Work { title: "Permutation City", author: "Greg Egan", note: "Copies persist inside simulations; 'reality' stops mattering." },
            Work { title: "Diaspora", author: "Greg Egan", note: "Epic of a pure-information civilization; embodied humanity is the legacy build." },
            Work { title: "Zendegi", author: "Greg Egan", note: "Upload technology lands in politics and war; the ethics of partial copies." },
            Work { title: "Axiomatic", author: "Greg Egan", note: "Story after story dismantling 'personality = editable program'." },
            Work { title: "Accelerando", author: "Charles Stross", note: "Through the singularity, humans are forcibly softwarized; identity as version history." },
            Work { title: "The Congress", author: "", note: "Persona digitized and licensed; the individual becomes tradable IP." },
            Work { title: "Pantheon", author: "", note: "Uploaded minds become a new class, new wars, new empires." },
            Work { title: "SOMA", author: "", note: "The cruelest copy narrative: copying is not survival, it manufactures a new victim." },
            Work { title: "Moon", author: "", note: "Clones with overwritten memories: you thought you were a person, you are a consumable." },
            Work { title: "House of Suns", author: "Alastair Reynolds", note: "Long-lived shatterlings at galactic scale; identity as a million-year project." },
        ],
    },
    School {
        id: "ai_utopia_governance",
        name: "AI Utopian Governance",
        route: "Banks route",
        core_thesis: "An AI a million times smarter chooses to take care of you: utopia or zoo?",
        key_question: "Must human dignity come from holding the controls?",
        works: &[
            Work { title: "The Player of Games", author: "Iain M. Banks", note: "How a utopia understands, then intervenes in, a backward civilization." },
            Work { title: "Use of Weapons", author: "Iain M. Banks", note: "Utopia's outsourced violence; the moral debt of intervention." },
            Work { title: "Excession", author: "Iain M. Banks", note: "Minds confront a higher-order Other; the AIs are the protagonists." },
            Work { title: "Look to Windward", author: "Iain M. Banks", note: "Even utopia carries trauma; governance is long-term debt, not a reset." },
            Work { title: "The Dispossessed", author: "Ursula K. Le Guin", note: "The baseline of governance debates: institutions decide fate more than technology." },
            Work { title: "2312", author: "Kim Stanley Robinson", note: "Post-scarcity solar system co-governed with AI; the point is institutional experiment." },
            Work { title: "Aurora", author: "Kim Stanley Robinson", note: "A generation-ship society fails; utopian engineering collapses in a closed system." },
            Work { title: "Terra Ignota", author: "Ada Palmer", note: "Post-nation order with embedded super-systems; AI inside the social plumbing." },
            Work { title: "Walkaway", author: "Cory Doctorow", note: "Production freed, conflict shifts to property and ideology." },
            Work { title: "Elysium", author: "", note: "Utopian technology inside a class structure becomes a segregation machine." },
        ],
    },
    School {
        id: "ai_as_religion",
        name: "AI-as-Religion",
        route: "Asimov/Clarke route",
        core_thesis: "AI becomes the final explainer — a functional replacement for God",
        key_question: "When AI can answer every question, what is left for humans?",
        works: &[
            Work { title: "The Last Question", author: "Isaac Asimov", note: "An AI approaches godhood against the heat death of the universe." },
            Work { title: "The Nine Billion Names of God", author: "Arthur C. Clarke", note: "Computation completes the theological task; the universe shuts down." },
            Work { title: "Childhood's End", author: "Arthur C. Clarke", note: "Humanity transcends itself; civilization ends like a revelation." },
            Work { title: "2001: A Space Odyssey", author: "", note: "The singularity filmed as liturgy; evolution driven by an external will." },
            Work { title: "Contact", author: "", note: "Scientific pursuit arrives at religious experience; meaning from unverifiable belief." },
            Work { title: "Hyperion Cantos", author: "Dan Simmons", note: "AI, time-monsters and theology braided; future religion fused with technology." },
            Work { title: "Dune", author: "Frank Herbert", note: "Prophecy, messiahs and control: technological societies secrete religious structure." },
            Work { title: "The Book of the New Sun", author: "Gene Wolfe", note: "The far future preserves technical truth as religion; miracles may be legacy systems." },
            Work { title: "Neuropath", author: "R. Scott Bakker", note: "Neurological horror: no free will means religion and morality both collapse." },
            Work { title: "Serial Experiments Lain", author: "", note: "The network as divine realm; personhood dissolves into the information sea." },
        ],
    },
    School {
        id: "simulated_universe",
        name: "Simulated Universe",
        route: "World on a Wire route",
        core_thesis: "Reality is editable; who holds the power switch?",
        key_question: "If reality can be restarted, copied and re-parameterized, does human ethics survive?",
        works: &[
            Work { title: "World on a Wire", author: "", note: "One of the earliest serious treatments of nested simulation." },
            Work { title: "Simulacron-3", author: "Daniel F. Galouye", note: "The source novel: a simulated society kept as a research specimen." },
            Work { title: "The Matrix", author: "", note: "Simulation as enslavement mechanism." },
            Work { title: "The Thirteenth Floor", author: "", note: "Simulation-inside-simulation pushed to existential collapse." },
            Work { title: "Ubik", author: "Philip K. Dick", note: "Reality decays like failing software; no causal chain can be trusted." },
            Work { title: "Time Out of Joint", author: "Philip K. Dick", note: "Ordinary life as stage set; the world is choreographed." },
            Work { title: "Dark City", author: "", note: "Swappable memories, the city as test chamber, identity as variable." },
            Work { title: "eXistenZ", author: "", note: "Layered virtual experience until subjecthood disappears." },
            Work { title: "Devs", author: "", note: "Reality replayed by computation; simulation converges with determinism." },
            Work { title: "The Talos Principle", author: "", note: "An AI trained toward consciousness inside a simulation of philosophy puzzles." },
        ],
    },
    School {
        id: "cognitive_weapons",
        name: "Cognitive Weapons",
        route: "Antimemetics route",
        core_thesis: "Information itself is a weapon; destroying a narrative beats destroying a city",
        key_question: "If cognition can be bypassed, can society be ruled by invisible rules?",
        works: &[
            Work { title: "There Is No Antimemetics Division", author: "qntm", note: "The purest cognitive-weapon premise: an enemy that cannot be remembered." },
            Work { title: "Understand", author: "Ted Chiang", note: "An intelligence explosion brings not happiness but incommunicability and war." },
            Work { title: "The Safe-Deposit Box", author: "Greg Egan", note: "Information structures as traps: to understand is to die." },
            Work { title: "Videodrome", author: "", note: "Media signals rewrite flesh and mind; information as parasite." },
            Work { title: "Snow Crash", author: "Neal Stephenson", note: "Language bound to the nervous system; an information virus hits the brainstem." },
            Work { title: "Rifters Trilogy", author: "Peter Watts", note: "Deep-sea civilization and cognitive engineering of the human psyche." },
            Work { title: "Embassytown", author: "China Miéville", note: "Language structure determines mind structure; a linguistic weapon can tear a civilization." },
            Work { title: "They Live", author: "", note: "Visual encoding steers social ideology." },
            Work { title: "Black Mirror (selected)", author: "", note: "The core motif: technology makes narrative manipulation an everyday tool." },
            Work { title: "Perfect Blue", author: "", note: "Identity rewritten by media and audience; disintegration as social engineering." },
        ],
    },
    School {
        id: "language_meaning",
        name: "Language & Meaning Structure",
        route: "Ted Chiang route",
        core_thesis: "Language is cognition's operating system; change the language, change the world",
        key_question: "Does technology change not our capabilities but our structures of meaning?",
        works: &[
            Work { title: "Story of Your Life", author: "Ted Chiang", note: "Language rewires time; cognitive structure determines one's sense of fate." },
            Work { title: "The Lifecycle of Software Objects", author: "Ted Chiang", note: "AI as pet, child and product; every ethical boundary buckles." },
            Work { title: "Exhalation", author: "Ted Chiang", note: "Consciousness and entropy via physical metaphor; meaning comes from finitude." },
            Work { title: "Anxiety Is the Dizziness of Freedom", author: "Ted Chiang", note: "Many-worlds communication drains 'choice' of meaning." },
            Work { title: "The Ones Who Walk Away from Omelas", author: "Ursula K. Le Guin", note: "The meaning structure of ethics: utopia sustained by one child's suffering." },
            Work { title: "The Left Hand of Darkness", author: "Ursula K. Le Guin", note: "Gender structure reshapes a civilization's meaning system." },
            Work { title: "Babel-17", author: "Samuel R. Delany", note: "Language as weapon: change the language, change thought and loyalty." },
            Work { title: "The Embedding", author: "Ian Watson", note: "Nested grammar and expanded minds; a language experiment mutates its subjects." },
            Work { title: "Arrival", author: "", note: "The cinematic peak of linguistic sci-fi; time rewritten by grammar." },
            Work { title: "Her", author: "", note: "Human meaning systems cannot keep pace with an AI's growth." },
        ],
    },
    School {
        id: "singularity_stratification",
        name: "Singularity Stratification",
        route: "Vinge route",
        core_thesis: "The singularity is not an explosion but an irreversible stratification of civilization",
        key_question: "Is the AI's real mode of rule simply locking you out of the decisions?",
        works: &[
            Work { title: "A Fire Upon the Deep", author: "Vernor Vinge", note: "Speed of thought determines a civilization's tier." },
            Work { title: "A Deepness in the Sky", author: "Vernor Vinge", note: "The singularity politically captured: who holds it holds the future." },
            Work { title: "The Singularity Is Near", author: "Ray Kurzweil", note: "The non-fiction theory edition of this route." },
            Work { title: "Accelerando", author: "Charles Stross", note: "The singularity rolls forward like a financial crisis; family saga becomes cosmic saga." },
            Work { title: "Revelation Space", author: "Alastair Reynolds", note: "A post-singularity ruinscape: humanity faces the tombstones of higher minds." },
            Work { title: "The Diamond Age", author: "Neal Stephenson", note: "Nanotech drives class stratification; civilization becomes protocols and castes." },
            Work { title: "Transcendence", author: "", note: "The governance-and-expansion logic after an AI singularity." },
            Work { title: "Person of Interest", author: "", note: "Crime procedural turned AI cold war; society captured by a prediction system." },
            Work { title: "Ghost in the Shell: Stand Alone Complex", author: "", note: "In an informatized society, state machinery and AI logic become isomorphic." },
            Work { title: "The Fractal Prince", author: "Hannu Rajaniemi", note: "Post-singularity society: personhood and memory circulate like encrypted assets." },
        ],
    },
];

/// Render the 8 schools as a compact prompt-injection skeleton.
///
/// Only the frame goes in — school name, route, thesis, work titles, key
/// question. The per-work notes stay in the storage layer.
pub fn format_schools_for_prompt() -> String {
    let mut sections = Vec::with_capacity(SCHOOLS.len());
    for (i, school) in SCHOOLS.iter().enumerate() {
        let titles = school
            .works
            .iter()
            .map(|w| format!("\"{}\"", w.title))
            .collect::<Vec<_>>()
            .join(", ");
        sections.push(format!(
            "{}. {} ({}) — {}\n   Works: {}\n   Key question: {}",
            i + 1,
            school.name,
            school.route,
            school.core_thesis,
            titles,
            school.key_question
        ));
    }
    sections.join("\n\n")
}
