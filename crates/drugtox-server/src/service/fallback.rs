//! Canned replies used when the language model cannot answer.
//!
//! Rules are evaluated top to bottom against the lower-cased content of the
//! most recent user message; the first matching rule produces the reply.
//! The last rule of the default table matches everything.

use drugtox_core::types::{AnalysisNarrative, ChatMessage, last_user_content};

/// A single `(predicate, responder)` pair.
#[derive(Debug, Clone, Copy)]
pub struct FallbackRule {
    /// Stable rule name, reported on the narrative.
    pub name: &'static str,
    /// Receives the lower-cased user message.
    pub matches: fn(&str) -> bool,
    /// Receives the user message as sent.
    pub respond: fn(&str) -> String,
}

impl FallbackRule {
    /// Rule matching any message.
    pub const TECHNICAL_DIFFICULTIES: Self = Self {
        name: "technical_difficulties",
        matches: matches_any,
        respond: technical_difficulties,
    };
}

/// Ordered fallback rules.
#[derive(Debug, Clone)]
pub struct FallbackTable {
    rules: Vec<FallbackRule>,
}

impl Default for FallbackTable {
    fn default() -> Self {
        Self::new(vec![
            FallbackRule {
                name: "structure_activity",
                matches: |m| m.contains("molecular structure") && m.contains("toxicity"),
                respond: |_| STRUCTURE_ACTIVITY.to_owned(),
            },
            FallbackRule {
                name: "prediction_analysis",
                matches: |m| m.contains("toxicity prediction"),
                respond: |_| PREDICTION_ANALYSIS.to_owned(),
            },
            FallbackRule {
                name: "endpoint_explainer",
                matches: |m| m.contains("toxicity endpoint"),
                respond: |_| ENDPOINT_EXPLAINER.to_owned(),
            },
            FallbackRule {
                name: "greeting",
                matches: |m| m.contains("help") || m.contains("hello"),
                respond: |_| GREETING.to_owned(),
            },
            FallbackRule::TECHNICAL_DIFFICULTIES,
        ])
    }
}

impl FallbackTable {
    /// Creates a table from rules in evaluation order.
    pub fn new(rules: Vec<FallbackRule>) -> Self {
        Self { rules }
    }

    /// Returns the rules in evaluation order.
    pub fn rules(&self) -> &[FallbackRule] {
        &self.rules
    }

    /// Returns the first rule matching `message`.
    ///
    /// Falls back to [`FallbackRule::TECHNICAL_DIFFICULTIES`] when the table
    /// has no catch-all of its own.
    pub fn select(&self, message: &str) -> &FallbackRule {
        let lowered = message.to_lowercase();
        self.rules
            .iter()
            .find(|rule| (rule.matches)(&lowered))
            .unwrap_or(&FallbackRule::TECHNICAL_DIFFICULTIES)
    }

    /// Synthesizes a narrative for the most recent user message.
    pub fn respond(&self, messages: &[ChatMessage]) -> AnalysisNarrative {
        let message = last_user_content(messages).unwrap_or_default();
        let rule = self.select(message);
        AnalysisNarrative::fallback((rule.respond)(message), rule.name)
    }
}

fn matches_any(_: &str) -> bool {
    true
}

fn technical_difficulties(message: &str) -> String {
    format!(
        "I understand you're asking about: \"{message}\"\n\n\
         While I'm experiencing some technical difficulties with my AI service, \
         I can still point you in the right direction on chemistry and biology topics.\n\n\
         **Topics I can assist with:**\n\
         - Molecular structures and drug mechanisms\n\
         - Toxicity endpoints and safety assessment\n\
         - Chemical reactions and biological processes\n\
         - SMILES notation and computational chemistry\n\n\
         Could you rephrase your question or ask about a specific aspect?"
    )
}

const STRUCTURE_ACTIVITY: &str = "\
**How Molecular Structure Affects Toxicity**

Molecular structure determines toxicity through several mechanisms.

**Structure-Activity Relationships (SAR):**
- **Functional groups**: nitro groups and aromatic amines are frequently associated with toxicity
- **Stereochemistry**: isomers of the same compound can have very different toxic effects
- **Size and shape**: molecular dimensions affect target binding and cellular uptake

**Key structural factors:**
- **Lipophilicity** affects membrane permeability and bioaccumulation
- **Electrophilicity** lets reactive molecules bind covalently to proteins and DNA
- **Aromaticity** can lead to metabolic activation into toxic metabolites

**Computational approaches:**
- QSAR models predict toxicity from molecular descriptors
- 3D-QSAR takes spatial arrangement into account
- Machine learning models score many structural features at once

**Note:** always confirm findings against toxicological databases and professional assessment.";

const PREDICTION_ANALYSIS: &str = "\
**Reading Toxicity Prediction Results**

Each endpoint is scored independently:
- **Probability** is the model's estimate that the compound is active in that assay (0 to 1)
- **Prediction** is the resulting class, toxic or non-toxic
- **Confidence** reflects how far the probability sits from the decision boundary

**Interpreting the summary:**
- No toxic endpoints suggests a low toxicity risk
- Toxic calls on fewer than half of the endpoints suggest a moderate risk
- Toxic calls on half or more suggest a high risk

Predictions are screening aids. Confirm any concerning result experimentally.";

const ENDPOINT_EXPLAINER: &str = "\
**Toxicity Endpoints**

A toxicity endpoint is a single biological assay the model scores independently.

**Nuclear receptor (NR) assays** measure interference with hormone signalling:
- NR-AR and NR-AR-LBD: androgen receptor
- NR-ER and NR-ER-LBD: estrogen receptor
- NR-AhR: aryl hydrocarbon receptor
- NR-Aromatase: estrogen synthesis
- NR-PPAR-gamma: lipid and glucose metabolism

**Stress response (SR) assays** measure cellular damage signals:
- SR-ARE: oxidative stress
- SR-ATAD5 and SR-p53: DNA damage
- SR-HSE: heat shock response
- SR-MMP: mitochondrial membrane potential

Activity in any of these assays is a signal worth investigating, not a verdict.";

const GREETING: &str = "\
Hello! I'm your ChemBio assistant. I can help with:

**Molecular topics:**
- Structure-activity relationships
- Drug mechanisms and interactions
- Chemical properties and toxicity

**Toxicology:**
- Toxicity endpoints and assessment
- Risk evaluation methods
- Safety testing protocols

Ask me anything about chemistry, biology, or drug discovery!";
