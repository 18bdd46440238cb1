//! Closed catalogs: style profiles and tracked modules
//!
//! Both sets are fixed at compile time. Lookups are case-sensitive and
//! iteration follows declaration order, which is also the order used in
//! every listing shown to the user.

use serde::{Deserialize, Serialize};

/// Named preset selecting narrative tone
///
/// Purely a label stored in the tracking state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StyleProfile {
    #[default]
    #[serde(rename = "rina-kent")]
    RinaKent,
    #[serde(rename = "tarryn-fisher")]
    TarrynFisher,
    #[serde(rename = "george-rr-martin")]
    GeorgeRrMartin,
    #[serde(rename = "penelope-douglas")]
    PenelopeDouglas,
}

impl StyleProfile {
    pub const ALL: [StyleProfile; 4] = [
        StyleProfile::RinaKent,
        StyleProfile::TarrynFisher,
        StyleProfile::GeorgeRrMartin,
        StyleProfile::PenelopeDouglas,
    ];

    /// Identifier used on the command line and in storage
    pub fn id(&self) -> &'static str {
        match self {
            StyleProfile::RinaKent => "rina-kent",
            StyleProfile::TarrynFisher => "tarryn-fisher",
            StyleProfile::GeorgeRrMartin => "george-rr-martin",
            StyleProfile::PenelopeDouglas => "penelope-douglas",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StyleProfile::RinaKent => "Rina Kent",
            StyleProfile::TarrynFisher => "Tarryn Fisher",
            StyleProfile::GeorgeRrMartin => "George R.R. Martin",
            StyleProfile::PenelopeDouglas => "Penelope Douglas",
        }
    }

    pub fn from_id(id: &str) -> Option<StyleProfile> {
        Self::ALL.into_iter().find(|style| style.id() == id)
    }

    /// Comma-separated identifiers in declaration order
    pub fn id_list() -> String {
        Self::ALL.map(|style| style.id()).join(", ")
    }
}

impl std::fmt::Display for StyleProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// One of the six tracked variable categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    Emotions,
    Resources,
    Goals,
    Beliefs,
    Trauma,
    Relationships,
}

impl Module {
    pub const ALL: [Module; 6] = [
        Module::Emotions,
        Module::Resources,
        Module::Goals,
        Module::Beliefs,
        Module::Trauma,
        Module::Relationships,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Module::Emotions => "emotions",
            Module::Resources => "resources",
            Module::Goals => "goals",
            Module::Beliefs => "beliefs",
            Module::Trauma => "trauma",
            Module::Relationships => "relationships",
        }
    }

    /// The closed set of variable keys this module tracks
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            Module::Emotions => &[
                "happiness",
                "anger",
                "anxiety",
                "trust",
                "fear",
                "joy",
                "sadness",
                "pride",
                "shame",
            ],
            Module::Resources => &["will", "regulation", "focus", "energy", "social"],
            Module::Goals => &[
                "G_Seek_Connection",
                "G_Avoid_Vulnerability",
                "G_Test_Trustworthiness",
                "G_Maintain_Safety",
            ],
            Module::Beliefs => &[
                "P_Will_Abandon",
                "P_Genuine_Care",
                "P_Hidden_Agenda",
                "P_Deserving_Love",
                "trust_level",
            ],
            Module::Trauma => &[
                "betrayal",
                "abandonment",
                "emotional_neglect",
                "shame_based_abuse",
            ],
            Module::Relationships => &["trust", "intimacy", "bond_strength", "power_dynamic"],
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Module::Emotions => "😊",
            Module::Resources => "⚡",
            Module::Goals => "🎯",
            Module::Beliefs => "💭",
            Module::Trauma => "⚠️",
            Module::Relationships => "🤝",
        }
    }

    pub fn from_name(name: &str) -> Option<Module> {
        Self::ALL.into_iter().find(|module| module.name() == name)
    }

    /// Comma-separated names in declaration order
    pub fn name_list() -> String {
        Self::ALL.map(|module| module.name()).join(", ")
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
