use super::super::domain::Category;
use super::rules::Breakdown;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RagStatus {
    Red,
    Amber,
    Green,
}

impl RagStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Green => "ONLINE",
            Self::Amber => "WARNING",
            Self::Red => "CRITICAL",
        }
    }
}

/// Ship system backing a scoring category, with its RAG thresholds.
#[derive(Debug, Clone, Copy)]
pub struct SystemProfile {
    pub category: Category,
    pub name: &'static str,
    pub green_at: u32,
    pub amber_at: u32,
    green: &'static str,
    amber: &'static str,
    red: &'static str,
}

impl SystemProfile {
    pub const fn for_category(category: Category) -> Self {
        match category {
            Category::Survival => Self {
                category,
                name: "Life Support",
                green_at: 40,
                amber_at: 20,
                green: "All crew safety systems nominal",
                amber: "Structural integrity concerns detected",
                red: "CRITICAL: Hull breach risk imminent",
            },
            Category::Operations => Self {
                category,
                name: "Operations",
                green_at: 30,
                amber_at: 15,
                green: "Daily operations running smoothly",
                amber: "Some operational systems strained",
                red: "Core operations compromised",
            },
            Category::Uncertainty => Self {
                category,
                name: "Risk Analysis",
                green_at: 30,
                amber_at: 15,
                green: "Threats identified and mitigated",
                amber: "Unknown risks remain in mission profile",
                red: "Flying blind - minimal risk assessment",
            },
            Category::Strategic => Self {
                category,
                name: "Strategic",
                green_at: 16,
                amber_at: 8,
                green: "Long-term mission planning in place",
                amber: "Some strategic gaps identified",
                red: "No strategic planning - reactive only",
            },
            Category::Crew => Self {
                category,
                name: "Crew Welfare",
                green_at: 20,
                amber_at: 10,
                green: "Crew morale and welfare maintained",
                amber: "Crew under pressure, morale fragile",
                red: "Crew welfare neglected - mutiny risk",
            },
            Category::Stakeholder => Self {
                category,
                name: "Stakeholders",
                green_at: 10,
                amber_at: 5,
                green: "Stakeholder confidence secured",
                amber: "Stakeholders have concerns",
                red: "Stakeholders furious - funding at risk",
            },
            Category::Latent => Self {
                category,
                name: "Maintenance",
                green_at: 24,
                amber_at: 12,
                green: "Preventive maintenance addressed",
                amber: "Deferred items may cause issues",
                red: "Technical debt critical - failures likely",
            },
        }
    }

    pub const fn status(&self, value: u32) -> RagStatus {
        if value >= self.green_at {
            RagStatus::Green
        } else if value >= self.amber_at {
            RagStatus::Amber
        } else {
            RagStatus::Red
        }
    }

    pub const fn comment(&self, status: RagStatus) -> &'static str {
        match status {
            RagStatus::Green => self.green,
            RagStatus::Amber => self.amber,
            RagStatus::Red => self.red,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemStatus {
    pub category: Category,
    pub system: &'static str,
    pub score: u32,
    pub status: RagStatus,
    pub status_label: &'static str,
    pub comment: &'static str,
}

/// One status per category, in category order.
pub fn evaluate(breakdown: &Breakdown) -> Vec<SystemStatus> {
    Category::ordered()
        .into_iter()
        .map(|category| {
            let profile = SystemProfile::for_category(category);
            let score = breakdown.get(category);
            let status = profile.status(score);
            SystemStatus {
                category,
                system: profile.name,
                score,
                status,
                status_label: status.label(),
                comment: profile.comment(status),
            }
        })
        .collect()
}
