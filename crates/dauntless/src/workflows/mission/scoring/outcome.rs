use serde::{Deserialize, Serialize};

/// Narrative band a launch lands in, ordered best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeTier {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl OutcomeTier {
    /// Top-down ladder as shown on the results screen.
    pub const fn ladder() -> [Self; 4] {
        [Self::Excellent, Self::Good, Self::Moderate, Self::Poor]
    }

    /// Highest threshold first.
    pub const fn classify(score: u32) -> Self {
        if score >= 110 {
            Self::Excellent
        } else if score >= 85 {
            Self::Good
        } else if score >= 60 {
            Self::Moderate
        } else {
            Self::Poor
        }
    }

    pub const fn minimum_score(self) -> u32 {
        match self {
            Self::Excellent => 110,
            Self::Good => 85,
            Self::Moderate => 60,
            Self::Poor => 0,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "MISSION SUCCESS",
            Self::Good => "LAUNCH APPROVED",
            Self::Moderate => "MARGINAL CLEARANCE",
            Self::Poor => "CATASTROPHIC FAILURE",
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Excellent => "mission-success",
            Self::Good => "launch-approved",
            Self::Moderate => "marginal-clearance",
            Self::Poor => "catastrophic-failure",
        }
    }

    pub const fn range_label(self) -> &'static str {
        match self {
            Self::Excellent => "110+",
            Self::Good => "85 – 109",
            Self::Moderate => "60 – 84",
            Self::Poor => "< 60",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Excellent => "The SCV Dauntless launches flawlessly. All systems operational. The crew embarks on their journey with confidence.",
            Self::Good => "The Dauntless clears launch protocols. Some concerns remain, but the vessel is spaceworthy.",
            Self::Moderate => "Launch proceeds under emergency protocols. Multiple systems show warning indicators.",
            Self::Poor => "MISSION ABORT! Critical systems compromised. The Dauntless is grounded indefinitely.",
        }
    }

    pub fn band(self) -> OutcomeBand {
        OutcomeBand {
            tier: self,
            key: self.key(),
            label: self.label(),
            range: self.range_label(),
            description: self.description(),
        }
    }
}

/// Serializable description of a tier for result payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutcomeBand {
    pub tier: OutcomeTier,
    pub key: &'static str,
    pub label: &'static str,
    pub range: &'static str,
    pub description: &'static str,
}

pub fn classify(score: u32) -> OutcomeBand {
    OutcomeTier::classify(score).band()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundaries_are_exact() {
        assert_eq!(OutcomeTier::classify(0), OutcomeTier::Poor);
        assert_eq!(OutcomeTier::classify(59), OutcomeTier::Poor);
        assert_eq!(OutcomeTier::classify(60), OutcomeTier::Moderate);
        assert_eq!(OutcomeTier::classify(84), OutcomeTier::Moderate);
        assert_eq!(OutcomeTier::classify(85), OutcomeTier::Good);
        assert_eq!(OutcomeTier::classify(109), OutcomeTier::Good);
        assert_eq!(OutcomeTier::classify(110), OutcomeTier::Excellent);
        assert_eq!(OutcomeTier::classify(u32::MAX), OutcomeTier::Excellent);
    }

    #[test]
    fn classification_never_improves_as_score_drops() {
        let mut previous = OutcomeTier::classify(200);
        for score in (0..=200).rev() {
            let tier = OutcomeTier::classify(score);
            assert!(tier >= previous, "tier improved at score {score}");
            previous = tier;
        }
    }

    #[test]
    fn every_tier_starts_at_its_minimum_score() {
        for tier in OutcomeTier::ladder() {
            assert_eq!(OutcomeTier::classify(tier.minimum_score()), tier);
        }
    }

    #[test]
    fn band_carries_display_text() {
        let band = classify(40);
        assert_eq!(band.tier, OutcomeTier::Poor);
        assert_eq!(band.label, "CATASTROPHIC FAILURE");
        assert!(band.description.starts_with("MISSION ABORT!"));
    }
}
