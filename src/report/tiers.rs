//! Display tiers.
//!
//! Five ordered, non-overlapping bands covering `[0, 100]`. Band selection is a
//! single scan of [`TIERS`]; everything else on a row is static presentation
//! data.

use crate::blend::{BlendedScore, SCORE_MAX};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    DeadScene,
    Weak,
    Maybe,
    Strong,
    Elite,
}

/// 24-bit colour, kept independent of any terminal library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierRow {
    pub lower: f64,
    pub upper: f64,
    /// Only the top band includes its upper bound.
    pub upper_inclusive: bool,
    pub tier: Tier,
    pub label: &'static str,
    /// Background accent.
    pub accent: Rgb,
    /// Foreground for the message text.
    pub text: Rgb,
    /// `{name}` is replaced with the display name.
    pub message: &'static str,
    pub catch_line: &'static str,
}

impl TierRow {
    pub fn contains(&self, score: f64) -> bool {
        score >= self.lower
            && (score < self.upper || (self.upper_inclusive && score <= self.upper))
    }

    pub fn message_for(&self, name: &str) -> String {
        self.message.replace("{name}", name)
    }

    /// `40-60%: Maybe`
    pub fn legend_label(&self) -> String {
        format!("{:.0}-{:.0}%: {}", self.lower, self.upper, self.label)
    }
}

/// Shown under every result.
pub const DISCLAIMER: &str = "This is a fun ML demo, not real relationship advice. But haan, gym, GPA aur \
     personality pe kaam karna kabhi waste nahi jaata.";

pub static TIERS: [TierRow; 5] = [
    TierRow {
        lower: 0.0,
        upper: 20.0,
        upper_inclusive: false,
        tier: Tier::DeadScene,
        label: "Dead scene",
        accent: Rgb(0x7f, 0x1d, 0x1d),
        text: Rgb(0xfe, 0xca, 0xca),
        message: "{name}, iss time relationship graph se zyada tumhari self-growth ka chart important hai.",
        catch_line: "Dil tumhara sahi hai, bas timing thodi galat chal rahi hai.",
    },
    TierRow {
        lower: 20.0,
        upper: 40.0,
        upper_inclusive: false,
        tier: Tier::Weak,
        label: "Weak",
        accent: Rgb(0x9a, 0x34, 0x12),
        text: Rgb(0xfe, 0xd7, 0xaa),
        message: "{name}, scene weak hai, par hopeless nahi. Work on yourself, baaki life dekh legi.",
        catch_line: "Abhi story filler episode pe hai, climax baad mein aayega.",
    },
    TierRow {
        lower: 40.0,
        upper: 60.0,
        upper_inclusive: false,
        tier: Tier::Maybe,
        label: "Maybe",
        accent: Rgb(0xca, 0x8a, 0x04),
        text: Rgb(0xfe, 0xf9, 0xc3),
        message: "{name}, 50-50 ka scene hai, thoda effort doge toh story ban sakti hai.",
        catch_line: "Chances hain, bas tum confident rehna.",
    },
    TierRow {
        lower: 60.0,
        upper: 80.0,
        upper_inclusive: false,
        tier: Tier::Strong,
        label: "Strong",
        accent: Rgb(0x15, 0x80, 0x3d),
        text: Rgb(0xbb, 0xf7, 0xd0),
        message: "{name}, strong chances hain, bas thoda sa right time, right person.",
        catch_line: "Scene bana hua hai, bas confirm hone ka wait hai.",
    },
    TierRow {
        lower: 80.0,
        upper: SCORE_MAX,
        upper_inclusive: true,
        tier: Tier::Elite,
        label: "Elite",
        accent: Rgb(0x0e, 0x74, 0x90),
        text: Rgb(0xe0, 0xf2, 0xfe),
        message: "{name}, yeh toh elite tier scene hai. Cupid ne bhi bola, OP life!",
        catch_line: "Tumhara graph bhi smooth hai, aur vibe bhi.",
    },
];

/// Pick the band for a score.
///
/// `BlendedScore` is never NaN and always inside `[0, 100]`, and the bands
/// tile that interval, so exactly one row matches.
pub fn select_tier(score: BlendedScore) -> &'static TierRow {
    let value = score.value();
    TIERS
        .iter()
        .find(|row| row.contains(value))
        .expect("tier bands cover every BlendedScore")
}
